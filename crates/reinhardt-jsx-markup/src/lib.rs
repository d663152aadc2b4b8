//! Markup front end for the reinhardt JSX transpiler.
//!
//! This crate turns one markup fragment (an element embedded in host
//! JavaScript) into a small tree that code generators walk. It knows nothing
//! about the host language beyond the brace, string and comment rules needed
//! to find where embedded code ends.
//!
//! ## Modules
//!
//! - [`token`] - token kinds produced by the lexer
//! - [`lexer`] - state-machine tokenizer, pulled one token at a time
//! - [`parser`] - token stream -> [`Element`] tree, reporting consumed bytes
//! - [`ast`] - element, attribute and child node types
//! - [`codegen`] - `MarkupVisitor` trait for lowering the tree
//!
//! ## Pipeline
//!
//! ```text
//! &str -> lex -> Tokens -> parse -> Fragment { root, consumed } -> visit -> output
//! ```
//!
//! ## Example
//!
//! ```
//! use reinhardt_jsx_markup::{Code, Node, parse_fragment};
//!
//! let fragment = parse_fragment("<p>Hi {name}</p>, rest").unwrap();
//! assert_eq!(fragment.root.name, "p");
//! assert_eq!(fragment.root.children[1], Node::EmbeddedCode(Code::new("name", 7)));
//! assert_eq!(fragment.consumed, 16);
//! ```

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Attr, AttrKind, Code, Element, NameKind, Node};
pub use codegen::MarkupVisitor;
pub use error::{MarkupError, MarkupErrorKind, excerpt};
pub use lexer::{Lexer, is_blank_code, tokenize};
pub use parser::{Fragment, MAX_NESTING_DEPTH, Parser, parse_fragment};
pub use token::{Token, TokenKind};
