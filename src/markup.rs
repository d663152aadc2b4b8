//! Markup fragment front end.
//!
//! This module provides access to reinhardt-jsx-markup: the lexer, parser,
//! AST and `MarkupVisitor` trait for one JSX fragment.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_jsx::markup::{Node, parse_fragment};
//!
//! let fragment = parse_fragment("<b>bold</b> + rest").unwrap();
//! assert_eq!(fragment.root.children, [Node::Text("bold".into())]);
//! assert_eq!(fragment.consumed, 11);
//! ```

pub use reinhardt_jsx_markup::*;
