//! Code generation infrastructure.
//!
//! This module provides the `MarkupVisitor` trait that generators implement
//! to lower a parsed fragment, plus helpers that walk an element's parts.
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use reinhardt_jsx_markup::codegen::MarkupVisitor;
//! use reinhardt_jsx_markup::{Attr, Element};
//!
//! struct CallEmitter;
//!
//! impl MarkupVisitor for CallEmitter {
//!     type Output = String;
//!     type Error = MyError;
//!
//!     fn visit_element(&mut self, element: &Element) -> Result<String, MyError> {
//!         // Emit a factory call for the element
//!     }
//!     // ... implement other methods
//! }
//! ```

mod visitor;
mod walk;

pub use visitor::MarkupVisitor;
pub use walk::*;
