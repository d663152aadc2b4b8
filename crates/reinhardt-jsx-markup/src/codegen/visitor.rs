//! MarkupVisitor trait for code generation.

use crate::ast::{Attr, Code, Element, Node};

/// Trait for visiting markup nodes and generating output.
///
/// Implement this trait to lower a parsed fragment into a target
/// representation (e.g. call-expression source text).
pub trait MarkupVisitor {
	/// The output type produced by visiting nodes.
	type Output;

	/// The error type a visit can fail with.
	type Error;

	/// Visits a child node.
	fn visit_node(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
		match node {
			Node::Element(e) => self.visit_element(e),
			Node::Text(t) => self.visit_text(t),
			Node::EmbeddedCode(c) => self.visit_embedded_code(c),
		}
	}

	/// Visits an element.
	fn visit_element(&mut self, element: &Element) -> Result<Self::Output, Self::Error>;

	/// Visits character data.
	fn visit_text(&mut self, text: &str) -> Result<Self::Output, Self::Error>;

	/// Visits raw host code: an embedded child, attribute value or spread payload.
	fn visit_embedded_code(&mut self, code: &Code) -> Result<Self::Output, Self::Error>;

	/// Visits one `name=value` attribute.
	fn visit_attribute(&mut self, name: &str, attr: &Attr) -> Result<Self::Output, Self::Error>;
}
