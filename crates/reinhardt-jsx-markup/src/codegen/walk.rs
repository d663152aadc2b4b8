//! Helper functions for walking markup trees.

use crate::ast::Element;

use super::visitor::MarkupVisitor;

/// Walks all children of an element and collects outputs.
pub fn walk_children<V: MarkupVisitor>(
	visitor: &mut V,
	element: &Element,
) -> Result<Vec<V::Output>, V::Error> {
	element
		.children
		.iter()
		.map(|n| visitor.visit_node(n))
		.collect()
}

/// Walks all attributes of an element and collects outputs.
pub fn walk_attributes<V: MarkupVisitor>(
	visitor: &mut V,
	element: &Element,
) -> Result<Vec<V::Output>, V::Error> {
	element
		.attributes
		.iter()
		.map(|(name, attr)| visitor.visit_attribute(name, attr))
		.collect()
}

/// Walks all spread groups of an element and collects outputs.
pub fn walk_spreads<V: MarkupVisitor>(
	visitor: &mut V,
	element: &Element,
) -> Result<Vec<V::Output>, V::Error> {
	element
		.spreads
		.iter()
		.map(|s| visitor.visit_embedded_code(s))
		.collect()
}
