//! Markup AST.
//!
//! A parsed fragment is a single root [`Element`]. Children are a closed set of
//! three variants, so generators match on [`Node`] exhaustively.

use indexmap::IndexMap;

/// How an attribute value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
	/// `name="value"` or `name='value'`
	Literal,
	/// `name={expression}`
	EmbeddedCode,
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
	/// Literal text or raw host code, depending on `kind`
	pub payload: String,
	/// How the value was written
	pub kind: AttrKind,
	/// Byte offset of `payload` in the fragment
	pub offset: usize,
}

impl Attr {
	/// Creates a quoted literal value.
	pub fn literal(payload: impl Into<String>) -> Self {
		Self {
			payload: payload.into(),
			kind: AttrKind::Literal,
			offset: 0,
		}
	}

	/// Creates an embedded-code value.
	pub fn embedded(payload: impl Into<String>) -> Self {
		Self {
			payload: payload.into(),
			kind: AttrKind::EmbeddedCode,
			offset: 0,
		}
	}

	/// Sets the fragment offset of the payload.
	pub fn at(mut self, offset: usize) -> Self {
		self.offset = offset;
		self
	}
}

/// Host code captured between `{` and `}`.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_markup::{Code, Node, parse_fragment};
///
/// let fragment = parse_fragment("<p>{count}</p>").unwrap();
/// assert_eq!(fragment.root.children, [Node::EmbeddedCode(Code::new("count", 4))]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
	/// Code text, verbatim
	pub text: String,
	/// Byte offset of `text` in the fragment
	pub offset: usize,
}

impl Code {
	pub fn new(text: impl Into<String>, offset: usize) -> Self {
		Self {
			text: text.into(),
			offset,
		}
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl PartialEq<&str> for Code {
	fn eq(&self, other: &&str) -> bool {
		self.text == *other
	}
}

/// How an element name is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
	/// Lower-case first letter: emitted as a string (`"div"`)
	Intrinsic,
	/// Upper-case first letter: emitted as an identifier (`Foo`)
	Component,
	/// Anything else
	Invalid,
}

/// One tag with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	/// Tag name
	pub name: String,
	/// Attributes; a repeated name replaces the earlier value in place
	pub attributes: IndexMap<String, Attr>,
	/// Spread groups (`{...expr}`), in source order
	pub spreads: Vec<Code>,
	/// Child nodes, in source order
	pub children: Vec<Node>,
}

impl Element {
	/// Creates an element with no attributes or children.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: IndexMap::new(),
			spreads: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Classifies the element name by its first character.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_jsx_markup::{Element, NameKind};
	///
	/// assert_eq!(Element::new("div").name_kind(), NameKind::Intrinsic);
	/// assert_eq!(Element::new("Foo").name_kind(), NameKind::Component);
	/// assert_eq!(Element::new("_x").name_kind(), NameKind::Invalid);
	/// ```
	pub fn name_kind(&self) -> NameKind {
		match self.name.chars().next() {
			Some(c) if c.is_ascii_lowercase() => NameKind::Intrinsic,
			Some(c) if c.is_ascii_uppercase() => NameKind::Component,
			_ => NameKind::Invalid,
		}
	}

	/// Returns `true` if the element has literal or embedded attributes.
	pub fn has_attributes(&self) -> bool {
		!self.attributes.is_empty()
	}
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// Nested element
	Element(Element),
	/// Character data, kept verbatim
	Text(String),
	/// Raw host code from `{...}`
	EmbeddedCode(Code),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_duplicate_attribute_keeps_last_value_in_first_position() {
		let mut element = Element::new("a");
		element.attributes.insert("x".into(), Attr::literal("1"));
		element.attributes.insert("y".into(), Attr::literal("2"));
		element.attributes.insert("x".into(), Attr::embedded("three"));

		let keys: Vec<_> = element.attributes.keys().cloned().collect();
		assert_eq!(keys, ["x", "y"]);
		assert_eq!(element.attributes["x"], Attr::embedded("three"));
	}
}
