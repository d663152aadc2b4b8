//! Markup error types.

use crate::token::TokenKind;

/// Number of characters shown in an error excerpt.
const EXCERPT_LEN: usize = 20;

/// An error that aborted lexing or parsing of a markup fragment.
///
/// Offsets are relative to the fragment that was handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset} near {excerpt:?}")]
pub struct MarkupError {
	/// Byte offset of the offending input in the fragment
	pub offset: usize,
	/// Short excerpt of the fragment starting at `offset`
	pub excerpt: String,
	/// The kind of error
	pub kind: MarkupErrorKind,
}

/// The kind of markup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupErrorKind {
	/// Malformed token stream (unterminated tag, value, comment, ...)
	#[error("{0}")]
	Lex(String),
	/// A token that the grammar does not allow at this point
	#[error("unexpected {found}, expected {expected}")]
	UnexpectedToken {
		found: TokenKind,
		expected: &'static str,
	},
	/// `{}` used as an attribute value or spread payload
	#[error("empty expression")]
	EmptyExpression,
	/// Element nesting exceeded the parser limit
	#[error("elements nested deeper than {0} levels")]
	TooDeep(usize),
}

impl MarkupError {
	/// Creates a new error, capturing an excerpt of `input` at `offset`.
	pub fn new(input: &str, offset: usize, kind: MarkupErrorKind) -> Self {
		Self {
			offset,
			excerpt: excerpt(input, offset),
			kind,
		}
	}

	/// Returns `true` when the error was raised by the lexer rather than the parser.
	pub fn is_lex_error(&self) -> bool {
		matches!(self.kind, MarkupErrorKind::Lex(_))
	}
}

/// Returns up to [`EXCERPT_LEN`] characters of `input` starting at `offset`.
///
/// Offsets that do not fall on a character boundary are moved back to the
/// previous boundary.
pub fn excerpt(input: &str, offset: usize) -> String {
	let mut start = offset.min(input.len());
	while !input.is_char_boundary(start) {
		start -= 1;
	}
	input[start..].chars().take(EXCERPT_LEN).collect()
}
