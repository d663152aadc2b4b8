//! Tokens produced by the markup lexer.

use std::fmt;

/// The kind of a markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// The lexer hit unexpected input; the token text is the message.
	Error,
	/// No more tokens.
	EndOfInput,
	/// Raw host code captured between `{` and the matching `}`.
	EmbeddedCode,
	/// Name following `<`.
	OpeningTagName,
	/// The `>` closing an opening tag.
	EndOfOpeningTag,
	/// Name following `</`; the token spans the closing `>` as well.
	ClosingTagName,
	/// The `/>` of a self-closing tag.
	SelfClosingTagEnd,
	/// Name of an attribute.
	AttributeName,
	/// Quoted attribute value, without the quotes.
	AttributeLiteralValue,
	/// `{`
	LeftBrace,
	/// `}`
	RightBrace,
	/// `...` opening a spread group.
	SpreadEllipsis,
	/// Character data between tags.
	Text,
}

impl TokenKind {
	/// Human readable description used in diagnostics.
	pub fn describe(self) -> &'static str {
		match self {
			TokenKind::Error => "lexer error",
			TokenKind::EndOfInput => "end of input",
			TokenKind::EmbeddedCode => "embedded code",
			TokenKind::OpeningTagName => "opening tag",
			TokenKind::EndOfOpeningTag => "`>`",
			TokenKind::ClosingTagName => "closing tag",
			TokenKind::SelfClosingTagEnd => "`/>`",
			TokenKind::AttributeName => "attribute name",
			TokenKind::AttributeLiteralValue => "attribute value",
			TokenKind::LeftBrace => "`{`",
			TokenKind::RightBrace => "`}`",
			TokenKind::SpreadEllipsis => "`...`",
			TokenKind::Text => "text",
		}
	}
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.describe())
	}
}

/// A token with its byte range in the lexed fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	/// Token kind
	pub kind: TokenKind,
	/// Start offset in the fragment
	pub start: usize,
	/// End offset in the fragment (exclusive)
	pub end: usize,
	/// Token payload; for [`TokenKind::Error`] this is the message
	pub text: String,
}

impl Token {
	/// Creates a new token.
	pub fn new(kind: TokenKind, start: usize, end: usize, text: impl Into<String>) -> Self {
		Self {
			kind,
			start,
			end,
			text: text.into(),
		}
	}

	/// Returns `true` for [`TokenKind::Error`].
	pub fn is_error(&self) -> bool {
		self.kind == TokenKind::Error
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind {
			TokenKind::EndOfInput => f.write_str("end of input"),
			TokenKind::Error => f.write_str(&self.text),
			_ if self.text.chars().count() > 10 => {
				let head: String = self.text.chars().take(10).collect();
				write!(f, "{} {:?}...", self.kind, head)
			}
			_ => write!(f, "{} {:?}", self.kind, self.text),
		}
	}
}
