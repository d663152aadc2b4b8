//! Markup parser.
//!
//! Recursive descent over the lexer's token stream with one token of
//! lookahead. The root element ends the fragment: once its closing tag (or
//! `/>`) has been consumed the parser stops pulling tokens, and
//! [`Parser::last_pos`] tells the caller where host code resumes.

use crate::ast::{Attr, Code, Element, Node};
use crate::error::{MarkupError, MarkupErrorKind};
use crate::lexer::{Lexer, is_blank_code};
use crate::token::{Token, TokenKind};

/// Maximum nesting depth for elements.
/// Prevents stack overflow from pathological input.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The result of parsing one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
	/// Root element
	pub root: Element,
	/// Number of bytes of the input that belong to the fragment
	pub consumed: usize,
}

/// Parses the element at the start of `input`.
///
/// Input after the root element is left untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_markup::parse_fragment;
///
/// let fragment = parse_fragment("<a href='/'>home</a>; next()").unwrap();
/// assert_eq!(fragment.root.name, "a");
/// assert_eq!(fragment.consumed, 20);
/// ```
pub fn parse_fragment(input: &str) -> Result<Fragment, MarkupError> {
	let mut parser = Parser::new(input);
	let root = parser.parse()?;
	Ok(Fragment {
		root,
		consumed: parser.last_pos(),
	})
}

/// Markup parser over a single fragment.
pub struct Parser<'a> {
	input: &'a str,
	tokens: Lexer<'a>,
	lookahead: Option<Token>,
	last_pos: usize,
}

impl<'a> Parser<'a> {
	/// Creates a parser for `input`.
	pub fn new(input: &'a str) -> Self {
		Self {
			input,
			tokens: Lexer::new(input),
			lookahead: None,
			last_pos: 0,
		}
	}

	/// End offset of the last token consumed.
	pub fn last_pos(&self) -> usize {
		self.last_pos
	}

	/// Parses the root element.
	pub fn parse(&mut self) -> Result<Element, MarkupError> {
		self.parse_element(0)
	}

	fn next_token(&mut self) -> Token {
		let token = match self.lookahead.take() {
			Some(token) => token,
			None => self.pull(),
		};
		self.last_pos = token.end;
		token
	}

	fn peek_kind(&mut self) -> TokenKind {
		if self.lookahead.is_none() {
			let token = self.pull();
			self.lookahead = Some(token);
		}
		self.lookahead
			.as_ref()
			.map_or(TokenKind::EndOfInput, |token| token.kind)
	}

	fn pull(&mut self) -> Token {
		self.tokens.next().unwrap_or_else(|| {
			let end = self.input.len();
			Token::new(TokenKind::EndOfInput, end, end, "")
		})
	}

	fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, MarkupError> {
		let token = self.next_token();
		if token.kind == kind {
			Ok(token)
		} else {
			Err(self.unexpected(token, expected))
		}
	}

	fn unexpected(&self, token: Token, expected: &'static str) -> MarkupError {
		let kind = match token.kind {
			TokenKind::Error => MarkupErrorKind::Lex(token.text),
			found => MarkupErrorKind::UnexpectedToken { found, expected },
		};
		MarkupError::new(self.input, token.start, kind)
	}

	fn parse_element(&mut self, depth: usize) -> Result<Element, MarkupError> {
		let open = self.expect(TokenKind::OpeningTagName, "an opening tag")?;
		if depth >= MAX_NESTING_DEPTH {
			return Err(MarkupError::new(
				self.input,
				open.start,
				MarkupErrorKind::TooDeep(MAX_NESTING_DEPTH),
			));
		}
		let mut element = Element::new(open.text);

		loop {
			match self.peek_kind() {
				TokenKind::AttributeName => {
					let (name, value) = self.parse_attribute()?;
					element.attributes.insert(name, value);
				}
				TokenKind::LeftBrace => {
					let spread = self.parse_spread()?;
					element.spreads.push(spread);
				}
				TokenKind::EndOfOpeningTag => {
					self.next_token();
					self.parse_children(&mut element, depth)?;
					return Ok(element);
				}
				TokenKind::SelfClosingTagEnd => {
					self.next_token();
					return Ok(element);
				}
				_ => {
					let token = self.next_token();
					return Err(self.unexpected(token, "an attribute, `>` or `/>`"));
				}
			}
		}
	}

	/// Parses children up to and including the closing tag.
	///
	/// The closing tag name is not compared with the opening one.
	fn parse_children(&mut self, element: &mut Element, depth: usize) -> Result<(), MarkupError> {
		loop {
			match self.peek_kind() {
				TokenKind::OpeningTagName => {
					let child = self.parse_element(depth + 1)?;
					element.children.push(Node::Element(child));
				}
				TokenKind::Text => {
					let token = self.next_token();
					element.children.push(Node::Text(token.text));
				}
				TokenKind::LeftBrace => {
					let (_, code) = self.parse_embedded()?;
					if !is_blank_code(&code.text) {
						element.children.push(Node::EmbeddedCode(Code::new(code.text, code.start)));
					}
				}
				TokenKind::ClosingTagName => {
					self.next_token();
					return Ok(());
				}
				_ => {
					let token = self.next_token();
					return Err(self.unexpected(token, "a child element, text, `{` or a closing tag"));
				}
			}
		}
	}

	fn parse_attribute(&mut self) -> Result<(String, Attr), MarkupError> {
		let name = self.expect(TokenKind::AttributeName, "an attribute name")?;
		match self.peek_kind() {
			TokenKind::AttributeLiteralValue => {
				let value = self.next_token();
				Ok((name.text, Attr::literal(value.text).at(value.start)))
			}
			TokenKind::LeftBrace => {
				let (offset, code) = self.parse_embedded()?;
				if is_blank_code(&code.text) {
					return Err(MarkupError::new(
						self.input,
						offset,
						MarkupErrorKind::EmptyExpression,
					));
				}
				Ok((name.text, Attr::embedded(code.text).at(code.start)))
			}
			_ => {
				let token = self.next_token();
				Err(self.unexpected(token, "an attribute value"))
			}
		}
	}

	fn parse_spread(&mut self) -> Result<Code, MarkupError> {
		let open = self.expect(TokenKind::LeftBrace, "`{`")?;
		self.expect(TokenKind::SpreadEllipsis, "`...`")?;
		let code = self.expect(TokenKind::EmbeddedCode, "embedded code")?;
		self.expect(TokenKind::RightBrace, "`}`")?;
		if is_blank_code(&code.text) {
			return Err(MarkupError::new(
				self.input,
				open.start,
				MarkupErrorKind::EmptyExpression,
			));
		}
		Ok(Code::new(code.text, code.start))
	}

	/// Parses `{ code }`, returning the offset of `{` and the code token.
	fn parse_embedded(&mut self) -> Result<(usize, Token), MarkupError> {
		let open = self.expect(TokenKind::LeftBrace, "`{`")?;
		let code = self.expect(TokenKind::EmbeddedCode, "embedded code")?;
		self.expect(TokenKind::RightBrace, "`}`")?;
		Ok((open.start, code))
	}
}
