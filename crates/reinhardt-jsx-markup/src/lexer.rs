//! Markup lexer.
//!
//! A state machine over the fragment text. Each state consumes some input,
//! queues zero or more tokens and names the next state; the lexer is pulled
//! through [`Iterator::next`], so input after the root element is never
//! scanned unless the parser asks for it.
//!
//! ## States
//!
//! ```text
//! OpeningTag -> Attributes -> (AttributeName -> AttributeValue)* -> Children
//!                   |  \-> SpreadAttribute -> Assignment -> Attributes
//!                   \-> `/>` -> Children | OpeningTag
//! Children -> Text | OpeningTag | ClosingTag | Assignment -> Children
//! ```
//!
//! After an [`TokenKind::Error`] token the lexer halts.

use std::collections::VecDeque;

use crate::token::{Token, TokenKind};

/// Lexer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	OpeningTag,
	Attributes,
	SpreadAttribute,
	AttributeName,
	AttributeValue,
	Children,
	ClosingTag,
	Assignment,
}

/// Pull-based tokenizer for one markup fragment.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_markup::{Lexer, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("<br/>").map(|t| t.kind).collect();
/// assert_eq!(
/// 	kinds,
/// 	[TokenKind::OpeningTagName, TokenKind::SelfClosingTagEnd, TokenKind::EndOfInput]
/// );
/// ```
pub struct Lexer<'a> {
	input: &'a str,
	state: Option<State>,
	/// Current position
	pos: usize,
	/// Start of the token being scanned
	start: usize,
	/// Number of elements whose children are being scanned
	depth: usize,
	/// Whether an embedded-code capture returns to `Attributes` or `Children`
	in_attributes: bool,
	pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
	/// Creates a lexer positioned at the start of `input`.
	pub fn new(input: &'a str) -> Self {
		Self {
			input,
			state: Some(State::OpeningTag),
			pos: 0,
			start: 0,
			depth: 0,
			in_attributes: false,
			pending: VecDeque::new(),
		}
	}

	/// Returns the text being lexed.
	pub fn input(&self) -> &'a str {
		self.input
	}

	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	fn eat(&mut self, expected: char) -> bool {
		if self.peek() == Some(expected) {
			self.pos += expected.len_utf8();
			true
		} else {
			false
		}
	}

	fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
		while let Some(c) = self.peek() {
			if !pred(c) {
				break;
			}
			self.pos += c.len_utf8();
		}
	}

	fn skip_whitespace(&mut self) {
		self.eat_while(char::is_whitespace);
		self.ignore();
	}

	/// Consumes `[A-Za-z_][A-Za-z0-9_.-]*`, returning `false` if nothing matched.
	fn eat_name(&mut self) -> bool {
		match self.peek() {
			Some(c) if is_name_start(c) => {
				self.pos += c.len_utf8();
				self.eat_while(is_name_char);
				true
			}
			_ => false,
		}
	}

	/// Drops the pending input before the current position.
	fn ignore(&mut self) {
		self.start = self.pos;
	}

	fn emit(&mut self, kind: TokenKind) {
		let text = &self.input[self.start..self.pos];
		self.push(Token::new(kind, self.start, self.pos, text));
	}

	fn push(&mut self, token: Token) {
		tracing::trace!(kind = ?token.kind, start = token.start, end = token.end, "markup token");
		self.pending.push_back(token);
		self.start = self.pos;
	}

	/// Queues an error token and halts the machine.
	fn fail(&mut self, message: &str) -> Option<State> {
		self.push(Token::new(TokenKind::Error, self.start, self.pos, message));
		None
	}

	fn step(&mut self, state: State) -> Option<State> {
		match state {
			State::OpeningTag => self.lex_opening_tag(),
			State::Attributes => self.lex_attributes(),
			State::SpreadAttribute => self.lex_spread_attribute(),
			State::AttributeName => self.lex_attribute_name(),
			State::AttributeValue => self.lex_attribute_value(),
			State::Children => self.lex_children(),
			State::ClosingTag => self.lex_closing_tag(),
			State::Assignment => self.lex_assignment(),
		}
	}

	fn lex_opening_tag(&mut self) -> Option<State> {
		if self.pos >= self.input.len() {
			self.emit(TokenKind::EndOfInput);
			return None;
		}
		if !self.eat('<') {
			return self.fail("expected `<` to open a tag");
		}
		self.ignore();
		if !self.eat_name() {
			return self.fail("expected a tag name after `<`");
		}
		self.emit(TokenKind::OpeningTagName);
		Some(State::Attributes)
	}

	fn lex_attributes(&mut self) -> Option<State> {
		self.in_attributes = true;
		self.skip_whitespace();
		match self.peek() {
			Some('{') => {
				self.bump();
				self.emit(TokenKind::LeftBrace);
				Some(State::SpreadAttribute)
			}
			Some('>') => {
				self.bump();
				self.emit(TokenKind::EndOfOpeningTag);
				self.depth += 1;
				Some(State::Children)
			}
			Some('/') => {
				self.bump();
				if !self.eat('>') {
					return self.fail("expected `>` after `/`");
				}
				self.emit(TokenKind::SelfClosingTagEnd);
				Some(self.after_element())
			}
			Some(_) => Some(State::AttributeName),
			None => self.fail("unexpected end of input inside a tag"),
		}
	}

	/// State to resume in once an element has been fully scanned.
	fn after_element(&mut self) -> State {
		if self.depth > 0 {
			State::Children
		} else {
			self.skip_whitespace();
			State::OpeningTag
		}
	}

	fn lex_spread_attribute(&mut self) -> Option<State> {
		loop {
			self.skip_whitespace();
			match comment_len(self.rest()) {
				Ok(Some(len)) => self.pos += len,
				Ok(None) => break,
				Err(()) => return self.fail("unterminated block comment"),
			}
		}
		self.ignore();
		if !self.rest().starts_with("...") {
			return self.fail("expected `...` in spread attribute");
		}
		self.pos += 3;
		self.emit(TokenKind::SpreadEllipsis);
		Some(State::Assignment)
	}

	fn lex_attribute_name(&mut self) -> Option<State> {
		if !self.eat_name() {
			return self.fail("expected an attribute name");
		}
		self.emit(TokenKind::AttributeName);
		self.skip_whitespace();
		if !self.eat('=') {
			return self.fail("expected `=` after attribute name");
		}
		self.skip_whitespace();
		Some(State::AttributeValue)
	}

	fn lex_attribute_value(&mut self) -> Option<State> {
		match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.bump();
				self.ignore();
				self.eat_while(|c| c != quote);
				if self.peek().is_none() {
					return self.fail("unterminated attribute value");
				}
				self.emit(TokenKind::AttributeLiteralValue);
				self.bump();
				self.ignore();
				Some(State::Attributes)
			}
			Some('{') => {
				self.bump();
				self.emit(TokenKind::LeftBrace);
				Some(State::Assignment)
			}
			_ => self.fail("expected a quoted value or `{` after `=`"),
		}
	}

	fn lex_children(&mut self) -> Option<State> {
		self.in_attributes = false;
		loop {
			match self.peek() {
				None => return self.fail("unexpected end of input inside element children"),
				Some('<') => {
					if self.pos > self.start {
						self.emit(TokenKind::Text);
					}
					return if self.rest().starts_with("</") {
						Some(State::ClosingTag)
					} else {
						Some(State::OpeningTag)
					};
				}
				Some('{') => {
					if self.pos > self.start {
						self.emit(TokenKind::Text);
					}
					self.bump();
					self.emit(TokenKind::LeftBrace);
					return Some(State::Assignment);
				}
				Some(c) => self.pos += c.len_utf8(),
			}
		}
	}

	fn lex_closing_tag(&mut self) -> Option<State> {
		// `</` was seen by `lex_children`
		self.pos += 2;
		self.ignore();
		if !self.eat_name() {
			return self.fail("expected a tag name after `</`");
		}
		let name_start = self.start;
		let name_end = self.pos;
		self.eat_while(char::is_whitespace);
		if !self.eat('>') {
			return self.fail("expected `>` to end the closing tag");
		}
		let name = &self.input[name_start..name_end];
		self.push(Token::new(TokenKind::ClosingTagName, name_start, self.pos, name));
		self.depth = self.depth.saturating_sub(1);
		Some(self.after_element())
	}

	/// Captures host code up to the `}` matching the already emitted `{`.
	///
	/// Braces inside strings, comments and template literals do not count;
	/// `${...}` substitutions are scanned as code and may nest templates.
	fn lex_assignment(&mut self) -> Option<State> {
		let mut nesting: Vec<Nest> = Vec::new();
		let mut quote: Option<char> = None;
		loop {
			let in_template = nesting.last() == Some(&Nest::Template);
			if quote.is_none() && !in_template {
				match comment_len(self.rest()) {
					Ok(Some(len)) => {
						self.pos += len;
						continue;
					}
					Ok(None) => {}
					Err(()) => return self.fail("unterminated block comment"),
				}
			}
			let Some(c) = self.bump() else {
				return self.fail("unexpected end of input in embedded code");
			};
			if c == '\\' {
				match self.peek() {
					None => return self.fail("unexpected end of input after `\\`"),
					Some(next)
						if quote.is_some() || in_template || matches!(next, '\'' | '"' | '`' | '\\') =>
					{
						self.bump();
					}
					Some(_) => {}
				}
				continue;
			}
			if let Some(open) = quote {
				if c == open {
					quote = None;
				}
				continue;
			}
			if in_template {
				match c {
					'`' => {
						nesting.pop();
					}
					'$' if self.eat('{') => nesting.push(Nest::Substitution),
					_ => {}
				}
				continue;
			}
			match c {
				'\'' | '"' => quote = Some(c),
				'`' => nesting.push(Nest::Template),
				'{' => nesting.push(Nest::Brace),
				'}' => {
					if nesting.pop().is_none() {
						self.pos -= 1;
						self.emit(TokenKind::EmbeddedCode);
						self.bump();
						self.emit(TokenKind::RightBrace);
						return Some(if self.in_attributes {
							State::Attributes
						} else {
							State::Children
						});
					}
				}
				_ => {}
			}
		}
	}
}

/// Open constructs inside embedded code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nest {
	/// `{` in code
	Brace,
	/// `${` in a template literal
	Substitution,
	/// Template literal body
	Template,
}

impl Iterator for Lexer<'_> {
	type Item = Token;

	fn next(&mut self) -> Option<Token> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				return Some(token);
			}
			let state = self.state?;
			self.state = self.step(state);
		}
	}
}

fn is_name_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Length of the comment at the start of `rest`.
///
/// Returns `Ok(None)` when `rest` does not start with a comment and `Err(())`
/// for an unterminated block comment. A line comment stops before the line
/// terminator.
fn comment_len(rest: &str) -> Result<Option<usize>, ()> {
	if rest.starts_with("//") {
		let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
		Ok(Some(len))
	} else if let Some(body) = rest.strip_prefix("/*") {
		match body.find("*/") {
			Some(end) => Ok(Some(end + 4)),
			None => Err(()),
		}
	} else {
		Ok(None)
	}
}

/// Returns `true` if `code` holds nothing but whitespace and comments.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_markup::is_blank_code;
///
/// assert!(is_blank_code(" /* note */ // trailing"));
/// assert!(!is_blank_code(" value "));
/// ```
pub fn is_blank_code(code: &str) -> bool {
	let mut rest = code.trim_start();
	while !rest.is_empty() {
		match comment_len(rest) {
			Ok(Some(len)) => rest = rest[len..].trim_start(),
			Ok(None) | Err(()) => return false,
		}
	}
	true
}

/// Lexes `input` to completion, including the trailing error or end token.
pub fn tokenize(input: &str) -> Vec<Token> {
	Lexer::new(input).collect()
}
