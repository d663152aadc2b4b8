//! Transpile driver.
//!
//! The host parser stops at the first markup fragment, so the driver works in
//! rounds: parse, replace the earliest fragment with its generated call,
//! parse again. Everything before a replacement is plain JavaScript by then,
//! so each round finds its fragment strictly after the previous one. Once the
//! text parses cleanly the annotator runs over the final syntax.

use std::path::Path;

use reinhardt_jsx_markup::{
	MAX_NESTING_DEPTH, MarkupError, MarkupErrorKind, MarkupVisitor, parse_fragment,
};

use crate::annotator;
use crate::boundary::{self, OffsetMap};
use crate::emit::Emitter;
use crate::error::{TranspileError, TranspileResult, line_column};
use crate::generator::Generator;
use crate::host::{HostParse, HostParser, HostSyntax, OxcHostParser};
use crate::settings::TranspileSettings;

/// Wrapper that lets an embedded expression parse as a whole program.
const EXPRESSION_OPEN: &str = "(";
const EXPRESSION_CLOSE: &str = "\n)";

/// Where a text being transpiled sits in the text the caller handed in.
///
/// Embedded expressions are transpiled as separate, wrapped texts; their
/// errors are reported against the caller's text through this mapping.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Origin<'f> {
	/// Text that positions are reported against
	file: &'f str,
	/// Offset in `file` of the unwrapped text
	base: usize,
	/// Wrapper bytes before the unwrapped text
	lead: usize,
	/// Length of the unwrapped text
	len: usize,
}

impl<'f> Origin<'f> {
	fn file(file: &'f str) -> Self {
		Self {
			file,
			base: 0,
			lead: 0,
			len: file.len(),
		}
	}

	/// An expression of `len` bytes found at `base` in `file`.
	pub(crate) fn expression(file: &'f str, base: usize, len: usize) -> Self {
		Self {
			file,
			base,
			lead: EXPRESSION_OPEN.len(),
			len,
		}
	}

	pub(crate) fn text(&self) -> &'f str {
		self.file
	}

	/// Maps an offset in the wrapped text to an offset in `file`.
	///
	/// Offsets inside the wrapper clamp to the ends of the expression.
	pub(crate) fn to_file(&self, offset: usize) -> usize {
		self.base + offset.saturating_sub(self.lead).min(self.len)
	}
}

/// Text after every fragment has been replaced.
struct Substitution {
	text: String,
	syntax: HostSyntax,
	fragments: usize,
}

/// JSX-to-JavaScript transpiler.
///
/// A transpiler holds no per-call state and can be reused across files.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_core::Transpiler;
///
/// let transpiler = Transpiler::default();
/// let output = transpiler.transpile_source("var a = <a href={url}>go</a>;").unwrap();
/// assert_eq!(output, r#"var a = React.createElement("a", {href: url}, "go");"#);
/// ```
#[derive(Debug, Clone)]
pub struct Transpiler<P = OxcHostParser> {
	settings: TranspileSettings,
	host: P,
}

impl Default for Transpiler {
	fn default() -> Self {
		Self {
			settings: TranspileSettings::default(),
			host: OxcHostParser::default(),
		}
	}
}

impl Transpiler {
	/// Create a transpiler backed by the `oxc` parser.
	pub fn new(settings: TranspileSettings) -> TranspileResult<Self> {
		let host = OxcHostParser::new(settings.source_kind);
		Self::with_host_parser(settings, host)
	}
}

impl<P: HostParser> Transpiler<P> {
	/// Create a transpiler with a custom host parser.
	pub fn with_host_parser(settings: TranspileSettings, host: P) -> TranspileResult<Self> {
		settings.validate()?;
		Ok(Self { settings, host })
	}

	/// Returns the settings this transpiler was built with.
	pub fn settings(&self) -> &TranspileSettings {
		&self.settings
	}

	/// Transpiles a whole source text.
	///
	/// Text that already parses as JavaScript is returned unchanged.
	pub fn transpile_source(&self, source: &str) -> TranspileResult<String> {
		let substitution = self.substitute(source, 0, Origin::file(source))?;
		if substitution.fragments == 0 {
			return Ok(source.to_string());
		}
		tracing::debug!(fragments = substitution.fragments, "replaced markup fragments");
		if !self.settings.annotate_display_name {
			return Ok(substitution.text);
		}
		annotator::annotate(&substitution.text, &substitution.syntax, &self.settings)
	}

	/// Reads and transpiles a file.
	pub fn transpile_file(&self, path: impl AsRef<Path>) -> TranspileResult<String> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "transpiling file");
		let source = std::fs::read_to_string(path).map_err(|source| TranspileError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		self.transpile_source(&source)
	}

	/// Transpiles a single expression, as found inside `{...}` in markup.
	///
	/// The expression is parsed in parentheses so that object literals and
	/// trailing line comments are accepted. No annotation is applied.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_jsx_core::Transpiler;
	///
	/// let transpiler = Transpiler::default();
	/// assert_eq!(transpiler.transpile_expression("{a: 1}").unwrap(), "{a: 1}");
	/// assert_eq!(
	///     transpiler.transpile_expression("ok && <b/>").unwrap(),
	///     "ok && React.createElement(\"b\", null)"
	/// );
	/// ```
	pub fn transpile_expression(&self, code: &str) -> TranspileResult<String> {
		self.expression_at(code, 0, Origin::expression(code, 0, code.len()))
	}

	/// Transpiles embedded code nested `depth` fragments deep.
	pub(crate) fn expression_at(
		&self,
		code: &str,
		depth: usize,
		origin: Origin<'_>,
	) -> TranspileResult<String> {
		let wrapped = format!("{EXPRESSION_OPEN}{code}{EXPRESSION_CLOSE}");
		let substitution = self.substitute(&wrapped, depth, origin)?;
		substitution
			.text
			.strip_prefix(EXPRESSION_OPEN)
			.and_then(|text| text.strip_suffix(EXPRESSION_CLOSE))
			.map(str::to_string)
			.ok_or_else(|| {
				TranspileError::Internal(format!("expression wrapper lost while transpiling {code:?}"))
			})
	}

	/// Replaces markup fragments until the host parser accepts the text.
	///
	/// `depth` counts how many fragments enclose `source`; `origin` places
	/// `source` in the caller's text for error positions.
	fn substitute(
		&self,
		source: &str,
		depth: usize,
		origin: Origin<'_>,
	) -> TranspileResult<Substitution> {
		let mut text = source.to_string();
		let mut offsets = OffsetMap::default();
		let mut floor = 0;
		let mut fragments = 0;

		loop {
			let diagnostics = match self.host.parse(&text) {
				HostParse::Clean(syntax) => {
					return Ok(Substitution {
						text,
						syntax,
						fragments,
					});
				}
				HostParse::Failed(diagnostics) => diagnostics,
			};

			let span = boundary::locate(&text, &diagnostics).map_err(|diagnostic| {
				let offset = diagnostic
					.offset
					.map_or(source.len(), |offset| offsets.to_original(offset));
				let (line, column) = line_column(origin.text(), origin.to_file(offset));
				TranspileError::HostParse {
					message: diagnostic.message,
					line,
					column,
				}
			})?;
			if span.position < floor {
				return Err(TranspileError::Internal(format!(
					"markup fragment at offset {} precedes already generated code ending at {floor}",
					span.position
				)));
			}

			let fragment_text = &text[span.position..];
			let fragment_at = origin.to_file(offsets.to_original(span.position));
			let markup_error = |error: MarkupError| {
				let at = origin.to_file(offsets.to_original(span.position + error.offset));
				let (line, column) = line_column(origin.text(), at);
				TranspileError::Markup {
					line,
					column,
					source: MarkupError::new(origin.text(), at, error.kind),
				}
			};
			if depth >= MAX_NESTING_DEPTH {
				return Err(markup_error(MarkupError::new(
					fragment_text,
					0,
					MarkupErrorKind::TooDeep(MAX_NESTING_DEPTH),
				)));
			}
			let fragment = parse_fragment(fragment_text).map_err(markup_error)?;
			let end = span.position + fragment.consumed;
			tracing::debug!(
				position = span.position,
				consumed = fragment.consumed,
				depth,
				element = %fragment.root.name,
				"markup fragment"
			);

			let generated = Generator::new(self, depth, origin.text(), fragment_at)
				.visit_element(&fragment.root)?;
			let mut emitter = Emitter::new(&text);
			emitter.replace(span.position, end, &generated)?;
			let next = emitter.finish();

			offsets.record(span.position, fragment.consumed, generated.len());
			floor = span.position + generated.len();
			fragments += 1;
			text = next;
		}
	}
}

/// Transpiles `source` with default settings.
///
/// # Examples
///
/// ```
/// let js = reinhardt_jsx_core::transpile_source("render(<App/>);").unwrap();
/// assert_eq!(js, "render(React.createElement(App, null));");
/// ```
pub fn transpile_source(source: &str) -> TranspileResult<String> {
	Transpiler::default().transpile_source(source)
}

/// Reads and transpiles the file at `path` with default settings.
pub fn transpile_file(path: impl AsRef<Path>) -> TranspileResult<String> {
	Transpiler::default().transpile_file(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::HostDiagnostic;
	use rstest::*;

	#[fixture]
	fn transpiler() -> Transpiler {
		Transpiler::default()
	}

	#[rstest]
	fn test_clean_source_is_unchanged(transpiler: Transpiler) {
		let source = "var A = React.createClass({});\nif (a < b) { c(); }\n";
		assert_eq!(transpiler.transpile_source(source).unwrap(), source);
	}

	#[rstest]
	fn test_every_fragment_is_replaced(transpiler: Transpiler) {
		let source = "var a = <a/>;\nvar b = [<b/>, <c>{1}</c>];\n";
		assert_eq!(
			transpiler.transpile_source(source).unwrap(),
			"var a = React.createElement(\"a\", null);\n\
			 var b = [React.createElement(\"b\", null), React.createElement(\"c\", null, 1)];\n"
		);
	}

	#[rstest]
	fn test_annotation_follows_substitution(transpiler: Transpiler) {
		let source = "var Hello = React.createClass({render: function () { return <div/>; }});";
		assert_eq!(
			transpiler.transpile_source(source).unwrap(),
			"var Hello = React.createClass({displayName: \"Hello\", render: function () { return React.createElement(\"div\", null); }});"
		);
	}

	#[rstest]
	fn test_annotation_can_be_disabled() {
		let settings = TranspileSettings::new().with_annotate_display_name(false);
		let transpiler = Transpiler::new(settings).unwrap();
		let output = transpiler
			.transpile_source("var A = React.createClass({render: () => <p/>});")
			.unwrap();
		assert!(!output.contains("displayName"));
	}

	#[rstest]
	fn test_expression_keeps_trailing_comment(transpiler: Transpiler) {
		assert_eq!(transpiler.transpile_expression("x // note").unwrap(), "x // note");
	}

	#[rstest]
	fn test_markup_error_position_is_in_original_text(transpiler: Transpiler) {
		let source = "var a = <a/>;\nvar b = <b c=d/>;";
		let err = transpiler.transpile_source(source).unwrap_err();
		assert!(err.is_markup());
		assert_eq!(err.position(), Some((2, 14)));
	}

	#[rstest]
	fn test_host_error_position_is_in_original_text(transpiler: Transpiler) {
		let source = "var a = <a/>;\nvar b = ;";
		let err = transpiler.transpile_source(source).unwrap_err();
		assert!(matches!(err, TranspileError::HostParse { .. }), "{err:?}");
		assert_eq!(err.position(), Some((2, 9)));
	}

	#[rstest]
	#[case::child("x = <a>{<b c=d/>}</a>;", (1, 14))]
	#[case::attribute("x = <a k={<b c=d/>}/>;", (1, 16))]
	#[case::spread("x = <a {...(<b c=d/>)}/>;", (1, 18))]
	#[case::two_levels("x = <a>{<b>{<c d=e/>}</b>}</a>;", (1, 18))]
	#[case::later_line("var a = 1;\nx = <a>{\n  <b c=d/>}</a>;", (3, 8))]
	fn test_embedded_markup_error_position_is_in_original_text(
		transpiler: Transpiler,
		#[case] source: &str,
		#[case] position: (usize, usize),
	) {
		let err = transpiler.transpile_source(source).unwrap_err();
		assert!(err.is_markup(), "{err:?}");
		assert_eq!(err.position(), Some(position));
	}

	#[rstest]
	fn test_embedded_markup_error_excerpt_is_from_original_text(transpiler: Transpiler) {
		let err = transpiler
			.transpile_source("x = <a>{<b c=d/>}</a>;")
			.unwrap_err();
		let TranspileError::Markup { source, .. } = err else {
			panic!("expected a markup error, got {err:?}");
		};
		assert_eq!(source.offset, 13);
		assert_eq!(source.excerpt, "d/>}</a>;");
	}

	#[rstest]
	fn test_embedded_host_error_position_is_in_original_text(transpiler: Transpiler) {
		let err = transpiler.transpile_source("x = <a>{1 +}</a>;").unwrap_err();
		assert!(matches!(err, TranspileError::HostParse { .. }), "{err:?}");
		assert_eq!(err.position(), Some((1, 12)));
	}

	#[rstest]
	fn test_expression_error_position_is_relative_to_expression(transpiler: Transpiler) {
		let err = transpiler.transpile_expression("ok && <b c=d/>").unwrap_err();
		assert_eq!(err.position(), Some((1, 12)));
	}

	#[rstest]
	fn test_transpile_missing_file(transpiler: Transpiler) {
		let err = transpiler.transpile_file("/nonexistent/app.jsx").unwrap_err();
		assert!(matches!(err, TranspileError::Io { .. }));
	}

	#[rstest]
	fn test_invalid_settings_are_rejected() {
		let err = Transpiler::new(TranspileSettings::new().with_factory("")).unwrap_err();
		assert!(matches!(err, TranspileError::Settings(_)));
	}

	/// Host parser that reports every `<` as markup, even in generated code.
	struct EveryAngleParser;

	impl HostParser for EveryAngleParser {
		fn parse(&self, source: &str) -> HostParse {
			match source.find('<') {
				Some(offset) if !source.starts_with('(') => HostParse::Failed(vec![HostDiagnostic {
					message: "Unexpected token".to_string(),
					offset: Some(offset),
				}]),
				_ => HostParse::Clean(HostSyntax::default()),
			}
		}
	}

	#[rstest]
	fn test_fragment_behind_generated_code_is_internal_error() {
		let transpiler =
			Transpiler::with_host_parser(TranspileSettings::default(), EveryAngleParser).unwrap();
		let err = transpiler.transpile_source("x = <A>{a <b}</A>;").unwrap_err();
		assert!(matches!(err, TranspileError::Internal(_)), "{err:?}");
	}
}
