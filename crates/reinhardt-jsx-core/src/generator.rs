//! Lowers markup elements into factory calls.
//!
//! ```text
//! <div className="x" id={y}>Hi {name}</div>
//! React.createElement("div", {className: "x", id: y}, "Hi ", name)
//!
//! <N {...a} {...b} c="d"/>
//! React.createElement(N, React.__spread({}, a, b, {c: "d"}))
//! ```

use reinhardt_jsx_markup::codegen::{walk_attributes, walk_children, walk_spreads};
use reinhardt_jsx_markup::{Attr, AttrKind, Code, Element, MarkupVisitor, NameKind};

use crate::driver::{Origin, Transpiler};
use crate::error::{TranspileError, TranspileResult};
use crate::host::HostParser;
use crate::settings::is_identifier;

/// Code generator for one fragment.
///
/// Embedded code is handed back to the transpiler, one nesting level deeper.
pub(crate) struct Generator<'t, 'f, P> {
	transpiler: &'t Transpiler<P>,
	depth: usize,
	/// Text error positions are reported against
	file: &'f str,
	/// Offset of the fragment in `file`
	base: usize,
}

impl<'t, 'f, P: HostParser> Generator<'t, 'f, P> {
	pub(crate) fn new(
		transpiler: &'t Transpiler<P>,
		depth: usize,
		file: &'f str,
		base: usize,
	) -> Self {
		Self {
			transpiler,
			depth,
			file,
			base,
		}
	}

	/// Transpiles code found at `offset` in the fragment.
	fn expression(&self, code: &str, offset: usize) -> TranspileResult<String> {
		let origin = Origin::expression(self.file, self.base + offset, code.len());
		self.transpiler.expression_at(code, self.depth + 1, origin)
	}

	/// Second argument of the element call.
	fn props(&mut self, element: &Element) -> TranspileResult<String> {
		let attributes = walk_attributes(self, element)?;
		let object = (!attributes.is_empty()).then(|| format!("{{{}}}", attributes.join(", ")));
		if element.spreads.is_empty() {
			return Ok(object.unwrap_or_else(|| "null".to_string()));
		}

		let mut args = vec!["{}".to_string()];
		args.extend(walk_spreads(self, element)?);
		args.extend(object);
		Ok(format!(
			"{}({})",
			self.transpiler.settings().spread_helper,
			args.join(", ")
		))
	}
}

impl<P: HostParser> MarkupVisitor for Generator<'_, '_, P> {
	type Output = String;
	type Error = TranspileError;

	fn visit_element(&mut self, element: &Element) -> TranspileResult<String> {
		let name = match element.name_kind() {
			NameKind::Intrinsic => quote(&element.name),
			NameKind::Component if element.name.split('.').all(is_identifier) => element.name.clone(),
			_ => {
				return Err(TranspileError::Internal(format!(
					"element name {:?} cannot be emitted",
					element.name
				)));
			}
		};

		let mut args = vec![name, self.props(element)?];
		args.extend(walk_children(self, element)?);
		Ok(format!(
			"{}({})",
			self.transpiler.settings().factory,
			args.join(", ")
		))
	}

	fn visit_text(&mut self, text: &str) -> TranspileResult<String> {
		Ok(quote(text))
	}

	fn visit_embedded_code(&mut self, code: &Code) -> TranspileResult<String> {
		self.expression(&code.text, code.offset)
	}

	fn visit_attribute(&mut self, name: &str, attr: &Attr) -> TranspileResult<String> {
		let key = if is_identifier(name) {
			name.to_string()
		} else {
			quote(name)
		};
		let value = match attr.kind {
			AttrKind::Literal => quote(&attr.payload),
			AttrKind::EmbeddedCode => self.expression(&attr.payload, attr.offset)?,
		};
		Ok(format!("{key}: {value}"))
	}
}

/// Renders `text` as a double-quoted JavaScript string literal.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_core::quote;
///
/// assert_eq!(quote("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
pub fn quote(text: &str) -> String {
	let mut out = String::with_capacity(text.len() + 2);
	out.push('"');
	for c in text.chars() {
		match c {
			'\\' => out.push_str("\\\\"),
			'"' => out.push_str("\\\""),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\u{2028}' => out.push_str("\\u2028"),
			'\u{2029}' => out.push_str("\\u2029"),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}
