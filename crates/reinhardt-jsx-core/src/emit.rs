//! Splice buffer shared by fragment substitution and annotation.

use crate::error::{TranspileError, TranspileResult};

/// Builds output from a source text and a series of in-order edits.
///
/// The cursor only moves forward: source before it has been copied or
/// replaced, source after it is still pending.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_core::Emitter;
///
/// let mut emitter = Emitter::new("x = <a/>;");
/// emitter.replace(4, 8, "A()").unwrap();
/// assert_eq!(emitter.finish(), "x = A();");
/// ```
#[derive(Debug)]
pub struct Emitter<'a> {
	source: &'a str,
	out: String,
	cursor: usize,
}

impl<'a> Emitter<'a> {
	pub fn new(source: &'a str) -> Self {
		Self {
			source,
			out: String::with_capacity(source.len()),
			cursor: 0,
		}
	}

	/// Offset in the source up to which output has been produced.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Copies pending source up to `offset` verbatim.
	pub fn copy_to(&mut self, offset: usize) -> TranspileResult<()> {
		let chunk = self.pending(offset)?;
		self.out.push_str(chunk);
		self.cursor = offset;
		Ok(())
	}

	/// Copies up to `offset`, then writes `text`.
	pub fn insert(&mut self, offset: usize, text: &str) -> TranspileResult<()> {
		self.copy_to(offset)?;
		self.out.push_str(text);
		Ok(())
	}

	/// Copies up to `start`, writes `text` and drops source up to `end`.
	pub fn replace(&mut self, start: usize, end: usize, text: &str) -> TranspileResult<()> {
		self.insert(start, text)?;
		self.pending(end)?;
		self.cursor = end;
		Ok(())
	}

	/// Copies the rest of the source and returns the output.
	pub fn finish(mut self) -> String {
		self.out.push_str(&self.source[self.cursor..]);
		self.out
	}

	fn pending(&self, offset: usize) -> TranspileResult<&'a str> {
		self.source.get(self.cursor..offset).ok_or_else(|| {
			TranspileError::Internal(format!(
				"edit at offset {offset} is behind the emitted position {} or outside the source",
				self.cursor
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_no_edits_is_identity() {
		assert_eq!(Emitter::new("a < b").finish(), "a < b");
	}

	#[rstest]
	fn test_edits_in_order() {
		let mut emitter = Emitter::new("f({}); g({});");
		emitter.insert(3, "k: 1").unwrap();
		emitter.insert(10, "k: 2").unwrap();
		assert_eq!(emitter.cursor(), 10);
		assert_eq!(emitter.finish(), "f({k: 1}); g({k: 2});");
	}

	#[rstest]
	fn test_edit_behind_cursor_is_internal_error() {
		let mut emitter = Emitter::new("abcdef");
		emitter.replace(2, 4, "X").unwrap();
		let err = emitter.insert(3, "Y").unwrap_err();
		assert!(matches!(err, TranspileError::Internal(_)));
	}

	#[rstest]
	fn test_edit_past_end_is_internal_error() {
		let mut emitter = Emitter::new("ab");
		assert!(emitter.copy_to(3).is_err());
	}

	#[rstest]
	fn test_edit_inside_char_is_internal_error() {
		let mut emitter = Emitter::new("é");
		assert!(emitter.copy_to(1).is_err());
	}
}
