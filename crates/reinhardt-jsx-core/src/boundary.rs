//! Markup fragment detection.
//!
//! Markup is found by parsing the file as plain JavaScript: the host parser
//! fails with an "unexpected token" diagnostic at the `<` that opens a
//! fragment. [`is_markup_start`] is the single place that knows what that
//! diagnostic looks like.

use crate::host::HostDiagnostic;

/// Message prefix the host parser uses for a `<` in expression position.
pub const MARKUP_SIGNATURE: &str = "Unexpected token";

/// Where a markup fragment starts, as reported by the host parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySpan {
	/// Host diagnostic that revealed the fragment
	pub message: String,
	/// Offset of the fragment's `<`
	pub position: usize,
	/// Start of the region the host parser could not parse
	pub recovered_from: usize,
	/// End of that region; the fragment's own end comes from the markup parser
	pub recovered_to: usize,
}

/// Returns `true` if `diagnostic` marks the start of a markup fragment in
/// `source`: the host rejected a `<` that is immediately followed by a tag
/// name.
pub fn is_markup_start(source: &str, diagnostic: &HostDiagnostic) -> bool {
	if !diagnostic.message.starts_with(MARKUP_SIGNATURE) {
		return false;
	}
	let Some(rest) = diagnostic.offset.and_then(|offset| source.get(offset..)) else {
		return false;
	};
	let mut chars = rest.chars();
	chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Returns the diagnostic with the smallest offset; unpositioned ones sort last.
pub fn earliest(diagnostics: &[HostDiagnostic]) -> Option<&HostDiagnostic> {
	diagnostics
		.iter()
		.min_by_key(|diagnostic| diagnostic.offset.unwrap_or(usize::MAX))
}

/// Picks the fragment the host parser stumbled on first.
///
/// Returns the earliest diagnostic itself when it is not a markup start, or a
/// generic diagnostic when the host failed without reporting any.
pub fn locate(source: &str, diagnostics: &[HostDiagnostic]) -> Result<BoundarySpan, HostDiagnostic> {
	let Some(first) = earliest(diagnostics) else {
		return Err(HostDiagnostic {
			message: "host parser failed without a diagnostic".to_string(),
			offset: None,
		});
	};
	match first.offset {
		Some(position) if is_markup_start(source, first) => Ok(BoundarySpan {
			message: first.message.clone(),
			position,
			recovered_from: position,
			recovered_to: source.len(),
		}),
		_ => Err(first.clone()),
	}
}

/// One replacement made to the text, in the coordinates of the text it was
/// applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edit {
	at: usize,
	removed: usize,
	inserted: usize,
}

/// Maps offsets in rewritten text back to the text before any rewrite.
#[derive(Debug, Clone, Default)]
pub struct OffsetMap {
	edits: Vec<Edit>,
}

impl OffsetMap {
	/// Records that `removed` bytes at `at` were replaced by `inserted` bytes.
	pub fn record(&mut self, at: usize, removed: usize, inserted: usize) {
		self.edits.push(Edit {
			at,
			removed,
			inserted,
		});
	}

	/// Maps an offset in the current text to the original text.
	///
	/// Offsets inside generated code map to the start of the fragment it
	/// replaced.
	pub fn to_original(&self, mut offset: usize) -> usize {
		for edit in self.edits.iter().rev() {
			if offset < edit.at {
				continue;
			}
			if offset < edit.at + edit.inserted {
				offset = edit.at;
			} else {
				offset = offset - edit.inserted + edit.removed;
			}
		}
		offset
	}
}
