//! Error types for the transpiler.

use std::path::PathBuf;

use reinhardt_jsx_markup::MarkupError;

use crate::settings::SettingsError;

/// Result type for transpile operations
pub type TranspileResult<T> = Result<T, TranspileError>;

/// An error that aborted a transpile call.
///
/// Positions are 1-based and refer to the text handed to the call; no
/// partial output accompanies an error.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
	/// A markup fragment failed to lex or parse
	///
	/// The offset and excerpt of `source` are taken from the caller's text,
	/// also for markup nested in embedded code.
	#[error("{line}:{column}: {source}")]
	Markup {
		line: usize,
		column: usize,
		#[source]
		source: MarkupError,
	},

	/// The host parser failed for a reason unrelated to markup
	#[error("{line}:{column}: {message}")]
	HostParse {
		message: String,
		line: usize,
		column: usize,
	},

	/// An invariant was violated
	#[error("Internal error: {0}")]
	Internal(String),

	#[error("Failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Settings error: {0}")]
	Settings(#[from] SettingsError),
}

impl TranspileError {
	/// Returns the 1-based line and column, when the error has a position.
	pub fn position(&self) -> Option<(usize, usize)> {
		match self {
			TranspileError::Markup { line, column, .. }
			| TranspileError::HostParse { line, column, .. } => Some((*line, *column)),
			_ => None,
		}
	}

	/// Returns `true` for malformed markup.
	pub fn is_markup(&self) -> bool {
		matches!(self, TranspileError::Markup { .. })
	}
}

/// Converts a byte offset into a 1-based line and character column.
///
/// Offsets past the end clamp to the end of `text`.
///
/// # Examples
///
/// ```
/// use reinhardt_jsx_core::line_column;
///
/// assert_eq!(line_column("a\nbc", 0), (1, 1));
/// assert_eq!(line_column("a\nbc", 3), (2, 2));
/// ```
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
	let mut offset = offset.min(text.len());
	while !text.is_char_boundary(offset) {
		offset -= 1;
	}
	let before = &text[..offset];
	let line = before.matches('\n').count() + 1;
	let line_start = before.rfind('\n').map_or(0, |i| i + 1);
	let column = before[line_start..].chars().count() + 1;
	(line, column)
}
