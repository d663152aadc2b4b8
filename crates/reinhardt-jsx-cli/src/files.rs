//! File collection utilities for directory inputs.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension of the files collected from a directory.
pub(crate) const JSX_EXTENSION: &str = "jsx";

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 3] = ["node_modules", "target", ".git"];

/// Collect all JSX files from a path.
///
/// If the path is a file with `.jsx` extension, returns a vector with just that file.
/// If the path is a directory, recursively collects all `.jsx` files, excluding
/// `node_modules/`, `target/` and `.git/` directories below it. Files are
/// returned in path order. Entries that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns a [`io::ErrorKind::NotFound`] error if the path does not exist.
pub(crate) fn collect_jsx_files(path: &Path) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	if path.is_file() {
		if path.extension().is_some_and(|ext| ext == JSX_EXTENSION) {
			files.push(path.to_path_buf());
		}
	} else if path.is_dir() {
		for entry in WalkDir::new(path)
			.follow_links(true)
			.sort_by_file_name()
			.into_iter()
			.filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e.path()))
			.filter_map(|entry| {
				entry
					.inspect_err(|e| tracing::warn!(error = %e, "skipping unreadable entry"))
					.ok()
			}) {
			let entry_path = entry.path();
			if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == JSX_EXTENSION) {
				files.push(entry_path.to_path_buf());
			}
		}
	} else {
		return Err(io::Error::new(
			io::ErrorKind::NotFound,
			format!("Path does not exist: {}", path.display()),
		));
	}

	Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
	path.is_dir()
		&& path
			.file_name()
			.is_some_and(|name| SKIPPED_DIRS.iter().any(|skipped| name == *skipped))
}

/// Where the output for `file`, found under `root`, is written.
///
/// Without `out_dir` the output sits next to the input; with it, the input's
/// position relative to `root` is mirrored under `out_dir`.
pub(crate) fn output_path(root: &Path, file: &Path, out_dir: Option<&Path>, ext: &str) -> PathBuf {
	let target = match out_dir {
		Some(out_dir) => out_dir.join(file.strip_prefix(root).unwrap_or(file)),
		None => file.to_path_buf(),
	};
	target.with_extension(ext)
}
