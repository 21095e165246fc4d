//! Copying of the examples directory into the generated docs.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{AutodocError, Result};
use crate::fs_utils::copy_dir_all;

/// Split a Rust example into its `//!` header and the code after it.
///
/// Returns `None` if the file does not start with an inner doc comment.
pub fn split_example(source: &str) -> Option<(String, String)> {
	let mut header = Vec::new();
	let mut lines = source.lines().peekable();
	while let Some(&line) = lines.peek() {
		let Some(text) = line.trim_start().strip_prefix("//!") else {
			break;
		};
		header.push(text.strip_prefix(' ').unwrap_or(text).trim_end());
		lines.next();
	}
	if header.is_empty() {
		return None;
	}
	if lines.peek().is_some_and(|line| line.trim().is_empty()) {
		lines.next();
	}
	let mut code = lines.collect::<Vec<_>>().join("\n");
	if !code.is_empty() {
		code.push('\n');
	}
	Some((header.join("\n").trim().to_string(), code))
}

/// Markdown page for a documented example.
pub fn example_page(header: &str, code: &str) -> String {
	format!("{header}\n\n```rust\n{code}```\n")
}

/// Copy `src` into `dest` and optionally add a markdown page for every documented `.rs` file.
pub fn copy_examples(src: &Path, dest: &Path, render_pages: bool) -> Result<()> {
	info!(from = %src.display(), to = %dest.display(), "copying examples");
	copy_dir_all(src, dest)?;
	if !render_pages {
		return Ok(());
	}

	for entry in WalkDir::new(dest).sort_by_file_name() {
		let entry = entry.map_err(|err| {
			let path = err.path().unwrap_or(dest).to_path_buf();
			AutodocError::io(path, err.into())
		})?;
		let path = entry.path();
		if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
			continue;
		}
		let page = path.with_extension("md");
		if page.exists() {
			debug!(page = %page.display(), "example page already present");
			continue;
		}
		let source = fs::read_to_string(path).map_err(|err| AutodocError::io(path, err))?;
		let Some((header, code)) = split_example(&source) else {
			continue;
		};
		fs::write(&page, example_page(&header, &code)).map_err(|err| AutodocError::io(&page, err))?;
	}
	Ok(())
}
