//! File-system helpers for populating the destination directory.

use std::fs;
use std::path::Path;

use tracing::info;
use walkdir::WalkDir;

use crate::error::{AutodocError, Result};

/// Placeholder replaced by generated markdown inside template pages.
pub const MARKER: &str = "{{autogenerated}}";

/// Recursively copy `src` into `dest`, creating `dest` and overwriting files already there.
pub fn copy_dir_all(src: &Path, dest: &Path) -> Result<()> {
	if !src.is_dir() {
		return Err(AutodocError::MissingDirectory(src.to_path_buf()));
	}
	if dest.starts_with(src) {
		return Err(AutodocError::DestinationInsideSource {
			src: src.to_path_buf(),
			dest: dest.to_path_buf(),
		});
	}
	for entry in WalkDir::new(src).sort_by_file_name() {
		let entry = entry.map_err(|err| {
			let path = err.path().unwrap_or(src).to_path_buf();
			AutodocError::io(path, err.into())
		})?;
		let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
		let target = dest.join(relative);
		if entry.file_type().is_dir() {
			fs::create_dir_all(&target).map_err(|err| AutodocError::io(&target, err))?;
		} else {
			if let Some(parent) = target.parent() {
				fs::create_dir_all(parent).map_err(|err| AutodocError::io(parent, err))?;
			}
			fs::copy(entry.path(), &target).map_err(|err| AutodocError::io(entry.path(), err))?;
		}
	}
	Ok(())
}

/// Remove a directory tree, doing nothing if it is absent.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
	if path.exists() {
		fs::remove_dir_all(path).map_err(|err| AutodocError::io(path, err))?;
	}
	Ok(())
}

/// Write generated markdown into a page.
///
/// An existing page must contain [`MARKER`]; its first occurrence is replaced and the rest of the
/// template is kept. A missing page is created with `text` alone unless `require_existing` is set.
pub fn insert_in_file(text: &str, path: &Path, require_existing: bool) -> Result<()> {
	let content = if path.exists() {
		let template = fs::read_to_string(path).map_err(|err| AutodocError::io(path, err))?;
		if !template.contains(MARKER) {
			return Err(AutodocError::MissingMarker(path.to_path_buf()));
		}
		info!(page = %path.display(), "inserting autogenerated content into template");
		template.replacen(MARKER, text, 1)
	} else if require_existing {
		return Err(AutodocError::MissingTemplate(path.to_path_buf()));
	} else {
		info!(page = %path.display(), "creating new page with autogenerated content");
		text.to_string()
	};
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).map_err(|err| AutodocError::io(parent, err))?;
	}
	fs::write(path, content).map_err(|err| AutodocError::io(path, err))
}
