use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rustdoc_json::PackageTarget;
use rustdoc_types::Crate;
use tracing::info;

use crate::error::{AutodocError, Result};

/// Where the rustdoc data for a crate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrateSource {
	/// Pre-generated rustdoc JSON file.
	Json(PathBuf),
	/// Package manifest documented on demand with the nightly toolchain.
	Manifest {
		/// Path to `Cargo.toml`.
		path: PathBuf,
		/// Document private items too.
		private: bool,
		/// Features to enable.
		features: Vec<String>,
		/// Enable all features.
		all_features: bool,
		/// Disable default features.
		no_default_features: bool,
	},
}

impl CrateSource {
	/// Whether this source needs rustdoc to run.
	pub fn needs_rustdoc(&self) -> bool {
		matches!(self, Self::Manifest { .. })
	}

	/// Load the crate data for this source.
	pub fn read_crate(&self) -> Result<Crate> {
		match self {
			Self::Json(path) => read_json(path),
			Self::Manifest {
				path,
				private,
				features,
				all_features,
				no_default_features,
			} => {
				let json_path = build_rustdoc_json(
					path,
					*private,
					features,
					*all_features,
					*no_default_features,
				)?;
				read_json(&json_path)
			}
		}
	}
}

/// Decode a rustdoc JSON file.
pub fn read_json(path: &Path) -> Result<Crate> {
	let content = fs::read_to_string(path).map_err(|err| AutodocError::io(path, err))?;
	serde_json::from_str(&content).map_err(|source| AutodocError::Json {
		path: path.to_path_buf(),
		source,
	})
}

/// Pick the target rustdoc should document: the library if there is one, else the first binary.
fn package_target(manifest_path: &Path) -> Result<PackageTarget> {
	let content = fs::read_to_string(manifest_path).map_err(|err| AutodocError::io(manifest_path, err))?;
	let manifest = cargo_toml::Manifest::from_str(&content).map_err(|err| {
		AutodocError::Rustdoc(format!("failed to parse {}: {err}", manifest_path.display()))
	})?;
	let root = manifest_path.parent().unwrap_or_else(|| Path::new("."));
	let package_name = manifest
		.package
		.as_ref()
		.map(|package| package.name.clone())
		.unwrap_or_else(|| "main".to_string());

	if manifest.lib.is_some() || root.join("src/lib.rs").exists() {
		Ok(PackageTarget::Lib)
	} else if let Some(bin) = manifest.bin.first() {
		Ok(PackageTarget::Bin(bin.name.clone().unwrap_or(package_name)))
	} else if root.join("src/main.rs").exists() {
		Ok(PackageTarget::Bin(package_name))
	} else {
		Ok(PackageTarget::Lib)
	}
}

/// Whether rustup is available to select the nightly toolchain.
pub fn is_rustup_available() -> bool {
	Command::new("rustup")
		.arg("--version")
		.stderr(Stdio::null())
		.stdout(Stdio::null())
		.status()
		.map(|status| status.success())
		.unwrap_or(false)
}

/// Run rustdoc on a manifest and return the path of the generated JSON.
fn build_rustdoc_json(
	manifest_path: &Path,
	private: bool,
	features: &[String],
	all_features: bool,
	no_default_features: bool,
) -> Result<PathBuf> {
	let manifest_path =
		std::path::absolute(manifest_path).map_err(|err| AutodocError::io(manifest_path, err))?;
	info!(manifest = %manifest_path.display(), "generating rustdoc JSON");

	let mut builder = rustdoc_json::Builder::default();
	if is_rustup_available() {
		builder = builder.toolchain("nightly");
	}
	builder
		.manifest_path(&manifest_path)
		.package_target(package_target(&manifest_path)?)
		.document_private_items(private)
		.no_default_features(no_default_features)
		.all_features(all_features)
		.features(features)
		.quiet(true)
		.build()
		.map_err(|err| {
			let hint = if is_rustup_available() {
				"try running 'rustup update nightly'"
			} else {
				"ensure a nightly Rust toolchain is on PATH"
			};
			AutodocError::Rustdoc(format!("{err} ({hint})"))
		})
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn binary_only_package_documents_first_bin() -> Result<()> {
		let temp_dir = tempdir().map_err(|err| AutodocError::io("tempdir", err))?;
		let manifest_path = temp_dir.path().join("Cargo.toml");
		fs::write(
			&manifest_path,
			r#"
[package]
name = "tool-crate"
version = "0.1.0"

[[bin]]
name = "tool"
path = "src/main.rs"
"#,
		)
		.map_err(|err| AutodocError::io(&manifest_path, err))?;

		assert!(matches!(package_target(&manifest_path)?, PackageTarget::Bin(name) if name == "tool"));
		Ok(())
	}

	#[test]
	fn unreadable_json_reports_path() {
		let temp_dir = tempdir().unwrap();
		let path = temp_dir.path().join("broken.json");
		fs::write(&path, "{ not json").unwrap();
		let err = read_json(&path).unwrap_err();
		assert!(matches!(err, AutodocError::Json { .. }));
		assert!(err.to_string().contains("broken.json"));
	}
}
