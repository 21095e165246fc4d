//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Problems found while validating an `autodoc.toml` or a page table.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A page maps to something other than an ordered list of references.
	#[error(
		"`pages` must map file paths to lists of objects. Expected a list for `{key}`, but got {value} of type {kind}."
	)]
	PageNotSequence {
		/// Offending page key.
		key: String,
		/// Rendered value that was supplied.
		value: String,
		/// Type name of the supplied value.
		kind: &'static str,
	},
	/// A page list contains something other than a reference string.
	#[error("page `{key}` entry {index} must be a dotted reference string, got a value of type {kind}")]
	InvalidReference {
		/// Offending page key.
		key: String,
		/// Position of the entry within the page list.
		index: usize,
		/// Type name of the supplied entry.
		kind: &'static str,
	},
	/// `project_url` is neither a string nor a table of strings.
	#[error("`project_url` must be a string or a table of strings, got {0}")]
	InvalidProjectUrl(&'static str),
	/// A `[[crates]]` entry names neither a JSON file nor a manifest.
	#[error("crate source #{0} must set exactly one of `json` or `manifest`")]
	InvalidCrateSource(usize),
	/// The configuration file could not be parsed.
	#[error("failed to parse {path}: {source}")]
	Parse {
		/// Configuration file path.
		path: PathBuf,
		/// Underlying TOML error.
		#[source]
		source: toml::de::Error,
	},
}

/// Failures while turning a reference into an object.
#[derive(Debug, Error)]
pub enum ResolveError {
	/// The reference string was empty.
	#[error("cannot resolve an empty reference")]
	EmptyReference,
	/// No loaded crate matches the first path segment.
	#[error("no crate named `{name}` is loaded (while resolving `{reference}`)")]
	UnknownCrate {
		/// First segment of the reference.
		name: String,
		/// Full reference being resolved.
		reference: String,
	},
	/// A member lookup failed.
	#[error("`{owner}` has no member `{name}` (while resolving `{reference}`)")]
	UnknownAttribute {
		/// Longest prefix that did resolve.
		owner: String,
		/// Segment that could not be found.
		name: String,
		/// Full reference being resolved.
		reference: String,
	},
	/// The reference names an item that cannot be documented.
	#[error("`{reference}` is a {kind}, only functions, classes and methods can be documented")]
	Unsupported {
		/// Full reference being resolved.
		reference: String,
		/// Label describing the item that was found.
		kind: &'static str,
	},
}

/// Aggregate error returned by the public API.
#[derive(Debug, Error)]
pub enum AutodocError {
	/// Invalid configuration.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A reference could not be resolved.
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	/// A file-system operation failed.
	#[error("{}: {source}", path.display())]
	Io {
		/// Path involved in the failed operation.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// A template page exists but has no `{{autogenerated}}` marker.
	#[error("template found for {} but missing {{{{autogenerated}}}} tag", .0.display())]
	MissingMarker(PathBuf),
	/// A page has no template to insert into after the template copy.
	#[error("no template page at {} to insert generated content into", .0.display())]
	MissingTemplate(PathBuf),
	/// A configured directory does not exist.
	#[error("directory not found: {}", .0.display())]
	MissingDirectory(PathBuf),
	/// A copy destination lies inside the directory being copied.
	#[error("cannot copy {} into {}, which is inside it", src.display(), dest.display())]
	DestinationInsideSource {
		/// Directory being copied.
		src: PathBuf,
		/// Destination nested in `src`.
		dest: PathBuf,
	},
	/// rustdoc JSON could not be generated.
	#[error("failed to generate rustdoc JSON: {0}")]
	Rustdoc(String),
	/// rustdoc JSON could not be decoded.
	#[error("failed to parse rustdoc JSON from {}: {source}", path.display())]
	Json {
		/// JSON file that failed to parse.
		path: PathBuf,
		/// Underlying decoding error.
		#[source]
		source: serde_json::Error,
	},
}

impl AutodocError {
	/// Wrap an IO error with the path it concerns.
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Result type returned by the autodoc library.
pub type Result<T> = std::result::Result<T, AutodocError>;
