//! Loading and validation of `autodoc.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AutodocError, ConfigError, Result};
use crate::object::Reference;
use crate::registry::CrateSource;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "autodoc.toml";

/// Ordered mapping of output page paths to the references rendered on them.
pub type PageSpec = IndexMap<String, Vec<Reference>>;

/// Base URL used to build `[[source]]` links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectUrl {
	/// One base URL for every crate.
	Single(String),
	/// Base URL per top-level crate name.
	PerCrate(IndexMap<String, String>),
}

impl ProjectUrl {
	/// Base URL for objects of the given crate, if any.
	pub fn base_for(&self, crate_name: &str) -> Option<&str> {
		match self {
			Self::Single(url) => Some(url),
			Self::PerCrate(urls) => urls
				.iter()
				.find(|(name, _)| name.replace('-', "_") == crate_name.replace('-', "_"))
				.map(|(_, url)| url.as_str()),
		}
	}
}

/// Settings consumed by [`crate::DocumentationGenerator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorSettings {
	/// Pages to generate, in order.
	pub pages: PageSpec,
	/// Optional source link base.
	pub project_url: Option<ProjectUrl>,
	/// Directory copied into the destination before pages are inserted.
	pub template_dir: Option<PathBuf>,
	/// Directory copied into `<destination>/examples`.
	pub examples_dir: Option<PathBuf>,
	/// Emit a markdown page next to every documented `.rs` example.
	pub render_example_pages: bool,
}

impl GeneratorSettings {
	/// Settings with the given pages and everything else unset.
	pub fn new(pages: PageSpec) -> Self {
		Self {
			pages,
			render_example_pages: true,
			..Self::default()
		}
	}

	/// Set the project URL.
	pub fn with_project_url(mut self, url: ProjectUrl) -> Self {
		self.project_url = Some(url);
		self
	}

	/// Set the template directory.
	pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.template_dir = Some(dir.into());
		self
	}

	/// Set the examples directory.
	pub fn with_examples_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.examples_dir = Some(dir.into());
		self
	}
}

/// One `[[crates]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrateEntry {
	/// Pre-generated rustdoc JSON.
	pub json: Option<PathBuf>,
	/// Manifest to document with rustdoc.
	pub manifest: Option<PathBuf>,
	/// Include private items.
	pub private: bool,
	/// Features to enable.
	pub features: Vec<String>,
	/// Enable all features.
	pub all_features: bool,
	/// Disable default features.
	pub no_default_features: bool,
}

fn default_destination() -> PathBuf {
	PathBuf::from("sources")
}

fn default_true() -> bool {
	true
}

/// Parsed `autodoc.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutodocConfig {
	/// Output directory.
	#[serde(default = "default_destination")]
	pub destination: PathBuf,
	/// Template directory.
	#[serde(default)]
	pub template_dir: Option<PathBuf>,
	/// Examples directory.
	#[serde(default)]
	pub examples_dir: Option<PathBuf>,
	/// Source link base, a string or a table keyed by crate name.
	#[serde(default)]
	pub project_url: Option<toml::Value>,
	/// Emit markdown pages for documented examples.
	#[serde(default = "default_true")]
	pub render_example_pages: bool,
	/// Crates to load into the registry.
	#[serde(default)]
	pub crates: Vec<CrateEntry>,
	/// Raw page table, validated by [`pages_from_table`].
	#[serde(default)]
	pub pages: toml::Table,
	/// Directory relative paths are resolved against.
	#[serde(skip)]
	pub base_dir: PathBuf,
}

impl AutodocConfig {
	/// Read and parse a configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|err| AutodocError::io(path, err))?;
		let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
		config.base_dir = path
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_default();
		Ok(config)
	}

	/// Parse configuration text with relative paths resolved against `base_dir`.
	pub fn from_toml(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
		let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
			path: PathBuf::from(CONFIG_FILE),
			source,
		})?;
		config.base_dir = base_dir.into();
		Ok(config)
	}

	fn resolve_path(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.base_dir.join(path)
		}
	}

	/// Output directory resolved against the configuration directory.
	pub fn destination(&self) -> PathBuf {
		self.resolve_path(&self.destination)
	}

	/// Validated project URL.
	pub fn project_url(&self) -> Result<Option<ProjectUrl>> {
		let Some(value) = &self.project_url else {
			return Ok(None);
		};
		match value {
			toml::Value::String(url) => Ok(Some(ProjectUrl::Single(url.clone()))),
			toml::Value::Table(table) => {
				let mut urls = IndexMap::new();
				for (name, url) in table {
					let url = url
						.as_str()
						.ok_or(ConfigError::InvalidProjectUrl(url.type_str()))?;
					urls.insert(name.clone(), url.to_string());
				}
				Ok(Some(ProjectUrl::PerCrate(urls)))
			}
			other => Err(ConfigError::InvalidProjectUrl(other.type_str()).into()),
		}
	}

	/// Crate sources with paths resolved against the configuration directory.
	pub fn crate_sources(&self) -> Result<Vec<CrateSource>> {
		self.crates
			.iter()
			.enumerate()
			.map(|(position, entry)| match (&entry.json, &entry.manifest) {
				(Some(json), None) => Ok(CrateSource::Json(self.resolve_path(json))),
				(None, Some(manifest)) => Ok(CrateSource::Manifest {
					path: self.resolve_path(manifest),
					private: entry.private,
					features: entry.features.clone(),
					all_features: entry.all_features,
					no_default_features: entry.no_default_features,
				}),
				_ => Err(ConfigError::InvalidCrateSource(position).into()),
			})
			.collect()
	}

	/// Validated generator settings.
	pub fn settings(&self) -> Result<GeneratorSettings> {
		Ok(GeneratorSettings {
			pages: pages_from_table(&self.pages)?,
			project_url: self.project_url()?,
			template_dir: self.template_dir.as_deref().map(|dir| self.resolve_path(dir)),
			examples_dir: self.examples_dir.as_deref().map(|dir| self.resolve_path(dir)),
			render_example_pages: self.render_example_pages,
		})
	}
}

/// Validate a raw page table: every value must be a list of reference strings.
pub fn pages_from_table(table: &toml::Table) -> std::result::Result<PageSpec, ConfigError> {
	let mut pages = PageSpec::new();
	for (key, value) in table {
		let toml::Value::Array(entries) = value else {
			return Err(ConfigError::PageNotSequence {
				key: key.clone(),
				value: value.to_string(),
				kind: value.type_str(),
			});
		};
		let references = entries
			.iter()
			.enumerate()
			.map(|(index, entry)| {
				entry
					.as_str()
					.map(Reference::from)
					.ok_or_else(|| ConfigError::InvalidReference {
						key: key.clone(),
						index,
						kind: entry.type_str(),
					})
			})
			.collect::<std::result::Result<Vec<_>, _>>()?;
		pages.insert(key.clone(), references);
	}
	Ok(pages)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const SAMPLE: &str = r#"
destination = "docs/sources"
template_dir = "templates"
project_url = { pkg = "https://example.com/pkg/blob/main" }

[[crates]]
json = "target/doc/pkg.json"

[pages]
"layers.md" = ["pkg.Dense", "pkg.Dense.call"]
"index.md" = []
"#;

	#[test]
	fn pages_keep_configuration_order() {
		let config = AutodocConfig::from_toml(SAMPLE, "/work").unwrap();
		let settings = config.settings().unwrap();
		let keys: Vec<_> = settings.pages.keys().cloned().collect();
		assert_eq!(keys, vec!["layers.md".to_string(), "index.md".to_string()]);
		assert_eq!(
			settings.pages["layers.md"],
			vec![Reference::from("pkg.Dense"), Reference::from("pkg.Dense.call")]
		);
		assert_eq!(settings.template_dir, Some(PathBuf::from("/work/templates")));
		assert_eq!(config.destination(), PathBuf::from("/work/docs/sources"));
	}

	#[test]
	fn crate_sources_resolve_relative_paths() {
		let config = AutodocConfig::from_toml(SAMPLE, "/work").unwrap();
		assert_eq!(
			config.crate_sources().unwrap(),
			vec![CrateSource::Json(PathBuf::from("/work/target/doc/pkg.json"))]
		);
	}

	#[test]
	fn non_sequence_page_is_rejected_with_key_and_type() {
		let config = AutodocConfig::from_toml("[pages]\n\"bad.md\" = \"pkg.Dense\"\n", "/work").unwrap();
		let err = config.settings().unwrap_err();
		let message = err.to_string();
		assert!(message.contains("bad.md"), "{message}");
		assert!(message.contains("type string"), "{message}");
	}

	#[test]
	fn non_string_reference_is_rejected() {
		let mut table = toml::Table::new();
		table.insert(
			"a.md".into(),
			toml::Value::Array(vec![toml::Value::from("pkg.f"), toml::Value::Integer(3)]),
		);
		let err = pages_from_table(&table).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::InvalidReference { ref key, index: 1, kind: "integer" } if key == "a.md"
		));
	}

	#[test]
	fn per_crate_url_matches_top_level_segment() {
		let config = AutodocConfig::from_toml(SAMPLE, "/work").unwrap();
		let url = config.project_url().unwrap().unwrap();
		assert_eq!(url.base_for("pkg"), Some("https://example.com/pkg/blob/main"));
		assert_eq!(url.base_for("other"), None);
	}

	#[test]
	fn crate_entry_needs_exactly_one_source() {
		let config = AutodocConfig::from_toml("[[crates]]\nprivate = true\n", "/work").unwrap();
		assert!(matches!(
			config.crate_sources().unwrap_err(),
			AutodocError::Config(ConfigError::InvalidCrateSource(0))
		));
	}
}
