//! The documentation generator.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{AutodocConfig, GeneratorSettings, PageSpec, ProjectUrl};
use crate::error::Result;
use crate::examples::copy_examples;
use crate::fs_utils::{copy_dir_all, insert_in_file, remove_dir_if_exists};
use crate::object::{ClassAliases, ObjectKind, Reference, normalize_reference};
use crate::registry::ObjectRegistry;
use crate::render::{DefaultHooks, RenderHooks, render_object};

/// Renders configured pages of references into a destination directory.
///
/// The class alias table is built once in [`DocumentationGenerator::new`]: every string reference
/// that resolves to a class records its canonical dotted path under the name the user wrote, and
/// every later signature mentioning that class displays the user's name.
pub struct DocumentationGenerator {
	pages: PageSpec,
	project_url: Option<ProjectUrl>,
	template_dir: Option<PathBuf>,
	examples_dir: Option<PathBuf>,
	render_example_pages: bool,
	registry: ObjectRegistry,
	class_aliases: ClassAliases,
	hooks: Box<dyn RenderHooks>,
}

impl fmt::Debug for DocumentationGenerator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DocumentationGenerator")
			.field("pages", &self.pages)
			.field("project_url", &self.project_url)
			.field("template_dir", &self.template_dir)
			.field("examples_dir", &self.examples_dir)
			.field("class_aliases", &self.class_aliases)
			.finish_non_exhaustive()
	}
}

impl DocumentationGenerator {
	/// Create a generator and build its class alias table.
	pub fn new(settings: GeneratorSettings, registry: ObjectRegistry) -> Result<Self> {
		let class_aliases = build_class_aliases(&settings.pages, &registry)?;
		Ok(Self {
			pages: settings.pages,
			project_url: settings.project_url,
			template_dir: settings.template_dir,
			examples_dir: settings.examples_dir,
			render_example_pages: settings.render_example_pages,
			registry,
			class_aliases,
			hooks: Box::new(DefaultHooks),
		})
	}

	/// Create a generator from a parsed configuration file.
	pub fn from_config(config: &AutodocConfig, registry: ObjectRegistry) -> Result<Self> {
		Self::new(config.settings()?, registry)
	}

	/// Replace the signature and docstring hooks.
	pub fn with_hooks(mut self, hooks: impl RenderHooks + 'static) -> Self {
		self.hooks = Box::new(hooks);
		self
	}

	/// Alias table mapping canonical class paths to configured names.
	pub fn class_aliases(&self) -> &ClassAliases {
		&self.class_aliases
	}

	/// Pages in configuration order.
	pub fn pages(&self) -> &PageSpec {
		&self.pages
	}

	/// Registry references are resolved against.
	pub fn registry(&self) -> &ObjectRegistry {
		&self.registry
	}

	/// Render a single reference into a markdown block.
	pub fn render(&self, reference: &Reference) -> Result<String> {
		let object = self.registry.resolve_reference(reference)?;
		let signature_override = match reference {
			Reference::Path(path) if object.kind == ObjectKind::Method => Some(last_segments(path, 2)),
			Reference::Path(path) => Some(path.clone()),
			Reference::Object(_) => None,
		};
		debug!(reference = %reference, kind = %object.kind, "rendering");
		Ok(render_object(
			&object,
			signature_override.as_deref(),
			&self.class_aliases,
			self.hooks.as_ref(),
			self.project_url.as_ref(),
		))
	}

	/// Render every reference of a page, in order.
	pub fn render_page(&self, references: &[Reference]) -> Result<String> {
		let mut markdown = String::new();
		for reference in references {
			markdown.push_str(&self.render(reference)?);
		}
		Ok(markdown)
	}

	/// Generate all pages into `destination`, replacing whatever was there.
	pub fn generate(&self, destination: &Path) -> Result<()> {
		info!("Cleaning up existing sources directory.");
		remove_dir_if_exists(destination)?;

		info!("Populating sources directory with templates.");
		if let Some(template_dir) = &self.template_dir {
			copy_dir_all(template_dir, destination)?;
		}

		for (page, references) in &self.pages {
			let markdown = self.render_page(references)?;
			insert_in_file(&markdown, &destination.join(page), self.template_dir.is_some())?;
		}

		if let Some(examples_dir) = &self.examples_dir {
			copy_examples(examples_dir, &destination.join("examples"), self.render_example_pages)?;
		}
		Ok(())
	}
}

/// Last `count` dotted segments of a reference.
fn last_segments(reference: &str, count: usize) -> String {
	let normalized = normalize_reference(reference);
	let segments: Vec<&str> = normalized.split('.').collect();
	segments[segments.len().saturating_sub(count)..].join(".")
}

fn build_class_aliases(pages: &PageSpec, registry: &ObjectRegistry) -> Result<ClassAliases> {
	let mut aliases = ClassAliases::new();
	for reference in pages.values().flatten() {
		let Some(path) = reference.as_path() else {
			continue;
		};
		let object = registry.resolve(path)?;
		if object.is_class() {
			aliases.insert(object.dotted_path(), path.to_string());
		}
	}
	Ok(aliases)
}
