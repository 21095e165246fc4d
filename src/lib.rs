//! Markdown API documentation generated from rustdoc data.
//!
//! `autodoc` resolves dotted references such as `mycrate.layers.Dense` against rustdoc JSON,
//! renders each object into a markdown block (signature, heading and processed doc comment) and
//! inserts the blocks into template pages at the `{{autogenerated}}` marker.
//!
//! ```no_run
//! use autodoc::{AutodocConfig, DocumentationGenerator, ObjectRegistry};
//!
//! # fn main() -> autodoc::Result<()> {
//! let config = AutodocConfig::load("autodoc.toml".as_ref())?;
//! let registry = ObjectRegistry::load(&config.crate_sources()?)?;
//! let generator = DocumentationGenerator::from_config(&config, registry)?;
//! generator.generate(&config.destination())?;
//! # Ok(())
//! # }
//! ```

/// Configuration file and generator settings.
pub mod config;
/// Error types.
pub mod error;
/// Examples directory copy.
pub mod examples;
/// Destination directory helpers and template insertion.
pub mod fs_utils;
/// The page generator.
pub mod generator;
/// Object descriptors and references.
pub mod object;
/// Reference resolution over rustdoc JSON.
pub mod registry;
/// Markdown rendering of objects.
pub mod render;

pub use crate::config::{AutodocConfig, GeneratorSettings, PageSpec, ProjectUrl};
pub use crate::error::{AutodocError, ConfigError, ResolveError, Result};
pub use crate::generator::DocumentationGenerator;
pub use crate::object::{ClassAliases, Object, ObjectKind, Param, Reference, Signature, SourceSpan, TypeExpr};
pub use crate::registry::{CrateSource, ObjectRegistry};
pub use crate::render::{DefaultHooks, RenderHooks};
