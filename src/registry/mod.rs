//! Object registry built from rustdoc JSON.
//!
//! Rust has no runtime reflection, so dotted references are resolved against the item index
//! rustdoc produces for each loaded crate. The first segment of a reference selects a crate; the
//! remaining segments are walked like attribute accesses through modules, re-exports, impl
//! blocks and trait definitions.

use std::collections::HashMap;
use std::path::Path;

use rustdoc_types::{Crate, Id, Item, ItemEnum, StructKind, Visibility};
use tracing::{debug, warn};

use crate::error::{AutodocError, ResolveError, Result};
use crate::object::{Object, ObjectKind, Param, Reference, Signature, SourceSpan, normalize_reference};

/// Loading of crate data from JSON files and manifests.
pub mod source;
mod types;

pub use source::CrateSource;

/// Re-export chains deeper than this are treated as cycles.
const MAX_GLOB_DEPTH: usize = 8;

/// Append `name` to a dotted path prefix.
pub(crate) fn dpush(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{prefix}.{name}")
	}
}

/// Crate names compare equal regardless of `-` and `_`.
fn crate_key(name: &str) -> String {
	name.replace('-', "_")
}

/// A crate loaded into the registry together with its path index.
#[derive(Debug)]
pub struct LoadedCrate {
	name: String,
	data: Crate,
	/// Dotted path of every item reachable through its defining module.
	defined_at: HashMap<Id, String>,
}

impl LoadedCrate {
	/// Index a crate for path lookups.
	pub fn new(data: Crate) -> Self {
		let name = data
			.index
			.get(&data.root)
			.and_then(|root| root.name.clone())
			.unwrap_or_default();
		let mut loaded = Self {
			name,
			data,
			defined_at: HashMap::new(),
		};
		let mut defined_at = HashMap::new();
		loaded.index_module(&loaded.data.root, &loaded.name, &mut defined_at);
		loaded.defined_at = defined_at;
		loaded
	}

	fn index_module(&self, module_id: &Id, prefix: &str, out: &mut HashMap<Id, String>) {
		let Some(ItemEnum::Module(module)) = self.get(module_id).map(|item| &item.inner) else {
			return;
		};
		for child_id in &module.items {
			let Some(child) = self.get(child_id) else {
				continue;
			};
			let Some(name) = &child.name else {
				continue;
			};
			if matches!(child.inner, ItemEnum::Use(_)) || out.contains_key(child_id) {
				continue;
			}
			let path = dpush(prefix, name);
			out.insert(*child_id, path.clone());
			if matches!(child.inner, ItemEnum::Module(_)) {
				self.index_module(child_id, &path, out);
			}
		}
	}

	/// Crate name as recorded on the root module.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Raw rustdoc data.
	pub fn data(&self) -> &Crate {
		&self.data
	}

	/// Look up an item in the crate index.
	pub fn get(&self, id: &Id) -> Option<&Item> {
		self.data.index.get(id)
	}

	/// Canonical dotted path for an item id, preferring rustdoc's own path table.
	pub fn canonical_path(&self, id: &Id) -> Option<String> {
		self.data
			.paths
			.get(id)
			.map(|summary| summary.path.join("."))
			.or_else(|| self.defined_at.get(id).cloned())
	}

	/// Find a named member of a module, class or trait.
	fn member(&self, container: &Item, name: &str, depth: usize) -> Option<&Item> {
		if depth > MAX_GLOB_DEPTH {
			return None;
		}
		match &container.inner {
			ItemEnum::Module(module) => {
				let mut globs = Vec::new();
				for child in module.items.iter().filter_map(|id| self.get(id)) {
					match &child.inner {
						ItemEnum::Use(use_) if use_.is_glob => globs.push(use_),
						ItemEnum::Use(use_) if use_.name == name => {
							if let Some(target) = use_.id.as_ref().and_then(|id| self.get(id)) {
								return Some(target);
							}
						}
						ItemEnum::Use(_) => {}
						_ if child.name.as_deref() == Some(name) => return Some(child),
						_ => {}
					}
				}
				globs.into_iter().find_map(|use_| {
					let target = use_.id.as_ref().and_then(|id| self.get(id))?;
					self.member(target, name, depth + 1)
				})
			}
			ItemEnum::Struct(struct_) => self.impl_member(&struct_.impls, name),
			ItemEnum::Enum(enum_) => self.impl_member(&enum_.impls, name),
			ItemEnum::Union(union_) => self.impl_member(&union_.impls, name),
			ItemEnum::Trait(trait_) => trait_
				.items
				.iter()
				.filter_map(|id| self.get(id))
				.find(|item| {
					item.name.as_deref() == Some(name) && matches!(item.inner, ItemEnum::Function(_))
				}),
			_ => None,
		}
	}

	/// Associated functions of inherent impls first, then of trait impls.
	fn impl_member(&self, impls: &[Id], name: &str) -> Option<&Item> {
		let impls: Vec<_> = impls
			.iter()
			.filter_map(|id| match self.get(id).map(|item| &item.inner) {
				Some(ItemEnum::Impl(impl_)) => Some(impl_),
				_ => None,
			})
			.collect();
		let inherent = impls.iter().filter(|impl_| impl_.trait_.is_none());
		let traits = impls.iter().filter(|impl_| impl_.trait_.is_some());
		inherent.chain(traits).find_map(|impl_| {
			impl_
				.items
				.iter()
				.filter_map(|id| self.get(id))
				.find(|item| {
					item.name.as_deref() == Some(name) && matches!(item.inner, ItemEnum::Function(_))
				})
		})
	}

	/// Build the descriptor of a resolved item.
	fn describe(
		&self,
		item: &Item,
		owner: Option<&Item>,
		walked: &str,
		reference: &str,
	) -> std::result::Result<Object, ResolveError> {
		let name = item.name.clone().unwrap_or_default();
		let docs = item.docs.clone().filter(|docs| !docs.trim().is_empty());
		let span = item.span.as_ref().map(|span| SourceSpan {
			file: span.filename.clone(),
			line: span.begin.0,
		});
		match (&item.inner, owner) {
			(ItemEnum::Function(function), Some(owner)) => {
				let owner_path = self
					.canonical_path(&owner.id)
					.unwrap_or_else(|| parent_path(walked).to_string());
				let owner_name = owner.name.clone().unwrap_or_default();
				let mut signature = self.convert_function(function);
				// Inside a trait `Self` is the implementor, not the trait.
				if !matches!(owner.inner, ItemEnum::Trait(_)) {
					types::bind_self(&mut signature, &owner_path);
				}
				Ok(Object {
					kind: ObjectKind::Method,
					qualname: format!("{owner_name}.{name}"),
					name,
					module: parent_path(&owner_path).to_string(),
					signature,
					docs,
					span,
				})
			}
			(ItemEnum::Function(function), None) => Ok(Object {
				kind: ObjectKind::Function,
				module: self.module_of(item, walked),
				qualname: name.clone(),
				name,
				signature: self.convert_function(function),
				docs,
				span,
			}),
			(ItemEnum::Struct(_) | ItemEnum::Enum(_) | ItemEnum::Union(_) | ItemEnum::Trait(_), _) => {
				Ok(Object {
					kind: ObjectKind::Class,
					module: self.module_of(item, walked),
					qualname: name.clone(),
					name,
					signature: self.constructor_signature(item),
					docs,
					span,
				})
			}
			(inner, _) => Err(ResolveError::Unsupported {
				reference: reference.to_string(),
				kind: item_label(inner),
			}),
		}
	}

	fn module_of(&self, item: &Item, walked: &str) -> String {
		let path = self
			.canonical_path(&item.id)
			.unwrap_or_else(|| walked.to_string());
		parent_path(&path).to_string()
	}

	/// Signature shown for a class: its `new` constructor, else its public fields.
	fn constructor_signature(&self, item: &Item) -> Signature {
		if let Some(constructor) = self.inherent_constructor(item) {
			return constructor;
		}
		match &item.inner {
			ItemEnum::Struct(struct_) => {
				let params = match &struct_.kind {
					StructKind::Plain { fields, .. } => fields
						.iter()
						.filter_map(|id| self.get(id))
						.filter(|field| matches!(field.visibility, Visibility::Public))
						.filter_map(|field| match &field.inner {
							ItemEnum::StructField(ty) => Some(Param::typed(
								field.name.clone().unwrap_or_default(),
								self.convert_type(ty),
							)),
							_ => None,
						})
						.collect(),
					StructKind::Tuple(fields) => fields
						.iter()
						.enumerate()
						.filter_map(|(position, id)| {
							let field = self.get(id.as_ref()?)?;
							match &field.inner {
								ItemEnum::StructField(ty) => {
									Some(Param::typed(position.to_string(), self.convert_type(ty)))
								}
								_ => None,
							}
						})
						.collect(),
					StructKind::Unit => Vec::new(),
				};
				Signature {
					generics: types::generic_names(&struct_.generics),
					params,
					output: None,
				}
			}
			ItemEnum::Enum(enum_) => Signature {
				generics: types::generic_names(&enum_.generics),
				..Signature::default()
			},
			ItemEnum::Trait(trait_) => Signature {
				generics: types::generic_names(&trait_.generics),
				..Signature::default()
			},
			_ => Signature::default(),
		}
	}

	fn inherent_constructor(&self, item: &Item) -> Option<Signature> {
		let impls = match &item.inner {
			ItemEnum::Struct(struct_) => &struct_.impls,
			ItemEnum::Enum(enum_) => &enum_.impls,
			ItemEnum::Union(union_) => &union_.impls,
			_ => return None,
		};
		let constructor = impls
			.iter()
			.filter_map(|id| match self.get(id).map(|item| &item.inner) {
				Some(ItemEnum::Impl(impl_)) if impl_.trait_.is_none() => Some(impl_),
				_ => None,
			})
			.flat_map(|impl_| impl_.items.iter().filter_map(|id| self.get(id)))
			.find(|item| item.name.as_deref() == Some("new"))?;
		let ItemEnum::Function(function) = &constructor.inner else {
			return None;
		};
		let mut signature = self.convert_function(function);
		if signature.params.first().is_some_and(|param| param.name == "self") {
			return None;
		}
		signature.output = None;
		Some(signature)
	}
}

/// Dotted path without its last segment.
fn parent_path(path: &str) -> &str {
	path.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("")
}

/// Human label for an item kind that cannot be documented.
fn item_label(inner: &ItemEnum) -> &'static str {
	match inner {
		ItemEnum::Module(_) => "module",
		ItemEnum::Constant { .. } => "constant",
		ItemEnum::Static(_) => "static",
		ItemEnum::TypeAlias(_) => "type alias",
		ItemEnum::Macro(_) | ItemEnum::ProcMacro(_) => "macro",
		ItemEnum::StructField(_) => "field",
		ItemEnum::Variant(_) => "enum variant",
		ItemEnum::Use(_) => "re-export",
		_ => "unsupported item",
	}
}

/// Collection of crates that references are resolved against.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
	crates: Vec<LoadedCrate>,
}

impl ObjectRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a crate's rustdoc data to the registry.
	pub fn add_crate(&mut self, data: Crate) {
		if data.format_version != rustdoc_types::FORMAT_VERSION && data.format_version != 0 {
			warn!(
				found = data.format_version,
				expected = rustdoc_types::FORMAT_VERSION,
				"rustdoc JSON format version differs from the supported one"
			);
		}
		let loaded = LoadedCrate::new(data);
		debug!(name = loaded.name(), items = loaded.data.index.len(), "loaded crate");
		self.crates.push(loaded);
	}

	/// Builder-style variant of [`Self::add_crate`].
	pub fn with_crate(mut self, data: Crate) -> Self {
		self.add_crate(data);
		self
	}

	/// Load every crate source in order.
	pub fn load(sources: &[CrateSource]) -> Result<Self> {
		let mut registry = Self::new();
		for source in sources {
			registry.add_crate(source.read_crate()?);
		}
		Ok(registry)
	}

	/// Load pre-generated rustdoc JSON files.
	pub fn from_json_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
		let mut registry = Self::new();
		for path in paths {
			registry.add_crate(source::read_json(path.as_ref())?);
		}
		Ok(registry)
	}

	/// Loaded crates in insertion order.
	pub fn crates(&self) -> &[LoadedCrate] {
		&self.crates
	}

	fn find_crate(&self, name: &str) -> Option<&LoadedCrate> {
		let key = crate_key(name);
		self.crates
			.iter()
			.find(|loaded| crate_key(loaded.name()) == key)
	}

	/// Resolve a dotted reference into an object descriptor.
	pub fn resolve(&self, reference: &str) -> std::result::Result<Object, ResolveError> {
		let normalized = normalize_reference(reference);
		let mut segments = normalized.split('.').filter(|segment| !segment.is_empty());
		let first = segments.next().ok_or(ResolveError::EmptyReference)?;
		let loaded = self
			.find_crate(first)
			.ok_or_else(|| ResolveError::UnknownCrate {
				name: first.to_string(),
				reference: reference.to_string(),
			})?;
		let Some(mut current) = loaded.get(&loaded.data.root) else {
			return Err(ResolveError::UnknownCrate {
				name: first.to_string(),
				reference: reference.to_string(),
			});
		};

		let mut owner = None;
		let mut walked = first.to_string();
		for segment in segments {
			let next = loaded.member(current, segment, 0).ok_or_else(|| {
				ResolveError::UnknownAttribute {
					owner: walked.clone(),
					name: segment.to_string(),
					reference: reference.to_string(),
				}
			})?;
			owner = match current.inner {
				ItemEnum::Module(_) => None,
				_ => Some(current),
			};
			current = next;
			walked = dpush(&walked, segment);
		}

		loaded.describe(current, owner, &walked, reference)
	}

	/// Resolve any reference; in-memory objects are returned unchanged.
	pub fn resolve_reference(&self, reference: &Reference) -> Result<Object> {
		match reference {
			Reference::Path(path) => self.resolve(path).map_err(AutodocError::from),
			Reference::Object(object) => Ok(object.as_ref().clone()),
		}
	}
}
