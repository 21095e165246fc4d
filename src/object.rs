//! Resolved object descriptors and the references that name them.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Classification of a documentable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	/// Free function.
	Function,
	/// Struct, enum, union or trait.
	Class,
	/// Function inside an impl block or trait.
	Method,
}

impl ObjectKind {
	/// Label used in rendered headings.
	pub fn label(self) -> &'static str {
		match self {
			Self::Function => "function",
			Self::Class => "class",
			Self::Method => "method",
		}
	}
}

impl fmt::Display for ObjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Source location of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
	/// File path as recorded by rustdoc, usually relative to the workspace root.
	pub file: PathBuf,
	/// One-indexed line where the object starts.
	pub line: usize,
}

/// Alias table mapping canonical dotted class paths to the names users chose.
pub type ClassAliases = HashMap<String, String>;

/// Type annotation attached to a parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
	/// Named type, optionally tied to the canonical path of the item it names.
	Path {
		/// Name as written in the source (last segment).
		name: String,
		/// Canonical dotted path of the named item, when known.
		canonical: Option<String>,
		/// Generic arguments.
		args: Vec<TypeExpr>,
	},
	/// `&T`, `&'a mut T`.
	Ref {
		/// Optional lifetime name including the leading quote.
		lifetime: Option<String>,
		/// Whether the borrow is mutable.
		mutable: bool,
		/// Borrowed type.
		inner: Box<TypeExpr>,
	},
	/// `*const T` / `*mut T`.
	Pointer {
		/// Whether the pointer is mutable.
		mutable: bool,
		/// Pointee type.
		inner: Box<TypeExpr>,
	},
	/// `(A, B)`.
	Tuple(Vec<TypeExpr>),
	/// `[T]`.
	Slice(Box<TypeExpr>),
	/// `[T; N]`.
	Array {
		/// Element type.
		inner: Box<TypeExpr>,
		/// Length expression.
		len: String,
	},
	/// `impl A + B`.
	ImplTrait(Vec<TypeExpr>),
	/// `dyn A + B`.
	DynTrait(Vec<TypeExpr>),
	/// Anything rendered verbatim: primitives, generics, lifetimes and exotic types.
	Raw(String),
}

impl TypeExpr {
	/// Build a path type with no generic arguments.
	pub fn path(name: impl Into<String>, canonical: Option<&str>) -> Self {
		Self::Path {
			name: name.into(),
			canonical: canonical.map(str::to_string),
			args: Vec::new(),
		}
	}

	/// Render the type, displaying aliases for classes found in `aliases`.
	pub fn render(&self, aliases: &ClassAliases) -> String {
		match self {
			Self::Path {
				name,
				canonical,
				args,
			} => {
				let head = canonical
					.as_ref()
					.and_then(|path| aliases.get(path))
					.cloned()
					.unwrap_or_else(|| name.clone());
				if args.is_empty() {
					head
				} else {
					format!("{head}<{}>", render_list(args, aliases, ", "))
				}
			}
			Self::Ref {
				lifetime,
				mutable,
				inner,
			} => {
				let mut out = String::from("&");
				if let Some(lifetime) = lifetime {
					out.push_str(lifetime);
					out.push(' ');
				}
				if *mutable {
					out.push_str("mut ");
				}
				out.push_str(&inner.render(aliases));
				out
			}
			Self::Pointer { mutable, inner } => {
				let qualifier = if *mutable { "mut" } else { "const" };
				format!("*{qualifier} {}", inner.render(aliases))
			}
			Self::Tuple(items) if items.len() == 1 => format!("({},)", items[0].render(aliases)),
			Self::Tuple(items) => format!("({})", render_list(items, aliases, ", ")),
			Self::Slice(inner) => format!("[{}]", inner.render(aliases)),
			Self::Array { inner, len } => format!("[{}; {len}]", inner.render(aliases)),
			Self::ImplTrait(bounds) => format!("impl {}", render_list(bounds, aliases, " + ")),
			Self::DynTrait(bounds) => format!("dyn {}", render_list(bounds, aliases, " + ")),
			Self::Raw(text) => text.clone(),
		}
	}
}

fn render_list(items: &[TypeExpr], aliases: &ClassAliases, separator: &str) -> String {
	items
		.iter()
		.map(|item| item.render(aliases))
		.collect::<Vec<_>>()
		.join(separator)
}

/// Single parameter of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	/// Parameter name (`self` for receivers).
	pub name: String,
	/// Declared type, if any.
	pub annotation: Option<TypeExpr>,
	/// Default value expression, if any.
	pub default: Option<String>,
}

impl Param {
	/// Create a parameter with a type annotation.
	pub fn typed(name: impl Into<String>, annotation: TypeExpr) -> Self {
		Self {
			name: name.into(),
			annotation: Some(annotation),
			default: None,
		}
	}

	/// Attach a default value expression.
	pub fn with_default(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}
}

/// Callable shape of an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
	/// Generic parameter names, including lifetimes.
	pub generics: Vec<String>,
	/// Parameters in declaration order.
	pub params: Vec<Param>,
	/// Return type, if not unit.
	pub output: Option<TypeExpr>,
}

/// Everything the renderer needs to know about a documented object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
	/// Kind of object.
	pub kind: ObjectKind,
	/// Bare item name.
	pub name: String,
	/// `Owner.method` for methods, the bare name otherwise.
	pub qualname: String,
	/// Dotted path of the defining module, starting with the crate name.
	pub module: String,
	/// Signature used for the code block.
	pub signature: Signature,
	/// Raw doc comment.
	pub docs: Option<String>,
	/// Source location, if known.
	pub span: Option<SourceSpan>,
}

impl Object {
	/// Canonical dotted path: the module followed by the qualified name.
	pub fn dotted_path(&self) -> String {
		if self.module.is_empty() {
			self.qualname.clone()
		} else {
			format!("{}.{}", self.module, self.qualname)
		}
	}

	/// Top-level crate segment of the module path.
	pub fn crate_name(&self) -> &str {
		self.module.split('.').next().unwrap_or_default()
	}

	/// Heading name: `Owner.method` for methods, the bare name otherwise.
	pub fn display_name(&self) -> &str {
		match self.kind {
			ObjectKind::Method => &self.qualname,
			ObjectKind::Function | ObjectKind::Class => &self.name,
		}
	}

	/// Whether this object is a class.
	pub fn is_class(&self) -> bool {
		self.kind == ObjectKind::Class
	}
}

/// A documentable reference as configured on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
	/// Dotted path such as `mycrate.layers.Dense` (`::` is accepted too).
	Path(String),
	/// Object that was already resolved or built by hand.
	Object(Box<Object>),
}

impl Reference {
	/// The reference string, if this is a path reference.
	pub fn as_path(&self) -> Option<&str> {
		match self {
			Self::Path(path) => Some(path),
			Self::Object(_) => None,
		}
	}
}

impl From<&str> for Reference {
	fn from(path: &str) -> Self {
		Self::Path(path.to_string())
	}
}

impl From<String> for Reference {
	fn from(path: String) -> Self {
		Self::Path(path)
	}
}

impl From<Object> for Reference {
	fn from(object: Object) -> Self {
		Self::Object(Box::new(object))
	}
}

impl fmt::Display for Reference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Path(path) => f.write_str(path),
			Self::Object(object) => f.write_str(&object.dotted_path()),
		}
	}
}

/// Normalize a reference to `.` separators.
pub fn normalize_reference(reference: &str) -> String {
	reference.trim().replace("::", ".")
}
