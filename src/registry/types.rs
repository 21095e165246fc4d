//! Conversion of rustdoc types and signatures into [`TypeExpr`] values.

use rustdoc_types::{
	Function, GenericArg, GenericArgs, GenericBound, GenericParamDefKind, Generics, Path, Type,
};

use super::LoadedCrate;
use crate::object::{ClassAliases, Param, Signature, TypeExpr};

/// Last `::` segment of a path as written in the source.
fn short_name(path: &str) -> &str {
	path.rsplit("::").next().unwrap_or(path)
}

impl LoadedCrate {
	/// Convert a rustdoc type, remembering canonical paths of named items.
	pub(crate) fn convert_type(&self, ty: &Type) -> TypeExpr {
		match ty {
			Type::ResolvedPath(path) => self.convert_path(path),
			Type::Generic(name) | Type::Primitive(name) => TypeExpr::Raw(name.clone()),
			Type::BorrowedRef {
				lifetime,
				is_mutable,
				type_,
			} => TypeExpr::Ref {
				lifetime: lifetime.clone(),
				mutable: *is_mutable,
				inner: Box::new(self.convert_type(type_)),
			},
			Type::RawPointer { is_mutable, type_ } => TypeExpr::Pointer {
				mutable: *is_mutable,
				inner: Box::new(self.convert_type(type_)),
			},
			Type::Tuple(items) => {
				if items.is_empty() {
					TypeExpr::Raw("()".to_string())
				} else {
					TypeExpr::Tuple(items.iter().map(|item| self.convert_type(item)).collect())
				}
			}
			Type::Slice(inner) => TypeExpr::Slice(Box::new(self.convert_type(inner))),
			Type::Array { type_, len } => TypeExpr::Array {
				inner: Box::new(self.convert_type(type_)),
				len: len.clone(),
			},
			Type::ImplTrait(bounds) => TypeExpr::ImplTrait(self.convert_bounds(bounds)),
			Type::DynTrait(dyn_trait) => {
				let mut bounds: Vec<TypeExpr> = dyn_trait
					.traits
					.iter()
					.map(|poly| self.convert_path(&poly.trait_))
					.collect();
				if let Some(lifetime) = &dyn_trait.lifetime {
					bounds.push(TypeExpr::Raw(lifetime.clone()));
				}
				TypeExpr::DynTrait(bounds)
			}
			Type::FunctionPointer(pointer) => {
				let empty = ClassAliases::new();
				let inputs = pointer
					.sig
					.inputs
					.iter()
					.map(|(_, ty)| self.convert_type(ty).render(&empty))
					.collect::<Vec<_>>()
					.join(", ");
				let output = pointer
					.sig
					.output
					.as_ref()
					.map(|ty| format!(" -> {}", self.convert_type(ty).render(&empty)))
					.unwrap_or_default();
				TypeExpr::Raw(format!("fn({inputs}){output}"))
			}
			Type::QualifiedPath {
				name,
				self_type,
				trait_,
				..
			} => {
				let empty = ClassAliases::new();
				let self_type = self.convert_type(self_type).render(&empty);
				match trait_ {
					Some(trait_) => TypeExpr::Raw(format!(
						"<{self_type} as {}>::{name}",
						self.convert_path(trait_).render(&empty)
					)),
					None => TypeExpr::Raw(format!("{self_type}::{name}")),
				}
			}
			Type::Infer => TypeExpr::Raw("_".to_string()),
			_ => TypeExpr::Raw("_".to_string()),
		}
	}

	fn convert_path(&self, path: &Path) -> TypeExpr {
		let name = short_name(&path.path).to_string();
		let canonical = self.canonical_path(&path.id);
		let Some(args) = &path.args else {
			return TypeExpr::Path {
				name,
				canonical,
				args: Vec::new(),
			};
		};
		match self.convert_generic_args(args) {
			Ok(args) => TypeExpr::Path {
				name,
				canonical,
				args,
			},
			Err(parenthesized) => TypeExpr::Raw(format!("{name}{parenthesized}")),
		}
	}

	/// Angle-bracketed arguments convert to a list; `Fn(A) -> B` style arguments come back rendered.
	fn convert_generic_args(&self, args: &GenericArgs) -> Result<Vec<TypeExpr>, String> {
		match args {
			GenericArgs::AngleBracketed { args, .. } => Ok(args
				.iter()
				.map(|arg| match arg {
					GenericArg::Lifetime(lifetime) => TypeExpr::Raw(lifetime.clone()),
					GenericArg::Type(ty) => self.convert_type(ty),
					GenericArg::Const(constant) => TypeExpr::Raw(constant.expr.clone()),
					_ => TypeExpr::Raw("_".to_string()),
				})
				.collect()),
			GenericArgs::Parenthesized { inputs, output } => {
				let empty = ClassAliases::new();
				let inputs = inputs
					.iter()
					.map(|ty| self.convert_type(ty).render(&empty))
					.collect::<Vec<_>>()
					.join(", ");
				let output = output
					.as_ref()
					.map(|ty| format!(" -> {}", self.convert_type(ty).render(&empty)))
					.unwrap_or_default();
				Err(format!("({inputs}){output}"))
			}
			_ => Ok(Vec::new()),
		}
	}

	fn convert_bounds(&self, bounds: &[GenericBound]) -> Vec<TypeExpr> {
		bounds
			.iter()
			.filter_map(|bound| match bound {
				GenericBound::TraitBound { trait_, .. } => Some(self.convert_path(trait_)),
				GenericBound::Outlives(lifetime) => Some(TypeExpr::Raw(lifetime.clone())),
				_ => None,
			})
			.collect()
	}

	/// Build a [`Signature`] from a rustdoc function.
	pub(crate) fn convert_function(&self, function: &Function) -> Signature {
		let params = function
			.sig
			.inputs
			.iter()
			.map(|(name, ty)| Param::typed(name.clone(), self.convert_type(ty)))
			.collect();
		let output = function
			.sig
			.output
			.as_ref()
			.map(|ty| self.convert_type(ty));
		Signature {
			generics: generic_names(&function.generics),
			params,
			output,
		}
	}
}

/// Tie `Self` outside the receiver to the owning type so class aliases reach it.
pub(crate) fn bind_self(signature: &mut Signature, owner_path: &str) {
	for param in signature.params.iter_mut().filter(|param| param.name != "self") {
		if let Some(annotation) = param.annotation.as_mut() {
			bind_self_type(annotation, owner_path);
		}
	}
	if let Some(output) = signature.output.as_mut() {
		bind_self_type(output, owner_path);
	}
}

fn bind_self_type(ty: &mut TypeExpr, owner_path: &str) {
	if matches!(ty, TypeExpr::Raw(name) if name.as_str() == "Self") {
		*ty = TypeExpr::path("Self", Some(owner_path));
		return;
	}
	match ty {
		TypeExpr::Ref { inner, .. }
		| TypeExpr::Pointer { inner, .. }
		| TypeExpr::Slice(inner)
		| TypeExpr::Array { inner, .. } => bind_self_type(inner, owner_path),
		TypeExpr::Path { args: items, .. }
		| TypeExpr::Tuple(items)
		| TypeExpr::ImplTrait(items)
		| TypeExpr::DynTrait(items) => {
			for item in items {
				bind_self_type(item, owner_path);
			}
		}
		TypeExpr::Raw(_) => {}
	}
}

/// Names of the declared generic parameters, skipping `impl Trait` desugarings.
pub(crate) fn generic_names(generics: &Generics) -> Vec<String> {
	generics
		.params
		.iter()
		.filter_map(|param| match &param.kind {
			GenericParamDefKind::Lifetime { .. } => Some(param.name.clone()),
			GenericParamDefKind::Type { is_synthetic, .. } => {
				(!is_synthetic).then(|| param.name.clone())
			}
			GenericParamDefKind::Const { .. } => Some(format!("const {}", param.name)),
		})
		.collect()
}
