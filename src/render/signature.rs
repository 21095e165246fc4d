use crate::object::{ClassAliases, Object, ObjectKind, Param, TypeExpr};

/// Signatures longer than this are wrapped one parameter per line.
pub const MAX_SIGNATURE_WIDTH: usize = 80;

/// Render a receiver the way it is written in Rust.
fn render_receiver(annotation: Option<&TypeExpr>, aliases: &ClassAliases) -> String {
	match annotation {
		None => "self".to_string(),
		Some(TypeExpr::Raw(name)) if name == "Self" => "self".to_string(),
		Some(TypeExpr::Ref {
			lifetime,
			mutable,
			inner,
		}) if matches!(inner.as_ref(), TypeExpr::Raw(name) if name == "Self") => {
			let mut out = String::from("&");
			if let Some(lifetime) = lifetime {
				out.push_str(lifetime);
				out.push(' ');
			}
			if *mutable {
				out.push_str("mut ");
			}
			out.push_str("self");
			out
		}
		Some(other) => format!("self: {}", other.render(aliases)),
	}
}

/// Render one parameter, substituting class aliases in its type and default.
pub fn render_param(param: &Param, aliases: &ClassAliases) -> String {
	if param.name == "self" {
		return render_receiver(param.annotation.as_ref(), aliases);
	}
	let mut out = param.name.clone();
	if let Some(annotation) = &param.annotation {
		out.push_str(": ");
		out.push_str(&annotation.render(aliases));
	}
	if let Some(default) = &param.default {
		out.push_str(" = ");
		out.push_str(aliases.get(default).unwrap_or(default));
	}
	out
}

/// Build the signature line for an object.
///
/// `signature_override` replaces the displayed path; without it the canonical dotted path is
/// used, shortened to `Owner.method` for methods.
pub fn get_signature(object: &Object, aliases: &ClassAliases, signature_override: Option<&str>) -> String {
	let prefix = match signature_override {
		Some(prefix) => prefix.to_string(),
		None if object.kind == ObjectKind::Method => object.qualname.clone(),
		None => object.dotted_path(),
	};
	let generics = if object.signature.generics.is_empty() {
		String::new()
	} else {
		format!("<{}>", object.signature.generics.join(", "))
	};
	let params: Vec<String> = object
		.signature
		.params
		.iter()
		.map(|param| render_param(param, aliases))
		.collect();
	let output = object
		.signature
		.output
		.as_ref()
		.map(|ty| format!(" -> {}", ty.render(aliases)))
		.unwrap_or_default();

	let single_line = format!("{prefix}{generics}({}){output}", params.join(", "));
	if single_line.chars().count() <= MAX_SIGNATURE_WIDTH || params.is_empty() {
		return single_line;
	}

	let mut wrapped = format!("{prefix}{generics}(\n");
	for param in &params {
		wrapped.push_str("    ");
		wrapped.push_str(param);
		wrapped.push_str(",\n");
	}
	wrapped.push(')');
	wrapped.push_str(&output);
	wrapped
}

/// Wrap a signature in a fenced Rust code block.
pub fn code_snippet(snippet: &str) -> String {
	format!("```rust\n{snippet}\n```\n")
}
