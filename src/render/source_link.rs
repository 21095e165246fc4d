use crate::config::ProjectUrl;
use crate::object::Object;

/// Build the right-floated `[[source]]` link for an object.
///
/// Returns `None` when the object has no recorded span or when a per-crate mapping has no entry
/// for the object's crate.
pub fn make_source_link(object: &Object, project_url: &ProjectUrl) -> Option<String> {
	let span = object.span.as_ref()?;
	let base = project_url.base_for(object.crate_name())?;
	let file = span
		.file
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/");
	Some(format!(
		"<span style=\"float:right;\">[[source]]({}/{file}#L{})</span>",
		base.trim_end_matches('/'),
		span.line
	))
}
