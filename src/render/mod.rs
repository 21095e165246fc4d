//! Markdown rendering of resolved objects.

/// Docstring dialect conversion.
pub mod docstring;
/// Signature strings and code snippets.
pub mod signature;
/// `[[source]]` links.
pub mod source_link;

use crate::config::ProjectUrl;
use crate::object::{ClassAliases, Object};

/// Horizontal rule closing every rendered block.
pub const BLOCK_SEPARATOR: &str = "\n\n----\n\n";

/// Post-processing applied while rendering a block.
///
/// Both methods have defaults, so implementors only override what they need.
pub trait RenderHooks {
	/// Adjust a signature before it is placed in the code block.
	fn process_signature(&self, signature: String) -> String {
		signature
	}

	/// Turn a raw doc comment into the markdown body of the block.
	fn process_docstring(&self, docstring: &str) -> String {
		docstring::process_docstring(docstring)
	}
}

/// Hooks with the default behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl RenderHooks for DefaultHooks {}

/// Render one object into a markdown block.
pub fn render_object(
	object: &Object,
	signature_override: Option<&str>,
	aliases: &ClassAliases,
	hooks: &dyn RenderHooks,
	project_url: Option<&ProjectUrl>,
) -> String {
	let mut subblocks = Vec::new();
	if let Some(link) = project_url.and_then(|url| source_link::make_source_link(object, url)) {
		subblocks.push(link);
	}
	let rendered = signature::get_signature(object, aliases, signature_override);
	let rendered = hooks.process_signature(rendered);
	subblocks.push(format!("### {} {}\n", object.display_name(), object.kind));
	subblocks.push(signature::code_snippet(&rendered));
	if let Some(docs) = &object.docs {
		subblocks.push(hooks.process_docstring(docs));
	}
	let mut block = subblocks.join("\n\n");
	block.push_str(BLOCK_SEPARATOR);
	block
}
