//! Conversion of the `# Section` docstring dialect into plain markdown.
//!
//! Doc comments may carry sections with indented argument lists:
//!
//! ```text
//! # Arguments
//!     units: Positive integer,
//!         dimensionality of the output space.
//! ```
//!
//! which become `__Arguments__` followed by a `- __units__: ...` list. Fenced code is kept apart
//! from the rewriting and only dedented.

use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_HEADER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^#[ \t]+(\S.*?)\s*$").expect("section header pattern"));

static LIST_ENTRY: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^([^\s\\(]+):(.*)$").expect("list entry pattern"));

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`{3,}|~{3,})\s*(.*?)\s*$").expect("fence pattern"));

/// Code block attributes rustdoc treats as Rust code.
const RUST_FENCE_ATTRIBUTES: &[&str] = &[
	"rust",
	"ignore",
	"no_run",
	"should_panic",
	"compile_fail",
	"test_harness",
	"standalone_crate",
];

fn indent_of(line: &str) -> usize {
	line.len() - line.trim_start().len()
}

fn is_rust_fence(label: &str) -> bool {
	label.is_empty()
		|| label.split(',').map(str::trim).all(|attribute| {
			RUST_FENCE_ATTRIBUTES.contains(&attribute) || attribute.starts_with("edition")
		})
}

/// A closing fence repeats the opening character at least as many times.
fn closes(delimiter: &str, line: &str) -> bool {
	let Some(marker) = delimiter.chars().next() else {
		return false;
	};
	line.len() >= delimiter.len() && line.chars().all(|ch| ch == marker)
}

/// Open fenced block being collected.
struct Fence<'a> {
	delimiter: &'a str,
	rust: bool,
	lines: Vec<&'a str>,
}

impl Fence<'_> {
	/// Dedent the collected lines and drop rustdoc's hidden lines.
	fn finish(self, out: &mut Vec<String>) {
		let strip = self
			.lines
			.iter()
			.filter(|line| !line.trim().is_empty())
			.map(|line| indent_of(line))
			.min()
			.unwrap_or(0);
		for line in self.lines {
			let line = line.get(strip..).unwrap_or_else(|| line.trim_start());
			if self.rust {
				let trimmed = line.trim_start();
				if trimmed == "#" || trimmed.starts_with("# ") {
					continue;
				}
				if let Some(rest) = trimmed.strip_prefix("##") {
					let indent = &line[..line.len() - trimmed.len()];
					out.push(format!("{indent}#{rest}"));
					continue;
				}
			}
			out.push(line.trim_end().to_string());
		}
		out.push(self.delimiter.to_string());
	}
}

/// Convert a raw doc comment to markdown.
pub fn process_docstring(docstring: &str) -> String {
	let mut out: Vec<String> = Vec::new();
	let mut fence: Option<Fence<'_>> = None;
	// Indentation of the current `# Section` header.
	let mut section: Option<usize> = None;
	// Indentation of the current list entry.
	let mut entry: Option<usize> = None;
	let mut after_header = false;

	for line in docstring.lines() {
		let trimmed = line.trim();

		if let Some(open) = fence.as_mut() {
			if !closes(open.delimiter, trimmed) {
				open.lines.push(line);
			} else if let Some(open) = fence.take() {
				open.finish(&mut out);
			}
			continue;
		}

		if let Some(captures) = FENCE.captures(trimmed) {
			let delimiter = captures.get(1).map_or("```", |m| m.as_str());
			let label = captures.get(2).map_or("", |m| m.as_str());
			let rust = is_rust_fence(label);
			let label = if label.is_empty() { "rust" } else { label };
			out.push(format!("{delimiter}{label}"));
			fence = Some(Fence {
				delimiter,
				rust,
				lines: Vec::new(),
			});
			entry = None;
			after_header = false;
			continue;
		}

		if trimmed.is_empty() {
			if !after_header {
				out.push(String::new());
			}
			entry = None;
			continue;
		}
		after_header = false;

		let indent = indent_of(line);

		if let Some(captures) = SECTION_HEADER.captures(trimmed) {
			if out.last().is_some_and(|last| !last.is_empty()) {
				out.push(String::new());
			}
			out.push(format!("__{}__", &captures[1]));
			out.push(String::new());
			section = Some(indent);
			entry = None;
			after_header = true;
			continue;
		}

		if let Some(entry_indent) = entry
			&& indent > entry_indent
		{
			if let Some(last) = out.last_mut() {
				last.push(' ');
				last.push_str(trimmed);
			}
			continue;
		}

		if let Some(section_indent) = section {
			if indent > section_indent {
				if let Some(captures) = LIST_ENTRY.captures(trimmed) {
					out.push(format!("- __{}__:{}", &captures[1], &captures[2]));
					entry = Some(indent);
					continue;
				}
			} else if entry.is_some() || out.last().is_some_and(|last| last.starts_with("- __")) {
				// Dedented text after a list starts a new paragraph.
				out.push(String::new());
				section = None;
			} else {
				section = None;
			}
		}

		entry = None;
		out.push(trimmed.to_string());
	}

	if let Some(open) = fence.take() {
		open.finish(&mut out);
	}

	while out.last().is_some_and(String::is_empty) {
		out.pop();
	}
	out.join("\n")
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn arguments_section_becomes_list() {
		let docs = "Just your regular densely-connected layer.\n\n# Arguments\n    units: Positive integer,\n        dimensionality of the output space.\n    activation: Activation function to use.\n\nMore text.";
		assert_eq!(
			process_docstring(docs),
			"Just your regular densely-connected layer.\n\n__Arguments__\n\n- __units__: Positive integer, dimensionality of the output space.\n- __activation__: Activation function to use.\n\nMore text."
		);
	}

	#[test]
	fn section_without_entries_keeps_text() {
		let docs = "# Returns\n\n    The output tensor.";
		assert_eq!(process_docstring(docs), "__Returns__\n\nThe output tensor.");
	}

	#[test]
	fn dedented_text_after_list_starts_paragraph() {
		let docs = "# Arguments\n    x: Input.\nTrailing sentence.";
		assert_eq!(
			process_docstring(docs),
			"__Arguments__\n\n- __x__: Input.\n\nTrailing sentence."
		);
	}

	#[test]
	fn names_with_parentheses_are_not_entries() {
		let docs = "# Raises\n    call(x): never.";
		assert_eq!(process_docstring(docs), "__Raises__\n\ncall(x): never.");
	}

	#[test]
	fn bare_fence_is_rust_and_hidden_lines_drop() {
		let docs = "Example:\n\n```\n# use pkg::Dense;\nlet dense = Dense::new(3);\n#\n## not hidden\nassert!(dense.units() > 0);\n```";
		assert_eq!(
			process_docstring(docs),
			"Example:\n\n```rust\nlet dense = Dense::new(3);\n# not hidden\nassert!(dense.units() > 0);\n```"
		);
	}

	#[test]
	fn indented_fence_is_dedented_relative_to_content() {
		let docs = "# Example\n    ```\n    let x = 1;\n        x + 1;\n    ```";
		assert_eq!(
			process_docstring(docs),
			"__Example__\n\n```rust\nlet x = 1;\n    x + 1;\n```"
		);
	}

	#[test]
	fn foreign_fences_keep_hash_lines() {
		let docs = "```text\n# literal\nkey: value\n```";
		assert_eq!(process_docstring(docs), "```text\n# literal\nkey: value\n```");
	}

	#[test]
	fn markdown_bullets_pass_through() {
		let docs = "# Arguments\n\n* `units` - Number of units.";
		assert_eq!(process_docstring(docs), "__Arguments__\n\n* `units` - Number of units.");
	}
}
