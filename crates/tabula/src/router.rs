//! Active tab/section resolution.

use crate::schema::{Schema, MAIN_SECTION};

/// Transient per-request view selection. Derived from request
/// parameters, validated against the schema, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
	pub tab: Box<str>,
	pub section: Box<str>,
}

/// Resolve the active view from request parameters.
///
/// Total and pure: an unknown tab falls back to the default tab, an
/// unknown section to the active tab's first declared section, then to
/// "main". Always returns a usable view.
pub fn resolve_view(
	requested_tab: Option<&str>,
	requested_section: Option<&str>,
	schema: &Schema,
	default_tab: &str,
) -> ActiveView {
	let tab = match requested_tab {
		Some(tab) if schema.has_tab(tab) => tab,
		_ => default_tab,
	};

	let sections = schema.tab(tab).map(|tab| tab.sections.as_slice()).unwrap_or_default();
	let section = match requested_section {
		Some(section) if sections.iter().any(|s| &*s.id == section) => section,
		_ => sections.first().map_or(MAIN_SECTION, |s| &*s.id),
	};

	ActiveView { tab: tab.into(), section: section.into() }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldDescriptor, FieldType};
	use crate::schema::SchemaBuilder;

	fn schema() -> Schema {
		let mut builder = SchemaBuilder::new();
		builder.tab("general", "General");
		builder.tab("license", "License");
		builder.section("general", "main", "General Settings");
		builder.section("general", "advanced", "Advanced");
		builder.section("license", "main", "License Settings");
		builder.fields(
			"general",
			"main",
			vec![FieldDescriptor::builder("mode", FieldType::Select).build()],
		);
		builder.freeze()
	}

	#[test]
	fn valid_tab_and_section_are_kept() {
		let view = resolve_view(Some("general"), Some("advanced"), &schema(), "general");
		assert_eq!(view, ActiveView { tab: "general".into(), section: "advanced".into() });
	}

	#[test]
	fn invalid_section_falls_back_but_valid_tab_is_kept() {
		let view = resolve_view(Some("license"), Some("bogus"), &schema(), "general");
		assert_eq!(view, ActiveView { tab: "license".into(), section: "main".into() });
	}

	#[test]
	fn invalid_tab_falls_back_to_default() {
		let view = resolve_view(Some("nope"), None, &schema(), "general");
		assert_eq!(&*view.tab, "general");
		assert_eq!(&*view.section, "main");
	}

	#[test]
	fn empty_schema_resolves_to_main() {
		let schema = SchemaBuilder::new().freeze();
		let view = resolve_view(None, None, &schema, "general");
		assert_eq!(view, ActiveView { tab: "general".into(), section: "main".into() });
	}
}

// vim: ts=4
