//! Declarative settings schema: tabs, sections, field descriptors.
//!
//! Registration is additive and last-write-wins; the mutable builder is
//! frozen into an immutable `Schema` once the host plugin's registration
//! callbacks have run. Legacy schema shapes (fields registered directly
//! under a tab, or under a section that was never declared) are
//! normalized at freeze time so downstream logic only sees the canonical
//! tab → section → fields form.

use std::collections::HashMap;

use crate::field::{FieldDescriptor, FieldType};
use crate::prelude::*;

/// Synthetic section that hosts legacy registrations and field groups
/// whose declared section does not exist.
pub const MAIN_SECTION: &str = "main";

/// One registered field group, as supplied by a provider callback.
///
/// Legacy plugins register fields directly under a tab with no section
/// nesting; both shapes are kept as registered and normalized when the
/// schema is frozen.
enum FieldGroup {
	Sectioned { tab: Box<str>, section: Box<str>, fields: Vec<FieldDescriptor> },
	Flat { tab: Box<str>, fields: Vec<FieldDescriptor> },
}

/// Mutable schema registry used during page-load registration
pub struct SchemaBuilder {
	tabs: Vec<(Box<str>, Box<str>)>,
	sections: HashMap<Box<str>, Vec<(Box<str>, Box<str>)>>,
	groups: Vec<FieldGroup>,
}

impl SchemaBuilder {
	pub fn new() -> Self {
		Self { tabs: Vec::new(), sections: HashMap::new(), groups: Vec::new() }
	}

	/// Register a tab. Re-registering an id replaces its label in place,
	/// keeping the original position.
	pub fn tab(&mut self, id: impl Into<Box<str>>, label: impl Into<Box<str>>) -> &mut Self {
		let id = id.into();
		let label = label.into();
		match self.tabs.iter_mut().find(|(tab_id, _)| *tab_id == id) {
			Some(entry) => entry.1 = label,
			None => self.tabs.push((id, label)),
		}
		self
	}

	/// Register a section under a tab, last-write-wins on id.
	pub fn section(
		&mut self,
		tab: impl Into<Box<str>>,
		id: impl Into<Box<str>>,
		label: impl Into<Box<str>>,
	) -> &mut Self {
		let id = id.into();
		let label = label.into();
		let sections = self.sections.entry(tab.into()).or_default();
		match sections.iter_mut().find(|(section_id, _)| *section_id == id) {
			Some(entry) => entry.1 = label,
			None => sections.push((id, label)),
		}
		self
	}

	/// Register a field group under a tab and section.
	pub fn fields(
		&mut self,
		tab: impl Into<Box<str>>,
		section: impl Into<Box<str>>,
		fields: Vec<FieldDescriptor>,
	) -> &mut Self {
		self.groups.push(FieldGroup::Sectioned {
			tab: tab.into(),
			section: section.into(),
			fields,
		});
		self
	}

	/// Register a field group directly under a tab (legacy flat shape,
	/// no section nesting). Normalized to the "main" section on freeze.
	pub fn tab_fields(&mut self, tab: impl Into<Box<str>>, fields: Vec<FieldDescriptor>) -> &mut Self {
		self.groups.push(FieldGroup::Flat { tab: tab.into(), fields });
		self
	}

	/// Freeze the registry into an immutable, normalized schema.
	pub fn freeze(self) -> Schema {
		let mut tabs: Vec<Tab> = self
			.tabs
			.into_iter()
			.map(|(id, label)| {
				let sections = self
					.sections
					.get(&id)
					.map(|sections| {
						sections
							.iter()
							.map(|(section_id, section_label)| Section {
								id: section_id.clone(),
								label: section_label.clone(),
								fields: Vec::new(),
							})
							.collect()
					})
					.unwrap_or_default();
				Tab { id, label, sections }
			})
			.collect();

		for group in self.groups {
			let (tab_id, section_id, fields) = match group {
				FieldGroup::Sectioned { tab, section, fields } => (tab, section, fields),
				FieldGroup::Flat { tab, fields } => (tab, MAIN_SECTION.into(), fields),
			};

			// Tabs referenced only by field groups still take part in
			// sanitization, so materialize them without a label
			if !tabs.iter().any(|tab| tab.id == tab_id) {
				tabs.push(Tab { id: tab_id.clone(), label: "".into(), sections: Vec::new() });
			}
			let Some(tab) = tabs.iter_mut().find(|tab| tab.id == tab_id) else {
				continue;
			};

			// Compatibility fallback: the whole group moves to "main"
			// when its section was never declared
			let section_id = if tab.sections.iter().any(|section| section.id == section_id) {
				section_id
			} else {
				MAIN_SECTION.into()
			};

			if !tab.sections.iter().any(|section| section.id == section_id) {
				tab.sections.push(Section {
					id: section_id.clone(),
					label: "".into(),
					fields: Vec::new(),
				});
			}
			let Some(section) = tab.sections.iter_mut().find(|section| section.id == section_id)
			else {
				continue;
			};

			for field in fields {
				if field.id.is_empty() {
					// Malformed legacy entries are skipped, not fatal
					debug!("skipping field without id in tab '{}'", tab.id);
					continue;
				}
				section.fields.push(field);
			}
		}

		let mut field_types = HashMap::new();
		for tab in &tabs {
			for section in &tab.sections {
				for field in &section.fields {
					field_types.insert(field.id.clone(), field.typ.clone());
				}
			}
		}

		debug!("froze settings schema with {} field types", field_types.len());
		Schema { tabs, field_types }
	}
}

impl Default for SchemaBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Clone)]
pub struct Tab {
	pub id: Box<str>,
	pub label: Box<str>,
	pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
	pub id: Box<str>,
	pub label: Box<str>,
	pub fields: Vec<FieldDescriptor>,
}

/// Immutable, normalized schema for one plugin's settings page
#[derive(Debug, Clone)]
pub struct Schema {
	tabs: Vec<Tab>,
	field_types: HashMap<Box<str>, FieldType>,
}

impl Schema {
	/// Declared tabs, in registration order
	pub fn tabs(&self) -> &[Tab] {
		&self.tabs
	}

	pub fn tab(&self, id: &str) -> Option<&Tab> {
		self.tabs.iter().find(|tab| &*tab.id == id)
	}

	pub fn has_tab(&self, id: &str) -> bool {
		self.tab(id).is_some()
	}

	pub fn section(&self, tab: &str, section: &str) -> Option<&Section> {
		self.tab(tab)?.sections.iter().find(|s| &*s.id == section)
	}

	/// Flattened field id → type lookup used by the sanitize pipeline so
	/// it need not walk the tree per submitted key.
	pub fn field_types(&self) -> &HashMap<Box<str>, FieldType> {
		&self.field_types
	}

	pub fn field_type(&self, id: &str) -> Option<&FieldType> {
		self.field_types.get(id)
	}
}


// vim: ts=4
