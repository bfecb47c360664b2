//! Field descriptors and the built-in field type set.

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Field types known to the settings panel.
///
/// `Other` carries any type name a consumer registers beyond the
/// built-in set. Rendering such a field without a registered renderer
/// degrades to a visible placeholder instead of failing the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
	Checkbox,
	Color,
	Text,
	Textarea,
	Number,
	Password,
	Radio,
	Select,
	Multicheck,
	Upload,
	Editor,
	Html,
	LicenseKey,
	DescriptiveText,
	Header,
	Hook,
	Other(Box<str>),
}

impl FieldType {
	pub fn as_str(&self) -> &str {
		match self {
			FieldType::Checkbox => "checkbox",
			FieldType::Color => "color",
			FieldType::Text => "text",
			FieldType::Textarea => "textarea",
			FieldType::Number => "number",
			FieldType::Password => "password",
			FieldType::Radio => "radio",
			FieldType::Select => "select",
			FieldType::Multicheck => "multicheck",
			FieldType::Upload => "upload",
			FieldType::Editor => "editor",
			FieldType::Html => "html",
			FieldType::LicenseKey => "license_key",
			FieldType::DescriptiveText => "descriptive_text",
			FieldType::Header => "header",
			FieldType::Hook => "hook",
			FieldType::Other(name) => name,
		}
	}

	/// Types that render page furniture but never persist a value.
	pub fn is_non_setting(&self) -> bool {
		matches!(self, FieldType::Header | FieldType::DescriptiveText | FieldType::Hook)
	}
}

impl From<&str> for FieldType {
	fn from(name: &str) -> Self {
		match name {
			"checkbox" => FieldType::Checkbox,
			"color" => FieldType::Color,
			"text" => FieldType::Text,
			"textarea" => FieldType::Textarea,
			"number" => FieldType::Number,
			"password" => FieldType::Password,
			"radio" => FieldType::Radio,
			"select" => FieldType::Select,
			"multicheck" => FieldType::Multicheck,
			"upload" => FieldType::Upload,
			"editor" => FieldType::Editor,
			"html" => FieldType::Html,
			"license_key" => FieldType::LicenseKey,
			"descriptive_text" => FieldType::DescriptiveText,
			"header" => FieldType::Header,
			"hook" => FieldType::Hook,
			other => FieldType::Other(other.into()),
		}
	}
}

impl std::fmt::Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl Serialize for FieldType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for FieldType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let name = String::deserialize(deserializer)?;
		Ok(FieldType::from(name.as_str()))
	}
}

/// Schema entry describing one persisted setting and how to render and
/// sanitize it. `id` is the persistence key; it must be unique across
/// the plugin's whole schema (collisions silently overwrite on
/// persistence).
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
	pub id: Box<str>,
	#[serde(rename = "type")]
	pub typ: FieldType,
	pub name: Box<str>,
	pub desc: Box<str>,

	/// Default value shown when nothing is stored yet ("std" in the
	/// original schema arrays).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub std: Option<Value>,

	/// Ordered key/label pairs for select, radio and multicheck fields.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<(Box<str>, Box<str>)>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<Box<str>>,
	pub multiple: bool,
	pub allow_blank: bool,
	pub readonly: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tooltip: Option<(Box<str>, Box<str>)>,
}

impl FieldDescriptor {
	/// Create a builder for constructing a FieldDescriptor
	pub fn builder(id: impl Into<Box<str>>, typ: FieldType) -> FieldDescriptorBuilder {
		FieldDescriptorBuilder::new(id, typ)
	}
}

/// Builder for FieldDescriptor with fluent API
pub struct FieldDescriptorBuilder {
	field: FieldDescriptor,
}

impl FieldDescriptorBuilder {
	pub fn new(id: impl Into<Box<str>>, typ: FieldType) -> Self {
		Self {
			field: FieldDescriptor {
				id: id.into(),
				typ,
				name: "".into(),
				desc: "".into(),
				std: None,
				options: Vec::new(),
				min: None,
				max: None,
				step: None,
				size: None,
				placeholder: None,
				multiple: false,
				allow_blank: true, // Blank values accepted by default
				readonly: false,
				tooltip: None,
			},
		}
	}

	/// Set the display label
	pub fn name(mut self, name: impl Into<Box<str>>) -> Self {
		self.field.name = name.into();
		self
	}

	/// Set the description shown next to the control
	pub fn desc(mut self, desc: impl Into<Box<str>>) -> Self {
		self.field.desc = desc.into();
		self
	}

	/// Set the default value
	pub fn std(mut self, value: impl Into<Value>) -> Self {
		self.field.std = Some(value.into());
		self
	}

	/// Append one key/label option pair (select, radio, multicheck)
	pub fn option(mut self, key: impl Into<Box<str>>, label: impl Into<Box<str>>) -> Self {
		self.field.options.push((key.into(), label.into()));
		self
	}

	pub fn min(mut self, min: f64) -> Self {
		self.field.min = Some(min);
		self
	}

	pub fn max(mut self, max: f64) -> Self {
		self.field.max = Some(max);
		self
	}

	pub fn step(mut self, step: f64) -> Self {
		self.field.step = Some(step);
		self
	}

	pub fn size(mut self, size: impl Into<Box<str>>) -> Self {
		self.field.size = Some(size.into());
		self
	}

	pub fn placeholder(mut self, placeholder: impl Into<Box<str>>) -> Self {
		self.field.placeholder = Some(placeholder.into());
		self
	}

	pub fn multiple(mut self, multiple: bool) -> Self {
		self.field.multiple = multiple;
		self
	}

	pub fn allow_blank(mut self, allow_blank: bool) -> Self {
		self.field.allow_blank = allow_blank;
		self
	}

	pub fn readonly(mut self, readonly: bool) -> Self {
		self.field.readonly = readonly;
		self
	}

	pub fn tooltip(mut self, title: impl Into<Box<str>>, desc: impl Into<Box<str>>) -> Self {
		self.field.tooltip = Some((title.into(), desc.into()));
		self
	}

	pub fn build(self) -> FieldDescriptor {
		self.field
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn field_type_round_trips_through_names() {
		for name in ["checkbox", "select", "license_key", "descriptive_text"] {
			assert_eq!(FieldType::from(name).as_str(), name);
		}
	}

	#[test]
	fn unknown_type_names_are_preserved() {
		let typ = FieldType::from("wysiwyg");
		assert_eq!(typ, FieldType::Other("wysiwyg".into()));
		assert_eq!(typ.as_str(), "wysiwyg");
	}

	#[test]
	fn non_setting_types() {
		assert!(FieldType::Header.is_non_setting());
		assert!(FieldType::DescriptiveText.is_non_setting());
		assert!(FieldType::Hook.is_non_setting());
		assert!(!FieldType::Checkbox.is_non_setting());
	}

	#[test]
	fn builder_defaults() {
		let field = FieldDescriptor::builder("mode", FieldType::Select)
			.name("Mode")
			.option("master", "Master")
			.option("slave", "Slave")
			.std("slave")
			.build();

		assert_eq!(&*field.id, "mode");
		assert!(field.allow_blank);
		assert!(!field.readonly);
		assert_eq!(field.options.len(), 2);
		assert_eq!(field.std, Some(Value::Str("slave".into())));
	}
}

// vim: ts=4
