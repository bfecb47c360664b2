//! Field type capability registry.
//!
//! Maps a field type name to its sanitize and render callbacks. The
//! original layer located these by composing function names at runtime;
//! here the bindings are explicit table entries with a guaranteed
//! fallback, so an unknown type can never take the page down.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::field::{FieldDescriptor, FieldType};
use crate::types::Value;

/// Sanitizer callback: receives the raw value and the field id, returns
/// the cleaned value. Must not fail; pass the value through when in
/// doubt.
pub type SanitizeFn = Arc<dyn Fn(Value, &str) -> Value + Send + Sync>;

/// Renderer callback: receives the descriptor and the currently stored
/// value, returns control markup.
pub type RenderFn = Arc<dyn Fn(&FieldDescriptor, Option<&Value>) -> String + Send + Sync>;

pub struct FieldTypeRegistry {
	sanitizers: HashMap<Box<str>, SanitizeFn>,
	secondary_sanitizers: Vec<SanitizeFn>,
	renderers: HashMap<Box<str>, RenderFn>,
}

impl FieldTypeRegistry {
	pub fn new() -> Self {
		let mut registry = Self {
			sanitizers: HashMap::new(),
			secondary_sanitizers: Vec::new(),
			renderers: HashMap::new(),
		};
		registry.register_sanitizer("text", |value, _key| sanitize_text(value));
		registry
	}

	/// Bind a sanitizer to a field type name, replacing any existing
	/// binding.
	pub fn register_sanitizer<F>(&mut self, typ: &str, f: F)
	where
		F: Fn(Value, &str) -> Value + Send + Sync + 'static,
	{
		self.sanitizers.insert(typ.into(), Arc::new(f));
	}

	/// Add a secondary sanitizer applied to every field after its type
	/// sanitizer.
	pub fn register_secondary_sanitizer<F>(&mut self, f: F)
	where
		F: Fn(Value, &str) -> Value + Send + Sync + 'static,
	{
		self.secondary_sanitizers.push(Arc::new(f));
	}

	/// Bind a renderer to a field type name.
	pub fn register_renderer<F>(&mut self, typ: &str, f: F)
	where
		F: Fn(&FieldDescriptor, Option<&Value>) -> String + Send + Sync + 'static,
	{
		self.renderers.insert(typ.into(), Arc::new(f));
	}

	/// Apply the sanitizer bound to `typ`, then every secondary hook.
	/// Types without a binding pass the value through untouched.
	pub fn sanitize(&self, typ: &FieldType, value: Value, key: &str) -> Value {
		let value = match self.sanitizers.get(typ.as_str()) {
			Some(f) => f(value, key),
			None => value,
		};

		self.secondary_sanitizers.iter().fold(value, |value, f| f(value, key))
	}

	/// Render the control for a field. A type without a registered
	/// renderer yields a visible placeholder instead of an error.
	pub fn render(&self, field: &FieldDescriptor, current: Option<&Value>) -> String {
		match self.renderers.get(field.typ.as_str()) {
			Some(f) => f(field, current),
			None => missing_callback(&field.id),
		}
	}

	pub fn has_renderer(&self, typ: &FieldType) -> bool {
		self.renderers.contains_key(typ.as_str())
	}
}

impl Default for FieldTypeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for FieldTypeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldTypeRegistry")
			.field("sanitizers", &self.sanitizers.len())
			.field("secondary_sanitizers", &self.secondary_sanitizers.len())
			.field("renderers", &self.renderers.len())
			.finish()
	}
}

/// Placeholder shown when a field type has no registered renderer.
fn missing_callback(id: &str) -> String {
	format!("The callback function used for the <strong>{}</strong> setting is missing.", id)
}

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
	#[allow(clippy::unwrap_used)] // pattern is a compile-time constant
	Regex::new(r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>").unwrap()
});

/// The built-in text sanitizer: trim plus strip markup. Script and style
/// elements are removed with their contents, remaining tags are dropped.
/// Idempotent, so re-sanitizing stored values is harmless.
pub fn sanitize_text(value: Value) -> Value {
	match value {
		Value::Str(s) => Value::Str(strip_all_tags(&s).into()),
		other => other,
	}
}

fn strip_all_tags(input: &str) -> String {
	let without_blocks = SCRIPT_STYLE_RE.replace_all(input, "");

	let mut out = String::with_capacity(without_blocks.len());
	let mut in_tag = false;
	for ch in without_blocks.chars() {
		match ch {
			'<' => in_tag = true,
			'>' => in_tag = false,
			c if !in_tag => out.push(c),
			_ => {}
		}
	}

	out.trim().to_string()
}


// vim: ts=4
