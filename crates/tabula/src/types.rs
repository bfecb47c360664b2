//! Common value types for the settings layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value a checkbox submits when checked.
pub const CHECKBOX_ON: &str = "1";

/// Sentinel a checkbox's hidden companion field submits. It only survives
/// as the effective value when the box was left unchecked, which signals
/// an explicit uncheck to the sanitize pipeline.
pub const CHECKBOX_OFF: &str = "-1";

/// A single persisted setting value.
///
/// Values are shaped the way server-rendered admin forms submit them:
/// strings, numbers, and ordered string sequences (multi-select and
/// multicheck fields). Booleans are carried as the string "1".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Number(f64), // Must be before Str so JSON numbers don't coerce
	Str(Box<str>),
	List(Vec<Box<str>>),
}

impl Value {
	/// The falsy convention inherited from the original options layer:
	/// empty string, zero, and the empty list all count as "not set".
	pub fn is_empty(&self) -> bool {
		match self {
			Value::Number(n) => *n == 0.0,
			Value::Str(s) => s.is_empty(),
			Value::List(items) => items.is_empty(),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Type name for log and error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Number(_) => "number",
			Value::Str(_) => "string",
			Value::List(_) => "list",
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(s.into())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Str(s.into())
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Value::Number(n)
	}
}

impl From<Vec<Box<str>>> for Value {
	fn from(items: Vec<Box<str>>) -> Self {
		Value::List(items)
	}
}

/// The single persisted record holding all of one plugin's settings,
/// keyed by field id.
pub type SettingsBlob = HashMap<Box<str>, Value>;


// vim: ts=4
