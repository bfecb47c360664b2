//! Raw form submission decoding.
//!
//! Settings forms post to a generic handler, so the tab/section being
//! saved travels in a hidden referrer field rather than the request URL.
//! Field values arrive under bracketed names composed from the plugin's
//! settings array name: `demo_settings[mode]`, `demo_settings[tags][]`
//! (multi-select), `demo_settings[features][beta]` (multicheck).

use std::collections::HashMap;

use url::form_urlencoded;

use crate::schema::MAIN_SECTION;
use crate::types::Value;

/// Name of the hidden field carrying the referring page's URL
pub const REFERER_FIELD: &str = "_http_referer";

/// Scope of a submission, resolved from the hidden referrer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveScope {
	/// Whole-form save through the generic handler (no referrer token)
	Full,
	/// Single tab/section save
	Section { tab: Box<str>, section: Box<str> },
}

/// A decoded settings form submission
#[derive(Debug, Default)]
pub struct Submission {
	/// Raw submitted values keyed by field id, after bracket decoding
	pub values: HashMap<Box<str>, Value>,
	/// The hidden referrer token, when present
	pub referrer: Option<Box<str>>,
	/// Scalar pairs outside the settings array (submit button, nonce
	/// fields, named action parameters)
	pub extra: HashMap<Box<str>, Box<str>>,
}

impl Submission {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set one raw value (host code and tests)
	pub fn set(mut self, key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}

	pub fn with_referrer(mut self, referrer: impl Into<Box<str>>) -> Self {
		self.referrer = Some(referrer.into());
		self
	}

	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	/// Decode an urlencoded form body. Pairs under `array_name[...]`
	/// become values; everything else lands in `extra` (or `referrer`
	/// for the hidden referrer field). Malformed names are ignored.
	pub fn from_form(body: &str, array_name: &str) -> Self {
		let mut submission = Submission::default();

		for (key, value) in form_urlencoded::parse(body.as_bytes()) {
			if key == REFERER_FIELD {
				submission.referrer = Some(value.into_owned().into());
				continue;
			}

			let Some(path) = parse_bracket_path(&key, array_name) else {
				submission.extra.insert(key.into_owned().into(), value.into_owned().into());
				continue;
			};

			match path {
				BracketPath::Scalar(id) => {
					submission.values.insert(id.into(), Value::Str(value.into_owned().into()));
				}
				BracketPath::ListItem(id, sub) => {
					// Multicheck pairs carry the option key in the name;
					// multi-select pairs carry it in the value
					let item: Box<str> = match sub {
						Some(sub) => sub.into(),
						None => value.into_owned().into(),
					};
					let entry = submission
						.values
						.entry(id.into())
						.or_insert_with(|| Value::List(Vec::new()));
					match entry {
						Value::List(items) => items.push(item),
						other => *other = Value::List(vec![item]),
					}
				}
			}
		}

		submission
	}

	/// Resolve the save scope carried in the referrer token. The token
	/// holds the referring page's URL; its query string names the tab
	/// and section being saved. No token means a full-form save.
	pub fn scope(&self, default_tab: &str) -> SaveScope {
		let Some(token) = &self.referrer else {
			return SaveScope::Full;
		};

		let query = token.split_once('?').map_or(&**token, |(_, query)| query);

		let mut tab = None;
		let mut section = None;
		for (key, value) in form_urlencoded::parse(query.as_bytes()) {
			match &*key {
				"tab" => tab = Some(value.into_owned()),
				"section" => section = Some(value.into_owned()),
				_ => {}
			}
		}

		SaveScope::Section {
			tab: tab.map_or_else(|| default_tab.into(), Into::into),
			section: section.map_or_else(|| MAIN_SECTION.into(), Into::into),
		}
	}
}

enum BracketPath<'a> {
	Scalar(&'a str),
	ListItem(&'a str, Option<&'a str>),
}

fn parse_bracket_path<'a>(key: &'a str, array_name: &str) -> Option<BracketPath<'a>> {
	let rest = key.strip_prefix(array_name)?;
	let rest = rest.strip_prefix('[')?;
	let (id, rest) = rest.split_once(']')?;
	if id.is_empty() {
		return None;
	}
	if rest.is_empty() {
		return Some(BracketPath::Scalar(id));
	}

	let rest = rest.strip_prefix('[')?;
	let (sub, rest) = rest.split_once(']')?;
	if !rest.is_empty() {
		return None;
	}
	Some(BracketPath::ListItem(id, (!sub.is_empty()).then_some(sub)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_scalar_fields() {
		let body = "demo_settings%5Bmode%5D=master&submit=Save";
		let submission = Submission::from_form(body, "demo_settings");

		assert_eq!(submission.get("mode"), Some(&Value::Str("master".into())));
		assert_eq!(submission.extra.get("submit").map(|v| &**v), Some("Save"));
	}

	#[test]
	fn decodes_multi_select_lists() {
		let body = "demo_settings%5Btags%5D%5B%5D=a&demo_settings%5Btags%5D%5B%5D=b";
		let submission = Submission::from_form(body, "demo_settings");

		assert_eq!(
			submission.get("tags"),
			Some(&Value::List(vec!["a".into(), "b".into()]))
		);
	}

	#[test]
	fn decodes_multicheck_option_keys() {
		let body = "demo_settings%5Bfeatures%5D%5Bbeta%5D=Beta&demo_settings%5Bfeatures%5D%5Blabs%5D=Labs";
		let submission = Submission::from_form(body, "demo_settings");

		assert_eq!(
			submission.get("features"),
			Some(&Value::List(vec!["beta".into(), "labs".into()]))
		);
	}

	#[test]
	fn referrer_field_is_captured_separately() {
		let body = "_http_referer=%2Fadmin%2Fsettings%3Ftab%3Dlicense&demo_settings%5Bkey%5D=x";
		let submission = Submission::from_form(body, "demo_settings");

		assert!(submission.referrer.is_some());
		assert!(!submission.values.contains_key(REFERER_FIELD));
	}

	#[test]
	fn missing_referrer_means_full_save() {
		let submission = Submission::new().set("mode", "master");
		assert_eq!(submission.scope("general"), SaveScope::Full);
	}

	#[test]
	fn referrer_query_names_the_scope() {
		let submission = Submission::new()
			.with_referrer("/admin/settings?page=demo&tab=license&section=keys");
		assert_eq!(
			submission.scope("general"),
			SaveScope::Section { tab: "license".into(), section: "keys".into() }
		);
	}

	#[test]
	fn scope_defaults_fill_missing_parameters() {
		let submission = Submission::new().with_referrer("/admin/settings?page=demo");
		assert_eq!(
			submission.scope("general"),
			SaveScope::Section { tab: "general".into(), section: "main".into() }
		);
	}

	#[test]
	fn malformed_bracket_names_are_ignored() {
		let body = "demo_settings%5B%5D=x&demo_settingsmode=y&demo_settings%5Ba%5D%5Bb%5D%5Bc%5D=z";
		let submission = Submission::from_form(body, "demo_settings");
		assert!(submission.values.is_empty());
	}
}

// vim: ts=4
