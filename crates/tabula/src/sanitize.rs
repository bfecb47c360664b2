//! The sanitize/merge pipeline run on form submission.
//!
//! Three phases: resolve the save scope from the submission's hidden
//! referrer token, sanitize per field type, then merge over the stored
//! blob and decide removals. The merge starts from the existing blob so
//! fields outside the submitted scope always survive; losing an admin's
//! unrelated settings is the one failure mode this pipeline must never
//! have, so unexpected shapes fall back to pass-through rather than
//! rejection.

use crate::field::FieldType;
use crate::prelude::*;
use crate::registry::FieldTypeRegistry;
use crate::schema::Schema;
use crate::submission::{SaveScope, Submission};
use crate::types::CHECKBOX_OFF;

/// Sanitize a submission and merge it over the existing blob.
///
/// Returns the new full blob and the resolved scope. Never fails:
/// unknown field types pass through unsanitized (legacy tolerance) and
/// keys with no registered type are kept as submitted.
pub fn sanitize_settings(
	schema: &Schema,
	registry: &FieldTypeRegistry,
	current: &SettingsBlob,
	submission: &Submission,
	default_tab: &str,
) -> (SettingsBlob, SaveScope) {
	let scope = submission.scope(default_tab);
	let scoped = matches!(scope, SaveScope::Section { .. });

	// Baseline is the stored blob; the submission is overlaid on top
	let mut output = current.clone();
	for (key, value) in &submission.values {
		output.insert(key.clone(), value.clone());
	}

	for (key, typ) in schema.field_types() {
		// Page furniture never persists
		if typ.is_non_setting() {
			continue;
		}

		if let Some(value) = output.remove(&**key) {
			output.insert(key.clone(), registry.sanitize(typ, value, key));
		}

		let submitted = submission.get(key);
		match typ {
			FieldType::Checkbox => {
				// The hidden "-1" companion survives as the effective
				// value only when the box was unchecked
				let unchecked =
					output.get(&**key).and_then(Value::as_str) == Some(CHECKBOX_OFF);
				if submitted.is_some() {
					if unchecked {
						output.remove(&**key);
					}
				} else if !scoped {
					output.remove(&**key);
				}
			}
			_ if scoped => {
				// Distinguish "field not rendered this submit" from
				// "field rendered and cleared"
				if submitted.is_some_and(Value::is_empty) {
					output.remove(&**key);
				}
			}
			_ => {
				if submitted.is_none_or(Value::is_empty) {
					output.remove(&**key);
				}
			}
		}
	}

	debug!(
		"sanitized submission: {} raw keys, {} keys in output",
		submission.values.len(),
		output.len()
	);
	(output, scope)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FieldDescriptor;
	use crate::schema::SchemaBuilder;
	use crate::types::Value;

	fn schema() -> Schema {
		let mut builder = SchemaBuilder::new();
		builder.tab("general", "General");
		builder.section("general", "main", "General Settings");
		builder.fields(
			"general",
			"main",
			vec![
				FieldDescriptor::builder("mode", FieldType::Select)
					.option("master", "Master")
					.option("slave", "Slave")
					.std("slave")
					.build(),
				FieldDescriptor::builder("master_url", FieldType::Text).build(),
				FieldDescriptor::builder("enabled", FieldType::Checkbox).build(),
				FieldDescriptor::builder("divider", FieldType::Header).build(),
			],
		);
		builder.freeze()
	}

	fn scoped(submission: Submission) -> Submission {
		submission.with_referrer("/admin/settings?tab=general&section=main")
	}

	#[test]
	fn scoped_save_preserves_unsubmitted_fields() {
		let current = SettingsBlob::from([
			("other_tab_key".into(), Value::Str("kept".into())),
			("master_url".into(), Value::Str("https://old".into())),
		]);
		let submission = scoped(Submission::new().set("mode", "master"));

		let (output, scope) =
			sanitize_settings(&schema(), &FieldTypeRegistry::new(), &current, &submission, "general");

		assert!(matches!(scope, SaveScope::Section { .. }));
		assert_eq!(output.get("other_tab_key"), Some(&Value::Str("kept".into())));
		assert_eq!(output.get("master_url"), Some(&Value::Str("https://old".into())));
		assert_eq!(output.get("mode"), Some(&Value::Str("master".into())));
	}

	#[test]
	fn cleared_field_is_removed_on_scoped_save() {
		let current = SettingsBlob::from([("master_url".into(), Value::Str("https://old".into()))]);
		let submission = scoped(Submission::new().set("master_url", ""));

		let (output, _) =
			sanitize_settings(&schema(), &FieldTypeRegistry::new(), &current, &submission, "general");

		assert!(!output.contains_key("master_url"));
	}

	#[test]
	fn checkbox_off_sentinel_removes_the_key() {
		let current = SettingsBlob::from([("enabled".into(), Value::Str("1".into()))]);
		let submission = scoped(Submission::new().set("enabled", "-1"));

		let (output, _) =
			sanitize_settings(&schema(), &FieldTypeRegistry::new(), &current, &submission, "general");

		assert!(!output.contains_key("enabled"));
	}

	#[test]
	fn checkbox_off_sentinel_also_applies_on_full_save() {
		let current = SettingsBlob::from([("enabled".into(), Value::Str("1".into()))]);
		let submission = Submission::new().set("enabled", "-1").set("mode", "master");

		let (output, scope) =
			sanitize_settings(&schema(), &FieldTypeRegistry::new(), &current, &submission, "general");

		assert_eq!(scope, SaveScope::Full);
		assert!(!output.contains_key("enabled"));
	}

	#[test]
	fn checkbox_on_value_is_kept() {
		let submission = scoped(Submission::new().set("enabled", "1"));

		let (output, _) = sanitize_settings(
			&schema(),
			&FieldTypeRegistry::new(),
			&SettingsBlob::new(),
			&submission,
			"general",
		);

		assert_eq!(output.get("enabled"), Some(&Value::Str("1".into())));
	}

	#[test]
	fn full_save_removes_registered_fields_absent_from_submission() {
		let current = SettingsBlob::from([
			("mode".into(), Value::Str("master".into())),
			("master_url".into(), Value::Str("https://old".into())),
			("unregistered".into(), Value::Str("kept".into())),
		]);
		let submission = Submission::new().set("mode", "slave");

		let (output, _) =
			sanitize_settings(&schema(), &FieldTypeRegistry::new(), &current, &submission, "general");

		assert_eq!(output.get("mode"), Some(&Value::Str("slave".into())));
		assert!(!output.contains_key("master_url"));
		// Keys the schema does not know about are never removed
		assert_eq!(output.get("unregistered"), Some(&Value::Str("kept".into())));
	}

	#[test]
	fn text_fields_are_sanitized_on_merge() {
		let submission = scoped(Submission::new().set("master_url", "  <b>https://x</b>  "));

		let (output, _) = sanitize_settings(
			&schema(),
			&FieldTypeRegistry::new(),
			&SettingsBlob::new(),
			&submission,
			"general",
		);

		assert_eq!(output.get("master_url"), Some(&Value::Str("https://x".into())));
	}

	#[test]
	fn unknown_field_types_pass_through() {
		let mut builder = SchemaBuilder::new();
		builder.tab("general", "General");
		builder.tab_fields(
			"general",
			vec![FieldDescriptor::builder("custom", FieldType::Other("widget".into())).build()],
		);
		let schema = builder.freeze();

		let submission = scoped(Submission::new().set("custom", "<raw value>"));
		let (output, _) = sanitize_settings(
			&schema,
			&FieldTypeRegistry::new(),
			&SettingsBlob::new(),
			&submission,
			"general",
		);

		assert_eq!(output.get("custom"), Some(&Value::Str("<raw value>".into())));
	}

	#[test]
	fn non_setting_types_are_never_persisted() {
		let submission = scoped(Submission::new().set("divider", "anything"));

		let (output, _) = sanitize_settings(
			&schema(),
			&FieldTypeRegistry::new(),
			&SettingsBlob::new(),
			&submission,
			"general",
		);

		// The raw key stays only because it was submitted; the header
		// type itself is skipped by the removal pass
		assert_eq!(output.get("divider"), Some(&Value::Str("anything".into())));
	}

	#[test]
	fn end_to_end_scoped_save_of_one_field() {
		// Register mode (select, std slave) and master_url (text);
		// submit only mode=master for general/main
		let submission = scoped(Submission::new().set("mode", "master"));

		let (output, _) = sanitize_settings(
			&schema(),
			&FieldTypeRegistry::new(),
			&SettingsBlob::new(),
			&submission,
			"general",
		);

		assert_eq!(output.get("mode"), Some(&Value::Str("master".into())));
		assert!(!output.contains_key("master_url"));
	}
}

// vim: ts=4
