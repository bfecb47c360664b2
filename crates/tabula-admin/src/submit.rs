//! Settings form submission handler.

use axum::{
	extract::{RawForm, State},
	http::StatusCode,
	Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use tabula::{Notice, SettingsPanel, Submission};

use crate::AdminResult;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
	/// Whether a settings save was performed and persisted
	pub saved: bool,
	pub notices: Vec<Notice>,
}

/// POST /settings - Run a form submission through the save pipeline, or
/// dispatch a named action when the form carries one instead of a save.
pub async fn submit_settings(
	State(panel): State<Arc<SettingsPanel>>,
	RawForm(body): RawForm,
) -> AdminResult<(StatusCode, Json<SubmitResponse>)> {
	let body = String::from_utf8_lossy(&body);
	let submission = Submission::from_form(&body, &panel.settings_key());

	// A named action posts without the save button. The action hooks run
	// before any settings handling, matching the page load order of the
	// original admin flow.
	let action_key = format!("{}-settings-action", panel.slug());
	if !submission.extra.contains_key("submit") {
		if let Some(action) = submission.extra.get(action_key.as_str()) {
			debug!("settings action '{}' posted for '{}'", action, panel.slug());
			panel.process_action(action, &submission.extra);
			let response = SubmitResponse { saved: false, notices: panel.notices().drain() };
			return Ok((StatusCode::OK, Json(response)));
		}
	}

	let saved = panel.apply_submission(&submission).await?;
	let response = SubmitResponse { saved, notices: panel.notices().drain() };

	Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use tabula::{FieldDescriptor, FieldType, MemoryOptionAdapter, Value};

	static ACTION_CALLS: AtomicUsize = AtomicUsize::new(0);

	fn panel() -> Arc<SettingsPanel> {
		Arc::new(
			SettingsPanel::builder("demo-plugin")
				.adapter(Arc::new(MemoryOptionAdapter::new()))
				.provider(|schema| {
					schema.tab("general", "General");
					schema.section("general", "main", "General Settings");
					schema.fields(
						"general",
						"main",
						vec![
							FieldDescriptor::builder("mode", FieldType::Select)
								.option("master", "Master")
								.option("slave", "Slave")
								.build(),
							FieldDescriptor::builder("master_url", FieldType::Text).build(),
						],
					);
				})
				.action("download_system_info", |_params| {
					ACTION_CALLS.fetch_add(1, Ordering::SeqCst);
				})
				.build()
				.unwrap(),
		)
	}

	fn form(body: &str) -> RawForm {
		RawForm(axum::body::Bytes::copy_from_slice(body.as_bytes()))
	}

	#[tokio::test]
	async fn scoped_submit_saves_and_reports_notice() {
		let panel = panel();
		let body = "_http_referer=%2Fadmin%2Fsettings%3Ftab%3Dgeneral%26section%3Dmain\
			&demo_plugin_settings%5Bmode%5D=master&submit=Save";

		let (status, Json(response)) =
			submit_settings(State(panel.clone()), form(body)).await.unwrap();

		assert_eq!(status, StatusCode::OK);
		assert!(response.saved);
		assert_eq!(response.notices.len(), 1);
		assert_eq!(&*response.notices[0].code, "settings-updated");

		let blob = panel.store().get_all().await.unwrap();
		assert_eq!(blob.get("mode"), Some(&Value::Str("master".into())));
	}

	#[tokio::test]
	async fn named_action_skips_the_save_pipeline() {
		let panel = panel();
		let before = ACTION_CALLS.load(Ordering::SeqCst);
		let body = "demo-plugin-settings-action=download_system_info";

		let (_, Json(response)) = submit_settings(State(panel.clone()), form(body)).await.unwrap();

		assert!(!response.saved);
		assert_eq!(ACTION_CALLS.load(Ordering::SeqCst), before + 1);
		// Nothing was written
		let blob = panel.store().get_all().await.unwrap();
		assert!(blob.is_empty());
	}

	#[tokio::test]
	async fn submit_button_wins_over_action_parameter() {
		let panel = panel();
		let body = "demo-plugin-settings-action=download_system_info\
			&demo_plugin_settings%5Bmaster_url%5D=https%3A%2F%2Fexample.com&submit=Save";

		let (_, Json(response)) = submit_settings(State(panel.clone()), form(body)).await.unwrap();

		assert!(response.saved);
		let blob = panel.store().get_all().await.unwrap();
		assert_eq!(blob.get("master_url"), Some(&Value::Str("https://example.com".into())));
	}
}

// vim: ts=4
