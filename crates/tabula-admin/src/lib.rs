//! Admin request surface for tabula settings panels.
//!
//! Two endpoints per panel: `GET /settings` renders the resolved page
//! view (tabs, sections, fields with current values and control markup)
//! and `POST /settings` runs a submission through the sanitize/merge
//! pipeline. Named actions (`<slug>-settings-action`) bypass the save
//! pipeline and dispatch to the panel's registered hooks.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use axum::{
	http::StatusCode,
	response::IntoResponse,
	routing::get,
	Router,
};
use std::sync::Arc;

use tabula::SettingsPanel;

mod submit;
mod view;

pub use submit::{submit_settings, SubmitResponse};
pub use view::{settings_page, FieldView, PageView, SectionView, TabView, ViewParams};

/// Router exposing the settings page endpoints for one panel
pub fn routes(panel: Arc<SettingsPanel>) -> Router {
	Router::new()
		.route("/settings", get(settings_page).post(submit_settings))
		.with_state(panel)
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

/// Wrapper mapping core errors onto HTTP responses
#[derive(Debug)]
pub struct AdminError(pub tabula::Error);

impl From<tabula::Error> for AdminError {
	fn from(err: tabula::Error) -> Self {
		Self(err)
	}
}

impl IntoResponse for AdminError {
	fn into_response(self) -> axum::response::Response {
		match self.0 {
			tabula::Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			tabula::Error::ValidationError(msg) => {
				(StatusCode::BAD_REQUEST, msg.into_string()).into_response()
			}
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// vim: ts=4
