//! Settings page view handler.

use axum::{
	extract::{Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tabula::{resolve_view, Notice, SettingsPanel, Value};

use crate::AdminResult;

#[derive(Debug, Deserialize)]
pub struct ViewParams {
	pub tab: Option<String>,
	pub section: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TabView {
	pub id: Box<str>,
	pub label: Box<str>,
	pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
	pub id: Box<str>,
	pub label: Box<str>,
	pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct FieldView {
	pub id: Box<str>,
	#[serde(rename = "type")]
	pub typ: Box<str>,
	pub name: Box<str>,
	pub desc: Box<str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
	/// Control markup from the render collaborator. Falls back to a
	/// visible placeholder when no renderer is bound for the type.
	pub markup: String,
}

#[derive(Debug, Serialize)]
pub struct PageView {
	pub tabs: Vec<TabView>,
	pub sections: Vec<SectionView>,
	pub fields: Vec<FieldView>,
	pub notices: Vec<Notice>,
}

/// GET /settings - Resolved page view for the requested tab/section
pub async fn settings_page(
	State(panel): State<Arc<SettingsPanel>>,
	Query(params): Query<ViewParams>,
) -> AdminResult<(StatusCode, Json<PageView>)> {
	let schema = panel.schema();
	let view = resolve_view(
		params.tab.as_deref(),
		params.section.as_deref(),
		&schema,
		panel.default_tab(),
	);
	let blob = panel.store().get_all().await?;

	let tabs = schema
		.tabs()
		.iter()
		.map(|tab| TabView {
			id: tab.id.clone(),
			label: tab.label.clone(),
			active: tab.id == view.tab,
		})
		.collect();

	let sections = schema
		.tab(&view.tab)
		.map(|tab| {
			tab.sections
				.iter()
				.map(|section| SectionView {
					id: section.id.clone(),
					label: section.label.clone(),
					active: section.id == view.section,
				})
				.collect()
		})
		.unwrap_or_default();

	let fields = schema
		.section(&view.tab, &view.section)
		.map(|section| {
			section
				.fields
				.iter()
				.map(|field| {
					let current = blob.get(&field.id);
					FieldView {
						id: field.id.clone(),
						typ: field.typ.as_str().into(),
						name: field.name.clone(),
						desc: field.desc.clone(),
						value: current.or(field.std.as_ref()).cloned(),
						markup: panel.registry().render(field, current),
					}
				})
				.collect()
		})
		.unwrap_or_default();

	let response = PageView { tabs, sections, fields, notices: panel.notices().drain() };

	Ok((StatusCode::OK, Json(response)))
}


// vim: ts=4
