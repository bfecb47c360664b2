//! The per-plugin settings panel facade.
//!
//! Owns the pieces one plugin instance needs: slug, default tab, schema
//! providers, field type registry, store, notice queue, and named action
//! hooks. The schema itself is rebuilt from the providers on every page
//! load, mirroring the host platform's registration-callback lifecycle —
//! it is deliberately not cached across requests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::notice::{NoticeLevel, NoticeQueue};
use crate::option_adapter::OptionAdapter;
use crate::prelude::*;
use crate::registry::FieldTypeRegistry;
use crate::sanitize::sanitize_settings;
use crate::schema::{Schema, SchemaBuilder};
use crate::store::SettingsStore;
use crate::submission::{SaveScope, Submission};

/// Registration callback run against the schema builder on every page
/// load. Hosts register tabs, sections, and field groups here.
pub type SchemaProvider = Box<dyn Fn(&mut SchemaBuilder) + Send + Sync>;

/// Named action hook dispatched from the request surface via the
/// `<slug>-settings-action` parameter.
pub type ActionHook = Box<dyn Fn(&HashMap<Box<str>, Box<str>>) + Send + Sync>;

pub struct SettingsPanel {
	slug: Box<str>,
	func: Box<str>,
	default_tab: Box<str>,
	providers: Vec<SchemaProvider>,
	registry: FieldTypeRegistry,
	store: SettingsStore,
	notices: NoticeQueue,
	actions: HashMap<Box<str>, ActionHook>,
}

impl SettingsPanel {
	/// Create a builder for constructing a SettingsPanel
	pub fn builder(slug: impl Into<Box<str>>) -> SettingsPanelBuilder {
		SettingsPanelBuilder::new(slug)
	}

	/// The plugin slug this panel belongs to
	pub fn slug(&self) -> &str {
		&self.slug
	}

	/// Identifier-safe form of the slug (`-` replaced with `_`), used to
	/// derive the persisted record name and the settings array name
	pub fn func(&self) -> &str {
		&self.func
	}

	/// Name of the settings array in posted forms
	/// (`<func>_settings[field_id]`)
	pub fn settings_key(&self) -> String {
		format!("{}_settings", self.func)
	}

	pub fn default_tab(&self) -> &str {
		&self.default_tab
	}

	pub fn store(&self) -> &SettingsStore {
		&self.store
	}

	pub fn registry(&self) -> &FieldTypeRegistry {
		&self.registry
	}

	pub fn notices(&self) -> &NoticeQueue {
		&self.notices
	}

	/// Rebuild the schema from the registered providers, in registration
	/// order. Runs on every page load.
	pub fn schema(&self) -> Schema {
		let mut builder = SchemaBuilder::new();
		for provider in &self.providers {
			provider(&mut builder);
		}
		builder.freeze()
	}

	/// Run the sanitize/merge pipeline on a submission and persist the
	/// result as a whole-blob write. A scoped save queues a success
	/// notice; a full-form save relies on the host platform's own.
	pub async fn apply_submission(&self, submission: &Submission) -> TbResult<bool> {
		let schema = self.schema();
		let current = self.store.get_all().await?;
		let (output, scope) =
			sanitize_settings(&schema, &self.registry, &current, submission, &self.default_tab);

		let did_write = self.store.replace_all(output).await?;
		if did_write {
			if let SaveScope::Section { tab, section } = &scope {
				debug!("saved settings section {}/{} for '{}'", tab, section, self.slug);
				self.notices.push("settings-updated", "Settings updated.", NoticeLevel::Updated);
			} else {
				debug!("saved full settings form for '{}'", self.slug);
			}
		} else {
			warn!("settings write failed for '{}'", self.slug);
		}
		Ok(did_write)
	}

	/// Dispatch a named action if one is registered. Unknown actions are
	/// ignored, never fatal.
	pub fn process_action(&self, name: &str, params: &HashMap<Box<str>, Box<str>>) -> bool {
		match self.actions.get(name) {
			Some(hook) => {
				debug!("dispatching settings action '{}' for '{}'", name, self.slug);
				hook(params);
				true
			}
			None => {
				debug!("ignoring unregistered settings action '{}'", name);
				false
			}
		}
	}
}

impl std::fmt::Debug for SettingsPanel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsPanel")
			.field("slug", &self.slug)
			.field("default_tab", &self.default_tab)
			.field("providers", &self.providers.len())
			.field("actions", &self.actions.len())
			.finish()
	}
}

/// Builder for SettingsPanel with fluent API
pub struct SettingsPanelBuilder {
	slug: Box<str>,
	default_tab: Box<str>,
	providers: Vec<SchemaProvider>,
	registry: FieldTypeRegistry,
	adapter: Option<Arc<dyn OptionAdapter>>,
	actions: HashMap<Box<str>, ActionHook>,
}

impl SettingsPanelBuilder {
	pub fn new(slug: impl Into<Box<str>>) -> Self {
		Self {
			slug: slug.into(),
			default_tab: "general".into(),
			providers: Vec::new(),
			registry: FieldTypeRegistry::new(),
			adapter: None,
			actions: HashMap::new(),
		}
	}

	/// Set the tab shown when none is requested (defaults to "general")
	pub fn default_tab(mut self, tab: impl Into<Box<str>>) -> Self {
		self.default_tab = tab.into();
		self
	}

	/// Add a schema registration callback
	pub fn provider<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut SchemaBuilder) + Send + Sync + 'static,
	{
		self.providers.push(Box::new(f));
		self
	}

	/// Set the persistence collaborator (required)
	pub fn adapter(mut self, adapter: Arc<dyn OptionAdapter>) -> Self {
		self.adapter = Some(adapter);
		self
	}

	/// Replace the field type registry wholesale
	pub fn registry(mut self, registry: FieldTypeRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Bind a sanitizer for a field type name
	pub fn sanitizer<F>(mut self, typ: &str, f: F) -> Self
	where
		F: Fn(Value, &str) -> Value + Send + Sync + 'static,
	{
		self.registry.register_sanitizer(typ, f);
		self
	}

	/// Bind a renderer for a field type name
	pub fn renderer<F>(mut self, typ: &str, f: F) -> Self
	where
		F: Fn(&crate::field::FieldDescriptor, Option<&Value>) -> String + Send + Sync + 'static,
	{
		self.registry.register_renderer(typ, f);
		self
	}

	/// Register a named action hook
	pub fn action<F>(mut self, name: impl Into<Box<str>>, f: F) -> Self
	where
		F: Fn(&HashMap<Box<str>, Box<str>>) + Send + Sync + 'static,
	{
		self.actions.insert(name.into(), Box::new(f));
		self
	}

	/// Build the SettingsPanel
	pub fn build(self) -> TbResult<SettingsPanel> {
		if self.slug.is_empty() {
			return Err(Error::ConfigError("settings panel needs a plugin slug".into()));
		}
		let adapter = self
			.adapter
			.ok_or_else(|| Error::ConfigError("settings panel needs an option adapter".into()))?;

		let func: Box<str> = self.slug.replace('-', "_").into();
		let store = SettingsStore::new(format!("{}_settings", func), adapter);

		Ok(SettingsPanel {
			slug: self.slug,
			func,
			default_tab: self.default_tab,
			providers: self.providers,
			registry: self.registry,
			store,
			notices: NoticeQueue::new(),
			actions: self.actions,
		})
	}
}


// vim: ts=4
