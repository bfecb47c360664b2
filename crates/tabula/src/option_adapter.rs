//! Persistence collaborator seam.
//!
//! The settings layer does not own storage: the host platform provides a
//! named key/value store and the core talks to it through this trait.
//! One record holds one plugin's whole settings blob; writes always
//! replace the record as a whole.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait OptionAdapter: Debug + Send + Sync {
	/// Read a named record. Returns `None` when the record does not exist.
	async fn read_option(&self, name: &str) -> TbResult<Option<SettingsBlob>>;

	/// Replace a named record as a whole. Returns whether the write
	/// succeeded.
	async fn write_option(&self, name: &str, blob: &SettingsBlob) -> TbResult<bool>;

	/// Create a named record with an initial value unless it already
	/// exists. Returns whether a record was created.
	async fn create_option(&self, name: &str, initial: &SettingsBlob) -> TbResult<bool>;
}

/// In-memory adapter for tests and hosts that embed the panel without a
/// database.
#[derive(Debug, Default)]
pub struct MemoryOptionAdapter {
	records: RwLock<HashMap<Box<str>, SettingsBlob>>,
}

impl MemoryOptionAdapter {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl OptionAdapter for MemoryOptionAdapter {
	async fn read_option(&self, name: &str) -> TbResult<Option<SettingsBlob>> {
		Ok(self.records.read().get(name).cloned())
	}

	async fn write_option(&self, name: &str, blob: &SettingsBlob) -> TbResult<bool> {
		self.records.write().insert(name.into(), blob.clone());
		Ok(true)
	}

	async fn create_option(&self, name: &str, initial: &SettingsBlob) -> TbResult<bool> {
		let mut records = self.records.write();
		if records.contains_key(name) {
			return Ok(false);
		}
		records.insert(name.into(), initial.clone());
		Ok(true)
	}
}

// vim: ts=4
