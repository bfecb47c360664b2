//! Whole-blob settings store.
//!
//! One named record per plugin holds the full settings mapping; every
//! mutation reads a clean copy, applies the change, and writes the blob
//! back as a whole. There is no cross-request locking: admin settings
//! pages are single-editor, low-frequency, and the later of two racing
//! writes wins.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::option_adapter::OptionAdapter;
use crate::prelude::*;

/// Change notification callback: field id and the new value (`None` on
/// delete).
pub type ChangeListener = Box<dyn Fn(&str, Option<&Value>) + Send + Sync>;

pub struct SettingsStore {
	record: Box<str>,
	adapter: Arc<dyn OptionAdapter>,
	cache: RwLock<Option<SettingsBlob>>,
	listeners: RwLock<Vec<ChangeListener>>,
}

impl SettingsStore {
	pub fn new(record: impl Into<Box<str>>, adapter: Arc<dyn OptionAdapter>) -> Self {
		Self {
			record: record.into(),
			adapter,
			cache: RwLock::new(None),
			listeners: RwLock::new(Vec::new()),
		}
	}

	/// Name of the persisted record this store reads and writes
	pub fn record(&self) -> &str {
		&self.record
	}

	/// Full settings blob, lazily creating an empty persisted record on
	/// first access.
	pub async fn get_all(&self) -> TbResult<SettingsBlob> {
		if let Some(blob) = self.cache.read().clone() {
			return Ok(blob);
		}

		let blob = match self.adapter.read_option(&self.record).await? {
			Some(blob) => blob,
			None => {
				let empty = SettingsBlob::new();
				self.adapter.create_option(&self.record, &empty).await?;
				empty
			}
		};

		*self.cache.write() = Some(blob.clone());
		Ok(blob)
	}

	/// Single value. Returns `None` when the key is absent *or* when the
	/// stored value is empty (empty string, zero, empty list) — callers
	/// cannot distinguish the two. Known limitation carried over from
	/// the original options layer; changing it would alter observable
	/// semantics for existing consumers.
	pub async fn get(&self, key: &str) -> TbResult<Option<Value>> {
		let blob = self.get_all().await?;
		Ok(blob.get(key).filter(|value| !value.is_empty()).cloned())
	}

	/// Single value with a fallback, same absence semantics as `get`
	pub async fn get_or(&self, key: &str, default: Value) -> TbResult<Value> {
		Ok(self.get(key).await?.unwrap_or(default))
	}

	/// Store one value. Empty values delegate to `delete` so the `get`
	/// semantics above stay consistent. Returns whether the underlying
	/// write succeeded.
	pub async fn update(&self, key: &str, value: Value) -> TbResult<bool> {
		if key.is_empty() {
			return Ok(false);
		}
		if value.is_empty() {
			return self.delete(key).await;
		}

		// Work from a clean copy of the record, not the cache
		let mut blob = self.adapter.read_option(&self.record).await?.unwrap_or_default();
		blob.insert(key.into(), value.clone());

		let did_write = self.adapter.write_option(&self.record, &blob).await?;
		if did_write {
			*self.cache.write() = Some(blob);
			self.notify(key, Some(&value));
		}
		Ok(did_write)
	}

	/// Remove one key. The blob is written back whether or not the key
	/// was present, so the return value only reflects write success and
	/// cannot be used to detect "key existed".
	pub async fn delete(&self, key: &str) -> TbResult<bool> {
		if key.is_empty() {
			return Ok(false);
		}

		let mut blob = self.adapter.read_option(&self.record).await?.unwrap_or_default();
		blob.remove(key);

		let did_write = self.adapter.write_option(&self.record, &blob).await?;
		if did_write {
			*self.cache.write() = Some(blob);
			self.notify(key, None);
		}
		Ok(did_write)
	}

	/// Replace the whole blob in one write. Used by the sanitize/merge
	/// pipeline after a form submission.
	pub async fn replace_all(&self, blob: SettingsBlob) -> TbResult<bool> {
		let did_write = self.adapter.write_option(&self.record, &blob).await?;
		if did_write {
			*self.cache.write() = Some(blob);
		}
		Ok(did_write)
	}

	/// Subscribe to per-key changes made through this store
	pub fn subscribe(&self, listener: ChangeListener) {
		self.listeners.write().push(listener);
	}

	/// Drop the cached blob so the next read hits the adapter
	pub fn invalidate(&self) {
		*self.cache.write() = None;
	}

	fn notify(&self, key: &str, value: Option<&Value>) {
		for listener in self.listeners.read().iter() {
			listener(key, value);
		}
	}
}

impl std::fmt::Debug for SettingsStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsStore")
			.field("record", &self.record)
			.field("listeners", &self.listeners.read().len())
			.finish()
	}
}


// vim: ts=4
