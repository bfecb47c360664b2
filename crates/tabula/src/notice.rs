//! Queued user-visible notices.
//!
//! A scoped save queues a success notice for the next page render; the
//! host platform displays and clears them.

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
	Updated,
	Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
	pub code: Box<str>,
	pub message: Box<str>,
	pub level: NoticeLevel,
}

#[derive(Debug, Default)]
pub struct NoticeQueue {
	queue: Mutex<Vec<Notice>>,
}

impl NoticeQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, code: impl Into<Box<str>>, message: impl Into<Box<str>>, level: NoticeLevel) {
		self.queue.lock().push(Notice { code: code.into(), message: message.into(), level });
	}

	/// Take all queued notices for display
	pub fn drain(&self) -> Vec<Notice> {
		self.queue.lock().drain(..).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.lock().is_empty()
	}
}


// vim: ts=4
