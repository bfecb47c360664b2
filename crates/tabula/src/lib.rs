//! Tabula: a reusable settings-panel layer for plugin ecosystems.
//!
//! A plugin declares its admin settings as a schema of tabs, sections,
//! and field descriptors; tabula resolves the active view, sanitizes
//! submitted values through a per-type capability registry, merges them
//! over the stored blob, and persists the result through a pluggable
//! named key/value adapter.
//!
//! # Architecture
//!
//! - **Schema** (`schema.rs`): mutable builder frozen into a normalized
//!   tab → section → fields tree
//! - **Registry** (`registry.rs`): field type → sanitize/render bindings
//!   with guaranteed fallbacks
//! - **Store** (`store.rs`): whole-blob read-modify-write over an
//!   `OptionAdapter`
//! - **Pipeline** (`sanitize.rs`): scope resolution, per-type sanitize,
//!   merge against the stored baseline
//! - **Router** (`router.rs`): pure active tab/section resolution
//! - **Panel** (`panel.rs`): per-plugin facade tying the above together

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod notice;
pub mod option_adapter;
pub mod panel;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod sanitize;
pub mod schema;
pub mod store;
pub mod submission;
pub mod types;

// Re-export commonly used types
pub use error::{Error, TbResult};
pub use field::{FieldDescriptor, FieldDescriptorBuilder, FieldType};
pub use notice::{Notice, NoticeLevel, NoticeQueue};
pub use option_adapter::{MemoryOptionAdapter, OptionAdapter};
pub use panel::{SettingsPanel, SettingsPanelBuilder};
pub use registry::FieldTypeRegistry;
pub use router::{resolve_view, ActiveView};
pub use sanitize::sanitize_settings;
pub use schema::{Schema, SchemaBuilder, Section, Tab, MAIN_SECTION};
pub use store::SettingsStore;
pub use submission::{SaveScope, Submission};
pub use types::{SettingsBlob, Value};

// vim: ts=4
