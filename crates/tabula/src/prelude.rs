pub use crate::error::{Error, TbResult};
pub use crate::types::{SettingsBlob, Value};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
