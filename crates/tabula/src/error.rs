//! Error types shared by the settings layer and its adapters.

pub type TbResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	DbError,
	ConfigError(Box<str>),
	ValidationError(Box<str>),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

// vim: ts=4
