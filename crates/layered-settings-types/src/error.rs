//! Error type shared by the resolver and the storage adapters

pub type LsResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// A specific object addressed by id does not exist.
	///
	/// Resolution never returns this; an unresolved setting is `Ok(None)`.
	NotFound,
	/// Storage failure. The underlying driver error is logged by the adapter.
	DbError,
	/// The layer hierarchy or the service configuration is invalid
	/// (no root, several roots, a fallback cycle, a dangling fallback, ...).
	ConfigError(String),
	/// An administrative write was rejected.
	ValidationError(String),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}


// vim: ts=4
