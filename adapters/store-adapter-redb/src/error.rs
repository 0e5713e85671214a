//! Error types for the redb store adapter

use std::fmt;
use std::path::PathBuf;

use appsettings::error::Error as AsError;

#[derive(Debug)]
pub enum Error {
	/// The database file or its parent directory could not be opened
	Open { path: PathBuf, reason: String },

	/// A redb transaction, table or row operation failed
	Storage { op: &'static str, reason: String },

	/// A stored entry does not decode as entry JSON
	CorruptEntry { entry: String, reason: String },

	/// An entry was written under a key that was never created
	KeyMissing(String),
}

impl Error {
	/// `map_err` adapter for redb failures during `op`
	pub(crate) fn storage<E: fmt::Display>(op: &'static str) -> impl FnOnce(E) -> AsError {
		move |err| Error::Storage { op, reason: err.to_string() }.into()
	}

	pub(crate) fn corrupt(entry: &str) -> impl FnOnce(serde_json::Error) -> AsError + '_ {
		move |err| Error::CorruptEntry { entry: entry.to_string(), reason: err.to_string() }.into()
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Open { path, reason } => {
				write!(f, "Cannot open settings store {}: {}", path.display(), reason)
			}
			Error::Storage { op, reason } => write!(f, "Store {} failed: {}", op, reason),
			Error::CorruptEntry { entry, reason } => {
				write!(f, "Corrupt store entry '{}': {}", entry, reason)
			}
			Error::KeyMissing(key) => write!(f, "Store key {} does not exist", key),
		}
	}
}

impl std::error::Error for Error {}

impl From<Error> for AsError {
	fn from(err: Error) -> Self {
		match err {
			Error::KeyMissing(_) => AsError::NotFound(err.to_string()),
			Error::Open { .. } | Error::Storage { .. } | Error::CorruptEntry { .. } => {
				AsError::DbError(err.to_string())
			}
		}
	}
}


// vim: ts=4
