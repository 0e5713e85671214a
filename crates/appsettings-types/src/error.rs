//! Error types shared by the resolution engine and its adapters
//!
//! Only the fatal class of failures travels through `Error`. An unknown key or an
//! unsatisfied mandatory setting is a soft failure and is reported by the parse
//! entry point as `Ok(false)` plus a message, never as an `Err`.

use std::fmt;

pub type AppResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Programming error in how settings were declared or used
	/// (duplicate key, invalid builder input, saving to the command line)
	ConfigError(String),

	/// Malformed scalar literal for a typed setting
	Parse(String),

	/// Settings file or store key absent when required to exist
	NotFound(String),

	/// Native store value type the engine does not model
	Unsupported(String),

	/// Typed accessor misuse (uninitialized value, wrong value kind)
	ValidationError(String),

	/// Store adapter failure
	DbError(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Parse(msg) => write!(f, "parse error: {}", msg),
			Error::NotFound(msg) => write!(f, "fatal error: {}", msg),
			Error::Unsupported(msg) => write!(f, "unsupported: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::DbError(msg) => write!(f, "store error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}


// vim: ts=4
