//! Adapter trait for hierarchical key-value configuration stores
//!
//! A store is addressed by a key path (analogous to a registry key) and holds named
//! entries, each carrying a native value type. The resolution engine reads every
//! entry under its key and writes named scalar entries back. Multi-valued native
//! types exist in the model so adapters can report them faithfully, but the engine
//! refuses to read or write them.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::prelude::*;

/// Prefix every store key path is rooted under
pub const STORE_KEY_ROOT: &str = "SOFTWARE";

/// Hierarchical key path under which an application's settings live
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(Box<str>);

impl StoreKey {
	/// Derive the settings key from an application-supplied root, e.g.
	/// `"MyCompany\\MyProduct\\v1"` becomes `SOFTWARE\MyCompany\MyProduct\v1`.
	/// One leading backslash on the root is ignored.
	pub fn from_root(root: &str) -> Self {
		let root = root.strip_prefix('\\').unwrap_or(root);
		Self(format!("{}\\{}", STORE_KEY_ROOT, root).into())
	}

	/// Full key path
	pub fn path(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for StoreKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Native value type of a store entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreValueKind {
	#[serde(rename = "string")]
	String,
	#[serde(rename = "integer")]
	Integer,
	/// Composite list type; never read or written by the engine
	#[serde(rename = "multi_string")]
	MultiString,
}

impl fmt::Display for StoreValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StoreValueKind::String => f.write_str("string"),
			StoreValueKind::Integer => f.write_str("integer"),
			StoreValueKind::MultiString => f.write_str("multi-string"),
		}
	}
}

/// Native value held by a store entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreValue {
	String(String),
	Integer(i64),
	MultiString(Vec<String>),
}

impl StoreValue {
	pub fn kind(&self) -> StoreValueKind {
		match self {
			StoreValue::String(_) => StoreValueKind::String,
			StoreValue::Integer(_) => StoreValueKind::Integer,
			StoreValue::MultiString(_) => StoreValueKind::MultiString,
		}
	}

	/// Scalar text form of the value. Fails for multi-valued types.
	pub fn to_scalar(&self) -> AppResult<String> {
		match self {
			StoreValue::String(s) => Ok(s.clone()),
			StoreValue::Integer(i) => Ok(i.to_string()),
			StoreValue::MultiString(_) => Err(Error::Unsupported(format!(
				"store value type {} cannot be used as a setting value",
				StoreValueKind::MultiString
			))),
		}
	}
}

/// One named entry under a store key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
	pub name: String,
	pub value: StoreValue,
}

impl StoreEntry {
	pub fn new(name: impl Into<String>, value: StoreValue) -> Self {
		Self { name: name.into(), value }
	}
}

/// Backing key-value store
///
/// All methods are synchronous; a handle is acquired and released inside each call.
pub trait StoreAdapter: Debug + Send + Sync {
	/// Whether `key` exists in the store
	fn key_exists(&self, key: &StoreKey) -> AppResult<bool>;

	/// Create `key` if it does not exist yet
	fn create_key(&self, key: &StoreKey) -> AppResult<()>;

	/// Enumerate every entry under `key` with its native type.
	/// Returns `None` if the key does not exist.
	fn list_entries(&self, key: &StoreKey) -> AppResult<Option<Vec<StoreEntry>>>;

	/// Write (create or replace) a named entry under an existing `key`
	fn write_entry(&self, key: &StoreKey, name: &str, value: &StoreValue) -> AppResult<()>;
}


// vim: ts=4
