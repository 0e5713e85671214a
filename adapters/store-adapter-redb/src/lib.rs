//! Redb-based settings store adapter
//!
//! Implements the StoreAdapter trait over a single redb file, modelling a
//! registry-like hierarchy of keys that hold named, typed entries.
//!
//! # Storage Layout
//!
//! - `store_keys` - lower-cased key path -> creation time (unix seconds)
//! - `store_entries` - `{lower-cased key path}\x1f{lower-cased name}` -> entry JSON
//!
//! Key paths and entry names are case-insensitive; the entry JSON keeps the
//! name as it was first written. Entries of a key are listed in name order.

use appsettings::error::AppResult;
use appsettings::store_adapter::{StoreAdapter, StoreEntry, StoreKey, StoreValue};
use redb::{ReadableDatabase, ReadableTable};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod error;
pub use error::Error;

// Storage table definitions
mod tables {
	use redb::TableDefinition;

	/// Existing keys: key_path -> created_at
	pub const TABLE_KEYS: TableDefinition<&str, i64> = TableDefinition::new("store_keys");

	/// Entries: key_path\x1fname -> entry_json
	pub const TABLE_ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("store_entries");
}

use tables::*;

/// Separates the key path from the entry name in entry keys
const NAME_SEPARATOR: char = '\u{1f}';

fn key_path(key: &StoreKey) -> String {
	key.path().to_lowercase()
}

fn entry_prefix(key: &StoreKey) -> String {
	format!("{}{}", key_path(key), NAME_SEPARATOR)
}

fn decode_entry(entry_key: &str, json: &str) -> AppResult<StoreEntry> {
	serde_json::from_str(json).map_err(Error::corrupt(entry_key))
}

/// Settings store adapter using redb for storage
pub struct StoreAdapterRedb {
	db_path: PathBuf,
	db: redb::Database,
}

impl StoreAdapterRedb {
	/// Open (or create) the store database at `db_path`
	pub fn new(db_path: impl Into<PathBuf>) -> AppResult<Self> {
		let db_path = db_path.into();
		let open_failed = |reason: String| Error::Open { path: db_path.clone(), reason };

		if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).map_err(|e| open_failed(e.to_string()))?;
		}
		let db = redb::Database::create(&db_path).map_err(|e| open_failed(e.to_string()))?;

		// Create tables up front so readers never see a missing table
		let tx = db.begin_write().map_err(Error::storage("begin write"))?;
		tx.open_table(TABLE_KEYS).map_err(Error::storage("create keys table"))?;
		tx.open_table(TABLE_ENTRIES).map_err(Error::storage("create entries table"))?;
		tx.commit().map_err(Error::storage("commit table creation"))?;

		info!("Opened settings store {}", db_path.display());
		Ok(Self { db_path, db })
	}

	pub fn db_path(&self) -> &Path {
		&self.db_path
	}
}

impl fmt::Debug for StoreAdapterRedb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StoreAdapterRedb").field("db_path", &self.db_path).finish()
	}
}

impl StoreAdapter for StoreAdapterRedb {
	fn key_exists(&self, key: &StoreKey) -> AppResult<bool> {
		let tx = self.db.begin_read().map_err(Error::storage("begin read"))?;
		let keys_table = tx.open_table(TABLE_KEYS).map_err(Error::storage("open keys table"))?;
		let found = keys_table.get(key_path(key).as_str()).map_err(Error::storage("read key"))?;
		Ok(found.is_some())
	}

	fn create_key(&self, key: &StoreKey) -> AppResult<()> {
		let path = key_path(key);
		let tx = self.db.begin_write().map_err(Error::storage("begin write"))?;

		{
			let mut keys_table =
				tx.open_table(TABLE_KEYS).map_err(Error::storage("open keys table"))?;
			let exists =
				keys_table.get(path.as_str()).map_err(Error::storage("read key"))?.is_some();
			if exists {
				debug!("Store key {} already exists", key);
			} else {
				keys_table
					.insert(path.as_str(), chrono::Utc::now().timestamp())
					.map_err(Error::storage("insert key"))?;
				debug!("Created store key {}", key);
			}
		}

		tx.commit().map_err(Error::storage("commit key creation"))?;
		Ok(())
	}

	fn list_entries(&self, key: &StoreKey) -> AppResult<Option<Vec<StoreEntry>>> {
		let tx = self.db.begin_read().map_err(Error::storage("begin read"))?;

		let keys_table = tx.open_table(TABLE_KEYS).map_err(Error::storage("open keys table"))?;
		if keys_table.get(key_path(key).as_str()).map_err(Error::storage("read key"))?.is_none() {
			return Ok(None);
		}

		let entries_table =
			tx.open_table(TABLE_ENTRIES).map_err(Error::storage("open entries table"))?;

		let prefix = entry_prefix(key);
		let range =
			entries_table.range(prefix.as_str()..).map_err(Error::storage("read entries"))?;

		let mut entries = Vec::new();
		for item in range {
			let (entry_key, value) = item.map_err(Error::storage("iterate entries"))?;
			if !entry_key.value().starts_with(&prefix) {
				break;
			}
			entries.push(decode_entry(entry_key.value(), value.value())?);
		}

		debug!("Listed {} entries under {}", entries.len(), key);
		Ok(Some(entries))
	}

	fn write_entry(&self, key: &StoreKey, name: &str, value: &StoreValue) -> AppResult<()> {
		let tx = self.db.begin_write().map_err(Error::storage("begin write"))?;

		{
			let keys_table =
				tx.open_table(TABLE_KEYS).map_err(Error::storage("open keys table"))?;
			let found = keys_table.get(key_path(key).as_str()).map_err(Error::storage("read key"))?;
			if found.is_none() {
				return Err(Error::KeyMissing(key.to_string()).into());
			}
		}

		{
			let mut entries_table =
				tx.open_table(TABLE_ENTRIES).map_err(Error::storage("open entries table"))?;
			let entry_key = format!("{}{}", entry_prefix(key), name.to_lowercase());

			// keep the casing the entry was first written with
			let stored_name =
				match entries_table.get(entry_key.as_str()).map_err(Error::storage("read entry"))? {
					Some(existing) => decode_entry(&entry_key, existing.value())?.name,
					None => name.to_string(),
				};

			let entry = StoreEntry::new(stored_name, value.clone());
			let entry_json = serde_json::to_string(&entry).map_err(Error::corrupt(&entry_key))?;
			entries_table
				.insert(entry_key.as_str(), entry_json.as_str())
				.map_err(Error::storage("insert entry"))?;
		}

		tx.commit().map_err(Error::storage("commit entry"))?;
		debug!("Wrote store entry {} under {}", name, key);
		Ok(())
	}
}

// vim: ts=4
