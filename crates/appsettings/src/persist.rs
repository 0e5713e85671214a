//! Write-back of persist-eligible settings
//!
//! Only `persist` decides what is written; `internal` plays no part.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use appsettings_types::store_adapter::{StoreAdapter, StoreKey};

use crate::prelude::*;
use crate::registry::SettingsRegistry;

/// Write `key=value` lines, declaration order. Replaces the file.
/// Returns the number of settings written.
pub fn save_to_file(registry: &SettingsRegistry, path: &Path) -> AppResult<usize> {
	let mut writer = BufWriter::new(File::create(path)?);
	let mut written = 0;

	for setting in registry.iter().filter(|s| s.persist()) {
		writeln!(writer, "{}={}", setting.key(), setting.render())?;
		written += 1;
	}
	writer.flush()?;

	info!("Saved {} settings to {}", written, path.display());
	Ok(written)
}

/// Write every persist-eligible setting as a named entry under `key`.
///
/// The key must already exist. Values are checked before anything is written,
/// so a setting that cannot be stored leaves the store untouched.
pub fn save_to_store(
	registry: &SettingsRegistry,
	adapter: &dyn StoreAdapter,
	key: &StoreKey,
) -> AppResult<usize> {
	if !adapter.key_exists(key)? {
		return Err(Error::NotFound(format!("Store key {} does not exist", key)));
	}

	let values = registry
		.iter()
		.filter(|s| s.persist())
		.map(|s| s.store_value().map(|value| (s.key(), value)))
		.collect::<AppResult<Vec<_>>>()?;

	for (name, value) in &values {
		debug!("Writing store entry {} = {:?}", name, value);
		adapter.write_entry(key, name, value)?;
	}

	info!("Saved {} settings to store key {}", values.len(), key);
	Ok(values.len())
}


// vim: ts=4
