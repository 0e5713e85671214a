//! Key-value store source: every entry under the application's store key

use appsettings_types::store_adapter::{StoreAdapter, StoreKey};

use crate::prelude::*;

/// Read all entries under `key` as name/value pairs, in adapter order.
///
/// A missing key is fatal, as is a multi-string entry. Entries with an empty
/// name carry no setting and are skipped.
pub fn read_store_pairs(
	adapter: &dyn StoreAdapter,
	key: &StoreKey,
) -> AppResult<Vec<(String, String)>> {
	let entries = adapter
		.list_entries(key)?
		.ok_or_else(|| Error::NotFound(format!("Store key {} does not exist", key)))?;

	let mut pairs = Vec::with_capacity(entries.len());
	for entry in entries {
		if entry.name.is_empty() {
			debug!("Skipping unnamed entry under {}", key);
			continue;
		}
		let raw = match entry.value.to_scalar() {
			Ok(raw) => raw,
			Err(err) => {
				error!("Store entry '{}' under {}: {}", entry.name, key, err);
				return Err(err);
			}
		};
		pairs.push((entry.name, raw));
	}

	info!("Read {} entries from store key {}", pairs.len(), key);
	Ok(pairs)
}

// vim: ts=4
