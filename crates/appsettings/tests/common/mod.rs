//! Shared helpers for integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use appsettings::store_adapter::{StoreAdapter, StoreEntry, StoreKey, StoreValue};
use appsettings::{AppResult, AppSettings, Error, Policy, Setting, SettingValue, ValueKind};

pub const STORE_ROOT: &str = "SCSInc\\SAMApi\\v1";

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// In-memory store: key path (lower-cased) -> entries in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
	keys: Mutex<BTreeMap<String, Vec<StoreEntry>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a key holding the given entries
	pub fn with_entries(key: &StoreKey, entries: Vec<StoreEntry>) -> Self {
		let store = Self::new();
		if let Ok(mut keys) = store.keys.lock() {
			keys.insert(key.path().to_lowercase(), entries);
		}
		store
	}

	pub fn entry(&self, key: &StoreKey, name: &str) -> Option<StoreValue> {
		let keys = self.keys.lock().ok()?;
		keys.get(&key.path().to_lowercase())?
			.iter()
			.find(|e| e.name.eq_ignore_ascii_case(name))
			.map(|e| e.value.clone())
	}

	pub fn entry_names(&self, key: &StoreKey) -> Vec<String> {
		self.keys
			.lock()
			.ok()
			.and_then(|keys| keys.get(&key.path().to_lowercase()).cloned())
			.map(|entries| entries.into_iter().map(|e| e.name).collect())
			.unwrap_or_default()
	}
}

fn poisoned() -> Error {
	Error::DbError("memory store lock poisoned".into())
}

impl StoreAdapter for MemoryStore {
	fn key_exists(&self, key: &StoreKey) -> AppResult<bool> {
		Ok(self.keys.lock().map_err(|_| poisoned())?.contains_key(&key.path().to_lowercase()))
	}

	fn create_key(&self, key: &StoreKey) -> AppResult<()> {
		self.keys.lock().map_err(|_| poisoned())?.entry(key.path().to_lowercase()).or_default();
		Ok(())
	}

	fn list_entries(&self, key: &StoreKey) -> AppResult<Option<Vec<StoreEntry>>> {
		Ok(self.keys.lock().map_err(|_| poisoned())?.get(&key.path().to_lowercase()).cloned())
	}

	fn write_entry(&self, key: &StoreKey, name: &str, value: &StoreValue) -> AppResult<()> {
		let mut keys = self.keys.lock().map_err(|_| poisoned())?;
		let entries = keys
			.get_mut(&key.path().to_lowercase())
			.ok_or_else(|| Error::NotFound(format!("Store key {} does not exist", key)))?;
		match entries.iter_mut().find(|e| e.name.eq_ignore_ascii_case(name)) {
			Some(entry) => entry.value = value.clone(),
			None => entries.push(StoreEntry::new(name, value.clone())),
		}
		Ok(())
	}
}

/// The demo catalogue: a meta-flag selecting the source, a mandatory flag and
/// date, a few optional values and one internal setting.
pub fn demo_settings() -> Vec<Setting> {
	let build =
		|builder: appsettings::SettingBuilder| builder.build().expect("Failed to build setting");
	vec![
		build(
			Setting::builder("Settings", ValueKind::String)
				.hint("file|reg")
				.policy(Policy::StopIfProvided)
				.help("Read settings from the settings file or the store"),
		),
		build(Setting::builder("DUNS", ValueKind::IndirectList).hint("list|@list")),
		build(
			Setting::builder("BatchSize", ValueKind::Int)
				.hint("n")
				.default(SettingValue::Int(100))
				.persist(true),
		),
		build(Setting::builder("InitSettings", ValueKind::Bool).default(SettingValue::Bool(false))),
		build(
			Setting::builder("Foo", ValueKind::Bool)
				.policy(Policy::Mandatory)
				.default(SettingValue::Bool(false))
				.persist(true),
		),
		build(
			Setting::builder("Frobazz", ValueKind::String)
				.hint("xyz")
				.default(SettingValue::String(String::new()))
				.persist(true),
		),
		build(
			Setting::builder("ADateSetting", ValueKind::Timestamp)
				.hint("d")
				.policy(Policy::Mandatory)
				.persist(true),
		),
		build(
			Setting::builder("Hidden", ValueKind::Bool)
				.default(SettingValue::Bool(false))
				.internal(true),
		),
	]
}

/// Demo settings wired to `settings_file` and, if given, a store
pub fn demo_app(settings_file: &Path, store: Option<Arc<dyn StoreAdapter>>) -> AppSettings {
	let mut builder = AppSettings::builder();
	builder
		.program("demo")
		.version("1.0.0")
		.synopsis("Demonstrates settings resolution.")
		.settings(demo_settings())
		.settings_file(settings_file)
		.store_root(STORE_ROOT);
	if let Some(store) = store {
		builder.store_adapter(store);
	}
	builder.build().expect("Failed to build app settings")
}

// vim: ts=4
