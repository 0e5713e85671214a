//! Saving resolved settings back to the settings file and the store

mod common;

use std::sync::Arc;

use appsettings::store_adapter::{StoreKey, StoreValue, StoreValueKind};
use appsettings::{AppSettings, Error, Setting, SettingValue, SettingsSource, ValueKind};
use tempfile::TempDir;

use common::{MemoryStore, STORE_ROOT, demo_app, init_tracing};

const ARGS: [&str; 8] =
	["-foo", "-frobazz", "wow", "-adatesetting", "2017-12-31", "-duns", "1,2", "-initsettings"];

#[test]
fn test_save_file_writes_persisted_only() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let path = dir.path().join("demo.settings");
	let mut app = demo_app(&path, None);
	assert!(app.parse(SettingsSource::CommandLine, &ARGS).expect("Failed to parse"));

	app.save(SettingsSource::SettingsFile).expect("Failed to save");
	let text = std::fs::read_to_string(&path).expect("Failed to read settings file");
	assert_eq!(text, "BatchSize=100\nFoo=true\nFrobazz=wow\nADateSetting=2017-12-31 00:00:00\n");
}

#[test]
fn test_saved_file_resolves_again() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let path = dir.path().join("demo.settings");

	let mut first = demo_app(&path, None);
	assert!(first.parse(SettingsSource::CommandLine, &ARGS).expect("Failed to parse"));
	first.save(SettingsSource::SettingsFile).expect("Failed to save");

	let mut second = demo_app(&path, None);
	assert!(second.parse_source(SettingsSource::SettingsFile).expect("Failed to parse file"));
	for key in ["BatchSize", "Foo", "Frobazz", "ADateSetting"] {
		assert_eq!(
			second.get(key).map(|s| s.value().clone()),
			first.get(key).map(|s| s.value().clone()),
			"{} differs after reload",
			key
		);
	}
}

#[test]
fn test_save_store_native_kinds() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let store = Arc::new(MemoryStore::new());
	let mut app = demo_app(&dir.path().join("demo.settings"), Some(store.clone()));
	assert!(app.parse(SettingsSource::CommandLine, &ARGS).expect("Failed to parse"));

	app.init_store().expect("Failed to init store");
	app.save(SettingsSource::Store).expect("Failed to save");

	let key = StoreKey::from_root(STORE_ROOT);
	assert_eq!(store.entry_names(&key), vec!["BatchSize", "Foo", "Frobazz", "ADateSetting"]);
	assert_eq!(store.entry(&key, "BatchSize"), Some(StoreValue::Integer(100)));
	assert_eq!(store.entry(&key, "Foo"), Some(StoreValue::String("true".into())));
	assert_eq!(store.entry(&key, "Hidden"), None);
}

#[test]
fn test_save_store_then_parse_store() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let store = Arc::new(MemoryStore::new());

	let mut first = demo_app(&dir.path().join("demo.settings"), Some(store.clone()));
	let args = ["-batchsize", "77", "-foo", "-adatesetting", "2020-02-29"];
	assert!(first.parse(SettingsSource::CommandLine, &args).expect("Failed to parse"));
	first.init_store().expect("Failed to init store");
	first.save(SettingsSource::Store).expect("Failed to save");

	let mut second = demo_app(&dir.path().join("demo.settings"), Some(store));
	assert!(second.parse_source(SettingsSource::Store).expect("Failed to parse store"));
	assert_eq!(second.get_int("BatchSize").ok(), Some(77));
}

#[test]
fn test_save_store_requires_key() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let app = demo_app(&dir.path().join("demo.settings"), Some(Arc::new(MemoryStore::new())));

	let res = app.save(SettingsSource::Store);
	assert!(matches!(res, Err(Error::NotFound(_))));
}

#[test]
fn test_save_multi_string_store_kind_is_fatal() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let store = Arc::new(MemoryStore::new());
	let mut builder = AppSettings::builder();
	builder
		.setting(
			Setting::builder("Tags", ValueKind::List)
				.default(SettingValue::list(["a", "b"]))
				.store_kind(StoreValueKind::MultiString)
				.persist(true)
				.build()
				.expect("Failed to build setting"),
		)
		.settings_file(dir.path().join("tags.settings"))
		.store_root(STORE_ROOT)
		.store_adapter(store.clone());
	let app = builder.build().expect("Failed to build app settings");

	app.init_store().expect("Failed to init store");
	let res = app.save(SettingsSource::Store);
	assert!(matches!(res, Err(Error::Unsupported(_))));
	assert!(store.entry_names(&StoreKey::from_root(STORE_ROOT)).is_empty());

	// the file has no native types; the list is written comma-joined
	app.save(SettingsSource::SettingsFile).expect("Failed to save file");
	let text = std::fs::read_to_string(dir.path().join("tags.settings")).expect("Failed to read");
	assert_eq!(text, "Tags=a,b\n");
}

#[test]
fn test_save_to_command_line_is_config_error() {
	init_tracing();
	let dir = TempDir::new().expect("Failed to create temp dir");
	let app = demo_app(&dir.path().join("demo.settings"), None);

	let res = app.save(SettingsSource::CommandLine);
	assert!(matches!(res, Err(Error::ConfigError(msg)) if msg.contains("command line")));
}

#[test]
fn test_duplicate_declaration_fails_build() {
	let mut builder = AppSettings::builder();
	for key in ["Foo", "foo"] {
		let setting =
			Setting::builder(key, ValueKind::Bool).build().expect("Failed to build setting");
		builder.setting(setting);
	}
	assert!(matches!(builder.build(), Err(Error::ConfigError(_))));
}

// vim: ts=4
