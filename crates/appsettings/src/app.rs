//! Application settings facade
//!
//! `AppSettings` owns the registry and the wiring to the file and store sources.
//! Each `parse` call runs one pass against one source and then applies the
//! completion rule. Soft failures return `Ok(false)` and leave a message in the
//! error slot; fatal ones return `Err`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;

use appsettings_types::store_adapter::{StoreAdapter, StoreKey};

use crate::prelude::*;
use crate::registry::SettingsRegistry;
use crate::resolve::conclude_pass;
use crate::setting::Setting;
use crate::source::{self, SettingsSource};
use crate::usage::{self, UsageEntry};

/// Terminal width used when the caller does not give one
pub const DEFAULT_USAGE_WIDTH: usize = 80;

pub struct AppSettingsBuilder {
	settings: Vec<Setting>,
	program: Option<String>,
	version: Option<String>,
	synopsis: String,
	store_root: Option<String>,
	store: Option<Arc<dyn StoreAdapter>>,
	settings_file: Option<PathBuf>,
}

impl AppSettingsBuilder {
	pub fn new() -> Self {
		AppSettingsBuilder {
			settings: Vec::new(),
			program: None,
			version: None,
			synopsis: String::new(),
			store_root: None,
			store: None,
			settings_file: None,
		}
	}

	/// Declare a setting. Declaration order is resolution and display order.
	pub fn setting(&mut self, setting: Setting) -> &mut Self {
		self.settings.push(setting);
		self
	}

	pub fn settings(&mut self, settings: impl IntoIterator<Item = Setting>) -> &mut Self {
		self.settings.extend(settings);
		self
	}

	/// Program name shown in usage text (defaults to the executable stem)
	pub fn program(&mut self, program: impl Into<String>) -> &mut Self {
		self.program = Some(program.into());
		self
	}

	pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
		self.version = Some(version.into());
		self
	}

	/// Free text describing the program, shown at the top of the usage text
	pub fn synopsis(&mut self, synopsis: impl Into<String>) -> &mut Self {
		self.synopsis = synopsis.into();
		self
	}

	/// Application root of the store key, e.g. `"MyCompany\\MyProduct\\v1"`
	pub fn store_root(&mut self, root: impl Into<String>) -> &mut Self {
		self.store_root = Some(root.into());
		self
	}

	pub fn store_adapter(&mut self, store: Arc<dyn StoreAdapter>) -> &mut Self {
		self.store = Some(store);
		self
	}

	/// Override the settings-file location
	pub fn settings_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
		self.settings_file = Some(path.into());
		self
	}

	pub fn build(self) -> AppResult<AppSettings> {
		let registry = SettingsRegistry::from_settings(self.settings)?;
		let settings_file =
			self.settings_file.unwrap_or_else(source::file::default_settings_file_path);
		let program = self.program.unwrap_or_else(source::file::executable_stem);
		let store_key = self.store_root.as_deref().map(StoreKey::from_root);

		info!("Declared {} settings", registry.len());
		debug!("Settings file: {}", settings_file.display());
		if let Some(key) = &store_key {
			debug!("Store key: {}", key);
		}

		Ok(AppSettings {
			registry,
			program,
			version: self.version,
			synopsis: self.synopsis,
			store_key,
			store: self.store,
			settings_file,
			parse_error: None,
		})
	}
}

impl Default for AppSettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

pub struct AppSettings {
	registry: SettingsRegistry,
	program: String,
	version: Option<String>,
	synopsis: String,
	store_key: Option<StoreKey>,
	store: Option<Arc<dyn StoreAdapter>>,
	settings_file: PathBuf,
	/// Message of the most recent soft failure
	parse_error: Option<String>,
}

impl AppSettings {
	pub fn builder() -> AppSettingsBuilder {
		AppSettingsBuilder::new()
	}

	pub fn registry(&self) -> &SettingsRegistry {
		&self.registry
	}

	pub fn settings_file(&self) -> &Path {
		&self.settings_file
	}

	pub fn store_key(&self) -> Option<&StoreKey> {
		self.store_key.as_ref()
	}

	/// Run one pass against `source`, then check completion.
	///
	/// `args` is only read for the command line. Returns `Ok(false)` on a soft
	/// failure (unknown key, mandatory setting missing); the reason is then
	/// available from `parse_error_message`.
	pub fn parse<S: AsRef<str>>(&mut self, from: SettingsSource, args: &[S]) -> AppResult<bool> {
		info!("Parsing settings from {}", from);
		let outcome = match from {
			SettingsSource::CommandLine => source::cmdline::parse_command_line(
				&mut self.registry,
				args.iter().map(|arg| arg.as_ref()),
			)?,
			SettingsSource::SettingsFile => {
				let pairs = source::file::read_settings_file(&self.settings_file)?;
				source::apply_pairs(&mut self.registry, &pairs)?
			}
			SettingsSource::Store => {
				let (store, key) = self.store_target()?;
				let pairs = source::store::read_store_pairs(store.as_ref(), key)?;
				source::apply_pairs(&mut self.registry, &pairs)?
			}
		};

		match conclude_pass(&self.registry, outcome) {
			Ok(()) => Ok(true),
			Err(message) => {
				warn!("Parsing {} failed: {}", from, message);
				self.parse_error = Some(message);
				Ok(false)
			}
		}
	}

	/// Parse a source that takes no arguments (file or store)
	pub fn parse_source(&mut self, from: SettingsSource) -> AppResult<bool> {
		self.parse::<&str>(from, &[])
	}

	/// Message left by the most recent failed `parse`
	pub fn parse_error_message(&self) -> Option<&str> {
		self.parse_error.as_deref()
	}

	/// Write persist-eligible settings back to the file or the store
	pub fn save(&self, target: SettingsSource) -> AppResult<()> {
		match target {
			SettingsSource::CommandLine => Err(Error::ConfigError(format!(
				"Unsupported operation: cannot save settings to the {}",
				target
			))),
			SettingsSource::SettingsFile => {
				crate::persist::save_to_file(&self.registry, &self.settings_file)?;
				Ok(())
			}
			SettingsSource::Store => {
				let (store, key) = self.store_target()?;
				crate::persist::save_to_store(&self.registry, store.as_ref(), key)?;
				Ok(())
			}
		}
	}

	/// Create the store key if it is missing, so `save(Store)` can succeed
	pub fn init_store(&self) -> AppResult<()> {
		let (store, key) = self.store_target()?;
		if !store.key_exists(key)? {
			info!("Creating store key {}", key);
			store.create_key(key)?;
		}
		Ok(())
	}

	fn store_target(&self) -> AppResult<(&Arc<dyn StoreAdapter>, &StoreKey)> {
		match (&self.store, &self.store_key) {
			(Some(store), Some(key)) => Ok((store, key)),
			(None, _) => Err(Error::ConfigError("No store adapter configured".into())),
			(_, None) => Err(Error::ConfigError("No store root key configured".into())),
		}
	}

	/// One line per setting, declaration order
	pub fn display_lines(&self) -> Vec<String> {
		self.registry.iter().map(ToString::to_string).collect()
	}

	pub fn usage_entries(&self) -> Vec<UsageEntry> {
		usage::usage_entries(&self.registry)
	}

	pub fn usage(&self, width: usize) -> String {
		usage::render_usage(
			&self.program,
			self.version.as_deref(),
			&self.synopsis,
			&self.usage_entries(),
			width,
		)
	}

	pub fn get(&self, key: &str) -> Option<&Setting> {
		self.registry.get(key)
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut Setting> {
		self.registry.get_mut(key)
	}

	fn require(&self, key: &str) -> AppResult<&Setting> {
		self.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))
	}

	pub fn get_str(&self, key: &str) -> AppResult<&str> {
		self.require(key)?.as_str()
	}

	pub fn get_int(&self, key: &str) -> AppResult<i64> {
		self.require(key)?.as_int()
	}

	pub fn get_bool(&self, key: &str) -> AppResult<bool> {
		self.require(key)?.as_bool()
	}

	pub fn get_timestamp(&self, key: &str) -> AppResult<NaiveDateTime> {
		self.require(key)?.as_timestamp()
	}

	pub fn get_list(&self, key: &str) -> AppResult<&[String]> {
		self.require(key)?.as_list()
	}
}

impl std::fmt::Debug for AppSettings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppSettings")
			.field("program", &self.program)
			.field("settings", &self.registry.len())
			.field("settings_file", &self.settings_file)
			.field("store_key", &self.store_key)
			.finish()
	}
}

// vim: ts=4
