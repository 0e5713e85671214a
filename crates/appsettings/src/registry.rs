//! Ordered, case-insensitive collection of declared settings
//!
//! Iteration order is declaration order. Resolution, completion checks,
//! persistence and usage text all rely on that.

use std::collections::HashMap;

use crate::prelude::*;
use crate::setting::Setting;

#[derive(Debug, Default)]
pub struct SettingsRegistry {
	settings: Vec<Setting>,
	/// Lower-cased key -> position in `settings`
	index: HashMap<String, usize>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register settings in the given order
	pub fn from_settings(settings: impl IntoIterator<Item = Setting>) -> AppResult<Self> {
		let mut registry = Self::new();
		for setting in settings {
			registry.register(setting)?;
		}
		Ok(registry)
	}

	/// Register a new setting. A key already present (in any casing) is an error.
	pub fn register(&mut self, setting: Setting) -> AppResult<()> {
		let folded = setting.key().to_lowercase();
		if self.index.contains_key(&folded) {
			return Err(Error::ConfigError(format!(
				"Setting '{}' is already registered",
				setting.key()
			)));
		}

		debug!("Registering setting: {}", setting.key());
		self.index.insert(folded, self.settings.len());
		self.settings.push(setting);
		Ok(())
	}

	/// Get a setting by key, case-insensitively
	pub fn get(&self, key: &str) -> Option<&Setting> {
		self.index.get(&key.to_lowercase()).and_then(|&idx| self.settings.get(idx))
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut Setting> {
		self.index.get(&key.to_lowercase()).and_then(|&idx| self.settings.get_mut(idx))
	}

	/// Settings in declaration order
	pub fn iter(&self) -> impl Iterator<Item = &Setting> {
		self.settings.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Setting> {
		self.settings.iter_mut()
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.settings.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.settings.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::setting::{SettingValue, ValueKind};

	fn bool_setting(key: &str) -> Setting {
		Setting::builder(key, ValueKind::Bool)
			.default(SettingValue::Bool(false))
			.build()
			.expect("Failed to build setting")
	}

	#[test]
	fn test_declaration_order_preserved() {
		let registry = SettingsRegistry::from_settings(
			["Zeta", "Alpha", "Mid"].into_iter().map(bool_setting),
		)
		.expect("Failed to build registry");

		let keys: Vec<&str> = registry.iter().map(Setting::key).collect();
		assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
		assert_eq!(registry.len(), 3);
	}

	#[test]
	fn test_lookup_is_case_insensitive() {
		let registry =
			SettingsRegistry::from_settings([bool_setting("InitSettings")]).expect("registry");
		assert!(registry.get("initsettings").is_some());
		assert!(registry.get("INITSETTINGS").is_some());
		assert!(registry.get("init").is_none());
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let mut registry = SettingsRegistry::new();
		assert!(registry.register(bool_setting("Foo")).is_ok());
		let res = registry.register(bool_setting("FOO"));
		assert!(matches!(res, Err(Error::ConfigError(msg)) if msg.contains("already registered")));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_get_mut_changes_value() {
		let mut registry =
			SettingsRegistry::from_settings([bool_setting("Hidden")]).expect("registry");
		if let Some(setting) = registry.get_mut("hidden") {
			assert!(setting.set(SettingValue::Bool(true)).is_ok());
		}
		assert_eq!(registry.get("Hidden").and_then(|s| s.as_bool().ok()), Some(true));
	}
}

// vim: ts=4
