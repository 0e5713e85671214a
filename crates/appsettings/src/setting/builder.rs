//! Fluent builder for settings

use appsettings_types::store_adapter::StoreValueKind;

use super::{Policy, Setting, SettingValue, ValueKind};
use crate::prelude::*;

/// Builder for `Setting`
pub struct SettingBuilder {
	key: String,
	kind: ValueKind,
	hint: Option<String>,
	help: String,
	policy: Policy,
	persist: bool,
	internal: bool,
	default: Option<SettingValue>,
	store_kind: Option<StoreValueKind>,
}

impl SettingBuilder {
	pub fn new(key: impl Into<String>, kind: ValueKind) -> Self {
		Self {
			key: key.into(),
			kind,
			hint: None,
			help: String::new(),
			policy: Policy::Optional,
			persist: false,
			internal: false,
			default: None,
			store_kind: None,
		}
	}

	/// Short hint of the expected value form, shown in usage text (e.g. "n", "file|reg")
	pub fn hint(mut self, hint: impl Into<String>) -> Self {
		self.hint = Some(hint.into());
		self
	}

	pub fn help(mut self, help: impl Into<String>) -> Self {
		self.help = help.into();
		self
	}

	/// Defaults to `Optional`
	pub fn policy(mut self, policy: Policy) -> Self {
		self.policy = policy;
		self
	}

	/// Write the value back on save
	pub fn persist(mut self, persist: bool) -> Self {
		self.persist = persist;
		self
	}

	/// Hide from usage text
	pub fn internal(mut self, internal: bool) -> Self {
		self.internal = internal;
		self
	}

	/// Set the default value. Without one, a setting starts uninitialized.
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Override the native store type (integer for `Int`, string for everything else)
	pub fn store_kind(mut self, store_kind: StoreValueKind) -> Self {
		self.store_kind = Some(store_kind);
		self
	}

	/// Build the Setting
	pub fn build(self) -> AppResult<Setting> {
		if self.key.is_empty() || self.key.chars().any(char::is_whitespace) {
			return Err(Error::ConfigError(format!("Invalid setting key '{}'", self.key)));
		}

		let default = match self.default {
			Some(value) => {
				let type_name = value.type_name();
				Some(value.coerce(self.kind).ok_or_else(|| {
					Error::ConfigError(format!(
						"Default for setting '{}' must be {}, got {}",
						self.key,
						self.kind.type_name(),
						type_name
					))
				})?)
			}
			None => None,
		};

		let store_kind = match (self.store_kind, self.kind) {
			(None, ValueKind::Int) => StoreValueKind::Integer,
			(None, _) => StoreValueKind::String,
			(Some(StoreValueKind::Integer), kind) if kind != ValueKind::Int => {
				return Err(Error::ConfigError(format!(
					"Setting '{}' holds {} values and cannot be stored as integer",
					self.key,
					kind.type_name()
				)));
			}
			(Some(store_kind), _) => store_kind,
		};

		let initialized = default.is_some() && self.policy != Policy::Mandatory;

		Ok(Setting {
			folded_key: self.key.to_lowercase(),
			key: self.key,
			kind: self.kind,
			policy: self.policy,
			hint: self.hint,
			help: self.help,
			persist: self.persist,
			internal: self.internal,
			store_kind,
			initialized,
			value: default.unwrap_or_else(|| self.kind.empty_value()),
		})
	}
}


// vim: ts=4
