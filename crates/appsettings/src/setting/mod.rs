//! Typed settings
//!
//! A `Setting` is one named, typed, policy-tagged configuration value. Sources offer
//! it raw entries through `accept_scalar` (pre-split key/value pairs) or
//! `accept_from_stream` (the command-line token stack); a setting accepts only
//! entries whose key matches its own, case-insensitively.
//!
//! # Empty value
//!
//! An empty raw value means "key present, no explicit value":
//! - Bool: becomes `true`
//! - Int, Timestamp: current value is kept
//! - String: becomes empty
//! - List: replaced by an empty list
//! - IndirectList: left unchanged
//!
//! A list holding a single empty item renders as the empty string, so it reads
//! back as an empty list. Every other list re-parses to the same items in order.

mod builder;
mod value;

use chrono::NaiveDateTime;
use std::fmt;

use appsettings_types::store_adapter::{StoreValue, StoreValueKind};

use crate::prelude::*;
use crate::source::cmdline::ArgStack;

pub use builder::SettingBuilder;
pub use value::{SettingValue, TIMESTAMP_FORMAT, ValueKind};

/// Declaration-time policy of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
	/// Must be supplied by some source unless a `StopIfProvided` setting was
	Mandatory,
	Optional,
	/// Supplying it ends the pass and short-circuits completion checking.
	/// Typically a meta-flag that redirects where configuration comes from.
	StopIfProvided,
}

impl Policy {
	/// Descriptor shown in usage text; `StopIfProvided` reads as `Optional` there
	pub fn usage_descriptor(self) -> Policy {
		match self {
			Policy::StopIfProvided => Policy::Optional,
			other => other,
		}
	}
}

impl fmt::Display for Policy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Policy::Mandatory => f.write_str("Mandatory"),
			Policy::Optional => f.write_str("Optional"),
			Policy::StopIfProvided => f.write_str("StopIfProvided"),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Setting {
	key: String,
	folded_key: String,
	kind: ValueKind,
	policy: Policy,
	hint: Option<String>,
	help: String,
	persist: bool,
	internal: bool,
	store_kind: StoreValueKind,
	initialized: bool,
	value: SettingValue,
}

impl Setting {
	/// Create a builder for a setting holding values of `kind`
	pub fn builder(key: impl Into<String>, kind: ValueKind) -> SettingBuilder {
		SettingBuilder::new(key, kind)
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn kind(&self) -> ValueKind {
		self.kind
	}

	pub fn policy(&self) -> Policy {
		self.policy
	}

	pub fn hint(&self) -> Option<&str> {
		self.hint.as_deref()
	}

	pub fn help(&self) -> &str {
		&self.help
	}

	pub fn persist(&self) -> bool {
		self.persist
	}

	pub fn is_internal(&self) -> bool {
		self.internal
	}

	/// Native store type used when this setting is saved to the store
	pub fn store_kind(&self) -> StoreValueKind {
		self.store_kind
	}

	/// True once a default was applied at construction or a source supplied the
	/// setting. Never goes back to false.
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	pub fn value(&self) -> &SettingValue {
		&self.value
	}

	/// Case-insensitive key comparison
	pub fn matches(&self, key: &str) -> bool {
		key.to_lowercase() == self.folded_key
	}

	/// Offer a pre-split key/value pair. Returns `Ok(false)` if the key is not ours.
	pub fn accept_scalar(&mut self, key: &str, raw: &str) -> AppResult<bool> {
		if !self.matches(key) {
			return Ok(false);
		}
		self.apply(raw)?;
		self.initialized = true;
		debug!("Setting '{}' accepted value '{}'", self.key, raw);
		Ok(true)
	}

	/// Offer a key with the remaining command-line tokens. Value-consuming kinds pop
	/// their value off `args` and refuse the key if none is left; a bool never consumes.
	/// The stack is untouched when the key is not ours.
	pub fn accept_from_stream(&mut self, key: &str, args: &mut ArgStack) -> AppResult<bool> {
		if !self.matches(key) {
			return Ok(false);
		}
		if self.value.is_flag() {
			return self.accept_scalar(key, "");
		}
		match args.pop() {
			Some(raw) => self.accept_scalar(key, &raw),
			None => Ok(false),
		}
	}

	fn apply(&mut self, raw: &str) -> AppResult<()> {
		let key = &self.key;
		match &mut self.value {
			SettingValue::String(s) => *s = raw.to_string(),
			SettingValue::Int(i) => {
				if !raw.is_empty() {
					*i = value::parse_int(key, raw)?;
				}
			}
			SettingValue::Bool(b) => {
				*b = raw.is_empty() || value::parse_bool(key, raw)?;
			}
			SettingValue::Timestamp(ts) => {
				if !raw.is_empty() {
					*ts = value::parse_timestamp(key, raw)?;
				}
			}
			SettingValue::List(items) => {
				*items = if raw.is_empty() { Vec::new() } else { value::split_list(raw) };
			}
			SettingValue::IndirectList(items) => {
				if let Some(path) = raw.strip_prefix('@') {
					items.extend(value::read_list_file(key, path)?);
				} else if !raw.is_empty() {
					items.extend(value::split_list(raw));
				}
			}
		}
		Ok(())
	}

	/// Replace the value. The kind must match; `initialized` is not changed.
	pub fn set(&mut self, value: SettingValue) -> AppResult<()> {
		let type_name = value.type_name();
		self.value = value.coerce(self.kind).ok_or_else(|| {
			Error::ValidationError(format!(
				"Type mismatch for setting '{}': expected {}, got {}",
				self.key,
				self.kind.type_name(),
				type_name
			))
		})?;
		Ok(())
	}

	/// Text form used by display and persistence
	pub fn render(&self) -> String {
		self.value.render()
	}

	/// Native value written when saving to the store
	pub fn store_value(&self) -> AppResult<StoreValue> {
		match (self.store_kind, &self.value) {
			(StoreValueKind::MultiString, _) => Err(Error::Unsupported(format!(
				"setting '{}' declares store type {}, which cannot be written",
				self.key,
				StoreValueKind::MultiString
			))),
			(StoreValueKind::Integer, SettingValue::Int(i)) => Ok(StoreValue::Integer(*i)),
			_ => Ok(StoreValue::String(self.render())),
		}
	}

	fn ensure_initialized(&self) -> AppResult<()> {
		if self.initialized {
			Ok(())
		} else {
			Err(Error::ValidationError(format!("Setting '{}' is not initialized", self.key)))
		}
	}

	fn type_mismatch(&self, expected: &str) -> Error {
		Error::ValidationError(format!(
			"Setting '{}' is not {}, got {}",
			self.key,
			expected,
			self.value.type_name()
		))
	}

	/// Type-safe getters (fail if the setting is not initialized or has another kind)
	pub fn as_str(&self) -> AppResult<&str> {
		self.ensure_initialized()?;
		match &self.value {
			SettingValue::String(s) => Ok(s),
			_ => Err(self.type_mismatch("a string")),
		}
	}

	pub fn as_int(&self) -> AppResult<i64> {
		self.ensure_initialized()?;
		match self.value {
			SettingValue::Int(i) => Ok(i),
			_ => Err(self.type_mismatch("an integer")),
		}
	}

	pub fn as_bool(&self) -> AppResult<bool> {
		self.ensure_initialized()?;
		match self.value {
			SettingValue::Bool(b) => Ok(b),
			_ => Err(self.type_mismatch("a boolean")),
		}
	}

	pub fn as_timestamp(&self) -> AppResult<NaiveDateTime> {
		self.ensure_initialized()?;
		match self.value {
			SettingValue::Timestamp(ts) => Ok(ts),
			_ => Err(self.type_mismatch("a timestamp")),
		}
	}

	pub fn as_list(&self) -> AppResult<&[String]> {
		self.ensure_initialized()?;
		match &self.value {
			SettingValue::List(items) | SettingValue::IndirectList(items) => Ok(items),
			_ => Err(self.type_mismatch("a list")),
		}
	}
}

impl fmt::Display for Setting {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: {}; {}; Value: {}",
			self.key,
			self.policy,
			if self.initialized { "Initialized" } else { "Uninitialized" },
			self.value
		)
	}
}


// vim: ts=4
