//! Setting value kinds and their literal parsers

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

use crate::prelude::*;

/// Canonical rendering of timestamps; re-parses to the same value.
/// `%.f` prints nothing when the fraction is zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const TIMESTAMP_INPUT_FORMATS: &[&str] =
	&["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Value shape of a setting, fixed at declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	String,
	Int,
	Bool,
	Timestamp,
	/// Comma-separated list; each accepted value replaces the list
	List,
	/// Comma-separated list or `@file`; each accepted value is appended
	IndirectList,
}

impl ValueKind {
	/// Value held by a setting declared without a default
	pub fn empty_value(self) -> SettingValue {
		match self {
			ValueKind::String => SettingValue::String(String::new()),
			ValueKind::Int => SettingValue::Int(0),
			ValueKind::Bool => SettingValue::Bool(false),
			ValueKind::Timestamp => SettingValue::Timestamp(NaiveDateTime::default()),
			ValueKind::List => SettingValue::List(Vec::new()),
			ValueKind::IndirectList => SettingValue::IndirectList(Vec::new()),
		}
	}

	pub fn type_name(self) -> &'static str {
		match self {
			ValueKind::String => "string",
			ValueKind::Int => "int",
			ValueKind::Bool => "bool",
			ValueKind::Timestamp => "timestamp",
			ValueKind::List => "list",
			ValueKind::IndirectList => "indirect list",
		}
	}
}

/// Typed payload of a setting
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
	String(String),
	Int(i64),
	Bool(bool),
	Timestamp(NaiveDateTime),
	List(Vec<String>),
	IndirectList(Vec<String>),
}

impl SettingValue {
	/// Build a list value from anything string-like
	pub fn list<I, S>(items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		SettingValue::List(items.into_iter().map(Into::into).collect())
	}

	pub fn kind(&self) -> ValueKind {
		match self {
			SettingValue::String(_) => ValueKind::String,
			SettingValue::Int(_) => ValueKind::Int,
			SettingValue::Bool(_) => ValueKind::Bool,
			SettingValue::Timestamp(_) => ValueKind::Timestamp,
			SettingValue::List(_) => ValueKind::List,
			SettingValue::IndirectList(_) => ValueKind::IndirectList,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		self.kind().type_name()
	}

	/// Convert to the given kind. The two list kinds convert into each other;
	/// any other mismatch is `None`.
	pub fn coerce(self, kind: ValueKind) -> Option<SettingValue> {
		match (self, kind) {
			(SettingValue::List(items), ValueKind::IndirectList) => {
				Some(SettingValue::IndirectList(items))
			}
			(SettingValue::IndirectList(items), ValueKind::List) => Some(SettingValue::List(items)),
			(value, kind) if value.kind() == kind => Some(value),
			_ => None,
		}
	}

	/// Whether the value is set by presence alone (never consumes a command-line token)
	pub fn is_flag(&self) -> bool {
		matches!(self, SettingValue::Bool(_))
	}

	/// Single-line text form used for display and persistence
	pub fn render(&self) -> String {
		match self {
			SettingValue::String(s) => s.clone(),
			SettingValue::Int(i) => i.to_string(),
			SettingValue::Bool(b) => b.to_string(),
			SettingValue::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
			SettingValue::List(items) | SettingValue::IndirectList(items) => items.join(","),
		}
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

pub(crate) fn parse_int(key: &str, raw: &str) -> AppResult<i64> {
	raw.trim()
		.parse::<i64>()
		.map_err(|_| Error::Parse(format!("{}: '{}' is not a valid integer", key, raw)))
}

pub(crate) fn parse_bool(key: &str, raw: &str) -> AppResult<bool> {
	let raw_trimmed = raw.trim();
	if raw_trimmed.eq_ignore_ascii_case("true") {
		Ok(true)
	} else if raw_trimmed.eq_ignore_ascii_case("false") {
		Ok(false)
	} else {
		Err(Error::Parse(format!("{}: '{}' is not a valid boolean", key, raw)))
	}
}

/// Parse an ISO-8601-like date or date/time literal.
/// A UTC offset, if present, is dropped after the wall-clock time is read.
pub(crate) fn parse_timestamp(key: &str, raw: &str) -> AppResult<NaiveDateTime> {
	let raw_trimmed = raw.trim();

	if let Ok(dt) = DateTime::parse_from_rfc3339(raw_trimmed) {
		return Ok(dt.naive_local());
	}
	for format in TIMESTAMP_INPUT_FORMATS {
		if let Ok(ts) = NaiveDateTime::parse_from_str(raw_trimmed, format) {
			return Ok(ts);
		}
	}
	if let Some(ts) = NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
	{
		return Ok(ts);
	}

	Err(Error::Parse(format!("{}: '{}' is not a valid date/time", key, raw)))
}

/// Split on commas, keeping empty and duplicate items
pub(crate) fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(String::from).collect()
}

/// Read a list file: every line is split on commas and the items are concatenated
pub(crate) fn read_list_file(key: &str, path: &str) -> AppResult<Vec<String>> {
	let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
		std::io::ErrorKind::NotFound => {
			Error::NotFound(format!("{}: list file {} does not exist", key, path))
		}
		_ => Error::Io(err),
	})?;

	let items: Vec<String> = content.lines().flat_map(split_list).collect();
	debug!("Read {} list items for {} from {}", items.len(), key, path);
	Ok(items)
}


// vim: ts=4
