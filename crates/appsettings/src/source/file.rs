//! Flat settings file: one `KEY=VALUE` entry per line
//!
//! No escaping, quoting or comments. A line without `=` is a valueless flag and
//! yields the empty value.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::prelude::*;

pub const SETTINGS_FILE_EXTENSION: &str = "settings";

/// Executable stem used when the running binary's name cannot be determined
const UNKNOWN_EXE_NAME: &str = "UNKNOWN";

/// File stem of the running executable, `UNKNOWN` if it cannot be determined
pub fn executable_stem() -> String {
	std::env::current_exe()
		.ok()
		.and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
		.unwrap_or_else(|| UNKNOWN_EXE_NAME.to_string())
}

/// `<current dir>/<executable stem>.settings`
pub fn default_settings_file_path() -> PathBuf {
	let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	dir.join(format!("{}.{}", executable_stem(), SETTINGS_FILE_EXTENSION))
}

/// Split settings-file text into name/value pairs, in line order.
///
/// Lines split on the first `=` only. Blank lines are skipped. A key seen twice
/// (in any casing) is a configuration error.
pub fn parse_settings_text(text: &str) -> AppResult<Vec<(String, String)>> {
	let mut seen = HashSet::new();
	let mut pairs = Vec::new();

	for line in text.lines() {
		if line.trim().is_empty() {
			continue;
		}
		let (key, value) = line.split_once('=').unwrap_or((line, ""));
		if !seen.insert(key.to_lowercase()) {
			return Err(Error::ConfigError(format!(
				"Settings file contains '{}' more than once",
				key
			)));
		}
		pairs.push((key.to_string(), value.to_string()));
	}
	Ok(pairs)
}

/// Read the settings file. A missing file is fatal.
pub fn read_settings_file(path: &Path) -> AppResult<Vec<(String, String)>> {
	if !path.is_file() {
		return Err(Error::NotFound(format!(
			"Settings file {} does not exist in the application working folder",
			path.display()
		)));
	}

	let text = std::fs::read_to_string(path)?;
	let pairs = parse_settings_text(&text)?;
	info!("Read {} entries from settings file {}", pairs.len(), path.display());
	Ok(pairs)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pair(k: &str, v: &str) -> (String, String) {
		(k.to_string(), v.to_string())
	}

	#[test]
	fn test_split_on_first_equals() {
		let pairs = parse_settings_text("a=b=c\nFoo\nFrobazz=\n\nBatchSize=5\r\n")
			.expect("Failed to parse settings text");
		assert_eq!(
			pairs,
			vec![pair("a", "b=c"), pair("Foo", ""), pair("Frobazz", ""), pair("BatchSize", "5")]
		);
	}

	#[test]
	fn test_duplicate_key_is_fatal() {
		let res = parse_settings_text("BatchSize=1\nbatchsize=2\n");
		assert!(matches!(res, Err(Error::ConfigError(msg)) if msg.contains("batchsize")));
	}

	#[test]
	fn test_missing_file_is_fatal() {
		let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
		let path = dir.path().join("nope.settings");
		let res = read_settings_file(&path);
		assert!(matches!(res, Err(Error::NotFound(msg)) if msg.contains("nope.settings")));
	}

	#[test]
	fn test_default_path_has_settings_extension() {
		let path = default_settings_file_path();
		assert_eq!(path.extension().and_then(|e| e.to_str()), Some(SETTINGS_FILE_EXTENSION));
	}
}

// vim: ts=4
