//! Usage text
//!
//! Layout:
//! ```text
//! PROGRAM
//! =======
//! Version 1.0.0
//!
//! <synopsis, wrapped>
//!
//! Usage:
//!
//! program [-key hint] [-flag] ...
//!
//! -key hint  Mandatory. Help text, wrapped and
//!            aligned under the first line.
//! ```
//! Internal settings are left out.

use std::fmt::Write;

use crate::registry::SettingsRegistry;
use crate::setting::{Policy, Setting};
use crate::source::cmdline::ARG_MARKER;

/// Help column never gets narrower than this, however long the arguments are
const MIN_HELP_WIDTH: usize = 20;
/// Gap between the argument column and the help column
const COLUMN_GAP: usize = 2;

/// What usage text shows for one setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
	/// `-<lower-cased key>` followed by the hint, if any
	pub arg: String,
	/// `StopIfProvided` reads as `Optional`
	pub descriptor: Policy,
	pub help: String,
}

impl UsageEntry {
	pub fn from_setting(setting: &Setting) -> Self {
		let mut arg = format!("{}{}", ARG_MARKER, setting.key().to_lowercase());
		if let Some(hint) = setting.hint() {
			arg.push(' ');
			arg.push_str(hint);
		}
		Self {
			arg,
			descriptor: setting.policy().usage_descriptor(),
			help: setting.help().to_string(),
		}
	}
}

/// One entry per non-internal setting, declaration order
pub fn usage_entries(registry: &SettingsRegistry) -> Vec<UsageEntry> {
	registry.iter().filter(|s| !s.is_internal()).map(UsageEntry::from_setting).collect()
}

/// Break `text` into lines of at most `width` characters.
///
/// Lines break at whitespace; a word longer than `width` is chopped.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
	let width = width.max(1);
	let mut lines = Vec::new();
	let mut line = String::new();
	let mut line_len = 0;

	for word in text.split_whitespace() {
		let mut word: Vec<char> = word.chars().collect();

		if line_len > 0 && line_len + 1 + word.len() > width {
			lines.push(std::mem::take(&mut line));
			line_len = 0;
		}
		while word.len() > width {
			if line_len > 0 {
				lines.push(std::mem::take(&mut line));
				line_len = 0;
			}
			let rest = word.split_off(width);
			lines.push(word.into_iter().collect());
			word = rest;
		}
		if word.is_empty() {
			continue;
		}
		if line_len > 0 {
			line.push(' ');
			line_len += 1;
		}
		line_len += word.len();
		line.extend(word);
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

/// Render the full usage text for a `width`-column terminal
pub fn render_usage(
	program: &str,
	version: Option<&str>,
	synopsis: &str,
	entries: &[UsageEntry],
	width: usize,
) -> String {
	let mut out = String::new();

	let _ = writeln!(out, "{}", program.to_uppercase());
	let _ = writeln!(out, "{}", "=".repeat(program.chars().count()));
	if let Some(version) = version.filter(|v| !v.is_empty()) {
		let _ = writeln!(out, "Version {}", version);
	}

	if !synopsis.trim().is_empty() {
		out.push('\n');
		for line in wrap_text(synopsis, width.saturating_sub(1)) {
			let _ = writeln!(out, "{}", line);
		}
	}

	let mut command_line = program.to_string();
	for entry in entries {
		let _ = write!(command_line, " [{}]", entry.arg);
	}
	let _ = write!(out, "\nUsage:\n\n{}\n\n", command_line);

	let arg_width = entries.iter().map(|e| e.arg.chars().count()).max().unwrap_or(0) + COLUMN_GAP;
	let help_width = width.saturating_sub(arg_width + 1).max(MIN_HELP_WIDTH);
	for entry in entries {
		let help = if entry.help.is_empty() {
			format!("{}.", entry.descriptor)
		} else {
			format!("{}. {}", entry.descriptor, entry.help)
		};
		for (i, line) in wrap_text(&help, help_width).iter().enumerate() {
			let lead = if i == 0 { entry.arg.as_str() } else { "" };
			let _ = writeln!(out, "{:<arg_width$}{}", lead, line);
		}
	}
	out
}


// vim: ts=4
