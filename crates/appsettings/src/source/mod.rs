//! Configuration sources and the per-pass application of their entries
//!
//! - **Command line** (`cmdline.rs`): token stack, settings pop their own values
//! - **Settings file** (`file.rs`): `KEY=VALUE` lines
//! - **Store** (`store.rs`): every entry under the application's store key
//!
//! File and store both reduce to a sequence of name/value pairs applied by
//! `apply_pairs`. Within a pass the first setting (in declaration order) that
//! accepts an entry wins; across passes the last writer wins.

pub mod cmdline;
pub mod file;
pub mod store;

use std::fmt;

use crate::prelude::*;
use crate::registry::SettingsRegistry;
use crate::setting::Policy;

/// Origin of configuration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
	CommandLine,
	SettingsFile,
	Store,
}

impl fmt::Display for SettingsSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SettingsSource::CommandLine => f.write_str("command line"),
			SettingsSource::SettingsFile => f.write_str("settings file"),
			SettingsSource::Store => f.write_str("store"),
		}
	}
}

/// How a single pass over one source ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
	/// Every entry was accepted
	Completed,
	/// A `StopIfProvided` setting accepted an entry; the rest was not looked at
	Stopped,
	/// An entry matched no setting; carries the message naming it
	Rejected(String),
}

/// Offer each pair to the settings in declaration order until one accepts it.
///
/// An unknown key does not end the pass: later pairs are still applied and the
/// first unknown key is reported once the pass is over.
pub fn apply_pairs(
	registry: &mut SettingsRegistry,
	pairs: &[(String, String)],
) -> AppResult<PassOutcome> {
	let mut rejected: Option<String> = None;

	for (key, value) in pairs {
		let mut accepted = None;
		for setting in registry.iter_mut() {
			if setting.accept_scalar(key, value)? {
				accepted = Some(setting.policy());
				break;
			}
		}

		match accepted {
			Some(Policy::StopIfProvided) => {
				debug!("Stop-if-provided setting '{}' seen, ending pass", key);
				return Ok(rejected.map_or(PassOutcome::Stopped, PassOutcome::Rejected));
			}
			Some(_) => {}
			None => {
				warn!("Unknown setting: {}", key);
				rejected.get_or_insert_with(|| format!("Unknown setting: {}", key));
			}
		}
	}
	Ok(rejected.map_or(PassOutcome::Completed, PassOutcome::Rejected))
}


// vim: ts=4
