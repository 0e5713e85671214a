//! Application settings resolution engine.
//!
//! Settings are declared once with a kind, a default and a policy, then resolved
//! from one or more sources in sequence: the command line, a flat `KEY=VALUE`
//! settings file, or a hierarchical key-value store reached through a
//! [`StoreAdapter`](appsettings_types::store_adapter::StoreAdapter).
//! Persist-eligible settings can be written back to the file or the store.
//!
//! ```no_run
//! use appsettings::{AppSettings, Policy, Setting, SettingValue, SettingsSource, ValueKind};
//!
//! # fn main() -> appsettings::AppResult<()> {
//! let mut builder = AppSettings::builder();
//! builder.setting(
//! 	Setting::builder("BatchSize", ValueKind::Int)
//! 		.hint("n")
//! 		.default(SettingValue::Int(100))
//! 		.persist(true)
//! 		.build()?,
//! );
//! builder.setting(Setting::builder("Foo", ValueKind::Bool).policy(Policy::Mandatory).build()?);
//! let mut settings = builder.build()?;
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! if !settings.parse(SettingsSource::CommandLine, &args)? {
//! 	eprintln!("{}", settings.parse_error_message().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod persist;
pub mod prelude;
pub mod registry;
pub mod resolve;
pub mod setting;
pub mod source;
pub mod usage;

pub use app::{AppSettings, AppSettingsBuilder, DEFAULT_USAGE_WIDTH};
pub use appsettings_types::error::{AppResult, Error};
pub use appsettings_types::store_adapter;
pub use registry::SettingsRegistry;
pub use setting::{Policy, Setting, SettingBuilder, SettingValue, ValueKind};
pub use source::SettingsSource;

// vim: ts=4
