//! Demo driver: resolves a small settings catalogue from the command line and,
//! when `-settings file|reg` is given, from the settings file or the store.

use std::{env, io, path, process::ExitCode, sync::Arc};

use appsettings::prelude::*;
use appsettings::{
	AppSettings, AppSettingsBuilder, DEFAULT_USAGE_WIDTH, Policy, Setting, SettingValue,
	SettingsSource, ValueKind,
};
use appsettings_store_adapter_redb::StoreAdapterRedb;

const STORE_ROOT: &str = "SCSInc\\SAMApi\\v1";

const SYNOPSIS: &str = "Resolves its settings from the command line, a settings file next to \
	the working directory, or the settings store. Pass -settings file or -settings reg to read \
	everything after the command line from the file or the store; later sources override \
	earlier ones.";

pub struct Config {
	pub store_path: path::PathBuf,
}

impl Config {
	fn from_env() -> Self {
		Config {
			store_path: env::var("APPSETTINGS_STORE")
				.map_or_else(|_| path::PathBuf::from("./data/settings.redb"), path::PathBuf::from),
		}
	}
}

fn register_settings(builder: &mut AppSettingsBuilder) -> AppResult<()> {
	builder
		.setting(
			Setting::builder("Settings", ValueKind::String)
				.hint("file|reg")
				.policy(Policy::StopIfProvided)
				.help(
					"Read configuration from the settings file ('file') or the store ('reg') \
					instead of the command line. Arguments after it are ignored.",
				)
				.build()?,
		)
		.setting(
			Setting::builder("DUNS", ValueKind::IndirectList)
				.hint("list|@list")
				.help(
					"Comma-separated DUNS numbers, or @file naming a file with comma-separated \
					numbers on any number of lines. Repeated values are appended.",
				)
				.build()?,
		)
		.setting(
			Setting::builder("BatchSize", ValueKind::Int)
				.hint("n")
				.default(SettingValue::Int(100))
				.persist(true)
				.help("Maximum number of API calls per run. Defaults to 100.")
				.build()?,
		)
		.setting(
			Setting::builder("InitSettings", ValueKind::Bool)
				.default(SettingValue::Bool(false))
				.help("Write persistent settings to the store and exit.")
				.build()?,
		)
		.setting(
			Setting::builder("Foo", ValueKind::Bool)
				.policy(Policy::Mandatory)
				.default(SettingValue::Bool(false))
				.persist(true)
				.help("A flag that must be given by some source.")
				.build()?,
		)
		.setting(
			Setting::builder("Frobazz", ValueKind::String)
				.hint("xyz")
				.default(SettingValue::String(String::new()))
				.persist(true)
				.help("Free-form text.")
				.build()?,
		)
		.setting(
			Setting::builder("ADateSetting", ValueKind::Timestamp)
				.hint("d")
				.policy(Policy::Mandatory)
				.default(SettingValue::Timestamp(chrono::Local::now().naive_local()))
				.persist(true)
				.help("A date, optionally with a time: 2017-12-31 or 2017-12-31T08:30:00.")
				.build()?,
		)
		.setting(
			Setting::builder("Hidden", ValueKind::Bool)
				.default(SettingValue::Bool(false))
				.internal(true)
				.build()?,
		);
	Ok(())
}

/// Usage text width from the terminal size, `DEFAULT_USAGE_WIDTH` when unknown
fn usage_width(size: io::Result<(u16, u16)>) -> usize {
	match size {
		Ok((columns, _)) if columns > 0 => usize::from(columns),
		_ => DEFAULT_USAGE_WIDTH,
	}
}

/// Soft failure: show why, then the usage text
fn usage_failure(settings: &AppSettings, message: &str) -> ExitCode {
	eprintln!("{}\n", message);
	println!("{}", settings.usage(usage_width(crossterm::terminal::size())));
	ExitCode::from(2)
}

fn print_settings(settings: &AppSettings) {
	println!("----------------------------");
	for line in settings.display_lines() {
		println!("{}", line);
	}
}

fn run(config: &Config, args: &[String]) -> AppResult<ExitCode> {
	let store = Arc::new(StoreAdapterRedb::new(&config.store_path)?);

	let mut builder = AppSettings::builder();
	register_settings(&mut builder)?;
	builder
		.version(env!("CARGO_PKG_VERSION"))
		.synopsis(SYNOPSIS)
		.store_root(STORE_ROOT)
		.store_adapter(store);
	let mut settings = builder.build()?;

	if !settings.parse(SettingsSource::CommandLine, args)? {
		let message = settings.parse_error_message().unwrap_or_default().to_string();
		return Ok(usage_failure(&settings, &message));
	}

	let redirect = match settings.get("Settings").filter(|s| s.is_initialized()) {
		Some(setting) => match setting.as_str()? {
			"file" => Some(SettingsSource::SettingsFile),
			"reg" => Some(SettingsSource::Store),
			other => {
				let message =
					format!("Invalid value for -settings: {} (expected file or reg)", other);
				return Ok(usage_failure(&settings, &message));
			}
		},
		None => None,
	};
	if let Some(source) = redirect
		&& !settings.parse_source(source)?
	{
		let message = settings.parse_error_message().unwrap_or_default().to_string();
		return Ok(usage_failure(&settings, &message));
	}

	if settings.get_bool("InitSettings")? {
		settings.init_store()?;
		settings.save(SettingsSource::Store)?;
		info!("Persistent settings written to the store");
		return Ok(ExitCode::SUCCESS);
	}

	print_settings(&settings);
	if let Some(hidden) = settings.get_mut("Hidden") {
		hidden.set(SettingValue::Bool(true))?;
	}
	print_settings(&settings);

	Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let config = Config::from_env();
	let args: Vec<String> = env::args().skip(1).collect();

	match run(&config, &args) {
		Ok(code) => code,
		Err(err) => {
			error!("{}", err);
			eprintln!("{}", err);
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_usage_width_follows_terminal() {
		assert_eq!(usage_width(Ok((132, 40))), 132);
	}

	#[test]
	fn test_usage_width_falls_back_without_terminal() {
		let no_tty = io::Error::new(io::ErrorKind::Unsupported, "not a terminal");
		assert_eq!(usage_width(Err(no_tty)), DEFAULT_USAGE_WIDTH);
		assert_eq!(usage_width(Ok((0, 0))), DEFAULT_USAGE_WIDTH);
	}
}

// vim: ts=4
