//! Completion evaluation after a parse pass
//!
//! Runs over the whole registry once a pass has applied its entries:
//! 1. any `StopIfProvided` setting initialized: success, mandatory checks skipped
//! 2. any `Mandatory` setting still uninitialized: failure
//! 3. otherwise success

use crate::registry::SettingsRegistry;
use crate::setting::Policy;
use crate::source::PassOutcome;

/// Result of the completion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
	/// All mandatory settings are initialized
	Complete,
	/// A `StopIfProvided` setting was supplied; carries its key
	ShortCircuited(String),
	/// First mandatory setting (declaration order) left uninitialized
	MissingMandatory(String),
}

impl Completion {
	pub fn is_success(&self) -> bool {
		!matches!(self, Completion::MissingMandatory(_))
	}
}

pub fn evaluate_completion(registry: &SettingsRegistry) -> Completion {
	if let Some(setting) = registry
		.iter()
		.find(|s| s.policy() == Policy::StopIfProvided && s.is_initialized())
	{
		return Completion::ShortCircuited(setting.key().to_string());
	}

	match registry.iter().find(|s| s.policy() == Policy::Mandatory && !s.is_initialized()) {
		Some(setting) => Completion::MissingMandatory(setting.key().to_string()),
		None => Completion::Complete,
	}
}

/// Turn a pass outcome into the overall verdict: `Ok(())` or the soft error message
pub fn conclude_pass(registry: &SettingsRegistry, outcome: PassOutcome) -> Result<(), String> {
	match outcome {
		PassOutcome::Rejected(message) => Err(message),
		PassOutcome::Stopped => Ok(()),
		PassOutcome::Completed => match evaluate_completion(registry) {
			Completion::MissingMandatory(key) => Err(format!("Missing mandatory setting: {}", key)),
			_ => Ok(()),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::setting::{Setting, SettingValue, ValueKind};

	fn registry() -> SettingsRegistry {
		SettingsRegistry::from_settings([
			Setting::builder("Foo", ValueKind::Bool)
				.policy(Policy::Mandatory)
				.default(SettingValue::Bool(false))
				.build()
				.expect("Failed to build setting"),
			Setting::builder("ADateSetting", ValueKind::Timestamp)
				.policy(Policy::Mandatory)
				.build()
				.expect("Failed to build setting"),
			// declared last on purpose: the short-circuit does not depend on order
			Setting::builder("Settings", ValueKind::String)
				.policy(Policy::StopIfProvided)
				.build()
				.expect("Failed to build setting"),
		])
		.expect("Failed to build registry")
	}

	#[test]
	fn test_missing_mandatory_reports_first_in_order() {
		let reg = registry();
		assert_eq!(evaluate_completion(&reg), Completion::MissingMandatory("Foo".into()));
		assert_eq!(
			conclude_pass(&reg, PassOutcome::Completed),
			Err("Missing mandatory setting: Foo".to_string())
		);
	}

	#[test]
	fn test_complete_when_mandatory_supplied() {
		let mut reg = registry();
		for (key, raw) in [("foo", ""), ("adatesetting", "2017-12-31")] {
			if let Some(s) = reg.get_mut(key) {
				assert!(s.accept_scalar(key, raw).unwrap_or(false));
			}
		}
		assert_eq!(evaluate_completion(&reg), Completion::Complete);
		assert!(conclude_pass(&reg, PassOutcome::Completed).is_ok());
	}

	#[test]
	fn test_stop_if_provided_short_circuits() {
		let mut reg = registry();
		if let Some(s) = reg.get_mut("settings") {
			assert!(s.accept_scalar("settings", "file").unwrap_or(false));
		}
		let completion = evaluate_completion(&reg);
		assert_eq!(completion, Completion::ShortCircuited("Settings".into()));
		assert!(completion.is_success());
	}

	#[test]
	fn test_rejection_wins() {
		let reg = registry();
		assert_eq!(
			conclude_pass(&reg, PassOutcome::Rejected("Unknown arg: -x".into())),
			Err("Unknown arg: -x".to_string())
		);
		assert!(conclude_pass(&reg, PassOutcome::Stopped).is_ok());
	}
}

// vim: ts=4
