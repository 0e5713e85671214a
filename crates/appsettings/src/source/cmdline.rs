//! Command-line tokenizer
//!
//! Tokens are kept on a stack so popping yields them left to right. Each popped
//! token must carry the `-` marker; the rest is the key, offered to every setting
//! together with the stack. A value-consuming setting pops its own value, so the
//! next pop yields the following key.

use crate::prelude::*;
use crate::registry::SettingsRegistry;
use crate::setting::Policy;

use super::PassOutcome;

/// Prefix marking a command-line key
pub const ARG_MARKER: char = '-';

/// Remaining command-line tokens, next token on top
#[derive(Debug, Clone, Default)]
pub struct ArgStack {
	// reversed: the next token is the last element
	tokens: Vec<String>,
}

impl ArgStack {
	/// Build a stack from tokens in command-line order
	pub fn new<I, S>(args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut tokens: Vec<String> = args.into_iter().map(Into::into).collect();
		tokens.reverse();
		Self { tokens }
	}

	pub fn pop(&mut self) -> Option<String> {
		self.tokens.pop()
	}

	pub fn peek(&self) -> Option<&str> {
		self.tokens.last().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

/// Apply command-line tokens to the registry.
///
/// An unknown key ends the pass at once; no later token is processed.
pub fn parse_command_line<I, S>(registry: &mut SettingsRegistry, args: I) -> AppResult<PassOutcome>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut stack = ArgStack::new(args);

	while let Some(token) = stack.pop() {
		let Some(key) = token.strip_prefix(ARG_MARKER) else {
			warn!("Command-line token without '{}' marker: {}", ARG_MARKER, token);
			return Ok(PassOutcome::Rejected(format!("Unknown arg: {}", token)));
		};

		let mut accepted = None;
		for setting in registry.iter_mut() {
			if setting.accept_from_stream(key, &mut stack)? {
				accepted = Some(setting.policy());
				break;
			}
		}

		match accepted {
			Some(Policy::StopIfProvided) => {
				debug!(
					"Stop-if-provided arg {} seen, ignoring {} remaining tokens",
					token,
					stack.len()
				);
				return Ok(PassOutcome::Stopped);
			}
			Some(_) => {}
			None => {
				warn!("Unknown arg: {}", token);
				return Ok(PassOutcome::Rejected(format!("Unknown arg: {}", token)));
			}
		}
	}
	Ok(PassOutcome::Completed)
}


// vim: ts=4
