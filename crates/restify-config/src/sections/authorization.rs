// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization configuration section.
//!
//! Controls how the default gate answers when it has nothing to evaluate:
//! a request without a principal, or a policy without a handler for the
//! requested ability.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome the gate reports for a case it cannot evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSetting {
	Allow,
	Deny,
	Abstain,
}

impl fmt::Display for VerdictSetting {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			VerdictSetting::Allow => write!(f, "allow"),
			VerdictSetting::Deny => write!(f, "deny"),
			VerdictSetting::Abstain => write!(f, "abstain"),
		}
	}
}

impl FromStr for VerdictSetting {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"allow" => Ok(VerdictSetting::Allow),
			"deny" => Ok(VerdictSetting::Deny),
			"abstain" => Ok(VerdictSetting::Abstain),
			other => Err(format!(
				"unknown verdict '{other}' (expected allow, deny or abstain)"
			)),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthorizationConfigLayer {
	pub guest_verdict: Option<VerdictSetting>,
	pub missing_ability_verdict: Option<VerdictSetting>,
	pub log_decisions: Option<bool>,
}

impl AuthorizationConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.guest_verdict.is_some() {
			self.guest_verdict = other.guest_verdict;
		}
		if other.missing_ability_verdict.is_some() {
			self.missing_ability_verdict = other.missing_ability_verdict;
		}
		if other.log_decisions.is_some() {
			self.log_decisions = other.log_decisions;
		}
	}

	pub fn finalize(self) -> AuthorizationConfig {
		AuthorizationConfig {
			guest_verdict: self.guest_verdict.unwrap_or(VerdictSetting::Deny),
			missing_ability_verdict: self.missing_ability_verdict.unwrap_or(VerdictSetting::Deny),
			log_decisions: self.log_decisions.unwrap_or(true),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizationConfig {
	/// Verdict for requests that carry no authenticated principal.
	pub guest_verdict: VerdictSetting,
	/// Verdict when a registered policy has no handler for the ability.
	pub missing_ability_verdict: VerdictSetting,
	/// Emit a debug event for every gate decision.
	pub log_decisions: bool,
}

impl Default for AuthorizationConfig {
	fn default() -> Self {
		AuthorizationConfigLayer::default().finalize()
	}
}
