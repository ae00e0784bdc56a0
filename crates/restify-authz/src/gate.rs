// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ability-check service.
//!
//! [`AbilityCheck`] is the seam the decider delegates to once it has decided
//! that a check is needed. [`Gate`] is the default implementation, evaluating
//! handlers from a [`PolicyRegistry`]:
//!
//! ```text
//! check(principal, ability, target)
//!   ├── no policy for target type  → missing_ability_verdict
//!   ├── policy lacks the ability   → missing_ability_verdict
//!   ├── no principal (guest)       → guest_verdict
//!   └── handler(principal, target) → its verdict
//! ```

use std::sync::Arc;

use restify_config::AuthorizationConfig;
use tracing::{debug, instrument};

use crate::policy::PolicyRegistry;
use crate::types::{Ability, Target, Verdict};

/// Answers whether a principal holds an ability on a target.
pub trait AbilityCheck<P>: Send + Sync {
	fn check(&self, principal: Option<&P>, ability: &Ability, target: &Target<'_>) -> Verdict;
}

/// Verdicts the gate reports when it has nothing to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
	pub guest_verdict: Verdict,
	pub missing_ability_verdict: Verdict,
	pub log_decisions: bool,
}

impl Default for GateConfig {
	fn default() -> Self {
		Self {
			guest_verdict: Verdict::Deny,
			missing_ability_verdict: Verdict::Deny,
			log_decisions: true,
		}
	}
}

impl From<&AuthorizationConfig> for GateConfig {
	fn from(config: &AuthorizationConfig) -> Self {
		Self {
			guest_verdict: config.guest_verdict.into(),
			missing_ability_verdict: config.missing_ability_verdict.into(),
			log_decisions: config.log_decisions,
		}
	}
}

/// Default [`AbilityCheck`] backed by a policy registry.
pub struct Gate<P> {
	registry: Arc<PolicyRegistry<P>>,
	config: GateConfig,
}

impl<P: 'static> Gate<P> {
	pub fn new(registry: Arc<PolicyRegistry<P>>) -> Self {
		Self::with_config(registry, GateConfig::default())
	}

	pub fn with_config(registry: Arc<PolicyRegistry<P>>, config: GateConfig) -> Self {
		Self { registry, config }
	}

	pub fn config(&self) -> &GateConfig {
		&self.config
	}

	fn evaluate(
		&self,
		principal: Option<&P>,
		ability: &Ability,
		target: &Target<'_>,
	) -> (Verdict, &'static str) {
		let Some(policy) = self.registry.lookup(target.model_type()) else {
			return (self.config.missing_ability_verdict, "no_policy");
		};

		let Some(handler) = policy.handler(ability) else {
			return (self.config.missing_ability_verdict, "missing_ability");
		};

		let Some(principal) = principal else {
			return (self.config.guest_verdict, "guest");
		};

		(handler(principal, target), "policy")
	}
}

impl<P: Send + Sync + 'static> AbilityCheck<P> for Gate<P> {
	#[instrument(
		level = "trace",
		skip(self, principal, target),
		fields(
			ability = %ability,
			model_type = %target.model_type(),
			authenticated = principal.is_some(),
		)
	)]
	fn check(&self, principal: Option<&P>, ability: &Ability, target: &Target<'_>) -> Verdict {
		let (verdict, reason) = self.evaluate(principal, ability, target);

		if self.config.log_decisions {
			debug!(
				ability = %ability,
				model_type = %target.model_type(),
				key = ?target.instance().and_then(|m| m.primary_key()),
				verdict = %verdict,
				reason,
				"gate decision"
			);
		}

		verdict
	}
}
