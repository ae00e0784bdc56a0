// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policies and the process-wide policy registry.
//!
//! A [`Policy`] belongs to exactly one model type and maps ability names to
//! handlers. Handlers are typed when registered and erased when stored, so the
//! registry can answer "does this policy define `showAny`?" without probing
//! anything at request time.
//!
//! The registry is assembled once with [`PolicyRegistryBuilder`] and is
//! read-only afterwards.
//!
//! ```ignore
//! let registry = PolicyRegistry::builder()
//!     .register(
//!         Policy::for_model::<Post>()
//!             .instance_ability(Ability::Update, |user: &User, post: &Post| user.id == post.owner_id)
//!             .class_ability(Ability::Store, |user: &User| user.can_write)
//!             .build(),
//!     )?
//!     .build();
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AuthzError, Result};
use crate::types::{Ability, Model, ModelType, Target, Verdict};

/// Type-erased ability handler.
pub type AbilityHandler<P> = Arc<dyn Fn(&P, &Target<'_>) -> Verdict + Send + Sync>;

fn erase<P, F>(handler: F) -> AbilityHandler<P>
where
	F: Fn(&P, &Target<'_>) -> Verdict + Send + Sync + 'static,
{
	Arc::new(handler)
}

/// Authorization logic for one model type.
pub struct Policy<P> {
	model_type: ModelType,
	handlers: HashMap<Ability, AbilityHandler<P>>,
}

impl<P: 'static> Policy<P> {
	/// Starts a policy for model `M`.
	pub fn for_model<M: Model>() -> PolicyBuilder<P, M> {
		PolicyBuilder {
			policy: Policy {
				model_type: M::MODEL_TYPE,
				handlers: HashMap::new(),
			},
			_model: PhantomData,
		}
	}

	pub fn model_type(&self) -> ModelType {
		self.model_type
	}

	/// Returns true if the policy defines a handler for the ability.
	pub fn has_ability(&self, ability: &Ability) -> bool {
		self.handlers.contains_key(ability)
	}

	pub fn handler(&self, ability: &Ability) -> Option<&AbilityHandler<P>> {
		self.handlers.get(ability)
	}

	/// Abilities this policy defines, in no particular order.
	pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
		self.handlers.keys()
	}
}

impl<P> fmt::Debug for Policy<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut abilities: Vec<&str> = self.handlers.keys().map(Ability::as_str).collect();
		abilities.sort_unstable();
		f.debug_struct("Policy")
			.field("model_type", &self.model_type)
			.field("abilities", &abilities)
			.finish()
	}
}

/// Builder binding handlers of a policy to model `M`.
pub struct PolicyBuilder<P, M> {
	policy: Policy<P>,
	_model: PhantomData<fn() -> M>,
}

impl<P: 'static, M: Model> PolicyBuilder<P, M> {
	/// Registers a handler evaluated against the model type only.
	///
	/// The handler receives the principal; use it for abilities with no
	/// instance such as `store`, `showAny` and `showEvery`.
	pub fn class_ability<F, R>(mut self, ability: impl Into<Ability>, handler: F) -> Self
	where
		F: Fn(&P) -> R + Send + Sync + 'static,
		R: Into<Verdict>,
	{
		let handler = erase(move |principal: &P, _target: &Target<'_>| handler(principal).into());
		self.policy.handlers.insert(ability.into(), handler);
		self
	}

	/// Registers a handler evaluated against a model instance.
	///
	/// Checked against a bare model type, or an instance of another model,
	/// the handler is skipped and the check is denied.
	pub fn instance_ability<F, R>(mut self, ability: impl Into<Ability>, handler: F) -> Self
	where
		F: Fn(&P, &M) -> R + Send + Sync + 'static,
		R: Into<Verdict>,
	{
		let handler = erase(move |principal: &P, target: &Target<'_>| {
			let Some(instance) = target.instance() else {
				return Verdict::Deny;
			};
			match instance.as_any().downcast_ref::<M>() {
				Some(model) => handler(principal, model).into(),
				None => {
					warn!(
						model_type = %M::MODEL_TYPE,
						instance_type = %instance.model_type(),
						expected = type_name::<M>(),
						"instance is not the policy's model, denying"
					);
					Verdict::Deny
				}
			}
		});
		self.policy.handlers.insert(ability.into(), handler);
		self
	}

	/// Registers a handler receiving the raw target.
	///
	/// Useful for abilities checked both with and without an instance.
	pub fn ability<F, R>(mut self, ability: impl Into<Ability>, handler: F) -> Self
	where
		F: Fn(&P, Option<&M>) -> R + Send + Sync + 'static,
		R: Into<Verdict>,
	{
		let handler = erase(move |principal: &P, target: &Target<'_>| {
			let model = target.instance().and_then(|m| m.as_any().downcast_ref::<M>());
			handler(principal, model).into()
		});
		self.policy.handlers.insert(ability.into(), handler);
		self
	}

	pub fn build(self) -> Policy<P> {
		self.policy
	}
}

/// Immutable mapping from model type to policy.
pub struct PolicyRegistry<P> {
	policies: HashMap<ModelType, Policy<P>>,
}

impl<P: 'static> PolicyRegistry<P> {
	pub fn builder() -> PolicyRegistryBuilder<P> {
		PolicyRegistryBuilder {
			policies: HashMap::new(),
		}
	}

	/// A registry with no policies: every model type is open access.
	pub fn empty() -> Self {
		Self {
			policies: HashMap::new(),
		}
	}

	pub fn lookup(&self, model_type: ModelType) -> Option<&Policy<P>> {
		self.policies.get(&model_type)
	}

	pub fn contains(&self, model_type: ModelType) -> bool {
		self.policies.contains_key(&model_type)
	}

	pub fn len(&self) -> usize {
		self.policies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.policies.is_empty()
	}

	/// Registered model types, sorted by name.
	pub fn model_types(&self) -> Vec<ModelType> {
		let mut types: Vec<ModelType> = self.policies.keys().copied().collect();
		types.sort();
		types
	}
}

impl<P> fmt::Debug for PolicyRegistry<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.policies.iter()).finish()
	}
}

/// Collects policies during application bootstrap.
pub struct PolicyRegistryBuilder<P> {
	policies: HashMap<ModelType, Policy<P>>,
}

impl<P: 'static> PolicyRegistryBuilder<P> {
	/// Adds a policy. A model type can have only one policy.
	pub fn register(mut self, policy: Policy<P>) -> Result<Self> {
		let model_type = policy.model_type();
		if self.policies.contains_key(&model_type) {
			return Err(AuthzError::DuplicatePolicy { model_type });
		}

		debug!(
			model_type = %model_type,
			abilities = policy.handlers.len(),
			"registering policy"
		);
		self.policies.insert(model_type, policy);
		Ok(self)
	}

	/// Freezes the registry.
	pub fn build(self) -> PolicyRegistry<P> {
		PolicyRegistry {
			policies: self.policies,
		}
	}
}
