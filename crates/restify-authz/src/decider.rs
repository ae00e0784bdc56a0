// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decider.
//!
//! [`Authorizer`] answers, for a request, an ability and a subject, whether the
//! action is permitted. Every helper comes in two forms: `authorized_to_*`
//! returns a boolean for deciding what to advertise, and `authorize_to_*`
//! fails with [`AuthzError::AuthorizationDenied`] before an action runs.
//!
//! Evaluation order:
//!
//! 1. **Policy lookup**: a model type with no registered policy is open access
//! 2. **Collection abilities**: `showAny`/`showEvery` are allowed when the
//!    policy does not define them, otherwise checked against the model type
//! 3. **Everything else**: delegated to the [`AbilityCheck`] service against
//!    the instance when there is one, else the model type
//!
//! # Denial asymmetry
//!
//! The throwing helpers fail only on an explicit [`Verdict::Deny`]. A check
//! that abstains is not allowed by the boolean helpers, yet does not raise
//! from the throwing ones.
//!
//! Store is the exception: [`Authorizer::authorize_to_store`] fails whenever
//! [`Authorizer::authorized_to_store`] is false, so an abstaining store check
//! blocks creation.

use std::sync::Arc;

use restify_config::AuthorizationConfig;
use tracing::{debug, instrument, trace};

use crate::context::RequestContext;
use crate::error::{AuthzError, Result, STORE_DENIAL_MESSAGE};
use crate::gate::{AbilityCheck, Gate, GateConfig};
use crate::meta::AuthorizationMeta;
use crate::policy::PolicyRegistry;
use crate::subject::Authorizable;
use crate::types::{Ability, AnyModel, ModelType, Target, Verdict};

/// Decides whether requests may perform abilities on models.
pub struct Authorizer<P> {
	registry: Arc<PolicyRegistry<P>>,
	checker: Arc<dyn AbilityCheck<P>>,
}

impl<P> Clone for Authorizer<P> {
	fn clone(&self) -> Self {
		Self {
			registry: Arc::clone(&self.registry),
			checker: Arc::clone(&self.checker),
		}
	}
}

impl<P: Send + Sync + 'static> Authorizer<P> {
	/// Create an authorizer delegating checks to a custom service.
	pub fn new(registry: Arc<PolicyRegistry<P>>, checker: Arc<dyn AbilityCheck<P>>) -> Self {
		Self { registry, checker }
	}

	/// Create an authorizer backed by the default [`Gate`].
	pub fn with_gate(registry: Arc<PolicyRegistry<P>>, config: GateConfig) -> Self {
		let gate = Gate::with_config(Arc::clone(&registry), config);
		Self::new(registry, Arc::new(gate))
	}

	/// Create an authorizer from the `authorization` configuration section.
	pub fn from_config(registry: Arc<PolicyRegistry<P>>, config: &AuthorizationConfig) -> Self {
		Self::with_gate(registry, GateConfig::from(config))
	}

	pub fn registry(&self) -> &PolicyRegistry<P> {
		&self.registry
	}

	// =========================================================================
	// Primitives
	// =========================================================================

	/// Returns true if a policy is registered for the model type.
	pub fn is_authorizable(&self, model_type: ModelType) -> bool {
		self.registry.contains(model_type)
	}

	/// Runs the decision and returns the raw verdict.
	#[instrument(
		level = "debug",
		skip(self, request, subject),
		fields(
			request_id = %request.request_id(),
			model_type = %model_type,
			ability = %ability,
		)
	)]
	pub fn check_ability(
		&self,
		request: &RequestContext<P>,
		model_type: ModelType,
		ability: &Ability,
		subject: Option<&dyn AnyModel>,
	) -> Verdict {
		let Some(policy) = self.registry.lookup(model_type) else {
			trace!("no policy registered, open access");
			return Verdict::Allow;
		};

		if ability.is_collection() {
			if !policy.has_ability(ability) {
				trace!("policy does not define collection ability, allowing");
				return Verdict::Allow;
			}
			return self
				.checker
				.check(request.principal(), ability, &Target::Class(model_type));
		}

		let target = match subject {
			Some(model) => Target::Instance(model),
			None => Target::Class(model_type),
		};
		self.checker.check(request.principal(), ability, &target)
	}

	/// Returns true if the request may perform the ability.
	pub fn authorized_to_ability(
		&self,
		request: &RequestContext<P>,
		model_type: ModelType,
		ability: &Ability,
		subject: Option<&dyn AnyModel>,
	) -> bool {
		self
			.check_ability(request, model_type, ability, subject)
			.is_allowed()
	}

	/// Fails with `AuthorizationDenied` if the check explicitly denies.
	///
	/// An abstaining check passes; see the module docs.
	pub fn authorize_to_ability(
		&self,
		request: &RequestContext<P>,
		model_type: ModelType,
		ability: &Ability,
		subject: Option<&dyn AnyModel>,
	) -> Result<()> {
		self.deny_on_explicit_false(
			self.check_ability(request, model_type, ability, subject),
			ability,
			model_type,
			AuthzError::denied,
		)
	}

	fn deny_on_explicit_false(
		&self,
		verdict: Verdict,
		ability: &Ability,
		model_type: ModelType,
		error: impl FnOnce() -> AuthzError,
	) -> Result<()> {
		if verdict.is_denied() {
			debug!(ability = %ability, model_type = %model_type, "authorization denied");
			return Err(error());
		}
		Ok(())
	}

	// =========================================================================
	// Resource helpers
	// =========================================================================

	/// Returns true if the request may perform `ability` on the resource's model.
	///
	/// The subject is resolved only when a policy is registered, so an empty
	/// repository over an unprotected model is allowed.
	pub fn authorized_to<R>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
		ability: impl Into<Ability>,
	) -> Result<bool>
	where
		R: Authorizable + ?Sized,
	{
		let ability = ability.into();
		Ok(self.resolve_and_check(request, resource, &ability)?.is_allowed())
	}

	/// Fails unless the request may perform `ability` on the resource's model.
	pub fn authorize_to<R>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
		ability: impl Into<Ability>,
	) -> Result<()>
	where
		R: Authorizable + ?Sized,
	{
		let ability = ability.into();
		let verdict = self.resolve_and_check(request, resource, &ability)?;
		let model_type = resource.subject_context().model_type();
		self.deny_on_explicit_false(verdict, &ability, model_type, AuthzError::denied)
	}

	fn resolve_and_check<R>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
		ability: &Ability,
	) -> Result<Verdict>
	where
		R: Authorizable + ?Sized,
	{
		let context = resource.subject_context();
		let model_type = context.model_type();

		if !self.is_authorizable(model_type) {
			return Ok(Verdict::Allow);
		}

		let subject = if ability.is_collection() {
			None
		} else {
			Some(context.determine_subject()?)
		};

		Ok(self.check_ability(request, model_type, ability, subject))
	}

	fn check_type<R>(&self, request: &RequestContext<P>, resource: &R, ability: &Ability) -> Verdict
	where
		R: Authorizable + ?Sized,
	{
		let model_type = resource.subject_context().model_type();
		self.check_ability(request, model_type, ability, None)
	}

	pub fn authorized_to_show<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<bool> {
		self.authorized_to(request, resource, Ability::Show)
	}

	pub fn authorize_to_show<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		self.authorize_to(request, resource, Ability::Show)
	}

	pub fn authorized_to_update<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<bool> {
		self.authorized_to(request, resource, Ability::Update)
	}

	pub fn authorize_to_update<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		self.authorize_to(request, resource, Ability::Update)
	}

	pub fn authorized_to_delete<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<bool> {
		self.authorized_to(request, resource, Ability::Delete)
	}

	pub fn authorize_to_delete<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		self.authorize_to(request, resource, Ability::Delete)
	}

	/// Store is checked against the model type; no instance exists yet.
	pub fn authorized_to_store<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> bool {
		self.check_type(request, resource, &Ability::Store).is_allowed()
	}

	/// Fails unless store is allowed. Unlike the other throwing helpers, an
	/// abstaining check raises too.
	pub fn authorize_to_store<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		if self.authorized_to_store(request, resource) {
			return Ok(());
		}
		let model_type = resource.subject_context().model_type();
		debug!(ability = %Ability::Store, model_type = %model_type, "authorization denied");
		Err(AuthzError::denied_with(STORE_DENIAL_MESSAGE))
	}

	pub fn authorized_to_show_any<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> bool {
		self.check_type(request, resource, &Ability::ShowAny).is_allowed()
	}

	pub fn authorize_to_show_any<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		let model_type = resource.subject_context().model_type();
		let verdict = self.check_type(request, resource, &Ability::ShowAny);
		self.deny_on_explicit_false(verdict, &Ability::ShowAny, model_type, AuthzError::denied)
	}

	pub fn authorized_to_show_every<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> bool {
		self.check_type(request, resource, &Ability::ShowEvery).is_allowed()
	}

	pub fn authorize_to_show_every<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<()> {
		let model_type = resource.subject_context().model_type();
		let verdict = self.check_type(request, resource, &Ability::ShowEvery);
		self.deny_on_explicit_false(verdict, &Ability::ShowEvery, model_type, AuthzError::denied)
	}

	/// Computes the authorization metadata advertised alongside a resource.
	pub fn meta_for<R: Authorizable + ?Sized>(
		&self,
		request: &RequestContext<P>,
		resource: &R,
	) -> Result<AuthorizationMeta> {
		Ok(AuthorizationMeta {
			authorized_to_show: self.authorized_to_show(request, resource)?,
			authorized_to_store: self.authorized_to_store(request, resource),
			authorized_to_update: self.authorized_to_update(request, resource)?,
			authorized_to_delete: self.authorized_to_delete(request, resource)?,
		})
	}
}
