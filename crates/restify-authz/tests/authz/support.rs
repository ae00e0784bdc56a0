// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures: a `User` principal and the `Post`, `Book` and `User`
//! models used by the repository tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use restify_authz::{
	Ability, AbilityCheck, Authorizable, Authorizer, GateConfig, Model, ModelType, Policy,
	PolicyRegistry, RequestContext, SubjectContext, Target, Verdict,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
	pub id: u64,
	pub is_admin: bool,
}

impl User {
	pub fn new(id: u64) -> Self {
		Self {
			id,
			is_admin: false,
		}
	}

	pub fn admin(id: u64) -> Self {
		Self { id, is_admin: true }
	}
}

impl Model for User {
	const MODEL_TYPE: ModelType = ModelType::new("user");

	fn key(&self) -> Option<String> {
		Some(self.id.to_string())
	}
}

impl Authorizable for User {
	fn subject_context(&self) -> SubjectContext<'_> {
		SubjectContext::direct(self)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
	pub id: u64,
	pub owner_id: u64,
}

impl Model for Post {
	const MODEL_TYPE: ModelType = ModelType::new("post");

	fn key(&self) -> Option<String> {
		Some(self.id.to_string())
	}
}

impl Authorizable for Post {
	fn subject_context(&self) -> SubjectContext<'_> {
		SubjectContext::direct(self)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
	pub id: u64,
	pub title: String,
}

impl Model for Book {
	const MODEL_TYPE: ModelType = ModelType::new("book");

	fn key(&self) -> Option<String> {
		Some(self.id.to_string())
	}
}

/// Policy table used across the tests. `Book` deliberately has no policy.
pub fn registry() -> Arc<PolicyRegistry<User>> {
	let posts = Policy::for_model::<Post>()
		.instance_ability(Ability::Update, |user: &User, post: &Post| {
			user.id == post.owner_id
		})
		.instance_ability(Ability::Show, |_user: &User, _post: &Post| true)
		.instance_ability(Ability::Delete, |user: &User, post: &Post| {
			user.is_admin || user.id == post.owner_id
		})
		.class_ability(Ability::Store, |_user: &User| true)
		.class_ability(Ability::ShowAny, |user: &User| user.is_admin)
		.build();

	let users = Policy::for_model::<User>()
		.instance_ability(Ability::Update, |user: &User, target: &User| user.id == target.id)
		.class_ability(Ability::ShowAny, |_user: &User| false)
		.build();

	Arc::new(
		PolicyRegistry::builder()
			.register(posts)
			.expect("post policy")
			.register(users)
			.expect("user policy")
			.build(),
	)
}

pub fn authorizer() -> Authorizer<User> {
	Authorizer::with_gate(registry(), GateConfig::default())
}

pub fn acting_as(user: User) -> RequestContext<User> {
	RequestContext::authenticated(user)
}

/// Ability service returning a fixed verdict and counting how often it ran.
pub struct CountingCheck {
	verdict: Verdict,
	calls: AtomicUsize,
}

impl CountingCheck {
	pub fn new(verdict: Verdict) -> Arc<Self> {
		Arc::new(Self {
			verdict,
			calls: AtomicUsize::new(0),
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl AbilityCheck<User> for CountingCheck {
	fn check(&self, _principal: Option<&User>, _ability: &Ability, _target: &Target<'_>) -> Verdict {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.verdict
	}
}
