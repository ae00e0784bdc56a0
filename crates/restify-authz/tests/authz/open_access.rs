// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property tests: model types without a policy are open to everyone.

use proptest::prelude::*;
use restify_authz::{
	Ability, AnyModel, Authorizer, Model, PolicyRegistry, RequestContext, Verdict,
};

use super::support::{registry, Book, CountingCheck, User};

fn ability_strategy() -> impl Strategy<Value = Ability> {
	prop_oneof![
		Just(Ability::ShowAny),
		Just(Ability::ShowEvery),
		Just(Ability::Show),
		Just(Ability::Store),
		Just(Ability::Update),
		Just(Ability::Delete),
		"[a-z][a-zA-Z]{0,15}".prop_map(Ability::custom),
	]
}

fn verdict_strategy() -> impl Strategy<Value = Verdict> {
	prop_oneof![Just(Verdict::Allow), Just(Verdict::Deny), Just(Verdict::Abstain)]
}

proptest! {
	/// Without a registered policy every ability is allowed, for any principal,
	/// whatever the ability service would answer.
	#[test]
	fn unregistered_model_is_always_allowed(
		ability in ability_strategy(),
		verdict in verdict_strategy(),
		user_id in any::<u64>(),
		guest in any::<bool>(),
	) {
		let check = CountingCheck::new(verdict);
		let authorizer = Authorizer::new(registry(), check.clone());
		let request = if guest {
			RequestContext::guest()
		} else {
			RequestContext::authenticated(User::new(user_id))
		};
		let book = Book { id: 1, title: "Dune".to_string() };
		let subject: Option<&dyn AnyModel> = if ability.is_collection() { None } else { Some(&book as &dyn AnyModel) };

		prop_assert!(!authorizer.is_authorizable(Book::MODEL_TYPE));
		prop_assert!(authorizer.authorized_to_ability(&request, Book::MODEL_TYPE, &ability, subject));
		prop_assert!(authorizer.authorize_to_ability(&request, Book::MODEL_TYPE, &ability, subject).is_ok());
		prop_assert_eq!(check.calls(), 0);
	}

	/// With an empty registry, nothing is authorizable.
	#[test]
	fn empty_registry_authorizes_everything(ability in ability_strategy(), user_id in any::<u64>()) {
		let authorizer = Authorizer::new(
			std::sync::Arc::new(PolicyRegistry::<User>::empty()),
			CountingCheck::new(Verdict::Deny),
		);
		let request = RequestContext::authenticated(User::new(user_id));

		prop_assert!(!authorizer.is_authorizable(User::MODEL_TYPE));
		prop_assert!(authorizer.authorized_to_ability(&request, User::MODEL_TYPE, &ability, None));
	}

	/// The throwing form raises exactly when the service answers an explicit deny.
	#[test]
	fn throwing_form_raises_only_on_deny(verdict in verdict_strategy(), user_id in any::<u64>()) {
		let authorizer = Authorizer::new(registry(), CountingCheck::new(verdict));
		let request = RequestContext::authenticated(User::new(user_id));
		let target = User::new(user_id.wrapping_add(1));

		let raised = authorizer
			.authorize_to_ability(&request, User::MODEL_TYPE, &Ability::Update, Some(&target))
			.is_err();
		prop_assert_eq!(raised, verdict == Verdict::Deny);
	}
}
