// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for the user model, whose policy omits `showEvery`.

use restify_authz::{Authorizer, AuthzError, Repository, Verdict};

use super::support::{acting_as, authorizer, registry, CountingCheck, User};

#[test]
fn show_every_is_allowed_whatever_the_ability_service_says() {
	for verdict in [Verdict::Allow, Verdict::Deny, Verdict::Abstain] {
		let check = CountingCheck::new(verdict);
		let authorizer = Authorizer::new(registry(), check.clone());

		assert!(
			authorizer.authorized_to_show_every(&acting_as(User::new(1)), &Repository::<User>::empty()),
			"showEvery should be open when the policy omits it (service verdict {verdict})"
		);
		assert_eq!(check.calls(), 0);
	}
}

#[test]
fn show_any_defined_as_false_denies() {
	let authorizer = authorizer();
	let repository = Repository::<User>::empty();

	assert!(!authorizer.authorized_to_show_any(&acting_as(User::admin(1)), &repository));
	let err = authorizer
		.authorize_to_show_any(&acting_as(User::admin(1)), &repository)
		.unwrap_err();
	assert!(matches!(err, AuthzError::AuthorizationDenied { .. }));
}

#[test]
fn user_can_update_self_only() {
	let authorizer = authorizer();
	let me = User::new(1);

	assert!(authorizer.authorize_to_update(&acting_as(me.clone()), &me).is_ok());
	assert!(authorizer
		.authorize_to_update(&acting_as(User::new(2)), &me)
		.unwrap_err()
		.is_denied());
}

#[test]
fn show_without_handler_goes_to_ability_service() {
	let check = CountingCheck::new(Verdict::Allow);
	let authorizer = Authorizer::new(registry(), check.clone());

	assert!(authorizer
		.authorized_to_show(&acting_as(User::new(2)), &User::new(1))
		.unwrap());
	assert_eq!(check.calls(), 1);
}

#[test]
fn abstaining_service_does_not_raise() {
	let authorizer = Authorizer::new(registry(), CountingCheck::new(Verdict::Abstain));
	let target = User::new(1);

	assert!(!authorizer
		.authorized_to_update(&acting_as(User::new(2)), &target)
		.unwrap());
	assert!(authorizer
		.authorize_to_update(&acting_as(User::new(2)), &target)
		.is_ok());
}

#[test]
fn empty_user_repository_cannot_resolve_subject() {
	let authorizer = authorizer();

	let err = authorizer
		.authorize_to_delete(&acting_as(User::new(1)), &Repository::<User>::empty())
		.unwrap_err();

	match err {
		AuthzError::SubjectNotFound { wrapper } => assert!(wrapper.contains("Repository")),
		other => panic!("expected SubjectNotFound, got {other}"),
	}
}
