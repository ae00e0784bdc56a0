// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for a model with a full policy.

use http::{Request, StatusCode};
use restify_authz::{
	Ability, AuthzError, Authorizer, Principal, Repository, RequestContext, Verdict,
	STORE_DENIAL_MESSAGE,
};

use super::support::{acting_as, authorizer, registry, CountingCheck, Post, User};

// ============================================================================
// Owner-only update
// ============================================================================

#[test]
fn owner_can_update_post() {
	let authorizer = authorizer();
	let post = Repository::for_model(Post { id: 5, owner_id: 1 });

	let result = authorizer.authorize_to_update(&acting_as(User::new(1)), &post);

	assert!(result.is_ok(), "Owner should be able to update their post");
}

#[test]
fn non_owner_cannot_update_post() {
	let authorizer = authorizer();
	let post = Repository::for_model(Post { id: 5, owner_id: 1 });

	let err = authorizer
		.authorize_to_update(&acting_as(User::new(2)), &post)
		.unwrap_err();

	assert!(matches!(err, AuthzError::AuthorizationDenied { .. }));
	assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
}

#[test]
fn model_and_repository_contexts_agree() {
	let authorizer = authorizer();
	let post = Post { id: 5, owner_id: 1 };
	let request = acting_as(User::new(1));

	assert_eq!(
		authorizer.authorized_to_update(&request, &post).unwrap(),
		authorizer
			.authorized_to_update(&request, &Repository::for_model(post.clone()))
			.unwrap()
	);
}

// ============================================================================
// Collection abilities
// ============================================================================

#[test]
fn show_any_follows_policy_when_defined() {
	let authorizer = authorizer();
	let repository = Repository::<Post>::empty();

	assert!(authorizer.authorized_to_show_any(&acting_as(User::admin(9)), &repository));
	assert!(!authorizer.authorized_to_show_any(&acting_as(User::new(2)), &repository));
	assert!(authorizer
		.authorize_to_show_any(&acting_as(User::new(2)), &repository)
		.unwrap_err()
		.is_denied());
}

#[test]
fn show_every_is_open_when_policy_omits_it() {
	let check = CountingCheck::new(Verdict::Deny);
	let authorizer = Authorizer::new(registry(), check.clone());
	let repository = Repository::<Post>::empty();

	assert!(authorizer.authorized_to_show_every(&acting_as(User::new(2)), &repository));
	assert!(authorizer
		.authorize_to_show_every(&acting_as(User::new(2)), &repository)
		.is_ok());
	assert_eq!(check.calls(), 0, "ability service must not be consulted");
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn store_checks_model_type() {
	let authorizer = authorizer();
	assert!(authorizer.authorized_to_store(&acting_as(User::new(3)), &Repository::<Post>::empty()));
}

#[test]
fn store_denial_has_fixed_message() {
	let authorizer = Authorizer::new(registry(), CountingCheck::new(Verdict::Deny));

	let err = authorizer
		.authorize_to_store(&acting_as(User::new(3)), &Repository::<Post>::empty())
		.unwrap_err();

	assert_eq!(err.to_string(), STORE_DENIAL_MESSAGE);
}

// ============================================================================
// Request context
// ============================================================================

#[test]
fn principal_is_taken_from_request_extensions() {
	let authorizer = authorizer();
	let post = Repository::for_model(Post { id: 5, owner_id: 1 });

	let mut request = Request::builder()
		.method("PUT")
		.uri("/restify-api/posts/5")
		.body(())
		.unwrap();
	request.extensions_mut().insert(Principal(User::new(1)));
	let (parts, _body) = request.into_parts();
	let context = RequestContext::<User>::from_parts(&parts);

	assert!(authorizer.authorize_to_update(&context, &post).is_ok());
}

#[test]
fn guest_cannot_update_post() {
	let authorizer = authorizer();
	let post = Repository::for_model(Post { id: 5, owner_id: 1 });

	let err = authorizer
		.authorize_to_update(&RequestContext::guest(), &post)
		.unwrap_err();

	assert!(err.is_denied());
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn meta_for_owner_and_stranger() {
	let authorizer = authorizer();
	let post = Repository::for_model(Post { id: 5, owner_id: 1 });

	let owner = authorizer.meta_for(&acting_as(User::new(1)), &post).unwrap();
	assert!(owner.authorized_to_show);
	assert!(owner.authorized_to_store);
	assert!(owner.authorized_to_update);
	assert!(owner.authorized_to_delete);

	let stranger = authorizer.meta_for(&acting_as(User::new(2)), &post).unwrap();
	assert!(stranger.authorized_to_show);
	assert!(!stranger.authorized_to_update);
	assert!(!stranger.authorized_to_delete);

	let json = serde_json::to_value(stranger).unwrap();
	assert_eq!(json["authorizedToUpdate"], false);
}

#[test]
fn admin_can_delete_any_post() {
	let authorizer = authorizer();
	let post = Post { id: 5, owner_id: 1 };

	assert!(authorizer
		.authorized_to(&acting_as(User::admin(8)), &post, Ability::Delete)
		.unwrap());
}
