// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request context for authorization.
//!
//! This module provides:
//! - [`Principal`] - request extension the authentication layer inserts
//! - [`RequestContext`] - per-request view the decider works from
//! - [`extract_request_id`] - correlation id extraction for decision logs
//!
//! # Flow
//!
//! ```text
//! Request → authentication layer → extensions.insert(Principal(user))
//!                                              │
//!                       RequestContext::from_parts(&parts)
//!                                              │
//!                          Authorizer::authorize_to_*(&ctx, ..)
//! ```

use http::request::Parts;
use http::{HeaderMap, Request};
use tracing::trace;
use uuid::Uuid;

/// Header carrying a caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticated actor stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal<P>(pub P);

/// The request an authorization decision is made for.
///
/// Carries the authenticated principal, if any. A context without a principal
/// is a guest request.
#[derive(Debug, Clone)]
pub struct RequestContext<P> {
	principal: Option<P>,
	request_id: Uuid,
}

impl<P> RequestContext<P> {
	/// Create a context for an authenticated principal.
	pub fn authenticated(principal: P) -> Self {
		Self {
			principal: Some(principal),
			request_id: Uuid::new_v4(),
		}
	}

	/// Create a context with no principal.
	pub fn guest() -> Self {
		Self {
			principal: None,
			request_id: Uuid::new_v4(),
		}
	}

	/// Set the request id.
	pub fn with_request_id(mut self, request_id: Uuid) -> Self {
		self.request_id = request_id;
		self
	}

	pub fn principal(&self) -> Option<&P> {
		self.principal.as_ref()
	}

	pub fn is_authenticated(&self) -> bool {
		self.principal.is_some()
	}

	pub fn request_id(&self) -> Uuid {
		self.request_id
	}
}

impl<P: Clone + Send + Sync + 'static> RequestContext<P> {
	/// Build a context from request parts.
	///
	/// The principal is read from a [`Principal<P>`] extension; the request id
	/// from the `x-request-id` header, or generated when absent or invalid.
	pub fn from_parts(parts: &Parts) -> Self {
		Self::from_components(&parts.headers, parts.extensions.get::<Principal<P>>())
	}

	/// Build a context from a full request.
	pub fn from_request<B>(request: &Request<B>) -> Self {
		Self::from_components(
			request.headers(),
			request.extensions().get::<Principal<P>>(),
		)
	}

	fn from_components(headers: &HeaderMap, principal: Option<&Principal<P>>) -> Self {
		let request_id = extract_request_id(headers).unwrap_or_else(Uuid::new_v4);
		trace!(
			%request_id,
			authenticated = principal.is_some(),
			"built request context"
		);
		Self {
			principal: principal.map(|p| p.0.clone()),
			request_id,
		}
	}
}

/// Extract a request id from the `x-request-id` header.
///
/// Returns `None` if the header is missing or is not a UUID.
pub fn extract_request_id(headers: &HeaderMap) -> Option<Uuid> {
	let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
	Uuid::parse_str(value.trim()).ok()
}
