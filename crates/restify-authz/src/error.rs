// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for authorization decisions.

use std::borrow::Cow;

use http::StatusCode;
use thiserror::Error;

use crate::types::ModelType;

/// Message used by every throwing helper except store.
pub const DEFAULT_DENIAL_MESSAGE: &str = "This action is unauthorized.";

/// Message used when storing a new model is denied.
pub const STORE_DENIAL_MESSAGE: &str = "Unauthorized to store.";

/// Errors raised by the authorization layer.
#[derive(Debug, Error)]
pub enum AuthzError {
	/// An ability check returned an explicit deny.
	#[error("{message}")]
	AuthorizationDenied { message: Cow<'static, str> },

	/// A repository wrapper was asked for its model but holds none.
	#[error("Model is not declared in {wrapper}")]
	SubjectNotFound { wrapper: &'static str },

	/// Two policies were registered for the same model type.
	#[error("a policy is already registered for model type '{model_type}'")]
	DuplicatePolicy { model_type: ModelType },
}

impl AuthzError {
	pub fn denied() -> Self {
		Self::AuthorizationDenied {
			message: Cow::Borrowed(DEFAULT_DENIAL_MESSAGE),
		}
	}

	pub fn denied_with(message: impl Into<Cow<'static, str>>) -> Self {
		Self::AuthorizationDenied {
			message: message.into(),
		}
	}

	/// HTTP status the surrounding handler should respond with.
	///
	/// A missing subject is a wiring bug, so it maps to a server error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			AuthzError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
			AuthzError::SubjectNotFound { .. } | AuthzError::DuplicatePolicy { .. } => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	pub fn is_denied(&self) -> bool {
		matches!(self, AuthzError::AuthorizationDenied { .. })
	}
}

/// Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
