// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject resolution for models and repository wrappers.
//!
//! Authorization helpers accept anything implementing [`Authorizable`]. A model
//! is its own subject ([`SubjectContext::Direct`]); a [`Repository`] wraps an
//! optional model ([`SubjectContext::Wrapped`]). Which variant applies is fixed
//! by the type's `Authorizable` impl.

use std::any::type_name;

use crate::error::{AuthzError, Result};
use crate::types::{AnyModel, Model, ModelType};

/// Where the subject of a check comes from.
#[derive(Debug, Clone, Copy)]
pub enum SubjectContext<'a> {
	/// The component is itself the model.
	Direct(&'a dyn AnyModel),
	/// The component wraps a model that may not be loaded.
	Wrapped {
		wrapper: &'static str,
		model_type: ModelType,
		model: Option<&'a dyn AnyModel>,
	},
}

impl<'a> SubjectContext<'a> {
	pub fn direct(model: &'a dyn AnyModel) -> Self {
		SubjectContext::Direct(model)
	}

	/// Model type policies are looked up by, known even for an empty wrapper.
	pub fn model_type(&self) -> ModelType {
		match self {
			SubjectContext::Direct(model) => model.model_type(),
			SubjectContext::Wrapped { model_type, .. } => *model_type,
		}
	}

	pub fn is_wrapped(&self) -> bool {
		matches!(self, SubjectContext::Wrapped { .. })
	}

	/// Resolves the concrete model to check.
	///
	/// Fails with [`AuthzError::SubjectNotFound`] for a wrapper holding no
	/// model. A direct context always resolves.
	pub fn determine_subject(&self) -> Result<&'a dyn AnyModel> {
		match self {
			SubjectContext::Direct(model) => Ok(*model),
			SubjectContext::Wrapped { wrapper, model, .. } => {
				model.ok_or(AuthzError::SubjectNotFound { wrapper: *wrapper })
			}
		}
	}
}

/// Something authorization helpers can be called on.
pub trait Authorizable {
	fn subject_context(&self) -> SubjectContext<'_>;
}

/// Resource wrapper around a model, as exposed by generated endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository<M> {
	resource: Option<M>,
}

impl<M: Model> Repository<M> {
	pub fn for_model(model: M) -> Self {
		Self {
			resource: Some(model),
		}
	}

	/// A repository with no loaded model, as used for index and store routes.
	pub fn empty() -> Self {
		Self { resource: None }
	}

	/// Builder: set the wrapped model.
	pub fn with_resource(mut self, model: M) -> Self {
		self.resource = Some(model);
		self
	}

	pub fn resource(&self) -> Option<&M> {
		self.resource.as_ref()
	}

	pub fn into_resource(self) -> Option<M> {
		self.resource
	}

	pub fn model_type() -> ModelType {
		M::MODEL_TYPE
	}
}

impl<M: Model> Default for Repository<M> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<M: Model> From<M> for Repository<M> {
	fn from(model: M) -> Self {
		Self::for_model(model)
	}
}

impl<M: Model> Authorizable for Repository<M> {
	fn subject_context(&self) -> SubjectContext<'_> {
		SubjectContext::Wrapped {
			wrapper: type_name::<Self>(),
			model_type: M::MODEL_TYPE,
			model: self.resource.as_ref().map(|m| m as &dyn AnyModel),
		}
	}
}
