// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authorization.
//!
//! - [`ModelType`]: name identifying a model type, the key of the policy registry
//! - [`Model`] / [`AnyModel`]: typed and type-erased views of a model instance
//! - [`Ability`]: the named action being authorized
//! - [`Verdict`]: what an ability check answered
//! - [`Target`]: what an ability is checked against (a type or an instance)

use std::any::Any;
use std::fmt;

use restify_config::VerdictSetting;
use serde::{Deserialize, Serialize};

// =============================================================================
// Model types
// =============================================================================

/// Name of a model type, e.g. `"post"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModelType(&'static str);

impl ModelType {
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	pub fn as_str(&self) -> &'static str {
		self.0
	}
}

impl fmt::Display for ModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// A data-bearing entity that policies can be registered for.
pub trait Model: Any + Send + Sync + fmt::Debug {
	/// Registry key for this model's policy.
	///
	/// Must be unique across models. Two models sharing a name share one
	/// policy, and instance handlers written for one deny every instance of
	/// the other.
	const MODEL_TYPE: ModelType;

	/// Primary key, when the instance has one.
	fn key(&self) -> Option<String> {
		None
	}
}

/// Object-safe view of a [`Model`], implemented for every model.
pub trait AnyModel: Send + Sync + fmt::Debug {
	fn model_type(&self) -> ModelType;
	fn primary_key(&self) -> Option<String>;
	fn as_any(&self) -> &dyn Any;
}

impl<M: Model> AnyModel for M {
	fn model_type(&self) -> ModelType {
		M::MODEL_TYPE
	}

	fn primary_key(&self) -> Option<String> {
		Model::key(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

// =============================================================================
// Abilities
// =============================================================================

static BUILTIN_ABILITIES: [Ability; 6] = [
	Ability::ShowAny,
	Ability::ShowEvery,
	Ability::Show,
	Ability::Store,
	Ability::Update,
	Ability::Delete,
];

/// A named permission being checked.
///
/// Serialized as its camelCase name; unknown names become [`Ability::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ability {
	ShowAny,
	ShowEvery,
	Show,
	Store,
	Update,
	Delete,
	Custom(String),
}

impl Ability {
	/// Builds an ability from a name. Built-in names map to their variant.
	pub fn custom(name: impl Into<String>) -> Self {
		Self::from(name.into())
	}

	pub fn as_str(&self) -> &str {
		match self {
			Ability::ShowAny => "showAny",
			Ability::ShowEvery => "showEvery",
			Ability::Show => "show",
			Ability::Store => "store",
			Ability::Update => "update",
			Ability::Delete => "delete",
			Ability::Custom(name) => name,
		}
	}

	/// Collection-level abilities are checked against the model type and fail
	/// open when the policy does not define them.
	pub fn is_collection(&self) -> bool {
		matches!(self, Ability::ShowAny | Ability::ShowEvery)
	}

	/// Returns the six built-in abilities.
	pub fn builtin() -> &'static [Ability] {
		&BUILTIN_ABILITIES
	}
}

impl fmt::Display for Ability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for Ability {
	fn from(name: &str) -> Self {
		match name {
			"showAny" => Ability::ShowAny,
			"showEvery" => Ability::ShowEvery,
			"show" => Ability::Show,
			"store" => Ability::Store,
			"update" => Ability::Update,
			"delete" => Ability::Delete,
			other => Ability::Custom(other.to_string()),
		}
	}
}

impl From<String> for Ability {
	fn from(name: String) -> Self {
		match Ability::from(name.as_str()) {
			Ability::Custom(_) => Ability::Custom(name),
			builtin => builtin,
		}
	}
}

impl From<Ability> for String {
	fn from(ability: Ability) -> Self {
		match ability {
			Ability::Custom(name) => name,
			builtin => builtin.as_str().to_string(),
		}
	}
}

impl From<&Ability> for Ability {
	fn from(ability: &Ability) -> Self {
		ability.clone()
	}
}

// =============================================================================
// Verdicts
// =============================================================================

/// Answer of an ability check.
///
/// `Abstain` stands for a check that produced neither an explicit allow nor an
/// explicit deny. It does not grant access, and it does not raise from the
/// throwing helpers either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
	Allow,
	Deny,
	Abstain,
}

impl Verdict {
	pub fn is_allowed(self) -> bool {
		matches!(self, Verdict::Allow)
	}

	/// True only for an explicit deny.
	pub fn is_denied(self) -> bool {
		matches!(self, Verdict::Deny)
	}
}

impl fmt::Display for Verdict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Verdict::Allow => write!(f, "allow"),
			Verdict::Deny => write!(f, "deny"),
			Verdict::Abstain => write!(f, "abstain"),
		}
	}
}

impl From<bool> for Verdict {
	fn from(allowed: bool) -> Self {
		if allowed {
			Verdict::Allow
		} else {
			Verdict::Deny
		}
	}
}

impl From<Option<bool>> for Verdict {
	fn from(decision: Option<bool>) -> Self {
		decision.map_or(Verdict::Abstain, Verdict::from)
	}
}

impl From<VerdictSetting> for Verdict {
	fn from(setting: VerdictSetting) -> Self {
		match setting {
			VerdictSetting::Allow => Verdict::Allow,
			VerdictSetting::Deny => Verdict::Deny,
			VerdictSetting::Abstain => Verdict::Abstain,
		}
	}
}

// =============================================================================
// Targets
// =============================================================================

/// What an ability is checked against.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
	/// The model type itself, for abilities with no instance (store, showAny).
	Class(ModelType),
	/// A concrete model instance.
	Instance(&'a dyn AnyModel),
}

impl<'a> Target<'a> {
	pub fn model_type(&self) -> ModelType {
		match self {
			Target::Class(model_type) => *model_type,
			Target::Instance(model) => model.model_type(),
		}
	}

	pub fn instance(&self) -> Option<&'a dyn AnyModel> {
		match self {
			Target::Class(_) => None,
			Target::Instance(model) => Some(*model),
		}
	}
}
