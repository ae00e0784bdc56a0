// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy-based authorization for generated repository endpoints.
//!
//! Every generated CRUD or custom action asks an [`Authorizer`] whether the
//! current request may perform an [`Ability`] on a model:
//!
//! - [`PolicyRegistry`]: model type → [`Policy`], built once at bootstrap
//! - [`Gate`]: default [`AbilityCheck`] service evaluating policy handlers
//! - [`Authorizer`]: the decider, with boolean (`authorized_to_*`) and
//!   throwing (`authorize_to_*`) helpers per ability
//! - [`RequestContext`]: the principal behind a request
//! - [`Repository`] / [`SubjectContext`]: subject resolution for wrappers and
//!   models
//!
//! Model types without a registered policy are open access.
//!
//! # Usage
//!
//! ```ignore
//! let registry = Arc::new(
//!     PolicyRegistry::builder()
//!         .register(
//!             Policy::for_model::<Post>()
//!                 .instance_ability(Ability::Update, |user: &User, post: &Post| user.id == post.owner_id)
//!                 .build(),
//!         )?
//!         .build(),
//! );
//! let authorizer = Authorizer::from_config(registry, &config.authorization);
//!
//! let request = RequestContext::<User>::from_parts(&parts);
//! authorizer.authorize_to_update(&request, &Repository::for_model(post))?;
//! ```

pub mod context;
pub mod decider;
pub mod error;
pub mod gate;
pub mod meta;
pub mod policy;
pub mod subject;
pub mod types;

pub use context::{extract_request_id, Principal, RequestContext, REQUEST_ID_HEADER};
pub use decider::Authorizer;
pub use error::{AuthzError, Result, DEFAULT_DENIAL_MESSAGE, STORE_DENIAL_MESSAGE};
pub use gate::{AbilityCheck, Gate, GateConfig};
pub use meta::AuthorizationMeta;
pub use policy::{AbilityHandler, Policy, PolicyBuilder, PolicyRegistry, PolicyRegistryBuilder};
pub use subject::{Authorizable, Repository, SubjectContext};
pub use types::{Ability, AnyModel, Model, ModelType, Target, Verdict};
