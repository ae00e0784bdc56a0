// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a `*ConfigLayer` with optional
//! fields that merge by precedence, and a resolved `*Config`.

mod auth;
mod authorization;
mod logging;
mod routing;

pub use auth::{AuthConfig, AuthConfigLayer, AuthProvider};
pub use authorization::{AuthorizationConfig, AuthorizationConfigLayer, VerdictSetting};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use routing::{RoutingConfig, RoutingConfigLayer};
