// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Routing configuration section: base path, middleware stack and exception handler.
//!
//! Nothing in the authorization crate reads this section. The host router
//! mounts repository endpoints with it.

use serde::{Deserialize, Serialize};

const DEFAULT_BASE: &str = "/restify-api";
const DEFAULT_EXCEPTION_HANDLER: &str = "RestifyHandler";

fn default_middleware() -> Vec<String> {
	vec![
		"api".to_string(),
		"DispatchRestifyStartingEvent".to_string(),
		"AuthorizeRestify".to_string(),
	]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfigLayer {
	pub base: Option<String>,
	pub middleware: Option<Vec<String>>,
	pub exception_handler: Option<String>,
}

impl RoutingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base.is_some() {
			self.base = other.base;
		}
		if other.middleware.is_some() {
			self.middleware = other.middleware;
		}
		if other.exception_handler.is_some() {
			self.exception_handler = other.exception_handler;
		}
	}

	pub fn finalize(self) -> RoutingConfig {
		// An explicitly empty handler disables the override.
		let exception_handler = match self.exception_handler {
			Some(handler) if handler.trim().is_empty() => None,
			Some(handler) => Some(handler),
			None => Some(DEFAULT_EXCEPTION_HANDLER.to_string()),
		};

		RoutingConfig {
			base: self.base.unwrap_or_else(|| DEFAULT_BASE.to_string()),
			middleware: self.middleware.unwrap_or_else(default_middleware),
			exception_handler,
		}
	}
}

/// Resolved routing settings for generated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
	/// Prefix under which every generated endpoint is mounted.
	pub base: String,
	/// Middleware assigned to every generated route, in order.
	pub middleware: Vec<String>,
	/// Handler formatting errors of CRUD routes; `None` leaves the host handler in place.
	pub exception_handler: Option<String>,
}

impl RoutingConfig {
	/// Joins a repository uri key onto the base path.
	pub fn repository_path(&self, uri_key: &str) -> String {
		format!(
			"{}/{}",
			self.base.trim_end_matches('/'),
			uri_key.trim_start_matches('/')
		)
	}
}

impl Default for RoutingConfig {
	fn default() -> Self {
		RoutingConfigLayer::default().finalize()
	}
}
