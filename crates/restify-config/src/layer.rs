// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::{Deserialize, Serialize};

use crate::sections::{
	AuthConfigLayer, AuthorizationConfigLayer, LoggingConfigLayer, RoutingConfigLayer,
};

/// One source's view of the configuration. Missing sections stay `None`
/// and leave lower-precedence values untouched when merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RestifyConfigLayer {
	pub auth: Option<AuthConfigLayer>,
	pub routing: Option<RoutingConfigLayer>,
	pub authorization: Option<AuthorizationConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl RestifyConfigLayer {
	/// Overlays `other` on top of `self`.
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.auth, other.auth, AuthConfigLayer::merge);
		merge_section(&mut self.routing, other.routing, RoutingConfigLayer::merge);
		merge_section(
			&mut self.authorization,
			other.authorization,
			AuthorizationConfigLayer::merge,
		);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, overlay: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), overlay) {
		(Some(existing), Some(overlay)) => merge(existing, overlay),
		(None, Some(overlay)) => *base = Some(overlay),
		(_, None) => {}
	}
}
