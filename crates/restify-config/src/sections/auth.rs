// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration section.
//!
//! Read by the host's authentication layer, which resolves the principal
//! before authorization runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const DEFAULT_TABLE: &str = "users";

/// Package used to issue personal tokens for the authenticatable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
	#[default]
	Airlock,
	Passport,
}

impl fmt::Display for AuthProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AuthProvider::Airlock => write!(f, "airlock"),
			AuthProvider::Passport => write!(f, "passport"),
		}
	}
}

impl FromStr for AuthProvider {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"airlock" => Ok(AuthProvider::Airlock),
			"passport" => Ok(AuthProvider::Passport),
			other => Err(format!("unknown auth provider '{other}' (expected airlock or passport)")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthConfigLayer {
	pub table: Option<String>,
	pub provider: Option<AuthProvider>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.table.is_some() {
			self.table = other.table;
		}
		if other.provider.is_some() {
			self.provider = other.provider;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			table: self.table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
			provider: self.provider.unwrap_or_default(),
		}
	}
}

/// Resolved authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
	/// Table containing the authenticatable resource.
	pub table: String,
	pub provider: AuthProvider,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			table: DEFAULT_TABLE.to_string(),
			provider: AuthProvider::default(),
		}
	}
}
