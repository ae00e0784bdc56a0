// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::RestifyConfigLayer;
use crate::sections::{
	AuthConfigLayer, AuthProvider, AuthorizationConfigLayer, LoggingConfigLayer, RoutingConfigLayer,
	VerdictSetting,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<RestifyConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<RestifyConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(RestifyConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/restify/restify.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<RestifyConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(RestifyConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: RestifyConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: RESTIFY_<SECTION>_<FIELD>. Reads the process environment
/// unless constructed with [`EnvSource::from_vars`].
#[derive(Default)]
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses a fixed set of variables instead of the process environment.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: FromStr<Err = String>,
	{
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|message| ConfigError::InvalidValue {
				key: name.to_string(),
				message,
			}),
			None => Ok(None),
		}
	}

	fn list(&self, name: &str) -> Option<Vec<String>> {
		self.var(name).map(|v| {
			v.split(',')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(str::to_string)
				.collect()
		})
	}

	fn load_auth(&self) -> Result<AuthConfigLayer, ConfigError> {
		Ok(AuthConfigLayer {
			table: self.var("RESTIFY_AUTH_TABLE"),
			provider: self.parsed::<AuthProvider>("RESTIFY_AUTH_PROVIDER")?,
		})
	}

	fn load_routing(&self) -> RoutingConfigLayer {
		RoutingConfigLayer {
			base: self.var("RESTIFY_BASE"),
			middleware: self.list("RESTIFY_MIDDLEWARE"),
			exception_handler: self.var("RESTIFY_EXCEPTION_HANDLER"),
		}
	}

	fn load_authorization(&self) -> Result<AuthorizationConfigLayer, ConfigError> {
		Ok(AuthorizationConfigLayer {
			guest_verdict: self.parsed::<VerdictSetting>("RESTIFY_AUTHZ_GUEST_VERDICT")?,
			missing_ability_verdict: self
				.parsed::<VerdictSetting>("RESTIFY_AUTHZ_MISSING_ABILITY_VERDICT")?,
			log_decisions: self.bool("RESTIFY_AUTHZ_LOG_DECISIONS"),
		})
	}

	fn load_logging(&self) -> LoggingConfigLayer {
		LoggingConfigLayer {
			level: self.var("RESTIFY_LOG_LEVEL"),
			json: self.bool("RESTIFY_LOG_JSON"),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<RestifyConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(RestifyConfigLayer {
			auth: Some(self.load_auth()?),
			routing: Some(self.load_routing()),
			authorization: Some(self.load_authorization()?),
			logging: Some(self.load_logging()),
		})
	}
}
