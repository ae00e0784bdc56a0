// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for Restify.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`RESTIFY_*`)
//! - Tracing subscriber setup driven by the `logging` section
//!
//! # Usage
//!
//! ```ignore
//! use restify_config::load_config;
//!
//! let config = load_config()?;
//! restify_config::init_tracing(&config.logging)?;
//! println!("Repositories mounted under {}", config.routing.base);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;
pub mod telemetry;

pub use error::ConfigError;
pub use layer::RestifyConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};
pub use telemetry::init_tracing;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestifyConfig {
	pub auth: AuthConfig,
	pub routing: RoutingConfig,
	pub authorization: AuthorizationConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`RESTIFY_*`)
/// 2. Config file (`/etc/restify/restify.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<RestifyConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource::new()),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<RestifyConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	])
}

/// Merge the given sources by precedence and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<RestifyConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = RestifyConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: RestifyConfigLayer) -> Result<RestifyConfig, ConfigError> {
	let auth = layer.auth.unwrap_or_default().finalize();
	let routing = layer.routing.unwrap_or_default().finalize();
	let authorization = layer.authorization.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&routing)?;

	info!(
		base = %routing.base,
		auth_table = %auth.table,
		auth_provider = %auth.provider,
		guest_verdict = %authorization.guest_verdict,
		missing_ability_verdict = %authorization.missing_ability_verdict,
		"Restify configuration loaded"
	);

	Ok(RestifyConfig {
		auth,
		routing,
		authorization,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(routing: &RoutingConfig) -> Result<(), ConfigError> {
	if !routing.base.starts_with('/') {
		return Err(ConfigError::Validation(format!(
			"routing base '{}' must start with '/'",
			routing.base
		)));
	}

	Ok(())
}
