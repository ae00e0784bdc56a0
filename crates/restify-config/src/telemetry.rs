// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::sections::LoggingConfig;

/// Builds the filter for a logging section. `RUST_LOG` wins when set.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return Ok(filter);
	}

	EnvFilter::try_new(&config.level).map_err(|e| ConfigError::InvalidValue {
		key: "logging.level".to_string(),
		message: e.to_string(),
	})
}

/// Installs the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
	let filter = env_filter(config)?;
	let builder = tracing_subscriber::fmt().with_env_filter(filter);

	let result = if config.json {
		builder.json().try_init()
	} else {
		builder.try_init()
	};

	result.map_err(|e| ConfigError::Logging(e.to_string()))
}
