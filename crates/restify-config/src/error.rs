// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Config file exists but could not be read
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Config file is not valid TOML for the expected layout
	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A single value could not be interpreted
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// Cross-field validation failed
	#[error("configuration validation failed: {0}")]
	Validation(String),

	/// Tracing subscriber could not be installed
	#[error("failed to initialize logging: {0}")]
	Logging(String),
}
