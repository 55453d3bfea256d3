// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors. All of these are fatal before any remote call
/// is made.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A required setting resolved to an empty value.
	#[error("missing required setting: {0}")]
	MissingSetting(&'static str),

	/// The provisioning config file could not be read.
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The provisioning config file is not valid JSON for [`ProvisionConfig`].
	///
	/// [`ProvisionConfig`]: crate::ProvisionConfig
	#[error("invalid config file {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}
