// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The JSON provisioning config file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Name prefix used when the config file does not set one.
pub const DEFAULT_NAME_PREFIX: &str = "amseed";

/// How OAuth grant types are chosen for each created application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrantMode {
	/// Random sample per application, always including
	/// `authorization_code` and `refresh_token`.
	#[default]
	Random,
	/// Exactly `authorization_code` and `refresh_token`.
	CodeOnly,
	/// The full grant-type catalog.
	All,
}

/// One provisioning run, as described by the JSON file passed on the
/// command line. Loaded once and immutable for the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionConfig {
	/// Prefix for every generated domain/application/user name.
	#[serde(default)]
	pub name_prefix: Option<String>,

	/// Number of security domains to create.
	#[serde(default)]
	pub domains: u32,

	/// Applications created inside each domain.
	#[serde(default)]
	pub applications_per_domain: u32,

	/// Users created inside each domain.
	#[serde(default)]
	pub users_per_domain: u32,

	/// Identity provider kind: `"default"` keeps the domain default,
	/// `"mongo"` creates a Mongo-backed IDP. Anything else is reported
	/// and skipped.
	#[serde(default = "default_idp")]
	pub idp: String,

	#[serde(default)]
	pub grant_types: GrantMode,

	/// Feature switches requested for the environment. Currently reported
	/// and skipped, never provisioned.
	#[serde(default)]
	pub features: Vec<String>,

	/// OAuth scopes attached to every created application.
	#[serde(default)]
	pub scopes: Vec<String>,
}

fn default_idp() -> String {
	"default".to_string()
}

impl ProvisionConfig {
	/// Loads and parses the config file at `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// The effective name prefix for this run.
	pub fn prefix(&self) -> &str {
		self.name_prefix.as_deref().unwrap_or(DEFAULT_NAME_PREFIX)
	}
}
