// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment-backed settings for reaching the management API.
//!
//! Every key has a hard-coded fallback so the tool works against a local
//! stack out of the box. Setting a key to an empty string is treated as an
//! explicit override and fails validation, naming the offending key.

use tracing::debug;

use crate::error::ConfigError;

const ENV_MANAGEMENT_URL: &str = "AMSEED_MANAGEMENT_URL";
const ENV_ORG_ID: &str = "AMSEED_ORG_ID";
const ENV_ENV_ID: &str = "AMSEED_ENV_ID";
const ENV_ADMIN_USERNAME: &str = "AMSEED_ADMIN_USERNAME";
const ENV_ADMIN_PASSWORD: &str = "AMSEED_ADMIN_PASSWORD";

const DEFAULT_MANAGEMENT_URL: &str = "http://localhost:8093";
const DEFAULT_ORG_ID: &str = "DEFAULT";
const DEFAULT_ENV_ID: &str = "DEFAULT";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "adminadmin";

/// Connection settings for the management API, resolved once at startup
/// and immutable for the run.
#[derive(Debug, Clone)]
pub struct Settings {
	pub management_url: String,
	pub org_id: String,
	pub env_id: String,
	pub admin_username: String,
	pub admin_password: String,
}

impl Settings {
	/// Resolves settings from process environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::resolve(&|key| std::env::var(key).ok())
	}

	/// Resolves settings from an arbitrary lookup function. Exposed so
	/// tests can supply values without mutating process environment.
	pub fn resolve(get: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let settings = Self {
			management_url: value_or(get, ENV_MANAGEMENT_URL, DEFAULT_MANAGEMENT_URL),
			org_id: value_or(get, ENV_ORG_ID, DEFAULT_ORG_ID),
			env_id: value_or(get, ENV_ENV_ID, DEFAULT_ENV_ID),
			admin_username: value_or(get, ENV_ADMIN_USERNAME, DEFAULT_ADMIN_USERNAME),
			admin_password: value_or(get, ENV_ADMIN_PASSWORD, DEFAULT_ADMIN_PASSWORD),
		};
		settings.validate()?;
		debug!(
			management_url = %settings.management_url,
			org_id = %settings.org_id,
			env_id = %settings.env_id,
			"settings resolved"
		);
		Ok(settings)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		let checks: [(&'static str, &str); 5] = [
			(ENV_MANAGEMENT_URL, &self.management_url),
			(ENV_ORG_ID, &self.org_id),
			(ENV_ENV_ID, &self.env_id),
			(ENV_ADMIN_USERNAME, &self.admin_username),
			(ENV_ADMIN_PASSWORD, &self.admin_password),
		];
		for (key, value) in checks {
			if value.is_empty() {
				return Err(ConfigError::MissingSetting(key));
			}
		}
		Ok(())
	}
}

fn value_or(get: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
	get(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> HashMap<String, String> {
		vars.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_defaults_apply_when_unset() {
		let vars = lookup(&[]);
		let settings = Settings::resolve(&|key| vars.get(key).cloned()).unwrap();
		assert_eq!(settings.management_url, "http://localhost:8093");
		assert_eq!(settings.org_id, "DEFAULT");
		assert_eq!(settings.env_id, "DEFAULT");
		assert_eq!(settings.admin_username, "admin");
		assert_eq!(settings.admin_password, "adminadmin");
	}

	#[test]
	fn test_explicit_values_win_over_defaults() {
		let vars = lookup(&[
			("AMSEED_MANAGEMENT_URL", "https://am.example.com"),
			("AMSEED_ORG_ID", "acme"),
		]);
		let settings = Settings::resolve(&|key| vars.get(key).cloned()).unwrap();
		assert_eq!(settings.management_url, "https://am.example.com");
		assert_eq!(settings.org_id, "acme");
		assert_eq!(settings.env_id, "DEFAULT");
	}

	#[test]
	fn test_empty_override_names_the_first_missing_key() {
		let vars = lookup(&[("AMSEED_ORG_ID", ""), ("AMSEED_ENV_ID", "")]);
		let err = Settings::resolve(&|key| vars.get(key).cloned()).unwrap_err();
		match err {
			ConfigError::MissingSetting(key) => assert_eq!(key, "AMSEED_ORG_ID"),
			other => panic!("unexpected error: {other}"),
		}
	}
}
