// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! amseed binary: provision test environments from a config file, or
//! purge previously provisioned domains by name prefix.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use amseed_config::{ProvisionConfig, Settings};
use amseed_mgmt::{request_admin_access_token, HttpManagementClient, ManagementApi};
use amseed_provision::{ProvisioningOrchestrator, PurgeSweeper};

/// Bulk test-environment provisioning for the access management platform.
#[derive(Parser, Debug)]
#[command(
	name = "amseed",
	about = "Provision or purge bulk test environments",
	version
)]
struct Args {
	/// Path to a JSON provisioning config file
	#[arg(conflicts_with = "purge")]
	config: Option<PathBuf>,

	/// Delete every domain whose name starts with --prefix
	#[arg(long, requires = "prefix")]
	purge: bool,

	/// Name prefix used by --purge
	#[arg(long)]
	prefix: Option<String>,

	/// Re-scan the domain listing after the run and fail on a mismatch
	#[arg(long)]
	verify: bool,
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run(Args::parse()).await {
		eprintln!("error: {err:#}");
		std::process::exit(1);
	}
}

/// A fully resolved invocation. Built before any remote call is made.
#[derive(Debug)]
enum Invocation {
	Provision(ProvisionConfig),
	Purge(String),
}

impl Invocation {
	/// Resolves the run mode and loads the provisioning config. A missing
	/// or unparseable config file is fatal here, with no network traffic.
	/// clap already rejects `--purge` without `--prefix` and a config path
	/// combined with `--purge`; anything else falls through to the usage
	/// error.
	fn resolve(config: Option<PathBuf>, purge: bool, prefix: Option<String>) -> Result<Self> {
		match (config, purge, prefix) {
			(None, true, Some(prefix)) => Ok(Self::Purge(prefix)),
			(Some(path), false, _) => Ok(Self::Provision(ProvisionConfig::load(&path)?)),
			_ => bail!("expected a provisioning config file path (or --purge --prefix <p>)"),
		}
	}
}

async fn run(args: Args) -> Result<()> {
	// Settings and config-file validation happen before any remote call
	// is attempted.
	let settings = Settings::from_env()?;
	let invocation = Invocation::resolve(args.config, args.purge, args.prefix)?;

	let token = request_admin_access_token(&settings)
		.await
		.context("failed to obtain admin access token")?;
	let api: Arc<dyn ManagementApi> = Arc::new(HttpManagementClient::new(&settings, token)?);

	match invocation {
		Invocation::Purge(prefix) => {
			let sweeper = PurgeSweeper::new(api);
			let deleted = sweeper.purge(&prefix, args.verify).await?;
			info!(deleted, "purge complete");
		}
		Invocation::Provision(config) => {
			let orchestrator = ProvisioningOrchestrator::new(api, config);
			let summary = orchestrator.run(args.verify).await?;
			info!(
				domains = summary.domains.len(),
				applications = summary.total_applications(),
				users = summary.total_users(),
				"provisioning complete"
			);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_provision_invocation() {
		let args = Args::parse_from(["amseed", "run.json", "--verify"]);
		assert_eq!(args.config, Some(PathBuf::from("run.json")));
		assert!(!args.purge);
		assert!(args.verify);
	}

	#[test]
	fn parses_purge_invocation() {
		let args = Args::parse_from(["amseed", "--purge", "--prefix", "seed"]);
		assert!(args.purge);
		assert_eq!(args.prefix.as_deref(), Some("seed"));
		assert!(!args.verify);
	}

	#[test]
	fn purge_requires_prefix() {
		assert!(Args::try_parse_from(["amseed", "--purge"]).is_err());
	}

	#[test]
	fn purge_conflicts_with_config_path() {
		assert!(Args::try_parse_from([
			"amseed",
			"run.json",
			"--purge",
			"--prefix",
			"seed"
		])
		.is_err());
	}

	#[test]
	fn missing_config_file_fails_during_resolution() {
		// Config problems surface from `resolve`, which runs before the
		// token request or client construction.
		let err = Invocation::resolve(Some(PathBuf::from("/nonexistent/run.json")), false, None)
			.unwrap_err();
		assert!(err.downcast_ref::<amseed_config::ConfigError>().is_some());
	}

	#[test]
	fn invalid_config_json_fails_during_resolution() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("run.json");
		std::fs::write(&path, "{not json").unwrap();

		let err = Invocation::resolve(Some(path), false, None).unwrap_err();
		assert!(err.downcast_ref::<amseed_config::ConfigError>().is_some());
	}

	#[test]
	fn no_arguments_is_a_usage_error() {
		assert!(Invocation::resolve(None, false, None).is_err());
	}

	#[test]
	fn purge_resolution_carries_the_prefix() {
		match Invocation::resolve(None, true, Some("seed".to_string())).unwrap() {
			Invocation::Purge(prefix) => assert_eq!(prefix, "seed"),
			Invocation::Provision(_) => panic!("expected a purge invocation"),
		}
	}
}
