// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level phase sequencer for one provisioning run.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use amseed_config::ProvisionConfig;
use amseed_mgmt::ManagementApi;

use crate::domain::DomainLifecycleDriver;
use crate::error::{ProvisionError, Result};
use crate::populate::DomainPopulator;
use crate::progress::ProgressReporter;
use crate::purge::count_matching_domains;
use crate::summary::{CreatedSummary, DomainRecord};

/// Fixed delay between domain creation and population, standing in for
/// eventual-consistency propagation to the serving tier. Not a poll.
pub const GRACE_WAIT: Duration = Duration::from_secs(10);

const DOMAIN_DESCRIPTION: &str = "amseed provisioned test domain";

/// Sequences one provisioning run: create domains, grace wait, populate,
/// summarize, optionally verify. Strictly sequential at the phase level;
/// within Phase 3 domains are populated one at a time and only per-domain
/// application creation is pooled. Fail-fast throughout: the first error
/// aborts the run and already-created resources are left behind.
pub struct ProvisioningOrchestrator {
	api: Arc<dyn ManagementApi>,
	config: Arc<ProvisionConfig>,
	reporter: ProgressReporter,
	run_tag: String,
}

impl ProvisioningOrchestrator {
	pub fn new(api: Arc<dyn ManagementApi>, config: ProvisionConfig) -> Self {
		Self {
			api,
			config: Arc::new(config),
			reporter: ProgressReporter::new(),
			run_tag: new_run_tag(),
		}
	}

	/// The tag embedded in every generated name for this run.
	pub fn run_tag(&self) -> &str {
		&self.run_tag
	}

	#[instrument(skip(self), fields(run_tag = %self.run_tag))]
	pub async fn run(&self, verify: bool) -> Result<CreatedSummary> {
		self.reporter.banner(&format!(
			"provisioning {} domain(s) with prefix {:?}",
			self.config.domains,
			self.config.prefix()
		));

		let domains = self.create_domains().await?;
		self.grace_wait().await;
		let summary = self.populate_domains(domains).await?;

		self.reporter.report(&summary.render());

		if verify {
			self.verify().await?;
		}
		Ok(summary)
	}

	/// Phase 1: create and start domains, sequentially and fail-fast.
	/// Domains created by earlier iterations of a failed run are left
	/// behind; there is no rollback.
	async fn create_domains(&self) -> Result<Vec<DomainRecord>> {
		let driver = DomainLifecycleDriver::new(self.api.as_ref());
		let mut records = Vec::with_capacity(self.config.domains as usize);
		for ordinal in 1..=self.config.domains {
			let name = format!(
				"{}-domain-{}-{ordinal}",
				self.config.prefix(),
				self.run_tag
			);
			let task = self.reporter.start(&format!("creating domain {name}"));
			match driver
				.create_and_start(&name, DOMAIN_DESCRIPTION, ordinal)
				.await
			{
				Ok(record) => {
					task.finish(&format!("domain {name} ready"));
					records.push(record);
				}
				Err(err) => {
					task.fail(&format!("domain {name} failed"));
					return Err(err);
				}
			}
		}
		Ok(records)
	}

	/// Phase 2: unconditional fixed delay.
	async fn grace_wait(&self) {
		info!(secs = GRACE_WAIT.as_secs(), "waiting for domain propagation");
		tokio::time::sleep(GRACE_WAIT).await;
	}

	/// Phase 3: populate each domain, one at a time.
	async fn populate_domains(&self, domains: Vec<DomainRecord>) -> Result<CreatedSummary> {
		let populator = DomainPopulator::new(
			Arc::clone(&self.api),
			Arc::clone(&self.config),
			self.run_tag.clone(),
		);
		let mut summary = CreatedSummary::default();
		for domain in domains {
			let task = self
				.reporter
				.start(&format!("populating domain {}", domain.name));
			match populator.populate(&domain).await {
				Ok(entry) => {
					task.finish(&format!("domain {} populated", domain.name));
					summary.domains.push(entry);
				}
				Err(err) => {
					task.fail(&format!("populating domain {} failed", domain.name));
					return Err(err);
				}
			}
		}
		Ok(summary)
	}

	/// Phase 5 (optional): paginate the domain listing and require at
	/// least the configured number of prefix matches.
	async fn verify(&self) -> Result<()> {
		let prefix = self.config.prefix();
		let task = self
			.reporter
			.start(&format!("verifying domains with prefix {prefix:?}"));
		let found = count_matching_domains(self.api.as_ref(), prefix).await?;
		if found < u64::from(self.config.domains) {
			task.fail("verification failed");
			return Err(ProvisionError::IncompleteProvision {
				prefix: prefix.to_string(),
				expected: self.config.domains,
				found,
			});
		}
		task.finish(&format!("{found} matching domain(s) present"));
		Ok(())
	}
}

fn new_run_tag() -> String {
	format!("{:08x}", fastrand::u32(..))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn run_tags_are_short_hex() {
		let tag = new_run_tag();
		assert_eq!(tag.len(), 8);
		assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
	}
}
