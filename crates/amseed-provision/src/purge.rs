// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Prefix-filtered sweep deletion of previously provisioned domains.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use amseed_mgmt::ManagementApi;

use crate::error::{ProvisionError, Result};
use crate::progress::ProgressReporter;
use crate::PAGE_SIZE;

/// Deletes every domain whose name starts with a prefix, page by page.
pub struct PurgeSweeper {
	api: Arc<dyn ManagementApi>,
	reporter: ProgressReporter,
}

impl PurgeSweeper {
	pub fn new(api: Arc<dyn ManagementApi>) -> Self {
		Self {
			api,
			reporter: ProgressReporter::new(),
		}
	}

	/// Sweeps the domain listing and deletes prefix matches
	/// (case-sensitive), returning the number of deletions.
	///
	/// The page cursor advances while deletions shrink the server-side
	/// listing, so on a live system some domains can be skipped or
	/// double-visited; a second pass (or `verify`) catches stragglers.
	#[instrument(skip(self))]
	pub async fn purge(&self, prefix: &str, verify: bool) -> Result<u64> {
		let task = self
			.reporter
			.start(&format!("purging domains with prefix {prefix:?}"));

		let mut deleted: u64 = 0;
		let mut page: u32 = 0;
		loop {
			let batch = self.api.list_domains(page, PAGE_SIZE).await?;
			if batch.is_empty() {
				break;
			}
			let last_page = (batch.len() as u32) < PAGE_SIZE;
			for domain in &batch {
				if domain.name.starts_with(prefix) {
					self.api.delete_domain(&domain.id).await?;
					deleted += 1;
					debug!(name = %domain.name, id = %domain.id, "domain deleted");
				}
			}
			if last_page {
				break;
			}
			page += 1;
		}

		info!(prefix, deleted, "purge sweep complete");

		if verify {
			let remaining = count_matching_domains(self.api.as_ref(), prefix).await?;
			if remaining > 0 {
				task.fail(&format!("{remaining} domain(s) still present"));
				return Err(ProvisionError::PurgeResidue {
					prefix: prefix.to_string(),
					remaining,
				});
			}
		}

		task.finish(&format!("deleted {deleted} domain(s)"));
		Ok(deleted)
	}
}

/// Counts domains whose name starts with `prefix`, scanning the listing
/// with the same pagination scheme as the sweep.
pub(crate) async fn count_matching_domains(
	api: &dyn ManagementApi,
	prefix: &str,
) -> Result<u64> {
	let mut found: u64 = 0;
	let mut page: u32 = 0;
	loop {
		let batch = api.list_domains(page, PAGE_SIZE).await?;
		if batch.is_empty() {
			break;
		}
		found += batch
			.iter()
			.filter(|domain| domain.name.starts_with(prefix))
			.count() as u64;
		if (batch.len() as u32) < PAGE_SIZE {
			break;
		}
		page += 1;
	}
	Ok(found)
}
