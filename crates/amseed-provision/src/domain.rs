// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Create-enable-verify lifecycle for one domain.

use tracing::debug;

use amseed_mgmt::ManagementApi;

use crate::error::{ProvisionError, Result};
use crate::summary::DomainRecord;

/// Drives one domain from creation to verified-enabled.
///
/// Every remote call is attempted exactly once; remote failures propagate
/// unmodified. A domain that does not report `enabled` after the start
/// patch is a fatal error for the whole run.
pub struct DomainLifecycleDriver<'a> {
	api: &'a dyn ManagementApi,
}

impl<'a> DomainLifecycleDriver<'a> {
	pub fn new(api: &'a dyn ManagementApi) -> Self {
		Self { api }
	}

	/// Creates a domain (the platform creates it disabled), enables it,
	/// then re-fetches and asserts the enabled flag stuck.
	pub async fn create_and_start(
		&self,
		name: &str,
		description: &str,
		ordinal: u32,
	) -> Result<DomainRecord> {
		let created = self.api.create_domain(name, description).await?;
		debug!(name, id = %created.id, "domain created, enabling");

		self.api.set_domain_enabled(&created.id, true).await?;

		let current = self.api.get_domain(&created.id).await?;
		if !current.enabled {
			return Err(ProvisionError::DomainNotEnabled {
				name: name.to_string(),
				id: created.id,
			});
		}
		debug!(name, id = %current.id, "domain verified enabled");

		Ok(DomainRecord {
			id: current.id,
			name: current.name,
			ordinal,
		})
	}
}
