// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::Result;
use crate::types::{Application, BulkUserRequest, Domain, IdentityProvider, NewApplication};

/// The management API surface this tool consumes.
///
/// The real implementation is [`HttpManagementClient`]; tests substitute
/// in-memory mocks. Every method maps to exactly one remote call.
///
/// [`HttpManagementClient`]: crate::HttpManagementClient
#[async_trait::async_trait]
pub trait ManagementApi: Send + Sync {
	/// Creates a domain. The platform creates domains disabled.
	async fn create_domain(&self, name: &str, description: &str) -> Result<Domain>;

	/// Patches the domain's enabled flag.
	async fn set_domain_enabled(&self, id: &str, enabled: bool) -> Result<Domain>;

	/// Fetches the current state of a domain.
	async fn get_domain(&self, id: &str) -> Result<Domain>;

	/// Returns one page of the domain listing.
	async fn list_domains(&self, page: u32, size: u32) -> Result<Vec<Domain>>;

	/// Deletes a domain.
	async fn delete_domain(&self, id: &str) -> Result<()>;

	/// Creates an application inside a domain.
	async fn create_application(
		&self,
		domain_id: &str,
		application: &NewApplication,
	) -> Result<Application>;

	/// Attaches an identity provider to an application with priority 0
	/// and an empty selection rule.
	async fn attach_application_idp(
		&self,
		domain_id: &str,
		application_id: &str,
		idp_id: &str,
	) -> Result<()>;

	/// Submits one bulk user-create batch. Success means the batch was
	/// accepted, not that every item succeeded.
	async fn bulk_create_users(&self, domain_id: &str, request: &BulkUserRequest) -> Result<()>;

	/// Creates a Mongo-backed identity provider inside a domain.
	async fn create_mongo_idp(&self, domain_id: &str) -> Result<IdentityProvider>;
}
