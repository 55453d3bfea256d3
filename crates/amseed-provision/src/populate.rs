// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-domain population: identity provider, applications, users.

use std::sync::Arc;

use tracing::{debug, info, warn};

use amseed_config::ProvisionConfig;
use amseed_mgmt::{BulkAction, BulkUserRequest, ManagementApi, NewApplication, NewUser};
use amseed_pool::{run_pool, ErrorPolicy};

use crate::error::{ProvisionError, Result};
use crate::grants;
use crate::summary::{ApplicationRecord, DomainRecord, DomainSummary};

/// At most this many application creations in flight per domain.
const APP_POOL_LIMIT: usize = 5;

/// Users per bulk-create batch.
const USER_BATCH_SIZE: usize = 200;

/// Fixed client secret for every created application.
const CLIENT_SECRET: &str = "test";

/// Fixed password for every created user.
const USER_PASSWORD: &str = "Test1234!";

/// Feature switches the platform knows about but this tool cannot
/// provision without extra configuration.
const KNOWN_FEATURES: [&str; 3] = ["mfa", "ciba", "ratelimit"];

const FIRST_NAMES: [&str; 8] = [
	"Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Radia", "Niklaus",
];
const LAST_NAMES: [&str; 8] = [
	"Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Perlman", "Wirth",
];

/// Populates one already-started domain with an IDP, applications, and
/// users, per the run config.
pub struct DomainPopulator {
	api: Arc<dyn ManagementApi>,
	config: Arc<ProvisionConfig>,
	run_tag: String,
}

impl DomainPopulator {
	pub fn new(api: Arc<dyn ManagementApi>, config: Arc<ProvisionConfig>, run_tag: String) -> Self {
		Self {
			api,
			config,
			run_tag,
		}
	}

	pub async fn populate(&self, domain: &DomainRecord) -> Result<DomainSummary> {
		self.report_features();

		let idp = self.create_idp(domain).await?;
		let applications = self.create_applications(domain, idp.as_deref()).await?;
		let users = self.create_users(domain, idp.as_deref()).await?;

		info!(
			domain = %domain.name,
			applications = applications.len(),
			users,
			idp = idp.as_deref().unwrap_or("default"),
			"domain populated"
		);

		Ok(DomainSummary {
			domain: domain.clone(),
			applications,
			users,
			idp,
		})
	}

	/// Creates the configured identity provider, if any. Unknown kinds are
	/// reported and skipped; the domain keeps its default IDP.
	async fn create_idp(&self, domain: &DomainRecord) -> Result<Option<String>> {
		match self.config.idp.as_str() {
			"default" => Ok(None),
			"mongo" => {
				let idp = self.api.create_mongo_idp(&domain.id).await?;
				debug!(domain = %domain.name, idp = %idp.id, "mongo idp created");
				Ok(Some(idp.id))
			}
			other => {
				warn!(idp = %other, "unsupported identity provider kind, keeping domain default");
				Ok(None)
			}
		}
	}

	/// Creates applications through the bounded pool. Names are
	/// deterministic (`{prefix}app{domain_ordinal}{app_index}`) and double
	/// as the OAuth client id.
	async fn create_applications(
		&self,
		domain: &DomainRecord,
		idp_id: Option<&str>,
	) -> Result<Vec<ApplicationRecord>> {
		let total = self.config.applications_per_domain as usize;
		if total == 0 {
			return Ok(Vec::new());
		}

		let api = Arc::clone(&self.api);
		let prefix = self.config.prefix().to_string();
		let mode = self.config.grant_types;
		let scopes = self.config.scopes.clone();
		let ordinal = domain.ordinal;
		let domain_id = domain.id.clone();
		let idp_id = idp_id.map(str::to_string);

		let items: Vec<u32> = (1..=self.config.applications_per_domain).collect();
		let limit = APP_POOL_LIMIT.min(total);
		debug!(domain = %domain.name, total, limit, "creating applications");

		let worker = move |app_number: u32, _index: usize| {
			let api = Arc::clone(&api);
			let domain_id = domain_id.clone();
			let idp_id = idp_id.clone();
			let scopes = scopes.clone();
			let name = format!("{prefix}app{ordinal}{app_number}");
			async move {
				let request = NewApplication {
					name: name.clone(),
					application_type: "WEB".to_string(),
					client_id: name.clone(),
					client_secret: CLIENT_SECRET.to_string(),
					redirect_uris: vec![format!("https://{name}.app.example.com/callback")],
					grant_types: grants::to_wire(&grants::select(mode)),
					response_types: vec!["code".to_string()],
					token_endpoint_auth_method: "client_secret_basic".to_string(),
					scopes,
				};
				let created = api.create_application(&domain_id, &request).await?;
				if let Some(idp) = idp_id.as_deref() {
					api.attach_application_idp(&domain_id, &created.id, idp).await?;
				}
				Ok::<_, ProvisionError>(ApplicationRecord {
					id: created.id,
					client_id: name.clone(),
					name,
				})
			}
		};

		run_pool(items, limit, ErrorPolicy::Detach, worker).await
	}

	/// Synthesizes all user records up front and submits them in strictly
	/// sequential bulk batches. `fail_on_errors = 0`: the acceptance
	/// criterion is "batch accepted", not "every item succeeded".
	async fn create_users(&self, domain: &DomainRecord, idp_id: Option<&str>) -> Result<u32> {
		let total = self.config.users_per_domain;
		if total == 0 {
			return Ok(0);
		}

		let prefix = self.config.prefix();
		let users: Vec<NewUser> = (1..=total)
			.map(|user_index| {
				let username = format!(
					"{prefix}-user-{}-{}-{user_index}",
					self.run_tag, domain.ordinal
				);
				NewUser {
					email: format!("{username}@example.com"),
					username,
					first_name: FIRST_NAMES[fastrand::usize(..FIRST_NAMES.len())].to_string(),
					last_name: LAST_NAMES[fastrand::usize(..LAST_NAMES.len())].to_string(),
					password: USER_PASSWORD.to_string(),
					pre_registration: false,
					registration_completed: true,
					source: idp_id.map(str::to_string),
				}
			})
			.collect();

		let batch_size = USER_BATCH_SIZE.min(total as usize);
		debug!(domain = %domain.name, total, batch_size, "creating users in batches");
		for chunk in users.chunks(batch_size) {
			let request = BulkUserRequest {
				action: BulkAction::Create,
				fail_on_errors: 0,
				items: chunk.to_vec(),
			};
			self.api.bulk_create_users(&domain.id, &request).await?;
		}

		Ok(total)
	}

	/// Feature switches are reported, never provisioned.
	fn report_features(&self) {
		for feature in &self.config.features {
			if KNOWN_FEATURES.contains(&feature.as_str()) {
				warn!(feature = %feature, "feature requires additional configuration, skipped");
			} else {
				warn!(feature = %feature, "unsupported feature, skipped");
			}
		}
	}
}
