// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`ManagementApi`] stub with call recording.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use amseed_mgmt::{
	Application, BulkUserRequest, Domain, IdentityProvider, ManagementApi, NewApplication,
	Result,
};

pub fn domain(id: &str, name: &str, enabled: bool) -> Domain {
	Domain {
		id: id.to_string(),
		name: name.to_string(),
		enabled,
		description: None,
	}
}

#[derive(Default)]
pub struct MockApi {
	pub created_domains: Mutex<Vec<Domain>>,
	pub enable_calls: Mutex<Vec<(String, bool)>>,
	/// When set, `get_domain` reports the domain as still disabled.
	pub report_disabled: AtomicBool,
	pub created_apps: Mutex<Vec<(String, NewApplication)>>,
	pub attached_idps: Mutex<Vec<(String, String, String)>>,
	pub bulk_batches: Mutex<Vec<(String, BulkUserRequest)>>,
	pub idp_calls: AtomicUsize,
	pub deleted: Mutex<Vec<String>>,
	/// Scripted pages consumed by `list_domains`, one per call; an
	/// exhausted queue yields empty pages.
	pub pages: Mutex<VecDeque<Vec<Domain>>>,
	pub list_calls: AtomicUsize,
	counter: AtomicUsize,
}

impl MockApi {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_page(&self, page: Vec<Domain>) {
		self.pages.lock().unwrap().push_back(page);
	}

	fn next_id(&self, kind: &str) -> String {
		let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
		format!("{kind}-{n}")
	}
}

#[async_trait::async_trait]
impl ManagementApi for MockApi {
	async fn create_domain(&self, name: &str, _description: &str) -> Result<Domain> {
		let created = domain(&self.next_id("dom"), name, false);
		self.created_domains.lock().unwrap().push(created.clone());
		Ok(created)
	}

	async fn set_domain_enabled(&self, id: &str, enabled: bool) -> Result<Domain> {
		self.enable_calls
			.lock()
			.unwrap()
			.push((id.to_string(), enabled));
		Ok(domain(id, "patched", enabled))
	}

	async fn get_domain(&self, id: &str) -> Result<Domain> {
		let name = self
			.created_domains
			.lock()
			.unwrap()
			.iter()
			.find(|d| d.id == id)
			.map(|d| d.name.clone())
			.unwrap_or_else(|| "unknown".to_string());
		Ok(domain(id, &name, !self.report_disabled.load(Ordering::SeqCst)))
	}

	async fn list_domains(&self, _page: u32, _size: u32) -> Result<Vec<Domain>> {
		self.list_calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
	}

	async fn delete_domain(&self, id: &str) -> Result<()> {
		self.deleted.lock().unwrap().push(id.to_string());
		Ok(())
	}

	async fn create_application(
		&self,
		domain_id: &str,
		application: &NewApplication,
	) -> Result<Application> {
		let id = self.next_id("app");
		self.created_apps
			.lock()
			.unwrap()
			.push((domain_id.to_string(), application.clone()));
		Ok(Application {
			id,
			name: application.name.clone(),
		})
	}

	async fn attach_application_idp(
		&self,
		domain_id: &str,
		application_id: &str,
		idp_id: &str,
	) -> Result<()> {
		self.attached_idps.lock().unwrap().push((
			domain_id.to_string(),
			application_id.to_string(),
			idp_id.to_string(),
		));
		Ok(())
	}

	async fn bulk_create_users(&self, domain_id: &str, request: &BulkUserRequest) -> Result<()> {
		self.bulk_batches
			.lock()
			.unwrap()
			.push((domain_id.to_string(), request.clone()));
		Ok(())
	}

	async fn create_mongo_idp(&self, domain_id: &str) -> Result<IdentityProvider> {
		self.idp_calls.fetch_add(1, Ordering::SeqCst);
		let _ = domain_id;
		Ok(IdentityProvider {
			id: "idp-1".to_string(),
			name: Some("amseed-mongo-idp".to_string()),
		})
	}
}
