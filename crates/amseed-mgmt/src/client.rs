// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! reqwest-backed implementation of [`ManagementApi`].

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use amseed_config::Settings;

use crate::api::ManagementApi;
use crate::error::{MgmtError, Result};
use crate::types::{
	Application, BulkUserRequest, Domain, DomainPage, IdentityProvider, IdpAttachment,
	NewApplication,
};

const USER_AGENT: &str = concat!("amseed/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the management API. Carries an admin bearer token
/// assumed valid for the whole run; there is no refresh logic here.
pub struct HttpManagementClient {
	http: Client,
	base_url: String,
	org_id: String,
	env_id: String,
	token: String,
}

impl HttpManagementClient {
	pub fn new(settings: &Settings, token: String) -> Result<Self> {
		let http = Client::builder().user_agent(USER_AGENT).build()?;
		Ok(Self {
			http,
			base_url: settings.management_url.trim_end_matches('/').to_string(),
			org_id: settings.org_id.clone(),
			env_id: settings.env_id.clone(),
			token,
		})
	}

	fn domains_url(&self) -> String {
		format!(
			"{}/management/organizations/{}/environments/{}/domains",
			self.base_url, self.org_id, self.env_id
		)
	}

	fn domain_url(&self, id: &str) -> String {
		format!("{}/{}", self.domains_url(), id)
	}

	/// Maps a non-success response to [`MgmtError::Api`] with the body
	/// preserved for diagnostics.
	async fn check(response: Response) -> Result<Response> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let body = response.text().await.unwrap_or_default();
		Err(MgmtError::Api {
			status: status.as_u16(),
			body,
		})
	}
}

#[async_trait::async_trait]
impl ManagementApi for HttpManagementClient {
	async fn create_domain(&self, name: &str, description: &str) -> Result<Domain> {
		debug!(name, "creating domain");
		let response = self
			.http
			.post(self.domains_url())
			.bearer_auth(&self.token)
			.json(&serde_json::json!({ "name": name, "description": description }))
			.send()
			.await?;
		Ok(Self::check(response).await?.json().await?)
	}

	async fn set_domain_enabled(&self, id: &str, enabled: bool) -> Result<Domain> {
		debug!(id, enabled, "patching domain enabled flag");
		let response = self
			.http
			.patch(self.domain_url(id))
			.bearer_auth(&self.token)
			.json(&serde_json::json!({ "enabled": enabled }))
			.send()
			.await?;
		Ok(Self::check(response).await?.json().await?)
	}

	async fn get_domain(&self, id: &str) -> Result<Domain> {
		let response = self
			.http
			.get(self.domain_url(id))
			.bearer_auth(&self.token)
			.send()
			.await?;
		Ok(Self::check(response).await?.json().await?)
	}

	async fn list_domains(&self, page: u32, size: u32) -> Result<Vec<Domain>> {
		let response = self
			.http
			.get(self.domains_url())
			.bearer_auth(&self.token)
			.query(&[("page", page), ("size", size)])
			.send()
			.await?;
		let body: DomainPage = Self::check(response).await?.json().await?;
		Ok(body.data)
	}

	async fn delete_domain(&self, id: &str) -> Result<()> {
		debug!(id, "deleting domain");
		let response = self
			.http
			.delete(self.domain_url(id))
			.bearer_auth(&self.token)
			.send()
			.await?;
		Self::check(response).await?;
		Ok(())
	}

	async fn create_application(
		&self,
		domain_id: &str,
		application: &NewApplication,
	) -> Result<Application> {
		debug!(domain_id, name = %application.name, "creating application");
		let response = self
			.http
			.post(format!("{}/applications", self.domain_url(domain_id)))
			.bearer_auth(&self.token)
			.json(application)
			.send()
			.await?;
		Ok(Self::check(response).await?.json().await?)
	}

	async fn attach_application_idp(
		&self,
		domain_id: &str,
		application_id: &str,
		idp_id: &str,
	) -> Result<()> {
		let response = self
			.http
			.patch(format!(
				"{}/applications/{}",
				self.domain_url(domain_id),
				application_id
			))
			.bearer_auth(&self.token)
			.json(&serde_json::json!({
				"identityProviders": [IdpAttachment::new(idp_id)]
			}))
			.send()
			.await?;
		Self::check(response).await?;
		Ok(())
	}

	async fn bulk_create_users(&self, domain_id: &str, request: &BulkUserRequest) -> Result<()> {
		debug!(domain_id, items = request.items.len(), "submitting user bulk batch");
		let response = self
			.http
			.post(format!("{}/users/bulk", self.domain_url(domain_id)))
			.bearer_auth(&self.token)
			.json(request)
			.send()
			.await?;
		Self::check(response).await?;
		Ok(())
	}

	async fn create_mongo_idp(&self, domain_id: &str) -> Result<IdentityProvider> {
		debug!(domain_id, "creating mongo identity provider");
		let configuration = serde_json::json!({
			"uri": "mongodb://localhost:27017",
			"host": "localhost",
			"port": 27017,
			"enableCredentials": false,
			"database": "amseed-users",
			"usersCollection": "users",
			"findUserByUsernameQuery": "{username: ?}",
			"passwordEncoder": "BCrypt"
		});
		let response = self
			.http
			.post(format!("{}/identities", self.domain_url(domain_id)))
			.bearer_auth(&self.token)
			.json(&serde_json::json!({
				"name": "amseed-mongo-idp",
				"type": "mongo-am-idp",
				"configuration": configuration.to_string(),
				"external": false
			}))
			.send()
			.await?;
		Ok(Self::check(response).await?.json().await?)
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
}

/// Requests an admin access token with HTTP basic credentials. The token
/// is assumed valid for the whole run.
pub async fn request_admin_access_token(settings: &Settings) -> Result<String> {
	let http = Client::builder().user_agent(USER_AGENT).build()?;
	let url = format!(
		"{}/management/auth/token",
		settings.management_url.trim_end_matches('/')
	);
	debug!(%url, username = %settings.admin_username, "requesting admin access token");
	let response = http
		.post(url)
		.basic_auth(&settings.admin_username, Some(&settings.admin_password))
		.form(&[("grant_type", "password")])
		.send()
		.await?;
	let token: TokenResponse = HttpManagementClient::check(response).await?.json().await?;
	Ok(token.access_token)
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{basic_auth, body_json_string, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn test_settings(base_url: &str) -> Settings {
		Settings::resolve(&|key| match key {
			"AMSEED_MANAGEMENT_URL" => Some(base_url.to_string()),
			"AMSEED_ORG_ID" => Some("org1".to_string()),
			"AMSEED_ENV_ID" => Some("env1".to_string()),
			_ => None,
		})
		.unwrap()
	}

	fn client(server: &MockServer) -> HttpManagementClient {
		HttpManagementClient::new(&test_settings(&server.uri()), "tok".to_string()).unwrap()
	}

	#[tokio::test]
	async fn create_domain_posts_to_scoped_path() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path(
				"/management/organizations/org1/environments/env1/domains",
			))
			.respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
				"id": "d1",
				"name": "demo",
				"enabled": false
			})))
			.expect(1)
			.mount(&server)
			.await;

		let domain = client(&server).create_domain("demo", "desc").await.unwrap();
		assert_eq!(domain.id, "d1");
		assert!(!domain.enabled);
	}

	#[tokio::test]
	async fn set_domain_enabled_patches_flag() {
		let server = MockServer::start().await;
		Mock::given(method("PATCH"))
			.and(path(
				"/management/organizations/org1/environments/env1/domains/d1",
			))
			.and(body_json_string(r#"{"enabled":true}"#))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"id": "d1",
				"name": "demo",
				"enabled": true
			})))
			.expect(1)
			.mount(&server)
			.await;

		let domain = client(&server).set_domain_enabled("d1", true).await.unwrap();
		assert!(domain.enabled);
	}

	#[tokio::test]
	async fn list_domains_sends_page_and_size() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(
				"/management/organizations/org1/environments/env1/domains",
			))
			.and(query_param("page", "2"))
			.and(query_param("size", "50"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"data": [{"id": "d9", "name": "x", "enabled": true}],
				"totalCount": 101,
				"currentPage": 2
			})))
			.expect(1)
			.mount(&server)
			.await;

		let page = client(&server).list_domains(2, 50).await.unwrap();
		assert_eq!(page.len(), 1);
		assert_eq!(page[0].id, "d9");
	}

	#[tokio::test]
	async fn non_success_status_maps_to_api_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(404).set_body_string("no such domain"))
			.mount(&server)
			.await;

		let err = client(&server).get_domain("nope").await.unwrap_err();
		match err {
			MgmtError::Api { status, body } => {
				assert_eq!(status, 404);
				assert_eq!(body, "no such domain");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[tokio::test]
	async fn token_request_uses_basic_auth() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/management/auth/token"))
			.and(basic_auth("admin", "adminadmin"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": "abc123",
				"token_type": "bearer"
			})))
			.expect(1)
			.mount(&server)
			.await;

		let token = request_admin_access_token(&test_settings(&server.uri()))
			.await
			.unwrap();
		assert_eq!(token, "abc123");
	}
}
