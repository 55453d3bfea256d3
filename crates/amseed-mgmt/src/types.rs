// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for the management API.

use serde::{Deserialize, Serialize};

/// A security domain as reported by the management API.
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub enabled: bool,
	#[serde(default)]
	pub description: Option<String>,
}

/// One page of the domain listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPage {
	#[serde(default)]
	pub data: Vec<Domain>,
	#[serde(default)]
	pub total_count: u64,
	#[serde(default)]
	pub current_page: u32,
}

/// Application creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
	pub name: String,
	/// Application kind, e.g. `WEB`.
	#[serde(rename = "type")]
	pub application_type: String,
	pub client_id: String,
	pub client_secret: String,
	pub redirect_uris: Vec<String>,
	pub grant_types: Vec<String>,
	pub response_types: Vec<String>,
	pub token_endpoint_auth_method: String,
	pub scopes: Vec<String>,
}

/// A created application. Only the fields this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
	pub id: String,
	pub name: String,
}

/// Identity provider attachment patched onto an application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpAttachment {
	pub identity: String,
	pub priority: i32,
	pub selection_rule: String,
}

impl IdpAttachment {
	/// Attachment with priority 0 and an empty selection rule.
	pub fn new(idp_id: &str) -> Self {
		Self {
			identity: idp_id.to_string(),
			priority: 0,
			selection_rule: String::new(),
		}
	}
}

/// A created identity provider. Only the fields this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProvider {
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
}

/// One user inside a bulk create request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub password: String,
	pub pre_registration: bool,
	pub registration_completed: bool,
	/// IDP the user is created in; `None` means the domain default.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

/// Bulk operation action.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkAction {
	Create,
}

/// A bulk user operation. `fail_on_errors = 0` means the server accepts
/// the batch even when individual items fail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUserRequest {
	pub action: BulkAction,
	pub fail_on_errors: u32,
	pub items: Vec<NewUser>,
}
