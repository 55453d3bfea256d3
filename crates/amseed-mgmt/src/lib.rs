// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Management API collaborator for amseed.
//!
//! The remote platform is a black box behind the [`ManagementApi`] trait:
//! domain CRUD and listing, application creation, bulk user creation, and
//! Mongo IDP creation. [`HttpManagementClient`] is the reqwest-backed
//! implementation; tests substitute in-memory mocks.

mod api;
mod client;
mod error;
mod types;

pub use api::ManagementApi;
pub use client::{request_admin_access_token, HttpManagementClient};
pub use error::{MgmtError, Result};
pub use types::{
	Application, BulkAction, BulkUserRequest, Domain, DomainPage, IdentityProvider, IdpAttachment,
	NewApplication, NewUser,
};
