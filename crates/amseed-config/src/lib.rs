// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the amseed provisioning tool.
//!
//! Two surfaces:
//! - [`ProvisionConfig`]: the JSON file describing one provisioning run
//!   (domain/application/user counts, IDP kind, grant-type mode).
//! - [`Settings`]: environment-backed connection settings (`AMSEED_*`)
//!   with hard-coded fallback defaults.

mod error;
mod provision;
mod settings;

pub use error::ConfigError;
pub use provision::{GrantMode, ProvisionConfig, DEFAULT_NAME_PREFIX};
pub use settings::Settings;
