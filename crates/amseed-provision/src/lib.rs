// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bulk test-environment provisioning and purge for the access management
//! platform.
//!
//! [`ProvisioningOrchestrator`] sequences one run: create domains
//! (sequentially, via [`DomainLifecycleDriver`]), wait a fixed propagation
//! grace period, populate each domain ([`DomainPopulator`], which pools
//! application creation through `amseed-pool`), print a summary, and
//! optionally verify by re-scanning the domain listing.
//! [`PurgeSweeper`] is the independent cleanup entry point: paginated
//! enumeration plus prefix-filtered deletion.
//!
//! Everything is fail-fast: one attempt per remote call, first error
//! aborts the run, no rollback of partially created resources.

mod domain;
mod error;
pub mod grants;
mod orchestrator;
mod populate;
mod progress;
mod purge;
mod summary;

pub use domain::DomainLifecycleDriver;
pub use error::{ProvisionError, Result};
pub use orchestrator::{ProvisioningOrchestrator, GRACE_WAIT};
pub use populate::DomainPopulator;
pub use progress::{ProgressReporter, ProgressTask};
pub use purge::PurgeSweeper;
pub use summary::{ApplicationRecord, CreatedSummary, DomainRecord, DomainSummary};

/// Page size for every paginated domain listing scan.
pub(crate) const PAGE_SIZE: u32 = 50;
