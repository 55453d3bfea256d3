// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

use amseed_mgmt::MgmtError;

/// Errors raised by provisioning and purge runs.
///
/// Everything here is fatal: errors bubble to the binary entry point
/// unhandled, with no local recovery or rollback of partially created
/// resources. Verification failures get their own variants so the message
/// can say what was counted, but they are handled identically to remote
/// failures (abort, non-zero exit).
#[derive(Debug, Error)]
pub enum ProvisionError {
	/// A remote call failed; propagated unmodified, never retried.
	#[error(transparent)]
	Mgmt(#[from] MgmtError),

	/// A domain did not report `enabled` after the start patch.
	#[error("domain {name} ({id}) did not report enabled after start")]
	DomainNotEnabled { name: String, id: String },

	/// Post-run verification found fewer matching domains than configured.
	#[error("verification failed: expected {expected} domains with prefix {prefix:?}, found {found}")]
	IncompleteProvision {
		prefix: String,
		expected: u32,
		found: u64,
	},

	/// Post-purge verification found domains still matching the prefix.
	#[error("purge verification failed: {remaining} domains still match prefix {prefix:?}")]
	PurgeResidue { prefix: String, remaining: u64 },
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
