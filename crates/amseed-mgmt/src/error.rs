// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors from the management API collaborator.
///
/// Every call is attempted exactly once; both variants propagate to the
/// caller unmodified, there is no retry layer.
#[derive(Debug, Error)]
pub enum MgmtError {
	/// The request never produced a response (connect failure, protocol
	/// error, body decode failure).
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The server answered with a non-success status.
	#[error("management API error ({status}): {body}")]
	Api { status: u16, body: String },
}

/// Result type alias for management API operations.
pub type Result<T> = std::result::Result<T, MgmtError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_error_display_includes_status_and_body() {
		let err = MgmtError::Api {
			status: 403,
			body: "forbidden".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"management API error (403): forbidden"
		);
	}
}
