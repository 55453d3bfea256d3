// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth grant-type selection for created applications.

use amseed_config::GrantMode;

/// An OAuth2 grant type from the platform catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
	AuthorizationCode,
	Implicit,
	Password,
	ClientCredentials,
	RefreshToken,
}

/// The full catalog, in wire order.
pub const CATALOG: [GrantType; 5] = [
	GrantType::AuthorizationCode,
	GrantType::Implicit,
	GrantType::Password,
	GrantType::ClientCredentials,
	GrantType::RefreshToken,
];

impl GrantType {
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::Implicit => "implicit",
			GrantType::Password => "password",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}

/// Chooses the grant-type set for one application.
///
/// `All` and `CodeOnly` are deterministic. `Random` samples a random
/// number (2 to catalog size) of distinct types without replacement, then
/// force-adds `authorization_code` and `refresh_token` when absent; the
/// result is deduplicated and returned in catalog order, so the final set
/// holds between 2 and 5 entries.
pub fn select(mode: GrantMode) -> Vec<GrantType> {
	match mode {
		GrantMode::All => CATALOG.to_vec(),
		GrantMode::CodeOnly => vec![GrantType::AuthorizationCode, GrantType::RefreshToken],
		GrantMode::Random => {
			let count = fastrand::usize(2..=CATALOG.len());
			let mut shuffled = CATALOG;
			fastrand::shuffle(&mut shuffled);
			let mut picked = shuffled[..count].to_vec();
			for required in [GrantType::AuthorizationCode, GrantType::RefreshToken] {
				if !picked.contains(&required) {
					picked.push(required);
				}
			}
			CATALOG
				.into_iter()
				.filter(|grant| picked.contains(grant))
				.collect()
		}
	}
}

/// Wire strings for a grant-type set.
pub fn to_wire(grants: &[GrantType]) -> Vec<String> {
	grants.iter().map(|grant| grant.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_mode_returns_full_catalog() {
		let grants = select(GrantMode::All);
		assert_eq!(grants, CATALOG.to_vec());
	}

	#[test]
	fn code_only_mode_returns_exact_pair() {
		let grants = select(GrantMode::CodeOnly);
		assert_eq!(
			grants,
			vec![GrantType::AuthorizationCode, GrantType::RefreshToken]
		);
	}

	#[test]
	fn random_mode_always_includes_code_and_refresh() {
		for _ in 0..200 {
			let grants = select(GrantMode::Random);
			assert!(grants.contains(&GrantType::AuthorizationCode));
			assert!(grants.contains(&GrantType::RefreshToken));
			assert!(grants.len() >= 2 && grants.len() <= CATALOG.len());

			// No duplicates and stable catalog order.
			let mut seen = Vec::new();
			for grant in &grants {
				assert!(!seen.contains(grant));
				seen.push(*grant);
			}
			let positions: Vec<usize> = grants
				.iter()
				.map(|g| CATALOG.iter().position(|c| c == g).unwrap())
				.collect();
			assert!(positions.windows(2).all(|w| w[0] < w[1]));
		}
	}

	#[test]
	fn wire_strings_match_oauth_names() {
		let wire = to_wire(&select(GrantMode::CodeOnly));
		assert_eq!(wire, vec!["authorization_code", "refresh_token"]);
	}
}
