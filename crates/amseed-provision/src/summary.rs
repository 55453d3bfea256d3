// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Records of what a provisioning run created.

use std::fmt::Write as _;

/// A domain created during Phase 1. The ordinal is the 1-based creation
/// sequence and is used only for naming, never for re-ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
	pub id: String,
	pub name: String,
	pub ordinal: u32,
}

/// A created application. The client id always equals the generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
	pub id: String,
	pub client_id: String,
	pub name: String,
}

/// Everything created inside one domain.
#[derive(Debug, Clone)]
pub struct DomainSummary {
	pub domain: DomainRecord,
	pub applications: Vec<ApplicationRecord>,
	pub users: u32,
	pub idp: Option<String>,
}

/// Aggregate of one provisioning run. Appended to as phases complete and
/// read only at the end for reporting; never consulted for control flow.
#[derive(Debug, Clone, Default)]
pub struct CreatedSummary {
	pub domains: Vec<DomainSummary>,
}

impl CreatedSummary {
	pub fn total_applications(&self) -> usize {
		self.domains.iter().map(|d| d.applications.len()).sum()
	}

	pub fn total_users(&self) -> u64 {
		self.domains.iter().map(|d| u64::from(d.users)).sum()
	}

	/// Human-readable report for the end of the run.
	pub fn render(&self) -> String {
		let mut out = String::new();
		let _ = writeln!(out, "provisioned {} domain(s):", self.domains.len());
		for entry in &self.domains {
			let _ = writeln!(
				out,
				"  {} ({}): {} application(s), {} user(s){}",
				entry.domain.name,
				entry.domain.id,
				entry.applications.len(),
				entry.users,
				match &entry.idp {
					Some(idp) => format!(", idp {idp}"),
					None => String::new(),
				}
			);
			for app in &entry.applications {
				let _ = writeln!(out, "    app {} (client_id {})", app.name, app.client_id);
			}
		}
		let _ = write!(
			out,
			"totals: {} application(s), {} user(s)",
			self.total_applications(),
			self.total_users()
		);
		out
	}
}
