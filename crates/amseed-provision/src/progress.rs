// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Explicit console progress reporting.
//!
//! There is no hidden global "active spinner" slot: the orchestrator owns
//! a [`ProgressReporter`] and threads [`ProgressTask`] handles through the
//! code that needs them. Progress lines go to stderr; the final summary
//! report goes to stdout.

/// Console progress channel owned by one orchestrator or sweeper.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter;

impl ProgressReporter {
	pub fn new() -> Self {
		Self
	}

	/// Prints a phase banner.
	pub fn banner(&self, text: &str) {
		eprintln!("== {text} ==");
	}

	/// Starts a tracked step and returns its handle.
	pub fn start(&self, text: &str) -> ProgressTask {
		eprintln!("→ {text}");
		ProgressTask {
			label: text.to_string(),
		}
	}

	/// Prints the final report to stdout.
	pub fn report(&self, text: &str) {
		println!("{text}");
	}
}

/// Handle for one in-progress step. Consumed by `finish` or `fail`.
#[derive(Debug)]
pub struct ProgressTask {
	label: String,
}

impl ProgressTask {
	/// Replaces the step text while the step is still running.
	pub fn update(&mut self, text: &str) {
		self.label = text.to_string();
		eprintln!("… {text}");
	}

	pub fn finish(self, text: &str) {
		eprintln!("✓ {text}");
	}

	pub fn fail(self, text: &str) {
		eprintln!("✗ {text}");
	}

	pub fn label(&self) -> &str {
		&self.label
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn task_tracks_latest_label() {
		let reporter = ProgressReporter::new();
		let mut task = reporter.start("creating domain demo");
		assert_eq!(task.label(), "creating domain demo");
		task.update("creating domain demo (enabling)");
		assert_eq!(task.label(), "creating domain demo (enabling)");
		task.finish("domain demo ready");
	}
}
