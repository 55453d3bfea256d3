// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded-concurrency task pool for ordered item lists.
//!
//! Runs an async worker over a list of items with at most `limit` calls in
//! flight at once. A shared cursor hands each lane the next pending index,
//! so a lane that finishes early immediately claims the next item instead
//! of waiting for a rigid batch boundary. Results are written by index:
//! output order always equals input order, regardless of completion order.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

/// What the pool does with lanes still in flight when a worker fails.
///
/// The first error always wins and is the one returned to the caller;
/// results produced after it are discarded either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
	/// Return the first error immediately. Lanes already in flight keep
	/// running detached and their side effects still land on the remote
	/// system even though the pool reports failure.
	Detach,
	/// Stop claiming new items, let in-flight calls run to completion
	/// (never aborted mid-call), then return the first error.
	CancelPending,
}

struct PoolShared<T, R> {
	cursor: AtomicUsize,
	cancelled: AtomicBool,
	items: Mutex<Vec<Option<T>>>,
	results: Mutex<Vec<Option<R>>>,
}

/// Runs `worker(item, index)` over `items` with at most `limit` calls in
/// flight, returning results in input order.
///
/// `limit` is clamped to `[1, items.len()]`. An empty item list resolves
/// to an empty vec without invoking the worker.
pub async fn run_pool<T, R, E, F, Fut>(
	items: Vec<T>,
	limit: usize,
	policy: ErrorPolicy,
	worker: F,
) -> Result<Vec<R>, E>
where
	T: Send + 'static,
	R: Send + 'static,
	E: Send + 'static,
	F: Fn(T, usize) -> Fut + Clone + Send + 'static,
	Fut: Future<Output = Result<R, E>> + Send + 'static,
{
	let total = items.len();
	if total == 0 {
		return Ok(Vec::new());
	}
	let lanes = limit.clamp(1, total);
	debug!(total, lanes, "starting pooled run");

	let shared = Arc::new(PoolShared {
		cursor: AtomicUsize::new(0),
		cancelled: AtomicBool::new(false),
		items: Mutex::new(items.into_iter().map(Some).collect()),
		results: Mutex::new((0..total).map(|_| None).collect()),
	});

	let mut handles = FuturesUnordered::new();
	for _ in 0..lanes {
		let shared = Arc::clone(&shared);
		let worker = worker.clone();
		handles.push(tokio::spawn(async move {
			loop {
				if shared.cancelled.load(Ordering::SeqCst) {
					return Ok(());
				}
				// fetch_add hands out each index exactly once, even though
				// lanes interleave at every await point.
				let index = shared.cursor.fetch_add(1, Ordering::SeqCst);
				if index >= total {
					return Ok(());
				}
				let item = {
					let mut items = shared.items.lock().expect("pool items lock poisoned");
					items[index].take()
				};
				let Some(item) = item else {
					return Ok(());
				};
				match worker(item, index).await {
					Ok(result) => {
						let mut results =
							shared.results.lock().expect("pool results lock poisoned");
						results[index] = Some(result);
					}
					Err(err) => return Err(err),
				}
			}
		}));
	}

	let mut first_error: Option<E> = None;
	while let Some(joined) = handles.next().await {
		match joined {
			Ok(Ok(())) => {}
			Ok(Err(err)) => {
				if first_error.is_none() {
					first_error = Some(err);
				}
				match policy {
					ErrorPolicy::Detach => break,
					ErrorPolicy::CancelPending => {
						shared.cancelled.store(true, Ordering::SeqCst);
					}
				}
			}
			Err(join_err) => {
				if join_err.is_panic() {
					std::panic::resume_unwind(join_err.into_panic());
				}
			}
		}
	}

	if let Some(err) = first_error {
		return Err(err);
	}

	let mut slots = shared.results.lock().expect("pool results lock poisoned");
	Ok(slots
		.iter_mut()
		.map(|slot| slot.take().expect("pool result slot unfilled"))
		.collect())
}
