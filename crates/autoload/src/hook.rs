//! Namespace-creation events.
//!
//! Every site that creates a named namespace container publishes its id here.
//! Publishing is a no-op while the hook is disabled, which is whenever no
//! deferred binding is registered. Events published while the queue is being
//! drained are appended and handled by the same drain loop instead of
//! recursing.

use std::collections::VecDeque;

use crate::namespace::NamespaceId;

#[derive(Debug, Default)]
pub struct MaterializationHook {
	enabled: bool,
	queue: VecDeque<NamespaceId>,
	draining: bool,
}

impl MaterializationHook {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn enable(&mut self) {
		self.enabled = true;
	}

	/// Stops observing and drops queued events.
	pub fn disable(&mut self) {
		self.enabled = false;
		self.queue.clear();
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Queues a creation event. Returns false if the hook is disabled.
	pub fn publish(&mut self, id: NamespaceId) -> bool {
		if !self.enabled {
			return false;
		}
		self.queue.push_back(id);
		true
	}

	/// Queues an explicit announcement, observed even while disabled.
	pub fn announce(&mut self, id: NamespaceId) {
		self.queue.push_back(id);
	}

	/// Claims the drain loop. Returns false if a drain is already running
	/// further up the stack.
	pub fn begin_drain(&mut self) -> bool {
		if self.draining {
			return false;
		}
		self.draining = true;
		true
	}

	pub fn next(&mut self) -> Option<NamespaceId> {
		self.queue.pop_front()
	}

	pub fn end_drain(&mut self) {
		self.draining = false;
	}

	pub fn queued(&self) -> usize {
		self.queue.len()
	}
}
