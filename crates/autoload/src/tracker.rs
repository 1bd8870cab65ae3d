//! Resolved symbols that a teardown must remove.

use crate::symbol::LoadedRecord;

#[derive(Debug, Default)]
pub struct ReloadTracker {
	records: Vec<LoadedRecord>,
}

impl ReloadTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, record: LoadedRecord) {
		self.records.push(record);
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &LoadedRecord> {
		self.records.iter()
	}

	/// Empties the tracker, returning records in resolution order.
	pub(crate) fn take(&mut self) -> Vec<LoadedRecord> {
		std::mem::take(&mut self.records)
	}
}
