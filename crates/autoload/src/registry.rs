//! Live map from source path to installed deferred binding.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::namespace::Generation;
use crate::symbol::SymbolRef;

/// A registered symbol and the generation of the binding installed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
	pub symbol: SymbolRef,
	pub generation: Generation,
}

/// Deferred bindings currently installed, in registration order.
///
/// At most one entry exists per source path.
#[derive(Debug, Default)]
pub struct LazyBindings {
	by_source: IndexMap<PathBuf, Registered>,
	last_generation: u64,
}

impl LazyBindings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates a fresh generation. Never reset, not even by
	/// [`take_all`](Self::take_all).
	pub(crate) fn next_generation(&mut self) -> Generation {
		self.last_generation += 1;
		Generation(self.last_generation)
	}

	pub fn get(&self, source: &Path) -> Option<&Registered> {
		self.by_source.get(source)
	}

	pub fn contains(&self, source: &Path) -> bool {
		self.by_source.contains_key(source)
	}

	pub(crate) fn insert(&mut self, entry: Registered) -> Option<Registered> {
		self.by_source.insert(entry.symbol.source.clone(), entry)
	}

	pub(crate) fn remove(&mut self, source: &Path) -> Option<Registered> {
		self.by_source.shift_remove(source)
	}

	/// Oldest remaining entry.
	pub fn first(&self) -> Option<&Registered> {
		self.by_source.first().map(|(_, entry)| entry)
	}

	pub fn len(&self) -> usize {
		self.by_source.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_source.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Registered> {
		self.by_source.values()
	}

	pub(crate) fn take_all(&mut self) -> Vec<Registered> {
		std::mem::take(&mut self.by_source).into_values().collect()
	}
}
