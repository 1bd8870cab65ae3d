//! Children of namespaces that do not exist yet.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::conflict::{Collision, DuplicatePolicy, InsertAction};
use crate::symbol::{ForwardRef, SymbolKind};

/// Forward declarations keyed by the parent namespace's qualified name.
///
/// An entry is created on the first child discovered under a parent and
/// removed as a whole by [`take`](Self::take) when the parent is created.
#[derive(Debug, Default)]
pub struct ForwardNamespaces {
	by_parent: FxHashMap<String, IndexMap<String, ForwardRef>>,
}

impl ForwardNamespaces {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the pending child `name` of `parent`.
	pub fn get(&self, parent: &str, name: &str) -> Option<&ForwardRef> {
		self.by_parent.get(parent)?.get(name)
	}

	/// Records a unit file under `parent`, applying the duplicate policy.
	///
	/// Returns the collision when another unit file already claimed the name.
	pub fn register_child(
		&mut self,
		parent: &str,
		candidate: ForwardRef,
		policy: DuplicatePolicy,
	) -> Option<Collision> {
		let children = self.by_parent.entry(parent.to_owned()).or_default();
		let existing = children.get(&candidate.name);
		let action = policy.offer_unit(existing.map(|r| r.kind));

		let collision = match existing {
			Some(existing) if existing.kind == SymbolKind::Unit => Some(Collision {
				symbol: candidate.qualified_name.clone(),
				existing: existing.source.clone(),
				candidate: candidate.source.clone(),
				action,
			}),
			_ => None,
		};

		match action {
			InsertAction::KeptExisting => {}
			InsertAction::InsertedNew => {
				children.insert(candidate.name.clone(), candidate);
			}
			InsertAction::ReplacedExisting => {
				children.shift_remove(&candidate.name);
				children.insert(candidate.name.clone(), candidate);
			}
		}
		collision
	}

	/// Records a namespace directory under `parent` unless the name is taken.
	pub fn insert_namespace_if_absent(&mut self, parent: &str, candidate: ForwardRef) -> bool {
		let children = self.by_parent.entry(parent.to_owned()).or_default();
		if children.contains_key(&candidate.name) {
			return false;
		}
		children.insert(candidate.name.clone(), candidate);
		true
	}

	/// Removes and returns every child pending under `parent`.
	pub fn take(&mut self, parent: &str) -> Option<Vec<ForwardRef>> {
		self.by_parent
			.remove(parent)
			.map(|children| children.into_values().collect())
	}

	pub fn clear(&mut self) {
		self.by_parent.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.by_parent.is_empty()
	}

	/// Number of parents with pending children.
	pub fn len(&self) -> usize {
		self.by_parent.len()
	}
}
