//! Units that finished loading.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Canonical paths of loaded units, in load order.
///
/// Requiring a path in the ledger is a no-op; teardown removes entries so the
/// unit can run again.
#[derive(Debug, Default)]
pub struct LoadedUnits {
	features: IndexSet<PathBuf>,
}

impl LoadedUnits {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, path: &Path) -> bool {
		self.features.contains(path)
	}

	pub(crate) fn insert(&mut self, path: PathBuf) -> bool {
		self.features.insert(path)
	}

	pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Path) -> bool) {
		self.features.retain(|path| keep(path));
	}

	pub fn iter(&self) -> impl Iterator<Item = &Path> {
		self.features.iter().map(PathBuf::as_path)
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}
}
