//! Ordered set of root directories.

use std::path::{Path, PathBuf};

/// Where newly added roots go relative to the existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddMode {
	/// After the existing roots, with lower priority.
	#[default]
	Append,
	/// Before the existing roots, with higher priority.
	Prepend,
}

/// Canonical root directories in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
	roots: Vec<PathBuf>,
}

impl PathSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Owned copy of the roots in priority order.
	pub fn snapshot(&self) -> Vec<PathBuf> {
		self.roots.clone()
	}

	pub fn as_slice(&self) -> &[PathBuf] {
		&self.roots
	}

	pub fn len(&self) -> usize {
		self.roots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.roots.is_empty()
	}

	pub fn contains(&self, root: &Path) -> bool {
		self.roots.iter().any(|r| r == root)
	}

	/// Inserts already-canonical `roots` and returns them in the order they
	/// must be scanned.
	///
	/// Prepended roots keep their given order at the front of the set and are
	/// scanned last-to-first, so that under last-wins conflict resolution the
	/// first one listed ends up with the highest priority.
	pub(crate) fn insert(&mut self, roots: Vec<PathBuf>, mode: AddMode) -> Vec<PathBuf> {
		match mode {
			AddMode::Append => {
				self.roots.extend(roots.iter().cloned());
				roots
			}
			AddMode::Prepend => {
				self.roots.splice(0..0, roots.iter().cloned());
				roots.into_iter().rev().collect()
			}
		}
	}

	pub(crate) fn clear(&mut self) {
		self.roots.clear();
	}
}

/// Resolves a root to an absolute, symlink-free path.
///
/// Roots that do not exist are still accepted so that they can be reported by
/// the scanner; they are made absolute without touching the filesystem.
pub fn canonicalize_root(path: &Path) -> PathBuf {
	std::fs::canonicalize(path)
		.or_else(|_| std::path::absolute(path))
		.unwrap_or_else(|_| path.to_path_buf())
}
