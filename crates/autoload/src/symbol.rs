//! Records describing deferred and resolved symbols.

use std::path::PathBuf;

use crate::namespace::NamespaceId;

/// What a source path materializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
	/// A single unit file, run by the [`UnitLoader`](crate::UnitLoader).
	Unit,
	/// A directory; resolving it creates an empty namespace container.
	Namespace,
}

/// A deferred symbol installed in a concrete namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRef {
	/// Container the deferred binding lives in.
	pub owner: NamespaceId,
	/// Bare symbol name inside `owner`.
	pub name: String,
	/// `owner`'s qualified name joined with `name`.
	pub qualified_name: String,
	/// Unit file or namespace directory.
	pub source: PathBuf,
	/// Root directory the source was found under.
	pub root: PathBuf,
	pub kind: SymbolKind,
}

/// A symbol discovered under a namespace that does not exist yet.
///
/// Identical to [`SymbolRef`] minus the owner, which is only known once the
/// parent namespace is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRef {
	pub name: String,
	pub qualified_name: String,
	pub source: PathBuf,
	pub root: PathBuf,
	pub kind: SymbolKind,
}

impl ForwardRef {
	/// Re-homes the reference into a concrete namespace.
	pub fn into_symbol(self, owner: NamespaceId) -> SymbolRef {
		SymbolRef {
			owner,
			name: self.name,
			qualified_name: self.qualified_name,
			source: self.source,
			root: self.root,
			kind: self.kind,
		}
	}
}

/// A resolved symbol that came from a reloadable root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecord {
	pub owner: NamespaceId,
	pub name: String,
	pub source: PathBuf,
}
