//! Duplicate-candidate resolution shared by the scanner and the forward table.

use std::path::PathBuf;

use crate::paths::AddMode;
use crate::symbol::SymbolKind;

/// Result of offering a candidate path for a symbol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Symbol had no candidate; the new one was inserted.
	InsertedNew,
	/// Symbol had a candidate; kept the existing one (policy chose existing).
	KeptExisting,
	/// Symbol had a candidate; replaced with the new one.
	ReplacedExisting,
}

/// Policy for two unit files competing for the same symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Keep the candidate registered first.
	#[default]
	FirstWins,
	/// Overwrite with the candidate registered last.
	LastWins,
}

impl DuplicatePolicy {
	/// Appended roots never override, prepended roots always do.
	#[inline]
	pub fn for_mode(mode: AddMode) -> Self {
		match mode {
			AddMode::Append => DuplicatePolicy::FirstWins,
			AddMode::Prepend => DuplicatePolicy::LastWins,
		}
	}

	/// Decides what happens when a unit file is offered for a symbol whose
	/// current candidate has kind `existing`.
	///
	/// A namespace-directory candidate is only a placeholder, so a unit file
	/// always takes its place without a collision.
	pub fn offer_unit(self, existing: Option<SymbolKind>) -> InsertAction {
		match (existing, self) {
			(None, _) => InsertAction::InsertedNew,
			(Some(SymbolKind::Namespace), _) => InsertAction::ReplacedExisting,
			(Some(SymbolKind::Unit), DuplicatePolicy::FirstWins) => InsertAction::KeptExisting,
			(Some(SymbolKind::Unit), DuplicatePolicy::LastWins) => InsertAction::ReplacedExisting,
		}
	}
}

/// Records a non-fatal collision between two unit files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	/// Fully-qualified name both files map to.
	pub symbol: String,
	/// Path of the candidate that was registered first.
	pub existing: PathBuf,
	/// Path of the candidate being offered.
	pub candidate: PathBuf,
	/// What action was taken.
	pub action: InsertAction,
}
