//! Non-fatal warnings collected while scanning and loading.

use std::fmt;
use std::path::PathBuf;

use crate::conflict::Collision;

/// A warning about the configured roots or the units in them.
///
/// Diagnostics never interrupt an operation. Each one is logged through
/// `tracing` when raised and kept on the [`Autoloader`](crate::Autoloader)
/// until taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// Two unit files map to the same symbol.
	DuplicatePath(Collision),
	/// A registered root does not exist or is not a directory.
	MissingRoot {
		/// The canonical root path.
		path: PathBuf,
	},
	/// A directory under a root could not be listed.
	UnreadableDirectory {
		/// The directory that failed.
		path: PathBuf,
		/// Rendered I/O error.
		error: String,
	},
	/// A unit was required again while it was still loading.
	CircularRequire {
		/// The unit being loaded.
		path: PathBuf,
	},
}

impl Diagnostic {
	/// Short stable label, used as the `kind` field in log events.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::DuplicatePath(_) => "duplicate_path",
			Self::MissingRoot { .. } => "missing_root",
			Self::UnreadableDirectory { .. } => "unreadable_directory",
			Self::CircularRequire { .. } => "circular_require",
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicatePath(collision) => write!(
				f,
				"Multiple paths to autoload {}:\n  {}\n  {}",
				collision.symbol,
				collision.existing.display(),
				collision.candidate.display()
			),
			Self::MissingRoot { path } => {
				write!(f, "Autoload path directory not found: {}", path.display())
			}
			Self::UnreadableDirectory { path, error } => {
				write!(f, "Cannot list autoload directory {}: {error}", path.display())
			}
			Self::CircularRequire { path } => {
				write!(f, "Circular require of {} ignored", path.display())
			}
		}
	}
}
