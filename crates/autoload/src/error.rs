//! Error types for symbol resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a resolution or an explicit load.
///
/// Configuration problems (missing roots, duplicate paths) are never errors;
/// they are reported as [`Diagnostic`](crate::Diagnostic)s.
#[derive(Debug, Error)]
pub enum AutoloadError {
	/// The unit loader failed while running a unit.
	#[error("failed to load {}: {source}", path.display())]
	Load {
		/// Unit that was being loaded.
		path: PathBuf,
		/// The loader's error.
		#[source]
		source: anyhow::Error,
	},

	/// A required feature could not be located on disk.
	#[error("cannot load such file: {}", .0.display())]
	NotFound(PathBuf),

	/// A unit finished loading without defining the symbol it was expected to.
	#[error("{} was expected to define {name}", path.display())]
	NotDefined {
		/// Qualified name of the missing symbol.
		name: String,
		/// Unit that was loaded.
		path: PathBuf,
	},

	/// A symbol used as a namespace holds some other value.
	#[error("{0} is not a namespace")]
	NotANamespace(String),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, AutoloadError>;
