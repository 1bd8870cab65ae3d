//! Error and warning types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unexpected key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Eager loading the configured roots failed.
	#[error(transparent)]
	Autoload(#[from] lazyroot_autoload::AutoloadError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Non-fatal configuration issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A permanent root that is not one of the configured roots. It is still
	/// honoured if the root is added some other way.
	PermanentNotRoot {
		/// The permanent root as written.
		path: PathBuf,
	},
	/// A root listed more than once across `roots` and `prepend`.
	DuplicateRoot {
		/// The repeated root as written.
		path: PathBuf,
	},
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::PermanentNotRoot { path } => {
				write!(f, "permanent root {} is not a configured root", path.display())
			}
			ConfigWarning::DuplicateRoot { path } => {
				write!(f, "root {} is listed more than once", path.display())
			}
		}
	}
}
