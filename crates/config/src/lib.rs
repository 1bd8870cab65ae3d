//! Configuration for lazyroot autoloaders.
//!
//! A configuration names the roots to scan and how to treat them. It can be
//! read from a TOML file, from the environment, or both, and is then applied
//! to an [`Autoloader`].
//!
//! # File format
//!
//! ```toml
//! # Scanned in order; first registration wins on conflicts.
//! roots = ["app/models", "app/services"]
//!
//! # Placed ahead of `roots`; the first one listed has the highest priority.
//! prepend = ["overrides"]
//!
//! # Resolved once, never torn down by reload.
//! permanent = ["vendor"]
//!
//! # Directories searched by `require` for relative features.
//! search_paths = ["lib"]
//!
//! # Resolve everything right after applying.
//! eager_load = false
//! ```
//!
//! Relative paths in a file are resolved against the file's directory.
//!
//! # Environment
//!
//! [`Config::from_env`] reads platform path lists (`:`-separated on Unix)
//! from `LAZYROOT_ROOTS`, `LAZYROOT_PERMANENT` and `LAZYROOT_SEARCH_PATHS`.
//!
//! Non-fatal issues are collected in [`Config::warnings`].

pub mod error;


use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigWarning, Result};
use lazyroot_autoload::Autoloader;
use serde::Deserialize;
use tracing::{info, warn};

/// Environment variable holding the roots to append.
pub const ROOTS_VAR: &str = "LAZYROOT_ROOTS";
/// Environment variable holding the permanent roots.
pub const PERMANENT_VAR: &str = "LAZYROOT_PERMANENT";
/// Environment variable holding the `require` search paths.
pub const SEARCH_PATHS_VAR: &str = "LAZYROOT_SEARCH_PATHS";

/// Autoloader settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Roots appended in order.
	pub roots: Vec<PathBuf>,
	/// Roots placed ahead of everything else.
	pub prepend: Vec<PathBuf>,
	/// Roots whose symbols survive reload.
	pub permanent: Vec<PathBuf>,
	/// Directories searched for relative `require` features.
	pub search_paths: Vec<PathBuf>,
	/// Resolve every symbol once the roots are added.
	pub eager_load: bool,
	/// Non-fatal warnings encountered while loading.
	#[serde(skip)]
	pub warnings: Vec<ConfigWarning>,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	///
	/// Relative paths are kept as written.
	pub fn parse(input: &str) -> Result<Self> {
		let mut config: Config = toml::from_str(input)?;
		config.validate();
		Ok(config)
	}

	/// Load configuration from a file, resolving relative paths against the
	/// file's directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let mut config: Config = toml::from_str(&content)?;
		if let Some(base) = path.parent() {
			config.rebase(base);
		}
		config.validate();
		Ok(config)
	}

	/// Reads the process environment.
	pub fn from_env() -> Self {
		Self::from_env_vars(|key| std::env::var_os(key))
	}

	/// Builds a configuration from an environment lookup function.
	pub fn from_env_vars(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
		let paths = |key: &str| -> Vec<PathBuf> {
			lookup(key)
				.map(|value| {
					std::env::split_paths(&value)
						.filter(|path| !path.as_os_str().is_empty())
						.collect()
				})
				.unwrap_or_default()
		};
		let mut config = Config {
			roots: paths(ROOTS_VAR),
			permanent: paths(PERMANENT_VAR),
			search_paths: paths(SEARCH_PATHS_VAR),
			..Config::default()
		};
		config.validate();
		config
	}

	/// Merge another config into this one.
	///
	/// Path lists from `other` come after the ones in `self`, except `prepend`
	/// where they come first so that they keep the highest priority.
	pub fn merge(&mut self, other: Config) {
		self.roots.extend(other.roots);
		let mut prepend = other.prepend;
		prepend.append(&mut self.prepend);
		self.prepend = prepend;
		extend_unique(&mut self.permanent, other.permanent);
		extend_unique(&mut self.search_paths, other.search_paths);
		self.eager_load |= other.eager_load;
		self.validate();
	}

	/// Configures `autoloader` and scans the roots.
	pub fn apply(&self, autoloader: &mut Autoloader) -> Result<()> {
		for warning in &self.warnings {
			warn!("{warning}");
		}
		autoloader.set_permanent_roots(&self.permanent);
		for dir in &self.search_paths {
			autoloader.add_search_path(dir);
		}
		autoloader.push_paths(&self.roots);
		autoloader.prepend_paths(&self.prepend);
		info!(
			roots = self.roots.len() + self.prepend.len(),
			permanent = self.permanent.len(),
			pending = autoloader.pending_count(),
			"applied autoload configuration"
		);
		if self.eager_load {
			autoloader.eager_load()?;
		}
		Ok(())
	}

	fn rebase(&mut self, base: &Path) {
		for path in self
			.roots
			.iter_mut()
			.chain(&mut self.prepend)
			.chain(&mut self.permanent)
			.chain(&mut self.search_paths)
		{
			if path.is_relative() {
				*path = base.join(&*path);
			}
		}
	}

	fn validate(&mut self) {
		let mut warnings = Vec::new();
		let mut seen: Vec<&Path> = Vec::new();
		for root in self.prepend.iter().chain(&self.roots) {
			if seen.contains(&root.as_path()) {
				warnings.push(ConfigWarning::DuplicateRoot { path: root.clone() });
			} else {
				seen.push(root);
			}
		}
		for permanent in &self.permanent {
			if !seen.contains(&permanent.as_path()) {
				warnings.push(ConfigWarning::PermanentNotRoot {
					path: permanent.clone(),
				});
			}
		}
		self.warnings = warnings;
	}
}

fn extend_unique(target: &mut Vec<PathBuf>, items: Vec<PathBuf>) {
	for item in items {
		if !target.contains(&item) {
			target.push(item);
		}
	}
}
