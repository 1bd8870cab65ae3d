//! The pluggable primitive that runs a unit file.

use std::fmt;
use std::path::Path;

use crate::Autoloader;

/// Runs unit files on behalf of an [`Autoloader`].
///
/// `load` receives the autoloader itself so the unit can define namespaces
/// and values, resolve other symbols and require other units. A unit is
/// expected to define the symbol its file name maps to; the autoloader does
/// not check this until the symbol is looked up.
pub trait UnitLoader: Send + Sync {
	/// Extension of unit files, without the dot.
	fn extension(&self) -> &str;

	/// Executes the unit at `path`.
	fn load(&self, autoloader: &mut Autoloader, path: &Path) -> anyhow::Result<()>;
}

/// [`UnitLoader`] backed by a closure.
pub struct FnLoader<F> {
	extension: String,
	f: F,
}

impl<F> FnLoader<F>
where
	F: Fn(&mut Autoloader, &Path) -> anyhow::Result<()> + Send + Sync,
{
	pub fn new(extension: impl Into<String>, f: F) -> Self {
		Self {
			extension: extension.into(),
			f,
		}
	}
}

impl<F> UnitLoader for FnLoader<F>
where
	F: Fn(&mut Autoloader, &Path) -> anyhow::Result<()> + Send + Sync,
{
	fn extension(&self) -> &str {
		&self.extension
	}

	fn load(&self, autoloader: &mut Autoloader, path: &Path) -> anyhow::Result<()> {
		(self.f)(autoloader, path)
	}
}

impl<F> fmt::Debug for FnLoader<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnLoader")
			.field("extension", &self.extension)
			.finish_non_exhaustive()
	}
}
