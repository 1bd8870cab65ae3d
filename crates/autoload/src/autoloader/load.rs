//! The load interceptor: runs units and reconciles them with the registry.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::Autoloader;
use crate::diagnostic::Diagnostic;
use crate::error::{AutoloadError, Result};
use crate::namespace::Binding;
use crate::registry::Registered;
use crate::symbol::SymbolKind;

/// How a unit load ended.
enum Required {
	Loaded(PathBuf),
	AlreadyLoaded,
	Circular,
}

impl Autoloader {
	/// Loads a unit by path or by feature name.
	///
	/// Relative features are looked up in the search paths, with the unit
	/// extension appended when missing. Returns false if the unit was already
	/// loaded or is loading right now.
	///
	/// If the unit backs a deferred binding, the binding is resolved by the
	/// load just as if the symbol had been referenced.
	pub fn require(&mut self, feature: impl AsRef<Path>) -> Result<bool> {
		let feature = feature.as_ref();
		if let Some(entry) = self.bindings.get(feature).cloned() {
			return self.require_registered(entry);
		}
		match self.require_unit(feature)? {
			Required::Loaded(path) => {
				self.on_resolved(&path);
				Ok(true)
			}
			Required::AlreadyLoaded | Required::Circular => Ok(false),
		}
	}

	fn require_registered(&mut self, entry: Registered) -> Result<bool> {
		let symbol = &entry.symbol;
		match symbol.kind {
			SymbolKind::Namespace => {
				if !matches!(
					self.namespaces.binding(symbol.owner, &symbol.name),
					Some(Binding::Defined(_))
				) {
					self.create_namespace(symbol.owner, &symbol.name);
				}
				self.on_resolved(&symbol.source);
				Ok(true)
			}
			SymbolKind::Unit => match self.require_scanned(&symbol.source)? {
				Required::Circular => Ok(false),
				Required::Loaded(_) => {
					self.on_resolved(&symbol.source);
					Ok(true)
				}
				Required::AlreadyLoaded => {
					self.on_resolved(&symbol.source);
					Ok(false)
				}
			},
		}
	}

	fn require_unit(&mut self, feature: &Path) -> Result<Required> {
		let path = self
			.locate(feature)
			.ok_or_else(|| AutoloadError::NotFound(feature.to_path_buf()))?;
		self.load_unit(path)
	}

	/// Scanned sources are already canonical, and a symlinked unit may point at
	/// a file without the unit extension.
	fn require_scanned(&mut self, source: &Path) -> Result<Required> {
		if !source.is_file() {
			return Err(AutoloadError::NotFound(source.to_path_buf()));
		}
		self.load_unit(source.to_path_buf())
	}

	fn load_unit(&mut self, path: PathBuf) -> Result<Required> {
		if self.ledger.contains(&path) {
			return Ok(Required::AlreadyLoaded);
		}
		if self.loading.contains(&path) {
			self.warn(Diagnostic::CircularRequire { path });
			return Ok(Required::Circular);
		}

		debug!(path = %path.display(), "loading unit");
		let loader = Arc::clone(&self.loader);
		self.loading.push(path.clone());
		let result = loader.load(self, &path);
		self.loading.pop();

		match result {
			Ok(()) => {
				self.ledger.insert(path.clone());
				Ok(Required::Loaded(path))
			}
			Err(error) => Err(match error.downcast::<AutoloadError>() {
				Ok(nested) => nested,
				Err(source) => AutoloadError::Load { path, source },
			}),
		}
	}

	/// Finds the canonical path of the unit file `feature` refers to.
	fn locate(&self, feature: &Path) -> Option<PathBuf> {
		if feature.is_absolute() {
			return self.existing_unit(feature);
		}
		self.search_paths
			.iter()
			.find_map(|dir| self.existing_unit(&dir.join(feature)))
	}

	fn existing_unit(&self, path: &Path) -> Option<PathBuf> {
		let extension = self.loader.extension();
		let candidate = if path.extension().is_some_and(|ext| ext == extension) {
			path.to_path_buf()
		} else {
			let mut with_extension = OsString::from(path.as_os_str());
			with_extension.push(".");
			with_extension.push(extension);
			PathBuf::from(with_extension)
		};
		if !candidate.is_file() {
			return None;
		}
		std::fs::canonicalize(&candidate).ok()
	}
}
