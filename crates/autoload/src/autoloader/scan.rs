//! Directory walking and deferred-binding registration.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::Autoloader;
use crate::conflict::{Collision, DuplicatePolicy, InsertAction};
use crate::diagnostic::Diagnostic;
use crate::inflector::is_valid_symbol;
use crate::namespace::{Binding, NamespaceId, Value, join};
use crate::paths::AddMode;
use crate::symbol::{ForwardRef, SymbolKind, SymbolRef};

/// A classified directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
	pub path: PathBuf,
	pub symbol: String,
	pub kind: SymbolKind,
}

impl Autoloader {
	pub(super) fn scan_root(&mut self, root: &Path, mode: AddMode) {
		if !root.is_dir() {
			self.warn(Diagnostic::MissingRoot {
				path: root.to_path_buf(),
			});
			return;
		}
		debug!(root = %root.display(), ?mode, "scanning root");
		self.scan(root, NamespaceId::ROOT, "", root, mode);
	}

	fn scan(&mut self, dir: &Path, parent: NamespaceId, parent_name: &str, root: &Path, mode: AddMode) {
		let Some(entries) = self.list_entries(dir) else {
			return;
		};
		for entry in entries {
			self.scan_entry(entry, parent, parent_name, root, mode);
		}
	}

	/// Lists the unit files and sub-directories of `dir` that map to valid
	/// symbols, sorted by file name.
	pub(crate) fn list_entries(&mut self, dir: &Path) -> Option<Vec<Entry>> {
		let read = match fs::read_dir(dir) {
			Ok(read) => read,
			Err(error) => {
				self.warn(Diagnostic::UnreadableDirectory {
					path: dir.to_path_buf(),
					error: error.to_string(),
				});
				return None;
			}
		};

		let mut entries = Vec::new();
		for dirent in read {
			let link = match dirent {
				Ok(dirent) => dirent.path(),
				Err(error) => {
					trace!(dir = %dir.display(), %error, "skipping unreadable entry");
					continue;
				}
			};
			// Names come from the link, sources from its target. Dangling
			// links are skipped.
			let Ok(path) = fs::canonicalize(&link) else {
				continue;
			};
			let Ok(meta) = fs::metadata(&path) else {
				continue;
			};
			let (kind, basename) = if meta.is_dir() {
				(SymbolKind::Namespace, link.file_name())
			} else if link
				.extension()
				.is_some_and(|ext| ext == self.loader.extension())
			{
				(SymbolKind::Unit, link.file_stem())
			} else {
				continue;
			};
			let Some(basename) = basename.and_then(OsStr::to_str) else {
				continue;
			};
			let symbol = self.inflector.camelize(basename);
			if !is_valid_symbol(&symbol) {
				trace!(path = %link.display(), %symbol, "not a symbol name");
				continue;
			}
			let file_name = link.file_name().map(OsStr::to_os_string).unwrap_or_default();
			entries.push((file_name, Entry { path, symbol, kind }));
		}
		entries.sort_by(|a, b| a.0.cmp(&b.0));
		let entries = entries.into_iter().map(|(_, entry)| entry).collect();
		Some(entries)
	}

	/// Registers one entry found directly under the concrete namespace `parent`.
	pub(crate) fn scan_entry(
		&mut self,
		entry: Entry,
		parent: NamespaceId,
		parent_name: &str,
		root: &Path,
		mode: AddMode,
	) {
		let qualified_name = join(parent_name, &entry.symbol);
		match entry.kind {
			SymbolKind::Unit => self.scan_unit(entry, parent, qualified_name, root, mode),
			SymbolKind::Namespace => self.scan_directory(entry, parent, qualified_name, root, mode),
		}
	}

	fn scan_unit(&mut self, entry: Entry, parent: NamespaceId, qualified_name: String, root: &Path, mode: AddMode) {
		let existing = match self.namespaces.binding(parent, &entry.symbol) {
			Some(Binding::Defined(_)) => return,
			Some(Binding::Deferred(deferred)) => self
				.bindings
				.get(&deferred.source)
				.filter(|registered| registered.generation == deferred.generation)
				.cloned(),
			None => None,
		};

		if let Some(existing) = existing {
			let action = DuplicatePolicy::for_mode(mode).offer_unit(Some(existing.symbol.kind));
			if existing.symbol.kind == SymbolKind::Unit {
				self.warn(Diagnostic::DuplicatePath(Collision {
					symbol: qualified_name.clone(),
					existing: existing.symbol.source.clone(),
					candidate: entry.path.clone(),
					action,
				}));
			}
			if action == InsertAction::KeptExisting {
				return;
			}
			self.deregister(&existing);
		}

		self.register(SymbolRef {
			owner: parent,
			name: entry.symbol,
			qualified_name,
			source: entry.path,
			root: root.to_path_buf(),
			kind: SymbolKind::Unit,
		});
	}

	fn scan_directory(
		&mut self,
		entry: Entry,
		parent: NamespaceId,
		qualified_name: String,
		root: &Path,
		mode: AddMode,
	) {
		match self.namespaces.binding(parent, &entry.symbol) {
			Some(Binding::Defined(Value::Namespace(id))) => {
				let id = *id;
				let name = self
					.namespaces
					.name(id)
					.map(str::to_owned)
					.unwrap_or(qualified_name);
				self.scan(&entry.path, id, &name, root, mode);
				return;
			}
			Some(Binding::Defined(_)) => {
				trace!(symbol = %qualified_name, "not a namespace, skipping directory");
				return;
			}
			Some(Binding::Deferred(_)) => {}
			None => self.register(SymbolRef {
				owner: parent,
				name: entry.symbol.clone(),
				qualified_name: qualified_name.clone(),
				source: entry.path.clone(),
				root: root.to_path_buf(),
				kind: SymbolKind::Namespace,
			}),
		}
		self.scan_forward(&entry.path, &qualified_name, root, mode);
	}

	/// Records the contents of `dir` as children of the not-yet-created
	/// namespace `parent_name`.
	fn scan_forward(&mut self, dir: &Path, parent_name: &str, root: &Path, mode: AddMode) {
		let Some(entries) = self.list_entries(dir) else {
			return;
		};
		let policy = DuplicatePolicy::for_mode(mode);
		for entry in entries {
			let qualified_name = join(parent_name, &entry.symbol);
			let candidate = ForwardRef {
				name: entry.symbol,
				qualified_name: qualified_name.clone(),
				source: entry.path.clone(),
				root: root.to_path_buf(),
				kind: entry.kind,
			};
			match entry.kind {
				SymbolKind::Unit => {
					if let Some(collision) = self.forward.register_child(parent_name, candidate, policy) {
						self.warn(Diagnostic::DuplicatePath(collision));
					}
				}
				SymbolKind::Namespace => {
					self.forward.insert_namespace_if_absent(parent_name, candidate);
					self.scan_forward(&entry.path, &qualified_name, root, mode);
				}
			}
		}
	}
}
