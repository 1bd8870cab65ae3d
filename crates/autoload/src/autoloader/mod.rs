//! The owning context tying the registry, the namespace and the roots together.

mod bindings;
mod host;
mod load;
mod scan;


use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::hook::MaterializationHook;
use crate::inflector::{BasicInflector, Inflector};
use crate::ledger::LoadedUnits;
use crate::loader::UnitLoader;
use crate::namespace::{Binding, Namespaces};
use crate::paths::{AddMode, PathSet, canonicalize_root};
use crate::pending::ForwardNamespaces;
use crate::registry::LazyBindings;
use crate::tracker::ReloadTracker;

/// Diagnostics kept before the oldest ones are dropped.
const MAX_DIAGNOSTICS: usize = 256;

/// Deferred-loading context over one namespace tree.
///
/// All state lives here; there is no global registry. Callers that share an
/// autoloader across threads serialize access themselves, typically with a
/// mutex around every call.
pub struct Autoloader {
	namespaces: Namespaces,
	paths: PathSet,
	permanent: Vec<PathBuf>,
	search_paths: Vec<PathBuf>,
	inflector: Box<dyn Inflector>,
	loader: Arc<dyn UnitLoader>,
	bindings: LazyBindings,
	forward: ForwardNamespaces,
	tracker: ReloadTracker,
	hook: MaterializationHook,
	ledger: LoadedUnits,
	/// Units whose loader is currently running, innermost last.
	loading: Vec<PathBuf>,
	diagnostics: VecDeque<Diagnostic>,
}

impl Autoloader {
	/// Creates an empty autoloader running units with `loader`.
	pub fn new(loader: impl UnitLoader + 'static) -> Self {
		Self::with_loader(Arc::new(loader))
	}

	pub fn with_loader(loader: Arc<dyn UnitLoader>) -> Self {
		Self {
			namespaces: Namespaces::new(),
			paths: PathSet::new(),
			permanent: Vec::new(),
			search_paths: Vec::new(),
			inflector: Box::new(BasicInflector),
			loader,
			bindings: LazyBindings::new(),
			forward: ForwardNamespaces::new(),
			tracker: ReloadTracker::new(),
			hook: MaterializationHook::new(),
			ledger: LoadedUnits::new(),
			loading: Vec::new(),
			diagnostics: VecDeque::new(),
		}
	}

	pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
		self.set_inflector(inflector);
		self
	}

	/// Replaces the naming convention. Affects subsequent scans only.
	pub fn set_inflector(&mut self, inflector: impl Inflector + 'static) {
		self.inflector = Box::new(inflector);
	}

	/// Registers and scans `paths`.
	///
	/// Roots are canonicalized first. An empty iterator does nothing.
	pub fn add_paths<I, P>(&mut self, paths: I, mode: AddMode)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let roots: Vec<PathBuf> = paths
			.into_iter()
			.map(|path| canonicalize_root(path.as_ref()))
			.collect();
		if roots.is_empty() {
			return;
		}
		for root in self.paths.insert(roots, mode) {
			self.scan_root(&root, mode);
		}
	}

	pub fn push_paths<I, P>(&mut self, paths: I)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		self.add_paths(paths, AddMode::Append);
	}

	pub fn prepend_paths<I, P>(&mut self, paths: I)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		self.add_paths(paths, AddMode::Prepend);
	}

	/// Forgets every root and every deferred binding still pending.
	///
	/// Symbols that were already resolved stay defined.
	pub fn clear_paths(&mut self) {
		self.paths.clear();
		self.remove_all();
	}

	pub fn replace_paths<I, P>(&mut self, paths: I)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		self.clear_paths();
		self.add_paths(paths, AddMode::Append);
	}

	/// Replaces the roots with `paths` unless they already match.
	///
	/// Returns true if the roots changed.
	pub fn sync_paths<I, P>(&mut self, paths: I) -> bool
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let roots: Vec<PathBuf> = paths
			.into_iter()
			.map(|path| canonicalize_root(path.as_ref()))
			.collect();
		if roots.as_slice() == self.paths.as_slice() {
			return false;
		}
		self.replace_paths(roots);
		true
	}

	/// Registered roots in priority order.
	pub fn list_paths(&self) -> Vec<PathBuf> {
		self.paths.snapshot()
	}

	pub fn paths(&self) -> &[PathBuf] {
		self.paths.as_slice()
	}

	/// Tears down everything resolved from reloadable roots and rescans.
	pub fn reload(&mut self) {
		debug!(roots = self.paths.len(), tracked = self.tracker.len(), "reloading");
		self.unload_all();
		let roots = self.paths.snapshot();
		self.replace_paths(roots);
	}

	/// Tears down everything resolved from reloadable roots and forgets all
	/// roots.
	pub fn clear(&mut self) {
		self.unload_all();
		self.clear_paths();
	}

	/// Removes every tracked symbol from the namespace and its unit from the
	/// loaded-units ledger.
	pub fn unload_all(&mut self) {
		let records = self.tracker.take();
		let mut unloaded = FxHashSet::default();
		for record in records {
			if matches!(
				self.namespaces.binding(record.owner, &record.name),
				Some(Binding::Defined(_))
			) {
				self.namespaces.remove(record.owner, &record.name);
			}
			unloaded.insert(record.source);
		}
		if !unloaded.is_empty() {
			debug!(count = unloaded.len(), "unloaded symbols");
			self.ledger.retain(|path| !unloaded.contains(path));
		}
	}

	/// Replaces the set of roots excluded from teardown.
	pub fn set_permanent_roots<I, P>(&mut self, roots: I)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		self.permanent = roots
			.into_iter()
			.map(|root| canonicalize_root(root.as_ref()))
			.collect();
	}

	pub fn add_permanent_root(&mut self, root: impl AsRef<Path>) {
		let root = canonicalize_root(root.as_ref());
		if !self.permanent.contains(&root) {
			self.permanent.push(root);
		}
	}

	pub fn permanent_roots(&self) -> &[PathBuf] {
		&self.permanent
	}

	pub fn is_permanent(&self, root: &Path) -> bool {
		self.permanent.iter().any(|p| p == root)
	}

	/// Adds a directory searched by [`require`](Self::require) for relative
	/// features.
	pub fn add_search_path(&mut self, dir: impl AsRef<Path>) {
		let dir = canonicalize_root(dir.as_ref());
		if !self.search_paths.contains(&dir) {
			self.search_paths.push(dir);
		}
	}

	pub fn search_paths(&self) -> &[PathBuf] {
		&self.search_paths
	}

	pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
		tracing::warn!(kind = diagnostic.kind(), "{diagnostic}");
		if self.diagnostics.len() == MAX_DIAGNOSTICS {
			self.diagnostics.pop_front();
		}
		self.diagnostics.push_back(diagnostic);
	}

	/// Warnings raised since the last [`take_diagnostics`](Self::take_diagnostics).
	pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
		self.diagnostics.iter()
	}

	pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
		self.diagnostics.drain(..).collect()
	}

	pub fn namespaces(&self) -> &Namespaces {
		&self.namespaces
	}

	/// Deferred bindings still waiting to be resolved.
	pub fn pending_count(&self) -> usize {
		self.bindings.len()
	}

	/// Namespaces that have children waiting for them to be created.
	pub fn forward_count(&self) -> usize {
		self.forward.len()
	}

	/// Resolved symbols the next teardown will remove.
	pub fn tracked_count(&self) -> usize {
		self.tracker.len()
	}

	pub fn is_hook_enabled(&self) -> bool {
		self.hook.is_enabled()
	}

	pub fn is_loaded(&self, path: &Path) -> bool {
		self.ledger.contains(path)
	}

	pub fn loaded_units(&self) -> impl Iterator<Item = &Path> {
		self.ledger.iter()
	}
}

impl fmt::Debug for Autoloader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Autoloader")
			.field("paths", &self.paths)
			.field("permanent", &self.permanent)
			.field("extension", &self.loader.extension())
			.field("pending", &self.bindings.len())
			.field("forward", &self.forward.len())
			.field("tracked", &self.tracker.len())
			.field("loaded", &self.ledger.len())
			.field("hook_enabled", &self.hook.is_enabled())
			.finish_non_exhaustive()
	}
}
