//! Registry transitions: install, resolve, flush, teardown.

use std::path::Path;

use tracing::{debug, trace};

use super::Autoloader;
use crate::error::Result;
use crate::namespace::{Binding, Deferred, NamespaceId, Value};
use crate::registry::Registered;
use crate::symbol::{LoadedRecord, SymbolRef};

impl Autoloader {
	/// Installs a deferred binding for `symbol` and tracks it by source path.
	pub(crate) fn register(&mut self, symbol: SymbolRef) {
		if self.bindings.is_empty() {
			self.hook.enable();
		}
		if let Some(previous) = self.bindings.get(&symbol.source).cloned() {
			self.deregister(&previous);
		}
		let generation = self.bindings.next_generation();
		self.namespaces.install(
			symbol.owner,
			&symbol.name,
			Deferred {
				source: symbol.source.clone(),
				generation,
			},
		);
		trace!(
			symbol = %symbol.qualified_name,
			source = %symbol.source.display(),
			kind = ?symbol.kind,
			generation = generation.0,
			"registered deferred binding"
		);
		self.bindings.insert(Registered { symbol, generation });
	}

	/// Forgets `entry`, removing its binding only if it is still the one
	/// `entry` installed.
	pub(crate) fn deregister(&mut self, entry: &Registered) {
		self.uninstall(entry);
		if self
			.bindings
			.get(&entry.symbol.source)
			.is_some_and(|current| current.generation == entry.generation)
		{
			self.bindings.remove(&entry.symbol.source);
		}
	}

	fn uninstall(&mut self, entry: &Registered) {
		let symbol = &entry.symbol;
		let owned = self
			.namespaces
			.deferred(symbol.owner, &symbol.name)
			.is_some_and(|deferred| deferred.is(&symbol.source, entry.generation));
		if owned {
			self.namespaces.remove(symbol.owner, &symbol.name);
		} else {
			trace!(symbol = %symbol.qualified_name, "binding superseded, leaving it");
		}
	}

	/// Called once the unit or directory at `source` has materialized.
	pub(crate) fn on_resolved(&mut self, source: &Path) {
		let Some(entry) = self.bindings.remove(source) else {
			return;
		};
		let symbol = entry.symbol;
		let value = self.namespaces.value(symbol.owner, &symbol.name).cloned();
		trace!(symbol = %symbol.qualified_name, defined = value.is_some(), "resolved");

		// Tracked even when the unit failed to define the symbol, so that the
		// next teardown drops it from the ledger.
		if !self.is_permanent(&symbol.root) {
			self.tracker.add(LoadedRecord {
				owner: symbol.owner,
				name: symbol.name,
				source: symbol.source,
			});
		}
		if let Some(Value::Namespace(id)) = value {
			self.namespace_became_defined(id);
		}
		if self.bindings.is_empty() {
			self.hook.disable();
		}
	}

	/// Installs the children pending under a namespace the host created
	/// without emitting a creation event, such as an anonymous namespace that
	/// was later bound to a name.
	pub fn namespace_became_defined(&mut self, id: NamespaceId) {
		self.hook.announce(id);
		self.drain_hook();
	}

	/// Emits the creation event for a freshly created named namespace.
	pub(crate) fn namespace_created(&mut self, id: NamespaceId) {
		if self.hook.publish(id) {
			self.drain_hook();
		}
	}

	/// Flushes queued namespaces until the queue is empty. Events queued by a
	/// flush are handled by the same loop.
	fn drain_hook(&mut self) {
		if !self.hook.begin_drain() {
			return;
		}
		while let Some(id) = self.hook.next() {
			if let Some(name) = self.namespaces.name(id).map(str::to_owned) {
				self.flush(&name, id);
			}
		}
		self.hook.end_drain();
	}

	fn flush(&mut self, name: &str, namespace: NamespaceId) {
		let Some(children) = self.forward.take(name) else {
			return;
		};
		debug!(namespace = name, count = children.len(), "flushing pending children");
		for child in children {
			match self.namespaces.binding(namespace, &child.name) {
				None => self.register(child.into_symbol(namespace)),
				// Already created by hand: its own pending children follow it.
				Some(Binding::Defined(Value::Namespace(existing))) => {
					let existing = *existing;
					self.hook.announce(existing);
				}
				Some(_) => {
					trace!(symbol = %child.qualified_name, "already bound, not shadowing");
				}
			}
		}
	}

	/// Drops every pending child and uninstalls every deferred binding.
	pub(crate) fn remove_all(&mut self) {
		self.forward.clear();
		for entry in self.bindings.take_all() {
			self.uninstall(&entry);
		}
		self.hook.disable();
	}

	/// Resolves every pending deferred binding, including the ones that
	/// resolving others registers.
	///
	/// Stops at the first failing unit.
	pub fn eager_load(&mut self) -> Result<()> {
		while let Some(entry) = self.bindings.first().cloned() {
			let symbol = &entry.symbol;
			self.get(symbol.owner, &symbol.name)?;
			let stale = self
				.bindings
				.get(&symbol.source)
				.is_some_and(|current| current.generation == entry.generation);
			if stale {
				debug!(symbol = %symbol.qualified_name, "binding superseded, dropping entry");
				self.bindings.remove(&symbol.source);
				if self.bindings.is_empty() {
					self.hook.disable();
				}
			}
		}
		Ok(())
	}
}
