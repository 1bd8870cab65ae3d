//! Hierarchical namespace storage.
//!
//! Containers live in an arena indexed by [`NamespaceId`]. A container that is
//! unbound from its parent is never freed: the host may still hold its id, the
//! same way a removed module object outlives its constant.

mod value;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
pub use value::{Object, Value};

/// Separator between the segments of a qualified name.
pub const SEPARATOR: &str = "::";

/// Arena index of a namespace container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u32);

impl NamespaceId {
	/// The unnamed top-level namespace.
	pub const ROOT: NamespaceId = NamespaceId(0);

	#[inline]
	fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NamespaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "NamespaceId({})", self.0)
	}
}

/// Stamp carried by every installed deferred binding.
///
/// Generations are never reused within one [`Autoloader`](crate::Autoloader),
/// so comparing `(source, generation)` tells whether a binding is still the
/// one a registry entry installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub(crate) u64);

/// Placeholder that loads `source` when referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
	/// Unit file or namespace directory backing the binding.
	pub source: PathBuf,
	/// Installation stamp.
	pub generation: Generation,
}

impl Deferred {
	/// Returns true if this is the binding installed for `source` at `generation`.
	#[inline]
	pub fn is(&self, source: &Path, generation: Generation) -> bool {
		self.generation == generation && self.source == source
	}
}

/// What a symbol in a container is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
	/// Not materialized yet.
	Deferred(Deferred),
	/// Concrete value.
	Defined(Value),
}

#[derive(Debug, Default)]
struct Container {
	name: Option<String>,
	entries: IndexMap<String, Binding>,
}

/// Arena of namespace containers rooted at [`NamespaceId::ROOT`].
///
/// Read access is public; mutation goes through the
/// [`Autoloader`](crate::Autoloader) so that namespace creation is observed.
///
/// # Panics
///
/// Methods panic when handed a [`NamespaceId`] from another arena that is out
/// of range for this one.
#[derive(Debug)]
pub struct Namespaces {
	containers: Vec<Container>,
}

impl Default for Namespaces {
	fn default() -> Self {
		Self::new()
	}
}

impl Namespaces {
	/// Creates an arena holding only the root namespace.
	pub fn new() -> Self {
		Self {
			containers: vec![Container {
				name: Some(String::new()),
				entries: IndexMap::new(),
			}],
		}
	}

	/// Number of containers ever created, root included.
	pub fn len(&self) -> usize {
		self.containers.len()
	}

	/// Always false; the root namespace exists from the start.
	pub fn is_empty(&self) -> bool {
		self.containers.is_empty()
	}

	/// Qualified name of a container; `""` for the root, `None` while anonymous.
	pub fn name(&self, id: NamespaceId) -> Option<&str> {
		self.containers[id.index()].name.as_deref()
	}

	/// Qualified name `symbol` would have inside `parent`, if `parent` is named.
	pub fn qualify(&self, parent: NamespaceId, symbol: &str) -> Option<String> {
		self.name(parent).map(|name| join(name, symbol))
	}

	/// Qualified name for messages, falling back to the bare symbol.
	pub fn display_name(&self, parent: NamespaceId, symbol: &str) -> String {
		self.qualify(parent, symbol)
			.unwrap_or_else(|| symbol.to_owned())
	}

	/// Returns the binding for `symbol` in `parent` without resolving it.
	pub fn binding(&self, parent: NamespaceId, symbol: &str) -> Option<&Binding> {
		self.containers[parent.index()].entries.get(symbol)
	}

	/// Returns the concrete value for `symbol`, ignoring deferred bindings.
	pub fn value(&self, parent: NamespaceId, symbol: &str) -> Option<&Value> {
		match self.binding(parent, symbol)? {
			Binding::Defined(value) => Some(value),
			Binding::Deferred(_) => None,
		}
	}

	/// Returns the deferred binding for `symbol`, if it is still pending.
	pub fn deferred(&self, parent: NamespaceId, symbol: &str) -> Option<&Deferred> {
		match self.binding(parent, symbol)? {
			Binding::Deferred(deferred) => Some(deferred),
			Binding::Defined(_) => None,
		}
	}

	/// Iterates the symbols of a container in binding order.
	pub fn entries(&self, id: NamespaceId) -> impl Iterator<Item = (&str, &Binding)> {
		self.containers[id.index()]
			.entries
			.iter()
			.map(|(symbol, binding)| (symbol.as_str(), binding))
	}

	/// Allocates a container, named or anonymous.
	pub(crate) fn alloc(&mut self, name: Option<String>) -> NamespaceId {
		let index = u32::try_from(self.containers.len()).expect("namespace arena exhausted");
		self.containers.push(Container {
			name,
			entries: IndexMap::new(),
		});
		NamespaceId(index)
	}

	/// Installs a deferred binding, returning what it replaced.
	pub(crate) fn install(&mut self, parent: NamespaceId, symbol: &str, deferred: Deferred) -> Option<Binding> {
		self.containers[parent.index()]
			.entries
			.insert(symbol.to_owned(), Binding::Deferred(deferred))
	}

	/// Binds a concrete value, returning what it replaced.
	///
	/// Binding an anonymous namespace gives it the qualified name of the slot.
	pub(crate) fn set(&mut self, parent: NamespaceId, symbol: &str, value: Value) -> Option<Binding> {
		if let Value::Namespace(id) = value
			&& self.containers[id.index()].name.is_none()
		{
			self.containers[id.index()].name = self.qualify(parent, symbol);
		}
		self.containers[parent.index()]
			.entries
			.insert(symbol.to_owned(), Binding::Defined(value))
	}

	/// Unbinds `symbol`, keeping the order of the remaining entries.
	pub(crate) fn remove(&mut self, parent: NamespaceId, symbol: &str) -> Option<Binding> {
		self.containers[parent.index()]
			.entries
			.shift_remove(symbol)
	}
}

/// Joins a parent qualified name and a symbol.
pub fn join(parent: &str, symbol: &str) -> String {
	if parent.is_empty() {
		symbol.to_owned()
	} else {
		format!("{parent}{SEPARATOR}{symbol}")
	}
}
