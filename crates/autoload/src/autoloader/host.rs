//! Namespace operations exposed to units and integrators.

use super::Autoloader;
use crate::error::{AutoloadError, Result};
use crate::namespace::{Binding, NamespaceId, SEPARATOR, Value, join};

impl Autoloader {
	/// Looks up `name` in `parent`, resolving a deferred binding on the way.
	///
	/// Returns `Ok(None)` if nothing is bound, or if the binding belongs to a
	/// unit that is loading right now (so that the unit can define it).
	pub fn get(&mut self, parent: NamespaceId, name: &str) -> Result<Option<Value>> {
		let deferred = match self.namespaces.binding(parent, name) {
			None => return Ok(None),
			Some(Binding::Defined(value)) => return Ok(Some(value.clone())),
			Some(Binding::Deferred(deferred)) => deferred.clone(),
		};
		if self.loading.contains(&deferred.source) {
			return Ok(None);
		}

		self.require(&deferred.source)?;

		match self.namespaces.binding(parent, name) {
			Some(Binding::Defined(value)) => Ok(Some(value.clone())),
			Some(Binding::Deferred(current)) if *current != deferred => Ok(None),
			still_deferred => {
				if still_deferred.is_some() {
					self.namespaces.remove(parent, name);
				}
				if self
					.bindings
					.get(&deferred.source)
					.is_some_and(|entry| entry.generation == deferred.generation)
				{
					self.bindings.remove(&deferred.source);
					if self.bindings.is_empty() {
						self.hook.disable();
					}
				}
				Err(AutoloadError::NotDefined {
					name: self.namespaces.display_name(parent, name),
					path: deferred.source,
				})
			}
		}
	}

	/// Resolves a `::`-separated path from the root namespace.
	pub fn resolve(&mut self, path: &str) -> Result<Option<Value>> {
		let mut segments = path.split(SEPARATOR);
		let Some(first) = segments.next() else {
			return Ok(None);
		};
		let mut value = self.get(NamespaceId::ROOT, first)?;
		let mut walked = first.to_owned();
		for segment in segments {
			let parent = match value {
				None => return Ok(None),
				Some(Value::Namespace(id)) => id,
				Some(Value::Object(_)) => return Err(AutoloadError::NotANamespace(walked)),
			};
			value = self.get(parent, segment)?;
			walked = join(&walked, segment);
		}
		Ok(value)
	}

	/// Opens the namespace `name` in `parent`, creating it if needed.
	///
	/// A deferred binding is resolved first, so a unit reopening a namespace
	/// sees what its directory or unit file defined. Creating a named
	/// namespace emits a creation event.
	pub fn define_namespace(&mut self, parent: NamespaceId, name: &str) -> Result<NamespaceId> {
		match self.get(parent, name)? {
			Some(Value::Namespace(id)) => Ok(id),
			Some(Value::Object(_)) => Err(AutoloadError::NotANamespace(
				self.namespaces.display_name(parent, name),
			)),
			None => Ok(self.create_namespace(parent, name)),
		}
	}

	pub(crate) fn create_namespace(&mut self, parent: NamespaceId, name: &str) -> NamespaceId {
		let qualified_name = self.namespaces.qualify(parent, name);
		let id = self.namespaces.alloc(qualified_name);
		self.namespaces.set(parent, name, Value::Namespace(id));
		self.namespace_created(id);
		id
	}

	/// Creates an anonymous namespace.
	///
	/// Binding it with [`define`](Self::define) names it, but emits no event;
	/// call [`namespace_became_defined`](Self::namespace_became_defined) to
	/// install children pending under its new name.
	pub fn new_namespace(&mut self) -> NamespaceId {
		self.namespaces.alloc(None)
	}

	/// Binds a concrete value, replacing whatever was bound.
	pub fn define(&mut self, parent: NamespaceId, name: &str, value: Value) {
		self.namespaces.set(parent, name, value);
	}

	/// Unbinds `name` without resolving it.
	pub fn remove(&mut self, parent: NamespaceId, name: &str) -> Option<Binding> {
		self.namespaces.remove(parent, name)
	}
}
