use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::NamespaceId;

/// Opaque host value bound to a symbol.
///
/// Cloning shares the allocation; equality is identity.
#[derive(Clone)]
pub struct Object(Arc<dyn Any + Send + Sync>);

impl Object {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self(Arc::new(value))
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		(*self.0).downcast_ref::<T>()
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Object(..)")
	}
}

/// Concrete value of a symbol.
#[derive(Debug, Clone)]
pub enum Value {
	/// A namespace container that can hold further symbols.
	Namespace(NamespaceId),
	/// Anything else the host binds.
	Object(Object),
}

impl Value {
	/// Wraps an arbitrary host value.
	pub fn object<T: Any + Send + Sync>(value: T) -> Self {
		Value::Object(Object::new(value))
	}

	pub fn as_namespace(&self) -> Option<NamespaceId> {
		match self {
			Value::Namespace(id) => Some(*id),
			Value::Object(_) => None,
		}
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Value::Object(object) => object.downcast_ref(),
			Value::Namespace(_) => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Namespace(a), Value::Namespace(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}
