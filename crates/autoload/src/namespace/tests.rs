use std::path::PathBuf;

use super::*;

fn deferred(source: &str, generation: u64) -> Deferred {
	Deferred {
		source: PathBuf::from(source),
		generation: Generation(generation),
	}
}

#[test]
fn test_root_is_named_empty() {
	let ns = Namespaces::new();
	assert_eq!(ns.name(NamespaceId::ROOT), Some(""));
	assert_eq!(ns.qualify(NamespaceId::ROOT, "Foo").as_deref(), Some("Foo"));
	assert_eq!(ns.len(), 1);
}

#[test]
fn test_binding_anonymous_namespace_names_it() {
	let mut ns = Namespaces::new();
	let outer = ns.alloc(Some("Outer".into()));
	ns.set(NamespaceId::ROOT, "Outer", Value::Namespace(outer));

	let anon = ns.alloc(None);
	assert_eq!(ns.name(anon), None);
	ns.set(outer, "Inner", Value::Namespace(anon));
	assert_eq!(ns.name(anon), Some("Outer::Inner"));

	// Aliasing keeps the first name.
	ns.set(NamespaceId::ROOT, "Alias", Value::Namespace(anon));
	assert_eq!(ns.name(anon), Some("Outer::Inner"));
}

#[test]
fn test_children_of_anonymous_namespace_stay_anonymous() {
	let mut ns = Namespaces::new();
	let anon = ns.alloc(None);
	let child = ns.alloc(None);
	ns.set(anon, "Child", Value::Namespace(child));
	assert_eq!(ns.name(child), None);
	assert_eq!(ns.display_name(anon, "Child"), "Child");
}

#[test]
fn test_deferred_and_defined_views() {
	let mut ns = Namespaces::new();
	ns.install(NamespaceId::ROOT, "Foo", deferred("/r/foo.unit", 1));
	assert!(ns.value(NamespaceId::ROOT, "Foo").is_none());
	let d = ns.deferred(NamespaceId::ROOT, "Foo").unwrap();
	assert!(d.is(&PathBuf::from("/r/foo.unit"), Generation(1)));
	assert!(!d.is(&PathBuf::from("/r/foo.unit"), Generation(2)));

	ns.set(NamespaceId::ROOT, "Foo", Value::object(7_i64));
	assert!(ns.deferred(NamespaceId::ROOT, "Foo").is_none());
	assert_eq!(
		ns.value(NamespaceId::ROOT, "Foo").and_then(|v| v.downcast_ref::<i64>()),
		Some(&7)
	);
}

#[test]
fn test_remove_preserves_order() {
	let mut ns = Namespaces::new();
	for name in ["A", "B", "C"] {
		ns.set(NamespaceId::ROOT, name, Value::object(()));
	}
	ns.remove(NamespaceId::ROOT, "B");
	let names: Vec<_> = ns.entries(NamespaceId::ROOT).map(|(name, _)| name).collect();
	assert_eq!(names, ["A", "C"]);
}

#[test]
fn test_object_equality_is_identity() {
	let a = Value::object(1_i64);
	let b = Value::object(1_i64);
	assert_eq!(a, a.clone());
	assert_ne!(a, b);
	assert_ne!(a, Value::Namespace(NamespaceId::ROOT));
}

#[test]
fn test_join() {
	assert_eq!(join("", "Foo"), "Foo");
	assert_eq!(join("Outer", "Foo"), "Outer::Foo");
}
