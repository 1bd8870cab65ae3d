//! Deferred loading of file-backed namespaces.
//!
//! An [`Autoloader`] owns a hierarchical namespace and an ordered list of root
//! directories. Scanning a root turns every unit file and sub-directory into a
//! deferred binding; the binding is materialized by the pluggable
//! [`UnitLoader`] the first time it is looked up.
//!
//! # Lifecycle
//!
//! * [`Autoloader::add_paths`]: register roots and scan them
//! * [`Autoloader::get`] / [`Autoloader::resolve`]: resolving lookups
//! * [`Autoloader::require`]: explicit unit loads, reconciled with the registry
//! * [`Autoloader::eager_load`]: materialize everything still pending
//! * [`Autoloader::reload`]: tear down what was loaded from reloadable roots and rescan
//! * [`Autoloader::clear`]: tear down and forget every root
//!
//! # Layout on disk
//!
//! ```text
//! root/
//!   foo_bar.unit        -> FooBar
//!   outer.unit          -> Outer
//!   outer/
//!     nested.unit       -> Outer::Nested
//!   implicit/           -> Implicit (empty namespace created on demand)
//!     thing.unit        -> Implicit::Thing
//! ```
//!
//! Children of a namespace that does not exist yet are held in a forward table
//! and installed the moment that namespace comes into existence, whichever
//! order the scan and the definition happen in.

mod autoloader;
pub mod conflict;
pub mod diagnostic;
pub mod error;
pub mod hook;
pub mod inflector;
pub mod ledger;
pub mod loader;
pub mod namespace;
pub mod paths;
pub mod pending;
pub mod registry;
pub mod symbol;
pub mod tracker;

pub use autoloader::Autoloader;
pub use conflict::{Collision, DuplicatePolicy, InsertAction};
pub use diagnostic::Diagnostic;
pub use error::{AutoloadError, Result};
pub use inflector::{BasicInflector, Inflector, is_valid_symbol};
pub use loader::{FnLoader, UnitLoader};
pub use namespace::{Binding, Deferred, Generation, NamespaceId, Namespaces, Object, Value};
pub use paths::AddMode;
pub use symbol::{ForwardRef, LoadedRecord, SymbolKind, SymbolRef};
