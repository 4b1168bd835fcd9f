//! Lifecycle-aware dependency injection
//!
//! `wireup` builds an object graph from registered type declarations. Each
//! injectable type declares its ordered constructor dependencies and a
//! lifecycle (shared singleton or fresh-per-request transient). Given a
//! root type, the engine discovers every transitively required type,
//! detects unsatisfiable or cyclic dependency chains, applies
//! caller-supplied type substitutions, and constructs instances in
//! dependency order.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use wireup::{Construct, Deps, Injector, Instance, Key, StaticRegistry, TypeRegistry};
//!
//! struct Database;
//! impl Construct for Database {
//!     fn construct(_: Deps<'_>) -> Self {
//!         Database
//!     }
//! }
//!
//! struct Api {
//!     db: Instance,
//! }
//! impl Construct for Api {
//!     fn dependencies() -> Vec<Key> {
//!         vec![Key::of::<Database>()]
//!     }
//!
//!     fn construct(deps: Deps<'_>) -> Self {
//!         Api { db: deps.instance(0) }
//!     }
//! }
//!
//! let mut registry = StaticRegistry::new();
//! registry.singleton::<Database>();
//! registry.singleton::<Api>();
//!
//! let registry: Arc<dyn TypeRegistry> = Arc::new(registry);
//! let mut injector = Injector::new(registry);
//!
//! let api = injector.build::<Api>().unwrap();
//! let again = injector.build::<Api>().unwrap();
//! assert!(Arc::ptr_eq(&api, &again));
//! assert!(api.db.is::<Database>());
//! ```
//!
//! ## Overrides
//!
//! An [`Overrides`] table substitutes one type identity for another across
//! the whole graph, scoped to one injector. Substitution is applied per
//! requesting type: an override whose replacement equals the requester is
//! left unapplied, so a replacement type may itself depend on the type it
//! replaces.
//!
//! ## Composition roots
//!
//! A type that implements [`Construct`] without being registered is a
//! composition root: [`Injector::build`] resolves its dependencies, then
//! constructs a fresh, uncached instance on every call.

pub mod error;
pub mod factory;
pub mod key;
pub mod overrides;
pub mod registry;
pub mod resolver;

pub use error::{Error, Result};
pub use factory::{Construct, Deps, Instance};
pub use key::Key;
pub use overrides::Overrides;
pub use registry::{Binding, Descriptor, Lifecycle, StaticRegistry, TypeRegistry};
pub use resolver::{bootstrap, Injector};
