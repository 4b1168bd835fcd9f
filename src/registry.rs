//! The type-registry collaborator and its static-table implementation

use std::collections::HashMap;
use std::sync::Arc;

use crate::factory::{Construct, Deps, FactoryFn, Instance};
use crate::key::Key;

/// Lifecycle of an injectable type within one injector.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lifecycle {
    /// One instance, shared by every consumer on the same injector.
    Singleton,
    /// A fresh instance per lookup; the type's own singleton dependencies
    /// are still shared.
    Transient,
}

/// Read-side descriptor of an injectable type.
#[derive(Clone, Debug)]
pub struct Descriptor {
    /// Lifecycle flag.
    pub lifecycle: Lifecycle,
    /// Declared dependency keys, in positional constructor-argument order.
    pub dependencies: Vec<Key>,
}

/// A descriptor together with the factory that realizes it.
#[derive(Clone)]
pub struct Binding {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) dependencies: Vec<Key>,
    pub(crate) factory: FactoryFn,
}

impl Binding {
    /// The read-side descriptor of this binding.
    pub fn descriptor(&self) -> Descriptor {
        Descriptor {
            lifecycle: self.lifecycle,
            dependencies: self.dependencies.clone(),
        }
    }
}

/// Registry collaborator consumed by the engine: answers whether a key is
/// injectable and hands out its binding.
///
/// The engine is agnostic to how bindings are populated; [`StaticRegistry`]
/// is the explicit-table implementation, but hosts may supply generated or
/// composed registries behind this trait.
pub trait TypeRegistry: Send + Sync {
    /// Whether `key` has a registered binding.
    fn is_injectable(&self, key: Key) -> bool {
        self.binding_of(key).is_some()
    }

    /// The binding registered under `key`, if any.
    fn binding_of(&self, key: Key) -> Option<Binding>;
}

/// Explicit registration table, the standard [`TypeRegistry`].
///
/// Registration happens up front, before the registry is handed to an
/// [`Injector`](crate::Injector); the injector never writes back into it.
#[derive(Default)]
pub struct StaticRegistry {
    bindings: HashMap<Key, Binding>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` with the [`Lifecycle::Singleton`] lifecycle.
    pub fn singleton<T: Construct>(&mut self) -> &mut Self {
        self.register::<T>(Lifecycle::Singleton)
    }

    /// Register `T` with the [`Lifecycle::Transient`] lifecycle.
    pub fn transient<T: Construct>(&mut self) -> &mut Self {
        self.register::<T>(Lifecycle::Transient)
    }

    /// Register `T` under its own key, with the descriptor and constructor
    /// it declares through [`Construct`].
    pub fn register<T: Construct>(&mut self, lifecycle: Lifecycle) -> &mut Self {
        let factory: FactoryFn = Arc::new(|deps| Arc::new(T::construct(deps)) as Instance);
        self.bind(Key::of::<T>(), lifecycle, T::dependencies(), factory)
    }

    /// Register a closure-backed binding, for types that do not implement
    /// [`Construct`] or for bindings under a foreign key such as a
    /// trait-object key.
    pub fn register_factory<T, F>(
        &mut self,
        key: Key,
        lifecycle: Lifecycle,
        dependencies: Vec<Key>,
        factory: F,
    ) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(Deps<'_>) -> T + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move |deps| Arc::new(factory(deps)) as Instance);
        self.bind(key, lifecycle, dependencies, factory)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn bind(
        &mut self,
        key: Key,
        lifecycle: Lifecycle,
        dependencies: Vec<Key>,
        factory: FactoryFn,
    ) -> &mut Self {
        tracing::debug!(type_name = key.name(), lifecycle = ?lifecycle, "registered injectable type");
        self.bindings.insert(
            key,
            Binding {
                lifecycle,
                dependencies,
                factory,
            },
        );
        self
    }
}

impl TypeRegistry for StaticRegistry {
    fn is_injectable(&self, key: Key) -> bool {
        self.bindings.contains_key(&key)
    }

    fn binding_of(&self, key: Key) -> Option<Binding> {
        self.bindings.get(&key).cloned()
    }
}
