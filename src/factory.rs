//! Construction-side contracts: instances, resolved arguments, and the
//! [`Construct`] trait

use std::any::Any;
use std::sync::Arc;

use crate::key::Key;

/// A constructed object, held as an opaque reference-counted value.
///
/// Singleton sharing is observable through [`Arc::ptr_eq`]; typed access
/// goes through [`Arc::downcast`] or the `dyn Any` downcast methods.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Factory closure stored per binding: ordered resolved dependencies in,
/// fresh instance out.
pub(crate) type FactoryFn = Arc<dyn Fn(Deps<'_>) -> Instance + Send + Sync>;

/// Ordered, already-resolved constructor arguments.
///
/// Positions match the declared dependency list. When an override is in
/// play, the instance at a position carries the replacement type, so
/// overridable slots are best stored as [`Instance`] (or downcast to a
/// shared trait object) rather than to the declared concrete type.
#[derive(Clone, Copy)]
pub struct Deps<'a> {
    resolved: &'a [Instance],
}

impl<'a> Deps<'a> {
    pub(crate) fn new(resolved: &'a [Instance]) -> Self {
        Self { resolved }
    }

    /// Number of resolved arguments.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// The resolved instance at `index`, in declared dependency order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. The engine always supplies
    /// exactly as many instances as the binding declared dependencies, so
    /// an out-of-bounds index is a registration bug in the host.
    pub fn instance(&self, index: usize) -> Instance {
        self.resolved[index].clone()
    }

    /// Typed access to the argument at `index`.
    ///
    /// Returns `None` when the instance is not a `T`, which happens when an
    /// override substituted another type into this position, or when
    /// `index` is out of bounds.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
        self.resolved
            .get(index)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }
}

/// Implemented by a type that exposes its own descriptor and constructor.
///
/// Registered types go through [`StaticRegistry::singleton`] and
/// [`StaticRegistry::transient`](crate::StaticRegistry::transient), which
/// read the descriptor from this trait. Composition roots implement it
/// without registering, which is what lets
/// [`Injector::build`](crate::Injector::build) construct them directly.
///
/// [`StaticRegistry::singleton`]: crate::StaticRegistry::singleton
pub trait Construct: Send + Sync + Sized + 'static {
    /// Declared dependency keys, in positional constructor-argument order.
    fn dependencies() -> Vec<Key> {
        Vec::new()
    }

    /// Build an instance from resolved dependencies, ordered as declared.
    fn construct(deps: Deps<'_>) -> Self;
}
