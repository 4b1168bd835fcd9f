//! Type identity tokens

use std::any::{type_name, TypeId};
use std::fmt;

/// Opaque, comparable token identifying a constructible type.
///
/// Keys compare by [`TypeId`] identity, never structurally. The static type
/// name rides along for diagnostics. `T: ?Sized` is accepted so that
/// trait-object keys (`Key::of::<dyn Service>()`) can be used where a
/// registry binds an interface rather than a concrete type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    id: TypeId,
    name: &'static str,
}

impl Key {
    /// The key for type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Short type name (the trailing path segment), used in error messages.
    pub fn name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// Fully qualified type name.
    pub fn full_name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
