//! Caller-supplied type substitutions

use std::collections::HashMap;

use crate::key::Key;

/// Immutable table substituting one type identity for another, fixed for
/// the lifetime of one [`Injector`](crate::Injector).
///
/// Substitution is applied per requesting type, with a single exemption: an
/// override whose replacement equals the requester is left unapplied. That
/// lets an override type declare a genuine constructor dependency on the
/// type it replaces without resolving back into itself.
///
/// A cycle among override targets (`A` replaced by `B` and `B` by `A`) has
/// no defined resolution; it is neither detected nor supported.
#[derive(Default, Clone, Debug)]
pub struct Overrides {
    map: HashMap<Key, Key>,
}

impl Overrides {
    /// An empty override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute `Replacement` wherever `Declared` is requested.
    pub fn with<Declared, Replacement>(self) -> Self
    where
        Declared: ?Sized + 'static,
        Replacement: ?Sized + 'static,
    {
        self.with_keys(Key::of::<Declared>(), Key::of::<Replacement>())
    }

    /// Substitute `replacement` wherever `declared` is requested, by key.
    pub fn with_keys(mut self, declared: Key, replacement: Key) -> Self {
        self.map.insert(declared, replacement);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The effective dependency when `requester` declares `declared`.
    pub(crate) fn effective(&self, requester: Key, declared: Key) -> Key {
        match self.map.get(&declared) {
            Some(&replacement) if replacement != requester => replacement,
            _ => declared,
        }
    }
}
