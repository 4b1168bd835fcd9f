//! The resolution engine
//!
//! Resolves an object graph in three phases that all run synchronously
//! inside one [`Injector::build`] call:
//!
//! 1. **Discovery** walks the registry from the requested roots, applying
//!    override substitution to every declared dependency and failing fast
//!    on any reachable non-injectable type.
//! 2. **Construction** repeatedly builds any discovered type whose
//!    effective dependencies are already resolved; a stall with work left
//!    over is a dependency cycle.
//! 3. **Lookup** reads the requested instance back out of the resolved
//!    registry, memoized for singletons and freshly constructed for
//!    transients.
//!
//! The discovered graph and the resolved registry persist for the
//! injector's lifetime, so repeated `build` calls share singleton
//! instances and skip re-discovery. Separate injectors share nothing.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::factory::{Construct, Deps, FactoryFn, Instance};
use crate::key::Key;
use crate::overrides::Overrides;
use crate::registry::{Binding, Lifecycle, TypeRegistry};

/// What the resolved registry stores per key.
enum Provider {
    /// One memoized instance, handed out to every consumer.
    Singleton(Instance),
    /// Deferred constructor: a fresh instance per fetch, with dependency
    /// instances pulled through the resolved registry at fetch time.
    Transient {
        dependencies: Vec<Key>,
        factory: FactoryFn,
    },
}

/// The engine facade: owns the override map, the discovered graph, and the
/// resolved registry for one isolated scope.
///
/// `build` takes `&mut self`, so the borrow checker enforces sequential
/// resolution per injector; injectors never share state with each other.
pub struct Injector {
    registry: Arc<dyn TypeRegistry>,
    overrides: Overrides,
    discovered: IndexMap<Key, Binding>,
    resolved: IndexMap<Key, Provider>,
}

/// One-shot construction of `T` on a fresh [`Injector`].
pub fn bootstrap<T: Construct>(
    registry: Arc<dyn TypeRegistry>,
    overrides: Overrides,
) -> Result<Arc<T>> {
    Injector::with_overrides(registry, overrides).build()
}

impl Injector {
    /// Injector with no overrides.
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self::with_overrides(registry, Overrides::new())
    }

    /// Injector applying `overrides` to every dependency it resolves.
    pub fn with_overrides(registry: Arc<dyn TypeRegistry>, overrides: Overrides) -> Self {
        Self {
            registry,
            overrides,
            discovered: IndexMap::new(),
            resolved: IndexMap::new(),
        }
    }

    /// Build an instance of `T`, resolving its full dependency graph.
    ///
    /// An injectable `T` participates in the resolved registry like any
    /// other discovered type, so a singleton root comes back shared across
    /// calls. A `T` without a registered binding is treated as a
    /// composition root: only its (override-adjusted) dependencies are
    /// resolved, and a fresh instance is constructed on every call, never
    /// cached.
    pub fn build<T: Construct>(&mut self) -> Result<Arc<T>> {
        let key = Key::of::<T>();
        if self.registry.is_injectable(key) {
            self.resolve(&[key])?;
            let instance = self.instance_of(key)?;
            instance.downcast::<T>().map_err(|_| {
                Error::internal(format!(
                    "resolved entry for {} does not hold an instance of {}",
                    key.name(),
                    key.name()
                ))
            })
        } else {
            debug!(type_name = key.name(), "building composition root");
            let dependencies: Vec<Key> = T::dependencies()
                .into_iter()
                .map(|dep| self.overrides.effective(key, dep))
                .collect();
            self.resolve(&dependencies)?;
            let instances = self.instances_of(&dependencies)?;
            Ok(Arc::new(T::construct(Deps::new(&instances))))
        }
    }

    /// Discover everything reachable from `roots`, then construct whatever
    /// is not yet in the resolved registry.
    fn resolve(&mut self, roots: &[Key]) -> Result<()> {
        let pending = self.discover(roots)?;
        self.construct_pending(pending)
    }

    /// Walk the registry from `roots`, recording an override-adjusted
    /// binding for every reachable type. Returns the reachable keys not
    /// yet resolved, in discovery order.
    ///
    /// Already-discovered types are not re-queried, but their dependencies
    /// are still traversed so that later builds reach everything below
    /// them.
    fn discover(&mut self, roots: &[Key]) -> Result<Vec<Key>> {
        let mut pending = Vec::new();
        let mut frontier: VecDeque<Key> = roots.iter().copied().collect();
        let mut seen: HashSet<Key> = frontier.iter().copied().collect();

        while let Some(next) = frontier.pop_front() {
            let binding = match self.discovered.get(&next).cloned() {
                Some(binding) => binding,
                None => {
                    let declared = self.registry.binding_of(next).ok_or(Error::NotInjectable {
                        type_name: next.name(),
                    })?;
                    let dependencies: Vec<Key> = declared
                        .dependencies
                        .iter()
                        .map(|dep| self.overrides.effective(next, *dep))
                        .collect();
                    let adjusted = Binding {
                        dependencies,
                        ..declared
                    };
                    debug!(type_name = next.name(), "discovered injectable type");
                    self.discovered.insert(next, adjusted.clone());
                    adjusted
                }
            };

            for dep in &binding.dependencies {
                if seen.insert(*dep) {
                    if !self.discovered.contains_key(dep) && !self.registry.is_injectable(*dep) {
                        return Err(Error::DependencyNotInjectable {
                            dependency: dep.name(),
                            requester: next.name(),
                        });
                    }
                    frontier.push_back(*dep);
                }
            }

            if !self.resolved.contains_key(&next) {
                pending.push(next);
            }
        }

        Ok(pending)
    }

    /// Construct every pending entry whose effective dependencies are all
    /// resolved, repeating until the set drains or stalls.
    ///
    /// Among simultaneously resolvable entries the first in discovery
    /// order is constructed next; construction order is deterministic for
    /// a given registry and override map.
    fn construct_pending(&mut self, mut pending: Vec<Key>) -> Result<()> {
        while !pending.is_empty() {
            let position = pending.iter().position(|key| {
                self.discovered.get(key).is_some_and(|binding| {
                    binding
                        .dependencies
                        .iter()
                        .all(|dep| self.resolved.contains_key(dep))
                })
            });
            let Some(position) = position else {
                return Err(Error::DependencyCycle {
                    pending: self.describe_stalled(&pending),
                });
            };

            let key = pending.remove(position);
            let binding = self.node(key)?;
            debug!(
                type_name = key.name(),
                lifecycle = ?binding.lifecycle,
                "installing provider"
            );
            let provider = match binding.lifecycle {
                Lifecycle::Singleton => {
                    let instances = self.instances_of(&binding.dependencies)?;
                    Provider::Singleton((binding.factory)(Deps::new(&instances)))
                }
                Lifecycle::Transient => Provider::Transient {
                    dependencies: binding.dependencies,
                    factory: binding.factory,
                },
            };
            self.resolved.insert(key, provider);
        }

        Ok(())
    }

    /// Fetch an instance for a resolved key: the memoized singleton, or a
    /// fresh transient construction.
    ///
    /// Transient fetches recurse through the resolved registry, so a
    /// transient's own singleton dependencies stay shared. The recursion
    /// terminates because providers were installed in dependency order.
    fn instance_of(&self, key: Key) -> Result<Instance> {
        let provider = self.resolved.get(&key).ok_or_else(|| {
            Error::internal(format!("{} missing from the resolved registry", key.name()))
        })?;
        match provider {
            Provider::Singleton(instance) => Ok(instance.clone()),
            Provider::Transient {
                dependencies,
                factory,
            } => {
                let instances = self.instances_of(dependencies)?;
                Ok(factory(Deps::new(&instances)))
            }
        }
    }

    fn instances_of(&self, keys: &[Key]) -> Result<Vec<Instance>> {
        keys.iter().map(|key| self.instance_of(*key)).collect()
    }

    fn node(&self, key: Key) -> Result<Binding> {
        self.discovered.get(&key).cloned().ok_or_else(|| {
            Error::internal(format!("{} missing from the discovered graph", key.name()))
        })
    }

    /// Format the stalled pending set for [`Error::DependencyCycle`]:
    /// `Name (-> dep1,dep2,...)` per entry, joined by `, `.
    fn describe_stalled(&self, pending: &[Key]) -> String {
        pending
            .iter()
            .map(|key| {
                let dependencies = self
                    .discovered
                    .get(key)
                    .map(|binding| {
                        binding
                            .dependencies
                            .iter()
                            .map(Key::name)
                            .collect::<Vec<_>>()
                            .join(",")
                    })
                    .unwrap_or_default();
                format!("{} (-> {})", key.name(), dependencies)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
