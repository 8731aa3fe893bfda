// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The binding between a host object and its cached, validated components.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use ente_core::{Component, ComponentType, Components, Entity, ProviderError, UnboundProvider};

use crate::config::ProviderConfig;

/// The cache slot of one component type. Absent until a build starts.
enum Slot<H: ?Sized> {
    /// The factory is running on the given thread.
    Building(ThreadId),
    /// The build passed validation.
    Ready(Components<H>),
}

/// Cache state shared by all requests to one provider.
struct Resolution<H: ?Sized> {
    slots: HashMap<ComponentType, Slot<H>>,
    /// The type each blocked thread is waiting for.
    waiting: HashMap<ThreadId, ComponentType>,
}

impl<H: ?Sized> Resolution<H> {
    /// Returns `true` if `builder` is `current` or, following the chain of
    /// threads waiting on each other's builds, ends up waiting on `current`.
    fn waits_on(&self, builder: ThreadId, current: ThreadId) -> bool {
        let mut thread = builder;
        for _ in 0..=self.waiting.len() {
            if thread == current {
                return true;
            }
            match self.waiting.get(&thread).and_then(|ty| self.slots.get(ty)) {
                Some(Slot::Building(next)) => thread = *next,
                _ => return false,
            }
        }
        false
    }
}

/// Binds a host object to an [`UnboundProvider`].
///
/// The provider owns the [`Entity`] of the object and resolves the components
/// of each requested type through the unbound provider at most once. Every
/// resolved sequence is validated before it is cached, and the cached sequence
/// is handed out as-is (same allocation, same order) on every later request.
///
/// # Concurrency
///
/// A provider can be shared across threads. Resolution is single-flight per
/// component type: concurrent first requests for the same type wait for one
/// build instead of racing. No lock is held while the unbound provider runs,
/// so it may request other types from the same provider. A request that would
/// wait on itself (the type being built on this thread, or a cycle of threads
/// building types that need each other) fails with
/// [`ProviderError::CyclicResolution`] instead of blocking.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ente_provider::{Component, ComponentFactory, ComponentType, Entity, Provider};
///
/// const LOGGER: ComponentType = ComponentType::new("Logger");
/// static LOGGER_TYPES: [ComponentType; 1] = [LOGGER];
///
/// struct Course;
///
/// struct Logger {
///     entity: Entity<Course>,
/// }
///
/// impl Component<Course> for Logger {
///     fn entity(&self) -> &Entity<Course> {
///         &self.entity
///     }
///
///     fn component_types(&self) -> &[ComponentType] {
///         &LOGGER_TYPES
///     }
/// }
///
/// let factory = ComponentFactory::<Course>::new().attach(LOGGER, |entity| {
///     Ok(vec![Arc::new(Logger { entity: entity.clone() }) as Arc<dyn Component<Course>>])
/// });
/// let provider = Provider::new(Arc::new(Course), Arc::new(factory));
///
/// let loggers = provider.components_of_type(&LOGGER).unwrap();
/// assert_eq!(loggers.len(), 1);
/// assert!(Arc::ptr_eq(&loggers, &provider.components_of_type(&LOGGER).unwrap()));
/// ```
pub struct Provider<H: ?Sized> {
    entity: Entity<H>,
    unbound_provider: Arc<dyn UnboundProvider<H>>,
    config: ProviderConfig,
    resolution: Mutex<Resolution<H>>,
    resolved: Condvar,
}

impl<H: ?Sized + 'static> Provider<H> {
    /// Creates a provider for `object` with the default configuration.
    pub fn new(object: Arc<H>, unbound_provider: Arc<dyn UnboundProvider<H>>) -> Self {
        Self::with_config(object, unbound_provider, ProviderConfig::default())
    }

    /// Creates a provider for `object` with an explicit configuration.
    pub fn with_config(
        object: Arc<H>,
        unbound_provider: Arc<dyn UnboundProvider<H>>,
        config: ProviderConfig,
    ) -> Self {
        Self {
            entity: Entity::new(object),
            unbound_provider,
            config,
            resolution: Mutex::new(Resolution {
                slots: HashMap::new(),
                waiting: HashMap::new(),
            }),
            resolved: Condvar::new(),
        }
    }

    /// The component types the unbound provider declares, unmodified.
    pub fn component_types(&self) -> BTreeSet<ComponentType> {
        self.unbound_provider.component_types()
    }

    /// Returns the components of `component_type` for this provider's entity.
    ///
    /// The first request for a type builds the components through the unbound
    /// provider and validates them; later requests return the cached sequence.
    /// The type does not need to be declared by [`component_types`].
    ///
    /// # Errors
    ///
    /// Fails if the unbound provider fails, if a component does not implement
    /// `component_type`, if a component belongs to another entity, or if the
    /// request is part of a resolution cycle. Nothing is cached on failure, so
    /// the next request builds again.
    ///
    /// [`component_types`]: Provider::component_types
    pub fn components_of_type(
        &self,
        component_type: &ComponentType,
    ) -> ente_core::Result<Components<H>> {
        let current = thread::current().id();
        let mut resolution = lock(&self.resolution);
        loop {
            match resolution.slots.get(component_type) {
                Some(Slot::Ready(components)) => {
                    log::trace!("Serving cached components of type '{component_type}'.");
                    return Ok(Arc::clone(components));
                }
                Some(Slot::Building(builder)) => {
                    let builder = *builder;
                    if resolution.waits_on(builder, current) {
                        log::warn!("Cyclic resolution of components of type '{component_type}'.");
                        return Err(ProviderError::CyclicResolution {
                            component_type: component_type.clone(),
                        });
                    }
                    resolution.waiting.insert(current, component_type.clone());
                    resolution = self
                        .resolved
                        .wait(resolution)
                        .unwrap_or_else(PoisonError::into_inner);
                    resolution.waiting.remove(&current);
                }
                None => break,
            }
        }
        resolution
            .slots
            .insert(component_type.clone(), Slot::Building(current));
        drop(resolution);

        let _in_flight = InFlight {
            provider: self,
            component_type,
        };
        log::debug!("Resolving components of type '{component_type}'.");
        let components = self.build(component_type)?;
        lock(&self.resolution)
            .slots
            .insert(component_type.clone(), Slot::Ready(Arc::clone(&components)));
        Ok(components)
    }

    /// The entity of the bound host object.
    pub fn entity(&self) -> &Entity<H> {
        &self.entity
    }

    /// The bound host object.
    pub fn object(&self) -> &Arc<H> {
        self.entity.object()
    }

    /// The host objects the unbound provider considers valid owners.
    ///
    /// Informational only: the provider does not check its own object against it.
    pub fn owners(&self) -> Vec<Arc<H>> {
        self.unbound_provider.owners()
    }

    /// The unbound provider underlying this provider.
    pub fn unbound_provider(&self) -> &Arc<dyn UnboundProvider<H>> {
        &self.unbound_provider
    }

    /// The configuration of this provider.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns `true` if the components of `component_type` are cached.
    ///
    /// Never calls the unbound provider and never waits for a build in flight;
    /// a type still being built is not resolved.
    pub fn is_resolved(&self, component_type: &ComponentType) -> bool {
        matches!(
            lock(&self.resolution).slots.get(component_type),
            Some(Slot::Ready(_))
        )
    }

    /// The component types whose components are cached, in sorted order.
    pub fn resolved_types(&self) -> Vec<ComponentType> {
        let mut resolved: Vec<ComponentType> = lock(&self.resolution)
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Ready(_)))
            .map(|(ty, _)| ty.clone())
            .collect();
        resolved.sort();
        resolved
    }

    /// Runs the unbound provider and validates what it built.
    fn build(&self, component_type: &ComponentType) -> ente_core::Result<Components<H>> {
        let built = self
            .unbound_provider
            .build_components_of(component_type, &self.entity)
            .map_err(|source| {
                log::warn!(
                    "Unbound provider failed to build components of type '{component_type}': {source:#}"
                );
                ProviderError::Build {
                    component_type: component_type.clone(),
                    source,
                }
            })?;

        if let Err(e) = self.check_components(&built, component_type) {
            log::warn!("Rejected components built by the unbound provider: {e}");
            return Err(e);
        }

        log::debug!(
            "Resolved {} component(s) of type '{component_type}'.",
            built.len()
        );
        Ok(built.into())
    }

    /// Checks that every component implements `component_type` and, unless
    /// disabled, belongs to this provider's entity. Stops at the first failure.
    fn check_components(
        &self,
        components: &[Arc<dyn Component<H>>],
        component_type: &ComponentType,
    ) -> ente_core::Result<()> {
        for (index, component) in components.iter().enumerate() {
            if !component.implements(component_type) {
                return Err(ProviderError::TypeMismatch {
                    component_type: component_type.clone(),
                    index,
                    actual: component.type_name(),
                });
            }
            if self.config.check_ownership && component.entity() != &self.entity {
                return Err(ProviderError::OwnershipMismatch {
                    component_type: component_type.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

impl<H: ?Sized> fmt::Debug for Provider<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("entity", &self.entity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Clears the `Building` slot of a failed or panicked build and wakes the
/// requests waiting on it.
struct InFlight<'a, H: ?Sized> {
    provider: &'a Provider<H>,
    component_type: &'a ComponentType,
}

impl<H: ?Sized> Drop for InFlight<'_, H> {
    fn drop(&mut self) {
        let mut resolution = lock(&self.provider.resolution);
        if matches!(
            resolution.slots.get(self.component_type),
            Some(Slot::Building(_))
        ) {
            resolution.slots.remove(self.component_type);
        }
        drop(resolution);
        self.provider.resolved.notify_all();
    }
}

// The lock is never held while the unbound provider runs, so a poisoned state
// is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
