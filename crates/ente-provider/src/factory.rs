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

//! A closure-based [`UnboundProvider`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use ente_core::{Component, ComponentType, Entity, UnboundProvider};

type BuildFn<H> =
    dyn Fn(&Entity<H>) -> anyhow::Result<Vec<Arc<dyn Component<H>>>> + Send + Sync;

/// An [`UnboundProvider`] assembled from one build closure per component type.
///
/// The declared component types are exactly the attached ones. Building a type
/// without a closure yields no components rather than an error.
pub struct ComponentFactory<H: ?Sized> {
    builders: BTreeMap<ComponentType, Box<BuildFn<H>>>,
    owners: Vec<Arc<H>>,
}

impl<H: ?Sized + 'static> ComponentFactory<H> {
    /// Creates a factory without component types or owners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
            owners: Vec::new(),
        }
    }

    /// Attaches the build closure of `component_type`.
    ///
    /// A closure attached earlier for the same type is replaced.
    #[must_use]
    pub fn attach<F>(mut self, component_type: impl Into<ComponentType>, build: F) -> Self
    where
        F: Fn(&Entity<H>) -> anyhow::Result<Vec<Arc<dyn Component<H>>>> + Send + Sync + 'static,
    {
        let component_type = component_type.into();
        if self
            .builders
            .insert(component_type.clone(), Box::new(build))
            .is_some()
        {
            log::debug!("Replaced the build closure of component type '{component_type}'.");
        }
        self
    }

    /// Registers a host object as a valid owner.
    #[must_use]
    pub fn owner(mut self, object: Arc<H>) -> Self {
        self.owners.push(object);
        self
    }
}

impl<H: ?Sized + 'static> Default for ComponentFactory<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized + Send + Sync + 'static> UnboundProvider<H> for ComponentFactory<H> {
    fn component_types(&self) -> BTreeSet<ComponentType> {
        self.builders.keys().cloned().collect()
    }

    fn build_components_of(
        &self,
        component_type: &ComponentType,
        entity: &Entity<H>,
    ) -> anyhow::Result<Vec<Arc<dyn Component<H>>>> {
        match self.builders.get(component_type) {
            Some(build) => build(entity),
            None => {
                log::trace!("No build closure for component type '{component_type}'.");
                Ok(Vec::new())
            }
        }
    }

    fn owners(&self) -> Vec<Arc<H>> {
        self.owners.clone()
    }
}

impl<H: ?Sized> fmt::Debug for ComponentFactory<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("component_types", &self.builders.keys().collect::<Vec<_>>())
            .field("owners", &self.owners.len())
            .finish()
    }
}
