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

//! Defines the contract of the entity-agnostic component factory.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::component::{Component, ComponentType};
use crate::entity::Entity;

/// A factory of components that is not yet bound to an entity.
///
/// Implementations declare which component types they serve and build the
/// components of one type for whatever entity they are handed. They are the
/// final arbiter of whether a type is supported: building an unsupported type
/// may legitimately return an empty sequence.
///
/// Every component returned by [`build_components_of`] must implement the
/// requested type and belong to the given entity. Providers verify both.
///
/// [`build_components_of`]: UnboundProvider::build_components_of
pub trait UnboundProvider<H: ?Sized>: Send + Sync {
    /// The component types this factory can build.
    fn component_types(&self) -> BTreeSet<ComponentType>;

    /// Builds the components of `component_type` for `entity`, in a meaningful
    /// order (priority, display order, ...).
    ///
    /// May be expensive: providers call it at most once per type and entity.
    fn build_components_of(
        &self,
        component_type: &ComponentType,
        entity: &Entity<H>,
    ) -> anyhow::Result<Vec<Arc<dyn Component<H>>>>;

    /// The host objects this factory considers valid owners.
    fn owners(&self) -> Vec<Arc<H>>;
}
