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

//! # Ente Core
//!
//! Foundational crate containing the contracts of the entity-component binding.
//!
//! A host application owns domain objects. An [`Entity`] gives such an object
//! an identity, [`Component`]s attach behavior to it, and an [`UnboundProvider`]
//! knows how to build components of a given [`ComponentType`] for any entity.
//! Binding all of this to one concrete object is the job of `ente-provider`.

#![warn(missing_docs)]

pub mod component;
pub mod entity;
pub mod error;
pub mod unbound;

pub use component::{AsAny, Component, ComponentType, Components};
pub use entity::Entity;
pub use error::{ProviderError, Result};
pub use unbound::UnboundProvider;
