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

//! # Ente Provider
//!
//! Binds one host object to an [`UnboundProvider`] and serves its components.
//!
//! The [`Provider`] is the single authoritative place where the components of
//! an entity are resolved: it asks the unbound provider once per component
//! type, checks that every component has the requested type and belongs to the
//! provider's entity, and caches the result for the rest of its lifetime.
//!
//! [`UnboundProvider`]: ente_core::UnboundProvider

#![warn(missing_docs)]

pub mod config;
pub mod factory;
pub mod provider;

pub use config::ProviderConfig;
pub use factory::ComponentFactory;
pub use provider::Provider;

pub use ente_core::{
    Component, ComponentType, Components, Entity, ProviderError, Result, UnboundProvider,
};
