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

//! Defines the errors raised while resolving the components of an entity.
//!
//! Every variant describes a malformed unbound provider, never an expected
//! runtime condition. They are not retried and never cached: asking again
//! runs the unbound provider again.

use thiserror::Error;

use crate::component::ComponentType;

/// An error raised by a provider while resolving components of one type.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The unbound provider failed to build the components.
    #[error("failed to build components of type '{component_type}'")]
    Build {
        /// The requested component type.
        component_type: ComponentType,
        /// The error reported by the unbound provider.
        #[source]
        source: anyhow::Error,
    },
    /// A built component does not implement the requested type.
    #[error(
        "expected built components to have the type '{component_type}', got '{actual}' at position {index}"
    )]
    TypeMismatch {
        /// The requested component type.
        component_type: ComponentType,
        /// The position of the offending component in the built sequence.
        index: usize,
        /// The concrete type name of the offending component.
        actual: &'static str,
    },
    /// A built component belongs to another entity than the provider's.
    #[error(
        "expected built components of type '{component_type}' to have the same entity as the provider, position {index} does not"
    )]
    OwnershipMismatch {
        /// The requested component type.
        component_type: ComponentType,
        /// The position of the offending component in the built sequence.
        index: usize,
    },
    /// The type is already being resolved by a request that, directly or
    /// through other threads, waits on this one.
    #[error("cyclic resolution of components of type '{component_type}'")]
    CyclicResolution {
        /// The requested component type.
        component_type: ComponentType,
    },
}

impl ProviderError {
    /// The component type whose resolution failed.
    pub fn component_type(&self) -> &ComponentType {
        match self {
            ProviderError::Build { component_type, .. }
            | ProviderError::TypeMismatch { component_type, .. }
            | ProviderError::OwnershipMismatch { component_type, .. }
            | ProviderError::CyclicResolution { component_type } => component_type,
        }
    }
}

/// A specialized `Result` for component resolution.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    const LOGGER: ComponentType = ComponentType::new("Logger");

    #[test]
    fn test_build_error_keeps_source() {
        let err = ProviderError::Build {
            component_type: LOGGER,
            source: anyhow::anyhow!("database unavailable"),
        };

        assert_eq!(
            err.to_string(),
            "failed to build components of type 'Logger'"
        );
        let source = err.source().expect("build error should have a source");
        assert_eq!(source.to_string(), "database unavailable");
    }

    #[test]
    fn test_mismatch_messages() {
        let type_err = ProviderError::TypeMismatch {
            component_type: LOGGER,
            index: 2,
            actual: "app::Banner",
        };
        assert_eq!(
            type_err.to_string(),
            "expected built components to have the type 'Logger', got 'app::Banner' at position 2"
        );

        let owner_err = ProviderError::OwnershipMismatch {
            component_type: LOGGER,
            index: 0,
        };
        assert!(owner_err.to_string().contains("same entity"));
        assert_eq!(owner_err.component_type(), &LOGGER);

        let cycle_err = ProviderError::CyclicResolution {
            component_type: LOGGER,
        };
        assert_eq!(
            cycle_err.to_string(),
            "cyclic resolution of components of type 'Logger'"
        );
    }
}
