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

//! Configuration of a [`Provider`](crate::Provider).

/// Configuration for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Whether built components must belong to the provider's entity.
    ///
    /// When disabled, the ownership check is skipped and components of any
    /// entity are accepted. Type checks always run.
    pub check_ownership: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            check_ownership: true,
        }
    }
}

impl ProviderConfig {
    /// Returns a configuration that accepts components of any entity.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            check_ownership: false,
        }
    }
}
