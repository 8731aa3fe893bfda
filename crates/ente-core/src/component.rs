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

//! Defines components and the tags naming their types.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;

/// The name of a capability that components can implement.
///
/// Component types form an open set: any string is a valid tag, and a single
/// component may implement several of them.
///
/// # Example
///
/// ```rust
/// use ente_core::ComponentType;
///
/// trait Logger {}
///
/// const LOGGER: ComponentType = ComponentType::new("Logger");
/// assert_eq!(LOGGER.name(), "Logger");
/// assert_eq!(ComponentType::named(String::from("Logger")), LOGGER);
/// assert!(ComponentType::of::<dyn Logger>().name().ends_with("Logger"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(Cow<'static, str>);

impl ComponentType {
    /// Creates a component type from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a component type from an owned name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Creates the component type named after the Rust type `T`.
    ///
    /// Usually `T` is a trait object such as `dyn Logger`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Returns the name of the component type.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ComponentType {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// Upcast to [`Any`], implemented for every `'static` type.
///
/// It is a supertrait of [`Component`] so that `dyn Component<H>` can be
/// downcast to its concrete type.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A behavioral unit attached to an entity of host objects of type `H`.
///
/// Components are produced by an [`UnboundProvider`](crate::UnboundProvider)
/// and shared (never exclusively owned) by the providers that cache them.
pub trait Component<H: ?Sized>: AsAny + Send + Sync {
    /// The entity this component belongs to.
    fn entity(&self) -> &Entity<H>;

    /// The component types this component implements.
    fn component_types(&self) -> &[ComponentType];

    /// Returns `true` if this component implements `component_type`.
    fn implements(&self, component_type: &ComponentType) -> bool {
        self.component_types().contains(component_type)
    }

    /// The name of the concrete Rust type, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<H: ?Sized + 'static> dyn Component<H> {
    /// Returns the component as a `T` if that is its concrete type.
    pub fn downcast_ref<T: Component<H>>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the concrete type of the component is `T`.
    pub fn is<T: Component<H>>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl<H: ?Sized + 'static> fmt::Debug for dyn Component<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name())
            .field("component_types", &self.component_types())
            .field("entity", self.entity())
            .finish()
    }
}

/// The validated, immutable sequence of components a provider hands out.
///
/// Clones share the same allocation, so callers can compare results with
/// [`Arc::ptr_eq`].
pub type Components<H> = Arc<[Arc<dyn Component<H>>]>;

#[cfg(test)]
mod tests {
    use super::*;

    const LOGGER: ComponentType = ComponentType::new("Logger");
    const RENDERER: ComponentType = ComponentType::new("Renderer");

    static LOGGER_TYPES: [ComponentType; 1] = [LOGGER];
    static BANNER_TYPES: [ComponentType; 2] = [LOGGER, RENDERER];

    struct Host;

    struct FileLogger {
        entity: Entity<Host>,
    }

    impl Component<Host> for FileLogger {
        fn entity(&self) -> &Entity<Host> {
            &self.entity
        }

        fn component_types(&self) -> &[ComponentType] {
            &LOGGER_TYPES
        }
    }

    struct Banner {
        entity: Entity<Host>,
    }

    impl Component<Host> for Banner {
        fn entity(&self) -> &Entity<Host> {
            &self.entity
        }

        fn component_types(&self) -> &[ComponentType] {
            &BANNER_TYPES
        }
    }

    #[test]
    fn test_component_type_equality_ignores_ownership() {
        assert_eq!(ComponentType::new("Logger"), ComponentType::named("Logger"));
        assert_eq!(ComponentType::from("Logger"), LOGGER);
        assert_ne!(LOGGER, RENDERER);
        assert_eq!(LOGGER.to_string(), "Logger");
    }

    #[test]
    fn test_component_type_of_rust_type() {
        let ty = ComponentType::of::<FileLogger>();
        assert_eq!(ty.name(), std::any::type_name::<FileLogger>());
    }

    #[test]
    fn test_implements_checks_declared_types() {
        let entity = Entity::new(Arc::new(Host));
        let logger = FileLogger {
            entity: entity.clone(),
        };
        let banner = Banner { entity };

        assert!(logger.implements(&LOGGER));
        assert!(!logger.implements(&RENDERER));
        assert!(banner.implements(&LOGGER));
        assert!(banner.implements(&RENDERER));
    }

    #[test]
    fn test_downcast_trait_object() {
        let entity = Entity::new(Arc::new(Host));
        let component: Arc<dyn Component<Host>> = Arc::new(FileLogger {
            entity: entity.clone(),
        });

        assert!(component.is::<FileLogger>());
        assert!(!component.is::<Banner>());
        let logger = component
            .downcast_ref::<FileLogger>()
            .expect("concrete type should be FileLogger");
        assert_eq!(logger.entity, entity);
        assert!(component.downcast_ref::<Banner>().is_none());
    }

    #[test]
    fn test_type_name_reports_concrete_type() {
        let component: Arc<dyn Component<Host>> = Arc::new(Banner {
            entity: Entity::new(Arc::new(Host)),
        });
        assert!(component.type_name().ends_with("Banner"));
    }
}
