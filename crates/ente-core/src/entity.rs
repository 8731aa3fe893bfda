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

//! Defines the identity wrapper around a host domain object.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The identity of a host domain object.
///
/// An `Entity` wraps exactly one shared reference to the host object and never
/// changes after construction. Two entities are equal if and only if they wrap
/// the *same* object (same allocation); the object's contents are never compared.
/// Cloning an `Entity` therefore yields the same entity, not a copy of it.
pub struct Entity<H: ?Sized> {
    object: Arc<H>,
}

impl<H: ?Sized> Entity<H> {
    /// Creates the entity of the given host object.
    pub fn new(object: Arc<H>) -> Self {
        Self { object }
    }

    /// Returns the wrapped host object.
    pub fn object(&self) -> &Arc<H> {
        &self.object
    }

    /// Returns `true` if this entity wraps exactly `object`.
    pub fn is(&self, object: &Arc<H>) -> bool {
        self.addr() == Arc::as_ptr(object).cast::<()>()
    }

    // Address only, so fat pointers with different vtables still compare equal.
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.object).cast::<()>()
    }
}

impl<H: ?Sized> Clone for Entity<H> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
        }
    }
}

impl<H: ?Sized> PartialEq for Entity<H> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<H: ?Sized> Eq for Entity<H> {}

impl<H: ?Sized> Hash for Entity<H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.addr().hash(state);
    }
}

impl<H: ?Sized> fmt::Debug for Entity<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("object", &self.addr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq)]
    struct Course {
        title: String,
    }

    fn course(title: &str) -> Arc<Course> {
        Arc::new(Course {
            title: title.to_string(),
        })
    }

    #[test]
    fn test_object_returns_wrapped_reference() {
        let object = course("Rust 101");
        let entity = Entity::new(Arc::clone(&object));

        assert!(Arc::ptr_eq(entity.object(), &object));
        assert_eq!(entity.object().title, "Rust 101");
    }

    #[test]
    fn test_clone_is_same_entity() {
        let entity = Entity::new(course("Rust 101"));
        let clone = entity.clone();

        assert_eq!(entity, clone);
        assert!(clone.is(entity.object()));
    }

    #[test]
    fn test_equal_contents_are_different_entities() {
        let a = Entity::new(course("Rust 101"));
        let b = Entity::new(course("Rust 101"));

        // Same contents, different objects.
        assert_eq!(a.object(), b.object());
        assert_ne!(a, b);
        assert!(!a.is(b.object()));
    }

    #[test]
    fn test_hash_follows_identity() {
        let object = course("Rust 101");
        let mut set = HashSet::new();
        set.insert(Entity::new(Arc::clone(&object)));
        set.insert(Entity::new(Arc::clone(&object)));
        set.insert(Entity::new(course("Rust 101")));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unsized_host_object() {
        trait Named: Send + Sync {
            fn name(&self) -> &str;
        }
        struct Folder;
        impl Named for Folder {
            fn name(&self) -> &str {
                "folder"
            }
        }

        let object: Arc<dyn Named> = Arc::new(Folder);
        let entity = Entity::new(Arc::clone(&object));

        assert_eq!(entity.object().name(), "folder");
        assert!(entity.is(&object));
    }
}
