//! Replaceable presentation components.
//!
//! A host can swap the renderer used for a handful of UI roles. The engine
//! only records which roles are overridden. The renderers themselves are
//! opaque values the host downcasts back when drawing.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

/// A UI role whose renderer can be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentRole {
    Tooltip,
    Select,
    Checkbox,
    IconButton,
    Skeleton,
    Typography,
}

impl ComponentRole {
    /// Every role, in declaration order.
    pub const ALL: [ComponentRole; 6] = [
        ComponentRole::Tooltip,
        ComponentRole::Select,
        ComponentRole::Checkbox,
        ComponentRole::IconButton,
        ComponentRole::Skeleton,
        ComponentRole::Typography,
    ];
}

/// Role-keyed renderer overrides.
///
/// # Example
///
/// ```
/// use grid_engine::registry::{ComponentRegistry, ComponentRole};
///
/// struct Spinner(&'static str);
///
/// let registry = ComponentRegistry::new().with(ComponentRole::Skeleton, Spinner("dots"));
/// assert!(registry.is_overridden(ComponentRole::Skeleton));
/// assert_eq!(registry.get::<Spinner>(ComponentRole::Skeleton).map(|s| s.0), Some("dots"));
/// ```
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    overrides: HashMap<ComponentRole, Arc<dyn Any + Send + Sync>>,
}

impl ComponentRegistry {
    /// Create a registry with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for a role, replacing any previous one.
    pub fn register<T: Any + Send + Sync>(&mut self, role: ComponentRole, renderer: T) {
        debug!("[registry] override {:?}", role);
        self.overrides.insert(role, Arc::new(renderer));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T: Any + Send + Sync>(mut self, role: ComponentRole, renderer: T) -> Self {
        self.register(role, renderer);
        self
    }

    /// Remove the override for a role. Returns `true` if one existed.
    pub fn unregister(&mut self, role: ComponentRole) -> bool {
        self.overrides.remove(&role).is_some()
    }

    /// Returns `true` if the role has a custom renderer.
    pub fn is_overridden(&self, role: ComponentRole) -> bool {
        self.overrides.contains_key(&role)
    }

    /// Get the renderer for a role as `T`.
    ///
    /// Returns `None` if the role is not overridden or holds another type.
    pub fn get<T: Any + Send + Sync>(&self, role: ComponentRole) -> Option<&T> {
        self.overrides.get(&role)?.downcast_ref::<T>()
    }

    /// Overridden roles, in declaration order.
    pub fn overridden_roles(&self) -> Vec<ComponentRole> {
        ComponentRole::ALL
            .into_iter()
            .filter(|role| self.is_overridden(*role))
            .collect()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("overridden", &self.overridden_roles())
            .finish()
    }
}
