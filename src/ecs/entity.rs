//! Entity handles

use super::component::Component;
use super::registry::{EcsError, Registry};

/// Numeric identity of one game object. Ids are assigned once, start at 0,
/// grow monotonically, and are never recycled. An entity is only meaningful
/// to the [`Registry`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }

    pub fn id(self) -> u32 {
        self.id
    }

    pub(crate) fn index(self) -> usize {
        self.id as usize
    }
}

/// Borrow-scoped convenience handle pairing an [`Entity`] with its owning
/// registry. Every operation forwards to the registry, nothing more.
pub struct EntityMut<'r> {
    entity: Entity,
    registry: &'r mut Registry,
}

impl<'r> EntityMut<'r> {
    pub(crate) fn new(entity: Entity, registry: &'r mut Registry) -> Self {
        Self { entity, registry }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn add<T: Component>(&mut self, value: T) -> &mut Self {
        self.registry.add_component(self.entity, value);
        self
    }

    pub fn remove<T: Component>(&mut self) -> &mut Self {
        self.registry.remove_component::<T>(self.entity);
        self
    }

    pub fn has<T: Component>(&self) -> bool {
        self.registry.has_component::<T>(self.entity)
    }

    pub fn get<T: Component>(&self) -> Result<&T, EcsError> {
        self.registry.get_component::<T>(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        self.registry.get_component_mut::<T>(self.entity)
    }
}
