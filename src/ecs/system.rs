//! System base state and the system trait

use std::any::Any;

use super::component::{kind_id, Component};
use super::entity::Entity;
use super::signature::Signature;

/// State every system carries: the component kinds it requires and the live
/// list of entities currently matching them.
#[derive(Debug, Default)]
pub struct SystemBase {
    signature: Signature,
    entities: Vec<Entity>,
}

impl SystemBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that matching entities must carry component kind `T`.
    /// Requirements are set during system construction and fixed afterwards.
    pub fn require<T: Component>(&mut self) {
        self.signature.set(kind_id::<T>());
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Append an entity to the matched list. No duplicate check: adding the
    /// same entity twice means it is processed twice.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove every occurrence of `entity` from the matched list.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|other| *other != entity);
    }

    /// Snapshot of the matched list at call time, in insertion order. Later
    /// membership changes do not affect a returned snapshot.
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Trait implemented by concrete systems so the registry can own them keyed
/// by type. Processing logic stays outside the core: the driving loop takes
/// an entity snapshot from [`SystemBase::entities`] and reads components off
/// the registry.
pub trait System: Send + Sync {
    fn name(&self) -> &'static str;
    fn base(&self) -> &SystemBase;
    fn base_mut(&mut self) -> &mut SystemBase;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tag;

    #[test]
    fn require_sets_the_kind_bit() {
        let mut base = SystemBase::new();
        assert!(base.signature().is_empty());

        base.require::<Tag>();
        assert!(base.signature().test(kind_id::<Tag>()));
    }

    #[test]
    fn add_and_remove_entities() {
        let mut base = SystemBase::new();
        let a = Entity::new(0);
        let b = Entity::new(1);

        base.add_entity(a);
        base.add_entity(b);
        base.add_entity(a); // duplicates are the caller's problem
        assert_eq!(base.len(), 3);

        base.remove_entity(a);
        assert_eq!(base.entities(), vec![b]);

        base.remove_entity(b);
        assert!(base.is_empty());
    }

    #[test]
    fn entities_returns_a_snapshot() {
        let mut base = SystemBase::new();
        let a = Entity::new(0);
        base.add_entity(a);

        let snapshot = base.entities();
        base.remove_entity(a);

        assert_eq!(snapshot, vec![a]);
        assert!(base.is_empty());
    }
}
