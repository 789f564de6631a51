//! Registry - owns entities, pools, signatures, and systems

use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};
use thiserror::Error;

use super::component::{kind_id, Component, ErasedPool, Pool};
use super::entity::{Entity, EntityMut};
use super::signature::Signature;
use super::system::System;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    #[error("component '{kind}' not present on entity {entity}")]
    ComponentNotFound { kind: &'static str, entity: u32 },
    #[error("system '{0}' is not registered")]
    SystemNotFound(&'static str),
}

/// The orchestrator: allocates entity ids, owns one pool per component kind,
/// the per-entity signature table, and the registered systems.
///
/// Component attach/detach and lookups take effect immediately. System
/// membership is deferred: entities staged by [`create_entity`] and
/// [`kill_entity`] only enter or leave system matched lists when [`update`]
/// runs, typically once per frame.
///
/// Entity handles are only valid against the registry that created them;
/// passing a foreign entity with an out-of-range id panics.
///
/// [`create_entity`]: Registry::create_entity
/// [`kill_entity`]: Registry::kill_entity
/// [`update`]: Registry::update
#[derive(Default)]
pub struct Registry {
    num_entities: u32,
    pools: Vec<Option<Box<dyn ErasedPool>>>,
    signatures: Vec<Signature>,
    systems: HashMap<TypeId, Box<dyn System>>,
    pending_add: BTreeSet<Entity>,
    pending_kill: BTreeSet<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities ever created. Ids are never recycled, so this is
    /// also the next id to be handed out.
    pub fn entity_count(&self) -> u32 {
        self.num_entities
    }

    /// Allocate the next entity id and stage the entity for system matching
    /// at the next [`update`](Registry::update). No system sees it before
    /// that point.
    pub fn create_entity(&mut self) -> Entity {
        let id = self.num_entities;
        self.num_entities += 1;

        let entity = Entity::new(id);
        if self.signatures.len() < self.num_entities as usize {
            self.signatures
                .resize(self.num_entities as usize, Signature::EMPTY);
        }
        self.pending_add.insert(entity);
        debug!("entity {id} created");
        entity
    }

    /// Stage an entity for destruction. At the next
    /// [`update`](Registry::update) it is removed from every system's
    /// matched list and its signature is cleared. Pool slots keep their last
    /// value and the id is never reused.
    pub fn kill_entity(&mut self, entity: Entity) {
        self.pending_kill.insert(entity);
        debug!("entity {} staged for destruction", entity.id());
    }

    /// Convenience handle forwarding component operations to this registry.
    pub fn entity(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut::new(entity, self)
    }

    /// Attach a component to an entity, overwriting any previous value of
    /// that kind. The kind's pool is created lazily and grown to cover the
    /// current entity population, never shrunk.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
        let kind = kind_id::<T>();
        let population = self.num_entities as usize;

        if self.pools.len() <= kind.index() {
            self.pools.resize_with(kind.index() + 1, || None);
        }
        let erased = self.pools[kind.index()].get_or_insert_with(|| Box::new(Pool::<T>::new()));
        let pool = erased
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("pool type matches component kind");
        if entity.index() >= pool.len() {
            pool.resize(population.max(entity.index() + 1));
        }
        pool.set(entity.index(), value);

        self.signatures[entity.index()].set(kind);
        debug!("entity {}: attached '{}'", entity.id(), type_name::<T>());
    }

    /// Detach a component by clearing its signature bit. The stored value
    /// stays in the pool untouched until a future attach overwrites it; a
    /// detach of a kind that was never attached is a no-op.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        let kind = kind_id::<T>();
        self.signatures[entity.index()].clear(kind);
        debug!("entity {}: detached '{}'", entity.id(), type_name::<T>());
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        let kind = kind_id::<T>();
        self.signatures[entity.index()].test(kind)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        let kind = kind_id::<T>();
        let not_found = EcsError::ComponentNotFound {
            kind: type_name::<T>(),
            entity: entity.id(),
        };
        if !self.signatures[entity.index()].test(kind) {
            return Err(not_found);
        }
        let pool = self
            .pools
            .get(kind.index())
            .and_then(|slot| slot.as_ref())
            .ok_or(not_found.clone())?;
        let pool = pool
            .as_any()
            .downcast_ref::<Pool<T>>()
            .expect("pool type matches component kind");
        pool.get(entity.index()).ok_or(not_found)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let kind = kind_id::<T>();
        let not_found = EcsError::ComponentNotFound {
            kind: type_name::<T>(),
            entity: entity.id(),
        };
        if !self.signatures[entity.index()].test(kind) {
            return Err(not_found);
        }
        let pool = self
            .pools
            .get_mut(kind.index())
            .and_then(|slot| slot.as_mut())
            .ok_or(not_found.clone())?;
        let pool = pool
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("pool type matches component kind");
        pool.get_mut(entity.index()).ok_or(not_found)
    }

    /// Register a system instance, keyed by its concrete type. Re-adding a
    /// system of the same type replaces the previous instance and its
    /// matched list.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        let name = system.name();
        if self
            .systems
            .insert(TypeId::of::<S>(), Box::new(system))
            .is_some()
        {
            warn!("system '{name}' re-registered, previous instance replaced");
        } else {
            debug!("system '{name}' registered");
        }
    }

    /// Drop a system. Removing a system that was never registered is a
    /// no-op, mirroring [`remove_component`](Registry::remove_component).
    pub fn remove_system<S: System + 'static>(&mut self) {
        if self.systems.remove(&TypeId::of::<S>()).is_some() {
            debug!("system '{}' removed", type_name::<S>());
        }
    }

    pub fn has_system<S: System + 'static>(&self) -> bool {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    pub fn system<S: System + 'static>(&self) -> Result<&S, EcsError> {
        self.systems
            .get(&TypeId::of::<S>())
            .and_then(|system| system.as_any().downcast_ref::<S>())
            .ok_or(EcsError::SystemNotFound(type_name::<S>()))
    }

    pub fn system_mut<S: System + 'static>(&mut self) -> Result<&mut S, EcsError> {
        self.systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.as_any_mut().downcast_mut::<S>())
            .ok_or(EcsError::SystemNotFound(type_name::<S>()))
    }

    /// Synchronization point for system membership, called once per frame by
    /// the driving loop.
    ///
    /// Drains pending-add first: each staged entity joins every system whose
    /// required signature its own signature covers, in id order. Then drains
    /// pending-kill: each staged entity leaves every matched list and its
    /// signature is cleared. An entity created and killed within the same
    /// frame is never observed by any system.
    pub fn update(&mut self) {
        let staged: Vec<Entity> = std::mem::take(&mut self.pending_add).into_iter().collect();
        for entity in staged {
            if self.pending_kill.contains(&entity) {
                continue;
            }
            self.add_entity_to_systems(entity);
        }

        let killed = std::mem::take(&mut self.pending_kill);
        for entity in killed {
            for system in self.systems.values_mut() {
                system.base_mut().remove_entity(entity);
            }
            self.signatures[entity.index()] = Signature::EMPTY;
            debug!("entity {} destroyed", entity.id());
        }
    }

    /// The only place matching is computed.
    fn add_entity_to_systems(&mut self, entity: Entity) {
        let signature = self.signatures[entity.index()];
        for system in self.systems.values_mut() {
            let base = system.base_mut();
            if signature.contains_all(base.signature()) {
                base.add_entity(entity);
            }
        }
    }
}
