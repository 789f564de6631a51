//! Entity Component System (ECS) core
//!
//! Entities are plain numeric handles, components live in dense per-kind
//! pools, and systems process the entities whose signature covers their
//! required component kinds. System membership is recomputed only at
//! [`Registry::update`], so entities spawned mid-frame become visible to
//! systems at a single well-defined point.

pub mod component;
pub mod entity;
pub mod registry;
pub mod signature;
pub mod system;

pub use component::{kind_id, Component, ComponentKindId, Pool, MAX_COMPONENT_KINDS};
pub use entity::{Entity, EntityMut};
pub use registry::{EcsError, Registry};
pub use signature::Signature;
pub use system::{System, SystemBase};
