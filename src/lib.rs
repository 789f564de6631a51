pub mod components;
pub mod config;
pub mod ecs;
pub mod systems;

pub use config::SceneConfig;
pub use ecs::{EcsError, Entity, Registry, Signature, System, SystemBase};
