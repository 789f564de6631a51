use std::any::Any;

use crate::components::{RigidBody, Transform};
use crate::ecs::{EcsError, Registry, System, SystemBase};

/// Integrates entity positions from their velocity once per frame.
pub struct MovementSystem {
    base: SystemBase,
}

impl MovementSystem {
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require::<Transform>();
        base.require::<RigidBody>();
        Self { base }
    }

    /// Advance every matched entity by `velocity * dt`.
    pub fn run(registry: &mut Registry, dt_seconds: f32) -> Result<(), EcsError> {
        let entities = registry.system::<MovementSystem>()?.base().entities();
        for entity in entities {
            let body = registry.get_component::<RigidBody>(entity)?.clone();
            let transform = registry.get_component_mut::<Transform>(entity)?;
            transform.x += body.velocity_x * dt_seconds;
            transform.y += body.velocity_y * dt_seconds;
        }
        Ok(())
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_matched_entities() {
        let mut registry = Registry::new();
        registry.add_system(MovementSystem::new());

        let mover = registry.create_entity();
        registry.add_component(mover, Transform::default());
        registry.add_component(
            mover,
            RigidBody {
                velocity_x: 10.0,
                velocity_y: -5.0,
            },
        );

        let still = registry.create_entity();
        registry.add_component(still, Transform::default());

        registry.update();
        MovementSystem::run(&mut registry, 0.5).unwrap();

        let moved = registry.get_component::<Transform>(mover).unwrap();
        assert_eq!(moved.x, 5.0);
        assert_eq!(moved.y, -2.5);

        // no RigidBody, so the system never touched it
        let untouched = registry.get_component::<Transform>(still).unwrap();
        assert_eq!(untouched.x, 0.0);
    }
}
