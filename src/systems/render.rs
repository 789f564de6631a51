use std::any::Any;

use log::info;

use crate::components::{Sprite, Transform};
use crate::ecs::{EcsError, Entity, Registry, System, SystemBase};

/// Emits one log line per visible sprite per frame, back-to-front by
/// `z_index`. The log sink stands in for a real renderer here.
pub struct RenderSystem {
    base: SystemBase,
}

impl RenderSystem {
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require::<Transform>();
        base.require::<Sprite>();
        Self { base }
    }

    pub fn run(registry: &Registry) -> Result<(), EcsError> {
        let entities = registry.system::<RenderSystem>()?.base().entities();
        let mut drawables: Vec<(i32, Entity)> = Vec::with_capacity(entities.len());
        for entity in entities {
            let sprite = registry.get_component::<Sprite>(entity)?;
            drawables.push((sprite.z_index, entity));
        }
        drawables.sort_by_key(|(z_index, _)| *z_index);

        for (_, entity) in drawables {
            let sprite = registry.get_component::<Sprite>(entity)?;
            let transform = registry.get_component::<Transform>(entity)?;
            info!(
                "draw '{}' at ({:.1}, {:.1}) scale {:.2}",
                sprite.asset_id, transform.x, transform.y, transform.scale
            );
        }
        Ok(())
    }
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RenderSystem {
    fn name(&self) -> &'static str {
        "render"
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
    fn only_sprite_carriers_match() {
        let mut registry = Registry::new();
        registry.add_system(RenderSystem::new());

        let visible = registry.create_entity();
        registry.add_component(visible, Transform::default());
        registry.add_component(
            visible,
            Sprite {
                asset_id: "tank".into(),
                ..Sprite::default()
            },
        );

        let bare = registry.create_entity();
        registry.add_component(bare, Transform::default());

        registry.update();

        let system = registry.system::<RenderSystem>().unwrap();
        assert_eq!(system.base().entities(), vec![visible]);
        RenderSystem::run(&registry).unwrap();
    }
}
