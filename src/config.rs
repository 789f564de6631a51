//! Scene configuration
//!
//! Scenes are YAML files describing the entity roster a demo run starts
//! from, plus how many frames to simulate.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{RigidBody, Sprite, Transform};
use crate::ecs::Registry;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("scene parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scene validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub frames: u64,
    #[serde(default = "default_dt_seconds")]
    pub dt_seconds: f32,
    pub entities: Vec<EntityConfig>,
}

fn default_dt_seconds() -> f32 {
    1.0 / 60.0
}

/// One entity in the roster; every component slot is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityConfig {
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub rigid_body: Option<RigidBody>,
    #[serde(default)]
    pub sprite: Option<Sprite>,
}

impl EntityConfig {
    fn is_empty(&self) -> bool {
        self.transform.is_none() && self.rigid_body.is_none() && self.sprite.is_none()
    }
}

impl SceneConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    pub fn parse_str(text: &str) -> Result<Self, SceneError> {
        let scene: SceneConfig = serde_yaml::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.name.is_empty() {
            return Err(SceneError::Validation("scene must have a name".into()));
        }
        if self.entities.is_empty() {
            return Err(SceneError::Validation(
                "scene must define at least one entity".into(),
            ));
        }
        for (index, entity) in self.entities.iter().enumerate() {
            if entity.is_empty() {
                return Err(SceneError::Validation(format!(
                    "entity {index} has no components"
                )));
            }
        }
        Ok(())
    }

    /// Spawn the configured entities into a fresh registry. Systems are
    /// registered by the caller; the spawned entities stay pending until the
    /// first `update()`.
    pub fn build_registry(&self) -> Registry {
        let mut registry = Registry::new();
        for config in &self.entities {
            let entity = registry.create_entity();
            if let Some(transform) = &config.transform {
                registry.add_component(entity, transform.clone());
            }
            if let Some(body) = &config.rigid_body {
                registry.add_component(entity, body.clone());
            }
            if let Some(sprite) = &config.sprite {
                registry.add_component(entity, sprite.clone());
            }
        }
        registry
    }
}
