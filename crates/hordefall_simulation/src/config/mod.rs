//! Конфигурация симуляции (RON).
//!
//! Все поля опциональны в файле: отсутствующие берутся из `Default`.

use std::collections::BTreeMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enemy::EnemyArchetype;

#[cfg(test)]
mod config_tests;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Режим прицеливания мышью
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum AimMode {
    /// Aim пока кнопка зажата
    #[default]
    Hold,
    /// Нажатие переключает aim
    Toggle,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_hz: f64,
    pub seed: u64,
    pub aim_mode: AimMode,
    pub mouse_sensitivity: f32,
    /// rad/s для tank-поворота
    pub rotation_speed: f32,
    pub sprint_multiplier: f32,
    /// Предел pitch при mouse aim
    pub max_pitch: f32,
    pub invincibility_secs: f32,
    pub quick_turn_secs: f32,
    pub model_load_timeout_secs: f32,
    pub spawn_interval_secs: f32,
    /// Переопределения model reference по архетипу
    pub enemy_models: BTreeMap<EnemyArchetype, String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            aim_mode: AimMode::Hold,
            mouse_sensitivity: 0.002,
            rotation_speed: 3.0,
            sprint_multiplier: 1.5,
            max_pitch: 0.8,
            invincibility_secs: 1.0,
            quick_turn_secs: 0.3,
            model_load_timeout_secs: 3.0,
            spawn_interval_secs: 2.0,
            enemy_models: BTreeMap::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid(format!("tick_hz must be positive, got {}", self.tick_hz)));
        }

        let durations = [
            ("invincibility_secs", self.invincibility_secs),
            ("quick_turn_secs", self.quick_turn_secs),
            ("model_load_timeout_secs", self.model_load_timeout_secs),
            ("spawn_interval_secs", self.spawn_interval_secs),
        ];
        for (name, value) in durations {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(self.max_pitch > 0.0) {
            return Err(ConfigError::Invalid(format!("max_pitch must be positive, got {}", self.max_pitch)));
        }

        if self.enemy_models.values().any(|model| model.trim().is_empty()) {
            return Err(ConfigError::Invalid("enemy model reference is empty".to_string()));
        }

        Ok(())
    }

    pub fn model_for(&self, archetype: EnemyArchetype) -> String {
        self.enemy_models
            .get(&archetype)
            .cloned()
            .unwrap_or_else(|| archetype.default_model().to_string())
    }
}
