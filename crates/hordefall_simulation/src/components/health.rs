//! Health + qualitative label для HUD.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Здоровье (игрок или враг)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn label(&self) -> HealthLabel {
        HealthLabel::from_fraction(self.fraction())
    }
}

/// Трёхуровневый статус здоровья (строгие сравнения `>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum HealthLabel {
    Fine,
    Caution,
    Danger,
}

impl HealthLabel {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.66 {
            HealthLabel::Fine
        } else if fraction > 0.33 {
            HealthLabel::Caution
        } else {
            HealthLabel::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Fine => "FINE",
            HealthLabel::Caution => "CAUTION",
            HealthLabel::Danger => "DANGER",
        }
    }
}
