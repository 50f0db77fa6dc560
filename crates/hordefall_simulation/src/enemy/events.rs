use bevy::prelude::*;

use crate::enemy::EnemyArchetype;

/// Попадание по врагу (hitscan pellet или melee cone)
///
/// Урон уже посчитан (falloff + headshot); применение: `apply_enemy_hits`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub target: Entity,
    pub damage: u32,
    pub headshot: bool,
}

/// Враг получил летальный урон (counters уже обновлены)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub archetype: EnemyArchetype,
    pub position: Vec3,
}

/// Игрок погиб: терминальное состояние до retry
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDefeated {
    pub round: u32,
    pub defeated: u32,
}
