//! Combat Resolver module
//!
//! - Fire gate: cooldown → магазин ("EMPTY" без изменения состояния)
//! - Hitscan: луч камеры + разброс, голова приоритетнее тела, ближайший враг
//! - Melee: конус перед игроком через 0.1s после удара
//! - Трассеры: только визуал
//!
//! Урон применяется в `enemy::damage` (EnemyHit события).

use bevy::prelude::*;

pub mod fire;
pub mod hitscan;
pub mod tracer;

#[cfg(test)]
mod combat_tests;

pub use fire::{in_melee_cone, resolve_shot, try_fire, FireOutcome};
pub use hitscan::{hit_radii, resolve_pellet, AimRay, HitRadii, PelletHit};
pub use tracer::BulletTracer;

use crate::SimSet;

/// Combat Plugin
///
/// Порядок в `SimSet::Combat`:
/// 1. run_combat_timers: отложенный удар ножом
/// 2. fire_weapon: выстрел этого тика
/// 3. move_tracers: визуальные трассеры
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (fire::run_combat_timers, fire::fire_weapon, tracer::move_tracers)
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}
