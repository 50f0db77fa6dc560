//! Enemy AI & lifecycle module.
//!
//! approach → lunge → (hit) → dying → removal через 5 секунд.
//! Население: только ECS entities с `Enemy`; после `RemoveEnemy` ссылок не остаётся.

use bevy::prelude::*;
use rand::Rng;

pub mod ai;
pub mod archetype;
pub mod components;
pub mod damage;
pub mod events;
pub mod spawn;
pub mod timers;


pub use archetype::*;
pub use components::{damage_enemy, DamageOutcome, Enemy, Fidelity};
pub use events::{EnemyHit, EnemyKilled, PlayerDefeated};
pub use spawn::spawn_enemy;

use crate::{DeterministicRng, SimSet};

/// Случайный вариант клипа (None для пустого набора)
pub fn pick_clip(rng: &mut DeterministicRng, clips: &[&'static str]) -> Option<&'static str> {
    match clips.len() {
        0 => None,
        1 => Some(clips[0]),
        len => Some(clips[rng.rng.gen_range(0..len)]),
    }
}

/// Enemy Plugin
///
/// Порядок в `SimSet::Enemies`:
/// 1. apply_enemy_hits: урон этого тика (из Combat)
/// 2. run_enemy_timers: hit recover, конец lunge, удаление
/// 3. enemy_ai: движение, lunge, collision damage
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyHit>()
            .add_event::<EnemyKilled>()
            .add_event::<PlayerDefeated>()
            .add_systems(
                FixedUpdate,
                (damage::apply_enemy_hits, timers::run_enemy_timers, ai::enemy_ai)
                    .chain()
                    .in_set(SimSet::Enemies),
            );
    }
}
