//! Применение урона к врагам + bookkeeping смерти.

use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::enemy::components::{damage_enemy, DamageOutcome, Enemy, HIT_RECOVER_DELAY, REMOVAL_DELAY};
use crate::enemy::events::{EnemyHit, EnemyKilled};
use crate::enemy::pick_clip;
use crate::schedule::{ScheduledAction, ScheduledActions};
use crate::state::{GameState, SimClock};
use crate::waves::{advance_round, RoundStarted};
use crate::DeterministicRng;

/// Система: EnemyHit → hp, hit-реакция, смерть, переход раунда
///
/// Попадания по dying врагам игнорируются целиком (нет двойного подсчёта).
pub fn apply_enemy_hits(
    mut hits: EventReader<EnemyHit>,
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduled: ResMut<ScheduledActions>,
    mut enemies: Query<(&mut Enemy, Option<&mut AnimationDriver>)>,
    mut killed: EventWriter<EnemyKilled>,
    mut rounds: EventWriter<RoundStarted>,
) {
    let now = clock.elapsed;

    for hit in hits.read() {
        let Ok((mut enemy, mut driver)) = enemies.get_mut(hit.target) else {
            continue;
        };

        match damage_enemy(&mut enemy, hit.damage) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded => {
                let profile = enemy.profile();
                if let (Some(driver), Some(clip)) =
                    (driver.as_deref_mut(), pick_clip(&mut rng, profile.hits))
                {
                    driver.play_once(clip);
                    scheduled.schedule(now, HIT_RECOVER_DELAY, ScheduledAction::EnemyHitRecover(hit.target));
                }
            }
            DamageOutcome::Killed => {
                if let (Some(driver), Some(clip)) =
                    (driver.as_deref_mut(), pick_clip(&mut rng, enemy.profile().deaths))
                {
                    driver.play_once(clip);
                }

                state.waves.alive = state.waves.alive.saturating_sub(1);
                state.waves.defeated = (state.waves.defeated + 1).min(state.waves.to_spawn);
                scheduled.schedule(now, REMOVAL_DELAY, ScheduledAction::RemoveEnemy(hit.target));

                crate::logger::log(&format!(
                    "💀 {:?} killed{} ({}/{})",
                    enemy.archetype,
                    if hit.headshot { " (headshot)" } else { "" },
                    state.waves.defeated,
                    state.waves.to_spawn
                ));

                killed.write(EnemyKilled {
                    entity: hit.target,
                    archetype: enemy.archetype,
                    position: enemy.position,
                });

                if state.waves.is_complete() {
                    let round = advance_round(&mut state, now);
                    rounds.write(RoundStarted { round });
                }
            }
        }
    }
}
