use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::enemy::Enemy;
use crate::schedule::{ActionLane, ScheduledAction, ScheduledActions};
use crate::state::SimClock;

/// Система: отложенные действия enemy-lane
///
/// Каждое действие проверяет, что враг ещё существует и в ожидаемом состоянии.
pub fn run_enemy_timers(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut scheduled: ResMut<ScheduledActions>,
    mut enemies: Query<(&mut Enemy, Option<&mut AnimationDriver>)>,
) {
    for action in scheduled.take_due(clock.elapsed, ActionLane::Enemy) {
        match action {
            ScheduledAction::EnemyHitRecover(entity) => {
                let Ok((enemy, driver)) = enemies.get_mut(entity) else {
                    continue;
                };
                if enemy.is_dying || enemy.is_lunging {
                    continue;
                }
                if let Some(mut driver) = driver {
                    driver.release(enemy.profile().idle);
                }
            }
            ScheduledAction::EndLunge(entity) => {
                let Ok((mut enemy, driver)) = enemies.get_mut(entity) else {
                    continue;
                };
                enemy.is_lunging = false;
                enemy.lunge_target = None;
                if enemy.is_dying {
                    continue;
                }
                if let Some(mut driver) = driver {
                    driver.release(enemy.profile().idle);
                }
            }
            ScheduledAction::RemoveEnemy(entity) => {
                // Hit recover / end lunge для удалённой сущности больше не нужны
                scheduled.cancel_where(|pending| targets_enemy(pending, entity));
                if enemies.contains(entity) {
                    commands.entity(entity).despawn();
                }
            }
            _ => {}
        }
    }
}

/// Действие enemy-lane, адресованное конкретному врагу
fn targets_enemy(action: &ScheduledAction, entity: Entity) -> bool {
    matches!(
        action,
        ScheduledAction::EnemyHitRecover(target)
            | ScheduledAction::EndLunge(target)
            | ScheduledAction::RemoveEnemy(target)
            if *target == entity
    )
}
