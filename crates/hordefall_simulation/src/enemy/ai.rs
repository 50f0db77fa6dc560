//! Enemy AI: approach → lunge → collision damage.
//!
//! Dying враги не двигаются и не наносят урон.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::AnimationDriver;
use crate::config::SimulationConfig;
use crate::enemy::components::*;
use crate::enemy::events::PlayerDefeated;
use crate::enemy::pick_clip;
use crate::player::animation::{death_clip, hit_clip, HIT_RECOVER_DELAY as PLAYER_HIT_RECOVER};
use crate::player::{Player, PlayerState};
use crate::schedule::{ScheduledAction, ScheduledActions};
use crate::state::{GameState, SimClock};
use crate::DeterministicRng;

/// Один шаг движения врага; возвращает true если идёт lunge
pub fn step_enemy(enemy: &mut Enemy, player_position: Vec3, delta: f32) -> bool {
    if enemy.is_dying {
        return false;
    }

    match (enemy.is_lunging, enemy.lunge_target) {
        (true, Some(target)) => {
            let direction = (target - enemy.position).normalize_or_zero();
            enemy.position += direction * enemy.lunge_speed * delta;
            true
        }
        _ => {
            let direction = (player_position - enemy.position).normalize_or_zero();
            enemy.position += direction * enemy.speed * delta;
            false
        }
    }
}

/// Смещение игрока после удара: назад от врага или перпендикулярно
pub fn knockback_offset(player_position: Vec3, enemy_position: Vec3, use_back: bool) -> Vec3 {
    let retreat = (player_position - enemy_position).normalize_or_zero();
    let direction = if use_back {
        retreat
    } else {
        Vec3::new(-retreat.z, 0.0, retreat.x).normalize_or_zero()
    };
    direction * KNOCKBACK_DISTANCE
}

/// Система: lunge/approach/facing/collision для всех врагов
pub fn enemy_ai(
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduled: ResMut<ScheduledActions>,
    mut enemies: Query<(Entity, &mut Enemy, Option<&mut AnimationDriver>), Without<Player>>,
    mut players: Query<(&mut PlayerState, Option<&mut AnimationDriver>), With<Player>>,
    mut defeated: EventWriter<PlayerDefeated>,
) {
    let Ok((mut player, mut player_driver)) = players.single_mut() else {
        return;
    };
    let now = clock.elapsed;
    let delta = clock.delta;

    for (entity, mut enemy, mut driver) in enemies.iter_mut() {
        if enemy.is_dying {
            continue;
        }

        let distance = enemy.position.distance(player.position);

        if distance < LUNGE_TRIGGER_RADIUS && enemy.lunge_ready(now) {
            enemy.is_lunging = true;
            enemy.lunge_target = Some(player.position);
            enemy.last_lunge_time = Some(now);
            scheduled.schedule(now, LUNGE_WINDUP, ScheduledAction::EndLunge(entity));

            if let (Some(driver), Some(clip)) =
                (driver.as_deref_mut(), pick_clip(&mut rng, enemy.profile().attacks))
            {
                driver.play_once(clip);
            }
        }

        let lunging = step_enemy(&mut enemy, player.position, delta);
        if !lunging {
            let jitter = rng.rng.gen::<f32>();
            let clip = enemy.locomotion_clip(now, jitter);
            if let Some(driver) = driver.as_deref_mut() {
                driver.request_loop(clip);
            }
        }

        enemy.face(player.position);

        if distance >= COLLISION_RADIUS
            || state.flags.dead
            || state.is_invincible(now, config.invincibility_secs)
        {
            continue;
        }

        let damage = enemy.profile().collision_damage();
        state.health.take_damage(damage);
        state.last_hit_time = Some(now);
        crate::logger::log(&format!(
            "🩸 Player hit by {:?}: -{} (hp {}/{})",
            enemy.archetype, damage, state.health.current, state.health.max
        ));

        if state.health.is_alive() {
            let use_back = rng.rng.gen::<f32>() < 0.5;
            let offset = knockback_offset(player.position, enemy.position, use_back);
            player.knockback(offset);

            let roll = rng.rng.gen::<f32>();
            let clip = hit_clip(state.character, state.current_weapon, &mut player, roll);
            if let Some(driver) = player_driver.as_deref_mut() {
                driver.play_once(&clip);
                scheduled.schedule(now, PLAYER_HIT_RECOVER, ScheduledAction::PlayerHitRecover);
            }
            continue;
        }

        state.flags.dead = true;
        state.flags.playing_death_animation = true;
        state.flags.reloading = false;
        state.flags.dancing = false;
        state.flags.quick_turning = false;
        player.quick_turn = None;

        if let Some(driver) = player_driver.as_deref_mut() {
            driver.play_once(&death_clip(state.character, state.current_weapon));
        }

        crate::logger::log_info(&format!(
            "☠️ Player defeated in round {} ({} enemies defeated)",
            state.round, state.waves.defeated
        ));
        defeated.write(PlayerDefeated {
            round: state.round,
            defeated: state.waves.defeated,
        });
    }
}
