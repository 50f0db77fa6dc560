//! Выстрел: gate по cooldown/магазину, hitscan по пеллетам, melee cone.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::AnimationDriver;
use crate::camera::CameraRig;
use crate::combat::hitscan::{resolve_pellet, AimRay};
use crate::combat::tracer::{muzzle_position, tracer_toward, TRACER_RANGE};
use crate::enemy::{Enemy, EnemyHit};
use crate::hud::{HudColor, HudMessage};
use crate::input::{PlayerAction, PlayerInput};
use crate::player::animation::{aim_clip, fire_clip, idle_clip, stab_clip, FIRE_RETURN_DELAY, STAB_RETURN_DELAY};
use crate::player::{Player, PlayerFrame, PlayerState};
use crate::schedule::{ActionLane, ScheduledAction, ScheduledActions};
use crate::state::{GameState, SimClock};
use crate::weapons::WeaponDefinition;
use crate::DeterministicRng;

/// Задержка удара ножом (синхронизация с анимацией)
pub const MELEE_STRIKE_DELAY: f32 = 0.1;
pub const MELEE_RANGE: f32 = 2.5;
/// Минимальный dot(forward, к врагу)
pub const MELEE_CONE_DOT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    CoolingDown,
    /// Магазин пуст: состояние не меняется
    Empty,
}

/// Gate выстрела: cooldown → магазин. Нож патронов не тратит.
pub fn try_fire(state: &mut GameState, now: f32) -> FireOutcome {
    if !state.fire_ready(now) {
        return FireOutcome::CoolingDown;
    }

    let weapon = state.current_weapon;
    if !weapon.definition().is_melee() {
        let ammo = &mut state.weapon_state_mut(weapon).ammo;
        if *ammo == 0 {
            return FireOutcome::Empty;
        }
        *ammo -= 1;
    }

    state.last_fire_time = Some(now);
    FireOutcome::Fired
}

/// Пеллеты одного выстрела: каждый независимо с разбросом, один враг на пеллет
pub fn resolve_shot(
    ray: &AimRay,
    definition: &WeaponDefinition,
    enemies: &[(Entity, &Enemy)],
    rng: &mut DeterministicRng,
) -> (Vec<EnemyHit>, Vec<AimRay>) {
    let mut hits = Vec::new();
    let mut rays = Vec::with_capacity(definition.pellets as usize);

    for _ in 0..definition.pellets {
        let roll_x = rng.rng.gen::<f32>();
        let roll_y = rng.rng.gen::<f32>();
        let pellet = ray.with_spread(definition.spread, roll_x, roll_y);

        if let Some(hit) = resolve_pellet(&pellet, enemies.iter().copied(), definition.generous_hitbox) {
            hits.push(EnemyHit {
                target: hit.target,
                damage: definition.hit_damage(hit.distance, hit.headshot),
                headshot: hit.headshot,
            });
        }
        rays.push(pellet);
    }

    (hits, rays)
}

/// Конус ножа: дистанция < 2.5 и dot(forward, к врагу) > 0.5
pub fn in_melee_cone(player: &PlayerState, target: Vec3) -> bool {
    let to_target = target - player.position;
    let distance = to_target.length();
    distance < MELEE_RANGE && player.forward().dot(to_target.normalize_or_zero()) > MELEE_CONE_DOT
}

/// Система: обработка fire input (edge для полуавтомата, hold для автомата)
pub fn fire_weapon(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    input: Res<PlayerInput>,
    frame: Res<PlayerFrame>,
    clock: Res<SimClock>,
    rig: Res<CameraRig>,
    mut state: ResMut<GameState>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduled: ResMut<ScheduledActions>,
    mut players: Query<(&mut PlayerState, Option<&mut AnimationDriver>), With<Player>>,
    enemies: Query<(Entity, &Enemy)>,
    mut hits: EventWriter<EnemyHit>,
    mut hud: EventWriter<HudMessage>,
) {
    let pressed = actions
        .read()
        .filter(|action| **action == PlayerAction::FirePressed)
        .count()
        > 0;

    let definition = state.current_weapon.definition();
    let wants_fire = pressed || (definition.automatic && input.fire_held);
    if !wants_fire || !frame.aiming {
        return;
    }
    if state.flags.reloading || state.flags.dancing || state.flags.quick_turning || state.flags.dead {
        return;
    }

    let Ok((mut player, mut driver)) = players.single_mut() else {
        return;
    };
    let now = clock.elapsed;

    match try_fire(&mut state, now) {
        FireOutcome::CoolingDown => return,
        FireOutcome::Empty => {
            hud.write(HudMessage::new("EMPTY", HudColor::Red, 1.0));
            return;
        }
        FireOutcome::Fired => {}
    }

    let weapon = state.current_weapon;
    let character = state.character;

    if definition.is_melee() {
        let clip = stab_clip(character, &mut player);
        if let Some(driver) = driver.as_deref_mut() {
            driver.play_once(&clip);
        }
        scheduled.schedule(now, MELEE_STRIKE_DELAY, ScheduledAction::MeleeStrike);
        scheduled.schedule(
            now,
            STAB_RETURN_DELAY,
            ScheduledAction::ReturnToPose {
                clip: idle_clip(character, weapon),
                weapon,
                require_aiming: false,
            },
        );
        return;
    }

    if let (Some(clip), Some(driver)) = (fire_clip(character, weapon), driver.as_deref_mut()) {
        driver.play_once(clip);
        scheduled.schedule(
            now,
            FIRE_RETURN_DELAY,
            ScheduledAction::ReturnToPose {
                clip: aim_clip(character, weapon),
                weapon,
                require_aiming: true,
            },
        );
    }

    let targets: Vec<(Entity, &Enemy)> = enemies.iter().collect();
    let (pellet_hits, rays) = resolve_shot(&rig.aim_ray(), definition, &targets, &mut rng);

    let muzzle = muzzle_position(&player);
    for ray in rays {
        commands.spawn(tracer_toward(muzzle, ray.at(TRACER_RANGE)));
    }

    for hit in pellet_hits {
        hits.write(hit);
    }
}

/// Система: отложенный удар ножом (combat-lane)
pub fn run_combat_timers(
    state: Res<GameState>,
    clock: Res<SimClock>,
    mut scheduled: ResMut<ScheduledActions>,
    players: Query<&PlayerState, With<Player>>,
    enemies: Query<(Entity, &Enemy)>,
    mut hits: EventWriter<EnemyHit>,
) {
    for action in scheduled.take_due(clock.elapsed, ActionLane::Combat) {
        if action != ScheduledAction::MeleeStrike || state.flags.dead {
            continue;
        }
        let Ok(player) = players.single() else {
            continue;
        };

        // Оружие сменили до удара
        let definition = state.current_weapon.definition();
        if !definition.is_melee() {
            continue;
        }

        let damage = definition.melee_damage;
        for (entity, enemy) in enemies.iter() {
            if enemy.is_dying || !in_melee_cone(player, enemy.position) {
                continue;
            }
            hits.write(EnemyHit {
                target: entity,
                damage,
                headshot: false,
            });
        }
    }
}
