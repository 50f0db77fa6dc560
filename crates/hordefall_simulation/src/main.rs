//! Headless симуляция HORDEFALL
//!
//! Выбирает Leon и прогоняет 1800 тиков со скриптовым aim + fire.
//! Первый аргумент: путь к RON-конфигу (опционально).

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use hordefall_simulation::camera::CameraRig;
use hordefall_simulation::logger::{log_error, log_info};
use hordefall_simulation::{
    create_simulation_app, CharacterId, Enemy, GameState, PlayerAction, PlayerInput, PlayerState,
    SimulationConfig,
};

const TICKS: u32 = 1800;
const FIRE_EVERY: u32 = 12;
const ENGAGE_RANGE: f32 = 25.0;

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Pointer delta, которая довернёт камеру на ближайшего врага
fn scripted_look(world: &mut World, sensitivity: f32) -> Option<Vec2> {
    let rig = *world.resource::<CameraRig>();
    let player = world
        .query_filtered::<&PlayerState, With<hordefall_simulation::Player>>()
        .iter(world)
        .next()
        .cloned()?;

    let target = world
        .query::<&Enemy>()
        .iter(world)
        .filter(|enemy| !enemy.is_dying)
        .map(|enemy| enemy.position + Vec3::Y)
        .filter(|position| position.distance(player.position) < ENGAGE_RANGE)
        .min_by(|a, b| {
            a.distance(player.position)
                .total_cmp(&b.distance(player.position))
        })?;

    let to_target = (target - rig.position).normalize_or_zero();
    let desired_yaw = to_target.x.atan2(to_target.z);
    let desired_pitch = to_target.y.clamp(-1.0, 1.0).asin();

    Some(Vec2::new(
        wrap_angle(player.yaw - desired_yaw) / sensitivity,
        (player.aim_pitch - desired_pitch) / sensitivity,
    ))
}

fn main() {
    hordefall_simulation::init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                log_error(&format!("Config {}: {}, using defaults", path, error));
                SimulationConfig::default()
            }
        },
        None => SimulationConfig::default(),
    };

    let sensitivity = config.mouse_sensitivity;
    log_info(&format!("Starting HORDEFALL headless simulation (seed: {})", config.seed));
    let mut app = create_simulation_app(config);

    app.world_mut()
        .send_event(PlayerAction::SelectCharacter(CharacterId::Leon));

    for tick in 0..TICKS {
        let look = scripted_look(app.world_mut(), sensitivity);
        {
            let mut input = app.world_mut().resource_mut::<PlayerInput>();
            input.aim_held = look.is_some();
            input.look_delta = look.unwrap_or(Vec2::ZERO);
        }

        let weapon = app.world().resource::<GameState>().weapon();
        if look.is_some() && tick % FIRE_EVERY == 0 {
            let action = if weapon.ammo == 0 && weapon.reserve > 0 {
                PlayerAction::Reload
            } else {
                PlayerAction::FirePressed
            };
            app.world_mut().send_event(action);
        }

        app.update();

        if app.world().resource::<GameState>().flags.dead {
            log_info(&format!("Player died at tick {}", tick));
            break;
        }
        if tick % 300 == 0 {
            let state = app.world().resource::<GameState>();
            log_info(&format!(
                "Tick {}: round {}, alive {}, hp {}/{}",
                tick, state.round, state.waves.alive, state.health.current, state.health.max
            ));
        }
    }

    let state = app.world().resource::<GameState>();
    log_info(&format!(
        "Simulation complete: round {}, defeated {}/{}, hp {}/{} ({})",
        state.round,
        state.waves.defeated,
        state.waves.to_spawn,
        state.health.current,
        state.health.max,
        state.health.label().as_str()
    ));
}
