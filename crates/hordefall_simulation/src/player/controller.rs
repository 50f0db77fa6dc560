//! Player Controller: per-frame priority resolution.
//!
//! Приоритет (старший выигрывает, младшие ветки не выполняются):
//! 1. death animation → всё заморожено
//! 2. freecam → персонаж не управляется
//! 3. quick turn → только интерполяция yaw
//! 4. keyboard aim → W/S pitch, A/D yaw, translation locked
//! 5. tank movement (aim/reload блокируют, кроме movement-exempt персонажа)
//! 6. dance отменяется любым движением/aim/fire/reload

use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::characters::CharacterProfile;
use crate::config::{AimMode, SimulationConfig};
use crate::input::PlayerInput;
use crate::player::animation::{frame_clip, idle_clip};
use crate::player::{MovementIntent, Player, PlayerFrame, PlayerState};
use crate::state::{GameState, SimClock};

/// Предел pitch для keyboard aim (±60°)
pub const KEYBOARD_AIM_PITCH: f32 = std::f32::consts::FRAC_PI_3;
pub const BACKWARD_SPEED_FACTOR: f32 = 0.6;
pub const STRAFE_SPEED_FACTOR: f32 = 0.4;
/// Штраф скорости movement-exempt персонажа при aim/reload
pub const EXEMPT_SPEED_PENALTY: f32 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlOutcome {
    pub frame: PlayerFrame,
    pub dance_cancelled: bool,
    pub quick_turn_finished: bool,
}

/// Aim по текущему режиму ввода (без keyboard aim)
pub fn pointer_aim_engaged(state: &GameState, input: &PlayerInput, config: &SimulationConfig) -> bool {
    match config.aim_mode {
        AimMode::Hold => input.aim_held,
        AimMode::Toggle => state.flags.aim_latched,
    }
}

pub fn aim_engaged(state: &GameState, input: &PlayerInput, config: &SimulationConfig) -> bool {
    state.flags.keyboard_aim || pointer_aim_engaged(state, input, config)
}

pub fn resolve_frame(
    state: &mut GameState,
    player: &mut PlayerState,
    input: &PlayerInput,
    config: &SimulationConfig,
    delta: f32,
) -> ControlOutcome {
    let mut outcome = ControlOutcome::default();

    if state.flags.dead || state.flags.playing_death_animation || state.flags.freecam {
        return outcome;
    }

    if let Some(turn) = player.quick_turn.as_mut() {
        let (yaw, finished) = turn.advance(delta);
        player.yaw = yaw;
        if finished {
            player.quick_turn = None;
            state.flags.quick_turning = false;
            outcome.quick_turn_finished = true;
        }
        return outcome;
    }

    let profile = state.character.profile();
    let aiming = if state.flags.keyboard_aim {
        keyboard_aim(player, input, config, delta);
        true
    } else {
        let aiming = pointer_aim_engaged(state, input, config);
        if aiming {
            player.yaw -= input.look_delta.x * config.mouse_sensitivity;
            player.aim_pitch = (player.aim_pitch - input.look_delta.y * config.mouse_sensitivity)
                .clamp(-config.max_pitch, config.max_pitch);
        } else {
            player.aim_pitch = 0.0;
        }
        outcome.frame.intent = tank_movement(state, player, input, profile, config, aiming, delta);
        aiming
    };
    outcome.frame.aiming = aiming;

    if state.flags.dancing
        && (input.any_movement() || aiming || input.fire_held || state.flags.reloading)
    {
        state.flags.dancing = false;
        outcome.dance_cancelled = true;
    }

    outcome
}

fn keyboard_aim(player: &mut PlayerState, input: &PlayerInput, config: &SimulationConfig, delta: f32) {
    let pitch_step = config.mouse_sensitivity * 100.0 * delta;
    if input.forward {
        player.aim_pitch += pitch_step;
    }
    if input.backward {
        player.aim_pitch -= pitch_step;
    }
    player.aim_pitch = player.aim_pitch.clamp(-KEYBOARD_AIM_PITCH, KEYBOARD_AIM_PITCH);

    if input.left {
        player.yaw += config.rotation_speed * delta;
    }
    if input.right {
        player.yaw -= config.rotation_speed * delta;
    }
}

fn tank_movement(
    state: &GameState,
    player: &mut PlayerState,
    input: &PlayerInput,
    profile: &CharacterProfile,
    config: &SimulationConfig,
    aiming: bool,
    delta: f32,
) -> MovementIntent {
    let exempt = profile.movement_exempt;
    let reloading = state.flags.reloading;
    if (aiming && !exempt) || (reloading && !exempt) || state.flags.dancing {
        return MovementIntent::Idle;
    }

    let mut intent = MovementIntent::Idle;
    let strafing = aiming && profile.strafes_while_aiming;
    let strafe_step = profile.speed * STRAFE_SPEED_FACTOR * delta;

    if input.left {
        if strafing {
            let offset = player.local_x() * strafe_step;
            player.position += offset;
            intent = MovementIntent::Forward;
        } else {
            player.yaw += config.rotation_speed * delta;
        }
    }
    if input.right {
        if strafing {
            let offset = player.local_x() * strafe_step;
            player.position -= offset;
            intent = MovementIntent::Forward;
        } else {
            player.yaw -= config.rotation_speed * delta;
        }
    }

    let mut penalty = 1.0;
    if aiming && exempt {
        penalty *= EXEMPT_SPEED_PENALTY;
    }
    if reloading && exempt {
        penalty *= EXEMPT_SPEED_PENALTY;
    }

    if input.forward {
        let mut step = profile.speed * delta * penalty;
        if input.sprint {
            step *= config.sprint_multiplier;
        }
        let offset = player.forward() * step;
        player.position += offset;
        intent = if input.sprint {
            MovementIntent::Run
        } else {
            MovementIntent::Forward
        };
    }

    if input.backward {
        // Назад без спринта
        let step = profile.speed * BACKWARD_SPEED_FACTOR * delta * penalty;
        let offset = player.forward() * step;
        player.position -= offset;
        intent = MovementIntent::Backward;
    }

    intent
}

/// Система: применяет priority resolution и выбирает клип игрока
pub fn player_controller(
    mut state: ResMut<GameState>,
    mut input: ResMut<PlayerInput>,
    config: Res<SimulationConfig>,
    clock: Res<SimClock>,
    mut frame: ResMut<PlayerFrame>,
    mut players: Query<(&mut PlayerState, Option<&mut AnimationDriver>), With<Player>>,
) {
    let Ok((mut player, driver)) = players.single_mut() else {
        return;
    };

    let outcome = resolve_frame(&mut state, &mut player, &input, &config, clock.delta);
    input.look_delta = Vec2::ZERO;
    *frame = outcome.frame;

    let Some(mut driver) = driver else {
        return;
    };

    if outcome.dance_cancelled {
        driver.release(&idle_clip(state.character, state.current_weapon));
    }
    if let Some(clip) = frame_clip(&state, &frame) {
        driver.request_loop(&clip);
    }
}
