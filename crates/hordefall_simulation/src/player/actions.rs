//! Дискретные действия игрока (reload, quick turn, dance, aim toggles)
//! и отложенные продолжения player-lane.

use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::config::{AimMode, SimulationConfig};
use crate::input::{PlayerAction, PlayerInput};
use crate::player::animation::{dance_clip, idle_clip};
use crate::player::controller::aim_engaged;
use crate::player::{Player, PlayerFrame, PlayerState, QuickTurn};
use crate::schedule::{ActionLane, ScheduledAction, ScheduledActions};
use crate::state::{GameState, ReloadOutcome, SimClock};

pub const RELOAD_CLIP: &str = "reload";

/// Старт перезарядки + постановка завершения в очередь
pub fn start_reload(
    state: &mut GameState,
    scheduled: &mut ScheduledActions,
    now: f32,
    driver: Option<&mut AnimationDriver>,
) -> ReloadOutcome {
    if state.flags.quick_turning {
        return ReloadOutcome::Blocked;
    }

    let outcome = state.try_start_reload();
    if let ReloadOutcome::Started { serial } = outcome {
        let definition = state.current_weapon.definition();
        scheduled.schedule(now, definition.reload_duration, ScheduledAction::FinishReload { serial });
        if let Some(driver) = driver {
            driver.play_once(RELOAD_CLIP);
        }
        crate::logger::log(&format!(
            "🔄 Reloading {} ({:.1}s)",
            definition.display_name(),
            definition.reload_duration
        ));
    }
    outcome
}

/// Quick turn: запрещён во время aim/reload и уже идущего разворота
pub fn start_quick_turn(
    state: &mut GameState,
    player: &mut PlayerState,
    aiming: bool,
    duration: f32,
) -> bool {
    if state.flags.quick_turning || state.flags.reloading || aiming {
        return false;
    }

    player.quick_turn = Some(QuickTurn::new(player.yaw, duration));
    state.flags.quick_turning = true;
    state.flags.dancing = false;
    true
}

pub fn handle_player_actions(
    mut actions: EventReader<PlayerAction>,
    mut state: ResMut<GameState>,
    input: Res<PlayerInput>,
    config: Res<SimulationConfig>,
    clock: Res<SimClock>,
    mut scheduled: ResMut<ScheduledActions>,
    mut players: Query<(&mut PlayerState, Option<&mut AnimationDriver>), With<Player>>,
) {
    let Ok((mut player, mut driver)) = players.single_mut() else {
        return;
    };

    for action in actions.read() {
        match action {
            PlayerAction::Reload => {
                start_reload(&mut state, &mut scheduled, clock.elapsed, driver.as_deref_mut());
            }
            PlayerAction::QuickTurn => {
                let aiming = aim_engaged(&state, &input, &config);
                if start_quick_turn(&mut state, &mut player, aiming, config.quick_turn_secs) {
                    if let Some(driver) = driver.as_deref_mut() {
                        driver.release(&idle_clip(state.character, state.current_weapon));
                    }
                }
            }
            PlayerAction::Dance => {
                if state.flags.dancing || state.flags.quick_turning || state.flags.reloading {
                    continue;
                }
                state.flags.dancing = true;
                let clip = dance_clip(state.character, &mut player);
                if let Some(driver) = driver.as_deref_mut() {
                    driver.release(&clip);
                }
            }
            PlayerAction::ToggleKeyboardAim => {
                state.flags.keyboard_aim = !state.flags.keyboard_aim;
                if !state.flags.keyboard_aim {
                    player.aim_pitch = 0.0;
                }
            }
            PlayerAction::AimPressed => {
                if config.aim_mode == AimMode::Toggle {
                    state.flags.aim_latched = !state.flags.aim_latched;
                }
            }
            // Fire → combat, остальное → session
            _ => {}
        }
    }
}

/// Система: отложенные действия player-lane (reload, возврат позы, hit recover)
pub fn run_player_timers(
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    frame: Res<PlayerFrame>,
    mut scheduled: ResMut<ScheduledActions>,
    mut drivers: Query<&mut AnimationDriver, With<Player>>,
) {
    let due = scheduled.take_due(clock.elapsed, ActionLane::Player);
    if due.is_empty() {
        return;
    }

    let mut driver = drivers.single_mut().ok();

    for action in due {
        match action {
            ScheduledAction::FinishReload { serial } => {
                let Some(amount) = state.finish_reload(serial) else {
                    continue;
                };
                crate::logger::log(&format!("✅ Reload complete (+{})", amount));
                if let Some(driver) = driver.as_deref_mut() {
                    driver.release(&idle_clip(state.character, state.current_weapon));
                }
            }
            ScheduledAction::ReturnToPose {
                clip,
                weapon,
                require_aiming,
            } => {
                if !state.health.is_alive() || state.flags.dead {
                    continue;
                }
                let Some(driver) = driver.as_deref_mut() else {
                    continue;
                };
                if state.current_weapon == weapon && (!require_aiming || frame.aiming) {
                    driver.release(&clip);
                } else if driver.is_locked() {
                    driver.release(&idle_clip(state.character, state.current_weapon));
                }
            }
            ScheduledAction::PlayerHitRecover => {
                if !state.health.is_alive() || state.flags.dead {
                    continue;
                }
                if let Some(driver) = driver.as_deref_mut() {
                    driver.release(&idle_clip(state.character, state.current_weapon));
                }
            }
            _ => {}
        }
    }
}
