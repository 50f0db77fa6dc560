//! Player Controller module.
//!
//! Движение, поворот, aim/reload/quickturn/dance и выбор клипов игрока.

use bevy::prelude::*;

pub mod actions;
pub mod animation;
pub mod components;
pub mod controller;

#[cfg(test)]
mod controller_tests;

pub use actions::{start_quick_turn, start_reload};
pub use components::*;
pub use controller::{aim_engaged, resolve_frame, ControlOutcome};

use crate::SimSet;

/// Player Plugin
///
/// Порядок в `SimSet::Player`:
/// 1. run_player_timers: завершение reload, возврат позы
/// 2. handle_player_actions: reload/quickturn/dance/aim toggles
/// 3. player_controller: priority resolution → PlayerFrame
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerFrame>().add_systems(
            FixedUpdate,
            (
                actions::run_player_timers,
                actions::handle_player_actions,
                controller::player_controller,
            )
                .chain()
                .in_set(SimSet::Player),
        );
    }
}
