//! Input surface: удерживаемые оси (resource) + дискретные edges (events).
//!
//! Host (окно, геймпад, тестовый скрипт) пишет сюда, симуляция читает.

use bevy::prelude::*;

use crate::characters::CharacterId;
use crate::weapons::WeaponId;

/// Удерживаемые кнопки + накопленная дельта указателя
///
/// `look_delta` обнуляется симуляцией после применения.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub aim_held: bool,
    pub fire_held: bool,
    pub look_delta: Vec2,
}

impl PlayerInput {
    pub fn any_movement(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// Дискретные нажатия
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    FirePressed,
    /// Только для `AimMode::Toggle`
    AimPressed,
    Reload,
    QuickTurn,
    Dance,
    ToggleKeyboardAim,
    ToggleInventory,
    TogglePause,
    ToggleFreecam,
    Equip(WeaponId),
    UseHerb,
    SelectCharacter(CharacterId),
    Retry,
}
