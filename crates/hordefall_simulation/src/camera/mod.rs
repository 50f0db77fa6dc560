//! Camera Rig: third-person follow/aim + free-fly режим.
//!
//! Позиция и forward камеры: источник hitscan-луча.

use bevy::prelude::*;

use crate::characters::CameraOffsets;
use crate::combat::hitscan::AimRay;
use crate::config::SimulationConfig;
use crate::input::PlayerInput;
use crate::player::{Player, PlayerFrame, PlayerState};
use crate::state::GameState;
use crate::SimSet;

/// Доля пути к целевой позиции за тик
pub const CAMERA_LERP: f32 = 0.15;
/// Вне прицеливания камера смотрит на игрока + 1.5 вверх + 5 вперёд
pub const LOOK_HEIGHT: f32 = 1.5;
pub const LOOK_AHEAD: f32 = 5.0;
pub const FREECAM_SPEED: f32 = 10.0;
/// Затухание скорости freecam за тик без ввода
pub const FREECAM_DAMPING: f32 = 0.8;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// Нормализовано
    pub forward: Vec3,
    pub free_yaw: f32,
    pub free_pitch: f32,
    pub free_velocity: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.5, -3.5),
            forward: Vec3::Z,
            free_yaw: 0.0,
            free_pitch: 0.0,
            free_velocity: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    pub fn aim_ray(&self) -> AimRay {
        AimRay::new(self.position, self.forward)
    }

    pub fn target_position(offsets: &CameraOffsets, player: &PlayerState, aiming: bool) -> Vec3 {
        let offset = if aiming { offsets.aim } else { offsets.follow };
        player.local_to_world(offset)
    }

    pub fn look_direction(&self, player: &PlayerState, aiming: bool) -> Vec3 {
        if aiming {
            return player.aim_direction();
        }
        let focus = player.position + Vec3::Y * LOOK_HEIGHT + player.forward() * LOOK_AHEAD;
        (focus - self.position).normalize_or(player.forward())
    }

    /// Один тик follow/aim
    pub fn follow(&mut self, offsets: &CameraOffsets, player: &PlayerState, aiming: bool) {
        let target = Self::target_position(offsets, player, aiming);
        self.position = self.position.lerp(target, CAMERA_LERP);
        self.forward = self.look_direction(player, aiming);
    }

    /// Мгновенно в целевую позицию (старт игры)
    pub fn snap_to(&mut self, offsets: &CameraOffsets, player: &PlayerState) {
        self.position = Self::target_position(offsets, player, false);
        self.forward = self.look_direction(player, false);
    }

    /// Вход во freecam: ориентация наследуется от текущего forward
    pub fn enter_freecam(&mut self) {
        self.free_yaw = self.forward.x.atan2(self.forward.z);
        self.free_pitch = self.forward.y.clamp(-1.0, 1.0).asin();
        self.free_velocity = Vec3::ZERO;
    }

    fn free_forward(&self) -> Vec3 {
        let cos_pitch = self.free_pitch.cos();
        Vec3::new(
            self.free_yaw.sin() * cos_pitch,
            self.free_pitch.sin(),
            self.free_yaw.cos() * cos_pitch,
        )
    }

    /// Fly-камера: pointer delta → yaw/pitch, оси движения → перемещение
    pub fn fly(&mut self, input: &PlayerInput, config: &SimulationConfig, delta: f32) {
        self.free_yaw -= input.look_delta.x * config.mouse_sensitivity;
        self.free_pitch = (self.free_pitch - input.look_delta.y * config.mouse_sensitivity)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.01, std::f32::consts::FRAC_PI_2 - 0.01);
        self.forward = self.free_forward();

        let right = self.forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let mut direction = Vec3::ZERO;
        if input.forward {
            direction += self.forward;
        }
        if input.backward {
            direction -= self.forward;
        }
        if input.right {
            direction += right;
        }
        if input.left {
            direction -= right;
        }

        if direction == Vec3::ZERO {
            self.free_velocity *= FREECAM_DAMPING;
        } else {
            self.free_velocity = direction.normalize_or_zero() * FREECAM_SPEED;
        }
        self.position += self.free_velocity * delta;
    }
}

/// Система: камера обновляется всегда (пауза, смерть, freecam)
pub fn update_camera_rig(
    time: Res<Time>,
    state: Res<GameState>,
    frame: Res<PlayerFrame>,
    config: Res<SimulationConfig>,
    mut input: ResMut<PlayerInput>,
    mut rig: ResMut<CameraRig>,
    players: Query<&PlayerState, With<Player>>,
) {
    if state.flags.freecam {
        rig.fly(&input, &config, time.delta_secs());
        input.look_delta = Vec2::ZERO;
        return;
    }

    if !state.started || state.flags.paused || state.flags.inventory_open {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let aiming = frame.aiming && !state.flags.dead;
    rig.follow(&state.character.profile().camera, player, aiming);
}

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(FixedUpdate, update_camera_rig.in_set(SimSet::Camera));
    }
}
