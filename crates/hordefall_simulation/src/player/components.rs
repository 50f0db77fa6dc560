//! Player components и per-frame output контроллера.

use bevy::prelude::*;

/// Маркер: управляемый игроком персонаж
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Быстрый разворот на 180° (ease-out cubic)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct QuickTurn {
    pub start_yaw: f32,
    pub target_yaw: f32,
    pub timer: f32,
    pub duration: f32,
}

impl QuickTurn {
    pub fn new(start_yaw: f32, duration: f32) -> Self {
        Self {
            start_yaw,
            target_yaw: start_yaw + std::f32::consts::PI,
            timer: 0.0,
            duration,
        }
    }

    /// Продвигает таймер, возвращает (yaw, finished)
    pub fn advance(&mut self, delta: f32) -> (f32, bool) {
        self.timer += delta;
        let progress = (self.timer / self.duration).min(1.0);
        let t = ease_out_cubic(progress);
        let yaw = self.start_yaw + (self.target_yaw - self.start_yaw) * t;
        (yaw, progress >= 1.0)
    }
}

/// `t = 1 - (1 - p)^3`
pub fn ease_out_cubic(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// Состояние игрока (владелец: Player Controller)
///
/// Combat/Enemy только читают; единственная внешняя мутация: `knockback`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerState {
    pub position: Vec3,
    /// Единственная ось вращения (tank controls)
    pub yaw: f32,
    pub aim_pitch: f32,
    pub quick_turn: Option<QuickTurn>,
    /// Индекс последнего удара ножом (цикл вариантов)
    pub last_stab: Option<usize>,
    pub last_dance: Option<usize>,
    pub last_hit: Option<usize>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            aim_pitch: 0.0,
            quick_turn: None,
            last_stab: None,
            last_dance: None,
            last_hit: None,
        }
    }
}

impl PlayerState {
    /// Локальная +Z
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Локальная +X
    pub fn local_x(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Направление прицела с учётом pitch
    pub fn aim_direction(&self) -> Vec3 {
        let cos_pitch = self.aim_pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.aim_pitch.sin(),
            self.yaw.cos() * cos_pitch,
        )
    }

    /// Локальное смещение (x вправо по модели, y вверх, z вперёд) → мир
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + self.local_x() * offset.x + Vec3::Y * offset.y + self.forward() * offset.z
    }

    pub fn knockback(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

/// Discriminated movement intent (для выбора анимации)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MovementIntent {
    #[default]
    Idle,
    Forward,
    Backward,
    Run,
}

/// Output контроллера за кадр
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerFrame {
    pub intent: MovementIntent,
    pub aiming: bool,
}
