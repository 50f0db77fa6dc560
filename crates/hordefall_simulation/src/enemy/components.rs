use bevy::prelude::*;

use crate::components::Health;
use crate::enemy::archetype::{BehaviorProfile, EnemyArchetype, Locomotion};

/// Радиус старта lunge (6 футов)
pub const LUNGE_TRIGGER_RADIUS: f32 = 6.0 * 0.3048;
pub const LUNGE_COOLDOWN: f32 = 2.0;
/// Через сколько lunge завершается
pub const LUNGE_WINDUP: f32 = 0.5;
pub const COLLISION_RADIUS: f32 = 1.0;
pub const KNOCKBACK_DISTANCE: f32 = 0.5;
pub const HIT_RECOVER_DELAY: f32 = 0.3;
/// Grace period на death-анимацию до удаления
pub const REMOVAL_DELAY: f32 = 5.0;
/// Walk1/walk2 меняются раз в `BASE + jitter` (jitter ∈ [0, 1))
pub const WALK_SWITCH_BASE: f32 = 2.0;

/// Чем представлен враг: загруженная модель или placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Fidelity {
    Model,
    /// Модель не загрузилась: те же статы, без аниматора, меньшие hit-сферы
    Placeholder,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub fidelity: Fidelity,
    pub position: Vec3,
    pub yaw: f32,
    pub health: Health,
    pub speed: f32,
    pub lunge_speed: f32,
    pub is_lunging: bool,
    /// Snapshot позиции игрока на старте lunge
    pub lunge_target: Option<Vec3>,
    pub last_lunge_time: Option<f32>,
    pub is_dying: bool,
    /// Локальный центр головы (до поворота по yaw)
    pub head_offset: Vec3,
    pub walk_variant: usize,
    pub next_walk_switch: f32,
}

impl Enemy {
    pub fn new(
        archetype: EnemyArchetype,
        fidelity: Fidelity,
        position: Vec3,
        round: u32,
        head_offset: Vec3,
    ) -> Self {
        let profile = archetype.profile();
        Self {
            archetype,
            fidelity,
            position,
            yaw: 0.0,
            health: Health::new(profile.hp_for_round(round)),
            speed: profile.walk_speed,
            lunge_speed: profile.lunge_speed,
            is_lunging: false,
            lunge_target: None,
            last_lunge_time: None,
            is_dying: false,
            head_offset,
            walk_variant: 0,
            next_walk_switch: 0.0,
        }
    }

    pub fn profile(&self) -> &'static BehaviorProfile {
        self.archetype.profile()
    }

    pub fn head_center(&self) -> Vec3 {
        self.position + Quat::from_rotation_y(self.yaw) * self.head_offset
    }

    /// Yaw-lock на цель (только горизонталь)
    pub fn face(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.x.abs() > f32::EPSILON || to_target.z.abs() > f32::EPSILON {
            self.yaw = to_target.x.atan2(to_target.z);
        }
    }

    pub fn lunge_ready(&self, now: f32) -> bool {
        !self.is_dying
            && !self.is_lunging
            && self
                .last_lunge_time
                .map_or(true, |last| now - last > LUNGE_COOLDOWN)
    }

    /// Текущий клип передвижения; `jitter` ∈ [0, 1) для следующего переключения
    pub fn locomotion_clip(&mut self, now: f32, jitter: f32) -> &'static str {
        match self.profile().locomotion {
            Locomotion::Single(clip) => clip,
            Locomotion::Alternating(clips) => {
                if now >= self.next_walk_switch {
                    if self.next_walk_switch > 0.0 {
                        self.walk_variant = (self.walk_variant + 1) % clips.len();
                    }
                    self.next_walk_switch = now + WALK_SWITCH_BASE + jitter;
                }
                clips[self.walk_variant]
            }
        }
    }
}

/// Результат попадания по врагу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Уже dying
    Ignored,
    Wounded,
    Killed,
}

/// Урон врагу; dying враги урон не получают
pub fn damage_enemy(enemy: &mut Enemy, amount: u32) -> DamageOutcome {
    if enemy.is_dying {
        return DamageOutcome::Ignored;
    }

    enemy.health.take_damage(amount);
    if enemy.health.is_alive() {
        return DamageOutcome::Wounded;
    }

    enemy.is_dying = true;
    enemy.is_lunging = false;
    enemy.lunge_target = None;
    DamageOutcome::Killed
}
