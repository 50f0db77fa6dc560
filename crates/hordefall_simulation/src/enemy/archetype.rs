//! Архетипы врагов и их behavior profiles.
//!
//! Форма профиля фиксирована для всех архетипов: разное число
//! attack/death/hit вариантов выражено длиной слайсов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub enum EnemyArchetype {
    Walker1,
    Walker2,
    Runner3,
    Runner4,
    Runner5,
    Tank,
}

impl EnemyArchetype {
    /// Пять базовых архетипов, по 20% каждый
    pub const BASE: [EnemyArchetype; 5] = [
        EnemyArchetype::Walker1,
        EnemyArchetype::Walker2,
        EnemyArchetype::Runner3,
        EnemyArchetype::Runner4,
        EnemyArchetype::Runner5,
    ];

    pub fn profile(self) -> &'static BehaviorProfile {
        match self {
            EnemyArchetype::Walker1 | EnemyArchetype::Walker2 => &WALKER,
            EnemyArchetype::Runner3 | EnemyArchetype::Runner4 | EnemyArchetype::Runner5 => &RUNNER,
            EnemyArchetype::Tank => &TANK,
        }
    }

    /// Model reference по умолчанию (переопределяется в конфиге)
    pub fn default_model(self) -> &'static str {
        match self {
            EnemyArchetype::Walker1 => "zombie/zombie1/zombie1.glb",
            EnemyArchetype::Walker2 => "zombie/zombie2/zombie2.glb",
            EnemyArchetype::Runner3 => "zombie/zombie3/zombie3.glb",
            EnemyArchetype::Runner4 => "zombie/zombie4/zombie4.glb",
            EnemyArchetype::Runner5 => "zombie/zombie5/zombie5.glb",
            EnemyArchetype::Tank => "zombie/zombie6/zombie6.glb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Locomotion {
    /// Два walk-клипа, переключение каждые 2–3 секунды
    Alternating([&'static str; 2]),
    Single(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorProfile {
    pub base_hp: u32,
    pub hp_per_round: u32,
    pub walk_speed: f32,
    pub lunge_speed: f32,
    pub locomotion: Locomotion,
    pub idle: &'static str,
    pub attacks: &'static [&'static str],
    pub deaths: &'static [&'static str],
    pub hits: &'static [&'static str],
    /// "Большой" враг: усиленный collision damage
    pub large: bool,
    /// Центр головы placeholder-модели (локально, до поворота)
    pub placeholder_head: Vec3,
}

pub const COLLISION_DAMAGE: u32 = 15;
pub const LARGE_COLLISION_DAMAGE: u32 = 25;

pub static WALKER: BehaviorProfile = BehaviorProfile {
    base_hp: 100,
    hp_per_round: 20,
    walk_speed: 2.0,
    lunge_speed: 8.0,
    locomotion: Locomotion::Alternating(["walk1", "walk2"]),
    idle: "idle",
    attacks: &["attack1", "attack2"],
    deaths: &["death1", "death2"],
    hits: &["hit1", "hit2"],
    large: false,
    placeholder_head: Vec3::new(0.0, 1.95, 0.1),
};

pub static RUNNER: BehaviorProfile = BehaviorProfile {
    base_hp: 60,
    hp_per_round: 15,
    walk_speed: 2.5,
    lunge_speed: 12.0,
    locomotion: Locomotion::Single("run"),
    idle: "idle",
    attacks: &["attack1", "attack2", "attack3"],
    deaths: &["death1", "death2"],
    hits: &["hit1", "hit2"],
    large: false,
    placeholder_head: Vec3::new(0.0, 1.95, 0.1),
};

pub static TANK: BehaviorProfile = BehaviorProfile {
    base_hp: 150,
    hp_per_round: 25,
    walk_speed: 2.5,
    lunge_speed: 6.0,
    locomotion: Locomotion::Single("walk"),
    idle: "idle",
    attacks: &["attack"],
    deaths: &["death"],
    hits: &[],
    large: true,
    placeholder_head: Vec3::new(0.0, 2.25, 0.15),
};

impl BehaviorProfile {
    pub fn hp_for_round(&self, round: u32) -> u32 {
        self.base_hp + self.hp_per_round * round
    }

    pub fn collision_damage(&self) -> u32 {
        if self.large {
            LARGE_COLLISION_DAMAGE
        } else {
            COLLISION_DAMAGE
        }
    }
}
