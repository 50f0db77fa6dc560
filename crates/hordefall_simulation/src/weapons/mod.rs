//! Weapon catalog: статичные определения оружия + damage falloff.
//!
//! Данные без логики состояния. Состояние магазина (ammo/reserve)
//! живёт в `GameState::weapon_states`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod catalog_tests;

/// Идентификатор оружия (ключ каталога)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub enum WeaponId {
    Pistol,
    Shotgun,
    Rifle,
    Smg,
    Magnum,
    Knife,
}

impl WeaponId {
    pub const ALL: [WeaponId; 6] = [
        WeaponId::Pistol,
        WeaponId::Shotgun,
        WeaponId::Rifle,
        WeaponId::Smg,
        WeaponId::Magnum,
        WeaponId::Knife,
    ];

    pub fn definition(self) -> &'static WeaponDefinition {
        match self {
            WeaponId::Pistol => &PISTOL,
            WeaponId::Shotgun => &SHOTGUN,
            WeaponId::Rifle => &RIFLE,
            WeaponId::Smg => &SMG,
            WeaponId::Magnum => &MAGNUM,
            WeaponId::Knife => &KNIFE,
        }
    }

    /// Префикс имён анимаций игрока (`pistol_idle`, `knife_stab` ...)
    pub fn clip_prefix(self) -> &'static str {
        match self {
            WeaponId::Pistol => "pistol",
            WeaponId::Shotgun => "shotgun",
            WeaponId::Rifle => "rifle",
            WeaponId::Smg => "smg",
            WeaponId::Magnum => "magnum",
            WeaponId::Knife => "knife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Firearm,
    Melee,
}

/// Определение оружия (immutable)
///
/// Инвариант: `falloff_start <= falloff_end`.
/// Времена в секундах.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDefinition {
    pub id: WeaponId,
    pub name: &'static str,
    pub kind: WeaponKind,
    pub damage_close: u32,
    pub damage_far: u32,
    pub falloff_start: f32,
    pub falloff_end: f32,
    /// Минимальный интервал между выстрелами
    pub fire_interval: f32,
    pub magazine_size: u32,
    pub reload_duration: f32,
    /// Разброс (доля от единичного направления, 0 = точно в прицел)
    pub spread: f32,
    pub pellets: u32,
    pub automatic: bool,
    /// Высокий темп огня → увеличенные hit-сферы
    pub generous_hitbox: bool,
    pub melee_damage: u32,
}

pub static PISTOL: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Pistol,
    name: "Matilda",
    kind: WeaponKind::Firearm,
    damage_close: 20,
    damage_far: 10,
    falloff_start: 15.0,
    falloff_end: 30.0,
    fire_interval: 0.4,
    magazine_size: 15,
    reload_duration: 1.2,
    spread: 0.0,
    pellets: 1,
    automatic: false,
    generous_hitbox: false,
    melee_damage: 0,
};

pub static SHOTGUN: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Shotgun,
    name: "W-870",
    kind: WeaponKind::Firearm,
    damage_close: 50,
    damage_far: 10,
    falloff_start: 5.0,
    falloff_end: 12.0,
    fire_interval: 1.1,
    magazine_size: 8,
    reload_duration: 2.5,
    spread: 0.15,
    pellets: 6,
    automatic: false,
    generous_hitbox: false,
    melee_damage: 0,
};

pub static RIFLE: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Rifle,
    name: "AR-15",
    kind: WeaponKind::Firearm,
    damage_close: 28,
    damage_far: 18,
    falloff_start: 20.0,
    falloff_end: 50.0,
    fire_interval: 0.1,
    magazine_size: 30,
    reload_duration: 2.0,
    spread: 0.04,
    pellets: 1,
    automatic: true,
    generous_hitbox: false,
    melee_damage: 0,
};

pub static SMG: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Smg,
    name: "MP5",
    kind: WeaponKind::Firearm,
    damage_close: 16,
    damage_far: 10,
    falloff_start: 10.0,
    falloff_end: 25.0,
    fire_interval: 0.06,
    magazine_size: 30,
    reload_duration: 1.8,
    spread: 0.03,
    pellets: 1,
    automatic: true,
    generous_hitbox: true,
    melee_damage: 0,
};

pub static MAGNUM: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Magnum,
    name: "Magnum",
    kind: WeaponKind::Firearm,
    damage_close: 80,
    damage_far: 60,
    falloff_start: 25.0,
    falloff_end: 60.0,
    fire_interval: 0.8,
    magazine_size: 6,
    reload_duration: 2.2,
    spread: 0.0,
    pellets: 1,
    automatic: false,
    generous_hitbox: false,
    melee_damage: 0,
};

pub static KNIFE: WeaponDefinition = WeaponDefinition {
    id: WeaponId::Knife,
    name: "Knife",
    kind: WeaponKind::Melee,
    damage_close: 0,
    damage_far: 0,
    falloff_start: 0.0,
    falloff_end: 0.0,
    fire_interval: 0.6,
    magazine_size: 1,
    reload_duration: 0.0,
    spread: 0.0,
    pellets: 0,
    automatic: false,
    generous_hitbox: false,
    melee_damage: 35,
};

impl WeaponDefinition {
    pub fn is_melee(&self) -> bool {
        self.kind == WeaponKind::Melee
    }

    /// Сырой (не округлённый) урон на дистанции `distance`
    ///
    /// - `d <= falloff_start` → damage_close
    /// - `d >= falloff_end` → damage_far
    /// - между ними линейная интерполяция
    pub fn damage_at(&self, distance: f32) -> f32 {
        let close = self.damage_close as f32;
        let far = self.damage_far as f32;

        if distance <= self.falloff_start {
            return close;
        }
        if distance >= self.falloff_end {
            return far;
        }

        let ratio = (distance - self.falloff_start) / (self.falloff_end - self.falloff_start);
        close + (far - close) * ratio
    }

    /// Итоговый урон попадания: тело округляется, headshot = ровно 2× тело
    pub fn hit_damage(&self, distance: f32, headshot: bool) -> u32 {
        let body = self.damage_at(distance).round() as u32;
        if headshot {
            body * 2
        } else {
            body
        }
    }

    /// Стартовое состояние магазина при выборе персонажа
    pub fn initial_state(&self) -> WeaponState {
        match self.kind {
            WeaponKind::Melee => WeaponState { ammo: 1, reserve: 0 },
            WeaponKind::Firearm => WeaponState {
                ammo: self.magazine_size,
                reserve: self.magazine_size * 3,
            },
        }
    }

    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Магазин + резерв одного оружия
///
/// Инвариант: `ammo <= magazine_size` (reserve unsigned → всегда ≥ 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub struct WeaponState {
    pub ammo: u32,
    pub reserve: u32,
}

impl WeaponState {
    /// Сколько патронов перезарядка перенесёт из резерва
    pub fn reload_amount(&self, magazine_size: u32) -> u32 {
        magazine_size.saturating_sub(self.ammo).min(self.reserve)
    }

    /// Перенос `min(magazine - ammo, reserve)` из резерва в магазин
    pub fn apply_reload(&mut self, magazine_size: u32) -> u32 {
        let amount = self.reload_amount(magazine_size);
        self.ammo += amount;
        self.reserve -= amount;
        amount
    }

    pub fn is_full(&self, magazine_size: u32) -> bool {
        self.ammo >= magazine_size
    }
}
