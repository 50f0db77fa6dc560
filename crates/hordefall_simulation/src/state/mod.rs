//! Game State: единый mutable record симуляции.
//!
//! Владелец: frame tick (все системы в FixedUpdate, последовательно).
//! Создаётся при выборе персонажа, сбрасывается на retry.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::characters::CharacterId;
use crate::components::Health;
use crate::weapons::{WeaponId, WeaponState};

pub mod inventory;


pub use inventory::*;

/// Часы симуляции (секунды)
///
/// Идут только пока симуляция активна: пауза, инвентарь, freecam
/// и смерть замораживают все cooldown'ы и отложенные действия.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    pub elapsed: f32,
    pub delta: f32,
    pub tick: u64,
}

impl SimClock {
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta;
        self.tick += 1;
    }

    pub fn hold(&mut self) {
        self.delta = 0.0;
    }
}

/// Флаги action-priority mask + режимы ввода
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ActionFlags {
    pub reloading: bool,
    pub dancing: bool,
    pub quick_turning: bool,
    pub dead: bool,
    pub playing_death_animation: bool,
    pub freecam: bool,
    pub paused: bool,
    pub inventory_open: bool,
    /// Keyboard-aim (W/S = pitch, A/D = yaw, translation locked)
    pub keyboard_aim: bool,
    /// Защёлка aim для `AimMode::Toggle`
    pub aim_latched: bool,
}

/// Счётчики волны
///
/// Инвариант: `defeated <= to_spawn`, `spawned <= to_spawn`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct WaveCounters {
    pub to_spawn: u32,
    pub spawned: u32,
    pub alive: u32,
    pub defeated: u32,
}

/// `5 + (r - 1) * 2`
pub fn enemies_for_round(round: u32) -> u32 {
    5 + round.saturating_sub(1) * 2
}

impl WaveCounters {
    pub fn for_round(round: u32) -> Self {
        Self {
            to_spawn: enemies_for_round(round),
            ..Default::default()
        }
    }

    /// Сколько осталось победить (для HUD)
    pub fn remaining(&self) -> u32 {
        self.to_spawn.saturating_sub(self.defeated)
    }

    pub fn wants_spawn(&self) -> bool {
        self.spawned < self.to_spawn
    }

    pub fn is_complete(&self) -> bool {
        self.defeated >= self.to_spawn
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    pub character: CharacterId,
    /// false до выбора персонажа (меню)
    pub started: bool,
    pub health: Health,
    pub round: u32,
    pub current_weapon: WeaponId,
    /// Ключи фиксируются при старте игры
    pub weapon_states: BTreeMap<WeaponId, WeaponState>,
    pub last_fire_time: Option<f32>,
    pub last_hit_time: Option<f32>,
    pub last_spawn_time: f32,
    pub flags: ActionFlags,
    pub waves: WaveCounters,
    /// Номер текущей перезарядки (guard для отложенного завершения)
    pub reload_serial: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            character: CharacterId::Leon,
            started: false,
            health: Health::new(CharacterId::Leon.profile().max_hp),
            round: 0,
            current_weapon: WeaponId::Pistol,
            weapon_states: BTreeMap::new(),
            last_fire_time: None,
            last_hit_time: None,
            last_spawn_time: 0.0,
            flags: ActionFlags::default(),
            waves: WaveCounters::default(),
            reload_serial: 0,
        }
    }
}

/// Результат попытки перезарядки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Started { serial: u32 },
    AlreadyReloading,
    /// Quick turn в процессе
    Blocked,
    Melee,
    Full,
    NoReserve,
}

impl GameState {
    /// Новая игра за `character` (round 0, `begin_round(1)` делает wave spawner)
    pub fn new_game(character: CharacterId, now: f32) -> Self {
        let profile = character.profile();
        let weapon_states = WeaponId::ALL
            .iter()
            .map(|id| (*id, id.definition().initial_state()))
            .collect();

        Self {
            character,
            started: true,
            health: Health::new(profile.max_hp),
            round: 0,
            current_weapon: profile.starting_weapon,
            weapon_states,
            last_fire_time: None,
            last_hit_time: None,
            last_spawn_time: now,
            flags: ActionFlags::default(),
            waves: WaveCounters::default(),
            reload_serial: 0,
        }
    }

    /// Симуляция персонажа/врагов идёт (не меню, не пауза, не смерть, не freecam)
    pub fn simulation_active(&self) -> bool {
        self.started
            && !self.flags.paused
            && !self.flags.inventory_open
            && !self.flags.dead
            && !self.flags.freecam
    }

    pub fn weapon(&self) -> WeaponState {
        self.weapon_states
            .get(&self.current_weapon)
            .copied()
            .unwrap_or_default()
    }

    pub fn weapon_state_mut(&mut self, weapon: WeaponId) -> &mut WeaponState {
        self.weapon_states.entry(weapon).or_default()
    }

    pub fn fire_ready(&self, now: f32) -> bool {
        let interval = self.current_weapon.definition().fire_interval;
        self.last_fire_time
            .map_or(true, |last| now - last >= interval)
    }

    pub fn is_invincible(&self, now: f32, window: f32) -> bool {
        self.last_hit_time.map_or(false, |last| now - last <= window)
    }

    pub fn begin_round(&mut self, round: u32, now: f32) {
        self.round = round;
        self.waves = WaveCounters::for_round(round);
        self.last_spawn_time = now;
    }

    /// Gate перезарядки: no-op если уже идёт, нож, полный магазин или пустой резерв
    pub fn try_start_reload(&mut self) -> ReloadOutcome {
        if self.flags.reloading {
            return ReloadOutcome::AlreadyReloading;
        }

        let definition = self.current_weapon.definition();
        if definition.is_melee() {
            return ReloadOutcome::Melee;
        }

        let state = self.weapon();
        if state.is_full(definition.magazine_size) {
            return ReloadOutcome::Full;
        }
        if state.reserve == 0 {
            return ReloadOutcome::NoReserve;
        }

        self.reload_serial = self.reload_serial.wrapping_add(1);
        self.flags.reloading = true;
        self.flags.dancing = false;
        ReloadOutcome::Started {
            serial: self.reload_serial,
        }
    }

    /// Завершение перезарядки (отложенное). Stale serial → no-op.
    pub fn finish_reload(&mut self, serial: u32) -> Option<u32> {
        if !self.flags.reloading || self.reload_serial != serial {
            return None;
        }

        self.flags.reloading = false;
        let magazine = self.current_weapon.definition().magazine_size;
        let weapon = self.current_weapon;
        Some(self.weapon_state_mut(weapon).apply_reload(magazine))
    }

    /// Смена оружия отменяет незавершённую перезарядку
    pub fn equip(&mut self, weapon: WeaponId) -> bool {
        if self.current_weapon == weapon {
            return false;
        }

        self.current_weapon = weapon;
        if self.flags.reloading {
            self.flags.reloading = false;
            self.reload_serial = self.reload_serial.wrapping_add(1);
        }
        true
    }
}
