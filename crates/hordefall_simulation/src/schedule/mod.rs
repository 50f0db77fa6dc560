//! Отложенные действия (timer queue) вместо host event loop.
//!
//! Каждое действие проверяет свои предусловия в момент срабатывания:
//! между постановкой и выполнением враг мог умереть, игрок сменить оружие.
//! Очередь разбита на lanes, каждую дренирует система-владелец эффекта.

use bevy::prelude::*;

use crate::weapons::WeaponId;

#[cfg(test)]
mod schedule_tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionLane {
    Player,
    Combat,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// Guard: serial совпадает с текущей перезарядкой
    FinishReload { serial: u32 },
    /// Конус ножа после синхронизации с анимацией
    MeleeStrike,
    /// Возврат к позе после one-shot клипа (выстрел, удар ножом)
    ReturnToPose {
        clip: String,
        weapon: WeaponId,
        require_aiming: bool,
    },
    /// Возврат в idle после hit-реакции игрока (guard: hp > 0)
    PlayerHitRecover,
    /// Guard: враг жив, не dying, не в lunge
    EnemyHitRecover(Entity),
    EndLunge(Entity),
    RemoveEnemy(Entity),
}

impl ScheduledAction {
    pub fn lane(&self) -> ActionLane {
        match self {
            ScheduledAction::FinishReload { .. }
            | ScheduledAction::ReturnToPose { .. }
            | ScheduledAction::PlayerHitRecover => ActionLane::Player,
            ScheduledAction::MeleeStrike => ActionLane::Combat,
            ScheduledAction::EnemyHitRecover(_)
            | ScheduledAction::EndLunge(_)
            | ScheduledAction::RemoveEnemy(_) => ActionLane::Enemy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ScheduledEntry {
    due: f32,
    seq: u64,
    action: ScheduledAction,
}

#[derive(Resource, Debug, Default)]
pub struct ScheduledActions {
    entries: Vec<ScheduledEntry>,
    next_seq: u64,
}

impl ScheduledActions {
    pub fn schedule(&mut self, now: f32, delay: f32, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(ScheduledEntry {
            due: now + delay.max(0.0),
            seq,
            action,
        });
    }

    /// Забирает созревшие действия lane в порядке (due, постановка)
    pub fn take_due(&mut self, now: f32, lane: ActionLane) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            let entry = &self.entries[index];
            if entry.due <= now && entry.action.lane() == lane {
                due.push(self.entries.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.action).collect()
    }

    /// Отмена: все ещё не сработавшие действия, подходящие под предикат
    pub fn cancel_where(&mut self, predicate: impl Fn(&ScheduledAction) -> bool) {
        self.entries.retain(|entry| !predicate(&entry.action));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
