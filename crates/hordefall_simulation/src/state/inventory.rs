//! Инвентарь игрока: оружие (ссылки в каталог) + стек herb.

use bevy::prelude::*;

use crate::characters::CharacterProfile;
use crate::components::Health;
use crate::weapons::WeaponId;

/// Сколько лечит один herb
pub const HERB_HEAL: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryItem {
    Weapon(WeaponId),
    Herb { amount: u32 },
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HerbOutcome {
    Healed { amount: u32 },
    FullHealth,
    NoHerbs,
}

impl Inventory {
    pub fn for_character(profile: &CharacterProfile) -> Self {
        let mut items: Vec<InventoryItem> = profile
            .loadout
            .iter()
            .map(|weapon| InventoryItem::Weapon(*weapon))
            .collect();
        if profile.herbs > 0 {
            items.push(InventoryItem::Herb {
                amount: profile.herbs,
            });
        }
        Self { items }
    }

    pub fn has_weapon(&self, weapon: WeaponId) -> bool {
        self.items
            .iter()
            .any(|item| *item == InventoryItem::Weapon(weapon))
    }

    pub fn herb_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| match item {
                InventoryItem::Herb { amount } => *amount,
                InventoryItem::Weapon(_) => 0,
            })
            .sum()
    }

    /// Увеличивает стек или создаёт новый
    pub fn add_herb(&mut self) {
        for item in self.items.iter_mut() {
            if let InventoryItem::Herb { amount } = item {
                *amount += 1;
                return;
            }
        }
        self.items.push(InventoryItem::Herb { amount: 1 });
    }

    /// Лечение herb'ом: только если hp < max, стек удаляется на нуле
    pub fn use_herb(&mut self, health: &mut Health) -> HerbOutcome {
        let Some(index) = self
            .items
            .iter()
            .position(|item| matches!(item, InventoryItem::Herb { amount } if *amount > 0))
        else {
            return HerbOutcome::NoHerbs;
        };

        if health.is_full() {
            return HerbOutcome::FullHealth;
        }

        let before = health.current;
        health.heal(HERB_HEAL);

        if let InventoryItem::Herb { amount } = &mut self.items[index] {
            *amount -= 1;
            if *amount == 0 {
                self.items.remove(index);
            }
        }

        HerbOutcome::Healed {
            amount: health.current - before,
        }
    }
}
