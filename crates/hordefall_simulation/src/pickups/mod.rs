//! Pickup/Economy: loot drop, подбор, применение к резерву/инвентарю.

use bevy::prelude::*;
use rand::Rng;

use crate::enemy::EnemyKilled;
use crate::player::{Player, PlayerState};
use crate::state::{GameState, Inventory};
use crate::weapons::WeaponId;
use crate::{DeterministicRng, SimSet};

/// Шанс дропа с убитого врага
pub const LOOT_CHANCE: f32 = 0.2;
pub const PICKUP_RADIUS: f32 = 1.5;
pub const RANDOM_PICKUP_MIN_DISTANCE: f32 = 10.0;
pub const RANDOM_PICKUP_DISTANCE_SPREAD: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PickupKind {
    HandgunAmmo,
    ShotgunAmmo,
    SmgAmmo,
    RifleAmmo,
    MagnumAmmo,
    Herb,
}

impl PickupKind {
    /// Прибавка к резерву; `None` для herb
    pub fn ammo_grant(self) -> Option<(WeaponId, u32)> {
        match self {
            PickupKind::HandgunAmmo => Some((WeaponId::Pistol, 15)),
            PickupKind::ShotgunAmmo => Some((WeaponId::Shotgun, 8)),
            PickupKind::SmgAmmo => Some((WeaponId::Smg, 20)),
            PickupKind::RifleAmmo => Some((WeaponId::Rifle, 25)),
            PickupKind::MagnumAmmo => Some((WeaponId::Magnum, 6)),
            PickupKind::Herb => None,
        }
    }

    pub fn message(self) -> String {
        match self.ammo_grant() {
            Some((_, amount)) => format!("{} +{}", self.label(), amount),
            None => format!("{} +1", self.label()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PickupKind::HandgunAmmo => "HANDGUN AMMO",
            PickupKind::ShotgunAmmo => "SHOTGUN AMMO",
            PickupKind::SmgAmmo => "SMG AMMO",
            PickupKind::RifleAmmo => "RIFLE AMMO",
            PickupKind::MagnumAmmo => "MAGNUM AMMO",
            PickupKind::Herb => "HERB",
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCollected {
    pub kind: PickupKind,
}

/// Применение подбора: резерв оружия или стек herb
pub fn apply_pickup(kind: PickupKind, state: &mut GameState, inventory: &mut Inventory) {
    match kind.ammo_grant() {
        Some((weapon, amount)) => {
            let weapon_state = state.weapon_state_mut(weapon);
            weapon_state.reserve = weapon_state.reserve.saturating_add(amount);
        }
        None => inventory.add_herb(),
    }
}

/// Roll дропа: `chance_roll < 0.2`, категория по таблице персонажа
pub fn roll_loot(state: &GameState, chance_roll: f32, kind_roll: f32) -> Option<PickupKind> {
    if chance_roll >= LOOT_CHANCE {
        return None;
    }
    Some(state.character.profile().loot.pick(kind_roll))
}

/// Внешний вызов: случайный pickup (handgun/shotgun/herb) в 10–25 от центра
pub fn spawn_random_pickup(commands: &mut Commands, rng: &mut DeterministicRng) -> Entity {
    const KINDS: [PickupKind; 3] = [PickupKind::HandgunAmmo, PickupKind::ShotgunAmmo, PickupKind::Herb];

    let kind = KINDS[rng.rng.gen_range(0..KINDS.len())];
    let angle = rng.rng.gen::<f32>() * std::f32::consts::TAU;
    let distance = RANDOM_PICKUP_MIN_DISTANCE + rng.rng.gen::<f32>() * RANDOM_PICKUP_DISTANCE_SPREAD;
    let position = Vec3::new(angle.sin() * distance, 0.0, angle.cos() * distance);

    commands.spawn(Pickup { kind, position }).id()
}

/// Система: loot roll на каждую смерть врага
pub fn drop_loot(
    mut commands: Commands,
    mut killed: EventReader<EnemyKilled>,
    state: Res<GameState>,
    mut rng: ResMut<DeterministicRng>,
) {
    for death in killed.read() {
        let chance_roll = rng.rng.gen::<f32>();
        let kind_roll = rng.rng.gen::<f32>();
        let Some(kind) = roll_loot(&state, chance_roll, kind_roll) else {
            continue;
        };

        let position = Vec3::new(death.position.x, 0.0, death.position.z);
        commands.spawn(Pickup { kind, position });
        crate::logger::log(&format!("🎁 Loot dropped: {:?}", kind));
    }
}

/// Система: подбор в радиусе 1.5
pub fn collect_pickups(
    mut commands: Commands,
    mut state: ResMut<GameState>,
    mut inventory: ResMut<Inventory>,
    players: Query<&PlayerState, With<Player>>,
    pickups: Query<(Entity, &Pickup)>,
    mut collected: EventWriter<PickupCollected>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (entity, pickup) in pickups.iter() {
        if pickup.position.distance(player.position) >= PICKUP_RADIUS {
            continue;
        }

        apply_pickup(pickup.kind, &mut state, &mut inventory);
        commands.entity(entity).despawn();
        collected.write(PickupCollected { kind: pickup.kind });
    }
}

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupCollected>().add_systems(
            FixedUpdate,
            (drop_loot, collect_pickups).chain().in_set(SimSet::Pickups),
        );
    }
}
