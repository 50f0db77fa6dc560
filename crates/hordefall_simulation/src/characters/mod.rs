//! Играбельные персонажи: статы, стартовый loadout, loot-таблица, камера.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pickups::PickupKind;
use crate::weapons::WeaponId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum CharacterId {
    Leon,
    Claire,
    Hunk,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Leon, CharacterId::Claire, CharacterId::Hunk];

    pub fn profile(self) -> &'static CharacterProfile {
        match self {
            CharacterId::Leon => &LEON,
            CharacterId::Claire => &CLAIRE,
            CharacterId::Hunk => &HUNK,
        }
    }
}

/// Смещения камеры в локальных координатах игрока (x вправо, z вперёд)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOffsets {
    pub follow: Vec3,
    pub aim: Vec3,
}

pub const DEFAULT_CAMERA: CameraOffsets = CameraOffsets {
    follow: Vec3::new(0.8, 2.5, -3.5),
    aim: Vec3::new(1.0, 1.8, -1.2),
};

/// Loot при смерти врага: 40% primary / 40% secondary / 20% herb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootTable {
    pub primary: PickupKind,
    pub secondary: PickupKind,
}

impl LootTable {
    /// `roll` ∈ [0, 1)
    pub fn pick(&self, roll: f32) -> PickupKind {
        if roll < 0.4 {
            self.primary
        } else if roll < 0.8 {
            self.secondary
        } else {
            PickupKind::Herb
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub display_name: &'static str,
    pub speed: f32,
    pub max_hp: u32,
    pub loadout: &'static [WeaponId],
    pub starting_weapon: WeaponId,
    pub herbs: u32,
    pub loot: LootTable,
    /// Может двигаться при aim/reload (со штрафом скорости)
    pub movement_exempt: bool,
    /// При удержании aim A/D = strafe вместо поворота
    pub strafes_while_aiming: bool,
    pub camera: CameraOffsets,
    pub music_track: &'static str,
    /// Модель с клипами; `None` → block-модель без animator'а
    pub model: Option<&'static str>,
}

pub static LEON: CharacterProfile = CharacterProfile {
    id: CharacterId::Leon,
    display_name: "Leon",
    speed: 4.5,
    max_hp: 60,
    loadout: &[WeaponId::Pistol, WeaponId::Shotgun, WeaponId::Knife],
    starting_weapon: WeaponId::Pistol,
    herbs: 3,
    loot: LootTable {
        primary: PickupKind::HandgunAmmo,
        secondary: PickupKind::ShotgunAmmo,
    },
    movement_exempt: false,
    strafes_while_aiming: false,
    camera: CameraOffsets {
        follow: Vec3::new(0.9, 2.3, -4.0),
        aim: Vec3::new(1.1, 1.9, -1.3),
    },
    music_track: "leon_theme",
    model: Some("Leon/leon.glb"),
};

pub static CLAIRE: CharacterProfile = CharacterProfile {
    id: CharacterId::Claire,
    display_name: "Claire",
    speed: 6.0,
    max_hp: 50,
    loadout: &[WeaponId::Pistol, WeaponId::Smg, WeaponId::Knife],
    starting_weapon: WeaponId::Pistol,
    herbs: 3,
    loot: LootTable {
        primary: PickupKind::HandgunAmmo,
        secondary: PickupKind::SmgAmmo,
    },
    movement_exempt: false,
    strafes_while_aiming: false,
    camera: DEFAULT_CAMERA,
    music_track: "claire_theme",
    model: Some("claire/claire.glb"),
};

pub static HUNK: CharacterProfile = CharacterProfile {
    id: CharacterId::Hunk,
    display_name: "Hunk",
    speed: 3.5,
    max_hp: 80,
    loadout: &[WeaponId::Magnum, WeaponId::Rifle, WeaponId::Knife],
    starting_weapon: WeaponId::Magnum,
    herbs: 2,
    loot: LootTable {
        primary: PickupKind::MagnumAmmo,
        secondary: PickupKind::RifleAmmo,
    },
    movement_exempt: true,
    strafes_while_aiming: true,
    camera: DEFAULT_CAMERA,
    music_track: "hunk_theme",
    model: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_table_weights() {
        let loot = LEON.loot;
        assert_eq!(loot.pick(0.0), PickupKind::HandgunAmmo);
        assert_eq!(loot.pick(0.39), PickupKind::HandgunAmmo);
        assert_eq!(loot.pick(0.4), PickupKind::ShotgunAmmo);
        assert_eq!(loot.pick(0.79), PickupKind::ShotgunAmmo);
        assert_eq!(loot.pick(0.8), PickupKind::Herb);
        assert_eq!(loot.pick(0.999), PickupKind::Herb);
    }

    #[test]
    fn test_starting_weapon_is_in_loadout() {
        for id in CharacterId::ALL {
            let profile = id.profile();
            assert!(profile.loadout.contains(&profile.starting_weapon));
            assert!(profile.loadout.contains(&WeaponId::Knife));
        }
    }

    #[test]
    fn test_only_hunk_is_movement_exempt() {
        assert!(HUNK.movement_exempt && HUNK.strafes_while_aiming);
        assert!(!LEON.movement_exempt);
        assert!(!CLAIRE.movement_exempt);
    }
}
