//! Выбор клипов игрока по персонажу, оружию и состоянию.

use crate::characters::CharacterId;
use crate::player::{MovementIntent, PlayerFrame, PlayerState};
use crate::state::GameState;
use crate::weapons::WeaponId;

/// Через сколько после выстрела дробовика вернуться в aim
pub const FIRE_RETURN_DELAY: f32 = 0.8;
/// Длительность удара ножом до возврата в knife idle
pub const STAB_RETURN_DELAY: f32 = 0.6;
pub const HIT_RECOVER_DELAY: f32 = 0.5;

const LEON_STABS: [&str; 3] = ["knife_stab1", "knife_stab2", "knife_stab3"];
const CLAIRE_DANCES: [&str; 2] = ["dance1", "dance2"];
const CLAIRE_HITS: [&str; 2] = ["hit_pistol1", "hit_pistol2"];

/// Оружие, чей набор клипов использует персонаж
fn posed_weapon(character: CharacterId, weapon: WeaponId) -> WeaponId {
    match (character, weapon) {
        (CharacterId::Leon, WeaponId::Pistol | WeaponId::Shotgun | WeaponId::Knife) => weapon,
        (CharacterId::Claire, WeaponId::Pistol | WeaponId::Smg | WeaponId::Knife) => weapon,
        (CharacterId::Hunk, _) => weapon,
        _ => WeaponId::Pistol,
    }
}

pub fn idle_clip(character: CharacterId, weapon: WeaponId) -> String {
    format!("{}_idle", posed_weapon(character, weapon).clip_prefix())
}

pub fn locomotion_clip(character: CharacterId, weapon: WeaponId, intent: MovementIntent) -> String {
    let mut posed = posed_weapon(character, weapon);
    // У Leon нет knife-locomotion, берём пистолетные
    if character == CharacterId::Leon && posed == WeaponId::Knife {
        posed = WeaponId::Pistol;
    }

    match (character, posed, intent) {
        (_, _, MovementIntent::Idle) => idle_clip(character, weapon),
        (CharacterId::Leon, WeaponId::Shotgun, MovementIntent::Forward) => "shotgun_walk_1".to_string(),
        (CharacterId::Leon, WeaponId::Shotgun, MovementIntent::Backward) => "shotgun_walk".to_string(),
        (_, _, MovementIntent::Forward) => format!("{}_walk", posed.clip_prefix()),
        (_, _, MovementIntent::Run) => format!("{}_run", posed.clip_prefix()),
        (_, _, MovementIntent::Backward) => format!("{}_back", posed.clip_prefix()),
    }
}

pub fn aim_clip(character: CharacterId, weapon: WeaponId) -> String {
    let posed = posed_weapon(character, weapon);
    if posed == weapon && !weapon.definition().is_melee() {
        format!("{}_aim", posed.clip_prefix())
    } else {
        idle_clip(character, weapon)
    }
}

/// Клип текущего кадра; `None`: dance/reload уже играют свой клип
pub fn frame_clip(state: &GameState, frame: &PlayerFrame) -> Option<String> {
    if state.flags.dancing || state.flags.reloading {
        return None;
    }
    if frame.aiming {
        return Some(aim_clip(state.character, state.current_weapon));
    }
    Some(locomotion_clip(state.character, state.current_weapon, frame.intent))
}

/// Leon циклит три удара, остальные: один
pub fn stab_clip(character: CharacterId, player: &mut PlayerState) -> String {
    match character {
        CharacterId::Leon => {
            let next = player.last_stab.map_or(0, |last| (last + 1) % LEON_STABS.len());
            player.last_stab = Some(next);
            LEON_STABS[next].to_string()
        }
        _ => "knife_stab".to_string(),
    }
}

/// Claire чередует два танца
pub fn dance_clip(character: CharacterId, player: &mut PlayerState) -> String {
    match character {
        CharacterId::Claire => {
            let next = match player.last_dance {
                Some(0) => 1,
                _ => 0,
            };
            player.last_dance = Some(next);
            CLAIRE_DANCES[next].to_string()
        }
        _ => "dance".to_string(),
    }
}

/// `roll` ∈ [0, 1) используется только для случайного выбора Leon
pub fn hit_clip(character: CharacterId, weapon: WeaponId, player: &mut PlayerState, roll: f32) -> String {
    match character {
        CharacterId::Leon => match weapon {
            WeaponId::Knife => "pistol_hit".to_string(),
            WeaponId::Shotgun => "pistol_hit2".to_string(),
            _ if roll < 0.5 => "pistol_hit".to_string(),
            _ => "pistol_hit2".to_string(),
        },
        CharacterId::Claire => {
            let next = match player.last_hit {
                Some(0) => 1,
                _ => 0,
            };
            player.last_hit = Some(next);
            CLAIRE_HITS[next].to_string()
        }
        CharacterId::Hunk => "hit".to_string(),
    }
}

pub fn death_clip(character: CharacterId, weapon: WeaponId) -> String {
    format!("{}_death", posed_weapon(character, weapon).clip_prefix())
}

/// One-shot клип выстрела (сейчас только дробовик Leon)
pub fn fire_clip(character: CharacterId, weapon: WeaponId) -> Option<&'static str> {
    match (character, weapon) {
        (CharacterId::Leon, WeaponId::Shotgun) => Some("shotgun_fire"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leon_knife_uses_pistol_locomotion() {
        assert_eq!(idle_clip(CharacterId::Leon, WeaponId::Knife), "knife_idle");
        assert_eq!(
            locomotion_clip(CharacterId::Leon, WeaponId::Knife, MovementIntent::Forward),
            "pistol_walk"
        );
        assert_eq!(
            locomotion_clip(CharacterId::Claire, WeaponId::Knife, MovementIntent::Backward),
            "knife_back"
        );
    }

    #[test]
    fn test_leon_shotgun_walk_variants() {
        assert_eq!(
            locomotion_clip(CharacterId::Leon, WeaponId::Shotgun, MovementIntent::Forward),
            "shotgun_walk_1"
        );
        assert_eq!(
            locomotion_clip(CharacterId::Leon, WeaponId::Shotgun, MovementIntent::Backward),
            "shotgun_walk"
        );
    }

    #[test]
    fn test_aim_clip_falls_back_to_idle_for_knife() {
        assert_eq!(aim_clip(CharacterId::Leon, WeaponId::Shotgun), "shotgun_aim");
        assert_eq!(aim_clip(CharacterId::Claire, WeaponId::Knife), "knife_idle");
    }

    #[test]
    fn test_stab_cycle_and_dance_alternation() {
        let mut player = PlayerState::default();
        let stabs: Vec<String> = (0..4).map(|_| stab_clip(CharacterId::Leon, &mut player)).collect();
        assert_eq!(stabs, ["knife_stab1", "knife_stab2", "knife_stab3", "knife_stab1"]);

        assert_eq!(dance_clip(CharacterId::Claire, &mut player), "dance1");
        assert_eq!(dance_clip(CharacterId::Claire, &mut player), "dance2");
        assert_eq!(dance_clip(CharacterId::Claire, &mut player), "dance1");
    }

    #[test]
    fn test_hit_clip_rules() {
        let mut player = PlayerState::default();
        assert_eq!(hit_clip(CharacterId::Leon, WeaponId::Knife, &mut player, 0.9), "pistol_hit");
        assert_eq!(hit_clip(CharacterId::Leon, WeaponId::Shotgun, &mut player, 0.1), "pistol_hit2");
        assert_eq!(hit_clip(CharacterId::Claire, WeaponId::Pistol, &mut player, 0.0), "hit_pistol1");
        assert_eq!(hit_clip(CharacterId::Claire, WeaponId::Pistol, &mut player, 0.0), "hit_pistol2");
    }

    #[test]
    fn test_death_clip_is_weapon_specific() {
        assert_eq!(death_clip(CharacterId::Leon, WeaponId::Shotgun), "shotgun_death");
        assert_eq!(death_clip(CharacterId::Claire, WeaponId::Smg), "smg_death");
    }
}
