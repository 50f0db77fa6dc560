//! Tests for weapon catalog and falloff math.

use super::*;

#[test]
fn test_falloff_invariant_holds_for_catalog() {
    for id in WeaponId::ALL {
        let def = id.definition();
        assert!(def.falloff_start <= def.falloff_end, "{:?}", id);
        assert_eq!(def.id, id);
    }
}

#[test]
fn test_damage_clamped_outside_falloff_range() {
    for id in WeaponId::ALL {
        let def = id.definition();
        if def.is_melee() {
            continue;
        }

        assert_eq!(def.damage_at(0.0), def.damage_close as f32);
        assert_eq!(def.damage_at(def.falloff_start), def.damage_close as f32);
        assert_eq!(def.damage_at(def.falloff_end), def.damage_far as f32);
        assert_eq!(def.damage_at(def.falloff_end + 100.0), def.damage_far as f32);
    }
}

#[test]
fn test_damage_strictly_decreasing_inside_falloff() {
    for id in WeaponId::ALL {
        let def = id.definition();
        if def.is_melee() {
            continue;
        }

        let span = def.falloff_end - def.falloff_start;
        let mut previous = def.damage_at(def.falloff_start);
        for step in 1..10 {
            let d = def.falloff_start + span * step as f32 / 10.0;
            let damage = def.damage_at(d);
            assert!(damage < previous, "{:?} at {}: {} !< {}", id, d, damage, previous);
            previous = damage;
        }
    }
}

#[test]
fn test_headshot_is_exactly_double() {
    for id in WeaponId::ALL {
        let def = id.definition();
        for d in [1.0, 7.3, 17.9, 22.5, 41.0, 80.0] {
            assert_eq!(def.hit_damage(d, true), def.hit_damage(d, false) * 2);
        }
    }
}

#[test]
fn test_pistol_midpoint_scenario() {
    // falloff 15..30, close 20, far 10 → midpoint 22.5 = 15
    assert_eq!(PISTOL.hit_damage(22.5, false), 15);
    assert_eq!(PISTOL.hit_damage(22.5, true), 30);
}

#[test]
fn test_initial_state() {
    assert_eq!(PISTOL.initial_state(), WeaponState { ammo: 15, reserve: 45 });
    assert_eq!(SHOTGUN.initial_state(), WeaponState { ammo: 8, reserve: 24 });
    assert_eq!(KNIFE.initial_state(), WeaponState { ammo: 1, reserve: 0 });
}

#[test]
fn test_reload_transfers_min_of_missing_and_reserve() {
    let mut state = WeaponState { ammo: 3, reserve: 60 };
    assert_eq!(state.apply_reload(15), 12);
    assert_eq!(state, WeaponState { ammo: 15, reserve: 48 });

    let mut starved = WeaponState { ammo: 0, reserve: 4 };
    assert_eq!(starved.apply_reload(15), 4);
    assert_eq!(starved, WeaponState { ammo: 4, reserve: 0 });

    let mut full = WeaponState { ammo: 15, reserve: 60 };
    assert_eq!(full.apply_reload(15), 0);
    assert!(full.is_full(15));
}

#[test]
fn test_display_name_uppercase() {
    assert_eq!(PISTOL.display_name(), "MATILDA");
    assert_eq!(SMG.display_name(), "MP5");
}
