use bevy::prelude::*;

use super::*;
use crate::characters::CharacterId;
use crate::enemy::{Enemy, EnemyArchetype, Fidelity, WALKER};
use crate::player::PlayerState;
use crate::state::GameState;
use crate::weapons::{WeaponId, PISTOL, SMG};
use crate::DeterministicRng;

fn model_enemy(position: Vec3) -> Enemy {
    Enemy::new(
        EnemyArchetype::Walker1,
        Fidelity::Model,
        position,
        1,
        Vec3::new(0.0, 1.7, 0.0),
    )
}

fn placeholder_enemy(position: Vec3) -> Enemy {
    Enemy::new(
        EnemyArchetype::Walker1,
        Fidelity::Placeholder,
        position,
        1,
        WALKER.placeholder_head,
    )
}

#[test]
fn test_fire_consumes_ammo_and_stamps_time() {
    let mut state = GameState::new_game(CharacterId::Leon, 0.0);

    assert_eq!(try_fire(&mut state, 1.0), FireOutcome::Fired);
    assert_eq!(state.weapon().ammo, 14);
    assert_eq!(state.last_fire_time, Some(1.0));

    // Cooldown пистолета 0.4s
    assert_eq!(try_fire(&mut state, 1.2), FireOutcome::CoolingDown);
    assert_eq!(state.weapon().ammo, 14);
    assert_eq!(try_fire(&mut state, 1.5), FireOutcome::Fired);
}

#[test]
fn test_empty_magazine_changes_nothing() {
    let mut state = GameState::new_game(CharacterId::Leon, 0.0);
    state.weapon_state_mut(WeaponId::Pistol).ammo = 0;

    assert_eq!(try_fire(&mut state, 5.0), FireOutcome::Empty);
    assert_eq!(state.weapon().ammo, 0);
    assert_eq!(state.weapon().reserve, 45);
    assert_eq!(state.last_fire_time, None);
}

#[test]
fn test_knife_never_consumes_ammo() {
    let mut state = GameState::new_game(CharacterId::Leon, 0.0);
    state.equip(WeaponId::Knife);

    assert_eq!(try_fire(&mut state, 1.0), FireOutcome::Fired);
    assert_eq!(try_fire(&mut state, 1.3), FireOutcome::CoolingDown);
    assert_eq!(try_fire(&mut state, 1.7), FireOutcome::Fired);
    assert_eq!(state.weapon().ammo, 1);
}

#[test]
fn test_falloff_midpoint_body_and_head() {
    // Placeholder на оси луча: голова выше (1.95): попадает только тело
    let ray = AimRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
    let enemy = placeholder_enemy(Vec3::new(0.0, 0.0, 22.5));
    let entity = Entity::from_raw(1);

    let hit = resolve_pellet(&ray, [(entity, &enemy)], false).expect("body hit");
    assert!(!hit.headshot);
    assert!((hit.distance - 22.5).abs() < 1e-4);
    assert_eq!(PISTOL.hit_damage(hit.distance, hit.headshot), 15);

    let head_ray = AimRay::new(Vec3::new(0.0, 1.95, 0.0), Vec3::Z);
    let head_hit = resolve_pellet(&head_ray, [(entity, &enemy)], false).expect("head hit");
    assert!(head_hit.headshot);
    assert_eq!(PISTOL.hit_damage(head_hit.distance, head_hit.headshot), 30);
}

#[test]
fn test_head_has_priority_over_body() {
    // Модель: сферы головы (0.85) и тела (1.4) перекрываются
    let ray = AimRay::new(Vec3::new(0.0, 1.5, 0.0), Vec3::Z);
    let enemy = model_enemy(Vec3::new(0.0, 0.0, 10.0));

    let hit = resolve_pellet(&ray, [(Entity::from_raw(3), &enemy)], false).expect("hit");
    assert!(hit.headshot);
}

#[test]
fn test_closest_enemy_takes_the_pellet() {
    let ray = AimRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
    let near = placeholder_enemy(Vec3::new(0.0, 0.0, 8.0));
    let far = placeholder_enemy(Vec3::new(0.0, 0.0, 4.0 + 12.0));

    let hit = resolve_pellet(
        &ray,
        [(Entity::from_raw(10), &far), (Entity::from_raw(11), &near)],
        false,
    )
    .expect("hit");
    assert_eq!(hit.target, Entity::from_raw(11));
}

#[test]
fn test_dying_and_behind_enemies_are_skipped() {
    let ray = AimRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
    let mut dying = placeholder_enemy(Vec3::new(0.0, 0.0, 5.0));
    dying.is_dying = true;
    let behind = placeholder_enemy(Vec3::new(0.0, 0.0, -5.0));

    assert_eq!(
        resolve_pellet(
            &ray,
            [(Entity::from_raw(1), &dying), (Entity::from_raw(2), &behind)],
            false
        ),
        None
    );
}

#[test]
fn test_generous_hitbox_widens_spheres() {
    // Промах на 0.7 от центра тела placeholder'а: 0.6 < 0.7 < 0.9
    let ray = AimRay::new(Vec3::new(0.7, 1.0, 0.0), Vec3::Z);
    let enemy = placeholder_enemy(Vec3::new(0.0, 0.0, 10.0));
    let entity = Entity::from_raw(5);

    assert_eq!(resolve_pellet(&ray, [(entity, &enemy)], PISTOL.generous_hitbox), None);
    assert!(resolve_pellet(&ray, [(entity, &enemy)], SMG.generous_hitbox).is_some());

    assert_eq!(hit_radii(Fidelity::Model, false), HitRadii { head: 0.85, body: 1.4 });
    assert_eq!(hit_radii(Fidelity::Model, true), HitRadii { head: 1.2, body: 1.8 });
}

#[test]
fn test_zero_spread_keeps_direction() {
    let ray = AimRay::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(ray.direction, Vec3::Z);
    assert_eq!(ray.with_spread(0.0, 0.9, 0.1), ray);

    // Центральный бросок не отклоняет луч
    let centered = ray.with_spread(0.5, 0.5, 0.5);
    assert!((centered.direction - Vec3::Z).length() < 1e-6);

    let perturbed = ray.with_spread(0.2, 1.0, 0.5);
    assert!(perturbed.direction.x.abs() > 0.05);
    assert!((perturbed.direction.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_shotgun_resolves_every_pellet() {
    let mut rng = DeterministicRng::new(42);
    let ray = AimRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
    let enemy = model_enemy(Vec3::new(0.0, 0.0, 3.0));
    let targets = [(Entity::from_raw(1), &enemy)];

    let shotgun = WeaponId::Shotgun.definition();
    let (hits, rays) = resolve_shot(&ray, shotgun, &targets, &mut rng);
    assert_eq!(rays.len(), shotgun.pellets as usize);
    // В упор широкие сферы модели ловят все пеллеты
    assert_eq!(hits.len(), shotgun.pellets as usize);
    assert!(hits.iter().all(|hit| hit.target == Entity::from_raw(1)));
}

#[test]
fn test_melee_cone() {
    let player = PlayerState::default();

    assert!(in_melee_cone(&player, Vec3::new(0.0, 0.0, 2.0)));
    assert!(in_melee_cone(&player, Vec3::new(1.0, 0.0, 1.5)));
    // За спиной, сбоку, слишком далеко
    assert!(!in_melee_cone(&player, Vec3::new(0.0, 0.0, -1.0)));
    assert!(!in_melee_cone(&player, Vec3::new(2.0, 0.0, 0.5)));
    assert!(!in_melee_cone(&player, Vec3::new(0.0, 0.0, 2.6)));
    // Совпадающая позиция не даёт NaN
    assert!(!in_melee_cone(&player, Vec3::ZERO));
}
