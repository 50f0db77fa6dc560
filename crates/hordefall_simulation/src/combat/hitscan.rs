//! Hitscan: луч из камеры, разброс, пересечение со сферами головы/тела.

use bevy::prelude::*;

use crate::enemy::{Enemy, Fidelity};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    /// Нормализовано
    pub direction: Vec3,
}

impl AimRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::Z),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Параметр ближайшей к `center` точки луча и расстояние до неё.
    /// `None` если центр позади origin.
    pub fn closest_approach(&self, center: Vec3) -> Option<(f32, f32)> {
        let t = (center - self.origin).dot(self.direction);
        if t <= 0.0 {
            return None;
        }
        Some((t, self.at(t).distance(center)))
    }

    /// Разброс: `(roll - 0.5) * spread` вдоль right/up луча, rolls ∈ [0, 1)
    pub fn with_spread(&self, spread: f32, roll_x: f32, roll_y: f32) -> Self {
        if spread <= 0.0 {
            return *self;
        }

        let right = self.direction.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(self.direction).normalize_or(Vec3::Y);
        let direction = self.direction
            + right * ((roll_x - 0.5) * spread)
            + up * ((roll_y - 0.5) * spread);
        Self::new(self.origin, direction)
    }
}

/// Радиусы hit-сфер
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub head: f32,
    pub body: f32,
}

/// Модели крупнее placeholder'ов; скорострельное оружие получает ещё больше
pub fn hit_radii(fidelity: Fidelity, generous: bool) -> HitRadii {
    match (fidelity, generous) {
        (Fidelity::Model, false) => HitRadii { head: 0.85, body: 1.4 },
        (Fidelity::Model, true) => HitRadii { head: 1.2, body: 1.8 },
        (Fidelity::Placeholder, false) => HitRadii { head: 0.35, body: 0.6 },
        (Fidelity::Placeholder, true) => HitRadii { head: 0.5, body: 0.9 },
    }
}

/// Центр сферы тела: позиция + 1.0 вверх
pub const BODY_CENTER_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PelletHit {
    pub target: Entity,
    /// Параметр луча (дистанция для falloff)
    pub distance: f32,
    pub headshot: bool,
}

/// Попадание одного луча в одного врага: голова приоритетнее тела
pub fn test_enemy(ray: &AimRay, enemy: &Enemy, generous: bool) -> Option<(f32, bool)> {
    let radii = hit_radii(enemy.fidelity, generous);

    if let Some((t, miss)) = ray.closest_approach(enemy.head_center()) {
        if miss < radii.head {
            return Some((t, true));
        }
    }

    let body = enemy.position + Vec3::Y * BODY_CENTER_HEIGHT;
    match ray.closest_approach(body) {
        Some((t, miss)) if miss < radii.body => Some((t, false)),
        _ => None,
    }
}

/// Ближайший по лучу живой (не dying) враг: только он получает урон
pub fn resolve_pellet<'a>(
    ray: &AimRay,
    enemies: impl IntoIterator<Item = (Entity, &'a Enemy)>,
    generous: bool,
) -> Option<PelletHit> {
    let mut closest: Option<PelletHit> = None;

    for (entity, enemy) in enemies {
        if enemy.is_dying {
            continue;
        }
        let Some((distance, headshot)) = test_enemy(ray, enemy, generous) else {
            continue;
        };
        if closest.map_or(true, |hit| distance < hit.distance) {
            closest = Some(PelletHit {
                target: entity,
                distance,
                headshot,
            });
        }
    }

    closest
}
