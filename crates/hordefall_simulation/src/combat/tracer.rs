//! Визуальные трассеры пуль (урон не наносят).

use bevy::prelude::*;

use crate::player::{Player, PlayerState};

pub const TRACER_SPEED: f32 = 300.0;
/// Трассер удаляется дальше этого расстояния от игрока
pub const TRACER_RANGE: f32 = 100.0;
const MUZZLE_HEIGHT: f32 = 1.4;
const MUZZLE_FORWARD: f32 = 0.5;
const MUZZLE_SIDE: f32 = 0.2;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BulletTracer {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Дуло: над игроком, чуть вперёд и в сторону руки с оружием
pub fn muzzle_position(player: &PlayerState) -> Vec3 {
    player.position + Vec3::Y * MUZZLE_HEIGHT + player.forward() * MUZZLE_FORWARD
        - player.local_x() * MUZZLE_SIDE
}

/// Трассер летит из дула в точку на 100 единиц вдоль луча прицела
pub fn tracer_toward(muzzle: Vec3, aim_point: Vec3) -> BulletTracer {
    let direction = (aim_point - muzzle).normalize_or(Vec3::Z);
    BulletTracer {
        position: muzzle,
        velocity: direction * TRACER_SPEED,
    }
}

pub fn move_tracers(
    mut commands: Commands,
    time: Res<Time>,
    players: Query<&PlayerState, With<Player>>,
    mut tracers: Query<(Entity, &mut BulletTracer)>,
) {
    let anchor = players.single().map(|player| player.position).unwrap_or(Vec3::ZERO);
    let delta = time.delta_secs();

    for (entity, mut tracer) in tracers.iter_mut() {
        let step = tracer.velocity * delta;
        tracer.position += step;
        if tracer.position.distance(anchor) > TRACER_RANGE {
            commands.entity(entity).despawn();
        }
    }
}
