use bevy::prelude::*;

use crate::animation::{AnimationDriver, ClipSetAnimator};
use crate::assets::{LoadedModel, DEFAULT_MODEL_HEAD};
use crate::enemy::{Enemy, EnemyArchetype, Fidelity};

/// Создаёт врага из загруженной модели или placeholder (`model = None`)
///
/// Placeholder: те же статы и профиль, без аниматора, голова из профиля.
pub fn spawn_enemy(
    commands: &mut Commands,
    archetype: EnemyArchetype,
    position: Vec3,
    round: u32,
    model: Option<LoadedModel>,
) -> Entity {
    let profile = archetype.profile();

    match model {
        Some(model) => {
            let head = model.head_offset.unwrap_or(DEFAULT_MODEL_HEAD);
            let enemy = Enemy::new(archetype, Fidelity::Model, position, round, head);
            let mut driver = AnimationDriver::new(ClipSetAnimator::new(model.clips));
            driver.request_loop(profile.idle);
            commands.spawn((enemy, driver, Name::new(format!("{:?}", archetype)))).id()
        }
        None => {
            let enemy = Enemy::new(
                archetype,
                Fidelity::Placeholder,
                position,
                round,
                profile.placeholder_head,
            );
            commands
                .spawn((enemy, Name::new(format!("{:?} (placeholder)", archetype))))
                .id()
        }
    }
}
