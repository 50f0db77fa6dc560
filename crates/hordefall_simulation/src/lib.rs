//! HORDEFALL Simulation Core
//!
//! ECS-симуляция wave-survival шутера на Bevy 0.16 (headless).
//! Рендер, звук, UI и загрузка моделей: внешние collaborators:
//! симуляция пишет HUD/audio surface и читает input surface.
//!
//! Каждый fixed tick (60Hz) идёт строго по `SimSet`:
//! Session → Clock → Player → Combat → Enemies → Waves → Pickups → Animation → Camera → Hud → Audio

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod assets;
pub mod audio;
pub mod camera;
pub mod characters;
pub mod combat;
pub mod components;
pub mod config;
pub mod enemy;
pub mod hud;
pub mod input;
pub mod logger;
pub mod pickups;
pub mod player;
pub mod schedule;
pub mod session;
pub mod state;
pub mod waves;
pub mod weapons;

// Re-export для удобства
pub use animation::{AnimationDriver, Animator, ClipSetAnimator};
pub use assets::{LoadMode, ModelLibrary, ModelLoadQueue, ModelLoader};
pub use characters::CharacterId;
pub use components::{Health, HealthLabel};
pub use config::{AimMode, ConfigError, SimulationConfig};
pub use enemy::{Enemy, EnemyArchetype, EnemyHit, EnemyKilled, Fidelity, PlayerDefeated};
pub use hud::{HudMessage, HudState};
pub use input::{PlayerAction, PlayerInput};
pub use logger::init_logger;
pub use player::{Player, PlayerFrame, PlayerState};
pub use state::{GameState, Inventory, SimClock};
pub use weapons::{WeaponDefinition, WeaponId, WeaponState};

/// Порядок подсистем внутри fixed tick
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Выбор персонажа, пауза, инвентарь (всегда)
    Session,
    Clock,
    Player,
    Combat,
    Enemies,
    Waves,
    Pickups,
    /// Аниматоры идут и во время death-анимации
    Animation,
    Camera,
    Hud,
    Audio,
}

/// Run condition: персонаж/враги/волны обновляются
pub fn simulation_running(state: Res<GameState>) -> bool {
    state.simulation_active()
}

/// Run condition: аниматоры (замораживаются только паузой/инвентарём)
pub fn animation_running(state: Res<GameState>) -> bool {
    state.started && !state.flags.paused && !state.flags.inventory_open
}

/// Система: часы симуляции стоят, пока симуляция не активна
pub fn tick_sim_clock(time: Res<Time>, state: Res<GameState>, mut clock: ResMut<SimClock>) {
    if state.simulation_active() {
        clock.advance(time.delta_secs());
    } else {
        clock.hold();
    }
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `SimulationConfig`, `DeterministicRng` и `ModelLoadQueue` можно вставить
/// до добавления plugin'а: тогда они не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SimulationConfig>() {
            app.insert_resource(SimulationConfig::default());
        }
        let config = app.world().resource::<SimulationConfig>().clone();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }
        if !app.world().contains_resource::<ModelLoadQueue>() {
            app.insert_resource(ModelLoadQueue::new(ModelLibrary::standard(), LoadMode::Inline));
        }

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .init_resource::<GameState>()
            .init_resource::<SimClock>()
            .init_resource::<Inventory>()
            .init_resource::<PlayerInput>()
            .init_resource::<schedule::ScheduledActions>()
            .add_event::<PlayerAction>()
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Session,
                    SimSet::Clock,
                    SimSet::Player,
                    SimSet::Combat,
                    SimSet::Enemies,
                    SimSet::Waves,
                    SimSet::Pickups,
                    SimSet::Animation,
                    SimSet::Camera,
                    SimSet::Hud,
                    SimSet::Audio,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Player,
                    SimSet::Combat,
                    SimSet::Enemies,
                    SimSet::Waves,
                    SimSet::Pickups,
                )
                    .run_if(simulation_running),
            )
            .configure_sets(FixedUpdate, SimSet::Animation.run_if(animation_running))
            .add_systems(FixedUpdate, tick_sim_clock.in_set(SimSet::Clock))
            .add_systems(
                FixedUpdate,
                animation::advance_animators.in_set(SimSet::Animation),
            )
            // Подсистемы
            .add_plugins((
                session::SessionPlugin,
                player::PlayerPlugin,
                combat::CombatPlugin,
                enemy::EnemyPlugin,
                waves::WavePlugin,
                pickups::PickupPlugin,
                camera::CameraRigPlugin,
                hud::HudPlugin,
                audio::AudioCuePlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Полная симуляция с ручным временем: один `app.update()` = один fixed tick
pub fn create_simulation_app(config: SimulationConfig) -> App {
    let mut app = create_headless_app(config.seed);
    let step = Duration::from_secs_f64(1.0 / config.tick_hz);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
