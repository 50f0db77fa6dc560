//! Wave Spawner: раунды, каденс спавна, микс архетипов.
//!
//! Загрузка модели асинхронная (`ModelLoadQueue`): результат забирается в tick'е,
//! только tick добавляет врага в мир. Ошибка или timeout → placeholder.

use bevy::prelude::*;
use rand::Rng;

use crate::assets::{AssetError, LoadTicket, ModelLoadQueue, ModelRef};
use crate::config::SimulationConfig;
use crate::enemy::{spawn_enemy, EnemyArchetype};
use crate::state::{GameState, SimClock};
use crate::{DeterministicRng, SimSet};


/// Радиус окружности спавна вокруг центра арены
pub const SPAWN_RADIUS: f32 = 20.0;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStarted {
    pub round: u32,
}

/// Следующий раунд: новые счётчики, отсчёт спавна с `now`
pub fn advance_round(state: &mut GameState, now: f32) -> u32 {
    let round = state.round + 1;
    state.begin_round(round, now);
    crate::logger::log_info(&format!(
        "🌊 Round {} started ({} enemies)",
        round, state.waves.to_spawn
    ));
    round
}

/// `(⌊(r-1)/5⌋ + 1) / to_spawn`
pub fn tank_override_probability(round: u32, to_spawn: u32) -> f32 {
    if to_spawn == 0 {
        return 0.0;
    }
    (round.saturating_sub(1) / 5 + 1) as f32 / to_spawn as f32
}

/// Базовый roll (5 архетипов по 20%), затем tank override поверх любого
pub fn roll_archetype(round: u32, to_spawn: u32, base_roll: f32, tank_roll: f32) -> EnemyArchetype {
    let base = EnemyArchetype::BASE;
    let index = ((base_roll * base.len() as f32) as usize).min(base.len() - 1);

    if tank_roll < tank_override_probability(round, to_spawn) {
        EnemyArchetype::Tank
    } else {
        base[index]
    }
}

pub fn spawn_position(angle: f32) -> Vec3 {
    Vec3::new(angle.sin() * SPAWN_RADIUS, 0.0, angle.cos() * SPAWN_RADIUS)
}

/// Враг ждёт модель
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpawn {
    pub ticket: LoadTicket,
    pub archetype: EnemyArchetype,
    pub position: Vec3,
    pub round: u32,
    pub requested_at: f32,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PendingSpawns {
    pub entries: Vec<PendingSpawn>,
}

/// Система: первый раунд после выбора персонажа
pub fn start_first_round(
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    mut rounds: EventWriter<RoundStarted>,
) {
    if state.round != 0 {
        return;
    }
    let round = advance_round(&mut state, clock.elapsed);
    rounds.write(RoundStarted { round });
}

/// Система: раз в `spawn_interval_secs`, пока spawned < to_spawn
pub fn schedule_spawns(
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut queue: ResMut<ModelLoadQueue>,
    mut pending: ResMut<PendingSpawns>,
) {
    let now = clock.elapsed;
    if now - state.last_spawn_time <= config.spawn_interval_secs {
        return;
    }
    state.last_spawn_time = now;

    if !state.waves.wants_spawn() {
        return;
    }
    // Счётчик растёт до загрузки: повторный вызов не превысит to_spawn
    state.waves.spawned += 1;

    let base_roll = rng.rng.gen::<f32>();
    let tank_roll = rng.rng.gen::<f32>();
    let archetype = roll_archetype(state.round, state.waves.to_spawn, base_roll, tank_roll);
    let position = spawn_position(rng.rng.gen::<f32>() * std::f32::consts::TAU);

    let ticket = queue.request(ModelRef::new(config.model_for(archetype)));
    pending.entries.push(PendingSpawn {
        ticket,
        archetype,
        position,
        round: state.round,
        requested_at: now,
    });
}

/// Система: готовые загрузки → враги; ошибка/timeout → placeholder
pub fn resolve_pending_spawns(
    mut commands: Commands,
    mut state: ResMut<GameState>,
    clock: Res<SimClock>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<ModelLoadQueue>,
    mut pending: ResMut<PendingSpawns>,
) {
    if let Err(error) = queue.poll() {
        crate::logger::log_error(&format!("Model queue unavailable: {}", error));
    }

    let now = clock.elapsed;
    let entries = std::mem::take(&mut pending.entries);

    for entry in entries {
        if entry.round != state.round {
            queue.forget(entry.ticket);
            continue;
        }

        let model = match queue.take_result(entry.ticket) {
            Some(Ok(model)) => Some(model),
            Some(Err(error)) => {
                crate::logger::log_warning(&format!(
                    "{:?}: {}, using placeholder",
                    entry.archetype, error
                ));
                None
            }
            None if now - entry.requested_at >= config.model_load_timeout_secs => {
                queue.forget(entry.ticket);
                let error = AssetError::Timeout {
                    reference: ModelRef::new(config.model_for(entry.archetype)),
                    seconds: config.model_load_timeout_secs,
                };
                crate::logger::log_warning(&format!("{:?}: {}, using placeholder", entry.archetype, error));
                None
            }
            None => {
                pending.entries.push(entry);
                continue;
            }
        };

        spawn_enemy(&mut commands, entry.archetype, entry.position, state.round, model);
        state.waves.alive += 1;
    }
}

/// Wave Plugin
///
/// Порядок в `SimSet::Waves`: start_first_round → schedule_spawns → resolve_pending_spawns
pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingSpawns>()
            .add_event::<RoundStarted>()
            .add_systems(
                FixedUpdate,
                (start_first_round, schedule_spawns, resolve_pending_spawns)
                    .chain()
                    .in_set(SimSet::Waves),
            );
    }
}
