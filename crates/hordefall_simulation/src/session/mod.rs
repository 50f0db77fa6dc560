//! Session: выбор персонажа, retry, пауза/инвентарь/freecam, экипировка, herb.
//!
//! Выбор персонажа (и retry) полностью пересоздаёт GameState и мир.

use bevy::prelude::*;

use crate::animation::{AnimationDriver, ClipSetAnimator};
use crate::assets::{AssetError, LoadTicket, ModelLoadQueue, ModelRef};
use crate::camera::CameraRig;
use crate::characters::CharacterId;
use crate::combat::BulletTracer;
use crate::config::SimulationConfig;
use crate::enemy::Enemy;
use crate::hud::{HudColor, HudMessage, HudState};
use crate::input::{PlayerAction, PlayerInput};
use crate::pickups::Pickup;
use crate::player::animation::idle_clip;
use crate::player::{Player, PlayerFrame, PlayerState};
use crate::schedule::ScheduledActions;
use crate::state::{GameState, HerbOutcome, Inventory, SimClock};
use crate::waves::PendingSpawns;
use crate::SimSet;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSelected {
    pub character: CharacterId,
}

/// Модель игрока в загрузке; без модели игрок: block без аниматора
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingPlayerModel {
    pub request: Option<(LoadTicket, f32)>,
}

/// Система: SelectCharacter / Retry
pub fn handle_character_selection(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    clock: Res<SimClock>,
    mut state: ResMut<GameState>,
    mut inventory: ResMut<Inventory>,
    mut scheduled: ResMut<ScheduledActions>,
    mut pending_spawns: ResMut<PendingSpawns>,
    mut pending_model: ResMut<PendingPlayerModel>,
    mut queue: ResMut<ModelLoadQueue>,
    mut input: ResMut<PlayerInput>,
    mut frame: ResMut<PlayerFrame>,
    mut rig: ResMut<CameraRig>,
    mut hud: ResMut<HudState>,
    world_entities: Query<Entity, Or<(With<Player>, With<Enemy>, With<Pickup>, With<BulletTracer>)>>,
    mut selected: EventWriter<CharacterSelected>,
) {
    let mut choice = None;
    for action in actions.read() {
        match action {
            PlayerAction::SelectCharacter(character) => choice = Some(*character),
            PlayerAction::Retry if state.started && state.flags.dead => {
                choice = Some(state.character);
            }
            _ => {}
        }
    }
    let Some(character) = choice else {
        return;
    };

    for entity in world_entities.iter() {
        commands.entity(entity).despawn();
    }
    for pending in pending_spawns.entries.drain(..) {
        queue.forget(pending.ticket);
    }
    if let Some((ticket, _)) = pending_model.request.take() {
        queue.forget(ticket);
    }

    let profile = character.profile();
    *state = GameState::new_game(character, clock.elapsed);
    *inventory = Inventory::for_character(profile);
    scheduled.clear();
    input.release_all();
    *frame = PlayerFrame::default();
    hud.message = None;

    let player = PlayerState::default();
    rig.snap_to(&profile.camera, &player);
    commands.spawn((Player, player, Name::new(profile.display_name)));

    if let Some(model) = profile.model {
        let ticket = queue.request(ModelRef::new(model));
        pending_model.request = Some((ticket, clock.elapsed));
    }

    crate::logger::log_info(&format!(
        "🎮 {} selected (hp {}, {})",
        profile.display_name,
        profile.max_hp,
        profile.starting_weapon.definition().display_name()
    ));
    selected.write(CharacterSelected { character });
}

/// Система: готовая модель игрока → AnimationDriver
pub fn attach_player_model(
    mut commands: Commands,
    state: Res<GameState>,
    clock: Res<SimClock>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<ModelLoadQueue>,
    mut pending: ResMut<PendingPlayerModel>,
    players: Query<Entity, With<Player>>,
) {
    let Some((ticket, requested_at)) = pending.request else {
        return;
    };
    let Ok(player) = players.single() else {
        return;
    };

    if let Err(error) = queue.poll() {
        crate::logger::log_error(&format!("Model queue unavailable: {}", error));
    }

    match queue.take_result(ticket) {
        Some(Ok(model)) => {
            let mut driver = AnimationDriver::new(ClipSetAnimator::new(model.clips));
            driver.request_loop(&idle_clip(state.character, state.current_weapon));
            commands.entity(player).insert(driver);
            pending.request = None;
        }
        Some(Err(error)) => {
            crate::logger::log_warning(&format!("Player model failed: {}, using block model", error));
            pending.request = None;
        }
        None if clock.elapsed - requested_at >= config.model_load_timeout_secs => {
            let error = AssetError::Timeout {
                reference: ModelRef::new(state.character.profile().model.unwrap_or_default()),
                seconds: config.model_load_timeout_secs,
            };
            crate::logger::log_warning(&format!("Player {}, using block model", error));
            queue.forget(ticket);
            pending.request = None;
        }
        None => {}
    }
}

/// Система: пауза, инвентарь, freecam, экипировка, herb
pub fn handle_menu_actions(
    mut actions: EventReader<PlayerAction>,
    mut state: ResMut<GameState>,
    mut inventory: ResMut<Inventory>,
    mut input: ResMut<PlayerInput>,
    mut rig: ResMut<CameraRig>,
    mut players: Query<(&mut PlayerState, Option<&mut AnimationDriver>), With<Player>>,
    mut hud: EventWriter<HudMessage>,
) {
    for action in actions.read() {
        if !state.started || state.flags.dead {
            continue;
        }
        // Открытый инвентарь: только equip, herb и закрытие
        if state.flags.inventory_open
            && matches!(action, PlayerAction::TogglePause | PlayerAction::ToggleFreecam)
        {
            continue;
        }

        match action {
            PlayerAction::TogglePause => {
                state.flags.paused = !state.flags.paused;
                input.release_all();
                crate::logger::log(if state.flags.paused { "⏸ Paused" } else { "▶ Resumed" });
            }
            PlayerAction::ToggleInventory => {
                state.flags.inventory_open = !state.flags.inventory_open;
                input.release_all();
            }
            PlayerAction::ToggleFreecam => {
                state.flags.freecam = !state.flags.freecam;
                if state.flags.freecam {
                    rig.enter_freecam();
                }
                input.release_all();
            }
            PlayerAction::Equip(weapon) => {
                if !inventory.has_weapon(*weapon) || !state.equip(*weapon) {
                    continue;
                }
                state.flags.dancing = false;
                if let Ok((_, Some(mut driver))) = players.single_mut() {
                    driver.release(&idle_clip(state.character, *weapon));
                }
                crate::logger::log(&format!("🔫 Equipped {}", weapon.definition().display_name()));
            }
            PlayerAction::UseHerb => {
                let outcome = inventory.use_herb(&mut state.health);
                if let HerbOutcome::Healed { amount } = outcome {
                    hud.write(HudMessage::new(format!("HEALED +{}", amount), HudColor::Green, 1.0));
                }
            }
            _ => {}
        }
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingPlayerModel>()
            .add_event::<CharacterSelected>()
            .add_systems(
                FixedUpdate,
                (handle_character_selection, attach_player_model, handle_menu_actions)
                    .chain()
                    .in_set(SimSet::Session),
            );
    }
}
