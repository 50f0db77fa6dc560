//! HUD surface: состояние для внешнего UI, пересобирается каждый тик.

use bevy::prelude::*;

use crate::components::HealthLabel;
use crate::enemy::PlayerDefeated;
use crate::pickups::PickupCollected;
use crate::state::GameState;
use crate::waves::RoundStarted;
use crate::SimSet;

pub const ROUND_MESSAGE_SECS: f32 = 2.0;
pub const PICKUP_MESSAGE_SECS: f32 = 1.0;
pub const EMPTY_MESSAGE_SECS: f32 = 1.0;
const KNIFE_AMMO: &str = "—";
const RELOADING: &str = "RELOADING...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HudColor {
    #[default]
    White,
    Red,
    Green,
}

/// Центральное сообщение; `duration = None`: висит до сброса
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HudMessage {
    pub text: String,
    pub color: HudColor,
    pub duration: Option<f32>,
}

impl HudMessage {
    pub fn new(text: impl Into<String>, color: HudColor, seconds: f32) -> Self {
        Self {
            text: text.into(),
            color,
            duration: Some(seconds),
        }
    }

    pub fn persistent(text: impl Into<String>, color: HudColor) -> Self {
        Self {
            text: text.into(),
            color,
            duration: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMessage {
    pub text: String,
    pub color: HudColor,
    pub expires_at: Option<f32>,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudState {
    /// "ammo/reserve", "—" для ножа, "RELOADING..." во время перезарядки
    pub ammo: String,
    pub weapon: String,
    pub round: u32,
    pub remaining: u32,
    pub health: HealthLabel,
    pub message: Option<ActiveMessage>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            ammo: String::new(),
            weapon: String::new(),
            round: 0,
            remaining: 0,
            health: HealthLabel::Fine,
            message: None,
        }
    }
}

impl HudState {
    /// Статичная часть HUD из GameState
    pub fn refresh(&mut self, state: &GameState) {
        let definition = state.current_weapon.definition();
        let weapon = state.weapon();

        self.ammo = if state.flags.reloading {
            RELOADING.to_string()
        } else if definition.is_melee() {
            KNIFE_AMMO.to_string()
        } else {
            format!("{}/{}", weapon.ammo, weapon.reserve)
        };
        self.weapon = definition.display_name();
        self.round = state.round;
        self.remaining = state.waves.remaining();
        self.health = state.health.label();
    }

    pub fn show(&mut self, message: &HudMessage, now: f32) {
        self.message = Some(ActiveMessage {
            text: message.text.clone(),
            color: message.color,
            expires_at: message.duration.map(|duration| now + duration),
        });
    }

    /// Auto-clear по истечении
    pub fn expire(&mut self, now: f32) {
        if let Some(ActiveMessage {
            expires_at: Some(expires_at),
            ..
        }) = self.message
        {
            if now >= expires_at {
                self.message = None;
            }
        }
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|message| message.text.as_str())
    }
}

/// Система: доменные события → сообщения, затем refresh
pub fn update_hud(
    time: Res<Time>,
    state: Res<GameState>,
    mut hud: ResMut<HudState>,
    mut messages: EventReader<HudMessage>,
    mut rounds: EventReader<RoundStarted>,
    mut pickups: EventReader<PickupCollected>,
    mut defeated: EventReader<PlayerDefeated>,
) {
    let now = time.elapsed_secs();
    hud.expire(now);

    for round in rounds.read() {
        hud.show(
            &HudMessage::new(format!("ROUND {}", round.round), HudColor::White, ROUND_MESSAGE_SECS),
            now,
        );
    }
    for pickup in pickups.read() {
        hud.show(
            &HudMessage::new(
                pickup.kind.message(),
                HudColor::Green,
                PICKUP_MESSAGE_SECS,
            ),
            now,
        );
    }
    for message in messages.read() {
        hud.show(message, now);
    }
    if defeated.read().count() > 0 {
        hud.show(&HudMessage::persistent("YOU ARE DEAD", HudColor::Red), now);
    }

    if state.started {
        hud.refresh(&state);
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .add_event::<HudMessage>()
            .add_systems(FixedUpdate, update_hud.in_set(SimSet::Hud));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterId;
    use crate::weapons::WeaponId;

    #[test]
    fn test_refresh_formats_ammo() {
        let mut state = GameState::new_game(CharacterId::Leon, 0.0);
        state.begin_round(1, 0.0);
        let mut hud = HudState::default();

        hud.refresh(&state);
        assert_eq!(hud.ammo, "15/45");
        assert_eq!(hud.weapon, "MATILDA");
        assert_eq!(hud.round, 1);
        assert_eq!(hud.remaining, 5);

        state.flags.reloading = true;
        hud.refresh(&state);
        assert_eq!(hud.ammo, "RELOADING...");

        state.flags.reloading = false;
        state.equip(WeaponId::Knife);
        hud.refresh(&state);
        assert_eq!(hud.ammo, "—");
        assert_eq!(hud.weapon, "KNIFE");
    }

    #[test]
    fn test_health_label_follows_hp() {
        let mut state = GameState::new_game(CharacterId::Leon, 0.0);
        let mut hud = HudState::default();

        state.health.take_damage(15);
        hud.refresh(&state);
        assert_eq!(hud.health, HealthLabel::Fine);

        state.health.take_damage(15);
        hud.refresh(&state);
        assert_eq!(hud.health, HealthLabel::Caution);
    }

    #[test]
    fn test_timed_message_clears() {
        let mut hud = HudState::default();
        hud.show(&HudMessage::new("ROUND 2", HudColor::White, 2.0), 10.0);

        hud.expire(11.9);
        assert_eq!(hud.message_text(), Some("ROUND 2"));
        hud.expire(12.0);
        assert_eq!(hud.message_text(), None);

        hud.show(&HudMessage::persistent("YOU ARE DEAD", HudColor::Red), 0.0);
        hud.expire(1000.0);
        assert_eq!(hud.message_text(), Some("YOU ARE DEAD"));
    }
}
