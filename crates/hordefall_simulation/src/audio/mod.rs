//! Audio surface: cue-события для внешнего audio collaborator'а.
//!
//! Музыка эксклюзивна: `PlayMusic` останавливает остальные треки на стороне collaborator'а.

use bevy::prelude::*;

use crate::enemy::PlayerDefeated;
use crate::session::CharacterSelected;
use crate::SimSet;

pub const MENU_TRACK: &str = "menu_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Death,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum AudioCue {
    PlayMusic(&'static str),
    StopMusic,
    PlayOneShot(Sound),
}

/// Collaborator сообщает о завершении one-shot звука
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFinished(pub Sound);

/// Система: выбор персонажа → его тема; смерть → стоп + death; death закончился → меню
pub fn direct_audio(
    mut selected: EventReader<CharacterSelected>,
    mut defeated: EventReader<PlayerDefeated>,
    mut finished: EventReader<AudioFinished>,
    mut cues: EventWriter<AudioCue>,
) {
    for selection in selected.read() {
        cues.write(AudioCue::PlayMusic(selection.character.profile().music_track));
    }

    if defeated.read().count() > 0 {
        cues.write(AudioCue::StopMusic);
        cues.write(AudioCue::PlayOneShot(Sound::Death));
    }

    for AudioFinished(sound) in finished.read() {
        if *sound == Sound::Death {
            cues.write(AudioCue::PlayMusic(MENU_TRACK));
        }
    }
}

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AudioCue>()
            .add_event::<AudioFinished>()
            .add_systems(FixedUpdate, direct_audio.in_set(SimSet::Audio));
    }
}
