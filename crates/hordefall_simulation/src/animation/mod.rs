//! Animator capability.
//!
//! Клип-интерполяция: чёрный ящик внешнего движка. Симуляция только
//! просит проиграть клип по символическому имени и узнаёт, стартовал ли он.
//! `ClipSetAnimator`: reference implementation с fuzzy-поиском клипа
//! (headless и тесты).

use bevy::prelude::*;

#[cfg(test)]
mod fuzzy_tests;

/// Клип, который реально начал играть
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackHandle {
    /// Фактическое имя клипа (после fuzzy-поиска)
    pub clip: String,
    pub looping: bool,
}

pub trait Animator: Send + Sync + 'static {
    /// `None` → проигрывание не стартовало (нет ни одного клипа)
    fn play(&mut self, name: &str, looping: bool) -> Option<PlaybackHandle>;

    fn advance(&mut self, _delta: f32) {}

    fn current(&self) -> Option<&PlaybackHandle>;
}

/// Fuzzy-поиск клипа по имени
///
/// Порядок: точное → case-insensitive → совпадение после отрезания
/// числового суффикса (`pistol_walk_1`, `pistol_walk.001`) → все `_`-части
/// содержатся в имени.
pub fn resolve_clip<'a>(clips: &'a [String], name: &str) -> Option<&'a str> {
    if let Some(exact) = clips.iter().find(|clip| clip.as_str() == name) {
        return Some(exact);
    }

    let target = name.to_lowercase();
    if let Some(clip) = clips.iter().find(|clip| clip.to_lowercase() == target) {
        return Some(clip);
    }

    for clip in clips {
        let lower = clip.to_lowercase();
        if lower.contains(&target) && strip_numeric_suffix(&lower) == target {
            return Some(clip);
        }
    }

    let parts: Vec<&str> = target
        .split('_')
        .filter(|part| !part.is_empty() && !part.chars().all(|c| c.is_ascii_digit()))
        .collect();
    if !parts.is_empty() {
        for clip in clips {
            let lower = clip.to_lowercase();
            if parts.iter().all(|part| lower.contains(part)) {
                return Some(clip);
            }
        }
    }

    None
}

fn strip_numeric_suffix(name: &str) -> &str {
    name.trim_end_matches(|c: char| c == '_' || c == '.' || c.is_ascii_digit())
}

/// Набор клипов модели; неизвестное имя → fuzzy → первый клип
#[derive(Debug, Clone, Default)]
pub struct ClipSetAnimator {
    clips: Vec<String>,
    current: Option<PlaybackHandle>,
    clip_time: f32,
}

impl ClipSetAnimator {
    /// Дубликаты имён получают суффикс `_1`, `_2` ...
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut clips: Vec<String> = Vec::new();
        let mut seen: Vec<(String, u32)> = Vec::new();
        for name in names {
            let name = name.into();
            match seen.iter_mut().find(|(base, _)| *base == name) {
                Some((_, count)) => {
                    *count += 1;
                    clips.push(format!("{}_{}", name, count));
                }
                None => {
                    seen.push((name.clone(), 0));
                    clips.push(name);
                }
            }
        }

        Self {
            clips,
            current: None,
            clip_time: 0.0,
        }
    }

    pub fn clips(&self) -> &[String] {
        &self.clips
    }

    pub fn clip_time(&self) -> f32 {
        self.clip_time
    }
}

impl Animator for ClipSetAnimator {
    fn play(&mut self, name: &str, looping: bool) -> Option<PlaybackHandle> {
        let clip = match resolve_clip(&self.clips, name) {
            Some(clip) => clip.to_string(),
            None => {
                let fallback = self.clips.first()?.clone();
                crate::logger::log_warning(&format!(
                    "🎞️ Clip '{}' not found, fallback to '{}'",
                    name, fallback
                ));
                fallback
            }
        };

        let handle = PlaybackHandle { clip, looping };
        // Тот же looping клип уже играет: не перезапускаем
        if self.current.as_ref() != Some(&handle) || !looping {
            self.clip_time = 0.0;
        }
        self.current = Some(handle.clone());
        Some(handle)
    }

    fn advance(&mut self, delta: f32) {
        if self.current.is_some() {
            self.clip_time += delta;
        }
    }

    fn current(&self) -> Option<&PlaybackHandle> {
        self.current.as_ref()
    }
}

/// Компонент: animator сущности + последний запрошенный клип
///
/// One-shot клип (выстрел, удар, hit, смерть) блокирует выбор
/// locomotion-клипа до явного `release`.
#[derive(Component)]
pub struct AnimationDriver {
    animator: Box<dyn Animator>,
    last_clip: Option<String>,
    one_shot: bool,
}

impl std::fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("last_clip", &self.last_clip)
            .field("one_shot", &self.one_shot)
            .finish()
    }
}

impl AnimationDriver {
    pub fn new(animator: impl Animator) -> Self {
        Self {
            animator: Box::new(animator),
            last_clip: None,
            one_shot: false,
        }
    }

    pub fn last_clip(&self) -> Option<&str> {
        self.last_clip.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.one_shot
    }

    /// Looping клип: запрашивается только при смене имени и если
    /// не играет one-shot. Имя запоминается только если playback стартовал.
    pub fn request_loop(&mut self, name: &str) -> bool {
        if self.one_shot || self.last_clip.as_deref() == Some(name) {
            return false;
        }
        self.start(name, true)
    }

    /// One-shot клип (всегда перезапускается)
    pub fn play_once(&mut self, name: &str) -> bool {
        let started = self.start(name, false);
        if started {
            self.one_shot = true;
        }
        started
    }

    /// Снять блокировку one-shot и перейти в looping клип
    pub fn release(&mut self, name: &str) -> bool {
        self.one_shot = false;
        self.start(name, true)
    }

    pub fn advance(&mut self, delta: f32) {
        self.animator.advance(delta);
    }

    fn start(&mut self, name: &str, looping: bool) -> bool {
        match self.animator.play(name, looping) {
            Some(_) => {
                self.last_clip = Some(name.to_string());
                true
            }
            None => false,
        }
    }
}

/// Система: продвигает все animator'ы (работает и во время death-анимации)
pub fn advance_animators(time: Res<Time>, mut drivers: Query<&mut AnimationDriver>) {
    let delta = time.delta_secs();
    for mut driver in drivers.iter_mut() {
        driver.advance(delta);
    }
}
