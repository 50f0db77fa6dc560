//! Загрузка моделей: единственная настоящая граница конкурентности.
//!
//! Loader работает либо inline (headless, тесты), либо на
//! `AsyncComputeTaskPool`. В обоих случаях результат возвращается через
//! канал и применяется только внутри tick'а (`poll` + `take_result`),
//! shared-списки из фоновой задачи не трогаются.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use thiserror::Error;

use crate::enemy::EnemyArchetype;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelRef(pub String);

impl ModelRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Загруженная модель: набор клипов + (опционально) позиция головы
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub reference: ModelRef,
    pub clips: Vec<String>,
    /// Центр головы в локальных координатах модели
    pub head_offset: Option<Vec3>,
}

/// Голова модели без явного bone'а
pub const DEFAULT_MODEL_HEAD: Vec3 = Vec3::new(0.0, 1.7, 0.0);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("model {0} not found")]
    NotFound(ModelRef),
    #[error("model {reference} is malformed: {reason}")]
    Malformed { reference: ModelRef, reason: String },
    #[error("model {reference} did not load within {seconds:.1}s")]
    Timeout { reference: ModelRef, seconds: f32 },
    #[error("model loader disconnected")]
    Disconnected,
}

pub trait ModelLoader: Send + Sync + 'static {
    /// Блокирующая загрузка (вызывается inline или из фоновой задачи)
    fn load(&self, model: &ModelRef) -> Result<LoadedModel, AssetError>;
}

/// In-memory библиотека моделей
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    models: BTreeMap<ModelRef, LoadedModel>,
}

impl ModelLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model<S: Into<String>>(
        mut self,
        reference: &str,
        clips: impl IntoIterator<Item = S>,
    ) -> Self {
        let reference = ModelRef::new(reference);
        self.models.insert(
            reference.clone(),
            LoadedModel {
                reference,
                clips: clips.into_iter().map(Into::into).collect(),
                head_offset: Some(DEFAULT_MODEL_HEAD),
            },
        );
        self
    }

    pub fn without(mut self, reference: &str) -> Self {
        self.models.remove(&ModelRef::new(reference));
        self
    }

    /// Все модели врагов и игроков с их клипами
    pub fn standard() -> Self {
        let walker = ["idle", "walk1", "walk2", "attack1", "attack2", "death1", "death2", "hit1", "hit2"];
        let runner = ["idle", "run", "attack1", "attack2", "attack3", "death1", "death2", "hit1", "hit2", "tpose"];
        let tank = ["idle", "walk", "attack", "death"];

        let mut library = Self::default();
        for archetype in [EnemyArchetype::Walker1, EnemyArchetype::Walker2] {
            library = library.with_model(archetype.default_model(), walker);
        }
        for archetype in [EnemyArchetype::Runner3, EnemyArchetype::Runner4, EnemyArchetype::Runner5] {
            library = library.with_model(archetype.default_model(), runner);
        }
        library
            .with_model(EnemyArchetype::Tank.default_model(), tank)
            .with_model(
                "Leon/leon.glb",
                [
                    "dance", "knife_death", "knife_idle", "knife_stab1", "knife_stab2", "knife_stab3",
                    "pistol_aim", "pistol_back", "pistol_death", "pistol_fire", "pistol_hit",
                    "pistol_hit2", "pistol_idle", "pistol_run", "pistol_walk", "reload", "shotgun_aim",
                    "shotgun_death", "shotgun_fire", "shotgun_idle", "shotgun_walk", "shotgun_walk",
                    "shotgun_run",
                ],
            )
            .with_model(
                "claire/claire.glb",
                [
                    "dance1", "dance2", "death", "hit_pistol1", "hit_pistol2", "knife_back",
                    "knife_death", "knife_idle", "knife_run", "knife_stab", "knife_walk", "pistol_aim",
                    "pistol_back", "pistol_death", "pistol_idle", "pistol_walk", "pistol_run", "reload",
                    "smg_aim", "smg_back", "smg_death", "smg_idle", "smg_run", "smg_walk",
                ],
            )
    }
}

impl ModelLoader for ModelLibrary {
    fn load(&self, model: &ModelRef) -> Result<LoadedModel, AssetError> {
        let loaded = self
            .models
            .get(model)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(model.clone()))?;

        if loaded.clips.is_empty() {
            return Err(AssetError::Malformed {
                reference: model.clone(),
                reason: "no animation clips".to_string(),
            });
        }
        Ok(loaded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Загрузка прямо в `request` (детерминированно)
    #[default]
    Inline,
    /// Фоновая задача на AsyncComputeTaskPool
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

struct LoadReply {
    ticket: LoadTicket,
    result: Result<LoadedModel, AssetError>,
}

/// Очередь загрузок: запросы уходят в loader, ответы ждут в канале
#[derive(Resource)]
pub struct ModelLoadQueue {
    loader: Arc<dyn ModelLoader>,
    mode: LoadMode,
    sender: Sender<LoadReply>,
    receiver: Mutex<Receiver<LoadReply>>,
    next_ticket: u64,
    outstanding: HashSet<LoadTicket>,
    completed: HashMap<LoadTicket, Result<LoadedModel, AssetError>>,
}

impl ModelLoadQueue {
    pub fn new(loader: impl ModelLoader, mode: LoadMode) -> Self {
        let (sender, receiver) = channel();
        Self {
            loader: Arc::new(loader),
            mode,
            sender,
            receiver: Mutex::new(receiver),
            next_ticket: 0,
            outstanding: HashSet::new(),
            completed: HashMap::new(),
        }
    }

    pub fn request(&mut self, model: ModelRef) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.outstanding.insert(ticket);

        let loader = Arc::clone(&self.loader);
        let sender = self.sender.clone();
        let job = move || {
            let result = loader.load(&model);
            // Получатель мог исчезнуть (app закрыт): ответ просто теряется
            let _ = sender.send(LoadReply { ticket, result });
        };

        match (self.mode, AsyncComputeTaskPool::try_get()) {
            (LoadMode::Background, Some(pool)) => {
                pool.spawn(async move { job() }).detach();
            }
            _ => job(),
        }

        ticket
    }

    /// Переносит пришедшие ответы в `completed` (вызывается из tick'а)
    ///
    /// Ответы на забытые (timeout) тикеты отбрасываются.
    pub fn poll(&mut self) -> Result<(), AssetError> {
        let Ok(receiver) = self.receiver.lock() else {
            return Err(AssetError::Disconnected);
        };

        loop {
            match receiver.try_recv() {
                Ok(reply) => {
                    if self.outstanding.remove(&reply.ticket) {
                        self.completed.insert(reply.ticket, reply.result);
                    }
                }
                Err(TryRecvError::Empty) => return Ok(()),
                // Sender живёт внутри self: сюда не попадаем, но не паникуем
                Err(TryRecvError::Disconnected) => return Err(AssetError::Disconnected),
            }
        }
    }

    pub fn take_result(&mut self, ticket: LoadTicket) -> Option<Result<LoadedModel, AssetError>> {
        self.completed.remove(&ticket)
    }

    /// Отказ от ожидания (timeout, сброс раунда)
    pub fn forget(&mut self, ticket: LoadTicket) {
        self.outstanding.remove(&ticket);
        self.completed.remove(&ticket);
    }

    pub fn is_outstanding(&self, ticket: LoadTicket) -> bool {
        self.outstanding.contains(&ticket)
    }
}
