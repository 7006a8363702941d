//! Enemy variants как policy table (не иерархия типов)
//!
//! Все варианты - один `Enemy` component; отличаются только данными профиля:
//! базовые статы, armor, иммунитет к slow, регенерация.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Template id врага (spawn request)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Flying,
    Regenerating,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Flying,
        EnemyKind::Regenerating,
    ];
}

/// Регенерация: `rate` HP/сек после `delay` секунд без урона
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RegenerationPolicy {
    pub rate: f32,
    pub delay: f32,
}

/// Профиль варианта врага
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub max_health: f32,
    pub speed: f32,
    pub money_reward: u32,
    pub score_reward: u32,
    /// Доля урона, которая отсекается до вычитания (Tank: 0.5 → половина урона)
    pub armor_reduction: f32,
    pub slow_immune: bool,
    pub regeneration: Option<RegenerationPolicy>,
    /// Сколько жизней снимает при escape
    pub lives_cost: u32,
}

impl EnemyProfile {
    pub fn new(max_health: f32, speed: f32, money_reward: u32, score_reward: u32) -> Self {
        Self {
            max_health,
            speed,
            money_reward,
            score_reward,
            armor_reduction: 0.0,
            slow_immune: false,
            regeneration: None,
            lives_cost: 1,
        }
    }

    pub fn with_armor(mut self, reduction: f32) -> Self {
        self.armor_reduction = reduction.clamp(0.0, 1.0);
        self
    }

    pub fn slow_immune(mut self) -> Self {
        self.slow_immune = true;
        self
    }

    pub fn with_regeneration(mut self, rate: f32, delay: f32) -> Self {
        self.regeneration = Some(RegenerationPolicy { rate, delay });
        self
    }

    pub fn default_for(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Basic => Self::new(100.0, 2.0, 10, 50),
            EnemyKind::Fast => Self::new(60.0, 4.0, 15, 75),
            EnemyKind::Tank => Self::new(300.0, 1.0, 30, 150).with_armor(0.5),
            EnemyKind::Flying => Self::new(80.0, 3.0, 20, 100).slow_immune(),
            EnemyKind::Regenerating => {
                Self::new(150.0, 1.5, 25, 125).with_regeneration(5.0, 2.0)
            }
        }
    }
}

/// Policy table для всех вариантов (resource)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    profiles: HashMap<EnemyKind, EnemyProfile>,
}

impl EnemyCatalog {
    pub fn profile(&self, kind: EnemyKind) -> EnemyProfile {
        self.profiles
            .get(&kind)
            .copied()
            .unwrap_or_else(|| EnemyProfile::default_for(kind))
    }

    pub fn set_profile(&mut self, kind: EnemyKind, profile: EnemyProfile) {
        self.profiles.insert(kind, profile);
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self {
            profiles: EnemyKind::ALL
                .iter()
                .map(|kind| (*kind, EnemyProfile::default_for(*kind)))
                .collect(),
        }
    }
}
