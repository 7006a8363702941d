//! Tower blueprints, upgrade rules, unlock flags

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LevelError;
use crate::projectile::ProjectileProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub enum TowerKind {
    Basic,
    Sniper,
    Splash,
    Slow,
    Freeze,
}

impl TowerKind {
    pub const ALL: [TowerKind; 5] = [
        TowerKind::Basic,
        TowerKind::Sniper,
        TowerKind::Splash,
        TowerKind::Slow,
        TowerKind::Freeze,
    ];
}

/// Боевые статы башни (damage / range / shots per second)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f32,
    pub range: f32,
    pub fire_rate: f32,
}

/// Правила апгрейда (общие для всех башен)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct UpgradeRules {
    pub damage_multiplier: f32,
    pub range_multiplier: f32,
    pub fire_rate_multiplier: f32,
    /// Стоимость апгрейда = cost × cost_multiplier × текущий level
    pub cost_multiplier: u32,
    pub max_level: u32,
}

impl Default for UpgradeRules {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.5,
            range_multiplier: 1.2,
            fire_rate_multiplier: 1.3,
            cost_multiplier: 2,
            max_level: 3,
        }
    }
}

/// Шаблон башни
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerBlueprint {
    pub stats: TowerStats,
    pub cost: u32,
    pub projectile: ProjectileProfile,
}

impl TowerBlueprint {
    pub fn new(damage: f32, range: f32, fire_rate: f32, cost: u32, kind: TowerKind) -> Self {
        Self {
            stats: TowerStats {
                damage,
                range,
                fire_rate,
            },
            cost,
            projectile: ProjectileProfile::for_tower(kind),
        }
    }

    pub fn default_for(kind: TowerKind) -> Self {
        match kind {
            TowerKind::Basic => Self::new(25.0, 3.0, 1.0, 50, kind),
            TowerKind::Sniper => Self::new(75.0, 6.0, 0.5, 100, kind),
            TowerKind::Splash => Self::new(40.0, 2.5, 0.8, 80, kind),
            TowerKind::Slow => Self::new(15.0, 3.5, 1.2, 60, kind),
            TowerKind::Freeze => Self::new(20.0, 3.0, 0.7, 90, kind),
        }
    }
}

/// Каталог башен (resource)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TowerCatalog {
    blueprints: HashMap<TowerKind, TowerBlueprint>,
    pub upgrades: UpgradeRules,
}

impl TowerCatalog {
    pub fn blueprint(&self, kind: TowerKind) -> TowerBlueprint {
        self.blueprints
            .get(&kind)
            .copied()
            .unwrap_or_else(|| TowerBlueprint::default_for(kind))
    }

    pub fn set_blueprint(&mut self, kind: TowerKind, blueprint: TowerBlueprint) {
        self.blueprints.insert(kind, blueprint);
    }

    /// fire rate ≤ 0 делает cooldown неопределённым
    pub fn validate(&self) -> Result<(), LevelError> {
        for kind in TowerKind::ALL {
            if self.blueprint(kind).stats.fire_rate <= 0.0 {
                return Err(LevelError::ZeroFireRate(format!("{:?}", kind)));
            }
        }
        Ok(())
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            blueprints: TowerKind::ALL
                .iter()
                .map(|kind| (*kind, TowerBlueprint::default_for(*kind)))
                .collect(),
            upgrades: UpgradeRules::default(),
        }
    }
}

/// Какие типы башен доступны для постройки
///
/// По умолчанию всё открыто; `ProgressSnapshot::apply` ставит флаги из сейва.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TowerUnlocks {
    unlocked: Vec<TowerKind>,
}

impl TowerUnlocks {
    pub fn only(kinds: &[TowerKind]) -> Self {
        let mut unlocked = kinds.to_vec();
        unlocked.sort();
        unlocked.dedup();
        Self { unlocked }
    }

    pub fn is_unlocked(&self, kind: TowerKind) -> bool {
        self.unlocked.contains(&kind)
    }

    pub fn unlock(&mut self, kind: TowerKind) {
        if !self.is_unlocked(kind) {
            self.unlocked.push(kind);
            self.unlocked.sort();
        }
    }

    pub fn unlocked(&self) -> &[TowerKind] {
        &self.unlocked
    }
}

impl Default for TowerUnlocks {
    fn default() -> Self {
        Self::only(&TowerKind::ALL)
    }
}
