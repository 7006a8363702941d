//! Targeting policies
//!
//! Детерминированный выбор одной цели среди кандидатов в радиусе.
//! Ties → первый встреченный (кандидаты упорядочены по spawn order),
//! поэтому сравнение строгое и без `max_by` (тот возвращает последний).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum TargetingMode {
    /// Ближе всех к концу пути
    #[default]
    First,
    /// Дальше всех от конца пути
    Last,
    /// Ближе всех к башне
    Closest,
    /// Наибольшая доля здоровья
    Strongest,
    /// Наименьшая доля здоровья
    Weakest,
}

/// Кандидат на цель (snapshot живого врага в радиусе)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub distance_to_end: f32,
    pub health_fraction: f32,
}

impl TargetingMode {
    /// Ключ сортировки: меньше = лучше
    fn rank(self, tower_position: Vec3, candidate: &TargetCandidate) -> f32 {
        match self {
            TargetingMode::First => candidate.distance_to_end,
            TargetingMode::Last => -candidate.distance_to_end,
            TargetingMode::Closest => tower_position.distance(candidate.position),
            TargetingMode::Strongest => -candidate.health_fraction,
            TargetingMode::Weakest => candidate.health_fraction,
        }
    }
}

/// Попадает ли позиция в радиус (граница включительно)
pub fn in_range(tower_position: Vec3, range: f32, position: Vec3) -> bool {
    tower_position.distance(position) <= range
}

/// Выбор цели по policy. Пустой список → None.
pub fn select_target(
    mode: TargetingMode,
    tower_position: Vec3,
    candidates: &[TargetCandidate],
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;

    for candidate in candidates {
        let rank = mode.rank(tower_position, candidate);
        match best {
            Some((_, best_rank)) if rank >= best_rank => {}
            _ => best = Some((candidate.entity, rank)),
        }
    }

    best.map(|(entity, _)| entity)
}
