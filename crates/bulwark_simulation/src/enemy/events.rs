//! Enemy события

use bevy::prelude::*;

use super::catalog::EnemyKind;

/// Wave scheduler заспавнил врага
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemySpawned {
    pub enemy: Entity,
    pub kind: EnemyKind,
    pub spawn_order: u64,
}

/// Причина смерти
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Убит уроном (награды выданы)
    Killed,
    /// Снят force-start'ом волны (без наград, live counter уже обнулён)
    Purged,
}

/// Враг умер (ровно одно событие на врага)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDied {
    pub enemy: Entity,
    pub kind: EnemyKind,
    pub cause: DeathCause,
    pub money: u32,
    pub score: u32,
}

/// Враг дошёл до конца пути
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyEscaped {
    pub enemy: Entity,
    pub kind: EnemyKind,
    pub lives_lost: u32,
}

/// Урон нанесён (после armor)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    /// Башня-источник (None - урон не от башни)
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub remaining_health: f32,
}
