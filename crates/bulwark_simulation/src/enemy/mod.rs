//! Enemy domain - юниты, идущие по пути
//!
//! ECS ответственность:
//! - Health / armor / регенерация
//! - Status effects (slow, freeze) с независимыми таймерами
//! - Path progress + escape
//! - Events: EnemySpawned, EnemyDied, EnemyEscaped, DamageDealt
//!
//! Варианты (Basic, Fast, Tank, Flying, Regenerating) - данные `EnemyProfile`,
//! а не отдельные типы.

pub mod catalog;
pub mod components;
pub mod events;
pub mod systems;


pub use catalog::{EnemyCatalog, EnemyKind, EnemyProfile, RegenerationPolicy};
pub use components::{
    DamageReport, Death, Enemy, EnemyLife, Escape, RegenerationState, SlowEffect, StatusEffects,
};
pub use events::{DamageDealt, DeathCause, EnemyDied, EnemyEscaped, EnemySpawned};
pub use systems::{advance_enemies, despawn_removed_enemies, settle_death, spawn_enemy, SpawnSequence};
