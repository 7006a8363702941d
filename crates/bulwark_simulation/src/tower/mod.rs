//! Tower domain - стационарные башни
//!
//! ECS ответственность:
//! - Targeting: пересчёт цели каждый кадр (First/Last/Closest/Strongest/Weakest)
//! - Fire control: cooldown 1/fire_rate, spawn Projectile
//! - Upgrade / sell / placement через TowerCommand (all-or-nothing по деньгам)
//! - Selection (UI-adjacent state, без боевого эффекта)

pub mod blueprint;
pub mod commands;
pub mod components;
pub mod events;
pub mod systems;
pub mod targeting;


pub use blueprint::{TowerBlueprint, TowerCatalog, TowerKind, TowerStats, TowerUnlocks, UpgradeRules};
pub use commands::process_tower_commands;
pub use components::Tower;
pub use events::{
    ProjectileFired, RejectReason, TowerCommand, TowerCommandRejected, TowerDeselected, TowerPlaced,
    TowerSelected, TowerSold, TowerUpgraded,
};
pub use systems::tower_targeting_and_fire;
pub use targeting::{in_range, select_target, TargetCandidate, TargetingMode};
