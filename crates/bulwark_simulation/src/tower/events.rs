//! Tower команды (UI → core) и события (core → UI/renderer)

use bevy::prelude::*;

use super::blueprint::TowerKind;
use super::targeting::TargetingMode;

/// Команда от input/UI collaborator
///
/// Обрабатываются в начале кадра (Input set), в порядке отправки.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum TowerCommand {
    Place { kind: TowerKind, position: Vec3 },
    Upgrade { tower: Entity },
    Sell { tower: Entity },
    Select { tower: Entity },
    /// Снять выделение со всех башен
    Deselect,
    SetTargeting { tower: Entity, mode: TargetingMode },
}

/// Почему команда отклонена (состояние не изменилось)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientFunds,
    MaxLevel,
    /// Тип башни не разблокирован
    Locked,
    /// Слишком близко к существующей башне
    Occupied,
    /// Handle не указывает на живую башню
    UnknownTower,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TowerCommandRejected {
    pub command: TowerCommand,
    pub reason: RejectReason,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TowerPlaced {
    pub tower: Entity,
    pub kind: TowerKind,
    pub position: Vec3,
    pub cost: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TowerUpgraded {
    pub tower: Entity,
    pub level: u32,
    pub cost: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TowerSold {
    pub tower: Entity,
    pub refund: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerSelected {
    pub tower: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerDeselected {
    pub tower: Entity,
}

/// Башня выстрелила (fire request для renderer/audio)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileFired {
    pub tower: Entity,
    pub kind: TowerKind,
    pub target: Entity,
    pub projectile: Entity,
    pub damage: f32,
}
