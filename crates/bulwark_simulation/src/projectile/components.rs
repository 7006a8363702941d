//! Projectile components
//!
//! Projectile несёт snapshot урона башни на момент выстрела: апгрейд или
//! продажа башни во время полёта на него не влияют.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::tower::TowerKind;

/// Status effect, который снаряд накладывает при попадании
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum StatusPayload {
    Slow { duration: f32, magnitude: f32 },
    Freeze { duration: f32 },
}

/// Профиль снаряда (special effects по типу башни)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ProjectileProfile {
    pub speed: f32,
    /// TTL: снаряд уничтожается безусловно по истечении
    pub lifetime: f32,
    /// Some → explosive (splash вокруг точки попадания)
    pub explosion_radius: Option<f32>,
    pub status: Option<StatusPayload>,
    /// Some(n) → piercing, до n попаданий
    pub max_pierce: Option<u32>,
}

impl ProjectileProfile {
    pub const BASE_SPEED: f32 = 10.0;
    pub const LIFETIME: f32 = 5.0;

    pub fn simple(speed: f32) -> Self {
        Self {
            speed,
            lifetime: Self::LIFETIME,
            explosion_radius: None,
            status: None,
            max_pierce: None,
        }
    }

    /// Профиль по типу башни
    ///
    /// Sniper: 2× скорость. Splash: радиус 1.5. Slow: 3с / 0.3. Freeze: 2с.
    pub fn for_tower(kind: TowerKind) -> Self {
        let base = Self::simple(Self::BASE_SPEED);
        match kind {
            TowerKind::Basic => base,
            TowerKind::Sniper => Self {
                speed: Self::BASE_SPEED * 2.0,
                ..base
            },
            TowerKind::Splash => Self {
                explosion_radius: Some(1.5),
                ..base
            },
            TowerKind::Slow => Self {
                status: Some(StatusPayload::Slow {
                    duration: 3.0,
                    magnitude: 0.3,
                }),
                ..base
            },
            TowerKind::Freeze => Self {
                status: Some(StatusPayload::Freeze { duration: 2.0 }),
                ..base
            },
        }
    }

    pub fn piercing(mut self, max_targets: u32) -> Self {
        self.max_pierce = Some(max_targets.max(1));
        self
    }
}

/// Режим полёта
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Flight {
    /// Летит в `aim_point` (обновляется пока цель жива)
    Homing,
    /// Прямолинейно по направлению (piercing после первой цели)
    Straight(Vec3),
}

/// Снаряд в полёте
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct Projectile {
    /// Башня-источник (может быть уже продана)
    pub source: Entity,
    pub tower_kind: TowerKind,
    pub damage: f32,
    pub profile: ProjectileProfile,
    /// Weak handle на цель
    pub target: Option<Entity>,
    /// Последняя известная позиция цели
    pub aim_point: Vec3,
    pub flight: Flight,
    /// Сколько врагов уже поражено (piercing)
    pub hits: u32,
    pub age: f32,
    /// Уже поражённые враги (piercing не бьёт одного дважды)
    pub struck: Vec<Entity>,
}

impl Projectile {
    pub fn new(
        source: Entity,
        tower_kind: TowerKind,
        damage: f32,
        profile: ProjectileProfile,
        target: Entity,
        aim_point: Vec3,
    ) -> Self {
        Self {
            source,
            tower_kind,
            damage,
            profile,
            target: Some(target),
            aim_point,
            flight: Flight::Homing,
            hits: 0,
            age: 0.0,
            struck: Vec::new(),
        }
    }

    pub fn is_piercing(&self) -> bool {
        self.profile.max_pierce.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.profile.lifetime
    }

    /// Исчерпан ли лимит попаданий
    pub fn pierce_exhausted(&self) -> bool {
        match self.profile.max_pierce {
            Some(max) => self.hits >= max,
            None => self.hits >= 1,
        }
    }
}
