//! Projectile события

use bevy::prelude::*;

/// Снаряд завершил полёт попаданием или промахом
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    /// Башня-источник
    pub source: Entity,
    pub position: Vec3,
    /// None - промах (цель погибла до попадания)
    pub target: Option<Entity>,
    /// Сколько врагов задел взрыв (без основной цели)
    pub splashed: u32,
}
