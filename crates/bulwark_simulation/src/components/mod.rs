//! Cross-domain ECS компоненты
//!
//! Доменные компоненты живут в своих модулях (enemy, tower, projectile).
//! Здесь только то, что используют все:
//! - world: позиционирование (Position, step_towards)

pub mod world;

pub use world::*;
