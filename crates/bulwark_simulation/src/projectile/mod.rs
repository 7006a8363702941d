//! Projectile domain - короткоживущие снаряды башен
//!
//! Снаряд разрешает одно боевое событие: прямой урон + status effect,
//! опционально взрыв (splash 70%) и piercing (несколько целей подряд).
//! Уничтожается по попаданию, исчерпанию pierce или TTL.

pub mod components;
pub mod events;
pub mod systems;

pub use components::{Flight, Projectile, ProjectileProfile, StatusPayload};
pub use events::ProjectileImpact;
pub use systems::{advance_projectiles, segment_distance, ARRIVAL_THRESHOLD};
