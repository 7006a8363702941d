//! World positioning: Position (общий для enemy/tower/projectile)

use bevy::prelude::*;

/// Позиция entity в мире симуляции (world units)
///
/// Симуляция authoritative для позиций: renderer только читает.
/// Используем собственный компонент вместо Transform - иерархия/rotation
/// симуляции не нужны, а snapshot должен быть плоским.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec3);

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// 2D позиция (z = 0) - основной случай для top-down карт
    pub fn flat(x: f32, y: f32) -> Self {
        Self(Vec3::new(x, y, 0.0))
    }

    pub fn distance(&self, other: Vec3) -> f32 {
        self.0.distance(other)
    }
}

impl From<Vec3> for Position {
    fn from(value: Vec3) -> Self {
        Self(value)
    }
}

/// Сдвигает `from` к `to` не дальше чем на `max_step`
///
/// Возвращает (новая позиция, остаток шага). Остаток > 0 только когда
/// точка `to` достигнута - вызывающий может продолжить движение к следующей цели.
pub fn step_towards(from: Vec3, to: Vec3, max_step: f32) -> (Vec3, f32) {
    let offset = to - from;
    let distance = offset.length();

    if distance <= max_step {
        return (to, max_step - distance);
    }

    (from + offset / distance * max_step, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_towards_partial() {
        let (pos, rest) = step_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 4.0);
        assert_eq!(pos, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn test_step_towards_reaches_target() {
        let (pos, rest) = step_towards(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 5.0);
        assert_eq!(pos, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(rest, 2.0);
    }
}
