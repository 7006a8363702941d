//! Level path - ordered waypoints от spawn до exit
//!
//! Путь фиксирован на весь уровень: оставшиеся длины от каждого waypoint
//! до конца считаются один раз при создании (targeting `First`/`Last`
//! зовёт `distance_to_end` каждый тик для каждого врага).

use bevy::prelude::*;

/// Путь врагов (ресурс уровня)
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelPath {
    points: Vec<Vec3>,
    /// remaining_from[i] = длина пути от points[i] до последней точки
    remaining_from: Vec<f32>,
}

impl LevelPath {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut remaining_from = vec![0.0; points.len()];
        for i in (0..points.len().saturating_sub(1)).rev() {
            remaining_from[i] = remaining_from[i + 1] + points[i].distance(points[i + 1]);
        }

        Self {
            points,
            remaining_from,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Путь проходим только при ≥2 точках
    pub fn is_traversable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn waypoint(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn spawn_position(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn end_position(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    pub fn total_length(&self) -> f32 {
        self.remaining_from.first().copied().unwrap_or(0.0)
    }

    /// Оставшаяся дистанция для врага в `position`, идущего к `next_index`
    ///
    /// = |position − wp[next]| + длина пути от wp[next] до конца.
    /// `next_index` за концом пути → 0.
    pub fn distance_to_end(&self, next_index: usize, position: Vec3) -> f32 {
        match self.points.get(next_index) {
            Some(next) => position.distance(*next) + self.remaining_from[next_index],
            None => 0.0,
        }
    }
}
