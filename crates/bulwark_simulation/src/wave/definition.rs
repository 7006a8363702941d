//! Wave data (level config)

use serde::{Deserialize, Serialize};

use crate::enemy::EnemyKind;

fn default_time_between_spawns() -> f32 {
    1.0
}

fn default_time_before_next_wave() -> f32 {
    5.0
}

/// Группа одинаковых врагов внутри волны
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub enemy: EnemyKind,
    pub count: u32,
    /// Пауза перед первым врагом группы
    #[serde(default)]
    pub spawn_delay: f32,
}

impl SpawnGroup {
    pub fn new(enemy: EnemyKind, count: u32, spawn_delay: f32) -> Self {
        Self {
            enemy,
            count,
            spawn_delay,
        }
    }
}

/// Волна: группы спавнятся последовательно
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub groups: Vec<SpawnGroup>,
    /// Интервал между врагами (после каждого врага, включая последнего)
    #[serde(default = "default_time_between_spawns")]
    pub time_between_spawns: f32,
    /// Пауза после зачистки перед следующей волной (auto-advance)
    #[serde(default = "default_time_before_next_wave")]
    pub time_before_next_wave: f32,
}

impl WaveDefinition {
    pub fn single(enemy: EnemyKind, count: u32, time_between_spawns: f32) -> Self {
        Self {
            groups: vec![SpawnGroup::new(enemy, count, 0.0)],
            time_between_spawns,
            time_before_next_wave: default_time_before_next_wave(),
        }
    }

    pub fn total_enemies(&self) -> u32 {
        self.groups.iter().map(|group| group.count).sum()
    }
}
