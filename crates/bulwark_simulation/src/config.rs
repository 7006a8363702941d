//! Simulation config + level data
//!
//! Всё, что приходит снаружи (level-loading collaborator, editor, тесты),
//! задаётся plain serde структурами. Ядро предполагает что данные уже
//! провалидированы (`LevelDefinition::validate`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enemy::EnemyKind;
use crate::path::LevelPath;
use crate::wave::{SpawnGroup, WaveDefinition};

/// Глобальные параметры симуляции (resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub starting_money: u32,
    pub starting_lives: u32,
    /// Частота FixedUpdate (simulation frame)
    pub tick_hz: f64,
    /// Первая волна стартует сама (без WaveCommand::StartNext)
    pub auto_start_waves: bool,
    /// После зачистки ждать `time_before_next_wave` и стартовать следующую
    pub auto_advance_waves: bool,
    /// Задержка перед первой волной при auto-start
    pub default_wave_delay: f32,
    /// Доля total investment, возвращаемая при продаже
    pub sell_refund_ratio: f32,
    /// Минимальная дистанция между башнями
    pub min_tower_spacing: f32,
    /// Радиус попадания снаряда (direct overlap)
    pub projectile_hit_radius: f32,
    /// Дистанция, на которой waypoint считается достигнутым
    pub waypoint_threshold: f32,
    /// Доля урона по соседям при взрыве
    pub splash_damage_ratio: f32,
    pub wave_bonus_base: u32,
    pub wave_bonus_per_wave: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            starting_lives: 20,
            tick_hz: 60.0,
            auto_start_waves: true,
            auto_advance_waves: true,
            default_wave_delay: 3.0,
            sell_refund_ratio: 0.7,
            min_tower_spacing: 0.5,
            projectile_hit_radius: 0.25,
            waypoint_threshold: 0.1,
            splash_damage_ratio: 0.7,
            wave_bonus_base: 50,
            wave_bonus_per_wave: 10,
        }
    }
}

/// Ошибки level data (для level-loading collaborator)
#[derive(Debug)]
pub enum LevelError {
    /// Путь короче двух точек
    TooFewWaypoints(usize),
    /// Отрицательная задержка/интервал в волне
    NegativeTiming { wave: usize },
    /// Blueprint башни с fire rate ≤ 0 (cooldown = 1/rate не определён)
    ZeroFireRate(String),
    Parse(serde_json::Error),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::TooFewWaypoints(count) => {
                write!(f, "path needs at least 2 waypoints, got {}", count)
            }
            LevelError::NegativeTiming { wave } => {
                write!(f, "wave {} has a negative delay or spawn interval", wave + 1)
            }
            LevelError::ZeroFireRate(tower) => {
                write!(f, "tower blueprint {} has a non-positive fire rate", tower)
            }
            LevelError::Parse(err) => write!(f, "level JSON: {}", err),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Parse(err)
    }
}

/// Описание уровня: путь + волны
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub name: String,
    pub path: Vec<[f32; 3]>,
    #[serde(default)]
    pub waves: Vec<WaveDefinition>,
}

impl LevelDefinition {
    /// Демо-уровень: змейка на плоскости XZ, три волны
    pub fn demo() -> Self {
        Self {
            name: "Demo".to_string(),
            path: vec![
                [0.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [10.0, 0.0, 6.0],
                [0.0, 0.0, 6.0],
                [0.0, 0.0, 12.0],
                [12.0, 0.0, 12.0],
            ],
            waves: vec![
                WaveDefinition {
                    groups: vec![SpawnGroup::new(EnemyKind::Basic, 10, 0.0)],
                    time_between_spawns: 1.0,
                    time_before_next_wave: 5.0,
                },
                WaveDefinition {
                    groups: vec![
                        SpawnGroup::new(EnemyKind::Basic, 8, 0.0),
                        SpawnGroup::new(EnemyKind::Fast, 5, 2.0),
                    ],
                    time_between_spawns: 0.8,
                    time_before_next_wave: 5.0,
                },
                WaveDefinition {
                    groups: vec![
                        SpawnGroup::new(EnemyKind::Tank, 3, 0.0),
                        SpawnGroup::new(EnemyKind::Flying, 6, 3.0),
                        SpawnGroup::new(EnemyKind::Regenerating, 4, 3.0),
                    ],
                    time_between_spawns: 1.2,
                    time_before_next_wave: 5.0,
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: LevelDefinition = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.path.len() < 2 {
            return Err(LevelError::TooFewWaypoints(self.path.len()));
        }

        for (index, wave) in self.waves.iter().enumerate() {
            let negative = wave.time_between_spawns < 0.0
                || wave.time_before_next_wave < 0.0
                || wave.groups.iter().any(|group| group.spawn_delay < 0.0);
            if negative {
                return Err(LevelError::NegativeTiming { wave: index });
            }
        }

        Ok(())
    }

    pub fn build_path(&self) -> LevelPath {
        LevelPath::new(self.path.iter().map(|p| Vec3::from_array(*p)).collect())
    }
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_level_is_valid() {
        let level = LevelDefinition::demo();
        assert!(level.validate().is_ok());
        assert_eq!(level.waves[0].total_enemies(), 10);
        assert_eq!(level.waves[1].total_enemies(), 13);
    }

    #[test]
    fn test_level_from_json() {
        let json = r#"{
            "name": "Corridor",
            "path": [[0, 0, 0], [20, 0, 0]],
            "waves": [
                { "groups": [{ "enemy": "Fast", "count": 3 }], "time_between_spawns": 0.5 }
            ]
        }"#;

        let level = LevelDefinition::from_json_str(json).unwrap();
        assert_eq!(level.name, "Corridor");
        assert_eq!(level.waves[0].groups[0].enemy, EnemyKind::Fast);
        assert_eq!(level.waves[0].groups[0].spawn_delay, 0.0);
        assert_eq!(level.waves[0].time_before_next_wave, 5.0);
        assert!((level.build_path().total_length() - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_level_rejects_short_path() {
        let json = r#"{ "path": [[0, 0, 0]] }"#;
        let err = LevelDefinition::from_json_str(json).unwrap_err();
        assert!(matches!(err, LevelError::TooFewWaypoints(1)));
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{ "starting_money": 250 }"#).unwrap();
        assert_eq!(config.starting_money, 250);
        assert_eq!(config.starting_lives, 20);
        assert_eq!(config.sell_refund_ratio, 0.7);
    }
}
