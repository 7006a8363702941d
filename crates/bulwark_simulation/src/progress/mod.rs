//! Progress snapshot - граница с save collaborator
//!
//! Ядро не пишет файлы: оно отдаёт/принимает plain значения
//! (high score, уровень/волна, unlock flags, громкость) в JSON через serde.

use serde::{Deserialize, Serialize};

use crate::economy::Economy;
use crate::tower::{TowerKind, TowerUnlocks};
use crate::wave::WaveScheduler;

/// Громкость [0..1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioLevels {
    pub master: f32,
    pub music: f32,
    pub sfx: f32,
}

impl Default for AudioLevels {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 0.7,
            sfx: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSnapshot {
    pub high_score: u32,
    /// 1-based
    pub level_reached: u32,
    /// Сколько волн пройдено (максимум за все попытки)
    pub wave_reached: u32,
    pub unlocked_towers: Vec<TowerKind>,
    pub audio: AudioLevels,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            high_score: 0,
            level_reached: 1,
            wave_reached: 0,
            unlocked_towers: vec![TowerKind::Basic],
            audio: AudioLevels::default(),
        }
    }
}

impl ProgressSnapshot {
    /// Слить результат текущего забега (рекорды только растут)
    pub fn capture(&mut self, economy: &Economy, scheduler: &WaveScheduler) {
        self.high_score = self.high_score.max(economy.score());
        self.wave_reached = self.wave_reached.max(scheduler.waves_completed());
    }

    pub fn unlock_tower(&mut self, kind: TowerKind) {
        if !self.unlocked_towers.contains(&kind) {
            self.unlocked_towers.push(kind);
            self.unlocked_towers.sort();
        }
    }

    /// Unlock flags для placement
    pub fn apply(&self) -> TowerUnlocks {
        TowerUnlocks::only(&self.unlocked_towers)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_default_unlocks_only_basic() {
        let unlocks = ProgressSnapshot::default().apply();
        assert!(unlocks.is_unlocked(TowerKind::Basic));
        assert!(!unlocks.is_unlocked(TowerKind::Sniper));
    }

    #[test]
    fn test_capture_keeps_best() {
        let mut snapshot = ProgressSnapshot {
            high_score: 500,
            ..ProgressSnapshot::default()
        };
        let mut economy = Economy::new(0, 20);
        economy.add_score(300);
        let scheduler = WaveScheduler::new(Vec::new(), &SimulationConfig::default());

        snapshot.capture(&economy, &scheduler);
        assert_eq!(snapshot.high_score, 500);

        economy.add_score(400);
        snapshot.capture(&economy, &scheduler);
        assert_eq!(snapshot.high_score, 700);
    }

    #[test]
    fn test_partial_save_uses_defaults() {
        let snapshot = ProgressSnapshot::from_json(r#"{ "high_score": 1200, "unlocked_towers": ["Basic", "Freeze"] }"#).unwrap();
        assert_eq!(snapshot.high_score, 1200);
        assert_eq!(snapshot.level_reached, 1);
        assert_eq!(snapshot.audio, AudioLevels::default());
        assert!(snapshot.apply().is_unlocked(TowerKind::Freeze));

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"Freeze\""));
    }
}
