//! Wave Scheduler - state machine спавна и зачистки волн
//!
//! Idle → Spawning(i) → WaitingForClear(i) → InterWaveDelay → Spawning(i+1) … → AllComplete
//!
//! Все ожидания - таймеры, которые двигает `tick(delta)`; "ждать пока
//! live == 0" - условие, проверяемое каждый тик. Scheduler не спавнит entity
//! сам: он копит `WaveNotice`, а система превращает их в spawn requests и события.

use bevy::prelude::*;

use super::definition::WaveDefinition;
use crate::config::SimulationConfig;
use crate::economy::Economy;
use crate::enemy::EnemyKind;

/// Позиция внутри spawn sequence волны
///
/// После последнего врага группы тоже выдерживается `time_between_spawns`:
/// волна уходит в WaitingForClear на один интервал позже последнего спавна.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCursor {
    pub group: usize,
    /// Сколько врагов текущей группы уже выпущено
    pub emitted: u32,
    /// Секунд до следующего шага (может уйти в минус - остаток переносится)
    pub wait: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavePhase {
    /// Ждёт явного `start_next_wave`
    Idle,
    Spawning(SpawnCursor),
    /// Все враги выпущены, ждём live == 0
    WaitingForClear,
    InterWaveDelay { remaining: f32 },
    AllComplete,
}

/// Что произошло за тик (порядок сохраняется)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveNotice {
    Started { wave_number: u32 },
    Spawn(EnemyKind),
    Completed { wave_number: u32, bonus: u32 },
    AllCompleted { waves: u32 },
}

#[derive(Resource, Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveDefinition>,
    /// Индекс текущей (или следующей) волны = число завершённых/пропущенных
    current: usize,
    live_enemies: u32,
    phase: WavePhase,
    auto_start: bool,
    auto_advance: bool,
    default_delay: f32,
    bonus_base: u32,
    bonus_per_wave: u32,
    notices: Vec<WaveNotice>,
}

impl WaveScheduler {
    pub fn new(waves: Vec<WaveDefinition>, config: &SimulationConfig) -> Self {
        let mut scheduler = Self {
            waves,
            current: 0,
            live_enemies: 0,
            phase: WavePhase::Idle,
            auto_start: config.auto_start_waves,
            auto_advance: config.auto_advance_waves,
            default_delay: config.default_wave_delay,
            bonus_base: config.wave_bonus_base,
            bonus_per_wave: config.wave_bonus_per_wave,
            notices: Vec::new(),
        };
        scheduler.reset();
        scheduler
    }

    /// Начальное состояние уровня (auto-start → первая волна на первом тике)
    pub fn reset(&mut self) {
        self.current = 0;
        self.live_enemies = 0;
        self.notices.clear();
        self.phase = if self.auto_start {
            WavePhase::InterWaveDelay { remaining: 0.0 }
        } else {
            WavePhase::Idle
        };
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// 0-based индекс текущей/следующей волны
    pub fn wave_index(&self) -> usize {
        self.current
    }

    /// 1-based номер текущей (или следующей) волны для UI
    pub fn current_wave_number(&self) -> u32 {
        (self.current as u32 + 1).min(self.total_waves())
    }

    pub fn waves_completed(&self) -> u32 {
        self.current as u32
    }

    pub fn live_enemies(&self) -> u32 {
        self.live_enemies
    }

    pub fn is_wave_in_progress(&self) -> bool {
        matches!(self.phase, WavePhase::Spawning(_) | WavePhase::WaitingForClear)
    }

    pub fn is_all_complete(&self) -> bool {
        self.phase == WavePhase::AllComplete
    }

    /// Секунд до старта следующей волны
    ///
    /// 0 во время волны; None если старт только ручной или волн не осталось.
    pub fn time_until_next_wave(&self) -> Option<f32> {
        match self.phase {
            WavePhase::Spawning(_) | WavePhase::WaitingForClear => Some(0.0),
            WavePhase::InterWaveDelay { remaining } => Some(remaining.max(0.0)),
            WavePhase::Idle | WavePhase::AllComplete => None,
        }
    }

    /// Пауза по умолчанию (до первой волны при ручном старте)
    pub fn default_delay(&self) -> f32 {
        self.default_delay
    }

    /// Старт следующей волны
    ///
    /// No-op (false) если волна уже идёт или всё завершено. Индекс за
    /// последней волной → AllComplete.
    pub fn start_next_wave(&mut self) -> bool {
        if self.is_wave_in_progress() || self.is_all_complete() {
            return false;
        }

        let Some(wave) = self.waves.get(self.current) else {
            self.finish_all();
            return false;
        };

        let first_delay = wave.groups.first().map(|g| g.spawn_delay).unwrap_or(0.0);
        self.phase = WavePhase::Spawning(SpawnCursor {
            group: 0,
            emitted: 0,
            wait: first_delay,
        });
        self.notices.push(WaveNotice::Started {
            wave_number: self.current as u32 + 1,
        });
        true
    }

    /// Административный override: текущая волна (если идёт) бросается без
    /// бонуса, live counter обнуляется, следующая волна стартует сразу.
    ///
    /// Снятие живых врагов (die без наград) - забота вызывающей системы.
    pub fn force_start_next_wave(&mut self) -> bool {
        if self.is_all_complete() {
            return false;
        }

        if self.is_wave_in_progress() {
            self.current += 1;
        }

        self.live_enemies = 0;
        self.phase = WavePhase::Idle;
        self.start_next_wave()
    }

    /// Враг умер или ушёл (counter не уходит ниже нуля)
    pub fn enemy_removed(&mut self) {
        self.live_enemies = self.live_enemies.saturating_sub(1);
    }

    /// Один simulation frame
    pub fn tick(&mut self, delta: f32, economy: &mut Economy) {
        if let WavePhase::InterWaveDelay { remaining } = self.phase {
            let remaining = remaining - delta;
            if remaining > 0.0 {
                self.phase = WavePhase::InterWaveDelay { remaining };
                return;
            }

            self.phase = WavePhase::Idle;
            if !self.start_next_wave() {
                return;
            }
            // Первая группа без задержки спавнится в этом же кадре
            self.advance_spawning(0.0);
        } else if let WavePhase::Spawning(_) = self.phase {
            self.advance_spawning(delta);
        }

        if self.phase == WavePhase::WaitingForClear && self.live_enemies == 0 {
            self.complete_wave(economy);
        }
    }

    fn advance_spawning(&mut self, delta: f32) {
        let WavePhase::Spawning(mut cursor) = self.phase else {
            return;
        };
        let Some(wave) = self.waves.get(self.current) else {
            self.phase = WavePhase::WaitingForClear;
            return;
        };

        cursor.wait -= delta;
        while cursor.wait <= 0.0 {
            let Some(group) = wave.groups.get(cursor.group) else {
                self.phase = WavePhase::WaitingForClear;
                return;
            };

            if cursor.emitted < group.count {
                cursor.emitted += 1;
                cursor.wait += wave.time_between_spawns;
                self.live_enemies += 1;
                self.notices.push(WaveNotice::Spawn(group.enemy));
            } else {
                cursor.group += 1;
                cursor.emitted = 0;
                if let Some(next) = wave.groups.get(cursor.group) {
                    cursor.wait += next.spawn_delay;
                }
            }
        }

        self.phase = WavePhase::Spawning(cursor);
    }

    fn complete_wave(&mut self, economy: &mut Economy) {
        let wave_number = self.current as u32 + 1;
        let bonus = economy.award_wave_bonus(wave_number, self.bonus_base, self.bonus_per_wave);
        self.notices.push(WaveNotice::Completed { wave_number, bonus });

        let next_delay = self
            .waves
            .get(self.current)
            .map(|wave| wave.time_before_next_wave)
            .unwrap_or(self.default_delay);
        self.current += 1;

        if self.current >= self.waves.len() {
            self.finish_all();
        } else if self.auto_advance {
            self.phase = WavePhase::InterWaveDelay {
                remaining: next_delay,
            };
        } else {
            self.phase = WavePhase::Idle;
        }
    }

    fn finish_all(&mut self) {
        self.phase = WavePhase::AllComplete;
        self.notices.push(WaveNotice::AllCompleted {
            waves: self.total_waves(),
        });
    }

    pub fn drain_notices(&mut self) -> Vec<WaveNotice> {
        std::mem::take(&mut self.notices)
    }
}
