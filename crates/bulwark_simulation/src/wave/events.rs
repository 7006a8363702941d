//! Wave команды и события

use bevy::prelude::*;

/// Команда от UI/input collaborator
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCommand {
    /// Старт следующей волны (no-op если волна идёт)
    StartNext,
    /// Снять всех живых врагов без наград и сразу начать следующую волну
    ForceStartNext,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStarted {
    /// 1-based
    pub wave_number: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCompleted {
    pub wave_number: u32,
    pub bonus: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllWavesCompleted {
    pub waves: u32,
}
