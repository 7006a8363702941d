//! Wave domain - расписание спавна и зачистка волн
//!
//! WaveScheduler - resource с явной state machine и таймерами;
//! системы связывают его с enemy событиями и Economy (бонус за волну).

pub mod definition;
pub mod events;
pub mod scheduler;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod scheduler_tests;

pub use definition::{SpawnGroup, WaveDefinition};
pub use events::{AllWavesCompleted, WaveCommand, WaveCompleted, WaveStarted};
pub use scheduler::{SpawnCursor, WaveNotice, WavePhase, WaveScheduler};
pub use systems::{process_wave_commands, run_wave_scheduler};
