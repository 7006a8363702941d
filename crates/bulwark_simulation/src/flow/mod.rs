//! Game flow - пауза, рестарт, run conditions
//!
//! Game over терминален: выйти из него можно только через `FlowCommand::Restart`,
//! который пересоздаёт ledger и scheduler из конфига и убирает все entity уровня.

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::economy::Economy;
use crate::enemy::{Enemy, SpawnSequence};
use crate::projectile::Projectile;
use crate::tower::Tower;
use crate::wave::WaveScheduler;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFlow {
    paused: bool,
}

impl GameFlow {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCommand {
    Pause,
    Resume,
    TogglePause,
    /// Начать уровень заново (работает и после game over)
    Restart,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseChanged {
    pub paused: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRestarted;

/// Run condition: симуляция тикает (не пауза, не game over)
pub fn simulation_running(flow: Res<GameFlow>, economy: Res<Economy>) -> bool {
    !flow.is_paused() && !economy.is_game_over()
}

/// Run condition: команды игрока принимаются (до game over)
pub fn accepting_input(economy: Res<Economy>) -> bool {
    !economy.is_game_over()
}

/// System: FlowCommand → GameFlow / рестарт уровня
#[allow(clippy::too_many_arguments)]
pub fn process_flow_commands(
    mut commands: Commands,
    mut command_events: EventReader<FlowCommand>,
    mut flow: ResMut<GameFlow>,
    level_entities: Query<Entity, Or<(With<Enemy>, With<Tower>, With<Projectile>)>>,
    config: Res<SimulationConfig>,
    mut economy: ResMut<Economy>,
    mut scheduler: ResMut<WaveScheduler>,
    mut sequence: ResMut<SpawnSequence>,
    mut pause_events: EventWriter<PauseChanged>,
    mut restart_events: EventWriter<LevelRestarted>,
) {
    for command in command_events.read() {
        let paused = match command {
            FlowCommand::Pause => true,
            FlowCommand::Resume => false,
            FlowCommand::TogglePause => !flow.is_paused(),
            FlowCommand::Restart => {
                let mut removed = 0;
                for entity in level_entities.iter() {
                    commands.entity(entity).despawn();
                    removed += 1;
                }

                *economy = Economy::new(config.starting_money, config.starting_lives);
                scheduler.reset();
                sequence.reset();
                restart_events.write(LevelRestarted);

                crate::log_info(&format!(
                    "🔄 Level restarted ({} entities removed)",
                    removed
                ));
                false
            }
        };

        if flow.set_paused(paused) {
            pause_events.write(PauseChanged { paused });
            crate::log_info(if paused { "⏸️ Paused" } else { "▶️ Resumed" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_paused_reports_change() {
        let mut flow = GameFlow::default();
        assert!(flow.set_paused(true));
        assert!(!flow.set_paused(true));
        assert!(flow.is_paused());
        assert!(flow.set_paused(false));
    }
}
