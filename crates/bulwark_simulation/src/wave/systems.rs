//! Wave systems: команды (Input) и тик scheduler'а (Waves)
//!
//! Разнесены по двум системам: команда force-start пишет EnemyDied,
//! а scheduler их читает - в одной системе reader/writer одного события конфликтуют.

use bevy::prelude::*;

use super::events::{AllWavesCompleted, WaveCommand, WaveCompleted, WaveStarted};
use super::scheduler::{WaveNotice, WaveScheduler};
use crate::economy::Economy;
use crate::enemy::{
    settle_death, spawn_enemy, DeathCause, Enemy, EnemyCatalog, EnemyDied, EnemyEscaped,
    EnemySpawned, SpawnSequence,
};
use crate::path::LevelPath;

/// System: WaveCommand → scheduler
pub fn process_wave_commands(
    mut command_events: EventReader<WaveCommand>,
    mut scheduler: ResMut<WaveScheduler>,
    mut enemies: Query<(Entity, &mut Enemy)>,
    mut economy: ResMut<Economy>,
    mut died_events: EventWriter<EnemyDied>,
) {
    for command in command_events.read() {
        match command {
            WaveCommand::StartNext => {
                if !scheduler.start_next_wave() {
                    crate::log(&format!(
                        "⏭️ StartNext ignored (phase {:?})",
                        scheduler.phase()
                    ));
                }
            }
            WaveCommand::ForceStartNext => {
                if scheduler.is_all_complete() {
                    crate::log("⏭️ ForceStartNext ignored: all waves complete");
                    continue;
                }

                // Снимаем всех живых без наград (порядок спавна)
                let mut alive: Vec<_> = enemies
                    .iter_mut()
                    .filter(|(_, enemy)| enemy.is_alive())
                    .collect();
                alive.sort_by_key(|(_, enemy)| enemy.spawn_order);

                let purged = alive.len();
                for (entity, mut enemy) in alive {
                    if let Some(death) = enemy.die(false) {
                        settle_death(
                            &mut economy,
                            &mut died_events,
                            entity,
                            enemy.kind,
                            death,
                            DeathCause::Purged,
                        );
                    }
                }

                scheduler.force_start_next_wave();
                crate::log_info(&format!(
                    "⏩ Force start: purged {} enemies, next wave {}",
                    purged,
                    scheduler.current_wave_number()
                ));
            }
        }
    }
}

/// System: учёт убитых/ушедших, тик scheduler'а, spawn requests и события волн
///
/// Purged смерти не считаются: force-start уже обнулил counter.
#[allow(clippy::too_many_arguments)]
pub fn run_wave_scheduler(
    mut commands: Commands,
    mut scheduler: ResMut<WaveScheduler>,
    mut economy: ResMut<Economy>,
    mut sequence: ResMut<SpawnSequence>,
    catalog: Res<EnemyCatalog>,
    path: Res<LevelPath>,
    time: Res<Time<Fixed>>,
    mut died_events: EventReader<EnemyDied>,
    mut escaped_events: EventReader<EnemyEscaped>,
    mut spawned_events: EventWriter<EnemySpawned>,
    mut started_events: EventWriter<WaveStarted>,
    mut completed_events: EventWriter<WaveCompleted>,
    mut all_completed_events: EventWriter<AllWavesCompleted>,
) {
    for died in died_events.read() {
        if died.cause == DeathCause::Killed {
            scheduler.enemy_removed();
        }
    }
    for _ in escaped_events.read() {
        scheduler.enemy_removed();
    }

    scheduler.tick(time.delta_secs(), &mut economy);

    for notice in scheduler.drain_notices() {
        match notice {
            WaveNotice::Started { wave_number } => {
                started_events.write(WaveStarted { wave_number });
                crate::log_info(&format!(
                    "🌊 Wave {}/{} started",
                    wave_number,
                    scheduler.total_waves()
                ));
            }
            WaveNotice::Spawn(kind) => {
                let (enemy, spawn_order) =
                    spawn_enemy(&mut commands, &catalog, &mut sequence, &path, kind);
                spawned_events.write(EnemySpawned {
                    enemy,
                    kind,
                    spawn_order,
                });
                crate::log(&format!("👾 Spawned {:?} #{} ({:?})", kind, spawn_order, enemy));
            }
            WaveNotice::Completed { wave_number, bonus } => {
                completed_events.write(WaveCompleted { wave_number, bonus });
                crate::log_info(&format!(
                    "✅ Wave {} cleared: +{} bonus (money: {})",
                    wave_number,
                    bonus,
                    economy.money()
                ));
            }
            WaveNotice::AllCompleted { waves } => {
                all_completed_events.write(AllWavesCompleted { waves });
                crate::log_info(&format!("🏁 All {} waves complete", waves));
            }
        }
    }
}
