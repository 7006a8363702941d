//! Enemy systems: spawn factory, движение, escape, cleanup

use bevy::prelude::*;

use super::catalog::{EnemyCatalog, EnemyKind};
use super::components::{Death, Enemy};
use super::events::{DeathCause, EnemyDied, EnemyEscaped};
use crate::components::Position;
use crate::config::SimulationConfig;
use crate::economy::Economy;
use crate::path::LevelPath;

/// Монотонный счётчик спавна (порядок итерации = порядок спавна)
#[derive(Resource, Debug, Default, Clone)]
pub struct SpawnSequence {
    next: u64,
}

impl SpawnSequence {
    pub fn next(&mut self) -> u64 {
        let order = self.next;
        self.next += 1;
        order
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Spawn request: создаёт врага на первом waypoint
///
/// Entity появляется в мире после apply_deferred (конец кадра).
pub fn spawn_enemy(
    commands: &mut Commands,
    catalog: &EnemyCatalog,
    sequence: &mut SpawnSequence,
    path: &LevelPath,
    kind: EnemyKind,
) -> (Entity, u64) {
    let spawn_order = sequence.next();
    let position = path.spawn_position().unwrap_or(Vec3::ZERO);

    let entity = commands
        .spawn((
            Enemy::new(kind, catalog.profile(kind), spawn_order),
            Position(position),
        ))
        .id();

    (entity, spawn_order)
}

/// Зачесть смерть: награды в Economy + EnemyDied
pub fn settle_death(
    economy: &mut Economy,
    died_events: &mut EventWriter<EnemyDied>,
    entity: Entity,
    kind: EnemyKind,
    death: Death,
    cause: DeathCause,
) {
    if death.rewarded {
        economy.add_money(death.money);
        economy.add_score(death.score);
    }

    died_events.write(EnemyDied {
        enemy: entity,
        kind,
        cause,
        money: death.money,
        score: death.score,
    });

    crate::log(&format!(
        "💀 Enemy {:?} ({:?}) died: {:?}, +{} money, +{} score",
        entity, kind, cause, death.money, death.score
    ));
}

/// System: тик всех живых врагов (status → регенерация → движение)
///
/// Враги, прошедшие последний waypoint, снимают жизни и публикуют EnemyEscaped.
pub fn advance_enemies(
    mut enemies: Query<(Entity, &mut Enemy, &mut Position)>,
    path: Res<LevelPath>,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
    mut economy: ResMut<Economy>,
    mut escaped_events: EventWriter<EnemyEscaped>,
) {
    let delta = time.delta_secs();

    let mut ordered: Vec<_> = enemies
        .iter_mut()
        .filter(|(_, enemy, _)| enemy.is_alive())
        .collect();
    ordered.sort_by_key(|(_, enemy, _)| enemy.spawn_order);

    for (entity, mut enemy, mut position) in ordered {
        let Some(escape) = enemy.tick(delta, &mut position.0, &path, config.waypoint_threshold)
        else {
            continue;
        };

        economy.lose_lives(escape.lives_cost);
        escaped_events.write(EnemyEscaped {
            enemy: entity,
            kind: enemy.kind,
            lives_lost: escape.lives_cost,
        });

        crate::log(&format!(
            "🚪 Enemy {:?} ({:?}) reached the end: -{} lives (left: {})",
            entity,
            enemy.kind,
            escape.lives_cost,
            economy.lives()
        ));
    }
}

/// System: despawn врагов, вышедших из Alive (dead / escaped)
///
/// Последняя simulation система кадра - до неё handle остаётся валидным,
/// но все потребители проверяют `is_alive()`.
pub fn despawn_removed_enemies(mut commands: Commands, enemies: Query<(Entity, &Enemy)>) {
    for (entity, enemy) in enemies.iter() {
        if !enemy.is_alive() {
            commands.entity(entity).despawn();
        }
    }
}
