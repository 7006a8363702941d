//! Tower systems: ретаргетинг + огонь

use bevy::prelude::*;

use super::components::Tower;
use super::events::ProjectileFired;
use super::targeting::{in_range, select_target, TargetCandidate};
use crate::components::Position;
use crate::enemy::Enemy;
use crate::path::LevelPath;
use crate::projectile::Projectile;

/// System: каждая башня заново выбирает цель и стреляет, если cooldown готов
///
/// Работает после движения врагов: видит позиции и alive-state этого кадра.
/// Снаряд спавнится через Commands и начинает лететь со следующего кадра.
pub fn tower_targeting_and_fire(
    mut commands: Commands,
    mut towers: Query<(Entity, &mut Tower, &Position)>,
    enemies: Query<(Entity, &Enemy, &Position)>,
    path: Res<LevelPath>,
    time: Res<Time<Fixed>>,
    mut fired_events: EventWriter<ProjectileFired>,
) {
    let now = time.elapsed_secs_f64();

    // Живые враги в порядке спавна (tie-break targeting)
    let mut alive: Vec<_> = enemies
        .iter()
        .filter(|(_, enemy, _)| enemy.is_alive())
        .collect();
    alive.sort_by_key(|(_, enemy, _)| enemy.spawn_order);

    for (tower_entity, mut tower, tower_position) in towers.iter_mut() {
        let origin = tower_position.0;
        let range = tower.range();

        let candidates: Vec<TargetCandidate> = alive
            .iter()
            .filter(|(_, _, position)| in_range(origin, range, position.0))
            .map(|(entity, enemy, position)| TargetCandidate {
                entity: *entity,
                position: position.0,
                distance_to_end: enemy.distance_to_end(position, &path),
                health_fraction: enemy.health_fraction(),
            })
            .collect();

        let target = select_target(tower.targeting, origin, &candidates);
        tower.set_target(target);

        let Some(target) = target else {
            continue;
        };

        if !tower.can_fire(now) {
            continue;
        }

        let Some(aim_point) = candidates
            .iter()
            .find(|candidate| candidate.entity == target)
            .map(|candidate| candidate.position)
        else {
            continue;
        };

        let projectile = commands
            .spawn((
                Projectile::new(
                    tower_entity,
                    tower.kind,
                    tower.damage(),
                    tower.projectile(),
                    target,
                    aim_point,
                ),
                Position(origin),
            ))
            .id();
        tower.mark_fired(now);

        fired_events.write(ProjectileFired {
            tower: tower_entity,
            kind: tower.kind,
            target,
            projectile,
            damage: tower.damage(),
        });

        crate::log(&format!(
            "🏹 Tower {:?} ({:?}) fired at {:?} (dmg {:.1})",
            tower_entity,
            tower.kind,
            target,
            tower.damage()
        ));
    }
}
