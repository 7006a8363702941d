//! Projectile systems: полёт, попадания, splash, piercing, TTL

use bevy::prelude::*;

use super::components::{Flight, Projectile, StatusPayload};
use super::events::ProjectileImpact;
use crate::components::{step_towards, Position};
use crate::config::SimulationConfig;
use crate::economy::Economy;
use crate::enemy::{settle_death, DamageDealt, DeathCause, Enemy, EnemyDied};

/// Дистанция, на которой снаряд считается долетевшим до точки прицеливания
pub const ARRIVAL_THRESHOLD: f32 = 0.1;

type EnemyQuery<'w, 's> = Query<'w, 's, (Entity, &'static mut Enemy, &'static Position), Without<Projectile>>;

/// Общие sinks для попаданий (economy + события)
///
/// У каждого EventWriter свой `'w` (system params разных lifetimes).
struct HitContext<'a, 'wd, 'wg> {
    economy: &'a mut Economy,
    died_events: &'a mut EventWriter<'wd, EnemyDied>,
    damage_events: &'a mut EventWriter<'wg, DamageDealt>,
}

/// Расстояние от точки до отрезка [from, to]
pub fn segment_distance(from: Vec3, to: Vec3, point: Vec3) -> f32 {
    let segment = to - from;
    let length_sq = segment.length_squared();
    if length_sq <= f32::EPSILON {
        return from.distance(point);
    }

    let t = ((point - from).dot(segment) / length_sq).clamp(0.0, 1.0);
    (from + segment * t).distance(point)
}

fn apply_status(enemy: &mut Enemy, status: StatusPayload) {
    match status {
        StatusPayload::Slow {
            duration,
            magnitude,
        } => {
            enemy.apply_slow(duration, magnitude);
        }
        StatusPayload::Freeze { duration } => {
            enemy.apply_freeze(duration);
        }
    }
}

/// Урон + status effect одному врагу
fn strike(
    ctx: &mut HitContext,
    source: Entity,
    target: Entity,
    enemy: &mut Enemy,
    amount: f32,
    status: Option<StatusPayload>,
) {
    if let Some(report) = enemy.apply_damage(amount) {
        ctx.damage_events.write(DamageDealt {
            source: Some(source),
            target,
            amount: report.dealt,
            remaining_health: enemy.health(),
        });

        if let Some(death) = report.death {
            settle_death(
                ctx.economy,
                ctx.died_events,
                target,
                enemy.kind,
                death,
                DeathCause::Killed,
            );
        }
    }

    if let Some(status) = status {
        apply_status(enemy, status);
    }
}

/// Попадание: основная цель (полный урон + status), затем взрыв
///
/// Взрыв бьёт всех живых врагов в радиусе от точки попадания, кроме основной
/// цели, на `splash_ratio` от урона. Возвращает число задетых взрывом.
fn resolve_hit(
    ctx: &mut HitContext,
    enemies: &mut EnemyQuery,
    roster: &[(Entity, Vec3)],
    projectile: &Projectile,
    primary: Entity,
    impact: Vec3,
    splash_ratio: f32,
) -> u32 {
    let status = projectile.profile.status;

    if let Ok((_, mut enemy, _)) = enemies.get_mut(primary) {
        strike(ctx, projectile.source, primary, &mut enemy, projectile.damage, status);
    }

    let Some(radius) = projectile.profile.explosion_radius else {
        return 0;
    };

    let mut splashed = 0;
    for (other, at) in roster {
        if *other == primary || at.distance(impact) > radius {
            continue;
        }

        let Ok((_, mut enemy, _)) = enemies.get_mut(*other) else {
            continue;
        };
        if !enemy.is_alive() {
            continue;
        }

        strike(
            ctx,
            projectile.source,
            *other,
            &mut enemy,
            projectile.damage * splash_ratio,
            status,
        );
        splashed += 1;
    }

    splashed
}

/// System: полёт и разрешение попаданий
///
/// Порядок для каждого снаряда: TTL → homing (живая цель обновляет точку
/// прицеливания) → движение → попадания (цель, затем overlap для piercing
/// в порядке спавна) → промах при прилёте без цели.
#[allow(clippy::too_many_arguments)]
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Position), Without<Enemy>>,
    mut enemies: EnemyQuery,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
    mut economy: ResMut<Economy>,
    mut died_events: EventWriter<EnemyDied>,
    mut damage_events: EventWriter<DamageDealt>,
    mut impact_events: EventWriter<ProjectileImpact>,
) {
    let delta = time.delta_secs();
    let hit_radius = config.projectile_hit_radius;

    // Живые враги в порядке спавна (позиции в этой фазе не меняются)
    let mut alive: Vec<(u64, Entity, Vec3)> = enemies
        .iter()
        .filter(|(_, enemy, _)| enemy.is_alive())
        .map(|(entity, enemy, position)| (enemy.spawn_order, entity, position.0))
        .collect();
    alive.sort_by_key(|(order, _, _)| *order);
    let roster: Vec<(Entity, Vec3)> = alive
        .into_iter()
        .map(|(_, entity, position)| (entity, position))
        .collect();

    let mut ctx = HitContext {
        economy: &mut *economy,
        died_events: &mut died_events,
        damage_events: &mut damage_events,
    };

    let mut flying: Vec<_> = projectiles.iter_mut().collect();
    flying.sort_by_key(|(entity, _, _)| *entity);

    for (entity, mut projectile, mut position) in flying {
        projectile.age += delta;
        if projectile.is_expired() {
            commands.entity(entity).despawn();
            continue;
        }

        // Live homing: пока цель жива - доводка на её текущую позицию
        if projectile.flight == Flight::Homing {
            let live_position = projectile
                .target
                .and_then(|target| enemies.get(target).ok())
                .filter(|(_, enemy, _)| enemy.is_alive())
                .map(|(_, _, at)| at.0);

            match live_position {
                Some(at) => projectile.aim_point = at,
                None => projectile.target = None,
            }
        }

        let from = position.0;
        let step = projectile.profile.speed * delta;
        let to = match projectile.flight {
            Flight::Homing => step_towards(from, projectile.aim_point, step).0,
            Flight::Straight(direction) => from + direction * step,
        };
        position.0 = to;

        let heading = match (to - from).try_normalize() {
            Some(direction) => direction,
            None => (projectile.aim_point - from).try_normalize().unwrap_or(Vec3::X),
        };

        // Кандидаты на попадание: сначала homing цель, затем overlap (piercing)
        let mut struck_now: Vec<Entity> = Vec::new();
        if let (Flight::Homing, Some(target)) = (projectile.flight, projectile.target) {
            if to.distance(projectile.aim_point) <= hit_radius {
                struck_now.push(target);
            }
        }
        if projectile.is_piercing() {
            for (other, at) in &roster {
                if struck_now.contains(other) || projectile.struck.contains(other) {
                    continue;
                }
                if segment_distance(from, to, *at) <= hit_radius {
                    struck_now.push(*other);
                }
            }
        }

        let mut last_hit = None;
        let mut splashed = 0;
        for enemy in struck_now {
            if projectile.pierce_exhausted() {
                break;
            }

            let alive = enemies
                .get(enemy)
                .map(|(_, state, _)| state.is_alive())
                .unwrap_or(false);
            if !alive {
                continue;
            }

            splashed += resolve_hit(
                &mut ctx,
                &mut enemies,
                &roster,
                &projectile,
                enemy,
                to,
                config.splash_damage_ratio,
            );
            projectile.hits += 1;
            projectile.struck.push(enemy);
            last_hit = Some(enemy);

            // Piercing после основной цели летит дальше по прямой
            if projectile.is_piercing() && projectile.target == Some(enemy) {
                projectile.target = None;
                projectile.flight = Flight::Straight(heading);
            }
        }

        if projectile.pierce_exhausted() {
            commands.entity(entity).despawn();
            impact_events.write(ProjectileImpact {
                projectile: entity,
                source: projectile.source,
                position: to,
                target: last_hit,
                splashed,
            });
            continue;
        }

        // Прилетел в последнюю известную точку, цели больше нет → промах
        let arrived = projectile.flight == Flight::Homing
            && projectile.target.is_none()
            && to.distance(projectile.aim_point) <= ARRIVAL_THRESHOLD;
        if !arrived {
            continue;
        }

        if projectile.is_piercing() {
            projectile.flight = Flight::Straight(heading);
            continue;
        }

        commands.entity(entity).despawn();
        impact_events.write(ProjectileImpact {
            projectile: entity,
            source: projectile.source,
            position: to,
            target: None,
            splashed: 0,
        });

        crate::log(&format!(
            "💨 Projectile {:?} from {:?} missed (target gone)",
            entity, projectile.source
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance() {
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);

        assert!((segment_distance(from, to, Vec3::new(5.0, 0.2, 0.0)) - 0.2).abs() < 1e-6);
        // За концом отрезка - расстояние до конца
        assert!((segment_distance(from, to, Vec3::new(13.0, 4.0, 0.0)) - 5.0).abs() < 1e-5);
        // Вырожденный отрезок
        assert_eq!(segment_distance(from, from, Vec3::new(0.0, 3.0, 0.0)), 3.0);
    }
}
