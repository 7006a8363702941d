//! Enemy Unit component + state machine
//!
//! Состояния: Alive (Normal / Slowed / Frozen - ортогональные модификаторы),
//! Dead, Escaped. Dead и Escaped терминальны и взаимоисключающи: все
//! переходы идут через `die()` / `reach_end()`, которые срабатывают ровно один раз.
//!
//! Component не знает про Economy и события - методы возвращают отчёт
//! (`Death`, `Escape`), а система решает кого уведомить.

use bevy::prelude::*;

use super::catalog::{EnemyKind, EnemyProfile};
use crate::components::{step_towards, Position};
use crate::path::LevelPath;

/// Жизненный цикл врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EnemyLife {
    Alive,
    Dead,
    Escaped,
}

/// Активный slow: speed × magnitude пока remaining > 0
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SlowEffect {
    pub remaining: f32,
    pub magnitude: f32,
}

/// Status effects. Таймеры тикают независимо друг от друга.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct StatusEffects {
    pub slow: Option<SlowEffect>,
    /// Оставшееся время заморозки
    pub freeze: Option<f32>,
}

impl StatusEffects {
    fn tick(&mut self, delta: f32) {
        if let Some(slow) = self.slow.as_mut() {
            slow.remaining -= delta;
            if slow.remaining <= 0.0 {
                self.slow = None;
            }
        }

        if let Some(remaining) = self.freeze.as_mut() {
            *remaining -= delta;
            if *remaining <= 0.0 {
                self.freeze = None;
            }
        }
    }
}

/// Bookkeeping регенерации (только для профилей с `regeneration`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct RegenerationState {
    /// Секунд с последнего урона
    pub since_damage: f32,
    pub regenerating: bool,
}

/// Результат смерти (reward уже посчитан; 0 если без наград)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death {
    pub money: u32,
    pub score: u32,
    pub rewarded: bool,
}

/// Результат escape (враг дошёл до конца пути)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escape {
    pub lives_cost: u32,
}

/// Результат `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageReport {
    /// Урон после armor (до clamp здоровья)
    pub dealt: f32,
    pub death: Option<Death>,
}

/// Enemy Unit
///
/// Позиция живёт в отдельном `Position` компоненте (общий для всех entity).
/// `spawn_order` - монотонный номер спавна, задаёт порядок итерации
/// (tie-break для targeting и overlap).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub spawn_order: u64,
    profile: EnemyProfile,
    health: f32,
    status: StatusEffects,
    /// Индекс waypoint, к которому враг идёт
    next_waypoint: usize,
    regen: RegenerationState,
    life: EnemyLife,
}

impl Enemy {
    /// Новый враг на waypoint 0, идёт к waypoint 1
    pub fn new(kind: EnemyKind, profile: EnemyProfile, spawn_order: u64) -> Self {
        Self {
            kind,
            spawn_order,
            profile,
            health: profile.max_health,
            status: StatusEffects::default(),
            next_waypoint: 1,
            regen: RegenerationState::default(),
            life: EnemyLife::Alive,
        }
    }

    pub fn profile(&self) -> &EnemyProfile {
        &self.profile
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.profile.max_health
    }

    /// current / max (0 для вырожденного max_health)
    pub fn health_fraction(&self) -> f32 {
        if self.profile.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.profile.max_health
    }

    pub fn life(&self) -> EnemyLife {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == EnemyLife::Alive
    }

    pub fn is_dead(&self) -> bool {
        self.life == EnemyLife::Dead
    }

    pub fn has_escaped(&self) -> bool {
        self.life == EnemyLife::Escaped
    }

    pub fn next_waypoint(&self) -> usize {
        self.next_waypoint
    }

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn is_slowed(&self) -> bool {
        self.status.slow.is_some()
    }

    pub fn is_frozen(&self) -> bool {
        self.status.freeze.is_some()
    }

    pub fn regeneration(&self) -> &RegenerationState {
        &self.regen
    }

    /// Текущая скорость: freeze > slow > base
    pub fn effective_speed(&self) -> f32 {
        if self.is_frozen() {
            return 0.0;
        }

        match self.status.slow {
            Some(slow) => self.profile.speed * slow.magnitude,
            None => self.profile.speed,
        }
    }

    /// Урон (armor применяется до вычитания, здоровье clamp в 0)
    ///
    /// None - враг уже не Alive (no-op). Смерть внутри отчёта срабатывает
    /// только на переходе Alive → Dead.
    pub fn apply_damage(&mut self, amount: f32) -> Option<DamageReport> {
        if !self.is_alive() {
            return None;
        }

        let dealt = amount.max(0.0) * (1.0 - self.profile.armor_reduction);
        self.health = (self.health - dealt).max(0.0);

        if self.profile.regeneration.is_some() {
            self.regen.since_damage = 0.0;
            self.regen.regenerating = false;
        }

        let death = if self.health <= 0.0 {
            self.die(true)
        } else {
            None
        };

        Some(DamageReport { dealt, death })
    }

    /// Смерть (idempotent). Повторный вызов → None.
    pub fn die(&mut self, give_rewards: bool) -> Option<Death> {
        if !self.is_alive() {
            return None;
        }

        self.life = EnemyLife::Dead;
        self.status = StatusEffects::default();

        let (money, score) = if give_rewards {
            (self.profile.money_reward, self.profile.score_reward)
        } else {
            (0, 0)
        };

        Some(Death {
            money,
            score,
            rewarded: give_rewards,
        })
    }

    /// Escape (idempotent, взаимоисключающ со смертью)
    pub fn reach_end(&mut self) -> Option<Escape> {
        if !self.is_alive() {
            return None;
        }

        self.life = EnemyLife::Escaped;
        Some(Escape {
            lives_cost: self.profile.lives_cost,
        })
    }

    /// Slow. false → отклонён (мёртв, иммунитет, заморожен, уже замедлен).
    pub fn apply_slow(&mut self, duration: f32, magnitude: f32) -> bool {
        if !self.is_alive() || self.profile.slow_immune || self.is_frozen() || self.is_slowed() {
            return false;
        }

        if duration <= 0.0 {
            return false;
        }

        self.status.slow = Some(SlowEffect {
            remaining: duration,
            magnitude: magnitude.clamp(0.0, 1.0),
        });
        true
    }

    /// Freeze. Повторная заморозка продлевает до max(remaining, duration).
    pub fn apply_freeze(&mut self, duration: f32) -> bool {
        if !self.is_alive() || duration <= 0.0 {
            return false;
        }

        let remaining = match self.status.freeze {
            Some(current) => current.max(duration),
            None => duration,
        };
        self.status.freeze = Some(remaining);
        true
    }

    /// Один simulation frame: status timers → регенерация → движение
    ///
    /// Возвращает `Escape`, если враг прошёл последний waypoint в этом кадре.
    pub fn tick(
        &mut self,
        delta: f32,
        position: &mut Vec3,
        path: &LevelPath,
        waypoint_threshold: f32,
    ) -> Option<Escape> {
        if !self.is_alive() {
            return None;
        }

        self.status.tick(delta);
        self.regenerate(delta);

        let mut budget = self.effective_speed() * delta;
        loop {
            let Some(target) = path.waypoint(self.next_waypoint) else {
                return self.reach_end();
            };

            if position.distance(target) <= waypoint_threshold {
                self.next_waypoint += 1;
                continue;
            }

            if budget <= 0.0 {
                return None;
            }

            let (next, leftover) = step_towards(*position, target, budget);
            *position = next;
            budget = leftover;
        }
    }

    fn regenerate(&mut self, delta: f32) {
        let Some(policy) = self.profile.regeneration else {
            return;
        };

        self.regen.since_damage += delta;

        if self.regen.since_damage < policy.delay || self.health >= self.profile.max_health {
            self.regen.regenerating = false;
            return;
        }

        self.regen.regenerating = true;
        self.health = (self.health + policy.rate * delta).min(self.profile.max_health);
    }

    /// Оставшаяся дистанция по пути (для targeting First/Last)
    pub fn distance_to_end(&self, position: &Position, path: &LevelPath) -> f32 {
        path.distance_to_end(self.next_waypoint, position.0)
    }
}
