//! Tower component
//!
//! Статы всегда пересчитываются от базовых значений: `base × mult^(level-1)`.
//! Инкрементальное умножение на каждом апгрейде даёт drift, поэтому не используем.

use bevy::prelude::*;

use super::blueprint::{TowerBlueprint, TowerKind, TowerStats, UpgradeRules};
use super::events::RejectReason;
use super::targeting::TargetingMode;
use crate::components::Position;
use crate::economy::Economy;
use crate::projectile::ProjectileProfile;

/// Башня на карте
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct Tower {
    pub kind: TowerKind,
    base: TowerStats,
    stats: TowerStats,
    rules: UpgradeRules,
    level: u32,
    /// Цена постройки (база для стоимости апгрейда)
    cost: u32,
    /// Постройка + все оплаченные апгрейды
    invested: u32,
    pub targeting: TargetingMode,
    /// Weak handle: очищается когда цель умерла или вышла из радиуса
    target: Option<Entity>,
    /// Simulation time последнего выстрела (None - ещё не стреляла)
    last_fired_at: Option<f64>,
    selected: bool,
    projectile: ProjectileProfile,
}

impl Tower {
    pub fn new(kind: TowerKind, blueprint: TowerBlueprint, rules: UpgradeRules) -> Self {
        Self {
            kind,
            base: blueprint.stats,
            stats: blueprint.stats,
            rules,
            level: 1,
            cost: blueprint.cost,
            invested: blueprint.cost,
            targeting: TargetingMode::default(),
            target: None,
            last_fired_at: None,
            selected: false,
            projectile: blueprint.projectile,
        }
    }

    pub fn damage(&self) -> f32 {
        self.stats.damage
    }

    pub fn range(&self) -> f32 {
        self.stats.range
    }

    pub fn fire_rate(&self) -> f32 {
        self.stats.fire_rate
    }

    pub fn stats(&self) -> TowerStats {
        self.stats
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.rules.max_level
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<Entity>) {
        self.target = target;
    }

    pub fn last_fired_at(&self) -> Option<f64> {
        self.last_fired_at
    }

    pub fn projectile(&self) -> ProjectileProfile {
        self.projectile
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    /// Cooldown = 1 / fire_rate секунд с последнего выстрела
    pub fn can_fire(&self, now: f64) -> bool {
        if self.stats.fire_rate <= 0.0 {
            return false;
        }

        match self.last_fired_at {
            Some(last) => now - last >= 1.0 / self.stats.fire_rate as f64,
            None => true,
        }
    }

    /// Отметить выстрел (сбрасывает cooldown)
    pub fn mark_fired(&mut self, now: f64) {
        self.last_fired_at = Some(now);
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < self.rules.max_level
    }

    /// cost × cost_multiplier × level
    pub fn upgrade_cost(&self) -> u32 {
        self.cost
            .saturating_mul(self.rules.cost_multiplier)
            .saturating_mul(self.level)
    }

    /// Апгрейд с причиной отказа (без частичных изменений)
    pub fn try_upgrade(&mut self, economy: &mut Economy) -> Result<u32, RejectReason> {
        if !self.can_upgrade() {
            return Err(RejectReason::MaxLevel);
        }

        let price = self.upgrade_cost();
        if !economy.spend_money(price) {
            return Err(RejectReason::InsufficientFunds);
        }

        self.level += 1;
        self.invested = self.invested.saturating_add(price);
        self.recompute_stats();
        Ok(price)
    }

    /// Апгрейд; false → max level или не хватило денег
    pub fn upgrade(&mut self, economy: &mut Economy) -> bool {
        self.try_upgrade(economy).is_ok()
    }

    fn recompute_stats(&mut self) {
        let exponent = self.level as i32 - 1;
        self.stats = TowerStats {
            damage: self.base.damage * self.rules.damage_multiplier.powi(exponent),
            range: self.base.range * self.rules.range_multiplier.powi(exponent),
            fire_rate: self.base.fire_rate * self.rules.fire_rate_multiplier.powi(exponent),
        };
    }

    pub fn total_investment(&self) -> u32 {
        self.invested
    }

    /// Возврат при продаже: ratio × total investment, round half to even
    pub fn sell_value(&self, refund_ratio: f32) -> u32 {
        let refund = self.invested as f64 * refund_ratio as f64;
        refund.round_ties_even().max(0.0) as u32
    }
}
