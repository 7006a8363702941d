//! Economy Ledger - деньги, жизни, очки
//!
//! Инварианты:
//! - money никогда не уходит ниже нуля (spend - all-or-nothing)
//! - lives == 0 → game over ровно один раз (терминально)
//!
//! Ledger не пишет Bevy events напрямую: изменения копятся в очереди
//! `EconomyNotice` и публикуются один раз за кадр (`publish_economy_notices`).

use bevy::prelude::*;

/// Уведомление об изменении ledger (публикуется в конце кадра)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyNotice {
    MoneyChanged(u32),
    LivesChanged(u32),
    ScoreChanged(u32),
    GameOver,
}

/// Общий ledger уровня (money / lives / score)
#[derive(Resource, Debug, Clone)]
pub struct Economy {
    money: u32,
    lives: u32,
    score: u32,
    game_over: bool,
    notices: Vec<EconomyNotice>,
}

impl Economy {
    /// Новый ledger; сразу публикует стартовые money/lives для UI
    pub fn new(starting_money: u32, starting_lives: u32) -> Self {
        Self {
            money: starting_money,
            lives: starting_lives,
            score: 0,
            game_over: starting_lives == 0,
            notices: vec![
                EconomyNotice::LivesChanged(starting_lives),
                EconomyNotice::MoneyChanged(starting_money),
            ],
        }
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.money >= amount
    }

    /// Списать деньги (all-or-nothing)
    ///
    /// false → ничего не изменилось
    pub fn spend_money(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }

        self.money -= amount;
        self.notices.push(EconomyNotice::MoneyChanged(self.money));
        true
    }

    pub fn add_money(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }

        self.money = self.money.saturating_add(amount);
        self.notices.push(EconomyNotice::MoneyChanged(self.money));
    }

    pub fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }

        self.score = self.score.saturating_add(points);
        self.notices.push(EconomyNotice::ScoreChanged(self.score));
    }

    /// Потеря жизней (враг дошёл до конца пути)
    ///
    /// После game over - no-op. Переход в game over происходит один раз.
    pub fn lose_lives(&mut self, amount: u32) {
        if self.game_over || amount == 0 {
            return;
        }

        self.lives = self.lives.saturating_sub(amount);
        self.notices.push(EconomyNotice::LivesChanged(self.lives));

        if self.lives == 0 {
            self.game_over = true;
            self.notices.push(EconomyNotice::GameOver);
            crate::logger::log_info("💀 Lives exhausted - GAME OVER");
        }
    }

    /// Бонус за зачистку волны: `base + wave_number × per_wave`
    ///
    /// `wave_number` - 1-based номер завершённой волны.
    pub fn award_wave_bonus(&mut self, wave_number: u32, base: u32, per_wave: u32) -> u32 {
        let bonus = base.saturating_add(wave_number.saturating_mul(per_wave));
        self.add_money(bonus);
        bonus
    }

    /// Забрать накопленные уведомления (порядок сохраняется)
    pub fn drain_notices(&mut self) -> Vec<EconomyNotice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_is_all_or_nothing() {
        let mut economy = Economy::new(100, 20);
        economy.drain_notices();

        assert!(economy.spend_money(60));
        assert_eq!(economy.money(), 40);

        assert!(!economy.spend_money(50)); // Недостаточно
        assert_eq!(economy.money(), 40); // Не изменилось
        assert_eq!(economy.drain_notices(), vec![EconomyNotice::MoneyChanged(40)]);
    }

    #[test]
    fn test_game_over_triggers_once() {
        let mut economy = Economy::new(0, 2);
        economy.drain_notices();

        economy.lose_lives(1);
        assert!(!economy.is_game_over());

        economy.lose_lives(5); // Saturating
        assert_eq!(economy.lives(), 0);
        assert!(economy.is_game_over());

        economy.lose_lives(1); // После game over - no-op
        let notices = economy.drain_notices();
        let game_overs = notices
            .iter()
            .filter(|n| **n == EconomyNotice::GameOver)
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(economy.lives(), 0);
    }

    #[test]
    fn test_wave_bonus_formula() {
        let mut economy = Economy::new(0, 20);

        assert_eq!(economy.award_wave_bonus(1, 50, 10), 60);
        assert_eq!(economy.award_wave_bonus(3, 50, 10), 80);
        assert_eq!(economy.money(), 140);
    }

    #[test]
    fn test_initial_notices() {
        let mut economy = Economy::new(100, 20);
        assert_eq!(
            economy.drain_notices(),
            vec![EconomyNotice::LivesChanged(20), EconomyNotice::MoneyChanged(100)]
        );
        assert!(economy.drain_notices().is_empty());
    }
}
