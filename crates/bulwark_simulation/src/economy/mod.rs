//! Economy domain - общий ledger уровня
//!
//! Мутируют: смерть/escape врагов, постройка/апгрейд/продажа башен, бонус волны.
//! Читают: UI (через события), run conditions (game over).

use bevy::prelude::*;

pub mod events;
pub mod ledger;

pub use events::{GameOver, LivesChanged, MoneyChanged, ScoreChanged};
pub use ledger::{Economy, EconomyNotice};

/// System: публикует накопленные за кадр изменения ledger
///
/// Последняя система кадра - UI видит итоговое состояние кадра
/// в том же порядке, в котором происходили изменения.
pub fn publish_economy_notices(
    mut economy: ResMut<Economy>,
    mut money_events: EventWriter<MoneyChanged>,
    mut lives_events: EventWriter<LivesChanged>,
    mut score_events: EventWriter<ScoreChanged>,
    mut game_over_events: EventWriter<GameOver>,
) {
    let score = economy.score();

    for notice in economy.drain_notices() {
        match notice {
            EconomyNotice::MoneyChanged(money) => {
                money_events.write(MoneyChanged { money });
            }
            EconomyNotice::LivesChanged(lives) => {
                lives_events.write(LivesChanged { lives });
            }
            EconomyNotice::ScoreChanged(score) => {
                score_events.write(ScoreChanged { score });
            }
            EconomyNotice::GameOver => {
                game_over_events.write(GameOver { score });
            }
        }
    }
}
