//! Economy события (ECS → UI/audio)

use bevy::prelude::*;

/// Деньги изменились (новое значение)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyChanged {
    pub money: u32,
}

/// Жизни изменились (новое значение)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivesChanged {
    pub lives: u32,
}

/// Очки изменились
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub score: u32,
}

/// Lives дошли до нуля. Публикуется один раз за уровень.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
}
