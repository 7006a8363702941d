//! Bulwark Simulation Core
//!
//! Headless ECS-симуляция tower defense на Bevy 0.16.
//!
//! Один simulation frame = один прогон FixedUpdate. Порядок внутри кадра:
//! Flow → Input → Enemies → Towers → Projectiles → Waves → Cleanup → Notify.
//! Commands (spawn/despawn) применяются в конце кадра: снаряд, выпущенный
//! в этом кадре, летит только со следующего.
//!
//! Rendering, audio, input routing, UI и сохранения - внешние collaborators:
//! они шлют команды (TowerCommand, WaveCommand, FlowCommand) и читают события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod config;
pub mod economy;
pub mod enemy;
pub mod flow;
pub mod logger;
pub mod path;
pub mod progress;
pub mod projectile;
pub mod tower;
pub mod wave;

// Re-export для удобства
pub use components::*;
pub use config::{LevelDefinition, LevelError, SimulationConfig};
pub use economy::{Economy, GameOver, LivesChanged, MoneyChanged, ScoreChanged};
pub use enemy::{
    DamageDealt, DeathCause, Enemy, EnemyCatalog, EnemyDied, EnemyEscaped, EnemyKind, EnemyProfile,
    EnemySpawned, SpawnSequence,
};
pub use flow::{FlowCommand, GameFlow, LevelRestarted, PauseChanged};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use path::LevelPath;
pub use progress::{AudioLevels, ProgressSnapshot};
pub use projectile::{Projectile, ProjectileImpact, ProjectileProfile};
pub use tower::{
    ProjectileFired, RejectReason, TargetingMode, Tower, TowerBlueprint, TowerCatalog, TowerCommand,
    TowerCommandRejected, TowerDeselected, TowerKind, TowerPlaced, TowerSelected, TowerSold,
    TowerUnlocks, TowerUpgraded,
};
pub use wave::{AllWavesCompleted, WaveCommand, WaveCompleted, WaveDefinition, WaveScheduler, WaveStarted};

/// Фазы simulation frame (FixedUpdate)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Пауза / рестарт (всегда)
    Flow,
    /// Tower и wave команды (до game over)
    Input,
    Enemies,
    Towers,
    Projectiles,
    Waves,
    /// Despawn врагов, вышедших из Alive
    Cleanup,
    /// Публикация изменений ledger (всегда)
    Notify,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Debug, Clone, Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
    pub level: LevelDefinition,
    pub enemies: EnemyCatalog,
    pub towers: TowerCatalog,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig, level: LevelDefinition) -> Self {
        Self {
            config,
            level,
            ..Default::default()
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        init_logger();

        // Level data должен быть провалидирован загрузчиком; здесь только сообщаем
        if let Err(err) = self.level.validate().and_then(|_| self.towers.validate()) {
            log_error(&format!("⚠️ Invalid level '{}': {}", self.level.name, err));
        }

        app
            // Fixed timestep для simulation frame
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            .insert_resource(self.config.clone())
            .insert_resource(self.level.clone())
            .insert_resource(self.level.build_path())
            .insert_resource(self.enemies.clone())
            .insert_resource(self.towers.clone())
            .insert_resource(Economy::new(
                self.config.starting_money,
                self.config.starting_lives,
            ))
            .insert_resource(WaveScheduler::new(self.level.waves.clone(), &self.config))
            .init_resource::<SpawnSequence>()
            .init_resource::<GameFlow>()
            .init_resource::<TowerUnlocks>();

        // Команды (внешние collaborators → core)
        app.add_event::<TowerCommand>()
            .add_event::<WaveCommand>()
            .add_event::<FlowCommand>();

        // Уведомления (core → внешние collaborators)
        app.add_event::<MoneyChanged>()
            .add_event::<LivesChanged>()
            .add_event::<ScoreChanged>()
            .add_event::<GameOver>()
            .add_event::<EnemySpawned>()
            .add_event::<EnemyDied>()
            .add_event::<EnemyEscaped>()
            .add_event::<DamageDealt>()
            .add_event::<TowerPlaced>()
            .add_event::<TowerUpgraded>()
            .add_event::<TowerSold>()
            .add_event::<TowerSelected>()
            .add_event::<TowerDeselected>()
            .add_event::<TowerCommandRejected>()
            .add_event::<ProjectileFired>()
            .add_event::<ProjectileImpact>()
            .add_event::<WaveStarted>()
            .add_event::<WaveCompleted>()
            .add_event::<AllWavesCompleted>()
            .add_event::<PauseChanged>()
            .add_event::<LevelRestarted>();

        // Flow → Input с sync point (рестарт убирает entity до остальных фаз),
        // дальше без sync points: spawn/despawn видны со следующего кадра
        app.configure_sets(
            FixedUpdate,
            (SimulationSet::Flow, SimulationSet::Input).chain(),
        )
        .configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input.run_if(flow::accepting_input),
                SimulationSet::Enemies.run_if(flow::simulation_running),
                SimulationSet::Towers.run_if(flow::simulation_running),
                SimulationSet::Projectiles.run_if(flow::simulation_running),
                SimulationSet::Waves.run_if(flow::simulation_running),
                SimulationSet::Cleanup.run_if(flow::simulation_running),
                SimulationSet::Notify,
            )
                .chain_ignore_deferred(),
        );

        app.add_systems(
            FixedUpdate,
            (
                flow::process_flow_commands.in_set(SimulationSet::Flow),
                (
                    tower::process_tower_commands,
                    wave::process_wave_commands,
                )
                    .chain()
                    .in_set(SimulationSet::Input),
                enemy::advance_enemies.in_set(SimulationSet::Enemies),
                tower::tower_targeting_and_fire.in_set(SimulationSet::Towers),
                projectile::advance_projectiles.in_set(SimulationSet::Projectiles),
                wave::run_wave_scheduler.in_set(SimulationSet::Waves),
                enemy::despawn_removed_enemies.in_set(SimulationSet::Cleanup),
                economy::publish_economy_notices.in_set(SimulationSet::Notify),
            ),
        );
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` (кроме первого, у него delta = 0) двигает время
/// ровно на один fixed step - прогоны детерминированы и не зависят от wall clock.
/// Сам `Time<Fixed>` (тот же шаг из `tick_hz`) ставит `SimulationPlugin`.
pub fn create_headless_app(config: &SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();

    let step = Duration::from_secs_f64(1.0 / config.tick_hz);
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app
}

/// Headless App с полной симуляцией уровня
pub fn create_simulation_app(config: SimulationConfig, level: LevelDefinition) -> App {
    let mut app = create_headless_app(&config);
    app.add_plugins(SimulationPlugin::new(config, level));
    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сортируются по Entity ID и сериализуются через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
