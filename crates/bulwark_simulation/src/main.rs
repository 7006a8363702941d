//! Headless симуляция Bulwark
//!
//! Прогоняет демо-уровень с парой башен без рендера: удобно смотреть логи
//! state machine и проверять баланс.

use bevy::prelude::*;
use bulwark_simulation::{
    create_simulation_app, Economy, LevelDefinition, SimulationConfig, TowerCommand, TowerKind,
    WaveScheduler,
};

fn main() {
    let config = SimulationConfig {
        starting_money: 400,
        ..SimulationConfig::default()
    };
    let level = LevelDefinition::demo();
    println!(
        "Starting Bulwark headless simulation (level: {}, {} waves)",
        level.name,
        level.waves.len()
    );

    let mut app = create_simulation_app(config, level);

    // Башни вдоль первых сегментов пути
    let placements = [
        (TowerKind::Basic, Vec3::new(5.0, 0.0, 2.0)),
        (TowerKind::Slow, Vec3::new(8.0, 0.0, 3.0)),
        (TowerKind::Splash, Vec3::new(3.0, 0.0, 4.0)),
        (TowerKind::Sniper, Vec3::new(6.0, 0.0, 9.0)),
    ];
    for (kind, position) in placements {
        app.world_mut().send_event(TowerCommand::Place { kind, position });
    }

    // До 5 минут симуляции при 60Hz
    for tick in 0..18_000 {
        app.update();

        let world = app.world();
        let economy = world.resource::<Economy>();
        let scheduler = world.resource::<WaveScheduler>();

        if tick % 600 == 0 {
            println!(
                "Tick {}: wave {}/{}, live {}, money {}, lives {}, score {}",
                tick,
                scheduler.current_wave_number(),
                scheduler.total_waves(),
                scheduler.live_enemies(),
                economy.money(),
                economy.lives(),
                economy.score()
            );
        }

        if economy.is_game_over() || scheduler.is_all_complete() {
            println!(
                "Finished at tick {}: game over = {}, waves cleared = {}, score = {}",
                tick,
                economy.is_game_over(),
                scheduler.waves_completed(),
                economy.score()
            );
            break;
        }
    }

    println!("Simulation complete!");
}
