//! Tests for WaveScheduler state machine.

#[cfg(test)]
mod tests {
    use crate::config::SimulationConfig;
    use crate::economy::Economy;
    use crate::enemy::EnemyKind;
    use crate::wave::{SpawnGroup, WaveDefinition, WaveNotice, WavePhase, WaveScheduler};

    const DT: f32 = 1.0 / 60.0;

    fn manual_config() -> SimulationConfig {
        SimulationConfig {
            auto_start_waves: false,
            ..SimulationConfig::default()
        }
    }

    fn spawns(notices: &[WaveNotice]) -> usize {
        notices
            .iter()
            .filter(|n| matches!(n, WaveNotice::Spawn(_)))
            .count()
    }

    /// Тикает пока фаза Spawning, возвращает все уведомления
    fn run_spawning(scheduler: &mut WaveScheduler, economy: &mut Economy) -> Vec<WaveNotice> {
        let mut notices = Vec::new();
        for _ in 0..10_000 {
            scheduler.tick(DT, economy);
            notices.extend(scheduler.drain_notices());
            if !matches!(scheduler.phase(), WavePhase::Spawning(_)) {
                break;
            }
        }
        notices
    }

    #[test]
    fn test_wave_completion_bonus_once() {
        let waves = vec![
            WaveDefinition::single(EnemyKind::Basic, 10, 0.5),
            WaveDefinition::single(EnemyKind::Basic, 1, 0.5),
        ];
        let mut scheduler = WaveScheduler::new(waves, &manual_config());
        let mut economy = Economy::new(0, 20);

        assert!(scheduler.start_next_wave());
        let notices = run_spawning(&mut scheduler, &mut economy);
        assert_eq!(spawns(&notices), 10);
        assert_eq!(scheduler.live_enemies(), 10);
        assert_eq!(scheduler.phase(), WavePhase::WaitingForClear);

        for removed in 1..=10 {
            scheduler.enemy_removed();
            scheduler.tick(DT, &mut economy);
            if removed < 10 {
                assert_eq!(economy.money(), 0, "bonus before the last enemy");
            }
        }

        // 50 + 1 × 10
        assert_eq!(economy.money(), 60);
        assert_eq!(scheduler.wave_index(), 1);

        // Лишние тики и лишние remove не дают повторного бонуса
        scheduler.enemy_removed();
        for _ in 0..10 {
            scheduler.tick(DT, &mut economy);
        }
        assert_eq!(economy.money(), 60);
        assert_eq!(scheduler.wave_index(), 1);
    }

    #[test]
    fn test_last_spawn_keeps_spacing_before_waiting_for_clear() {
        let waves = vec![WaveDefinition::single(EnemyKind::Basic, 2, 1.0)];
        let mut scheduler = WaveScheduler::new(waves, &manual_config());
        let mut economy = Economy::new(0, 20);

        assert!(scheduler.start_next_wave());
        scheduler.tick(0.0, &mut economy);
        scheduler.tick(1.0, &mut economy);
        assert_eq!(spawns(&scheduler.drain_notices()), 2);

        // Последний враг выпущен, но интервал после него ещё идёт
        scheduler.tick(0.5, &mut economy);
        assert!(matches!(scheduler.phase(), WavePhase::Spawning(_)));

        scheduler.tick(0.5, &mut economy);
        assert_eq!(scheduler.phase(), WavePhase::WaitingForClear);
        assert_eq!(scheduler.live_enemies(), 2);
    }

    #[test]
    fn test_start_is_noop_during_wave() {
        let waves = vec![WaveDefinition::single(EnemyKind::Fast, 3, 1.0)];
        let mut scheduler = WaveScheduler::new(waves, &manual_config());

        assert!(scheduler.start_next_wave());
        assert!(!scheduler.start_next_wave());

        let started = scheduler
            .drain_notices()
            .into_iter()
            .filter(|n| matches!(n, WaveNotice::Started { .. }))
            .count();
        assert_eq!(started, 1);
    }

    #[test]
    fn test_group_delays_and_spacing() {
        let waves = vec![WaveDefinition {
            groups: vec![
                SpawnGroup::new(EnemyKind::Basic, 2, 0.0),
                SpawnGroup::new(EnemyKind::Tank, 1, 2.0),
            ],
            time_between_spawns: 1.0,
            time_before_next_wave: 5.0,
        }];
        let mut scheduler = WaveScheduler::new(waves, &manual_config());
        let mut economy = Economy::new(0, 20);
        scheduler.start_next_wave();
        scheduler.drain_notices();

        // t = 0: первый Basic
        scheduler.tick(0.0, &mut economy);
        assert_eq!(scheduler.drain_notices(), vec![WaveNotice::Spawn(EnemyKind::Basic)]);

        // t = 1: второй Basic
        scheduler.tick(1.0, &mut economy);
        assert_eq!(scheduler.drain_notices(), vec![WaveNotice::Spawn(EnemyKind::Basic)]);

        // t = 2 (интервал после второго) + 1 из 2 секунд delay группы - ничего
        scheduler.tick(1.0, &mut economy);
        scheduler.tick(1.0, &mut economy);
        assert!(scheduler.drain_notices().is_empty());

        // t = 4: Tank
        scheduler.tick(1.0, &mut economy);
        assert_eq!(scheduler.drain_notices(), vec![WaveNotice::Spawn(EnemyKind::Tank)]);
        assert_eq!(scheduler.live_enemies(), 3);
    }

    #[test]
    fn test_auto_advance_and_all_complete() {
        let waves = vec![
            WaveDefinition {
                time_before_next_wave: 2.0,
                ..WaveDefinition::single(EnemyKind::Basic, 1, 0.0)
            },
            WaveDefinition::single(EnemyKind::Basic, 1, 0.0),
        ];
        let mut scheduler = WaveScheduler::new(waves, &SimulationConfig::default());
        let mut economy = Economy::new(0, 20);

        // Auto-start: первая волна на первом тике
        scheduler.tick(DT, &mut economy);
        assert!(scheduler.is_wave_in_progress());
        assert_eq!(scheduler.live_enemies(), 1);

        scheduler.enemy_removed();
        scheduler.tick(DT, &mut economy);
        assert_eq!(scheduler.phase(), WavePhase::InterWaveDelay { remaining: 2.0 });
        assert_eq!(scheduler.time_until_next_wave(), Some(2.0));

        // 2 секунды паузы → вторая волна
        scheduler.tick(1.0, &mut economy);
        assert!(!scheduler.is_wave_in_progress());
        scheduler.tick(1.0, &mut economy);
        assert!(scheduler.is_wave_in_progress());

        scheduler.enemy_removed();
        scheduler.tick(DT, &mut economy);
        assert!(scheduler.is_all_complete());
        assert_eq!(economy.money(), 60 + 70);

        let all_completed = scheduler
            .drain_notices()
            .into_iter()
            .filter(|n| matches!(n, WaveNotice::AllCompleted { .. }))
            .count();
        assert_eq!(all_completed, 1);

        // Терминально
        assert!(!scheduler.start_next_wave());
        assert!(!scheduler.force_start_next_wave());
        assert_eq!(scheduler.time_until_next_wave(), None);
    }

    #[test]
    fn test_manual_mode_waits_in_idle() {
        let waves = vec![
            WaveDefinition::single(EnemyKind::Basic, 1, 0.0),
            WaveDefinition::single(EnemyKind::Basic, 1, 0.0),
        ];
        let config = SimulationConfig {
            auto_start_waves: false,
            auto_advance_waves: false,
            ..SimulationConfig::default()
        };
        let mut scheduler = WaveScheduler::new(waves, &config);
        let mut economy = Economy::new(0, 20);

        for _ in 0..120 {
            scheduler.tick(DT, &mut economy);
        }
        assert_eq!(scheduler.phase(), WavePhase::Idle);

        scheduler.start_next_wave();
        scheduler.tick(DT, &mut economy);
        scheduler.enemy_removed();
        scheduler.tick(DT, &mut economy);
        assert_eq!(scheduler.phase(), WavePhase::Idle);
        assert_eq!(scheduler.wave_index(), 1);
    }

    #[test]
    fn test_force_start_abandons_current_wave() {
        let waves = vec![
            WaveDefinition::single(EnemyKind::Basic, 5, 1.0),
            WaveDefinition::single(EnemyKind::Fast, 2, 1.0),
        ];
        let mut scheduler = WaveScheduler::new(waves, &manual_config());
        let mut economy = Economy::new(0, 20);

        scheduler.start_next_wave();
        scheduler.tick(DT, &mut economy);
        scheduler.tick(1.0, &mut economy);
        assert_eq!(scheduler.live_enemies(), 2);
        scheduler.drain_notices();

        assert!(scheduler.force_start_next_wave());
        assert_eq!(scheduler.live_enemies(), 0);
        assert_eq!(scheduler.wave_index(), 1);
        assert_eq!(
            scheduler.drain_notices(),
            vec![WaveNotice::Started { wave_number: 2 }]
        );

        // Бонус за брошенную волну не начисляется
        assert_eq!(economy.money(), 0);

        scheduler.tick(DT, &mut economy);
        assert_eq!(scheduler.drain_notices(), vec![WaveNotice::Spawn(EnemyKind::Fast)]);
    }

    #[test]
    fn test_enemy_removed_saturates() {
        let mut scheduler = WaveScheduler::new(Vec::new(), &manual_config());
        scheduler.enemy_removed();
        assert_eq!(scheduler.live_enemies(), 0);
    }
}
