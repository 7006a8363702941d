//! Обработка tower команд: place / upgrade / sell / select / targeting
//!
//! Все денежные операции all-or-nothing: отказ → `TowerCommandRejected`,
//! ledger и башня не меняются.

use bevy::prelude::*;

use super::blueprint::{TowerCatalog, TowerKind, TowerUnlocks};
use super::components::Tower;
use super::events::{
    RejectReason, TowerCommand, TowerCommandRejected, TowerDeselected, TowerPlaced, TowerSelected,
    TowerSold, TowerUpgraded,
};
use crate::components::Position;
use crate::config::SimulationConfig;
use crate::economy::Economy;

/// Башни, изменённые командами этого кадра (commands применяются в конце кадра)
#[derive(Default)]
struct FrameEdits {
    placed: Vec<Vec3>,
    sold: Vec<Entity>,
}

/// System: применяет TowerCommand в порядке отправки
#[allow(clippy::too_many_arguments)]
pub fn process_tower_commands(
    mut commands: Commands,
    mut command_events: EventReader<TowerCommand>,
    mut towers: Query<(Entity, &mut Tower, &Position)>,
    catalog: Res<TowerCatalog>,
    unlocks: Res<TowerUnlocks>,
    config: Res<SimulationConfig>,
    mut economy: ResMut<Economy>,
    mut placed_events: EventWriter<TowerPlaced>,
    mut upgraded_events: EventWriter<TowerUpgraded>,
    mut sold_events: EventWriter<TowerSold>,
    mut selected_events: EventWriter<TowerSelected>,
    mut deselected_events: EventWriter<TowerDeselected>,
    mut rejected_events: EventWriter<TowerCommandRejected>,
) {
    let mut edits = FrameEdits::default();

    for command in command_events.read().copied() {
        let outcome = match command {
            TowerCommand::Place { kind, position } => place_tower(
                &mut commands,
                &towers,
                &mut edits,
                &catalog,
                &unlocks,
                &config,
                &mut economy,
                kind,
                position,
            )
            .map(|(tower, cost)| {
                placed_events.write(TowerPlaced {
                    tower,
                    kind,
                    position,
                    cost,
                });
            }),

            TowerCommand::Upgrade { tower } => {
                if edits.sold.contains(&tower) {
                    Err(RejectReason::UnknownTower)
                } else if let Ok((_, mut state, _)) = towers.get_mut(tower) {
                    state.try_upgrade(&mut economy).map(|cost| {
                        crate::log(&format!(
                            "⬆️ Tower {:?} ({:?}) upgraded to level {} for {} (damage {:.2}, range {:.2}, rate {:.2})",
                            tower,
                            state.kind,
                            state.level(),
                            cost,
                            state.damage(),
                            state.range(),
                            state.fire_rate()
                        ));
                        upgraded_events.write(TowerUpgraded {
                            tower,
                            level: state.level(),
                            cost,
                        });
                    })
                } else {
                    Err(RejectReason::UnknownTower)
                }
            }

            TowerCommand::Sell { tower } => {
                if edits.sold.contains(&tower) {
                    Err(RejectReason::UnknownTower)
                } else if let Ok((_, state, _)) = towers.get(tower) {
                    let refund = state.sell_value(config.sell_refund_ratio);
                    economy.add_money(refund);
                    edits.sold.push(tower);
                    commands.entity(tower).despawn();

                    if state.is_selected() {
                        deselected_events.write(TowerDeselected { tower });
                    }
                    sold_events.write(TowerSold { tower, refund });

                    crate::log(&format!(
                        "💰 Tower {:?} ({:?}) sold for {} (invested {})",
                        tower,
                        state.kind,
                        refund,
                        state.total_investment()
                    ));
                    Ok(())
                } else {
                    Err(RejectReason::UnknownTower)
                }
            }

            TowerCommand::Select { tower } => {
                if edits.sold.contains(&tower) || towers.get(tower).is_err() {
                    Err(RejectReason::UnknownTower)
                } else {
                    // Single selection: снимаем выделение с остальных
                    for (entity, mut state, _) in towers.iter_mut() {
                        if entity == tower {
                            if !state.is_selected() {
                                state.select();
                                selected_events.write(TowerSelected { tower });
                            }
                        } else if state.is_selected() {
                            state.deselect();
                            deselected_events.write(TowerDeselected { tower: entity });
                        }
                    }
                    Ok(())
                }
            }

            TowerCommand::Deselect => {
                for (entity, mut state, _) in towers.iter_mut() {
                    if state.is_selected() {
                        state.deselect();
                        deselected_events.write(TowerDeselected { tower: entity });
                    }
                }
                Ok(())
            }

            TowerCommand::SetTargeting { tower, mode } => match towers.get_mut(tower) {
                Ok((_, mut state, _)) if !edits.sold.contains(&tower) => {
                    state.targeting = mode;
                    Ok(())
                }
                _ => Err(RejectReason::UnknownTower),
            },
        };

        if let Err(reason) = outcome {
            rejected_events.write(TowerCommandRejected { command, reason });
            crate::log(&format!("⛔ Tower command {:?} rejected: {:?}", command, reason));
        }
    }
}

/// Постройка башни: unlock → spacing → деньги → spawn
#[allow(clippy::too_many_arguments)]
fn place_tower(
    commands: &mut Commands,
    towers: &Query<(Entity, &mut Tower, &Position)>,
    edits: &mut FrameEdits,
    catalog: &TowerCatalog,
    unlocks: &TowerUnlocks,
    config: &SimulationConfig,
    economy: &mut Economy,
    kind: TowerKind,
    position: Vec3,
) -> Result<(Entity, u32), RejectReason> {
    if !unlocks.is_unlocked(kind) {
        return Err(RejectReason::Locked);
    }

    let spacing = config.min_tower_spacing;
    let blocked_by_existing = towers
        .iter()
        .any(|(entity, _, at)| !edits.sold.contains(&entity) && at.distance(position) < spacing);
    let blocked_by_pending = edits
        .placed
        .iter()
        .any(|at| at.distance(position) < spacing);
    if blocked_by_existing || blocked_by_pending {
        return Err(RejectReason::Occupied);
    }

    let blueprint = catalog.blueprint(kind);
    if !economy.spend_money(blueprint.cost) {
        return Err(RejectReason::InsufficientFunds);
    }

    let tower = commands
        .spawn((
            Tower::new(kind, blueprint, catalog.upgrades),
            Position(position),
        ))
        .id();
    edits.placed.push(position);

    crate::log(&format!(
        "🏰 Tower {:?} ({:?}) placed at {:?} for {}",
        tower, kind, position, blueprint.cost
    ));

    Ok((tower, blueprint.cost))
}
