//! Game phase transitions and level lifecycle.

use glam::Vec2;
use station_siege_core::{
    tuning::LEVEL_CLEAR_BONUS, Event, GameOutcome, GamePhase, SystemId, UpgradeError,
    UpgradeKind,
};

use crate::{
    entities::{Player, RepairableSystem},
    World,
};

impl World {
    pub(crate) fn set_phase(&mut self, to: GamePhase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        out_events.push(Event::PhaseChanged { from, to });
    }

    /// Returns every game scalar to its initial value and reloads the first level.
    pub(crate) fn reset_game(&mut self, out_events: &mut Vec<Event>) {
        self.player = Player::new();
        self.level = 1;
        self.score = 0;
        self.points_available = 0;
        self.outcome = None;
        out_events.push(Event::GameReset);
        self.set_phase(GamePhase::Playing, out_events);
        self.load_level(out_events);
    }

    /// Clears the level's entities, places the player and creates its systems.
    pub(crate) fn load_level(&mut self, out_events: &mut Vec<Event>) {
        if self.level == 0 || self.level > self.catalogue.level_count() {
            log::warn!(
                "level {} is outside the catalogue of {}; restarting the campaign",
                self.level,
                self.catalogue.level_count()
            );
            self.reset_game(out_events);
            return;
        }

        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.powerups.clear();
        self.systems.clear();
        self.repair = None;
        self.level_cleared = false;

        let (start, sockets) = {
            let layout = self.catalogue.layout(self.level);
            let view = layout.view();
            let start = layout.first_empty_cell().map_or_else(
                || {
                    let bounds = view.bounds();
                    Vec2::new(
                        (bounds.min_x + bounds.max_x) * 0.5,
                        (bounds.min_y + bounds.max_y) * 0.5,
                    )
                },
                |cell| view.cell_center(cell),
            );
            let sockets: Vec<_> = layout
                .system_sockets()
                .into_iter()
                .map(|cell| (cell, view.cell_center(cell)))
                .collect();
            (start, sockets)
        };

        self.player.position = start.extend(0.0);
        self.player.yaw = 0.0;
        self.player.ammo = self.player.max_ammo;

        for (cell, position) in sockets {
            let id = SystemId::new(self.next_system_id);
            self.next_system_id = self.next_system_id.wrapping_add(1);
            self.systems.push(RepairableSystem::new(id, cell, position));
        }

        log::info!(
            "loaded level {} with {} systems to repair",
            self.level,
            self.systems.len()
        );
        out_events.push(Event::LevelLoaded {
            level: self.level,
            player_start: start,
        });
    }

    /// Awards the clear bonus and pauses play once every system is repaired.
    pub(crate) fn check_level_complete(&mut self, out_events: &mut Vec<Event>) {
        if self.systems.is_empty() || self.level_cleared {
            return;
        }
        if !self.systems.iter().all(RepairableSystem::is_repaired) {
            return;
        }

        self.level_cleared = true;
        let bonus = self.level.saturating_mul(LEVEL_CLEAR_BONUS);
        self.score = self.score.saturating_add(bonus);
        self.points_available = self.points_available.saturating_add(bonus);
        log::info!("level {} cleared, bonus {bonus}", self.level);
        out_events.push(Event::LevelCleared {
            level: self.level,
            bonus,
        });
        self.set_phase(GamePhase::LevelComplete, out_events);
    }

    pub(crate) fn continue_to_upgrades(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::LevelComplete {
            self.set_phase(GamePhase::Upgrading, out_events);
        } else {
            log::debug!("continue ignored during {:?}", self.phase);
        }
    }

    pub(crate) fn skip_upgrade(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::Upgrading {
            self.advance_level(out_events);
        } else {
            log::debug!("skip ignored during {:?}", self.phase);
        }
    }

    pub(crate) fn purchase_upgrade(&mut self, upgrade: UpgradeKind, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Upgrading {
            log::debug!("{} is not on offer during {:?}", upgrade.label(), self.phase);
            out_events.push(Event::UpgradeRejected {
                upgrade,
                reason: UpgradeError::Unavailable,
            });
            return;
        }

        let cost = upgrade.cost();
        if self.points_available < cost {
            let reason = UpgradeError::InsufficientPoints {
                cost,
                available: self.points_available,
            };
            log::info!("cannot buy {}: {reason}", upgrade.label());
            out_events.push(Event::UpgradeRejected { upgrade, reason });
            return;
        }

        self.points_available -= cost;
        self.player.apply_upgrade(upgrade);
        log::info!("bought {} for {cost} points", upgrade.label());
        out_events.push(Event::UpgradePurchased { upgrade, cost });
        self.advance_level(out_events);
    }

    pub(crate) fn restart_game(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::GameOver {
            self.reset_game(out_events);
        } else {
            log::debug!("restart ignored during {:?}", self.phase);
        }
    }

    /// Moves past the current level, ending the campaign after the last one.
    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        self.level = self.level.saturating_add(1);
        if self.level > self.catalogue.level_count() {
            self.end_campaign(GameOutcome::Victorious, out_events);
            return;
        }
        self.set_phase(GamePhase::Playing, out_events);
        self.load_level(out_events);
    }

    pub(crate) fn end_campaign(&mut self, outcome: GameOutcome, out_events: &mut Vec<Event>) {
        self.outcome = Some(outcome);
        self.repair = None;
        log::info!(
            "game over ({outcome:?}) at level {} with score {}",
            self.level,
            self.score
        );
        self.set_phase(GamePhase::GameOver, out_events);
        out_events.push(Event::CampaignEnded {
            outcome,
            level: self.level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{apply, query};
    use station_siege_core::Command;

    fn cleared_world() -> World {
        let mut world = World::new();
        for system in &mut world.systems {
            system.mark_repaired();
        }
        let mut events = Vec::new();
        world.check_level_complete(&mut events);
        world
    }

    #[test]
    fn level_bonus_is_awarded_once() {
        let mut world = cleared_world();
        let mut events = Vec::new();
        world.check_level_complete(&mut events);

        assert!(events.is_empty());
        assert_eq!(query::points_available(&world), 50);
        assert_eq!(query::score(&world), 50);
        assert_eq!(query::phase(&world), GamePhase::LevelComplete);
    }

    #[test]
    fn levels_without_systems_never_complete() {
        let mut world = World::new();
        world.systems.clear();
        let mut events = Vec::new();
        world.check_level_complete(&mut events);
        assert_eq!(query::phase(&world), GamePhase::Playing);
        assert!(events.is_empty());
    }

    #[test]
    fn purchase_deducts_cost_and_loads_next_level() {
        let mut world = cleared_world();
        let mut events = Vec::new();
        apply(&mut world, Command::ContinueToUpgrades, &mut events);
        apply(
            &mut world,
            Command::PurchaseUpgrade {
                upgrade: UpgradeKind::AmmoCapacity,
            },
            &mut events,
        );

        assert_eq!(query::points_available(&world), 20);
        assert_eq!(query::score(&world), 50);
        assert_eq!(query::level(&world), 2);
        assert_eq!(query::phase(&world), GamePhase::Playing);
        assert_eq!(query::player(&world).ammo, 30);
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut world = cleared_world();
        let mut events = Vec::new();
        apply(&mut world, Command::ContinueToUpgrades, &mut events);
        events.clear();

        apply(
            &mut world,
            Command::PurchaseUpgrade {
                upgrade: UpgradeKind::Shield,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                upgrade: UpgradeKind::Shield,
                reason: UpgradeError::InsufficientPoints {
                    cost: 80,
                    available: 50,
                },
            }]
        );
        assert_eq!(query::phase(&world), GamePhase::Upgrading);
        assert_eq!(query::level(&world), 1);
    }

    #[test]
    fn next_level_resets_heading_but_keeps_pitch() {
        let mut world = cleared_world();
        world.player.yaw = 90.0;
        world.player.pitch = -20.0;
        let mut events = Vec::new();
        apply(&mut world, Command::ContinueToUpgrades, &mut events);
        apply(&mut world, Command::SkipUpgrade, &mut events);

        let player = query::player(&world);
        assert_eq!(query::level(&world), 2);
        assert_eq!((player.yaw, player.pitch), (0.0, -20.0));
    }

    #[test]
    fn out_of_range_level_forces_full_reset() {
        let mut world = World::new();
        world.level = 7;
        world.score = 90;
        let mut events = Vec::new();
        world.load_level(&mut events);

        assert_eq!(query::level(&world), 1);
        assert_eq!(query::score(&world), 0);
        assert!(events.contains(&Event::GameReset));
    }
}
