//! Wires the world to its pure systems and pumps commands until quiescent.

use std::{collections::VecDeque, mem, time::Duration};

use station_siege_core::{tuning::MAX_STEP, Command, Event};
use station_siege_system_controls::{Config as ControlsConfig, Controls, FrameInput};
use station_siege_system_spawning::{Config as SpawningConfig, Spawning};
use station_siege_world::{self as world, query, LevelCatalogue, World};

use crate::config::RunConfig;

/// Running tallies gathered from the event stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionStats {
    pub(crate) frames: u32,
    pub(crate) shots_fired: u32,
    pub(crate) shots_rejected: u32,
    pub(crate) enemies_spawned: u32,
    pub(crate) enemies_killed: u32,
    pub(crate) powerups_collected: u32,
    pub(crate) systems_repaired: u32,
    pub(crate) levels_cleared: u32,
    pub(crate) upgrades_purchased: u32,
    pub(crate) damage_taken: u32,
    pub(crate) games_started: u32,
}

impl SessionStats {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            let tally = match event {
                Event::GameReset => &mut self.games_started,
                Event::WeaponFired { .. } => &mut self.shots_fired,
                Event::FireRejected { .. } => &mut self.shots_rejected,
                Event::EnemySpawned { .. } => &mut self.enemies_spawned,
                Event::EnemyKilled { .. } => &mut self.enemies_killed,
                Event::PowerupCollected { .. } => &mut self.powerups_collected,
                Event::SystemRepaired { .. } => &mut self.systems_repaired,
                Event::LevelCleared { .. } => &mut self.levels_cleared,
                Event::UpgradePurchased { .. } => &mut self.upgrades_purchased,
                Event::PlayerDamaged {
                    absorbed, dealt, ..
                } => {
                    self.damage_taken = self
                        .damage_taken
                        .saturating_add(absorbed.saturating_add(*dealt));
                    continue;
                }
                _ => continue,
            };
            *tally = tally.saturating_add(1);
        }
    }
}

/// Owns the world and every system the adapter drives.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    spawning: Spawning,
    controls: Controls,
    pending_events: Vec<Event>,
    stats: SessionStats,
}

impl Session {
    pub(crate) fn new(config: &RunConfig, catalogue: LevelCatalogue) -> Self {
        Self {
            world: World::with_catalogue(catalogue),
            spawning: Spawning::new(SpawningConfig::new(
                config.seed,
                config.spawn_attempts,
                config.spawn_distance_cells,
            )),
            controls: Controls::new(ControlsConfig::new(config.mouse_sensitivity)),
            pending_events: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Starts the campaign so the spawn director observes the first level load.
    pub(crate) fn boot(&mut self) {
        self.execute(Command::StartNewGame);
    }

    /// Advances one frame using the supplied input and wall-clock elapsed time.
    pub(crate) fn frame(&mut self, input: &FrameInput, elapsed: Duration) {
        let dt = elapsed.min(MAX_STEP);
        let events = mem::take(&mut self.pending_events);
        let mut commands = Vec::new();
        self.controls.handle(&events, input, dt, &mut commands);
        for command in commands {
            self.execute(command);
        }
        self.stats.frames = self.stats.frames.saturating_add(1);
    }

    fn execute(&mut self, command: Command) {
        let mut queue = VecDeque::from([command]);
        while let Some(command) = queue.pop_front() {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);

            let mut follow_ups = Vec::new();
            self.spawning
                .handle(&events, query::grid(&self.world), &mut follow_ups);
            queue.extend(follow_ups);

            self.stats.record(&events);
            self.pending_events.extend(events);
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn stats(&self) -> SessionStats {
        self.stats
    }

    pub(crate) fn abandoned_spawns(&self) -> u32 {
        self.spawning.abandoned_placements()
    }
}
