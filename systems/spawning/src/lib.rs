#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawn director that populates levels and drops powerups.
//!
//! The system reacts to two events. [`Event::LevelLoaded`] requests the
//! level's enemy roster, each enemy placed on a random empty cell far enough
//! from the player's start. [`Event::EnemyKilled`] drops a random powerup
//! where the enemy died. Placement is a bounded sample-and-retry loop; when
//! every attempt fails the enemy is skipped and a warning is logged.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use station_siege_core::{
    tuning::{SPAWN_MAX_ATTEMPTS, SPAWN_MIN_DISTANCE_CELLS},
    CellCode, CellCoord, Command, EnemyKind, Event, GridView, PowerupKind,
};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    max_attempts: u32,
    min_distance_cells: f32,
}

impl Config {
    /// Creates a new configuration using the provided seed and placement limits.
    #[must_use]
    pub const fn new(rng_seed: u64, max_attempts: u32, min_distance_cells: f32) -> Self {
        Self {
            rng_seed,
            max_attempts,
            min_distance_cells,
        }
    }

    /// Creates a configuration with the standard placement limits.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self::new(rng_seed, SPAWN_MAX_ATTEMPTS, SPAWN_MIN_DISTANCE_CELLS)
    }
}

/// Number of enemies of each kind placed when a level loads, in spawn order.
#[must_use]
pub fn level_roster(level: u32) -> [(EnemyKind, u32); 4] {
    [
        (EnemyKind::Scout, level.saturating_add(2)),
        (EnemyKind::Tank, level.saturating_sub(1)),
        (EnemyKind::Sniper, level.saturating_sub(2)),
        (EnemyKind::Drone, level.saturating_mul(2)),
    ]
}

/// Pure system that turns level loads and kills into spawn commands.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
    max_attempts: u32,
    min_distance_cells: f32,
    abandoned: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            max_attempts: config.max_attempts,
            min_distance_cells: config.min_distance_cells,
            abandoned: 0,
        }
    }

    /// Number of enemy placements given up after exhausting every attempt.
    #[must_use]
    pub fn abandoned_placements(&self) -> u32 {
        self.abandoned
    }

    /// Consumes events and the active level's grid to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], grid: GridView<'_>, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::LevelLoaded {
                    level,
                    player_start,
                } => self.populate(*level, grid, *player_start, out),
                Event::EnemyKilled { position, .. } => {
                    let kind = PowerupKind::ALL[self.rng.gen_range(0..PowerupKind::ALL.len())];
                    out.push(Command::SpawnPowerup {
                        kind,
                        position: *position,
                    });
                }
                _ => {}
            }
        }
    }

    fn populate(&mut self, level: u32, grid: GridView<'_>, player: Vec2, out: &mut Vec<Command>) {
        for (kind, count) in level_roster(level) {
            for _ in 0..count {
                match self.find_position(grid, player) {
                    Some(position) => out.push(Command::SpawnEnemy {
                        kind,
                        position,
                        facing: self.rng.gen_range(0.0..360.0),
                    }),
                    None => {
                        self.abandoned = self.abandoned.saturating_add(1);
                        log::warn!(
                            "no valid spawn location for {} after {} attempts",
                            kind.label(),
                            self.max_attempts
                        );
                    }
                }
            }
        }
    }

    fn find_position(&mut self, grid: GridView<'_>, player: Vec2) -> Option<Vec2> {
        let (columns, rows) = grid.dimensions();
        if columns == 0 || rows == 0 {
            return None;
        }

        let min_distance = self.min_distance_cells * grid.cell_size();
        for _ in 0..self.max_attempts {
            let cell = CellCoord::new(self.rng.gen_range(0..columns), self.rng.gen_range(0..rows));
            if grid.cell(cell) != Some(CellCode::Empty) {
                continue;
            }
            let center = grid.cell_center(cell);
            if center.distance(player) >= min_distance {
                return Some(center);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rosters_grow_with_level() {
        assert_eq!(
            level_roster(1),
            [
                (EnemyKind::Scout, 3),
                (EnemyKind::Tank, 0),
                (EnemyKind::Sniper, 0),
                (EnemyKind::Drone, 2),
            ]
        );
        assert_eq!(
            level_roster(3),
            [
                (EnemyKind::Scout, 5),
                (EnemyKind::Tank, 2),
                (EnemyKind::Sniper, 1),
                (EnemyKind::Drone, 6),
            ]
        );
    }

    #[test]
    fn walled_grid_abandons_every_placement() {
        let cells = [CellCode::Wall; 9];
        let grid = GridView::new(&cells, 3, 3, 100.0);
        let mut spawning = Spawning::new(Config::new(7, 10, 4.0));
        let mut commands = Vec::new();

        spawning.handle(
            &[Event::LevelLoaded {
                level: 1,
                player_start: Vec2::new(150.0, 150.0),
            }],
            grid,
            &mut commands,
        );

        assert!(commands.is_empty());
        assert_eq!(spawning.abandoned_placements(), 5);
    }
}
