#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Station Siege.

use std::time::Duration;

use station_siege_core::{Command, Event, GameOutcome, GamePhase, WELCOME_BANNER};

mod combat;
mod entities;
pub mod levels;
mod phase;
mod update;
mod weapon;

use entities::{Enemy, EnemyBullet, Player, PlayerBullet, Powerup, Repair, RepairableSystem};
pub use levels::{LayoutError, LevelCatalogue, LevelLayout};

/// Represents the authoritative Station Siege world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    catalogue: LevelCatalogue,
    phase: GamePhase,
    outcome: Option<GameOutcome>,
    level: u32,
    level_cleared: bool,
    score: u32,
    points_available: u32,
    player: Player,
    enemies: Vec<Enemy>,
    player_bullets: Vec<PlayerBullet>,
    enemy_bullets: Vec<EnemyBullet>,
    powerups: Vec<Powerup>,
    systems: Vec<RepairableSystem>,
    repair: Option<Repair>,
    clock: Duration,
    next_enemy_id: u32,
    next_powerup_id: u32,
    next_system_id: u32,
}

impl World {
    /// Creates a new world on the first built-in level, ready for simulation.
    ///
    /// Level 1 holds its systems but no enemies until
    /// [`Command::StartNewGame`] is applied.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalogue(LevelCatalogue::builtin())
    }

    /// Creates a new world that plays through the provided level catalogue.
    ///
    /// The first level is loaded immediately but left unpopulated; adapters
    /// submit [`Command::StartNewGame`] so spawning systems observe the load.
    #[must_use]
    pub fn with_catalogue(catalogue: LevelCatalogue) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            catalogue,
            phase: GamePhase::Playing,
            outcome: None,
            level: 1,
            level_cleared: false,
            score: 0,
            points_available: 0,
            player: Player::new(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            systems: Vec::new(),
            repair: None,
            clock: Duration::ZERO,
            next_enemy_id: 0,
            next_powerup_id: 0,
            next_system_id: 0,
        };
        let mut discarded = Vec::new();
        world.load_level(&mut discarded);
        world
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartNewGame => world.reset_game(out_events),
        Command::Tick { dt, controls } => world.tick(dt, controls, out_events),
        Command::Aim {
            yaw_delta,
            pitch_delta,
        } => {
            if world.phase == GamePhase::Playing {
                world.player.turn(yaw_delta, pitch_delta);
            }
        }
        Command::FireWeapon => world.fire_weapon(out_events),
        Command::SpawnEnemy {
            kind,
            position,
            facing,
        } => world.spawn_enemy(kind, position, facing, out_events),
        Command::SpawnPowerup { kind, position } => {
            world.spawn_powerup(kind, position, out_events);
        }
        Command::ContinueToUpgrades => world.continue_to_upgrades(out_events),
        Command::PurchaseUpgrade { upgrade } => world.purchase_upgrade(upgrade, out_events),
        Command::SkipUpgrade => world.skip_upgrade(out_events),
        Command::RestartGame => world.restart_game(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use station_siege_core::{
        tuning::REPAIR_DURATION, EnemyBulletSnapshot, EnemySnapshot, GameOutcome, GamePhase,
        GridView, LevelBounds, PlayerBulletSnapshot, PlayerSnapshot, PowerupSnapshot,
        RepairProgress, SystemSnapshot, WorldSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Active phase of the game.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// How the campaign ended, once the game is over.
    #[must_use]
    pub fn outcome(world: &World) -> Option<GameOutcome> {
        world.outcome
    }

    /// One-based index of the active level.
    ///
    /// After a victory this is one past the final level of the catalogue.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Number of levels in the catalogue the world plays through.
    #[must_use]
    pub fn level_count(world: &World) -> u32 {
        world.catalogue.level_count()
    }

    /// Cumulative score of the current game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Points the player may spend on upgrades.
    #[must_use]
    pub fn points_available(world: &World) -> u32 {
        world.points_available
    }

    /// Total simulated time of the current world.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Read-only view of the active level layout.
    #[must_use]
    pub fn grid(world: &World) -> GridView<'_> {
        world.catalogue.layout(world.level).view()
    }

    /// World-space bounds of the active level.
    #[must_use]
    pub fn bounds(world: &World) -> LevelBounds {
        world.catalogue.bounds(world.level)
    }

    /// Reports whether the point lies outside the active level or inside a wall.
    #[must_use]
    pub fn is_wall(world: &World, point: Vec2) -> bool {
        world.catalogue.is_wall(world.level, point)
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures every live enemy in list order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }

    /// Captures every player bullet in flight.
    #[must_use]
    pub fn player_bullets(world: &World) -> Vec<PlayerBulletSnapshot> {
        world
            .player_bullets
            .iter()
            .map(|bullet| PlayerBulletSnapshot {
                position: bullet.position,
                velocity: bullet.velocity,
            })
            .collect()
    }

    /// Captures every enemy bullet in flight.
    #[must_use]
    pub fn enemy_bullets(world: &World) -> Vec<EnemyBulletSnapshot> {
        world
            .enemy_bullets
            .iter()
            .map(|bullet| EnemyBulletSnapshot {
                position: bullet.position,
                velocity: bullet.velocity,
                damage: bullet.damage,
            })
            .collect()
    }

    /// Captures every powerup waiting to be collected.
    #[must_use]
    pub fn powerups(world: &World) -> Vec<PowerupSnapshot> {
        world.powerups.iter().map(|powerup| powerup.snapshot()).collect()
    }

    /// Captures the repairable systems of the active level.
    #[must_use]
    pub fn systems(world: &World) -> Vec<SystemSnapshot> {
        world.systems.iter().map(|system| system.snapshot()).collect()
    }

    /// Progress of the repair underway, if the player is repairing.
    #[must_use]
    pub fn repair_progress(world: &World) -> Option<RepairProgress> {
        world.repair.map(|repair| RepairProgress {
            system: repair.system,
            elapsed: repair.elapsed,
            required: REPAIR_DURATION,
        })
    }

    /// Captures everything a render consumer needs to draw a frame.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            phase: world.phase,
            outcome: world.outcome,
            level: world.level,
            score: world.score,
            points_available: world.points_available,
            player: player(world),
            enemies: enemies(world),
            player_bullets: player_bullets(world),
            enemy_bullets: enemy_bullets(world),
            powerups: powerups(world),
            systems: systems(world),
            repair: repair_progress(world),
        }
    }
}
