#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Station Siege simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod tuning;

mod enemy;
mod upgrade;
mod view;

pub use enemy::{EnemyKind, EnemyProfile};
pub use upgrade::UpgradeKind;
pub use view::{
    EnemyBulletSnapshot, EnemySnapshot, PlayerBulletSnapshot, PlayerSnapshot, PowerupSnapshot,
    RepairProgress, SystemSnapshot, WorldSnapshot,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Station Siege.";

/// Top-level discrete mode of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every frame.
    Playing,
    /// Every system of the level is repaired; waiting for a continue signal.
    LevelComplete,
    /// Between levels; waiting for an upgrade purchase or a skip signal.
    Upgrading,
    /// Terminal state reached by dying or by clearing the final level.
    GameOver,
}

/// Describes how a finished campaign ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The player's health reached zero.
    Defeated,
    /// The player advanced past the final level of the catalogue.
    Victorious,
}

/// Kinds of pickups dropped by destroyed enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Restores health up to the player's maximum.
    Health,
    /// Restores ammunition up to the player's maximum.
    Ammo,
}

impl PowerupKind {
    /// Every powerup kind in a stable order, used for uniform selection.
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Health, PowerupKind::Ammo];
}

/// Code stored in a single cell of a level layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellCode {
    /// Walkable floor.
    Empty,
    /// Impassable terrain.
    Wall,
    /// Walkable floor hosting a repairable system.
    SystemSocket,
}

impl CellCode {
    /// Decodes the numeric cell codes used by level layouts.
    ///
    /// `0` is empty floor, `1` a wall and `2` a system socket. Any other value
    /// is treated as a wall so malformed layouts never open holes in the map.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Empty,
            2 => Self::SystemSocket,
            _ => Self::Wall,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned bounds of a level measured in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelBounds {
    /// Smallest x coordinate inside the level.
    pub min_x: f32,
    /// Exclusive upper bound along the x axis.
    pub max_x: f32,
    /// Smallest y coordinate inside the level.
    pub min_y: f32,
    /// Exclusive upper bound along the y axis.
    pub max_y: f32,
}

impl LevelBounds {
    /// Reports whether the point lies inside the half-open bounds.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (self.min_x..self.max_x).contains(&point.x) && (self.min_y..self.max_y).contains(&point.y)
    }
}

/// Read-only view into a level layout.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellCode],
    columns: u32,
    rows: u32,
    cell_size: f32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellCode], columns: u32, rows: u32, cell_size: f32) -> Self {
        Self {
            cells,
            columns,
            rows,
            cell_size,
        }
    }

    /// Provides the dimensions of the layout as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Side length of a single square cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns the code stored at the provided cell, if it lies inside the layout.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellCode> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// World-space bounds covered by the layout.
    #[must_use]
    pub fn bounds(&self) -> LevelBounds {
        LevelBounds {
            min_x: 0.0,
            max_x: self.columns as f32 * self.cell_size,
            min_y: 0.0,
            max_y: self.rows as f32 * self.cell_size,
        }
    }

    /// World-space center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.cell_size,
            (cell.row() as f32 + 0.5) * self.cell_size,
        )
    }

    /// Cell containing the provided world-space point, if inside the bounds.
    #[must_use]
    pub fn cell_at(&self, point: Vec2) -> Option<CellCoord> {
        if !self.bounds().contains(point) || self.cell_size <= 0.0 {
            return None;
        }

        let column = (point.x / self.cell_size) as u32;
        let row = (point.y / self.cell_size) as u32;
        if column < self.columns && row < self.rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    /// Reports whether the point lies outside the layout or inside a wall cell.
    #[must_use]
    pub fn is_wall(&self, point: Vec2) -> bool {
        match self.cell_at(point).and_then(|cell| self.cell(cell)) {
            Some(code) => code == CellCode::Wall,
            None => true,
        }
    }

    /// Iterates over every cell in reading order together with its code.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellCode)> + 'a {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, code)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *code)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a powerup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PowerupId(u32);

impl PowerupId {
    /// Creates a new powerup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a repairable system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(u32);

impl SystemId {
    /// Creates a new system identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Movement and action intent held by the player during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerControls {
    forward: i8,
    strafe: i8,
    repair_held: bool,
}

impl PlayerControls {
    /// Creates a new control snapshot; axis values are reduced to -1, 0 or +1.
    #[must_use]
    pub const fn new(forward: i8, strafe: i8, repair_held: bool) -> Self {
        Self {
            forward: forward.signum(),
            strafe: strafe.signum(),
            repair_held,
        }
    }

    /// Forward (+1) or backward (-1) intent.
    #[must_use]
    pub const fn forward(&self) -> i8 {
        self.forward
    }

    /// Strafe right (+1) or left (-1) intent.
    #[must_use]
    pub const fn strafe(&self) -> i8 {
        self.strafe
    }

    /// Whether the repair action is held down.
    #[must_use]
    pub const fn repair_held(&self) -> bool {
        self.repair_held
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets every game scalar and loads the first level regardless of phase.
    StartNewGame,
    /// Advances the simulation by one frame.
    Tick {
        /// Elapsed time since the previous frame; clamped to [`tuning::MAX_STEP`].
        dt: Duration,
        /// Movement and repair intent held during the frame.
        controls: PlayerControls,
    },
    /// Rotates the player's view.
    Aim {
        /// Change of the facing angle in degrees.
        yaw_delta: f32,
        /// Change of the pitch angle in degrees.
        pitch_delta: f32,
    },
    /// Requests that the player fire a bullet along the current aim.
    FireWeapon,
    /// Requests that a new enemy be placed into the level.
    SpawnEnemy {
        /// Type of enemy to create.
        kind: EnemyKind,
        /// Horizontal position of the enemy.
        position: Vec2,
        /// Initial facing angle in degrees.
        facing: f32,
    },
    /// Requests that a powerup be dropped at the provided location.
    SpawnPowerup {
        /// Type of powerup to create.
        kind: PowerupKind,
        /// Horizontal position of the powerup.
        position: Vec2,
    },
    /// Leaves the level-complete screen and opens the upgrade selection.
    ContinueToUpgrades,
    /// Attempts to buy an upgrade and advance to the next level.
    PurchaseUpgrade {
        /// Upgrade the player selected.
        upgrade: UpgradeKind,
    },
    /// Advances to the next level without buying an upgrade.
    SkipUpgrade,
    /// Starts a new game after the game is over.
    RestartGame,
}

/// Origin of damage applied to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    /// An enemy touched the player.
    Contact(EnemyId),
    /// An enemy bullet hit the player.
    Projectile,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Clamped duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that every game scalar returned to its initial value.
    GameReset,
    /// Announces that a level layout was (re)loaded and is ready to populate.
    LevelLoaded {
        /// One-based index of the loaded level.
        level: u32,
        /// Position the player was placed at.
        player_start: Vec2,
    },
    /// Announces a phase transition.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: GamePhase,
        /// Phase that became active.
        to: GamePhase,
    },
    /// Announces that the campaign ended and how.
    CampaignEnded {
        /// Whether the player won or lost.
        outcome: GameOutcome,
        /// Level index recorded when the campaign ended.
        level: u32,
    },
    /// Confirms that the player fired a bullet.
    WeaponFired {
        /// Ammunition left after the shot.
        ammo_remaining: u32,
    },
    /// Reports that a fire request was refused.
    FireRejected {
        /// Reason the shot was refused.
        reason: FireRejection,
    },
    /// Confirms that an enemy was placed into the level.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Type of the enemy.
        kind: EnemyKind,
        /// Position of the enemy, including hover altitude.
        position: Vec3,
    },
    /// Reports that an enemy placement request was refused.
    EnemySpawnRejected {
        /// Type of enemy requested.
        kind: EnemyKind,
        /// Reason the placement was refused.
        reason: SpawnRejection,
    },
    /// Confirms that an enemy fired a bullet at the player.
    EnemyFired {
        /// Identifier of the shooter.
        enemy: EnemyId,
    },
    /// Reports that a player bullet hit an enemy that survived.
    EnemyDamaged {
        /// Identifier of the enemy that was hit.
        enemy: EnemyId,
        /// Health left after the hit.
        remaining_health: u32,
    },
    /// Reports that an enemy was destroyed by the player.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Type of the destroyed enemy.
        kind: EnemyKind,
        /// Last horizontal position of the enemy.
        position: Vec2,
        /// Score and points awarded for the kill.
        reward: u32,
    },
    /// Reports that the player took damage.
    PlayerDamaged {
        /// Origin of the damage.
        source: DamageSource,
        /// Portion absorbed by the shield.
        absorbed: u32,
        /// Portion subtracted from health.
        dealt: u32,
        /// Health left after the hit.
        remaining_health: u32,
    },
    /// Confirms that a powerup was dropped.
    PowerupSpawned {
        /// Identifier assigned to the powerup.
        powerup: PowerupId,
        /// Type of the powerup.
        kind: PowerupKind,
        /// Horizontal position of the powerup.
        position: Vec2,
    },
    /// Confirms that the player picked up a powerup.
    PowerupCollected {
        /// Identifier of the collected powerup.
        powerup: PowerupId,
        /// Type of the collected powerup.
        kind: PowerupKind,
    },
    /// Announces that the player started repairing a system.
    RepairStarted {
        /// System being repaired.
        system: SystemId,
    },
    /// Announces that a repair was abandoned before completion.
    RepairInterrupted {
        /// System whose repair was abandoned.
        system: SystemId,
    },
    /// Announces that a system finished repairing.
    SystemRepaired {
        /// System that is now repaired.
        system: SystemId,
    },
    /// Announces that every system of the level is repaired.
    LevelCleared {
        /// One-based index of the cleared level.
        level: u32,
        /// Score and points bonus awarded for the clear.
        bonus: u32,
    },
    /// Confirms that an upgrade was bought.
    UpgradePurchased {
        /// Upgrade that was applied.
        upgrade: UpgradeKind,
        /// Points deducted for the purchase.
        cost: u32,
    },
    /// Reports that an upgrade purchase was refused.
    UpgradeRejected {
        /// Upgrade the player attempted to buy.
        upgrade: UpgradeKind,
        /// Reason the purchase was refused.
        reason: UpgradeError,
    },
}

/// Reasons a fire request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum FireRejection {
    /// The simulation is paused in a non-playing phase.
    #[error("weapons are offline outside active play")]
    NotPlaying,
    /// The player is busy repairing a system.
    #[error("cannot fire while repairing")]
    Repairing,
    /// The magazine is empty.
    #[error("out of ammo")]
    OutOfAmmo,
    /// The weapon has not finished cycling since the last shot.
    #[error("weapon is cycling")]
    Cooldown,
}

/// Reasons an enemy placement request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SpawnRejection {
    /// The simulation is paused in a non-playing phase.
    #[error("enemies can only be placed during active play")]
    NotPlaying,
    /// The requested position lies inside a wall or outside the level.
    #[error("spawn position is inside a wall")]
    InsideWall,
}

/// Reasons an upgrade purchase may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum UpgradeError {
    /// Upgrades can only be bought while the upgrade selection is open.
    #[error("upgrades are only offered between levels")]
    Unavailable,
    /// The player cannot afford the upgrade.
    #[error("not enough points: need {cost}, have {available}")]
    InsufficientPoints {
        /// Price of the upgrade.
        cost: u32,
        /// Points the player currently holds.
        available: u32,
    },
}
