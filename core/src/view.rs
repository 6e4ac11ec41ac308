//! Read-only snapshots handed to render consumers and pure systems.
//!
//! Snapshots serialise so consumers outside the process can draw or record them.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{EnemyId, EnemyKind, GameOutcome, GamePhase, PowerupId, PowerupKind, SystemId};

/// Immutable representation of the player's state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Position of the player's feet.
    pub position: Vec3,
    /// Facing angle in degrees within `[0, 360)`.
    pub yaw: f32,
    /// Pitch angle in degrees within `[-80, 80]`.
    pub pitch: f32,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Rounds left in the magazine.
    pub ammo: u32,
    /// Magazine size.
    pub max_ammo: u32,
    /// Current shield charge.
    pub shield: u32,
    /// Maximum shield charge.
    pub max_shield: u32,
    /// Minimum seconds between shots.
    pub fire_interval: f32,
}

/// Immutable representation of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier assigned to the enemy.
    pub id: EnemyId,
    /// Type of the enemy.
    pub kind: EnemyKind,
    /// Position including hover altitude.
    pub position: Vec3,
    /// Facing angle in degrees.
    pub facing: f32,
    /// Remaining health.
    pub health: u32,
}

/// Immutable representation of a player bullet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBulletSnapshot {
    /// Current position.
    pub position: Vec3,
    /// Velocity in world units per second.
    pub velocity: Vec3,
}

/// Immutable representation of an enemy bullet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyBulletSnapshot {
    /// Current horizontal position.
    pub position: Vec2,
    /// Horizontal velocity in world units per second.
    pub velocity: Vec2,
    /// Damage applied on hit.
    pub damage: u32,
}

/// Immutable representation of a powerup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerupSnapshot {
    /// Identifier assigned to the powerup.
    pub id: PowerupId,
    /// Type of the powerup.
    pub kind: PowerupKind,
    /// Horizontal position.
    pub position: Vec2,
    /// Cosmetic rotation in degrees within `[0, 360)`.
    pub rotation: f32,
}

/// Immutable representation of a repairable system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Identifier assigned to the system.
    pub id: SystemId,
    /// Cell hosting the system.
    pub cell: crate::CellCoord,
    /// Whether the system has been repaired.
    pub repaired: bool,
}

/// Progress of the repair currently underway.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepairProgress {
    /// System being repaired.
    pub system: SystemId,
    /// Seconds of work accumulated so far.
    pub elapsed: f32,
    /// Seconds of work required to finish.
    pub required: f32,
}

impl RepairProgress {
    /// Completion ratio clamped to `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.required <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.required).clamp(0.0, 1.0)
    }
}

/// Complete read-only view of the world used to draw a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Active phase.
    pub phase: GamePhase,
    /// Outcome once the game is over.
    pub outcome: Option<GameOutcome>,
    /// One-based level index.
    pub level: u32,
    /// Cumulative score.
    pub score: u32,
    /// Points available to spend on upgrades.
    pub points_available: u32,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Live enemies in list order.
    pub enemies: Vec<EnemySnapshot>,
    /// Player bullets in flight.
    pub player_bullets: Vec<PlayerBulletSnapshot>,
    /// Enemy bullets in flight.
    pub enemy_bullets: Vec<EnemyBulletSnapshot>,
    /// Powerups waiting to be collected.
    pub powerups: Vec<PowerupSnapshot>,
    /// Repairable systems of the level.
    pub systems: Vec<SystemSnapshot>,
    /// Repair underway, if any.
    pub repair: Option<RepairProgress>,
}
