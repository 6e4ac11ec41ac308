//! Fixed gameplay constants shared by the world and its systems.

use std::time::Duration;

/// Side length of a level cell in world units.
pub const CELL_SIZE: f32 = 100.0;

/// Largest simulated step a single frame may advance.
pub const MAX_STEP: Duration = Duration::from_millis(50);

/// Player walking speed in world units per second.
pub const PLAYER_SPEED: f32 = 220.0;
/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 25.0;
/// Height above the player's feet that bullets leave the muzzle from.
pub const MUZZLE_HEIGHT: f32 = 33.0;
/// Lowest pitch the player may look at, in degrees.
pub const PITCH_MIN: f32 = -80.0;
/// Highest pitch the player may look at, in degrees.
pub const PITCH_MAX: f32 = 80.0;

/// Health the player starts a game with.
pub const PLAYER_START_HEALTH: u32 = 100;
/// Magazine size the player starts a game with.
pub const PLAYER_START_AMMO: u32 = 20;
/// Shield capacity the player starts a game with.
pub const PLAYER_START_SHIELD: u32 = 0;
/// Minimum seconds between two player shots at the start of a game.
pub const PLAYER_START_FIRE_INTERVAL: f32 = 0.5;

/// Speed of player bullets in world units per second.
pub const BULLET_SPEED: f32 = 700.0;
/// Damage dealt by one player bullet.
pub const BULLET_DAMAGE: u32 = 15;
/// Speed of enemy bullets in world units per second.
pub const ENEMY_BULLET_SPEED: f32 = 300.0;

/// Minimum time between two contact hits from the same enemy.
pub const CONTACT_DAMAGE_INTERVAL: Duration = Duration::from_millis(500);
/// Distance multiple of its own radius at which a melee enemy stops advancing.
pub const MELEE_HOLD_FACTOR: f32 = 1.5;

/// Seconds of uninterrupted work needed to repair a system.
pub const REPAIR_DURATION: f32 = 5.0;
/// Maximum distance from a system at which repairs may start or continue.
pub const REPAIR_RADIUS: f32 = 50.0;
/// Score and points awarded per level index when a level is cleared.
pub const LEVEL_CLEAR_BONUS: u32 = 50;

/// Distance below which the player picks up a powerup.
pub const POWERUP_PICKUP_RADIUS: f32 = 30.0;
/// Cosmetic powerup spin in degrees per second.
pub const POWERUP_SPIN_RATE: f32 = 60.0;
/// Health restored by a health pack.
pub const HEALTH_PACK_AMOUNT: u32 = 20;
/// Ammunition restored by an ammo pack.
pub const AMMO_PACK_AMOUNT: u32 = 10;

/// Minimum distance, in cells, between a new enemy and the player.
pub const SPAWN_MIN_DISTANCE_CELLS: f32 = 4.0;
/// Number of random cells sampled before a placement is abandoned.
pub const SPAWN_MAX_ATTEMPTS: u32 = 100;
