//! Entity records owned by the world.

use std::time::Duration;

use glam::{Vec2, Vec3};
use station_siege_core::{
    tuning::{
        AMMO_PACK_AMOUNT, HEALTH_PACK_AMOUNT, PITCH_MAX, PITCH_MIN, PLAYER_START_AMMO,
        PLAYER_START_FIRE_INTERVAL, PLAYER_START_HEALTH, PLAYER_START_SHIELD,
    },
    CellCoord, EnemyId, EnemyKind, EnemySnapshot, PlayerSnapshot, PowerupId, PowerupKind,
    PowerupSnapshot, SystemId, SystemSnapshot, UpgradeKind,
};

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Vec3,
    pub(crate) yaw: f32,
    pub(crate) pitch: f32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) ammo: u32,
    pub(crate) max_ammo: u32,
    pub(crate) shield: u32,
    pub(crate) max_shield: u32,
    pub(crate) fire_interval: f32,
    pub(crate) last_shot_at: Option<Duration>,
}

impl Player {
    pub(crate) fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_START_HEALTH,
            ammo: PLAYER_START_AMMO,
            max_ammo: PLAYER_START_AMMO,
            shield: PLAYER_START_SHIELD,
            max_shield: PLAYER_START_SHIELD,
            fire_interval: PLAYER_START_FIRE_INTERVAL,
            last_shot_at: None,
        }
    }

    pub(crate) fn horizontal(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Rotates the view, wrapping yaw into `[0, 360)` and clamping pitch.
    pub(crate) fn turn(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(360.0);
        self.pitch = (self.pitch + pitch_delta).clamp(PITCH_MIN, PITCH_MAX);
    }

    /// Unit vector along yaw and pitch.
    pub(crate) fn aim_direction(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            yaw.sin() * pitch.cos(),
            pitch.sin(),
        )
    }

    pub(crate) fn weapon_ready(&self, now: Duration) -> bool {
        self.last_shot_at.map_or(true, |last| {
            now.saturating_sub(last).as_secs_f32() >= self.fire_interval
        })
    }

    pub(crate) fn collect(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Health => {
                self.health = self
                    .health
                    .saturating_add(HEALTH_PACK_AMOUNT)
                    .min(self.max_health);
            }
            PowerupKind::Ammo => {
                self.ammo = self.ammo.saturating_add(AMMO_PACK_AMOUNT).min(self.max_ammo);
            }
        }
    }

    pub(crate) fn apply_upgrade(&mut self, upgrade: UpgradeKind) {
        match upgrade {
            UpgradeKind::RapidFire => {
                self.fire_interval = (self.fire_interval * UpgradeKind::FIRE_INTERVAL_FACTOR)
                    .max(UpgradeKind::FIRE_INTERVAL_FLOOR);
            }
            UpgradeKind::AmmoCapacity => {
                self.max_ammo = self.max_ammo.saturating_add(UpgradeKind::AMMO_CAPACITY_STEP);
                self.ammo = self.max_ammo;
            }
            UpgradeKind::Hull => {
                self.max_health = self.max_health.saturating_add(UpgradeKind::HULL_STEP);
                self.health = self.max_health;
            }
            UpgradeKind::Shield => {
                self.max_shield = self.max_shield.saturating_add(UpgradeKind::SHIELD_STEP);
                self.shield = self.max_shield;
            }
        }
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            health: self.health,
            max_health: self.max_health,
            ammo: self.ammo,
            max_ammo: self.max_ammo,
            shield: self.shield,
            max_shield: self.max_shield,
            fire_interval: self.fire_interval,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec3,
    pub(crate) facing: f32,
    pub(crate) health: u32,
    pub(crate) last_shot_at: Option<Duration>,
    pub(crate) last_contact_at: Option<Duration>,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, kind: EnemyKind, position: Vec2, facing: f32) -> Self {
        let profile = kind.profile();
        Self {
            id,
            kind,
            position: position.extend(profile.altitude),
            facing: facing.rem_euclid(360.0),
            health: profile.health,
            last_shot_at: None,
            last_contact_at: None,
        }
    }

    pub(crate) fn horizontal(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Turns to face along the provided offset; a zero offset leaves facing unchanged.
    pub(crate) fn face(&mut self, offset: Vec2) {
        if offset != Vec2::ZERO {
            self.facing = offset.y.atan2(offset.x).to_degrees().rem_euclid(360.0);
        }
    }

    pub(crate) fn facing_direction(&self) -> Vec2 {
        let radians = self.facing.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            facing: self.facing,
            health: self.health,
        }
    }
}

/// Elapsed-time gate shared by per-enemy cooldowns; `None` means never triggered.
pub(crate) fn cooldown_elapsed(last: Option<Duration>, now: Duration, interval: Duration) -> bool {
    last.map_or(true, |last| now.saturating_sub(last) >= interval)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PlayerBullet {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct EnemyBullet {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) damage: u32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Powerup {
    pub(crate) id: PowerupId,
    pub(crate) kind: PowerupKind,
    pub(crate) position: Vec2,
    pub(crate) rotation: f32,
}

impl Powerup {
    pub(crate) fn snapshot(&self) -> PowerupSnapshot {
        PowerupSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            rotation: self.rotation,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct RepairableSystem {
    pub(crate) id: SystemId,
    pub(crate) cell: CellCoord,
    pub(crate) position: Vec2,
    repaired: bool,
}

impl RepairableSystem {
    pub(crate) fn new(id: SystemId, cell: CellCoord, position: Vec2) -> Self {
        Self {
            id,
            cell,
            position,
            repaired: false,
        }
    }

    pub(crate) fn is_repaired(&self) -> bool {
        self.repaired
    }

    /// Marks the system repaired. There is deliberately no way back.
    pub(crate) fn mark_repaired(&mut self) {
        self.repaired = true;
    }

    pub(crate) fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            id: self.id,
            cell: self.cell,
            repaired: self.repaired,
        }
    }
}

/// Repair underway: which system and how much work has accumulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Repair {
    pub(crate) system: SystemId,
    pub(crate) elapsed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_wraps_yaw_and_clamps_pitch() {
        let mut player = Player::new();
        player.turn(-30.0, 200.0);
        assert!((player.yaw - 330.0).abs() < 1e-4);
        assert_eq!(player.pitch, PITCH_MAX);

        player.turn(390.0, -500.0);
        assert!((player.yaw - 0.0).abs() < 1e-3 || (player.yaw - 360.0).abs() < 1e-3);
        assert_eq!(player.pitch, PITCH_MIN);
    }

    #[test]
    fn rapid_fire_respects_floor() {
        let mut player = Player::new();
        for _ in 0..20 {
            player.apply_upgrade(UpgradeKind::RapidFire);
        }
        assert!((player.fire_interval - UpgradeKind::FIRE_INTERVAL_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn capacity_upgrades_refill_to_new_maximum() {
        let mut player = Player::new();
        player.ammo = 3;
        player.health = 40;
        player.apply_upgrade(UpgradeKind::AmmoCapacity);
        player.apply_upgrade(UpgradeKind::Hull);
        player.apply_upgrade(UpgradeKind::Shield);

        assert_eq!((player.ammo, player.max_ammo), (30, 30));
        assert_eq!((player.health, player.max_health), (125, 125));
        assert_eq!((player.shield, player.max_shield), (50, 50));
    }

    #[test]
    fn pickups_cap_at_maximum() {
        let mut player = Player::new();
        player.health = 90;
        player.ammo = 15;
        player.collect(PowerupKind::Health);
        player.collect(PowerupKind::Ammo);
        assert_eq!(player.health, player.max_health);
        assert_eq!(player.ammo, player.max_ammo);
    }

    #[test]
    fn enemies_spawn_at_their_hover_altitude() {
        let drone = Enemy::spawn(EnemyId::new(1), EnemyKind::Drone, Vec2::new(10.0, 20.0), -90.0);
        assert_eq!(drone.position, Vec3::new(10.0, 20.0, 100.0));
        assert!((drone.facing - 270.0).abs() < 1e-4);
        assert_eq!(drone.health, 15);
    }

    #[test]
    fn cooldown_starts_ready() {
        let interval = Duration::from_millis(500);
        assert!(cooldown_elapsed(None, Duration::ZERO, interval));
        assert!(!cooldown_elapsed(
            Some(Duration::from_millis(100)),
            Duration::from_millis(599),
            interval
        ));
        assert!(cooldown_elapsed(
            Some(Duration::from_millis(100)),
            Duration::from_millis(600),
            interval
        ));
    }
}
