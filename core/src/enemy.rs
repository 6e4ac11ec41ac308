//! Immutable enemy type catalogue.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Types of enemies that can inhabit a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile melee enemy.
    Scout,
    /// Slow, durable melee enemy.
    Tank,
    /// Stationary ranged enemy.
    Sniper,
    /// Hovering melee enemy.
    Drone,
}

/// Static per-type properties shared by every enemy of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    /// Health a freshly spawned enemy starts with.
    pub health: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage dealt on contact, and by bullets for ranged enemies.
    pub damage: u32,
    /// Score and points awarded when the enemy is destroyed.
    pub score_value: u32,
    /// Visual size used by renderers.
    pub size: f32,
    /// Collision radius.
    pub radius: f32,
    /// Maximum distance at which a ranged enemy opens fire; zero for melee types.
    pub shoot_range: f32,
    /// Minimum time between two shots of a ranged enemy.
    pub fire_interval: Duration,
    /// Constant height the enemy hovers at; zero for ground types.
    pub altitude: f32,
}

const SCOUT: EnemyProfile = EnemyProfile {
    health: 20,
    speed: 110.0,
    damage: 5,
    score_value: 10,
    size: 15.0,
    radius: 18.0,
    shoot_range: 0.0,
    fire_interval: Duration::ZERO,
    altitude: 0.0,
};

const TANK: EnemyProfile = EnemyProfile {
    health: 50,
    speed: 60.0,
    damage: 10,
    score_value: 20,
    size: 30.0,
    radius: 30.0,
    shoot_range: 0.0,
    fire_interval: Duration::ZERO,
    altitude: 0.0,
};

const SNIPER: EnemyProfile = EnemyProfile {
    health: 30,
    speed: 0.0,
    damage: 15,
    score_value: 30,
    size: 25.0,
    radius: 22.0,
    shoot_range: 600.0,
    fire_interval: Duration::from_millis(1_500),
    altitude: 0.0,
};

const DRONE: EnemyProfile = EnemyProfile {
    health: 15,
    speed: 80.0,
    damage: 10,
    score_value: 15,
    size: 20.0,
    radius: 20.0,
    shoot_range: 0.0,
    fire_interval: Duration::ZERO,
    altitude: 100.0,
};

impl EnemyKind {
    /// Every enemy kind in spawn order.
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Scout,
        EnemyKind::Tank,
        EnemyKind::Sniper,
        EnemyKind::Drone,
    ];

    /// Looks up the static properties of the kind.
    #[must_use]
    pub fn profile(self) -> &'static EnemyProfile {
        match self {
            Self::Scout => &SCOUT,
            Self::Tank => &TANK,
            Self::Sniper => &SNIPER,
            Self::Drone => &DRONE,
        }
    }

    /// Reports whether the kind attacks from range instead of chasing the player.
    #[must_use]
    pub fn is_ranged(self) -> bool {
        self.profile().shoot_range > 0.0
    }

    /// Human readable name used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Tank => "tank",
            Self::Sniper => "sniper",
            Self::Drone => "drone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_snipers_attack_from_range() {
        let ranged: Vec<_> = EnemyKind::ALL
            .into_iter()
            .filter(|kind| kind.is_ranged())
            .collect();
        assert_eq!(ranged, vec![EnemyKind::Sniper]);
    }

    #[test]
    fn drones_hover_while_ground_types_stay_level() {
        assert!((EnemyKind::Drone.profile().altitude - 100.0).abs() < f32::EPSILON);
        for kind in [EnemyKind::Scout, EnemyKind::Tank, EnemyKind::Sniper] {
            assert_eq!(kind.profile().altitude, 0.0, "{} should be grounded", kind.label());
        }
    }

    #[test]
    fn snipers_never_move() {
        assert_eq!(EnemyKind::Sniper.profile().speed, 0.0);
    }
}
