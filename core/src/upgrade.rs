//! Upgrade catalogue offered between levels.

use serde::{Deserialize, Serialize};

/// Upgrades the player can buy after clearing a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Shortens the time between shots.
    RapidFire,
    /// Enlarges the magazine and refills it.
    AmmoCapacity,
    /// Raises maximum health and heals to full.
    Hull,
    /// Raises shield capacity and charges it to full.
    Shield,
}

impl UpgradeKind {
    /// Every upgrade in menu order.
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::RapidFire,
        UpgradeKind::AmmoCapacity,
        UpgradeKind::Hull,
        UpgradeKind::Shield,
    ];

    /// Multiplier applied to the fire interval by [`UpgradeKind::RapidFire`].
    pub const FIRE_INTERVAL_FACTOR: f32 = 0.8;
    /// Shortest fire interval [`UpgradeKind::RapidFire`] can reach, in seconds.
    pub const FIRE_INTERVAL_FLOOR: f32 = 0.1;
    /// Magazine growth granted by [`UpgradeKind::AmmoCapacity`].
    pub const AMMO_CAPACITY_STEP: u32 = 10;
    /// Health growth granted by [`UpgradeKind::Hull`].
    pub const HULL_STEP: u32 = 25;
    /// Shield growth granted by [`UpgradeKind::Shield`].
    pub const SHIELD_STEP: u32 = 50;

    /// Maps a one-based menu choice onto an upgrade.
    ///
    /// Choices outside `1..=4` yield `None` so callers can silently ignore them.
    #[must_use]
    pub const fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::RapidFire),
            2 => Some(Self::AmmoCapacity),
            3 => Some(Self::Hull),
            4 => Some(Self::Shield),
            _ => None,
        }
    }

    /// Price of the upgrade in points.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::RapidFire => 50,
            Self::AmmoCapacity => 30,
            Self::Hull => 40,
            Self::Shield => 80,
        }
    }

    /// Human readable name used in logs and menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RapidFire => "rapid fire",
            Self::AmmoCapacity => "ammo capacity",
            Self::Hull => "hull plating",
            Self::Shield => "shield",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_map_in_order() {
        let mapped: Vec<_> = (1..=4).filter_map(UpgradeKind::from_choice).collect();
        assert_eq!(mapped, UpgradeKind::ALL.to_vec());
    }

    #[test]
    fn out_of_range_choices_are_ignored() {
        assert_eq!(UpgradeKind::from_choice(0), None);
        assert_eq!(UpgradeKind::from_choice(5), None);
    }

    #[test]
    fn shield_is_the_most_expensive_upgrade() {
        let most_expensive = UpgradeKind::ALL
            .into_iter()
            .max_by_key(|upgrade| upgrade.cost())
            .expect("catalogue is not empty");
        assert_eq!(most_expensive, UpgradeKind::Shield);
    }
}
