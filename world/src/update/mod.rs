//! Per-frame entity update engine.
//!
//! A tick runs its passes in a fixed order: player, enemies, player bullets,
//! enemy bullets, powerups. Removals happen in place inside the owning pass,
//! and the remaining passes are skipped as soon as the phase leaves
//! [`GamePhase::Playing`].

use std::time::Duration;

use station_siege_core::{tuning::MAX_STEP, Event, GamePhase, PlayerControls};

use crate::World;

mod enemies;
mod player;
mod powerups;
mod projectiles;

impl World {
    pub(crate) fn tick(
        &mut self,
        dt: Duration,
        controls: PlayerControls,
        out_events: &mut Vec<Event>,
    ) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let dt = dt.min(MAX_STEP);
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });
        let seconds = dt.as_secs_f32();

        self.update_player(seconds, controls, out_events);
        if self.phase != GamePhase::Playing {
            return;
        }
        self.update_enemies(seconds, out_events);
        if self.phase != GamePhase::Playing {
            return;
        }
        self.update_player_bullets(seconds, out_events);
        self.update_enemy_bullets(seconds, out_events);
        if self.phase != GamePhase::Playing {
            return;
        }
        self.update_powerups(seconds, out_events);
    }
}
