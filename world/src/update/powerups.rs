use station_siege_core::{
    tuning::{POWERUP_PICKUP_RADIUS, POWERUP_SPIN_RATE},
    Event,
};

use crate::World;

impl World {
    pub(super) fn update_powerups(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let position = self.player.horizontal();
        let player = &mut self.player;
        self.powerups.retain_mut(|powerup| {
            powerup.rotation = (powerup.rotation + POWERUP_SPIN_RATE * dt).rem_euclid(360.0);
            if powerup.position.distance(position) >= POWERUP_PICKUP_RADIUS {
                return true;
            }
            player.collect(powerup.kind);
            out_events.push(Event::PowerupCollected {
                powerup: powerup.id,
                kind: powerup.kind,
            });
            false
        });
    }
}
