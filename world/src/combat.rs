//! Damage resolution against the player.

use station_siege_core::{DamageSource, Event, GameOutcome};

use crate::World;

impl World {
    /// Applies damage to the player, draining the shield before health.
    pub(crate) fn strike_player(
        &mut self,
        source: DamageSource,
        damage: u32,
        out_events: &mut Vec<Event>,
    ) {
        let player = &mut self.player;
        let absorbed = player.shield.min(damage);
        player.shield -= absorbed;
        let dealt = (damage - absorbed).min(player.health);
        player.health -= dealt;
        let remaining_health = player.health;

        out_events.push(Event::PlayerDamaged {
            source,
            absorbed,
            dealt,
            remaining_health,
        });

        if remaining_health == 0 {
            self.end_campaign(GameOutcome::Defeated, out_events);
        }
    }
}

#[cfg(test)]
mod tests {
    use station_siege_core::{EnemyId, GamePhase};

    use super::*;
    use crate::query;

    #[test]
    fn shield_absorbs_before_health() {
        let mut world = World::new();
        world.player.shield = 10;
        world.player.max_shield = 50;
        let mut events = Vec::new();

        world.strike_player(DamageSource::Contact(EnemyId::new(3)), 15, &mut events);

        let player = query::player(&world);
        assert_eq!((player.shield, player.health), (0, 95));
        assert_eq!(
            events,
            vec![Event::PlayerDamaged {
                source: DamageSource::Contact(EnemyId::new(3)),
                absorbed: 10,
                dealt: 5,
                remaining_health: 95,
            }]
        );
    }

    #[test]
    fn lethal_damage_clamps_health_and_ends_game() {
        let mut world = World::new();
        world.player.health = 4;
        let mut events = Vec::new();

        world.strike_player(DamageSource::Projectile, 15, &mut events);

        assert_eq!(query::player(&world).health, 0);
        assert_eq!(query::phase(&world), GamePhase::GameOver);
        assert_eq!(query::outcome(&world), Some(GameOutcome::Defeated));
    }
}
