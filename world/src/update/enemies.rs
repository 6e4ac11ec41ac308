use station_siege_core::{
    tuning::{CONTACT_DAMAGE_INTERVAL, ENEMY_BULLET_SPEED, MELEE_HOLD_FACTOR, PLAYER_RADIUS},
    DamageSource, Event, GamePhase,
};

use crate::{
    entities::{cooldown_elapsed, EnemyBullet},
    World,
};

impl World {
    pub(super) fn update_enemies(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let player = self.player.horizontal();
        let now = self.clock;

        for index in 0..self.enemies.len() {
            let contact = {
                let enemy = &mut self.enemies[index];
                let profile = enemy.kind.profile();
                let offset = player - enemy.horizontal();
                let distance_sq = offset.length_squared();

                if enemy.kind.is_ranged() {
                    enemy.face(offset);
                    let in_range = distance_sq <= profile.shoot_range * profile.shoot_range;
                    if in_range && cooldown_elapsed(enemy.last_shot_at, now, profile.fire_interval)
                    {
                        enemy.last_shot_at = Some(now);
                        self.enemy_bullets.push(EnemyBullet {
                            position: enemy.horizontal(),
                            velocity: enemy.facing_direction() * ENEMY_BULLET_SPEED,
                            damage: profile.damage,
                        });
                        out_events.push(Event::EnemyFired { enemy: enemy.id });
                    }
                } else {
                    let hold = profile.radius * MELEE_HOLD_FACTOR;
                    if distance_sq > hold * hold && distance_sq > 0.0 {
                        enemy.face(offset);
                        let destination =
                            enemy.horizontal() + offset.normalize() * profile.speed * dt;
                        if !self.catalogue.is_wall(self.level, destination) {
                            enemy.position.x = destination.x;
                            enemy.position.y = destination.y;
                        }
                    }
                }

                let touching = distance_sq.sqrt() < PLAYER_RADIUS + profile.radius;
                if touching && cooldown_elapsed(enemy.last_contact_at, now, CONTACT_DAMAGE_INTERVAL)
                {
                    enemy.last_contact_at = Some(now);
                    Some((enemy.id, profile.damage))
                } else {
                    None
                }
            };

            if let Some((enemy, damage)) = contact {
                self.strike_player(DamageSource::Contact(enemy), damage, out_events);
                if self.phase != GamePhase::Playing {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use station_siege_core::{EnemyId, EnemyKind};

    use crate::{entities::Enemy, query, World};

    use super::*;

    fn world_with(kind: EnemyKind, position: Vec2) -> World {
        let mut world = World::new();
        world.player.position = Vec2::new(750.0, 750.0).extend(0.0);
        world
            .enemies
            .push(Enemy::spawn(EnemyId::new(40), kind, position, 0.0));
        world
    }

    #[test]
    fn melee_enemies_advance_toward_the_player() {
        let mut world = world_with(EnemyKind::Scout, Vec2::new(550.0, 750.0));
        let mut events = Vec::new();

        world.update_enemies(0.05, &mut events);

        let enemy = &query::enemies(&world)[0];
        assert!((enemy.position.x - 555.5).abs() < 1e-3);
        assert!(enemy.facing.abs() < 1e-4);
        assert!(events.is_empty());
    }

    #[test]
    fn contact_damage_respects_per_enemy_cooldown() {
        let mut world = world_with(EnemyKind::Tank, Vec2::new(740.0, 750.0));
        let mut events = Vec::new();

        world.update_enemies(0.05, &mut events);
        world.clock += Duration::from_millis(100);
        world.update_enemies(0.05, &mut events);

        assert_eq!(query::player(&world).health, 90);
        world.clock += Duration::from_millis(400);
        world.update_enemies(0.05, &mut events);
        assert_eq!(query::player(&world).health, 80);
    }

    #[test]
    fn snipers_hold_still_and_fire_when_in_range() {
        let mut world = world_with(EnemyKind::Sniper, Vec2::new(750.0, 350.0));
        let mut events = Vec::new();

        world.update_enemies(0.05, &mut events);
        world.update_enemies(0.05, &mut events);

        let enemy = &query::enemies(&world)[0];
        assert_eq!(enemy.position.truncate(), Vec2::new(750.0, 350.0));
        assert!((enemy.facing - 90.0).abs() < 1e-3);
        assert_eq!(events, vec![Event::EnemyFired { enemy: EnemyId::new(40) }]);

        let bullets = query::enemy_bullets(&world);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].damage, 15);
        assert!((bullets[0].velocity.y - ENEMY_BULLET_SPEED).abs() < 1e-2);
    }

    #[test]
    fn lethal_contact_ends_the_game() {
        let mut world = world_with(EnemyKind::Tank, Vec2::new(740.0, 750.0));
        world.player.health = 10;
        let mut events = Vec::new();

        world.update_enemies(0.05, &mut events);

        assert_eq!(query::phase(&world), GamePhase::GameOver);
    }
}
