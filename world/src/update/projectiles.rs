use station_siege_core::{
    tuning::{BULLET_DAMAGE, PLAYER_RADIUS},
    DamageSource, Event, GamePhase,
};

use crate::World;

impl World {
    pub(super) fn update_player_bullets(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.player_bullets.len() {
            let bullet = &mut self.player_bullets[index];
            bullet.position += bullet.velocity * dt;
            let position = bullet.position;

            if self.catalogue.is_wall(self.level, position.truncate()) {
                let _ = self.player_bullets.remove(index);
                continue;
            }

            let Some(target) = self.enemies.iter().position(|enemy| {
                enemy.position.distance(position) < enemy.kind.profile().radius
            }) else {
                index += 1;
                continue;
            };

            let _ = self.player_bullets.remove(index);
            self.damage_enemy(target, out_events);
        }
    }

    fn damage_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let enemy = &mut self.enemies[index];
        enemy.health = enemy.health.saturating_sub(BULLET_DAMAGE);
        if enemy.health > 0 {
            out_events.push(Event::EnemyDamaged {
                enemy: enemy.id,
                remaining_health: enemy.health,
            });
            return;
        }

        let enemy = self.enemies.remove(index);
        let reward = enemy.kind.profile().score_value;
        self.score = self.score.saturating_add(reward);
        self.points_available = self.points_available.saturating_add(reward);
        log::debug!("{} {} destroyed", enemy.kind.label(), enemy.id.get());
        out_events.push(Event::EnemyKilled {
            enemy: enemy.id,
            kind: enemy.kind,
            position: enemy.horizontal(),
            reward,
        });
    }

    pub(super) fn update_enemy_bullets(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let player = self.player.horizontal();
        let mut index = 0;
        while index < self.enemy_bullets.len() {
            let bullet = &mut self.enemy_bullets[index];
            bullet.position += bullet.velocity * dt;
            let position = bullet.position;
            let damage = bullet.damage;

            if self.catalogue.is_wall(self.level, position) {
                let _ = self.enemy_bullets.remove(index);
                continue;
            }

            if position.distance(player) < PLAYER_RADIUS {
                let _ = self.enemy_bullets.remove(index);
                self.strike_player(DamageSource::Projectile, damage, out_events);
                if self.phase != GamePhase::Playing {
                    return;
                }
                continue;
            }

            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use station_siege_core::{EnemyId, EnemyKind};

    use crate::{
        entities::{Enemy, EnemyBullet, PlayerBullet},
        query, World,
    };

    use super::*;

    #[test]
    fn bullets_stop_at_walls_without_damage() {
        let mut world = World::new();
        world.player_bullets.push(PlayerBullet {
            position: Vec3::new(110.0, 450.0, 33.0),
            velocity: Vec3::new(-700.0, 0.0, 0.0),
        });
        let mut events = Vec::new();

        world.update_player_bullets(0.05, &mut events);

        assert!(query::player_bullets(&world).is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn hovering_drones_need_a_raised_shot() {
        let mut world = World::new();
        world
            .enemies
            .push(Enemy::spawn(EnemyId::new(0), EnemyKind::Drone, Vec2::new(700.0, 700.0), 0.0));
        world.player_bullets.push(PlayerBullet {
            position: Vec3::new(690.0, 700.0, 33.0),
            velocity: Vec3::new(100.0, 0.0, 0.0),
        });
        let mut events = Vec::new();

        world.update_player_bullets(0.05, &mut events);

        assert_eq!(query::player_bullets(&world).len(), 1);
        assert_eq!(query::enemies(&world)[0].health, 15);
    }

    #[test]
    fn bullets_past_a_kill_fly_on_in_the_same_pass() {
        let mut world = World::new();
        world
            .enemies
            .push(Enemy::spawn(EnemyId::new(0), EnemyKind::Scout, Vec2::new(700.0, 700.0), 0.0));
        for offset in [0.0, 2.0, 4.0] {
            world.player_bullets.push(PlayerBullet {
                position: Vec3::new(690.0 + offset, 700.0, 0.0),
                velocity: Vec3::new(20.0, 0.0, 0.0),
            });
        }
        let mut events = Vec::new();

        world.update_player_bullets(0.05, &mut events);

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Event::EnemyDamaged {
                enemy: EnemyId::new(0),
                remaining_health: 5,
            }
        );
        assert!(matches!(
            events[1],
            Event::EnemyKilled {
                kind: EnemyKind::Scout,
                reward: 10,
                ..
            }
        ));
        assert!(query::enemies(&world).is_empty());
        assert_eq!(query::score(&world), 10);
        let survivors = query::player_bullets(&world);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].position, Vec3::new(695.0, 700.0, 0.0));
    }

    #[test]
    fn enemy_bullets_drain_shield_first() {
        let mut world = World::new();
        world.player.position = Vec3::new(700.0, 700.0, 0.0);
        world.player.shield = 5;
        world.enemy_bullets.push(EnemyBullet {
            position: Vec2::new(690.0, 700.0),
            velocity: Vec2::new(300.0, 0.0),
            damage: 15,
        });
        let mut events = Vec::new();

        world.update_enemy_bullets(0.05, &mut events);

        let player = query::player(&world);
        assert_eq!((player.shield, player.health), (0, 90));
        assert!(query::enemy_bullets(&world).is_empty());
    }
}
