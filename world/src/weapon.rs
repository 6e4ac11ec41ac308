//! Player fire and command-driven spawning.

use glam::{Vec2, Vec3};
use station_siege_core::{
    tuning::{BULLET_SPEED, MUZZLE_HEIGHT},
    EnemyId, EnemyKind, Event, FireRejection, GamePhase, PowerupId, PowerupKind, SpawnRejection,
};

use crate::{
    entities::{Enemy, PlayerBullet, Powerup},
    World,
};

impl World {
    pub(crate) fn fire_weapon(&mut self, out_events: &mut Vec<Event>) {
        let rejection = if self.phase != GamePhase::Playing {
            Some(FireRejection::NotPlaying)
        } else if self.repair.is_some() {
            Some(FireRejection::Repairing)
        } else if self.player.ammo == 0 {
            Some(FireRejection::OutOfAmmo)
        } else if !self.player.weapon_ready(self.clock) {
            Some(FireRejection::Cooldown)
        } else {
            None
        };

        if let Some(reason) = rejection {
            log::debug!("shot refused: {reason}");
            out_events.push(Event::FireRejected { reason });
            return;
        }

        let muzzle = self.player.position + Vec3::Z * MUZZLE_HEIGHT;
        self.player_bullets.push(PlayerBullet {
            position: muzzle,
            velocity: self.player.aim_direction() * BULLET_SPEED,
        });
        self.player.ammo -= 1;
        self.player.last_shot_at = Some(self.clock);
        out_events.push(Event::WeaponFired {
            ammo_remaining: self.player.ammo,
        });
    }

    pub(crate) fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        position: Vec2,
        facing: f32,
        out_events: &mut Vec<Event>,
    ) {
        let rejection = if self.phase != GamePhase::Playing {
            Some(SpawnRejection::NotPlaying)
        } else if self.catalogue.is_wall(self.level, position) {
            Some(SpawnRejection::InsideWall)
        } else {
            None
        };

        if let Some(reason) = rejection {
            log::debug!("{} placement refused: {reason}", kind.label());
            out_events.push(Event::EnemySpawnRejected { kind, reason });
            return;
        }

        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        let enemy = Enemy::spawn(id, kind, position, facing);
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            position: enemy.position,
        });
        self.enemies.push(enemy);
    }

    pub(crate) fn spawn_powerup(
        &mut self,
        kind: PowerupKind,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let id = PowerupId::new(self.next_powerup_id);
        self.next_powerup_id = self.next_powerup_id.wrapping_add(1);
        self.powerups.push(Powerup {
            id,
            kind,
            position,
            rotation: 0.0,
        });
        out_events.push(Event::PowerupSpawned {
            powerup: id,
            kind,
            position,
        });
    }
}
