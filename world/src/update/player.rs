use glam::Vec2;
use station_siege_core::{
    tuning::{PLAYER_SPEED, REPAIR_DURATION, REPAIR_RADIUS},
    Event, PlayerControls,
};

use crate::{entities::Repair, World};

impl World {
    pub(super) fn update_player(
        &mut self,
        dt: f32,
        controls: PlayerControls,
        out_events: &mut Vec<Event>,
    ) {
        if self.repair.is_none() {
            self.move_player(dt, controls);
        }

        match self.repair {
            Some(repair) => self.continue_repair(repair, dt, controls, out_events),
            None if controls.repair_held() => self.start_repair(out_events),
            None => {}
        }
    }

    fn move_player(&mut self, dt: f32, controls: PlayerControls) {
        let yaw = self.player.yaw.to_radians();
        let forward = Vec2::new(yaw.cos(), yaw.sin());
        let right = Vec2::new(-yaw.sin(), yaw.cos());
        let intent =
            forward * f32::from(controls.forward()) + right * f32::from(controls.strafe());
        let Some(direction) = intent.try_normalize() else {
            return;
        };

        let current = self.player.horizontal();
        let catalogue = &self.catalogue;
        let level = self.level;
        let next = slide(current, direction * PLAYER_SPEED * dt, |point| {
            catalogue.is_wall(level, point)
        });
        self.player.position.x = next.x;
        self.player.position.y = next.y;
    }

    fn continue_repair(
        &mut self,
        repair: Repair,
        dt: f32,
        controls: PlayerControls,
        out_events: &mut Vec<Event>,
    ) {
        let player = self.player.horizontal();
        let target = self.systems.iter_mut().find(|system| {
            system.id == repair.system
                && !system.is_repaired()
                && system.position.distance(player) < REPAIR_RADIUS
        });

        let Some(system) = target.filter(|_| controls.repair_held()) else {
            log::debug!("repair of system {} interrupted", repair.system.get());
            self.repair = None;
            out_events.push(Event::RepairInterrupted {
                system: repair.system,
            });
            return;
        };

        let elapsed = repair.elapsed + dt;
        if elapsed < REPAIR_DURATION {
            self.repair = Some(Repair { elapsed, ..repair });
            return;
        }

        system.mark_repaired();
        self.repair = None;
        log::info!("system {} repaired", repair.system.get());
        out_events.push(Event::SystemRepaired {
            system: repair.system,
        });
        self.check_level_complete(out_events);
    }

    fn start_repair(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player.horizontal();
        let mut closest = REPAIR_RADIUS * REPAIR_RADIUS;
        let mut target = None;
        for system in self.systems.iter().filter(|system| !system.is_repaired()) {
            let distance_sq = system.position.distance_squared(player);
            if distance_sq < closest {
                closest = distance_sq;
                target = Some(system.id);
            }
        }

        if let Some(system) = target {
            log::debug!("repair of system {} started", system.get());
            self.repair = Some(Repair {
                system,
                elapsed: 0.0,
            });
            out_events.push(Event::RepairStarted { system });
        }
    }
}

/// Moves by `step` unless blocked, falling back to the x-only and then the
/// y-only component so movement slides along walls.
fn slide(current: Vec2, step: Vec2, is_wall: impl Fn(Vec2) -> bool) -> Vec2 {
    let full = current + step;
    if !is_wall(full) {
        return full;
    }
    let along_x = Vec2::new(full.x, current.y);
    if !is_wall(along_x) {
        return along_x;
    }
    let along_y = Vec2::new(current.x, full.y);
    if !is_wall(along_y) {
        return along_y;
    }
    current
}
