//! Scripted player that drives headless runs through the controls system.
//!
//! Each frame the autopilot inspects the world snapshot and produces the
//! same [`FrameInput`] a human would: mouse movement to turn, `w` to walk,
//! `r` to repair, clicks to shoot and menu keys between levels. It routes to
//! the nearest unrepaired system with a breadth-first search over open cells
//! and stops to shoot any enemy it can see within range.

use std::{collections::VecDeque, time::Duration};

use glam::{Vec2, Vec3};
use station_siege_core::{
    tuning::{MUZZLE_HEIGHT, REPAIR_RADIUS},
    CellCode, CellCoord, EnemySnapshot, GamePhase, GridView, UpgradeKind, WorldSnapshot,
};
use station_siege_system_controls::{FrameInput, Key, MouseButton};

const ENGAGE_RANGE: f32 = 400.0;
const REPAIR_REACH: f32 = REPAIR_RADIUS - 10.0;
const WALK_CONE: f32 = 30.0;
const FIRE_CONE: f32 = 4.0;
const UPGRADE_PREFERENCE: [UpgradeKind; 4] = [
    UpgradeKind::Hull,
    UpgradeKind::RapidFire,
    UpgradeKind::AmmoCapacity,
    UpgradeKind::Shield,
];

#[derive(Debug)]
pub(crate) struct Autopilot {
    mouse_sensitivity: f32,
    restart_on_game_over: bool,
    last_shot_at: Option<Duration>,
}

impl Autopilot {
    pub(crate) fn new(mouse_sensitivity: f32, restart_on_game_over: bool) -> Self {
        Self {
            mouse_sensitivity,
            restart_on_game_over,
            last_shot_at: None,
        }
    }

    /// Chooses the input for the next frame.
    pub(crate) fn next_input(
        &mut self,
        snapshot: &WorldSnapshot,
        grid: GridView<'_>,
        clock: Duration,
    ) -> FrameInput {
        let mut input = FrameInput::default();
        match snapshot.phase {
            GamePhase::Playing => self.play(snapshot, grid, clock, &mut input),
            GamePhase::LevelComplete => input.pressed.push(Key::Space),
            GamePhase::Upgrading => input.pressed.push(upgrade_choice(snapshot.points_available)),
            GamePhase::GameOver => {
                self.last_shot_at = None;
                if self.restart_on_game_over {
                    input.pressed.push(Key::Char('r'));
                }
            }
        }
        input
    }

    fn play(
        &mut self,
        snapshot: &WorldSnapshot,
        grid: GridView<'_>,
        clock: Duration,
        input: &mut FrameInput,
    ) {
        let player = snapshot.player;
        let position = player.position.truncate();

        let next_system = snapshot
            .systems
            .iter()
            .filter(|system| !system.repaired)
            .map(|system| grid.cell_center(system.cell))
            .min_by(|a, b| a.distance(position).total_cmp(&b.distance(position)));

        let at_system = next_system.is_some_and(|target| target.distance(position) < REPAIR_REACH);
        if snapshot.repair.is_some() || at_system {
            input.held.push(Key::Char('r'));
            return;
        }

        if player.ammo > 0 {
            if let Some(target) = visible_enemy(snapshot, grid) {
                let muzzle = player.position + Vec3::Z * MUZZLE_HEIGHT;
                let offset = target.position - muzzle;
                let yaw = heading(offset.truncate());
                let pitch = offset.z.atan2(offset.truncate().length()).to_degrees();
                let yaw_error = wrap_degrees(yaw - player.yaw);
                self.look(input, yaw_error, pitch - player.pitch);

                let ready = self.last_shot_at.map_or(true, |last| {
                    clock.saturating_sub(last).as_secs_f32() >= player.fire_interval
                });
                if ready && yaw_error.abs() < FIRE_CONE {
                    input.clicks.push(MouseButton::Left);
                    self.last_shot_at = Some(clock);
                }
                return;
            }
        }

        let Some(target) = next_system else {
            return;
        };
        let waypoint = next_waypoint(grid, position, target).unwrap_or(target);
        let yaw_error = wrap_degrees(heading(waypoint - position) - player.yaw);
        self.look(input, yaw_error, -player.pitch);
        if yaw_error.abs() < WALK_CONE {
            input.held.push(Key::Char('w'));
        }
    }

    fn look(&self, input: &mut FrameInput, yaw_error: f32, pitch_error: f32) {
        if self.mouse_sensitivity == 0.0 {
            return;
        }
        input.mouse_delta = Vec2::new(
            -yaw_error / self.mouse_sensitivity,
            -pitch_error / self.mouse_sensitivity,
        );
    }
}

fn upgrade_choice(points: u32) -> Key {
    UPGRADE_PREFERENCE
        .into_iter()
        .find(|upgrade| upgrade.cost() <= points)
        .and_then(|upgrade| UpgradeKind::ALL.iter().position(|kind| *kind == upgrade))
        .and_then(|index| char::from_digit(index as u32 + 1, 10))
        .map_or(Key::Space, Key::Char)
}

fn heading(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}

fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

fn visible_enemy(snapshot: &WorldSnapshot, grid: GridView<'_>) -> Option<EnemySnapshot> {
    let position = snapshot.player.position.truncate();
    snapshot
        .enemies
        .iter()
        .filter(|enemy| {
            let target = enemy.position.truncate();
            target.distance(position) <= ENGAGE_RANGE && line_of_sight(grid, position, target)
        })
        .min_by(|a, b| {
            let a = a.position.truncate().distance(position);
            let b = b.position.truncate().distance(position);
            a.total_cmp(&b)
        })
        .copied()
}

fn line_of_sight(grid: GridView<'_>, from: Vec2, to: Vec2) -> bool {
    let step = grid.cell_size() / 4.0;
    if step <= 0.0 {
        return false;
    }
    let samples = (from.distance(to) / step).ceil() as u32;
    (1..samples).all(|sample| !grid.is_wall(from.lerp(to, sample as f32 / samples as f32)))
}

/// Center of the first cell on the shortest open path towards `target`.
fn next_waypoint(grid: GridView<'_>, from: Vec2, target: Vec2) -> Option<Vec2> {
    let start = grid.cell_at(from)?;
    let goal = grid.cell_at(target)?;
    if start == goal {
        return Some(target);
    }

    let (columns, rows) = grid.dimensions();
    let width = columns as usize;
    let index = |cell: CellCoord| cell.row() as usize * width + cell.column() as usize;
    let mut came_from: Vec<Option<CellCoord>> = vec![None; width * rows as usize];
    let mut frontier = VecDeque::from([start]);
    came_from[index(start)] = Some(start);

    while let Some(cell) = frontier.pop_front() {
        if cell == goal {
            let mut step = cell;
            while let Some(previous) = came_from[index(step)] {
                if previous == start {
                    return Some(grid.cell_center(step));
                }
                step = previous;
            }
            return None;
        }

        for neighbour in neighbours(cell, columns, rows) {
            let open = grid
                .cell(neighbour)
                .is_some_and(|code| code != CellCode::Wall);
            if open && came_from[index(neighbour)].is_none() {
                came_from[index(neighbour)] = Some(cell);
                frontier.push_back(neighbour);
            }
        }
    }
    None
}

fn neighbours(cell: CellCoord, columns: u32, rows: u32) -> impl Iterator<Item = CellCoord> {
    let (column, row) = (cell.column(), cell.row());
    [
        column.checked_sub(1).map(|c| CellCoord::new(c, row)),
        (column + 1 < columns).then(|| CellCoord::new(column + 1, row)),
        row.checked_sub(1).map(|r| CellCoord::new(column, r)),
        (row + 1 < rows).then(|| CellCoord::new(column, row + 1)),
    ]
    .into_iter()
    .flatten()
}
