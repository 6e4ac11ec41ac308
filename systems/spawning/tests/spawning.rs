use std::time::Duration;

use glam::{Vec2, Vec3};
use station_siege_core::{
    tuning::{CELL_SIZE, MUZZLE_HEIGHT},
    CellCode, Command, EnemyKind, Event, PlayerControls,
};
use station_siege_system_spawning::{Config, Spawning};
use station_siege_world::{self as world, query, LevelCatalogue, LevelLayout, World};

fn pump(world: &mut World, spawning: &mut Spawning, command: Command, log: &mut Vec<Event>) {
    let mut pending = vec![command];
    while let Some(command) = pending.pop() {
        let mut events = Vec::new();
        world::apply(world, command, &mut events);
        let mut commands = Vec::new();
        spawning.handle(&events, query::grid(world), &mut commands);
        pending.extend(commands.into_iter().rev());
        log.extend(events);
    }
}

#[test]
fn level_load_places_enemies_on_open_floor_away_from_player() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::with_seed(0x5eed_0001));
    let mut log = Vec::new();

    pump(&mut world, &mut spawning, Command::StartNewGame, &mut log);

    let start = query::player(&world).position.truncate();
    let enemies = query::enemies(&world);
    assert_eq!(
        enemies.len() as u32 + spawning.abandoned_placements(),
        5,
        "level one spawns three scouts and two drones"
    );
    let grid = query::grid(&world);
    for enemy in &enemies {
        let position = enemy.position.truncate();
        let cell = grid.cell_at(position).expect("enemy inside level");
        assert_eq!(grid.cell(cell), Some(CellCode::Empty));
        assert!(position.distance(start) >= 4.0 * CELL_SIZE);
        assert!((0.0..360.0).contains(&enemy.facing));
    }
    for drone in enemies.iter().filter(|enemy| enemy.kind == EnemyKind::Drone) {
        assert_eq!(drone.position.z, 100.0);
    }
}

#[test]
fn later_levels_bring_more_and_tougher_enemies() {
    let mut spawning = Spawning::new(Config::with_seed(11));
    let catalogue = LevelCatalogue::builtin();
    let mut commands = Vec::new();

    spawning.handle(
        &[Event::LevelLoaded {
            level: 3,
            player_start: Vec2::new(150.0, 150.0),
        }],
        catalogue.layout(3).view(),
        &mut commands,
    );

    let snipers = commands
        .iter()
        .filter(|command| {
            matches!(
                command,
                Command::SpawnEnemy {
                    kind: EnemyKind::Sniper,
                    ..
                }
            )
        })
        .count();
    assert_eq!(commands.len() as u32 + spawning.abandoned_placements(), 14);
    assert!(snipers <= 1);
}

#[test]
fn cramped_levels_skip_enemies_instead_of_failing() {
    let layout = LevelLayout::from_rows(&[[1u8, 1, 1, 1], [1, 0, 0, 1], [1, 1, 1, 1]])
        .expect("layout is rectangular");
    let mut spawning = Spawning::new(Config::with_seed(3));
    let mut commands = Vec::new();

    spawning.handle(
        &[Event::LevelLoaded {
            level: 1,
            player_start: Vec2::new(150.0, 150.0),
        }],
        layout.view(),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(spawning.abandoned_placements(), 5);
}

#[test]
fn same_seed_produces_same_commands() {
    let catalogue = LevelCatalogue::builtin();
    let events = [
        Event::LevelLoaded {
            level: 2,
            player_start: Vec2::new(150.0, 150.0),
        },
        Event::EnemyKilled {
            enemy: station_siege_core::EnemyId::new(4),
            kind: EnemyKind::Tank,
            position: Vec2::new(640.0, 320.0),
            reward: 20,
        },
    ];

    let run = |seed| {
        let mut spawning = Spawning::new(Config::with_seed(seed));
        let mut commands = Vec::new();
        spawning.handle(&events, catalogue.layout(2).view(), &mut commands);
        commands
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

fn aim_at(world: &mut World, target: Vec3, log: &mut Vec<Event>) {
    let player = query::player(world);
    let muzzle = player.position + Vec3::Z * MUZZLE_HEIGHT;
    let offset = target - muzzle;
    let yaw = offset.y.atan2(offset.x).to_degrees();
    let pitch = offset.z.atan2(offset.truncate().length()).to_degrees();
    world::apply(
        world,
        Command::Aim {
            yaw_delta: yaw - player.yaw,
            pitch_delta: pitch - player.pitch,
        },
        log,
    );
}

#[test]
fn two_hits_destroy_a_scout_and_drop_a_powerup() {
    let corridor: [[u8; 10]; 4] = [
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 0, 2, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    ];
    let layout = LevelLayout::from_rows(&corridor).expect("corridor is rectangular");
    let mut world =
        World::with_catalogue(LevelCatalogue::new(vec![layout]).expect("catalogue has levels"));
    let mut spawning = Spawning::new(Config::with_seed(42));
    let mut log = Vec::new();

    pump(
        &mut world,
        &mut spawning,
        Command::SpawnEnemy {
            kind: EnemyKind::Scout,
            position: Vec2::new(450.0, 150.0),
            facing: 180.0,
        },
        &mut log,
    );

    for _ in 0..300 {
        let Some(scout) = query::enemies(&world).first().copied() else {
            break;
        };
        aim_at(&mut world, scout.position, &mut log);
        pump(&mut world, &mut spawning, Command::FireWeapon, &mut log);
        pump(
            &mut world,
            &mut spawning,
            Command::Tick {
                dt: Duration::from_millis(10),
                controls: PlayerControls::default(),
            },
            &mut log,
        );
    }

    let damaged: Vec<_> = log
        .iter()
        .filter_map(|event| match event {
            Event::EnemyDamaged {
                remaining_health, ..
            } => Some(*remaining_health),
            _ => None,
        })
        .collect();
    assert_eq!(damaged, vec![5]);

    let kills: Vec<_> = log
        .iter()
        .filter_map(|event| match event {
            Event::EnemyKilled {
                position, reward, ..
            } => Some((*position, *reward)),
            _ => None,
        })
        .collect();
    assert_eq!(kills.len(), 1);
    let (last_position, reward) = kills[0];
    assert_eq!(reward, 10);

    assert!(query::enemies(&world).is_empty());
    assert_eq!(query::score(&world), 10);
    assert_eq!(query::points_available(&world), 10);
    let powerups = query::powerups(&world);
    assert_eq!(powerups.len(), 1);
    assert_eq!(powerups[0].position, last_position);
}
