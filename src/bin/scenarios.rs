//! Headless scenario runner.
//!
//! Usage: `scenarios [-v|-vv] [ball_pit|dash|turret|sight]`

use std::env;
use std::error::Error;

use tile_physics::*;

const ARENA: [&str; 12] = [
    "############",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "############",
];

fn init_logging(verbosity: usize) -> Result<(), Box<dyn Error>> {
    use simplelog::LevelFilter::{Debug, Info, Off, Trace};
    let level = match verbosity {
        0 => Info,
        1 => Debug,
        _ => Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbosity = args
        .iter()
        .filter(|a| a.starts_with('-'))
        .map(|a| match a.as_str() {
            "-v" | "--verbose" => 1,
            "-vv" => 2,
            _ => 0,
        })
        .sum();
    init_logging(verbosity)?;

    let scenario = args.iter().find(|a| !a.starts_with('-')).map_or("ball_pit", String::as_str);
    println!("Running scenario: {}", scenario);

    match scenario {
        "ball_pit" => run_ball_pit(),
        "dash" => run_dash(),
        "turret" => run_turret(),
        "sight" => run_sight(),
        _ => println!("Unknown scenario: {}. Available: ball_pit, dash, turret, sight", scenario),
    }
    Ok(())
}

fn arena() -> World {
    let config = PhysicsConfig::default();
    World::with_tiles(config, TileGrid::from_map(&ARENA, config.tile_size))
}

fn run_ball_pit() {
    let mut world = arena();
    let tile_size = world.config().tile_size;
    for row in 2..9 {
        for col in 2..9 {
            if (row + col) % 2 == 0 {
                world.add_body(Body::ball(col, row, tile_size));
            }
        }
    }
    if let Some(cue) = world.body_mut(BodyId(0)) {
        cue.push_velocity = Vec2::new(24.0, 18.0);
    }

    println!("Simulating ball pit with {} bodies", world.len());
    let mut clock = FrameClock::new();
    for frame in 0..180 {
        let reports = clock.advance(&mut world, 1000.0 / 60.0);
        if frame % 30 == 0 {
            let contacts: usize = reports.iter().map(|r| r.contacts.len()).sum();
            let energy: f64 = world.bodies().map(|(_, b)| b.push_speed()).sum();
            println!("Frame {}: {} contacts, total push speed {:.2}", frame, contacts, energy);
        }
    }
    println!("Ball pit simulation finished.");
}

fn run_dash() {
    let mut world = arena();
    let tile_size = world.config().tile_size;
    let hero = world.add_body(Body::actor(2, 5, tile_size));
    world.add_body(Body::ball(6, 5, tile_size));

    let script = [
        (0, Intent::of(ActionKind::Move, Vec2::new(1.0, 0.0))),
        (20, Intent::of(ActionKind::Dash, Vec2::new(1.0, 0.0))),
        (40, Intent::of(ActionKind::Charging, Vec2::ZERO)),
        (100, Intent::of(ActionKind::Skill, Vec2::new(-1.0, 0.0))),
    ];

    let dt = world.config().baseline_timestep_ms;
    for tick in 0..160 {
        if let Some((_, intent)) = script.iter().find(|(at, _)| *at == tick) {
            if let Some(actor) = world.body_mut(hero).and_then(Body::as_actor_mut) {
                actor.intent = Some(intent.clone());
            }
        }
        world.step(dt);

        if let Some(body) = world.body(hero) {
            if tick % 10 == 0 {
                let action = body.as_actor().map(|a| &a.action);
                println!(
                    "Tick {}: hero at ({:.1}, {:.1}) facing {:?}, action {:?} {:?}",
                    tick,
                    body.position.x,
                    body.position.y,
                    body.facing(),
                    action.map(|a| a.kind),
                    action.and_then(|a| a.phase),
                );
            }
        }
    }
    println!("Dash scenario finished.");
}

fn run_turret() {
    let mut world = arena();
    let tile_size = world.config().tile_size;
    let target = world.add_body(Body::actor(8, 5, tile_size));
    let mut turret = Body::turret(3, 5, tile_size);
    turret.set_rotation(0.0);
    world.add_body(turret);

    let dt = world.config().baseline_timestep_ms;
    for tick in 0..300 {
        let report = world.step(dt);
        for shot in report.shots {
            let id = world.add_body(Body::shot(shot.position, shot.rotation, Some(shot.source), tile_size));
            println!("Tick {}: {:?} fired {:?}", tick, shot.source, id);
        }
        for (id, body) in world.remove_expired() {
            println!("Tick {}: {} {:?} expired", tick, body.label, id);
        }
    }

    let health = world.body(target).and_then(Body::vitals).map(|v| v.health);
    println!("Turret scenario finished. Target health: {:?}", health);
}

fn run_sight() {
    let mut world = arena();
    let tile_size = world.config().tile_size;
    let mut watcher = Body::actor(2, 2, tile_size);
    watcher.set_rotation(0.0);
    let watcher = world.add_body(watcher);
    world.add_body(Body::wall(5, 1, 1, 3, Some(Corner::SouthWest), tile_size));

    for step in 0..8 {
        if let Some(body) = world.body_mut(watcher) {
            body.set_rotation(step as f64 * std::f64::consts::FRAC_PI_4);
        }
        if let Some(sight) = world.line_of_sight(watcher) {
            println!(
                "Facing {:?} ({:.2} rad): sight ends at ({:.1}, {:.1}), blocked by {:?}",
                world.body(watcher).map(Body::facing),
                step as f64 * std::f64::consts::FRAC_PI_4,
                sight.end.x,
                sight.end.y,
                sight.blocker,
            );
        }
    }
}
