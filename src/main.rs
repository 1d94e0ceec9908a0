use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use wildgrove_engine::ecs::components::{Facing, Player, Position};
use wildgrove_engine::{
    build_target_cell, create_world, movement_system, place_block, snapshot, InputSnapshot,
    MapConfig, ObstacleKind, Vec2,
};

/// Headless demo: seed a world, walk the player east for a while, build a
/// wall block in front of them, and log the resulting snapshot.
fn main() {
    tracing_subscriber::fmt::init();

    let map = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => match MapConfig::from_json(&text) {
                Ok(map) => map,
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                error!("failed to read {path}: {e}");
                std::process::exit(1);
            }
        },
        None => MapConfig::default(),
    };

    let seed: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    let (mut world, catalog) = match create_world(&map, &mut rng) {
        Ok(built) => built,
        Err(e) => {
            error!("world construction failed: {e}");
            std::process::exit(1);
        }
    };

    // Sprint east for 200 steps, facing the direction of travel.
    let input = InputSnapshot {
        move_axis: Vec2 { x: 1.0, y: 0.0 },
        sprint: true,
        pointer_angle: 0.0,
    };
    for _ in 0..200 {
        movement_system(&mut world, &map, &input);
    }

    let (pos, angle) = player_pose(&world);
    info!(x = pos.x, y = pos.y, angle, "player pose after walk");

    // Build a wall one cell ahead of wherever the walk ended.
    let target = build_target_cell(pos, angle);
    match place_block(&mut world, &map, &catalog, target, ObstacleKind::Block, 0) {
        Ok(_) => info!(x = target.x, y = target.y, "placed wall block"),
        Err(e) => info!(x = target.x, y = target.y, "build rejected: {e}"),
    }

    let snap = snapshot(&world);
    info!(
        obstacles = snap.obstacles.len(),
        x = snap.player.position.x,
        y = snap.player.position.y,
        "final snapshot"
    );
}

fn player_pose(world: &hecs::World) -> (Vec2, f32) {
    world
        .query::<(&Player, &Position, &Facing)>()
        .iter()
        .map(|(_e, (_p, pos, facing))| (Vec2 { x: pos.x, y: pos.y }, facing.angle))
        .next()
        .unwrap_or((Vec2::default(), 0.0))
}
