use hecs::World;
use rand::Rng;
use tracing::info;

use crate::ecs::components::{Collider, Facing, MoveSpeed, Player, Position};
use crate::ecs::systems::placement::seed_world;
use crate::game::catalog::Catalog;
use crate::game::config::MapConfig;

/// Player body size in pixel units; the collision radius is half the width.
pub const PLAYER_SIZE_PX: f32 = 64.0;

/// Creates a new ECS world with the player at world center and the obstacle
/// field seeded from `rng`.
///
/// Fails only on a catalog misconfiguration, which aborts construction
/// rather than degrading silently.
pub fn create_world<R: Rng>(map: &MapConfig, rng: &mut R) -> Result<(World, Catalog), String> {
    let catalog = Catalog::standard();
    let mut world = World::new();

    let center = map.center();
    world.spawn((
        Player,
        Position {
            x: center.x,
            y: center.y,
        },
        Facing::default(),
        MoveSpeed {
            base: map.base_speed,
            sprint: map.sprint_speed,
        },
        Collider {
            width: PLAYER_SIZE_PX,
            height: PLAYER_SIZE_PX,
        },
    ));

    let placed = seed_world(&mut world, map, &catalog, rng)?;
    info!(placed, map_size = map.map_size, "world created");

    Ok((world, catalog))
}
