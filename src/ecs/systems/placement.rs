use hecs::World;
use rand::Rng;
use tracing::info;

use crate::ecs::components::{Collider, Footprint, GridCell, Obstacle, ObstacleRef, ObstacleShape};
use crate::game::catalog::Catalog;
use crate::game::collision::{CollisionQuery, ProbeOptions};
use crate::game::config::MapConfig;
use crate::protocol::{ObstacleKind, Vec2};

/// Seeds the obstacle field.
///
/// Every interior cell (outside the border margin and the configured
/// exclusion zones) independently rolls `spawn_density`; winners pick a
/// uniform random catalog variant and are accepted only if they keep the
/// minimum center-to-center spacing against everything placed so far. The
/// spacing rule is a coarse footprint check, deliberately cheaper than a
/// full collision probe. Pass a seeded RNG for a reproducible world.
///
/// Returns the number of obstacles placed, or a fatal error if the catalog
/// is misconfigured.
pub fn seed_world<R: Rng>(
    world: &mut World,
    map: &MapConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<usize, String> {
    let placeable = catalog.placeable();
    if placeable.is_empty() {
        return Err("catalog has no placeable variants".to_string());
    }

    // Spacing is checked against pre-existing obstacles too.
    let mut placed: Vec<(GridCell, Footprint)> = world
        .query::<(&Obstacle, &GridCell, &Footprint)>()
        .iter()
        .map(|(_e, (_o, cell, footprint))| (*cell, *footprint))
        .collect();

    let border = map.border_width as i32;
    let edge = map.map_size as i32;
    let mut count = 0usize;

    for x in border..edge - border {
        for y in border..edge - border {
            if map
                .exclusion_zones
                .iter()
                .any(|z| (x as f32 - z.x).hypot(y as f32 - z.y) < z.radius)
            {
                continue;
            }
            if rng.gen::<f64>() >= map.spawn_density {
                continue;
            }

            let (kind, variant) = placeable[rng.gen_range(0..placeable.len())];
            let resolved = catalog.resolve(kind, variant)?;
            let footprint = resolved.footprint;

            let spaced = placed.iter().all(|(cell, other)| {
                let min_dist = ((other.width + footprint.width)
                    .max(other.height + footprint.height))
                    / map.tile_size
                    / 2.0;
                (x as f32 - cell.x as f32).hypot(y as f32 - cell.y as f32) >= min_dist
            });
            if !spaced {
                continue;
            }

            let cell = GridCell { x, y };
            world.spawn((
                Obstacle,
                cell,
                ObstacleRef { kind, variant },
                footprint,
                ObstacleShape {
                    shape: resolved.shape,
                },
            ));
            placed.push((cell, footprint));
            count += 1;
        }
    }

    info!(count, "seeded obstacle field");
    Ok(count)
}

/// The grid cell one cell unit in front of a position along `angle`.
/// This is where an interactive build lands.
pub fn build_target_cell(position: Vec2, angle: f32) -> GridCell {
    GridCell {
        x: (position.x + angle.cos()).round() as i32,
        y: (position.y + angle.sin()).round() as i32,
    }
}

/// Whether a body with `footprint` can be built at `cell`.
///
/// True iff the cell lies strictly inside the border margin and a probe at
/// its center (border check suppressed, no overlap exemption) finds nothing.
/// Pure read; drives both the go/no-go preview and the placement gate.
pub fn validate_build(world: &World, map: &MapConfig, cell: GridCell, footprint: Footprint) -> bool {
    let border = map.border_width as i32;
    let edge = map.map_size as i32;
    if cell.x < border || cell.x >= edge - border || cell.y < border || cell.y >= edge - border {
        return false;
    }

    let body = Collider {
        width: footprint.width,
        height: footprint.height,
    };
    let point = Vec2 {
        x: cell.x as f32,
        y: cell.y as f32,
    };
    let query = CollisionQuery::new(world, map);
    query
        .probe(
            point,
            &body,
            ProbeOptions {
                ignore_border: true,
                exempt_overlaps_at: None,
            },
        )
        .is_none()
}

/// Attempts to place a block obstacle at a grid cell.
///
/// Resolves the variant (a bad reference is a fatal configuration error),
/// validates the target cell, and spawns the obstacle. Returns the newly
/// spawned entity on success, or a descriptive error string.
pub fn place_block(
    world: &mut World,
    map: &MapConfig,
    catalog: &Catalog,
    cell: GridCell,
    kind: ObstacleKind,
    variant: u8,
) -> Result<hecs::Entity, String> {
    let resolved = catalog.resolve(kind, variant)?;

    if !validate_build(world, map, cell, resolved.footprint) {
        return Err(format!("cell ({}, {}) is not free", cell.x, cell.y));
    }

    let entity = world.spawn((
        Obstacle,
        cell,
        ObstacleRef { kind, variant },
        resolved.footprint,
        ObstacleShape {
            shape: resolved.shape,
        },
    ));
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn obstacle_cells(world: &World) -> Vec<(GridCell, Footprint)> {
        world
            .query::<(&Obstacle, &GridCell, &Footprint)>()
            .iter()
            .map(|(_e, (_o, cell, fp))| (*cell, *fp))
            .collect()
    }

    #[test]
    fn density_zero_seeds_nothing() {
        let mut world = World::new();
        let map = MapConfig {
            spawn_density: 0.0,
            ..Default::default()
        };
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let count = seed_world(&mut world, &map, &catalog, &mut rng).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn density_one_still_respects_spacing() {
        let mut world = World::new();
        let map = MapConfig {
            map_size: 40,
            spawn_density: 1.0,
            exclusion_zones: vec![],
            ..Default::default()
        };
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let count = seed_world(&mut world, &map, &catalog, &mut rng).unwrap();

        // Every eligible cell rolled, but spacing keeps the grid from filling.
        let eligible = 38 * 38;
        assert!(count > 0);
        assert!(count < eligible);

        let placed = obstacle_cells(&world);
        for (i, (a_cell, a_fp)) in placed.iter().enumerate() {
            for (b_cell, b_fp) in &placed[i + 1..] {
                let min_dist = ((a_fp.width + b_fp.width).max(a_fp.height + b_fp.height))
                    / map.tile_size
                    / 2.0;
                let dist = (a_cell.x as f32 - b_cell.x as f32)
                    .hypot(a_cell.y as f32 - b_cell.y as f32);
                assert!(
                    dist >= min_dist,
                    "spacing violated between ({}, {}) and ({}, {})",
                    a_cell.x,
                    a_cell.y,
                    b_cell.x,
                    b_cell.y
                );
            }
        }
    }

    #[test]
    fn seeding_is_reproducible_given_a_seed() {
        let map = MapConfig {
            map_size: 40,
            exclusion_zones: vec![],
            ..Default::default()
        };
        let catalog = Catalog::standard();

        let mut world_a = World::new();
        let mut world_b = World::new();
        seed_world(&mut world_a, &map, &catalog, &mut StdRng::seed_from_u64(7)).unwrap();
        seed_world(&mut world_b, &map, &catalog, &mut StdRng::seed_from_u64(7)).unwrap();

        let mut cells_a: Vec<_> = obstacle_cells(&world_a)
            .iter()
            .map(|(c, _)| (c.x, c.y))
            .collect();
        let mut cells_b: Vec<_> = obstacle_cells(&world_b)
            .iter()
            .map(|(c, _)| (c.x, c.y))
            .collect();
        cells_a.sort_unstable();
        cells_b.sort_unstable();
        assert_eq!(cells_a, cells_b);
        assert!(!cells_a.is_empty());
    }

    #[test]
    fn exclusion_zones_stay_clear() {
        let mut world = World::new();
        let map = MapConfig {
            map_size: 40,
            spawn_density: 1.0,
            exclusion_zones: vec![crate::game::config::ExclusionZone {
                x: 20.0,
                y: 20.0,
                radius: 6.0,
            }],
            ..Default::default()
        };
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        seed_world(&mut world, &map, &catalog, &mut rng).unwrap();

        for (cell, _) in obstacle_cells(&world) {
            let dist = (cell.x as f32 - 20.0).hypot(cell.y as f32 - 20.0);
            assert!(dist >= 6.0, "obstacle inside exclusion zone at ({}, {})", cell.x, cell.y);
        }
    }

    #[test]
    fn border_cells_are_never_seeded() {
        let mut world = World::new();
        let map = MapConfig {
            map_size: 20,
            spawn_density: 1.0,
            border_width: 2,
            exclusion_zones: vec![],
            ..Default::default()
        };
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(4);
        seed_world(&mut world, &map, &catalog, &mut rng).unwrap();

        for (cell, _) in obstacle_cells(&world) {
            assert!(cell.x >= 2 && cell.x < 18);
            assert!(cell.y >= 2 && cell.y < 18);
        }
    }

    #[test]
    fn build_target_is_one_cell_along_the_facing() {
        let pos = Vec2 { x: 75.2, y: 75.0 };
        // Facing east.
        assert_eq!(build_target_cell(pos, 0.0), GridCell { x: 76, y: 75 });
        // Facing south (y grows downward).
        assert_eq!(
            build_target_cell(pos, std::f32::consts::FRAC_PI_2),
            GridCell { x: 75, y: 76 }
        );
    }

    #[test]
    fn validate_build_rejects_occupied_and_border_cells() {
        let mut world = World::new();
        let map = MapConfig::default();
        let catalog = Catalog::standard();
        let block = catalog.resolve(ObstacleKind::Block, 0).unwrap();

        place_block(&mut world, &map, &catalog, GridCell { x: 70, y: 70 }, ObstacleKind::Block, 0)
            .unwrap();

        // Same cell is now taken.
        assert!(!validate_build(&world, &map, GridCell { x: 70, y: 70 }, block.footprint));
        // The adjacent cell stays buildable: the 0.9 box scale leaves a gap,
        // which is what lets walls connect into runs.
        assert!(validate_build(&world, &map, GridCell { x: 71, y: 70 }, block.footprint));
        // Border margin is off limits even though the probe ignores the edge.
        assert!(!validate_build(&world, &map, GridCell { x: 0, y: 70 }, block.footprint));
        assert!(!validate_build(&world, &map, GridCell { x: 149, y: 70 }, block.footprint));
    }

    #[test]
    fn validate_build_is_idempotent_and_pure() {
        let mut world = World::new();
        let map = MapConfig::default();
        let catalog = Catalog::standard();
        let block = catalog.resolve(ObstacleKind::Block, 0).unwrap();
        let cell = GridCell { x: 60, y: 60 };

        let first = validate_build(&world, &map, cell, block.footprint);
        let second = validate_build(&world, &map, cell, block.footprint);
        assert_eq!(first, second);
        assert!(first);
        assert!(obstacle_cells(&world).is_empty());

        place_block(&mut world, &map, &catalog, cell, ObstacleKind::Block, 0).unwrap();
        assert_eq!(obstacle_cells(&world).len(), 1);
    }

    #[test]
    fn place_block_refuses_an_occupied_cell() {
        let mut world = World::new();
        let map = MapConfig::default();
        let catalog = Catalog::standard();
        let cell = GridCell { x: 50, y: 50 };

        place_block(&mut world, &map, &catalog, cell, ObstacleKind::Block, 0).unwrap();
        let err = place_block(&mut world, &map, &catalog, cell, ObstacleKind::Block, 0);
        assert!(err.is_err());
        assert_eq!(obstacle_cells(&world).len(), 1);
    }

    #[test]
    fn place_block_rejects_unknown_variants() {
        let mut world = World::new();
        let map = MapConfig::default();
        let catalog = Catalog::standard();
        let err = place_block(
            &mut world,
            &map,
            &catalog,
            GridCell { x: 50, y: 50 },
            ObstacleKind::Block,
            9,
        );
        assert!(err.is_err());
    }
}
