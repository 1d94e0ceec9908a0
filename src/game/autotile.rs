//! Wall texture selection from 8-neighbour occupancy.
//!
//! A placed block's sprite depends on which of its eight surrounding cells
//! hold another block. The neighbourhood is packed into an explicit bitmask
//! and mapped to one of 22 texture variants by a precedence-ordered table,
//! most specific pattern first.

use hecs::World;

use crate::ecs::components::{GridCell, Obstacle, ObstacleRef};
use crate::protocol::ObstacleKind;

// ── Neighbour bits ───────────────────────────────────────────────────

pub const N: u8 = 1 << 0;
pub const S: u8 = 1 << 1;
pub const E: u8 = 1 << 2;
pub const W: u8 = 1 << 3;
pub const NE: u8 = 1 << 4;
pub const NW: u8 = 1 << 5;
pub const SE: u8 = 1 << 6;
pub const SW: u8 = 1 << 7;

const ANY_DIAGONAL: u8 = NE | NW | SE | SW;

/// Occupancy bitmask of the eight cells around `cell`, counting only Block
/// obstacles (walls connect to walls, never to stones or trees).
pub fn neighbour_mask(world: &World, cell: GridCell) -> u8 {
    let mut mask = 0u8;
    for (_entity, (_obstacle, obstacle_ref, other)) in world
        .query::<(&Obstacle, &ObstacleRef, &GridCell)>()
        .iter()
    {
        if obstacle_ref.kind != ObstacleKind::Block {
            continue;
        }
        let dx = other.x - cell.x;
        let dy = other.y - cell.y;
        mask |= match (dx, dy) {
            (0, -1) => N,
            (0, 1) => S,
            (1, 0) => E,
            (-1, 0) => W,
            (1, -1) => NE,
            (-1, -1) => NW,
            (1, 1) => SE,
            (-1, 1) => SW,
            _ => 0,
        };
    }
    mask
}

/// Maps a neighbourhood mask to a texture variant index in `0..=21`.
///
/// Precedence runs most-specific-first: the full 4-way junction, then
/// 3-way tees, then corners (split into inner/outer by the enclosed
/// diagonal), then diagonal-filled straights, plain straights, end-caps,
/// and finally the isolated block. A diagonal-only neighbourhood renders
/// as isolated.
pub fn select_variant(mask: u8) -> u8 {
    let n = mask & N != 0;
    let s = mask & S != 0;
    let e = mask & E != 0;
    let w = mask & W != 0;
    let diagonal = mask & ANY_DIAGONAL != 0;

    match (n, s, e, w) {
        // 4-way junction.
        (true, true, true, true) => 7,
        // 3-way tees, named by the missing arm.
        (true, false, true, true) => 8,
        (false, true, true, true) => 9,
        (true, true, true, false) => 10,
        (true, true, false, true) => 11,
        // Corners; odd index when the enclosed diagonal is filled (inner
        // corner), even when it is open (outer corner).
        (false, true, true, false) => {
            if mask & SE != 0 {
                13
            } else {
                12
            }
        }
        (false, true, false, true) => {
            if mask & SW != 0 {
                15
            } else {
                14
            }
        }
        (true, false, true, false) => {
            if mask & NE != 0 {
                17
            } else {
                16
            }
        }
        (true, false, false, true) => {
            if mask & NW != 0 {
                19
            } else {
                18
            }
        }
        // Straight runs, diagonal-filled variants first.
        (false, false, true, true) => {
            if diagonal {
                20
            } else {
                5
            }
        }
        (true, true, false, false) => {
            if diagonal {
                21
            } else {
                6
            }
        }
        // End-caps.
        (false, true, false, false) => 1,
        (true, false, false, false) => 2,
        (false, false, true, false) => 3,
        (false, false, false, true) => 4,
        // Isolated (diagonal-only neighbourhoods land here too).
        (false, false, false, false) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_block(world: &mut World, x: i32, y: i32) {
        world.spawn((
            Obstacle,
            GridCell { x, y },
            ObstacleRef {
                kind: ObstacleKind::Block,
                variant: 0,
            },
        ));
    }

    #[test]
    fn isolated_block_is_variant_zero() {
        assert_eq!(select_variant(0), 0);
    }

    #[test]
    fn single_neighbour_end_caps() {
        assert_eq!(select_variant(S), 1);
        assert_eq!(select_variant(N), 2);
        assert_eq!(select_variant(E), 3);
        assert_eq!(select_variant(W), 4);
    }

    #[test]
    fn straight_runs() {
        assert_eq!(select_variant(E | W), 5);
        assert_eq!(select_variant(N | S), 6);
    }

    #[test]
    fn four_way_junction() {
        assert_eq!(select_variant(N | S | E | W), 7);
        // Diagonals don't demote a full junction.
        assert_eq!(select_variant(N | S | E | W | NE | SW), 7);
    }

    #[test]
    fn three_way_tees() {
        assert_eq!(select_variant(N | E | W), 8);
        assert_eq!(select_variant(S | E | W), 9);
        assert_eq!(select_variant(N | S | E), 10);
        assert_eq!(select_variant(N | S | W), 11);
    }

    #[test]
    fn corners_split_on_enclosed_diagonal() {
        assert_eq!(select_variant(S | E), 12);
        assert_eq!(select_variant(S | E | SE), 13);
        assert_eq!(select_variant(S | W), 14);
        assert_eq!(select_variant(S | W | SW), 15);
        assert_eq!(select_variant(N | E), 16);
        assert_eq!(select_variant(N | E | NE), 17);
        assert_eq!(select_variant(N | W), 18);
        assert_eq!(select_variant(N | W | NW), 19);
        // Only the enclosed diagonal disambiguates; others are ignored.
        assert_eq!(select_variant(S | E | NW), 12);
    }

    #[test]
    fn diagonal_filled_straights() {
        assert_eq!(select_variant(E | W | NE), 20);
        assert_eq!(select_variant(N | S | SW), 21);
    }

    #[test]
    fn diagonal_only_neighbourhood_is_isolated() {
        assert_eq!(select_variant(NE | SW), 0);
    }

    #[test]
    fn every_mask_maps_inside_the_variant_range() {
        for mask in 0..=255u8 {
            assert!(select_variant(mask) <= 21);
        }
    }

    #[test]
    fn mask_counts_only_same_kind_blocks() {
        let mut world = World::new();
        spawn_block(&mut world, 10, 11); // south
        spawn_block(&mut world, 11, 9); // north-east
        world.spawn((
            Obstacle,
            GridCell { x: 9, y: 10 },
            ObstacleRef {
                kind: ObstacleKind::Stone,
                variant: 0,
            },
        ));
        // Far-away block contributes nothing.
        spawn_block(&mut world, 14, 10);

        let mask = neighbour_mask(&world, GridCell { x: 10, y: 10 });
        assert_eq!(mask, S | NE);
        assert_eq!(select_variant(mask), 1);
    }

    #[test]
    fn identical_neighbourhoods_yield_identical_variants() {
        for mask in [0u8, S, N | S, N | S | E | W, S | E | SE] {
            assert_eq!(select_variant(mask), select_variant(mask));
        }
    }
}
