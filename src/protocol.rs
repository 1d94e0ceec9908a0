//! Render-facing snapshot types.
//!
//! The engine owns simulation state; an external renderer consumes these
//! serializable views once per frame. Building a snapshot is a pure read.

use serde::{Deserialize, Serialize};

use crate::ecs::components::{Facing, GridCell, Obstacle, ObstacleRef, Player, Position};
use crate::game::autotile;

// ── Geometry ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

// ── Obstacles ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Stone,
    Tree,
    Ore,
    Block,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    pub x: i32,
    pub y: i32,
    pub kind: ObstacleKind,
    pub variant: u8,
    /// Autotile index in 0..=21; set for Block obstacles only.
    pub texture_index: Option<u8>,
}

// ── Player ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub angle: f32,
}

// ── World ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub player: PlayerSnapshot,
    pub obstacles: Vec<ObstacleSnapshot>,
}

/// Captures the render-facing view of the world: player pose plus every
/// placed obstacle, with wall texture indices resolved from the current
/// neighbourhoods.
pub fn snapshot(world: &hecs::World) -> WorldSnapshot {
    let player = world
        .query::<(&Player, &Position, &Facing)>()
        .iter()
        .map(|(_e, (_p, pos, facing))| PlayerSnapshot {
            position: Vec2 { x: pos.x, y: pos.y },
            angle: facing.angle,
        })
        .next()
        .unwrap_or(PlayerSnapshot {
            position: Vec2::default(),
            angle: 0.0,
        });

    let obstacles = world
        .query::<(&Obstacle, &GridCell, &ObstacleRef)>()
        .iter()
        .map(|(_e, (_o, cell, obstacle_ref))| {
            let texture_index = (obstacle_ref.kind == ObstacleKind::Block).then(|| {
                autotile::select_variant(autotile::neighbour_mask(world, *cell))
            });
            ObstacleSnapshot {
                x: cell.x,
                y: cell.y,
                kind: obstacle_ref.kind,
                variant: obstacle_ref.variant,
                texture_index,
            }
        })
        .collect();

    WorldSnapshot { player, obstacles }
}
