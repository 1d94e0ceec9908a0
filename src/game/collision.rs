//! Collision queries over the placed obstacle set.
//!
//! All positions arrive in fractional cell units and are converted to pixel
//! units for the shape tests, matching how obstacle footprints are stored.
//! Queries are pure reads of the world; only the movement and placement
//! systems mutate.

use hecs::{Entity, World};

use crate::ecs::components::{Collider, Footprint, GridCell, Obstacle, ObstacleShape};
use crate::game::catalog::CollisionShape;
use crate::game::config::MapConfig;
use crate::protocol::Vec2;

/// What a probe ran into, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The body would cross the world edge.
    Border,
    /// A rectangular obstacle at this cell; halts the blocked axis.
    Block(GridCell),
    /// A round obstacle at this cell; orthogonal movement may continue.
    Slide(GridCell),
}

/// Per-probe behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeOptions {
    /// Skip the world-edge check. Build placement sets this: the border is a
    /// movement limit, not a placement one.
    pub ignore_border: bool,
    /// When set to the body's current position, obstacles it already overlaps
    /// there are exempt from blocking the probed point. Only player movement
    /// uses this; it keeps a body wedged against geometry from being pinned
    /// in place by the thing it is already resting on.
    pub exempt_overlaps_at: Option<Vec2>,
}

/// Read-only collision view of the world.
pub struct CollisionQuery<'w> {
    world: &'w World,
    map: &'w MapConfig,
}

impl<'w> CollisionQuery<'w> {
    pub fn new(world: &'w World, map: &'w MapConfig) -> Self {
        Self { world, map }
    }

    /// Tests whether a body centered at `point` collides with the border or
    /// any placed obstacle. Returns `None` for no collision.
    ///
    /// Degenerate points (non-finite or exactly-zero coordinates) report no
    /// collision; a single corrupt frame must not wedge the simulation, and
    /// the movement system re-centers a corrupt pose before it can persist.
    pub fn probe(&self, point: Vec2, body: &Collider, opts: ProbeOptions) -> Option<Collision> {
        if !point.x.is_finite() || !point.y.is_finite() || point.x == 0.0 || point.y == 0.0 {
            return None;
        }

        if !opts.ignore_border {
            let radius = body.width / (2.0 * self.map.tile_size);
            let edge = self.map.map_size as f32;
            if point.x - radius < 0.0
                || point.x + radius > edge
                || point.y - radius < 0.0
                || point.y + radius > edge
            {
                return Some(Collision::Border);
            }
        }

        // Obstacles overlapped at the current position never block the new
        // point. The border check above is deliberately not exempted.
        let exempt = match opts.exempt_overlaps_at {
            Some(current) => self.overlapping_at(current, body),
            None => Vec::new(),
        };

        for (entity, (_obstacle, cell, footprint, shape)) in self
            .world
            .query::<(&Obstacle, &GridCell, &Footprint, &ObstacleShape)>()
            .iter()
        {
            if exempt.contains(&entity) {
                continue;
            }
            if let Some(hit) = hit_test(self.map, point, body, cell, footprint, shape) {
                return Some(hit);
            }
        }
        None
    }

    /// Every obstacle the body overlaps at `point`, using the same shape
    /// predicates as `probe` with the border check suppressed.
    fn overlapping_at(&self, point: Vec2, body: &Collider) -> Vec<Entity> {
        let mut touching = Vec::new();
        if !point.x.is_finite() || !point.y.is_finite() {
            return touching;
        }
        for (entity, (_obstacle, cell, footprint, shape)) in self
            .world
            .query::<(&Obstacle, &GridCell, &Footprint, &ObstacleShape)>()
            .iter()
        {
            if hit_test(self.map, point, body, cell, footprint, shape).is_some() {
                touching.push(entity);
            }
        }
        touching
    }
}

/// Shape test between a body centered at `point` (cell units) and one placed
/// obstacle, both evaluated in pixel units.
fn hit_test(
    map: &MapConfig,
    point: Vec2,
    body: &Collider,
    cell: &GridCell,
    footprint: &Footprint,
    shape: &ObstacleShape,
) -> Option<Collision> {
    if footprint.width == 0.0 || footprint.height == 0.0 {
        return None;
    }

    let px = point.x * map.tile_size;
    let py = point.y * map.tile_size;
    let ox = cell.x as f32 * map.tile_size;
    let oy = cell.y as f32 * map.tile_size;

    match shape.shape {
        CollisionShape::Box { scale } => {
            // Body box is unscaled; the obstacle box shrinks by its scale.
            let pw = body.width / 2.0;
            let ph = body.height / 2.0;
            let ow = footprint.width * scale / 2.0;
            let oh = footprint.height * scale / 2.0;
            if px + pw > ox - ow && px - pw < ox + ow && py + ph > oy - oh && py - ph < oy + oh {
                return Some(Collision::Block(*cell));
            }
        }
        CollisionShape::Circle { radius_scale } => {
            let pr = body.width / 2.0;
            let or = footprint.width.min(footprint.height) * radius_scale;
            if (px - ox).hypot(py - oy) < pr + or {
                return Some(Collision::Slide(*cell));
            }
        }
    }
    None
}
