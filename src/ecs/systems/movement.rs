use hecs::World;
use tracing::warn;

use crate::ecs::components::{Collider, Facing, MoveSpeed, Player, Position};
use crate::game::collision::{Collision, CollisionQuery, ProbeOptions};
use crate::game::config::MapConfig;
use crate::protocol::Vec2;

/// Everything the resolver reads from the outside world for one step.
/// Passed in explicitly so the resolver stays a pure function of
/// (pose, input, world) with no ambient key/mouse state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Signed movement intent per axis; normalized before use.
    pub move_axis: Vec2,
    /// Sprint modifier held.
    pub sprint: bool,
    /// Facing angle toward the pointer, radians.
    pub pointer_angle: f32,
}

/// Runs the movement resolver for a single simulation step.
///
/// Sanitizes a corrupted pose, then attempts the intended move and falls
/// back through the resolution ladder: commit, border clamp, circular
/// slide, or per-axis decomposition against a rectangular blocker. The
/// committed position is authoritative until the next step.
pub fn movement_system(world: &mut World, map: &MapConfig, input: &InputSnapshot) {
    let Some((entity, mut pos, speed, body)) = world
        .query::<(&Player, &Position, &MoveSpeed, &Collider)>()
        .iter()
        .map(|(e, (_p, pos, speed, body))| (e, *pos, *speed, *body))
        .next()
    else {
        return;
    };

    // Recover from a corrupted pose before it can propagate.
    if !pos.x.is_finite() || !pos.y.is_finite() {
        let center = map.center();
        warn!(x = pos.x, y = pos.y, "non-finite player position, resetting to center");
        pos.x = center.x;
        pos.y = center.y;
    }

    let axis = input.move_axis;
    if axis.x != 0.0 || axis.y != 0.0 {
        let len = axis.x.hypot(axis.y);
        let norm_x = axis.x / len;
        let norm_y = axis.y / len;
        let step = if input.sprint { speed.sprint } else { speed.base };

        let candidate = Vec2 {
            x: pos.x + norm_x * step,
            y: pos.y + norm_y * step,
        };

        let query = CollisionQuery::new(world, map);
        let opts = ProbeOptions {
            ignore_border: false,
            exempt_overlaps_at: Some(Vec2 { x: pos.x, y: pos.y }),
        };

        match query.probe(candidate, &body, opts) {
            None => {
                pos.x = candidate.x;
                pos.y = candidate.y;
            }
            Some(Collision::Border) => {
                // Clamp each axis of the unclamped candidate independently,
                // so the player slides along the edge instead of stopping.
                let radius = body.width / (2.0 * map.tile_size);
                let edge = map.map_size as f32;
                pos.x = candidate.x.clamp(radius, edge - radius);
                pos.y = candidate.y.clamp(radius, edge - radius);
            }
            Some(Collision::Slide(cell)) => {
                // Nudge along the non-dominant axis of the intent, toward
                // whichever side of the obstacle the player is on.
                let dx = pos.x - cell.x as f32;
                let dy = pos.y - cell.y as f32;
                let (slide_x, slide_y) = if norm_x.abs() > norm_y.abs() {
                    (0.0, if dy > 0.0 { step } else { -step })
                } else {
                    (if dx > 0.0 { step } else { -step }, 0.0)
                };
                let nudged = Vec2 {
                    x: pos.x + slide_x,
                    y: pos.y + slide_y,
                };
                if query.probe(nudged, &body, opts).is_none() {
                    pos.x = nudged.x;
                    pos.y = nudged.y;
                }
            }
            Some(Collision::Block(_)) => {
                // Per-axis fallback. A Slide result here does not stop the
                // axis: only rectangular blockers halt movement outright.
                if axis.x != 0.0 {
                    let x_only = Vec2 {
                        x: candidate.x,
                        y: pos.y,
                    };
                    match query.probe(x_only, &body, opts) {
                        None | Some(Collision::Slide(_)) => pos.x = candidate.x,
                        _ => {}
                    }
                }
                if axis.y != 0.0 {
                    let y_only = Vec2 {
                        x: pos.x,
                        y: candidate.y,
                    };
                    match query.probe(y_only, &body, opts) {
                        None | Some(Collision::Slide(_)) => pos.y = candidate.y,
                        _ => {}
                    }
                }
            }
        }
    }

    if let Ok(mut position) = world.get::<&mut Position>(entity) {
        *position = pos;
    }
    if let Ok(mut facing) = world.get::<&mut Facing>(entity) {
        facing.angle = input.pointer_angle;
    }
}
