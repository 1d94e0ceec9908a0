use crate::game::catalog::CollisionShape;
use crate::protocol::ObstacleKind;

// ── Marker Components ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Player;

#[derive(Debug, Clone)]
pub struct Obstacle;

// ── Spatial ──────────────────────────────────────────────────────────

/// Continuous position in fractional cell units (1.0 = one tile).
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Facing angle in radians, derived from the pointer each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Facing {
    pub angle: f32,
}

/// Integer grid coordinates of a placed obstacle. Immutable after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned body extents in pixel units. The effective circle radius
/// is half the width.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

// ── Player Components ────────────────────────────────────────────────

/// Movement speed in cell units per step.
#[derive(Debug, Clone, Copy)]
pub struct MoveSpeed {
    pub base: f32,
    pub sprint: f32,
}

// ── Obstacle Components ──────────────────────────────────────────────

/// Which catalog entry this obstacle was placed from.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleRef {
    pub kind: ObstacleKind,
    pub variant: u8,
}

/// Visual footprint in pixel units, resolved once from the catalog at
/// spawn time (64x64 fallback applied there if the source size is unknown).
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

/// Collision shape resolved once from the catalog at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleShape {
    pub shape: CollisionShape,
}
