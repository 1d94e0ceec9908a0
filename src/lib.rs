//! Top-down tile-world movement and collision engine.
//!
//! A player moves continuously over a discrete tile grid scattered with
//! static obstacles. The engine keeps the player out of solid geometry
//! (sliding around round obstacles, clamping at the world border, stopping
//! per-axis against rectangular blocks), selects wall textures from
//! neighbourhood occupancy, and validates both random world seeding and
//! interactive build placement against one shared collision predicate.

pub mod ecs;
pub mod game;
pub mod protocol;

pub use ecs::systems::movement::{movement_system, InputSnapshot};
pub use ecs::systems::placement::{build_target_cell, place_block, seed_world, validate_build};
pub use ecs::world::create_world;
pub use game::autotile::{neighbour_mask, select_variant};
pub use game::catalog::{Catalog, CollisionShape};
pub use game::collision::{Collision, CollisionQuery, ProbeOptions};
pub use game::config::{ExclusionZone, MapConfig};
pub use protocol::{snapshot, ObstacleKind, Vec2, WorldSnapshot};
