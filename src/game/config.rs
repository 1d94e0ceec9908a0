use serde::{Deserialize, Serialize};

use crate::protocol::Vec2;

/// A circular region excluded from world seeding (spawn safe-zones).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// World geometry and tuning parameters.
///
/// All fields have defaults matching the standard 150x150 map, so a partial
/// JSON config overrides only what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Cells per side of the square world.
    pub map_size: u32,
    /// Continuous (pixel) units per cell.
    pub tile_size: f32,
    /// Impassable margin, in cells, inside the world edge.
    pub border_width: u32,
    /// Independent per-cell probability of an obstacle during seeding.
    pub spawn_density: f64,
    /// Regions kept clear during seeding.
    pub exclusion_zones: Vec<ExclusionZone>,
    /// Walk speed in cell units per step.
    pub base_speed: f32,
    /// Sprint speed in cell units per step.
    pub sprint_speed: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_size: 150,
            tile_size: 64.0,
            border_width: 1,
            spawn_density: 0.02,
            exclusion_zones: vec![
                ExclusionZone {
                    x: 15.0,
                    y: 12.5,
                    radius: 5.0,
                },
                ExclusionZone {
                    x: 135.0,
                    y: 142.5,
                    radius: 5.0,
                },
            ],
            base_speed: 0.02,
            sprint_speed: 0.04,
        }
    }
}

impl MapConfig {
    /// World center in cell units; the player spawn point and the position
    /// the resolver snaps a corrupted pose back to.
    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.map_size as f32 / 2.0,
            y: self.map_size as f32 / 2.0,
        }
    }

    /// Parses a (possibly partial) JSON config.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid map config: {e}"))
    }
}
