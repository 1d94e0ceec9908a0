use tracing::warn;

use crate::ecs::components::Footprint;
use crate::protocol::ObstacleKind;

/// Fallback footprint used when a variant's source size is unknown (e.g.
/// the sprite failed to decode). Intentional recovery, not an error.
pub const DEFAULT_FOOTPRINT: (f32, f32) = (64.0, 64.0);

/// How an obstacle variant occupies space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Round obstacle; radius = min(footprint.w, footprint.h) * radius_scale.
    /// The player slides around these.
    Circle { radius_scale: f32 },
    /// Rectangular obstacle; half-extents = footprint * scale / 2.
    /// These fully stop movement along the blocked axis.
    Box { scale: f32 },
}

/// Static definition of one obstacle variant.
#[derive(Debug, Clone, Copy)]
struct VariantDef {
    /// Pixel footprint, or None when the source size is unavailable.
    footprint: Option<(f32, f32)>,
    shape: CollisionShape,
}

/// A variant definition with the footprint fallback already applied.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedVariant {
    pub footprint: Footprint,
    pub shape: CollisionShape,
}

/// Read-only registry of obstacle kinds, their variants, and collision
/// shape parameters. Populated once at startup; an unknown (kind, variant)
/// reference is a configuration bug and aborts world construction.
pub struct Catalog {
    stones: Vec<VariantDef>,
    trees: Vec<VariantDef>,
    ores: Vec<VariantDef>,
    blocks: Vec<VariantDef>,
}

impl Catalog {
    /// The standard obstacle set: five stones, two trees, two ores, and the
    /// placeable steel-wall block.
    pub fn standard() -> Self {
        let stone = |w, h| VariantDef {
            footprint: Some((w, h)),
            shape: CollisionShape::Circle {
                radius_scale: 1.0 / 3.0,
            },
        };
        let tree = |w, h| VariantDef {
            footprint: Some((w, h)),
            shape: CollisionShape::Circle {
                radius_scale: 1.0 / 4.0,
            },
        };
        Self {
            stones: vec![
                stone(64.0, 64.0),
                stone(56.0, 52.0),
                stone(72.0, 66.0),
                stone(60.0, 60.0),
                stone(48.0, 44.0),
            ],
            trees: vec![tree(96.0, 92.0), tree(108.0, 100.0)],
            ores: vec![
                VariantDef {
                    footprint: Some((48.0, 48.0)),
                    shape: CollisionShape::Circle {
                        radius_scale: 1.0 / 4.0,
                    },
                },
                // Sprite dimensions unknown; resolves to the 64x64 fallback.
                VariantDef {
                    footprint: None,
                    shape: CollisionShape::Circle {
                        radius_scale: 1.0 / 4.0,
                    },
                },
            ],
            blocks: vec![VariantDef {
                footprint: Some((64.0, 64.0)),
                shape: CollisionShape::Box { scale: 0.9 },
            }],
        }
    }

    fn defs(&self, kind: ObstacleKind) -> &[VariantDef] {
        match kind {
            ObstacleKind::Stone => &self.stones,
            ObstacleKind::Tree => &self.trees,
            ObstacleKind::Ore => &self.ores,
            ObstacleKind::Block => &self.blocks,
        }
    }

    /// Resolves a variant's footprint and collision shape.
    ///
    /// An unknown variant index is a fatal configuration error. A missing
    /// footprint is not: it falls back to 64x64 with a warning.
    pub fn resolve(&self, kind: ObstacleKind, variant: u8) -> Result<ResolvedVariant, String> {
        let defs = self.defs(kind);
        let def = defs.get(variant as usize).ok_or_else(|| {
            format!(
                "unknown obstacle variant {:?} #{} (catalog has {})",
                kind,
                variant,
                defs.len()
            )
        })?;
        let (width, height) = def.footprint.unwrap_or_else(|| {
            warn!(?kind, variant, "variant footprint unknown, using 64x64 fallback");
            DEFAULT_FOOTPRINT
        });
        Ok(ResolvedVariant {
            footprint: Footprint { width, height },
            shape: def.shape,
        })
    }

    /// Every (kind, variant) pair eligible for random world seeding, in
    /// declaration order.
    pub fn placeable(&self) -> Vec<(ObstacleKind, u8)> {
        let mut out = Vec::new();
        for (kind, defs) in [
            (ObstacleKind::Stone, &self.stones),
            (ObstacleKind::Tree, &self.trees),
            (ObstacleKind::Ore, &self.ores),
            (ObstacleKind::Block, &self.blocks),
        ] {
            for variant in 0..defs.len() {
                out.push((kind, variant as u8));
            }
        }
        out
    }
}
