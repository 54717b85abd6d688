use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::Color;

/// Smallest tile edge a pattern may use.
pub const MIN_TILE_SIZE: f64 = 2.0;
/// Primary stroke width (and dot radius) as a fraction of tile size.
pub const PRIMARY_STROKE_RATIO: f64 = 0.18;
/// Secondary stroke width as a fraction of tile size.
pub const SECONDARY_STROKE_RATIO: f64 = 0.14;

/// Fill style of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Solid,
    Diagonal,
    Dots,
    Crosshatch,
    Vertical,
}

impl PatternKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Diagonal => "diagonal",
            Self::Dots => "dots",
            Self::Crosshatch => "crosshatch",
            Self::Vertical => "vertical",
        }
    }

    /// Parses a persisted name; unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "diagonal" => Some(Self::Diagonal),
            "dots" => Some(Self::Dots),
            "crosshatch" => Some(Self::Crosshatch),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// One accent mark inside a tile, in tile-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TileAccent {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    },
    Dot {
        cx: f64,
        cy: f64,
        radius: f64,
    },
}

/// Repeating fill tile: a background square plus accent marks.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTile {
    pub kind: PatternKind,
    pub size: f64,
    pub background: Color,
    pub accent_color: Color,
    pub accent_opacity: f64,
    pub accents: SmallVec<[TileAccent; 3]>,
}

/// Builds the tile for `kind`, or `None` for solid fills.
///
/// Geometry depends only on `tile_size` (clamped to [`MIN_TILE_SIZE`]).
#[must_use]
pub fn pattern_tile(
    kind: PatternKind,
    tile_size: f64,
    accent_color: Color,
    accent_opacity: f64,
    background: Color,
) -> Option<PatternTile> {
    let accents = tile_accents(kind, tile_size);
    if accents.is_empty() {
        return None;
    }
    Some(PatternTile {
        kind,
        size: clamp_tile_size(tile_size),
        background,
        accent_color,
        accent_opacity: if accent_opacity.is_finite() {
            accent_opacity.clamp(0.0, 1.0)
        } else {
            1.0
        },
        accents,
    })
}

#[must_use]
pub fn clamp_tile_size(tile_size: f64) -> f64 {
    if tile_size.is_finite() {
        tile_size.max(MIN_TILE_SIZE)
    } else {
        MIN_TILE_SIZE
    }
}

fn tile_accents(kind: PatternKind, tile_size: f64) -> SmallVec<[TileAccent; 3]> {
    let s = clamp_tile_size(tile_size);
    let primary = s * PRIMARY_STROKE_RATIO;
    let secondary = s * SECONDARY_STROKE_RATIO;
    let line = |x1: f64, y1: f64, x2: f64, y2: f64, width: f64| TileAccent::Line {
        x1,
        y1,
        x2,
        y2,
        width,
    };

    let mut accents = SmallVec::new();
    match kind {
        PatternKind::Solid => {}
        PatternKind::Diagonal => {
            // The two corner stubs continue the stripe across tile seams.
            accents.push(line(0.0, s, s, 0.0, primary));
            accents.push(line(-s * 0.25, s * 0.25, s * 0.25, -s * 0.25, primary));
            accents.push(line(s * 0.75, s * 1.25, s * 1.25, s * 0.75, primary));
        }
        PatternKind::Dots => {
            accents.push(TileAccent::Dot {
                cx: s * 0.25,
                cy: s * 0.25,
                radius: primary,
            });
            accents.push(TileAccent::Dot {
                cx: s * 0.75,
                cy: s * 0.75,
                radius: primary,
            });
        }
        PatternKind::Crosshatch => {
            accents.push(line(0.0, 0.0, s, s, primary));
            accents.push(line(0.0, s, s, 0.0, secondary));
        }
        PatternKind::Vertical => {
            accents.push(line(s * 0.5, 0.0, s * 0.5, s, primary));
        }
    }
    accents
}
