pub mod bar_layout;
pub mod frame;
pub mod pattern;
pub mod scale;
pub mod shape_path;
pub mod ticks;
pub mod types;

pub use bar_layout::{
    BarDatum, BarGeometry, BarLayoutConfig, MIN_BAR_THICKNESS_PX, bar_thickness, layout_bars,
};
pub use frame::CoordinateFrame;
pub use pattern::{PatternKind, PatternTile, TileAccent, pattern_tile};
pub use scale::{LinearScale, PixelRange, to_pixel, to_value};
pub use shape_path::{CornerStyle, clamp_corner_radius, rounded_bar_path};
pub use ticks::{AxisBound, TickRequest, TickScale, generate_ticks, nice_step};
pub use types::{AxisId, Orientation, Padding, PlotRect, Viewport};
