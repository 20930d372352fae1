//! Chart rendering: colors, treemap geometry and PDF export.
mod palette;
mod pdf;
mod treemap;

pub use palette::{Palette, Rgb, FALLBACK_COLOR, REFERENCE_COLOR, USER_COLOR};
pub use pdf::{render, ChartOptions, DEFAULT_TITLE, PAGE_HEIGHT, PAGE_WIDTH};
pub use treemap::{layout, Rect, Tile};
