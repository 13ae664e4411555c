//! Sizing, color, and styling constants for the tool.

/// Cursor ring radius on the wheel
pub const CURSOR_RADIUS: f64 = 7.0;

/// Displayed width of the value bar
pub const BAR_WIDTH: f32 = 24.0;

/// Border radius for swatches and the value bar
pub const RADIUS: f32 = 4.0;

/// Gap between tool elements
pub const GAP: f32 = 8.0;

/// Padding around the whole tool
pub const PADDING: f32 = 8.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 64.0;

/// Search input field width
pub const SEARCH_INPUT_WIDTH: f32 = 140.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Title font size on the primary card
pub const TITLE_FONT: f32 = 14.0;

/// Primary card swatch side
pub const CARD_SWATCH: f32 = 48.0;

/// Secondary and suggestion swatch side
pub const SMALL_SWATCH: f32 = 20.0;

/// Placeholder shown in an empty match slot
pub const NO_MATCH: &str = "—";
