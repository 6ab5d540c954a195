//! Default drawing settings and resource limits (fixed-point, 1000 = 1 unit)

use crate::types::Fixed;

pub const ARC_RADIUS: Fixed = 36_000;
pub const ARROW_LENGTH: Fixed = 10_000;
pub const ARROW_WIDTH: Fixed = 10_000;
pub const DASH_ON: Fixed = 7_000;
pub const DASH_OFF: Fixed = 5_000;
pub const BOX_WIDTH: Fixed = 72_000;
pub const BOX_DEPTH: Fixed = 36_000;
pub const BOX_THICKNESS: Fixed = 500;
pub const CIRCLE_RADIUS: Fixed = 36_000;
pub const ELLIPSE_WIDTH: Fixed = 72_000;
pub const ELLIPSE_DEPTH: Fixed = 36_000;
pub const THICKNESS: Fixed = 400;
pub const FONT_DEPTH: Fixed = 6_000;
pub const LINE_DEPTH: Fixed = 12_000;
pub const LINE_LENGTH: Fixed = 72_000;
pub const LINE_DROP: Fixed = 36_000;
pub const MAGNIFICATION: Fixed = 1_000;

/// Point size assumed for strings whose font was never bound.
pub const FONT_SIZE: Fixed = 12_000;

/// Framing box stroke when `boundingbox` gives no thickness.
pub const FRAME_THICKNESS: Fixed = 400;

/// Longest raw input line, newline included.
pub const LINE_SIZE: usize = 256;
/// Longest command or option word.
pub const WORD_SIZE: usize = 256;
/// Longest variable name accepted by substitution.
pub const VARIABLE_NAME_SIZE: usize = 64;
/// Depth limit for both nested includes and nested macro calls.
pub const MAX_NESTING: usize = 20;
/// Recorded errors beyond this abandon the run.
pub const MAX_ERRORS: usize = 100;
