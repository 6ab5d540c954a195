//! Free-standing text.

use std::fmt;

use super::{Located, Placement};
use crate::scene::{Geometry, P, Shape};
use crate::types::{Anchor, BBox, Direction, Fixed, Justify, Point};

/// Strings with no outline, positioned at `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub at: Point,
}

/// Default position: the centre of the item followed, or the middle of a
/// line.
pub fn resolve(at: Option<Point>, place: Placement<'_>) -> Text {
    let at = at.unwrap_or_else(|| match place.base {
        None => Point::ZERO,
        Some(Shape::Line(line)) => line.start + line.size / 2,
        Some(other) => other.reference(),
    });
    Text { at }
}

impl Geometry for Text {
    fn kind_name(&self) -> &'static str {
        "text"
    }

    fn reference(&self) -> Point {
        self.at
    }

    fn anchor(&self, _anchor: Anchor, _fraction: Fixed) -> Located {
        Located::misapplied(self.at)
    }

    fn exit_point(&self, _direction: Direction) -> Point {
        self.at
    }

    fn default_justify(&self) -> Justify {
        Justify::Centre
    }

    fn extent(&self, _thickness: Fixed, _bbox: &mut BBox) {}

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text at {}", P(self.at))
    }
}
