//! Per-primitive geometry.
//!
//! Each primitive kind gets a draft (what the options said), a resolver that
//! turns the draft into final geometry relative to the item it follows, and
//! an implementation of [`Geometry`](crate::scene::Geometry) for anchors,
//! exit points and extents.
//!
//! Resolvers never touch the input stream. Anything they object to comes
//! back as a list of [`ErrorKind`]s for the interpreter to report.

pub mod arc;
pub mod closed;
pub mod curve;
pub mod line;
pub mod text;

use crate::errors::ErrorKind;
use crate::scene::Shape;
use crate::types::{Colour, Direction, Fixed, Point};

pub use arc::{Arc, ArcDraft};
pub use closed::{Closed, ClosedDraft, ClosedKind};
pub use curve::{Curve, CurveDraft};
pub use line::{Line, LineDraft};
pub use text::Text;

/// Arrowheads on an open path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arrows {
    pub start: bool,
    pub end: bool,
    /// Length along the path.
    pub length: Fixed,
    /// Full width across the path.
    pub width: Fixed,
    pub fill: Colour,
}

impl Arrows {
    pub fn any(&self) -> bool {
        self.start || self.end
    }
}

/// What a resolver needs to know about its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// The item this one continues from, if any.
    pub base: Option<&'a Shape>,
    /// The environment's current direction.
    pub direction: Direction,
}

impl<'a> Placement<'a> {
    pub fn new(base: Option<&'a Shape>, direction: Direction) -> Self {
        Self { base, direction }
    }
}

/// The point an anchor names on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub at: Point,
    /// The fraction prefix was consumed.
    pub used_fraction: bool,
    /// The anchor makes no sense for this kind of item.
    pub misapplied: bool,
}

impl Located {
    pub fn plain(at: Point) -> Self {
        Self { at, used_fraction: false, misapplied: false }
    }

    pub fn fractional(at: Point) -> Self {
        Self { at, used_fraction: true, misapplied: false }
    }

    pub fn misapplied(at: Point) -> Self {
        Self { at, used_fraction: false, misapplied: true }
    }
}

/// A resolved primitive plus whatever went wrong resolving it.
#[derive(Debug)]
pub struct Resolved<T> {
    pub shape: T,
    pub issues: Vec<ErrorKind>,
}

impl<T> Resolved<T> {
    pub fn clean(shape: T) -> Self {
        Self { shape, issues: Vec::new() }
    }
}

/// Truncate toward zero like a C cast.
#[inline]
pub(crate) fn trunc(v: f64) -> Fixed {
    v as Fixed
}

/// Offset from a closed shape's centre to the middle of the side facing
/// `direction`.
pub(crate) fn side_offset(direction: Direction, width: Fixed, depth: Fixed) -> Point {
    match direction {
        Direction::North => Point::new(0, depth / 2),
        Direction::South => Point::new(0, -depth / 2),
        Direction::East => Point::new(width / 2, 0),
        Direction::West => Point::new(-width / 2, 0),
    }
}
