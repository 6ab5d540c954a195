//! Core value types shared by the reader, the resolvers and the output pass.
//!
//! All coordinates are integers in fixed-point units: 1000 is one nominal
//! drawing unit (a point, for the usual renderers), which gives three decimal
//! digits of precision. Angles are carried as `f64` radians once resolved.

use std::fmt;

use glam::IVec2;

/// A fixed-point dimension (1000 = 1 unit).
pub type Fixed = i32;

/// One nominal unit in fixed-point.
pub const UNIT: Fixed = 1000;

/// An absolute or relative position in fixed-point units.
pub type Point = IVec2;

/// Shorthand constructor for a fixed-point point.
#[inline]
pub const fn pt(x: Fixed, y: Fixed) -> Point {
    IVec2::new(x, y)
}

/// RGB colour with each component in thousandths (0..=1000).
///
/// `UNFILLED` is an impossible colour used to mean "no fill"; it never
/// compares equal to a real colour, black included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl Colour {
    pub const BLACK: Colour = Colour { red: 0, green: 0, blue: 0 };
    pub const UNFILLED: Colour = Colour { red: -1000, green: -1000, blue: -1000 };

    pub const fn rgb(red: i32, green: i32, blue: i32) -> Colour {
        Colour { red, green, blue }
    }

    /// A grey level: all three components equal.
    pub const fn grey(level: i32) -> Colour {
        Colour { red: level, green: level, blue: level }
    }

    pub fn is_unfilled(self) -> bool {
        self == Colour::UNFILLED
    }

    /// True if any component is beyond 1.0.
    pub fn out_of_range(self) -> bool {
        self.red > UNIT || self.green > UNIT || self.blue > UNIT
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::BLACK
    }
}

/// Current drawing direction (environment) or an explicit arc heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// The anchor on a following shape that touches the previous one when
    /// drawing proceeds in this direction.
    pub fn trailing_anchor(self) -> Anchor {
        match self {
            Direction::North => Anchor::South,
            Direction::South => Anchor::North,
            Direction::East => Anchor::West,
            Direction::West => Anchor::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "up",
            Direction::South => "down",
            Direction::East => "right",
            Direction::West => "left",
        };
        f.write_str(name)
    }
}

/// A named point on an item: compass points, centre, and the positional
/// anchors start/end/middle that only make sense on open paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Centre,
    Start,
    End,
    Middle,
}

impl Anchor {
    /// The eight compass points (centre excluded).
    pub fn is_compass(self) -> bool {
        !matches!(self, Anchor::Centre | Anchor::Start | Anchor::End | Anchor::Middle)
    }

    pub fn is_positional(self) -> bool {
        matches!(self, Anchor::Start | Anchor::End | Anchor::Middle)
    }
}

/// Horizontal justification of a string about its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Centre,
}

/// Whether an item's outline is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Visible,
    Invisible,
}

/// A dash pattern: dash length then gap length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dash {
    pub on: Fixed,
    pub off: Fixed,
}

/// Axis-aligned bounding box over fixed-point coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: pt(Fixed::MAX, Fixed::MAX),
            max: pt(Fixed::MIN, Fixed::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include the rectangle spanned from `corner` by `size`.
    /// Either size component may be negative.
    pub fn expand_rect(&mut self, corner: Point, size: Point) {
        let far = corner.saturating_add(size);
        self.expand_point(corner.min(far));
        self.expand_point(corner.max(far));
    }

    /// Push all four extrema outward by `by`.
    pub fn pad(&mut self, by: Fixed) {
        self.min = pt(self.min.x.saturating_sub(by), self.min.y.saturating_sub(by));
        self.max = pt(self.max.x.saturating_add(by), self.max.y.saturating_add(by));
    }

    pub fn width(&self) -> Fixed {
        self.max.x - self.min.x
    }

    pub fn depth(&self) -> Fixed {
        self.max.y - self.min.y
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}
