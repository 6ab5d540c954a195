//! Boxes, circles and ellipses.

use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

use super::{Located, Placement, Resolved, side_offset, trunc};
use crate::output::format::fixed;
use crate::scene::{Geometry, P, Shape};
use crate::types::{Anchor, BBox, Direction, Fixed, Justify, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedKind {
    Box,
    Circle,
    Ellipse,
}

impl ClosedKind {
    pub fn name(self) -> &'static str {
        match self {
            ClosedKind::Box => "box",
            ClosedKind::Circle => "circle",
            ClosedKind::Ellipse => "ellipse",
        }
    }
}

/// A closed shape centred on `centre`.
#[derive(Debug, Clone, PartialEq)]
pub struct Closed {
    pub kind: ClosedKind,
    pub centre: Point,
    pub width: Fixed,
    pub depth: Fixed,
}

impl Closed {
    /// Half extents to the north-east corner. Round shapes use the point at
    /// 45 degrees on the bounding box axes.
    pub fn corner(&self) -> Point {
        corner(self.kind, self.width, self.depth)
    }
}

fn corner(kind: ClosedKind, width: Fixed, depth: Fixed) -> Point {
    let (w2, d2) = (width / 2, depth / 2);
    match kind {
        ClosedKind::Box => Point::new(w2, d2),
        _ => Point::new(trunc(f64::from(w2) * FRAC_PI_4.cos()), trunc(f64::from(d2) * FRAC_PI_4.sin())),
    }
}

/// Options gathered for a closed shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClosedDraft {
    pub at: Option<Point>,
    /// For circles this is the radius.
    pub width: Fixed,
    pub depth: Fixed,
    /// Which point of the new shape touches the join target.
    pub join: Option<Anchor>,
    /// `join ... to` gave an explicit target.
    pub joined: bool,
}

/// Place a closed shape. `joined_at` is the target of the most recent
/// `join ... to`.
pub fn resolve(kind: ClosedKind, draft: &ClosedDraft, place: Placement<'_>, joined_at: Point) -> Resolved<Closed> {
    let (width, depth) = match kind {
        ClosedKind::Circle => (draft.width.saturating_mul(2), draft.width.saturating_mul(2)),
        _ => (draft.width, draft.depth),
    };
    let (w2, d2) = (width / 2, depth / 2);
    let c = corner(kind, width, depth);

    let centre = match (draft.at, place.base) {
        (Some(at), _) => at,
        (None, None) => Point::ZERO,
        (None, Some(Shape::Closed(last))) => {
            let join = draft.join.unwrap_or_else(|| place.direction.trailing_anchor());
            follow_closed(last, join, draft.joined.then_some(joined_at), Point::new(w2, d2), c)
        }
        (None, Some(base)) => {
            let (end, mut off) = match base {
                Shape::Arc(arc) => (arc.end, if draft.join.is_none() { arc_offset(arc.end_angle, arc.clockwise, w2, d2) } else { Point::ZERO }),
                Shape::Line(line) => {
                    let end = line.end();
                    let off = if draft.join.is_none() {
                        if line.size.x.abs() > line.size.y.abs() {
                            Point::new(if line.size.x < 0 { -w2 } else { w2 }, 0)
                        } else {
                            Point::new(0, if line.size.y < 0 { -d2 } else { d2 })
                        }
                    } else {
                        Point::ZERO
                    };
                    (end, off)
                }
                Shape::Curve(curve) => (curve.end, Point::ZERO),
                other => (other.reference(), Point::ZERO),
            };
            if let Some(join) = draft.join {
                off = join_offset(join, off, w2, d2, c);
            }
            (if draft.joined { joined_at } else { end }) + off
        }
    };

    Resolved::clean(Closed { kind, centre, width, depth })
}

/// Offset a closed shape so that it touches the end of an arc.
fn arc_offset(angle: f64, clockwise: bool, w2: Fixed, d2: Fixed) -> Point {
    let off = if angle > -PI / 4.0 && angle <= PI / 4.0 {
        Point::new(0, d2)
    } else if angle > PI / 4.0 && angle <= 3.0 * PI / 4.0 {
        Point::new(-w2, 0)
    } else if angle > 3.0 * PI / 4.0 && angle <= 5.0 * PI / 4.0 {
        Point::new(0, -d2)
    } else {
        Point::new(w2, 0)
    };
    if clockwise { -off } else { off }
}

/// Explicit join point on the new shape. Only the components the join
/// point names are overridden.
fn join_offset(join: Anchor, mut off: Point, w2: Fixed, d2: Fixed, c: Point) -> Point {
    match join {
        Anchor::North => off.y = -d2,
        Anchor::NorthEast => off = Point::new(-c.x, -c.y),
        Anchor::East => off.x = -w2,
        Anchor::SouthEast => off = Point::new(-c.x, c.y),
        Anchor::South => off.y = d2,
        Anchor::SouthWest => off = Point::new(c.x, c.y),
        Anchor::West => off.x = w2,
        Anchor::NorthWest => off = Point::new(c.x, -c.y),
        _ => {}
    }
    off
}

/// Centre of a closed shape following another closed shape, touching at
/// `join`: either at an explicit target or against the matching side of
/// the previous shape.
fn follow_closed(last: &Closed, join: Anchor, target: Option<Point>, half: Point, c: Point) -> Point {
    let l = last.centre;
    let lh = Point::new(last.width / 2, last.depth / 2);
    let lc = last.corner();
    match target {
        Some(t) => match join {
            Anchor::North => Point::new(t.x, t.y - c.y),
            Anchor::NorthEast => Point::new(t.x - c.x, t.y - c.y),
            Anchor::East => Point::new(t.x - c.x, t.y),
            Anchor::SouthEast => Point::new(t.x - c.x, t.y + c.y),
            Anchor::South => Point::new(t.x, t.y + c.y),
            Anchor::SouthWest => Point::new(t.x + c.x, t.y + c.y),
            Anchor::West => Point::new(t.x + c.x, t.y),
            Anchor::NorthWest => Point::new(t.x + c.x, t.y - c.y),
            _ => t,
        },
        None => match join {
            Anchor::North => Point::new(l.x, l.y - lh.y - half.y),
            Anchor::NorthEast => Point::new(l.x - lc.x - c.x, l.y - lc.y - c.y),
            Anchor::East => Point::new(l.x - lh.x - half.x, l.y),
            Anchor::SouthEast => Point::new(l.x - lc.x - c.x, l.y + lc.y + c.y),
            Anchor::South => Point::new(l.x, l.y + lh.y + half.y),
            Anchor::SouthWest => Point::new(l.x + lc.x + c.x, l.y + lc.y + c.y),
            Anchor::West => Point::new(l.x + lh.x + half.x, l.y),
            Anchor::NorthWest => Point::new(l.x + lc.x + c.x, l.y - lc.y - c.y),
            _ => l,
        },
    }
}

impl Geometry for Closed {
    fn kind_name(&self) -> &'static str {
        "box"
    }

    fn reference(&self) -> Point {
        self.centre
    }

    fn anchor(&self, anchor: Anchor, fraction: Fixed) -> Located {
        let (x, y) = (self.centre.x, self.centre.y);
        let (w, d) = (self.width, self.depth);
        let along = |size: Fixed| if fraction != 0 { (fraction - 500) * size / 1000 } else { 0 };
        match anchor {
            Anchor::North | Anchor::South => {
                let dy = if anchor == Anchor::North { d / 2 } else { -d / 2 };
                Located::fractional(Point::new(x + along(w), y + dy))
            }
            Anchor::East | Anchor::West => {
                let dx = if anchor == Anchor::East { w / 2 } else { -w / 2 };
                Located::fractional(Point::new(x + dx, y + along(d)))
            }
            Anchor::Centre => Located::plain(self.centre),
            Anchor::Start | Anchor::End | Anchor::Middle => Located::misapplied(Point::ZERO),
            corner_anchor => {
                let k = match corner_anchor {
                    Anchor::NorthEast => 0.25,
                    Anchor::SouthEast => -0.25,
                    Anchor::SouthWest => 1.25,
                    _ => 0.75,
                };
                let off = match self.kind {
                    ClosedKind::Box => {
                        let (sx, sy) = match corner_anchor {
                            Anchor::NorthEast => (1, 1),
                            Anchor::SouthEast => (1, -1),
                            Anchor::SouthWest => (-1, -1),
                            _ => (-1, 1),
                        };
                        Point::new(sx * (w / 2), sy * (d / 2))
                    }
                    _ => Point::new(
                        trunc(f64::from(w / 2) * (k * PI).cos()),
                        trunc(f64::from(d / 2) * (k * PI).sin()),
                    ),
                };
                Located::plain(self.centre + off)
            }
        }
    }

    fn exit_point(&self, direction: Direction) -> Point {
        self.centre + side_offset(direction, self.width, self.depth)
    }

    fn default_justify(&self) -> Justify {
        Justify::Centre
    }

    fn extent(&self, thickness: Fixed, bbox: &mut BBox) {
        let corner = Point::new(
            self.centre.x - self.width / 2 - thickness / 2,
            self.centre.y - self.depth / 2 - thickness / 2,
        );
        bbox.expand_rect(corner, Point::new(self.width + thickness, self.depth + thickness));
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} size {}x{}", self.kind.name(), P(self.centre), fixed(self.width), fixed(self.depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    fn boxed(x: Fixed, y: Fixed) -> Closed {
        Closed { kind: ClosedKind::Box, centre: pt(x, y), width: 72_000, depth: 36_000 }
    }

    fn draft() -> ClosedDraft {
        ClosedDraft { width: 72_000, depth: 36_000, ..Default::default() }
    }

    #[test]
    fn first_box_sits_at_origin() {
        let r = resolve(ClosedKind::Box, &draft(), Placement::new(None, Direction::East), Point::ZERO);
        assert_eq!(r.shape.centre, Point::ZERO);
    }

    #[test]
    fn boxes_abut_in_drawing_direction() {
        let last = Shape::Closed(boxed(0, 0));
        let r = resolve(ClosedKind::Box, &draft(), Placement::new(Some(&last), Direction::East), Point::ZERO);
        assert_eq!(r.shape.centre, pt(72_000, 0));
        let r = resolve(ClosedKind::Box, &draft(), Placement::new(Some(&last), Direction::South), Point::ZERO);
        assert_eq!(r.shape.centre, pt(0, -36_000));
    }

    #[test]
    fn circle_radius_doubles() {
        let d = ClosedDraft { width: 10_000, ..Default::default() };
        let r = resolve(ClosedKind::Circle, &d, Placement::new(None, Direction::East), Point::ZERO);
        assert_eq!((r.shape.width, r.shape.depth), (20_000, 20_000));
    }

    #[test]
    fn huge_circle_saturates() {
        let d = ClosedDraft { width: 1_500_000_000, ..Default::default() };
        let r = resolve(ClosedKind::Circle, &d, Placement::new(None, Direction::East), Point::ZERO);
        assert_eq!((r.shape.width, r.shape.depth), (i32::MAX, i32::MAX));
        assert_eq!(r.shape.centre, Point::ZERO);
    }

    #[test]
    fn join_to_explicit_point() {
        let last = Shape::Closed(boxed(0, 0));
        let d = ClosedDraft { join: Some(Anchor::West), joined: true, ..draft() };
        let r = resolve(ClosedKind::Box, &d, Placement::new(Some(&last), Direction::East), pt(100_000, 0));
        assert_eq!(r.shape.centre, pt(136_000, 0));
    }

    #[test]
    fn box_anchors() {
        let b = boxed(0, 0);
        assert_eq!(b.anchor(Anchor::North, 0).at, pt(0, 18_000));
        assert_eq!(b.anchor(Anchor::SouthWest, 0).at, pt(-36_000, -18_000));
        assert_eq!(b.anchor(Anchor::North, 250).at, pt(-18_000, 18_000));
        assert!(b.anchor(Anchor::Start, 0).misapplied);
    }

    #[test]
    fn extent_includes_half_thickness() {
        let mut bbox = BBox::new();
        boxed(0, 0).extent(500, &mut bbox);
        assert_eq!(bbox.min, pt(-36_250, -18_250));
        assert_eq!(bbox.max, pt(36_250, 18_250));
    }
}
