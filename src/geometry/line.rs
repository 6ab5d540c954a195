//! Straight lines and arrows.

use std::fmt;

use super::{Arrows, Located, Placement, Resolved, side_offset};
use crate::errors::ErrorKind;
use crate::output::format::fixed;
use crate::scene::{Geometry, P, Shape};
use crate::types::{Anchor, BBox, Direction, Fixed, Justify, Point};

/// A line from `start` spanning `size` (width, depth).
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point,
    pub size: Point,
    pub arrows: Arrows,
}

impl Line {
    pub fn end(&self) -> Point {
        self.start + self.size
    }
}

/// Options gathered for a line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineDraft {
    pub width: Option<Fixed>,
    pub depth: Option<Fixed>,
    pub from: Option<Point>,
    pub to: Option<Point>,
    pub align: Option<Point>,
}

/// Lengths used when a line gives neither size nor end point.
#[derive(Debug, Clone, Copy)]
pub struct LineDefaults {
    pub horizontal: Fixed,
    pub vertical: Fixed,
}

pub fn resolve(draft: &LineDraft, place: Placement<'_>, defaults: LineDefaults, arrows: Arrows) -> Resolved<Line> {
    let mut issues = Vec::new();
    let (mut width, mut depth) = (draft.width, draft.depth);

    if draft.to.is_none() {
        if width.is_none() {
            let (w, d) = match place.direction {
                Direction::North => (0, defaults.vertical),
                Direction::South => (0, -defaults.vertical),
                Direction::East => (defaults.horizontal, 0),
                Direction::West => (-defaults.horizontal, 0),
            };
            width = Some(w);
            depth = Some(d);
        }
    } else if width.is_some() || depth.is_some() {
        issues.push(ErrorKind::EndpointWithSize);
    }

    let start = match (draft.from, place.base) {
        (Some(p), _) => p,
        (None, None) => Point::ZERO,
        (None, Some(Shape::Closed(last))) => {
            let quadrant = match (width, depth) {
                (Some(w), Some(d)) if d.abs() < w.abs() => {
                    if w > 0 { Direction::East } else { Direction::West }
                }
                (Some(_), Some(d)) => {
                    if d > 0 { Direction::North } else { Direction::South }
                }
                _ => place.direction,
            };
            last.centre + side_offset(quadrant, last.width, last.depth)
        }
        (None, Some(base)) => base.exit_point(place.direction),
    };

    let mut size = Point::new(width.unwrap_or(0), depth.unwrap_or(0));
    if let Some(to) = draft.to {
        size = to - start;
    }
    if let Some(align) = draft.align {
        if size.x == 0 {
            size.y = align.y - start.y;
        } else if size.y == 0 {
            size.x = align.x - start.x;
        } else {
            issues.push(ErrorKind::SlopingAlign);
        }
    }

    Resolved { shape: Line { start, size, arrows }, issues }
}

impl Geometry for Line {
    fn kind_name(&self) -> &'static str {
        "line"
    }

    fn reference(&self) -> Point {
        self.start
    }

    fn anchor(&self, anchor: Anchor, fraction: Fixed) -> Located {
        let along = Point::new(fraction * self.size.x / 1000, fraction * self.size.y / 1000);
        match anchor {
            Anchor::Start if fraction != 0 => Located::fractional(self.start + along),
            Anchor::Start => Located::plain(self.start),
            Anchor::End if fraction != 0 => Located::fractional(self.end() - along),
            Anchor::End => Located::plain(self.end()),
            Anchor::Middle => Located::plain(self.start + self.size / 2),
            _ => Located::misapplied(self.end()),
        }
    }

    fn exit_point(&self, _direction: Direction) -> Point {
        self.end()
    }

    fn default_justify(&self) -> Justify {
        if self.size.y == 0 { Justify::Centre } else { Justify::Left }
    }

    /// Horizontal and vertical lines are given the stroke thickness across
    /// their zero axis. Arrowheads only widen a line drawn with no stroke.
    fn extent(&self, thickness: Fixed, bbox: &mut BBox) {
        let (mut corner, mut size) = (self.start, self.size);
        if size.x == 0 {
            corner.x -= thickness / 2;
            size.x = thickness;
        }
        if size.y == 0 {
            corner.y -= thickness / 2;
            size.y = thickness;
        }
        if self.arrows.any() {
            let ww = self.arrows.width;
            if size.x == 0 {
                corner.x -= ww / 2;
                size.x = ww;
            } else if size.y == 0 {
                corner.y -= ww / 2;
                size.y = ww;
            }
        }
        bbox.expand_rect(corner, size);
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line from {} by {}", P(self.start), P(self.size))?;
        match (self.arrows.start, self.arrows.end) {
            (true, true) => f.write_str(" arrows both")?,
            (true, false) => f.write_str(" arrow start")?,
            (false, true) => f.write_str(" arrow end")?,
            (false, false) => {}
        }
        if self.arrows.any() {
            write!(f, " head {}x{}", fixed(self.arrows.length), fixed(self.arrows.width))?;
            if !self.arrows.fill.is_unfilled() {
                f.write_str(" filled")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::closed::{Closed, ClosedKind};
    use crate::types::pt;

    const DEFAULTS: LineDefaults = LineDefaults { horizontal: 72_000, vertical: 36_000 };

    fn line(draft: LineDraft, base: Option<&Shape>, direction: Direction) -> Resolved<Line> {
        resolve(&draft, Placement::new(base, direction), DEFAULTS, Arrows::default())
    }

    #[test]
    fn default_length_follows_direction() {
        let r = line(LineDraft::default(), None, Direction::South);
        assert_eq!(r.shape.size, pt(0, -36_000));
        assert!(r.issues.is_empty());
    }

    #[test]
    fn to_computes_size() {
        let d = LineDraft { from: Some(pt(1000, 1000)), to: Some(pt(4000, 5000)), ..Default::default() };
        assert_eq!(line(d, None, Direction::East).shape.size, pt(3000, 4000));
    }

    #[test]
    fn to_with_width_is_an_error() {
        let d = LineDraft { width: Some(5000), depth: Some(0), to: Some(pt(1, 1)), ..Default::default() };
        let r = line(d, None, Direction::East);
        assert_eq!(r.issues, vec![ErrorKind::EndpointWithSize]);
    }

    #[test]
    fn starts_on_box_side_facing_travel() {
        let b = Shape::Closed(Closed { kind: ClosedKind::Box, centre: pt(0, 0), width: 72_000, depth: 36_000 });
        let d = LineDraft { width: Some(0), depth: Some(-10_000), ..Default::default() };
        let r = line(d, Some(&b), Direction::East);
        assert_eq!(r.shape.start, pt(0, -18_000));
    }

    #[test]
    fn align_on_sloping_line() {
        let d = LineDraft { width: Some(10), depth: Some(10), align: Some(pt(0, 0)), ..Default::default() };
        assert_eq!(line(d, None, Direction::East).issues, vec![ErrorKind::SlopingAlign]);

        let d = LineDraft { width: Some(0), depth: Some(10), align: Some(pt(0, 50)), ..Default::default() };
        assert_eq!(line(d, None, Direction::East).shape.size, pt(0, 50));
    }

    #[test]
    fn anchors_along_line() {
        let l = Line { start: pt(0, 0), size: pt(72_000, 0), arrows: Arrows::default() };
        assert_eq!(l.anchor(Anchor::Start, 250).at, pt(18_000, 0));
        assert_eq!(l.anchor(Anchor::End, 250).at, pt(54_000, 0));
        assert_eq!(l.anchor(Anchor::Middle, 0).at, pt(36_000, 0));
        assert!(!l.anchor(Anchor::Middle, 500).used_fraction);
        assert!(l.anchor(Anchor::North, 0).misapplied);
    }

    #[test]
    fn horizontal_extent_uses_thickness() {
        let l = Line { start: pt(0, 0), size: pt(72_000, 0), arrows: Arrows::default() };
        let mut bbox = BBox::new();
        l.extent(400, &mut bbox);
        assert_eq!(bbox.min, pt(0, -200));
        assert_eq!(bbox.max, pt(72_000, 200));
    }
}
