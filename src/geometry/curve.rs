//! Cubic Bézier curves.
//!
//! With no adjustment, the control points sit a quarter of the way along
//! the chord from each end, pushed off to one side of it (the other side
//! when clockwise) by a quarter of the chord length. `c1` and `c2` move
//! them along and across the chord; `wavy` flips the second one over.

use std::f64::consts::PI;
use std::fmt;

use super::{Located, Placement, trunc};
use crate::errors::ErrorKind;
use crate::scene::{Geometry, P};
use crate::types::{Anchor, BBox, Direction, Fixed, Justify, Point};

/// A curve from `start` to `end`. Control points are relative to `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub start: Point,
    pub end: Point,
    /// Midpoint of the chord.
    pub mid: Point,
    pub c1: Point,
    pub c2: Point,
    pub clockwise: bool,
}

impl Curve {
    /// Point at parameter `t` (0..=1) along the curve.
    pub fn point_at(&self, t: f64) -> Point {
        let p0 = self.start.as_i64vec2();
        let p1 = (self.start + self.c1).as_i64vec2();
        let p2 = (self.start + self.c2).as_i64vec2();
        let p3 = self.end.as_i64vec2();

        let a = (p3 - 3 * p2 + 3 * p1 - p0).as_dvec2();
        let b = (3 * p2 - 6 * p1 + 3 * p0).as_dvec2();
        let c = (3 * (p1 - p0)).as_dvec2();
        let v = a * t * t * t + b * t * t + c * t;
        Point::new(trunc(v.x), trunc(v.y)) + self.start
    }
}

/// Options gathered for a curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveDraft {
    pub from: Option<Point>,
    pub to: Option<Point>,
    pub clockwise: bool,
    pub wavy: bool,
    /// Control point adjustments: along the chord, then across it.
    pub c1: Point,
    pub c2: Point,
    /// Adjustment applied to both control points.
    pub cs: Point,
}

/// Resolve a curve. A missing end point or a degenerate chord yields no
/// curve at all.
pub fn resolve(draft: &CurveDraft, place: Placement<'_>) -> Result<Curve, ErrorKind> {
    let end = draft.to.ok_or(ErrorKind::CurveWithoutEnd)?;
    let start = draft.from.unwrap_or_else(|| match place.base {
        Some(base) => base.exit_point(place.direction),
        None => Point::ZERO,
    });
    let mid = (start + end) / 2;
    let adj1 = draft.c1 + draft.cs;
    let adj2 = draft.c2 + draft.cs;

    let mut sign = if draft.clockwise { -1.0 } else { 1.0 };
    let h = f64::from(end.y - start.y);
    let w = f64::from(end.x - start.x);
    let len = h.hypot(w);
    if len < 0.001 {
        return Err(ErrorKind::CurveTooShort(len));
    }

    let angle = if w == 0.0 {
        if h > 0.0 { PI / 2.0 } else { 3.0 * PI / 2.0 }
    } else if h == 0.0 {
        if w < 0.0 { PI } else { 0.0 }
    } else {
        (h / w).atan()
    };

    let flen = len * 0.25;

    let ylen = flen + f64::from(adj1.y);
    let fm = (flen + f64::from(adj1.x)) / len;
    let (dx, dy) = (ylen * angle.sin() * sign, ylen * angle.cos() * sign);
    let c1 = Point::new(trunc(w * fm + dx), trunc(h * fm - dy));

    if draft.wavy {
        sign = -sign;
    }
    let ylen = flen + f64::from(adj2.y);
    let fm = (flen + f64::from(adj2.x)) / len;
    let (dx, dy) = (ylen * angle.sin() * sign, ylen * angle.cos() * sign);
    let c2 = Point::new(trunc(w - w * fm + dx), trunc(h - h * fm - dy));

    Ok(Curve { start, end, mid, c1, c2, clockwise: draft.clockwise })
}

impl Geometry for Curve {
    fn kind_name(&self) -> &'static str {
        "curve"
    }

    fn reference(&self) -> Point {
        self.mid
    }

    fn anchor(&self, anchor: Anchor, fraction: Fixed) -> Located {
        let fraction = match anchor {
            Anchor::Middle => 500,
            Anchor::Start | Anchor::End => fraction,
            _ => return Located::misapplied(Point::ZERO),
        };
        if fraction != 0 {
            let f = if anchor == Anchor::End { 1000 - fraction } else { fraction };
            Located::fractional(self.point_at(f64::from(f) / 1000.0))
        } else if anchor == Anchor::Start {
            Located::plain(self.start)
        } else {
            Located::plain(self.end)
        }
    }

    fn exit_point(&self, _direction: Direction) -> Point {
        self.end
    }

    fn default_justify(&self) -> Justify {
        Justify::Left
    }

    /// Eleven samples along the curve, each padded by the full thickness.
    fn extent(&self, thickness: Fixed, bbox: &mut BBox) {
        let pad = Point::splat(thickness);
        let mut t = 0.0;
        while t <= 1.0 {
            let p = self.point_at(t);
            bbox.expand_point(p - pad);
            bbox.expand_point(p + pad);
            t += 0.1;
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "curve from {} to {} c1 {} c2 {}", P(self.start), P(self.end), P(self.c1), P(self.c2))?;
        if self.clockwise {
            f.write_str(" clockwise")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    fn curve(draft: CurveDraft) -> Result<Curve, ErrorKind> {
        resolve(&draft, Placement::new(None, Direction::East))
    }

    #[test]
    fn needs_an_end() {
        assert_eq!(curve(CurveDraft::default()), Err(ErrorKind::CurveWithoutEnd));
    }

    #[test]
    fn zero_length_is_rejected() {
        let d = CurveDraft { to: Some(Point::ZERO), ..Default::default() };
        assert!(matches!(curve(d), Err(ErrorKind::CurveTooShort(_))));
    }

    #[test]
    fn default_control_points() {
        let d = CurveDraft { to: Some(pt(100_000, 0)), ..Default::default() };
        let c = curve(d).unwrap();
        assert_eq!(c.mid, pt(50_000, 0));
        assert_eq!(c.c1, pt(25_000, -25_000));
        assert_eq!(c.c2, pt(75_000, -25_000));
    }

    #[test]
    fn clockwise_and_wavy_flip_sides() {
        let d = CurveDraft { to: Some(pt(100_000, 0)), clockwise: true, wavy: true, ..Default::default() };
        let c = curve(d).unwrap();
        assert_eq!(c.c1, pt(25_000, 25_000));
        assert_eq!(c.c2, pt(75_000, -25_000));
    }

    #[test]
    fn endpoints_and_middle() {
        let c = curve(CurveDraft { to: Some(pt(100_000, 0)), ..Default::default() }).unwrap();
        assert_eq!(c.point_at(0.0), pt(0, 0));
        assert_eq!(c.point_at(1.0), pt(100_000, 0));
        assert_eq!(c.anchor(Anchor::Middle, 0).at, pt(50_000, -18_750));
        assert!(c.anchor(Anchor::Centre, 0).misapplied);
    }
}
