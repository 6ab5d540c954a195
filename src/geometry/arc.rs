//! Circular arcs.
//!
//! An arc can be pinned down in three ways:
//!
//! - **Start only**: the arc leaves the start point heading in the arc's
//!   (or the environment's) direction, turning left (right when clockwise)
//!   through the given angle on the given radius.
//! - **End given**: the chord from start to end plus exactly one of angle,
//!   radius, depth or via point fixes the centre. With none of them the arc
//!   is a quarter circle.
//! - **Neither**: the arc continues smoothly from the previous item.
//!
//! Angles are radians measured anticlockwise from the positive x axis. A
//! clockwise arc has `end_angle < start_angle`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use super::{Arrows, Located, Placement, Resolved, trunc};
use crate::errors::ErrorKind;
use crate::log::warn;
use crate::output::format::fixed;
use crate::scene::{Geometry, P, Shape};
use crate::types::{Anchor, BBox, Direction, Fixed, Justify, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub centre: Point,
    pub radius: Fixed,
    /// Possibly trimmed to make room for an arrowhead.
    pub start_angle: f64,
    /// Possibly trimmed to make room for an arrowhead.
    pub end_angle: f64,
    pub start: Point,
    pub end: Point,
    pub clockwise: bool,
    pub arrows: Arrows,
}

/// Options gathered for an arc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcDraft {
    pub from: Option<Point>,
    pub to: Option<Point>,
    pub clockwise: bool,
    pub radius: Option<Fixed>,
    /// Sweep in thousandths of a degree.
    pub angle: Option<Fixed>,
    pub depth: Option<Fixed>,
    pub via: Option<Point>,
    pub direction: Option<Direction>,
}

/// Starting angle for an arc that sets off heading `direction`.
fn heading(direction: Direction, cwangle: f64) -> f64 {
    match direction {
        Direction::North => cwangle,
        Direction::South => cwangle - PI,
        Direction::East => cwangle - FRAC_PI_2,
        Direction::West => cwangle + FRAC_PI_2,
    }
}

fn on_circle(centre: Point, radius: f64, angle: f64) -> Point {
    centre + Point::new(trunc(radius * angle.cos()), trunc(radius * angle.sin()))
}

pub fn resolve(draft: &ArcDraft, place: Placement<'_>, default_radius: Fixed, arrows: Arrows) -> Resolved<Arc> {
    let mut issues = Vec::new();
    let (cwangle, sign) = if draft.clockwise { (PI, -1) } else { (0.0, 1) };
    let fsign = f64::from(sign);
    let sweep = draft.angle.map(|a| f64::from(a) * PI / 180_000.0);

    let (centre, radius, radius_f, mut start_angle, mut end_angle, start, end) = match (draft.from, draft.to) {
        (Some(start), None) => {
            if draft.depth.is_some() || draft.via.is_some() {
                issues.push(ErrorKind::ArcWithoutEnd);
            }
            let sweep = sweep.unwrap_or(FRAC_PI_2);
            let radius = draft.radius.unwrap_or(default_radius);
            let r = f64::from(radius);
            let direction = draft.direction.unwrap_or(place.direction);
            let a1 = heading(direction, cwangle);
            let centre = start
                + match direction {
                    Direction::North => Point::new(-sign * radius, 0),
                    Direction::South => Point::new(sign * radius, 0),
                    Direction::East => Point::new(0, sign * radius),
                    Direction::West => Point::new(0, -sign * radius),
                };
            let a2 = a1 + fsign * sweep;
            (centre, radius, r, a1, a2, start, on_circle(centre, r, a2))
        }

        (from, Some(end)) => {
            let start = from.unwrap_or_else(|| exit_start(place, draft.direction));
            let d = end - start;
            let (xx, yy) = (f64::from(d.x), f64::from(d.y));
            let angle = yy.atan2(xx);
            let len1 = 0.5 * xx.hypot(yy);

            let unconstrained =
                draft.angle.is_none() && draft.radius.is_none() && draft.depth.is_none() && draft.via.is_none();
            let sweep = if unconstrained { Some(FRAC_PI_2) } else { sweep };

            let mut comp = 1.0;
            let mut centresign = 1;
            let mut r = if let Some(sweep) = sweep {
                if draft.radius.is_some() || draft.depth.is_some() || draft.via.is_some() {
                    issues.push(ErrorKind::ArcOverConstrained);
                }
                if sweep > PI {
                    comp = -1.0;
                }
                len1 / (sweep / 2.0).sin()
            } else if let Some(radius) = draft.radius {
                if draft.depth.is_some() || draft.via.is_some() {
                    issues.push(ErrorKind::ArcOverConstrained);
                }
                f64::from(radius)
            } else {
                let depth = match draft.via {
                    Some(via) => {
                        if draft.depth.is_some() {
                            issues.push(ErrorKind::ArcOverConstrained);
                        }
                        depth_through(via - start, angle, len1, draft.clockwise).unwrap_or_else(|| {
                            issues.push(ErrorKind::ImpossibleVia);
                            trunc(len1)
                        })
                    }
                    None => draft.depth.unwrap_or(0),
                };
                if f64::from(depth) > len1 {
                    centresign = -1;
                }
                (len1 * len1 + f64::from(depth) * f64::from(depth)) / (2.0 * f64::from(depth))
            };

            let mut radius = trunc(r);
            if len1 > r {
                warn!(radius = r, half_chord = len1, "arc radius too small for its chord; using minimum");
                r = len1;
                radius = trunc(r);
            }

            let len2 = comp * (r * r - len1 * len1).sqrt();
            let turn = centresign * sign;
            let centre = (start + end) / 2 + Point::new(-turn * trunc(len2 * angle.sin()), turn * trunc(len2 * angle.cos()));
            let to_start = start - centre;
            let to_end = end - centre;
            let a1 = f64::from(to_start.y).atan2(f64::from(to_start.x));
            let a2 = f64::from(to_end.y).atan2(f64::from(to_end.x));
            (centre, radius, r, a1, a2, start, end)
        }

        (None, None) => {
            if draft.depth.is_some() || draft.via.is_some() {
                issues.push(ErrorKind::ArcWithoutEnd);
            }
            let sweep = sweep.unwrap_or(FRAC_PI_2);
            let radius = draft.radius.unwrap_or(default_radius);
            let r = f64::from(radius);
            let (centre, a1) = continue_from(place, draft, radius, cwangle, sign);
            let a2 = a1 + fsign * sweep;
            (centre, radius, r, a1, a2, on_circle(centre, r, a1), on_circle(centre, r, a2))
        }
    };

    let trim = fsign * 2.0 * (f64::from(arrows.length) / (2.0 * radius_f)).asin();
    if arrows.start {
        start_angle += trim;
    }
    if arrows.end {
        end_angle -= trim;
    }

    Resolved {
        shape: Arc {
            centre,
            radius,
            start_angle,
            end_angle,
            start,
            end,
            clockwise: draft.clockwise,
            arrows,
        },
        issues,
    }
}

/// Default start of an arc or curve given an end point: where the previous
/// item leaves off.
fn exit_start(place: Placement<'_>, direction: Option<Direction>) -> Point {
    match place.base {
        Some(base) => base.exit_point(direction.unwrap_or(place.direction)),
        None => Point::ZERO,
    }
}

/// Depth of the arc through `via` (relative to the start) on a chord of
/// half-length `len1` at `angle`. None if the via point is on the chord or
/// on the wrong side of it for the arc's sense.
fn depth_through(via: Point, angle: f64, len1: f64, clockwise: bool) -> Option<Fixed> {
    let (xxx, yyy) = (f64::from(via.x), f64::from(via.y));
    let (s, c) = angle.sin_cos();
    let zzz = xxx * s - yyy * c;
    let ttt = xxx * c + yyy * s;
    if zzz.abs() < 0.001 || (clockwise && zzz > 0.0) || (!clockwise && zzz < 0.0) {
        return None;
    }
    let beta = (2.0 * len1 - ttt).atan2(zzz) + ttt.atan2(zzz);
    Some(trunc((len1 / (0.5 * beta).tan()).abs()))
}

/// Centre and start angle for an arc with neither end given.
fn continue_from(place: Placement<'_>, draft: &ArcDraft, radius: Fixed, cwangle: f64, sign: i32) -> (Point, f64) {
    let r = f64::from(radius);
    let Some(base) = place.base else {
        return (Point::ZERO, heading(draft.direction.unwrap_or(Direction::North), cwangle));
    };

    // Tangent continuation from a path ending at `end` with heading `angle`.
    let tangent = |end: Point, angle: f64| {
        let a1 = cwangle - (FRAC_PI_2 - angle);
        let centre = end + Point::new(-sign * trunc(r * angle.sin()), sign * trunc(r * angle.cos()));
        (centre, a1)
    };
    let compass = |default: f64| match draft.direction {
        Some(Direction::North) => FRAC_PI_2,
        Some(Direction::South) => -FRAC_PI_2,
        Some(Direction::East) => 0.0,
        Some(Direction::West) => PI,
        None => default,
    };

    match base {
        Shape::Arc(last) => {
            let cwangle = if last.clockwise {
                if draft.clockwise { 0.0 } else { PI }
            } else {
                cwangle
            };
            let a1 = match draft.direction {
                None => {
                    let v = last.end - last.centre;
                    f64::from(v.y).atan2(f64::from(v.x)) - cwangle
                }
                Some(d) => heading(d, cwangle),
            };
            (last.end - Point::new(trunc(r * a1.cos()), trunc(r * a1.sin())), a1)
        }
        Shape::Line(line) => {
            let angle = compass(f64::from(line.size.y).atan2(f64::from(line.size.x)));
            tangent(line.end(), angle)
        }
        Shape::Curve(curve) => {
            let into_end = curve.end - (curve.start + curve.c2);
            let angle = compass(f64::from(into_end.y).atan2(f64::from(into_end.x)));
            tangent(curve.end, angle)
        }
        Shape::Closed(b) => {
            let (w2, d2) = (b.width / 2, b.depth / 2);
            match draft.direction.unwrap_or(place.direction) {
                Direction::North => (b.centre + Point::new(-sign * radius, d2), cwangle),
                Direction::South => (b.centre + Point::new(sign * radius, -d2), PI - cwangle),
                Direction::East => (b.centre + Point::new(w2, sign * radius), cwangle - FRAC_PI_2),
                Direction::West => (b.centre + Point::new(-w2, -sign * radius), cwangle + FRAC_PI_2),
            }
        }
        Shape::Text(t) => (t.at, 0.0),
    }
}

impl Geometry for Arc {
    fn kind_name(&self) -> &'static str {
        "arc"
    }

    fn reference(&self) -> Point {
        self.centre
    }

    fn anchor(&self, anchor: Anchor, fraction: Fixed) -> Located {
        let fraction = match anchor {
            Anchor::Centre => return Located::plain(self.centre),
            Anchor::Middle => 500,
            Anchor::Start | Anchor::End => fraction,
            _ => return Located::misapplied(Point::ZERO),
        };
        if fraction != 0 {
            let f = if anchor == Anchor::End { 1000 - fraction } else { fraction };
            let angle = self.start_angle + f64::from(f) * (self.end_angle - self.start_angle) / 1000.0;
            Located::fractional(on_circle(self.centre, f64::from(self.radius), angle))
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

    /// Chord ends plus any axis extreme the sweep passes through. The
    /// stroke thickness is not included.
    fn extent(&self, _thickness: Fixed, bbox: &mut BBox) {
        let (mut a1, mut a2) = (self.start_angle, self.end_angle);
        if self.clockwise {
            std::mem::swap(&mut a1, &mut a2);
        }
        while a1 > a2 {
            a2 += TAU;
        }
        while a2 > TAU {
            a1 -= TAU;
            a2 -= TAU;
        }
        while a2 < 0.0 {
            a1 += TAU;
            a2 += TAU;
        }

        let r = self.radius;
        let rf = f64::from(r);
        let (mut bx, mut by) = (trunc(rf * a1.cos()), trunc(rf * a1.sin()));
        let (mut cx, mut cy) = (trunc(rf * a2.cos()), trunc(rf * a2.sin()));

        if a1 < 0.0 {
            cx = cx.min(bx);
            bx = r;
        }
        if a1 < -PI || (a1 < PI && a2 > PI) {
            bx = bx.max(cx);
            cx = -r;
        }
        if a1 < -1.5 * PI || (a1 < FRAC_PI_2 && a2 > FRAC_PI_2) {
            cy = cy.min(by);
            by = r;
        }
        if a1 < -FRAC_PI_2 || (a1 < 1.5 * PI && a2 > 1.5 * PI) {
            by = by.max(cy);
            cy = -r;
        }

        bbox.expand_rect(self.centre + Point::new(bx, by), Point::new(cx - bx, cy - by));
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arc centre {} radius {} from {} to {} angles {:.4}..{:.4}",
            P(self.centre),
            fixed(self.radius),
            P(self.start),
            P(self.end),
            self.start_angle,
            self.end_angle
        )?;
        if self.clockwise {
            f.write_str(" clockwise")?;
        }
        match (self.arrows.start, self.arrows.end) {
            (true, true) => f.write_str(" arrows both")?,
            (true, false) => f.write_str(" arrow start")?,
            (false, true) => f.write_str(" arrow end")?,
            (false, false) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use crate::types::pt;

    fn arc(draft: ArcDraft, base: Option<&Shape>) -> Resolved<Arc> {
        resolve(&draft, Placement::new(base, Direction::East), 36_000, Arrows::default())
    }

    #[test]
    fn quarter_circle_from_origin() {
        let r = arc(ArcDraft::default(), None);
        let a = r.shape;
        assert_eq!(a.centre, Point::ZERO);
        assert_eq!(a.start, pt(36_000, 0));
        assert_eq!(a.end, pt(0, 36_000));
        assert!(r.issues.is_empty());
    }

    #[test]
    fn radius_sets_centre_offset_from_chord() {
        let d = ArcDraft { from: Some(pt(0, 0)), to: Some(pt(100_000, 0)), radius: Some(100_000), ..Default::default() };
        let a = arc(d, None).shape;
        assert_eq!(a.centre.x, 50_000);
        let expected = (100_000f64.powi(2) - 50_000f64.powi(2)).sqrt();
        assert!((f64::from(a.centre.y) - expected).abs() <= 1.0, "{a:?}");
        assert_eq!(a.radius, 100_000);
    }

    #[test]
    fn very_deep_arc_keeps_its_radius() {
        let depth = 1_500_000_000;
        let d = ArcDraft { from: Some(pt(0, 0)), to: Some(pt(10_000, 0)), depth: Some(depth), ..Default::default() };
        let r = arc(d, None);
        assert!(r.issues.is_empty());
        let expected = (25_000_000.0 + f64::from(depth).powi(2)) / (2.0 * f64::from(depth));
        assert!((f64::from(r.shape.radius) - expected).abs() <= 1.0, "{:?}", r.shape);
    }

    #[test]
    fn small_radius_is_raised_to_half_chord() {
        let d = ArcDraft { from: Some(pt(0, 0)), to: Some(pt(100_000, 0)), radius: Some(10_000), ..Default::default() };
        let a = arc(d, None).shape;
        assert_eq!(a.radius, 50_000);
        assert_eq!(a.centre, pt(50_000, 0));
    }

    #[test]
    fn too_many_constraints() {
        let d = ArcDraft {
            to: Some(pt(100_000, 0)),
            radius: Some(100_000),
            depth: Some(10_000),
            ..Default::default()
        };
        assert_eq!(arc(d, None).issues, vec![ErrorKind::ArcOverConstrained]);
    }

    #[test]
    fn depth_without_end() {
        let d = ArcDraft { depth: Some(10_000), ..Default::default() };
        assert_eq!(arc(d, None).issues, vec![ErrorKind::ArcWithoutEnd]);
    }

    #[test]
    fn via_on_chord_is_impossible() {
        let d = ArcDraft { from: Some(pt(0, 0)), to: Some(pt(100_000, 0)), via: Some(pt(50_000, 0)), ..Default::default() };
        assert_eq!(arc(d, None).issues, vec![ErrorKind::ImpossibleVia]);
    }

    #[test]
    fn continues_tangentially_from_line() {
        let line = Shape::Line(Line { start: pt(0, 0), size: pt(72_000, 0), arrows: Arrows::default() });
        let a = arc(ArcDraft::default(), Some(&line)).shape;
        assert_eq!(a.centre, pt(72_000, 36_000));
        assert_eq!(a.start, pt(72_000, 0));
    }

    #[test]
    fn quarter_arc_extent() {
        let a = arc(ArcDraft::default(), None).shape;
        let mut bbox = BBox::new();
        a.extent(0, &mut bbox);
        assert_eq!(bbox.min, pt(0, 0));
        assert_eq!(bbox.max, pt(36_000, 36_000));
    }

    #[test]
    fn middle_anchor() {
        let a = arc(ArcDraft::default(), None).shape;
        let m = a.anchor(Anchor::Middle, 0);
        assert!(m.used_fraction);
        assert_eq!(m.at, pt(25_455, 25_455));
        assert!(a.anchor(Anchor::North, 0).misapplied);
    }
}
