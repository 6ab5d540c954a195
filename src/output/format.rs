//! Number formatting and curve approximation shared by renderers.

use crate::types::{Fixed, Point};

/// Format a fixed-point value with up to three decimals and no trailing
/// zeros: `-1500` is `-1.5`, `72000` is `72`.
pub fn fixed(value: Fixed) -> String {
    let v = i64::from(value);
    let sign = if v < 0 { "-" } else { "" };
    let v = v.abs();
    let (whole, frac) = (v / 1000, v % 1000);
    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let digits = format!("{frac:03}");
        format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Rounds dimensions to the output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounder {
    resolution: i32,
}

impl Rounder {
    /// A resolution of 0 or less is treated as 1.
    pub fn new(resolution: i32) -> Self {
        Self { resolution: resolution.max(1) }
    }

    /// Round to the nearest multiple of the resolution; exact halves go
    /// toward zero.
    pub fn round(&self, value: Fixed) -> Fixed {
        let res = i64::from(self.resolution);
        let v = i64::from(value);
        let mut quot = v.abs() / res;
        if v.abs() % res > res / 2 {
            quot += 1;
        }
        let rounded = quot * res;
        (if v < 0 { -rounded } else { rounded }) as Fixed
    }
}

/// Control offsets of a cubic Bézier approximating the elliptical arc with
/// radii `r1`, `r2` from `a1` to `a2` (less than a full turn).
///
/// All three points are relative to the arc's start point.
pub fn small_arc(r1: Fixed, r2: Fixed, a1: f64, a2: f64) -> [Point; 3] {
    let (r1, r2) = (f64::from(r1), f64::from(r2));
    let arp = 0.6667 * a1 + 0.3333 * a2;
    let arq = 0.3333 * a1 + 0.6667 * a2;

    let solve = |p0: f64, pp: f64, pq: f64, p3: f64| {
        let c = (18.0 * pp - 9.0 * pq + 2.0 * p3 - 11.0 * p0) / 2.0;
        let b = (-45.0 * pp + 36.0 * pq - 9.0 * p3 + 18.0 * p0) / 2.0;
        let p1 = p0 + c / 3.0;
        let p2 = p1 + (c + b) / 3.0;
        ((p1 - p0) as Fixed, (p2 - p0) as Fixed, (p3 - p0) as Fixed)
    };

    let (x1, x2, x3) = solve(r1 * a1.cos(), r1 * arp.cos(), r1 * arq.cos(), r1 * a2.cos());
    let (y1, y2, y3) = solve(r2 * a1.sin(), r2 * arp.sin(), r2 * arq.sin(), r2 * a2.sin());
    [Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3)]
}
