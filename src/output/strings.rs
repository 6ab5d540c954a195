//! Where an item's strings go.
//!
//! The anchor computed here belongs to the middle string of the stack; the
//! strings above it are accounted for by raising the anchor one line depth
//! each, so a renderer can draw the first string at the returned point and
//! step down from there.

use std::f64::consts::PI;

use super::FontTable;
use crate::geometry::trunc;
use crate::scene::{Item, Shape};
use crate::types::{Fixed, Point};

/// Gap between a sloping line and its strings.
const LINE_GAP: Fixed = 3_000;
/// Gap between an arc and its strings.
const ARC_GAP: Fixed = 6_000;
/// Lift for a single string above a horizontal line.
const LINE_LIFT: Fixed = 2_000;

/// Anchor point for the string stack attached to `item`.
pub fn string_anchor(item: &Item, fonts: &FontTable) -> Point {
    let header = &item.header;
    let strings = &header.strings;
    let Some(first) = strings.first() else {
        return item.reference();
    };
    let n = strings.len();
    let mid_index = ((n + 1) / 2).saturating_sub(1);
    let mid = strings.get(mid_index).unwrap_or(first);
    let even = n % 2 == 0;

    let line_depth = fonts.line_depth(header, mid);
    let font_depth = fonts.font_depth(header, mid);
    let mut at = item.reference();

    match &item.shape {
        Shape::Line(line) => {
            at.x += line.size.x / 2;
            if line.size.y == 0 {
                at.y += if n == 1 { LINE_LIFT } else { line_depth / 2 - font_depth / 2 };
            } else {
                at.x += LINE_GAP;
                at.y += line.size.y / 2 - font_depth / 2;
                if even {
                    at.y += line_depth / 2;
                }
            }
        }
        Shape::Arc(arc) => {
            let radius = f64::from(arc.radius);
            let mut angle = (arc.start_angle + arc.end_angle) / 2.0;
            if arc.start_angle > arc.end_angle {
                angle += PI;
            }
            if arc.clockwise {
                angle += PI;
            }
            at.x += trunc(radius * angle.cos()) + ARC_GAP;
            at.y += trunc(radius * angle.sin());
            let angle = angle.abs();
            if angle > 3.0 * PI / 8.0 && angle < 5.0 * PI / 8.0 {
                at.y += font_depth / 2 + LINE_LIFT;
            }
            if !even {
                at.y -= font_depth / 2;
            }
        }
        Shape::Curve(_) => {}
        Shape::Closed(_) | Shape::Text(_) => {
            at.y -= font_depth / 2;
            if even {
                at.y += line_depth / 2;
            }
        }
    }

    for next in strings.iter().skip(1).take(mid_index) {
        at.y += fonts.line_depth(header, next);
    }
    at
}
