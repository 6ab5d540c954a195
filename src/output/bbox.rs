//! Overall extent of a scene.
//!
//! String widths are guessed: half the font size per character, since no
//! glyph metrics are available. The guess is generous for lower case and
//! short for capitals.

use super::FontTable;
use super::strings::string_anchor;
use crate::geometry::trunc;
use crate::scene::{Geometry, Item, SceneGraph};
use crate::types::{BBox, Fixed, Justify, Point};

/// Per-character width used when a string's font was never bound.
const UNBOUND_CHAR_WIDTH: Fixed = 6_000;

/// Extent of every drawn item and its strings, padded by the frame offset
/// when a frame was requested.
pub fn find_bbox(scene: &SceneGraph, fonts: &FontTable, frame_offset: Option<Fixed>) -> BBox {
    let mut bbox = BBox::new();
    for item in scene {
        let h = &item.header;
        if h.is_invisible() && h.strings.is_empty() && h.fill.is_unfilled() {
            continue;
        }
        item.shape.extent(h.thickness, &mut bbox);
        strings_extent(item, fonts, &mut bbox);
    }
    if let Some(offset) = frame_offset {
        bbox.pad(offset);
    }
    bbox
}

/// Merge the guessed extent of an item's string stack.
fn strings_extent(item: &Item, fonts: &FontTable, bbox: &mut BBox) {
    let strings = &item.header.strings;
    if strings.is_empty() {
        return;
    }
    let mut at = string_anchor(item, fonts);

    for (i, s) in strings.iter().enumerate() {
        let mut len = s.char_count() as Fixed;
        let mut depth = item.header.font_depth;
        match fonts.find(s.font) {
            Some(font) => {
                len = len.saturating_mul(font.size / 2);
                depth = depth.max(font.size / 2);
            }
            None => len = len.saturating_mul(UNBOUND_CHAR_WIDTH),
        }

        let shift = match s.justify {
            Justify::Centre => len / 2,
            Justify::Right => len,
            Justify::Left => 0,
        };
        let mut corner = Point::new(at.x - shift, at.y - depth / 2);
        let mut size = Point::new(len, depth.saturating_mul(2));

        if s.rotate.unwrap_or(0) != 0 {
            let (sin, cos) = s.rotation.sin_cos();
            let rel = (corner - at).as_dvec2();
            let (w, d) = (f64::from(size.x), f64::from(size.y));
            let rotated = Point::new(trunc(rel.x * cos - rel.y * sin), trunc(rel.y * cos + rel.x * sin));
            corner = Point::new(rotated.x - trunc(d * sin), rotated.y);
            size = Point::new(trunc(d * sin + w * cos), trunc(w * sin + d * cos));
        }

        bbox.expand_rect(corner, size);

        if let Some(next) = strings.get(i + 1) {
            let step = fonts.line_depth(&item.header, next);
            if next.rotate.unwrap_or(0) == 0 {
                at.y -= step;
            } else {
                at.y -= trunc(f64::from(step) * next.rotation.cos());
                at.x += trunc(f64::from(step) * next.rotation.sin());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Arrows, Closed, ClosedKind, Line, Text};
    use crate::output::FontBinding;
    use crate::scene::{Header, Shape, StringFragment};
    use crate::types::{Colour, Style, pt};

    fn header(style: Style) -> Header {
        Header {
            level: 0,
            style,
            dash: None,
            line_depth: 12_000,
            font_depth: 6_000,
            thickness: 500,
            colour: Colour::BLACK,
            fill: Colour::UNFILLED,
            strings: Vec::new(),
        }
    }

    fn boxed(centre: Point, style: Style) -> Item {
        Item {
            header: header(style),
            shape: Shape::Closed(Closed { kind: ClosedKind::Box, centre, width: 72_000, depth: 36_000 }),
        }
    }

    fn text(s: &str, font: i32) -> StringFragment {
        StringFragment {
            chars: s.chars().map(u32::from).collect(),
            justify: Justify::Centre,
            rotate: None,
            rotation: 0.0,
            adjust: Point::ZERO,
            font,
            colour: Colour::BLACK,
        }
    }

    fn scene(items: Vec<Item>) -> SceneGraph {
        let mut scene = SceneGraph::new();
        for item in items {
            scene.push(item);
        }
        scene
    }

    #[test]
    fn box_is_padded_by_half_thickness() {
        let bbox = find_bbox(&scene(vec![boxed(pt(0, 0), Style::Visible)]), &FontTable::new(), None);
        assert_eq!(bbox.min, pt(-36_250, -18_250));
        assert_eq!(bbox.max, pt(36_250, 18_250));
    }

    #[test]
    fn invisible_unlabelled_items_are_skipped() {
        let bbox = find_bbox(&scene(vec![boxed(pt(0, 0), Style::Invisible)]), &FontTable::new(), None);
        assert!(bbox.is_empty());
    }

    #[test]
    fn frame_offset_pads_every_side() {
        let bbox = find_bbox(&scene(vec![boxed(pt(0, 0), Style::Visible)]), &FontTable::new(), Some(5_000));
        assert_eq!(bbox.min, pt(-41_250, -23_250));
        assert_eq!(bbox.max, pt(41_250, 23_250));
    }

    #[test]
    fn adding_an_item_never_shrinks() {
        let fonts = FontTable::new();
        let one = find_bbox(&scene(vec![boxed(pt(0, 0), Style::Visible)]), &fonts, None);
        let line = Item {
            header: header(Style::Visible),
            shape: Shape::Line(Line { start: pt(0, 0), size: pt(10_000, 0), arrows: Arrows::default() }),
        };
        let two = find_bbox(&scene(vec![boxed(pt(0, 0), Style::Visible), line]), &fonts, None);
        assert!(two.min.x <= one.min.x && two.min.y <= one.min.y);
        assert!(two.max.x >= one.max.x && two.max.y >= one.max.y);
    }

    #[test]
    fn centred_text_uses_unbound_width() {
        let mut item = Item { header: header(Style::Visible), shape: Shape::Text(Text { at: pt(0, 0) }) };
        item.header.strings.push(text("abcd", 0));
        let bbox = find_bbox(&scene(vec![item]), &FontTable::new(), None);
        // Four characters at 6pt, centred on an anchor lowered by half the
        // font depth.
        assert_eq!(bbox.min, pt(-12_000, -6_000));
        assert_eq!(bbox.max, pt(12_000, 6_000));
    }

    #[test]
    fn bound_font_sets_width_and_depth() {
        let mut fonts = FontTable::new();
        fonts.bind(FontBinding { number: 1, name: "Times".into(), size: 20_000 });
        let mut item = Item { header: header(Style::Visible), shape: Shape::Text(Text { at: pt(0, 0) }) };
        item.header.strings.push(text("ab", 1));
        let bbox = find_bbox(&scene(vec![item]), &fonts, None);
        assert_eq!(bbox.min.x, -10_000);
        assert_eq!(bbox.max.x, 10_000);
        assert_eq!(bbox.depth(), 20_000);
    }

    #[test]
    fn oversized_fonts_saturate() {
        let mut fonts = FontTable::new();
        fonts.bind(FontBinding { number: 1, name: "Huge".into(), size: 2_000_000_000 });
        let mut item = Item { header: header(Style::Visible), shape: Shape::Text(Text { at: pt(0, 0) }) };
        item.header.font_depth = 1_500_000_000;
        item.header.strings.push(text("abc", 1));
        let bbox = find_bbox(&scene(vec![item]), &fonts, None);
        assert_eq!(bbox.min.y, -1_500_000_000);
        assert_eq!(bbox.max.y, -1_500_000_000 + i32::MAX);
        assert!(bbox.min.x < 0 && bbox.max.x > 0);
    }
}
