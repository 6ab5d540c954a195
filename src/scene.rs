//! The scene graph: resolved items in creation order.

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::geometry::{Arc, Closed, Curve, Line, Located, Text};
use crate::output::format::fixed;
use crate::types::{Anchor, BBox, Colour, Dash, Direction, Fixed, Justify, Point, Style};

/// Index of an item in its [`SceneGraph`].
pub type ItemId = usize;

/// Geometry shared by every primitive kind.
#[enum_dispatch]
pub trait Geometry {
    /// Name used when an anchor is misapplied.
    fn kind_name(&self) -> &'static str;

    /// The item's reference point: centre of arcs and closed shapes, chord
    /// midpoint of curves, start of lines, position of text.
    fn reference(&self) -> Point;

    /// The point `anchor` names, with an optional fraction (thousandths)
    /// along the relevant edge or path.
    fn anchor(&self, anchor: Anchor, fraction: Fixed) -> Located;

    /// Where a following open path starts by default.
    fn exit_point(&self, direction: Direction) -> Point;

    fn default_justify(&self) -> Justify;

    /// Merge the outline's extent (strings excluded) into `bbox`.
    fn extent(&self, thickness: Fixed, bbox: &mut BBox);

    /// Geometry part of the textual dump.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

#[enum_dispatch(Geometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Arc(Arc),
    Curve(Curve),
    Closed(Closed),
    Line(Line),
    Text(Text),
}

/// One quoted string attached to an item.
#[derive(Debug, Clone, PartialEq)]
pub struct StringFragment {
    /// Decoded code points.
    pub chars: Vec<u32>,
    pub justify: Justify,
    /// Explicit rotation in thousandths of a degree, if one was given or
    /// carried over from the previous string.
    pub rotate: Option<Fixed>,
    /// Rotation in radians (0 when unset).
    pub rotation: f64,
    pub adjust: Point,
    pub font: i32,
    pub colour: Colour,
}

impl StringFragment {
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    /// The text, with undecodable code points replaced.
    pub fn text(&self) -> String {
        self.chars.iter().map(|&c| char::from_u32(c).unwrap_or('\u{fffd}')).collect()
    }
}

/// Properties common to every item.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: i32,
    pub style: Style,
    pub dash: Option<Dash>,
    /// Text line spacing from the environment.
    pub line_depth: Fixed,
    pub font_depth: Fixed,
    pub thickness: Fixed,
    pub colour: Colour,
    pub fill: Colour,
    pub strings: Vec<StringFragment>,
}

impl Header {
    pub fn is_invisible(&self) -> bool {
        self.style == Style::Invisible
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub header: Header,
    pub shape: Shape,
}

impl Item {
    pub fn reference(&self) -> Point {
        self.shape.reference()
    }
}

/// Items in the order they were created.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SceneGraph {
    items: Vec<Item>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) -> ItemId {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a SceneGraph {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Textual dump
// ============================================================================

pub(crate) struct P(pub Point);

impl fmt::Display for P {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", fixed(self.0.x), fixed(self.0.y))
    }
}

fn colour(c: Colour) -> String {
    if c.is_unfilled() {
        "none".to_string()
    } else {
        format!("{},{},{}", fixed(c.red), fixed(c.green), fixed(c.blue))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        if h.is_invisible() {
            f.write_str("invisible ")?;
        }
        self.shape.describe(f)?;
        if !matches!(self.shape, Shape::Text(_)) {
            write!(f, " thickness {}", fixed(h.thickness))?;
            if h.colour != Colour::BLACK {
                write!(f, " colour {}", colour(h.colour))?;
            }
            if !h.fill.is_unfilled() {
                write!(f, " fill {}", colour(h.fill))?;
            }
            if let Some(d) = h.dash {
                write!(f, " dash {},{}", fixed(d.on), fixed(d.off))?;
            }
        }
        if h.level != 0 {
            write!(f, " level {}", h.level)?;
        }
        for s in &h.strings {
            write!(f, "\n  {:?} {:?}", s.text(), s.justify)?;
            if s.adjust != Point::ZERO {
                write!(f, " adjust {}", P(s.adjust))?;
            }
            if let Some(r) = s.rotate {
                write!(f, " rotate {}", fixed(r))?;
            }
            if s.font != 0 {
                write!(f, " font {}", s.font)?;
            }
            if s.colour != Colour::BLACK {
                write!(f, " colour {}", colour(s.colour))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}
