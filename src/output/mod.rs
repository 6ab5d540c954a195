//! The finished document and the post-pass consumers of the scene graph.
//!
//! Once reading completes the interpreter hands over a [`Document`]: the
//! items in creation order, the overall bounding box, any framing request,
//! the font bindings and the metadata variables. Renderers read everything
//! from here and never see the interpreter.

pub mod bbox;
pub mod format;
pub mod strings;

use crate::defaults::FONT_SIZE;
use crate::geometry::{Closed, ClosedKind};
use crate::scene::{Header, Item, SceneGraph, Shape, StringFragment};
use crate::types::{BBox, Colour, Dash, Fixed, Point, Style};
use crate::vars::VariableStore;

pub use format::{Rounder, fixed, small_arc};

/// A `bindfont` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontBinding {
    pub number: i32,
    pub name: String,
    /// Point size in fixed-point units.
    pub size: Fixed,
}

/// Font bindings in the order they were made. A later binding of the same
/// number shadows an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    bindings: Vec<FontBinding>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, binding: FontBinding) {
        self.bindings.push(binding);
    }

    pub fn find(&self, number: i32) -> Option<&FontBinding> {
        self.bindings.iter().rev().find(|b| b.number == number)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontBinding> {
        self.bindings.iter()
    }

    /// Spacing before `fragment`: the item's text depth or the font size,
    /// whichever is larger.
    pub fn line_depth(&self, header: &Header, fragment: &StringFragment) -> Fixed {
        let size = self.find(fragment.font).map_or(FONT_SIZE, |b| b.size);
        size.max(header.line_depth)
    }

    /// Half the font size, or the item's font depth if that is larger.
    pub fn font_depth(&self, header: &Header, fragment: &StringFragment) -> Fixed {
        let half = self.find(fragment.font).map_or(FONT_SIZE / 2, |b| b.size / 2);
        half.max(header.font_depth)
    }
}

/// A request to draw a frame around the whole picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Gap between the picture's extent and the frame.
    pub offset: Fixed,
    pub thickness: Fixed,
    pub colour: Colour,
    pub fill: Colour,
    pub dash: Option<Dash>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            offset: 0,
            thickness: crate::defaults::FRAME_THICKNESS,
            colour: Colour::BLACK,
            fill: Colour::UNFILLED,
            dash: None,
        }
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone)]
pub struct Document {
    pub scene: SceneGraph,
    /// Overall extent, frame offset included. Empty if nothing is drawn.
    pub bbox: BBox,
    pub frame: Option<Frame>,
    pub fonts: FontTable,
    /// Metadata and `set` variables (`creator`, `date`, `title`, ...).
    pub variables: VariableStore,
    pub min_level: i32,
    pub max_level: i32,
    /// Output rounding granularity.
    pub resolution: i32,
    pub minimum_thickness: Fixed,
}

impl Document {
    /// Assemble a document, computing its bounding box.
    pub fn new(
        scene: SceneGraph,
        frame: Option<Frame>,
        fonts: FontTable,
        variables: VariableStore,
        levels: (i32, i32),
        resolution: i32,
        minimum_thickness: Fixed,
    ) -> Self {
        let bbox = bbox::find_bbox(&scene, &fonts, frame.as_ref().map(|f| f.offset));
        Self {
            scene,
            bbox,
            frame,
            fonts,
            variables,
            min_level: levels.0,
            max_level: levels.1,
            resolution,
            minimum_thickness,
        }
    }

    /// Anchor of the string stack attached to `item`.
    pub fn string_anchor(&self, item: &Item) -> Point {
        strings::string_anchor(item, &self.fonts)
    }

    pub fn line_depth(&self, item: &Item, fragment: &StringFragment) -> Fixed {
        self.fonts.line_depth(&item.header, fragment)
    }

    pub fn font_depth(&self, item: &Item, fragment: &StringFragment) -> Fixed {
        self.fonts.font_depth(&item.header, fragment)
    }

    pub fn rounder(&self) -> Rounder {
        Rounder::new(self.resolution)
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name)
    }

    /// Items grouped by level, lowest level first, creation order within a
    /// level.
    pub fn items_by_level(&self) -> impl Iterator<Item = &Item> {
        (self.min_level..=self.max_level)
            .flat_map(move |level| self.scene.iter().filter(move |item| item.header.level == level))
    }

    /// The frame as a box item covering the bounding box, if one was asked
    /// for and anything was drawn.
    pub fn frame_item(&self) -> Option<Item> {
        let frame = self.frame.as_ref()?;
        if self.bbox.is_empty() {
            return None;
        }
        let closed = Closed {
            kind: ClosedKind::Box,
            centre: (self.bbox.min + self.bbox.max) / 2,
            width: self.bbox.width(),
            depth: self.bbox.depth(),
        };
        Some(Item {
            header: Header {
                level: self.min_level,
                style: Style::Visible,
                dash: frame.dash,
                line_depth: 0,
                font_depth: 0,
                thickness: frame.thickness,
                colour: frame.colour,
                fill: frame.fill,
                strings: Vec::new(),
            },
            shape: Shape::Closed(closed),
        })
    }
}
