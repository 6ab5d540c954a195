//! Drawing defaults and their push/pop stack.

use crate::defaults;
use crate::lexer::magnify;
use crate::types::{Colour, Dash, Direction, Fixed};

/// One full record of drawing defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub arc_radius: Fixed,
    pub arrow_length: Fixed,
    pub arrow_width: Fixed,
    pub arrow_fill: Colour,

    pub box_width: Fixed,
    pub box_depth: Fixed,
    pub box_thickness: Fixed,
    pub box_dash: Dash,
    pub box_colour: Colour,
    pub box_fill: Colour,

    pub circle_radius: Fixed,
    pub circle_thickness: Fixed,
    pub circle_dash: Dash,
    pub circle_colour: Colour,
    pub circle_fill: Colour,

    pub ellipse_width: Fixed,
    pub ellipse_depth: Fixed,
    pub ellipse_thickness: Fixed,
    pub ellipse_dash: Dash,
    pub ellipse_colour: Colour,
    pub ellipse_fill: Colour,

    pub line_thickness: Fixed,
    pub line_dash: Dash,
    pub line_colour: Colour,
    /// Default horizontal line length.
    pub hline_length: Fixed,
    /// Default vertical line length.
    pub vline_length: Fixed,

    pub shape_fill: Colour,
    pub direction: Direction,

    pub font: i32,
    pub font_depth: Fixed,
    /// Text line spacing.
    pub line_depth: Fixed,
    pub text_colour: Colour,

    pub level: i32,
    pub magnification: Fixed,
}

impl Default for Environment {
    fn default() -> Self {
        let dash = Dash {
            on: defaults::DASH_ON,
            off: defaults::DASH_OFF,
        };
        Self {
            arc_radius: defaults::ARC_RADIUS,
            arrow_length: defaults::ARROW_LENGTH,
            arrow_width: defaults::ARROW_WIDTH,
            arrow_fill: Colour::UNFILLED,

            box_width: defaults::BOX_WIDTH,
            box_depth: defaults::BOX_DEPTH,
            box_thickness: defaults::BOX_THICKNESS,
            box_dash: dash,
            box_colour: Colour::BLACK,
            box_fill: Colour::UNFILLED,

            circle_radius: defaults::CIRCLE_RADIUS,
            circle_thickness: defaults::THICKNESS,
            circle_dash: dash,
            circle_colour: Colour::BLACK,
            circle_fill: Colour::UNFILLED,

            ellipse_width: defaults::ELLIPSE_WIDTH,
            ellipse_depth: defaults::ELLIPSE_DEPTH,
            ellipse_thickness: defaults::THICKNESS,
            ellipse_dash: dash,
            ellipse_colour: Colour::BLACK,
            ellipse_fill: Colour::UNFILLED,

            line_thickness: defaults::THICKNESS,
            line_dash: dash,
            line_colour: Colour::BLACK,
            hline_length: defaults::LINE_LENGTH,
            vline_length: defaults::LINE_DROP,

            shape_fill: Colour::UNFILLED,
            direction: Direction::East,

            font: 0,
            font_depth: defaults::FONT_DEPTH,
            line_depth: defaults::LINE_DEPTH,
            text_colour: Colour::BLACK,

            level: 0,
            magnification: defaults::MAGNIFICATION,
        }
    }
}

impl Environment {
    /// Magnify a freshly read dimension.
    pub fn mag(&self, value: Fixed) -> Fixed {
        magnify(value, self.magnification)
    }

    /// Scale every stored dimension, the magnification included, by
    /// `factor`/1000. Font depth is left alone.
    pub fn magnify(&mut self, factor: Fixed) {
        let scale = |v: &mut Fixed| *v = magnify(*v, factor);
        for v in [
            &mut self.arc_radius,
            &mut self.arrow_length,
            &mut self.arrow_width,
            &mut self.box_width,
            &mut self.box_depth,
            &mut self.box_thickness,
            &mut self.box_dash.on,
            &mut self.box_dash.off,
            &mut self.circle_radius,
            &mut self.circle_thickness,
            &mut self.circle_dash.on,
            &mut self.circle_dash.off,
            &mut self.ellipse_width,
            &mut self.ellipse_depth,
            &mut self.ellipse_thickness,
            &mut self.ellipse_dash.on,
            &mut self.ellipse_dash.off,
            &mut self.line_thickness,
            &mut self.line_dash.on,
            &mut self.line_dash.off,
            &mut self.hline_length,
            &mut self.vline_length,
            &mut self.line_depth,
            &mut self.magnification,
        ] {
            scale(v);
        }
    }
}

/// Stack of environments. Never empty: the initial record cannot be popped.
#[derive(Debug, Clone)]
pub struct EnvironmentStack {
    records: Vec<Environment>,
}

impl Default for EnvironmentStack {
    fn default() -> Self {
        Self {
            records: vec![Environment::default()],
        }
    }
}

impl EnvironmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> &Environment {
        self.records.last().unwrap_or_else(|| unreachable!("environment stack is never empty"))
    }

    pub fn top_mut(&mut self) -> &mut Environment {
        self.records.last_mut().unwrap_or_else(|| unreachable!("environment stack is never empty"))
    }

    /// Duplicate the current record.
    pub fn push(&mut self) {
        let copy = self.top().clone();
        self.records.push(copy);
    }

    /// Restore the previous record. False if only the initial one is left.
    pub fn pop(&mut self) -> bool {
        if self.records.len() > 1 {
            self.records.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.records.len()
    }
}
