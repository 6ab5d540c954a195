//! Quoted strings attached to items.

use std::f64::consts::PI;

use super::Reader;
use crate::errors::{ErrorKind, ReadResult};
use crate::scene::StringFragment;
use crate::types::{Colour, Fixed, Justify, Point};

impl Reader<'_> {
    /// Read every string that follows, in stacking order. A string without
    /// its own rotation takes the last one given.
    pub(crate) fn read_string_chain(&mut self, justify: Justify) -> ReadResult<Vec<StringFragment>> {
        let mut strings = Vec::new();
        let mut last_rotate: Fixed = 0;
        while self.input.ch() == b'"' {
            let mut fragment = self.read_string(justify)?;
            match fragment.rotate {
                Some(r) => last_rotate = r,
                None if last_rotate != 0 => fragment.rotate = Some(last_rotate),
                None => {}
            }
            fragment.rotation = f64::from(fragment.rotate.unwrap_or(0)) * PI / 180_000.0;
            strings.push(fragment);
        }
        Ok(strings)
    }

    /// One string, starting on its opening quote, with its adjustment vector
    /// and `/` qualifiers.
    fn read_string(&mut self, mut justify: Justify) -> ReadResult<StringFragment> {
        let env = self.envs.top();
        let mut font = env.font;
        let mut colour = env.text_colour;
        let magnification = env.magnification;
        let mut rotate = None;
        let mut adjust = Point::ZERO;

        let mut chars = Vec::new();
        loop {
            let c = self.input.next_uchar();
            if c == u32::from(b'\n') || c == 0 {
                self.input.report(ErrorKind::MissingQuote)?;
                break;
            }
            if c == u32::from(b'"') {
                self.input.bump();
                if self.input.ch() != b'"' {
                    break;
                }
            }
            chars.push(c);
        }

        if self.input.ch() == b'(' {
            adjust = self.input.read_vector(magnification)?;
        }

        while self.input.ch() == b'/' {
            self.input.bump();
            let c = self.input.ch();

            if matches!(c, b'l' | b'r' | b'c') && {
                self.input.bump();
                let next = self.input.ch();
                next == b'/' || next == b';' || next.is_ascii_whitespace()
            } {
                justify = match c {
                    b'l' => Justify::Left,
                    b'r' => Justify::Right,
                    _ => Justify::Centre,
                };
            } else if c == b'+' || c == b'-' {
                rotate = Some(self.input.read_number()?);
            } else if c.is_ascii_digit() {
                let line = self.input.line();
                let digits = line[self.input.pos()..].iter().take_while(|b| b.is_ascii_digit()).count();
                let fractional = self.input.at(self.input.pos() + digits) == b'.';

                let value = self.input.read_number()?;
                if !fractional && self.input.ch() != b',' {
                    font = value / 1000;
                } else {
                    colour = Colour::grey(value);
                    if self.input.ch() == b',' {
                        self.input.bump();
                        colour.green = self.input.read_number()?;
                        if self.input.ch() == b',' {
                            self.input.bump();
                            colour.blue = self.input.read_number()?;
                        }
                    }
                    if colour.out_of_range() {
                        self.input.report(ErrorKind::ColourOutOfRange)?;
                    }
                }
            } else {
                self.input
                    .report(ErrorKind::Expected("/l, /r, /c, /<font>, /{+-}<rotate>, or /<r>,<g>,<b>"))?;
            }
        }

        if !self.fonts.is_empty() && self.fonts.find(font).is_none() {
            self.input.report(ErrorKind::UnboundFont(font))?;
            font = 0;
        }

        self.input.skip_space()?;
        Ok(StringFragment {
            chars,
            justify,
            rotate,
            rotation: 0.0,
            adjust,
            font,
            colour,
        })
    }
}
