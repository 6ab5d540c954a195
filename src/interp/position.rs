//! Positions: explicit vectors or named points on earlier items.

use super::Reader;
use crate::errors::{ErrorKind, ReadResult};
use crate::scene::Geometry;
use crate::types::{Anchor, Fixed, Point};

impl Reader<'_> {
    /// Read a join word such as `top left` or `centre`. `start`, `end` and
    /// `middle` are only accepted when `positional`. Without a match the
    /// word is either complained about or pushed back.
    pub(crate) fn read_join(&mut self, positional: bool, complain: bool) -> ReadResult<Option<Anchor>> {
        let word = self.input.read_word()?;
        let anchor = match word.as_str() {
            "" => {
                self.input.report(ErrorKind::Expected("word"))?;
                Some(Anchor::North)
            }
            "top" | "bottom" => {
                let top = word == "top";
                let next = self.input.read_word()?;
                Some(match (top, next.as_str()) {
                    (true, "right") => Anchor::NorthEast,
                    (true, "left") => Anchor::NorthWest,
                    (false, "right") => Anchor::SouthEast,
                    (false, "left") => Anchor::SouthWest,
                    _ => {
                        self.input.unread(next);
                        if top { Anchor::North } else { Anchor::South }
                    }
                })
            }
            "left" => Some(Anchor::West),
            "right" => Some(Anchor::East),
            "centre" | "center" => Some(Anchor::Centre),
            "start" if positional => Some(Anchor::Start),
            "end" if positional => Some(Anchor::End),
            "middle" if positional => Some(Anchor::Middle),
            _ => None,
        };
        if anchor.is_none() {
            if complain {
                self.input
                    .report(ErrorKind::Expected("top, bottom, left, right, centre, start, end, or middle"))?;
            } else {
                self.input.unread(word);
            }
        }
        Ok(anchor)
    }

    /// Read a position.
    ///
    /// Either `(x, y)`, or `[fraction] <join> [of <label>] [plus (dx, dy)]`
    /// relative to the base item. A bare label re-bases instead and yields
    /// `None`, as does any reported problem.
    pub(crate) fn read_position(&mut self) -> ReadResult<Option<Point>> {
        if self.input.ch() == b'(' {
            let mag = self.envs.top().magnification;
            return self.input.read_vector(mag).map(Some);
        }

        let fraction = if self.input.ch().is_ascii_digit() {
            let Some(fraction) = self.read_fraction()? else {
                return Ok(None);
            };
            self.input.skip_space()?;
            fraction
        } else {
            0
        };

        let Some(anchor) = self.read_join(true, false)? else {
            let word = self.input.read_word()?;
            match self.labels.find(&word) {
                Some(id) => self.base = Some(id),
                None => self.input.report(ErrorKind::Expected(
                    "top, bottom, left, right, centre, start, end, middle, or label",
                ))?,
            }
            return Ok(None);
        };

        let mut relative = self.base;
        let word = self.input.read_word()?;
        if word == "of" {
            let label = self.input.read_word()?;
            match self.labels.find(&label) {
                Some(id) => relative = Some(id),
                None => {
                    self.input.report(ErrorKind::UnknownLabel(label))?;
                    return Ok(None);
                }
            }
        } else {
            self.input.unread(word);
        }

        let Some(shape) = relative.and_then(|id| self.scene.get(id)).map(|item| &item.shape) else {
            self.input.report(ErrorKind::NoPreviousItem)?;
            return Ok(None);
        };
        let located = shape.anchor(anchor, fraction);
        let kind = shape.kind_name();

        if located.misapplied {
            self.input.report(ErrorKind::BadAnchor(kind))?;
        }
        if fraction != 0 && !located.used_fraction {
            self.input.report(ErrorKind::MisplacedFraction)?;
            return Ok(None);
        }

        let mut at = located.at;
        let word = self.input.read_word()?;
        if word == "plus" {
            if self.input.ch() == b'(' {
                let mag = self.envs.top().magnification;
                at += self.input.read_vector(mag)?;
            } else {
                self.input.report(ErrorKind::Expected("Parenthesized vector (x,y)"))?;
            }
        } else {
            self.input.unread(word);
        }
        Ok(Some(at))
    }

    /// `N` or `N/M` in thousandths.
    fn read_fraction(&mut self) -> ReadResult<Option<Fixed>> {
        let numerator = self.input.read_number()?;
        if self.input.ch() != b'/' {
            return Ok(Some(numerator));
        }
        self.input.advance()?;
        if !self.input.ch().is_ascii_digit() {
            self.input.report(ErrorKind::Expected("number"))?;
            return Ok(None);
        }
        let denominator = self.input.read_number()?;
        if denominator == 0 {
            self.input.report(ErrorKind::Expected("non-zero number"))?;
            return Ok(None);
        }
        Ok(Some((i64::from(numerator) * 1000 / i64::from(denominator)) as Fixed))
    }
}
