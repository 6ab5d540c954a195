//! Trailing option words.
//!
//! Every drawing command reads its options through one engine driven by a
//! per-command table. An entry names the word, how its value is parsed, and
//! where the value goes in the command's option record. Slots are plain
//! accessor functions, so the tables stay declarative and the engine never
//! needs to know which command it is serving.

use super::Reader;
use crate::errors::{ErrorKind, ReadResult};
use crate::geometry::{ArcDraft, Arrows, ClosedDraft, CurveDraft, LineDraft};
use crate::lexer::standardize;
use crate::types::{Anchor, Colour, Direction, Fixed, Point};

/// Accessor for one field of an option record.
pub(crate) type Slot<T, V> = fn(&mut T) -> &mut V;

/// How an option word's value is read and stored.
pub(crate) enum OptionKind<T> {
    /// No value; set the flag.
    Flag(Slot<T, bool>),
    /// No value; set the first flag and clear the second.
    Switch(Slot<T, bool>, Slot<T, bool>),
    /// Optional length along one axis, defaulting to the environment's line
    /// length for that axis. The other axis becomes 0 if still unset.
    Length {
        horizontal: bool,
        negative: bool,
        slot: Slot<T, Option<Fixed>>,
        other: Slot<T, Option<Fixed>>,
    },
    /// Required magnified dimension.
    Dimension(fn(&mut T, Fixed)),
    /// Required angle in thousandths of a degree, not magnified.
    Angle(Slot<T, Option<Fixed>>),
    Grey(Slot<T, Colour>),
    /// Red, green and blue, all required.
    Colour(Slot<T, Colour>),
    /// A grey level, or red, green and blue.
    ColourOrGrey(Slot<T, Colour>),
    Integer(Slot<T, i32>),
    Position(fn(&mut T, Point)),
    /// No value; store the direction from the table.
    Direction(Direction, Slot<T, Option<Direction>>),
    /// Join point, optionally followed by `to <position>`.
    Join(Slot<T, Option<Anchor>>, Slot<T, bool>),
}

pub(crate) struct OptionDef<T> {
    pub name: &'static str,
    pub kind: OptionKind<T>,
}

/// Settings every drawn item carries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Common {
    pub dashed: bool,
    pub thickness: Fixed,
    pub colour: Colour,
    pub fill: Colour,
    pub level: i32,
}

#[derive(Debug, Clone)]
pub(crate) struct LineOptions {
    pub common: Common,
    pub arrows: Arrows,
    pub draft: LineDraft,
}

#[derive(Debug, Clone)]
pub(crate) struct ArcOptions {
    pub common: Common,
    pub arrows: Arrows,
    pub draft: ArcDraft,
}

#[derive(Debug, Clone)]
pub(crate) struct CurveOptions {
    pub common: Common,
    pub draft: CurveDraft,
}

#[derive(Debug, Clone)]
pub(crate) struct ClosedOptions {
    pub common: Common,
    pub draft: ClosedDraft,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TextOptions {
    pub at: Option<Point>,
    pub level: i32,
}

use OptionKind as K;

const fn opt<T>(name: &'static str, kind: OptionKind<T>) -> OptionDef<T> {
    OptionDef { name, kind }
}

/// Arrows first; [`LINE`] is the same table without them.
pub(crate) const ARROW: &[OptionDef<LineOptions>] = &[
    opt("back", K::Switch(|o| &mut o.arrows.start, |o| &mut o.arrows.end)),
    opt("both", K::Flag(|o| &mut o.arrows.start)),
    opt("filled", K::ColourOrGrey(|o| &mut o.arrows.fill)),
    opt(
        "up",
        K::Length { horizontal: false, negative: false, slot: |o| &mut o.draft.depth, other: |o| &mut o.draft.width },
    ),
    opt(
        "down",
        K::Length { horizontal: false, negative: true, slot: |o| &mut o.draft.depth, other: |o| &mut o.draft.width },
    ),
    opt(
        "left",
        K::Length { horizontal: true, negative: true, slot: |o| &mut o.draft.width, other: |o| &mut o.draft.depth },
    ),
    opt(
        "right",
        K::Length { horizontal: true, negative: false, slot: |o| &mut o.draft.width, other: |o| &mut o.draft.depth },
    ),
    opt("from", K::Position(|o, p| o.draft.from = Some(p))),
    opt("to", K::Position(|o, p| o.draft.to = Some(p))),
    opt("align", K::Position(|o, p| o.draft.align = Some(p))),
    opt("dashed", K::Flag(|o| &mut o.common.dashed)),
    opt("thickness", K::Dimension(|o, v| o.common.thickness = v)),
    opt("colour", K::Colour(|o| &mut o.common.colour)),
    opt("grey", K::Grey(|o| &mut o.common.colour)),
    opt("shapefilled", K::ColourOrGrey(|o| &mut o.common.fill)),
    opt("level", K::Integer(|o| &mut o.common.level)),
];

pub(crate) const LINE: &[OptionDef<LineOptions>] = ARROW.split_at(3).1;

/// Arrows first; [`ARC`] is the same table without them.
pub(crate) const ARCARROW: &[OptionDef<ArcOptions>] = &[
    opt("back", K::Switch(|o| &mut o.arrows.start, |o| &mut o.arrows.end)),
    opt("both", K::Flag(|o| &mut o.arrows.start)),
    opt("filled", K::ColourOrGrey(|o| &mut o.arrows.fill)),
    opt("from", K::Position(|o, p| o.draft.from = Some(p))),
    opt("to", K::Position(|o, p| o.draft.to = Some(p))),
    opt("clockwise", K::Flag(|o| &mut o.draft.clockwise)),
    opt("radius", K::Dimension(|o, v| o.draft.radius = Some(v))),
    opt("angle", K::Angle(|o| &mut o.draft.angle)),
    opt("depth", K::Dimension(|o, v| o.draft.depth = Some(v))),
    opt("via", K::Position(|o, p| o.draft.via = Some(p))),
    opt("dashed", K::Flag(|o| &mut o.common.dashed)),
    opt("up", K::Direction(Direction::North, |o| &mut o.draft.direction)),
    opt("down", K::Direction(Direction::South, |o| &mut o.draft.direction)),
    opt("left", K::Direction(Direction::West, |o| &mut o.draft.direction)),
    opt("right", K::Direction(Direction::East, |o| &mut o.draft.direction)),
    opt("thickness", K::Dimension(|o, v| o.common.thickness = v)),
    opt("colour", K::Colour(|o| &mut o.common.colour)),
    opt("grey", K::Grey(|o| &mut o.common.colour)),
    opt("shapefilled", K::ColourOrGrey(|o| &mut o.common.fill)),
    opt("level", K::Integer(|o| &mut o.common.level)),
];

pub(crate) const ARC: &[OptionDef<ArcOptions>] = ARCARROW.split_at(3).1;

pub(crate) const CURVE: &[OptionDef<CurveOptions>] = &[
    opt("from", K::Position(|o, p| o.draft.from = Some(p))),
    opt("to", K::Position(|o, p| o.draft.to = Some(p))),
    opt("clockwise", K::Flag(|o| &mut o.draft.clockwise)),
    opt("wavy", K::Flag(|o| &mut o.draft.wavy)),
    opt("c1", K::Position(|o, p| o.draft.c1 = p)),
    opt("c2", K::Position(|o, p| o.draft.c2 = p)),
    opt("cs", K::Position(|o, p| o.draft.cs = p)),
    opt("dashed", K::Flag(|o| &mut o.common.dashed)),
    opt("thickness", K::Dimension(|o, v| o.common.thickness = v)),
    opt("colour", K::Colour(|o| &mut o.common.colour)),
    opt("grey", K::Grey(|o| &mut o.common.colour)),
    opt("shapefilled", K::ColourOrGrey(|o| &mut o.common.fill)),
    opt("level", K::Integer(|o| &mut o.common.level)),
];

/// Boxes and ellipses.
pub(crate) const BOX: &[OptionDef<ClosedOptions>] = &[
    opt("at", K::Position(|o, p| o.draft.at = Some(p))),
    opt("join", K::Join(|o| &mut o.draft.join, |o| &mut o.draft.joined)),
    opt("width", K::Dimension(|o, v| o.draft.width = v)),
    opt("depth", K::Dimension(|o, v| o.draft.depth = v)),
    opt("dashed", K::Flag(|o| &mut o.common.dashed)),
    opt("filled", K::ColourOrGrey(|o| &mut o.common.fill)),
    opt("thickness", K::Dimension(|o, v| o.common.thickness = v)),
    opt("colour", K::Colour(|o| &mut o.common.colour)),
    opt("grey", K::Grey(|o| &mut o.common.colour)),
    opt("level", K::Integer(|o| &mut o.common.level)),
];

pub(crate) const CIRCLE: &[OptionDef<ClosedOptions>] = &[
    opt("at", K::Position(|o, p| o.draft.at = Some(p))),
    opt("join", K::Join(|o| &mut o.draft.join, |o| &mut o.draft.joined)),
    opt("radius", K::Dimension(|o, v| o.draft.width = v)),
    opt("dashed", K::Flag(|o| &mut o.common.dashed)),
    opt("thickness", K::Dimension(|o, v| o.common.thickness = v)),
    opt("colour", K::Colour(|o| &mut o.common.colour)),
    opt("grey", K::Grey(|o| &mut o.common.colour)),
    opt("filled", K::ColourOrGrey(|o| &mut o.common.fill)),
    opt("level", K::Integer(|o| &mut o.common.level)),
];

pub(crate) const TEXT: &[OptionDef<TextOptions>] = &[
    opt("at", K::Position(|o, p| o.at = Some(p))),
    opt("level", K::Integer(|o| &mut o.level)),
];

pub(crate) const BOUNDING_BOX: &[OptionDef<Common>] = &[
    opt("dashed", K::Flag(|c| &mut c.dashed)),
    opt("filled", K::ColourOrGrey(|c| &mut c.fill)),
    opt("thickness", K::Dimension(|c, v| c.thickness = v)),
    opt("colour", K::Colour(|c| &mut c.colour)),
    opt("grey", K::Grey(|c| &mut c.colour)),
];

impl Reader<'_> {
    /// Read option words for `target` until something that is not a word
    /// turns up. An unknown word abandons the rest of the statement.
    pub(crate) fn options<T>(&mut self, target: &mut T, table: &[OptionDef<T>]) -> ReadResult<()> {
        self.input.clear_held();
        while self.input.has_held_word() || self.input.ch().is_ascii_alphabetic() {
            let word = self.input.read_word()?;
            let name = standardize(&word);
            match table.iter().find(|def| def.name == name) {
                Some(def) => {
                    self.apply_option(target, &def.kind)?;
                    self.input.skip_space()?;
                }
                None => {
                    self.input.report(ErrorKind::UnknownOption(word))?;
                    while self.input.ch() != b';' && !self.input.is_eof() {
                        self.input.advance()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_option<T>(&mut self, target: &mut T, kind: &OptionKind<T>) -> ReadResult<()> {
        let c = self.input.ch();
        let digit = c.is_ascii_digit();
        let signed = digit || c == b'-';

        match kind {
            K::Flag(slot) => *slot(target) = true,
            K::Switch(on, off) => {
                *on(target) = true;
                *off(target) = false;
            }
            K::Length { horizontal, negative, slot, other } => {
                let env = self.envs.top();
                let mut value = if *horizontal { env.hline_length } else { env.vline_length };
                if digit {
                    let n = self.input.read_number()?;
                    value = self.envs.top().mag(n);
                }
                *slot(target) = Some(if *negative { -value } else { value });
                if other(target).is_none() {
                    *other(target) = Some(0);
                }
            }
            K::Dimension(set) => {
                if !digit {
                    return self.input.report(ErrorKind::DimensionExpected);
                }
                let n = self.input.read_number()?;
                set(target, self.envs.top().mag(n));
            }
            K::Angle(slot) => {
                if !digit {
                    return self.input.report(ErrorKind::Expected("unsigned angle"));
                }
                *slot(target) = Some(self.input.read_number()?);
            }
            K::Grey(slot) => {
                if !digit {
                    return self.input.report(ErrorKind::Expected("grey level"));
                }
                *slot(target) = Colour::grey(self.input.read_number()?);
            }
            K::Colour(slot) => {
                if !signed {
                    return self.input.report(ErrorKind::Expected("colour values"));
                }
                let colour = slot(target);
                colour.red = self.input.read_number()?;
                self.skip_separator();
                if !self.input.ch().is_ascii_digit() {
                    self.input.report(ErrorKind::Expected("green and blue values"))?;
                } else {
                    colour.green = self.input.read_number()?;
                    self.skip_separator();
                    if !self.input.ch().is_ascii_digit() {
                        self.input.report(ErrorKind::Expected("blue value"))?;
                    } else {
                        colour.blue = self.input.read_number()?;
                    }
                }
                if colour.out_of_range() {
                    self.input.report(ErrorKind::ColourOutOfRange)?;
                }
            }
            K::ColourOrGrey(slot) => {
                if !signed {
                    return self.input.report(ErrorKind::Expected("grey level or colour values"));
                }
                let colour = slot(target);
                *colour = Colour::grey(self.input.read_number()?);
                if self.input.ch() == b',' {
                    self.input.bump();
                }
                self.skip_blanks();
                if self.input.ch().is_ascii_digit() {
                    colour.green = self.input.read_number()?;
                    if self.input.ch() == b',' {
                        self.input.bump();
                    }
                    self.skip_blanks();
                    if !self.input.ch().is_ascii_digit() {
                        self.input.report(ErrorKind::Expected("blue value"))?;
                    } else {
                        colour.blue = self.input.read_number()?;
                    }
                }
                if colour.out_of_range() {
                    self.input.report(ErrorKind::ColourOutOfRange)?;
                }
            }
            K::Integer(slot) => {
                if !signed {
                    return self.input.report(ErrorKind::Expected("integer"));
                }
                *slot(target) = self.input.read_int()?;
            }
            K::Position(set) => {
                if let Some(at) = self.read_position()? {
                    set(target, at);
                }
            }
            K::Direction(direction, slot) => *slot(target) = Some(*direction),
            K::Join(slot, joined) => {
                let Some(anchor) = self.read_join(false, true)? else {
                    return Ok(());
                };
                *slot(target) = Some(anchor);
                let word = self.input.read_word()?;
                if word == "to" {
                    if let Some(at) = self.read_position()? {
                        self.joined = at;
                        *joined(target) = true;
                    }
                } else {
                    self.input.unread(word);
                }
                if self.base.is_none() {
                    self.input.report(ErrorKind::NothingToJoin)?;
                }
            }
        }
        Ok(())
    }

    /// A comma and any blanks after it.
    fn skip_separator(&mut self) {
        if self.input.ch() == b',' {
            self.input.bump();
            self.skip_blanks();
        }
    }
}
