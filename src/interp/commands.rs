//! Builtin commands and the handlers that are not drawing primitives.

use std::rc::Rc;

use super::Reader;
use super::options::{BOUNDING_BOX, Common};
use crate::env::Environment;
use crate::errors::{ErrorKind, ReadResult};
use crate::geometry::ClosedKind;
use crate::lexer::standardize;
use crate::log::debug;
use crate::macros::Macro;
use crate::output::{FontBinding, Frame};
use crate::types::{Colour, Dash, Direction, Fixed, Style};

type EnvSlot<T> = fn(&mut Environment) -> &mut T;

/// What a builtin command word does.
#[derive(Clone, Copy)]
pub(crate) enum Command {
    Arc { style: Style, arrow: bool },
    Closed { kind: ClosedKind, style: Style },
    Curve(Style),
    Line { style: Style, arrow: bool },
    Text,
    Direction(Direction),
    /// Magnified dimension.
    Dimension(EnvSlot<Fixed>),
    DashPair(EnvSlot<Dash>),
    Integer(EnvSlot<i32>),
    Colour(EnvSlot<Colour>),
    Grey(EnvSlot<Colour>),
    /// Grey level or colour.
    Fill(EnvSlot<Colour>),
    BindFont,
    BoundingBox,
    Goto,
    Include,
    Macro,
    Magnify,
    Pop,
    Push,
    Resolution,
    Set,
}

use Command as C;

const VISIBLE: Style = Style::Visible;
const INVISIBLE: Style = Style::Invisible;

static COMMANDS: &[(&str, Command)] = &[
    ("arc", C::Arc { style: VISIBLE, arrow: false }),
    ("arcarrow", C::Arc { style: VISIBLE, arrow: true }),
    ("arcradius", C::Dimension(|e| &mut e.arc_radius)),
    ("arrow", C::Line { style: VISIBLE, arrow: true }),
    ("arrowfill", C::Fill(|e| &mut e.arrow_fill)),
    ("arrowlength", C::Dimension(|e| &mut e.arrow_length)),
    ("arrowwidth", C::Dimension(|e| &mut e.arrow_width)),
    ("bindfont", C::BindFont),
    ("boundingbox", C::BoundingBox),
    ("box", C::Closed { kind: ClosedKind::Box, style: VISIBLE }),
    ("boxcolour", C::Colour(|e| &mut e.box_colour)),
    ("boxdash", C::DashPair(|e| &mut e.box_dash)),
    ("boxdepth", C::Dimension(|e| &mut e.box_depth)),
    ("boxfill", C::Fill(|e| &mut e.box_fill)),
    ("boxgrey", C::Grey(|e| &mut e.box_colour)),
    ("boxthickness", C::Dimension(|e| &mut e.box_thickness)),
    ("boxwidth", C::Dimension(|e| &mut e.box_width)),
    ("circle", C::Closed { kind: ClosedKind::Circle, style: VISIBLE }),
    ("circlecolour", C::Colour(|e| &mut e.circle_colour)),
    ("circledash", C::DashPair(|e| &mut e.circle_dash)),
    ("circlefill", C::Fill(|e| &mut e.circle_fill)),
    ("circlegrey", C::Grey(|e| &mut e.circle_colour)),
    ("circleradius", C::Dimension(|e| &mut e.circle_radius)),
    ("circlethickness", C::Dimension(|e| &mut e.circle_thickness)),
    ("curve", C::Curve(VISIBLE)),
    ("down", C::Direction(Direction::South)),
    ("ellipse", C::Closed { kind: ClosedKind::Ellipse, style: VISIBLE }),
    ("ellipsecolour", C::Colour(|e| &mut e.ellipse_colour)),
    ("ellipsedash", C::DashPair(|e| &mut e.ellipse_dash)),
    ("ellipsedepth", C::Dimension(|e| &mut e.ellipse_depth)),
    ("ellipsefill", C::Fill(|e| &mut e.ellipse_fill)),
    ("ellipsegrey", C::Grey(|e| &mut e.ellipse_colour)),
    ("ellipsethickness", C::Dimension(|e| &mut e.ellipse_thickness)),
    ("ellipsewidth", C::Dimension(|e| &mut e.ellipse_width)),
    ("fontdepth", C::Dimension(|e| &mut e.font_depth)),
    ("goto", C::Goto),
    ("hlinelength", C::Dimension(|e| &mut e.hline_length)),
    ("iarc", C::Arc { style: INVISIBLE, arrow: false }),
    ("ibox", C::Closed { kind: ClosedKind::Box, style: INVISIBLE }),
    ("icircle", C::Closed { kind: ClosedKind::Circle, style: INVISIBLE }),
    ("icurve", C::Curve(INVISIBLE)),
    ("iellipse", C::Closed { kind: ClosedKind::Ellipse, style: INVISIBLE }),
    ("iline", C::Line { style: INVISIBLE, arrow: false }),
    ("include", C::Include),
    ("left", C::Direction(Direction::West)),
    ("level", C::Integer(|e| &mut e.level)),
    ("line", C::Line { style: VISIBLE, arrow: false }),
    ("linecolour", C::Colour(|e| &mut e.line_colour)),
    ("linedash", C::DashPair(|e| &mut e.line_dash)),
    ("linegrey", C::Grey(|e| &mut e.line_colour)),
    ("linethickness", C::Dimension(|e| &mut e.line_thickness)),
    ("macro", C::Macro),
    ("magnify", C::Magnify),
    ("pop", C::Pop),
    ("push", C::Push),
    ("resolution", C::Resolution),
    ("right", C::Direction(Direction::East)),
    ("set", C::Set),
    ("setfont", C::Integer(|e| &mut e.font)),
    ("shapefill", C::Fill(|e| &mut e.shape_fill)),
    ("text", C::Text),
    ("textcolour", C::Colour(|e| &mut e.text_colour)),
    ("textdepth", C::Dimension(|e| &mut e.line_depth)),
    ("up", C::Direction(Direction::North)),
    ("vlinelength", C::Dimension(|e| &mut e.vline_length)),
];

/// Look up a standardized command word.
pub(crate) fn find_command(name: &str) -> Option<Command> {
    COMMANDS
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|i| COMMANDS[i].1)
}

impl Command {
    /// Run the handler. The cursor is left on the statement terminator.
    pub(crate) fn run(self, r: &mut Reader<'_>) -> ReadResult<()> {
        match self {
            C::Arc { style, arrow } => r.arc(style, arrow),
            C::Closed { kind, style } => r.closed(kind, style),
            C::Curve(style) => r.curve(style),
            C::Line { style, arrow } => r.line(style, arrow),
            C::Text => r.text(),
            C::Direction(direction) => {
                r.envs.top_mut().direction = direction;
                Ok(())
            }
            C::Dimension(slot) => {
                let value = r.input.read_number()?;
                let env = r.envs.top_mut();
                let value = env.mag(value);
                *slot(env) = value;
                Ok(())
            }
            C::DashPair(slot) => {
                let on = r.input.read_number()?;
                if r.input.ch() == b',' {
                    r.input.bump();
                }
                r.input.skip_space()?;
                let off = r.input.read_number()?;
                *slot(r.envs.top_mut()) = Dash { on, off };
                Ok(())
            }
            C::Integer(slot) => {
                let value = r.input.read_int()?;
                *slot(r.envs.top_mut()) = value;
                Ok(())
            }
            C::Grey(slot) => {
                let level = r.input.read_number()?;
                *slot(r.envs.top_mut()) = Colour::grey(level);
                Ok(())
            }
            C::Colour(slot) => {
                let mut parts = [0; 3];
                for (i, part) in parts.iter_mut().enumerate() {
                    if i > 0 {
                        if r.input.ch() == b',' {
                            r.input.bump();
                        }
                        r.input.skip_space()?;
                    }
                    *part = r.input.read_number()?;
                }
                *slot(r.envs.top_mut()) = Colour::rgb(parts[0], parts[1], parts[2]);
                Ok(())
            }
            C::Fill(slot) => {
                let colour = r.read_fill()?;
                *slot(r.envs.top_mut()) = colour;
                Ok(())
            }
            C::BindFont => r.bind_font(),
            C::BoundingBox => r.bounding_box(),
            C::Goto => r.goto(),
            C::Include => r.include(),
            C::Macro => r.define_macro(),
            C::Magnify => {
                let factor = r.input.read_number()?;
                r.envs.top_mut().magnify(factor);
                Ok(())
            }
            C::Pop => {
                if !r.envs.pop() {
                    r.input.report(ErrorKind::NothingToPop)?;
                }
                Ok(())
            }
            C::Push => {
                r.envs.push();
                Ok(())
            }
            C::Resolution => {
                r.resolution = r.input.read_number()?;
                Ok(())
            }
            C::Set => r.set_variable(),
        }
    }
}

impl Reader<'_> {
    /// A grey level, optionally followed by green and blue.
    fn read_fill(&mut self) -> ReadResult<Colour> {
        let level = self.input.read_number()?;
        let mut colour = Colour::grey(level);
        if self.input.ch() == b',' {
            self.input.bump();
        }
        self.skip_blanks();
        if !self.input.ch().is_ascii_digit() {
            return Ok(colour);
        }
        colour.green = self.input.read_number()?;
        if self.input.ch() == b',' {
            self.input.bump();
        }
        self.skip_blanks();
        colour.blue = self.input.read_number()?;
        Ok(colour)
    }

    /// Bytes of a quoted string with `""` escapes, the cursor on the opening
    /// quote. A string cut short by the end of the line is reported as
    /// `missing` and kept.
    fn read_quoted_bytes(&mut self, missing: ErrorKind) -> ReadResult<Vec<u8>> {
        let mut bytes = Vec::new();
        loop {
            self.input.bump();
            let c = self.input.ch();
            if c == b'\n' || c == 0 {
                self.input.report(missing)?;
                return Ok(bytes);
            }
            if c == b'"' {
                self.input.bump();
                if self.input.ch() != b'"' {
                    return Ok(bytes);
                }
            }
            bytes.push(self.input.ch());
        }
    }

    fn bind_font(&mut self) -> ReadResult<()> {
        self.input.skip_space()?;
        let number = self.input.read_int()?;
        if number <= 0 {
            return self.input.report(ErrorKind::BadFontNumber);
        }
        if self.input.ch() != b'"' {
            return self.input.report(ErrorKind::Expected("font name in quotes"));
        }
        let name = self.read_quoted_bytes(ErrorKind::Expected("closing quote"))?;
        self.input.skip_space()?;
        let size = self.input.read_number()?;
        if size <= 0 {
            return self.input.report(ErrorKind::Expected("non-negative font size"));
        }
        let name = String::from_utf8_lossy(&name).into_owned();
        debug!(number, name = %name, size, "bind font");
        self.fonts.bind(FontBinding { number, name, size });
        Ok(())
    }

    fn bounding_box(&mut self) -> ReadResult<()> {
        let defaults = Frame::default();
        let offset = self.input.read_number()?;
        self.input.skip_space()?;
        let mut common = Common {
            dashed: false,
            thickness: defaults.thickness,
            colour: defaults.colour,
            fill: defaults.fill,
            level: 0,
        };
        self.options(&mut common, BOUNDING_BOX)?;
        let dash = common.dashed.then(|| self.envs.top().box_dash);
        self.frame = Some(Frame {
            offset,
            thickness: common.thickness,
            colour: common.colour,
            fill: common.fill,
            dash,
        });
        Ok(())
    }

    fn goto(&mut self) -> ReadResult<()> {
        if self.input.ch() == b'*' {
            self.base = None;
            self.input.bump();
            return self.input.skip_space();
        }
        let word = self.input.read_word()?;
        self.base = self.labels.find(&word);
        if self.base.is_none() {
            self.input.report(ErrorKind::UnknownLabel(word))?;
        }
        Ok(())
    }

    fn include(&mut self) -> ReadResult<()> {
        let in_macro = self.input.in_macro();
        self.input.skip_space()?;
        let mut path = Vec::new();
        loop {
            let c = self.input.ch();
            if c == 0 || c == b';' || c.is_ascii_whitespace() {
                break;
            }
            path.push(c);
            self.input.bump();
        }
        self.input.skip_space()?;

        if in_macro {
            return self.input.report(ErrorKind::IncludeInMacro);
        }
        if path.is_empty() {
            return self.input.report(ErrorKind::FileNameExpected);
        }
        if self.input.ch() != b';' {
            self.input.report(ErrorKind::SemicolonExpected)?;
        }

        let path = String::from_utf8_lossy(&path).into_owned();
        match self.loader.load(&path) {
            Ok(text) => self.input.push_include(&path, &text),
            Err(e) => self.input.report(ErrorKind::OpenFailed {
                path,
                purpose: "input",
                reason: e.to_string(),
            }),
        }
    }

    fn set_variable(&mut self) -> ReadResult<()> {
        let name = self.input.read_word()?;
        if name.is_empty() {
            return self.input.report(ErrorKind::EmptyVariableName);
        }
        self.input.skip_space()?;
        if self.input.ch() != b'"' {
            return self.input.report(ErrorKind::Expected("quoted string"));
        }
        let value = self.read_quoted_bytes(ErrorKind::MissingQuote)?;
        let value = String::from_utf8_lossy(&value).into_owned();
        debug!(name = %name, value = %value, "set variable");
        self.input.vars.set(name, value);
        Ok(())
    }

    /// End of the macro text that starts at `from`: the terminator or the
    /// end of the line. Quoted text is passed over.
    fn find_macro_end(&mut self, from: usize, term: u8) -> ReadResult<usize> {
        let mut p = from;
        while self.input.at(p) != term && self.input.at(p) != 0 {
            p += 1;
            if self.input.at(p) == b'"' {
                p += 1;
                while self.input.at(p) != b'"' && self.input.at(p) != 0 {
                    p += 1;
                }
                if self.input.at(p) == 0 {
                    self.input.record_at(ErrorKind::MissingQuote, p)?;
                }
            }
        }
        Ok(p)
    }

    fn define_macro(&mut self) -> ReadResult<()> {
        let name = self.input.read_word()?;
        let mut mac = Macro::new(name.clone());
        let term = if self.input.ch() == b'{' {
            self.input.bump();
            b'}'
        } else {
            b';'
        };

        loop {
            let start = self.input.pos();
            let end = self.find_macro_end(start, term)?;
            let mut text = self.input.line().get(start..end).unwrap_or_default().to_vec();
            self.input.set_pos(end);
            if self.input.ch() == term {
                text.push(b' ');
                mac.push_line(text);
                if term == b'}' {
                    self.input.advance()?;
                    self.input.skip_space()?;
                }
                break;
            }
            mac.push_line(text);
            self.input.set_pos(end.saturating_sub(1));
            self.input.advance()?;
            if self.input.is_eof() {
                self.input.set_pos(0);
                return self.input.fail(ErrorKind::UnterminatedMacro(name));
            }
        }

        debug!(name = %mac.name, args = mac.argcount, lines = mac.lines.len(), "define macro");
        self.macros.define(mac);
        if find_command(&standardize(&name)).is_some() {
            self.input.report(ErrorKind::MacroNameClash(name))?;
        }
        Ok(())
    }

    /// Collect arguments for a macro call and start replaying its body.
    pub(crate) fn obey_macro(&mut self, mac: Rc<Macro>) -> ReadResult<()> {
        let mut args = Vec::new();
        while !matches!(self.input.ch(), b';' | b'|') && args.len() < mac.argcount {
            let mut p = self.input.pos() + 1;
            let first = self.input.ch();
            let term1 = if first == b'"' || first == b'\'' { first } else { b' ' };
            if term1 == b'\'' {
                self.input.bump();
            }
            let term2 = if term1 == b' ' { b';' } else { term1 };
            loop {
                let c = self.input.at(p);
                if c == term1 || c == term2 || c == b'\n' || c == 0 {
                    break;
                }
                p += 1;
            }
            if self.input.at(p) == b'"' {
                p += 1;
            }
            let start = self.input.pos();
            args.push(self.input.line().get(start..p).unwrap_or_default().to_vec());
            self.input.set_pos(p);
            if self.input.ch() == b'\'' {
                self.input.bump();
            }
            self.input.skip_space()?;
        }
        if self.input.ch() == b'|' {
            self.input.advance()?;
            self.input.skip_space()?;
        }
        self.input.push_macro(mac, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::interp::Interpreter;
    use crate::output::Document;
    use crate::scene::Shape;
    use crate::types::pt;

    fn run(source: &str) -> Document {
        Interpreter::new(Settings::default().with_timestamp("now"))
            .run("<test>", source)
            .unwrap()
    }

    fn numbers(source: &str) -> Vec<u32> {
        Interpreter::new(Settings::default())
            .run("<test>", source)
            .err()
            .map(|f| f.numbers())
            .unwrap_or_default()
    }

    #[test]
    fn table_is_sorted() {
        assert!(COMMANDS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn spelling_variants_reach_the_same_command() {
        assert!(find_command(&standardize("boxcolor")).is_some());
        assert!(find_command(&standardize("linegray")).is_some());
        assert!(find_command("boxes").is_none());
    }

    #[test]
    fn dimension_setters_are_magnified() {
        let doc = run("magnify 2; boxwidth 10; box;\n");
        match &doc.scene.iter().next().unwrap().shape {
            Shape::Closed(c) => assert_eq!(c.width, 20_000),
            other => panic!("expected a box, got {other:?}"),
        }
    }

    #[test]
    fn push_and_pop_restore_defaults() {
        let doc = run("push; boxwidth 10; pop; box;\n");
        match &doc.scene.iter().next().unwrap().shape {
            Shape::Closed(c) => assert_eq!(c.width, 72_000),
            other => panic!("expected a box, got {other:?}"),
        }
        assert_eq!(numbers("pop;\n"), vec![18]);
    }

    #[test]
    fn colour_and_fill_setters() {
        let doc = run("boxcolour 1, 0.5, 0; boxfill 0.25; circlefill 0.1,0.2,0.3; box; circle;\n");
        let items: Vec<_> = doc.scene.iter().collect();
        assert_eq!(items[0].header.colour, Colour::rgb(1000, 500, 0));
        assert_eq!(items[0].header.fill, Colour::grey(250));
        assert_eq!(items[1].header.fill, Colour::rgb(100, 200, 300));
    }

    #[test]
    fn set_defines_a_variable() {
        let doc = run("set title \"A \"\"quoted\"\" name\";\n");
        assert_eq!(doc.variable("title"), Some("A \"quoted\" name"));
        assert_eq!(numbers("set \"x\";\n"), vec![17]);
        assert_eq!(numbers("set x y;\n"), vec![11]);
        assert_eq!(numbers("set x \"open;\n"), vec![21, 3]);
    }

    #[test]
    fn bindfont_records_a_binding() {
        let doc = run("bindfont 1 \"Times-Roman\" 10;\n");
        let font = doc.fonts.find(1).unwrap();
        assert_eq!(font.name, "Times-Roman");
        assert_eq!(font.size, 10_000);
        assert_eq!(numbers("bindfont 0 \"Times\" 10;\n"), vec![5]);
        assert_eq!(numbers("bindfont 2 Times 10;\n"), vec![11]);
    }

    #[test]
    fn boundingbox_requests_a_frame() {
        let doc = run("boundingbox 5 dashed thickness 1; box;\n");
        let frame = doc.frame.as_ref().unwrap();
        assert_eq!(frame.offset, 5_000);
        assert_eq!(frame.thickness, 1_000);
        assert_eq!(frame.dash, Some(Dash { on: 7_000, off: 5_000 }));
        assert_eq!(doc.bbox.min, pt(-41_250, -23_250));
    }

    #[test]
    fn goto_rebases_and_clears() {
        let doc = run("A: box; box; goto A; line down;\n");
        match &doc.scene.iter().nth(2).unwrap().shape {
            Shape::Line(l) => assert_eq!(l.start, pt(0, -18_000)),
            other => panic!("expected a line, got {other:?}"),
        }
        let doc = run("box; goto *; circle;\n");
        match &doc.scene.iter().nth(1).unwrap().shape {
            Shape::Closed(c) => assert_eq!(c.centre, pt(0, 0)),
            other => panic!("expected a circle, got {other:?}"),
        }
        assert_eq!(numbers("goto Nowhere;\n"), vec![10]);
    }

    #[test]
    fn include_problems() {
        assert_eq!(numbers("include;\n"), vec![29]);
        assert_eq!(numbers("include missing.aspic;\n"), vec![1]);
        assert_eq!(numbers("macro m include x; ;\nm;\n"), vec![30]);
    }

    #[test]
    fn single_line_macro() {
        let doc = run("macro twice {box; box;};\ntwice;\n");
        assert_eq!(doc.scene.len(), 2);
    }

    #[test]
    fn braced_macro_with_arguments() {
        let doc = run("macro labelled {\nbox \"&1\";\ncircle \"&2\"; };\nlabelled one \"two words\";\n");
        let strings: Vec<String> = doc
            .scene
            .iter()
            .flat_map(|i| i.header.strings.iter().map(|s| s.text()))
            .collect();
        assert_eq!(strings, vec!["one", "two words"]);
    }

    #[test]
    fn macro_problems() {
        assert_eq!(numbers("macro box circle;;\n"), vec![39]);
        let failure = Interpreter::new(Settings::default())
            .run("<test>", "macro m { box;\n")
            .unwrap_err();
        assert!(failure.abandoned);
        assert_eq!(failure.numbers(), vec![40]);
        assert_eq!(numbers("macro m m;;\nm;\n"), vec![41]);
    }
}
