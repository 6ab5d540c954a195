//! Drawing commands: gather options, resolve, attach strings, append.

use super::Reader;
use super::options::{
    ARC, ARCARROW, ARROW, ArcOptions, BOX, CIRCLE, CURVE, ClosedOptions, Common, CurveOptions, LINE, LineOptions,
    TEXT, TextOptions,
};
use crate::errors::{ErrorKind, ReadResult};
use crate::geometry::line::LineDefaults;
use crate::geometry::{self, Arrows, ClosedDraft, ClosedKind, Placement};
use crate::log::debug;
use crate::scene::{Geometry, Header, Item, Shape};
use crate::types::{Colour, Dash, Justify, Style};

impl Reader<'_> {
    /// Starting settings for lines, arcs and curves.
    fn open_path_common(&self) -> Common {
        let env = self.envs.top();
        Common {
            dashed: false,
            thickness: env.line_thickness,
            colour: env.line_colour,
            fill: env.shape_fill,
            level: env.level,
        }
    }

    fn default_arrows(&self, end: bool) -> Arrows {
        let env = self.envs.top();
        Arrows {
            start: false,
            end,
            length: env.arrow_length,
            width: env.arrow_width,
            fill: env.arrow_fill,
        }
    }

    fn placement(&self) -> Placement<'_> {
        Placement::new(self.base_shape(), self.envs.top().direction)
    }

    pub(crate) fn line(&mut self, style: Style, arrow: bool) -> ReadResult<()> {
        let mut opts = LineOptions {
            common: self.open_path_common(),
            arrows: self.default_arrows(arrow),
            draft: Default::default(),
        };
        self.options(&mut opts, if arrow { ARROW } else { LINE })?;
        self.note_level(opts.common.level);

        let env = self.envs.top();
        let defaults = LineDefaults {
            horizontal: env.hline_length,
            vertical: env.vline_length,
        };
        let dash = opts.common.dashed.then_some(env.line_dash);
        let resolved = geometry::line::resolve(&opts.draft, self.placement(), defaults, opts.arrows);
        self.append(style, dash, opts.common, Shape::Line(resolved.shape), resolved.issues)
    }

    pub(crate) fn arc(&mut self, style: Style, arrow: bool) -> ReadResult<()> {
        let mut opts = ArcOptions {
            common: self.open_path_common(),
            arrows: self.default_arrows(arrow),
            draft: Default::default(),
        };
        self.options(&mut opts, if arrow { ARCARROW } else { ARC })?;
        self.note_level(opts.common.level);

        let env = self.envs.top();
        let dash = opts.common.dashed.then_some(env.line_dash);
        let resolved = geometry::arc::resolve(&opts.draft, self.placement(), env.arc_radius, opts.arrows);
        self.append(style, dash, opts.common, Shape::Arc(resolved.shape), resolved.issues)
    }

    /// A curve without an end point, or too short to bend, is reported and
    /// dropped; any labels waiting for it stay unbound.
    pub(crate) fn curve(&mut self, style: Style) -> ReadResult<()> {
        let mut opts = CurveOptions {
            common: self.open_path_common(),
            draft: Default::default(),
        };
        self.options(&mut opts, CURVE)?;
        self.note_level(opts.common.level);

        let dash = opts.common.dashed.then_some(self.envs.top().line_dash);
        match geometry::curve::resolve(&opts.draft, self.placement()) {
            Ok(curve) => self.append(style, dash, opts.common, Shape::Curve(curve), Vec::new()),
            Err(kind) => self.input.report(kind),
        }
    }

    pub(crate) fn closed(&mut self, kind: ClosedKind, style: Style) -> ReadResult<()> {
        let env = self.envs.top();
        let (width, depth, thickness, colour, fill, family_dash) = match kind {
            ClosedKind::Box => (
                env.box_width,
                env.box_depth,
                env.box_thickness,
                env.box_colour,
                env.box_fill,
                env.box_dash,
            ),
            ClosedKind::Circle => (
                env.circle_radius,
                0,
                env.circle_thickness,
                env.circle_colour,
                env.circle_fill,
                env.circle_dash,
            ),
            ClosedKind::Ellipse => (
                env.ellipse_width,
                env.ellipse_depth,
                env.ellipse_thickness,
                env.ellipse_colour,
                env.ellipse_fill,
                env.ellipse_dash,
            ),
        };
        let mut opts = ClosedOptions {
            common: Common {
                dashed: false,
                thickness,
                colour,
                fill,
                level: env.level,
            },
            draft: ClosedDraft {
                width,
                depth,
                ..Default::default()
            },
        };
        let table = match kind {
            ClosedKind::Circle => CIRCLE,
            ClosedKind::Box | ClosedKind::Ellipse => BOX,
        };
        self.options(&mut opts, table)?;
        self.note_level(opts.common.level);

        let dash = opts.common.dashed.then_some(family_dash);
        let resolved = geometry::closed::resolve(kind, &opts.draft, self.placement(), self.joined);
        self.append(style, dash, opts.common, Shape::Closed(resolved.shape), resolved.issues)
    }

    /// Free-standing text never becomes the base item and cannot carry a
    /// label.
    pub(crate) fn text(&mut self) -> ReadResult<()> {
        let mut opts = TextOptions {
            at: None,
            level: self.envs.top().level,
        };
        self.options(&mut opts, TEXT)?;
        self.note_level(opts.level);

        let shape = geometry::text::resolve(opts.at, self.placement());
        let strings = self.read_string_chain(Justify::Centre)?;
        let env = self.envs.top();
        let header = Header {
            level: opts.level,
            style: Style::Visible,
            dash: None,
            line_depth: env.line_depth,
            font_depth: env.font_depth,
            thickness: 0,
            colour: env.text_colour,
            fill: Colour::UNFILLED,
            strings,
        };
        let id = self.scene.push(Item {
            header,
            shape: Shape::Text(shape),
        });
        debug!(id, "text");
        Ok(())
    }

    /// Report resolver complaints, read the strings, then add the item,
    /// binding pending labels and making it the new base.
    fn append(
        &mut self,
        style: Style,
        dash: Option<Dash>,
        common: Common,
        shape: Shape,
        issues: Vec<ErrorKind>,
    ) -> ReadResult<()> {
        for issue in issues {
            let column = self.input.pos();
            self.input.record_at(issue, column)?;
        }
        let strings = self.read_string_chain(shape.default_justify())?;
        let env = self.envs.top();
        let header = Header {
            level: common.level,
            style,
            dash,
            line_depth: env.line_depth,
            font_depth: env.font_depth,
            thickness: common.thickness,
            colour: common.colour,
            fill: common.fill,
            strings,
        };
        let kind = shape.kind_name();
        let id = self.scene.push(Item { header, shape });
        self.labels.bind_pending(id);
        self.base = Some(id);
        debug!(id, kind, "item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Reader;
    use crate::config::Settings;
    use crate::input::NoIncludes;
    use crate::output::Document;
    use crate::scene::{Item, Shape};
    use crate::types::{Colour, Dash, Style, pt};
    use crate::vars::VariableStore;

    fn run(source: &str) -> Document {
        crate::interp::Interpreter::new(Settings::default()).run("<test>", source).unwrap()
    }

    fn numbers(source: &str) -> Vec<u32> {
        crate::interp::Interpreter::new(Settings::default())
            .run("<test>", source)
            .err()
            .map(|f| f.numbers())
            .unwrap_or_default()
    }

    fn items(doc: &Document) -> Vec<&Item> {
        doc.scene.iter().collect()
    }

    #[test]
    fn boxes_follow_each_other() {
        let doc = run("box; box; down; circle;\n");
        let shapes: Vec<_> = items(&doc).iter().map(|i| i.shape.clone()).collect();
        let Shape::Closed(second) = &shapes[1] else { panic!("{:?}", shapes[1]) };
        assert_eq!(second.centre, pt(72_000, 0));
        let Shape::Closed(third) = &shapes[2] else { panic!("{:?}", shapes[2]) };
        assert_eq!((third.width, third.depth), (72_000, 72_000));
        assert_eq!(third.centre, pt(72_000, -18_000 - 36_000));
    }

    #[test]
    fn lines_continue_from_the_previous_item() {
        let doc = run("box; arrow; line up;\n");
        let items = items(&doc);
        let Shape::Line(arrow) = &items[1].shape else { panic!() };
        assert_eq!((arrow.start, arrow.size), (pt(36_000, 0), pt(72_000, 0)));
        assert!(arrow.arrows.end && !arrow.arrows.start);
        let Shape::Line(up) = &items[2].shape else { panic!() };
        assert_eq!((up.start, up.size), (pt(108_000, 0), pt(0, 36_000)));
        assert!(!up.arrows.any());
    }

    #[test]
    fn header_takes_environment_and_options() {
        let doc = run("linedash 3 2; line dashed thickness 2 colour 1,0,0 level 2; ibox dashed;\n");
        let items = items(&doc);
        let line = &items[0].header;
        assert_eq!(line.dash, Some(Dash { on: 3_000, off: 2_000 }));
        assert_eq!((line.thickness, line.colour, line.level), (2_000, Colour::rgb(1_000, 0, 0), 2));
        assert_eq!(line.style, Style::Visible);

        let boxed = &items[1].header;
        assert_eq!(boxed.style, Style::Invisible);
        assert_eq!(boxed.dash, Some(Dash { on: 7_000, off: 5_000 }));
        assert_eq!((boxed.thickness, boxed.fill), (500, Colour::UNFILLED));
    }

    #[test]
    fn arcs_and_arrowheads() {
        let doc = run("arcarrow both; iarc;\n");
        let items = items(&doc);
        let Shape::Arc(first) = &items[0].shape else { panic!() };
        assert!(first.arrows.start && first.arrows.end);
        let Shape::Arc(second) = &items[1].shape else { panic!() };
        assert!(!second.arrows.any());
        assert_eq!(second.start, first.end);
        assert_eq!(items[1].header.style, Style::Invisible);
    }

    #[test]
    fn curves_need_an_end() {
        let doc = run("curve to (50, 0);\n");
        assert!(matches!(items(&doc)[0].shape, Shape::Curve(_)));
        assert_eq!(numbers("curve;\n"), vec![33]);
        assert_eq!(numbers("A: curve;\n"), vec![33, 9]);
        assert_eq!(numbers("curve from (1,1) to (1,1);\n"), vec![34]);
    }

    #[test]
    fn resolver_issues_are_reported() {
        assert_eq!(numbers("box; line to (10, 10) right;\n"), vec![38]);
        assert_eq!(numbers("line align (10, 10) from (0,0) to (5,5);\n"), vec![42]);
    }

    #[test]
    fn text_is_neither_base_nor_labelled() {
        let doc = run("box; text \"hi\"; line;\n");
        let items = items(&doc);
        let Shape::Text(text) = &items[1].shape else { panic!() };
        assert_eq!(text.at, pt(0, 0));
        assert_eq!(items[1].header.thickness, 0);
        let Shape::Line(line) = &items[2].shape else { panic!() };
        assert_eq!(line.start, pt(36_000, 0));

        assert_eq!(numbers("T: text \"x\";\n"), vec![9]);
    }

    #[test]
    fn labels_bind_to_the_next_item() {
        let settings = Settings::default();
        let mut reader = Reader::new(
            "<test>",
            "A: B: box;\nC: circle;\n",
            &settings,
            VariableStore::new(),
            &NoIncludes,
        );
        reader.read_all().unwrap();
        assert_eq!(reader.labels.find("A"), Some(0));
        assert_eq!(reader.labels.find("B"), Some(0));
        assert_eq!(reader.labels.find("C"), Some(1));
        assert_eq!(reader.base, Some(1));
    }
}
