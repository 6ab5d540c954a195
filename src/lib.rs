//! Aspic line-art pictures: reading, layout and scene extents.
//!
//! Source text goes through a stack of input layers (files, includes, macro
//! replays) with variable substitution and character decoding, then through
//! one command interpreter that resolves every item's geometry as it is
//! read. The result is a [`Document`]: the scene graph plus its bounding box
//! and string anchors, ready for a renderer.

pub mod config;
pub mod defaults;
pub mod env;
pub mod errors;
pub mod geometry;
pub mod input;
mod interp;
pub mod labels;
pub mod lexer;
pub mod log;
pub mod macros;
pub mod output;
pub mod scene;
pub mod types;
pub mod vars;

pub use config::Settings;
pub use errors::{ErrorKind, ReadError, ReadFailure};
pub use input::{FsLoader, MemoryLoader, NoIncludes, SourceLoader};
pub use interp::Interpreter;
pub use output::Document;
pub use scene::{Item, SceneGraph, Shape};

/// Read Aspic source with default settings and no includes.
///
/// Returns the laid-out document, or every error recorded while reading.
pub fn aspic(source: &str) -> Result<Document, miette::Report> {
    Interpreter::new(Settings::default())
        .run("<input>", source)
        .map_err(miette::Report::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_simple_picture() {
        let doc = aspic("box \"Hello\";\narrow;\nbox \"World\";\n").unwrap();
        assert_eq!(doc.scene.len(), 3);
        assert_eq!(doc.scene.iter().next().unwrap().header.strings[0].text(), "Hello");
    }

    #[test]
    fn failures_carry_diagnostics() {
        let report = aspic("box widht 3;\n").unwrap_err();
        let failure = report.downcast_ref::<ReadFailure>().unwrap();
        assert_eq!(failure.numbers(), vec![7]);
        assert!(!failure.abandoned);
    }

    #[test]
    fn labels_and_positions() {
        let doc = aspic("A: box;\nB: box at (100, 0);\nline from right of A to left of B;\n").unwrap();
        let Shape::Line(line) = &doc.scene.iter().nth(2).unwrap().shape else {
            panic!("expected a line");
        };
        assert_eq!(line.start, types::pt(36_000, 0));
        assert_eq!(line.end(), types::pt(64_000, 0));
    }
}
