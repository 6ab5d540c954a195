//! The interpreter: one pass over the command stream.
//!
//! Reading is strictly sequential. Each statement is a command word, its
//! options and attached strings, and a terminating `;`. Drawing commands
//! resolve their geometry immediately against the current base item and
//! append to the scene graph; everything else adjusts interpreter state.
//! When the input is exhausted the collected state becomes a [`Document`].

mod commands;
mod items;
mod options;
mod position;
mod strings;

use crate::config::Settings;
use crate::env::EnvironmentStack;
use crate::errors::{ErrorKind, ReadFailure, ReadResult};
use crate::input::{InputStack, NoIncludes, SourceLoader};
use crate::labels::LabelTable;
use crate::lexer::standardize;
use crate::log::debug;
use crate::macros::MacroStore;
use crate::output::{Document, FontTable, Frame};
use crate::scene::{ItemId, SceneGraph, Shape};
use crate::types::Point;
use crate::vars::VariableStore;

use commands::find_command;

/// Configured entry point.
///
/// ```
/// use aspic::{Interpreter, Settings};
///
/// let doc = Interpreter::new(Settings::default()).run("demo", "box; arrow;").unwrap();
/// assert_eq!(doc.scene.len(), 2);
/// ```
pub struct Interpreter {
    settings: Settings,
    loader: Box<dyn SourceLoader>,
}

impl Interpreter {
    /// An interpreter that refuses `include`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            loader: Box::new(NoIncludes),
        }
    }

    /// Resolve `include` through `loader`.
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Interpret `source`. Any recorded error fails the whole run.
    pub fn run(&self, name: &str, source: &str) -> Result<Document, ReadFailure> {
        let vars = VariableStore::seeded(self.settings.timestamp.as_deref());
        let mut reader = Reader::new(name, source, &self.settings, vars, self.loader.as_ref());
        let outcome = reader.read_all();
        reader.finish(name, outcome.is_err())
    }
}

/// All state live while reading.
pub(crate) struct Reader<'a> {
    pub(crate) input: InputStack,
    pub(crate) envs: EnvironmentStack,
    pub(crate) labels: LabelTable,
    pub(crate) macros: MacroStore,
    pub(crate) scene: SceneGraph,
    /// Item that relative positions and default placement refer to.
    pub(crate) base: Option<ItemId>,
    pub(crate) fonts: FontTable,
    pub(crate) frame: Option<Frame>,
    /// Target of the most recent `join ... to`.
    pub(crate) joined: Point,
    pub(crate) resolution: i32,
    minimum_thickness: i32,
    /// Lowest and highest level used, starting from 0.
    levels: (i32, i32),
    loader: &'a dyn SourceLoader,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(
        name: &str,
        source: &str,
        settings: &Settings,
        vars: VariableStore,
        loader: &'a dyn SourceLoader,
    ) -> Self {
        Self {
            input: InputStack::new(name, source, settings, vars),
            envs: EnvironmentStack::new(),
            labels: LabelTable::new(),
            macros: MacroStore::new(),
            scene: SceneGraph::new(),
            base: None,
            fonts: FontTable::new(),
            frame: None,
            joined: Point::ZERO,
            resolution: settings.resolution,
            minimum_thickness: settings.minimum_thickness,
            levels: (0, 0),
            loader,
        }
    }

    /// Shape of the current base item.
    pub(crate) fn base_shape(&self) -> Option<&Shape> {
        self.base.and_then(|id| self.scene.get(id)).map(|item| &item.shape)
    }

    /// Skip white space without leaving the line.
    pub(crate) fn skip_blanks(&mut self) {
        while self.input.ch().is_ascii_whitespace() {
            self.input.bump();
        }
    }

    pub(crate) fn note_level(&mut self, level: i32) {
        self.levels = (self.levels.0.min(level), self.levels.1.max(level));
    }

    /// Statement loop. Returns `Err` only when reading was abandoned.
    pub(crate) fn read_all(&mut self) -> ReadResult<()> {
        self.input.advance()?;
        loop {
            self.input.skip_space()?;
            while self.input.ch() == b';' && !self.input.is_eof() {
                self.input.advance()?;
                self.input.skip_space()?;
            }
            if self.input.is_eof() {
                break;
            }

            let word = self.input.read_word()?;
            if word.is_empty() {
                if self.input.ch() == b'#' {
                    let end = self.input.line().len().saturating_sub(1);
                    self.input.set_pos(end);
                    continue;
                }
                if self.input.pos() == 0 {
                    self.input.set_pos(1);
                }
                return self.input.fail(ErrorKind::CommandExpected);
            }

            if self.input.ch() == b':' {
                self.input.advance()?;
                if self.labels.find(&word).is_some() {
                    self.input.report(ErrorKind::DuplicateLabel(word))?;
                } else {
                    self.labels.add_pending(word);
                }
                continue;
            }

            let name = standardize(&word);
            if let Some(command) = find_command(&name) {
                debug!(command = %name, "dispatch");
                command.run(self)?;
                let terminated = self.input.ch() == b';';
                self.input.bump();
                if !terminated {
                    self.input.report(ErrorKind::SemicolonExpected)?;
                    continue;
                }
                for label in self.labels.take_pending().into_iter().rev() {
                    self.input.report(ErrorKind::MisplacedLabel(label))?;
                }
            } else if let Some(mac) = self.macros.find(&word) {
                if self.input.is_active(&mac.name) {
                    return self.input.fail(ErrorKind::RecursiveMacro);
                }
                self.obey_macro(mac)?;
            } else {
                self.input.report(ErrorKind::UnknownCommand(word))?;
            }
        }
        Ok(())
    }

    /// Turn the final state into a document, or collect the errors.
    pub(crate) fn finish(mut self, name: &str, abandoned: bool) -> Result<Document, ReadFailure> {
        let errors = self.input.take_errors();
        if abandoned || !errors.is_empty() {
            return Err(ReadFailure {
                name: name.to_string(),
                abandoned,
                errors: errors.into_vec(),
            });
        }
        debug!(items = self.scene.len(), "reading complete");
        Ok(Document::new(
            self.scene,
            self.frame,
            self.fonts,
            self.input.vars,
            self.levels,
            self.resolution,
            self.minimum_thickness,
        ))
    }
}
