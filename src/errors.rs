//! Error types with rich diagnostics using miette
//!
//! Every problem found while reading is recorded as a [`ReadError`] carrying a
//! numbered [`ErrorKind`] and the offending input line with a caret position.
//! Most errors are recovered from locally; the fatal ones unwind the reader
//! through [`Abort`]. A run that recorded anything at all produces no
//! document, only a [`ReadFailure`].

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::defaults::MAX_ERRORS;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (file name, include path or "<input>")
    pub name: String,
    /// The reflected line
    pub line: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: line.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.line.clone())
    }
}

// ============================================================================
// Error categories
// ============================================================================

/// The numbered error categories.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("failed to open {path} for {purpose}: {reason}")]
    OpenFailed {
        path: String,
        purpose: &'static str,
        reason: String,
    },

    #[error("unknown aspic command \"{0}\"")]
    UnknownCommand(String),

    #[error("semicolon expected (unexpected text follows command)")]
    SemicolonExpected,

    #[error("font {0} has not been bound")]
    UnboundFont(i32),

    #[error("font number must be greater than 0")]
    BadFontNumber,

    #[error("unknown variable \"{0}\"")]
    UnknownVariable(String),

    #[error("unknown option word \"{0}\"")]
    UnknownOption(String),

    #[error("dimension expected")]
    DimensionExpected,

    #[error("label \"{0}\" incorrectly placed (may only precede drawing command)")]
    MisplacedLabel(String),

    #[error("can't find item labelled \"{0}\"")]
    UnknownLabel(String),

    #[error("{0} expected")]
    Expected(&'static str),

    #[error("no previous item")]
    NoPreviousItem,

    #[error("inappropriate position descriptor applied to a {0}")]
    BadAnchor(&'static str),

    #[error("inappropriate fraction encountered")]
    MisplacedFraction,

    #[error("command word expected - processing abandoned")]
    CommandExpected,

    #[error("empty variable name")]
    EmptyVariableName,

    #[error("no stacked environment to restore")]
    NothingToPop,

    #[error("too many constraints for arc")]
    ArcOverConstrained,

    #[error("grey level or RGB value must not be greater than 1.0")]
    ColourOutOfRange,

    #[error("closing quote missing; string terminated at end of line")]
    MissingQuote,

    #[error("no previous item to join to")]
    NothingToJoin,

    #[error("\"depth\" or \"via\" for arc given without end point")]
    ArcWithoutEnd,

    #[error("an arc cannot be constructed using the given via point")]
    ImpossibleVia,

    #[error("line too long while substituting \"{0}\" - processing abandoned")]
    SubstitutionTooLong(String),

    #[error("line too long while substituting - processing abandoned")]
    SubstitutedLineTooLong,

    #[error("missing }} after \"${{{0}\"")]
    MissingBrace(String),

    #[error("file name expected")]
    FileNameExpected,

    #[error("\"include\" is not allowed in a macro")]
    IncludeInMacro,

    #[error("missing \"to\" parameter for curve")]
    CurveWithoutEnd,

    #[error("curve length {0} is too short")]
    CurveTooShort(f64),

    #[error("input line is too long (max {0}) - processing abandoned")]
    LineTooLong(usize),

    #[error("word is too long - processing abandoned")]
    WordTooLong,

    #[error("duplicate label \"{0}\"")]
    DuplicateLabel(String),

    #[error("width/depth and an endpoint are mutually exclusive")]
    EndpointWithSize,

    #[error("macro name \"{0}\" is not allowed - matches a command name")]
    MacroNameClash(String),

    #[error("end of file while reading macro \"{0}\" - processing abandoned")]
    UnterminatedMacro(String),

    #[error("recursive macro call not allowed - processing abandoned")]
    RecursiveMacro,

    #[error("the \"align\" option is not valid for a sloping line")]
    SlopingAlign,

    #[error("variable name is too long in substitution")]
    VariableNameTooLong,

    #[error("includes nested too deeply (max {0}) - processing abandoned")]
    IncludeTooDeep(usize),

    #[error("macro calls nested too deeply (max {0}) - processing abandoned")]
    MacroTooDeep(usize),

    #[error("too many errors - processing abandoned")]
    TooManyErrors,
}

impl ErrorKind {
    /// The stable category number.
    pub fn number(&self) -> u32 {
        use ErrorKind::*;
        match self {
            OpenFailed { .. } => 1,
            UnknownCommand(_) => 2,
            SemicolonExpected => 3,
            UnboundFont(_) => 4,
            BadFontNumber => 5,
            UnknownVariable(_) => 6,
            UnknownOption(_) => 7,
            DimensionExpected => 8,
            MisplacedLabel(_) => 9,
            UnknownLabel(_) => 10,
            Expected(_) => 11,
            NoPreviousItem => 12,
            BadAnchor(_) => 13,
            MisplacedFraction => 14,
            CommandExpected => 16,
            EmptyVariableName => 17,
            NothingToPop => 18,
            ArcOverConstrained => 19,
            ColourOutOfRange => 20,
            MissingQuote => 21,
            NothingToJoin => 22,
            ArcWithoutEnd => 23,
            ImpossibleVia => 24,
            SubstitutionTooLong(_) => 25,
            SubstitutedLineTooLong => 26,
            MissingBrace(_) => 27,
            FileNameExpected => 29,
            IncludeInMacro => 30,
            CurveWithoutEnd => 33,
            CurveTooShort(_) => 34,
            LineTooLong(_) => 35,
            WordTooLong => 36,
            DuplicateLabel(_) => 37,
            EndpointWithSize => 38,
            MacroNameClash(_) => 39,
            UnterminatedMacro(_) => 40,
            RecursiveMacro => 41,
            SlopingAlign => 42,
            VariableNameTooLong => 43,
            IncludeTooDeep(_) => 44,
            MacroTooDeep(_) => 45,
            TooManyErrors => 46,
        }
    }

    /// Fatal errors stop reading immediately.
    pub fn is_fatal(&self) -> bool {
        use ErrorKind::*;
        matches!(
            self,
            CommandExpected
                | SubstitutionTooLong(_)
                | SubstitutedLineTooLong
                | LineTooLong(_)
                | WordTooLong
                | UnterminatedMacro(_)
                | RecursiveMacro
                | IncludeTooDeep(_)
                | MacroTooDeep(_)
                | TooManyErrors
        )
    }
}

// ============================================================================
// Recorded errors
// ============================================================================

/// One recorded error: its category and the reflected input line.
#[derive(Error, Diagnostic, Debug)]
#[error("{kind}")]
#[diagnostic(code(aspic::read))]
pub struct ReadError {
    pub kind: ErrorKind,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    line: String,
    column: usize,
}

impl ReadError {
    pub fn new(kind: ErrorKind, context: &SourceContext, column: usize) -> Self {
        let len = context.line.len();
        let at = column.min(len);
        ReadError {
            kind,
            src: context.named_source(),
            span: SourceSpan::from((at, usize::from(at < len))),
            line: context.line.clone(),
            column,
        }
    }

    pub fn number(&self) -> u32 {
        self.kind.number()
    }

    /// The offending line, without its trailing newline.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The classic three-part report: message, line, caret.
    pub fn caret_report(&self) -> String {
        format!("{}\n{}\n{}^", self.kind, self.line, " ".repeat(self.column))
    }
}

/// Marker returned when reading must stop at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort;

pub type ReadResult<T> = Result<T, Abort>;

/// Ordered log of everything reported during a run.
#[derive(Debug, Default)]
pub struct ErrorLog {
    errors: Vec<ReadError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Fails if the error is fatal or the log overflowed,
    /// in which case a final "too many errors" entry is appended.
    pub fn record(&mut self, error: ReadError) -> ReadResult<()> {
        let fatal = error.kind.is_fatal();
        let context = SourceContext::new(error.src.name(), error.line.clone());
        let column = error.column;
        self.errors.push(error);
        if fatal {
            return Err(Abort);
        }
        if self.errors.len() > MAX_ERRORS {
            self.errors.push(ReadError::new(ErrorKind::TooManyErrors, &context, column));
            return Err(Abort);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadError> {
        self.errors.iter()
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.errors.iter().map(ReadError::number).collect()
    }

    pub fn into_vec(self) -> Vec<ReadError> {
        self.errors
    }
}

/// Returned by a run that recorded any error: no output is produced.
#[derive(Error, Diagnostic, Debug)]
#[error("{} error(s) while reading {name}; no output generated", errors.len())]
#[diagnostic(code(aspic::no_output))]
pub struct ReadFailure {
    pub name: String,
    /// Set when a fatal error cut reading short.
    pub abandoned: bool,
    #[related]
    pub errors: Vec<ReadError>,
}

impl ReadFailure {
    pub fn numbers(&self) -> Vec<u32> {
        self.errors.iter().map(ReadError::number).collect()
    }
}
