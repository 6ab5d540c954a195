//! The layered input stream.
//!
//! Everything above this module sees one logical line at a time and a scan
//! cursor into it. Underneath, three sources are stacked: the main file,
//! included files, and active macro invocations. When the current line runs
//! out, [`InputStack::advance`] refills it from whichever source is on top,
//! cooking file lines through variable substitution on the way in and
//! resuming the saved line and cursor when an include or macro finishes.
//!
//! Lines are byte buffers that end in `\n`; reading past the end yields 0.

pub mod decode;
pub mod entities;
pub mod loader;
pub mod substitute;

use std::rc::Rc;

use crate::config::Settings;
use crate::defaults::{LINE_SIZE, MAX_NESTING};
use crate::errors::{ErrorKind, ErrorLog, ReadError, ReadResult, SourceContext};
use crate::log::{debug, trace};
use crate::macros::{Macro, expand_line};
use crate::vars::VariableStore;

pub use loader::{FsLoader, MemoryLoader, NoIncludes, SourceLoader};

/// One source text split into newline-terminated lines.
#[derive(Debug)]
struct SourceFile {
    name: String,
    lines: std::vec::IntoIter<Vec<u8>>,
}

impl SourceFile {
    fn new(name: &str, text: &str) -> Self {
        let lines: Vec<Vec<u8>> = text
            .split_inclusive('\n')
            .map(|l| {
                let mut bytes = l.as_bytes().to_vec();
                if bytes.last() != Some(&b'\n') {
                    bytes.push(b'\n');
                }
                bytes
            })
            .collect();
        Self {
            name: name.to_string(),
            lines: lines.into_iter(),
        }
    }
}

/// Saved state of the file that issued an `include`.
#[derive(Debug)]
struct IncludeFrame {
    file: SourceFile,
    line: Vec<u8>,
    pos: usize,
}

/// One running macro invocation.
#[derive(Debug)]
struct ActiveMacro {
    body: Rc<Macro>,
    next: usize,
    args: Vec<Vec<u8>>,
    line: Vec<u8>,
    pos: usize,
    id: u32,
}

/// Nested files and macro calls presented as one character stream.
#[derive(Debug)]
pub struct InputStack {
    pub vars: VariableStore,
    errors: ErrorLog,
    substitute: bool,
    translate: bool,
    file: SourceFile,
    includes: Vec<IncludeFrame>,
    macros: Vec<ActiveMacro>,
    line: Vec<u8>,
    pos: usize,
    prev: Vec<u8>,
    raw: Vec<u8>,
    eof: bool,
    macro_count: u32,
    macro_id: u32,
    held: Option<String>,
}

impl InputStack {
    pub fn new(name: &str, text: &str, settings: &Settings, vars: VariableStore) -> Self {
        Self {
            vars,
            errors: ErrorLog::new(),
            substitute: settings.substitute_variables,
            translate: settings.translate_characters,
            file: SourceFile::new(name, text),
            includes: Vec::new(),
            macros: Vec::new(),
            line: b"\n".to_vec(),
            pos: 0,
            prev: b"\n".to_vec(),
            raw: Vec::new(),
            eof: false,
            macro_count: 0,
            macro_id: 0,
            held: None,
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Byte under the cursor (0 past the end of the line).
    #[inline]
    pub fn ch(&self) -> u8 {
        self.at(self.pos)
    }

    /// Byte `offset` places after the cursor.
    #[inline]
    pub fn peek(&self, offset: usize) -> u8 {
        self.at(self.pos + offset)
    }

    #[inline]
    pub fn at(&self, i: usize) -> u8 {
        self.line.get(i).copied().unwrap_or(0)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Step within the current line without refilling.
    #[inline]
    pub fn bump(&mut self) {
        self.pos += 1;
    }

    pub fn line(&self) -> &[u8] {
        &self.line
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn in_macro(&self) -> bool {
        !self.macros.is_empty()
    }

    /// True if a macro of this name is currently being replayed.
    pub fn is_active(&self, name: &str) -> bool {
        self.macros.iter().any(|m| m.body.name == name)
    }

    pub fn source_name(&self) -> &str {
        &self.file.name
    }

    /// Decode the next character of quoted text (see [`decode::next_uchar`]).
    pub fn next_uchar(&mut self) -> u32 {
        decode::next_uchar(&self.line, &mut self.pos, self.translate)
    }

    // ========================================================================
    // Refilling
    // ========================================================================

    /// Move to the next character, refilling the line when it runs out.
    pub fn advance(&mut self) -> ReadResult<()> {
        self.pos += 1;
        if self.pos < self.line.len() {
            return Ok(());
        }
        self.refill()
    }

    /// Skip spaces and line ends. A cursor already past the end of the line
    /// counts as a line end.
    pub fn skip_space(&mut self) -> ReadResult<()> {
        while matches!(self.ch(), b' ' | b'\n') || (self.pos >= self.line.len() && !self.eof) {
            self.advance()?;
            if self.eof {
                break;
            }
        }
        Ok(())
    }

    fn refill(&mut self) -> ReadResult<()> {
        let done = std::mem::take(&mut self.line);
        if done.first().is_some_and(|&c| c != b'\n') {
            self.prev = done;
        }

        if let Some(top) = self.macros.last_mut() {
            if let Some(body_line) = top.body.lines.get(top.next) {
                self.line = expand_line(body_line, &top.args, self.macro_id);
                self.pos = 0;
                top.next += 1;
            } else if let Some(frame) = self.macros.pop() {
                debug!(name = %frame.body.name, "macro finished");
                self.line = frame.line;
                self.pos = frame.pos;
                self.macro_id = frame.id;
            }
            return Ok(());
        }

        while !self.eof {
            match self.file.lines.next() {
                Some(raw) => {
                    trace!(file = %self.file.name, "read line");
                    if raw.len() >= LINE_SIZE - 1 {
                        self.raw = raw;
                        let context = SourceContext::new(&self.file.name, "");
                        return self
                            .errors
                            .record(ReadError::new(ErrorKind::LineTooLong(LINE_SIZE - 1), &context, 0));
                    }
                    self.raw = raw;
                    self.line = if self.substitute { self.cook()? } else { self.raw.clone() };
                    self.pos = 0;
                    if self.line.first() != Some(&b'#') {
                        break;
                    }
                }
                None => match self.includes.pop() {
                    Some(frame) => {
                        debug!(file = %self.file.name, "include finished");
                        self.file = frame.file;
                        self.line = frame.line;
                        self.pos = frame.pos;
                        return self.advance();
                    }
                    None => {
                        self.eof = true;
                        self.pos = 0;
                        self.line.clear();
                    }
                },
            }
        }
        Ok(())
    }

    /// Run substitution on the raw line, recording problems against it.
    fn cook(&mut self) -> ReadResult<Vec<u8>> {
        let cooked = substitute::substitute(&self.raw, &self.vars);
        if !cooked.issues.is_empty() {
            let context = SourceContext::new(&self.file.name, display(&self.raw));
            for (kind, at) in cooked.issues {
                self.errors.record(ReadError::new(kind, &context, at))?;
            }
        }
        Ok(cooked.line)
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Switch input to an included source. Reading resumes after the
    /// current cursor when it is exhausted.
    pub fn push_include(&mut self, name: &str, text: &str) -> ReadResult<()> {
        if self.includes.len() >= MAX_NESTING {
            return self.fail(ErrorKind::IncludeTooDeep(MAX_NESTING));
        }
        debug!(file = name, depth = self.includes.len() + 1, "include");
        let file = std::mem::replace(&mut self.file, SourceFile::new(name, text));
        self.includes.push(IncludeFrame {
            file,
            line: std::mem::replace(&mut self.line, b";\n".to_vec()),
            pos: self.pos,
        });
        self.pos = 0;
        Ok(())
    }

    /// Start replaying a macro body with the given arguments.
    pub fn push_macro(&mut self, body: Rc<Macro>, args: Vec<Vec<u8>>) -> ReadResult<()> {
        if self.macros.len() >= MAX_NESTING {
            return self.fail(ErrorKind::MacroTooDeep(MAX_NESTING));
        }
        debug!(name = %body.name, args = args.len(), "macro call");
        let id = std::mem::replace(&mut self.macro_id, self.macro_count);
        self.macro_count += 1;
        self.macros.push(ActiveMacro {
            body,
            next: 0,
            args,
            line: std::mem::take(&mut self.line),
            pos: self.pos,
            id,
        });
        self.pos = 0;
        self.refill()
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Record an error against the current position, then skip to the next
    /// `;` or end of line.
    pub fn report(&mut self, kind: ErrorKind) -> ReadResult<()> {
        self.report_at(kind, self.pos)
    }

    /// As [`report`](Self::report), reflecting a different column. Column 0
    /// reflects the previous line instead.
    pub fn report_at(&mut self, kind: ErrorKind, column: usize) -> ReadResult<()> {
        self.record_at(kind, column)?;
        self.skip_statement();
        Ok(())
    }

    /// Record without moving the cursor.
    pub fn record_at(&mut self, kind: ErrorKind, column: usize) -> ReadResult<()> {
        let (text, column) = if column > 0 {
            (display(&self.line), column)
        } else {
            (display(&self.prev), self.prev.len())
        };
        let context = SourceContext::new(&self.file.name, text);
        self.errors.record(ReadError::new(kind, &context, column))
    }

    /// Record a fatal error and stop.
    pub fn fail(&mut self, kind: ErrorKind) -> ReadResult<()> {
        self.report(kind)?;
        Err(crate::errors::Abort)
    }

    fn skip_statement(&mut self) {
        let mut quoted = false;
        loop {
            let c = self.ch();
            if c == b'\n' || c == 0 || (!quoted && c == b';') {
                break;
            }
            if c == b'"' {
                if !quoted {
                    quoted = true;
                } else if self.peek(1) != b'"' {
                    quoted = false;
                } else {
                    self.pos += 1;
                }
            }
            self.pos += 1;
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn take_errors(&mut self) -> ErrorLog {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Held words
    // ========================================================================

    pub(crate) fn take_held(&mut self) -> Option<String> {
        self.held.take()
    }

    /// Push a word back so the next [`read_word`](Self::read_word) returns it.
    pub fn unread(&mut self, word: String) {
        if !word.is_empty() {
            self.held = Some(word);
        }
    }

    pub fn has_held_word(&self) -> bool {
        self.held.is_some()
    }

    pub fn clear_held(&mut self) {
        self.held = None;
    }
}

/// A line as shown in diagnostics: lossy UTF-8 without the line end.
fn display(line: &[u8]) -> String {
    let trimmed = line.strip_suffix(b"\n").unwrap_or(line);
    String::from_utf8_lossy(trimmed).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(text: &str) -> InputStack {
        InputStack::new("<test>", text, &Settings::default(), VariableStore::seeded(Some("now")))
    }

    /// Drain the stream, collecting every byte the cursor visits.
    fn drain(input: &mut InputStack) -> String {
        let mut out = Vec::new();
        input.advance().unwrap();
        while !input.is_eof() {
            out.push(input.ch());
            input.advance().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lines_are_concatenated() {
        let mut input = stack("box;\nline;");
        assert_eq!(drain(&mut input), "box;\nline;\n");
    }

    #[test]
    fn comment_lines_are_skipped() {
        let mut input = stack("# heading\nbox;\n#more\n");
        assert_eq!(drain(&mut input), "box;\n");
    }

    #[test]
    fn variables_are_substituted() {
        let mut input = stack("text \"$title\";\n");
        assert_eq!(drain(&mut input), "text \"Unknown\";\n");
    }

    #[test]
    fn substitution_can_be_disabled() {
        let settings = Settings::default().without_variables();
        let mut input = InputStack::new("<test>", "$x\n", &settings, VariableStore::new());
        assert_eq!(drain(&mut input), "$x\n");
        assert_eq!(input.error_count(), 0);
    }

    #[test]
    fn unknown_variable_is_recorded_against_raw_line() {
        let mut input = stack("box $nope;\n");
        drain(&mut input);
        let errors = input.take_errors();
        let first = errors.iter().next().unwrap();
        assert_eq!(first.number(), 6);
        assert_eq!(first.line(), "box $nope;");
        assert_eq!(first.column(), 9);
    }

    #[test]
    fn include_resumes_after_cursor() {
        let mut input = stack("a;b\n");
        input.advance().unwrap();
        input.advance().unwrap();
        assert_eq!(input.ch(), b';');
        input.push_include("inc", "x\n").unwrap();
        assert_eq!(input.ch(), b';');
        let mut seen = Vec::new();
        input.advance().unwrap();
        while !input.is_eof() {
            seen.push(input.ch());
            input.advance().unwrap();
        }
        assert_eq!(String::from_utf8(seen).unwrap(), "\nx\nb\n");
    }

    #[test]
    fn macro_lines_replay_then_restore() {
        let mut mac = Macro::new("m");
        mac.push_line(b"L&$: line &1 ".to_vec());
        let mut input = stack("m 3;\n");
        input.advance().unwrap();
        input.set_pos(3);
        input.push_macro(Rc::new(mac), vec![b"3".to_vec()]).unwrap();
        assert!(input.in_macro());
        assert_eq!(input.line(), b"L0: line 3 ");
        input.set_pos(input.line().len() - 1);
        input.advance().unwrap();
        assert!(!input.in_macro());
        assert_eq!(input.ch(), b';');
    }

    #[test]
    fn report_skips_to_semicolon() {
        let mut input = stack("box widht \"a;b\" 3; line;\n");
        input.advance().unwrap();
        input.set_pos(4);
        input.report(ErrorKind::UnknownOption("widht".into())).unwrap();
        assert_eq!(input.pos(), 17);
        assert_eq!(input.ch(), b';');
    }

    #[test]
    fn overlong_line_is_fatal() {
        let text = format!("{}\n", "x".repeat(LINE_SIZE));
        let mut input = stack(&text);
        assert!(input.advance().is_err());
        assert_eq!(input.take_errors().numbers(), vec![35]);
    }
}
