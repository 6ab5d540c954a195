//! Macro definitions and body-line expansion.
//!
//! A macro body is kept as the cooked input lines it was defined with (so
//! variables are already substituted). Arguments are spliced in line by line
//! when the body is replayed: `&N` is the Nth argument, `&$` the invocation
//! id, `&&` a literal `&`.

use std::rc::Rc;

/// A named, stored macro body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    /// Highest `&N` referenced anywhere in the body.
    pub argcount: usize,
    pub lines: Vec<Vec<u8>>,
}

impl Macro {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argcount: 0,
            lines: Vec::new(),
        }
    }

    /// Append a body line, widening the argument count as needed.
    pub fn push_line(&mut self, line: Vec<u8>) {
        self.argcount = self.argcount.max(max_arg(&line));
        self.lines.push(line);
    }
}

/// All macros defined so far. A later definition shadows an earlier one with
/// the same name.
#[derive(Debug, Default)]
pub struct MacroStore {
    defs: Vec<Rc<Macro>>,
}

impl MacroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, mac: Macro) {
        self.defs.push(Rc::new(mac));
    }

    /// Exact, case-sensitive lookup by the name as written.
    pub fn find(&self, name: &str) -> Option<Rc<Macro>> {
        self.defs.iter().rev().find(|m| m.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Highest `&N` reference in a line.
pub fn max_arg(line: &[u8]) -> usize {
    let mut best = 0;
    let mut i = 0;
    while i < line.len() {
        let c = line[i];
        i += 1;
        if c != b'&' {
            continue;
        }
        if line.get(i) == Some(&b'&') {
            i += 1;
            continue;
        }
        let mut n = 0usize;
        while let Some(d) = line.get(i).filter(|d| d.is_ascii_digit()) {
            n = n * 10 + usize::from(d - b'0');
            i += 1;
        }
        best = best.max(n);
    }
    best
}

/// Produce the text of one body line for a particular invocation.
///
/// A bare `&` not followed by digits selects the first argument; references
/// past the supplied arguments expand to nothing.
pub fn expand_line(line: &[u8], args: &[Vec<u8>], id: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < line.len() {
        let c = line[i];
        if c != b'&' {
            out.push(c);
            i += 1;
            continue;
        }
        match line.get(i + 1) {
            Some(b'&') => {
                out.push(b'&');
                i += 2;
            }
            Some(b'$') => {
                out.extend_from_slice(id.to_string().as_bytes());
                i += 2;
            }
            _ => {
                i += 1;
                let mut n = 0usize;
                while let Some(d) = line.get(i).filter(|d| d.is_ascii_digit()) {
                    n = n * 10 + usize::from(d - b'0');
                    i += 1;
                }
                if let Some(arg) = args.get(n.max(1) - 1) {
                    out.extend_from_slice(arg);
                }
            }
        }
    }
    out
}
