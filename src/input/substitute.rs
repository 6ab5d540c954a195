//! Variable substitution: raw line in, cooked line out.

use crate::defaults::{LINE_SIZE, VARIABLE_NAME_SIZE};
use crate::errors::ErrorKind;
use crate::vars::VariableStore;

/// Result of cooking one raw line.
///
/// `issues` pairs each problem with its offset in the raw line. If the last
/// issue is fatal the line is incomplete and must not be used.
#[derive(Debug, Default, PartialEq)]
pub struct Cooked {
    pub line: Vec<u8>,
    pub issues: Vec<(ErrorKind, usize)>,
}

impl Cooked {
    pub fn is_fatal(&self) -> bool {
        self.issues.last().is_some_and(|(kind, _)| kind.is_fatal())
    }
}

/// Replace `$name` and `${name}` with variable values.
///
/// `$$` is a literal `$`. `&$` and `&&` are left alone for macro expansion.
/// Unknown, empty or overlong names are reported and dropped rather than
/// left in the line as literal text; scanning carries on after them. This
/// matches the historical reader, where an unknown name removes the whole
/// `$name` reference.
pub fn substitute(raw: &[u8], vars: &VariableStore) -> Cooked {
    let mut out = Cooked::default();
    let mut s = 0;

    while s < raw.len() {
        let left = LINE_SIZE - out.line.len().min(LINE_SIZE);
        if left < 2 {
            out.issues.push((ErrorKind::SubstitutedLineTooLong, s));
            return out;
        }

        let c = raw[s];
        if c == b'&' {
            out.line.push(c);
            s += 1;
            if let Some(&next @ (b'$' | b'&')) = raw.get(s) {
                out.line.push(next);
                s += 1;
            }
            continue;
        }
        if c != b'$' {
            out.line.push(c);
            s += 1;
            continue;
        }
        if raw.get(s + 1) == Some(&b'$') {
            out.line.push(b'$');
            s += 2;
            continue;
        }

        s += 1;
        let bracketed = raw.get(s) == Some(&b'{');
        if bracketed {
            s += 1;
        }
        let start = s;
        while raw.get(s).is_some_and(u8::is_ascii_alphanumeric) {
            s += 1;
        }
        let full = &raw[start..s];
        let too_long = full.len() > VARIABLE_NAME_SIZE - 1;
        let name = String::from_utf8_lossy(&full[..full.len().min(VARIABLE_NAME_SIZE - 1)]).into_owned();
        let at = s;

        if bracketed {
            if raw.get(s) == Some(&b'}') {
                s += 1;
            } else {
                out.issues.push((ErrorKind::MissingBrace(name.clone()), at));
            }
        }

        if name.is_empty() {
            out.issues.push((ErrorKind::EmptyVariableName, at));
        } else if too_long {
            out.issues.push((ErrorKind::VariableNameTooLong, at));
        } else {
            match vars.get(&name) {
                None => out.issues.push((ErrorKind::UnknownVariable(name), at)),
                Some(value) => {
                    let left = LINE_SIZE - out.line.len().min(LINE_SIZE);
                    if left < value.len() + 1 {
                        out.issues.push((ErrorKind::SubstitutionTooLong(name), at));
                        return out;
                    }
                    out.line.extend_from_slice(value.as_bytes());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VariableStore {
        let mut v = VariableStore::new();
        v.set("w", "72");
        v.set("name", "Alpha");
        v
    }

    fn cook(raw: &str) -> Cooked {
        substitute(raw.as_bytes(), &store())
    }

    #[test]
    fn no_dollar_is_identity() {
        let c = cook("box width 3 \"a & b\";\n");
        assert_eq!(c.line, b"box width 3 \"a & b\";\n");
        assert!(c.issues.is_empty());
    }

    #[test]
    fn plain_and_bracketed_names() {
        assert_eq!(cook("box width $w;\n").line, b"box width 72;\n");
        assert_eq!(cook("text \"${name}s\";\n").line, b"text \"Alphas\";\n");
    }

    #[test]
    fn double_dollar_is_literal() {
        let c = cook("text \"$$w\";\n");
        assert_eq!(c.line, b"text \"$w\";\n");
        assert!(c.issues.is_empty());
    }

    #[test]
    fn macro_escapes_are_left_alone() {
        assert_eq!(cook("A&$: box; &&x\n").line, b"A&$: box; &&x\n");
    }

    #[test]
    fn unknown_variable_is_reported_and_dropped() {
        let c = cook("box $nope;\n");
        assert_eq!(c.line, b"box ;\n");
        assert_eq!(c.issues, vec![(ErrorKind::UnknownVariable("nope".into()), 9)]);
        assert!(!c.is_fatal());
    }

    #[test]
    fn missing_brace_and_empty_name() {
        let c = cook("${w x\n");
        assert_eq!(c.line, b"72 x\n");
        assert_eq!(c.issues, vec![(ErrorKind::MissingBrace("w".into()), 3)]);

        let c = cook("$ x\n");
        assert_eq!(c.issues, vec![(ErrorKind::EmptyVariableName, 1)]);
    }

    #[test]
    fn long_name_is_reported() {
        let raw = format!("${};\n", "a".repeat(VARIABLE_NAME_SIZE));
        let c = cook(&raw);
        assert_eq!(c.issues.len(), 1);
        assert_eq!(c.issues[0].0, ErrorKind::VariableNameTooLong);
    }

    #[test]
    fn overflow_is_fatal() {
        let mut v = VariableStore::new();
        v.set("big", "x".repeat(200));
        let c = substitute(b"$big $big\n", &v);
        assert!(c.is_fatal());
        assert_eq!(c.issues.last().map(|i| i.0.number()), Some(25));
    }
}
