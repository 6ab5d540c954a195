//! Tokens read straight off the input cursor: words, numbers, vectors.
//!
//! Numbers are fixed point with three decimals (`1.5` reads as 1500). A word
//! is a run of ASCII letters and digits; reading one also skips any space
//! after it. Nothing here allocates a token stream: each reader consumes
//! exactly what it recognises and leaves the cursor on the next byte.

use crate::defaults::WORD_SIZE;
use crate::errors::{ErrorKind, ReadResult};
use crate::input::InputStack;
use crate::types::{Fixed, Point, pt};

/// Apply a magnification (1000 = 100%) to a dimension.
#[inline]
pub fn magnify(value: Fixed, magnification: Fixed) -> Fixed {
    (i64::from(value) * i64::from(magnification) / 1000) as Fixed
}

/// Fold accepted spelling variants onto the canonical command and option
/// names: `gray` becomes `grey`, `color` becomes `colour`, and the long
/// `greyness` shortens to `grey`.
pub fn standardize(word: &str) -> String {
    let mut s = word.to_string();
    if s.len() > 20 {
        return s;
    }
    if let Some(i) = s.find("gray") {
        s.replace_range(i + 2..i + 3, "e");
    }
    if s.ends_with("greyness") {
        s.truncate(s.len() - 4);
    }
    if let Some(i) = s.find("color") {
        s.insert(i + 4, 'u');
    }
    s
}

impl InputStack {
    /// Read a word (possibly empty) and skip the space after it. A word
    /// pushed back with [`unread`](Self::unread) is returned first.
    pub fn read_word(&mut self) -> ReadResult<String> {
        if let Some(word) = self.take_held() {
            return Ok(word);
        }
        let mut word = String::new();
        while self.ch().is_ascii_alphanumeric() {
            if word.len() >= WORD_SIZE - 1 {
                self.fail(ErrorKind::WordTooLong)?;
            }
            word.push(char::from(self.ch()));
            self.bump();
        }
        self.skip_space()?;
        Ok(word)
    }

    /// Optionally signed integer, then skip space.
    pub fn read_int(&mut self) -> ReadResult<i32> {
        let mut sign = 1;
        if self.ch() == b'-' {
            sign = -1;
            self.advance()?;
        }
        let mut n: i32 = 0;
        while self.ch().is_ascii_digit() {
            n = n.saturating_mul(10).saturating_add(i32::from(self.ch() - b'0'));
            self.bump();
        }
        self.skip_space()?;
        Ok(n * sign)
    }

    /// Optionally signed fixed-point number. The cursor is left on the byte
    /// after it, with no space skipped.
    pub fn read_number(&mut self) -> ReadResult<Fixed> {
        let mut sign = 1;
        match self.ch() {
            b'-' => {
                sign = -1;
                self.advance()?;
            }
            b'+' => self.advance()?,
            _ => {}
        }
        let mut n: Fixed = 0;
        while self.ch().is_ascii_digit() {
            n = n.saturating_mul(10).saturating_add(Fixed::from(self.ch() - b'0'));
            self.bump();
        }
        n = n.saturating_mul(1000);
        if self.ch() == b'.' {
            let mut m = 100;
            self.bump();
            while self.ch().is_ascii_digit() {
                n = n.saturating_add(Fixed::from(self.ch() - b'0') * m);
                m /= 10;
                self.bump();
            }
        }
        Ok(n * sign)
    }

    /// Read `(x, y)` with the cursor on the opening parenthesis. Both values
    /// are magnified. On a syntax error the values read so far are returned.
    pub fn read_vector(&mut self, magnification: Fixed) -> ReadResult<Point> {
        let mut v = pt(0, 0);
        self.advance()?;
        self.skip_space()?;
        if !starts_number(self.ch()) {
            self.report(ErrorKind::Expected("Number"))?;
            return Ok(v);
        }
        v.x = magnify(self.read_number()?, magnification);
        if self.ch() != b',' {
            self.report(ErrorKind::Expected("Comma"))?;
            return Ok(v);
        }
        self.advance()?;
        self.skip_space()?;
        if !starts_number(self.ch()) {
            self.report(ErrorKind::Expected("Number"))?;
        } else {
            v.y = magnify(self.read_number()?, magnification);
            if self.ch() != b')' {
                self.report(ErrorKind::Expected("Closing parenthesis"))?;
                return Ok(v);
            }
        }
        while self.ch() != b')' && !self.is_eof() {
            self.advance()?;
        }
        self.advance()?;
        self.skip_space()?;
        Ok(v)
    }
}

#[inline]
fn starts_number(c: u8) -> bool {
    c.is_ascii_digit() || c == b'-'
}
