//! Character decoding for quoted text.
//!
//! Bytes become code points here: UTF-8 sequences, `&#NNN;` and `&#xHHH;`
//! numeric escapes, `&name;` entities and, when enabled, typographic
//! translation of quote pairs and double hyphens. Anything malformed is
//! passed through as the single byte it started with.

use super::entities;

const UTF8_MASKS: [u32; 6] = [0xff, 0x1f, 0x0f, 0x07, 0x03, 0x01];

/// Byte at `i`, or 0 past the end of the line.
#[inline]
fn at(line: &[u8], i: usize) -> u8 {
    line.get(i).copied().unwrap_or(0)
}

/// Decode the character after `*pos`, leaving `*pos` on its final byte.
pub fn next_uchar(line: &[u8], pos: &mut usize, translate: bool) -> u32 {
    *pos += 1;
    let c = at(line, *pos);

    if c == b'&' {
        if at(line, *pos + 1) == b'#' {
            numeric_escape(line, pos).unwrap_or(u32::from(c))
        } else if at(line, *pos + 1).is_ascii_alphabetic() {
            named_escape(line, pos).unwrap_or(u32::from(c))
        } else {
            u32::from(c)
        }
    } else if c >= 0x80 {
        utf8(line, pos, c)
    } else if translate {
        typographic(line, pos, c)
    } else {
        u32::from(c)
    }
}

fn numeric_escape(line: &[u8], pos: &mut usize) -> Option<u32> {
    let mut start = *pos + 2;
    let radix = if at(line, start) == b'x' {
        start += 1;
        16
    } else {
        10
    };
    let mut end = start;
    let mut value: u32 = 0;
    while let Some(d) = char::from(at(line, end)).to_digit(radix) {
        value = value.saturating_mul(radix).saturating_add(d);
        end += 1;
    }
    if at(line, end) != b';' {
        return None;
    }
    *pos = end;
    Some(value)
}

fn named_escape(line: &[u8], pos: &mut usize) -> Option<u32> {
    let start = *pos + 1;
    let mut end = start + 1;
    while at(line, end).is_ascii_alphanumeric() {
        end += 1;
    }
    if at(line, end) != b';' {
        return None;
    }
    let name = std::str::from_utf8(&line[start..end]).ok()?;
    let value = entities::lookup(name)?;
    *pos = end;
    Some(value)
}

fn utf8(line: &[u8], pos: &mut usize, lead: u8) -> u32 {
    let extra = (lead << 1).leading_ones() as usize;
    if extra == 0 || extra > 5 {
        return u32::from(lead);
    }
    let start = *pos;
    let mut shift = 6 * extra;
    let mut value = (u32::from(lead) & UTF8_MASKS[extra]) << shift;
    for _ in 0..extra {
        *pos += 1;
        let cc = at(line, *pos);
        if cc & 0xc0 != 0x80 {
            *pos = start;
            return u32::from(lead);
        }
        shift -= 6;
        value |= u32::from(cc & 0x3f) << shift;
    }
    value
}

fn typographic(line: &[u8], pos: &mut usize, c: u8) -> u32 {
    let doubled = at(line, *pos + 1) == c;
    let (single, double) = match c {
        b'`' => (0x2018, 0x201c),
        b'\'' => (0x2019, 0x201d),
        b'-' => (u32::from(b'-'), 0x2013),
        _ => return u32::from(c),
    };
    if doubled {
        *pos += 1;
        double
    } else {
        single
    }
}

/// Decode a whole byte slice, for tests and diagnostics.
pub fn decode_all(bytes: &[u8], translate: bool) -> Vec<u32> {
    let mut out = Vec::new();
    let mut line = Vec::with_capacity(bytes.len() + 1);
    line.push(b' ');
    line.extend_from_slice(bytes);
    let mut pos = 0;
    while pos + 1 < line.len() {
        out.push(next_uchar(&line, &mut pos, translate));
    }
    out
}
