use crate::error::EscapeViolation;
use std::char;
use std::str::Chars;

/// How backslash escapes in urirefs and literals are decoded.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum EscapeMode {
    /// Decode the usual escape sequences and keep everything else untouched.
    ///
    /// Unrecognized escapes and malformed hex digits pass through verbatim,
    /// and escapes naming a value that is not a Unicode scalar value decode
    /// to U+FFFD.
    Fast,
    /// Validate while decoding: the text must be printable ASCII and every
    /// backslash must start a well-formed escape naming a scalar value.
    Strict,
}

impl Default for EscapeMode {
    fn default() -> Self {
        EscapeMode::Fast
    }
}

/// Decodes the backslash escapes of `raw` to the end of `output`.
pub(crate) fn unquote_into(
    raw: &str,
    mode: EscapeMode,
    output: &mut String,
) -> Result<(), EscapeViolation> {
    match mode {
        EscapeMode::Fast => {
            unquote_fast(raw, output);
            Ok(())
        }
        EscapeMode::Strict => unquote_strict(raw, output),
    }
}

fn unquote_fast(raw: &str, output: &mut String) {
    if !raw.contains('\\') {
        output.push_str(raw);
        return;
    }
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => output.push('\t'),
            Some('b') => output.push('\u{8}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('f') => output.push('\u{c}'),
            Some('"') => output.push('"'),
            Some('\\') => output.push('\\'),
            Some('u') => push_hexa_char(&mut chars, 4, output),
            Some('U') => push_hexa_char(&mut chars, 8, output),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
}

fn push_hexa_char(chars: &mut Chars<'_>, len: usize, output: &mut String) {
    let mut value = 0;
    let mut lookahead = chars.clone();
    for _ in 0..len {
        match lookahead.next().and_then(|digit| digit.to_digit(16)) {
            Some(digit) => value = value * 16 + digit,
            None => {
                // not enough hex digits, keep the introducer verbatim
                output.push('\\');
                output.push(if len == 4 { 'u' } else { 'U' });
                return;
            }
        }
    }
    *chars = lookahead;
    output.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
}

fn unquote_strict(raw: &str, output: &mut String) -> Result<(), EscapeViolation> {
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        let safe = safe_run_len(rest);
        if safe > 0 {
            output.push_str(&rest[..safe]);
            rest = &rest[safe..];
        } else if c == '\\' {
            rest = push_escape(&rest[1..], output)?;
        } else {
            return Err(EscapeViolation::IllegalChar(c));
        }
    }
    Ok(())
}

// [0x20, 0x21, 0x23-0x5B, 0x5D-0x7E]: printable ASCII without '"' and '\'
fn is_safe_char(c: u8) -> bool {
    match c {
        0x20 | 0x21 | 0x23..=0x5B | 0x5D..=0x7E => true,
        _ => false,
    }
}

fn safe_run_len(s: &str) -> usize {
    s.bytes()
        .position(|c| !is_safe_char(c))
        .unwrap_or_else(|| s.len())
}

/// Decodes one escape starting right after the backslash, returning what follows it.
fn push_escape<'a>(tail: &'a str, output: &mut String) -> Result<&'a str, EscapeViolation> {
    let mut chars = tail.chars();
    match chars.next() {
        Some('t') => output.push('\t'),
        Some('b') => output.push('\u{8}'),
        Some('n') => output.push('\n'),
        Some('r') => output.push('\r'),
        Some('f') => output.push('\u{c}'),
        Some('"') => output.push('"'),
        Some('\'') => output.push('\''),
        Some('\\') => output.push('\\'),
        Some('u') => return push_strict_hexa_char(tail, 4, output),
        Some('U') => return push_strict_hexa_char(tail, 8, output),
        _ => return Err(illegal_escape(tail)),
    }
    Ok(chars.as_str())
}

/// Decodes a `\u` or `\U` escape, `tail` starting at the introducer letter.
fn push_strict_hexa_char<'a>(
    tail: &'a str,
    len: usize,
    output: &mut String,
) -> Result<&'a str, EscapeViolation> {
    let digits = match tail.get(1..=len) {
        Some(digits) => digits,
        None => return Err(illegal_escape(tail)),
    };
    let mut value = 0;
    for digit in digits.chars() {
        match digit.to_digit(16) {
            Some(digit) => value = value * 16 + digit,
            None => return Err(illegal_escape(tail)),
        }
    }
    match char::from_u32(value) {
        Some(c) => {
            output.push(c);
            Ok(&tail[len + 1..])
        }
        None => Err(EscapeViolation::DisallowedCodePoint(value)),
    }
}

fn illegal_escape(tail: &str) -> EscapeViolation {
    let snippet: String = tail.chars().take(9).collect();
    EscapeViolation::IllegalEscape(format!("\\{}", snippet))
}

/// Percent-encodes the characters of the U+0080 to U+00FF range, strict mode only.
pub(crate) fn uriquote(mode: EscapeMode, iri: &mut String) {
    if mode != EscapeMode::Strict || iri.chars().all(|c| !is_high_byte(c)) {
        return;
    }
    let mut quoted = String::with_capacity(iri.len() + 8);
    for c in iri.chars() {
        if is_high_byte(c) {
            quoted.push('%');
            quoted.push(hex_digit(u32::from(c) >> 4));
            quoted.push(hex_digit(u32::from(c) & 0xF));
        } else {
            quoted.push(c);
        }
    }
    *iri = quoted;
}

fn is_high_byte(c: char) -> bool {
    ('\u{80}'..='\u{ff}').contains(&c)
}

fn hex_digit(value: u32) -> char {
    match value {
        0..=9 => (b'0' + value as u8) as char,
        _ => (b'A' + (value as u8 - 10)) as char,
    }
}
