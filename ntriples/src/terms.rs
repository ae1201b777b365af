use crate::error::{GrammarViolation, NTriplesError};
use crate::unescape::{unquote_into, uriquote, EscapeMode};
use ntio_api::model::{Literal, NamedNode};

/// Byte-level read position inside a single line.
pub(crate) struct Cursor<'l> {
    line: &'l str,
    position: usize,
}

impl<'l> Cursor<'l> {
    pub(crate) fn new(line: &'l str) -> Self {
        Self { line, position: 0 }
    }

    pub(crate) fn rest(&self) -> &'l str {
        &self.line[self.position..]
    }

    pub(crate) fn current(&self) -> Option<u8> {
        self.line.as_bytes().get(self.position).copied()
    }

    pub(crate) fn advance(&mut self, count: usize) {
        self.position += count;
    }

    pub(crate) fn skip_whitespace(&mut self) {
        loop {
            match self.current() {
                Some(b' ') | Some(b'\t') => self.position += 1,
                _ => return,
            }
        }
    }

    pub(crate) fn expect_whitespace(&mut self) -> Result<(), GrammarViolation> {
        match self.current() {
            Some(b' ') | Some(b'\t') => {
                self.skip_whitespace();
                Ok(())
            }
            _ => Err(GrammarViolation::ExpectedWhitespace),
        }
    }
}

// uriref ::= '<' [^\s"<>]+ '>'
pub(crate) fn scan_uriref<'l>(
    cursor: &mut Cursor<'l>,
) -> Result<Option<&'l str>, GrammarViolation> {
    if cursor.current() != Some(b'<') {
        return Ok(None);
    }
    let rest = cursor.rest();
    let mut end = None;
    for (i, c) in rest.char_indices().skip(1) {
        match c {
            '>' => {
                end = Some(i);
                break;
            }
            '"' | '<' => return Err(GrammarViolation::Uriref),
            // any whitespace, Unicode included, ends a uriref
            c if c.is_whitespace() => return Err(GrammarViolation::Uriref),
            _ => (),
        }
    }
    let end = match end {
        Some(end) if end > 1 => end,
        _ => return Err(GrammarViolation::Uriref),
    };
    cursor.advance(end + 1);
    Ok(Some(&rest[1..end]))
}

// label ::= [A-Za-z0-9_:] ([-A-Za-z0-9_:.]* [-A-Za-z0-9_:])?
pub(crate) fn scan_blank_node_label<'l>(
    cursor: &mut Cursor<'l>,
) -> Result<Option<&'l str>, GrammarViolation> {
    if cursor.current() != Some(b'_') {
        return Ok(None);
    }
    let rest = cursor.rest();
    let bytes = rest.as_bytes();
    if bytes.get(1) != Some(&b':') {
        return Err(GrammarViolation::BlankNodeLabel);
    }
    match bytes.get(2) {
        Some(&c) if is_label_start(c) => (),
        _ => return Err(GrammarViolation::BlankNodeLabel),
    }
    let mut end = 3;
    while end < bytes.len() && is_label_char(bytes[end]) {
        end += 1;
    }
    // the label may not end with a dot, leave trailing dots to the terminator
    while bytes[end - 1] == b'.' {
        end -= 1;
    }
    cursor.advance(end);
    Ok(Some(&rest[2..end]))
}

fn is_label_start(c: u8) -> bool {
    match c {
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b':' => true,
        _ => false,
    }
}

fn is_label_char(c: u8) -> bool {
    is_label_start(c) || c == b'-' || c == b'.'
}

/// A literal as written on the line, escapes not yet decoded.
pub(crate) struct RawLiteral<'l> {
    value: &'l str,
    language: Option<&'l str>,
    datatype: Option<&'l str>,
}

// literal ::= '"' (char | escape)* '"' ('@' langtag | '^^' uriref)?
pub(crate) fn scan_literal<'l>(
    cursor: &mut Cursor<'l>,
) -> Result<Option<RawLiteral<'l>>, NTriplesError> {
    if cursor.current() != Some(b'"') {
        return Ok(None);
    }
    let rest = cursor.rest();
    let bytes = rest.as_bytes();
    let mut i = 1;
    loop {
        if i >= bytes.len() {
            return Err(GrammarViolation::UnterminatedLiteral.into());
        }
        match bytes[i] {
            b'"' => break,
            b'\\' => match rest[i + 1..].chars().next() {
                Some(c) => i += 1 + c.len_utf8(),
                None => return Err(GrammarViolation::UnterminatedLiteral.into()),
            },
            _ => i += 1,
        }
    }
    let value = &rest[1..i];
    cursor.advance(i + 1);
    let mut literal = RawLiteral {
        value,
        language: None,
        datatype: None,
    };
    match cursor.current() {
        Some(b'@') => {
            literal.language = Some(scan_language_tag(cursor)?);
            if cursor.rest().starts_with("^^") {
                return Err(NTriplesError::language_and_datatype());
            }
        }
        Some(b'^') => {
            literal.datatype = Some(scan_datatype(cursor)?);
            if cursor.current() == Some(b'@') {
                return Err(NTriplesError::language_and_datatype());
            }
        }
        _ => (),
    }
    Ok(Some(literal))
}

// langtag ::= [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
fn scan_language_tag<'l>(cursor: &mut Cursor<'l>) -> Result<&'l str, GrammarViolation> {
    cursor.advance(1);
    let rest = cursor.rest();
    let bytes = rest.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
        end += 1;
    }
    if end == 0 {
        return Err(GrammarViolation::LanguageTag);
    }
    while bytes.get(end) == Some(&b'-') {
        let mut subtag_end = end + 1;
        while subtag_end < bytes.len() && bytes[subtag_end].is_ascii_alphanumeric() {
            subtag_end += 1;
        }
        if subtag_end == end + 1 {
            // a dangling hyphen belongs to whatever follows the tag
            break;
        }
        end = subtag_end;
    }
    cursor.advance(end);
    Ok(&rest[..end])
}

fn scan_datatype<'l>(cursor: &mut Cursor<'l>) -> Result<&'l str, NTriplesError> {
    if !cursor.rest().starts_with("^^") {
        return Err(GrammarViolation::Datatype.into());
    }
    cursor.advance(2);
    match scan_uriref(cursor)? {
        Some(datatype) => Ok(datatype),
        None => Err(GrammarViolation::Datatype.into()),
    }
}

pub(crate) fn build_named_node<'a>(
    raw: &str,
    mode: EscapeMode,
    buffer: &'a mut String,
) -> Result<NamedNode<'a>, NTriplesError> {
    unquote_into(raw, mode, buffer)?;
    uriquote(mode, buffer);
    Ok(NamedNode { iri: buffer })
}

pub(crate) fn build_literal<'a>(
    literal: RawLiteral<'_>,
    mode: EscapeMode,
    value_buffer: &'a mut String,
    annotation_buffer: &'a mut String,
) -> Result<Literal<'a>, NTriplesError> {
    unquote_into(literal.value, mode, value_buffer)?;
    if let Some(language) = literal.language {
        annotation_buffer.push_str(language);
        return Ok(Literal::LanguageTaggedString {
            value: value_buffer,
            language: annotation_buffer,
        });
    }
    if let Some(datatype) = literal.datatype {
        return Ok(Literal::Typed {
            value: value_buffer,
            datatype: build_named_node(datatype, mode, annotation_buffer)?,
        });
    }
    Ok(Literal::Simple {
        value: value_buffer,
    })
}
