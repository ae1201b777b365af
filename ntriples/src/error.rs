use ntio_api::parser::{OffendingLine, ParseError};
use std::error::Error;
use std::fmt;
use std::io;
use std::str;

/// Error that might be returned during parsing.
///
/// It might wrap an IO error or be a parsing error.
#[derive(Debug)]
pub struct NTriplesError {
    pub(crate) kind: NTriplesErrorKind,
    pub(crate) line: Option<OffendingLine>,
}

#[derive(Debug)]
pub enum NTriplesErrorKind {
    Io(io::Error),
    InvalidUtf8(str::Utf8Error),
    Grammar(GrammarViolation),
    Escape(EscapeViolation),
    /// A literal carried both a language tag and a datatype.
    LanguageAndDatatype,
}

/// A line that does not match the statement grammar.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum GrammarViolation {
    SubjectType,
    PredicateType,
    ObjectType,
    ExpectedWhitespace,
    Uriref,
    BlankNodeLabel,
    UnterminatedLiteral,
    LanguageTag,
    Datatype,
    MissingFullStop,
    TrailingGarbage,
}

/// A strict mode unescaping failure.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum EscapeViolation {
    /// An unrecognized or malformed backslash sequence, with a short snippet of it.
    IllegalEscape(String),
    /// A character outside of the printable ASCII range.
    IllegalChar(char),
    /// A `\u` or `\U` escape naming a value that is not a Unicode scalar value.
    DisallowedCodePoint(u32),
}

impl NTriplesError {
    /// The category of this error.
    pub fn kind(&self) -> &NTriplesErrorKind {
        &self.kind
    }

    pub(crate) fn with_line(mut self, line_number: u64, text: &str) -> Self {
        if self.line.is_none() {
            self.line = Some(OffendingLine::new(line_number, text.to_owned()));
        }
        self
    }

    pub(crate) fn language_and_datatype() -> Self {
        Self {
            kind: NTriplesErrorKind::LanguageAndDatatype,
            line: None,
        }
    }
}

impl fmt::Display for NTriplesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NTriplesErrorKind::Io(error) => return error.fmt(f),
            NTriplesErrorKind::InvalidUtf8(error) => return error.fmt(f),
            NTriplesErrorKind::Grammar(violation) => violation.fmt(f),
            NTriplesErrorKind::Escape(violation) => violation.fmt(f),
            NTriplesErrorKind::LanguageAndDatatype => {
                write!(f, "literal with both a language tag and a datatype")
            }
        }?;
        if let Some(line) = &self.line {
            write!(f, " on line {}: {}", line.line_number(), line.text())?;
        }
        Ok(())
    }
}

impl fmt::Display for GrammarViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarViolation::SubjectType => write!(f, "subject must be a uriref or blank node"),
            GrammarViolation::PredicateType => write!(f, "predicate must be a uriref"),
            GrammarViolation::ObjectType => write!(f, "unrecognised object type"),
            GrammarViolation::ExpectedWhitespace => write!(f, "whitespace expected between terms"),
            GrammarViolation::Uriref => write!(f, "malformed uriref"),
            GrammarViolation::BlankNodeLabel => write!(f, "malformed blank node label"),
            GrammarViolation::UnterminatedLiteral => write!(f, "unterminated string literal"),
            GrammarViolation::LanguageTag => write!(f, "malformed language tag"),
            GrammarViolation::Datatype => write!(f, "expected a datatype uriref after '^^'"),
            GrammarViolation::MissingFullStop => {
                write!(f, "missing full stop at the end of the statement")
            }
            GrammarViolation::TrailingGarbage => write!(f, "trailing garbage after the statement"),
        }
    }
}

impl fmt::Display for EscapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeViolation::IllegalEscape(snippet) => {
                write!(f, "illegal escape sequence '{}'", snippet)
            }
            EscapeViolation::IllegalChar(c) => {
                write!(f, "illegal literal character '{}'", c.escape_debug())
            }
            EscapeViolation::DisallowedCodePoint(point) => {
                write!(f, "disallowed codepoint {:08X}", point)
            }
        }
    }
}

impl Error for NTriplesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            NTriplesErrorKind::Io(error) => Some(error),
            NTriplesErrorKind::InvalidUtf8(error) => Some(error),
            _ => None,
        }
    }
}

impl ParseError for NTriplesError {
    fn offending_line(&self) -> Option<&OffendingLine> {
        self.line.as_ref()
    }
}

impl From<io::Error> for NTriplesError {
    fn from(error: io::Error) -> Self {
        Self {
            kind: NTriplesErrorKind::Io(error),
            line: None,
        }
    }
}

impl From<str::Utf8Error> for NTriplesError {
    fn from(error: str::Utf8Error) -> Self {
        Self {
            kind: NTriplesErrorKind::InvalidUtf8(error),
            line: None,
        }
    }
}

impl From<GrammarViolation> for NTriplesError {
    fn from(violation: GrammarViolation) -> Self {
        Self {
            kind: NTriplesErrorKind::Grammar(violation),
            line: None,
        }
    }
}

impl From<EscapeViolation> for NTriplesError {
    fn from(violation: EscapeViolation) -> Self {
        Self {
            kind: NTriplesErrorKind::Escape(violation),
            line: None,
        }
    }
}

impl From<NTriplesError> for io::Error {
    fn from(error: NTriplesError) -> Self {
        match error.kind {
            NTriplesErrorKind::Io(error) => error,
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}
