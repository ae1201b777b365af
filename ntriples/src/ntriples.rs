//! Implementation of the N-Triples RDF syntax

use crate::bnode::*;
use crate::error::*;
use crate::terms::*;
use crate::unescape::EscapeMode;
use crate::utils::*;
use log::warn;
use ntio_api::model::*;
use ntio_api::parser::*;
use std::io::Read;

/// What the parser does when a line is not a valid statement.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ErrorPolicy {
    /// Stop at the first offending line and return an error.
    Strict,
    /// Log a warning, skip the offending line and keep going.
    ///
    /// A statement that only misses its full stop, or that is followed by a
    /// comment without one, is corrected and emitted instead of skipped.
    /// I/O and encoding errors still stop the parser.
    Permissive,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Strict
    }
}

/// Parser configuration.
///
/// ```
/// use ntio_ntriples::{ErrorPolicy, EscapeMode, ParseOptions};
///
/// let options = ParseOptions {
///     policy: ErrorPolicy::Permissive,
///     ..ParseOptions::default()
/// };
/// assert_eq!(EscapeMode::Fast, options.escape_mode);
/// assert_eq!(2048, options.chunk_size);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct ParseOptions {
    /// How backslash escapes are decoded.
    pub escape_mode: EscapeMode,
    /// How offending lines are reported.
    pub policy: ErrorPolicy,
    /// Size in bytes of the chunks read from the input.
    pub chunk_size: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::default(),
            policy: ErrorPolicy::default(),
            chunk_size: 2048,
        }
    }
}

enum BlankNodeScope<'m> {
    Owned(BlankNodeMap),
    Borrowed(&'m mut BlankNodeMap),
}

impl BlankNodeScope<'_> {
    fn as_mut(&mut self) -> &mut BlankNodeMap {
        match self {
            BlankNodeScope::Owned(map) => map,
            BlankNodeScope::Borrowed(map) => map,
        }
    }
}

/// A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser.
///
/// It implements the [`TriplesParser`] trait.
///
/// Its memory consumption is linear in the size of the longest line of the
/// file. It does not do any allocation during parsing except buffer resizing
/// if a line significantly longer than the previous is encountered.
///
///
/// Count the number of people using the [`TriplesParser`] API:
/// ```
/// use ntio_api::model::NamedNode;
/// use ntio_api::parser::TriplesParser;
/// use ntio_ntriples::{NTriplesError, NTriplesParser};
///
/// let file = b"<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/foo> <http://schema.org/name> \"Foo\" .
/// <http://example.com/bar> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
///
/// let rdf_type = NamedNode { iri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" };
/// let schema_person = NamedNode { iri: "http://schema.org/Person" };
/// let mut count = 0;
/// NTriplesParser::new(file.as_ref()).parse_all(&mut |t| {
///     if t.predicate == rdf_type && t.object == schema_person.into() {
///         count += 1;
///     }
///     Ok(()) as Result<(), NTriplesError>
/// }).unwrap();
/// assert_eq!(2, count)
/// ```
pub struct NTriplesParser<'m, R: Read> {
    read: LineBuffer<R>,
    options: ParseOptions,
    bnodes: BlankNodeScope<'m>,
    line: String,
    line_number: u64,
    subject_buf: String,
    predicate_buf: String,
    object_buf: String,
    object_annotation_buf: String,
    end: bool,
}

impl<'m, R: Read> NTriplesParser<'m, R> {
    /// Builds a parser with the default [`ParseOptions`].
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self::build(reader, options, BlankNodeScope::Owned(BlankNodeMap::new()))
    }

    /// Builds a parser resolving blank node labels through a shared map.
    ///
    /// Parsers reading different documents allocate distinct blank nodes for
    /// equal labels unless they share a [`BlankNodeMap`]:
    /// ```
    /// use ntio_api::parser::TriplesParser;
    /// use ntio_ntriples::{BlankNodeMap, NTriplesError, NTriplesParser, ParseOptions};
    ///
    /// let mut bnodes = BlankNodeMap::new();
    /// let mut subjects = Vec::new();
    /// for file in &[
    ///     "_:a <http://example.com/p> \"1\" .",
    ///     "_:a <http://example.com/p> \"2\" .",
    /// ] {
    ///     NTriplesParser::with_bnode_map(file.as_bytes(), ParseOptions::default(), &mut bnodes)
    ///         .parse_all(&mut |t| {
    ///             subjects.push(t.subject.to_string());
    ///             Ok(()) as Result<(), NTriplesError>
    ///         })
    ///         .unwrap();
    /// }
    /// assert_eq!(subjects[0], subjects[1]);
    /// assert_eq!(1, bnodes.len());
    /// ```
    pub fn with_bnode_map(reader: R, options: ParseOptions, bnodes: &'m mut BlankNodeMap) -> Self {
        Self::build(reader, options, BlankNodeScope::Borrowed(bnodes))
    }

    fn build(reader: R, options: ParseOptions, bnodes: BlankNodeScope<'m>) -> Self {
        Self {
            read: LineBuffer::new(reader, options.chunk_size),
            options,
            bnodes,
            line: String::default(),
            line_number: 0,
            subject_buf: String::default(),
            predicate_buf: String::default(),
            object_buf: String::default(),
            object_annotation_buf: String::default(),
            end: false,
        }
    }
}

impl<'m, R: Read> TriplesParser for NTriplesParser<'m, R> {
    type Error = NTriplesError;

    fn parse_step<E: From<NTriplesError>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        //We clear the buffers
        self.subject_buf.clear();
        self.predicate_buf.clear();
        self.object_buf.clear();
        self.object_annotation_buf.clear();

        if !self.read.read_line(&mut self.line).map_err(E::from)? {
            self.end = true;
            return Ok(());
        }
        self.line_number += 1;

        match parse_triple_line(
            &self.line,
            self.line_number,
            self.options,
            self.bnodes.as_mut(),
            &mut self.subject_buf,
            &mut self.predicate_buf,
            &mut self.object_buf,
            &mut self.object_annotation_buf,
        ) {
            Ok(Some(triple)) => on_triple(triple),
            Ok(None) => Ok(()),
            Err(error) => match self.options.policy {
                ErrorPolicy::Strict => Err(E::from(error.with_line(self.line_number, &self.line))),
                ErrorPolicy::Permissive => {
                    warn!(
                        "{} on line {}: {}; line skipped",
                        error, self.line_number, self.line
                    );
                    Ok(())
                }
            },
        }
    }

    fn is_end(&self) -> bool {
        self.end
    }
}

fn parse_triple_line<'a>(
    line: &str,
    line_number: u64,
    options: ParseOptions,
    bnodes: &mut BlankNodeMap,
    subject_buf: &'a mut String,
    predicate_buf: &'a mut String,
    object_buf: &'a mut String,
    object_annotation_buf: &'a mut String,
) -> Result<Option<Triple<'a>>, NTriplesError> {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();

    match cursor.current() {
        None | Some(b'#') => return Ok(None),
        _ => (),
    }

    let subject: NamedOrBlankNode<'_> = if let Some(raw) = scan_uriref(&mut cursor)? {
        build_named_node(raw, options.escape_mode, subject_buf)?.into()
    } else if let Some(label) = scan_blank_node_label(&mut cursor)? {
        bnodes.resolve(label).into()
    } else {
        return Err(GrammarViolation::SubjectType.into());
    };
    cursor.expect_whitespace()?;

    let predicate = if let Some(raw) = scan_uriref(&mut cursor)? {
        build_named_node(raw, options.escape_mode, predicate_buf)?
    } else {
        return Err(GrammarViolation::PredicateType.into());
    };
    cursor.expect_whitespace()?;

    let object: Term<'_> = if let Some(raw) = scan_uriref(&mut cursor)? {
        build_named_node(raw, options.escape_mode, object_buf)?.into()
    } else if let Some(label) = scan_blank_node_label(&mut cursor)? {
        bnodes.resolve(label).into()
    } else if let Some(literal) = scan_literal(&mut cursor)? {
        build_literal(
            literal,
            options.escape_mode,
            object_buf,
            object_annotation_buf,
        )?
        .into()
    } else {
        return Err(GrammarViolation::ObjectType.into());
    };

    parse_tail(&mut cursor, line_number, line, options.policy)?;

    Ok(Some(Triple {
        subject,
        predicate,
        object,
    }))
}

/// Consumes the statement terminator and whatever may follow it.
fn parse_tail(
    cursor: &mut Cursor<'_>,
    line_number: u64,
    line: &str,
    policy: ErrorPolicy,
) -> Result<(), NTriplesError> {
    cursor.skip_whitespace();
    match cursor.current() {
        Some(b'.') => {
            cursor.advance(1);
            cursor.skip_whitespace();
            match cursor.current() {
                None | Some(b'#') => Ok(()),
                _ => Err(GrammarViolation::TrailingGarbage.into()),
            }
        }
        None => match policy {
            ErrorPolicy::Strict => Err(GrammarViolation::MissingFullStop.into()),
            ErrorPolicy::Permissive => {
                warn!("missing full stop on line {}: {}; corrected", line_number, line);
                Ok(())
            }
        },
        Some(b'#') => match policy {
            ErrorPolicy::Strict => Err(GrammarViolation::MissingFullStop.into()),
            ErrorPolicy::Permissive => {
                warn!(
                    "extra characters after the statement on line {}: {}; corrected",
                    line_number, line
                );
                Ok(())
            }
        },
        _ => Err(GrammarViolation::TrailingGarbage.into()),
    }
}
