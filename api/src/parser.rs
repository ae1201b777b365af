//! Interfaces for RDF parsers.

use crate::model::Triple;
use std::error::Error;

/// A parser returning [`Triple`](super::model::Triple).
pub trait TriplesParser: Sized {
    type Error: Error;

    /// Parses the complete file and calls `on_triple` each time a new triple is read.
    ///
    /// May fail on errors caused by the parser itself or by the callback function `on_triple`.
    fn parse_all<E: From<Self::Error>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        while !self.is_end() {
            self.parse_step(on_triple)?;
        }
        Ok(())
    }

    /// Parses a small chunk of the file and calls `on_triple` each time a new triple is read.
    /// (A "small chunk" could be a line for an N-Triples parser.)
    ///
    /// This method should be called as long as [`is_end`](TriplesParser::is_end) returns false.
    ///
    /// May fail on errors caused by the parser itself or by the callback function `on_triple`.
    fn parse_step<E: From<Self::Error>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E>;

    /// Returns `true` if the file has been completely consumed by the parser.
    fn is_end(&self) -> bool;

    /// Converts the parser into a `Result<T, E>` iterator.
    ///
    /// `convert_triple` is a function converting [`Triple`](super::model::Triple) to `T`.
    fn into_iter<T, E, F>(self, convert_triple: F) -> TriplesParserIterator<T, E, F, Self>
    where
        E: From<Self::Error>,
        F: FnMut(Triple<'_>) -> Result<T, E>,
    {
        TriplesParserIterator {
            parser: self,
            buffer: Vec::default(),
            convert_triple,
        }
    }
}

/// Created with the method [`into_iter`](TriplesParser::into_iter).
pub struct TriplesParserIterator<
    T,
    E: From<P::Error>,
    F: FnMut(Triple<'_>) -> Result<T, E>,
    P: TriplesParser,
> {
    parser: P,
    buffer: Vec<Result<T, E>>,
    convert_triple: F,
}

impl<T, E: From<P::Error>, F: FnMut(Triple<'_>) -> Result<T, E>, P: TriplesParser> Iterator
    for TriplesParserIterator<T, E, F, P>
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Result<T, E>> {
        loop {
            if let Some(r) = self.buffer.pop() {
                return Some(r);
            }
            if self.parser.is_end() {
                return None;
            }

            let buffer = &mut self.buffer;
            let convert_triple = &mut self.convert_triple;
            if let Err(e) = self.parser.parse_step(&mut |t| {
                buffer.push(convert_triple(t));
                Ok(())
            }) {
                return Some(Err(e));
            }
        }
    }
}

/// Error trait that allows to get the line where the error occurred.
pub trait ParseError: Error {
    /// Returns the line where the error occurred, if the error is tied to a specific line.
    fn offending_line(&self) -> Option<&OffendingLine>;
}

/// The location of a parse error: a 1-based line number and the verbatim text of that line.
///
/// ```
/// use ntio_api::parser::OffendingLine;
///
/// let line = OffendingLine::new(7, "<s> <p>".to_owned());
/// assert_eq!(7, line.line_number());
/// assert_eq!("<s> <p>", line.text());
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct OffendingLine {
    line_number: u64,
    text: String,
}

impl OffendingLine {
    pub fn new(line_number: u64, text: String) -> Self {
        Self { line_number, text }
    }

    /// Line number, starting at 1.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// The line content, without its terminator.
    pub fn text(&self) -> &str {
        &self.text
    }
}
