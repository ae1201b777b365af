//! Implementation of an [N-Triples](https://www.w3.org/TR/n-triples/) parser.
//!
//! The parser works in streaming from a `Read` implementation and reports
//! offending lines either strictly or permissively, as configured by
//! [`ParseOptions`].

mod bnode;
mod error;
mod ntriples;
mod terms;
mod unescape;
mod utils;

pub use bnode::BlankNodeMap;
pub use error::EscapeViolation;
pub use error::GrammarViolation;
pub use error::NTriplesError;
pub use error::NTriplesErrorKind;
pub use ntriples::ErrorPolicy;
pub use ntriples::NTriplesParser;
pub use ntriples::ParseOptions;
pub use unescape::EscapeMode;
