//! This crate provides basic interfaces and data structures for building streaming RDF parsers.
//!
//! It is currently used by the [`ntio_ntriples`](https://docs.rs/ntio_ntriples/) crate.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

pub mod model;
pub mod parser;
