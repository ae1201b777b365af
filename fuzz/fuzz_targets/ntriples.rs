#![no_main]
use libfuzzer_sys::fuzz_target;
use ntio_api::parser::TriplesParser;
use ntio_ntriples::{NTriplesError, NTriplesParser};

fuzz_target!(|data: &[u8]| {
    let mut parser = NTriplesParser::new(data);
    while !parser.is_end() {
        let _ = parser.parse_step(&mut |_| Ok(()) as Result<(), NTriplesError>);
    }
});
