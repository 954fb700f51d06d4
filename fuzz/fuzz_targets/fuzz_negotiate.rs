#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_negotiate::negotiate::{self, MatchOptions, NegotiateError};

#[derive(Debug, Arbitrary)]
struct Input {
    accepted: String,
    supported: Vec<String>,
    enforce_types: bool,
    strict: bool,
    match_locales: bool,
}

fuzz_target!(|input: Input| {
    let options = MatchOptions {
        enforce_types: input.enforce_types,
        strict: input.strict,
        match_locales: input.match_locales,
    };

    match negotiate::best_match(&input.accepted, &input.supported, options) {
        Ok(Some(_)) => assert!(!input.supported.is_empty()),
        Ok(None) => assert!(input.strict),
        Err(NegotiateError::NoSupportedValues) => assert!(input.supported.is_empty()),
        Err(e) => panic!("unexpected error: {}", e),
    }

    let _ = negotiate::content(&input.accepted, &input.supported);
    let _ = negotiate::content_strict(&input.accepted, &input.supported);
    let _ = negotiate::language(&input.accepted, &input.supported);
    assert!(negotiate::encoding(&input.accepted, &input.supported).is_ok());
});
