#![no_main]

use libfuzzer_sys::fuzz_target;
use sol::query::{Command, parse_command};

fuzz_target!(|data: &str| {
    // Any accepted search carries a non-empty, lower-cased term
    if let Ok(Command::Search(request)) = parse_command(data) {
        assert!(!request.term.is_empty());
        assert_eq!(request.term, request.term.to_lowercase());
    }
});
