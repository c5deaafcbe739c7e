#![no_main]

use libfuzzer_sys::fuzz_target;
use sol::index::TrieBuilder;
use sol::utils::tokenize;

fuzz_target!(|data: &[u8]| {
    // Tokens are non-empty, in order and inside the line
    let mut last_end = 0;
    for token in tokenize(data) {
        assert!(!token.is_empty());
        assert!(token.span.start >= last_end);
        assert!(token.span.end <= data.len());
        last_end = token.span.end;
    }

    let mut builder = TrieBuilder::new(1);
    let file = builder.add_file("/fuzz");
    builder.add_line(data, file, 1);
    let _ = builder.finish();
});
