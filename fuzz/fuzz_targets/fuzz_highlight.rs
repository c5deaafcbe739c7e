#![no_main]

use libfuzzer_sys::fuzz_target;
use sol::context::{highlight_segments, truncate_line};

fuzz_target!(|input: (&str, &str, u8)| {
    let (line, term, limit) = input;
    let term = term.to_lowercase();
    let (capped, _) = truncate_line(line, limit as usize);

    // Segments always concatenate back to the line
    let joined: String = highlight_segments(capped, &term)
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(joined, capped);
});
