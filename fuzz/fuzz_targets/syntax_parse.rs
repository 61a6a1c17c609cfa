#![no_main]

use formtext_syntax::lines::name_lines;
use formtext_syntax::parser::parse;
use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped);

    let parsed = parse(&source);
    assert_eq!(parsed.syntax().to_string(), source);
    for error in parsed.errors() {
        assert!(usize::from(error.range.end()) <= source.len());
    }

    for line in name_lines(&source) {
        assert!(!line.value.is_empty());
        assert!(usize::from(line.range.end()) <= source.len());
    }
});
