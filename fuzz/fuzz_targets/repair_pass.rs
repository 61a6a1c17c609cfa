#![no_main]

use formtext::guid::repair_identifiers;
use formtext::{repair, FormError, SequentialIds};
use formtext_syntax::lines::name_lines;
use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped);

    let mut ids = SequentialIds::starting_at(1);
    let (once, _) = repair_identifiers(&source, &mut ids);
    let (twice, again) = repair_identifiers(&once, &mut ids);
    assert_eq!(again, 0);
    assert_eq!(once, twice);

    match repair(&source, "Fuzzed", &mut ids) {
        Ok(first) => {
            let second = repair(&first.text, "Fuzzed", &mut ids).expect("repaired text repairs");
            assert_eq!(first.report.control_names, second.report.control_names);
            assert_eq!(second.report.identifiers_replaced, 0);
        }
        Err(FormError::EmptyControlSet) => assert!(name_lines(&source).is_empty()),
        Err(FormError::InvalidControlName { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
});
