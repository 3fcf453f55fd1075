#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Panic-freedom fuzzing. Lossy conversion maximizes coverage of inputs
    // that are "almost" text.
    let s = String::from_utf8_lossy(data);
    if let Ok(root) = oxitex_syntax::latex::parse(&s) {
        assert_eq!(root.text(), s);
    }
});
