#![no_main]

use elgamal_bpsw::codec::{decode, encode, MIN_BIT_WIDTH};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&width, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let width = MIN_BIT_WIDTH + usize::from(width);
    let chunks = encode(text, width).unwrap();
    let decoded = decode(&chunks, width).unwrap();

    assert_eq!(decoded, text.trim_end_matches('\0'));
});
