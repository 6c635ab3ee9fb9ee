#![no_main]

use elgamal_bpsw::{Ciphertext, Decrypt, KeyPair, KeyPairBuilder};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(wire) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(ciphertext) = wire.parse::<Ciphertext>() else {
        return;
    };

    // Display must re-parse to the same pairs.
    let reparsed: Ciphertext = ciphertext.to_string().parse().unwrap();
    assert_eq!(reparsed, ciphertext);

    // Arbitrary pairs may fail to decrypt, but never panic.
    let keypair = KEYPAIR.get_or_init(|| KeyPairBuilder::new().bit_length(64).build().unwrap());
    let _ = keypair.decrypt(&ciphertext);
});
