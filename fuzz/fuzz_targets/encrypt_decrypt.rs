#![no_main]

use elgamal_bpsw::{Decrypt, Encrypt, KeyPair, KeyPairBuilder};
use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let key_pair = KEYPAIR.get_or_init(|| KeyPairBuilder::new().bit_length(128).build().unwrap());
    let pub_key = key_pair.public_key();
    let priv_key = key_pair.private_key();

    // Text round trip
    let text = String::from_utf8_lossy(data);
    let ciphertext = pub_key.encrypt(&text).unwrap();
    let decrypted = priv_key.decrypt_str(&ciphertext.to_string()).unwrap();
    assert_eq!(decrypted, text.trim_end_matches('\0'));

    // Block round trip for any element of the field
    let m = BigUint::from_bytes_be(data) % pub_key.p();
    let pair = pub_key.encrypt_block(&m, &mut OsRng).unwrap();
    assert_eq!(priv_key.decrypt_block(&pair).unwrap(), m);
});
