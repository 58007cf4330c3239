#![no_main]

use libfuzzer_sys::fuzz_target;
use pqsign::armor::{self, ArmorKind};
use pqsign::DilithiumVariant;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for kind in [ArmorKind::PublicKey, ArmorKind::SecretKey, ArmorKind::Signature] {
        let variant = DilithiumVariant::Dilithium3;
        if let Ok(bytes) = armor::decode(variant, kind, text) {
            assert_eq!(bytes.len(), kind.expected_len(variant));
            let reencoded = armor::encode(variant, kind, &bytes);
            assert_eq!(*armor::decode(variant, kind, &reencoded).unwrap(), *bytes);
        }
    }
});
