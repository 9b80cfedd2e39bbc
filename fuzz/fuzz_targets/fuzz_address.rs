#![no_main]

use floada_core::AddressCodec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let codec = AddressCodec::new();
    if let Ok(decoded) = codec.decode(data) {
        // Anything that decodes must re-encode to a decodable address with the same parts
        let encoded = codec
            .encode(&decoded.public_key_hash, decoded.network_tag)
            .expect("decoded tag has a format");
        let again = codec.decode(&encoded).expect("re-encoded address decodes");
        assert_eq!(again, decoded);
    }
});
