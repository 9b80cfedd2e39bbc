#![no_main]

use floada_hd_key::{DerivationConfig, KeyDerivationEngine, Secret};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Classification and derivation return errors, never panic
    let Ok(secret) = Secret::parse(data) else {
        return;
    };
    let _ = secret.fingerprint();

    if let Ok(engine) = KeyDerivationEngine::new(DerivationConfig::default()) {
        if let Ok(pair) = engine.derive(secret) {
            assert!(pair.verify_consistency());
        }
    }
});
