#![no_main]

use libfuzzer_sys::fuzz_target;
use mpegts_dash::descriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(descriptors) = descriptor::parse_descriptors(data) {
        for desc in &descriptors {
            let _ = desc.parse_core();
        }
        // a successful parse must reproduce its input exactly
        assert_eq!(descriptor::serialize_descriptors(&descriptors), data);
    }
});
