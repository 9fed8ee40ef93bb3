#![no_main]

use libfuzzer_sys::fuzz_target;
use mpegts_dash::text::{detect_charset, TextConverter};
use std::sync::OnceLock;

static CONVERTER: OnceLock<TextConverter> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let conv = CONVERTER.get_or_init(TextConverter::new);
    let _ = detect_charset(data);
    if let Some(text) = conv.decode(data) {
        let _ = conv.encode(&text);
    }
});
