#![no_main]

use libfuzzer_sys::fuzz_target;
use mpegts_dash::mpd::MpdClient;

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    let mut client = MpdClient::new();
    if client.parse(xml).is_err() || client.setup_media_presentation().is_err() {
        return;
    }
    for set in 0..client.adaptation_set_count() {
        let Ok(stream) = client.setup_streaming(set) else {
            continue;
        };
        let _ = client.next_header(stream);
        let _ = client.next_header_index(stream);
        for _ in 0..16 {
            let _ = client.next_fragment(stream);
            if !client.has_next_segment(stream, true) {
                break;
            }
            let _ = client.advance_segment(stream, true);
        }
    }
});
