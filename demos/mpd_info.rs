//! Summarise an MPEG-DASH manifest: its periods, its adaptation sets, and the first few segments
//! that a player would fetch from each.

use mpegts_dash::mpd::{MpdClient, SegmentStep};
use std::env;
use std::fs;
use std::process;

const SEGMENTS_SHOWN: usize = 3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(name) = env::args().nth(1) else {
        eprintln!("usage: mpd-info <manifest.mpd>");
        process::exit(2);
    };
    let xml = match fs::read_to_string(&name) {
        Ok(xml) => xml,
        Err(e) => {
            eprintln!("{}: {}", name, e);
            process::exit(1);
        }
    };
    let mut client = MpdClient::new();
    if let Err(e) = client.parse(&xml) {
        eprintln!("{}: {}", name, e);
        process::exit(1);
    }
    println!(
        "{} presentation, duration {:?}",
        if client.is_live() { "live" } else { "on-demand" },
        client.media_presentation_duration()
    );
    if let Err(e) = client.setup_media_presentation() {
        eprintln!("{}: {}", name, e);
        process::exit(1);
    }

    for period in 0..client.period_count() {
        if let Err(e) = client.set_period_index(period) {
            eprintln!("period {}: {}", period, e);
            continue;
        }
        println!(
            "period {} id={:?} start={:?} duration={:?}",
            period,
            client.period_id(),
            client.period_start(),
            client.period_duration()
        );
        for set in 0..client.adaptation_set_count() {
            let stream = match client.setup_streaming(set) {
                Ok(stream) => stream,
                Err(e) => {
                    println!("  adaptation set {}: {}", set, e);
                    continue;
                }
            };
            println!(
                "  adaptation set {} {:?} base={:?}",
                set,
                client.stream_mime_type(stream),
                client.base_url(stream)
            );
            if let (Some(w), Some(h)) = (client.stream_width(stream), client.stream_height(stream)) {
                println!("    {}x{} @ {:?}", w, h, client.stream_frame_rate(stream));
            }
            if let Some(rate) = client.stream_audio_sampling_rate(stream) {
                println!(
                    "    {}Hz, {:?} channels",
                    rate,
                    client.stream_audio_channels(stream)
                );
            }
            if let Some(header) = client.next_header(stream) {
                println!("    init {} {:?}", header.uri, header.range);
            }
            for _ in 0..SEGMENTS_SHOWN {
                if let Some(fragment) = client.next_fragment(stream) {
                    println!(
                        "    {:?} +{:?} {} {:?}",
                        fragment.timestamp, fragment.duration, fragment.uri, fragment.range
                    );
                }
                match client.advance_segment(stream, true) {
                    Ok(SegmentStep::Advanced) => (),
                    Ok(SegmentStep::EndOfStream) => break,
                    Err(e) => {
                        println!("    {}", e);
                        break;
                    }
                }
            }
            if let Some(end) = client.last_fragment_timestamp_end(stream) {
                println!("    last segment ends at {:?}", end);
            }
        }
        let languages = client.audio_languages();
        if !languages.is_empty() {
            println!("  audio languages: {}", languages.join(", "));
        }
    }
}
