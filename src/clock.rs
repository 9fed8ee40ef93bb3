//! Clock domains used by MPEG-2 Transport Streams.
//!
//! PTS and DTS values count a 90kHz clock, and PCR values a 27MHz clock.  Helpers here convert
//! those to and from nanoseconds, which is the unit used for timestamps elsewhere in this crate.

/// Frequency of the clock used for PTS and DTS values
pub const CLOCK_FREQ: u64 = 90_000;
/// Frequency of the program clock reference
pub const PCR_FREQ: u64 = 27_000_000;
/// Rate fields such as `maximum_bitrate` count units of this many bytes per second
pub const MPEG_MUX_RATE_MULT: u64 = 50;

/// Convert a 90kHz timestamp to nanoseconds
pub fn mpeg_time_to_ns(t: u64) -> u64 {
    t * 100_000 / 9
}

/// Convert a 27MHz clock reference to nanoseconds
pub fn pcr_time_to_ns(t: u64) -> u64 {
    t * 1000 / 27
}

/// Convert nanoseconds to a 90kHz timestamp, truncating
pub fn ns_to_mpeg_time(ns: u64) -> u64 {
    ns * 9 / 100_000
}

/// Convert a rate in units of `MPEG_MUX_RATE_MULT` bytes per second to bits per second
pub fn mux_rate_to_bits_per_second(rate: u32) -> u64 {
    u64::from(rate) * MPEG_MUX_RATE_MULT * 8
}
