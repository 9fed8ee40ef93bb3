//! Decoders for the metadata around MPEG Transport Stream and MPEG-DASH playback.
//!
//!  - [`descriptor`](descriptor/index.html): _tag-length-value_ descriptors from ISO/IEC 13818-1,
//!    with typed views of the fields of each standard descriptor kind
//!  - [`text`](text/index.html): DVB text fields, converted between their on-air character sets
//!    and Rust strings
//!  - [`mpd`](mpd/index.html): the MPEG-DASH _Media Presentation Description_, and a client that
//!    tracks periods, streams and segments during playback
//!  - [`clock`](clock/index.html): conversions for the 90kHz and 27MHz clocks
//!
//! # Design principals
//!
//!  * *Transport Neutral*.  Nothing here performs I/O.  The APIs accept `&[u8]` or `&str`, and the
//!    caller handles providing the data from wherever.
//!  * *Values, not panics*.  Malformed input produces an error or `None`.  Recoverable oddities
//!    are reported through the [`log`](https://docs.rs/log) facade, and no logger is installed by
//!    this crate.
//!  * *Extensible*.  Descriptors are a point of extension, and calling code can define views of
//!    descriptor kinds that this crate does not know about.

#![forbid(unsafe_code)]
#![deny(future_incompatible)]

pub mod clock;
pub mod descriptor;
pub mod mpd;
pub mod text;
