//! MPEG-DASH Media Presentation Description (MPD) handling.
//!
//! The manifest is parsed into a plain tree of [`model`](model/index.html) types by
//! [`Mpd::parse()`](model/struct.Mpd.html#method.parse).  Nothing is resolved at parse time; the
//! tree holds exactly what the document declared, with `None` for anything absent.
//!
//! [`MpdClient`](struct.MpdClient.html) then walks the tree to answer the questions a streaming
//! engine asks during playback: which period is current, which segments exist, where to fetch
//! them from and what time range each one covers.
//!
//! ```
//! # use mpegts_dash::mpd::MpdClient;
//! let xml = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" mediaPresentationDuration="PT30S">
//!   <BaseURL>http://example.com/</BaseURL>
//!   <Period>
//!     <AdaptationSet mimeType="video/mp4">
//!       <Representation id="v0" bandwidth="250000">
//!         <SegmentTemplate media="$RepresentationID$/$Number$.m4s" duration="10"/>
//!       </Representation>
//!     </AdaptationSet>
//!   </Period>
//! </MPD>"#;
//! let mut client = MpdClient::new();
//! client.parse(xml).unwrap();
//! client.setup_media_presentation().unwrap();
//! let stream = client.setup_streaming(0).unwrap();
//! let fragment = client.next_fragment(stream).unwrap();
//! assert_eq!(fragment.uri, "http://example.com/v0/1.m4s");
//! ```

pub mod attr;
pub mod client;
pub mod model;
mod parser;
pub mod stream;
pub mod template;
pub mod timeline;
pub mod url;
mod xml;

pub use self::client::{add_time_difference, calculate_time_difference, MpdClient};
pub use self::model::Mpd;
pub use self::stream::{
    representation_with_max_bandwidth, representation_with_min_bandwidth, ActiveStream,
    HeaderInfo, MediaFragment, MediaSegment, SegmentStep, StreamType, TimePosition,
};
pub use self::template::build_url_from_template;

use std::fmt;
use std::time::Duration;

/// The document could not be read as an MPD at all
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MpdError {
    /// The input held no markup
    EmptyDocument,
    /// The XML itself is malformed
    Xml {
        /// byte offset at which the problem was detected
        position: u64,
        /// description from the XML tokeniser
        message: String,
    },
    /// The document had a prolog but no root element
    MissingRoot,
    /// The root element is not `MPD`
    UnexpectedRoot(String),
    /// The input ended inside the named element
    UnclosedElement(String),
}
impl fmt::Display for MpdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpdError::EmptyDocument => write!(f, "empty document"),
            MpdError::Xml { position, message } => {
                write!(f, "malformed XML at byte {}: {}", position, message)
            }
            MpdError::MissingRoot => write!(f, "document has no root element"),
            MpdError::UnexpectedRoot(name) => {
                write!(f, "root element is <{}>, expected <MPD>", name)
            }
            MpdError::UnclosedElement(name) => write!(f, "element <{}> is never closed", name),
        }
    }
}
impl std::error::Error for MpdError {}

/// The manifest parsed, but its period timing cannot be resolved into a usable presentation
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PresentationError {
    /// No manifest has been parsed yet
    NotParsed,
    /// A period begins after the period that follows it
    PeriodStartAfterNextPeriod {
        /// index of the offending period
        period: usize,
        /// its resolved start
        start: Duration,
        /// the start of the following period
        next_start: Duration,
    },
    /// A period begins at or after the end of the whole presentation
    PeriodStartBeyondPresentation {
        /// index of the offending period
        period: usize,
        /// its resolved start
        start: Duration,
        /// the `mediaPresentationDuration` of the manifest
        presentation_duration: Duration,
    },
    /// A period has no `start` and the previous period has no `duration` to derive it from
    PeriodStartUnknown {
        /// index of the offending period
        period: usize,
    },
    /// The last period of a static presentation has no duration, and neither does the
    /// presentation
    PeriodDurationUnknown {
        /// index of the offending period
        period: usize,
    },
}
impl fmt::Display for PresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationError::NotParsed => write!(f, "no manifest has been parsed"),
            PresentationError::PeriodStartAfterNextPeriod {
                period,
                start,
                next_start,
            } => write!(
                f,
                "period {} starts at {:?}, after the next period's start of {:?}",
                period, start, next_start
            ),
            PresentationError::PeriodStartBeyondPresentation {
                period,
                start,
                presentation_duration,
            } => write!(
                f,
                "period {} starts at {:?}, beyond the presentation duration of {:?}",
                period, start, presentation_duration
            ),
            PresentationError::PeriodStartUnknown { period } => {
                write!(f, "start of period {} cannot be determined", period)
            }
            PresentationError::PeriodDurationUnknown { period } => {
                write!(f, "duration of period {} cannot be determined", period)
            }
        }
    }
}
impl std::error::Error for PresentationError {}

/// A client operation was asked to act on something that does not exist or cannot be streamed
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ClientError {
    /// `setup_media_presentation()` has not succeeded yet
    NotReady,
    /// The current period index does not name a period
    UnknownPeriod,
    /// There is no adaptation set with the given index in the current period
    UnknownAdaptationSet(usize),
    /// There is no representation with the given index in the stream's adaptation set
    UnknownRepresentation(usize),
    /// There is no active stream with the given index
    UnknownStream(usize),
    /// The adaptation set has no representations
    NoRepresentation,
    /// Segments are addressed by number but no segment duration is declared
    MissingSegmentDuration,
}
impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotReady => write!(f, "media presentation has not been set up"),
            ClientError::UnknownPeriod => write!(f, "no current period"),
            ClientError::UnknownAdaptationSet(idx) => write!(f, "no adaptation set {}", idx),
            ClientError::UnknownRepresentation(idx) => write!(f, "no representation {}", idx),
            ClientError::UnknownStream(idx) => write!(f, "no active stream {}", idx),
            ClientError::NoRepresentation => write!(f, "adaptation set has no representations"),
            ClientError::MissingSegmentDuration => {
                write!(f, "segment duration is required but not declared")
            }
        }
    }
}
impl std::error::Error for ClientError {}
