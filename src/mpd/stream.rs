//! Active streams, and the segment arithmetic for the representation each one plays.

use super::attr::ByteRange;
use super::model::{
    AdaptationSet, Period, Representation, RepresentationBase, SegmentAddressing, SegmentInfo,
};
use super::template::build_url_from_template;
use super::timeline::Timeline;
use super::url::resolve;
use super::ClientError;
use std::time::Duration;

/// Broad classification of a stream by the major type of its MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    Video,
    Audio,
    Application,
    Unknown,
}
impl StreamType {
    pub fn from_mime_type(mime_type: &str) -> StreamType {
        let major = mime_type.split('/').next().unwrap_or("").trim();
        match major {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "application" => StreamType::Application,
            _ => StreamType::Unknown,
        }
    }
}

/// Cursor state for one adaptation set that is being streamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStream {
    /// classification of the adaptation set's MIME type
    pub stream_type: StreamType,
    /// index of the adaptation set within the current period
    pub adaptation_set: usize,
    /// index of the selected representation within the adaptation set
    pub representation: usize,
    /// index of the next segment to be fetched
    pub segment_index: usize,
    /// the resolved `BaseURL` chain for the selected representation
    pub base_url: String,
}

/// Position and timing of one segment of a representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSegment {
    /// position among the representation's segments, from zero
    pub index: usize,
    /// `startNumber` plus the index
    pub number: u32,
    /// index into the `SegmentURL` list, for list addressing
    pub url_index: Option<usize>,
    /// start in timescale units
    pub scale_start: u64,
    /// duration in timescale units
    pub scale_duration: u64,
    /// start relative to the beginning of the period
    pub start: Duration,
    /// `scale_duration` converted to time
    pub duration: Duration,
}

/// Everything needed to fetch one media segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFragment {
    /// absolute URL of the media segment
    pub uri: String,
    /// `None` means the whole resource
    pub range: Option<ByteRange>,
    /// URL of the segment's index, if one is declared
    pub index_uri: Option<String>,
    /// bytes of the index within `index_uri`
    pub index_range: Option<ByteRange>,
    /// how much presentation time the segment covers
    pub duration: Duration,
    /// presentation time of the start of the segment, including the period start
    pub timestamp: Duration,
}

/// Location of an initialization or index segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// URL to fetch
    pub uri: String,
    /// `None` means the whole resource
    pub range: Option<ByteRange>,
}

/// Outcome of moving a segment cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStep {
    Advanced,
    /// there is no segment in the requested direction; the cursor is unchanged
    EndOfStream,
}

/// Whether a live segment can be fetched at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePosition {
    Available,
    /// the segment will be published after the given delay
    NotYetAvailable(Duration),
    /// the segment left the time-shift buffer the given time ago
    Expired(Duration),
}

/// The representation with the lowest `bandwidth`; an undeclared bandwidth counts as zero and
/// ties go to the earliest representation
pub fn representation_with_min_bandwidth(representations: &[Representation]) -> Option<usize> {
    representations
        .iter()
        .enumerate()
        .min_by_key(|(_, r)| r.bandwidth.unwrap_or(0))
        .map(|(i, _)| i)
}

/// The representation with the highest `bandwidth` not exceeding `max_bandwidth`, or `None` if
/// every representation exceeds it.  A `max_bandwidth` of `0` selects the lowest.
pub fn representation_with_max_bandwidth(
    representations: &[Representation],
    max_bandwidth: u32,
) -> Option<usize> {
    if max_bandwidth == 0 {
        return representation_with_min_bandwidth(representations);
    }
    let mut best: Option<(usize, u32)> = None;
    for (i, rep) in representations.iter().enumerate() {
        let bandwidth = rep.bandwidth.unwrap_or(0);
        if bandwidth <= max_bandwidth && best.map_or(true, |(_, b)| bandwidth > b) {
            best = Some((i, bandwidth));
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn scaled_to_duration(value: u64, timescale: u32) -> Duration {
    let ns = u128::from(value) * 1_000_000_000 / u128::from(timescale.max(1));
    Duration::from_nanos(u64::try_from(ns).unwrap_or(u64::MAX))
}

pub(crate) fn duration_to_scaled(duration: Duration, timescale: u32) -> u64 {
    let value = duration.as_nanos() * u128::from(timescale.max(1)) / 1_000_000_000;
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// A representation together with the period timing and base URL it is played with
pub(crate) struct StreamContext<'a> {
    pub period: &'a Period,
    pub adaptation_set: &'a AdaptationSet,
    pub representation: &'a Representation,
    pub addressing: SegmentAddressing<'a>,
    pub base_url: &'a str,
    pub period_start: Duration,
    pub period_duration: Option<Duration>,
    timeline: Option<Timeline>,
}
impl<'a> StreamContext<'a> {
    pub fn new(
        period: &'a Period,
        adaptation_set: &'a AdaptationSet,
        representation: &'a Representation,
        base_url: &'a str,
        period_start: Duration,
        period_duration: Option<Duration>,
    ) -> StreamContext<'a> {
        let levels: [&'a dyn SegmentInfo; 3] = [representation, adaptation_set, period];
        let addressing = SegmentAddressing::resolve(&levels);
        let timescale = addressing.timescale();
        let timeline = addressing
            .multiple()
            .and_then(|m| m.segment_timeline.as_ref())
            .map(|t| {
                Timeline::new(
                    &t.segments,
                    period_duration.map(|d| duration_to_scaled(d, timescale)),
                )
            });
        StreamContext {
            period,
            adaptation_set,
            representation,
            addressing,
            base_url,
            period_start,
            period_duration,
            timeline,
        }
    }

    fn timescale(&self) -> u32 {
        self.addressing.timescale()
    }

    fn period_end_scaled(&self) -> Option<u64> {
        self.period_duration
            .map(|d| duration_to_scaled(d, self.timescale()))
    }

    /// The value from the representation, or failing that from its adaptation set
    pub fn representation_attr<T>(
        &self,
        attr: impl Fn(&'a RepresentationBase) -> Option<T>,
    ) -> Option<T> {
        attr(&self.representation.representation_base)
            .or_else(|| attr(&self.adaptation_set.representation_base))
    }

    /// Number of segments, or `None` when segments continue for as long as the period does and
    /// the period is open-ended
    pub fn segment_count(&self) -> Result<Option<usize>, ClientError> {
        match self.addressing {
            SegmentAddressing::Single(_) => Ok(Some(1)),
            SegmentAddressing::List(list) => {
                let urls = list.segment_urls.len();
                if let Some(ref timeline) = self.timeline {
                    // each S element, with its repeats, consumes one SegmentURL
                    return Ok(Some(timeline.entry_start(urls).unwrap_or(timeline.len())));
                }
                if urls > 1 && list.multiple.duration.filter(|&d| d > 0).is_none() {
                    return Err(ClientError::MissingSegmentDuration);
                }
                Ok(Some(urls))
            }
            SegmentAddressing::Template(template) => {
                if let Some(ref timeline) = self.timeline {
                    return Ok(Some(timeline.len()));
                }
                let duration = template
                    .multiple
                    .duration
                    .filter(|&d| d > 0)
                    .ok_or(ClientError::MissingSegmentDuration)?;
                Ok(self.period_end_scaled().map(|end| {
                    usize::try_from(end.div_ceil(u64::from(duration))).unwrap_or(usize::MAX)
                }))
            }
        }
    }

    pub fn segment(&self, index: usize) -> Option<MediaSegment> {
        let count = self.segment_count().ok()?;
        if count.map_or(false, |count| index >= count) {
            return None;
        }
        let (scale_start, scale_duration, url_index) = match self.addressing {
            SegmentAddressing::Single(_) => {
                let duration = self.period_duration.unwrap_or_default();
                return Some(MediaSegment {
                    index,
                    number: 1,
                    url_index: None,
                    scale_start: 0,
                    scale_duration: self.period_end_scaled().unwrap_or(0),
                    start: Duration::ZERO,
                    duration,
                });
            }
            SegmentAddressing::List(list) => match self.timeline {
                Some(ref timeline) => {
                    let item = timeline.get(index)?;
                    (item.start, item.duration, Some(item.entry))
                }
                None => match list.multiple.duration.filter(|&d| d > 0) {
                    Some(d) => {
                        let start = (index as u64).saturating_mul(u64::from(d));
                        // list segments never extend beyond the end of the period
                        let duration = match self.period_end_scaled() {
                            Some(end) => u64::from(d).min(end.saturating_sub(start)),
                            None => u64::from(d),
                        };
                        (start, duration, Some(index))
                    }
                    None => (0, self.period_end_scaled().unwrap_or(0), Some(index)),
                },
            },
            SegmentAddressing::Template(template) => match self.timeline {
                Some(ref timeline) => {
                    let item = timeline.get(index)?;
                    (item.start, item.duration, None)
                }
                None => {
                    let d = u64::from(template.multiple.duration?);
                    ((index as u64).saturating_mul(d), d, None)
                }
            },
        };
        let start_number = self.addressing.multiple().map_or(1, |m| m.start_number());
        let timescale = self.timescale();
        Some(MediaSegment {
            index,
            number: start_number.saturating_add(u32::try_from(index).unwrap_or(u32::MAX)),
            url_index,
            scale_start,
            scale_duration,
            start: scaled_to_duration(scale_start, timescale),
            duration: scaled_to_duration(scale_duration, timescale),
        })
    }

    fn substitute(&self, template: &str, number: u32, time: u64) -> Option<String> {
        build_url_from_template(
            template,
            self.representation.id.as_deref(),
            number,
            self.representation.bandwidth.unwrap_or(0),
            time,
        )
    }

    pub fn fragment(&self, index: usize) -> Option<MediaFragment> {
        let segment = self.segment(index)?;
        let base = self.base_url;
        let (uri, range, index_uri, index_range) = match self.addressing {
            SegmentAddressing::Single(_) => (base.to_string(), None, None, None),
            SegmentAddressing::List(list) => {
                let url = list.segment_urls.get(segment.url_index?)?;
                (
                    resolve(base, url.media.as_deref().unwrap_or("")),
                    url.media_range,
                    url.index.as_deref().map(|i| resolve(base, i)),
                    url.index_range,
                )
            }
            SegmentAddressing::Template(template) => {
                let media = match template.media {
                    Some(ref media) => {
                        self.substitute(media, segment.number, segment.scale_start)?
                    }
                    None => String::new(),
                };
                let index_uri = match template.index {
                    Some(ref index) => Some(resolve(
                        base,
                        &self.substitute(index, segment.number, segment.scale_start)?,
                    )),
                    None => None,
                };
                (resolve(base, &media), None, index_uri, None)
            }
        };
        Some(MediaFragment {
            uri,
            range,
            index_uri,
            index_range,
            duration: segment.duration,
            timestamp: self.period_start + segment.start,
        })
    }

    /// The initialization segment
    pub fn header(&self) -> Option<HeaderInfo> {
        if let SegmentAddressing::Template(template) = self.addressing {
            if let Some(ref initialization) = template.initialization {
                return Some(HeaderInfo {
                    uri: self.substitute(initialization, 0, 0)?,
                    range: None,
                });
            }
        }
        let initialization = self.addressing.segment_base()?.initialization.as_ref()?;
        Some(HeaderInfo {
            uri: self.source_url_or_base(initialization.source_url.as_deref()),
            range: initialization.range,
        })
    }

    /// The index segment, from `RepresentationIndex` or else from `indexRange` within the
    /// initialization resource
    pub fn header_index(&self) -> Option<HeaderInfo> {
        if let SegmentAddressing::Template(template) = self.addressing {
            if let Some(ref index) = template.index {
                return Some(HeaderInfo {
                    uri: self.substitute(index, 0, 0)?,
                    range: None,
                });
            }
        }
        let base = self.addressing.segment_base()?;
        if let Some(ref index) = base.representation_index {
            return Some(HeaderInfo {
                uri: self.source_url_or_base(index.source_url.as_deref()),
                range: index.range,
            });
        }
        let range = base.index_range?;
        let source_url = base
            .initialization
            .as_ref()
            .and_then(|i| i.source_url.as_deref());
        Some(HeaderInfo {
            uri: self.source_url_or_base(source_url),
            range: Some(range),
        })
    }

    fn source_url_or_base(&self, source_url: Option<&str>) -> String {
        source_url.unwrap_or(self.base_url).to_string()
    }

    /// Index of the segment covering `offset`, measured from the start of the period
    pub fn position_at(&self, offset: Duration) -> Option<usize> {
        if let Some(duration) = self.period_duration {
            if offset >= duration {
                return None;
            }
        }
        let time = duration_to_scaled(offset, self.timescale());
        let index = match self.timeline {
            Some(ref timeline) => timeline.position_at(time)?,
            None => {
                let duration = self.addressing.multiple().and_then(|m| m.duration);
                match duration.filter(|&d| d > 0) {
                    Some(d) => usize::try_from(time / u64::from(d)).ok()?,
                    None => 0,
                }
            }
        };
        match self.segment_count().ok()? {
            Some(count) if index >= count => None,
            _ => Some(index),
        }
    }

    /// `presentationTimeOffset` as a duration; only honoured for template addressing
    pub fn presentation_offset(&self) -> Duration {
        match self.addressing {
            SegmentAddressing::Template(template) => {
                let base = &template.multiple.segment_base;
                scaled_to_duration(
                    base.presentation_time_offset.unwrap_or(0),
                    base.timescale(),
                )
            }
            _ => Duration::ZERO,
        }
    }
}
