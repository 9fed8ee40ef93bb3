//! The playback-side view of a manifest.
//!
//! [`MpdClient`](struct.MpdClient.html) moves through three states.  After `parse()` it holds a
//! manifest tree.  `setup_media_presentation()` then derives the start and duration of every
//! period, rejecting the manifest if they are inconsistent.  Finally `setup_streaming()` creates
//! an [`ActiveStream`](../stream/struct.ActiveStream.html) for each adaptation set to be played.
//! Selecting another period discards the active streams.

use super::attr::Ratio;
use super::model::{AdaptationSet, Mpd, Period};
use super::stream::{
    representation_with_min_bandwidth, ActiveStream, HeaderInfo, MediaFragment, MediaSegment,
    SegmentStep, StreamContext, StreamType, TimePosition,
};
use super::url::base_url_chain;
use super::{ClientError, MpdError, PresentationError};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};
use std::time::Duration;

const ISOFF_ON_DEMAND_PROFILE: &str = "urn:mpeg:dash:profile:isoff-on-demand:2011";

/// Nanoseconds from `a` to `b`; negative when `b` is earlier.  Saturates rather than overflowing.
pub fn calculate_time_difference(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let delta = b.signed_duration_since(a);
    delta
        .num_nanoseconds()
        .unwrap_or(if delta > TimeDelta::zero() {
            i64::MAX
        } else {
            i64::MIN
        })
}

/// `t` moved by the given number of microseconds, or `None` if that leaves the representable
/// range
pub fn add_time_difference(t: DateTime<Utc>, microseconds: i64) -> Option<DateTime<Utc>> {
    t.checked_add_signed(TimeDelta::microseconds(microseconds))
}

/// Time elapsed from `start` to `time`, or zero if `time` is earlier
fn elapsed_since(start: DateTime<Utc>, time: DateTime<Utc>) -> Duration {
    Duration::from_nanos(u64::try_from(calculate_time_difference(start, time)).unwrap_or(0))
}

/// Resolved timing of one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPeriod {
    /// index into the manifest's period list
    pub index: usize,
    /// start relative to the start of the presentation
    pub start: Duration,
    /// `None` only for the last period of a live presentation without a known end
    pub duration: Option<Duration>,
}

fn resolve_periods(mpd: &Mpd) -> Result<Vec<StreamPeriod>, PresentationError> {
    let presentation_duration = mpd.media_presentation_duration;
    let mut starts: Vec<Duration> = Vec::with_capacity(mpd.periods.len());
    let mut previous: Option<&Period> = None;
    for (i, period) in mpd.periods.iter().enumerate() {
        let start = match (period.start, previous) {
            (Some(start), _) => start,
            (None, None) => Duration::ZERO,
            (None, Some(prev)) => match (starts.last(), prev.duration) {
                (Some(&prev_start), Some(prev_duration)) => prev_start + prev_duration,
                _ => return Err(PresentationError::PeriodStartUnknown { period: i }),
            },
        };
        if let Some(presentation_duration) = presentation_duration {
            if start >= presentation_duration {
                return Err(PresentationError::PeriodStartBeyondPresentation {
                    period: i,
                    start,
                    presentation_duration,
                });
            }
        }
        starts.push(start);
        previous = Some(period);
    }

    let mut periods = Vec::with_capacity(starts.len());
    for (i, (period, &start)) in mpd.periods.iter().zip(&starts).enumerate() {
        let next_start = starts.get(i + 1).copied();
        if let Some(next_start) = next_start {
            if next_start < start {
                return Err(PresentationError::PeriodStartAfterNextPeriod {
                    period: i,
                    start,
                    next_start,
                });
            }
        }
        let duration = match (period.duration, next_start, presentation_duration) {
            (Some(duration), _, _) => Some(duration),
            (None, Some(next_start), _) => Some(next_start - start),
            (None, None, Some(presentation_duration)) => Some(presentation_duration - start),
            (None, None, None) if mpd.is_live() => None,
            (None, None, None) => return Err(PresentationError::PeriodDurationUnknown { period: i }),
        };
        periods.push(StreamPeriod {
            index: i,
            start,
            duration,
        });
    }
    Ok(periods)
}

/// Tracks the current period and the active streams of a presentation
#[derive(Debug, Default)]
pub struct MpdClient {
    mpd: Option<Mpd>,
    /// `None` until the presentation has been set up
    periods: Option<Vec<StreamPeriod>>,
    period_idx: usize,
    streams: Vec<ActiveStream>,
}

impl MpdClient {
    pub fn new() -> MpdClient {
        MpdClient::default()
    }

    /// A client for an already parsed manifest
    pub fn from_mpd(mpd: Mpd) -> MpdClient {
        MpdClient {
            mpd: Some(mpd),
            ..MpdClient::default()
        }
    }

    /// Parse a manifest, replacing any previous one.  On failure the client is left unchanged.
    pub fn parse(&mut self, xml: &str) -> Result<(), MpdError> {
        let mpd = Mpd::parse(xml)?;
        *self = MpdClient::from_mpd(mpd);
        Ok(())
    }

    pub fn mpd(&self) -> Option<&Mpd> {
        self.mpd.as_ref()
    }

    /// Derive the timing of every period.  The whole manifest is rejected if any period's
    /// bounds cannot be resolved consistently.
    pub fn setup_media_presentation(&mut self) -> Result<(), PresentationError> {
        let mpd = self.mpd.as_ref().ok_or(PresentationError::NotParsed)?;
        let periods = resolve_periods(mpd).map_err(|e| {
            warn!("unusable manifest: {}", e);
            e
        })?;
        debug!("presentation has {} periods", periods.len());
        self.periods = Some(periods);
        self.period_idx = 0;
        self.streams.clear();
        Ok(())
    }

    fn stream_periods(&self) -> &[StreamPeriod] {
        self.periods.as_deref().unwrap_or(&[])
    }

    fn current_period(&self) -> Result<(&Period, StreamPeriod), ClientError> {
        let mpd = self.mpd.as_ref().ok_or(ClientError::NotReady)?;
        let periods = self.periods.as_ref().ok_or(ClientError::NotReady)?;
        let stream_period = *periods
            .get(self.period_idx)
            .ok_or(ClientError::UnknownPeriod)?;
        let period = mpd
            .periods
            .get(stream_period.index)
            .ok_or(ClientError::UnknownPeriod)?;
        Ok((period, stream_period))
    }

    pub fn period_count(&self) -> usize {
        self.stream_periods().len()
    }

    /// Make the given period current.  Active streams are discarded if the period changes.
    pub fn set_period_index(&mut self, index: usize) -> Result<(), ClientError> {
        if self.periods.is_none() {
            return Err(ClientError::NotReady);
        }
        if index >= self.period_count() {
            return Err(ClientError::UnknownPeriod);
        }
        if index != self.period_idx {
            self.streams.clear();
            self.period_idx = index;
        }
        Ok(())
    }

    /// Make the period with the given `id` current
    pub fn set_period_id(&mut self, id: &str) -> Result<(), ClientError> {
        let index = {
            let mpd = self.mpd.as_ref().ok_or(ClientError::NotReady)?;
            self.stream_periods()
                .iter()
                .position(|p| {
                    mpd.periods
                        .get(p.index)
                        .and_then(|period| period.id.as_deref())
                        == Some(id)
                })
                .ok_or(ClientError::UnknownPeriod)?
        };
        self.set_period_index(index)
    }

    pub fn period_index(&self) -> usize {
        self.period_idx
    }

    pub fn period_id(&self) -> Option<&str> {
        self.current_period().ok()?.0.id.as_deref()
    }

    pub fn period_start(&self) -> Option<Duration> {
        Some(self.current_period().ok()?.1.start)
    }

    pub fn period_duration(&self) -> Option<Duration> {
        self.current_period().ok()?.1.duration
    }

    pub fn has_next_period(&self) -> bool {
        self.period_idx + 1 < self.period_count()
    }

    pub fn has_previous_period(&self) -> bool {
        self.period_idx > 0 && self.period_count() > 0
    }

    /// The period playing at the given wall-clock time, measured from `availabilityStartTime`.
    /// Times before the availability start map to the first period; `None` past the end of the
    /// presentation or when the manifest has no availability start.
    pub fn period_index_at_time(&self, time: DateTime<Utc>) -> Option<usize> {
        let start = self.mpd.as_ref()?.availability_start_time?;
        let offset = elapsed_since(start, time);
        self.stream_periods().iter().position(|p| {
            offset >= p.start && p.duration.map_or(true, |d| offset < p.start + d)
        })
    }

    /// Adaptation sets of the current period
    pub fn adaptation_sets(&self) -> &[AdaptationSet] {
        match self.current_period() {
            Ok((period, _)) => &period.adaptation_sets,
            Err(_) => &[],
        }
    }

    pub fn adaptation_set_count(&self) -> usize {
        self.adaptation_sets().len()
    }

    fn representation_base_url(
        &self,
        adaptation_set: usize,
        representation: usize,
    ) -> Result<String, ClientError> {
        let mpd = self.mpd.as_ref().ok_or(ClientError::NotReady)?;
        let (period, _) = self.current_period()?;
        let set = period
            .adaptation_sets
            .get(adaptation_set)
            .ok_or(ClientError::UnknownAdaptationSet(adaptation_set))?;
        let rep = set
            .representations
            .get(representation)
            .ok_or(ClientError::UnknownRepresentation(representation))?;
        Ok(base_url_chain([
            &mpd.base_urls[..],
            &period.base_urls[..],
            &set.base_urls[..],
            &rep.base_urls[..],
        ]))
    }

    fn context_for<'a>(
        &'a self,
        adaptation_set: usize,
        representation: usize,
        base_url: &'a str,
    ) -> Result<StreamContext<'a>, ClientError> {
        let (period, stream_period) = self.current_period()?;
        let set = period
            .adaptation_sets
            .get(adaptation_set)
            .ok_or(ClientError::UnknownAdaptationSet(adaptation_set))?;
        let rep = set
            .representations
            .get(representation)
            .ok_or(ClientError::UnknownRepresentation(representation))?;
        Ok(StreamContext::new(
            period,
            set,
            rep,
            base_url,
            stream_period.start,
            stream_period.duration,
        ))
    }

    fn stream_context(&self, stream: usize) -> Result<(StreamContext<'_>, &ActiveStream), ClientError> {
        let active = self
            .streams
            .get(stream)
            .ok_or(ClientError::UnknownStream(stream))?;
        let ctx = self.context_for(
            active.adaptation_set,
            active.representation,
            &active.base_url,
        )?;
        Ok((ctx, active))
    }

    /// Start streaming the given adaptation set of the current period, using its lowest
    /// bandwidth representation.  Returns the index of the new active stream.
    pub fn setup_streaming(&mut self, adaptation_set: usize) -> Result<usize, ClientError> {
        let (period, _) = self.current_period()?;
        let set = period
            .adaptation_sets
            .get(adaptation_set)
            .ok_or(ClientError::UnknownAdaptationSet(adaptation_set))?;
        let representation = representation_with_min_bandwidth(&set.representations)
            .ok_or(ClientError::NoRepresentation)?;
        let base_url = self.representation_base_url(adaptation_set, representation)?;
        let stream_type = {
            let ctx = self.context_for(adaptation_set, representation, &base_url)?;
            ctx.segment_count()?;
            ctx.representation_attr(|b| b.mime_type.as_deref())
                .map_or(StreamType::Unknown, StreamType::from_mime_type)
        };
        debug!(
            "streaming adaptation set {} with representation {} as {:?}",
            adaptation_set, representation, stream_type
        );
        self.streams.push(ActiveStream {
            stream_type,
            adaptation_set,
            representation,
            segment_index: 0,
            base_url,
        });
        Ok(self.streams.len() - 1)
    }

    /// Switch an active stream to another representation of its adaptation set.  The segment
    /// cursor is kept.
    pub fn select_representation(
        &mut self,
        stream: usize,
        representation: usize,
    ) -> Result<(), ClientError> {
        let adaptation_set = self
            .streams
            .get(stream)
            .ok_or(ClientError::UnknownStream(stream))?
            .adaptation_set;
        let base_url = self.representation_base_url(adaptation_set, representation)?;
        self.context_for(adaptation_set, representation, &base_url)?
            .segment_count()?;
        if let Some(active) = self.streams.get_mut(stream) {
            active.representation = representation;
            active.base_url = base_url;
        }
        Ok(())
    }

    pub fn active_stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn active_stream(&self, stream: usize) -> Option<&ActiveStream> {
        self.streams.get(stream)
    }

    pub fn stream_width(&self, stream: usize) -> Option<u32> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        ctx.representation_attr(|b| b.width)
    }

    pub fn stream_height(&self, stream: usize) -> Option<u32> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        ctx.representation_attr(|b| b.height)
    }

    pub fn stream_frame_rate(&self, stream: usize) -> Option<Ratio> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        ctx.representation_attr(|b| b.frame_rate)
    }

    /// The stream's MIME type, with ISO BMFF and transport stream types mapped to the caps names
    /// demuxers expect
    pub fn stream_mime_type(&self, stream: usize) -> Option<&str> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        let mime_type = ctx.representation_attr(|b| b.mime_type.as_deref())?;
        Some(match mime_type {
            "video/mp4" => "video/quicktime",
            "audio/mp4" => "audio/x-m4a",
            "video/mp2t" => "video/mpegts",
            other => other,
        })
    }

    /// `bitstreamSwitching` from the adaptation set, else from the period
    pub fn stream_bitstream_switching(&self, stream: usize) -> bool {
        self.stream_context(stream)
            .ok()
            .and_then(|(ctx, _)| {
                ctx.adaptation_set
                    .bitstream_switching
                    .or(ctx.period.bitstream_switching)
            })
            .unwrap_or(false)
    }

    pub fn stream_audio_sampling_rate(&self, stream: usize) -> Option<u32> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        let rate = ctx.representation_attr(|b| b.audio_sampling_rate.as_deref())?;
        // a range is given as "min max"
        rate.split_whitespace().next()?.parse().ok()
    }

    /// Channel count from the first `AudioChannelConfiguration`
    pub fn stream_audio_channels(&self, stream: usize) -> Option<u32> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        let config = ctx.representation_attr(|b| b.audio_channel_configuration.first())?;
        config.value.as_deref()?.trim().parse().ok()
    }

    /// `lang` of each active audio stream, in stream order
    pub fn audio_languages(&self) -> Vec<&str> {
        let sets = self.adaptation_sets();
        self.streams
            .iter()
            .filter(|s| s.stream_type == StreamType::Audio)
            .filter_map(|s| sets.get(s.adaptation_set)?.lang.as_deref())
            .collect()
    }

    pub fn base_url(&self, stream: usize) -> Option<&str> {
        self.streams.get(stream).map(|s| s.base_url.as_str())
    }

    pub fn media_presentation_duration(&self) -> Option<Duration> {
        self.mpd.as_ref()?.media_presentation_duration
    }

    /// Offset to subtract from segment timestamps to get presentation times
    pub fn stream_presentation_offset(&self, stream: usize) -> Option<Duration> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        Some(ctx.presentation_offset())
    }

    pub fn is_live(&self) -> bool {
        self.mpd.as_ref().map_or(false, Mpd::is_live)
    }

    pub fn has_isoff_ondemand_profile(&self) -> bool {
        self.mpd
            .as_ref()
            .map_or(false, |mpd| mpd.has_profile(ISOFF_ON_DEMAND_PROFILE))
    }

    /// Whether a segment exists beyond the cursor in the given direction
    pub fn has_next_segment(&self, stream: usize, forward: bool) -> bool {
        let Ok((ctx, active)) = self.stream_context(stream) else {
            return false;
        };
        if forward {
            match ctx.segment_count() {
                Ok(Some(count)) => active.segment_index + 1 < count,
                Ok(None) => true,
                Err(_) => false,
            }
        } else {
            active.segment_index > 0
        }
    }

    pub fn advance_segment(
        &mut self,
        stream: usize,
        forward: bool,
    ) -> Result<SegmentStep, ClientError> {
        let next = {
            let (ctx, active) = self.stream_context(stream)?;
            if forward {
                let count = ctx.segment_count()?;
                let next = active.segment_index.saturating_add(1);
                if count.map_or(true, |count| next < count) {
                    Some(next)
                } else {
                    None
                }
            } else {
                active.segment_index.checked_sub(1)
            }
        };
        match (next, self.streams.get_mut(stream)) {
            (Some(next), Some(active)) => {
                active.segment_index = next;
                Ok(SegmentStep::Advanced)
            }
            _ => Ok(SegmentStep::EndOfStream),
        }
    }

    /// Rewind every active stream to its first segment
    pub fn seek_to_first_segment(&mut self) {
        for stream in &mut self.streams {
            stream.segment_index = 0;
        }
    }

    /// Segment of the stream covering a presentation timestamp
    fn segment_position_at(&self, stream: usize, timestamp: Duration) -> Option<usize> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        let offset = timestamp.checked_sub(ctx.period_start)?;
        ctx.position_at(offset)
    }

    /// Move every active stream to the segment covering the given wall-clock time.  Nothing moves
    /// unless every stream has such a segment.
    pub fn seek_to_time(&mut self, time: DateTime<Utc>) -> bool {
        let Some(start) = self.mpd.as_ref().and_then(|m| m.availability_start_time) else {
            return false;
        };
        let timestamp = elapsed_since(start, time);
        let mut positions = Vec::with_capacity(self.streams.len());
        for stream in 0..self.streams.len() {
            match self.segment_position_at(stream, timestamp) {
                Some(position) => positions.push(position),
                None => return false,
            }
        }
        for (stream, position) in self.streams.iter_mut().zip(positions) {
            stream.segment_index = position;
        }
        true
    }

    /// Move one stream to the segment covering a presentation timestamp
    pub fn stream_seek(&mut self, stream: usize, timestamp: Duration) -> bool {
        match (
            self.segment_position_at(stream, timestamp),
            self.streams.get_mut(stream),
        ) {
            (Some(position), Some(active)) => {
                active.segment_index = position;
                true
            }
            _ => false,
        }
    }

    /// The segment at an arbitrary index; the stream's cursor is not moved
    pub fn chunk_by_index(&self, stream: usize, index: usize) -> Option<MediaSegment> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        ctx.segment(index)
    }

    /// Wall-clock time at which the segment under the cursor is fully available
    pub fn next_segment_availability_end_time(&self, stream: usize) -> Option<DateTime<Utc>> {
        let start = self.mpd.as_ref()?.availability_start_time?;
        let (ctx, active) = self.stream_context(stream).ok()?;
        let segment = ctx.segment(active.segment_index)?;
        let end = ctx.period_start + segment.start + segment.duration;
        start.checked_add_signed(TimeDelta::from_std(end).ok()?)
    }

    /// Whether the segment at presentation timestamp `timestamp` can be fetched at `now`.
    /// Static presentations are always available.
    pub fn check_time_position_at(
        &self,
        stream: usize,
        timestamp: Duration,
        now: DateTime<Utc>,
    ) -> Result<TimePosition, ClientError> {
        self.stream_context(stream)?;
        let mpd = self.mpd.as_ref().ok_or(ClientError::NotReady)?;
        let start = match mpd.availability_start_time {
            Some(start) if mpd.is_live() => start,
            _ => return Ok(TimePosition::Available),
        };
        let stream_now = calculate_time_difference(start, now);
        let ts = i64::try_from(timestamp.as_nanos()).unwrap_or(i64::MAX);
        if ts > stream_now {
            return Ok(TimePosition::NotYetAvailable(Duration::from_nanos(
                ts.saturating_sub(stream_now).unsigned_abs(),
            )));
        }
        if let Some(depth) = mpd.time_shift_buffer_depth {
            let depth = i64::try_from(depth.as_nanos()).unwrap_or(i64::MAX);
            let oldest = stream_now.saturating_sub(depth);
            if ts < oldest {
                return Ok(TimePosition::Expired(Duration::from_nanos(
                    oldest.saturating_sub(ts).unsigned_abs(),
                )));
            }
        }
        Ok(TimePosition::Available)
    }

    /// `check_time_position_at()` against the system clock
    pub fn check_time_position(
        &self,
        stream: usize,
        timestamp: Duration,
    ) -> Result<TimePosition, ClientError> {
        self.check_time_position_at(stream, timestamp, Utc::now())
    }

    /// The initialization segment of the stream's representation
    pub fn next_header(&self, stream: usize) -> Option<HeaderInfo> {
        self.stream_context(stream).ok()?.0.header()
    }

    /// The index segment of the stream's representation
    pub fn next_header_index(&self, stream: usize) -> Option<HeaderInfo> {
        self.stream_context(stream).ok()?.0.header_index()
    }

    /// The segment under the cursor
    pub fn next_fragment(&self, stream: usize) -> Option<MediaFragment> {
        let (ctx, active) = self.stream_context(stream).ok()?;
        ctx.fragment(active.segment_index)
    }

    pub fn next_fragment_duration(&self, stream: usize) -> Option<Duration> {
        let (ctx, active) = self.stream_context(stream).ok()?;
        Some(ctx.segment(active.segment_index)?.duration)
    }

    pub fn next_fragment_timestamp(&self, stream: usize) -> Option<Duration> {
        let (ctx, active) = self.stream_context(stream).ok()?;
        Some(ctx.period_start + ctx.segment(active.segment_index)?.start)
    }

    /// Presentation time at which the stream's last segment ends; `None` for open-ended streams
    pub fn last_fragment_timestamp_end(&self, stream: usize) -> Option<Duration> {
        let (ctx, _) = self.stream_context(stream).ok()?;
        let count = ctx.segment_count().ok()??;
        let last = ctx.segment(count.checked_sub(1)?)?;
        Some(ctx.period_start + last.start + last.duration)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mpd::attr::{parse_date_time, ByteRange};
    use chrono::{Datelike, TimeZone, Timelike};

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn date(s: &str) -> DateTime<Utc> {
        parse_date_time(s).unwrap()
    }

    fn mpd(attrs: &str, body: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011"
     profiles="urn:mpeg:dash:profile:isoff-main:2011" {}>{}</MPD>"#,
            attrs, body
        )
    }

    fn ready(attrs: &str, body: &str) -> MpdClient {
        let mut client = MpdClient::new();
        client.parse(&mpd(attrs, body)).unwrap();
        client.setup_media_presentation().unwrap();
        client
    }

    /// A client streaming the first adaptation set of the first period
    fn streaming(attrs: &str, body: &str) -> MpdClient {
        let mut client = ready(attrs, body);
        assert_eq!(client.setup_streaming(0), Ok(0));
        client
    }

    const LIVE_ATTRS: &str = r#"availabilityStartTime="2015-03-24T0:0:0"
        mediaPresentationDuration="P0Y0M0DT3H3M30S""#;

    #[test]
    fn setup_media_presentation() {
        let client = ready("", r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S"></Period>"#);
        assert_eq!(client.period_count(), 1);
        assert_eq!(client.period_duration(), Some(secs(90061)));
    }

    #[test]
    fn not_ready() {
        let mut client = MpdClient::new();
        assert_eq!(
            client.setup_media_presentation(),
            Err(PresentationError::NotParsed)
        );
        assert_eq!(client.setup_streaming(0), Err(ClientError::NotReady));
        client
            .parse(&mpd("", "<Period><AdaptationSet/></Period>"))
            .unwrap();
        assert_eq!(client.set_period_index(0), Err(ClientError::NotReady));
        assert_eq!(client.adaptation_set_count(), 0);
    }

    #[test]
    fn failed_parse_keeps_previous_manifest() {
        let mut client = ready("", r#"<Period id="p"/>"#);
        assert!(client.parse("<MPD>").is_err());
        assert_eq!(client.period_id(), Some("p"));
    }

    #[test]
    fn setup_streaming() {
        let mut client = ready(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="video/mp4"><Representation/></AdaptationSet>
                 <AdaptationSet id="2"/>
               </Period>"#,
        );
        assert_eq!(client.setup_streaming(0), Ok(0));
        assert_eq!(client.setup_streaming(1), Err(ClientError::NoRepresentation));
        assert_eq!(
            client.setup_streaming(2),
            Err(ClientError::UnknownAdaptationSet(2))
        );
        assert_eq!(client.active_stream_count(), 1);
    }

    const THREE_PERIODS: &str = r#"
        <Period id="Period0" duration="P0Y0M1DT1H1M1S"></Period>
        <Period id="Period1"></Period>
        <Period id="Period2" start="P0Y0M1DT1H3M3S"></Period>"#;

    #[test]
    fn period_selection() {
        let mut client = MpdClient::new();
        client
            .parse(&mpd(
                r#"mediaPresentationDuration="P0Y0M1DT1H4M3S""#,
                THREE_PERIODS,
            ))
            .unwrap();
        assert_eq!(client.period_index(), 0);
        assert_eq!(client.period_count(), 0);
        client.setup_media_presentation().unwrap();

        assert_eq!(client.period_id(), Some("Period0"));
        client.set_period_index(1).unwrap();
        assert_eq!(client.period_id(), Some("Period1"));
        assert_eq!(client.period_start(), Some(secs(90061)));
        assert_eq!(client.period_duration(), Some(secs(122)));
        client.set_period_index(2).unwrap();
        assert_eq!(client.period_id(), Some("Period2"));
        assert_eq!(client.period_duration(), Some(secs(60)));
        assert!(!client.has_next_period());
        assert!(client.has_previous_period());

        client.set_period_index(0).unwrap();
        assert!(client.has_next_period());
        assert!(!client.has_previous_period());

        client.set_period_id("Period1").unwrap();
        assert_eq!(client.period_index(), 1);
        assert_eq!(client.set_period_index(3), Err(ClientError::UnknownPeriod));
        assert_eq!(client.set_period_id("nope"), Err(ClientError::UnknownPeriod));
        assert_eq!(client.period_index(), 1);
    }

    #[test]
    fn period_at_time() {
        let client = ready(
            r#"availabilityStartTime="2015-03-24T0:0:0"
               mediaPresentationDuration="P0Y0M1DT1H4M3S""#,
            THREE_PERIODS,
        );
        // before availabilityStartTime
        assert_eq!(client.period_index_at_time(date("2015-03-23T23:30:59Z")), Some(0));
        assert_eq!(client.period_index_at_time(date("2015-03-24T23:30:59Z")), Some(0));
        assert_eq!(client.period_index_at_time(date("2015-03-25T1:1:1Z")), Some(1));
        assert_eq!(client.period_index_at_time(date("2015-03-25T1:3:3Z")), Some(2));
        assert_eq!(client.period_index_at_time(date("2015-03-25T1:4:3Z")), None);
    }

    #[test]
    fn period_at_time_needs_availability_start() {
        let client = ready("", r#"<Period duration="PT10S"/>"#);
        assert_eq!(client.period_index_at_time(Utc::now()), None);
    }

    #[test]
    fn adaptation_set_handling() {
        let mut client = ready(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1"></AdaptationSet>
               </Period>
               <Period id="Period1" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="10"></AdaptationSet>
                 <AdaptationSet id="11"></AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.period_id(), Some("Period0"));
        assert_eq!(client.adaptation_set_count(), 1);
        client.set_period_id("Period1").unwrap();
        assert_eq!(client.adaptation_set_count(), 2);
        let ids: Vec<_> = client.adaptation_sets().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![Some(10), Some(11)]);
    }

    #[test]
    fn representation_selection() {
        let mut client = streaming(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="video/mp4">
                   <Representation id="v0" bandwidth="500000"></Representation>
                   <Representation id="v1" bandwidth="250000"></Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.active_stream(0).unwrap().representation, 1);
        client.select_representation(0, 0).unwrap();
        assert_eq!(client.active_stream(0).unwrap().representation, 0);
        assert_eq!(
            client.select_representation(0, 2),
            Err(ClientError::UnknownRepresentation(2))
        );
        assert_eq!(
            client.select_representation(1, 0),
            Err(ClientError::UnknownStream(1))
        );
    }

    #[test]
    fn active_stream_selection() {
        let mut client = ready(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="video/mp4"><Representation/></AdaptationSet>
                 <AdaptationSet id="2" mimeType="audio"><Representation/></AdaptationSet>
                 <AdaptationSet id="3" mimeType="application"><Representation/></AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.active_stream_count(), 0);
        for i in 0..3 {
            assert_eq!(client.setup_streaming(i), Ok(i));
            assert_eq!(client.active_stream_count(), i + 1);
        }
        let types: Vec<_> = (0..3)
            .map(|i| client.active_stream(i).unwrap().stream_type)
            .collect();
        assert_eq!(
            types,
            vec![StreamType::Video, StreamType::Audio, StreamType::Application]
        );
    }

    #[test]
    fn changing_period_discards_streams() {
        let mut client = streaming(
            "",
            r#"<Period id="a" duration="PT10S"><AdaptationSet><Representation/></AdaptationSet></Period>
               <Period id="b" duration="PT10S"><AdaptationSet><Representation/></AdaptationSet></Period>"#,
        );
        client.set_period_index(0).unwrap();
        assert_eq!(client.active_stream_count(), 1);
        client.set_period_index(1).unwrap();
        assert_eq!(client.active_stream_count(), 0);
    }

    #[test]
    fn active_stream_parameters() {
        let client = streaming(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="video/mp4" width="320" height="240"
                                bitstreamSwitching="true" audioSamplingRate="48000">
                   <Representation frameRate="25"></Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.active_stream(0).unwrap().stream_type, StreamType::Video);
        assert_eq!(client.stream_mime_type(0), Some("video/quicktime"));
        assert!(client.stream_bitstream_switching(0));
        assert_eq!(client.stream_width(0), Some(320));
        assert_eq!(client.stream_height(0), Some(240));
        assert_eq!(client.stream_frame_rate(0), Some(Ratio { num: 25, den: 1 }));
        assert_eq!(client.stream_audio_sampling_rate(0), Some(48000));
        assert_eq!(client.stream_audio_channels(0), None);
        assert_eq!(client.stream_width(1), None);
    }

    #[test]
    fn audio_parameters() {
        let client = streaming(
            r#"mediaPresentationDuration="PT10S""#,
            r#"<Period bitstreamSwitching="true">
                 <AdaptationSet mimeType="audio/mp4" audioSamplingRate="44100 48000">
                   <Representation>
                     <AudioChannelConfiguration
                         schemeIdUri="urn:mpeg:dash:23003:3:audio_channel_configuration:2011"
                         value="6"/>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.stream_mime_type(0), Some("audio/x-m4a"));
        assert_eq!(client.stream_audio_sampling_rate(0), Some(44100));
        assert_eq!(client.stream_audio_channels(0), Some(6));
        // inherited from the period
        assert!(client.stream_bitstream_switching(0));
    }

    #[test]
    fn audio_languages() {
        let mut client = ready(
            "",
            r#"<Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="audio" lang="en"><Representation/></AdaptationSet>
                 <AdaptationSet id="2" mimeType="video/mp4"><Representation/></AdaptationSet>
                 <AdaptationSet id="3" mimeType="audio" lang="fr"><Representation/></AdaptationSet>
               </Period>"#,
        );
        for i in 0..client.adaptation_set_count() {
            client.setup_streaming(i).unwrap();
        }
        assert_eq!(client.active_stream_count(), 3);
        assert_eq!(client.audio_languages(), vec!["en", "fr"]);
    }

    #[test]
    fn base_url() {
        let client = streaming(
            "",
            r#"<BaseURL>http://example.com/</BaseURL>
               <Period id="Period0" duration="P0Y0M1DT1H1M1S">
                 <AdaptationSet id="1" mimeType="audio" lang="en"><Representation/></AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.base_url(0), Some("http://example.com/"));
        assert_eq!(client.base_url(1), None);
    }

    #[test]
    fn nested_base_urls() {
        let client = streaming(
            r#"mediaPresentationDuration="PT10S""#,
            r#"<BaseURL>http://example.com/content/</BaseURL>
               <Period>
                 <BaseURL>period1/</BaseURL>
                 <AdaptationSet>
                   <Representation id="v">
                     <BaseURL>video/</BaseURL>
                     <SegmentList duration="10"><SegmentURL media="s1.m4s"/></SegmentList>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(
            client.base_url(0),
            Some("http://example.com/content/period1/video/")
        );
        assert_eq!(
            client.next_fragment(0).unwrap().uri,
            "http://example.com/content/period1/video/s1.m4s"
        );
    }

    #[test]
    fn media_presentation_duration() {
        let mut client = MpdClient::new();
        client
            .parse(&mpd(r#"mediaPresentationDuration="P0Y0M0DT0H0M3S""#, ""))
            .unwrap();
        assert_eq!(client.media_presentation_duration(), Some(secs(3)));
    }

    #[test]
    fn stream_presentation_offset() {
        let client = streaming(
            r#"mediaPresentationDuration="P0Y0M0DT3H3M30S""#,
            r#"<Period>
                 <AdaptationSet mimeType="video/mp4">
                   <SegmentBase timescale="1000" presentationTimeOffset="3000"></SegmentBase>
                   <Representation></Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        // only honoured for template addressing
        assert_eq!(client.stream_presentation_offset(0), Some(Duration::ZERO));
    }

    #[test]
    fn template_presentation_offset() {
        let client = streaming(
            r#"mediaPresentationDuration="PT30S""#,
            r#"<Period>
                 <AdaptationSet mimeType="video/mp4">
                   <SegmentTemplate timescale="1000" presentationTimeOffset="3000"
                                    duration="2000" media="$Number$.m4s"/>
                   <Representation></Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(client.stream_presentation_offset(0), Some(secs(3)));
    }

    #[test]
    fn profiles_and_type() {
        let client = ready(r#"type="dynamic""#, "");
        assert!(client.is_live());
        assert!(!client.has_isoff_ondemand_profile());
        let mut client = MpdClient::new();
        client
            .parse(
                r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011"
                        profiles="urn:mpeg:dash:profile:isoff-on-demand:2011"></MPD>"#,
            )
            .unwrap();
        assert!(client.has_isoff_ondemand_profile());
        assert!(!client.is_live());
    }

    const SEGMENTS: &str = r#"
        <Period id="Period0">
          <AdaptationSet mimeType="video/mp4">
            <Representation>
              <SegmentList duration="45">
                <SegmentURL media="TestMedia1" mediaRange="10-20"
                            index="TestIndex1" indexRange="30-40"></SegmentURL>
                <SegmentURL media="TestMedia2" mediaRange="20-30"
                            index="TestIndex2" indexRange="40-50"></SegmentURL>
              </SegmentList>
            </Representation>
          </AdaptationSet>
        </Period>"#;

    fn segments_client() -> MpdClient {
        streaming(&format!(r#"type="dynamic" {}"#, LIVE_ATTRS), SEGMENTS)
    }

    #[test]
    fn segments() {
        let mut client = segments_client();
        assert!(client.has_next_segment(0, true));
        assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::Advanced));
        assert!(!client.has_next_segment(0, true));
        assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::EndOfStream));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 1);

        client.seek_to_first_segment();
        assert!(client.has_next_segment(0, true));
        assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::Advanced));
        assert!(!client.has_next_segment(0, true));

        // looking up a chunk does not move the cursor
        assert_eq!(client.chunk_by_index(0, 0).unwrap().number, 1);
        assert!(!client.has_next_segment(0, true));

        // end of segment 1 is 2 * 45s after availabilityStartTime
        let end = client.next_segment_availability_end_time(0).unwrap();
        assert_eq!((end.year(), end.month(), end.day()), (2015, 3, 24));
        assert_eq!((end.hour(), end.minute(), end.second()), (0, 1, 30));

        assert!(client.seek_to_time(date("2015-03-24T0:0:20Z")));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 0);
        assert!(client.has_next_segment(0, true));

        // no timeShiftBufferDepth, so everything in the past is available
        assert_eq!(
            client.check_time_position(0, secs(30)),
            Ok(TimePosition::Available)
        );
    }

    #[test]
    fn advance_backwards() {
        let mut client = segments_client();
        assert!(!client.has_next_segment(0, false));
        assert_eq!(client.advance_segment(0, false), Ok(SegmentStep::EndOfStream));
        client.advance_segment(0, true).unwrap();
        assert!(client.has_next_segment(0, false));
        assert_eq!(client.advance_segment(0, false), Ok(SegmentStep::Advanced));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 0);
        assert_eq!(
            client.advance_segment(3, true),
            Err(ClientError::UnknownStream(3))
        );
    }

    #[test]
    fn seek_outside_segments() {
        let mut client = segments_client();
        client.advance_segment(0, true).unwrap();
        // both segments together cover only the first 90 seconds
        assert!(!client.seek_to_time(date("2015-03-24T0:2:0Z")));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 1);
        assert!(client.stream_seek(0, secs(10)));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 0);
        assert!(client.stream_seek(0, secs(89)));
        assert_eq!(client.active_stream(0).unwrap().segment_index, 1);
        assert!(!client.stream_seek(0, secs(90)));
    }

    #[test]
    fn time_position_in_live_window() {
        let client = streaming(
            r#"type="dynamic" availabilityStartTime="2015-03-24T0:0:0"
               timeShiftBufferDepth="PT1M""#,
            SEGMENTS,
        );
        let now = date("2015-03-24T0:10:0Z");
        assert_eq!(
            client.check_time_position_at(0, secs(600), now),
            Ok(TimePosition::Available)
        );
        assert_eq!(
            client.check_time_position_at(0, secs(610), now),
            Ok(TimePosition::NotYetAvailable(secs(10)))
        );
        assert_eq!(
            client.check_time_position_at(0, secs(530), now),
            Ok(TimePosition::Expired(secs(10)))
        );
        assert_eq!(
            client.check_time_position_at(5, secs(0), now),
            Err(ClientError::UnknownStream(5))
        );
    }

    #[test]
    fn static_presentation_is_always_available() {
        let client = streaming(LIVE_ATTRS, SEGMENTS);
        let before_start = date("2015-03-23T0:0:0Z");
        assert_eq!(
            client.check_time_position_at(0, secs(10), before_start),
            Ok(TimePosition::Available)
        );
    }

    #[test]
    fn headers() {
        let client = streaming(
            &format!(r#"type="dynamic" {}"#, LIVE_ATTRS),
            r#"<Period id="Period0">
                 <AdaptationSet mimeType="video/mp4">
                   <Representation>
                     <SegmentBase indexRange="10-20">
                       <Initialization sourceURL="TestSourceUrl" range="100-200"></Initialization>
                     </SegmentBase>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(
            client.next_header(0),
            Some(HeaderInfo {
                uri: "TestSourceUrl".to_string(),
                range: ByteRange::parse("100-200"),
            })
        );
        assert_eq!(
            client.next_header_index(0),
            Some(HeaderInfo {
                uri: "TestSourceUrl".to_string(),
                range: ByteRange::parse("10-20"),
            })
        );
    }

    #[test]
    fn fragments() {
        let client = streaming(
            LIVE_ATTRS,
            r#"<Period id="Period0" start="P0Y0M0DT0H0M10S">
                 <AdaptationSet mimeType="video/mp4"><Representation></Representation></AdaptationSet>
               </Period>"#,
        );
        let fragment = client.next_fragment(0).unwrap();
        assert_eq!(fragment.uri, "");
        assert_eq!(fragment.range, None);
        assert_eq!(fragment.duration, secs(11000));
        assert_eq!(fragment.timestamp, secs(10));
        assert_eq!(client.next_fragment_duration(0), Some(secs(11000)));
        assert_eq!(client.next_fragment_timestamp(0), Some(secs(10)));
        assert_eq!(client.last_fragment_timestamp_end(0), Some(secs(11010)));
    }

    #[test]
    fn representation_segment_list_overrides_adaptation_set() {
        let mut client = streaming(
            LIVE_ATTRS,
            r#"<Period start="P0Y0M0DT0H0M10S">
                 <AdaptationSet mimeType="video/mp4">
                   <SegmentList duration="100">
                     <SegmentURL media="TestMediaAdaptation" mediaRange="10-20"
                                 index="TestIndexAdaptation" indexRange="30-40"></SegmentURL>
                   </SegmentList>
                   <Representation>
                     <SegmentList duration="110">
                       <SegmentURL media="TestMediaRep" mediaRange="100-200"
                                   index="TestIndexRep" indexRange="300-400"></SegmentURL>
                     </SegmentList>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(
            client.next_fragment(0),
            Some(MediaFragment {
                uri: "/TestMediaRep".to_string(),
                range: ByteRange::parse("100-200"),
                index_uri: Some("/TestIndexRep".to_string()),
                index_range: ByteRange::parse("300-400"),
                duration: secs(110),
                timestamp: secs(10),
            })
        );
        assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::EndOfStream));
    }

    #[test]
    fn segment_list_is_clamped() {
        let client = streaming(
            LIVE_ATTRS,
            r#"<Period start="P0Y0M0DT0H0M10S">
                 <AdaptationSet mimeType="video/mp4">
                   <Representation>
                     <SegmentList duration="12000">
                       <SegmentURL media="TestMedia" mediaRange="100-200"
                                   index="TestIndex" indexRange="300-400"></SegmentURL>
                     </SegmentList>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        // declared 12000s, but the period lasts only 11000s
        assert_eq!(
            client.next_fragment(0),
            Some(MediaFragment {
                uri: "/TestMedia".to_string(),
                range: ByteRange::parse("100-200"),
                index_uri: Some("/TestIndex".to_string()),
                index_range: ByteRange::parse("300-400"),
                duration: secs(11000),
                timestamp: secs(10),
            })
        );
    }

    #[test]
    fn segment_template_is_not_clamped() {
        let client = streaming(
            LIVE_ATTRS,
            r#"<Period start="P0Y0M0DT0H0M10S">
                 <AdaptationSet mimeType="video/mp4">
                   <Representation id="repId" bandwidth="250000">
                     <SegmentTemplate duration="12000" index="TestIndex"
                         media="TestMedia_rep=$RepresentationID$number=$Number$bandwidth=$Bandwidth$time=$Time$">
                     </SegmentTemplate>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(
            client.next_fragment(0),
            Some(MediaFragment {
                uri: "/TestMedia_rep=repIdnumber=1bandwidth=250000time=0".to_string(),
                range: None,
                index_uri: Some("/TestIndex".to_string()),
                index_range: None,
                duration: secs(12000),
                timestamp: secs(10),
            })
        );
    }

    #[test]
    fn segment_timeline() {
        let mut client = streaming(
            LIVE_ATTRS,
            r#"<Period start="P0Y0M0DT0H0M10S">
                 <AdaptationSet mimeType="video/mp4">
                   <SegmentList>
                     <SegmentTimeline><S t="10" d="20" r="30"></S></SegmentTimeline>
                   </SegmentList>
                   <Representation>
                     <SegmentList>
                       <SegmentTimeline>
                         <S t="3" d="2" r="1"></S>
                         <S t="10" d="3" r="0"></S>
                       </SegmentTimeline>
                       <SegmentURL media="TestMedia0" index="TestIndex0"></SegmentURL>
                       <SegmentURL media="TestMedia1" index="TestIndex1"></SegmentURL>
                     </SegmentList>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        let expected = [
            ("/TestMedia0", "/TestIndex0", 13, 2),
            // a repeat of the first SegmentURL
            ("/TestMedia0", "/TestIndex0", 15, 2),
            // a gap after the second segment
            ("/TestMedia1", "/TestIndex1", 20, 3),
        ];
        for (i, &(uri, index_uri, timestamp, duration)) in expected.iter().enumerate() {
            if i > 0 {
                assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::Advanced));
            }
            let fragment = client.next_fragment(0).unwrap();
            assert_eq!(fragment.uri, uri);
            assert_eq!(fragment.index_uri.as_deref(), Some(index_uri));
            assert_eq!(fragment.timestamp, secs(timestamp));
            assert_eq!(fragment.duration, secs(duration));
        }
        assert_eq!(client.advance_segment(0, true), Ok(SegmentStep::EndOfStream));
    }

    #[test]
    fn missing_segment_duration() {
        let mut client = ready(
            LIVE_ATTRS,
            r#"<Period>
                 <AdaptationSet>
                   <Representation>
                     <SegmentList><SegmentURL media="a"/><SegmentURL media="b"/></SegmentList>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert_eq!(
            client.setup_streaming(0),
            Err(ClientError::MissingSegmentDuration)
        );
        assert_eq!(client.active_stream_count(), 0);
    }

    #[test]
    fn period_duration_inferred_from_misordered_next_period() {
        let mut client = MpdClient::new();
        client
            .parse(&mpd(
                LIVE_ATTRS,
                r#"<Period id="Period0" duration="P0Y0M0DT1H1M0S"></Period>
                   <Period id="Period1"></Period>
                   <Period id="Period2" start="P0Y0M0DT0H0M10S"></Period>"#,
            ))
            .unwrap();
        assert_eq!(
            client.setup_media_presentation(),
            Err(PresentationError::PeriodStartAfterNextPeriod {
                period: 1,
                start: secs(3660),
                next_start: secs(10),
            })
        );
        // nothing is activated
        assert_eq!(client.period_count(), 0);
        assert_eq!(client.period_id(), None);
    }

    #[test]
    fn period_start_beyond_presentation() {
        let mut client = MpdClient::new();
        client
            .parse(&mpd(
                LIVE_ATTRS,
                r#"<Period id="Period0" start="P0Y0M0DT4H0M0S"></Period>"#,
            ))
            .unwrap();
        assert_eq!(
            client.setup_media_presentation(),
            Err(PresentationError::PeriodStartBeyondPresentation {
                period: 0,
                start: secs(14400),
                presentation_duration: secs(11010),
            })
        );
    }

    #[test]
    fn period_start_unknown() {
        let mut client = MpdClient::new();
        client
            .parse(&mpd(
                r#"mediaPresentationDuration="PT1H""#,
                r#"<Period id="a"></Period><Period id="b"></Period>"#,
            ))
            .unwrap();
        assert_eq!(
            client.setup_media_presentation(),
            Err(PresentationError::PeriodStartUnknown { period: 1 })
        );
    }

    #[test]
    fn period_duration_unknown() {
        let mut client = MpdClient::new();
        client.parse(&mpd("", r#"<Period id="a"></Period>"#)).unwrap();
        assert_eq!(
            client.setup_media_presentation(),
            Err(PresentationError::PeriodDurationUnknown { period: 0 })
        );

        // a live presentation may be open-ended
        let client = ready(
            r#"type="dynamic" availabilityStartTime="2015-03-24T0:0:0""#,
            r#"<Period id="a"></Period>"#,
        );
        assert_eq!(client.period_duration(), None);
        assert_eq!(
            client.period_index_at_time(date("2030-01-01T0:0:0Z")),
            Some(0)
        );
    }

    #[test]
    fn open_ended_live_template() {
        let mut client = streaming(
            r#"type="dynamic" availabilityStartTime="2015-03-24T0:0:0""#,
            r#"<Period>
                 <AdaptationSet mimeType="video/mp4">
                   <Representation id="v">
                     <SegmentTemplate timescale="1000" duration="2000" startNumber="100"
                                      media="$RepresentationID$/$Number%06d$.m4s"/>
                   </Representation>
                 </AdaptationSet>
               </Period>"#,
        );
        assert!(client.has_next_segment(0, true));
        assert_eq!(client.last_fragment_timestamp_end(0), None);
        assert!(client.seek_to_time(date("2015-03-24T1:0:1Z")));
        // 3601s / 2s
        assert_eq!(client.next_fragment(0).unwrap().uri, "/v/001900.m4s");
        assert_eq!(client.next_fragment_timestamp(0), Some(secs(3600)));
    }

    #[test]
    fn date_time_helpers() {
        let a = Utc.with_ymd_and_hms(2015, 3, 24, 1, 10, 50).unwrap();
        let b = Utc.with_ymd_and_hms(2015, 3, 24, 1, 10, 51).unwrap();
        assert_eq!(calculate_time_difference(a, b), 1_000_000_000);
        assert_eq!(calculate_time_difference(b, a), -1_000_000_000);
        assert_eq!(add_time_difference(a, 1_000_000), Some(b));
        assert_eq!(add_time_difference(b, -1_000_000), Some(a));
    }
}
