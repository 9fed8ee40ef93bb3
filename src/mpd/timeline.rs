//! Expansion of `SegmentTimeline` entries into individual segments.
//!
//! Each `S` element stands for `r + 1` segments of equal duration.  Only the per-element spans
//! are computed up front; individual segments are produced on demand, so a timeline whose
//! repeat counts describe hours of content costs no more than its element count.

use super::model::TimelineSegment;
use log::warn;

/// One segment of an expanded timeline.  Times are in timescale units, relative to the start of
/// the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineItem {
    /// position of this segment in the whole timeline
    pub index: usize,
    /// index of the `S` element that produced it
    pub entry: usize,
    pub start: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    first_index: usize,
    start: u64,
    duration: u64,
    count: usize,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    spans: Vec<Span>,
    len: usize,
}
impl Timeline {
    /// `period_end` is the length of the period in timescale units, when known, and bounds any
    /// `S` element with a negative repeat count that is not followed by an element with a `t`.
    pub fn new(entries: &[TimelineSegment], period_end: Option<u64>) -> Timeline {
        let mut spans = Vec::with_capacity(entries.len());
        let mut next_start = 0u64;
        let mut first_index = 0usize;
        for (i, s) in entries.iter().enumerate() {
            let start = s.t.unwrap_or(next_start);
            let count = if s.r >= 0 {
                usize::try_from(s.r).unwrap_or(usize::MAX).saturating_add(1)
            } else {
                let bound = entries.get(i + 1).and_then(|n| n.t).or(period_end);
                match bound {
                    Some(end) if s.d > 0 => {
                        let count = end.saturating_sub(start).div_ceil(s.d).max(1);
                        usize::try_from(count).unwrap_or(usize::MAX)
                    }
                    _ => {
                        warn!(
                            "open-ended repeat on <S t={} d={}> has no bound, using one segment",
                            start, s.d
                        );
                        1
                    }
                }
            };
            spans.push(Span {
                first_index,
                start,
                duration: s.d,
                count,
            });
            first_index = first_index.saturating_add(count);
            next_start = start.saturating_add(s.d.saturating_mul(count as u64));
        }
        Timeline {
            spans,
            len: first_index,
        }
    }

    /// Total number of segments
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The segment at the given position, if there is one
    pub fn get(&self, index: usize) -> Option<TimelineItem> {
        if index >= self.len {
            return None;
        }
        let span_idx = match self
            .spans
            .binary_search_by_key(&index, |span| span.first_index)
        {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let span = &self.spans[span_idx];
        Some(Self::item(span_idx, span, index - span.first_index))
    }

    /// Position of the first segment produced by the given `S` element
    pub fn entry_start(&self, entry: usize) -> Option<usize> {
        self.spans.get(entry).map(|span| span.first_index)
    }

    /// Position of the segment whose interval `[start, start + duration)` contains `time`
    pub fn position_at(&self, time: u64) -> Option<usize> {
        self.spans.iter().find_map(|span| {
            if time < span.start || span.duration == 0 {
                return None;
            }
            let offset = (time - span.start) / span.duration;
            usize::try_from(offset)
                .ok()
                .filter(|&o| o < span.count)
                .map(|o| span.first_index + o)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = TimelineItem> + '_ {
        self.spans
            .iter()
            .enumerate()
            .flat_map(|(entry, span)| (0..span.count).map(move |r| Self::item(entry, span, r)))
    }

    fn item(entry: usize, span: &Span, repeat: usize) -> TimelineItem {
        TimelineItem {
            index: span.first_index + repeat,
            entry,
            start: span
                .start
                .saturating_add(span.duration.saturating_mul(repeat as u64)),
            duration: span.duration,
        }
    }
}
