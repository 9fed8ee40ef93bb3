//! Grammars of the typed attribute values found in an MPD.
//!
//! Every parser here is lenient about surrounding whitespace and returns `None` for anything it
//! does not understand.  When used while building the manifest tree, a value that fails to parse
//! is logged and left unset rather than failing the whole document.

use super::xml::Element;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use log::warn;
use std::fmt;
use std::time::Duration;

/// Parse an ISO 8601 duration such as `P0Y1M2DT12H10M20.5S`.
///
/// Calendar units are approximated: a year is 365 days and a month is 30 days.  Only the seconds
/// component may carry a fraction, and that fraction is truncated to whole milliseconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let rest = s.trim().strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    let mut fields = [0u64; 7];
    let mut millis = 0u64;
    let mut seen = false;
    let mut next_slot = 0;
    for (value, unit) in components(date)? {
        let slot = match unit {
            'Y' => 0,
            'M' => 1,
            'W' => 2,
            'D' => 3,
            _ => return None,
        };
        if slot < next_slot {
            return None;
        }
        fields[slot] = value.parse().ok()?;
        next_slot = slot + 1;
        seen = true;
    }
    if let Some(time) = time {
        let mut next_slot = 4;
        let mut time_seen = false;
        for (value, unit) in components(time)? {
            let slot = match unit {
                'H' => 4,
                'M' => 5,
                'S' => 6,
                _ => return None,
            };
            if slot < next_slot {
                return None;
            }
            if slot == 6 {
                let (whole, frac) = match value.split_once('.') {
                    Some((whole, frac)) => (whole, frac),
                    None => (value, ""),
                };
                fields[6] = whole.parse().ok()?;
                millis = fraction_digits(frac, 3)?;
            } else {
                fields[slot] = value.parse().ok()?;
            }
            next_slot = slot + 1;
            time_seen = true;
        }
        if !time_seen {
            return None;
        }
        seen = true;
    }
    if !seen {
        return None;
    }
    let [years, months, weeks, days, hours, minutes, seconds] = fields;
    let days = years
        .checked_mul(365)?
        .checked_add(months.checked_mul(30)?)?
        .checked_add(weeks.checked_mul(7)?)?
        .checked_add(days)?;
    let hours = days.checked_mul(24)?.checked_add(hours)?;
    let minutes = hours.checked_mul(60)?.checked_add(minutes)?;
    let seconds = minutes.checked_mul(60)?.checked_add(seconds)?;
    let ms = seconds.checked_mul(1000)?.checked_add(millis)?;
    Some(Duration::from_millis(ms))
}

/// Split `12H10M20.5S` into `[("12", 'H'), ("10", 'M'), ("20.5", 'S')]`
fn components(s: &str) -> Option<Vec<(&str, char)>> {
    let mut result = vec![];
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        if i == start {
            return None;
        }
        result.push((&s[start..i], c));
        start = i + c.len_utf8();
    }
    if start != s.len() {
        return None;
    }
    Some(result)
}

/// Interpret the digits after a decimal point as an integer with `places` digits, truncating
/// any further digits
fn fraction_digits(frac: &str, places: usize) -> Option<u64> {
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut value = 0u64;
    let mut digits = frac.bytes();
    for _ in 0..places {
        let d = digits.next().map(|b| u64::from(b - b'0')).unwrap_or(0);
        value = value * 10 + d;
    }
    Some(value)
}

/// Parse an ISO 8601 date-time such as `2015-03-24T1:10:50` or `2012-06-23T23:30:59.5+01:00`.
///
/// Single-digit fields and a missing seconds field are accepted, since real manifests contain
/// them.  A value without a zone designator is taken to be UTC.
pub fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let (date, time) = match s.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };
    let mut parts = date.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let (clock, offset_secs) = match time {
        None => ("0:0:0", 0),
        Some(time) => split_zone(time)?,
    };
    let mut fields = clock.splitn(3, ':');
    let hour: u32 = fields.next()?.parse().ok()?;
    let minute: u32 = fields.next()?.parse().ok()?;
    let (second, nanos) = match fields.next() {
        None => (0, 0),
        Some(sec) => match sec.split_once('.') {
            Some((whole, frac)) => (whole.parse().ok()?, fraction_digits(frac, 9)? as u32),
            None => (sec.parse().ok()?, 0),
        },
    };
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    NaiveDateTime::new(date, time)
        .and_utc()
        .checked_sub_signed(TimeDelta::try_seconds(offset_secs)?)
}

/// Separate the clock part of a time from its zone designator, returning the zone's offset from
/// UTC in seconds
fn split_zone(time: &str) -> Option<(&str, i64)> {
    if let Some(clock) = time.strip_suffix('Z') {
        return Some((clock, 0));
    }
    let pos = match time.rfind(|c: char| c == '+' || c == '-') {
        Some(pos) => pos,
        None => return Some((time, 0)),
    };
    let sign = if &time[pos..pos + 1] == "-" { -1 } else { 1 };
    let zone = &time[pos + 1..];
    let (hours, minutes) = match zone.split_once(':') {
        Some((h, m)) => (h.parse::<i64>().ok()?, m.parse::<i64>().ok()?),
        None if zone.len() == 4 => (zone.get(..2)?.parse().ok()?, zone.get(2..)?.parse().ok()?),
        None => (zone.parse().ok()?, 0),
    };
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    Some((&time[..pos], sign * (hours * 3600 + minutes * 60)))
}

/// A byte range of the form `first-last`, or the open-ended `first-`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// offset of the first byte
    pub first_byte_pos: u64,
    /// offset of the last byte, inclusive, if the range is bounded
    pub last_byte_pos: Option<u64>,
}
impl ByteRange {
    pub fn parse(s: &str) -> Option<ByteRange> {
        let (first, last) = s.trim().split_once('-')?;
        let first_byte_pos = first.parse().ok()?;
        let last_byte_pos = if last.is_empty() {
            None
        } else {
            let last = last.parse().ok()?;
            if last < first_byte_pos {
                return None;
            }
            Some(last)
        };
        Some(ByteRange {
            first_byte_pos,
            last_byte_pos,
        })
    }
}
impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_byte_pos {
            Some(last) => write!(f, "{}-{}", self.first_byte_pos, last),
            None => write!(f, "{}-", self.first_byte_pos),
        }
    }
}

/// A ratio such as an aspect ratio (`16:9`) or a frame rate (`30000/1001`, or just `25`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub num: u32,
    pub den: u32,
}
impl Ratio {
    pub fn parse(s: &str) -> Option<Ratio> {
        let s = s.trim();
        let (num, den) = match s.split_once(|c: char| c == ':' || c == '/') {
            Some((num, den)) => (num.parse().ok()?, den.parse().ok()?),
            None => (s.parse().ok()?, 1),
        };
        if den == 0 {
            return None;
        }
        Some(Ratio { num, den })
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// The `ConditionalUintType` of the schema: either a boolean, or an unsigned value which also
/// implies `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalUint {
    pub flag: bool,
    pub value: u32,
}
impl ConditionalUint {
    pub fn parse(s: &str) -> Option<ConditionalUint> {
        match s.trim() {
            "true" => Some(ConditionalUint {
                flag: true,
                value: 0,
            }),
            "false" => Some(ConditionalUint {
                flag: false,
                value: 0,
            }),
            other => other
                .parse()
                .ok()
                .map(|value| ConditionalUint { flag: true, value }),
        }
    }
}

/// Stream Access Point type, `0` to `6`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SapType(u8);
impl SapType {
    pub fn new(value: u8) -> Option<SapType> {
        if value <= 6 {
            Some(SapType(value))
        } else {
            None
        }
    }
    pub fn parse(s: &str) -> Option<SapType> {
        SapType::new(s.trim().parse().ok()?)
    }
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Whitespace separated list of tokens; an empty attribute gives an empty list
pub fn parse_string_list(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

/// Whitespace separated list of unsigned values; any bad entry invalidates the whole list
pub fn parse_uint_list(s: &str) -> Option<Vec<u32>> {
    s.split_whitespace().map(|v| v.parse().ok()).collect()
}

/// Types that can be read from an attribute value
pub(crate) trait FromAttr: Sized {
    fn from_attr(value: &str) -> Option<Self>;
}
impl FromAttr for String {
    fn from_attr(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}
impl FromAttr for u32 {
    fn from_attr(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}
impl FromAttr for u64 {
    fn from_attr(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}
impl FromAttr for i64 {
    fn from_attr(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}
impl FromAttr for f64 {
    fn from_attr(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}
impl FromAttr for bool {
    fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}
impl FromAttr for Duration {
    fn from_attr(value: &str) -> Option<Self> {
        parse_duration(value)
    }
}
impl FromAttr for DateTime<Utc> {
    fn from_attr(value: &str) -> Option<Self> {
        parse_date_time(value)
    }
}
impl FromAttr for ByteRange {
    fn from_attr(value: &str) -> Option<Self> {
        ByteRange::parse(value)
    }
}
impl FromAttr for Ratio {
    fn from_attr(value: &str) -> Option<Self> {
        Ratio::parse(value)
    }
}
impl FromAttr for ConditionalUint {
    fn from_attr(value: &str) -> Option<Self> {
        ConditionalUint::parse(value)
    }
}
impl FromAttr for SapType {
    fn from_attr(value: &str) -> Option<Self> {
        SapType::parse(value)
    }
}
impl FromAttr for Vec<String> {
    fn from_attr(value: &str) -> Option<Self> {
        Some(parse_string_list(value))
    }
}
impl FromAttr for Vec<u32> {
    fn from_attr(value: &str) -> Option<Self> {
        parse_uint_list(value)
    }
}

/// Read the named attribute of `el` as a `T`, logging values that are present but malformed
pub(crate) fn get<T: FromAttr>(el: &Element, name: &str) -> Option<T> {
    let value = el.attr(name)?;
    let parsed = T::from_attr(value);
    if parsed.is_none() {
        warn!(
            "ignoring unparsable {}=\"{}\" on <{}>",
            name, value, el.name
        );
    }
    parsed
}
