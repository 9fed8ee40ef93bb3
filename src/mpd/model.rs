//! The manifest tree.
//!
//! Each type mirrors one element of the MPD schema.  Attributes the document did not declare are
//! `None`; nothing is defaulted here, so that an explicit zero can be told apart from an absent
//! value when the client resolves effective values.

use super::attr::{ByteRange, ConditionalUint, Ratio, SapType};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The `type` attribute of the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationType {
    /// on-demand content, where all segments are available
    #[default]
    Static,
    /// live content, where segments become available over time
    Dynamic,
}

/// The root `MPD` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mpd {
    /// the value of the default `xmlns` declaration
    pub default_namespace: Option<String>,
    /// the value of `xmlns:xsi`
    pub namespace_xsi: Option<String>,
    /// the value of `xmlns:ext`
    pub namespace_ext: Option<String>,
    /// `xsi:schemaLocation`
    pub schema_location: Option<String>,
    pub id: Option<String>,
    /// comma separated profile URNs; see [`Mpd::has_profile`]
    pub profiles: Option<String>,
    /// `type`, static unless declared `dynamic`
    pub presentation_type: PresentationType,
    /// wall-clock time of the start of the first period of a live presentation
    pub availability_start_time: Option<DateTime<Utc>>,
    /// wall-clock time after which no segment is available
    pub availability_end_time: Option<DateTime<Utc>>,
    /// total duration of the presentation
    pub media_presentation_duration: Option<Duration>,
    /// how often a live manifest should be refetched
    pub minimum_update_period: Option<Duration>,
    /// buffering needed before playback can start
    pub min_buffer_time: Option<Duration>,
    /// how far behind the live edge segments stay available
    pub time_shift_buffer_depth: Option<Duration>,
    /// distance from the live edge that clients should play at
    pub suggested_presentation_delay: Option<Duration>,
    /// longest segment of any representation
    pub max_segment_duration: Option<Duration>,
    /// longest subsegment of any representation
    pub max_subsegment_duration: Option<Duration>,
    pub base_urls: Vec<BaseUrl>,
    /// `Location` elements, where updated manifests may be fetched from
    pub locations: Vec<String>,
    pub program_information: Vec<ProgramInformation>,
    pub periods: Vec<Period>,
    pub metrics: Vec<Metrics>,
}
impl Mpd {
    /// True for `type="dynamic"`
    pub fn is_live(&self) -> bool {
        self.presentation_type == PresentationType::Dynamic
    }

    /// True if the whitespace or comma separated `profiles` list contains the given URN
    pub fn has_profile(&self, urn: &str) -> bool {
        self.profiles.as_deref().map_or(false, |profiles| {
            profiles
                .split(|c: char| c == ',' || c.is_whitespace())
                .any(|p| p == urn)
        })
    }
}

/// A `ProgramInformation` element, describing the content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramInformation {
    /// language of the title, source and copyright texts
    pub lang: Option<String>,
    /// `moreInformationURL`
    pub more_information_url: Option<String>,
    /// text of the `Title` child
    pub title: Option<String>,
    /// text of the `Source` child
    pub source: Option<String>,
    /// text of the `Copyright` child
    pub copyright: Option<String>,
}

/// A `BaseURL` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseUrl {
    /// the element's text content
    pub url: String,
    /// `serviceLocation`, identifying the server for alternative BaseURLs
    pub service_location: Option<String>,
    /// `byteRange`, a template for byte ranges carried in the URL
    pub byte_range: Option<String>,
}

/// A `Metrics` element, asking the client to report the named metrics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    /// the list of metric keys
    pub metrics: Option<String>,
    /// periods of media time that the metrics are collected over
    pub ranges: Vec<MetricsRange>,
    /// `Reporting` schemes
    pub reporting: Vec<DescriptorType>,
}

/// A `Range` child of `Metrics`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsRange {
    /// start of the range in media time
    pub starttime: Option<Duration>,
    pub duration: Option<Duration>,
}

/// The generic `DescriptorType` of the schema, used by `Role`, `Accessibility`,
/// `ContentProtection` and similar elements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorType {
    /// `schemeIdUri`, naming the scheme that `value` belongs to
    pub scheme_id_uri: Option<String>,
    pub value: Option<String>,
}

/// A `Period` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Period {
    pub id: Option<String>,
    /// start relative to the start of the presentation; derived from the previous period when
    /// absent
    pub start: Option<Duration>,
    /// derived from the next period's start, or the presentation duration, when absent
    pub duration: Option<Duration>,
    /// `bitstreamSwitching` default for the adaptation sets of this period
    pub bitstream_switching: Option<bool>,
    pub base_urls: Vec<BaseUrl>,
    /// segment information inherited by every adaptation set of the period
    pub segment_base: Option<SegmentBase>,
    /// inherited like `segment_base`
    pub segment_list: Option<SegmentList>,
    /// inherited like `segment_base`
    pub segment_template: Option<SegmentTemplate>,
    pub adaptation_sets: Vec<AdaptationSet>,
    pub subsets: Vec<Subset>,
}

/// A `Subset` element, restricting which adaptation sets play together
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subset {
    /// ids of the adaptation sets in the subset
    pub contains: Vec<u32>,
}

/// A URL with an optional byte range, as used by `Initialization` and `RepresentationIndex`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UrlType {
    /// `sourceURL`; absent means the representation's own URL
    pub source_url: Option<String>,
    /// the bytes of the resource to fetch, or all of it if absent
    pub range: Option<ByteRange>,
}

/// A `SegmentBase` element, or the `SegmentBase` part of a list or template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentBase {
    /// ticks per second of the times and durations; see [`SegmentBase::timescale()`]
    pub timescale: Option<u32>,
    /// media time, in timescale units, that maps to the start of the period
    pub presentation_time_offset: Option<u64>,
    /// bytes of the segment index within the media segment
    pub index_range: Option<ByteRange>,
    /// whether `index_range` is exact rather than a lower bound
    pub index_range_exact: Option<bool>,
    /// the `Initialization` child
    pub initialization: Option<UrlType>,
    /// the `RepresentationIndex` child
    pub representation_index: Option<UrlType>,
}
impl SegmentBase {
    /// The declared timescale, or the schema default of `1`
    pub fn timescale(&self) -> u32 {
        self.timescale.filter(|&t| t != 0).unwrap_or(1)
    }
}

/// Fields shared by `SegmentList` and `SegmentTemplate`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipleSegmentBase {
    /// the attributes and children also found on `SegmentBase`
    pub segment_base: SegmentBase,
    /// segment duration, in `timescale` units
    pub duration: Option<u32>,
    /// number of the first segment; see [`MultipleSegmentBase::start_number()`]
    pub start_number: Option<u32>,
    /// explicit segment times, used instead of `duration` when present
    pub segment_timeline: Option<SegmentTimeline>,
    /// the `BitstreamSwitching` child
    pub bitstream_switching: Option<UrlType>,
}
impl MultipleSegmentBase {
    /// The declared start number, or the schema default of `1`
    pub fn start_number(&self) -> u32 {
        self.start_number.unwrap_or(1)
    }
}

/// A `SegmentTimeline` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentTimeline {
    /// the `S` children, in document order
    pub segments: Vec<TimelineSegment>,
}

/// One `S` element of a `SegmentTimeline`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSegment {
    /// start time in timescale units; when absent, the segment follows on from the previous one
    pub t: Option<u64>,
    /// duration in timescale units
    pub d: u64,
    /// number of further segments with the same duration; negative means "until the next `S`
    /// element, or the end of the period"
    pub r: i64,
}

/// A `SegmentList` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentList {
    /// attributes shared with `SegmentTemplate`
    pub multiple: MultipleSegmentBase,
    /// the `SegmentURL` children, one per segment
    pub segment_urls: Vec<SegmentUrl>,
}

/// A `SegmentURL` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentUrl {
    /// URL of the media segment; absent means the BaseURL itself
    pub media: Option<String>,
    /// bytes of the media segment within `media`
    pub media_range: Option<ByteRange>,
    /// URL of the segment's index
    pub index: Option<String>,
    /// bytes of the index within `index`
    pub index_range: Option<ByteRange>,
}

/// A `SegmentTemplate` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentTemplate {
    /// attributes shared with `SegmentList`
    pub multiple: MultipleSegmentBase,
    /// template for media segment URLs
    pub media: Option<String>,
    /// template for index segment URLs
    pub index: Option<String>,
    /// template for the initialization segment URL
    pub initialization: Option<String>,
    /// template for the bitstream switching segment URL
    pub bitstream_switching: Option<String>,
}

/// The `scanType` of video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    Progressive,
    Interlaced,
    Unknown,
}
impl ScanType {
    pub(crate) fn parse(s: &str) -> Option<ScanType> {
        match s.trim() {
            "progressive" => Some(ScanType::Progressive),
            "interlaced" => Some(ScanType::Interlaced),
            "unknown" => Some(ScanType::Unknown),
            _ => None,
        }
    }
}

/// Attributes and elements common to `AdaptationSet`, `Representation` and `SubRepresentation`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepresentationBase {
    /// profiles the media conforms to, narrowing the manifest's
    pub profiles: Option<String>,
    /// horizontal resolution in pixels
    pub width: Option<u32>,
    /// vertical resolution in pixels
    pub height: Option<u32>,
    /// sample aspect ratio
    pub sar: Option<Ratio>,
    /// frames per second, possibly fractional
    pub frame_rate: Option<Ratio>,
    /// a single rate, or a `"min max"` pair, in Hz
    pub audio_sampling_rate: Option<String>,
    pub mime_type: Option<String>,
    /// profiles the segments conform to
    pub segment_profiles: Option<String>,
    /// RFC 6381 codec strings
    pub codecs: Option<String>,
    /// longest interval between stream access points, in seconds
    pub maximum_sap_period: Option<f64>,
    /// the SAP type every segment starts with
    pub start_with_sap: Option<SapType>,
    /// fastest trick-mode playout rate
    pub max_playout_rate: Option<f64>,
    /// whether any access unit depends on others for decoding
    pub coding_dependency: Option<bool>,
    pub scan_type: Option<ScanType>,
    /// `FramePacking` descriptors for stereoscopic video
    pub frame_packing: Vec<DescriptorType>,
    /// `AudioChannelConfiguration` descriptors
    pub audio_channel_configuration: Vec<DescriptorType>,
    /// `ContentProtection` descriptors naming DRM schemes
    pub content_protection: Vec<DescriptorType>,
}

/// An `AdaptationSet` element, a group of interchangeable representations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdaptationSet {
    pub id: Option<u32>,
    /// sets in the same group are alternatives; at most one plays at a time
    pub group: Option<u32>,
    pub lang: Option<String>,
    /// `contentType`, such as `video` or `audio`
    pub content_type: Option<String>,
    /// picture aspect ratio
    pub par: Option<Ratio>,
    /// lowest `bandwidth` of any representation in the set
    pub min_bandwidth: Option<u32>,
    /// highest `bandwidth` of any representation in the set
    pub max_bandwidth: Option<u32>,
    /// smallest `width` of any representation in the set
    pub min_width: Option<u32>,
    /// largest `width` of any representation in the set
    pub max_width: Option<u32>,
    /// smallest `height` of any representation in the set
    pub min_height: Option<u32>,
    /// largest `height` of any representation in the set
    pub max_height: Option<u32>,
    /// lowest `frameRate` of any representation in the set
    pub min_frame_rate: Option<Ratio>,
    /// highest `frameRate` of any representation in the set
    pub max_frame_rate: Option<Ratio>,
    /// whether segments of different representations line up
    pub segment_alignment: Option<ConditionalUint>,
    /// whether subsegments of different representations line up
    pub subsegment_alignment: Option<ConditionalUint>,
    /// the SAP type every subsegment starts with
    pub subsegment_starts_with_sap: Option<SapType>,
    /// whether representations can be switched without reinitializing the decoder
    pub bitstream_switching: Option<bool>,
    /// attributes shared with `Representation`
    pub representation_base: RepresentationBase,
    pub accessibility: Vec<DescriptorType>,
    pub role: Vec<DescriptorType>,
    pub rating: Vec<DescriptorType>,
    pub viewpoint: Vec<DescriptorType>,
    pub content_components: Vec<ContentComponent>,
    pub base_urls: Vec<BaseUrl>,
    /// segment information inherited by each representation
    pub segment_base: Option<SegmentBase>,
    /// inherited like `segment_base`
    pub segment_list: Option<SegmentList>,
    /// inherited like `segment_base`
    pub segment_template: Option<SegmentTemplate>,
    pub representations: Vec<Representation>,
}

/// A `ContentComponent` element, one media component of a multiplexed set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentComponent {
    pub id: Option<u32>,
    pub lang: Option<String>,
    /// `contentType`, such as `video` or `audio`
    pub content_type: Option<String>,
    /// picture aspect ratio
    pub par: Option<Ratio>,
    pub accessibility: Vec<DescriptorType>,
    pub role: Vec<DescriptorType>,
    pub rating: Vec<DescriptorType>,
    pub viewpoint: Vec<DescriptorType>,
}

/// A `Representation` element, one encoding of the adaptation set's content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Representation {
    /// substituted for `$RepresentationID$` in templates
    pub id: Option<String>,
    /// bits per second needed to play without stalling
    pub bandwidth: Option<u32>,
    /// lower values are higher quality
    pub quality_ranking: Option<u32>,
    /// ids of the representations this one depends on for decoding
    pub dependency_id: Vec<String>,
    /// `mediaStreamStructureId`
    pub media_stream_structure_id: Vec<String>,
    /// attributes shared with `AdaptationSet`
    pub representation_base: RepresentationBase,
    pub base_urls: Vec<BaseUrl>,
    pub sub_representations: Vec<SubRepresentation>,
    /// replaces any `SegmentBase` of the enclosing levels
    pub segment_base: Option<SegmentBase>,
    /// replaces any `SegmentList` of the enclosing levels
    pub segment_list: Option<SegmentList>,
    /// replaces any `SegmentTemplate` of the enclosing levels
    pub segment_template: Option<SegmentTemplate>,
}

/// A `SubRepresentation` element, a subset of the representation such as a trick-mode layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubRepresentation {
    /// the sub-representation's level within the segment index
    pub level: Option<u32>,
    /// levels this one depends on
    pub dependency_level: Vec<u32>,
    /// bits per second needed to play without stalling
    pub bandwidth: Option<u32>,
    /// ids of the content components this sub-representation carries
    pub content_component: Vec<String>,
    /// attributes shared with `Representation`
    pub representation_base: RepresentationBase,
}

/// The tree levels that may carry segment information: `Period`, `AdaptationSet` and
/// `Representation`.
///
/// A level that declares its own `SegmentBase`, `SegmentList` or `SegmentTemplate` replaces
/// whatever an enclosing level declared; fields are never merged between levels.
pub trait SegmentInfo {
    fn base_urls(&self) -> &[BaseUrl];
    fn segment_base(&self) -> Option<&SegmentBase>;
    fn segment_list(&self) -> Option<&SegmentList>;
    fn segment_template(&self) -> Option<&SegmentTemplate>;
}
macro_rules! segment_info {
    ($t:ty) => {
        impl SegmentInfo for $t {
            fn base_urls(&self) -> &[BaseUrl] {
                &self.base_urls
            }
            fn segment_base(&self) -> Option<&SegmentBase> {
                self.segment_base.as_ref()
            }
            fn segment_list(&self) -> Option<&SegmentList> {
                self.segment_list.as_ref()
            }
            fn segment_template(&self) -> Option<&SegmentTemplate> {
                self.segment_template.as_ref()
            }
        }
    };
}
segment_info!(Period);
segment_info!(AdaptationSet);
segment_info!(Representation);

/// Find the value of `slot` on the innermost level that has one.  `levels` is ordered innermost
/// first.
pub fn nearest<'a, T: ?Sized + 'a>(
    levels: &[&'a dyn SegmentInfo],
    slot: impl Fn(&'a dyn SegmentInfo) -> Option<&'a T>,
) -> Option<&'a T> {
    levels.iter().find_map(|&level| slot(level))
}

/// How the segments of a representation are addressed, after inheritance is resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentAddressing<'a> {
    /// the whole representation is one segment, optionally with a `SegmentBase` describing its
    /// initialization and index
    Single(Option<&'a SegmentBase>),
    /// an explicit list of segment URLs
    List(&'a SegmentList),
    /// segment URLs built from a template
    Template(&'a SegmentTemplate),
}
impl<'a> SegmentAddressing<'a> {
    /// Resolve the addressing for levels ordered innermost first.  A `SegmentList` anywhere takes
    /// precedence over a `SegmentTemplate`, which takes precedence over a `SegmentBase`.
    pub fn resolve(levels: &[&'a dyn SegmentInfo]) -> SegmentAddressing<'a> {
        if let Some(list) = nearest(levels, |l| l.segment_list()) {
            SegmentAddressing::List(list)
        } else if let Some(template) = nearest(levels, |l| l.segment_template()) {
            SegmentAddressing::Template(template)
        } else {
            SegmentAddressing::Single(nearest(levels, |l| l.segment_base()))
        }
    }

    /// The `SegmentBase` fields in effect: timescale, presentation time offset, initialization
    /// and index
    pub fn segment_base(&self) -> Option<&'a SegmentBase> {
        match *self {
            SegmentAddressing::Single(base) => base,
            SegmentAddressing::List(list) => Some(&list.multiple.segment_base),
            SegmentAddressing::Template(template) => Some(&template.multiple.segment_base),
        }
    }

    /// The fields shared by lists and templates, if segments are addressed that way
    pub fn multiple(&self) -> Option<&'a MultipleSegmentBase> {
        match *self {
            SegmentAddressing::Single(_) => None,
            SegmentAddressing::List(list) => Some(&list.multiple),
            SegmentAddressing::Template(template) => Some(&template.multiple),
        }
    }

    pub fn timescale(&self) -> u32 {
        self.segment_base().map_or(1, SegmentBase::timescale)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn profiles() {
        let mpd = Mpd {
            profiles: Some(
                "urn:mpeg:dash:profile:isoff-live:2011,urn:mpeg:dash:profile:isoff-on-demand:2011"
                    .to_string(),
            ),
            ..Mpd::default()
        };
        assert!(mpd.has_profile("urn:mpeg:dash:profile:isoff-on-demand:2011"));
        assert!(!mpd.has_profile("urn:mpeg:dash:profile:isoff-main:2011"));
        assert!(!Mpd::default().has_profile("urn:mpeg:dash:profile:isoff-live:2011"));
    }

    #[test]
    fn defaults() {
        let base = SegmentBase::default();
        assert_eq!(base.timescale(), 1);
        let base = SegmentBase {
            timescale: Some(0),
            ..SegmentBase::default()
        };
        assert_eq!(base.timescale(), 1);
        assert_eq!(MultipleSegmentBase::default().start_number(), 1);
        assert!(!Mpd::default().is_live());
    }

    #[test]
    fn nearest_level_overrides() {
        let period = Period {
            segment_base: Some(SegmentBase {
                timescale: Some(10),
                presentation_time_offset: Some(5),
                ..SegmentBase::default()
            }),
            ..Period::default()
        };
        let adaptation_set = AdaptationSet {
            segment_base: Some(SegmentBase {
                timescale: Some(100),
                ..SegmentBase::default()
            }),
            ..AdaptationSet::default()
        };
        let representation = Representation::default();
        let levels: [&dyn SegmentInfo; 3] = [&representation, &adaptation_set, &period];
        let base = nearest(&levels, |l| l.segment_base()).unwrap();
        assert_eq!(base.timescale, Some(100));
        // no merge of the period's fields into the adaptation set's
        assert_eq!(base.presentation_time_offset, None);
    }

    #[test]
    fn representation_overrides_adaptation_set() {
        let period = Period::default();
        let adaptation_set = AdaptationSet {
            segment_base: Some(SegmentBase {
                timescale: Some(100),
                presentation_time_offset: Some(5),
                ..SegmentBase::default()
            }),
            ..AdaptationSet::default()
        };
        let representation = Representation {
            segment_base: Some(SegmentBase {
                timescale: Some(1000),
                ..SegmentBase::default()
            }),
            ..Representation::default()
        };
        let levels: [&dyn SegmentInfo; 3] = [&representation, &adaptation_set, &period];
        let addressing = SegmentAddressing::resolve(&levels);
        assert_eq!(addressing.timescale(), 1000);
        let base = addressing.segment_base().unwrap();
        assert_eq!(base.presentation_time_offset, None);
        assert_eq!(
            nearest(&levels, |l| l.segment_base()).unwrap().timescale,
            Some(1000)
        );

        // without its own SegmentBase the representation inherits the set's
        let bare = Representation::default();
        let levels: [&dyn SegmentInfo; 3] = [&bare, &adaptation_set, &period];
        let addressing = SegmentAddressing::resolve(&levels);
        assert_eq!(addressing.timescale(), 100);
        assert_eq!(addressing.segment_base().unwrap().presentation_time_offset, Some(5));
    }

    #[test]
    fn list_beats_template() {
        let period = Period {
            segment_template: Some(SegmentTemplate::default()),
            ..Period::default()
        };
        let representation = Representation {
            segment_base: Some(SegmentBase::default()),
            ..Representation::default()
        };
        let adaptation_set = AdaptationSet {
            segment_list: Some(SegmentList::default()),
            ..AdaptationSet::default()
        };
        let levels: [&dyn SegmentInfo; 3] = [&representation, &adaptation_set, &period];
        assert!(matches!(
            SegmentAddressing::resolve(&levels),
            SegmentAddressing::List(_)
        ));
        let levels: [&dyn SegmentInfo; 2] = [&representation, &period];
        assert!(matches!(
            SegmentAddressing::resolve(&levels),
            SegmentAddressing::Template(_)
        ));
        let levels: [&dyn SegmentInfo; 1] = [&representation];
        assert!(matches!(
            SegmentAddressing::resolve(&levels),
            SegmentAddressing::Single(Some(_))
        ));
    }
}
