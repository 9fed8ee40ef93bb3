//! Builds the manifest tree from the element tree.
//!
//! Elements are matched by local name at each level, and unknown elements and attributes are
//! skipped so that manifests using later editions of the schema still load.

use super::attr::{get, ByteRange};
use super::model::*;
use super::xml::{parse_document, Element};
use super::MpdError;
use log::{debug, warn};

impl Mpd {
    /// Parse a manifest document.
    ///
    /// Fails only if the XML is malformed or the root element is not `MPD`.  Attribute values that
    /// cannot be parsed are logged and left unset.
    pub fn parse(xml: &str) -> Result<Mpd, MpdError> {
        let root = parse_document(xml)?;
        if root.name != "MPD" {
            return Err(MpdError::UnexpectedRoot(root.name));
        }
        Ok(mpd(&root))
    }
}

fn mpd(el: &Element) -> Mpd {
    let presentation_type = match el.attr("type").map(str::trim) {
        None | Some("static") => PresentationType::Static,
        Some("dynamic") => PresentationType::Dynamic,
        Some(other) => {
            warn!("unknown MPD type {:?}, assuming static", other);
            PresentationType::Static
        }
    };
    if el.attr("xmlns").is_none() {
        debug!("MPD has no default namespace declaration");
    }
    Mpd {
        default_namespace: get(el, "xmlns"),
        namespace_xsi: get(el, "xmlns:xsi"),
        namespace_ext: get(el, "xmlns:ext"),
        schema_location: get(el, "schemaLocation").or_else(|| get(el, "xsi:schemaLocation")),
        id: get(el, "id"),
        profiles: get(el, "profiles"),
        presentation_type,
        availability_start_time: get(el, "availabilityStartTime"),
        availability_end_time: get(el, "availabilityEndTime"),
        media_presentation_duration: get(el, "mediaPresentationDuration"),
        minimum_update_period: get(el, "minimumUpdatePeriod"),
        min_buffer_time: get(el, "minBufferTime"),
        time_shift_buffer_depth: get(el, "timeShiftBufferDepth"),
        suggested_presentation_delay: get(el, "suggestedPresentationDelay"),
        max_segment_duration: get(el, "maxSegmentDuration"),
        max_subsegment_duration: get(el, "maxSubsegmentDuration"),
        base_urls: base_urls(el),
        locations: el
            .children_named("Location")
            .map(|l| l.trimmed_text().to_string())
            .collect(),
        program_information: el
            .children_named("ProgramInformation")
            .map(program_information)
            .collect(),
        periods: el.children_named("Period").map(period).collect(),
        metrics: el.children_named("Metrics").map(metrics).collect(),
    }
}

fn text_of(el: &Element, name: &str) -> Option<String> {
    el.child(name).map(|c| c.trimmed_text().to_string())
}

fn program_information(el: &Element) -> ProgramInformation {
    ProgramInformation {
        lang: get(el, "lang"),
        more_information_url: get(el, "moreInformationURL"),
        title: text_of(el, "Title"),
        source: text_of(el, "Source"),
        copyright: text_of(el, "Copyright"),
    }
}

fn base_urls(el: &Element) -> Vec<BaseUrl> {
    el.children_named("BaseURL")
        .map(|b| BaseUrl {
            url: b.trimmed_text().to_string(),
            service_location: get(b, "serviceLocation"),
            byte_range: get(b, "byteRange"),
        })
        .collect()
}

fn descriptors(el: &Element, name: &str) -> Vec<DescriptorType> {
    el.children_named(name)
        .map(|d| DescriptorType {
            scheme_id_uri: get(d, "schemeIdUri"),
            value: get(d, "value"),
        })
        .collect()
}

fn metrics(el: &Element) -> Metrics {
    Metrics {
        metrics: get(el, "metrics"),
        ranges: el
            .children_named("Range")
            .map(|r| MetricsRange {
                starttime: get(r, "starttime"),
                duration: get(r, "duration"),
            })
            .collect(),
        reporting: descriptors(el, "Reporting"),
    }
}

fn period(el: &Element) -> Period {
    Period {
        id: get(el, "id"),
        start: get(el, "start"),
        duration: get(el, "duration"),
        bitstream_switching: get(el, "bitstreamSwitching"),
        base_urls: base_urls(el),
        segment_base: el.child("SegmentBase").map(segment_base),
        segment_list: el.child("SegmentList").map(segment_list),
        segment_template: el.child("SegmentTemplate").map(segment_template),
        adaptation_sets: el
            .children_named("AdaptationSet")
            .map(adaptation_set)
            .collect(),
        subsets: el
            .children_named("Subset")
            .map(|s| Subset {
                contains: get(s, "contains").unwrap_or_default(),
            })
            .collect(),
    }
}

fn url_type(el: &Element) -> UrlType {
    UrlType {
        source_url: get(el, "sourceURL"),
        range: get::<ByteRange>(el, "range"),
    }
}

fn segment_base(el: &Element) -> SegmentBase {
    SegmentBase {
        timescale: get(el, "timescale"),
        presentation_time_offset: get(el, "presentationTimeOffset"),
        index_range: get(el, "indexRange"),
        index_range_exact: get(el, "indexRangeExact"),
        initialization: el
            .child("Initialization")
            .or_else(|| el.child("Initialisation"))
            .map(url_type),
        representation_index: el.child("RepresentationIndex").map(url_type),
    }
}

fn multiple_segment_base(el: &Element) -> MultipleSegmentBase {
    MultipleSegmentBase {
        segment_base: segment_base(el),
        duration: get(el, "duration"),
        start_number: get(el, "startNumber"),
        segment_timeline: el.child("SegmentTimeline").map(segment_timeline),
        bitstream_switching: el.child("BitstreamSwitching").map(url_type),
    }
}

fn segment_timeline(el: &Element) -> SegmentTimeline {
    let segments = el
        .children_named("S")
        .filter_map(|s| {
            let d = get(s, "d");
            if d.is_none() {
                warn!("ignoring <S> without a duration");
            }
            Some(TimelineSegment {
                t: get(s, "t"),
                d: d?,
                r: get::<i64>(s, "r").unwrap_or(0),
            })
        })
        .collect();
    SegmentTimeline { segments }
}

fn segment_list(el: &Element) -> SegmentList {
    SegmentList {
        multiple: multiple_segment_base(el),
        segment_urls: el
            .children_named("SegmentURL")
            .map(|u| SegmentUrl {
                media: get(u, "media"),
                media_range: get(u, "mediaRange"),
                index: get(u, "index"),
                index_range: get(u, "indexRange"),
            })
            .collect(),
    }
}

fn segment_template(el: &Element) -> SegmentTemplate {
    SegmentTemplate {
        multiple: multiple_segment_base(el),
        media: get(el, "media"),
        index: get(el, "index"),
        initialization: get(el, "initialization"),
        bitstream_switching: get(el, "bitstreamSwitching"),
    }
}

fn representation_base(el: &Element) -> RepresentationBase {
    RepresentationBase {
        profiles: get(el, "profiles"),
        width: get(el, "width"),
        height: get(el, "height"),
        sar: get(el, "sar"),
        frame_rate: get(el, "frameRate"),
        audio_sampling_rate: get(el, "audioSamplingRate"),
        mime_type: get(el, "mimeType"),
        segment_profiles: get(el, "segmentProfiles"),
        codecs: get(el, "codecs"),
        maximum_sap_period: get(el, "maximumSAPPeriod"),
        start_with_sap: get(el, "startWithSAP"),
        max_playout_rate: get(el, "maxPlayoutRate"),
        coding_dependency: get(el, "codingDependency"),
        scan_type: el.attr("scanType").and_then(|s| {
            let scan_type = ScanType::parse(s);
            if scan_type.is_none() {
                warn!("ignoring unknown scanType {:?}", s);
            }
            scan_type
        }),
        frame_packing: descriptors(el, "FramePacking"),
        audio_channel_configuration: descriptors(el, "AudioChannelConfiguration"),
        content_protection: descriptors(el, "ContentProtection"),
    }
}

fn adaptation_set(el: &Element) -> AdaptationSet {
    AdaptationSet {
        id: get(el, "id"),
        group: get(el, "group"),
        lang: get(el, "lang"),
        content_type: get(el, "contentType"),
        par: get(el, "par"),
        min_bandwidth: get(el, "minBandwidth"),
        max_bandwidth: get(el, "maxBandwidth"),
        min_width: get(el, "minWidth"),
        max_width: get(el, "maxWidth"),
        min_height: get(el, "minHeight"),
        max_height: get(el, "maxHeight"),
        min_frame_rate: get(el, "minFrameRate"),
        max_frame_rate: get(el, "maxFrameRate"),
        segment_alignment: get(el, "segmentAlignment"),
        subsegment_alignment: get(el, "subsegmentAlignment"),
        subsegment_starts_with_sap: get(el, "subsegmentStartsWithSAP"),
        bitstream_switching: get(el, "bitstreamSwitching"),
        representation_base: representation_base(el),
        accessibility: descriptors(el, "Accessibility"),
        role: descriptors(el, "Role"),
        rating: descriptors(el, "Rating"),
        viewpoint: descriptors(el, "Viewpoint"),
        content_components: el
            .children_named("ContentComponent")
            .map(content_component)
            .collect(),
        base_urls: base_urls(el),
        segment_base: el.child("SegmentBase").map(segment_base),
        segment_list: el.child("SegmentList").map(segment_list),
        segment_template: el.child("SegmentTemplate").map(segment_template),
        representations: el
            .children_named("Representation")
            .map(representation)
            .collect(),
    }
}

fn content_component(el: &Element) -> ContentComponent {
    ContentComponent {
        id: get(el, "id"),
        lang: get(el, "lang"),
        content_type: get(el, "contentType"),
        par: get(el, "par"),
        accessibility: descriptors(el, "Accessibility"),
        role: descriptors(el, "Role"),
        rating: descriptors(el, "Rating"),
        viewpoint: descriptors(el, "Viewpoint"),
    }
}

fn representation(el: &Element) -> Representation {
    Representation {
        id: get(el, "id"),
        bandwidth: get(el, "bandwidth"),
        quality_ranking: get(el, "qualityRanking"),
        dependency_id: get(el, "dependencyId").unwrap_or_default(),
        media_stream_structure_id: get(el, "mediaStreamStructureId").unwrap_or_default(),
        representation_base: representation_base(el),
        base_urls: base_urls(el),
        sub_representations: el
            .children_named("SubRepresentation")
            .map(|s| SubRepresentation {
                level: get(s, "level"),
                dependency_level: get(s, "dependencyLevel").unwrap_or_default(),
                bandwidth: get(s, "bandwidth"),
                content_component: get(s, "contentComponent").unwrap_or_default(),
                representation_base: representation_base(s),
            })
            .collect(),
        segment_base: el.child("SegmentBase").map(segment_base),
        segment_list: el.child("SegmentList").map(segment_list),
        segment_template: el.child("SegmentTemplate").map(segment_template),
    }
}
