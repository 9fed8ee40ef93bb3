//! Descriptors provide metadata about an element of a Transport Stream.
//!
//! For example, a descriptor may be used to specify the language of an audio track.  Use of
//! specific descriptors is often not mandatory (many streams do not describe the language of their
//! audio).
//!
//! On the wire a descriptor is a _tag-length-value_ record: one tag byte, one length byte, then
//! `length` bytes of payload.  A list of descriptors is just such records laid end to end, and
//! [`parse_descriptors()`](fn.parse_descriptors.html) splits a buffer into owned
//! [`Descriptor`](struct.Descriptor.html) values.  The fields of well known descriptor kinds can
//! then be read by borrowing a typed view,
//!
//! ```
//! # use mpegts_dash::descriptor::{parse_descriptors, find_descriptor};
//! # use mpegts_dash::descriptor::registration::RegistrationDescriptor;
//! let data = [0x05, 0x04, b'C', b'U', b'E', b'I'];
//! let descriptors = parse_descriptors(&data).unwrap();
//! let desc = find_descriptor(&descriptors, RegistrationDescriptor::TAG).unwrap();
//! let reg = desc.parse_as::<RegistrationDescriptor>().unwrap();
//! assert_eq!(reg.format_identifier(), 0x43554549);
//! ```
//!
//! # Extensions
//!
//! Descriptors are a point of extension, with a range of descriptor types defined by the core
//! standard, and further descriptor types defined by standards based upon transport streams.
//! Calling code can define its own views by implementing [`TypedDescriptor`](trait.TypedDescriptor.html),
//! or its own enumeration of supported kinds using the `descriptor_enum!{}` macro.

pub mod audio_stream;
pub mod avcvideo;
pub mod ca;
pub mod content_labeling;
pub mod copyright;
pub mod data_stream_alignment;
pub mod hierarchy;
pub mod ibp;
pub mod iso_639_language;
pub mod max_bitrate;
pub mod metadata;
pub mod multiplex_buffer_utilization;
pub mod private_data_indicator;
pub mod registration;
pub mod smoothing_buffer;
pub mod std_descriptor;
pub mod system_clock;
pub mod video_stream;
pub mod video_window;

use self::audio_stream::AudioStreamDescriptor;
use self::avcvideo::AvcVideoDescriptor;
use self::ca::CaDescriptor;
use self::content_labeling::ContentLabelingDescriptor;
use self::copyright::CopyrightDescriptor;
use self::data_stream_alignment::DataStreamAlignmentDescriptor;
use self::hierarchy::HierarchyDescriptor;
use self::ibp::IbpDescriptor;
use self::iso_639_language::Iso639LanguageDescriptor;
use self::max_bitrate::MaximumBitrateDescriptor;
use self::metadata::{MetadataDescriptor, MetadataPointerDescriptor, MetadataStdDescriptor};
use self::multiplex_buffer_utilization::MultiplexBufferUtilizationDescriptor;
use self::private_data_indicator::PrivateDataIndicatorDescriptor;
use self::registration::RegistrationDescriptor;
use self::smoothing_buffer::SmoothingBufferDescriptor;
use self::std_descriptor::StdDescriptor;
use self::system_clock::SystemClockDescriptor;
use self::video_stream::VideoStreamDescriptor;
use self::video_window::{TargetBackgroundGridDescriptor, VideoWindowDescriptor};
use std::fmt;

/// Tag value signalling that the descriptor carries a `descriptor_tag_extension` byte
/// immediately after the length byte.
pub const EXTENSION_TAG: u8 = 0x7f;
/// _AC-3 audio stream_ descriptor tag, from the user-private range.
pub const AC3_AUDIO_STREAM_TAG: u8 = 0x81;
/// _Logical channel_ descriptor tag defined by the UK DTG D-Book.
pub const DTG_LOGICAL_CHANNEL_TAG: u8 = 0x83;

/// A single descriptor, holding its own copy of the header and payload bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Descriptor {
    tag: u8,
    tag_extension: Option<u8>,
    length: u8,
    data: Vec<u8>,
}
impl Descriptor {
    fn header_size(tag: u8) -> usize {
        if tag == EXTENSION_TAG {
            3
        } else {
            2
        }
    }

    /// Builds a descriptor with the given tag and payload.
    pub fn from_custom(tag: u8, payload: &[u8]) -> Result<Descriptor, DescriptorError> {
        if tag == EXTENSION_TAG {
            return Err(DescriptorError::UnhandledTagValue(tag));
        }
        let length = payload_length(payload.len(), 0)?;
        let mut data = Vec::with_capacity(payload.len() + 2);
        data.push(tag);
        data.push(length);
        data.extend_from_slice(payload);
        Ok(Descriptor {
            tag,
            tag_extension: None,
            length,
            data,
        })
    }

    /// Builds a descriptor carrying a `descriptor_tag_extension`.  The extension byte is counted in
    /// the length value written on the wire, but not in the value returned by `length()`.
    pub fn from_custom_with_extension(
        tag: u8,
        tag_extension: u8,
        payload: &[u8],
    ) -> Result<Descriptor, DescriptorError> {
        let wire_length = payload_length(payload.len(), 1)?;
        let mut data = Vec::with_capacity(payload.len() + 3);
        data.push(tag);
        data.push(wire_length);
        data.push(tag_extension);
        data.extend_from_slice(payload);
        Ok(Descriptor {
            tag,
            tag_extension: Some(tag_extension),
            length: wire_length - 1,
            data,
        })
    }

    /// Builds a _registration_descriptor_ for the given format identifier.
    pub fn from_registration(
        format_identifier: u32,
        additional_identification_info: &[u8],
    ) -> Result<Descriptor, DescriptorError> {
        let mut payload = Vec::with_capacity(4 + additional_identification_info.len());
        payload.extend_from_slice(&format_identifier.to_be_bytes());
        payload.extend_from_slice(additional_identification_info);
        Descriptor::from_custom(RegistrationDescriptor::TAG, &payload)
    }

    /// Builds a _registration_descriptor_ from a four character code, such as `"CUEI"`.
    pub fn from_registration_str(
        format_identifier: &str,
        additional_identification_info: &[u8],
    ) -> Result<Descriptor, DescriptorError> {
        let bytes = format_identifier.as_bytes();
        if bytes.len() != 4 {
            return Err(DescriptorError::NotEnoughData {
                tag: RegistrationDescriptor::TAG,
                actual: bytes.len(),
                expected: 4,
            });
        }
        let id = u32::from(bytes[0]) << 24
            | u32::from(bytes[1]) << 16
            | u32::from(bytes[2]) << 8
            | u32::from(bytes[3]);
        Descriptor::from_registration(id, additional_identification_info)
    }

    /// The `descriptor_tag` value
    pub fn tag(&self) -> u8 {
        self.tag
    }
    /// The `descriptor_tag_extension`, present only when `tag()` is `0x7f`
    pub fn tag_extension(&self) -> Option<u8> {
        self.tag_extension
    }
    /// Number of payload bytes following the header
    pub fn length(&self) -> u8 {
        self.length
    }
    /// The complete descriptor, header included, exactly as it appears on the wire
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// Alias of `data()`, for symmetry with `serialize_descriptors()`
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    /// The payload bytes, excluding the 2 (or 3) header bytes
    pub fn payload(&self) -> &[u8] {
        &self.data[Self::header_size(self.tag)..]
    }

    /// Borrow a typed view of this descriptor, checking that the tag matches and that the payload
    /// meets the minimum size for that kind of descriptor.
    pub fn parse_as<'buf, T>(&'buf self) -> Result<T, DescriptorError>
    where
        T: TypedDescriptor<'buf>,
    {
        if self.tag != T::TAG {
            return Err(DescriptorError::UnexpectedTag {
                expected: T::TAG,
                actual: self.tag,
            });
        }
        T::new(self.tag, self.payload())
    }

    /// Decode this descriptor into one of the kinds known to this crate.
    pub fn parse_core(&self) -> Result<CoreDescriptors<'_>, DescriptorError> {
        CoreDescriptors::from_bytes(&self.data)
    }
}
impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut s = f.debug_struct("Descriptor");
        s.field("tag", &self.tag);
        if let Some(ext) = self.tag_extension {
            s.field("tag_extension", &ext);
        }
        s.field("length", &self.length).finish()
    }
}

fn payload_length(payload_len: usize, extra: usize) -> Result<u8, DescriptorError> {
    let len = payload_len + extra;
    if len > usize::from(u8::MAX) {
        Err(DescriptorError::PayloadTooLong { len })
    } else {
        Ok(len as u8)
    }
}

/// Split the given buffer into descriptors.
///
/// The records must exactly tile the buffer: if any record's length would take it past the end
/// of the buffer, or a partial header is left over at the end, the whole parse fails and no
/// descriptors are returned.
pub fn parse_descriptors(buf: &[u8]) -> Result<Vec<Descriptor>, DescriptorError> {
    let mut result = Vec::new();
    let mut pos = 0;
    while pos < buf.len() {
        let remaining = buf.len() - pos;
        if remaining < 2 {
            return Err(DescriptorError::BufferTooShort { buflen: remaining });
        }
        let tag = buf[pos];
        let wire_length = buf[pos + 1];
        let len = usize::from(wire_length);
        if len > remaining - 2 {
            return Err(DescriptorError::NotEnoughData {
                tag,
                actual: remaining - 2,
                expected: len,
            });
        }
        let data = buf[pos..pos + 2 + len].to_vec();
        let desc = if tag == EXTENSION_TAG {
            if len == 0 {
                return Err(DescriptorError::NotEnoughData {
                    tag,
                    actual: 0,
                    expected: 1,
                });
            }
            Descriptor {
                tag,
                tag_extension: Some(data[2]),
                length: wire_length - 1,
                data,
            }
        } else {
            Descriptor {
                tag,
                tag_extension: None,
                length: wire_length,
                data,
            }
        };
        result.push(desc);
        pos += 2 + len;
    }
    Ok(result)
}

/// Returns the first descriptor with the given tag.  Several descriptors may share a tag, so
/// callers wanting all of them should iterate the slice themselves.
pub fn find_descriptor(descriptors: &[Descriptor], tag: u8) -> Option<&Descriptor> {
    descriptors.iter().find(|d| d.tag == tag)
}

/// Returns the first extension descriptor with the given `descriptor_tag_extension`.
pub fn find_extension_descriptor(
    descriptors: &[Descriptor],
    tag_extension: u8,
) -> Option<&Descriptor> {
    descriptors
        .iter()
        .find(|d| d.tag == EXTENSION_TAG && d.tag_extension == Some(tag_extension))
}

/// Concatenates the wire form of each descriptor, producing a buffer that
/// `parse_descriptors()` will turn back into the same list.
pub fn serialize_descriptors(descriptors: &[Descriptor]) -> Vec<u8> {
    let size = descriptors.iter().map(|d| d.data.len()).sum();
    let mut out = Vec::with_capacity(size);
    for d in descriptors {
        out.extend_from_slice(&d.data);
    }
    out
}

/// A borrowed view over the payload of one particular kind of descriptor.
///
/// The views in this crate also expose `TAG` and `new()` as inherent items, which is what
/// `descriptor_enum!{}` calls.
pub trait TypedDescriptor<'buf>: Sized {
    /// The `descriptor_tag` value identifying this kind of descriptor
    const TAG: u8;
    /// Wrap the given payload, failing if it is too short for this kind of descriptor.
    fn new(tag: u8, payload: &'buf [u8]) -> Result<Self, DescriptorError>;
}

/// Trait allowing users of this crate to supply their own enumeration of supported descriptor
/// kinds, built with the `descriptor_enum!{}` macro.
pub trait ParseDescriptor<'buf>: Sized {
    /// Decode a descriptor from a buffer that starts with the tag and length bytes.
    fn from_bytes(buf: &'buf [u8]) -> Result<Self, DescriptorError>;
}

/// Builds an enum with one variant per kind of descriptor, and an implementation of
/// `ParseDescriptor` that dispatches on the tag value.
///
/// ```
/// # #[macro_use] extern crate mpegts_dash;
/// # use mpegts_dash::descriptor::UnknownDescriptor;
/// # use mpegts_dash::descriptor::registration::RegistrationDescriptor;
/// descriptor_enum! {
///     #[derive(Debug)]
///     MyDescriptors {
///         Registration 5 => RegistrationDescriptor,
///         Other 0..=4|6..=255 => UnknownDescriptor,
///     }
/// }
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! descriptor_enum {
    (
        $(#[$outer:meta])*
        $name:ident {
            $(
                $(#[$inner:ident $($args:tt)*])*
                $case_name:ident $($tags:pat_param)|* => $t:ident
            ),*,
        }
    ) => {
        $(#[$outer])*
        pub enum $name<'buf> {
            $(
                $(#[$inner $($args)*])*
                $case_name($t<'buf>),
            )*
        }
        impl<'buf> $crate::descriptor::ParseDescriptor<'buf> for $name<'buf> {
            fn from_bytes(buf: &'buf[u8]) -> Result<Self, $crate::descriptor::DescriptorError> {
                if buf.len() <  2 {
                    return Err($crate::descriptor::DescriptorError::BufferTooShort{ buflen: buf.len() })
                }
                let tag = buf[0];
                let len = buf[1] as usize;
                let tag_end = len + 2;
                if tag_end > buf.len() {
                    return Err($crate::descriptor::DescriptorError::TagTooLongForBuffer{ taglen: len, buflen: buf.len() })
                }
                let payload = &buf[2..tag_end];
                match tag {
                    $( $( $tags )|* => Ok($name::$case_name($t::new(tag, payload)?)), )*
                    #[allow(unreachable_patterns)]
                    _ => Err($crate::descriptor::DescriptorError::UnhandledTagValue(tag)),
                }
            }
        }
    }
}

/// Catch-all type for when there is no explicit handling for the given descriptor type.
pub struct UnknownDescriptor<'buf> {
    /// the tag byte value
    pub tag: u8,
    /// the payload bytes
    pub payload: &'buf [u8],
}
impl<'buf> UnknownDescriptor<'buf> {
    /// Constructor, in the form required for use with `descriptor_enum!{}`.
    pub fn new(tag: u8, payload: &'buf [u8]) -> Result<UnknownDescriptor<'buf>, DescriptorError> {
        Ok(UnknownDescriptor { tag, payload })
    }
}
impl fmt::Debug for UnknownDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("UnknownDescriptor")
            .field("tag", &self.tag)
            .field("len", &self.payload.len())
            .finish()
    }
}

descriptor_enum! {
    /// Default implementation covering the descriptor types from _ISO/IEC 13818-1_ that this crate
    /// has views for.
    #[derive(Debug)]
    CoreDescriptors {
        /// descriptor tag values `0`, `1` and `57` to `63` inclusive are marked as reserved by _ISO/IEC 13818-1_.
        Reserved 0|1|57..=63 => UnknownDescriptor,
        /// The `video_stream_descriptor`
        VideoStream 2 => VideoStreamDescriptor,
        /// The `audio_stream_descriptor`
        AudioStream 3 => AudioStreamDescriptor,
        /// The `hierarchy_descriptor`
        Hierarchy 4 => HierarchyDescriptor,
        /// The `registration_descriptor`
        Registration 5 => RegistrationDescriptor,
        /// The `data_stream_alignment_descriptor`
        DataStreamAlignment 6 => DataStreamAlignmentDescriptor,
        /// The `target_background_grid_descriptor`
        TargetBackgroundGrid 7 => TargetBackgroundGridDescriptor,
        /// The `video_window_descriptor`
        VideoWindow 8 => VideoWindowDescriptor,
        /// The `CA_descriptor`
        CA 9 => CaDescriptor,
        /// The `ISO_639_language_descriptor`
        ISO639Language 10 => Iso639LanguageDescriptor,
        /// The `system_clock_descriptor`
        SystemClock 11 => SystemClockDescriptor,
        /// The `multiplex_buffer_utilization_descriptor`
        MultiplexBufferUtilization 12 => MultiplexBufferUtilizationDescriptor,
        /// The `copyright_descriptor`
        Copyright 13 => CopyrightDescriptor,
        /// The `maximum_bitrate_descriptor`
        MaximumBitrate 14 => MaximumBitrateDescriptor,
        /// The `private_data_indicator_descriptor`
        PrivateDataIndicator 15 => PrivateDataIndicatorDescriptor,
        /// The `smoothing_buffer_descriptor`
        SmoothingBuffer 16 => SmoothingBufferDescriptor,
        /// The `STD_descriptor`
        STD 17 => StdDescriptor,
        /// The `ibp_descriptor`
        IBP 18 => IbpDescriptor,
        /// descriptor tag values `19` to `26` inclusive are defined by _ISO/IEC 13818-6_ (DSM-CC)
        IsoIec13818dash6 19..=26 => UnknownDescriptor,
        /// `27` to `35` inclusive cover the MPEG-4 and FlexMux family of descriptors
        Mpeg4 27..=35 => UnknownDescriptor,
        /// The `content_labeling_descriptor`
        ContentLabeling 36 => ContentLabelingDescriptor,
        /// The `metadata_pointer_descriptor`
        MetadataPointer 37 => MetadataPointerDescriptor,
        /// The `metadata_descriptor`
        Metadata 38 => MetadataDescriptor,
        /// The `metadata_STD_descriptor`
        MetadataStd 39 => MetadataStdDescriptor,
        /// The `AVC_video_descriptor`
        AvcVideo 40 => AvcVideoDescriptor,
        /// descriptor tag values `41` to `56` inclusive are later additions to _ISO/IEC 13818-1_
        Other13818 41..=56 => UnknownDescriptor,
        /// descriptor tag values `64` to `255` inclusive are marked for 'use private' by _ISO/IEC 13818-1_.
        UserPrivate 64..=255 => UnknownDescriptor,
    }
}

macro_rules! typed_descriptor {
    ($t:ident) => {
        impl<'buf> $crate::descriptor::TypedDescriptor<'buf> for $t<'buf> {
            const TAG: u8 = $t::TAG;
            fn new(tag: u8, payload: &'buf [u8]) -> Result<Self, $crate::descriptor::DescriptorError> {
                $t::new(tag, payload)
            }
        }
    };
}
pub(crate) use typed_descriptor;

/// Checks that the descriptor payload is at least `expected` bytes long.
pub(crate) fn descriptor_len(buf: &[u8], tag: u8, expected: usize) -> Result<(), DescriptorError> {
    if buf.len() < expected {
        Err(DescriptorError::NotEnoughData {
            tag,
            actual: buf.len(),
            expected,
        })
    } else {
        Ok(())
    }
}

/// Reads a 22-bit value packed into the low bits of three bytes, as used for several rate and
/// size fields.
pub(crate) fn read_22bit(buf: &[u8]) -> u32 {
    u32::from(buf[0] & 0b0011_1111) << 16 | u32::from(buf[1]) << 8 | u32::from(buf[2])
}

pub(crate) fn read_u16(buf: &[u8]) -> u16 {
    u16::from(buf[0]) << 8 | u16::from(buf[1])
}

pub(crate) fn read_u32(buf: &[u8]) -> u32 {
    u32::from(buf[0]) << 24 | u32::from(buf[1]) << 16 | u32::from(buf[2]) << 8 | u32::from(buf[3])
}

/// An error during parsing of a descriptor
#[derive(Debug, PartialEq, Eq)]
pub enum DescriptorError {
    /// The amount of data available in the buffer is not enough to hold the descriptor's fields
    NotEnoughData {
        /// the tag-type of the descriptor which we tried to parse
        tag: u8,
        /// the actual buffer size in bytes
        actual: usize,
        /// the expected buffer size in bytes
        expected: usize,
    },
    /// The length specified in the descriptor's header is longer than the amount of data
    /// available to hold the descriptor
    TagTooLongForBuffer {
        /// The tag-length value
        taglen: usize,
        /// the size of the buffer
        buflen: usize,
    },
    /// The buffer is too short to even hold the two bytes of generic descriptor header data
    BufferTooShort {
        /// the actual buffer length
        buflen: usize,
    },
    /// There is no mapping defined for the given descriptor tag value
    UnhandledTagValue(u8),
    /// A typed view was requested for a descriptor with a different tag
    UnexpectedTag {
        /// tag of the requested view
        expected: u8,
        /// tag of the descriptor
        actual: u8,
    },
    /// The payload given to a builder will not fit into the 8-bit length field
    PayloadTooLong {
        /// the payload length, including any `descriptor_tag_extension` byte
        len: usize,
    },
}
impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::NotEnoughData {
                tag,
                actual,
                expected,
            } => write!(
                f,
                "descriptor tag {:#04x} needs {} bytes, only {} available",
                tag, expected, actual
            ),
            DescriptorError::TagTooLongForBuffer { taglen, buflen } => write!(
                f,
                "descriptor length {} exceeds buffer of {} bytes",
                taglen, buflen
            ),
            DescriptorError::BufferTooShort { buflen } => {
                write!(f, "{} bytes is too short for a descriptor header", buflen)
            }
            DescriptorError::UnhandledTagValue(tag) => {
                write!(f, "no handling for descriptor tag {:#04x}", tag)
            }
            DescriptorError::UnexpectedTag { expected, actual } => write!(
                f,
                "expected descriptor tag {:#04x}, found {:#04x}",
                expected, actual
            ),
            DescriptorError::PayloadTooLong { len } => {
                write!(f, "descriptor payload of {} bytes is too long", len)
            }
        }
    }
}
impl std::error::Error for DescriptorError {}
