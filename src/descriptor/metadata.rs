//! Descriptors associating a metadata service with content: where the metadata is carried
//! (`metadata_pointer_descriptor`), what it contains (`metadata_descriptor`) and the buffer model
//! of the metadata decoder (`metadata_STD_descriptor`).

use super::{descriptor_len, read_22bit, read_u16, read_u32, DescriptorError};
use std::fmt;

const FORMAT_IDENTIFIER_FOLLOWS: u8 = 0xff;
const APPLICATION_FORMAT_IDENTIFIER_FOLLOWS: u16 = 0xffff;

/// Byte offsets of the optional fields shared by the pointer and metadata descriptors.
#[derive(Clone, Copy)]
struct Layout {
    format: usize,
    service_id: usize,
}
impl Layout {
    fn of(tag: u8, buf: &[u8]) -> Result<Layout, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        let format = if read_u16(buf) == APPLICATION_FORMAT_IDENTIFIER_FOLLOWS {
            6
        } else {
            2
        };
        descriptor_len(buf, tag, format + 1)?;
        let service_id = if buf[format] == FORMAT_IDENTIFIER_FOLLOWS {
            format + 5
        } else {
            format + 1
        };
        descriptor_len(buf, tag, service_id + 1)?;
        Ok(Layout { format, service_id })
    }
}

macro_rules! metadata_fields {
    ($t:ident) => {
        impl<'buf> $t<'buf> {
            /// The `metadata_application_format` value
            pub fn application_format(&self) -> u16 {
                read_u16(self.buf)
            }
            /// Present only when `application_format()` is `0xffff`
            pub fn application_format_identifier(&self) -> Option<u32> {
                if self.layout.format == 6 {
                    Some(read_u32(&self.buf[2..]))
                } else {
                    None
                }
            }
            /// The `metadata_format` value
            pub fn format(&self) -> u8 {
                self.buf[self.layout.format]
            }
            /// Present only when `format()` is `0xff`
            pub fn format_identifier(&self) -> Option<u32> {
                if self.format() == FORMAT_IDENTIFIER_FOLLOWS {
                    Some(read_u32(&self.buf[self.layout.format + 1..]))
                } else {
                    None
                }
            }
            /// The `metadata_service_id` value
            pub fn service_id(&self) -> u8 {
                self.buf[self.layout.service_id]
            }
            /// Bytes following `service_id`, whose interpretation depends on flags not decoded
            /// here
            pub fn remainder(&self) -> &'buf [u8] {
                &self.buf[self.layout.service_id + 1..]
            }
        }
        impl fmt::Debug for $t<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($t))
                    .field("application_format", &self.application_format())
                    .field(
                        "application_format_identifier",
                        &self.application_format_identifier(),
                    )
                    .field("format", &self.format())
                    .field("format_identifier", &self.format_identifier())
                    .field("service_id", &self.service_id())
                    .finish()
            }
        }
    };
}

/// The `metadata_pointer_descriptor`, tag `0x25`.
pub struct MetadataPointerDescriptor<'buf> {
    buf: &'buf [u8],
    layout: Layout,
}
impl<'buf> MetadataPointerDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `MetadataPointerDescriptor`.
    pub const TAG: u8 = 0x25;
    /// Construct a `MetadataPointerDescriptor`, checking that every field implied by the format
    /// values is present.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<MetadataPointerDescriptor<'buf>, DescriptorError> {
        let layout = Layout::of(tag, buf)?;
        Ok(MetadataPointerDescriptor { buf, layout })
    }
}
metadata_fields!(MetadataPointerDescriptor);
super::typed_descriptor!(MetadataPointerDescriptor);

/// The `metadata_descriptor`, tag `0x26`.
pub struct MetadataDescriptor<'buf> {
    buf: &'buf [u8],
    layout: Layout,
}
impl<'buf> MetadataDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `MetadataDescriptor`.
    pub const TAG: u8 = 0x26;
    /// Construct a `MetadataDescriptor`, checking that every field implied by the format values
    /// is present.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<MetadataDescriptor<'buf>, DescriptorError> {
        let layout = Layout::of(tag, buf)?;
        Ok(MetadataDescriptor { buf, layout })
    }
}
metadata_fields!(MetadataDescriptor);
super::typed_descriptor!(MetadataDescriptor);

/// The `metadata_STD_descriptor`, tag `0x27`.
pub struct MetadataStdDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> MetadataStdDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `MetadataStdDescriptor`.
    pub const TAG: u8 = 0x27;
    /// Construct a `MetadataStdDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<MetadataStdDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 9)?;
        Ok(MetadataStdDescriptor { buf })
    }

    /// 22-bit input leak rate, in units of 400 bits per second
    pub fn metadata_input_leak_rate(&self) -> u32 {
        read_22bit(self.buf)
    }
    /// 22-bit buffer size, in units of 1024 bytes
    pub fn metadata_buffer_size(&self) -> u32 {
        read_22bit(&self.buf[3..])
    }
    /// 22-bit output leak rate, in units of 400 bits per second
    pub fn metadata_output_leak_rate(&self) -> u32 {
        read_22bit(&self.buf[6..])
    }
}
super::typed_descriptor!(MetadataStdDescriptor);

impl fmt::Debug for MetadataStdDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataStdDescriptor")
            .field("metadata_input_leak_rate", &self.metadata_input_leak_rate())
            .field("metadata_buffer_size", &self.metadata_buffer_size())
            .field("metadata_output_leak_rate", &self.metadata_output_leak_rate())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor, DescriptorError};
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::*;

    #[test]
    fn pointer_short_form() {
        let desc = Descriptor::from_custom(0x25, &hex!("01010307aa")).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::MetadataPointer(p)) => {
            assert_eq!(p.application_format(), 0x0101);
            assert_eq!(p.application_format_identifier(), None);
            assert_eq!(p.format(), 3);
            assert_eq!(p.format_identifier(), None);
            assert_eq!(p.service_id(), 7);
            assert_eq!(p.remainder(), &[0xaa][..]);
            assert!(!format!("{:?}", p).is_empty());
        });
    }

    #[test]
    fn metadata_with_identifiers() {
        let desc =
            Descriptor::from_custom(0x26, &hex!("ffff49443320ff4944332001")).unwrap();
        let m = desc.parse_as::<MetadataDescriptor>().unwrap();
        assert_eq!(m.application_format_identifier(), Some(0x49443320));
        assert_eq!(m.format(), 0xff);
        assert_eq!(m.format_identifier(), Some(0x49443320));
        assert_eq!(m.service_id(), 1);
        assert!(m.remainder().is_empty());
    }

    #[test]
    fn metadata_missing_service_id() {
        let desc = Descriptor::from_custom(0x26, &hex!("ffff4944332001")).unwrap();
        assert_matches!(
            desc.parse_as::<MetadataDescriptor>(),
            Err(DescriptorError::NotEnoughData { tag: 0x26, actual: 7, expected: 8 })
        );
    }

    #[test]
    fn metadata_std() {
        let desc = Descriptor::from_custom(0x27, &hex!("c00001c00002ffffff")).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::MetadataStd(s)) => {
            assert_eq!(s.metadata_input_leak_rate(), 1);
            assert_eq!(s.metadata_buffer_size(), 2);
            assert_eq!(s.metadata_output_leak_rate(), 0x3fffff);
        });
    }
}
