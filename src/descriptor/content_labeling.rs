//! Labels content so that it may be referenced by associated metadata.

use super::{descriptor_len, read_u16, read_u32, DescriptorError};
use std::fmt;

/// `metadata_application_format` value meaning a 32-bit identifier follows
pub const APPLICATION_FORMAT_IDENTIFIER_FOLLOWS: u16 = 0xffff;

/// The `content_labeling_descriptor`, tag `0x24`.
pub struct ContentLabelingDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> ContentLabelingDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `ContentLabelingDescriptor`.
    pub const TAG: u8 = 0x24;
    /// Construct a `ContentLabelingDescriptor` instance that will parse the data from the given
    /// slice.  When the application format is `0xffff` the payload must also hold the 4-byte
    /// application format identifier.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<ContentLabelingDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 2)?;
        if read_u16(buf) == APPLICATION_FORMAT_IDENTIFIER_FOLLOWS {
            descriptor_len(buf, tag, 6)?;
        }
        Ok(ContentLabelingDescriptor { buf })
    }

    /// The `metadata_application_format` value
    pub fn application_format(&self) -> u16 {
        read_u16(self.buf)
    }
    /// The `metadata_application_format_identifier`, present only when `application_format()` is
    /// `0xffff`
    pub fn application_format_identifier(&self) -> Option<u32> {
        if self.application_format() == APPLICATION_FORMAT_IDENTIFIER_FOLLOWS {
            Some(read_u32(&self.buf[2..]))
        } else {
            None
        }
    }
}
super::typed_descriptor!(ContentLabelingDescriptor);

impl fmt::Debug for ContentLabelingDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentLabelingDescriptor")
            .field("application_format", &self.application_format())
            .field(
                "application_format_identifier",
                &self.application_format_identifier(),
            )
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor, DescriptorError};
    use assert_matches::assert_matches;
    use hex_literal::*;

    #[test]
    fn plain_format() {
        let desc = Descriptor::from_custom(0x24, &hex!("0010")).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::ContentLabeling(c)) => {
            assert_eq!(c.application_format(), 0x10);
            assert_eq!(c.application_format_identifier(), None);
        });
    }

    #[test]
    fn format_identifier() {
        let desc = Descriptor::from_custom(0x24, &hex!("ffff49443320")).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::ContentLabeling(c)) => {
            assert_eq!(c.application_format_identifier(), Some(0x49443320));
        });
    }

    #[test]
    fn missing_format_identifier() {
        let desc = Descriptor::from_custom(0x24, &hex!("ffff4944")).unwrap();
        assert_matches!(
            desc.parse_core(),
            Err(DescriptorError::NotEnoughData { tag: 0x24, actual: 4, expected: 6 })
        );
    }
}
