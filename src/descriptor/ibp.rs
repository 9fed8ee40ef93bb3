//! Describes the I, P and B picture structure of an MPEG-2 video stream.

use super::{descriptor_len, read_u16, DescriptorError};
use std::fmt;

/// The `ibp_descriptor`, tag `0x12`.
pub struct IbpDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> IbpDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as an `IbpDescriptor`.
    pub const TAG: u8 = 0x12;
    /// Construct an `IbpDescriptor` instance that will parse the data from the given slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<IbpDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 2)?;
        Ok(IbpDescriptor { buf })
    }

    /// Every group of pictures is closed
    pub fn closed_gop_flag(&self) -> bool {
        self.buf[0] & 0b1000_0000 != 0
    }
    /// The number of P and B pictures between I pictures is the same throughout
    pub fn identical_gop_flag(&self) -> bool {
        self.buf[0] & 0b0100_0000 != 0
    }
    /// 14-bit maximum number of pictures between any two consecutive I pictures
    pub fn max_gop_length(&self) -> u16 {
        read_u16(self.buf) & 0x3fff
    }
}
super::typed_descriptor!(IbpDescriptor);

impl fmt::Debug for IbpDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbpDescriptor")
            .field("closed_gop_flag", &self.closed_gop_flag())
            .field("identical_gop_flag", &self.identical_gop_flag())
            .field("max_gop_length", &self.max_gop_length())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use assert_matches::assert_matches;

    #[test]
    fn descriptor() {
        let desc = Descriptor::from_custom(0x12, &[0b1000_0000, 12]).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::IBP(ibp)) => {
            assert!(ibp.closed_gop_flag());
            assert!(!ibp.identical_gop_flag());
            assert_eq!(ibp.max_gop_length(), 12);
        });
    }
}
