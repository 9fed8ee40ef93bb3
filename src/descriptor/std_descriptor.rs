//! Signals the leak method of the transport buffer for video streams.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `STD_descriptor`, tag `0x11`.
pub struct StdDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> StdDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `StdDescriptor`.
    pub const TAG: u8 = 0x11;
    /// Construct a `StdDescriptor` instance that will parse the data from the given slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<StdDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 1)?;
        Ok(StdDescriptor { buf })
    }

    /// If true the transport buffer uses the leak method, otherwise the vbv_delay method
    pub fn leak_valid_flag(&self) -> bool {
        self.buf[0] & 0b0000_0001 != 0
    }
}
super::typed_descriptor!(StdDescriptor);

impl fmt::Debug for StdDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdDescriptor")
            .field("leak_valid_flag", &self.leak_valid_flag())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use assert_matches::assert_matches;

    #[test]
    fn descriptor() {
        let desc = Descriptor::from_custom(0x11, &[0xff]).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::STD(s)) => {
            assert!(s.leak_valid_flag());
        });
        let desc = Descriptor::from_custom(0x11, &[0xfe]).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::STD(s)) => {
            assert!(!s.leak_valid_flag());
        });
    }
}
