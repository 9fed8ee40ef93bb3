//! Describes the maximum bitrate of the stream to which this descriptor is attached, including
//! transport overheads.
//!
//! May be attached to an elementary stream, indicating the max bitrate of that elementary stream,
//! or to the program as a whole.

use super::{descriptor_len, read_22bit, DescriptorError};
use std::fmt;

/// Describes the max bitrate of an elementary stream or a whole program.
pub struct MaximumBitrateDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> MaximumBitrateDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `MaximumBitrateDescriptor`.
    pub const TAG: u8 = 14;
    /// Construct a `MaximumBitrateDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<MaximumBitrateDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 3)?;
        Ok(MaximumBitrateDescriptor { buf })
    }

    /// The maximum bitrate expressed in units of 50 bytes per second
    pub fn maximum_bitrate(&self) -> u32 {
        read_22bit(self.buf)
    }

    /// Converts the result of `maximum_bitrate()` into bits-per-second.
    pub fn maximum_bits_per_second(&self) -> u64 {
        crate::clock::mux_rate_to_bits_per_second(self.maximum_bitrate())
    }
}
super::typed_descriptor!(MaximumBitrateDescriptor);

impl fmt::Debug for MaximumBitrateDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaximumBitrateDescriptor")
            .field("maximum_bitrate", &self.maximum_bitrate())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{parse_descriptors, CoreDescriptors};
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::*;

    #[test]
    fn descriptor() {
        let data = hex!("0e03c00184");
        let descs = parse_descriptors(&data[..]).unwrap();
        assert_matches!(descs[0].parse_core(), Ok(CoreDescriptors::MaximumBitrate(max_bitrate)) => {
            assert_eq!(max_bitrate.maximum_bitrate(), 388);
            assert_eq!(max_bitrate.maximum_bits_per_second(), 155200);
            assert!(!format!("{:?}", max_bitrate).is_empty());
        });
    }

    #[test]
    fn short_payload() {
        assert!(MaximumBitrateDescriptor::new(14, &[0xc0, 0x01]).is_err());
    }
}
