//! Conveys the accuracy of the system clock used to generate timestamps.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `system_clock_descriptor`, tag `0x0b`.
pub struct SystemClockDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> SystemClockDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `SystemClockDescriptor`.
    pub const TAG: u8 = 0x0b;
    /// Construct a `SystemClockDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<SystemClockDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 2)?;
        Ok(SystemClockDescriptor { buf })
    }

    /// The clock is derived from an external reference
    pub fn external_clock_reference_indicator(&self) -> bool {
        self.buf[0] & 0b1000_0000 != 0
    }
    /// 6-bit integer part of the accuracy
    pub fn clock_accuracy_integer(&self) -> u8 {
        self.buf[0] & 0b0011_1111
    }
    /// 3-bit exponent part of the accuracy
    pub fn clock_accuracy_exponent(&self) -> u8 {
        (self.buf[1] & 0b1110_0000) >> 5
    }
}
super::typed_descriptor!(SystemClockDescriptor);

impl fmt::Debug for SystemClockDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClockDescriptor")
            .field(
                "external_clock_reference_indicator",
                &self.external_clock_reference_indicator(),
            )
            .field("clock_accuracy_integer", &self.clock_accuracy_integer())
            .field("clock_accuracy_exponent", &self.clock_accuracy_exponent())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor, DescriptorError};
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn descriptor() {
        let desc = Descriptor::from_custom(0x0b, &[0b1010_0001, 0b0101_1111]).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::SystemClock(c)) => {
            assert!(c.external_clock_reference_indicator());
            assert_eq!(c.clock_accuracy_integer(), 0x21);
            assert_eq!(c.clock_accuracy_exponent(), 2);
        });
    }

    #[test]
    fn one_byte_rejected() {
        assert_matches!(
            SystemClockDescriptor::new(0x0b, &[0x80]),
            Err(DescriptorError::NotEnoughData { tag: 0x0b, actual: 1, expected: 2 })
        );
    }
}
