//! Bounds on the occupancy of the multiplex buffer, used by re-multiplexers.

use super::{descriptor_len, read_u16, DescriptorError};
use std::fmt;

/// The `multiplex_buffer_utilization_descriptor`, tag `0x0c`.
pub struct MultiplexBufferUtilizationDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> MultiplexBufferUtilizationDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a
    /// `MultiplexBufferUtilizationDescriptor`.
    pub const TAG: u8 = 0x0c;
    /// Construct a `MultiplexBufferUtilizationDescriptor` instance that will parse the data from
    /// the given slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<MultiplexBufferUtilizationDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(MultiplexBufferUtilizationDescriptor { buf })
    }

    /// The two bound fields carry meaningful values
    pub fn bound_valid_flag(&self) -> bool {
        self.buf[0] & 0b1000_0000 != 0
    }
    /// 15-bit lower bound of the buffer occupancy, in units of 1/27 MHz packet durations
    pub fn ltw_offset_lower_bound(&self) -> u16 {
        read_u16(self.buf) & 0x7fff
    }
    /// 15-bit upper bound of the buffer occupancy
    pub fn ltw_offset_upper_bound(&self) -> u16 {
        read_u16(&self.buf[2..]) & 0x7fff
    }
}
super::typed_descriptor!(MultiplexBufferUtilizationDescriptor);

impl fmt::Debug for MultiplexBufferUtilizationDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiplexBufferUtilizationDescriptor")
            .field("bound_valid_flag", &self.bound_valid_flag())
            .field("ltw_offset_lower_bound", &self.ltw_offset_lower_bound())
            .field("ltw_offset_upper_bound", &self.ltw_offset_upper_bound())
            .finish()
    }
}
