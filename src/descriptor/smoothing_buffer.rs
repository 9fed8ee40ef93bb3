//! Size and leak rate of the smoothing buffer associated with a program or elementary stream.

use super::{descriptor_len, read_22bit, DescriptorError};
use std::fmt;

/// The `smoothing_buffer_descriptor`, tag `0x10`.
pub struct SmoothingBufferDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> SmoothingBufferDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `SmoothingBufferDescriptor`.
    pub const TAG: u8 = 0x10;
    /// Construct a `SmoothingBufferDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<SmoothingBufferDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 6)?;
        Ok(SmoothingBufferDescriptor { buf })
    }

    /// 22-bit leak rate out of the buffer, in units of 400 bits per second
    pub fn sb_leak_rate(&self) -> u32 {
        read_22bit(self.buf)
    }
    /// 22-bit buffer size, in bytes
    pub fn sb_size(&self) -> u32 {
        read_22bit(&self.buf[3..])
    }
}
super::typed_descriptor!(SmoothingBufferDescriptor);

impl fmt::Debug for SmoothingBufferDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothingBufferDescriptor")
            .field("sb_leak_rate", &self.sb_leak_rate())
            .field("sb_size", &self.sb_size())
            .finish()
    }
}
