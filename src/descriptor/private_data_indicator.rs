//! Marks the stream as carrying a particular kind of private data.

use super::{descriptor_len, read_u32, DescriptorError};
use std::fmt;

/// The `private_data_indicator_descriptor`, tag `0x0f`.
pub struct PrivateDataIndicatorDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> PrivateDataIndicatorDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a
    /// `PrivateDataIndicatorDescriptor`.
    pub const TAG: u8 = 0x0f;
    /// Construct a `PrivateDataIndicatorDescriptor` instance that will parse the data from the
    /// given slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<PrivateDataIndicatorDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(PrivateDataIndicatorDescriptor { buf })
    }

    /// The private data indicator value
    pub fn private_data_indicator(&self) -> u32 {
        read_u32(self.buf)
    }
}
super::typed_descriptor!(PrivateDataIndicatorDescriptor);

impl fmt::Debug for PrivateDataIndicatorDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateDataIndicatorDescriptor")
            .field(
                "private_data_indicator",
                &format_args!("{:#010x}", self.private_data_indicator()),
            )
            .finish()
    }
}
