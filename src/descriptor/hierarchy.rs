//! Identifies the layers of hierarchically coded (scalable) video, audio and private streams.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `hierarchy_descriptor`, tag `0x04`.
pub struct HierarchyDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> HierarchyDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `HierarchyDescriptor`.
    pub const TAG: u8 = 0x04;
    /// Construct a `HierarchyDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<HierarchyDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(HierarchyDescriptor { buf })
    }

    /// 4-bit `hierarchy_type`, e.g. spatial, SNR or temporal scalability
    pub fn hierarchy_type(&self) -> u8 {
        self.buf[0] & 0b0000_1111
    }
    /// Unique index of this layer within the program
    pub fn hierarchy_layer_index(&self) -> u8 {
        self.buf[1] & 0b0011_1111
    }
    /// Index of the layer that must be decoded before this one
    pub fn hierarchy_embedded_layer_index(&self) -> u8 {
        self.buf[2] & 0b0011_1111
    }
    /// Intended transmission channel number
    pub fn hierarchy_channel(&self) -> u8 {
        self.buf[3] & 0b0011_1111
    }
}
super::typed_descriptor!(HierarchyDescriptor);

impl fmt::Debug for HierarchyDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyDescriptor")
            .field("hierarchy_type", &self.hierarchy_type())
            .field("hierarchy_layer_index", &self.hierarchy_layer_index())
            .field(
                "hierarchy_embedded_layer_index",
                &self.hierarchy_embedded_layer_index(),
            )
            .field("hierarchy_channel", &self.hierarchy_channel())
            .finish()
    }
}
