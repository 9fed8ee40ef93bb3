//! Describes the kind of alignment between PES packet starts and access units (or other syntax
//! elements) in the associated elementary stream.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `data_stream_alignment_descriptor`, tag `0x06`.
pub struct DataStreamAlignmentDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> DataStreamAlignmentDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a
    /// `DataStreamAlignmentDescriptor`.
    pub const TAG: u8 = 0x06;
    /// Construct a `DataStreamAlignmentDescriptor` instance that will parse the data from the
    /// given slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<DataStreamAlignmentDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 1)?;
        Ok(DataStreamAlignmentDescriptor { buf })
    }

    /// The `alignment_type` value, whose meaning depends on the stream type.  For video, `1` means
    /// slice or access unit alignment and `2` means video access unit alignment.
    pub fn alignment_type(&self) -> u8 {
        self.buf[0]
    }
}
super::typed_descriptor!(DataStreamAlignmentDescriptor);

impl fmt::Debug for DataStreamAlignmentDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStreamAlignmentDescriptor")
            .field("alignment_type", &self.alignment_type())
            .finish()
    }
}
