//! Identifies a copyright registration for the material.

use super::{descriptor_len, read_u32, DescriptorError};
use std::fmt;

/// The `copyright_descriptor`, tag `0x0d`.
pub struct CopyrightDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> CopyrightDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `CopyrightDescriptor`.
    pub const TAG: u8 = 0x0d;
    /// Construct a `CopyrightDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<CopyrightDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(CopyrightDescriptor { buf })
    }

    /// Identifier of the copyright registration authority
    pub fn copyright_identifier(&self) -> u32 {
        read_u32(self.buf)
    }
    /// Authority specific data following the identifier
    pub fn additional_copyright_info(&self) -> &[u8] {
        &self.buf[4..]
    }
}
super::typed_descriptor!(CopyrightDescriptor);

impl fmt::Debug for CopyrightDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyrightDescriptor")
            .field("copyright_identifier", &self.copyright_identifier())
            .field(
                "additional_copyright_info",
                &format!("{:x?}", self.additional_copyright_info()),
            )
            .finish()
    }
}
