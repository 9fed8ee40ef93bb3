//! Registration descriptor indicates which kind of syntax any 'private data' within the transport
//! stream will be following

use super::{descriptor_len, read_u32, DescriptorError};
use std::fmt;

/// Indicates which kind of syntax any 'private data' within the transport stream will be following
pub struct RegistrationDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> RegistrationDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `RegistrationDescriptor`.
    pub const TAG: u8 = 5;
    /// Construct a `RegistrationDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<RegistrationDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(RegistrationDescriptor { buf })
    }

    /// Format identifier value assigned by a _Registration Authority_, often four ASCII
    /// characters such as `CUEI`.
    pub fn format_identifier(&self) -> u32 {
        read_u32(self.buf)
    }

    /// The format identifier as text, if all four bytes are printable ASCII.
    pub fn format_identifier_str(&self) -> Option<&str> {
        let id = &self.buf[..4];
        if id.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            std::str::from_utf8(id).ok()
        } else {
            None
        }
    }

    /// borrows a slice of additional_identification_info bytes, whose meaning is defined by
    /// the identifier returned by `format_identifier()`.
    pub fn additional_identification_info(&self) -> &[u8] {
        &self.buf[4..]
    }
}
super::typed_descriptor!(RegistrationDescriptor);

impl fmt::Debug for RegistrationDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("RegistrationDescriptor")
            .field("format_identifier", &self.format_identifier_str())
            .field(
                "additional_identification_info",
                &format!("{:x?}", self.additional_identification_info()),
            )
            .finish()
    }
}
