//! Identifies the conditional access system used to scramble a program or elementary stream, and
//! the PID carrying its ECM or EMM messages.

use super::{descriptor_len, read_u16, DescriptorError};
use std::fmt;

/// The `CA_descriptor`, tag `0x09`.
pub struct CaDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> CaDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `CaDescriptor`.
    pub const TAG: u8 = 0x09;
    /// Construct a `CaDescriptor` instance that will parse the data from the given slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<CaDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(CaDescriptor { buf })
    }

    /// Identifier of the conditional access system
    pub fn ca_system_id(&self) -> u16 {
        read_u16(self.buf)
    }
    /// The 13-bit PID of packets carrying ECM or EMM data for this CA system
    pub fn ca_pid(&self) -> u16 {
        read_u16(&self.buf[2..]) & 0x1fff
    }
    /// CA system specific data following the PID
    pub fn private_data(&self) -> &[u8] {
        &self.buf[4..]
    }
}
super::typed_descriptor!(CaDescriptor);

impl fmt::Debug for CaDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaDescriptor")
            .field("ca_system_id", &format_args!("{:#06x}", self.ca_system_id()))
            .field("ca_pid", &self.ca_pid())
            .field("private_data", &format!("{:x?}", self.private_data()))
            .finish()
    }
}
