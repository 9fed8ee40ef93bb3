//! Copies of the AVC _profile_ and _level_ signalled in the stream's Sequence Parameter Set, plus
//! flags advertising use of some optional AVC features.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `AVC_video_descriptor`, tag `0x28`.
pub struct AvcVideoDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> AvcVideoDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as an `AvcVideoDescriptor`.
    pub const TAG: u8 = 0x28;
    /// Construct an `AvcVideoDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<AvcVideoDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(AvcVideoDescriptor { buf })
    }

    /// The AVC _profile_ used in this stream will be equal to, or lower than, this value
    pub fn profile_idc(&self) -> u8 {
        self.buf[0]
    }
    /// Value of `constraint_set<n>_flag` from the SPS, for `n` in `0..=5`.  Out of range values of
    /// `n` give `false`.
    pub fn constraint_set_flag(&self, n: u8) -> bool {
        n <= 5 && self.buf[1] & (0b1000_0000 >> n) != 0
    }
    /// The two `AVC_compatible_flags` bits from the SPS
    pub fn avc_compatible_flags(&self) -> u8 {
        self.buf[1] & 0b0000_0011
    }
    /// The AVC _level_ used in this stream will be equal to, or lower than, this value
    pub fn level_idc(&self) -> u8 {
        self.buf[2]
    }
    /// Stream may include AVC still pictures
    pub fn avc_still_present(&self) -> bool {
        self.buf[3] & 0b1000_0000 != 0
    }
    /// Stream may contain AVC 24-hour pictures
    pub fn avc_24_hour_picture_flag(&self) -> bool {
        self.buf[3] & 0b0100_0000 != 0
    }
    /// If false, _frame packing arrangement_ or _stereo video information_ SEI messages should be
    /// present
    pub fn frame_packing_sei_not_present_flag(&self) -> bool {
        self.buf[3] & 0b0010_0000 != 0
    }
}
super::typed_descriptor!(AvcVideoDescriptor);

impl fmt::Debug for AvcVideoDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let constraints: Vec<u8> = (0..=5).filter(|n| self.constraint_set_flag(*n)).collect();
        f.debug_struct("AvcVideoDescriptor")
            .field("profile_idc", &self.profile_idc())
            .field("constraint_sets", &constraints)
            .field("level_idc", &self.level_idc())
            .field("avc_still_present", &self.avc_still_present())
            .field("avc_24_hour_picture_flag", &self.avc_24_hour_picture_flag())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use assert_matches::assert_matches;
    use hex_literal::*;

    #[test]
    fn descriptor() {
        let desc = Descriptor::from_custom(0x28, &hex!("4d401f3f")).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::AvcVideo(avc)) => {
            assert_eq!(avc.profile_idc(), 77);
            assert!(!avc.constraint_set_flag(0));
            assert!(avc.constraint_set_flag(1));
            assert!(!avc.constraint_set_flag(6));
            assert_eq!(avc.avc_compatible_flags(), 0);
            assert_eq!(avc.level_idc(), 31);
            assert!(!avc.avc_still_present());
            assert!(!avc.avc_24_hour_picture_flag());
            assert!(avc.frame_packing_sei_not_present_flag());
            assert!(!format!("{:?}", avc).is_empty());
        });
    }
}
