//! Coding parameters of an MPEG-1 or MPEG-2 video elementary stream.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `video_stream_descriptor`, tag `0x02`.
pub struct VideoStreamDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> VideoStreamDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `VideoStreamDescriptor`.
    pub const TAG: u8 = 0x02;
    /// Construct a `VideoStreamDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<VideoStreamDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 1)?;
        Ok(VideoStreamDescriptor { buf })
    }

    /// More than one frame rate may be present in the stream
    pub fn multiple_frame_rate_flag(&self) -> bool {
        self.buf[0] & 0b1000_0000 != 0
    }
    /// 4-bit `frame_rate_code` as defined by _ISO/IEC 13818-2_
    pub fn frame_rate_code(&self) -> u8 {
        (self.buf[0] & 0b0111_1000) >> 3
    }
    /// Stream contains only _ISO/IEC 11172-2_ (MPEG-1) data
    pub fn mpeg_1_only_flag(&self) -> bool {
        self.buf[0] & 0b0000_0100 != 0
    }
    /// Stream uses only constrained parameters
    pub fn constrained_parameter_flag(&self) -> bool {
        self.buf[0] & 0b0000_0010 != 0
    }
    /// Stream may contain still pictures
    pub fn still_picture_flag(&self) -> bool {
        self.buf[0] & 0b0000_0001 != 0
    }

    fn mpeg2_fields(&self) -> Option<&[u8]> {
        if self.mpeg_1_only_flag() && self.buf.len() >= 3 {
            Some(&self.buf[1..3])
        } else {
            None
        }
    }
    /// `profile_and_level_indication`, present only when `mpeg_1_only_flag()` is set and the
    /// descriptor carries the extra two bytes
    pub fn profile_and_level_indication(&self) -> Option<u8> {
        self.mpeg2_fields().map(|f| f[0])
    }
    /// 2-bit `chroma_format`, present under the same conditions as
    /// `profile_and_level_indication()`
    pub fn chroma_format(&self) -> Option<u8> {
        self.mpeg2_fields().map(|f| (f[1] & 0b1100_0000) >> 6)
    }
    /// `frame_rate_extension_flag`, present under the same conditions as
    /// `profile_and_level_indication()`
    pub fn frame_rate_extension_flag(&self) -> Option<bool> {
        self.mpeg2_fields().map(|f| f[1] & 0b0010_0000 != 0)
    }
}
super::typed_descriptor!(VideoStreamDescriptor);

impl fmt::Debug for VideoStreamDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoStreamDescriptor")
            .field("multiple_frame_rate_flag", &self.multiple_frame_rate_flag())
            .field("frame_rate_code", &self.frame_rate_code())
            .field("mpeg_1_only_flag", &self.mpeg_1_only_flag())
            .field("constrained_parameter_flag", &self.constrained_parameter_flag())
            .field("still_picture_flag", &self.still_picture_flag())
            .field("profile_and_level_indication", &self.profile_and_level_indication())
            .field("chroma_format", &self.chroma_format())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use super::*;
    use assert_matches::assert_matches;
    use bitstream_io::{BigEndian, BitWrite, BitWriter, BE};
    use std::io;

    fn make_test_data<F>(builder: F) -> Vec<u8>
    where
        F: Fn(&mut BitWriter<Vec<u8>, BE>) -> Result<(), io::Error>,
    {
        let data: Vec<u8> = Vec::new();
        let mut w = BitWriter::endian(data, BigEndian);
        builder(&mut w).unwrap();
        w.into_writer()
    }

    #[test]
    fn mpeg2_fields() {
        let payload = make_test_data(|w| {
            w.write_bit(true)?; // multiple_frame_rate_flag
            w.write(4, 3)?; // frame_rate_code
            w.write_bit(true)?; // MPEG_1_only_flag
            w.write_bit(false)?; // constrained_parameter_flag
            w.write_bit(true)?; // still_picture_flag
            w.write(8, 0x48)?; // profile_and_level_indication
            w.write(2, 1)?; // chroma_format
            w.write_bit(true)?; // frame_rate_extension_flag
            w.write(5, 0b11111) // reserved
        });
        let desc = Descriptor::from_custom(VideoStreamDescriptor::TAG, &payload).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::VideoStream(v)) => {
            assert!(v.multiple_frame_rate_flag());
            assert_eq!(v.frame_rate_code(), 3);
            assert!(v.mpeg_1_only_flag());
            assert!(!v.constrained_parameter_flag());
            assert!(v.still_picture_flag());
            assert_eq!(v.profile_and_level_indication(), Some(0x48));
            assert_eq!(v.chroma_format(), Some(1));
            assert_eq!(v.frame_rate_extension_flag(), Some(true));
            assert!(!format!("{:?}", v).is_empty());
        });
    }

    #[test]
    fn short_form() {
        let desc = Descriptor::from_custom(VideoStreamDescriptor::TAG, &[0b0001_1000]).unwrap();
        let v = desc.parse_as::<VideoStreamDescriptor>().unwrap();
        assert_eq!(v.frame_rate_code(), 3);
        assert!(!v.mpeg_1_only_flag());
        assert_eq!(v.profile_and_level_indication(), None);
        assert_eq!(v.chroma_format(), None);
    }

    #[test]
    fn empty_payload() {
        assert!(VideoStreamDescriptor::new(2, &[]).is_err());
    }
}
