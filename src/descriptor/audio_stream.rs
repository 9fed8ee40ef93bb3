//! Coding parameters of an MPEG-1 or MPEG-2 audio elementary stream.

use super::{descriptor_len, DescriptorError};
use std::fmt;

/// The `audio_stream_descriptor`, tag `0x03`.
pub struct AudioStreamDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> AudioStreamDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as an `AudioStreamDescriptor`.
    pub const TAG: u8 = 0x03;
    /// Construct an `AudioStreamDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<AudioStreamDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 1)?;
        Ok(AudioStreamDescriptor { buf })
    }

    /// Stream may contain free-format frames
    pub fn free_format_flag(&self) -> bool {
        self.buf[0] & 0b1000_0000 != 0
    }
    /// Equal to the `ID` field in each audio frame header
    pub fn id(&self) -> bool {
        self.buf[0] & 0b0100_0000 != 0
    }
    /// The highest audio layer used in the stream
    pub fn layer(&self) -> u8 {
        (self.buf[0] & 0b0011_0000) >> 4
    }
    /// Bitrate may change between frames
    pub fn variable_rate_audio_indicator(&self) -> bool {
        self.buf[0] & 0b0000_1000 != 0
    }
}
super::typed_descriptor!(AudioStreamDescriptor);

impl fmt::Debug for AudioStreamDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStreamDescriptor")
            .field("free_format_flag", &self.free_format_flag())
            .field("id", &self.id())
            .field("layer", &self.layer())
            .field(
                "variable_rate_audio_indicator",
                &self.variable_rate_audio_indicator(),
            )
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use assert_matches::assert_matches;

    #[test]
    fn descriptor() {
        let desc = Descriptor::from_custom(0x03, &[0b0110_1000]).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::AudioStream(a)) => {
            assert!(!a.free_format_flag());
            assert!(a.id());
            assert_eq!(a.layer(), 2);
            assert!(a.variable_rate_audio_indicator());
            assert!(!format!("{:?}", a).is_empty());
        });
    }
}
