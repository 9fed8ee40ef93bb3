//! The _target background grid_ and _video window_ descriptors together describe where a video
//! should be placed on a larger display area.

use super::{descriptor_len, read_u16, read_u32, DescriptorError};
use std::fmt;

fn horizontal(buf: &[u8]) -> u16 {
    read_u16(buf) >> 2
}
fn vertical(buf: &[u8]) -> u16 {
    ((read_u32(buf) & 0x0003_fff0) >> 4) as u16
}

/// The `target_background_grid_descriptor`, tag `0x07`, giving the size of the display area.
pub struct TargetBackgroundGridDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> TargetBackgroundGridDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a
    /// `TargetBackgroundGridDescriptor`.
    pub const TAG: u8 = 0x07;
    /// Construct a `TargetBackgroundGridDescriptor` instance that will parse the data from the
    /// given slice.
    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<TargetBackgroundGridDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(TargetBackgroundGridDescriptor { buf })
    }

    /// 14-bit horizontal size, in pixels
    pub fn horizontal_size(&self) -> u16 {
        horizontal(self.buf)
    }
    /// 14-bit vertical size, in pixels
    pub fn vertical_size(&self) -> u16 {
        vertical(self.buf)
    }
    /// 4-bit `aspect_ratio_information` code
    pub fn aspect_ratio_information(&self) -> u8 {
        self.buf[3] & 0b0000_1111
    }
}
super::typed_descriptor!(TargetBackgroundGridDescriptor);

impl fmt::Debug for TargetBackgroundGridDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetBackgroundGridDescriptor")
            .field("horizontal_size", &self.horizontal_size())
            .field("vertical_size", &self.vertical_size())
            .field("aspect_ratio_information", &self.aspect_ratio_information())
            .finish()
    }
}

/// The `video_window_descriptor`, tag `0x08`, positioning the video within the grid.
pub struct VideoWindowDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> VideoWindowDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `VideoWindowDescriptor`.
    pub const TAG: u8 = 0x08;
    /// Construct a `VideoWindowDescriptor` instance that will parse the data from the given
    /// slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<VideoWindowDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(VideoWindowDescriptor { buf })
    }

    /// 14-bit horizontal offset of the top left pixel, relative to the background grid
    pub fn horizontal_offset(&self) -> u16 {
        horizontal(self.buf)
    }
    /// 14-bit vertical offset of the top left pixel, relative to the background grid
    pub fn vertical_offset(&self) -> u16 {
        vertical(self.buf)
    }
    /// 4-bit priority, where `15` is the highest
    pub fn window_priority(&self) -> u8 {
        self.buf[3] & 0b0000_1111
    }
}
super::typed_descriptor!(VideoWindowDescriptor);

impl fmt::Debug for VideoWindowDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoWindowDescriptor")
            .field("horizontal_offset", &self.horizontal_offset())
            .field("vertical_offset", &self.vertical_offset())
            .field("window_priority", &self.window_priority())
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

    fn grid(h: u16, v: u16, low: u8) -> Vec<u8> {
        make_test_data(|w| {
            w.write(14, h)?;
            w.write(14, v)?;
            w.write(4, low)
        })
    }

    #[test]
    fn background_grid() {
        let desc = Descriptor::from_custom(0x07, &grid(1920, 1080, 3)).unwrap();
        assert_matches!(desc.parse_core(), Ok(CoreDescriptors::TargetBackgroundGrid(g)) => {
            assert_eq!(g.horizontal_size(), 1920);
            assert_eq!(g.vertical_size(), 1080);
            assert_eq!(g.aspect_ratio_information(), 3);
            assert!(!format!("{:?}", g).is_empty());
        });
    }

    #[test]
    fn video_window() {
        let desc = Descriptor::from_custom(0x08, &grid(16383, 1, 15)).unwrap();
        let w = desc.parse_as::<VideoWindowDescriptor>().unwrap();
        assert_eq!(w.horizontal_offset(), 16383);
        assert_eq!(w.vertical_offset(), 1);
        assert_eq!(w.window_priority(), 15);
        assert!(desc.parse_as::<TargetBackgroundGridDescriptor>().is_err());
    }
}
