//! Language codes for audio (or subtitle) elementary streams, each with a flag describing the
//! intended audience of the track.

use super::DescriptorError;
use std::fmt;

/// The `ISO_639_language_descriptor`, tag `0x0a`.
///
/// The payload is a sequence of 4-byte entries; any trailing partial entry is ignored.
pub struct Iso639LanguageDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> Iso639LanguageDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as an `Iso639LanguageDescriptor`.
    pub const TAG: u8 = 0x0a;
    /// Construct an `Iso639LanguageDescriptor` instance that will parse the data from the given
    /// slice.  Any payload length is accepted, including zero.
    pub fn new(_tag: u8, buf: &'buf [u8]) -> Result<Iso639LanguageDescriptor<'buf>, DescriptorError> {
        Ok(Iso639LanguageDescriptor { buf })
    }

    /// Number of complete language entries
    pub fn len(&self) -> usize {
        self.buf.len() / 4
    }

    /// True if the descriptor holds no complete language entry
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entry at the given index, if there is one
    pub fn language(&self, idx: usize) -> Option<Language<'buf>> {
        self.buf.chunks_exact(4).nth(idx).map(Language::new)
    }

    /// Iterate over all entries in the order they appear
    pub fn languages(&self) -> LanguageIterator<'buf> {
        LanguageIterator {
            chunks: self.buf.chunks_exact(4),
        }
    }
}
super::typed_descriptor!(Iso639LanguageDescriptor);

/// Iterator over the entries of an `Iso639LanguageDescriptor`.
pub struct LanguageIterator<'buf> {
    chunks: std::slice::ChunksExact<'buf, u8>,
}
impl<'buf> Iterator for LanguageIterator<'buf> {
    type Item = Language<'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(Language::new)
    }
}

/// The intended audience of an audio track
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AudioType {
    /// no particular audience signalled
    Undefined,
    /// no language, e.g. a music-and-effects track
    CleanEffects,
    /// prepared for the hearing impaired
    HearingImpaired,
    /// commentary for the visually impaired
    VisualImpairedCommentary,
    /// values `0x04` to `0xff`
    Reserved(u8),
}
impl From<u8> for AudioType {
    fn from(v: u8) -> Self {
        match v {
            0 => AudioType::Undefined,
            1 => AudioType::CleanEffects,
            2 => AudioType::HearingImpaired,
            3 => AudioType::VisualImpairedCommentary,
            _ => AudioType::Reserved(v),
        }
    }
}

/// One language entry
pub struct Language<'buf> {
    buf: &'buf [u8],
}
impl<'buf> Language<'buf> {
    fn new(buf: &'buf [u8]) -> Language<'buf> {
        Language { buf }
    }
    /// The three letter code, such as `"eng"`.  The bytes are ISO 8859-1.
    pub fn code(&self) -> String {
        self.buf[..3].iter().map(|&b| char::from(b)).collect()
    }
    /// The audience of the track
    pub fn audio_type(&self) -> AudioType {
        AudioType::from(self.buf[3])
    }
}
impl fmt::Debug for Language<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Language")
            .field("code", &self.code())
            .field("audio_type", &self.audio_type())
            .finish()
    }
}

impl fmt::Debug for Iso639LanguageDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.languages()).finish()
    }
}
