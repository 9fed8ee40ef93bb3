//! Text carried in DVB descriptors starts with an optional _character table selector_ (ETSI
//! EN 300 468, annex A) naming the character set of the bytes that follow.  This module detects
//! that selector and converts such text to and from Rust strings.
//!
//! Conversion goes through a [`TextConverter`](struct.TextConverter.html), which lazily creates
//! and keeps one converter per pair of character sets.  Construct one and share it by reference
//! (it is `Sync`) rather than creating one per call.
//!
//! ```
//! # use mpegts_dash::text::TextConverter;
//! let conv = TextConverter::new();
//! assert_eq!(conv.decode(b"\x05Merhaba d\xfdnya").as_deref(), Some("Merhaba dınya"));
//! assert_eq!(conv.encode("News"), b"News".to_vec());
//! ```

mod iso6937;

use encoding_rs::Encoding;
use log::{debug, warn};
use std::fmt;
use std::sync::OnceLock;

/// The character sets a DVB text field can be written in.
///
/// The order of the variants is significant: when encoding, sets are tried in this order, and the
/// selector byte for each set is derived from its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Latin alphabet no. 1
    Iso8859_1,
    /// Latin alphabet no. 2
    Iso8859_2,
    /// Latin alphabet no. 3
    Iso8859_3,
    /// Latin alphabet no. 4
    Iso8859_4,
    /// Latin/Cyrillic
    Iso8859_5,
    /// Latin/Arabic
    Iso8859_6,
    /// Latin/Greek
    Iso8859_7,
    /// Latin/Hebrew
    Iso8859_8,
    /// Latin alphabet no. 5 (Turkish)
    Iso8859_9,
    /// Latin alphabet no. 6 (Nordic)
    Iso8859_10,
    /// Latin/Thai
    Iso8859_11,
    /// Never published, so no converter exists for it
    Iso8859_12,
    /// Latin alphabet no. 7 (Baltic)
    Iso8859_13,
    /// Latin alphabet no. 8 (Celtic)
    Iso8859_14,
    /// Latin alphabet no. 9
    Iso8859_15,
    /// Two bytes per character, Basic Multilingual Plane only
    Ucs2Be,
    /// KS X 1001 Korean
    EucKr,
    /// Simplified Chinese
    Gb2312,
    /// UTF-16, big endian
    Utf16Be,
    /// UTF-8, as signalled by selector `0x15`
    Iso10646Utf8,
    /// The default table, used when no selector is present
    Iso6937,
    /// Plain UTF-8, the representation of Rust strings
    Utf8,
}
impl Charset {
    /// Every character set, in table order
    pub const ALL: [Charset; 22] = [
        Charset::Iso8859_1,
        Charset::Iso8859_2,
        Charset::Iso8859_3,
        Charset::Iso8859_4,
        Charset::Iso8859_5,
        Charset::Iso8859_6,
        Charset::Iso8859_7,
        Charset::Iso8859_8,
        Charset::Iso8859_9,
        Charset::Iso8859_10,
        Charset::Iso8859_11,
        Charset::Iso8859_12,
        Charset::Iso8859_13,
        Charset::Iso8859_14,
        Charset::Iso8859_15,
        Charset::Ucs2Be,
        Charset::EucKr,
        Charset::Gb2312,
        Charset::Utf16Be,
        Charset::Iso10646Utf8,
        Charset::Iso6937,
        Charset::Utf8,
    ];

    /// Position of this set in `Charset::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// The ISO 8859 part number, `1` to `15`, for the `Iso8859_*` sets
    pub fn iso8859_part(self) -> Option<u8> {
        if self.index() <= Charset::Iso8859_15.index() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    fn from_iso8859_part(part: u16) -> Option<Charset> {
        match part {
            1..=15 => Some(Charset::ALL[usize::from(part) - 1]),
            _ => None,
        }
    }

    /// True for sets whose control codes are escaped in two-byte units
    pub fn is_multibyte(self) -> bool {
        matches!(self, Charset::Ucs2Be | Charset::EucKr | Charset::Utf16Be)
    }

    /// The selector bytes which announce this set at the start of a text field
    pub fn selector(self) -> Vec<u8> {
        let idx = self.index() as u8;
        match self {
            Charset::Iso8859_1 | Charset::Iso8859_2 | Charset::Iso8859_3 | Charset::Iso8859_4 => {
                vec![0x10, 0x00, idx + 1]
            }
            Charset::Iso8859_5
            | Charset::Iso8859_6
            | Charset::Iso8859_7
            | Charset::Iso8859_8
            | Charset::Iso8859_9
            | Charset::Iso8859_10
            | Charset::Iso8859_11
            | Charset::Iso8859_12
            | Charset::Iso8859_13
            | Charset::Iso8859_14
            | Charset::Iso8859_15 => vec![idx - Charset::Iso8859_5.index() as u8 + 1],
            Charset::Ucs2Be
            | Charset::EucKr
            | Charset::Gb2312
            | Charset::Utf16Be
            | Charset::Iso10646Utf8 => vec![idx - Charset::Ucs2Be.index() as u8 + 0x11],
            Charset::Iso6937 | Charset::Utf8 => vec![],
        }
    }
}

/// The outcome of examining the character table selector at the start of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetSelection {
    /// The selected set, or `None` if the selector is reserved or invalid
    pub charset: Option<Charset>,
    /// Offset of the first byte of text, following the selector
    pub start: usize,
    /// True if the text is processed in two-byte units
    pub multibyte: bool,
}
impl CharsetSelection {
    fn single(charset: Charset, start: usize) -> CharsetSelection {
        CharsetSelection {
            charset: Some(charset),
            start,
            multibyte: false,
        }
    }
    fn multi(charset: Charset) -> CharsetSelection {
        CharsetSelection {
            charset: Some(charset),
            start: 1,
            multibyte: true,
        }
    }
    fn unknown() -> CharsetSelection {
        CharsetSelection {
            charset: None,
            start: 0,
            multibyte: false,
        }
    }
}

/// Examine the first byte (or, for selector `0x10`, the first three bytes) of a DVB text field.
pub fn detect_charset(text: &[u8]) -> CharsetSelection {
    let first = match text.first() {
        Some(&b) => b,
        None => return CharsetSelection::unknown(),
    };
    let selection = match first {
        0x00 => CharsetSelection::unknown(),
        0x01..=0x0b => CharsetSelection::single(Charset::ALL[usize::from(first) + 3], 1),
        0x10 => {
            if text.len() < 3 {
                CharsetSelection::unknown()
            } else {
                let table = u16::from(text[1]) << 8 | u16::from(text[2]);
                match Charset::from_iso8859_part(table) {
                    Some(charset) => CharsetSelection::single(charset, 3),
                    None => CharsetSelection::unknown(),
                }
            }
        }
        0x11 => CharsetSelection::multi(Charset::Ucs2Be),
        0x12 => CharsetSelection::multi(Charset::EucKr),
        0x13 => CharsetSelection::single(Charset::Gb2312, 1),
        0x14 => CharsetSelection::multi(Charset::Utf16Be),
        0x15 => CharsetSelection::single(Charset::Iso10646Utf8, 1),
        0x0c..=0x0f | 0x16..=0x1f => CharsetSelection::unknown(),
        _ => CharsetSelection::single(Charset::Iso6937, 0),
    };
    debug!(
        "first byte {:#04x} selects {:?} (start {}, multibyte {})",
        first, selection.charset, selection.start, selection.multibyte
    );
    selection
}

/// Decoder or encoder for one character set.
#[derive(Clone, Copy)]
enum Codec {
    Latin1,
    Latin5,
    Iso6937,
    Ucs2Be,
    Utf16Be,
    Utf8,
    Table(&'static Encoding),
}
impl Codec {
    fn for_charset(charset: Charset) -> Option<Codec> {
        let codec = match charset {
            Charset::Iso8859_1 => Codec::Latin1,
            Charset::Iso8859_2 => Codec::Table(encoding_rs::ISO_8859_2),
            Charset::Iso8859_3 => Codec::Table(encoding_rs::ISO_8859_3),
            Charset::Iso8859_4 => Codec::Table(encoding_rs::ISO_8859_4),
            Charset::Iso8859_5 => Codec::Table(encoding_rs::ISO_8859_5),
            Charset::Iso8859_6 => Codec::Table(encoding_rs::ISO_8859_6),
            Charset::Iso8859_7 => Codec::Table(encoding_rs::ISO_8859_7),
            Charset::Iso8859_8 => Codec::Table(encoding_rs::ISO_8859_8),
            Charset::Iso8859_9 => Codec::Latin5,
            Charset::Iso8859_10 => Codec::Table(encoding_rs::ISO_8859_10),
            Charset::Iso8859_11 => Codec::Table(encoding_rs::WINDOWS_874),
            Charset::Iso8859_12 => return None,
            Charset::Iso8859_13 => Codec::Table(encoding_rs::ISO_8859_13),
            Charset::Iso8859_14 => Codec::Table(encoding_rs::ISO_8859_14),
            Charset::Iso8859_15 => Codec::Table(encoding_rs::ISO_8859_15),
            Charset::Ucs2Be => Codec::Ucs2Be,
            Charset::EucKr => Codec::Table(encoding_rs::EUC_KR),
            Charset::Gb2312 => Codec::Table(encoding_rs::GBK),
            Charset::Utf16Be => Codec::Utf16Be,
            Charset::Iso10646Utf8 | Charset::Utf8 => Codec::Utf8,
            Charset::Iso6937 => Codec::Iso6937,
        };
        Some(codec)
    }

    fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Codec::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Codec::Latin5 => Some(bytes.iter().map(|&b| latin5_char(b)).collect()),
            Codec::Iso6937 => iso6937::decode(bytes),
            Codec::Ucs2Be => {
                if bytes.len() % 2 != 0 {
                    return None;
                }
                bytes
                    .chunks_exact(2)
                    .map(|p| char::from_u32(u32::from(p[0]) << 8 | u32::from(p[1])))
                    .collect()
            }
            Codec::Utf16Be => encoding_rs::UTF_16BE
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            Codec::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
            Codec::Table(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }

    fn encode(self, text: String) -> Option<Vec<u8>> {
        match self {
            Codec::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            Codec::Latin5 => text.chars().map(latin5_byte).collect(),
            Codec::Iso6937 => iso6937::encode(&text),
            Codec::Ucs2Be => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for c in text.chars() {
                    let unit = u16::try_from(u32::from(c)).ok()?;
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                Some(out)
            }
            Codec::Utf16Be => Some(
                text.encode_utf16()
                    .flat_map(|unit| unit.to_be_bytes())
                    .collect(),
            ),
            Codec::Utf8 => Some(text.into_bytes()),
            Codec::Table(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(&text);
                if had_errors {
                    None
                } else {
                    Some(bytes.into_owned())
                }
            }
        }
    }
}

// ISO 8859-9 differs from ISO 8859-1 in six positions
const LATIN5: [(u8, char); 6] = [
    (0xd0, 'Ğ'),
    (0xdd, 'İ'),
    (0xde, 'Ş'),
    (0xf0, 'ğ'),
    (0xfd, 'ı'),
    (0xfe, 'ş'),
];

fn latin5_char(b: u8) -> char {
    LATIN5
        .iter()
        .find(|(byte, _)| *byte == b)
        .map(|(_, c)| *c)
        .unwrap_or_else(|| char::from(b))
}

fn latin5_byte(c: char) -> Option<u8> {
    if let Some((b, _)) = LATIN5.iter().find(|(_, ch)| *ch == c) {
        return Some(*b);
    }
    let b = u8::try_from(u32::from(c)).ok()?;
    if LATIN5.iter().any(|(byte, _)| *byte == b) {
        None
    } else {
        Some(b)
    }
}

/// Converts text from one character set to another.
#[derive(Clone, Copy)]
pub struct Converter {
    from: Charset,
    to: Charset,
    decoder: Codec,
    encoder: Codec,
}
impl Converter {
    fn new(from: Charset, to: Charset) -> Option<Converter> {
        let decoder = Codec::for_charset(from)?;
        let encoder = Codec::for_charset(to)?;
        Some(Converter {
            from,
            to,
            decoder,
            encoder,
        })
    }

    /// The character set this converter reads
    pub fn from_charset(&self) -> Charset {
        self.from
    }

    /// The character set this converter writes
    pub fn to_charset(&self) -> Charset {
        self.to
    }

    /// Convert the whole input, or return `None` if any character is invalid in the source set
    /// or cannot be represented in the destination set.
    pub fn convert(&self, input: &[u8]) -> Option<Vec<u8>> {
        self.decoder
            .decode(input)
            .and_then(|text| self.encoder.encode(text))
    }

    fn convert_to_string(&self, input: &[u8]) -> Option<String> {
        self.convert(input).and_then(|b| String::from_utf8(b).ok())
    }
}
impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

const SET_COUNT: usize = Charset::ALL.len();

/// Cache of converters between pairs of character sets, each created on first use.
///
/// Every cell of the table is initialised at most once, even when first used from several threads
/// at the same time.
pub struct TextConverter {
    cells: Vec<OnceLock<Option<Converter>>>,
}
impl Default for TextConverter {
    fn default() -> Self {
        TextConverter::new()
    }
}
impl TextConverter {
    /// Create an empty cache
    pub fn new() -> TextConverter {
        TextConverter {
            cells: (0..SET_COUNT * SET_COUNT).map(|_| OnceLock::new()).collect(),
        }
    }

    /// The converter between the given sets, created if this is the first request for it.
    /// Returns `None` when either set has no implementation.
    pub fn converter(&self, from: Charset, to: Charset) -> Option<&Converter> {
        self.cells[from.index() * SET_COUNT + to.index()]
            .get_or_init(|| {
                let conv = Converter::new(from, to);
                if conv.is_none() {
                    warn!("no converter available from {:?} to {:?}", from, to);
                }
                conv
            })
            .as_ref()
    }

    /// Number of cells that have been initialised, including those which found no converter
    pub fn created_converters(&self) -> usize {
        self.cells.iter().filter(|c| c.get().is_some()).count()
    }

    /// Decode a DVB text field, including its character table selector, into a string.
    ///
    /// Emphasis control codes are removed and the in-band line break code becomes `'\n'`.  If
    /// the text does not decode in the signalled set, ISO 8859-1 is tried for text labelled with
    /// another ISO 8859 part, and ISO 8859-9 for text with no selector.  Should that also fail,
    /// the undecodable bytes are returned with invalid sequences replaced.
    ///
    /// Returns `None` only when the selector is reserved or invalid.
    pub fn decode(&self, text: &[u8]) -> Option<String> {
        if text.is_empty() {
            return Some(String::new());
        }
        let selection = detect_charset(text);
        let charset = match selection.charset {
            Some(c) => c,
            None => {
                warn!(
                    "could not detect character table from first byte {:#04x}",
                    text[0]
                );
                return None;
            }
        };
        let payload = text.get(selection.start..).unwrap_or(&[]);
        if let Some(s) = self.decode_as(charset, payload, selection.multibyte) {
            return Some(s);
        }
        warn!("text is not valid {:?}", charset);

        let fallback = match charset.iso8859_part() {
            Some(2..=15) => Some((Charset::Iso8859_1, payload)),
            _ if charset == Charset::Iso6937 => Some((Charset::Iso8859_9, text)),
            _ => None,
        };
        if let Some((fallback, bytes)) = fallback {
            if let Some(s) = self.decode_as(fallback, bytes, false) {
                return Some(s);
            }
            warn!("text is not valid {:?} either", fallback);
        }
        Some(String::from_utf8_lossy(payload).into_owned())
    }

    fn decode_as(&self, charset: Charset, payload: &[u8], multibyte: bool) -> Option<String> {
        let cleaned = strip_control_codes(payload, multibyte);
        if cleaned.is_empty() {
            return Some(String::new());
        }
        self.converter(charset, Charset::Utf8)?
            .convert_to_string(&cleaned)
    }

    /// Encode a string as a DVB text field.
    ///
    /// ISO 6937 is preferred, since it needs no selector.  Otherwise the first set in table order
    /// able to represent every character is used, with its selector prepended.  Line breaks are
    /// written as the in-band line break code.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let chosen = self.encode_as(Charset::Iso6937, text).or_else(|| {
            Charset::ALL[..=Charset::Iso10646Utf8.index()]
                .iter()
                .find_map(|&c| self.encode_as(c, text))
        });
        let (charset, mut bytes) = chosen.unwrap_or_else(|| {
            warn!("no character table can represent {:?}, substituting", text);
            (Charset::Iso6937, iso6937::encode_lossy(text, b'?'))
        });
        debug!("encoding text as {:?}", charset);
        escape_control_codes(&mut bytes, charset.is_multibyte());
        let mut out = charset.selector();
        out.extend_from_slice(&bytes);
        out
    }

    fn encode_as(&self, charset: Charset, text: &str) -> Option<(Charset, Vec<u8>)> {
        self.converter(Charset::Utf8, charset)?
            .convert(text.as_bytes())
            .map(|bytes| (charset, bytes))
    }
}
impl fmt::Debug for TextConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextConverter")
            .field("created_converters", &self.created_converters())
            .finish()
    }
}

const EMPHASIS_ON: u8 = 0x86;
const EMPHASIS_OFF: u8 = 0x87;
const CR_LF: u8 = 0x8a;
const MULTIBYTE_PREFIX: u8 = 0xe0;

fn strip_control_codes(text: &[u8], multibyte: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    if multibyte {
        let mut pairs = text.chunks_exact(2);
        for pair in &mut pairs {
            match (pair[0], pair[1]) {
                (MULTIBYTE_PREFIX, EMPHASIS_ON) | (MULTIBYTE_PREFIX, EMPHASIS_OFF) => {}
                (MULTIBYTE_PREFIX, CR_LF) => out.extend_from_slice(&[0x00, b'\n']),
                _ => out.extend_from_slice(pair),
            }
        }
        out.extend_from_slice(pairs.remainder());
    } else {
        for &b in text {
            match b {
                EMPHASIS_ON | EMPHASIS_OFF => {}
                CR_LF => out.push(b'\n'),
                _ => out.push(b),
            }
        }
    }
    out
}

fn escape_control_codes(text: &mut [u8], multibyte: bool) {
    if multibyte {
        for pair in text.chunks_exact_mut(2) {
            if *pair == [0x00, b'\n'] {
                pair.copy_from_slice(&[MULTIBYTE_PREFIX, CR_LF]);
            }
        }
    } else {
        for b in text.iter_mut() {
            if *b == b'\n' {
                *b = CR_LF;
            }
        }
    }
}
