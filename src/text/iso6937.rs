//! The ISO/IEC 6937 character set, which DVB uses by default when a text field carries no
//! character table selector.
//!
//! Bytes `0xc1` to `0xcf` are non-spacing diacritical marks that precede the letter they modify,
//! so some characters take two bytes.

/// Characters for bytes `0xa0` to `0xff`.  `None` marks bytes with no assignment, including the
/// diacritic prefixes which are handled by `DIACRITICS`.
const UPPER: [Option<char>; 96] = [
    // 0xa0
    Some('\u{a0}'), Some('¡'), Some('¢'), Some('£'), Some('$'), Some('¥'), Some('#'), Some('§'),
    Some('¤'), Some('‘'), Some('“'), Some('«'), Some('←'), Some('↑'), Some('→'), Some('↓'),
    // 0xb0
    Some('°'), Some('±'), Some('²'), Some('³'), Some('×'), Some('µ'), Some('¶'), Some('·'),
    Some('÷'), Some('’'), Some('”'), Some('»'), Some('¼'), Some('½'), Some('¾'), Some('¿'),
    // 0xc0
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
    // 0xd0
    Some('―'), Some('¹'), Some('®'), Some('©'), Some('™'), Some('♪'), Some('¬'), Some('¦'),
    None, None, None, None, Some('⅛'), Some('⅜'), Some('⅝'), Some('⅞'),
    // 0xe0
    Some('Ω'), Some('Æ'), Some('Đ'), Some('ª'), Some('Ħ'), None, Some('Ĳ'), Some('Ŀ'),
    Some('Ł'), Some('Ø'), Some('Œ'), Some('º'), Some('Þ'), Some('Ŧ'), Some('Ŋ'), Some('ŉ'),
    // 0xf0
    Some('ĸ'), Some('æ'), Some('đ'), Some('ð'), Some('ħ'), Some('ı'), Some('ĳ'), Some('ŀ'),
    Some('ł'), Some('ø'), Some('œ'), Some('ß'), Some('þ'), Some('ŧ'), Some('ŋ'), Some('\u{ad}'),
];

/// For each diacritic prefix byte, the base letters it may combine with and the resulting
/// precomposed characters, position for position.
const DIACRITICS: [(u8, &str, &str); 13] = [
    // grave
    (0xc1, "AEIOUaeiou", "ÀÈÌÒÙàèìòù"),
    // acute
    (
        0xc2,
        "ACEILNORSUYZacegilnorsuyz",
        "ÁĆÉÍĹŃÓŔŚÚÝŹáćéģíĺńóŕśúýź",
    ),
    // circumflex
    (
        0xc3,
        "ACEGHIJOSUWYaceghijosuwy",
        "ÂĈÊĜĤÎĴÔŜÛŴŶâĉêĝĥîĵôŝûŵŷ",
    ),
    // tilde
    (0xc4, "AINOUainou", "ÃĨÑÕŨãĩñõũ"),
    // macron
    (0xc5, "AEIOUaeiou", "ĀĒĪŌŪāēīōū"),
    // breve
    (0xc6, "AGUagu", "ĂĞŬăğŭ"),
    // dot
    (0xc7, "CEGIZcegz", "ĊĖĠİŻċėġż"),
    // diaeresis
    (0xc8, "AEIOUYaeiouy", "ÄËÏÖÜŸäëïöüÿ"),
    // ring
    (0xca, "AUau", "ÅŮåů"),
    // cedilla
    (
        0xcb,
        "CGKLNRSTcklnrst",
        "ÇĢĶĻŅŖŞŢçķļņŗşţ",
    ),
    // double acute
    (0xcd, "OUou", "ŐŰőű"),
    // ogonek
    (0xce, "AEIUaeiu", "ĄĘĮŲąęįų"),
    // caron
    (
        0xcf,
        "CDELNRSTZcdelnrstz",
        "ČĎĚĽŇŘŠŤŽčďěľňřšťž",
    ),
];

fn compose(prefix: u8, base: u8) -> Option<char> {
    let (_, bases, composed) = DIACRITICS.iter().find(|(p, _, _)| *p == prefix)?;
    let idx = bases.bytes().position(|b| b == base)?;
    composed.chars().nth(idx)
}

/// Decode ISO 6937 bytes, or `None` if the input uses an unassigned byte, a diacritic prefix
/// with a letter it cannot modify, or ends with a dangling prefix.
pub(crate) fn decode(bytes: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(b) = iter.next() {
        match b {
            0x00..=0x9f => out.push(char::from(b)),
            0xc1..=0xcf => {
                let base = iter.next()?;
                out.push(compose(b, base)?);
            }
            _ => out.push(UPPER[usize::from(b - 0xa0)]?),
        }
    }
    Some(out)
}

fn encode_char(c: char, out: &mut Vec<u8>) -> bool {
    if (c as u32) < 0xa0 {
        out.push(c as u8);
        return true;
    }
    if let Some(pos) = UPPER.iter().position(|u| *u == Some(c)) {
        out.push(0xa0 + pos as u8);
        return true;
    }
    for (prefix, bases, composed) in DIACRITICS.iter() {
        if let Some(idx) = composed.chars().position(|x| x == c) {
            out.push(*prefix);
            out.push(bases.as_bytes()[idx]);
            return true;
        }
    }
    false
}

/// Encode text as ISO 6937, or `None` if some character has no representation.
pub(crate) fn encode(text: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        if !encode_char(c, &mut out) {
            return None;
        }
    }
    Some(out)
}

/// Encode text as ISO 6937, writing `substitute` for each character with no representation.
pub(crate) fn encode_lossy(text: &str, substitute: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        if !encode_char(c, &mut out) {
            out.push(substitute);
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::*;

    #[test]
    fn tables_line_up() {
        for (_, bases, composed) in DIACRITICS.iter() {
            assert_eq!(bases.len(), composed.chars().count());
        }
    }

    #[test]
    fn ascii_and_symbols() {
        assert_eq!(decode(b"News 24").as_deref(), Some("News 24"));
        assert_eq!(decode(&hex!("a3b0d3")).as_deref(), Some("£°©"));
    }

    #[test]
    fn diacritics() {
        assert_eq!(decode(&hex!("c26574c3e9")), None);
        assert_eq!(decode(&hex!("43c8f6")), None);
        assert_eq!(decode(&hex!("c265c365")).as_deref(), Some("éê"));
        assert_eq!(decode(&hex!("436166c265")).as_deref(), Some("Café"));
        assert_eq!(decode(&hex!("cf5361c26e")).as_deref(), Some("Šań"));
    }

    #[test]
    fn unassigned_bytes() {
        assert_eq!(decode(&[0xc0]), None);
        assert_eq!(decode(&[0xe5]), None);
        assert_eq!(decode(&[0x41, 0xc2]), None);
    }

    #[test]
    fn encoding() {
        assert_eq!(encode("Café"), Some(hex!("436166c265").to_vec()));
        assert_eq!(encode("$#"), Some(b"$#".to_vec()));
        assert_eq!(encode("Ω"), Some(vec![0xe0]));
        assert_eq!(encode("日本"), None);
        assert_eq!(encode_lossy("a日", b'?'), b"a?".to_vec());
    }
}
