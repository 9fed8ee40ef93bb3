//! `SegmentTemplate` URL substitution.

use log::warn;

/// Widest padding accepted in a format tag; a `u64` never needs more digits than this
const MAX_WIDTH: usize = 20;

/// Substitute the identifiers of a `SegmentTemplate` `media`, `index` or `initialization`
/// pattern.
///
/// `$Number$`, `$Bandwidth$` and `$Time$` may carry a `%0<width>d` format tag, as in
/// `$Number%05d$`.  `$$` is a literal dollar sign.  Returns `None` for an unknown identifier, a
/// malformed format tag or an identifier missing its closing `$`.
///
/// ```
/// # use mpegts_dash::mpd::build_url_from_template;
/// assert_eq!(
///     build_url_from_template("seg-$Number%03d$.m4s", Some("a"), 7, 0, 0).as_deref(),
///     Some("seg-007.m4s")
/// );
/// ```
pub fn build_url_from_template(
    template: &str,
    representation_id: Option<&str>,
    number: u32,
    bandwidth: u32,
    time: u64,
) -> Option<String> {
    let tokens: Vec<&str> = template.split('$').collect();
    // an odd number of '$' leaves the final identifier unterminated
    if tokens.len() % 2 == 0 {
        warn!("unterminated identifier in segment template {:?}", template);
        return None;
    }
    let mut url = String::with_capacity(template.len());
    for (i, token) in tokens.iter().enumerate() {
        if i % 2 == 0 {
            url.push_str(token);
            continue;
        }
        if token.is_empty() {
            url.push('$');
            continue;
        }
        let (name, format) = match token.split_once('%') {
            Some((name, format)) => (name, Some(format)),
            None => (*token, None),
        };
        let value = match name {
            "RepresentationID" => {
                if format.is_some() {
                    warn!("format tag not allowed on $RepresentationID$ in {:?}", template);
                    return None;
                }
                match representation_id {
                    Some(id) => {
                        url.push_str(id);
                        continue;
                    }
                    None => {
                        warn!("template {:?} needs a representation id", template);
                        return None;
                    }
                }
            }
            "Number" => u64::from(number),
            "Bandwidth" => u64::from(bandwidth),
            "Time" => time,
            _ => {
                warn!("unknown identifier ${}$ in segment template", token);
                return None;
            }
        };
        let width = match format {
            None => 0,
            Some(format) => match format_width(format) {
                Some(width) => width,
                None => {
                    warn!("bad format tag %{} in segment template", format);
                    return None;
                }
            },
        };
        url.push_str(&format!("{:0width$}", value, width = width));
    }
    Some(url)
}

/// Width of a `0<width>d` format tag (the part after `%`); a bare `d` has no padding.  Widths
/// over `MAX_WIDTH` are rejected.
fn format_width(format: &str) -> Option<usize> {
    let digits = format.strip_suffix('d')?;
    if digits.is_empty() {
        return Some(0);
    }
    let digits = digits.strip_prefix('0').unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|&width| width <= MAX_WIDTH)
}
