//! A minimal element tree built from `quick-xml` events.
//!
//! The MPD schema is walked recursively by element name, which is much simpler over a small tree
//! than over a streaming event reader.  Manifests are small enough that holding the whole tree is
//! not a concern.

use super::MpdError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Element {
    /// local name, without any namespace prefix
    pub name: String,
    /// attributes keyed by their qualified name, in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// concatenated character data directly inside this element
    pub text: String,
}

impl Element {
    fn from_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, MpdError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = vec![];
        for attr in start.attributes() {
            let attr = attr.map_err(|e| xml_error(reader, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(reader, e))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name,
            attributes,
            children: vec![],
            text: String::new(),
        })
    }

    /// Value of the named attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The first child element with the given local name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Character content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

fn xml_error(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> MpdError {
    MpdError::Xml {
        position: reader.buffer_position() as u64,
        message: e.to_string(),
    }
}

/// Parse a whole document, returning its root element.
///
/// Mismatched end tags are detected by the tokeniser; an element still open when the input ends
/// is reported as `UnclosedElement`.  Only comments, processing instructions and whitespace may
/// follow the root element.
pub(crate) fn parse_document(xml: &str) -> Result<Element, MpdError> {
    if xml.trim().is_empty() {
        return Err(MpdError::EmptyDocument);
    }
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut stack: Vec<Element> = vec![];
    let mut root = None;
    loop {
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        if root.is_some() {
            match event {
                Event::Eof => break,
                Event::Start(_) | Event::Empty(_) => {
                    return Err(xml_error(&reader, "second root element"));
                }
                Event::Text(ref text) if !text.iter().all(u8::is_ascii_whitespace) => {
                    return Err(xml_error(&reader, "text after the root element"));
                }
                Event::CData(_) => return Err(xml_error(&reader, "text after the root element")),
                _ => continue,
            }
        }
        match event {
            Event::Start(ref start) => {
                let el = Element::from_start(&reader, start)?;
                stack.push(el);
            }
            Event::Empty(ref start) => {
                let el = Element::from_start(&reader, start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(el),
                    None => root = Some(el),
                }
            }
            Event::End(_) => {
                // the tokeniser has already checked the end name against the open element
                let el = match stack.pop() {
                    Some(el) => el,
                    None => {
                        return Err(xml_error(&reader, "end tag without matching start tag"));
                    }
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(el),
                    None => root = Some(el),
                }
            }
            Event::Text(ref text) => {
                if let Some(el) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| xml_error(&reader, e))?;
                    el.text.push_str(&text);
                }
            }
            Event::CData(ref data) => {
                if let Some(el) = stack.last_mut() {
                    el.text.push_str(&String::from_utf8_lossy(data));
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
    }
    if let Some(open) = stack.pop() {
        return Err(MpdError::UnclosedElement(open.name));
    }
    root.ok_or(MpdError::MissingRoot)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn tree() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <a x="1" ns:y="&amp;"><b>text</b><b/><c><![CDATA[<raw>]]></c></a>"#,
        )
        .unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.attr("x"), Some("1"));
        assert_eq!(root.attr("ns:y"), Some("&"));
        assert_eq!(root.attr("z"), None);
        assert_eq!(root.children_named("b").count(), 2);
        assert_eq!(root.child("b").unwrap().trimmed_text(), "text");
        assert_eq!(root.child("c").unwrap().text, "<raw>");
    }

    #[test]
    fn prefixed_names() {
        let root = parse_document(r#"<mpd:MPD xmlns:mpd="urn:x"><mpd:Period/></mpd:MPD>"#).unwrap();
        assert_eq!(root.name, "MPD");
        assert_eq!(root.children[0].name, "Period");
    }

    #[test]
    fn empty() {
        assert_eq!(parse_document(""), Err(MpdError::EmptyDocument));
        assert_eq!(parse_document("  \n"), Err(MpdError::EmptyDocument));
    }

    #[test]
    fn no_root() {
        assert_eq!(
            parse_document(r#"<?xml version="1.0"?>"#),
            Err(MpdError::MissingRoot)
        );
    }

    #[test]
    fn mismatched_end() {
        assert_matches!(parse_document("<a> </b>"), Err(MpdError::Xml { .. }));
    }

    #[test]
    fn trailing_content() {
        let root = parse_document("<a><b/></a>\n<!-- end -->\n").unwrap();
        assert_eq!(root.name, "a");
        assert_matches!(parse_document("<a/><a/>"), Err(MpdError::Xml { .. }));
        assert_matches!(parse_document("<a></a><b>x</b>"), Err(MpdError::Xml { .. }));
        assert_matches!(parse_document("<a></a> junk"), Err(MpdError::Xml { .. }));
    }

    #[test]
    fn unclosed() {
        assert_matches!(
            parse_document("<a><b></b>"),
            Err(MpdError::UnclosedElement(ref name)) if name == "a"
        );
    }
}
