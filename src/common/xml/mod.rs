//! XML helpers shared by the part parsers.
//!
//! The parsers stream `quick-xml` events and only ever need a handful of
//! operations on them: look up an attribute by local name, decode text
//! nodes, and resolve entity references.

mod escape;

pub use escape::{escape_html, unescape_xml};

use quick_xml::events::{BytesRef, BytesStart, BytesText};

/// Get an attribute value by local name, ignoring the namespace prefix.
///
/// `r:id` and `id` both match `b"id"`, which is what DrawingML lookups want.
pub fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local)
        .and_then(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .map(unescape_xml)
        })
}

/// Get a namespace-prefixed attribute value by local name.
///
/// `p:sldId` carries both `id="256"` and `r:id="rId2"`; only the prefixed
/// one is a relationship reference.
pub fn prefixed_attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == local)
        .and_then(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .map(unescape_xml)
        })
}

/// Get an attribute value parsed as an integer.
///
/// Returns `Ok(None)` when the attribute is absent and `Err` with the raw
/// text when it is present but not a number.
pub fn attr_i64(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<i64>, String> {
    match attr_value(e, local) {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| raw),
        None => Ok(None),
    }
}

/// Decode a text event into an owned string.
pub fn text_value(e: &BytesText<'_>) -> Result<String, std::str::Utf8Error> {
    std::str::from_utf8(e.as_ref()).map(unescape_xml)
}

/// Resolve an entity reference event (`&amp;`, `&#x41;`, ...) to its text.
///
/// Unknown named entities are kept verbatim.
pub fn general_ref_value(e: &BytesRef<'_>) -> String {
    let name = String::from_utf8_lossy(e.as_ref());
    match name.as_ref() {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        other => {
            let code = if let Some(hex) = other.strip_prefix("#x").or_else(|| other.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = other.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                None
            };
            match code.and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => format!("&{};", other),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn first_start(xml: &str) -> BytesStart<'static> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => return e.into_owned(),
                Ok(Event::Eof) => panic!("no element"),
                Err(e) => panic!("{e}"),
                _ => {},
            }
        }
    }

    #[test]
    fn test_attr_value_ignores_prefix() {
        let e = first_start(r#"<a:hlinkClick r:id="rId3"/>"#);
        assert_eq!(attr_value(&e, b"id").as_deref(), Some("rId3"));
        assert_eq!(attr_value(&e, b"missing"), None);
    }

    #[test]
    fn test_prefixed_attr_value() {
        let e = first_start(r#"<p:sldId id="256" r:id="rId2"/>"#);
        assert_eq!(prefixed_attr_value(&e, b"id").as_deref(), Some("rId2"));
        assert_eq!(attr_value(&e, b"id").as_deref(), Some("256"));
    }

    #[test]
    fn test_attr_i64() {
        let e = first_start(r#"<a:off x="914400" y="oops"/>"#);
        assert_eq!(attr_i64(&e, b"x"), Ok(Some(914_400)));
        assert_eq!(attr_i64(&e, b"y"), Err("oops".to_string()));
        assert_eq!(attr_i64(&e, b"z"), Ok(None));
    }

    #[test]
    fn test_attr_value_unescapes() {
        let e = first_start(r#"<Relationship Target="https://x.com/?a=1&amp;b=2"/>"#);
        assert_eq!(
            attr_value(&e, b"Target").as_deref(),
            Some("https://x.com/?a=1&b=2")
        );
    }
}
