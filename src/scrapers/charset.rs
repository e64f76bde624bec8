//! Decoding raw page bytes to text.
//!
//! The encoding is chosen in this order: a byte-order mark, the `charset`
//! parameter of the `Content-Type` header, a `<meta charset>` (or
//! `http-equiv` content type) declaration near the top of the document,
//! and finally statistical detection.

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// How far into the document a `<meta>` charset declaration is looked for.
const META_SNIFF_BYTES: usize = 4096;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap()
});

/// Charset named by a `Content-Type` header value.
pub fn header_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').trim_matches('\''))
            .filter(|v| !v.is_empty())
    })
}

/// Charset declared by a `<meta>` element in the first few kilobytes of `body`.
pub fn meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Pick the encoding of `body` given an optional `Content-Type` header.
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }
    if let Some(encoding) = content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }
    if let Some(encoding) = meta_charset(body) {
        return encoding;
    }
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Decode `body` to a `String` using [`detect_encoding`].
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> (String, &'static Encoding) {
    let encoding = detect_encoding(body, content_type);
    let (decoded, used, _) = encoding.decode(body);
    (decoded.into_owned(), used)
}
