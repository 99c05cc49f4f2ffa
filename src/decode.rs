//! Classification and decoding of response bodies for display
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::from_utf8;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;


/// Parsed value of a `Content-Type` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentType {
    mime: Option<String>,
    params: HashMap<String, String>,
}

/// Body prepared for the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Body decoded to text
    Text(String),
    /// Body which is not text, or which can't be decoded
    Binary(Vec<u8>),
}

impl ContentType {
    /// MIME type, the first parameter-less segment, e.g. `text/html`
    pub fn mime(&self) -> Option<&str> {
        self.mime.as_ref().map(|x| &x[..])
    }
    /// Parameter value by (case-insensitive) name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(&name.to_ascii_lowercase()).map(|x| &x[..])
    }
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }
    /// True for `text/*` types
    pub fn is_text(&self) -> bool {
        self.mime.as_ref().map_or(false, |m| {
            m.len() >= 4 && m[..4].eq_ignore_ascii_case("text")
        })
    }
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match *self {
            Content::Text(ref s) => s.as_bytes(),
            Content::Binary(ref b) => b,
        }
    }
    pub fn is_text(&self) -> bool {
        matches!(*self, Content::Text(_))
    }
}

/// Parse `;`-delimited `Content-Type` value
///
/// The first segment without `=` is the MIME type, `key=value` segments
/// become parameters. Parameter names are lowercased and quotes around
/// values are stripped.
pub fn classify(value: &str) -> ContentType {
    let mut result = ContentType::default();
    for segment in value.split(';').map(|x| x.trim()) {
        if segment.is_empty() {
            continue;
        }
        let mut pair = segment.splitn(2, '=');
        match (pair.next(), pair.next()) {
            (Some(key), Some(val)) => {
                result.params.insert(key.trim().to_ascii_lowercase(),
                                     val.trim().trim_matches('"').to_string());
            }
            (Some(mime), None) if result.mime.is_none() => {
                result.mime = Some(mime.to_string());
            }
            _ => {}
        }
    }
    result
}

/// Decode response body for display
///
/// Bodies of non-text types are passed through. Text is decoded with the
/// declared charset, or with a detected one when no charset is declared.
/// When there is no `Content-Type` at all the body is treated as text of
/// unknown charset. Anything that fails to decode is returned as raw bytes.
pub fn decode(body: &[u8], content_type: Option<&str>) -> Content {
    let ctype = content_type.map(classify).unwrap_or_default();
    if ctype.mime().is_some() && !ctype.is_text() {
        return Content::Binary(body.to_vec());
    }
    let text = match ctype.charset() {
        Some(label) => decode_with_label(body, label),
        None => decode_detected(body),
    };
    match text {
        Some(text) => Content::Text(text),
        None => {
            debug!("body of {} bytes is kept undecoded", body.len());
            Content::Binary(body.to_vec())
        }
    }
}

/// Strictly decode `body` using encoding named by `label`
///
/// Returns `None` for unknown labels and malformed input.
pub fn decode_with_label(body: &[u8], label: &str) -> Option<String> {
    let encoding = match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => encoding,
        None => {
            warn!("unknown charset {:?}", label);
            return None;
        }
    };
    encoding.decode_without_bom_handling_and_without_replacement(body)
        .map(|x| x.into_owned())
}

/// Guess the encoding of `body` and strictly decode it
///
/// Returns `None` for data that doesn't look like text at all, when the
/// detector is not confident, and when the decoded text contains
/// characters that real text in a legacy encoding practically never has
/// (C1 controls, private use and supplementary planes).
pub fn decode_detected(body: &[u8]) -> Option<String> {
    if looks_binary(body) {
        return None;
    }
    if let Ok(text) = from_utf8(body) {
        return Some(text.to_string());
    }
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let (encoding, confident) = detector.guess_assess(None, false);
    if !confident {
        debug!("no confident guess, best is {}", encoding.name());
        return None;
    }
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)?;
    if text.chars().any(implausible) {
        debug!("body decoded as {} looks like garbage", encoding.name());
        return None;
    }
    debug!("detected encoding {}", encoding.name());
    Some(text.into_owned())
}

/// Decode a protocol line that's expected to be ASCII
///
/// UTF-8 is borrowed as is, anything else is decoded with a detected
/// encoding replacing malformed sequences.
pub fn best_effort_text(data: &[u8]) -> Cow<str> {
    if let Ok(text) = from_utf8(data) {
        return Cow::Borrowed(text);
    }
    let (text, _, _) = guess(data).decode(data);
    Cow::Owned(text.into_owned())
}

fn guess(data: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    detector.guess(None, true)
}

fn implausible(c: char) -> bool {
    matches!(c as u32, 0x80..=0x9F | 0xE000..=0xF8FF | 0x10000..=0x10FFFF)
}

// Control characters other than whitespace and escape mean binary data
fn looks_binary(data: &[u8]) -> bool {
    data.iter().any(|&b| {
        b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b)
    })
}
