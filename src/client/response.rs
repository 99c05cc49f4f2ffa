use std::fmt;

use enums::Version;
use headers::Headers;


/// Number of body bytes shown by the `Debug` output
const DEBUG_BODY_LIMIT: usize = 512;


/// A fully buffered response
///
/// Built incrementally by `ResponseAssembler`.
#[derive(Clone, Default)]
pub struct Response {
    pub(crate) version: String,
    pub(crate) status: String,
    pub(crate) reason: String,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
    pub(crate) expected_body_length: Option<usize>,
    pub(crate) filled: bool,
    pub(crate) overrun: usize,
}

impl Response {
    /// Version token of the status line, e.g. `HTTP/1.1`
    pub fn version(&self) -> &str {
        &self.version
    }
    /// Recognized protocol version, `None` for unknown tokens
    pub fn http_version(&self) -> Option<Version> {
        Version::from_token(&self.version)
    }
    /// Status code exactly as received, e.g. `"200"`
    pub fn status(&self) -> &str {
        &self.status
    }
    /// Reason phrase, words are joined by single spaces
    pub fn reason(&self) -> &str {
        &self.reason
    }
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
    pub fn body(&self) -> &[u8] {
        &self.body
    }
    /// Value of the `Content-Length` header if there was one
    pub fn expected_body_length(&self) -> Option<usize> {
        self.expected_body_length
    }
    /// Whether response was received completely
    ///
    /// Responses cut off by the peer closing connection are returned
    /// non-filled.
    pub fn is_filled(&self) -> bool {
        self.filled
    }
    /// Number of bytes received over the `Content-Length`
    pub fn overrun(&self) -> usize {
        self.overrun
    }
    /// 404 and 403 responses are reported to the user by reason only
    pub fn is_bad(&self) -> bool {
        matches!(&self.status[..], "404" | "403")
    }
    /// Location of a `301 Moved Permanently` response
    ///
    /// Other redirect codes are not followed, and `None` is returned when
    /// the `Location` header is missing.
    pub fn redirect_location(&self) -> Option<&str> {
        if self.status == "301" && self.reason == "Moved Permanently" {
            self.headers.get("Location")
        } else {
            None
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shown = &self.body[..self.body.len().min(DEBUG_BODY_LIMIT)];
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("body", &String::from_utf8_lossy(shown))
            .field("filled", &self.filled)
            .finish()
    }
}
