use std::fmt;
use std::convert::From;


/// Enum representing HTTP request methods.
///
/// ```rust
/// use httpclient::Method;
///
/// match Method::from("POST") {
///     Method::Get => {},
///     Method::Post => {},
///     Method::Other(m) => { println!("Custom method {}", m); },
///     _ => {}
/// }
/// ```
///
/// Methods are case-sensitive, so `"get"` becomes `Method::Other`.
/// Requests can't be built with `Other` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Options,
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Trace,
    Connect,
    Other(String),
}

impl Method {
    /// Returns `false` for methods the request builder refuses to send
    pub fn is_supported(&self) -> bool {
        !matches!(*self, Method::Other(_))
    }
    /// The method token as written on the request line
    pub fn as_str(&self) -> &str {
        use self::Method::*;
        match *self {
            Options => "OPTIONS",
            Get => "GET",
            Head => "HEAD",
            Post => "POST",
            Put => "PUT",
            Patch => "PATCH",
            Delete => "DELETE",
            Trace => "TRACE",
            Connect => "CONNECT",
            Other(ref m) => m,
        }
    }
}

impl<'a> From<&'a str> for Method {
    fn from(s: &'a str) -> Method {
        match s {
            "OPTIONS"   => Method::Options,
            "GET"       => Method::Get,
            "HEAD"      => Method::Head,
            "POST"      => Method::Post,
            "PUT"       => Method::Put,
            "PATCH"     => Method::Patch,
            "DELETE"    => Method::Delete,
            "TRACE"     => Method::Trace,
            "CONNECT"   => Method::Connect,
            s => Method::Other(s.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
