use std::fmt;
use std::io::Write;

use enums::{Method, Version};
use client::{Error, multipart};
use headers::{is_content_length, is_content_type};


/// Number of body bytes shown by the `Debug` output
const DEBUG_BODY_LIMIT: usize = 512;


/// A serialized request
///
/// The request is immutable, following a redirect builds a new one with
/// `Request::redirect`.
#[derive(Clone)]
pub struct Request {
    method: Method,
    target: String,
    host: String,
    headers: Vec<String>,
    body: Vec<u8>,
    no_redirect: bool,
    max_redirects: Option<usize>,
    bytes: Vec<u8>,
}

/// Collects request parts, created by `Request::build`
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    target: String,
    host: String,
    headers: Vec<String>,
    body: Vec<u8>,
    form: Vec<String>,
    no_redirect: bool,
    max_redirects: Option<usize>,
}

impl Request {
    /// Start building a request
    pub fn build<M, T, H>(method: M, target: T, host: H) -> RequestBuilder
        where M: Into<Method>, T: Into<String>, H: Into<String>
    {
        RequestBuilder {
            method: method.into(),
            target: target.into(),
            host: host.into(),
            headers: Vec::new(),
            body: Vec::new(),
            form: Vec::new(),
            no_redirect: false,
            max_redirects: None,
        }
    }
    /// Build a `GET` request for the `location`, to be sent to the same host
    ///
    /// Only the redirect settings are kept. Method, headers, body and form
    /// of the original request are dropped, so credentials are not resent.
    pub fn redirect(&self, location: &str) -> Result<Request, Error> {
        let mut builder = Request::build(Method::Get, location, &self.host[..]);
        builder.no_redirect(self.no_redirect);
        if let Some(max) = self.max_redirects {
            builder.max_redirects(max);
        }
        builder.done()
    }
    pub fn method(&self) -> &Method {
        &self.method
    }
    pub fn target(&self) -> &str {
        &self.target
    }
    pub fn host(&self) -> &str {
        &self.host
    }
    /// Extra header lines supplied when building the request
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    /// Final body, either raw or synthesized from the form fields
    pub fn body(&self) -> &[u8] {
        &self.body
    }
    pub fn no_redirect(&self) -> bool {
        self.no_redirect
    }
    pub fn max_redirects(&self) -> Option<usize> {
        self.max_redirects
    }
    /// Request bytes as they are written to the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl RequestBuilder {
    /// Add a full header line, like `Accept-Language: en`
    pub fn add_header<S: Into<String>>(&mut self, line: S) -> &mut Self {
        self.headers.push(line.into());
        self
    }
    /// Set raw request body
    ///
    /// Ignored when any form field is added.
    pub fn body<B: Into<Vec<u8>>>(&mut self, body: B) -> &mut Self {
        self.body = body.into();
        self
    }
    /// Add a `name=value` form field, the body will be `multipart/form-data`
    pub fn form_field<S: Into<String>>(&mut self, field: S) -> &mut Self {
        self.form.push(field.into());
        self
    }
    pub fn no_redirect(&mut self, value: bool) -> &mut Self {
        self.no_redirect = value;
        self
    }
    pub fn max_redirects(&mut self, value: usize) -> &mut Self {
        self.max_redirects = Some(value);
        self
    }
    /// Validate and serialize the request
    pub fn done(&self) -> Result<Request, Error> {
        if self.target.is_empty() {
            return Err(Error::Validation("empty request target".into()));
        }
        if !self.method.is_supported() {
            return Err(Error::Validation(
                format!("unsupported method {:?}", self.method.as_str())));
        }
        let (body, form_type) = if self.form.is_empty() {
            (self.body.clone(), None)
        } else {
            let boundary = multipart::boundary();
            (multipart::encode(&self.form, &boundary)?,
             Some(format!("Content-Type: multipart/form-data; boundary={}",
                          boundary)))
        };
        // the builder owns the length, and the type of a form body
        let mut headers = self.headers.iter()
            .filter(|line| {
                let name = line.split(':').next().unwrap_or("").trim();
                !is_content_length(name)
                && !(form_type.is_some() && is_content_type(name))
            })
            .cloned()
            .collect::<Vec<_>>();
        headers.push("Accept: */*".into());
        headers.extend(form_type);
        if !body.is_empty() {
            headers.push(format!("Content-Length: {}", body.len()));
        }

        let mut bytes = Vec::with_capacity(256 + body.len());
        write!(&mut bytes, "{} {} {}\r\nHost: {}\r\n",
            self.method, self.target, Version::Http11, self.host)?;
        for line in &headers {
            write!(&mut bytes, "{}\r\n", line)?;
        }
        bytes.extend_from_slice(b"\r\n");
        bytes.extend_from_slice(&body);

        Ok(Request {
            method: self.method.clone(),
            target: self.target.clone(),
            host: self.host.clone(),
            headers: self.headers.clone(),
            body: body,
            no_redirect: self.no_redirect,
            max_redirects: self.max_redirects,
            bytes: bytes,
        })
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shown = &self.body[..self.body.len().min(DEBUG_BODY_LIMIT)];
        f.debug_struct("Request")
            .field("method", &self.method.as_str())
            .field("target", &self.target)
            .field("host", &self.host)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("body", &String::from_utf8_lossy(shown))
            .finish()
    }
}
