use client::{Error, Response};
use decode::best_effort_text;
use enums::Version;
use headers::is_content_length;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StatusLine,
    Headers,
    Body { remaining: usize },
    Done,
}

/// Incremental response parser
///
/// It's fed with separator-terminated lines (see `split_keeping_separator`)
/// as they arrive from the network and builds a `Response` out of them.
/// Once the parser is reading a body of known length it also accepts
/// unterminated pieces, because body bytes are copied verbatim.
///
/// Responses without `Content-Length` are considered bodyless and are
/// complete right after the header block.
#[derive(Debug)]
pub struct ResponseAssembler {
    state: State,
    response: Response,
}

fn strip_line_end(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r\n") {
        &line[..line.len()-2]
    } else if line.ends_with(b"\n") {
        &line[..line.len()-1]
    } else {
        line
    }
}

impl ResponseAssembler {
    pub fn new() -> ResponseAssembler {
        ResponseAssembler {
            state: State::StatusLine,
            response: Response::default(),
        }
    }
    /// Feed next line of the response
    ///
    /// Returns `true` when response is complete. Any data fed after that
    /// is ignored.
    pub fn feed(&mut self, line: &[u8]) -> Result<bool, Error> {
        use self::State::*;
        let state = self.state;
        self.state = match state {
            Done => return Ok(true),
            Body { remaining } => self.body_data(line, remaining),
            StatusLine => {
                let line = strip_line_end(line);
                if line.is_empty() {
                    // stray empty lines before status line are skipped
                    StatusLine
                } else {
                    self.status_line(line)?;
                    Headers
                }
            }
            Headers => {
                let line = strip_line_end(line);
                if line.is_empty() {
                    self.end_of_headers()
                } else {
                    self.header_line(line)?;
                    Headers
                }
            }
        };
        if self.state == Done {
            self.response.filled = true;
            debug!("response complete: {:?}", self.response);
        }
        Ok(self.state == Done)
    }
    /// Returns true if the parser expects body bytes
    ///
    /// In this state it's fine to feed data that doesn't end with a line
    /// separator.
    pub fn is_reading_body(&self) -> bool {
        matches!(self.state, State::Body { .. })
    }
    /// Returns true if no status line is received yet
    pub fn is_empty(&self) -> bool {
        self.state == State::StatusLine
    }
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }
    /// Take the response, complete or not
    pub fn into_response(self) -> Response {
        self.response
    }

    fn status_line(&mut self, line: &[u8]) -> Result<(), Error> {
        let text = best_effort_text(line);
        let mut words = text.split_whitespace();
        match (words.next(), words.next()) {
            (Some(version), Some(status)) => {
                if Version::from_token(version).is_none() {
                    warn!("unknown protocol version {:?}", version);
                }
                self.response.version = version.to_string();
                self.response.status = status.to_string();
                self.response.reason = words.collect::<Vec<_>>().join(" ");
                Ok(())
            }
            _ => Err(Error::MalformedStatusLine(text.to_string())),
        }
    }

    fn header_line(&mut self, line: &[u8]) -> Result<(), Error> {
        let text = best_effort_text(line);
        let mut pair = text.splitn(2, ':');
        let (name, value) = match (pair.next(), pair.next()) {
            (Some(name), Some(value)) if !name.trim().is_empty() => {
                (name.trim(), value.trim())
            }
            _ => {
                warn!("skipping bad header line {:?}", text);
                return Ok(());
            }
        };
        if is_content_length(name) {
            let length = value.parse()
                .map_err(|_| Error::BadContentLength(value.to_string()))?;
            self.response.expected_body_length = Some(length);
        }
        self.response.headers.set(name, value);
        Ok(())
    }

    fn end_of_headers(&mut self) -> State {
        match self.response.expected_body_length {
            Some(0) | None => State::Done,
            Some(length) => State::Body { remaining: length },
        }
    }

    fn body_data(&mut self, data: &[u8], remaining: usize) -> State {
        self.response.body.extend_from_slice(data);
        if data.len() > remaining {
            let expected = self.response.expected_body_length.unwrap_or(0);
            self.response.overrun = data.len() - remaining;
            warn!("{}", Error::ContentLengthMismatch {
                expected: expected,
                received: self.response.body.len(),
            });
            State::Done
        } else if data.len() == remaining {
            State::Done
        } else {
            State::Body { remaining: remaining - data.len() }
        }
    }
}
