use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

use netbuf::Buf;

use client::{Config, Error, Request, Response};
use client::connect::{Resolve, SystemResolver};
use client::parser::ResponseAssembler;
use lines::split_keeping_separator;


const CRLF: &'static [u8] = b"\r\n";


/// A single blocking HTTP/1.1 connection
///
/// Requests are sent one at a time, each `exchange` writes the whole
/// request and then reads until the response is complete. A timed out
/// read is retried, so `Config::read_timeout` only bounds a single read.
///
/// `S` is the byte stream, it's a `TcpStream` unless another stream (for
/// example a TLS one) is attached with `with_stream`.
pub struct Transport<S=TcpStream> {
    config: Arc<Config>,
    stream: Option<S>,
    // bytes received but not yet fed to the parser
    buf: Buf,
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

/// Feed all complete lines in the buffer to the parser
///
/// Returns true when the response is complete. An unterminated tail is
/// left in the buffer unless the parser is reading body.
fn drain(buf: &mut Buf, parser: &mut ResponseAssembler)
    -> Result<bool, Error>
{
    let mut consumed = 0;
    let mut done = false;
    for unit in split_keeping_separator(&buf[..], CRLF) {
        if !unit.ends_with(CRLF) && !parser.is_reading_body() {
            break;
        }
        consumed += unit.len();
        if parser.feed(unit)? {
            done = true;
            break;
        }
    }
    buf.consume(consumed);
    Ok(done)
}

/// Peer has closed the connection, make a response of what we have
fn finish(buf: &mut Buf, mut parser: ResponseAssembler)
    -> Result<Option<Response>, Error>
{
    let tail = buf.len();
    if tail > 0 {
        parser.feed(&buf[..])?;
        buf.consume(tail);
    }
    if parser.is_empty() {
        info!("connection closed before any response");
        return Ok(None);
    }
    if !parser.is_done() {
        warn!("connection closed before response is complete");
    }
    Ok(Some(parser.into_response()))
}

impl Transport<TcpStream> {
    /// Create a disconnected transport
    pub fn new(config: &Arc<Config>) -> Transport<TcpStream> {
        Transport {
            config: config.clone(),
            stream: None,
            buf: Buf::new(),
        }
    }
    /// Resolve the host with the system resolver and connect
    pub fn connect(&mut self, host: &str, port: u16) -> Result<(), Error> {
        self.connect_with(&SystemResolver, host, port)
    }
    /// Resolve the host with `resolver` and connect
    ///
    /// Connection errors are not retried. Replaces the current connection
    /// if there is one.
    pub fn connect_with<R>(&mut self, resolver: &R, host: &str, port: u16)
        -> Result<(), Error>
        where R: Resolve + ?Sized
    {
        let addr = SocketAddr::new(resolver.resolve(host)?, port);
        let timeout = self.config.get_connect_timeout();
        let stream = match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => stream,
            Err(ref e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                error!("connection to {} refused", addr);
                return Err(Error::ConnectionRefused(addr));
            }
            Err(e) => return Err(Error::Io(e)),
        };
        stream.set_read_timeout(Some(self.config.read_timeout))?;
        info!("connection established to {}", addr);
        self.attach(stream);
        Ok(())
    }
}

impl<S: Read + Write> Transport<S> {
    /// Create a transport connected over `stream`
    pub fn with_stream(config: &Arc<Config>, stream: S) -> Transport<S> {
        Transport {
            config: config.clone(),
            stream: Some(stream),
            buf: Buf::new(),
        }
    }
    /// Use `stream` for the next exchanges, dropping the previous one
    pub fn attach(&mut self, stream: S) {
        self.disconnect();
        self.stream = Some(stream);
    }
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
    /// Send a request and read the response
    ///
    /// Returns `None` if the peer closes connection without sending
    /// anything. If the peer closes connection in the middle of the response
    /// the incomplete response is returned (see `Response::is_filled`).
    pub fn exchange(&mut self, request: &Request)
        -> Result<Option<Response>, Error>
    {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;
        if self.buf.len() > 0 {
            debug!("dropping {} stale bytes", self.buf.len());
            let stale = self.buf.len();
            self.buf.consume(stale);
        }

        debug!("sending {:?}", request);
        stream.write_all(request.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|e| {
                error!("send failed: {}", e);
                Error::Send(e)
            })?;
        info!("request sent: {} {}", request.method(), request.target());

        let mut parser = ResponseAssembler::new();
        let mut chunk = vec![0u8; self.config.recv_buffer_size];
        let mut idle = 0;
        loop {
            let bytes = match stream.read(&mut chunk) {
                Ok(0) => return finish(&mut self.buf, parser),
                Ok(bytes) => bytes,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {
                    continue;
                }
                Err(ref e) if is_timeout(e) => {
                    idle += 1;
                    debug!("read timed out ({} in a row)", idle);
                    match self.config.max_idle_reads {
                        Some(max) if idle >= max => {
                            return Err(Error::ReadTimeout);
                        }
                        _ => continue,
                    }
                }
                Err(e) => return Err(Error::Io(e)),
            };
            idle = 0;
            debug!("received {} bytes", bytes);
            self.buf.extend(&chunk[..bytes]);
            if drain(&mut self.buf, &mut parser)? {
                let response = parser.into_response();
                info!("response received: {} {}",
                    response.status(), response.reason());
                return Ok(Some(response));
            }
        }
    }
    /// Close the connection, does nothing if not connected
    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            let stale = self.buf.len();
            self.buf.consume(stale);
            info!("connection closed");
        }
    }
}
