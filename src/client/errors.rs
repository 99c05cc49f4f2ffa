use std::io;
use std::net::SocketAddr;

use url::ParseError as UrlError;


quick_error! {
    #[derive(Debug)]
    /// Client request error
    pub enum Error {
        /// Request can't be built from the supplied parts
        Validation(msg: String) {
            description("invalid request")
            display("invalid request: {}", msg)
        }
        /// Scheme of the url is not supported, only `http` is
        UnsupportedScheme(scheme: String) {
            description("scheme of this url is not supported")
            display("scheme {:?} is not supported", scheme)
        }
        /// Url can't be parsed
        Url(err: UrlError) {
            description("bad url")
            display("bad url: {}", err)
            from()
        }
        /// Name resolution error
        HostUnresolvable(host: String) {
            description("can't resolve host")
            display("can't resolve host {:?}", host)
        }
        /// Peer actively refused the connection
        ConnectionRefused(addr: SocketAddr) {
            description("connection refused")
            display("connection to {} refused", addr)
        }
        /// Exchange is attempted before connection is established
        NotConnected {
            description("no connection established")
        }
        /// Writing request to the socket failed
        Send(err: io::Error) {
            description("error sending request")
            display("error sending request: {}", err)
        }
        /// I/O (basically networking) error occured during request
        Io(err: io::Error) {
            description("IO error")
            display("IO error: {}", err)
            from()
        }
        /// First line of the response is not a status line
        MalformedStatusLine(line: String) {
            description("malformed status line")
            display("malformed status line: {:?}", line)
        }
        /// Bad `Content-Length` header
        BadContentLength(value: String) {
            description("bad content length")
            display("bad content length: {:?}", value)
        }
        /// Body is longer than `Content-Length` header declared
        ///
        /// This one is never returned as an error, it's only logged.
        ContentLengthMismatch { expected: usize, received: usize } {
            description("content length mismatch")
            display("content length mismatch: expected {} bytes, \
                     received {}", expected, received)
        }
        /// Too many subsequent reads timed out (only when
        /// `Config::max_idle_reads` is set)
        ReadTimeout {
            description("timed out reading response")
        }
    }
}
