extern crate httpclient;
#[macro_use] extern crate matches;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{IpAddr, TcpListener};
use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use httpclient::client::{Config, Error, Request, Transport, Resolve, fetch};


/// In-memory stream returning prepared chunks for reads
struct Script {
    chunks: VecDeque<io::Result<Vec<u8>>>,
    written: Rc<RefCell<Vec<u8>>>,
    fail_write: bool,
}

impl Script {
    fn new() -> Script {
        Script {
            chunks: VecDeque::new(),
            written: Rc::new(RefCell::new(Vec::new())),
            fail_write: false,
        }
    }
    fn written(&self) -> Rc<RefCell<Vec<u8>>> {
        self.written.clone()
    }
    fn timeout(mut self) -> Script {
        self.chunks.push_back(Err(io::ErrorKind::WouldBlock.into()));
        self
    }
    fn then(mut self, chunk: &[u8]) -> Script {
        self.chunks.push_back(Ok(chunk.to_vec()));
        self
    }
}

impl Read for Script {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.chunks.push_front(Ok(data[n..].to_vec()));
                }
                Ok(n)
            }
        }
    }
}

impl Write for Script {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn config() -> Arc<Config> {
    Config::new().done()
}

fn get(target: &str) -> Request {
    Request::build("GET", target, "a.com").done().unwrap()
}

fn count_requests(written: &Rc<RefCell<Vec<u8>>>) -> usize {
    let data = written.borrow();
    String::from_utf8_lossy(&data).matches(" HTTP/1.1\r\nHost: ").count()
}

const MOVED: &'static [u8] = b"HTTP/1.1 301 Moved Permanently\r\n\
    Location: /moved\r\n\
    Content-Length: 0\r\n\r\n";
const OK: &'static [u8] = b"HTTP/1.1 200 OK\r\n\
    Content-Length: 4\r\n\r\n\
    done";

#[test]
fn not_connected() {
    let mut t = Transport::new(&config());
    assert!(!t.is_connected());
    assert_matches!(t.exchange(&get("/")), Err(Error::NotConnected));
}

#[test]
fn split_reads_with_timeouts() {
    let script = Script::new()
        .then(b"HTTP/1.1 200 O")
        .timeout()
        .then(b"K\r\nServer: httpserver\r\nContent-Le")
        .timeout()
        .timeout()
        .then(b"ngth: 12\r\n\r\n12345")
        .then(b"67890\r\n");
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let request = get("/");
    let r = t.exchange(&request).unwrap().unwrap();
    assert_eq!(r.status(), "200");
    assert_eq!(r.reason(), "OK");
    assert_eq!(r.headers().get("server"), Some("httpserver"));
    assert_eq!(r.body(), b"1234567890\r\n");
    assert!(r.is_filled());
    assert_eq!(&written.borrow()[..], request.as_bytes());
}

#[test]
fn small_receive_buffer() {
    let script = Script::new()
        .then(b"HTTP/1.1 200 OK\r\nContent-Length: 12\r\n\r\n1234567890\r\n");
    let cfg = Config::new().recv_buffer_size(3).done();
    let mut t = Transport::with_stream(&cfg, script);
    let r = t.exchange(&get("/")).unwrap().unwrap();
    assert_eq!(r.body(), b"1234567890\r\n");
}

#[test]
fn closed_without_response() {
    let script = Script::new();
    let mut t = Transport::with_stream(&config(), script);
    assert!(t.exchange(&get("/")).unwrap().is_none());
}

#[test]
fn closed_in_the_middle_of_body() {
    let script = Script::new()
        .then(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial");
    let mut t = Transport::with_stream(&config(), script);
    let r = t.exchange(&get("/")).unwrap().unwrap();
    assert!(!r.is_filled());
    assert_eq!(r.body(), b"partial");
}

#[test]
fn closed_after_unterminated_status() {
    let script = Script::new().then(b"HTTP/1.1 204 No Content");
    let mut t = Transport::with_stream(&config(), script);
    let r = t.exchange(&get("/")).unwrap().unwrap();
    assert_eq!(r.status(), "204");
    assert!(!r.is_filled());
}

#[test]
fn send_error() {
    let mut script = Script::new().then(OK);
    script.fail_write = true;
    let mut t = Transport::with_stream(&config(), script);
    assert_matches!(t.exchange(&get("/")), Err(Error::Send(..)));
}

#[test]
fn malformed_response() {
    let script = Script::new().then(b"nonsense\r\n\r\n");
    let mut t = Transport::with_stream(&config(), script);
    assert_matches!(t.exchange(&get("/")),
                    Err(Error::MalformedStatusLine(..)));
}

#[test]
fn idle_limit() {
    let script = Script::new().then(b"HTTP/1.1 200 OK\r\n")
        .timeout().timeout().timeout().then(b"\r\n");
    let cfg = Config::new().max_idle_reads(2).done();
    let mut t = Transport::with_stream(&cfg, script);
    assert_matches!(t.exchange(&get("/")), Err(Error::ReadTimeout));
}

#[test]
fn idle_unlimited_by_default() {
    let script = Script::new().then(b"HTTP/1.1 200 OK\r\n")
        .timeout().timeout().timeout().then(b"\r\n");
    let mut t = Transport::with_stream(&config(), script);
    assert_eq!(t.exchange(&get("/")).unwrap().unwrap().status(), "200");
}

#[test]
fn disconnect_is_idempotent() {
    let script = Script::new().then(OK);
    let mut t = Transport::with_stream(&config(), script);
    assert!(t.is_connected());
    t.disconnect();
    t.disconnect();
    assert!(!t.is_connected());
    assert_matches!(t.exchange(&get("/")), Err(Error::NotConnected));
}

#[test]
fn follows_redirect() {
    let script = Script::new().then(MOVED).then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let r = fetch(&mut t, get("/")).unwrap().unwrap();
    assert_eq!(r.status(), "200");
    assert_eq!(r.body(), b"done");
    assert_eq!(count_requests(&written), 2);
    let sent = String::from_utf8_lossy(&written.borrow()).into_owned();
    assert!(sent.contains("GET /moved HTTP/1.1\r\n"));
}

#[test]
fn redirect_limit_zero() {
    let script = Script::new().then(MOVED).then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let request = Request::build("GET", "/", "a.com")
        .max_redirects(0).done().unwrap();
    let r = fetch(&mut t, request).unwrap().unwrap();
    assert_eq!(r.status(), "301");
    assert_eq!(count_requests(&written), 1);
}

#[test]
fn redirect_limit_one() {
    let script = Script::new().then(MOVED).then(MOVED).then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let request = Request::build("GET", "/", "a.com")
        .max_redirects(1).done().unwrap();
    let r = fetch(&mut t, request).unwrap().unwrap();
    assert_eq!(r.status(), "301");
    assert_eq!(count_requests(&written), 2);
}

#[test]
fn redirects_disabled() {
    let script = Script::new().then(MOVED).then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let request = Request::build("GET", "/", "a.com")
        .no_redirect(true).done().unwrap();
    let r = fetch(&mut t, request).unwrap().unwrap();
    assert_eq!(r.status(), "301");
    assert_eq!(count_requests(&written), 1);
}

#[test]
fn redirect_without_location() {
    let script = Script::new()
        .then(b"HTTP/1.1 301 Moved Permanently\r\nContent-Length: 0\r\n\r\n")
        .then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let r = fetch(&mut t, get("/")).unwrap().unwrap();
    assert_eq!(r.status(), "301");
    assert_eq!(count_requests(&written), 1);
}

#[test]
fn redirect_drops_post_body() {
    let script = Script::new().then(MOVED).then(OK);
    let written = script.written();
    let mut t = Transport::with_stream(&config(), script);
    let request = Request::build("POST", "/form", "a.com")
        .form_field("a=1").done().unwrap();
    fetch(&mut t, request).unwrap().unwrap();
    let sent = String::from_utf8_lossy(&written.borrow()).into_owned();
    let second = &sent[sent.find("GET ").expect("redirect sent")..];
    assert!(second.ends_with("Accept: */*\r\n\r\n"));
    assert!(!second.contains("Content-Length"));
}

struct Nowhere;

impl Resolve for Nowhere {
    fn resolve(&self, host: &str) -> Result<IpAddr, Error> {
        Err(Error::HostUnresolvable(host.to_string()))
    }
}

#[test]
fn unresolvable_host() {
    let mut t = Transport::new(&config());
    assert_matches!(t.connect_with(&Nowhere, "nowhere.invalid", 80),
                    Err(Error::HostUnresolvable(..)));
    assert!(!t.is_connected());
}

#[test]
fn connection_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut t = Transport::new(&config());
    assert_matches!(t.connect("127.0.0.1", port),
                    Err(Error::ConnectionRefused(..)));
}

#[test]
fn loopback_exchange() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (mut sock, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"\r\n\r\n") {
            let n = sock.read(&mut buf).unwrap();
            assert!(n > 0);
            request.extend_from_slice(&buf[..n]);
        }
        sock.write_all(b"HTTP/1.1 200 OK\r\nContent-Ty").unwrap();
        sock.flush().unwrap();
        thread::sleep(Duration::from_millis(150));
        sock.write_all(b"pe: text/plain\r\nContent-Length: 5\r\n\r\nhello")
            .unwrap();
        thread::sleep(Duration::from_millis(100));
        request
    });
    let cfg = Config::new().read_timeout(Duration::from_millis(50)).done();
    let mut t = Transport::new(&cfg);
    t.connect("127.0.0.1", port).unwrap();
    let request = Request::build("GET", "/hello", format!("127.0.0.1:{}", port))
        .done().unwrap();
    let r = t.exchange(&request).unwrap().unwrap();
    t.disconnect();
    assert_eq!(r.status(), "200");
    assert_eq!(r.headers().get("content-type"), Some("text/plain"));
    assert_eq!(r.body(), b"hello");
    assert_eq!(&server.join().unwrap()[..], request.as_bytes());
}
