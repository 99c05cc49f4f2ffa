//! The HTTP/1.1 client protocol implementation
//!
//! The usual flow is: build a `Request`, connect a `Transport`, and
//! `fetch` the request which follows redirects if needed.
//!
//! ```rust,no_run
//! use httpclient::client::{Config, Request, Transport, fetch};
//!
//! let config = Config::new().done();
//! let mut transport = Transport::new(&config);
//! transport.connect("example.com", 80).unwrap();
//! let request = Request::build("GET", "/", "example.com")
//!     .add_header("User-Agent: httpclient")
//!     .done().unwrap();
//! if let Some(response) = fetch(&mut transport, request).unwrap() {
//!     println!("{} {}", response.status(), response.reason());
//! }
//! transport.disconnect();
//! ```
mod config;
mod connect;
mod errors;
mod parser;
mod redirect;
mod request;
mod response;
mod transport;
pub mod multipart;

pub use self::errors::Error;
pub use self::connect::{Resolve, SystemResolver};
pub use self::parser::ResponseAssembler;
pub use self::redirect::{fetch, next_hop};
pub use self::request::{Request, RequestBuilder};
pub use self::response::Response;
pub use self::transport::Transport;

use std::time::Duration;

/// Fine-grained configuration of the HTTP connection
#[derive(Debug, Clone)]
pub struct Config {
    read_timeout: Duration,
    connect_timeout: Option<Duration>,
    recv_buffer_size: usize,
    max_idle_reads: Option<u32>,
}
