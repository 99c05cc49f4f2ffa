use std::sync::Arc;
use std::time::Duration;

use client::{Config};

impl Config {
    /// Create a config with defaults
    pub fn new() -> Config {
        Config {
            read_timeout: Duration::new(1, 0),
            connect_timeout: None,
            recv_buffer_size: 64*1024,
            max_idle_reads: None,
        }
    }
    /// Timeout of a single socket read
    ///
    /// A timed out read is not an error, the response is just read again.
    /// So by default this value doesn't bound the total duration of
    /// an exchange, see `max_idle_reads`.
    pub fn read_timeout(&mut self, value: Duration) -> &mut Self {
        self.read_timeout = value;
        self
    }
    /// Timeout of establishing a connection
    ///
    /// Defaults to the `read_timeout`.
    pub fn connect_timeout(&mut self, value: Duration) -> &mut Self {
        self.connect_timeout = Some(value);
        self
    }
    /// Maximum number of bytes received by a single read
    ///
    /// # Panics
    ///
    /// When `value` is zero.
    pub fn recv_buffer_size(&mut self, value: usize) -> &mut Self {
        assert!(value > 0, "receive buffer can't be empty");
        self.recv_buffer_size = value;
        self
    }
    /// Give up after this number of subsequent read timeouts
    ///
    /// Unlimited by default.
    pub fn max_idle_reads(&mut self, value: u32) -> &mut Self {
        self.max_idle_reads = Some(value);
        self
    }
    /// Create a Arc'd config clone to pass to the constructor
    ///
    /// This is just a convenience method.
    pub fn done(&mut self) -> Arc<Config> {
        Arc::new(self.clone())
    }
    pub(crate) fn get_connect_timeout(&self) -> Duration {
        self.connect_timeout.unwrap_or(self.read_timeout)
    }
}
