//! Command-line options of the `httpclient` binary
use std::io::{stdout, stderr};
use std::sync::Arc;
use std::time::Duration;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue, Collect};
use url::Url;

use client::{Config, Error, Request};
use output::Destination;


/// Default port of the `http` scheme
pub const HTTP_PORT: u16 = 80;


/// Parsed command-line
#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
    pub method: String,
    pub path: Option<String>,
    pub headers: Vec<String>,
    pub cookies: Vec<String>,
    pub form: Vec<String>,
    pub body: Option<String>,
    pub user_agent: String,
    pub output: Option<String>,
    pub no_redirects: bool,
    pub max_redirects: usize,
    pub timeout: u64,
}

/// Where to connect and what to ask for, derived from the url
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Target {
    /// Value of the `Host` header
    pub fn host_header(&self) -> String {
        if self.port == HTTP_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Options {
    pub fn new() -> Options {
        Options {
            url: String::new(),
            method: "GET".into(),
            path: None,
            headers: Vec::new(),
            cookies: Vec::new(),
            form: Vec::new(),
            body: None,
            user_agent: concat!("httpclient/", env!("CARGO_PKG_VERSION"))
                .into(),
            output: None,
            no_redirects: false,
            max_redirects: 10,
            timeout: 1,
        }
    }

    fn parser<'x>(&'x mut self) -> ArgumentParser<'x> {
        let mut ap = ArgumentParser::new();
        ap.set_description("Fetch an url over plain HTTP/1.1");
        ap.refer(&mut self.url)
            .add_argument("url", Store, "Url to request").required();
        ap.refer(&mut self.method)
            .add_option(&["-m", "--method"], Store,
                "Request method (default GET, POST if form is given)");
        ap.refer(&mut self.path)
            .add_option(&["--path"], StoreOption,
                "Request path overriding the one in the url");
        ap.refer(&mut self.headers)
            .add_option(&["-H", "--header"], Collect,
                "Add request header, e.g. `Accept-Language: en`");
        ap.refer(&mut self.cookies)
            .add_option(&["--cookie"], Collect,
                "Add a cookie in `name=value` format");
        ap.refer(&mut self.form)
            .add_option(&["-F", "--form"], Collect,
                "Add a multipart form field in `name=value` format");
        ap.refer(&mut self.body)
            .add_option(&["--body"], StoreOption, "Request body");
        ap.refer(&mut self.user_agent)
            .add_option(&["--user-agent"], Store, "User-Agent header");
        ap.refer(&mut self.output)
            .add_option(&["-o", "--output"], StoreOption,
                "Write body to the file, `-` writes undecoded body \
                 to stdout");
        ap.refer(&mut self.no_redirects)
            .add_option(&["--no-redirects"], StoreTrue,
                "Don't follow redirects");
        ap.refer(&mut self.max_redirects)
            .add_option(&["--max-redirects"], Store,
                "Maximum number of redirects to follow");
        ap.refer(&mut self.timeout)
            .add_option(&["--timeout"], Store,
                "Timeout of a single socket operation in seconds");
        ap
    }

    /// Parse the arguments, the first one is the program name
    ///
    /// Returns the exit code on failure (or on `--help`), the message is
    /// already printed.
    pub fn parse_args(args: Vec<String>) -> Result<Options, i32> {
        let mut opt = Options::new();
        opt.parser().parse(args, &mut stdout(), &mut stderr())?;
        Ok(opt)
    }

    /// Parse the process arguments, exits on failure
    pub fn from_env() -> Options {
        let mut opt = Options::new();
        opt.parser().parse_args_or_exit();
        opt
    }

    /// Split the url into the connection target and the request path
    ///
    /// Url without a scheme is assumed to be `http`.
    pub fn target(&self) -> Result<Target, Error> {
        let url = if self.url.contains("://") {
            Url::parse(&self.url)?
        } else {
            Url::parse(&format!("http://{}",
                self.url.trim_start_matches("//")))?
        };
        if url.scheme() != "http" {
            return Err(Error::UnsupportedScheme(url.scheme().to_string()));
        }
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(Error::Validation("url has no host".into())),
        };
        let path = match self.path {
            Some(ref path) => path.clone(),
            None => match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            },
        };
        Ok(Target {
            host: host,
            port: url.port().unwrap_or(HTTP_PORT),
            path: path,
        })
    }

    /// Build the first request
    ///
    /// Headers are sent in the order: `--header` values, `User-Agent`,
    /// `Connection`, `Cookie`.
    pub fn request(&self) -> Result<Request, Error> {
        let target = self.target()?;
        let method = if self.form.is_empty() { &self.method[..] } else { "POST" };
        let mut builder = Request::build(method,
            &target.path[..], target.host_header());
        for line in &self.headers {
            builder.add_header(&line[..]);
        }
        builder.add_header(format!("User-Agent: {}", self.user_agent));
        builder.add_header("Connection: keep-alive");
        if !self.cookies.is_empty() {
            builder.add_header(format!("Cookie: {}", self.cookies.join("; ")));
        }
        for field in &self.form {
            builder.form_field(&field[..]);
        }
        if let Some(ref body) = self.body {
            builder.body(body.as_bytes());
        }
        builder.no_redirect(self.no_redirects);
        builder.max_redirects(self.max_redirects);
        builder.done()
    }

    pub fn destination(&self) -> Destination {
        Destination::from_arg(self.output.as_ref().map(|x| &x[..]))
    }

    pub fn config(&self) -> Result<Arc<Config>, Error> {
        if self.timeout == 0 {
            return Err(Error::Validation("timeout must be positive".into()));
        }
        Ok(Config::new()
            .read_timeout(Duration::from_secs(self.timeout))
            .done())
    }
}
