extern crate httpclient;
extern crate env_logger;
#[macro_use] extern crate log;

use std::io;
use std::process::exit;

use httpclient::cli::Options;
use httpclient::client::{Error, Transport, fetch};
use httpclient::output;


/// Returns false for a bad response
fn run(opt: &Options) -> Result<bool, Error> {
    let target = opt.target()?;
    let request = opt.request()?;
    let mut transport = Transport::new(&opt.config()?);
    transport.connect(&target.host, target.port)?;
    let result = fetch(&mut transport, request);
    transport.disconnect();
    let response = match result? {
        Some(response) => response,
        None => {
            warn!("server closed connection without response");
            return Ok(true);
        }
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write(&response, &opt.destination(), &mut out)?;
    Ok(!response.is_bad())
}

pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")).init();

    let opt = Options::from_env();
    match run(&opt) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            exit(1);
        }
    }
}
