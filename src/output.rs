//! Writing the final response to the user
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use client::{Error, Response};
use decode::{decode, Content};


/// Where the response body goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Raw body bytes to stdout, requested by `-`
    Raw,
    /// Raw body bytes to the file
    File(PathBuf),
    /// Body decoded to text (when possible) to stdout
    Decoded,
}

impl Destination {
    /// Destination from the value of an `--output` option
    pub fn from_arg(arg: Option<&str>) -> Destination {
        match arg {
            None => Destination::Decoded,
            Some("-") => Destination::Raw,
            Some(path) => Destination::File(PathBuf::from(path)),
        }
    }
}

/// Content to show for the response
///
/// For bad responses (404, 403) it's the reason phrase, otherwise the
/// decoded body.
pub fn render(response: &Response) -> Content {
    if response.is_bad() {
        return Content::Text(response.reason().to_string());
    }
    decode(response.body(), response.headers().get("Content-Type"))
}

fn payload(response: &Response) -> &[u8] {
    if response.is_bad() {
        response.reason().as_bytes()
    } else {
        response.body()
    }
}

/// Write response to the destination
///
/// `stdout` is used for all destinations except `File`.
pub fn write<W: Write>(response: &Response, destination: &Destination,
    stdout: &mut W)
    -> Result<(), Error>
{
    match *destination {
        Destination::Decoded => {
            let content = render(response);
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
        Destination::Raw => {
            stdout.write_all(payload(response))?;
            stdout.flush()?;
        }
        Destination::File(ref path) => {
            let mut file = File::create(path)?;
            file.write_all(payload(response))?;
            info!("{} bytes written to {:?}",
                  payload(response).len(), path);
        }
    }
    Ok(())
}
