//! Minimal blocking HTTP/1.1 client working on top of a raw byte stream
#![recursion_limit="100"]

extern crate url;
extern crate rand;
extern crate netbuf;
extern crate argparse;
extern crate encoding_rs;
extern crate chardetng;
#[macro_use(quick_error)] extern crate quick_error;
#[macro_use] extern crate matches;
#[macro_use] extern crate log;


pub mod client;
pub mod enums;
pub mod headers;
pub mod decode;
pub mod output;
pub mod cli;
mod lines;

pub use enums::{Version, Method};
pub use headers::Headers;
pub use lines::{split_keeping_separator, SplitKeeping};
