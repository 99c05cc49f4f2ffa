//! Encoder of `multipart/form-data` bodies
use std::io::Write;

use rand::{thread_rng, Rng};
use rand::distributions::Alphanumeric;

use client::Error;


/// Dashes the boundary starts with
const BOUNDARY_PREFIX: &'static str = "------------------------";
/// Number of random characters after the prefix
const BOUNDARY_RANDOM: usize = 16;
/// Total length of a generated boundary
pub const BOUNDARY_LEN: usize = 40;


/// Generate a new random boundary
///
/// It's a fixed prefix of dashes followed by random alphanumeric
/// characters, `BOUNDARY_LEN` characters in total.
pub fn boundary() -> String {
    let mut result = String::with_capacity(BOUNDARY_LEN);
    result.push_str(BOUNDARY_PREFIX);
    result.extend(thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM)
        .map(char::from));
    debug_assert_eq!(result.len(), BOUNDARY_LEN);
    result
}

/// Split `name=value` field on the first equals sign
///
/// Value may contain more equals signs. A field without any is
/// a validation error.
pub fn split_field(field: &str) -> Result<(&str, &str), Error> {
    let mut pair = field.splitn(2, '=');
    match (pair.next(), pair.next()) {
        (Some(name), Some(value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(Error::Validation(
            format!("form field {:?} is not in name=value format", field))),
    }
}

/// Encode form fields as a multipart body delimited by `boundary`
pub fn encode<S: AsRef<str>>(fields: &[S], boundary: &str)
    -> Result<Vec<u8>, Error>
{
    let mut body = Vec::new();
    for field in fields {
        let (name, value) = split_field(field.as_ref())?;
        write!(&mut body, "--{}\r\n\
            Content-Disposition: form-data; name=\"{}\"\r\n\
            \r\n\
            {}\r\n", boundary, name, value)?;
    }
    write!(&mut body, "--{}--\r\n", boundary)?;
    Ok(body)
}
