use std::io::{Read, Write};

use client::{Error, Request, Response, Transport};


/// Returns the request for the next hop, if the response should be followed
///
/// Only `301 Moved Permanently` responses with a `Location` are followed,
/// unless redirects are disabled or `hops` already reached the limit.
pub fn next_hop(request: &Request, response: &Response, hops: usize)
    -> Option<Request>
{
    if request.no_redirect() {
        return None;
    }
    if let Some(max) = request.max_redirects() {
        if hops >= max {
            debug!("redirect limit of {} reached", max);
            return None;
        }
    }
    let location = response.redirect_location()?;
    match request.redirect(location) {
        Ok(next) => Some(next),
        Err(e) => {
            warn!("can't follow redirect to {:?}: {}", location, e);
            None
        }
    }
}

/// Send `request` following permanent redirects
///
/// Each hop is a new `GET` request sent over the same transport. Returns
/// the last response received, or `None` if the peer closed connection
/// without responding.
pub fn fetch<S: Read + Write>(transport: &mut Transport<S>, request: Request)
    -> Result<Option<Response>, Error>
{
    let mut request = request;
    let mut hops = 0;
    loop {
        let response = match transport.exchange(&request)? {
            Some(response) => response,
            None => return Ok(None),
        };
        match next_hop(&request, &response, hops) {
            Some(next) => {
                hops += 1;
                info!("following redirect #{} to {}", hops, next.target());
                request = next;
            }
            None => return Ok(Some(response)),
        }
    }
}
