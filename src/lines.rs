/// Iterator over pieces of a buffer split on a separator
///
/// Each item ends with the separator it was split on, except the last one
/// when the buffer doesn't end with a separator. Callers that need whole
/// lines should check `ends_with` and keep the tail until more data
/// arrives.
///
/// Created by `split_keeping_separator`.
#[derive(Debug, Clone)]
pub struct SplitKeeping<'a> {
    rest: &'a [u8],
    separator: &'a [u8],
}

/// Split `buffer` on every occurrence of `separator`, keeping the separator
/// attached to the end of each preceding piece
///
/// ```rust
/// use httpclient::split_keeping_separator;
///
/// let parts: Vec<&[u8]> = split_keeping_separator(b"a\r\nb\r\nc", b"\r\n")
///     .collect();
/// assert_eq!(parts, vec![&b"a\r\n"[..], &b"b\r\n"[..], &b"c"[..]]);
/// ```
///
/// # Panics
///
/// When separator is empty
pub fn split_keeping_separator<'a>(buffer: &'a [u8], separator: &'a [u8])
    -> SplitKeeping<'a>
{
    assert!(!separator.is_empty(), "separator must not be empty");
    SplitKeeping {
        rest: buffer,
        separator: separator,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl<'a> Iterator for SplitKeeping<'a> {
    type Item = &'a [u8];
    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        let end = match find(self.rest, self.separator) {
            Some(pos) => pos + self.separator.len(),
            None => self.rest.len(),
        };
        let (piece, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(piece)
    }
}
