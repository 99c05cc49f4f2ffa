//! Case-insensitive header storage and header name predicates
use std::collections::HashMap;
use std::fmt;
use std::slice::Iter as SliceIter;


pub fn is_content_length(val: &str) -> bool {
    val.eq_ignore_ascii_case("Content-Length")
}

pub fn is_content_type(val: &str) -> bool {
    val.eq_ignore_ascii_case("Content-Type")
}

/// Ordered header map with case-insensitive keys
///
/// Names keep the casing they were last written with, and entries keep
/// the position of their first insertion. Only one value is stored per
/// name: setting an existing header (in any casing) replaces its value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
    // lowercased name -> position in `entries`
    index: HashMap<String, usize>,
}

/// Iterator over `(name, value)` pairs in insertion order
///
/// Created by `Headers::iter`.
pub struct HeaderIter<'a> {
    iter: SliceIter<'a, (String, String)>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers::default()
    }
    /// Get value of the header, comparing names case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(&name.to_ascii_lowercase())
            .map(|&idx| &self.entries[idx].1[..])
    }
    /// Store a header, overwriting the value of any header with the same
    /// case-insensitive name
    pub fn set<N, V>(&mut self, name: N, value: V)
        where N: Into<String>, V: Into<String>
    {
        let name = name.into();
        let value = value.into();
        let key = name.to_ascii_lowercase();
        if let Some(&idx) = self.index.get(&key) {
            self.entries[idx] = (name, value);
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((name, value));
    }
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_ascii_lowercase())
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> HeaderIter {
        HeaderIter { iter: self.entries.iter() }
    }
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = (&'a str, &'a str);
    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        self.iter.next().map(|&(ref k, ref v)| (&k[..], &v[..]))
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = HeaderIter<'a>;
    fn into_iter(self) -> HeaderIter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
