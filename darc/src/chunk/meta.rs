use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt;

/// Decoded metadata block of a chunk.
///
/// Ordered by key so diagnostic output is stable between runs.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    inner: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata {
            inner: BTreeMap::new(),
        }
    }

    /// Split `data` into lines and each line at its first `/`.
    ///
    /// Lines without a `/` are dropped and later keys win over earlier ones.
    /// A trailing `\r` is stripped from each line.
    pub fn parse(data: &[u8]) -> Self {
        let mut meta = Metadata::new();

        for line in data.split(|b| *b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if let Some(split) = line.iter().position(|b| *b == b'/') {
                meta.insert(
                    String::from_utf8_lossy(&line[..split]).into_owned(),
                    String::from_utf8_lossy(&line[split + 1..]).into_owned(),
                );
            }
        }
        meta
    }

    fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.inner.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.inner.iter()
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
