use std::io::Read;

use log::trace;

/// Counts the bytes pulled through it so a forward-only stream can still
/// report offsets.
pub struct Tally<R: Read> {
    inner: R,
    pos: u64,
}

impl<R: Read> Tally<R> {
    pub fn new(reader: R) -> Self {
        Tally {
            inner: reader,
            pos: 0,
        }
    }

    /// Bytes read so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Tally<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = self.inner.read(buf)?;
        self.pos += len as u64;
        trace!("tally: +{} -> {}", len, self.pos);
        Ok(len)
    }
}
