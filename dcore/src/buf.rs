use std::io::{ErrorKind, Read};

/// Read until `buf` is full or the reader runs dry.
///
/// Returns `(eof, len)`. `eof` is set when the reader hit its end before
/// `buf` was full, and `len` is how many leading bytes of `buf` are valid.
/// `(true, 0)` is a clean end, `(true, n)` with `n > 0` is a short record.
pub fn fill_buf<R: Read>(data: &mut R, buf: &mut [u8]) -> std::io::Result<(bool, usize)> {
    let mut filled = 0;

    loop {
        let rest = &mut buf[filled..];
        if rest.is_empty() {
            return Ok((false, filled));
        }

        match data.read(rest) {
            Ok(0) => return Ok((true, filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
