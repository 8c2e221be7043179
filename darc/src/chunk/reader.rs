use std::io::{copy, sink, Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use dcore::buf::fill_buf;

use crate::chunk::error::ChunkError;
use crate::chunk::meta::Metadata;
use crate::chunk::raw::RawHeader;
use crate::chunk::tag::Tag;
use crate::chunk::{CONTENT_LEN_LEN, HEADER_LEN};

/// One decoded header + metadata block. The content is still in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: Tag,
    // As declared on the wire
    pub meta_len: u32,
    pub metadata: Metadata,
    pub content_len: u32,
}

/// Forward only chunk decoder.
///
/// Each [`ChunkReader::next_chunk`] consumes a header, metadata block and
/// content length and leaves the stream on the first content byte. The
/// caller has to consume exactly `content_len` bytes (see
/// [`ChunkReader::copy_content`] and [`ChunkReader::skip_content`]) before
/// decoding the next chunk.
///
/// After any error the stream position is unspecified and the reader should
/// not be used further.
pub struct ChunkReader<R: Read> {
    inner: R,
    max_meta_size: u64,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(reader: R, max_meta_size: u64) -> Self {
        ChunkReader {
            inner: reader,
            max_meta_size,
        }
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

    /// Decode the next chunk, `Ok(None)` on a clean end of stream.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, ChunkError> {
        let header = {
            let mut buf: [u8; HEADER_LEN] = [0; HEADER_LEN];
            match fill_buf(&mut self.inner, &mut buf)? {
                (true, 0) => return Ok(None),
                (true, got) => return Err(ChunkError::TruncatedHeader { got }),
                (false, _) => RawHeader::from_bytes(&buf),
            }
        };

        // Must happen before anything gets allocated off of meta_len
        if u64::from(header.meta_len) > self.max_meta_size {
            return Err(ChunkError::MetadataTooLarge {
                declared: header.meta_len,
                limit: self.max_meta_size,
            });
        }

        let tag = Tag::try_from(header.tag)?;

        let metadata = {
            let mut data = vec![0; header.meta_len as usize];
            match fill_buf(&mut self.inner, &mut data)? {
                (true, got) => {
                    return Err(ChunkError::TruncatedMetadata {
                        want: header.meta_len,
                        got,
                    })
                }
                (false, _) => Metadata::parse(&data),
            }
        };

        let content_len = {
            let mut buf: [u8; CONTENT_LEN_LEN] = [0; CONTENT_LEN_LEN];
            match fill_buf(&mut self.inner, &mut buf)? {
                (true, got) => return Err(ChunkError::TruncatedContentLength { got }),
                (false, _) => LittleEndian::read_u32(&buf),
            }
        };

        debug!(
            "{}: meta_len {} ({} keys), content_len {}",
            tag,
            header.meta_len,
            metadata.len(),
            content_len
        );

        Ok(Some(Chunk {
            tag,
            meta_len: header.meta_len,
            metadata,
            content_len,
        }))
    }

    /// Copy exactly `chunk.content_len` bytes from the stream into `out`.
    pub fn copy_content<W: Write + ?Sized>(
        &mut self,
        chunk: &Chunk,
        out: &mut W,
    ) -> Result<u64, ChunkError> {
        let want = chunk.content_len;
        let got = copy(&mut (&mut self.inner).take(u64::from(want)), out)?;

        if got < u64::from(want) {
            return Err(ChunkError::TruncatedContent { want, got });
        }
        Ok(got)
    }

    /// Discard exactly `chunk.content_len` bytes from the stream.
    pub fn skip_content(&mut self, chunk: &Chunk) -> Result<u64, ChunkError> {
        self.copy_content(chunk, &mut sink())
    }
}
