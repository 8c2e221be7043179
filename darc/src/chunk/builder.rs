use std::io::{Error, ErrorKind, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::chunk::raw::RawHeader;
use crate::chunk::{DOCUMENT_TAG, FILENAME_KEY, TAG_LEN};

fn wire_len(what: &str, len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("{} of {} bytes does not fit a u32 length", what, len),
        )
    })
}

pub struct ChunkBuilder<W: Write> {
    inner: W,
}

// This is the high level writer interface
impl<W: Write> ChunkBuilder<W> {
    pub fn new(writer: W) -> Self {
        ChunkBuilder { inner: writer }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Tag, metadata length, metadata, content length, content.
    /// The tag is written as is, nothing is validated.
    pub fn write_raw(
        &mut self,
        tag: &[u8; TAG_LEN],
        metadata: &[u8],
        content: &[u8],
    ) -> Result<usize, Error> {
        let header = RawHeader {
            tag: *tag,
            meta_len: wire_len("metadata", metadata.len())?,
        };
        let content_len = wire_len("content", content.len())?;

        self.inner.write_all(&header.to_bytes())?;
        self.inner.write_all(metadata)?;
        self.inner.write_u32::<LittleEndian>(content_len)?;
        self.inner.write_all(content)?;

        Ok(header.to_bytes().len() + metadata.len() + 4 + content.len())
    }

    pub fn write_chunk(
        &mut self,
        tag: &[u8; TAG_LEN],
        metadata: &[(&str, &str)],
        content: &[u8],
    ) -> Result<usize, Error> {
        let block = metadata
            .iter()
            .map(|(k, v)| format!("{}/{}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        self.write_raw(tag, block.as_bytes(), content)
    }

    pub fn write_document(&mut self, filename: &str, content: &[u8]) -> Result<usize, Error> {
        self.write_chunk(&DOCUMENT_TAG, &[(FILENAME_KEY, filename)], content)
    }
}
