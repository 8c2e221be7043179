//! Chunk stream container format
//!
//! A container is a flat, forward-only sequence of self describing chunks.
//! Each chunk carries a tag naming its purpose, a block of free form
//! `KEY/VALUE` metadata and an opaque content payload. There is no file
//! header, index, compression or checksum; a file ends where its last chunk
//! ends.
//!
//! # Chunk Layout
//!
//! Unless otherwise noted everything is stored in Little Endian format and
//! there is no alignment padding.
//!
//! | Type    | Name        | Description |
//! | ------: | ----------- | ----------- |
//! | [u8; 8] | tag         | Printable characters, such as `**%%DOCU` |
//! | u32     | meta_len    | Length of the metadata block, may be 0 |
//! | [u8; N] | metadata    | Newline separated `KEY/VALUE` lines |
//! | u32     | content_len | Length of the content block, may be 0 |
//! | [u8; N] | content     | Opaque payload, interpret according to the tag |
//!
//! The tag and `meta_len` together form the fixed 12 byte header (see:
//! [`raw::RawHeader`]).
//!
//! # Metadata
//!
//! Each line is split at its first `/`, anything after that (including
//! further `/`) is the value. Lines without a `/` are ignored and a repeated
//! key replaces the earlier value. See [`meta::Metadata`].
//!
//! # Reading
//!
//! [`reader::ChunkReader`] decodes one header + metadata block per call and
//! then stops with the stream positioned on the first content byte. The
//! caller decides what happens to the content (copy it out, skip it) before
//! asking for the next chunk. A stream that ends exactly on a chunk boundary
//! is well formed; ending anywhere else is reported as a truncation.
//!
//! ## `**%%DOCU`
//!
//! Document chunk. The `FILENAME` metadata key names the file the content
//! should be extracted to.
pub mod builder;
pub mod error;
pub mod meta;
pub mod raw;
pub mod reader;
pub mod tag;

pub use error::ChunkError;
pub use meta::Metadata;
pub use reader::{Chunk, ChunkReader};
pub use tag::Tag;

pub const TAG_LEN: usize = 8;
pub const HEADER_LEN: usize = TAG_LEN + 4;
pub const CONTENT_LEN_LEN: usize = 4;

// 10MiB metadata cap
pub const DEFAULT_MAX_META_SIZE: u64 = 10 * 1024 * 1024;

pub const DOCUMENT_TAG: [u8; TAG_LEN] = *b"**%%DOCU";
pub const FILENAME_KEY: &str = "FILENAME";
