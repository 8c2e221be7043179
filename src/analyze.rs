use std::io::{Read, Write};
use std::path::Path;

use log::warn;

use darc::chunk::ChunkReader;
use dcore::tally::Tally;

use crate::error::AppError;
use crate::input::open_input;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalyzeSummary {
    pub chunks: usize,
    pub trailing: Option<u64>,
}

pub fn run<W: Write>(
    input: &Path,
    max_meta_size: u64,
    out: &mut W,
) -> Result<AnalyzeSummary, AppError> {
    analyze(open_input(input)?, max_meta_size, out)
}

/// Print every chunk header and its metadata, content is skipped.
pub fn analyze<R: Read, W: Write>(
    input: Tally<R>,
    max_meta_size: u64,
    out: &mut W,
) -> Result<AnalyzeSummary, AppError> {
    let mut reader = ChunkReader::new(input, max_meta_size);
    let mut summary = AnalyzeSummary::default();

    loop {
        let offset = reader.get_ref().position();

        let chunk = match reader.next_chunk() {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) if e.is_truncated() => {
                warn!("{} at offset {:#x}", e, offset);
                writeln!(out, "Trailing bytes at offset {:#x}", offset)?;
                summary.trailing = Some(offset);
                break;
            }
            Err(e) => return Err(AppError::chunk(offset, e)),
        };

        writeln!(
            out,
            "Offset: {:#x}, Tag: {}, MetaLen: {}",
            offset, chunk.tag, chunk.meta_len
        )?;
        writeln!(out, "  Metadata: {:?}", chunk.metadata)?;
        writeln!(out, "  ContentLen: {}", chunk.content_len)?;

        match reader.skip_content(&chunk) {
            Ok(_) => summary.chunks += 1,
            Err(e) if e.is_truncated() => {
                warn!("{} at offset {:#x}", e, offset);
                writeln!(out, "Trailing bytes at offset {:#x}", offset)?;
                summary.trailing = Some(offset);
                break;
            }
            Err(e) => return Err(AppError::chunk(offset, e)),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod test_analyze {
    use super::*;
    use darc::chunk::builder::ChunkBuilder;
    use darc::chunk::{ChunkError, DOCUMENT_TAG};
    use std::io::Cursor;

    // 27 bytes, the newline after the last line is part of the block
    const SCENARIO_META: &[u8] = b"FILENAME/test.txt\nSIZE/100\n";

    fn run_on(data: Vec<u8>) -> (Result<AnalyzeSummary, AppError>, String) {
        let mut out = Vec::new();
        let res = analyze(Tally::new(Cursor::new(data)), 1024, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn dump_two_chunks() {
        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_raw(&DOCUMENT_TAG, SCENARIO_META, &[b'A'; 10]).unwrap();
        builder.write_raw(b"TAG12345", b"no slash here", b"xyz").unwrap();

        let (res, out) = run_on(builder.into_inner());

        assert_eq!(
            res.unwrap(),
            AnalyzeSummary {
                chunks: 2,
                trailing: None
            }
        );
        assert_eq!(
            out,
            concat!(
                "Offset: 0x0, Tag: **%%DOCU, MetaLen: 27\n",
                "  Metadata: {\"FILENAME\": \"test.txt\", \"SIZE\": \"100\"}\n",
                "  ContentLen: 10\n",
                "Offset: 0x35, Tag: TAG12345, MetaLen: 13\n",
                "  Metadata: {}\n",
                "  ContentLen: 3\n",
            )
        );
    }

    #[test]
    fn trailing_bytes() {
        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_raw(b"TAG12345", b"", b"").unwrap();
        let mut data = builder.into_inner();
        data.extend_from_slice(&[1, 2, 3]);

        let (res, out) = run_on(data);

        assert_eq!(res.unwrap().trailing, Some(16));
        assert!(out.ends_with("Trailing bytes at offset 0x10\n"));
    }

    #[test]
    fn cut_inside_metadata() {
        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_raw(b"TAG12345", b"", b"").unwrap();
        builder.write_raw(b"TAG12345", b"KEY/VALUE", b"").unwrap();
        let mut data = builder.into_inner();
        // Second header plus 3 of its 9 metadata bytes
        data.truncate(16 + 12 + 3);

        let (res, out) = run_on(data);

        assert_eq!(
            res.unwrap(),
            AnalyzeSummary {
                chunks: 1,
                trailing: Some(16)
            }
        );
        assert!(out.ends_with("Trailing bytes at offset 0x10\n"));
    }

    #[test]
    fn cut_inside_content() {
        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_raw(b"TAG12345", b"", b"").unwrap();
        builder.write_raw(b"TAG12345", b"", b"0123456789").unwrap();
        let mut data = builder.into_inner();
        data.truncate(data.len() - 4);

        let (res, out) = run_on(data);

        assert_eq!(
            res.unwrap(),
            AnalyzeSummary {
                chunks: 1,
                trailing: Some(16)
            }
        );
        assert!(out.contains("Offset: 0x10, Tag: TAG12345, MetaLen: 0\n"));
        assert!(out.ends_with("Trailing bytes at offset 0x10\n"));
    }

    #[test]
    fn invalid_tag_has_offset() {
        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_raw(b"TAG12345", b"", b"").unwrap();
        builder.write_raw(b"BAD\x00\x00TAG", b"", b"").unwrap();

        match run_on(builder.into_inner()).0 {
            Err(AppError::Chunk {
                offset,
                source: ChunkError::InvalidTag(_),
            }) => assert_eq!(offset, 16),
            x => panic!("Expected InvalidTag, got {:?}", x),
        }
    }

    #[test]
    fn writes_nothing_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.env");

        let mut builder = ChunkBuilder::new(Vec::new());
        builder.write_document("doc.txt", b"hello").unwrap();
        std::fs::write(&input, builder.into_inner()).unwrap();

        let mut out = Vec::new();
        assert_eq!(run(&input, 1024, &mut out).unwrap().chunks, 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
