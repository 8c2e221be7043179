use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use darc::chunk::{ChunkError, ChunkReader, FILENAME_KEY};
use dcore::tally::Tally;

use crate::error::AppError;
use crate::input::open_input;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub chunks: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub bytes: u64,
    // Offset of the incomplete header at the end of the file, if any
    pub trailing: Option<u64>,
}

// FILENAME has to name a plain file directly inside the output directory
fn document_path(output_dir: &Path, name: &str) -> Option<PathBuf> {
    let mut parts = Path::new(name).components();

    match (parts.next(), parts.next()) {
        (Some(Component::Normal(file)), None) => Some(output_dir.join(file)),
        _ => None,
    }
}

pub fn run<W: Write>(
    input: &Path,
    output_dir: &Path,
    max_meta_size: u64,
    out: &mut W,
) -> Result<ExtractSummary, AppError> {
    create_dir_all(output_dir).map_err(|source| AppError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let reader = open_input(input)?;
    info!("extracting {} into {}", input.display(), output_dir.display());

    extract(reader, output_dir, max_meta_size, out)
}

pub fn extract<R: Read, W: Write>(
    input: Tally<R>,
    output_dir: &Path,
    max_meta_size: u64,
    out: &mut W,
) -> Result<ExtractSummary, AppError> {
    let mut reader = ChunkReader::new(input, max_meta_size);
    let mut summary = ExtractSummary::default();

    loop {
        let offset = reader.get_ref().position();

        let chunk = match reader.next_chunk() {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(ChunkError::TruncatedHeader { got }) => {
                warn!("{} trailing bytes at offset {:#x}", got, offset);
                writeln!(
                    out,
                    "Reached end of file with trailing bytes at offset {:#x}.",
                    offset
                )?;
                summary.trailing = Some(offset);
                break;
            }
            Err(e) => return Err(AppError::chunk(offset, e)),
        };
        summary.chunks += 1;

        if !chunk.tag.is_document() {
            debug!("skipping {} at {:#x}", chunk.tag, offset);
            reader
                .skip_content(&chunk)
                .map_err(|e| AppError::chunk(offset, e))?;
            continue;
        }

        let name = match chunk.metadata.get(FILENAME_KEY) {
            Some(name) => name,
            None => {
                warn!("DOCU chunk at offset {:#x} without FILENAME", offset);
                reader
                    .skip_content(&chunk)
                    .map_err(|e| AppError::chunk(offset, e))?;
                summary.skipped += 1;
                continue;
            }
        };

        let path = match document_path(output_dir, name) {
            Some(path) => path,
            None => {
                warn!(
                    "DOCU chunk at offset {:#x} has unusable FILENAME {:?}",
                    offset, name
                );
                reader
                    .skip_content(&chunk)
                    .map_err(|e| AppError::chunk(offset, e))?;
                summary.skipped += 1;
                continue;
            }
        };

        let mut file = File::create(&path).map_err(|source| AppError::CreateOutput {
            path: path.clone(),
            source,
        })?;
        let len = reader
            .copy_content(&chunk, &mut file)
            .map_err(|source| AppError::Content {
                path: path.clone(),
                source,
            })?;

        writeln!(out, "Extracted: {} ({} bytes)", name, len)?;
        summary.extracted += 1;
        summary.bytes += len;
    }

    writeln!(out, "Extraction complete.")?;
    info!("{:?}", summary);
    Ok(summary)
}
