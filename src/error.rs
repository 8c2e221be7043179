use std::path::PathBuf;

use thiserror::Error;

use darc::chunk::ChunkError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("opening input file {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("creating output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("creating output file {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("writing content to {}: {source}", path.display())]
    Content { path: PathBuf, source: ChunkError },
    #[error("parsing chunk at offset {offset:#x}: {source}")]
    Chunk { offset: u64, source: ChunkError },
    #[error("reading config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn chunk(offset: u64, source: ChunkError) -> Self {
        AppError::Chunk { offset, source }
    }
}
