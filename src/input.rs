use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use dcore::tally::Tally;

use crate::error::AppError;

/// Open the container file, a missing file gets its own error.
pub fn open_input(path: &Path) -> Result<Tally<BufReader<File>>, AppError> {
    match File::open(path) {
        Ok(file) => Ok(Tally::new(BufReader::new(file))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::InputNotFound(path.to_path_buf()))
        }
        Err(source) => Err(AppError::OpenInput {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod test_open_input {
    use super::*;

    #[test]
    fn missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.env");

        match open_input(&path) {
            Err(AppError::InputNotFound(p)) => assert_eq!(p, path),
            Err(e) => panic!("Expected InputNotFound, got {:?}", e),
            Ok(_) => panic!("Expected InputNotFound, got a reader"),
        }
    }

    #[test]
    fn starts_at_zero() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(open_input(file.path()).unwrap().position(), 0);
    }
}
