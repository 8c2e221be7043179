use std::fmt;

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::chunk::error::ChunkError;
use crate::chunk::{DOCUMENT_TAG, TAG_LEN};

/// An 8 byte chunk tag that is known to be printable.
///
/// The raw bytes are kept as is; `as_str` is the UTF-8 rendering where any
/// invalid byte shows up as U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    raw: [u8; TAG_LEN],
    text: String,
}

// Letters, marks, numbers, punctuation, symbols and the ASCII space
fn is_printable(c: char) -> bool {
    match get_general_category(c) {
        GeneralCategory::SpaceSeparator => c == ' ',
        GeneralCategory::Control
        | GeneralCategory::Format
        | GeneralCategory::Surrogate
        | GeneralCategory::PrivateUse
        | GeneralCategory::Unassigned
        | GeneralCategory::LineSeparator
        | GeneralCategory::ParagraphSeparator => false,
        _ => true,
    }
}

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn is_document(&self) -> bool {
        self.raw == DOCUMENT_TAG
    }
}

impl TryFrom<[u8; TAG_LEN]> for Tag {
    type Error = ChunkError;

    // Invalid UTF-8 decodes to U+FFFD which is itself printable
    fn try_from(raw: [u8; TAG_LEN]) -> Result<Self, Self::Error> {
        let text = String::from_utf8_lossy(&raw).into_owned();

        if text.chars().all(is_printable) {
            Ok(Tag { raw, text })
        } else {
            Err(ChunkError::InvalidTag(raw))
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<[u8; TAG_LEN]> for Tag {
    fn eq(&self, other: &[u8; TAG_LEN]) -> bool {
        self.raw == *other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
