use byteorder::{ByteOrder, LittleEndian};

use crate::chunk::{HEADER_LEN, TAG_LEN};

/// Fixed size header in front of every chunk, exactly as found on the wire.
/// Nothing in here has been validated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub tag: [u8; TAG_LEN],
    pub meta_len: u32,
}

impl RawHeader {
    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> Self {
        let mut tag: [u8; TAG_LEN] = [0; TAG_LEN];
        tag.copy_from_slice(&buf[..TAG_LEN]);

        RawHeader {
            tag,
            meta_len: LittleEndian::read_u32(&buf[TAG_LEN..]),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf: [u8; HEADER_LEN] = [0; HEADER_LEN];
        buf[..TAG_LEN].copy_from_slice(&self.tag);
        LittleEndian::write_u32(&mut buf[TAG_LEN..], self.meta_len);
        buf
    }
}
