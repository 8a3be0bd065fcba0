use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{ExeParseError, Result};

/// Read-only random-access view of a binary file.
///
/// The whole file is read once at construction and the handle is released
/// immediately; every read afterwards is positional and bounds-checked
/// against the total length. No seek state.
pub struct FileView {
    data: Vec<u8>,
}

impl FileView {
    pub fn open(path: impl AsRef<Path>) -> Result<FileView> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ExeParseError::NotFound(path.to_path_buf()),
            _ => ExeParseError::Io(err),
        })?;

        Ok(FileView { data })
    }

    pub fn from_bytes(data: Vec<u8>) -> FileView {
        FileView { data }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Exactly `len` bytes at `offset`, or `Truncated` naming the structure
    /// the caller was after.
    pub fn slice(&self, offset: u64, len: usize, what: &'static str) -> Result<&[u8]> {
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= self.len() => {
                Ok(&self.data[offset as usize..offset as usize + len])
            }
            _ => Err(ExeParseError::Truncated(what)),
        }
    }

    pub fn read_u16_at(&self, offset: u64, what: &'static str) -> Result<u16> {
        let mut bytes = self.slice(offset, 2, what)?;
        Ok(bytes.read_u16::<LittleEndian>()?)
    }

    pub fn read_u32_at(&self, offset: u64, what: &'static str) -> Result<u32> {
        let mut bytes = self.slice(offset, 4, what)?;
        Ok(bytes.read_u32::<LittleEndian>()?)
    }

    pub fn read_u64_at(&self, offset: u64, what: &'static str) -> Result<u64> {
        let mut bytes = self.slice(offset, 8, what)?;
        Ok(bytes.read_u64::<LittleEndian>()?)
    }

    /// Bytes from `offset` up to the first NUL (or end of data), decoded as
    /// UTF-8 with replacement. Total: an out-of-range offset yields `""`.
    pub fn read_cstring_at(&self, offset: u64) -> String {
        if offset >= self.len() {
            return String::new();
        }
        let tail = &self.data[offset as usize..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        String::from_utf8_lossy(&tail[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_is_exact_or_truncated() {
        let view = FileView::from_bytes(vec![1, 2, 3, 4]);
        assert_eq!(view.slice(1, 2, "test").unwrap(), &[2, 3]);
        assert!(matches!(
            view.slice(2, 3, "test"),
            Err(ExeParseError::Truncated("test"))
        ));
        assert!(matches!(
            view.slice(u64::MAX, 1, "test"),
            Err(ExeParseError::Truncated("test"))
        ));
    }

    #[test]
    fn reads_little_endian_integers() {
        let view = FileView::from_bytes(vec![0x78, 0x56, 0x34, 0x12, 0, 0, 0, 0]);
        assert_eq!(view.read_u16_at(0, "u16").unwrap(), 0x5678);
        assert_eq!(view.read_u32_at(0, "u32").unwrap(), 0x1234_5678);
        assert_eq!(view.read_u64_at(0, "u64").unwrap(), 0x1234_5678);
    }

    #[test]
    fn cstring_stops_at_nul_or_end() {
        let view = FileView::from_bytes(b"abc\0def".to_vec());
        assert_eq!(view.read_cstring_at(0), "abc");
        assert_eq!(view.read_cstring_at(4), "def");
        assert_eq!(view.read_cstring_at(100), "");
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let missing = std::env::temp_dir().join("rspe-no-such-file.exe");
        assert!(matches!(
            FileView::open(&missing),
            Err(ExeParseError::NotFound(_))
        ));
    }
}
