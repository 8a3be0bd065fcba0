use std::fmt;
use std::path::Path;

use crate::error::{ExeParseError, Result};

use super::section::Section;

/// A blob of machine code lifted out of an image, addressed by where it
/// lives in memory (`virtual_address`) and on disk (`raw_address`). Both
/// addresses are zero when the blob was loaded from a loose `.bin` file.
#[derive(Debug, Clone)]
pub struct MachineCode {
    pub code: Vec<u8>,
    pub virtual_address: u32,
    pub raw_address: u32,
}

impl MachineCode {
    pub fn new(code: Vec<u8>, virtual_address: u32, raw_address: u32) -> MachineCode {
        MachineCode {
            code,
            virtual_address,
            raw_address,
        }
    }

    /// Copies a parsed section's raw bytes into an addressed blob.
    pub fn from_section(section: &Section) -> MachineCode {
        MachineCode {
            code: section.raw_data.clone(),
            virtual_address: section.virtual_address,
            raw_address: section.pointer_to_raw_data,
        }
    }

    /// Loads a raw code blob from disk, e.g. a previously extracted `.bin`.
    pub fn from_bin_file(path: impl AsRef<Path>) -> Result<MachineCode> {
        let path = path.as_ref();
        let code = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ExeParseError::NotFound(path.to_path_buf()),
            _ => ExeParseError::Io(err),
        })?;

        Ok(MachineCode {
            code,
            virtual_address: 0,
            raw_address: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl fmt::Display for MachineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MachineCode(VA=0x{:X}, RawAddr=0x{:X}, Size={})",
            self.virtual_address,
            self.raw_address,
            self.code.len()
        )
    }
}
