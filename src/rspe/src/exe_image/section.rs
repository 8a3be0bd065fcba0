use std::fmt;

use super::characteristics::SectionCharacteristics;
use super::section_header::SectionHeader;

/// A section of the image: the header fields the rest of the crate acts on
/// plus the section's raw bytes as stored on disk.
///
/// Created once during PE parsing and immutable afterwards. `raw_data`
/// holds exactly `size_of_raw_data` bytes, or is empty when the section has
/// no raw data or its read failed (the failure is logged, not fatal).
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub virtual_address: u32,
    pub virtual_size: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
    pub characteristics: SectionCharacteristics,
    pub raw_data: Vec<u8>,
}

impl Section {
    pub fn from_header(header: &SectionHeader, raw_data: Vec<u8>) -> Section {
        Section {
            name: header.name(),
            virtual_address: header.virtual_address,
            virtual_size: header.virtual_size,
            size_of_raw_data: header.size_of_raw_data,
            pointer_to_raw_data: header.pointer_to_raw_data,
            characteristics: header.characteristics,
            raw_data,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Section(name={}, VA=0x{:X}, Size=0x{:X}, RawDataOffset=0x{:X})",
            self.name, self.virtual_address, self.virtual_size, self.pointer_to_raw_data
        )
    }
}
