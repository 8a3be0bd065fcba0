use super::characteristics::SectionCharacteristics;

/// # Section header
///
/// Immediately following the optional header is the Section Table. Each
/// section header has the following format, for a total of `40` bytes per
/// entry:
///
/// | Offset | Size | Field                 | Description |
/// | ------ | ---- | --------------------- | ----------- |
/// | 0      | 8    | Name                  | An 8-byte, null-padded ASCII string. There is no terminating null if the string is exactly eight characters long. |
/// | 8      | 4    | VirtualSize           | Total size of the section in bytes when loaded into memory. |
/// | 12     | 4    | VirtualAddress        | Address of the first byte of the section when loaded into memory, relative to the image base. |
/// | 16     | 4    | SizeOfRawData         | Size of the initialized data on disk in bytes. Rounded to FileAlignment, so it can be larger or smaller than VirtualSize. |
/// | 20     | 4    | PointerToRawData      | File offset of the section's first page. |
/// | 24     | 4    | PointerToRelocations  | File offset of the section's COFF relocations, or 0. |
/// | 28     | 4    | PointerToLinenumbers  | File offset of the section's COFF line numbers, or 0. |
/// | 32     | 2    | NumberOfRelocations   | Number of relocation entries, or 0. |
/// | 34     | 2    | NumberOfLinenumbers   | Number of line-number entries, or 0. |
/// | 36     | 4    | Characteristics       | Flags describing the section's characteristics. |
#[derive(Debug, Clone)]
pub struct SectionHeader {
    pub name: [u8; 8],
    pub virtual_size: u32,
    pub virtual_address: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
    pub pointer_to_relocations: u32,
    pub pointer_to_linenumbers: u32,
    pub number_of_relocations: u16,
    pub number_of_linenumbers: u16,
    pub characteristics: SectionCharacteristics,
}

impl SectionHeader {
    pub fn from(slice: &[u8; 40]) -> SectionHeader {
        SectionHeader {
            name: slice[0..8].try_into().unwrap(),
            virtual_size: u32::from_le_bytes(slice[8..12].try_into().unwrap()),
            virtual_address: u32::from_le_bytes(slice[12..16].try_into().unwrap()),
            size_of_raw_data: u32::from_le_bytes(slice[16..20].try_into().unwrap()),
            pointer_to_raw_data: u32::from_le_bytes(slice[20..24].try_into().unwrap()),
            pointer_to_relocations: u32::from_le_bytes(slice[24..28].try_into().unwrap()),
            pointer_to_linenumbers: u32::from_le_bytes(slice[28..32].try_into().unwrap()),
            number_of_relocations: u16::from_le_bytes(slice[32..34].try_into().unwrap()),
            number_of_linenumbers: u16::from_le_bytes(slice[34..36].try_into().unwrap()),
            characteristics: SectionCharacteristics::new(u32::from_le_bytes(slice[36..40].try_into().unwrap())),
        }
    }

    /// The section name with the trailing NUL padding stripped, decoded as
    /// UTF-8 with replacement of invalid bytes.
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |pos| pos + 1);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }
}
