use crate::error::{ExeParseError, Result};
use crate::exe_image::Section;

/// Translates an RVA into a file offset using the section table.
///
/// A section's span is `max(VirtualSize, SizeOfRawData)`: some linkers
/// leave `VirtualSize` smaller than the aligned raw size, and import
/// strings and thunks can sit within the raw tail. When sections overlap,
/// the first match in file order wins.
pub fn rva_to_offset(sections: &[Section], rva: u32) -> Result<u64> {
    for section in sections {
        let start = u64::from(section.virtual_address);
        let span = u64::from(section.virtual_size.max(section.size_of_raw_data));
        if u64::from(rva) >= start && u64::from(rva) < start + span {
            return Ok(u64::from(section.pointer_to_raw_data) + (u64::from(rva) - start));
        }
    }
    Err(ExeParseError::UnresolvableRva(rva))
}
