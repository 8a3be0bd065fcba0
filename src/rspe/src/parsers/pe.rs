use log::{debug, warn};

use crate::error::{ExeParseError, Result};
use crate::exe_image::{ExeImage, OptionalHeaderInfo, PeHeader, Section, SectionHeader};

use super::file_view::FileView;
use super::import_table::ImportTableParser;

// "PE\0\0"
pub(crate) const PE_SIGNATURE: [u8; 4] = [0x50, 0x45, 0x00, 0x00];

// Signature plus the 20 COFF bytes.
const PE_HEADER_SIZE: usize = 24;
const SECTION_HEADER_SIZE: usize = 40;

/// Parses the PE portion of an image at a known offset: COFF header,
/// optional header, section table, raw section bytes, and imports.
///
/// [`MzParser`](super::MzParser) invokes this after locating the header via
/// `e_lfanew`. Calling it directly demands a PE header at `pe_offset`, so a
/// missing signature surfaces as `BadPeSignature` instead of an empty image.
pub struct PeParser<'a> {
    view: &'a FileView,
    pe_offset: u64,
}

impl<'a> PeParser<'a> {
    pub fn new(view: &'a FileView, pe_offset: u64) -> PeParser<'a> {
        PeParser { view, pe_offset }
    }

    pub fn parse(&self) -> Result<ExeImage> {
        let header = self.view.slice(self.pe_offset, PE_HEADER_SIZE, "PE header")?;
        if header[0..4] != PE_SIGNATURE {
            return Err(ExeParseError::BadPeSignature);
        }
        let coff = PeHeader::from(header[4..24].try_into().unwrap());

        let optional_offset = self.pe_offset + PE_HEADER_SIZE as u64;
        let optional_bytes = self.view.slice(
            optional_offset,
            usize::from(coff.size_of_optional_header),
            "optional header",
        )?;
        let optional = OptionalHeaderInfo::from_bytes(optional_bytes)?;

        let section_table_offset = optional_offset + u64::from(coff.size_of_optional_header);
        let headers = self.read_section_headers(section_table_offset, coff.number_of_sections)?;
        let sections = self.read_sections_raw_data(&headers);

        let imports = if optional.import_directory.is_present() {
            ImportTableParser::new(
                self.view,
                &sections,
                optional.import_directory.rva,
                optional.is_pe32_plus,
            )
            .parse()
        } else {
            Vec::new()
        };

        Ok(ExeImage {
            is_pe32_plus: optional.is_pe32_plus,
            coff: Some(coff),
            sections,
            imports,
        })
    }

    /// Decodes the section table in file order; the order is what the RVA
    /// mapper later resolves against.
    fn read_section_headers(&self, table_offset: u64, count: u16) -> Result<Vec<SectionHeader>> {
        let table = self.view.slice(
            table_offset,
            SECTION_HEADER_SIZE * usize::from(count),
            "section headers",
        )?;

        let mut headers = Vec::with_capacity(usize::from(count));
        for (index, chunk) in table.chunks_exact(SECTION_HEADER_SIZE).enumerate() {
            let header = SectionHeader::from(chunk.try_into().unwrap());
            debug!(
                "section {}: name={}, VA=0x{:X}, RawDataOffset=0x{:X}, RawDataSize=0x{:X}",
                index,
                header.name(),
                header.virtual_address,
                header.pointer_to_raw_data,
                header.size_of_raw_data
            );
            headers.push(header);
        }
        Ok(headers)
    }

    /// Materializes each section's raw bytes. A read past end of file is
    /// not fatal: the section keeps an empty `raw_data` and a warning is
    /// logged.
    fn read_sections_raw_data(&self, headers: &[SectionHeader]) -> Vec<Section> {
        headers
            .iter()
            .map(|header| {
                if header.size_of_raw_data == 0 {
                    return Section::from_header(header, Vec::new());
                }
                match self.view.slice(
                    u64::from(header.pointer_to_raw_data),
                    header.size_of_raw_data as usize,
                    "section raw data",
                ) {
                    Ok(raw_data) => Section::from_header(header, raw_data.to_vec()),
                    Err(err) => {
                        warn!("could not read raw data for section {}: {}", header.name(), err);
                        Section::from_header(header, Vec::new())
                    }
                }
            })
            .collect()
    }
}
