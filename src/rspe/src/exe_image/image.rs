use super::*;

/// The structured view of a parsed executable.
///
/// Owns its sections and imports exclusively. A plain DOS binary (a valid
/// MZ stub with no PE content behind it) parses to an image with `coff`
/// unset and empty section and import lists.
#[derive(Debug, Clone)]
pub struct ExeImage {
    pub is_pe32_plus: bool,
    pub coff: Option<PeHeader>,
    pub sections: Vec<Section>,
    pub imports: Vec<Import>,
}

impl ExeImage {
    /// An image with no PE content behind the MZ stub.
    pub fn empty() -> ExeImage {
        ExeImage {
            is_pe32_plus: false,
            coff: None,
            sections: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// One machine-code blob per section whose name starts with `.text`,
    /// in section order.
    pub fn text_machine_code(&self) -> Vec<MachineCode> {
        self.sections
            .iter()
            .filter(|section| section.name.starts_with(".text"))
            .map(MachineCode::from_section)
            .collect()
    }

    pub fn section_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }
}
