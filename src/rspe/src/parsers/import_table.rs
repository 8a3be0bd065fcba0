use crate::exe_image::{Import, ImportDescriptor, Section};

use super::file_view::FileView;
use super::rva::rva_to_offset;

const IMPORT_DESCRIPTOR_SIZE: usize = 20;
const ORDINAL_FLAG_PE32: u64 = 0x8000_0000;
const ORDINAL_FLAG_PE32_PLUS: u64 = 0x8000_0000_0000_0000;
const ORDINAL_MASK: u64 = 0xFFFF;
// Each hint/name table entry starts with a 2-byte hint before the name.
const HINT_SIZE: u64 = 2;

const UNKNOWN_NAME: &str = "Unknown";

/// Walks the zero-terminated import-descriptor array and, per DLL, the
/// thunk array behind it.
///
/// Failures here are local by design: an unresolvable descriptor cursor or
/// a short descriptor read ends the table, an unresolvable DLL or function
/// name becomes `"Unknown"`, and a short thunk read ends that one DLL's
/// function list. None of them aborts the parse.
pub struct ImportTableParser<'a> {
    view: &'a FileView,
    sections: &'a [Section],
    import_rva: u32,
    is_pe32_plus: bool,
}

impl<'a> ImportTableParser<'a> {
    pub fn new(
        view: &'a FileView,
        sections: &'a [Section],
        import_rva: u32,
        is_pe32_plus: bool,
    ) -> ImportTableParser<'a> {
        ImportTableParser {
            view,
            sections,
            import_rva,
            is_pe32_plus,
        }
    }

    pub fn parse(&self) -> Vec<Import> {
        let mut imports = Vec::new();
        let mut cursor = self.import_rva;

        while let Some(descriptor) = self.read_descriptor(cursor) {
            let dll_name = self.read_dll_name(descriptor.name_rva);
            let functions = self.walk_thunks(&descriptor);
            imports.push(Import::new(dll_name, functions));

            cursor = match cursor.checked_add(IMPORT_DESCRIPTOR_SIZE as u32) {
                Some(next) => next,
                None => break,
            };
        }
        imports
    }

    fn read_descriptor(&self, rva: u32) -> Option<ImportDescriptor> {
        let offset = rva_to_offset(self.sections, rva).ok()?;
        let bytes = self
            .view
            .slice(offset, IMPORT_DESCRIPTOR_SIZE, "import descriptor")
            .ok()?;
        let descriptor = ImportDescriptor::from(bytes.try_into().unwrap());
        if descriptor.is_null() {
            return None;
        }
        Some(descriptor)
    }

    fn read_dll_name(&self, name_rva: u32) -> String {
        match rva_to_offset(self.sections, name_rva) {
            Ok(offset) => self.view.read_cstring_at(offset),
            Err(_) => UNKNOWN_NAME.to_string(),
        }
    }

    fn walk_thunks(&self, descriptor: &ImportDescriptor) -> Vec<String> {
        let width = if self.is_pe32_plus { 8 } else { 4 };
        let mut functions = Vec::new();
        let mut thunk_rva = descriptor.thunk_rva();

        while let Some(function) = self.read_thunk(thunk_rva) {
            functions.push(function);
            thunk_rva = match thunk_rva.checked_add(width) {
                Some(next) => next,
                None => break,
            };
        }
        functions
    }

    /// One thunk entry: `None` ends the DLL's function list (zero value,
    /// unresolvable RVA, or short read).
    fn read_thunk(&self, thunk_rva: u32) -> Option<String> {
        let offset = rva_to_offset(self.sections, thunk_rva).ok()?;
        let value = if self.is_pe32_plus {
            self.view.read_u64_at(offset, "import thunk").ok()?
        } else {
            u64::from(self.view.read_u32_at(offset, "import thunk").ok()?)
        };
        if value == 0 {
            return None;
        }

        let ordinal_flag = if self.is_pe32_plus {
            ORDINAL_FLAG_PE32_PLUS
        } else {
            ORDINAL_FLAG_PE32
        };
        if value & ordinal_flag != 0 {
            return Some(format!("Ordinal_{}", value & ORDINAL_MASK));
        }
        Some(self.read_function_name(value))
    }

    fn read_function_name(&self, hint_name_rva: u64) -> String {
        // A 64-bit thunk value past u32 range cannot land in any section.
        let rva = match u32::try_from(hint_name_rva) {
            Ok(rva) => rva,
            Err(_) => return UNKNOWN_NAME.to_string(),
        };
        match rva_to_offset(self.sections, rva) {
            Ok(offset) => self.view.read_cstring_at(offset + HINT_SIZE),
            Err(_) => UNKNOWN_NAME.to_string(),
        }
    }
}
