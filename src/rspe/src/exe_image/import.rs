use std::fmt;

/// One imported DLL and the functions imported from it, in thunk order.
///
/// Each entry of `functions` is either the name from the hint/name table or
/// `"Ordinal_<N>"` for an ordinal-only import, where N is the low 16 bits
/// of the thunk value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub dll_name: String,
    pub functions: Vec<String>,
}

impl Import {
    pub fn new(dll_name: String, functions: Vec<String>) -> Import {
        Import { dll_name, functions }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Import(DLL={}, Functions={:?})", self.dll_name, self.functions)
    }
}
