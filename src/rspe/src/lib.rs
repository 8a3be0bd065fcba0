mod analyzer;
mod error;
mod exe_image;
mod parsers;

pub use analyzer::{CodeAnalyzer, KNOWN_PATTERNS, MIN_STRING_LENGTH};
pub use error::{ExeParseError, Result};
pub use exe_image::*;
pub use parsers::{rva_to_offset, FileView, ImportTableParser, MzParser, PeParser};
