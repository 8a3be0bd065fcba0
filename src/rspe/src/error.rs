use std::path::PathBuf;

use thiserror::Error;

/// Every way a parse can fail, categorized for the caller.
///
/// Fatal structural failures (signatures, truncated header arrays) surface
/// as one of these variants. Failures confined to a single import entry are
/// absorbed inside the import-table walk and never reach the caller.
#[derive(Debug, Error)]
pub enum ExeParseError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A bounded read ran past the end of the file.
    #[error("not enough data for {0}")]
    Truncated(&'static str),

    #[error("invalid MZ signature")]
    BadMzSignature,

    #[error("invalid PE signature")]
    BadPeSignature,

    #[error("unknown optional header magic 0x{0:X}")]
    UnknownOptionalMagic(u16),

    #[error("RVA 0x{0:X} does not fall within any section")]
    UnresolvableRva(u32),

    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),
}

pub type Result<T, E = ExeParseError> = std::result::Result<T, E>;
