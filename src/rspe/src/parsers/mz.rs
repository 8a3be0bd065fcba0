use std::path::Path;

use crate::error::{ExeParseError, Result};
use crate::exe_image::ExeImage;

use super::file_view::FileView;
use super::pe::{PeParser, PE_SIGNATURE};

// "MZ"
const MZ_SIGNATURE: [u8; 2] = [0x4D, 0x5A];
const MZ_HEADER_SIZE: usize = 64;
const E_LFANEW_OFFSET: u64 = 60;

/// Entry-point parser: validates the DOS/MZ stub, follows `e_lfanew`, and
/// hands off to [`PeParser`] when a PE header is behind it.
///
/// A valid MZ stub with no `PE\0\0` at `e_lfanew` (including an `e_lfanew`
/// pointing past end of file) is a plain DOS binary and parses successfully
/// to an empty image.
pub struct MzParser {
    view: FileView,
}

impl MzParser {
    pub fn new(view: FileView) -> MzParser {
        MzParser { view }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<MzParser> {
        Ok(MzParser::new(FileView::open(path)?))
    }

    pub fn from_bytes(data: Vec<u8>) -> MzParser {
        MzParser::new(FileView::from_bytes(data))
    }

    pub fn parse(&self) -> Result<ExeImage> {
        let header = self.view.slice(0, MZ_HEADER_SIZE, "MZ header")?;
        if header[0..2] != MZ_SIGNATURE {
            return Err(ExeParseError::BadMzSignature);
        }

        let e_lfanew = self.view.read_u32_at(E_LFANEW_OFFSET, "e_lfanew")?;
        match self.view.slice(u64::from(e_lfanew), 4, "PE signature") {
            Ok(signature) if signature == PE_SIGNATURE => {
                PeParser::new(&self.view, u64::from(e_lfanew)).parse()
            }
            _ => Ok(ExeImage::empty()),
        }
    }
}
