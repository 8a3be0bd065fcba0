mod characteristics;
mod data_directory;
mod image;
mod import;
mod import_descriptor;
mod machine_code;
mod optional_header;
mod pe_header;
mod section;
mod section_header;

pub use characteristics::{FileCharacteristics, SectionCharacteristics};
pub use data_directory::DataDirectory;
pub use image::ExeImage;
pub use import::Import;
pub use import_descriptor::ImportDescriptor;
pub use machine_code::MachineCode;
pub use optional_header::{OptionalHeaderInfo, PE32_MAGIC, PE32_PLUS_MAGIC};
pub use pe_header::PeHeader;
pub use section::Section;
pub use section_header::SectionHeader;
