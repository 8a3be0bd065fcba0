mod file_view;
mod import_table;
mod mz;
mod pe;
mod rva;

pub use file_view::FileView;
pub use import_table::ImportTableParser;
pub use mz::MzParser;
pub use pe::PeParser;
pub use rva::rva_to_offset;
