//! Built-in file tools

pub mod read_file;
pub mod write_file;

pub use read_file::ReadFileTool;
pub use write_file::WriteFileTool;
