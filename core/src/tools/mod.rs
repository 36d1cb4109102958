//! Tool system and built-in file tools

pub mod base;
pub mod builtin;
pub mod utils;

pub use base::{Tool, ToolContext, ToolExecutor, ToolParameter};
pub use builtin::{ReadFileTool, WriteFileTool};
