pub mod addon;
mod command_result;
pub mod generate;
mod helper;
pub mod import;
pub mod init;
pub mod schema;
pub mod xliff;

pub use command_result::*;
