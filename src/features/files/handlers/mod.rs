mod file_handler;
mod page_handler;

pub use file_handler::*;
pub use page_handler::*;
