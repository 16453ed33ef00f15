mod interface;
pub mod markdown;

pub use interface::*;
pub use markdown::MarkdownGenerator;
