//! Lyric prompt, response parser, and display sheet.
//!
//! `prompt` and `parser` share the section markers; keep them in one
//! place so the template and the splitter cannot drift apart.

pub mod parser;
pub mod prompt;
pub mod sheet;

pub use parser::{parse, ParsedSections};
pub use prompt::build_prompt;
pub use sheet::{CopyTarget, LyricSheet};
