//! musicbank — song lyrics from a topic.
//!
//! A topic goes into a fixed Korean prompt, one `generateContent` call goes
//! out to Gemini, and the free-text answer is split on three section
//! markers into lyrics, a style recommendation, and a SUNO AI block.
//!
//! - [`lyrics`]: prompt template, marker parser, display sheet
//! - [`llm`]: HTTP client and the single-flight [`llm::Generator`]
//! - [`credentials`]: local API key storage
//! - [`clipboard`]: system clipboard with an OSC 52 fallback
//! - [`notify`]: user-facing messages
//! - [`tui`]: terminal front end

pub mod clipboard;
pub mod credentials;
pub mod llm;
pub mod lyrics;
pub mod notify;
pub mod tui;
