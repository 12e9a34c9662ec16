//! Lyric generation — one request at a time against a content source.
//!
//! `Generator` wraps a [`ContentSource`] (the Gemini client in production)
//! with an explicit busy flag: while one request is in flight, a second
//! call fails fast with [`RequestError::Busy`] instead of racing it.

pub mod client;
pub mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

pub use client::{EnvelopeFault, GeminiClient, RequestError};

use crate::lyrics::{parse, ParsedSections};

/// Anything that turns a topic into raw model text.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn generate_content(&self, topic: &str, credential: &str) -> Result<String, RequestError>;
}

/// Trim both inputs and reject empty ones. Topic is checked first.
pub fn validate_inputs(topic: &str, credential: &str) -> Result<(String, String), RequestError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(RequestError::EmptyTopic);
    }
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(RequestError::EmptyCredential);
    }
    Ok((topic.to_string(), credential.to_string()))
}

/// Single-flight lyric generator.
pub struct Generator {
    source: Arc<dyn ContentSource>,
    busy: AtomicBool,
}

impl Generator {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            busy: AtomicBool::new(false),
        }
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate, call the source once, and parse the response.
    pub async fn generate(&self, topic: &str, credential: &str) -> Result<ParsedSections, RequestError> {
        let (topic, credential) = validate_inputs(topic, credential)?;
        let _guard = BusyGuard::acquire(&self.busy).ok_or(RequestError::Busy)?;

        info!(topic_chars = topic.chars().count(), "generating lyrics");
        let raw = self.source.generate_content(&topic, &credential).await?;
        let sections = parse(&raw);
        info!(
            lyrics = !sections.lyrics.is_empty(),
            style = !sections.style.is_empty(),
            suno = !sections.suno_format.is_empty(),
            "parsed response sections"
        );
        Ok(sections)
    }
}

/// Holds the busy flag for the life of one call.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
