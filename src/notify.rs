//! User-facing notifications and error translation.
//!
//! Every outcome the user sees (generation done, key saved, copy done,
//! any failure) becomes one short message with a level. The presentation
//! layer decides how to show it and for how long.

use std::time::{Duration, Instant};

use crate::credentials::CredentialError;
use crate::llm::RequestError;

pub const GENERATED: &str = "가사가 성공적으로 생성되었습니다!";
pub const KEY_SAVED: &str = "API 키가 저장되었습니다!";
pub const KEY_REQUIRED: &str = "API 키를 입력해주세요.";
pub const TOPIC_REQUIRED: &str = "가사 주제를 입력해주세요.";
pub const CHECK_KEY: &str = "API 키를 확인해주세요.";
pub const GENERATION_FAILED: &str = "가사 생성 중 오류가 발생했습니다.";
pub const IN_PROGRESS: &str = "가사를 생성하는 중입니다...";
pub const COPIED: &str = "클립보드에 복사되었습니다!";
pub const COPY_FAILED: &str = "클립보드에 복사할 수 없습니다.";
pub const NOTHING_TO_COPY: &str = "먼저 가사를 생성해주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

/// A message with a level and the time it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    /// True once `ttl` has elapsed since the notification was raised.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Message for a failed generation.
///
/// Validation errors name the missing input. Failures reported by the API
/// itself suggest checking the key; anything else is a generic failure.
pub fn failure_message(err: &RequestError) -> &'static str {
    match err {
        RequestError::EmptyTopic => TOPIC_REQUIRED,
        RequestError::EmptyCredential => KEY_REQUIRED,
        RequestError::Busy => IN_PROGRESS,
        e if e.concerns_api() => CHECK_KEY,
        _ => GENERATION_FAILED,
    }
}

/// Notification for the outcome of a generation.
pub fn generation_outcome<T>(result: &Result<T, RequestError>) -> Notification {
    match result {
        Ok(_) => Notification::success(GENERATED),
        Err(RequestError::Busy) => Notification::info(IN_PROGRESS),
        Err(e) => Notification::error(failure_message(e)),
    }
}

/// Notification for a key save attempt.
pub fn key_save_outcome(result: &Result<(), CredentialError>) -> Notification {
    match result {
        Ok(()) => Notification::success(KEY_SAVED),
        Err(CredentialError::Empty) => Notification::error(KEY_REQUIRED),
        Err(e) => Notification::error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::EnvelopeFault;

    #[test]
    fn validation_messages() {
        assert_eq!(failure_message(&RequestError::EmptyTopic), TOPIC_REQUIRED);
        assert_eq!(failure_message(&RequestError::EmptyCredential), KEY_REQUIRED);
    }

    #[test]
    fn api_failures_suggest_checking_key() {
        for status in [400, 403, 500] {
            assert_eq!(failure_message(&RequestError::HttpStatus(status)), CHECK_KEY);
        }
        assert_eq!(
            failure_message(&RequestError::MalformedEnvelope(EnvelopeFault::NoCandidate)),
            CHECK_KEY
        );
    }

    #[test]
    fn unreadable_body_is_generic() {
        for fault in [EnvelopeFault::Undecodable, EnvelopeFault::NoText] {
            assert_eq!(
                failure_message(&RequestError::MalformedEnvelope(fault)),
                GENERATION_FAILED
            );
        }
    }

    #[test]
    fn network_failure_is_generic() {
        assert_eq!(
            failure_message(&RequestError::NetworkFailure("dns".into())),
            GENERATION_FAILED
        );
    }

    #[test]
    fn generation_outcome_levels() {
        assert_eq!(generation_outcome(&Ok::<_, RequestError>(())).level, Level::Success);
        assert_eq!(
            generation_outcome::<()>(&Err(RequestError::HttpStatus(500))).level,
            Level::Error
        );
        assert_eq!(generation_outcome::<()>(&Err(RequestError::Busy)).level, Level::Info);
    }

    #[test]
    fn key_save_outcomes() {
        assert_eq!(key_save_outcome(&Ok(())).message, KEY_SAVED);
        let empty = key_save_outcome(&Err(CredentialError::Empty));
        assert_eq!(empty.level, Level::Error);
        assert_eq!(empty.message, KEY_REQUIRED);
    }

    #[test]
    fn expiry() {
        let n = Notification::info("x");
        let ttl = Duration::from_secs(3);
        assert!(!n.is_expired(n.raised_at, ttl));
        assert!(!n.is_expired(n.raised_at + Duration::from_secs(2), ttl));
        assert!(n.is_expired(n.raised_at + ttl, ttl));
    }
}
