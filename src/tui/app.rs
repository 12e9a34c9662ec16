//! TUI model and update logic.
//!
//! `TuiApp` owns every piece of screen state. Key handling is pure: it
//! edits fields and returns an [`Action`] for the runner to carry out
//! (network call, key save, clipboard write). Results come back through
//! the `apply_*` methods.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::input_line::InputLine;
use crate::llm::{validate_inputs, RequestError};
use crate::lyrics::{CopyTarget, LyricSheet, ParsedSections};
use crate::notify::{self, Notification};

/// Lines moved by PageUp/PageDown.
const PAGE_LINES: i32 = 10;

/// Which input has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    Topic,
}

/// Work the runner must do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SaveKey(String),
    Generate { topic: String, credential: String },
    Copy(CopyTarget),
}

/// Generation lifecycle as the screen shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

pub struct TuiApp {
    pub key_input: InputLine,
    pub topic_input: InputLine,
    pub focus: Focus,
    pub phase: Phase,
    pub sheet: Option<LyricSheet>,
    pub notification: Option<Notification>,
    pub notification_ttl: Duration,
    /// Scroll offset (lines) of the result panes.
    pub result_scroll: u16,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(saved_key: Option<String>, notification_ttl: Duration) -> Self {
        let mut key_input = InputLine::new();
        let focus = match saved_key {
            Some(key) => {
                key_input.set_content(&key);
                Focus::Topic
            }
            None => Focus::ApiKey,
        };
        Self {
            key_input,
            topic_input: InputLine::new(),
            focus,
            phase: Phase::Idle,
            sheet: None,
            notification: None,
            notification_ttl,
            result_scroll: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Replace the current notification.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Drop the notification once its time is up.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.notification_ttl))
        {
            self.notification = None;
        }
    }

    /// Dispatch a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::ApiKey => Focus::Topic,
                    Focus::Topic => Focus::ApiKey,
                };
                None
            }
            KeyCode::Char('g') if ctrl => self.request_generate(),
            KeyCode::Char('s') if ctrl => self.request_save_key(),
            KeyCode::Enter => match self.focus {
                Focus::ApiKey => self.request_save_key(),
                Focus::Topic => self.request_generate(),
            },
            KeyCode::F(2) => self.request_copy(CopyTarget::All),
            KeyCode::F(3) => self.request_copy(CopyTarget::Lyrics),
            KeyCode::F(4) => self.request_copy(CopyTarget::Suno),
            KeyCode::Up => {
                self.scroll_by(-1);
                None
            }
            KeyCode::Down => {
                self.scroll_by(1);
                None
            }
            KeyCode::PageUp => {
                self.scroll_by(-PAGE_LINES);
                None
            }
            KeyCode::PageDown => {
                self.scroll_by(PAGE_LINES);
                None
            }
            _ => {
                match self.focus {
                    Focus::ApiKey => self.key_input.handle_key(key),
                    Focus::Topic => self.topic_input.handle_key(key),
                };
                None
            }
        }
    }

    /// Largest useful scroll offset: the last line of the longest pane.
    pub fn max_scroll(&self) -> u16 {
        let lines = self.sheet.as_ref().map_or(0, LyricSheet::longest_section_lines);
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.result_scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.result_scroll = u16::try_from(next).unwrap_or(0);
    }

    fn request_save_key(&mut self) -> Option<Action> {
        let key = self.key_input.trimmed();
        if key.is_empty() {
            self.notify(Notification::error(notify::KEY_REQUIRED));
            return None;
        }
        Some(Action::SaveKey(key.to_string()))
    }

    /// Validate inputs and move to the loading phase. While loading, the
    /// trigger is disabled.
    fn request_generate(&mut self) -> Option<Action> {
        if self.is_loading() {
            self.notify(Notification::info(notify::IN_PROGRESS));
            return None;
        }
        match validate_inputs(self.topic_input.content(), self.key_input.content()) {
            Ok((topic, credential)) => {
                self.phase = Phase::Loading;
                Some(Action::Generate { topic, credential })
            }
            Err(e) => {
                self.focus = match e {
                    RequestError::EmptyCredential => Focus::ApiKey,
                    _ => Focus::Topic,
                };
                self.notify(Notification::error(notify::failure_message(&e)));
                None
            }
        }
    }

    fn request_copy(&mut self, target: CopyTarget) -> Option<Action> {
        if self.sheet.is_none() {
            self.notify(Notification::info(notify::NOTHING_TO_COPY));
            return None;
        }
        Some(Action::Copy(target))
    }

    /// Text to copy for a target, if there is a sheet.
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        self.sheet.as_ref().map(|s| s.clipboard_text(target))
    }

    /// Back to idle with either a new sheet or an error notification.
    pub fn apply_generation(&mut self, result: Result<ParsedSections, RequestError>) {
        self.phase = Phase::Idle;
        self.notify(notify::generation_outcome(&result));
        if let Ok(sections) = result {
            self.sheet = Some(LyricSheet::from(sections));
            self.result_scroll = 0;
        }
    }
}
