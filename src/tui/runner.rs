//! Event loop: terminal input, generation results, and a toast timer
//! multiplexed with `tokio::select!`.
//!
//! The generation call runs on its own task and reports back over a
//! channel, so the screen keeps redrawing (and showing the loading state)
//! while the request is in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::app::{Action, TuiApp};
use super::layout;
use crate::clipboard::ClipboardBackend;
use crate::credentials::{save_api_key, CredentialStore};
use crate::llm::{Generator, RequestError};
use crate::lyrics::ParsedSections;
use crate::notify::{self, Notification};

type GenerationResult = Result<ParsedSections, RequestError>;

/// Collaborators the TUI drives.
pub struct Runner {
    generator: Arc<Generator>,
    store: Arc<dyn CredentialStore>,
    clipboard: Arc<dyn ClipboardBackend>,
    results_tx: mpsc::UnboundedSender<GenerationResult>,
    results_rx: mpsc::UnboundedReceiver<GenerationResult>,
}

impl Runner {
    pub fn new(
        generator: Arc<Generator>,
        store: Arc<dyn CredentialStore>,
        clipboard: Arc<dyn ClipboardBackend>,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            generator,
            store,
            clipboard,
            results_tx,
            results_rx,
        }
    }

    /// Take over the terminal until the user quits.
    pub async fn run(mut self, mut app: TuiApp) -> std::io::Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal, &mut app).await;
        ratatui::restore();
        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal, app: &mut TuiApp) -> std::io::Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(250));

        while !app.should_quit {
            terminal.draw(|f| layout::draw(f, app))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = app.handle_key(key) {
                            self.perform(app, action);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => break,
                },
                Some(result) = self.results_rx.recv() => app.apply_generation(result),
                _ = tick.tick() => app.expire_notification(Instant::now()),
            }
        }
        Ok(())
    }

    /// Carry out an action. Generation is spawned; the rest is immediate.
    pub fn perform(&self, app: &mut TuiApp, action: Action) {
        match action {
            Action::SaveKey(key) => {
                let result = save_api_key(&*self.store, &key);
                if let Err(ref e) = result {
                    error!("saving API key failed: {e}");
                }
                app.notify(notify::key_save_outcome(&result));
            }
            Action::Generate { topic, credential } => {
                let generator = self.generator.clone();
                let tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = generator.generate(&topic, &credential).await;
                    if let Err(ref e) = result {
                        info!("generation failed: {e}");
                    }
                    // receiver only goes away when the UI has quit
                    let _ = tx.send(result);
                });
            }
            Action::Copy(target) => {
                let Some(text) = app.copy_text(target) else {
                    return;
                };
                match self.clipboard.write(&text) {
                    Ok(()) => app.notify(Notification::success(notify::COPIED)),
                    Err(e) => {
                        error!("clipboard write failed: {e}");
                        app.notify(Notification::error(notify::COPY_FAILED));
                    }
                }
            }
        }
    }

    /// Wait for the next finished generation (used by tests).
    #[cfg(test)]
    async fn next_result(&mut self) -> Option<GenerationResult> {
        self.results_rx.recv().await
    }
}
