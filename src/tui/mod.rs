//! Terminal front end — ratatui presentation layer.
//!
//! Stands in for the page: key field, topic field, three result panes,
//! copy shortcuts, loading indicator, and a toast for notifications.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (`TuiApp::handle_key`, `apply_generation`)
//! + View (`layout::draw`). Side effects are returned as `Action`s and
//! carried out by the `Runner`, so the model is testable without a
//! terminal.

pub mod app;
pub mod input_line;
pub mod layout;
pub mod runner;

pub use app::TuiApp;
pub use runner::Runner;
