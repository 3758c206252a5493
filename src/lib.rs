//! Pitchline - guided cold-call script generation for the terminal
//!
//! The wizard core (`wizard`) is a pure state machine; `generate`
//! holds the service seam and artifact store; `ui` and `app` are the
//! ratatui shell on top.

pub mod app;
pub mod config;
pub mod generate;
pub mod logging;
pub mod router;
pub mod ui;
pub mod wizard;
