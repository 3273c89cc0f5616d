// Library surface for headless/integration tests and reuse.
// main.rs only owns the CLI and the terminal.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod fit;
pub mod language;
pub mod locale;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod timer;
pub mod ui;
pub mod word_generator;

pub use error::{GameError, Result};
pub use round::{Outcome, RoundController, RoundObserver};
