//! # CLI Layer
//!
//! This module is **one possible UI client** for blogcms. It is the only place that
//! touches the terminal: argument parsing, prompts, colors and exit codes.
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and one handler per subcommand
//! - `render`: view models to styled text, via templates
//! - `styles`: named styles for light and dark themes
//! - `templates`: the template sources

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
