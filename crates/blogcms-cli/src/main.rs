//! # blogcms CLI
//!
//! A terminal client for the `blogcms` library. The library owns all behavior
//! (storage, queries, validation, view models); this binary only:
//!
//! - parses arguments with clap,
//! - asks for confirmation before destructive commands,
//! - renders view models through minijinja templates,
//! - maps results to an exit status.
//!
//! Logging goes to stderr through `tracing-subscriber`; `RUST_LOG` overrides the
//! configured level and `--verbose` raises it to `debug`.

mod cli;
mod logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
