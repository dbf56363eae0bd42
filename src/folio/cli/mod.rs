//! # CLI
//!
//! One client of the folio library. This is the only place that parses arguments, writes
//! to stdout/stderr or decides exit codes. Everything else goes through
//! [`folio::api::FolioApi`].
//!
//! ## Commands
//!
//! - `folio check`: load and validate every document; schema errors exit non-zero
//! - `folio list posts|projects [--filter ID] [--json]`: the filtered card list, as the
//!   site would show it
//! - `folio build [--out DIR] [--drafts]`: write the site
//! - `folio feed`: print the RSS feed
//! - `folio preview SLUG [--output FILE]`: render one preview image
//! - `folio config [--template]`: effective settings, or a sample `folio.toml`
//!
//! `--root` points at the site directory and `-v` turns on debug logging.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch, logging setup and per-command handlers
//! - `render`: terminal rendering of listings and messages
//! - `setup`: clap definitions
//! - `styles`: the terminal palette
//! - `templates`: terminal templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
