//! # Folio Architecture
//!
//! Folio turns a directory of Markdown documents into a static blog and project portfolio:
//! validated content in, filtered list pages, post pages, an RSS feed and social preview
//! images out. It is a library with a CLI client, not a CLI with some library code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, sets up logging       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (filter ids → typed selections)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - check, list, build, feed, preview, config                │
//! │  - Returns CmdResult; never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Content Layer (store/, schema.rs, model.rs)                │
//! │  - ContentStore trait: FileStore, InMemoryStore             │
//! │  - Frontmatter validation into typed entities               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Output generation sits beside the command layer: [`site`] writes pages, [`feed`] writes
//! RSS and [`preview`] draws the 1200×630 cards. All three consume the same card view
//! models from [`card`], so a post looks the same on the home page, a list page and in the
//! terminal.
//!
//! ## Invariants
//!
//! - Every entity leaving a store passed validation. A bad pillar, status or date fails the
//!   load with the file and field named; nothing is silently defaulted.
//! - Category sets are closed enums. Badge colours, labels and filter controls are derived
//!   from them, so adding a variant without its styling does not compile.
//! - Drafts never reach the feed or a preview image.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`store`]: Content loading and implementations
//! - [`schema`]: Frontmatter validation
//! - [`model`]: Posts, projects and their category enums
//! - [`filter`]: Category filter state and controls
//! - [`card`]: Card view models shared by every output
//! - [`site`]: Static page generation
//! - [`feed`]: RSS 2.0 feed
//! - [`preview`]: Social preview layout and rasterizer
//! - [`reading_time`]: Minutes-to-read estimate
//! - [`config`]: `folio.toml` and environment settings
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod card;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod preview;
pub mod reading_time;
pub mod schema;
pub mod site;
pub mod store;
