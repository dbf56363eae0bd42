//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point for
//! folio operations, whichever client is driving them.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (filter ids from the command line become typed [`Selection`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal output and no formatting.
//!
//! ## Generic Over ContentStore
//!
//! `FolioApi<S: ContentStore>` is generic over where content comes from:
//! - Production: `FolioApi<FileStore>`, built by [`FolioApi::open`]
//! - Testing: `FolioApi<InMemoryStore>`
//!
//! API tests check dispatch and argument handling only; command behaviour is tested in
//! `commands/*.rs`.

use crate::commands::{self, SitePaths};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::filter::Selection;
use crate::model::{Pillar, ProjectStatus};
use crate::site::BuildOptions;
use crate::store::fs::FileStore;
use crate::store::ContentStore;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, ControlState, Listing, MessageLevel};

/// The main API facade for folio operations.
pub struct FolioApi<S: ContentStore> {
    store: S,
    config: SiteConfig,
    paths: SitePaths,
}

impl FolioApi<FileStore> {
    /// Loads `folio.toml` under `root` and opens the configured content directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = SiteConfig::load(&root)?;
        let store = FileStore::new(config.content_dir(&root))
            .with_words_per_minute(config.words_per_minute);
        Ok(Self::new(store, config, SitePaths { root }))
    }
}

impl<S: ContentStore> FolioApi<S> {
    pub fn new(store: S, config: SiteConfig, paths: SitePaths) -> Self {
        Self {
            store,
            config,
            paths,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.store)
    }

    /// Lists posts. `filter` is a pillar id or `all`; `None` means `all`.
    pub fn list_posts(&self, filter: Option<&str>, include_drafts: bool) -> Result<CmdResult> {
        let selection: Selection<Pillar> = parse_selection(filter)?;
        commands::list::posts(&self.store, selection, include_drafts)
    }

    /// Lists projects. `filter` is a status id or `all`; `None` means `all`.
    pub fn list_projects(&self, filter: Option<&str>) -> Result<CmdResult> {
        let selection: Selection<ProjectStatus> = parse_selection(filter)?;
        commands::list::projects(&self.store, selection)
    }

    /// Builds the site. `out_dir` overrides the configured output directory.
    pub fn build(&self, out_dir: Option<PathBuf>, include_drafts: bool) -> Result<CmdResult> {
        let options = BuildOptions {
            out_dir: out_dir.unwrap_or_else(|| self.config.out_dir(&self.paths.root)),
            include_drafts,
        };
        commands::build::run(&self.store, &self.config, &self.paths, &options)
    }

    pub fn feed(&self) -> Result<CmdResult> {
        commands::feed::run(&self.store, &self.config)
    }

    pub fn preview(&self, slug: &str, output: Option<PathBuf>) -> Result<CmdResult> {
        commands::preview::run(&self.store, &self.config, &self.paths, slug, output)
    }

    pub fn show_config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config, action)
    }
}

fn parse_selection<C: crate::model::Category>(filter: Option<&str>) -> Result<Selection<C>> {
    match filter {
        None => Ok(Selection::All),
        Some(id) => Ok(id.trim().to_lowercase().parse()?),
    }
}
