//! # Commands
//!
//! One module per operation. Commands take a [`ContentStore`](crate::store::ContentStore)
//! plus whatever the operation needs, do the work, and return a [`CmdResult`]. They never
//! print: messages, cards and written paths are returned for the client to present.

use crate::card::{PostCard, ProjectCard};
use crate::config::SiteConfig;
use crate::filter::Control;
use crate::model::Category;
use serde::Serialize;
use std::path::PathBuf;

pub mod build;
pub mod check;
pub mod config;
pub mod feed;
pub mod list;
pub mod preview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Serializable state of one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl<C: Category> From<Control<C>> for ControlState {
    fn from(control: Control<C>) -> Self {
        Self {
            id: control.id(),
            label: control.label(),
            active: control.active,
        }
    }
}

/// A filtered list as the client should show it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub selection: &'static str,
    pub controls: Vec<ControlState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<PostCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectCard>,
    /// Shown instead of cards when nothing matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listing: Option<Listing>,
    pub written: Vec<PathBuf>,
    /// A generated document (feed XML, config template) meant for stdout.
    pub document: Option<String>,
    pub config: Option<SiteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_written(mut self, paths: Vec<PathBuf>) -> Self {
        self.written = paths;
        self
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Paths and switches the file-based commands need.
#[derive(Debug, Clone)]
pub struct SitePaths {
    /// Directory holding `folio.toml`; relative config paths resolve against it.
    pub root: PathBuf,
}
