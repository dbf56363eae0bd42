//! # Content Store
//!
//! The [`ContentStore`] trait is the only way the rest of folio reads content. Everything
//! a store returns has already passed schema validation, so downstream code never sees a
//! partially populated entity.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: reads Markdown documents from a content directory
//!   - Posts in `blog/*.md`, projects in `projects/*.md`
//!   - The slug is the file stem
//!   - Files are read in name order
//!
//! - [`memory::InMemoryStore`]: holds already-built entities, for tests
//!
//! ## Document Format
//!
//! ```text
//! ---
//! title: Building Agents on Azure
//! pubDate: 2026-02-25
//! ...
//! ---
//! Markdown body.
//! ```
//!
//! The frontmatter block is delimited by `---` lines and must open the file. Whatever
//! follows the closing fence is the body.
//!
//! Stores return entities in load order; sorting for display happens in the commands layer.

use crate::error::{FolioError, Result};
use crate::model::{Entity, Post, Project};
use std::collections::HashSet;

pub mod fs;
pub mod memory;

/// Read access to validated content.
pub trait ContentStore {
    /// Every post, drafts included.
    fn posts(&self) -> Result<Vec<Post>>;

    /// Every project.
    fn projects(&self) -> Result<Vec<Project>>;
}

const FENCE: &str = "---";

/// Splits a document into its frontmatter source and body.
///
/// Returns `None` when the document does not open with a fenced block.
pub fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != FENCE {
        return None;
    }
    let start = opening.len();
    let mut offset = start;

    for line in lines {
        if line.trim_end() == FENCE {
            let body = &source[offset + line.len()..];
            return Some((&source[start..offset], body));
        }
        offset += line.len();
    }
    None
}

/// Fails when two entities in one collection share a slug.
pub(crate) fn ensure_unique_slugs<E: Entity>(collection: &str, items: &[E]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.slug()) {
            return Err(FolioError::Content(format!(
                "duplicate {} slug `{}`",
                collection,
                item.slug()
            )));
        }
    }
    Ok(())
}
