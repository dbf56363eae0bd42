//! # Entity Cards
//!
//! Cards are the display blocks of the list pages. This module maps one entity to a
//! serializable view model; the HTML templates (site) and the terminal templates (CLI)
//! both render from the same model, so the layout rules live here once:
//!
//! - The title is always carried in full.
//! - The description is carried in full too. Each target clips it to
//!   [`DESCRIPTION_LINES`] lines: HTML through CSS line clamping, terminals by display
//!   width since they have no clamp.
//! - The category becomes a [`Badge`] whose style name resolves to exactly one colour
//!   pair. Style names are generated from the closed category tables, and template styles
//!   are strict, so a badge without a style fails the render.
//! - Optional fields are `Option`s and serialize as absent. Templates guard the field and
//!   its separator together.
//! - Every date on the site goes through [`format_date`].
//!
//! Link policy: a post card is one link to the post. A project card is a plain container
//! holding an outbound GitHub link and, when the project has one, a link to its write-up.

use crate::model::{Category, Post, Project};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum visible description lines on a card.
pub const DESCRIPTION_LINES: usize = 2;

/// Site-wide date style, e.g. `1 February 2026`.
pub const DATE_FORMAT: &str = "%-d %B %Y";

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Style name of a category badge: `badge-<id>`.
pub fn badge_style<C: Category>(category: C) -> String {
    format!("badge-{}", category.id())
}

pub fn post_href(slug: &str) -> String {
    format!("/blog/{}", slug)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub label: &'static str,
    /// Style name to look up in the renderer's palette.
    pub style: String,
}

impl Badge {
    pub fn of<C: Category>(category: C) -> Self {
        Self {
            id: category.id(),
            label: category.label(),
            style: badge_style(category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub description: String,
    pub badge: Badge,
    pub date: String,
    /// Machine-readable date for `<time datetime>`.
    pub date_iso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    pub draft: bool,
}

impl PostCard {
    pub fn from_post(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            href: post_href(&post.slug),
            title: post.title.clone(),
            description: post.description.clone(),
            badge: Badge::of(post.pillar),
            date: format_date(&post.pub_date),
            date_iso: post.pub_date.format("%Y-%m-%d").to_string(),
            read_time: post.minutes_read.map(|m| format!("{} min read", m)),
            draft: post.draft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub badge: Badge,
    pub tech_stack: Vec<String>,
    pub github_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writeup_href: Option<String>,
    pub featured: bool,
}

impl ProjectCard {
    pub fn from_project(project: &Project) -> Self {
        Self {
            slug: project.slug.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            badge: Badge::of(project.status),
            tech_stack: project.tech_stack.clone(),
            github_url: project.github_url.to_string(),
            writeup_href: project
                .blog_post
                .as_deref()
                .filter(|slug| !slug.trim().is_empty())
                .map(post_href),
            featured: project.featured,
        }
    }
}
