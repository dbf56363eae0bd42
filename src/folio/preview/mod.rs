//! # Social Preview Images
//!
//! Each published post gets a 1200x630 PNG used by link unfurlers. Producing one is split
//! in two:
//!
//! - [`PreviewLayout::for_post`] decides *what* goes on the card: badge, title size,
//!   shortened description, footer items. It is pure and cheap to test.
//! - [`raster::render_png`] decides *where* and paints it.
//!
//! ```text
//! +------------------------------------------------------------+
//! | (* Agent Building)                                  (logo) |
//! |                                                            |
//! | Title, 60/52/44px by length                                |
//! | Description, shortened past 115 characters…                |
//! |------------------------------------------------------------|
//! | Author                 4 min read · 1 February 2026 · host |
//! +------------------------------------------------------------+
//! ```
//!
//! The badge colours come from the same exhaustive table as the list badges, so there is
//! no fallback style here either.

pub mod raster;

use crate::card::format_date;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::model::{BadgeStyle, Category, Color, Post};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const DESCRIPTION_LIMIT: usize = 115;
const DESCRIPTION_KEEP: usize = 112;

/// Background gradient stops, top-right to bottom-left.
pub const GRADIENT: [(f32, Color); 3] = [
    (0.0, Color::rgb(0x1e, 0x10, 0x55)),
    (0.55, Color::rgb(0x0e, 0x18, 0x40)),
    (1.0, Color::rgb(0x0a, 0x0a, 0x0a)),
];

/// One item of the footer's right-hand group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterItem {
    pub text: String,
    pub accent: bool,
}

/// Everything drawn on one preview card.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub badge_label: &'static str,
    pub badge: BadgeStyle,
    pub title: String,
    pub title_size: f32,
    pub description: String,
    pub author: String,
    pub footer: Vec<FooterItem>,
}

impl PreviewLayout {
    pub fn for_post(post: &Post, config: &SiteConfig) -> Result<Self> {
        let mut footer = Vec::new();
        if let Some(minutes) = post.minutes_read {
            footer.push(FooterItem {
                text: format!("{} min read", minutes),
                accent: false,
            });
        }
        footer.push(FooterItem {
            text: format_date(&post.pub_date),
            accent: false,
        });
        footer.push(FooterItem {
            text: config.site_host()?,
            accent: true,
        });

        Ok(Self {
            badge_label: post.pillar.label(),
            badge: post.pillar.badge(),
            title: post.title.clone(),
            title_size: title_size(&post.title),
            description: shorten_description(&post.description),
            author: config.author.clone(),
            footer,
        })
    }
}

/// Title font size in pixels, smaller for longer titles.
pub fn title_size(title: &str) -> f32 {
    match title.chars().count() {
        n if n > 80 => 44.0,
        n if n > 50 => 52.0,
        _ => 60.0,
    }
}

/// Cuts descriptions longer than 115 characters to 112 plus `…`.
pub fn shorten_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let kept: String = description.chars().take(DESCRIPTION_KEEP).collect();
        format!("{}…", kept)
    } else {
        description.to_string()
    }
}
