//! Terminal styles for the folio CLI.
//!
//! Templates refer to semantic names only (`title`, `muted`, `badge-<id>` ...). The palette
//! below maps them to console styles. Badge styles are generated from the category tables,
//! the same source the site palette uses, so a pillar is the same hue on the page and in
//! the terminal.

use console::Style as Ansi;
use folio::card::badge_style;
use folio::model::{Category, Pillar, ProjectStatus};
use once_cell::sync::Lazy;
use stencil::{rgb_to_ansi256, Style, Styles};

pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const LINK: &str = "link";
    pub const PATH: &str = "path";
    pub const DRAFT: &str = "draft";
    pub const FEATURED: &str = "featured";
    pub const FILTER: &str = "filter";
    pub const FILTER_ACTIVE: &str = "filter_active";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
}

const MUTED_GREY: (u8, u8, u8) = (154, 154, 154);

fn add_badges<C: Category>(styles: Styles) -> Styles {
    C::ALL.iter().fold(styles, |styles, c| {
        let color = rgb_to_ansi256(c.badge().text.rgb_triplet());
        styles.add(&badge_style(*c), Style::new().ansi(Ansi::new().color256(color).bold()))
    })
}

pub static FOLIO_STYLES: Lazy<Styles> = Lazy::new(|| {
    let base = Styles::new()
        .add(names::TITLE, Style::new().ansi(Ansi::new().bold()))
        .add(
            names::MUTED,
            Style::new().ansi(Ansi::new().color256(rgb_to_ansi256(MUTED_GREY))),
        )
        .add(names::LINK, Style::new().ansi(Ansi::new().cyan().underlined()))
        .add(names::PATH, Style::new().ansi(Ansi::new().cyan()))
        .add(names::DRAFT, Style::new().ansi(Ansi::new().yellow().italic()))
        .add(names::FEATURED, Style::new().ansi(Ansi::new().magenta()))
        .add(names::FILTER, Style::new().ansi(Ansi::new().dim()))
        .add(
            names::FILTER_ACTIVE,
            Style::new().ansi(Ansi::new().bold().reverse()),
        )
        .add(names::INFO, Style::new())
        .add(names::SUCCESS, Style::new().ansi(Ansi::new().green()))
        .add(names::WARNING, Style::new().ansi(Ansi::new().yellow()));
    add_badges::<ProjectStatus>(add_badges::<Pillar>(base))
});
