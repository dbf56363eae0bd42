//! # CLI Templates
//!
//! Terminal output goes through stencil templates kept in `templates/*.tmp` and embedded
//! here as string constants. Keeping them as files makes layout changes easy to edit and
//! diff without touching Rust.
//!
//! Whitespace is explicit: a template ends where its last line ends (minijinja drops one
//! trailing newline), so the including template decides how cards are separated.
//!
//! Layout math (wrapping, truncation, widths) happens in `render.rs`. Templates only pick
//! style names and arrange pre-computed strings.

pub const LISTING_TEMPLATE: &str = include_str!("templates/listing.tmp");
pub const CONTROLS_TEMPLATE: &str = include_str!("templates/controls.tmp");
pub const POST_CARD_TEMPLATE: &str = include_str!("templates/post_card.tmp");
pub const PROJECT_CARD_TEMPLATE: &str = include_str!("templates/project_card.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const WRITTEN_TEMPLATE: &str = include_str!("templates/written.tmp");

/// Every template with the name it is registered and included under.
pub const ALL: &[(&str, &str)] = &[
    ("listing.tmp", LISTING_TEMPLATE),
    ("controls.tmp", CONTROLS_TEMPLATE),
    ("post_card.tmp", POST_CARD_TEMPLATE),
    ("project_card.tmp", PROJECT_CARD_TEMPLATE),
    ("messages.tmp", MESSAGES_TEMPLATE),
    ("written.tmp", WRITTEN_TEMPLATE),
];
