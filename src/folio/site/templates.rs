//! # Page Templates
//!
//! Page markup lives in stand-alone files under `templates/` so it can be edited and diffed
//! as HTML. They are compiled in as string constants and registered by name on one
//! renderer, which lets pages `{% extends %}` the layout and `{% include %}` the card
//! partials.
//!
//! Presentation rules that need data (badge colours) go through the `style` filter; any
//! logic beyond a presence check belongs in the view models, not here.

pub const BASE: &str = include_str!("templates/base.html");
pub const HOME: &str = include_str!("templates/home.html");
pub const POST: &str = include_str!("templates/post.html");
pub const POST_LIST: &str = include_str!("templates/post_list.html");
pub const PROJECT_LIST: &str = include_str!("templates/project_list.html");
pub const POST_CARD: &str = include_str!("templates/post_card.html");
pub const PROJECT_CARD: &str = include_str!("templates/project_card.html");
pub const FILTERS: &str = include_str!("templates/filters.html");

/// Every template with the name pages refer to it by.
pub const ALL: &[(&str, &str)] = &[
    ("base.html", BASE),
    ("home.html", HOME),
    ("post.html", POST),
    ("post_list.html", POST_LIST),
    ("project_list.html", PROJECT_LIST),
    ("post_card.html", POST_CARD),
    ("project_card.html", PROJECT_CARD),
    ("filters.html", FILTERS),
];
