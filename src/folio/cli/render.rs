//! # Rendering Module
//!
//! Terminal output for command results, through stencil templates and the palette in
//! `styles.rs`.
//!
//! Layout calculations (wrapping, truncation) stay in Rust because they need Unicode-aware
//! widths. Templates receive finished strings plus style names. HTML clamps a card
//! description with CSS; the terminal gets the same two-line limit by wrapping here and
//! ending the last kept line with `…`.

use super::styles::{names, FOLIO_STYLES};
use super::templates;
use folio::api::{CmdMessage, ControlState, Listing, MessageLevel};
use folio::card::{PostCard, ProjectCard, DESCRIPTION_LINES};
use serde::Serialize;
use std::path::PathBuf;
use stencil::{Renderer, Target};
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 100;
const INDENT: usize = 2;

#[derive(Serialize)]
struct ControlData {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct PostCardData {
    badge: &'static str,
    badge_style: String,
    meta: String,
    title: String,
    description: Vec<String>,
    href: String,
    draft: bool,
}

#[derive(Serialize)]
struct ProjectCardData {
    badge: &'static str,
    badge_style: String,
    tech: String,
    title: String,
    description: Vec<String>,
    github_url: String,
    writeup_href: Option<String>,
    featured: bool,
}

#[derive(Serialize)]
struct ListingData {
    controls: Vec<ControlData>,
    posts: Vec<PostCardData>,
    projects: Vec<ProjectCardData>,
    placeholder: Option<&'static str>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct WrittenData {
    paths: Vec<String>,
}

fn renderer(use_color: Option<bool>) -> Result<Renderer, stencil::Error> {
    let target = match use_color {
        Some(color) => Target::Terminal { color },
        None => Target::detect_terminal(),
    };
    let mut renderer = Renderer::new(FOLIO_STYLES.clone(), target);
    for (name, source) in templates::ALL {
        renderer.add_template(name, source)?;
    }
    Ok(renderer)
}

fn render_template<T: Serialize>(
    name: &str,
    data: &T,
    use_color: Option<bool>,
) -> Result<String, stencil::Error> {
    renderer(use_color)?.render(name, data)
}

fn control_data(control: &ControlState) -> ControlData {
    if control.active {
        ControlData {
            label: format!("[{}]", control.label),
            style: names::FILTER_ACTIVE,
        }
    } else {
        ControlData {
            label: control.label.to_string(),
            style: names::FILTER,
        }
    }
}

fn post_card_data(card: &PostCard) -> PostCardData {
    let width = LINE_WIDTH - INDENT;
    let meta = match &card.read_time {
        Some(read_time) => format!("{} · {}", card.date, read_time),
        None => card.date.clone(),
    };
    PostCardData {
        badge: card.badge.label,
        badge_style: card.badge.style.clone(),
        meta,
        title: card.title.clone(),
        description: clamp_lines(&card.description, width, DESCRIPTION_LINES),
        href: card.href.clone(),
        draft: card.draft,
    }
}

fn project_card_data(card: &ProjectCard) -> ProjectCardData {
    let width = LINE_WIDTH - INDENT;
    ProjectCardData {
        badge: card.badge.label,
        badge_style: card.badge.style.clone(),
        tech: truncate_to_width(&card.tech_stack.join(", "), width),
        title: card.title.clone(),
        description: clamp_lines(&card.description, width, DESCRIPTION_LINES),
        github_url: card.github_url.clone(),
        writeup_href: card.writeup_href.clone(),
        featured: card.featured,
    }
}

/// Renders a filtered listing: the control strip, then cards or the placeholder.
///
/// A card whose badge style is not in the palette fails the render.
pub fn render_listing(listing: &Listing) -> Result<String, stencil::Error> {
    render_listing_internal(listing, None)
}

fn render_listing_internal(
    listing: &Listing,
    use_color: Option<bool>,
) -> Result<String, stencil::Error> {
    let data = ListingData {
        controls: listing.controls.iter().map(control_data).collect(),
        posts: listing.posts.iter().map(post_card_data).collect(),
        projects: listing.projects.iter().map(project_card_data).collect(),
        placeholder: listing.placeholder,
    };
    render_template("listing.tmp", &data, use_color)
}

/// Renders written file paths, one per line.
pub fn render_written(paths: &[PathBuf]) -> Result<String, stencil::Error> {
    render_written_internal(paths, None)
}

fn render_written_internal(
    paths: &[PathBuf],
    use_color: Option<bool>,
) -> Result<String, stencil::Error> {
    if paths.is_empty() {
        return Ok(String::new());
    }
    let data = WrittenData {
        paths: paths.iter().map(|p| p.display().to_string()).collect(),
    };
    render_template("written.tmp", &data, use_color)
}

/// Renders command messages with one style per level.
pub fn render_messages(messages: &[CmdMessage]) -> Result<String, stencil::Error> {
    render_messages_internal(messages, None)
}

fn render_messages_internal(
    messages: &[CmdMessage],
    use_color: Option<bool>,
) -> Result<String, stencil::Error> {
    if messages.is_empty() {
        return Ok(String::new());
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                },
            })
            .collect(),
    };

    render_template("messages.tmp", &data, use_color)
}

pub fn print_messages(messages: &[CmdMessage]) -> Result<(), stencil::Error> {
    let output = render_messages(messages)?;
    if !output.is_empty() {
        print!("{}", output);
    }
    Ok(())
}

/// Word-wraps `text` to `width` columns, keeping at most `max_lines` lines. When text
/// is dropped, the last kept line ends with `…`.
fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 || width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            return ellipsize_last(lines, width);
        }
        current = if word.width() > width {
            truncate_to_width(word, width)
        } else {
            word.to_string()
        };
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn ellipsize_last(mut lines: Vec<String>, width: usize) -> Vec<String> {
    if let Some(last) = lines.pop() {
        if last.ends_with('…') {
            lines.push(last);
        } else if last.width() < width {
            lines.push(format!("{}…", last));
        } else {
            lines.push(truncate_to_width(&last, width));
        }
    }
    lines
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
