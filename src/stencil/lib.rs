//! # Stencil - Named-Style Template Rendering
//!
//! Stencil renders [minijinja](https://docs.rs/minijinja) templates whose presentation is
//! expressed through *named styles* rather than inline markup or escape codes. The same
//! style name can carry a CSS declaration (for HTML pages) and a `console::Style` (for
//! terminal output), so one vocabulary serves both the generated site and the CLI.
//!
//! ## Targets
//!
//! - [`Target::Html`]: every template is HTML auto-escaped. The `style` filter wraps its
//!   input in `<span class="NAME" style="CSS">…</span>`.
//! - [`Target::Terminal`]: no escaping. The `style` filter applies ANSI codes when colour
//!   is enabled and returns the plain text otherwise.
//!
//! ## Missing Styles
//!
//! By default an unknown style name is a render **error**. Styles are usually generated
//! from closed tables (one entry per category, say), so a name that does not resolve means
//! the table and the data disagree and the output must not be produced.
//!
//! ## Quick Example
//!
//! ```rust
//! use stencil::{render, Style, Styles, Target};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { name: String }
//!
//! let styles = Styles::new().add("name", Style::new().css("font-weight: 600"));
//! let html = render(
//!     r#"<p>{{ name | style("name") }}</p>"#,
//!     &Data { name: "Tom & Jerry".into() },
//!     &styles,
//!     Target::Html,
//! ).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<p><span class="name" style="font-weight: 600">Tom &amp; Jerry</span></p>"#
//! );
//! ```

use console::Term;
use minijinja::{AutoEscape, Environment, ErrorKind, Output, State, Value};
use serde::Serialize;
use std::collections::HashMap;

pub use minijinja::Error;

/// Where rendered output is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Html,
    Terminal { color: bool },
}

impl Target {
    /// Terminal target with colour support detected from stdout.
    pub fn detect_terminal() -> Self {
        Target::Terminal {
            color: Term::stdout().features().colors_supported(),
        }
    }
}

/// One named style: a CSS declaration for HTML and an ANSI style for terminals.
#[derive(Debug, Clone)]
pub struct Style {
    css: String,
    ansi: console::Style,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            css: String::new(),
            ansi: console::Style::new(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inline CSS declaration used for the HTML target.
    pub fn css(mut self, declaration: impl Into<String>) -> Self {
        self.css = declaration.into();
        self
    }

    /// Sets the terminal style used when colour is enabled.
    pub fn ansi(mut self, style: console::Style) -> Self {
        self.ansi = style;
        self
    }

    pub fn css_declaration(&self) -> &str {
        &self.css
    }
}

/// A registry of named styles.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    styles: HashMap<String, Style>,
}

impl Styles {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any previous entry with the same name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Applies a named style to already-escaped-or-plain `text` for the given target.
    ///
    /// For [`Target::Html`] the caller passes HTML-safe text; the result is HTML.
    pub fn apply(&self, name: &str, text: &str, target: Target) -> Result<String, Error> {
        let style = self.styles.get(name).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("unknown style `{}`", name),
            )
        })?;

        Ok(match target {
            Target::Html if style.css.is_empty() => {
                format!(r#"<span class="{}">{}</span>"#, escape_html(name), text)
            }
            Target::Html => format!(
                r#"<span class="{}" style="{}">{}</span>"#,
                escape_html(name),
                escape_html(&style.css),
                text
            ),
            // The target already decided on colour; don't let console second-guess it.
            Target::Terminal { color: true } => style
                .ansi
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            Target::Terminal { color: false } => text.to_string(),
        })
    }
}

/// Renders a one-off template string.
pub fn render<T: Serialize>(
    template: &str,
    data: &T,
    styles: &Styles,
    target: Target,
) -> Result<String, Error> {
    let mut renderer = Renderer::new(styles.clone(), target);
    renderer.add_template("_inline", template)?;
    renderer.render("_inline", data)
}

/// A renderer with pre-registered templates.
///
/// Templates registered on the same renderer can `{% include %}` one another, which is how
/// list pages reuse card partials.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(styles: Styles, target: Target) -> Self {
        let mut env = Environment::new();
        match target {
            Target::Html => {
                env.set_auto_escape_callback(|_| AutoEscape::Html);
                env.set_formatter(html_formatter);
            }
            Target::Terminal { .. } => env.set_auto_escape_callback(|_| AutoEscape::None),
        }
        register_style_filter(&mut env, styles, target);
        Self { env }
    }

    /// HTML renderer: auto-escaping on for every template.
    pub fn html(styles: Styles) -> Self {
        Self::new(styles, Target::Html)
    }

    /// Registers a named template. Syntax errors surface here.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Renders a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(data)
    }
}

fn register_style_filter(env: &mut Environment<'static>, styles: Styles, target: Target) {
    env.add_filter(
        "style",
        move |value: Value, name: String| -> Result<Value, Error> {
            match target {
                Target::Html => {
                    let text = if value.is_safe() {
                        value.to_string()
                    } else {
                        escape_html(&value.to_string())
                    };
                    Ok(Value::from_safe_string(styles.apply(&name, &text, target)?))
                }
                Target::Terminal { .. } => {
                    Ok(Value::from(styles.apply(&name, &value.to_string(), target)?))
                }
            }
        },
    );
}

/// Escapes text for HTML content and quoted attribute values.
///
/// Only `& < > " '` are replaced, so URLs and paths stay readable in the output.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_formatter(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    let text = if value.is_safe() || matches!(state.auto_escape(), AutoEscape::None) {
        value.to_string()
    } else {
        escape_html(&value.to_string())
    };
    out.write_str(&text)
        .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write template output"))
}

/// Converts an RGB triplet to the nearest ANSI 256-colour palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}
