//! Paints a [`PreviewLayout`] into a PNG.
//!
//! Geometry follows a fixed flex-like stack: 64px vertical and 80px horizontal padding,
//! a top row (badge left, logo right), title, description, and a footer pinned to the
//! bottom edge behind a 1px rule.

use super::{PreviewLayout, GRADIENT, HEIGHT, WIDTH};
use crate::config::PreviewConfig;
use crate::error::{FolioError, Result};
use crate::model::Color;
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const PAD_X: f32 = 80.0;
const PAD_Y: f32 = 64.0;
const LOGO_SIZE: u32 = 96;
const TOP_ROW_GAP: f32 = 40.0;
const TITLE_GAP: f32 = 20.0;
const TITLE_MAX_WIDTH: f32 = 1000.0;
const DESCRIPTION_SIZE: f32 = 22.0;
const DESCRIPTION_MAX_WIDTH: f32 = 860.0;
const BADGE_TEXT: f32 = 16.0;
const BADGE_PAD_X: f32 = 18.0;
const BADGE_PAD_Y: f32 = 8.0;
const BADGE_DOT: f32 = 8.0;
const BADGE_GAP: f32 = 8.0;
const AUTHOR_SIZE: f32 = 18.0;
const FOOTER_SIZE: f32 = 16.0;
const FOOTER_GAP: f32 = 12.0;
const FOOTER_PAD_TOP: f32 = 24.0;

const TITLE_COLOR: Color = Color::rgb(0xed, 0xed, 0xed);
const DESCRIPTION_COLOR: Color = Color::rgb(0x5a, 0x5a, 0x5a);
const RULE_COLOR: Color = Color::rgb(0x1e, 0x1e, 0x1e);
const META_COLOR: Color = Color::rgb(0x55, 0x55, 0x55);
const SEPARATOR_COLOR: Color = Color::rgb(0x2a, 0x2a, 0x2a);
const ACCENT_COLOR: Color = Color::rgb(0x3b, 0x82, 0xf6);

/// Fonts and logo used for painting. Missing pieces are skipped.
#[derive(Clone, Default)]
pub struct PreviewAssets {
    pub regular: Option<FontArc>,
    pub bold: Option<FontArc>,
    pub logo: Option<RgbaImage>,
}

impl PreviewAssets {
    /// Loads every configured asset. A configured path that cannot be read or decoded
    /// is an error.
    pub fn load(config: &PreviewConfig, root: &Path) -> Result<Self> {
        let regular = config.font_regular(root).map(load_font).transpose()?;
        let bold = config.font_bold(root).map(load_font).transpose()?;
        let logo = config.logo(root).map(load_logo).transpose()?;
        if regular.is_none() && bold.is_none() {
            tracing::warn!("no preview fonts configured; preview images will have no text");
        }
        Ok(Self {
            regular,
            bold,
            logo,
        })
    }

    fn regular(&self) -> Option<&FontArc> {
        self.regular.as_ref().or(self.bold.as_ref())
    }

    fn bold(&self) -> Option<&FontArc> {
        self.bold.as_ref().or(self.regular.as_ref())
    }
}

fn load_font(path: PathBuf) -> Result<FontArc> {
    let bytes = fs::read(&path).map_err(|e| FolioError::Font {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let font = FontArc::try_from_vec(bytes).map_err(|e| FolioError::Font {
        path: path.clone(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "loaded preview font");
    Ok(font)
}

fn load_logo(path: PathBuf) -> Result<RgbaImage> {
    let bytes = fs::read(&path).map_err(|e| FolioError::Document {
        path: path.clone(),
        message: format!("cannot read logo: {}", e),
    })?;
    let image = image::load_from_memory(&bytes)?.to_rgba8();
    Ok(cover_square(&image, LOGO_SIZE))
}

/// Centre-crops to a square and scales to `size`.
fn cover_square(image: &RgbaImage, size: u32) -> RgbaImage {
    let side = image.width().min(image.height());
    let x = (image.width() - side) / 2;
    let y = (image.height() - side) / 2;
    let square = imageops::crop_imm(image, x, y, side, side).to_image();
    imageops::resize(&square, size, size, FilterType::Triangle)
}

/// Paints the layout and encodes it as PNG.
pub fn render_png(layout: &PreviewLayout, assets: &PreviewAssets) -> Result<Vec<u8>> {
    let canvas = paint(layout, assets);
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn paint(layout: &PreviewLayout, assets: &PreviewAssets) -> RgbaImage {
    let mut canvas = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| gradient_at(x, y));
    let right = WIDTH as f32 - PAD_X;

    // top row
    let badge_height = BADGE_TEXT * 1.25 + BADGE_PAD_Y * 2.0;
    let label_width = assets
        .bold()
        .map(|f| text_width(f, BADGE_TEXT, layout.badge_label))
        .unwrap_or(layout.badge_label.chars().count() as f32 * BADGE_TEXT * 0.6);
    let badge_width = BADGE_PAD_X * 2.0 + BADGE_DOT + BADGE_GAP + label_width;
    fill_rounded_rect(
        &mut canvas,
        PAD_X,
        PAD_Y,
        badge_width,
        badge_height,
        badge_height / 2.0,
        layout.badge.background,
    );
    let dot_x = PAD_X + BADGE_PAD_X + BADGE_DOT / 2.0;
    let dot_y = PAD_Y + badge_height / 2.0;
    fill_circle(&mut canvas, dot_x, dot_y, BADGE_DOT / 2.0, layout.badge.text);
    if let Some(font) = assets.bold() {
        let x = PAD_X + BADGE_PAD_X + BADGE_DOT + BADGE_GAP;
        let y = PAD_Y + (badge_height - line_height(font, BADGE_TEXT)) / 2.0;
        draw_text(&mut canvas, font, BADGE_TEXT, x, y, layout.badge_label, layout.badge.text);
    }

    if let Some(logo) = &assets.logo {
        let x = (right - LOGO_SIZE as f32) as u32;
        draw_round_image(&mut canvas, logo, x, PAD_Y as u32);
    }

    // title and description
    let mut y = PAD_Y + badge_height.max(LOGO_SIZE as f32) + TOP_ROW_GAP;
    if let Some(font) = assets.bold() {
        for line in wrap(font, layout.title_size, &layout.title, TITLE_MAX_WIDTH) {
            draw_text(&mut canvas, font, layout.title_size, PAD_X, y, &line, TITLE_COLOR);
            y += layout.title_size * 1.1;
        }
        y += TITLE_GAP;
    }
    if let Some(font) = assets.regular() {
        for line in wrap(font, DESCRIPTION_SIZE, &layout.description, DESCRIPTION_MAX_WIDTH) {
            draw_text(&mut canvas, font, DESCRIPTION_SIZE, PAD_X, y, &line, DESCRIPTION_COLOR);
            y += DESCRIPTION_SIZE * 1.5;
        }
    }

    // footer
    let footer_line = AUTHOR_SIZE * 1.25;
    let footer_top = HEIGHT as f32 - PAD_Y - footer_line;
    let rule_y = footer_top - FOOTER_PAD_TOP;
    fill_rect(&mut canvas, PAD_X, rule_y, right - PAD_X, 1.0, RULE_COLOR);

    if let Some(font) = assets.bold() {
        draw_text(&mut canvas, font, AUTHOR_SIZE, PAD_X, footer_top, &layout.author, TITLE_COLOR);
    }
    if let Some(font) = assets.regular() {
        let mut pieces: Vec<(&str, Color)> = Vec::new();
        for (i, item) in layout.footer.iter().enumerate() {
            if i > 0 {
                pieces.push(("·", SEPARATOR_COLOR));
            }
            let color = if item.accent { ACCENT_COLOR } else { META_COLOR };
            pieces.push((item.text.as_str(), color));
        }
        let widths: Vec<f32> = pieces
            .iter()
            .map(|(text, _)| text_width(font, FOOTER_SIZE, text))
            .collect();
        let total = widths.iter().sum::<f32>() + FOOTER_GAP * (pieces.len().saturating_sub(1)) as f32;
        let mut x = right - total;
        let y = footer_top + (footer_line - line_height(font, FOOTER_SIZE)) / 2.0;
        for ((text, color), width) in pieces.iter().zip(widths) {
            draw_text(&mut canvas, font, FOOTER_SIZE, x, y, text, *color);
            x += width + FOOTER_GAP;
        }
    }

    canvas
}

/// Background colour at a pixel: a diagonal gradient from the top-right corner.
fn gradient_at(x: u32, y: u32) -> Rgba<u8> {
    let fx = (WIDTH - 1 - x) as f32 / (WIDTH - 1) as f32;
    let fy = y as f32 / (HEIGHT - 1) as f32;
    let t = (fx + fy) / 2.0;

    let mut lower = GRADIENT[0];
    let mut upper = GRADIENT[GRADIENT.len() - 1];
    for pair in GRADIENT.windows(2) {
        if t >= pair[0].0 && t <= pair[1].0 {
            lower = pair[0];
            upper = pair[1];
            break;
        }
    }
    let span = (upper.0 - lower.0).max(f32::EPSILON);
    let local = ((t - lower.0) / span).clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * local).round() as u8;
    Rgba([
        mix(lower.1.r, upper.1.r),
        mix(lower.1.g, upper.1.g),
        mix(lower.1.b, upper.1.b),
        255,
    ])
}

/// Source-over blend of `color` at `coverage` onto an opaque canvas.
fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let over = |dst: u8, src: u8| (dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
    *pixel = Rgba([
        over(pixel[0], color.r),
        over(pixel[1], color.g),
        over(pixel[2], color.b),
        255,
    ]);
}

fn fill_rect(canvas: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Color) {
    for py in y.floor() as i64..(y + h).ceil() as i64 {
        for px in x.floor() as i64..(x + w).ceil() as i64 {
            blend(canvas, px, py, color, 1.0);
        }
    }
}

fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    radius: f32,
    color: Color,
) {
    let radius = radius.min(w / 2.0).min(h / 2.0);
    for py in y.floor() as i64..(y + h).ceil() as i64 {
        for px in x.floor() as i64..(x + w).ceil() as i64 {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;
            // distance outside the inner rectangle the corners are swept around
            let dx = (x + radius - cx).max(cx - (x + w - radius)).max(0.0);
            let dy = (y + radius - cy).max(cy - (y + h - radius)).max(0.0);
            let distance = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
            blend(canvas, px, py, color, coverage);
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Color) {
    fill_rounded_rect(
        canvas,
        cx - radius,
        cy - radius,
        radius * 2.0,
        radius * 2.0,
        radius,
        color,
    );
}

/// Draws `image` clipped to the circle inscribed in its bounds.
fn draw_round_image(canvas: &mut RgbaImage, image: &RgbaImage, x0: u32, y0: u32) {
    let radius = image.width().min(image.height()) as f32 / 2.0;
    for (x, y, pixel) in image.enumerate_pixels() {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
        let color = Color::rgb(pixel[0], pixel[1], pixel[2]).with_alpha(pixel[3]);
        blend(
            canvas,
            (x0 + x) as i64,
            (y0 + y) as i64,
            color,
            coverage,
        );
    }
}

fn line_height(font: &FontArc, size: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    scaled.ascent() - scaled.descent()
}

fn text_width(font: &FontArc, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

/// Greedy word wrap to `max_width` pixels. A single overlong word gets a line to itself.
fn wrap(font: &FontArc, size: f32, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if !current.is_empty() && text_width(font, size, &candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws one line of text with its top edge at `y`.
fn draw_text(
    canvas: &mut RgbaImage,
    font: &FontArc,
    size: f32,
    x: f32,
    y: f32,
    text: &str,
    color: Color,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let baseline = y + scaled.ascent();
    let mut caret = x;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                blend(
                    canvas,
                    bounds.min.x as i64 + gx as i64,
                    bounds.min.y as i64 + gy as i64,
                    color,
                    coverage,
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::model::fixtures::post;
    use crate::model::{Category, Pillar};

    fn layout() -> PreviewLayout {
        let config = SiteConfig::default();
        PreviewLayout::for_post(&post("x", Pillar::AgentBuilding), &config).unwrap()
    }

    fn fixture_font() -> FontArc {
        load_font(PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/fonts/DejaVuSansMono.ttf"
        )))
        .unwrap()
    }

    fn with_font() -> PreviewAssets {
        PreviewAssets {
            regular: Some(fixture_font()),
            ..Default::default()
        }
    }

    fn long_title_layout() -> PreviewLayout {
        let mut post = post("x", Pillar::AgentBuilding);
        post.title = "Building small sovereign agents that run well on a laptop".into();
        PreviewLayout::for_post(&post, &SiteConfig::default()).unwrap()
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    fn close(pixel: &Rgba<u8>, color: Color) -> bool {
        let d = |a: u8, b: u8| (a as i32 - b as i32).abs() <= 3;
        d(pixel[0], color.r) && d(pixel[1], color.g) && d(pixel[2], color.b)
    }

    #[test]
    fn test_png_has_fixed_dimensions() {
        let bytes = render_png(&layout(), &PreviewAssets::default()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let image = decode(&bytes);
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_gradient_runs_top_right_to_bottom_left() {
        let image = decode(&render_png(&layout(), &PreviewAssets::default()).unwrap());
        assert!(close(image.get_pixel(WIDTH - 1, 0), GRADIENT[0].1));
        assert!(close(image.get_pixel(0, HEIGHT - 1), GRADIENT[2].1));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = render_png(&layout(), &PreviewAssets::default()).unwrap();
        let b = render_png(&layout(), &PreviewAssets::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_badge_dot_uses_category_colour() {
        let image = decode(&render_png(&layout(), &PreviewAssets::default()).unwrap());
        let badge_height = BADGE_TEXT * 1.25 + BADGE_PAD_Y * 2.0;
        let x = (PAD_X + BADGE_PAD_X + BADGE_DOT / 2.0) as u32;
        let y = (PAD_Y + badge_height / 2.0) as u32;
        assert!(close(
            image.get_pixel(x, y),
            Pillar::AgentBuilding.badge().text
        ));
    }

    #[test]
    fn test_logo_is_clipped_to_a_circle() {
        let red = RgbaImage::from_pixel(LOGO_SIZE, LOGO_SIZE, Rgba([255, 0, 0, 255]));
        let assets = PreviewAssets {
            logo: Some(red),
            ..Default::default()
        };
        let image = decode(&render_png(&layout(), &assets).unwrap());
        let x0 = WIDTH - PAD_X as u32 - LOGO_SIZE;
        let y0 = PAD_Y as u32;
        let centre = image.get_pixel(x0 + LOGO_SIZE / 2, y0 + LOGO_SIZE / 2);
        assert_eq!(centre, &Rgba([255, 0, 0, 255]));
        let corner = image.get_pixel(x0, y0);
        assert!(corner[0] < 100);
    }

    #[test]
    fn test_cover_square_crops_and_scales() {
        let wide = RgbaImage::from_pixel(300, 100, Rgba([0, 0, 255, 255]));
        let square = cover_square(&wide, LOGO_SIZE);
        assert_eq!(square.dimensions(), (LOGO_SIZE, LOGO_SIZE));
    }

    #[test]
    fn test_configured_missing_font_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PreviewConfig {
            font_regular: Some("fonts/missing.ttf".into()),
            ..Default::default()
        };
        let err = PreviewAssets::load(&config, dir.path()).err().unwrap();
        assert!(matches!(err, FolioError::Font { .. }));
    }

    #[test]
    fn test_invalid_font_bytes_are_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("bad.ttf"), b"not a font").unwrap();
        let config = PreviewConfig {
            font_bold: Some("bad.ttf".into()),
            ..Default::default()
        };
        assert!(PreviewAssets::load(&config, dir.path()).is_err());
    }

    #[test]
    fn test_unconfigured_assets_load_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let assets = PreviewAssets::load(&PreviewConfig::default(), dir.path()).unwrap();
        assert!(assets.regular.is_none() && assets.bold.is_none() && assets.logo.is_none());
    }

    #[test]
    fn test_title_wraps_at_max_width() {
        let font = fixture_font();
        let layout = long_title_layout();
        let lines = wrap(&font, layout.title_size, &layout.title, TITLE_MAX_WIDTH);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(text_width(&font, layout.title_size, line) <= TITLE_MAX_WIDTH);
        }
        assert_eq!(lines.join(" "), layout.title);
    }

    #[test]
    fn test_wrap_gives_an_overlong_word_its_own_line() {
        let font = fixture_font();
        let word = "w".repeat(60);
        let lines = wrap(&font, 60.0, &format!("a {} b", word), TITLE_MAX_WIDTH);
        assert_eq!(lines, vec!["a".to_string(), word, "b".to_string()]);
    }

    #[test]
    fn test_title_is_drawn_below_the_top_row() {
        let layout = long_title_layout();
        let image = decode(&render_png(&layout, &with_font()).unwrap());
        let badge_height = BADGE_TEXT * 1.25 + BADGE_PAD_Y * 2.0;
        let title_top = (PAD_Y + badge_height.max(LOGO_SIZE as f32) + TOP_ROW_GAP) as u32;
        let title_bottom = title_top + (layout.title_size * 1.1 * 2.0) as u32;

        let has_title_color = |rows: std::ops::Range<u32>| {
            rows.flat_map(|y| (PAD_X as u32..(PAD_X + TITLE_MAX_WIDTH) as u32).map(move |x| (x, y)))
                .any(|(x, y)| close(image.get_pixel(x, y), TITLE_COLOR))
        };
        assert!(has_title_color(title_top..title_bottom));
        assert!(!has_title_color(0..title_top));
    }

    #[test]
    fn test_footer_is_right_aligned() {
        let layout = layout();
        let plain = decode(&render_png(&layout, &PreviewAssets::default()).unwrap());
        let drawn = decode(&render_png(&layout, &with_font()).unwrap());

        let footer_line = AUTHOR_SIZE * 1.25;
        let footer_top = (HEIGHT as f32 - PAD_Y - footer_line) as u32;
        let footer_bottom = (HEIGHT as f32 - PAD_Y) as u32;
        let rightmost = (footer_top..footer_bottom)
            .flat_map(|y| (WIDTH / 2..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| plain.get_pixel(x, y) != drawn.get_pixel(x, y))
            .map(|(x, _)| x)
            .max()
            .unwrap();

        let right = (WIDTH as f32 - PAD_X) as u32;
        assert!(rightmost <= right + 1, "footer ends at {}", rightmost);
        assert!(rightmost >= right - 6, "footer ends at {}", rightmost);
    }

    #[test]
    fn test_badge_label_is_drawn_inside_the_pill() {
        let layout = layout();
        let plain = decode(&render_png(&layout, &PreviewAssets::default()).unwrap());
        let drawn = decode(&render_png(&layout, &with_font()).unwrap());
        let badge_height = BADGE_TEXT * 1.25 + BADGE_PAD_Y * 2.0;
        let label_x = (PAD_X + BADGE_PAD_X + BADGE_DOT + BADGE_GAP) as u32;
        let label_width = text_width(&fixture_font(), BADGE_TEXT, layout.badge_label) as u32;

        let in_pill = (PAD_Y as u32..(PAD_Y + badge_height) as u32)
            .flat_map(|y| (label_x..label_x + label_width).map(move |x| (x, y)))
            .filter(|&(x, y)| plain.get_pixel(x, y) != drawn.get_pixel(x, y))
            .count();
        assert!(in_pill > 0);
    }
}
