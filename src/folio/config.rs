//! # Configuration
//!
//! Site configuration is loaded with [`confique`] from layered sources.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FOLIO_SITE`, `FOLIO_OUT_DIR`.
//! 2. **Site file**: `folio.toml` in the site root.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! Relative paths in the file are resolved against the site root, not the process working
//! directory.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `site` | `https://example.com` | Absolute base URL of the deployed site |
//! | `title` | `Blog` | Site and feed title |
//! | `description` | `""` | Feed and home page description |
//! | `author` | `Author` | Shown on post pages and preview images |
//! | `content_dir` | `content` | Holds `blog/` and `projects/` |
//! | `out_dir` | `dist` | Build output |
//! | `words_per_minute` | `200` | Reading speed for read-time estimates |
//! | `preview.enabled` | `true` | Write `og/<slug>.png` during builds |
//! | `preview.font_regular` | unset | TTF/OTF for body text on preview images |
//! | `preview.font_bold` | unset | TTF/OTF for titles on preview images |
//! | `preview.logo` | unset | PNG drawn as the round logo |

use crate::error::Result;
use confique::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};
use url::Url;

pub const CONFIG_FILENAME: &str = "folio.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Absolute base URL of the deployed site.
    #[config(env = "FOLIO_SITE", default = "https://example.com")]
    pub site: String,

    /// Site and feed title.
    #[config(default = "Blog")]
    pub title: String,

    /// Site description used by the feed and the home page.
    #[config(default = "")]
    pub description: String,

    /// Author name shown on posts and preview images.
    #[config(default = "Author")]
    pub author: String,

    /// Directory holding the `blog/` and `projects/` collections.
    #[config(default = "content")]
    pub content_dir: PathBuf,

    /// Directory the build writes to.
    #[config(env = "FOLIO_OUT_DIR", default = "dist")]
    pub out_dir: PathBuf,

    /// Reading speed used for read-time estimates.
    #[config(default = 200)]
    pub words_per_minute: u32,

    #[config(nested)]
    pub preview: PreviewConfig,
}

/// Social preview image settings.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Render `og/<slug>.png` for every published post.
    #[config(default = true)]
    pub enabled: bool,

    /// Font for body text. Text is not drawn when unset.
    pub font_regular: Option<PathBuf>,

    /// Font for titles. Falls back to `font_regular` when unset.
    pub font_bold: Option<PathBuf>,

    /// Logo image drawn inside the round frame.
    pub logo: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_regular: None,
            font_bold: None,
            logo: None,
        }
    }
}

// Mirrors the `#[config(default = ...)]` values above; a test keeps them in step.
impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: "https://example.com".to_string(),
            title: "Blog".to_string(),
            description: String::new(),
            author: "Author".to_string(),
            content_dir: PathBuf::from("content"),
            out_dir: PathBuf::from("dist"),
            words_per_minute: 200,
            preview: PreviewConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Loads `folio.toml` from `root`, layered under environment overrides.
    ///
    /// A missing file is not an error: defaults apply.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        tracing::debug!(path = %path.display(), exists = path.exists(), "loading config");
        let config = SiteConfig::builder().env().file(&path).load()?;
        config.site_url()?;
        Ok(config)
    }

    /// A commented sample `folio.toml` listing every key and its default.
    pub fn template() -> String {
        confique::toml::template::<SiteConfig>(confique::toml::FormatOptions::default())
    }

    /// The validated site URL, always ending in `/`.
    pub fn site_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.site)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// The site host for display, e.g. `blog.example.com`.
    pub fn site_host(&self) -> Result<String> {
        Ok(self.site_url()?.host_str().unwrap_or_default().to_string())
    }

    /// Absolute URL of a site path such as `blog/hello/`.
    pub fn absolute_url(&self, path: &str) -> Result<String> {
        Ok(self.site_url()?.join(path.trim_start_matches('/'))?.to_string())
    }

    pub fn content_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.content_dir)
    }

    pub fn out_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.out_dir)
    }
}

impl PreviewConfig {
    pub fn font_regular(&self, root: &Path) -> Option<PathBuf> {
        self.font_regular.as_deref().map(|p| resolve(root, p))
    }

    pub fn font_bold(&self, root: &Path) -> Option<PathBuf> {
        self.font_bold.as_deref().map(|p| resolve(root, p))
    }

    pub fn logo(&self, root: &Path) -> Option<PathBuf> {
        self.logo.as_deref().map(|p| resolve(root, p))
    }
}

/// Resolves `path` against `root` unless it is already absolute.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.words_per_minute, 200);
        assert!(config.preview.enabled);
        assert_eq!(config.preview.font_regular, None);
    }

    #[test]
    fn test_default_matches_declared_defaults() {
        let declared = SiteConfig::builder().load().unwrap();
        assert_eq!(declared, SiteConfig::default());
        let preview = PreviewConfig::builder().load().unwrap();
        assert_eq!(preview, PreviewConfig::default());
    }

    #[test]
    fn test_load_reads_site_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "title = \"Notes\"\nauthor = \"Sam\"\nwords_per_minute = 250\n\n[preview]\nenabled = false\nlogo = \"public/logo.png\"\n",
        )
        .unwrap();
        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.author, "Sam");
        assert_eq!(config.words_per_minute, 250);
        assert!(!config.preview.enabled);
        assert_eq!(
            config.preview.logo(dir.path()),
            Some(dir.path().join("public/logo.png"))
        );
    }

    #[test]
    fn test_site_url_gets_trailing_slash() {
        let config = SiteConfig {
            site: "https://blog.example.co.uk".into(),
            ..Default::default()
        };
        assert_eq!(config.site_url().unwrap().as_str(), "https://blog.example.co.uk/");
        assert_eq!(config.site_host().unwrap(), "blog.example.co.uk");
        assert_eq!(
            config.absolute_url("/blog/hello/").unwrap(),
            "https://blog.example.co.uk/blog/hello/"
        );
    }

    #[test]
    fn test_site_under_subpath() {
        let config = SiteConfig {
            site: "https://example.com/~me".into(),
            ..Default::default()
        };
        assert_eq!(
            config.absolute_url("blog/x/").unwrap(),
            "https://example.com/~me/blog/x/"
        );
    }

    #[test]
    fn test_invalid_site_url() {
        let config = SiteConfig {
            site: "not a url".into(),
            ..Default::default()
        };
        assert!(config.site_url().is_err());
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let config = SiteConfig::default();
        let root = Path::new("/srv/site");
        assert_eq!(config.content_dir(root), PathBuf::from("/srv/site/content"));
        assert_eq!(
            resolve(root, Path::new("/abs/out")),
            PathBuf::from("/abs/out")
        );
    }

    #[test]
    fn test_template_lists_keys() {
        let template = SiteConfig::template();
        assert!(template.contains("words_per_minute"));
        assert!(template.contains("[preview]"));
    }
}
