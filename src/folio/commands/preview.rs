use crate::commands::{CmdMessage, CmdResult, SitePaths};
use crate::config::SiteConfig;
use crate::error::{FolioError, Result};
use crate::preview::raster::{render_png, PreviewAssets};
use crate::preview::PreviewLayout;
use crate::store::ContentStore;
use std::fs;
use std::path::PathBuf;

/// Renders one post's preview image to `output`, or to `<out_dir>/og/<slug>.png`.
///
/// Drafts can be previewed; the image itself does not depend on draft status.
pub fn run<S: ContentStore>(
    store: &S,
    config: &SiteConfig,
    paths: &SitePaths,
    slug: &str,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let posts = store.posts()?;
    let post = posts
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| FolioError::Content(format!("no post with slug `{}`", slug)))?;

    let assets = PreviewAssets::load(&config.preview, &paths.root)?;
    let png = render_png(&PreviewLayout::for_post(post, config)?, &assets)?;

    let output = output.unwrap_or_else(|| {
        config
            .out_dir(&paths.root)
            .join("og")
            .join(format!("{}.png", slug))
    });
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, png)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Wrote preview for `{}` to {}",
        slug,
        output.display()
    )));
    Ok(result.with_written(vec![output]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::post;
    use crate::model::Pillar;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> SitePaths {
        SitePaths {
            root: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn test_writes_to_default_location() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryStore::new().with_post(post("hello", Pillar::Development));
        let result = run(&store, &SiteConfig::default(), &paths(&dir), "hello", None).unwrap();
        let expected = dir.path().join("dist/og/hello.png");
        assert_eq!(result.written, vec![expected.clone()]);
        assert!(expected.exists());
    }

    #[test]
    fn test_writes_to_explicit_output() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryStore::new().with_post(post("hello", Pillar::Development));
        let output = dir.path().join("card.png");
        run(
            &store,
            &SiteConfig::default(),
            &paths(&dir),
            "hello",
            Some(output.clone()),
        )
        .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_unknown_slug_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryStore::new();
        let err = run(&store, &SiteConfig::default(), &paths(&dir), "ghost", None).unwrap_err();
        assert!(err.to_string().contains("no post with slug `ghost`"));
    }
}
