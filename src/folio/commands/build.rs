use crate::commands::check::writeup_warnings;
use crate::commands::{CmdMessage, CmdResult, SitePaths};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::preview::raster::PreviewAssets;
use crate::site::{build_site, BuildOptions};
use crate::store::ContentStore;

/// Builds the site into `options.out_dir`.
pub fn run<S: ContentStore>(
    store: &S,
    config: &SiteConfig,
    paths: &SitePaths,
    options: &BuildOptions,
) -> Result<CmdResult> {
    let posts = store.posts()?;
    let projects = store.projects()?;

    let mut result = CmdResult::default();
    for warning in writeup_warnings(&posts, &projects) {
        result.add_message(warning);
    }

    let assets = if config.preview.enabled {
        Some(PreviewAssets::load(&config.preview, &paths.root)?)
    } else {
        None
    };

    let report = build_site(config, posts, projects, options, assets.as_ref())?;

    if report.drafts_skipped > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} draft(s); pass --drafts to include them",
            report.drafts_skipped
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Built {} posts and {} projects into {} ({} files, {} preview images)",
        report.posts,
        report.projects,
        options.out_dir.display(),
        report.files.len(),
        report.previews
    )));
    Ok(result.with_written(report.files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{post, project};
    use crate::model::{Pillar, ProjectStatus};
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup(previews: bool) -> (TempDir, SiteConfig, SitePaths, BuildOptions) {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.preview.enabled = previews;
        let paths = SitePaths {
            root: dir.path().to_path_buf(),
        };
        let options = BuildOptions {
            out_dir: dir.path().join("dist"),
            include_drafts: false,
        };
        (dir, config, paths, options)
    }

    #[test]
    fn test_builds_and_reports_written_files() {
        let (_dir, config, paths, options) = setup(false);
        let mut draft = post("d", Pillar::Development);
        draft.draft = true;
        let store = InMemoryStore::new()
            .with_posts(vec![post("a", Pillar::Development), draft])
            .with_project(project("p", ProjectStatus::Active));

        let result = run(&store, &config, &paths, &options).unwrap();
        assert!(result.written.contains(&PathBuf::from("blog/a/index.html")));
        assert!(!result.written.iter().any(|p| p.starts_with("og")));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Skipped 1 draft")));
    }

    #[test]
    fn test_writes_previews_when_enabled() {
        let (_dir, config, paths, options) = setup(true);
        let store = InMemoryStore::new().with_post(post("a", Pillar::Development));
        let result = run(&store, &config, &paths, &options).unwrap();
        assert!(result.written.contains(&PathBuf::from("og/a.png")));
    }

    #[test]
    fn test_missing_configured_logo_fails_the_build() {
        let (_dir, mut config, paths, options) = setup(true);
        config.preview.logo = Some("nope.png".into());
        let store = InMemoryStore::new().with_post(post("a", Pillar::Development));
        assert!(run(&store, &config, &paths, &options).is_err());
    }
}
