//! # Site Generation
//!
//! Writes the static site into the output directory:
//!
//! ```text
//! dist/
//! ├── index.html                        # latest posts, featured projects
//! ├── blog/index.html                   # every post (selection `all`)
//! ├── blog/pillar/<id>/index.html       # one page per pillar
//! ├── blog/<slug>/index.html            # post pages
//! ├── projects/index.html               # every project
//! ├── projects/status/<id>/index.html   # one page per status
//! ├── og/<slug>.png                     # preview images, when enabled
//! └── rss.xml
//! ```
//!
//! ## Filtered Lists
//!
//! A static site has no script to hold selection state, so every selection value is
//! rendered ahead of time as its own page. Each page is a snapshot of one [`FilterView`]
//! after `select_category`; following a control link is the selection action. The
//! control strip is the same on every page, one link per selectable value, with the
//! current page's link marked active.
//!
//! Drafts are left out unless the build asks for them, and never reach the feed or get
//! preview images.

pub mod render;
pub mod templates;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::feed;
use crate::filter::{FilterView, Selection};
use crate::model::{by_sort_order, newest_first, Category, Pillar, Post, Project, ProjectStatus};
use crate::preview::raster::{render_png, PreviewAssets};
use crate::preview::PreviewLayout;
use render::{HomePage, HtmlRenderer, PostPage, SiteMeta, NO_POSTS, NO_PROJECTS};
use std::fs;
use std::path::{Path, PathBuf};

/// Posts shown on the home page.
pub const HOME_POSTS: usize = 3;

/// Where one filtered list and its selection pages live.
#[derive(Debug, Clone, Copy)]
pub struct ListRoute {
    pub base: &'static str,
    pub segment: &'static str,
    pub heading: &'static str,
    pub filter_label: &'static str,
    pub empty_message: &'static str,
}

pub const POSTS_ROUTE: ListRoute = ListRoute {
    base: "blog",
    segment: "pillar",
    heading: "Blog",
    filter_label: "Filter posts by pillar",
    empty_message: NO_POSTS,
};

pub const PROJECTS_ROUTE: ListRoute = ListRoute {
    base: "projects",
    segment: "status",
    heading: "Projects",
    filter_label: "Filter projects by status",
    empty_message: NO_PROJECTS,
};

impl ListRoute {
    /// Site-relative directory of a selection's page, e.g. `blog/pillar/sovereign-ai`.
    pub fn dir<C: Category>(&self, selection: Selection<C>) -> String {
        match selection {
            Selection::All => self.base.to_string(),
            Selection::Only(c) => format!("{}/{}/{}", self.base, self.segment, c.id()),
        }
    }

    pub fn href<C: Category>(&self, selection: Selection<C>) -> String {
        format!("/{}/", self.dir(selection))
    }
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub out_dir: PathBuf,
    pub include_drafts: bool,
}

/// What a build wrote, with paths relative to the output directory.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub files: Vec<PathBuf>,
    pub posts: usize,
    pub projects: usize,
    pub drafts_skipped: usize,
    pub previews: usize,
}

struct PageWriter<'a> {
    out_dir: &'a Path,
    report: BuildReport,
}

impl PageWriter<'_> {
    fn write(&mut self, relative: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Result<()> {
        let relative = relative.into();
        let path = self.out_dir.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        tracing::debug!(path = %relative.display(), "wrote");
        self.report.files.push(relative);
        Ok(())
    }

    fn page(&mut self, dir: &str, html: String) -> Result<()> {
        self.write(Path::new(dir).join("index.html"), html)
    }
}

/// Builds the whole site.
///
/// `previews` carries the loaded preview assets when preview images are enabled.
pub fn build_site(
    config: &SiteConfig,
    posts: Vec<Post>,
    projects: Vec<Project>,
    options: &BuildOptions,
    previews: Option<&PreviewAssets>,
) -> Result<BuildReport> {
    let total_posts = posts.len();
    let mut posts: Vec<Post> = posts
        .into_iter()
        .filter(|p| options.include_drafts || !p.draft)
        .collect();
    newest_first(&mut posts);
    let mut projects = projects;
    by_sort_order(&mut projects);

    let renderer = HtmlRenderer::new()?;
    let site = SiteMeta::new(&config.title, &config.description, &config.author);
    let mut out = PageWriter {
        out_dir: &options.out_dir,
        report: BuildReport {
            posts: posts.len(),
            projects: projects.len(),
            drafts_skipped: total_posts - posts.len(),
            ..Default::default()
        },
    };
    fs::create_dir_all(&options.out_dir)?;
    tracing::info!(out_dir = %options.out_dir.display(), "building site");

    let home = HomePage {
        posts: posts
            .iter()
            .take(HOME_POSTS)
            .map(crate::card::PostCard::from_post)
            .collect(),
        projects: projects
            .iter()
            .filter(|p| p.featured)
            .map(crate::card::ProjectCard::from_project)
            .collect(),
    };
    out.page("", renderer.home(&site, &home)?)?;

    let mut view = FilterView::new(&posts);
    for selection in Selection::<Pillar>::options() {
        view.select_category(selection);
        let html = renderer.post_list(&site, &view, &POSTS_ROUTE)?;
        out.page(&POSTS_ROUTE.dir(selection), html)?;
    }

    let mut view = FilterView::new(&projects);
    for selection in Selection::<ProjectStatus>::options() {
        view.select_category(selection);
        let html = renderer.project_list(&site, &view, &PROJECTS_ROUTE)?;
        out.page(&PROJECTS_ROUTE.dir(selection), html)?;
    }

    for post in &posts {
        let og_image = match previews {
            Some(assets) if !post.draft => {
                let png = render_png(&PreviewLayout::for_post(post, config)?, assets)?;
                out.write(format!("og/{}.png", post.slug), png)?;
                out.report.previews += 1;
                Some(config.absolute_url(&format!("og/{}.png", post.slug))?)
            }
            _ => None,
        };
        let canonical = feed::item_link(config, &post.slug)?;
        let page = PostPage::new(post, canonical, og_image);
        out.page(&format!("blog/{}", post.slug), renderer.post(&site, &page)?)?;
    }

    out.write("rss.xml", feed::render_rss(config, &posts)?)?;

    tracing::info!(
        files = out.report.files.len(),
        previews = out.report.previews,
        "site built"
    );
    Ok(out.report)
}
