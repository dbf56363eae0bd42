//! HTML rendering of site pages.
//!
//! [`HtmlRenderer`] owns a stencil renderer with every page template registered and the
//! site palette installed. The palette carries one badge style per category, generated
//! from the category tables, and stencil styles are strict: a badge whose style is not in
//! the palette fails the page instead of rendering unstyled.

use super::templates;
use super::ListRoute;
use crate::card::{format_date, PostCard, ProjectCard, DESCRIPTION_LINES};
use crate::error::Result;
use crate::filter::FilterView;
use crate::model::{BadgeStyle, Category, Entity, Pillar, Post, Project, ProjectStatus};
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use stencil::{Renderer, Style, Styles};

pub const NO_POSTS: &str = "No posts found.";
pub const NO_PROJECTS: &str = "No projects found.";

/// Site-wide values every page template can read.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub author: String,
    pub feed_href: String,
    pub description_lines: usize,
}

impl SiteMeta {
    pub fn new(title: &str, description: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            author: author.to_string(),
            feed_href: "/rss.xml".to_string(),
            description_lines: DESCRIPTION_LINES,
        }
    }
}

/// One control of a list page's filter strip, rendered as a link to that selection's page.
#[derive(Debug, Clone, Serialize)]
pub struct ControlLink {
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// One pre-rendered selection of a filtered list.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub heading: &'static str,
    pub filter_label: &'static str,
    pub controls: Vec<ControlLink>,
    pub cards: Vec<T>,
    pub empty: bool,
    pub empty_message: &'static str,
}

impl<T> ListPage<T> {
    fn from_view<E: Entity>(
        view: &FilterView<'_, E>,
        route: &ListRoute,
        to_card: impl Fn(&E) -> T,
    ) -> Self {
        Self {
            heading: route.heading,
            filter_label: route.filter_label,
            controls: view
                .controls()
                .into_iter()
                .map(|c| ControlLink {
                    id: c.id(),
                    label: c.label(),
                    href: route.href(c.selection),
                    active: c.active,
                })
                .collect(),
            cards: view.visible_entities().into_iter().map(to_card).collect(),
            empty: view.is_empty(),
            empty_message: route.empty_message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub card: PostCard,
    pub format: &'static str,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    pub canonical_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    pub content_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub posts: Vec<PostCard>,
    pub projects: Vec<ProjectCard>,
}

#[derive(Serialize)]
struct PageContext<'a, T: Serialize> {
    site: &'a SiteMeta,
    #[serde(flatten)]
    page: T,
}

#[derive(Serialize)]
struct ListContext<'a, T: Serialize> {
    list: &'a ListPage<T>,
}

#[derive(Serialize)]
struct PostContext<'a> {
    post: &'a PostPage,
}

#[derive(Serialize)]
struct HomeContext<'a> {
    home: &'a HomePage,
}

fn badge_css(badge: BadgeStyle) -> Style {
    Style::new().css(format!(
        "background-color: {}; color: {}",
        badge.background.css(),
        badge.text.css()
    ))
}

fn add_badges<C: Category>(styles: Styles) -> Styles {
    C::ALL.iter().fold(styles, |styles, c| {
        styles.add(&crate::card::badge_style(*c), badge_css(c.badge()))
    })
}

/// The site palette: one badge style per pillar and per project status.
pub fn site_styles() -> Styles {
    add_badges::<ProjectStatus>(add_badges::<Pillar>(Styles::new()))
}

/// Converts a Markdown body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

pub struct HtmlRenderer {
    renderer: Renderer,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        Self::with_styles(site_styles())
    }

    pub fn with_styles(styles: Styles) -> Result<Self> {
        let mut renderer = Renderer::html(styles);
        for (name, source) in templates::ALL {
            renderer.add_template(name, source)?;
        }
        Ok(Self { renderer })
    }

    fn page<T: Serialize>(&self, template: &str, site: &SiteMeta, page: T) -> Result<String> {
        Ok(self
            .renderer
            .render(template, &PageContext { site, page })?)
    }

    pub fn post_list(
        &self,
        site: &SiteMeta,
        view: &FilterView<'_, Post>,
        route: &ListRoute,
    ) -> Result<String> {
        let list = ListPage::from_view(view, route, PostCard::from_post);
        self.page("post_list.html", site, ListContext { list: &list })
    }

    pub fn project_list(
        &self,
        site: &SiteMeta,
        view: &FilterView<'_, Project>,
        route: &ListRoute,
    ) -> Result<String> {
        let list = ListPage::from_view(view, route, ProjectCard::from_project);
        self.page("project_list.html", site, ListContext { list: &list })
    }

    pub fn post(&self, site: &SiteMeta, page: &PostPage) -> Result<String> {
        self.page("post.html", site, PostContext { post: page })
    }

    pub fn home(&self, site: &SiteMeta, home: &HomePage) -> Result<String> {
        self.page("home.html", site, HomeContext { home })
    }

    /// Renders one post card on its own.
    pub fn post_card(&self, card: &PostCard) -> Result<String> {
        Ok(self.renderer.render("post_card.html", &CardContext { card })?)
    }

    /// Renders one project card on its own.
    pub fn project_card(&self, card: &ProjectCard) -> Result<String> {
        Ok(self
            .renderer
            .render("project_card.html", &CardContext { card })?)
    }
}

#[derive(Serialize)]
struct CardContext<'a, T: Serialize> {
    card: &'a T,
}

impl PostPage {
    pub fn new(post: &Post, canonical_url: String, og_image: Option<String>) -> Self {
        Self {
            card: PostCard::from_post(post),
            format: post.format.label(),
            tags: post.tags.clone(),
            updated: post.updated_date.as_ref().map(format_date),
            hero_image: post.hero_image.clone(),
            github_repo: post.github_repo.as_ref().map(|u| u.to_string()),
            canonical_url,
            og_image,
            content_html: markdown_to_html(&post.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use crate::model::fixtures::{post, project};
    use crate::site::{POSTS_ROUTE, PROJECTS_ROUTE};

    fn site() -> SiteMeta {
        SiteMeta::new("Example", "Notes & projects", "Sam")
    }

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new().unwrap()
    }

    #[test]
    fn test_palette_covers_every_category() {
        let styles = site_styles();
        for p in Pillar::ALL {
            assert!(styles.has(&crate::card::badge_style(*p)));
        }
        for s in ProjectStatus::ALL {
            assert!(styles.has(&crate::card::badge_style(*s)));
        }
        assert_eq!(styles.len(), Pillar::ALL.len() + ProjectStatus::ALL.len());
    }

    #[test]
    fn test_post_card_is_one_link_with_badge_colours() {
        let card = PostCard::from_post(&post("hello", Pillar::AgentBuilding));
        let html = renderer().post_card(&card).unwrap();
        assert!(html.starts_with(r#"<a class="card post-card" href="/blog/hello""#));
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(
            r#"<span class="badge-agent-building" style="background-color: rgba(59,130,246,0.15); color: #3b82f6">Agent Building</span>"#
        ));
        assert!(html.contains("1 February 2026"));
    }

    #[test]
    fn test_read_time_and_separator_only_when_present() {
        let mut a = post("a", Pillar::Development);
        a.minutes_read = Some(3);
        let b = post("b", Pillar::Development);

        let with = renderer().post_card(&PostCard::from_post(&a)).unwrap();
        assert!(with.contains("· 3 min read"));

        let without = renderer().post_card(&PostCard::from_post(&b)).unwrap();
        assert!(!without.contains("min read"));
        assert!(!without.contains('·'));
        assert!(!without.contains("read-time"));
    }

    #[test]
    fn test_project_card_is_container_with_links() {
        let mut p = project("folio", ProjectStatus::Active);
        p.blog_post = Some("building-folio".into());
        let html = renderer()
            .project_card(&ProjectCard::from_project(&p))
            .unwrap();
        assert!(html.starts_with(r#"<div class="card project-card""#));
        assert!(html.contains(r#"href="https://github.com/example/folio""#));
        assert!(html.contains(r#"href="/blog/building-folio""#));

        let html = renderer()
            .project_card(&ProjectCard::from_project(&project("x", ProjectStatus::Active)))
            .unwrap();
        assert!(!html.contains("Read write-up"));
    }

    #[test]
    fn test_unstyled_badge_fails_the_render() {
        let renderer = HtmlRenderer::with_styles(Styles::new()).unwrap();
        let card = PostCard::from_post(&post("x", Pillar::SovereignAi));
        assert!(renderer.post_card(&card).is_err());
    }

    #[test]
    fn test_list_page_controls_and_cards() {
        let posts = vec![
            post("a", Pillar::AgentBuilding),
            post("b", Pillar::SovereignAi),
            post("c", Pillar::AgentBuilding),
        ];
        let view = FilterView::new(&posts).selected(Selection::Only(Pillar::AgentBuilding));
        let html = renderer().post_list(&site(), &view, &POSTS_ROUTE).unwrap();

        assert!(html.contains(r#"href="/blog/a""#));
        assert!(html.contains(r#"href="/blog/c""#));
        assert!(!html.contains(r#"href="/blog/b""#));
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
        assert!(html.contains(
            r#"<a href="/blog/pillar/agent-building/" data-filter="agent-building" aria-current="page" data-active="true">Agent Building</a>"#
        ));
        assert!(html.contains(r#"<a href="/blog/" data-filter="all">All</a>"#));
        assert!(!html.contains(NO_POSTS));
        assert!(html.contains("Notes &amp; projects"));
    }

    #[test]
    fn test_empty_selection_shows_placeholder() {
        let projects = vec![project("x", ProjectStatus::Active)];
        let view = FilterView::new(&projects).selected(Selection::Only(ProjectStatus::Learning));
        let html = renderer()
            .project_list(&site(), &view, &PROJECTS_ROUTE)
            .unwrap();
        assert!(html.contains(NO_PROJECTS));
        assert!(!html.contains("project-card"));
        assert!(html.contains(r#"href="/projects/status/learning/""#));
    }

    #[test]
    fn test_post_page_renders_markdown() {
        let mut p = post("x", Pillar::Development);
        p.body = "# Heading\n\nSome *emphasis* & more.\n".into();
        p.tags = vec!["rust".into()];
        let page = PostPage::new(
            &p,
            "https://example.com/blog/x/".into(),
            Some("https://example.com/og/x.png".into()),
        );
        let html = renderer().post(&site(), &page).unwrap();
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("<em>emphasis</em> &amp; more."));
        assert!(html.contains(r#"<meta property="og:image" content="https://example.com/og/x.png">"#));
        assert!(html.contains("#rust"));
        assert!(html.contains("How-to"));
    }

    #[test]
    fn test_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
