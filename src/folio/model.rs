use chrono::{DateTime, Utc};
use std::fmt::Debug;
use url::Url;

/// An sRGB colour with 8-bit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn rgb_triplet(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(r,g,b,0.15)` otherwise.
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.2})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

// 0.15 opacity, the tint used behind every badge label
const TINT: u8 = 38;

/// The colour pair of a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub background: Color,
    pub text: Color,
}

impl BadgeStyle {
    const fn tinted(text: Color) -> Self {
        Self {
            background: text.with_alpha(TINT),
            text,
        }
    }
}

/// A closed classification used for filtering and badge styling.
///
/// `ALL` is the declared display order of the filter controls. It is hand-authored and
/// independent of any content, so categories with no entries stay selectable.
pub trait Category: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Stable identifier used in frontmatter, URLs and selection values.
    fn id(self) -> &'static str;

    fn label(self) -> &'static str;

    fn badge(self) -> BadgeStyle;

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    fn ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.id()).collect()
    }
}

/// A content item that carries exactly one category.
pub trait Entity {
    type Category: Category;

    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn category(&self) -> Self::Category;
}

/// Editorial pillar of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pillar {
    AgentBuilding,
    EngineeringLeadership,
    SovereignAi,
    Development,
}

impl Category for Pillar {
    const ALL: &'static [Self] = &[
        Pillar::AgentBuilding,
        Pillar::EngineeringLeadership,
        Pillar::SovereignAi,
        Pillar::Development,
    ];

    fn id(self) -> &'static str {
        match self {
            Pillar::AgentBuilding => "agent-building",
            Pillar::EngineeringLeadership => "engineering-leadership",
            Pillar::SovereignAi => "sovereign-ai",
            Pillar::Development => "development",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Pillar::AgentBuilding => "Agent Building",
            Pillar::EngineeringLeadership => "Engineering Leadership",
            Pillar::SovereignAi => "Sovereign AI",
            Pillar::Development => "Development",
        }
    }

    fn badge(self) -> BadgeStyle {
        match self {
            Pillar::AgentBuilding => BadgeStyle::tinted(Color::rgb(59, 130, 246)),
            Pillar::EngineeringLeadership => BadgeStyle::tinted(Color::rgb(34, 197, 94)),
            Pillar::SovereignAi => BadgeStyle::tinted(Color::rgb(168, 85, 247)),
            Pillar::Development => BadgeStyle::tinted(Color::rgb(249, 115, 22)),
        }
    }
}

/// Lifecycle status of a portfolio project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Active,
    Complete,
    Learning,
}

impl Category for ProjectStatus {
    const ALL: &'static [Self] = &[
        ProjectStatus::Active,
        ProjectStatus::Complete,
        ProjectStatus::Learning,
    ];

    fn id(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Complete => "complete",
            ProjectStatus::Learning => "learning",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Complete => "Complete",
            ProjectStatus::Learning => "Learning",
        }
    }

    fn badge(self) -> BadgeStyle {
        match self {
            ProjectStatus::Active => BadgeStyle::tinted(Color::rgb(34, 197, 94)),
            ProjectStatus::Complete => BadgeStyle::tinted(Color::rgb(59, 130, 246)),
            ProjectStatus::Learning => BadgeStyle::tinted(Color::rgb(245, 158, 11)),
        }
    }
}

/// Post format. Validated, shown on the post page, not used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    HowTo,
    Opinion,
    Architecture,
    ProjectWriteup,
}

impl Format {
    pub const ALL: &'static [Format] = &[
        Format::HowTo,
        Format::Opinion,
        Format::Architecture,
        Format::ProjectWriteup,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Format::HowTo => "how-to",
            Format::Opinion => "opinion",
            Format::Architecture => "architecture",
            Format::ProjectWriteup => "project-writeup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::HowTo => "How-to",
            Format::Opinion => "Opinion",
            Format::Architecture => "Architecture",
            Format::ProjectWriteup => "Project write-up",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub pillar: Pillar,
    pub format: Format,
    pub tags: Vec<String>,
    pub draft: bool,
    pub hero_image: Option<String>,
    pub github_repo: Option<Url>,
    // None when the post has no body to measure
    pub minutes_read: Option<u32>,
    pub body: String,
}

impl Entity for Post {
    type Category = Pillar;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Pillar {
        self.pillar
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub github_url: Url,
    /// Slug of the post that writes this project up.
    pub blog_post: Option<String>,
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub sort_order: f64,
    pub body: String,
}

impl Entity for Project {
    type Category = ProjectStatus;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> ProjectStatus {
        self.status
    }
}

/// Orders posts for listing: newest publication first, ties keep their input order.
pub fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}

/// Orders projects for listing: ascending `sort_order`, then title.
pub fn by_sort_order(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        a.sort_order
            .total_cmp(&b.sort_order)
            .then_with(|| a.title.cmp(&b.title))
    });
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn post(slug: &str, pillar: Pillar) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("Post {}", slug),
            description: format!("About {}.", slug),
            pub_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            updated_date: None,
            pillar,
            format: Format::HowTo,
            tags: vec![],
            draft: false,
            hero_image: None,
            github_repo: None,
            minutes_read: None,
            body: String::new(),
        }
    }

    pub fn post_on(slug: &str, pillar: Pillar, y: i32, m: u32, d: u32) -> Post {
        Post {
            pub_date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            ..post(slug, pillar)
        }
    }

    pub fn project(slug: &str, status: ProjectStatus) -> Project {
        Project {
            slug: slug.to_string(),
            title: format!("Project {}", slug),
            description: format!("Builds {}.", slug),
            github_url: Url::parse(&format!("https://github.com/example/{}", slug)).unwrap(),
            blog_post: None,
            tech_stack: vec!["Rust".to_string()],
            status,
            featured: false,
            sort_order: 0.0,
            body: String::new(),
        }
    }
}
