use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Post, Project};
use crate::store::ContentStore;

/// Warnings for projects whose `blogPost` names no post, or only a draft.
pub fn writeup_warnings(posts: &[Post], projects: &[Project]) -> Vec<CmdMessage> {
    let mut warnings = Vec::new();
    for project in projects {
        let Some(slug) = project
            .blog_post
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
        else {
            continue;
        };
        match posts.iter().find(|p| p.slug == slug) {
            None => warnings.push(CmdMessage::warning(format!(
                "project `{}` links to missing post `{}`",
                project.slug, slug
            ))),
            Some(post) if post.draft => warnings.push(CmdMessage::warning(format!(
                "project `{}` links to draft post `{}`",
                project.slug, slug
            ))),
            Some(_) => {}
        }
    }
    warnings
}

/// Loads and validates all content. Schema violations fail the command.
pub fn run<S: ContentStore>(store: &S) -> Result<CmdResult> {
    let posts = store.posts()?;
    let projects = store.projects()?;

    let mut result = CmdResult::default();
    for warning in writeup_warnings(&posts, &projects) {
        result.add_message(warning);
    }

    let drafts = posts.iter().filter(|p| p.draft).count();
    result.add_message(CmdMessage::success(format!(
        "{} posts ({} drafts) and {} projects are valid",
        posts.len(),
        drafts,
        projects.len()
    )));
    Ok(result)
}
