use crate::card::{PostCard, ProjectCard};
use crate::commands::{CmdResult, ControlState, Listing};
use crate::error::Result;
use crate::filter::{FilterView, Selection};
use crate::model::{by_sort_order, newest_first, Pillar, ProjectStatus};
use crate::site::render::{NO_POSTS, NO_PROJECTS};
use crate::store::ContentStore;

/// Lists posts newest first, narrowed to `selection`. Drafts only when asked for.
pub fn posts<S: ContentStore>(
    store: &S,
    selection: Selection<Pillar>,
    include_drafts: bool,
) -> Result<CmdResult> {
    let mut posts: Vec<_> = store
        .posts()?
        .into_iter()
        .filter(|p| include_drafts || !p.draft)
        .collect();
    newest_first(&mut posts);

    let view = FilterView::new(&posts).selected(selection);
    let listing = Listing {
        selection: selection.id(),
        controls: view.controls().into_iter().map(ControlState::from).collect(),
        posts: view
            .visible_entities()
            .into_iter()
            .map(PostCard::from_post)
            .collect(),
        projects: Vec::new(),
        placeholder: view.is_empty().then_some(NO_POSTS),
    };
    Ok(CmdResult::default().with_listing(listing))
}

/// Lists projects by sort order, narrowed to `selection`.
pub fn projects<S: ContentStore>(store: &S, selection: Selection<ProjectStatus>) -> Result<CmdResult> {
    let mut projects = store.projects()?;
    by_sort_order(&mut projects);

    let view = FilterView::new(&projects).selected(selection);
    let listing = Listing {
        selection: selection.id(),
        controls: view.controls().into_iter().map(ControlState::from).collect(),
        posts: Vec::new(),
        projects: view
            .visible_entities()
            .into_iter()
            .map(ProjectCard::from_project)
            .collect(),
        placeholder: view.is_empty().then_some(NO_PROJECTS),
    };
    Ok(CmdResult::default().with_listing(listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{post_on, project};
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        let mut draft = post_on("draft", Pillar::AgentBuilding, 2026, 5, 1);
        draft.draft = true;
        InMemoryStore::new()
            .with_posts(vec![
                post_on("a", Pillar::AgentBuilding, 2026, 1, 1),
                post_on("b", Pillar::SovereignAi, 2026, 2, 1),
                post_on("c", Pillar::AgentBuilding, 2026, 3, 1),
                draft,
            ])
            .with_projects(vec![
                project("x", ProjectStatus::Complete),
                project("y", ProjectStatus::Active),
            ])
    }

    fn slugs(result: &CmdResult) -> Vec<String> {
        let listing = result.listing.as_ref().unwrap();
        listing
            .posts
            .iter()
            .map(|c| c.slug.clone())
            .chain(listing.projects.iter().map(|c| c.slug.clone()))
            .collect()
    }

    #[test]
    fn test_lists_all_posts_newest_first_without_drafts() {
        let result = posts(&store(), Selection::All, false).unwrap();
        assert_eq!(slugs(&result), vec!["c", "b", "a"]);
        let listing = result.listing.unwrap();
        assert_eq!(listing.selection, "all");
        assert_eq!(listing.placeholder, None);
    }

    #[test]
    fn test_filters_by_pillar() {
        let result = posts(&store(), Selection::Only(Pillar::AgentBuilding), false).unwrap();
        assert_eq!(slugs(&result), vec!["c", "a"]);
        let active: Vec<_> = result
            .listing
            .unwrap()
            .controls
            .into_iter()
            .filter(|c| c.active)
            .map(|c| c.id)
            .collect();
        assert_eq!(active, vec!["agent-building"]);
    }

    #[test]
    fn test_drafts_on_request() {
        let result = posts(&store(), Selection::Only(Pillar::AgentBuilding), true).unwrap();
        assert_eq!(slugs(&result), vec!["draft", "c", "a"]);
    }

    #[test]
    fn test_empty_selection_has_placeholder() {
        let result = posts(&store(), Selection::Only(Pillar::Development), false).unwrap();
        let listing = result.listing.unwrap();
        assert!(listing.posts.is_empty());
        assert_eq!(listing.placeholder, Some(NO_POSTS));
    }

    #[test]
    fn test_lists_projects_by_status() {
        let result = projects(&store(), Selection::Only(ProjectStatus::Active)).unwrap();
        assert_eq!(slugs(&result), vec!["y"]);
        let result = projects(&store(), Selection::Only(ProjectStatus::Learning)).unwrap();
        assert_eq!(result.listing.unwrap().placeholder, Some(NO_PROJECTS));
    }
}
