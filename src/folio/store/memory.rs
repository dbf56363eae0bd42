use super::{ensure_unique_slugs, ContentStore};
use crate::error::Result;
use crate::model::{Post, Project};

/// A store over entities built in code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    posts: Vec<Post>,
    projects: Vec<Project>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_posts(mut self, posts: impl IntoIterator<Item = Post>) -> Self {
        self.posts.extend(posts);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.projects.extend(projects);
        self
    }
}

impl ContentStore for InMemoryStore {
    fn posts(&self) -> Result<Vec<Post>> {
        ensure_unique_slugs("post", &self.posts)?;
        Ok(self.posts.clone())
    }

    fn projects(&self) -> Result<Vec<Project>> {
        ensure_unique_slugs("project", &self.projects)?;
        Ok(self.projects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{post, project};
    use crate::model::{Pillar, ProjectStatus};

    #[test]
    fn test_returns_entities_in_insertion_order() {
        let store = InMemoryStore::new()
            .with_post(post("b", Pillar::Development))
            .with_post(post("a", Pillar::Development))
            .with_project(project("p", ProjectStatus::Active));
        let slugs: Vec<_> = store
            .posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["b", "a"]);
        assert_eq!(store.projects().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_project_slug_is_rejected() {
        let store = InMemoryStore::new().with_projects(vec![
            project("x", ProjectStatus::Active),
            project("x", ProjectStatus::Learning),
        ]);
        assert!(store.projects().is_err());
    }
}
