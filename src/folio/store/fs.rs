use super::{ensure_unique_slugs, split_frontmatter, ContentStore};
use crate::error::{FolioError, Result};
use crate::model::{Post, Project};
use crate::reading_time::DEFAULT_WORDS_PER_MINUTE;
use crate::schema::{validate_post, validate_project, Frontmatter};
use std::fs;
use std::path::{Path, PathBuf};

const BLOG_DIR: &str = "blog";
const PROJECTS_DIR: &str = "projects";
const EXTENSIONS: &[&str] = &["md", "markdown"];

/// One document read from disk, before validation.
struct RawDocument {
    slug: String,
    path: PathBuf,
    source: String,
}

pub struct FileStore {
    content_dir: PathBuf,
    words_per_minute: u32,
}

impl FileStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn read_collection(&self, name: &str) -> Result<Vec<RawDocument>> {
        let dir = self.content_dir.join(name);
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "content collection not found, treating as empty");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_document = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| EXTENSIONS.contains(&e));
            if is_document {
                paths.push(path);
            }
        }
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let slug = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => {
                    return Err(FolioError::Document {
                        path,
                        message: "file name is not valid UTF-8".to_string(),
                    })
                }
            };
            let source = fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), %slug, "read document");
            docs.push(RawDocument { slug, path, source });
        }
        Ok(docs)
    }
}

fn parse_document(doc: &RawDocument) -> Result<(Frontmatter, &str)> {
    let (yaml, body) = split_frontmatter(&doc.source).ok_or_else(|| FolioError::Document {
        path: doc.path.clone(),
        message: "missing `---` frontmatter block".to_string(),
    })?;
    let fm = Frontmatter::from_yaml(yaml).map_err(|e| FolioError::Document {
        path: doc.path.clone(),
        message: e.to_string(),
    })?;
    Ok((fm, body))
}

impl ContentStore for FileStore {
    fn posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for doc in self.read_collection(BLOG_DIR)? {
            let (fm, body) = parse_document(&doc)?;
            let post = validate_post(&doc.slug, &fm, body, self.words_per_minute).map_err(
                |source| FolioError::Schema {
                    path: doc.path.clone(),
                    source,
                },
            )?;
            posts.push(post);
        }
        ensure_unique_slugs("post", &posts)?;
        tracing::debug!(count = posts.len(), "loaded posts");
        Ok(posts)
    }

    fn projects(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        for doc in self.read_collection(PROJECTS_DIR)? {
            let (fm, body) = parse_document(&doc)?;
            let project =
                validate_project(&doc.slug, &fm, body).map_err(|source| FolioError::Schema {
                    path: doc.path.clone(),
                    source,
                })?;
            projects.push(project);
        }
        ensure_unique_slugs("project", &projects)?;
        tracing::debug!(count = projects.len(), "loaded projects");
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pillar, ProjectStatus};
    use tempfile::TempDir;

    const POST: &str = "---\ntitle: Hello\ndescription: First post.\npubDate: 2026-02-01\npillar: development\nformat: opinion\ntags: []\n---\nSome words here.\n";

    const PROJECT: &str = "---\ntitle: Folio\ndescription: This site.\ngithubUrl: https://github.com/example/folio\ntechStack: [Rust]\nstatus: active\nunknownKey: dropped\n---\n";

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(BLOG_DIR)).unwrap();
        fs::create_dir_all(dir.path().join(PROJECTS_DIR)).unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        fs::write(dir.path().join(rel), content).unwrap();
    }

    #[test]
    fn test_loads_posts_in_name_order_with_slug_from_stem() {
        let (dir, store) = setup();
        write(&dir, "blog/b-second.md", POST);
        write(&dir, "blog/a-first.md", POST);
        write(&dir, "blog/notes.txt", "ignored");

        let posts = store.posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-first", "b-second"]);
        assert_eq!(posts[0].pillar, Pillar::Development);
        assert_eq!(posts[0].body, "Some words here.\n");
        assert_eq!(posts[0].minutes_read, Some(1));
    }

    #[test]
    fn test_blank_body_has_no_read_time() {
        let (dir, store) = setup();
        write(&dir, "blog/empty.md", POST.replace("Some words here.\n", "\n").as_str());
        assert_eq!(store.posts().unwrap()[0].minutes_read, None);
    }

    #[test]
    fn test_words_per_minute_is_configurable() {
        let (dir, store) = setup();
        let store = store.with_words_per_minute(1);
        write(&dir, "blog/p.md", POST);
        assert_eq!(store.posts().unwrap()[0].minutes_read, Some(3));
    }

    #[test]
    fn test_loads_projects() {
        let (dir, store) = setup();
        write(&dir, "projects/folio.md", PROJECT);
        let projects = store.projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].slug, "folio");
        assert_eq!(projects[0].status, ProjectStatus::Active);
        assert!(!projects[0].featured);
        assert_eq!(projects[0].sort_order, 0.0);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.posts().unwrap().is_empty());
        assert!(store.projects().unwrap().is_empty());
    }

    #[test]
    fn test_schema_error_names_file_and_field() {
        let (dir, store) = setup();
        write(&dir, "blog/ok.md", POST);
        write(
            &dir,
            "blog/bad.md",
            &POST.replace("pillar: development", "pillar: random-topic"),
        );
        let err = store.posts().unwrap_err();
        match &err {
            FolioError::Schema { path, source } => {
                assert!(path.ends_with("blog/bad.md"));
                assert_eq!(source.field, "pillar");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("random-topic"));
    }

    #[test]
    fn test_missing_frontmatter_is_a_document_error() {
        let (dir, store) = setup();
        write(&dir, "blog/plain.md", "# Just markdown\n");
        let err = store.posts().unwrap_err();
        assert!(matches!(err, FolioError::Document { .. }));
        assert!(err.to_string().contains("frontmatter"));
    }

    #[test]
    fn test_malformed_yaml_is_a_document_error() {
        let (dir, store) = setup();
        write(&dir, "blog/broken.md", "---\ntitle: [unclosed\n---\n");
        assert!(matches!(
            store.posts().unwrap_err(),
            FolioError::Document { .. }
        ));
    }

    #[test]
    fn test_duplicate_slug_across_extensions() {
        let (dir, store) = setup();
        write(&dir, "blog/same.md", POST);
        write(&dir, "blog/same.markdown", POST);
        let err = store.posts().unwrap_err();
        assert!(err.to_string().contains("duplicate post slug `same`"));
    }
}
