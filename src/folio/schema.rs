//! # Frontmatter Schemas
//!
//! Every document starts with a YAML frontmatter block. This module turns that block into a
//! [`Post`] or [`Project`], or rejects it with a [`SchemaError`] naming the offending field.
//!
//! Validation is flat and field-by-field: required fields must be present with the right
//! type, enum fields must name a known variant, optional fields may be absent (an explicit
//! YAML `null` counts as absent) and a handful of fields carry defaults. Keys the schema does
//! not know are dropped.
//!
//! | Post field    | Type                          | Default |
//! |---------------|-------------------------------|---------|
//! | `title`       | non-empty string              |         |
//! | `description` | string                        |         |
//! | `pubDate`     | date                          |         |
//! | `updatedDate` | date, optional                |         |
//! | `pillar`      | [`Pillar`] id                 |         |
//! | `format`      | [`Format`] id                 |         |
//! | `tags`        | list of strings               |         |
//! | `draft`       | bool                          | `false` |
//! | `heroImage`   | string, optional              |         |
//! | `githubRepo`  | absolute URL, optional        |         |
//!
//! | Project field | Type                          | Default |
//! |---------------|-------------------------------|---------|
//! | `title`       | non-empty string              |         |
//! | `description` | string                        |         |
//! | `githubUrl`   | absolute URL                  |         |
//! | `blogPost`    | post slug, optional           |         |
//! | `techStack`   | list of strings               |         |
//! | `status`      | [`ProjectStatus`] id          |         |
//! | `featured`    | bool                          | `false` |
//! | `sortOrder`   | number                        | `0`     |
//!
//! Dates accept RFC 3339 (`2026-02-25T09:30:00Z`), a naive timestamp with a `T` or a space
//! (`2026-02-25 09:30:00`, read as UTC) or a bare date (`2026-02-25`, midnight UTC).

use crate::error::{FolioError, Result, SchemaError};
use crate::model::{Category, Format, Pillar, Post, Project, ProjectStatus};
use crate::reading_time::reading_time;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::{Mapping, Value};
use url::Url;

type FieldResult<T> = std::result::Result<T, SchemaError>;

const POST_FIELDS: &[&str] = &[
    "title",
    "description",
    "pubDate",
    "updatedDate",
    "pillar",
    "format",
    "tags",
    "draft",
    "heroImage",
    "githubRepo",
];

const PROJECT_FIELDS: &[&str] = &[
    "title",
    "description",
    "githubUrl",
    "blogPost",
    "techStack",
    "status",
    "featured",
    "sortOrder",
];

/// The parsed YAML mapping of one document.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    map: Mapping,
}

impl Frontmatter {
    pub fn from_yaml(source: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(source)? {
            Value::Null => Ok(Self::default()),
            Value::Mapping(map) => Ok(Self { map }),
            _ => Err(FolioError::Content(
                "frontmatter must be a mapping of fields".to_string(),
            )),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Keys present in the document that `known` does not list.
    pub fn unknown_keys(&self, known: &[&str]) -> Vec<String> {
        self.map
            .keys()
            .filter_map(|k| k.as_str())
            .filter(|k| !known.contains(k))
            .map(str::to_string)
            .collect()
    }

    fn string(&self, key: &str) -> FieldResult<String> {
        self.optional_string(key)?
            .ok_or_else(|| SchemaError::missing(key))
    }

    fn non_empty_string(&self, key: &str) -> FieldResult<String> {
        let value = self.string(key)?;
        if value.trim().is_empty() {
            return Err(SchemaError::new(key, "must not be empty"));
        }
        Ok(value)
    }

    fn optional_string(&self, key: &str) -> FieldResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(type_error(key, "a string", other)),
        }
    }

    fn date(&self, key: &str) -> FieldResult<DateTime<Utc>> {
        self.optional_date(key)?
            .ok_or_else(|| SchemaError::missing(key))
    }

    fn optional_date(&self, key: &str) -> FieldResult<Option<DateTime<Utc>>> {
        match self.optional_string(key)? {
            None => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| SchemaError::new(key, format!("`{}` is not a valid date", raw))),
        }
    }

    fn one_of<T>(
        &self,
        key: &str,
        allowed: &[&str],
        lookup: impl Fn(&str) -> Option<T>,
    ) -> FieldResult<T> {
        let raw = self.string(key)?;
        lookup(&raw).ok_or_else(|| {
            SchemaError::new(
                key,
                format!("`{}` is not one of: {}", raw, allowed.join(", ")),
            )
        })
    }

    fn string_list(&self, key: &str) -> FieldResult<Vec<String>> {
        match self.get(key) {
            None => Err(SchemaError::missing(key)),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(type_error(&format!("{}[{}]", key, i), "a string", other)),
                })
                .collect(),
            Some(other) => Err(type_error(key, "a list of strings", other)),
        }
    }

    fn bool_or(&self, key: &str, default: bool) -> FieldResult<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(type_error(key, "true or false", other)),
        }
    }

    fn number_or(&self, key: &str, default: f64) -> FieldResult<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SchemaError::new(key, format!("`{}` is not a finite number", n))),
            Some(other) => Err(type_error(key, "a number", other)),
        }
    }

    fn url(&self, key: &str) -> FieldResult<Url> {
        self.optional_url(key)?
            .ok_or_else(|| SchemaError::missing(key))
    }

    fn optional_url(&self, key: &str) -> FieldResult<Option<Url>> {
        match self.optional_string(key)? {
            None => Ok(None),
            Some(raw) => Url::parse(&raw)
                .map(Some)
                .map_err(|e| SchemaError::new(key, format!("`{}` is not a valid URL ({})", raw, e))),
        }
    }
}

fn type_error(key: &str, expected: &str, found: &Value) -> SchemaError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    };
    SchemaError::new(key, format!("expected {}, found {}", expected, found))
}

/// Coerces a frontmatter date string to a UTC timestamp.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Validates a blog post. `words_per_minute` feeds the read-time estimate.
pub fn validate_post(
    slug: &str,
    fm: &Frontmatter,
    body: &str,
    words_per_minute: u32,
) -> FieldResult<Post> {
    let ignored = fm.unknown_keys(POST_FIELDS);
    if !ignored.is_empty() {
        tracing::debug!(slug, ?ignored, "dropping unknown post fields");
    }

    let minutes_read = if body.trim().is_empty() {
        None
    } else {
        Some(reading_time(body, words_per_minute))
    };

    Ok(Post {
        slug: slug.to_string(),
        title: fm.non_empty_string("title")?,
        description: fm.string("description")?,
        pub_date: fm.date("pubDate")?,
        updated_date: fm.optional_date("updatedDate")?,
        pillar: fm.one_of("pillar", &Pillar::ids(), Pillar::from_id)?,
        format: fm.one_of(
            "format",
            &Format::ALL.iter().map(|f| f.id()).collect::<Vec<_>>(),
            Format::from_id,
        )?,
        tags: fm.string_list("tags")?,
        draft: fm.bool_or("draft", false)?,
        hero_image: fm.optional_string("heroImage")?,
        github_repo: fm.optional_url("githubRepo")?,
        minutes_read,
        body: body.to_string(),
    })
}

/// Validates a portfolio project.
pub fn validate_project(slug: &str, fm: &Frontmatter, body: &str) -> FieldResult<Project> {
    let ignored = fm.unknown_keys(PROJECT_FIELDS);
    if !ignored.is_empty() {
        tracing::debug!(slug, ?ignored, "dropping unknown project fields");
    }

    Ok(Project {
        slug: slug.to_string(),
        title: fm.non_empty_string("title")?,
        description: fm.string("description")?,
        github_url: fm.url("githubUrl")?,
        blog_post: fm.optional_string("blogPost")?,
        tech_stack: fm.string_list("techStack")?,
        status: fm.one_of("status", &ProjectStatus::ids(), ProjectStatus::from_id)?,
        featured: fm.bool_or("featured", false)?,
        sort_order: fm.number_or("sortOrder", 0.0)?,
        body: body.to_string(),
    })
}
