//! Content catalogue: blog posts, project case studies, and static pages.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── assets/                          # copied verbatim to dist/assets/
//! ├── pages/
//! │   ├── home.md                      # one file per static route
//! │   ├── about.md
//! │   ├── services.md
//! │   └── contact.md
//! ├── blog/
//! │   ├── 010-ai-native-erp-sap-2026.md
//! │   └── 020-sap-btp-strategic-insights.md
//! └── projects/
//!     ├── 010-investment-services-automation.toml
//!     └── 020-jira-testing-automation.toml
//! ```
//!
//! Markdown files carry TOML front matter between `+++` lines. Project files
//! are plain TOML. File names follow the `NNN-slug` convention
//! ([`crate::naming`]): the number orders listings, the rest is the URL key.
//!
//! The catalogue is read once and treated as a read-only lookup table:
//! fetch by key, list all, filter by category and search text.

use crate::naming::{self, parse_entry_name};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("TOML error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Missing +++ front matter: {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Field '{field}' must not be empty in {path}")]
    EmptyField { path: PathBuf, field: &'static str },
    #[error("Invalid date '{value}' in {path} (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },
    #[error("File name does not yield a URL-safe key: {0}")]
    InvalidSlug(PathBuf),
    #[error("Duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },
    #[error("Required page is missing: {0}")]
    MissingPage(PathBuf),
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub slug: String,
    #[serde(skip)]
    pub position: Option<u32>,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub body: String,
    pub image_url: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub author: String,
    pub category: String,
    /// Search title; defaults to `title`.
    pub meta_title: String,
    /// Search description; defaults to `excerpt`.
    pub meta_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    #[serde(skip)]
    pub position: Option<u32>,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub overview: String,
    pub challenge: String,
    pub solution: String,
    pub key_results: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PostFrontMatter {
    title: String,
    excerpt: String,
    image_url: String,
    date: String,
    author: String,
    category: String,
    meta_title: Option<String>,
    meta_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    title: String,
    category: String,
    description: String,
    image_url: String,
    overview: String,
    challenge: String,
    solution: String,
    #[serde(default)]
    key_results: Vec<String>,
    #[serde(default)]
    technologies: Vec<String>,
}

// ============================================================================
// Catalogue
// ============================================================================

/// Project listing filter.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Exact category; `None` matches every project.
    pub category: Option<String>,
    /// Case-insensitive substring matched against title or description.
    /// Used as typed; surrounding spaces are part of the needle.
    pub search: String,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| project.category == c);
        let needle = self.search.to_lowercase();
        let search_ok = needle.is_empty()
            || project.title.to_lowercase().contains(&needle)
            || project.description.to_lowercase().contains(&needle);
        category_ok && search_ok
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    posts: Vec<BlogPost>,
    projects: Vec<Project>,
}

impl Catalogue {
    /// Build a catalogue, ordering entries and rejecting duplicate keys.
    pub fn new(mut posts: Vec<BlogPost>, mut projects: Vec<Project>) -> Result<Self, ContentError> {
        check_unique("post", posts.iter().map(|p| p.slug.as_str()))?;
        check_unique("project", projects.iter().map(|p| p.id.as_str()))?;
        posts.sort_by_key(|p| naming::order_key(p.position, &p.slug));
        projects.sort_by_key(|p| naming::order_key(p.position, &p.id));
        Ok(Self { posts, projects })
    }

    /// Load `blog/*.md` and `projects/*.toml` under the content root.
    /// Missing directories yield empty collections.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let posts = files_with_extension(&root.join("blog"), "md")?
            .iter()
            .map(|path| load_post(path))
            .collect::<Result<Vec<_>, _>>()?;
        let projects = files_with_extension(&root.join("projects"), "toml")?
            .iter()
            .map(|path| load_project(path))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(posts, projects)
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Distinct project categories in listing order.
    pub fn project_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn filter_projects(&self, filter: &ProjectFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }
}

fn check_unique<'a>(
    kind: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ContentError::DuplicateKey {
                kind,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Direct children of `dir` with the given extension, sorted by path.
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Split `+++`-delimited TOML front matter from a markdown body.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start_matches('\u{feff}').strip_prefix("+++")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let end = rest.find("\n+++")?;
    let front = &rest[..end];
    let after = &rest[end + 4..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);
    Some((front, body))
}

fn key_from_path(path: &Path) -> Result<(Option<u32>, String), ContentError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ContentError::InvalidSlug(path.to_path_buf()))?;
    let parsed = parse_entry_name(stem);
    if !naming::is_url_safe(&parsed.slug) {
        return Err(ContentError::InvalidSlug(path.to_path_buf()));
    }
    Ok((parsed.position, parsed.slug))
}

fn require(path: &Path, field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        Err(ContentError::EmptyField {
            path: path.to_path_buf(),
            field,
        })
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_toml<T: for<'de> Deserialize<'de>>(path: &Path, text: &str) -> Result<T, ContentError> {
    toml::from_str(text).map_err(|source| ContentError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn load_post(path: &Path) -> Result<BlogPost, ContentError> {
    let (position, slug) = key_from_path(path)?;
    let text = fs::read_to_string(path)?;
    let (front, body) =
        split_front_matter(&text).ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let fm: PostFrontMatter = parse_toml(path, front)?;

    require(path, "title", &fm.title)?;
    require(path, "excerpt", &fm.excerpt)?;
    require(path, "image_url", &fm.image_url)?;
    require(path, "author", &fm.author)?;
    if parse_iso_date(&fm.date).is_none() {
        return Err(ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: fm.date,
        });
    }

    Ok(BlogPost {
        slug,
        position,
        meta_title: non_blank(fm.meta_title).unwrap_or_else(|| fm.title.clone()),
        meta_description: non_blank(fm.meta_description).unwrap_or_else(|| fm.excerpt.clone()),
        title: fm.title,
        excerpt: fm.excerpt,
        body: body.to_string(),
        image_url: fm.image_url,
        date: fm.date,
        author: fm.author,
        category: fm.category,
    })
}

fn load_project(path: &Path) -> Result<Project, ContentError> {
    let (position, id) = key_from_path(path)?;
    let text = fs::read_to_string(path)?;
    let file: ProjectFile = parse_toml(path, &text)?;

    require(path, "title", &file.title)?;
    require(path, "category", &file.category)?;
    require(path, "description", &file.description)?;
    require(path, "image_url", &file.image_url)?;

    Ok(Project {
        id,
        position,
        title: file.title,
        category: file.category,
        description: file.description,
        image_url: file.image_url,
        overview: file.overview,
        challenge: file.challenge,
        solution: file.solution,
        key_results: file.key_results,
        technologies: file.technologies,
    })
}

// ============================================================================
// Dates
// ============================================================================

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse `YYYY-MM-DD` into `(year, month, day)`.
pub fn parse_iso_date(date: &str) -> Option<(u32, u32, u32)> {
    let mut parts = date.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    let (y, m, d) = (y.parse().ok()?, m.parse().ok()?, d.parse().ok()?);
    let days_in_month = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if y % 4 == 0 && (y % 100 != 0 || y % 400 == 0) => 29,
        2 => 28,
        _ => return None,
    };
    (1..=days_in_month).contains(&d).then_some((y, m, d))
}

/// Human-readable date: `2025-02-12` → `February 12, 2025`.
pub fn display_date(date: &str) -> Option<String> {
    let (y, m, d) = parse_iso_date(date)?;
    Some(format!("{} {}, {}", MONTHS[(m - 1) as usize], d, y))
}

// ============================================================================
// Static pages
// ============================================================================

/// Static routes backed by `pages/<name>.md`.
pub const STATIC_PAGE_NAMES: [&str; 4] = ["home", "about", "services", "contact"];

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageFrontMatter {
    title: String,
    description: String,
    heading: String,
    lead: Option<String>,
    #[serde(default)]
    faq: Vec<Faq>,
}

/// A `## ` delimited chunk of a page body.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: Option<String>,
    /// Markdown content below the heading.
    pub markdown: String,
}

#[derive(Debug, Clone)]
pub struct StaticPage {
    pub name: String,
    pub title: String,
    pub description: String,
    pub heading: String,
    pub lead: Option<String>,
    pub sections: Vec<Section>,
    pub faq: Vec<Faq>,
}

/// Split a markdown body on level-two headings.
///
/// Text before the first `## ` becomes an untitled section. Empty sections
/// are dropped.
pub fn split_sections(body: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut heading: Option<String> = None;
    let mut buf = String::new();

    let mut flush = |heading: Option<String>, buf: &mut String| {
        if heading.is_some() || !buf.trim().is_empty() {
            sections.push(Section {
                heading,
                markdown: buf.trim().to_string(),
            });
        }
        buf.clear();
    };

    for line in body.lines() {
        if let Some(title) = line.strip_prefix("## ") {
            flush(heading.take(), &mut buf);
            heading = Some(title.trim().to_string());
        } else {
            buf.push_str(line);
            buf.push('\n');
        }
    }
    flush(heading, &mut buf);
    sections
}

#[derive(Debug, Clone)]
pub struct StaticPages {
    pages: Vec<StaticPage>,
}

impl StaticPages {
    /// Load every page in [`STATIC_PAGE_NAMES`]; each is required.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let pages = STATIC_PAGE_NAMES
            .iter()
            .map(|name| load_static_page(&root.join("pages").join(format!("{name}.md")), name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pages })
    }

    pub fn get(&self, name: &str) -> Option<&StaticPage> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticPage> {
        self.pages.iter()
    }

    #[cfg(test)]
    pub(crate) fn without(mut self, name: &str) -> Self {
        self.pages.retain(|p| p.name != name);
        self
    }
}

fn load_static_page(path: &Path, name: &str) -> Result<StaticPage, ContentError> {
    if !path.is_file() {
        return Err(ContentError::MissingPage(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let (front, body) =
        split_front_matter(&text).ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let fm: PageFrontMatter = parse_toml(path, front)?;
    require(path, "title", &fm.title)?;
    require(path, "description", &fm.description)?;

    Ok(StaticPage {
        name: name.to_string(),
        title: fm.title,
        description: fm.description,
        heading: fm.heading,
        lead: fm.lead,
        sections: split_sections(body),
        faq: fm.faq,
    })
}
