//! Post discovery and front matter parsing.
//!
//! Posts live in `_posts/` and follow the Jekyll naming convention
//! `YYYY-MM-DD-slug.md`. Each file may open with a YAML front matter block:
//!
//! ```text
//! ---
//! title: "Some Post"
//! tags: [Python, Machine Learning]
//! ---
//! body...
//! ```
//!
//! Only the fields the generators need are extracted — title, tags, and the
//! date from the filename. Tags may be written as a YAML list or as a single
//! whitespace-separated string; both forms are accepted because both occur
//! in the wild.
//!
//! Front matter lookup returns an explicit `Option` ([`extract_front_matter`])
//! and the caller decides what a missing block means — for a post it means
//! "no tags, filename title", not an error.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Post filename must follow YYYY-MM-DD-slug: {0}")]
    BadName(PathBuf),
    #[error("Malformed front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// One post, reduced to the fields the generators consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// URL slug from the filename (the part after the date prefix).
    pub slug: String,
    /// Front matter title, or the slug with dashes as spaces.
    pub title: String,
    /// Publication date from the filename.
    pub date: NaiveDate,
    /// Tags in front matter order, literal text preserved.
    pub tags: Vec<String>,
}

impl Post {
    /// Publication year, as used in citation entries.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Front matter fields the tool cares about. Everything else in the block
/// (layout, category, custom keys) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Option<String>,
    tags: Option<TagField>,
}

/// Jekyll accepts tags as a list or as one space-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagField {
    List(Vec<String>),
    Line(String),
}

impl TagField {
    fn into_vec(self) -> Vec<String> {
        match self {
            TagField::List(tags) => tags,
            TagField::Line(line) => line.split_whitespace().map(String::from).collect(),
        }
    }
}

/// Split a document into its front matter block and body.
///
/// The block is a leading `---` line, YAML content, and a closing `---`
/// line. Returns `None` when the document doesn't open with a block; the
/// caller decides how to degrade.
pub fn extract_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Split a post file stem into its date prefix and slug.
fn split_date_slug(stem: &str) -> Option<(NaiveDate, &str)> {
    let date_part = stem.get(..10)?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let rest = stem.get(10..)?;
    let slug = rest.strip_prefix('-')?;
    if slug.is_empty() {
        return None;
    }
    Some((date, slug))
}

/// Parse a single post file.
pub fn parse_post(path: &Path) -> Result<Post, PostError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let (date, slug) =
        split_date_slug(&stem).ok_or_else(|| PostError::BadName(path.to_path_buf()))?;

    let content = fs::read_to_string(path)?;
    let front = match extract_front_matter(&content) {
        Some((yaml, _body)) if !yaml.trim().is_empty() => {
            serde_yaml::from_str::<FrontMatter>(yaml).map_err(|source| PostError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => FrontMatter::default(),
    };

    let title = front
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| slug.replace('-', " "));

    Ok(Post {
        slug: slug.to_string(),
        title,
        date,
        tags: front.tags.map(TagField::into_vec).unwrap_or_default(),
    })
}

/// Scan the posts directory, sorted by filename (i.e. by date).
///
/// A missing directory yields no posts. Hidden files and non-markdown
/// extensions are skipped; a markdown file that doesn't follow the naming
/// convention is a fatal error.
pub fn scan_posts(posts_dir: &Path) -> Result<Vec<Post>, PostError> {
    let entries = match fs::read_dir(posts_dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && !p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
                && p.extension()
                    .map(|e| {
                        e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown")
                    })
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    paths.iter().map(|p| parse_post(p)).collect()
}
