//! Tag stub page synthesizer.
//!
//! A tag page like `/tags/machine-learning.html` is nothing but front
//! matter: a layout reference and the tag text. The layout does the actual
//! listing at render time. This generator makes sure one stub exists for
//! every tag used across posts, and never touches a stub that is already
//! there.
//!
//! The existence check is by file name, not content, which makes the
//! generator idempotent: a second run over the same posts writes nothing.
//! The flip side is that a stub left behind by a tag that later changed
//! casing is not cleaned up — only new names are acted on.
//!
//! Within a single run, tags are normalized before synthesis: `"Python"`
//! and `"python"` collide on the same slug, so only one stub is written,
//! carrying the first-seen casing.

use crate::context::BuildContext;
use crate::posts::Post;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Derive the URL-safe slug of a tag: lowercased, spaces as hyphens.
///
/// `"Machine Learning"` and `"machine learning"` both yield
/// `"machine-learning"`.
pub fn slug(tag: &str) -> String {
    tag.to_lowercase().replace(' ', "-")
}

/// File name of a tag's stub page.
pub fn stub_filename(tag: &str) -> String {
    format!("{}.html", slug(tag))
}

/// Render the stub page for a tag.
///
/// The interpolated value is the literal tag text, not the slug — the
/// layout displays it as written.
pub fn stub_page(tag: &str, layout: &str) -> String {
    format!("---\nlayout: {layout}\ntag: {tag}\n---")
}

/// Counters for one synthesis pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagStats {
    /// Stub pages written this run.
    pub written: u32,
    /// Tags whose stub already existed on disk.
    pub existing: u32,
}

impl fmt::Display for TagStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.written > 0 {
            write!(f, "{} created, {} existing", self.written, self.existing)
        } else {
            write!(f, "up to date ({} tags)", self.existing)
        }
    }
}

/// Write a stub page for every tag across `posts` whose derived file name
/// is not already present in the tags directory.
///
/// The directory is created if missing. Existing stubs are never rewritten;
/// tags colliding on slug within this run produce a single stub.
pub fn synthesize(ctx: &BuildContext, posts: &[Post]) -> Result<TagStats, TagError> {
    let tags_dir = ctx.tags_dir();
    fs::create_dir_all(&tags_dir)?;

    let mut present: BTreeSet<String> = fs::read_dir(&tags_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    let mut stats = TagStats::default();
    let mut counted: BTreeSet<String> = BTreeSet::new();

    for post in posts {
        for tag in &post.tags {
            let filename = stub_filename(tag);
            if !counted.insert(filename.clone()) {
                // Same slug already handled this run (casing variant)
                continue;
            }
            if present.contains(&filename) {
                stats.existing += 1;
                continue;
            }
            fs::write(tags_dir.join(&filename), stub_page(tag, &ctx.config.tag_layout))?;
            present.insert(filename);
            stats.written += 1;
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::post_with_tags;
    use std::fs;
    use tempfile::TempDir;

    fn ctx_for(tmp: &TempDir) -> BuildContext {
        BuildContext::load(tmp.path()).unwrap()
    }

    // =========================================================================
    // Slug derivation
    // =========================================================================

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slug("Machine Learning"), "machine-learning");
        assert_eq!(slug("machine learning"), "machine-learning");
    }

    #[test]
    fn slug_single_word() {
        assert_eq!(slug("Python"), "python");
    }

    #[test]
    fn stub_filename_appends_html() {
        assert_eq!(stub_filename("Reverse Engineering"), "reverse-engineering.html");
    }

    // =========================================================================
    // Stub template
    // =========================================================================

    #[test]
    fn stub_page_names_literal_tag() {
        assert_eq!(
            stub_page("Machine Learning", "tag"),
            "---\nlayout: tag\ntag: Machine Learning\n---"
        );
    }

    #[test]
    fn stub_page_uses_configured_layout() {
        assert_eq!(
            stub_page("Python", "tag-index"),
            "---\nlayout: tag-index\ntag: Python\n---"
        );
    }

    // =========================================================================
    // synthesize()
    // =========================================================================

    #[test]
    fn synthesize_writes_one_stub_per_tag() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        let posts = vec![
            post_with_tags("first", &["Python", "Machine Learning"]),
            post_with_tags("second", &["Linux"]),
        ];

        let stats = synthesize(&ctx, &posts).unwrap();
        assert_eq!(stats, TagStats { written: 3, existing: 0 });

        let tags_dir = ctx.tags_dir();
        assert!(tags_dir.join("python.html").exists());
        assert!(tags_dir.join("machine-learning.html").exists());
        assert!(tags_dir.join("linux.html").exists());

        let content = fs::read_to_string(tags_dir.join("machine-learning.html")).unwrap();
        assert_eq!(content, "---\nlayout: tag\ntag: Machine Learning\n---");
    }

    #[test]
    fn synthesize_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        let posts = vec![post_with_tags("p", &["Python"])];

        synthesize(&ctx, &posts).unwrap();
        let before = fs::metadata(ctx.tags_dir().join("python.html"))
            .unwrap()
            .modified()
            .unwrap();

        let stats = synthesize(&ctx, &posts).unwrap();
        assert_eq!(stats, TagStats { written: 0, existing: 1 });

        let after = fs::metadata(ctx.tags_dir().join("python.html"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn synthesize_skips_existing_stub_for_recased_tag() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        fs::create_dir_all(ctx.tags_dir()).unwrap();
        fs::write(
            ctx.tags_dir().join("python.html"),
            "---\nlayout: tag\ntag: python\n---",
        )
        .unwrap();

        let posts = vec![post_with_tags("p", &["Python"])];
        let stats = synthesize(&ctx, &posts).unwrap();
        assert_eq!(stats, TagStats { written: 0, existing: 1 });

        // The stub on disk keeps its original casing
        let content = fs::read_to_string(ctx.tags_dir().join("python.html")).unwrap();
        assert!(content.contains("tag: python"));
    }

    #[test]
    fn synthesize_collapses_casing_variants_within_run() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        let posts = vec![
            post_with_tags("a", &["Machine Learning"]),
            post_with_tags("b", &["machine learning"]),
        ];

        let stats = synthesize(&ctx, &posts).unwrap();
        assert_eq!(stats, TagStats { written: 1, existing: 0 });

        // First-seen casing wins
        let content =
            fs::read_to_string(ctx.tags_dir().join("machine-learning.html")).unwrap();
        assert!(content.contains("tag: Machine Learning"));
    }

    #[test]
    fn synthesize_creates_tags_dir() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        assert!(!ctx.tags_dir().exists());

        synthesize(&ctx, &[post_with_tags("p", &["DFIR"])]).unwrap();
        assert!(ctx.tags_dir().join("dfir.html").exists());
    }

    #[test]
    fn synthesize_no_posts_no_writes() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        let stats = synthesize(&ctx, &[]).unwrap();
        assert_eq!(stats, TagStats::default());
    }

    #[test]
    fn stub_name_collision_with_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx_for(&tmp);
        fs::create_dir_all(ctx.tags_dir().join("python.html")).unwrap();

        // A directory named like a stub doesn't count as an existing page;
        // writing over it fails loudly rather than silently skipping.
        let result = synthesize(&ctx, &[post_with_tags("p", &["Python"])]);
        assert!(result.is_err());
    }
}
