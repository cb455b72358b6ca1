//! CLI output formatting for the build generators.
//!
//! Each generator has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Paths are shown as
//! indented secondary context under the headline counters.

use crate::highlight::HighlightStats;
use crate::posts::Post;
use crate::resolutions::RefreshOutcome;
use crate::tags::TagStats;
use std::collections::BTreeSet;
use std::path::Path;

/// Format the resolution store outcome.
///
/// ```text
/// Resolutions: 3 measured, 5 cached (8 total)
///     Store: _data/resolutions.yml (written)
/// ```
pub fn format_resolutions(outcome: &RefreshOutcome, store_path: &Path) -> Vec<String> {
    let status = if outcome.wrote { "written" } else { "unchanged" };
    vec![
        format!("Resolutions: {}", outcome.stats),
        format!("    Store: {} ({})", store_path.display(), status),
    ]
}

pub fn print_resolutions(outcome: &RefreshOutcome, store_path: &Path) {
    for line in format_resolutions(outcome, store_path) {
        println!("{line}");
    }
}

/// Format the tag synthesis outcome.
pub fn format_tags(stats: &TagStats, tags_dir: &Path) -> Vec<String> {
    vec![
        format!("Tag pages: {stats}"),
        format!("    Directory: {}", tags_dir.display()),
    ]
}

pub fn print_tags(stats: &TagStats, tags_dir: &Path) {
    for line in format_tags(stats, tags_dir) {
        println!("{line}");
    }
}

/// Format the highlight pass outcome.
pub fn format_highlight(stats: &HighlightStats, dir: &Path) -> Vec<String> {
    vec![
        format!("Highlight: {stats}"),
        format!("    Directory: {}", dir.display()),
    ]
}

pub fn print_highlight(stats: &HighlightStats, dir: &Path) {
    for line in format_highlight(stats, dir) {
        println!("{line}");
    }
}

/// Format the check summary: posts with their tags, the distinct tag set,
/// and how many images the store does not cover yet.
///
/// ```text
/// Posts (2)
///     2020-07-04 first [Python]
///     2021-03-01 second [Linux, Python]
/// Tags (2): linux, python
/// Images: 3 in directory, 1 not in store
/// ```
pub fn format_check(posts: &[Post], image_count: usize, uncovered: usize) -> Vec<String> {
    let mut lines = vec![format!("Posts ({})", posts.len())];
    for post in posts {
        lines.push(format!(
            "    {} {} [{}]",
            post.date,
            post.slug,
            post.tags.join(", ")
        ));
    }

    let slugs: BTreeSet<String> = posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(|t| crate::tags::slug(t))
        .collect();
    let slug_list: Vec<&str> = slugs.iter().map(String::as_str).collect();
    lines.push(format!("Tags ({}): {}", slugs.len(), slug_list.join(", ")));

    lines.push(format!(
        "Images: {image_count} in directory, {uncovered} not in store"
    ));
    lines
}

pub fn print_check(posts: &[Post], image_count: usize, uncovered: usize) {
    for line in format_check(posts, image_count, uncovered) {
        println!("{line}");
    }
}
