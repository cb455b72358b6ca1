//! Inline escape highlighter for rendered code blocks.
//!
//! The site's posts use a lightweight markup inside highlighted code: a pair
//! of middle dots (`·emphasized·`) marks code to emphasize, and a pair of
//! inverted exclamation marks (`¡comment¡`) marks commentary. The generated
//! HTML carries the delimiters through verbatim; this pass replaces each
//! delimited span with the corresponding `<span>` wrapper, reusing the
//! highlighter's own CSS classes (`nt` for emphasis, `c` for comments).
//!
//! Substitution is scoped to blocks carrying the configured highlighter
//! class — prose elsewhere in the document can use the characters freely.
//! A document containing neither delimiter is returned as-is, borrowed.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

const EMPHASIS_DELIMITER: char = '·';
const COMMENT_DELIMITER: char = '¡';

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid highlighter class name {0:?}: {1}")]
    BadClassName(String, regex::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Compiled substitution rules for one highlighter class.
#[derive(Debug)]
pub struct Highlighter {
    block: Regex,
    emphasis: Regex,
    comment: Regex,
}

impl Highlighter {
    /// Build a highlighter scoped to `<figure class="{class_name}">` blocks.
    pub fn new(class_name: &str) -> Result<Self, HighlightError> {
        let block_pattern = format!(
            r#"(?s)<figure class="{}">.*?</figure>"#,
            regex::escape(class_name)
        );
        let block = Regex::new(&block_pattern)
            .map_err(|e| HighlightError::BadClassName(class_name.to_string(), e))?;
        // Non-greedy pairs, same-line only — a stray delimiter must not
        // swallow the rest of the block.
        let emphasis = Regex::new("·(.*?)·").expect("static pattern");
        let comment = Regex::new("¡(.*?)¡").expect("static pattern");
        Ok(Self {
            block,
            emphasis,
            comment,
        })
    }

    /// Apply both substitutions inside every class-marked block.
    ///
    /// Returns `Cow::Borrowed` when the document contains neither delimiter.
    pub fn apply<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if !html.contains(EMPHASIS_DELIMITER) && !html.contains(COMMENT_DELIMITER) {
            return Cow::Borrowed(html);
        }
        self.block.replace_all(html, |caps: &regex::Captures<'_>| {
            let block = &caps[0];
            let emphasized = self
                .emphasis
                .replace_all(block, "<span class=\"nt\">$1</span>");
            self.comment
                .replace_all(&emphasized, "<span class=\"c\">$1</span>")
                .into_owned()
        })
    }
}

/// Counters for one directory pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Files rewritten because a substitution changed them.
    pub rewritten: u32,
    /// Files left untouched.
    pub unchanged: u32,
}

impl fmt::Display for HighlightStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rewritten > 0 {
            write!(
                f,
                "{} rewritten, {} unchanged",
                self.rewritten, self.unchanged
            )
        } else {
            write!(f, "no changes ({} files)", self.unchanged)
        }
    }
}

/// Rewrite every `*.html` file under `dir` in place.
///
/// Only files whose content actually changed are written back.
pub fn process_dir(dir: &Path, highlighter: &Highlighter) -> Result<HighlightStats, HighlightError> {
    let mut stats = HighlightStats::default();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_html = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("html"))
            .unwrap_or(false);
        if !is_html {
            continue;
        }
        let content = fs::read_to_string(entry.path())?;
        match highlighter.apply(&content) {
            Cow::Borrowed(_) => stats.unchanged += 1,
            Cow::Owned(rewritten) if rewritten != content => {
                fs::write(entry.path(), rewritten)?;
                stats.rewritten += 1;
            }
            Cow::Owned(_) => stats.unchanged += 1,
        }
    }
    Ok(stats)
}
