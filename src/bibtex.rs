//! Citation entry formatting.
//!
//! Readers citing a post get a ready-made BibTeX `@misc` entry: author name
//! flipped to "Last, First" order, the post URL wrapped in `\url{}`, and an
//! access date in the note field. The browser side only copies the string
//! to the clipboard; assembling it is plain string work and lives here so
//! the format is testable.

use chrono::NaiveDate;

/// The post-specific inputs of a citation.
#[derive(Debug, Clone)]
pub struct Citation<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub year: i32,
}

/// Reorder `"First [Middle] Last"` as `"Last, First [Middle]"`.
///
/// A single-word name is returned unchanged.
pub fn flip_name(name: &str) -> String {
    let mut parts: Vec<&str> = name.split_whitespace().collect();
    match parts.pop() {
        Some(last) if !parts.is_empty() => format!("{}, {}", last, parts.join(" ")),
        _ => name.trim().to_string(),
    }
}

/// Citation key: the final non-empty segment of the URL path.
pub fn citation_key(url: &str) -> &str {
    url.rsplit('/').find(|s| !s.is_empty()).unwrap_or(url)
}

/// Render a `@misc` BibTeX entry for a post.
pub fn entry(author: &str, citation: &Citation<'_>, accessed: NaiveDate) -> String {
    let mut out = format!("@misc{{{},\n", citation_key(citation.url));
    out.push_str(&format!("    author = {{{}}},\n", flip_name(author)));
    out.push_str(&format!("    title = {{{}}},\n", citation.title));
    out.push_str(&format!(
        "    howpublished = \"\\url{{{}}}\",\n",
        citation.url
    ));
    out.push_str(&format!("    year = {{{}}},\n", citation.year));
    out.push_str(&format!(
        "    note = \"[Online; accessed {}]\"\n",
        accessed.format("%Y-%m-%d")
    ));
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // flip_name()
    // =========================================================================

    #[test]
    fn flip_name_first_last() {
        assert_eq!(flip_name("Ry Auscitte"), "Auscitte, Ry");
    }

    #[test]
    fn flip_name_with_middle() {
        assert_eq!(flip_name("Ada King Lovelace"), "Lovelace, Ada King");
    }

    #[test]
    fn flip_name_single_word_unchanged() {
        assert_eq!(flip_name("Plato"), "Plato");
    }

    #[test]
    fn flip_name_empty() {
        assert_eq!(flip_name(""), "");
    }

    // =========================================================================
    // citation_key()
    // =========================================================================

    #[test]
    fn key_is_last_url_segment() {
        assert_eq!(
            citation_key("https://example.org/posts/drm-internals"),
            "drm-internals"
        );
    }

    #[test]
    fn key_ignores_trailing_slash() {
        assert_eq!(
            citation_key("https://example.org/posts/drm-internals/"),
            "drm-internals"
        );
    }

    // =========================================================================
    // entry()
    // =========================================================================

    #[test]
    fn entry_matches_expected_layout() {
        let citation = Citation {
            title: "Understanding DRM Internals",
            url: "https://example.org/posts/drm-internals",
            year: 2021,
        };
        let rendered = entry("Ry Auscitte", &citation, date(2026, 8, 30));

        assert_eq!(
            rendered,
            "@misc{drm-internals,\n\
             \x20   author = {Auscitte, Ry},\n\
             \x20   title = {Understanding DRM Internals},\n\
             \x20   howpublished = \"\\url{https://example.org/posts/drm-internals}\",\n\
             \x20   year = {2021},\n\
             \x20   note = \"[Online; accessed 2026-08-30]\"\n\
             }"
        );
    }

    #[test]
    fn entry_embeds_access_date() {
        let citation = Citation {
            title: "T",
            url: "https://example.org/t",
            year: 2020,
        };
        let rendered = entry("A B", &citation, date(2024, 1, 5));
        assert!(rendered.contains("[Online; accessed 2024-01-05]"));
    }
}
