//! # Inkstone
//!
//! Build-step generators for a Jekyll-style static blog. The hosted site
//! builder refuses custom plugins, so anything a plugin would compute has
//! to be generated locally, committed, and consumed as plain data files by
//! the templates. Inkstone is that local step: a single binary run before
//! (or instead of) the site build.
//!
//! # Generators
//!
//! ```text
//! resolutions   resources/images/  →  _data/resolutions.yml   (dimension store)
//! tags          _posts/ front matter  →  tags/<slug>.html     (stub pages)
//! highlight     rendered *.html    →  rewritten in place      (escape markup)
//! bibtex        one post           →  @misc entry on stdout   (citation)
//! ```
//!
//! The first two are the per-build generators (`inkstone build` runs them
//! sequentially); `highlight` post-processes rendered output; `bibtex` is
//! an on-demand helper.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolutions`] | Incremental image dimension store: scan, measure, write-on-change |
//! | [`tags`] | Tag stub page synthesis from the tags used across posts |
//! | [`posts`] | Post discovery and YAML front matter parsing |
//! | [`highlight`] | Inline escape-markup substitution in rendered HTML |
//! | [`bibtex`] | BibTeX citation entry formatting |
//! | [`config`] | Tool settings from the site's `_config.yml` |
//! | [`context`] | Explicit per-build context: source root + config + derived paths |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Committed data over recomputation
//!
//! The resolution store is append-only and written back only when a scan
//! added records. The store file lives in version control next to the
//! content it describes, so a no-op build must produce a byte-identical
//! file — otherwise every build dirties the working tree.
//!
//! ## Explicit context, no globals
//!
//! All shared build state (config, derived paths, the loaded store) flows
//! through arguments. There is no ambient site object for generators to
//! mutate behind each other's backs.
//!
//! ## Fail loudly
//!
//! An image that won't decode or front matter that won't parse aborts the
//! build. These files are inputs to committed artifacts; a silently skipped
//! input becomes a silently wrong artifact.

pub mod bibtex;
pub mod config;
pub mod context;
pub mod highlight;
pub mod output;
pub mod posts;
pub mod resolutions;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_helpers;
