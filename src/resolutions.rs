//! Image resolution store builder.
//!
//! Markdown posts reference images by name and need their pixel dimensions
//! at render time (for `width`/`height` attributes and layout math). Reading
//! every image header on every build is wasted work on a hosted builder that
//! may not even allow it, so the dimensions are computed locally once and
//! committed as a data file the templates can look up.
//!
//! # Design
//!
//! The store is an ordered map from image file base name to
//! `{width, height}`, persisted as YAML at `<source>/_data/resolutions.yml`.
//! The builder is **append-only**: a file already present in the store is
//! never re-measured — there is no staleness check against mtime or content.
//! Replacing an image under the same name therefore keeps its old record;
//! `--rebuild` is the explicit escape hatch that recomputes the store from
//! scratch.
//!
//! The store file is rewritten only when the directory scan added at least
//! one record. An unchanged build makes zero writes, so a committed store
//! never shows spurious version-control diffs.
//!
//! Dimension reads detect the container format from file content, not the
//! extension. A file the decoder cannot recognize fails the build — a wrong
//! dimension silently baked into a committed data file is worse than a loud
//! stop.
//!
//! Keys are kept in a `BTreeMap`, so re-serialization order is stable no
//! matter what order the filesystem lists the directory in.

use crate::context::BuildContext;
use image::ImageReader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed resolution store {path}: {source}")]
    Store {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Could not read dimensions of {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Pixel dimensions of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// The persisted store: image base name → dimensions, ordered by key.
pub type Store = BTreeMap<String, Dimensions>;

/// Load the store from `path`.
///
/// A missing file is a first build and yields an empty store. A file that
/// exists but fails to parse is an error: the store is committed data, and
/// silently starting over would drop every key it held.
pub fn load_store(path: &Path) -> Result<Store, ResolutionError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Store::new()),
        Err(e) => return Err(e.into()),
    };
    serde_yaml::from_str(&content).map_err(|source| ResolutionError::Store {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize the entire store to `path`, creating parent directories.
pub fn save_store(path: &Path, store: &Store) -> Result<(), ResolutionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(store).map_err(|source| ResolutionError::Store {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Read pixel dimensions from an image file header.
///
/// The format is sniffed from content; the extension is not consulted.
fn read_dimensions(path: &Path) -> Result<Dimensions, ResolutionError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|source| ResolutionError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Dimensions { width, height })
}

/// Counters for one refresh pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Records inserted this run.
    pub added: u32,
    /// Files skipped because the store already had their key.
    pub cached: u32,
}

impl RefreshStats {
    pub fn total(&self) -> u32 {
        self.added + self.cached
    }
}

impl fmt::Display for RefreshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.added > 0 {
            write!(
                f,
                "{} measured, {} cached ({} total)",
                self.added,
                self.cached,
                self.total()
            )
        } else {
            write!(f, "up to date ({} images)", self.cached)
        }
    }
}

/// Outcome of [`run`]: the refresh counters plus whether the store file
/// was written back.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub stats: RefreshStats,
    pub wrote: bool,
}

/// Ensure the store has a record for every regular file in `images_dir`.
///
/// Subdirectories and non-regular entries are ignored. The lookup key is
/// the file's base name; present keys are skipped without any staleness
/// check. A file whose format cannot be decoded fails the whole refresh.
///
/// A missing image directory is treated as empty — the site may simply not
/// have any images yet.
pub fn refresh(images_dir: &Path, store: &mut Store) -> Result<RefreshStats, ResolutionError> {
    let entries = match fs::read_dir(images_dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RefreshStats::default()),
        Err(e) => return Err(e.into()),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut stats = RefreshStats::default();
    for path in &paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if store.contains_key(&name) {
            stats.cached += 1;
            continue;
        }
        let dims = read_dimensions(path)?;
        store.insert(name, dims);
        stats.added += 1;
    }
    Ok(stats)
}

/// Run the full generator: load, refresh, write back on change.
///
/// With `rebuild` set, the existing store is discarded and every image is
/// re-measured; this is the only path that can drop keys, and only because
/// the user asked for it.
pub fn run(ctx: &BuildContext, rebuild: bool) -> Result<RefreshOutcome, ResolutionError> {
    let store_path = ctx.resolutions_file();
    let mut store = if rebuild {
        Store::new()
    } else {
        load_store(&store_path)?
    };

    let stats = refresh(&ctx.images_dir(), &mut store)?;

    let wrote = stats.added > 0 || rebuild;
    if wrote {
        save_store(&store_path, &store)?;
    }
    Ok(RefreshOutcome { stats, wrote })
}
