//! Shared test utilities for the inkstone test suite.

use crate::posts::Post;
use chrono::NaiveDate;
use std::path::Path;

/// Write a real PNG of the given dimensions, regardless of extension.
///
/// The format is forced so tests can exercise content-based detection
/// (e.g. PNG bytes behind a `.jpg` name).
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a real JPEG of the given dimensions.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

/// A post with the given slug and tags; everything else is fixed filler.
pub fn post_with_tags(slug: &str, tags: &[&str]) -> Post {
    Post {
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        date: NaiveDate::from_ymd_opt(2021, 5, 2).unwrap(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
