//! Shared test utilities for the vn-gallery test suite.
//!
//! Builds a small content directory on disk (real PNG files, empty video and
//! audio files) and offers lookups over scanned and registered galleries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_content();
//! let (gallery, _) = scan::open(tmp.path(), GalleryConfig::default()).unwrap();
//!
//! assert_tree_shape(&gallery, &[
//!     ("Chapter One", &["cg", "movies"]),
//!     ("extras", &[]),
//! ]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::PlaceholdersConfig;
use crate::gallery::Gallery;
use crate::host::Host;
use crate::items::Item;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a black PNG of the given size, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::new(width, height).save(path).unwrap();
}

/// Write an empty file, creating parent directories.
pub fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

/// Write the stock placeholder images under `root`.
pub fn write_placeholders(root: &Path) {
    let p = PlaceholdersConfig::default();
    for path in [&p.not_found, &p.play_hover, &p.play_idle, &p.idle, &p.locked] {
        write_png(&root.join(path), 30, 20);
    }
}

/// A content directory:
///
/// ```text
/// 010-Chapter-One/
/// ├── 010-cg/        001-beach.png (64x36), 002-night.png (36x64), 002-night.ogg
/// └── 020-movies/    op.webm
/// extras/            bonus.png (10x10)
/// gallery/           placeholders, thumbnails/…/op_thumbnail.png
/// .drafts/           wip.png (hidden)
/// notes.txt
/// ```
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_placeholders(root);
    write_png(&root.join("010-Chapter-One/010-cg/001-beach.png"), 64, 36);
    write_png(&root.join("010-Chapter-One/010-cg/002-night.png"), 36, 64);
    touch(&root.join("010-Chapter-One/010-cg/002-night.ogg"));
    touch(&root.join("010-Chapter-One/020-movies/op.webm"));
    write_png(
        &root.join("gallery/thumbnails/010-Chapter-One/020-movies/op_thumbnail.png"),
        16,
        9,
    );
    write_png(&root.join("extras/bonus.png"), 10, 10);
    write_png(&root.join(".drafts/wip.png"), 10, 10);
    fs::write(root.join("notes.txt"), "not media").unwrap();
    tmp
}

// =========================================================================
// Lookups
// =========================================================================

/// The items of the slide at `path` (`"Chapter One/cg"`). Panics if absent.
pub fn slide_items<'a, H: Host>(gallery: &'a Gallery<H>, path: &str) -> &'a [Item] {
    let tree = gallery.tree();
    let id = tree
        .find(path)
        .unwrap_or_else(|| panic!("no node at '{path}'"));
    tree.items(id)
}

/// Resource references of the items of the slide at `path`.
pub fn item_paths<H: Host>(gallery: &Gallery<H>, path: &str) -> Vec<String> {
    slide_items(gallery, path)
        .iter()
        .map(|item| gallery.resolver().resource(item.resource()).content().to_string())
        .collect()
}

// =========================================================================
// Tree assertions
// =========================================================================

/// Assert the root's children and, for sliders, their children's names.
pub fn assert_tree_shape<H: Host>(gallery: &Gallery<H>, expected: &[(&str, &[&str])]) {
    let tree = gallery.tree();
    let root = tree.root();
    let actual: Vec<(String, Vec<String>)> = tree
        .names(root)
        .into_iter()
        .map(|name| {
            let children = tree
                .child(root, &name)
                .filter(|id| tree.is_slider(*id))
                .map(|id| tree.names(id))
                .unwrap_or_default();
            (name, children)
        })
        .collect();
    let expected: Vec<(String, Vec<String>)> = expected
        .iter()
        .map(|(name, children)| {
            (
                name.to_string(),
                children.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect();
    assert_eq!(actual, expected, "tree shape mismatch");
}
