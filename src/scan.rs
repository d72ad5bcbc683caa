//! Filesystem scanning: a content directory becomes a gallery.
//!
//! The CLI's way of registering content. The directory tree is walked once
//! into a [`ScannedDir`] listing, which [`populate`] then turns into sliders,
//! slides and items on a [`Gallery`].
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root (the root slider)
//! ├── gallery.toml                 # Gallery configuration (optional)
//! ├── gallery/                     # Placeholders, size cache, thumbnails (skipped)
//! ├── 010-Chapter-One/             # Slider (has subdirectories)
//! │   ├── 010-cg/                  # Slide (has media files)
//! │   │   ├── 001-beach.png        # Item, tooltip "beach"
//! │   │   ├── 002-night.png
//! │   │   └── 002-night.ogg        # Song of 002-night.png
//! │   └── 020-movies/
//! │       └── op.webm              # Video item
//! └── extras/                      # Slide
//!     └── bonus.png
//! ```
//!
//! ## Naming Conventions
//!
//! - **Numbered entries** (`NNN-name`): sorted by number, the prefix is not
//!   part of the slide name, dashes become spaces
//! - **Unnumbered entries**: sorted by name after the numbered ones
//! - **Audio files**: the song of the media file with the same stem
//!
//! ## Validation
//!
//! - No mixed content: a directory holds either subdirectories or media
//! - Hidden entries and the gallery data folders are skipped
//! - Media files directly in the content root are skipped with a warning

use crate::config::GalleryConfig;
use crate::gallery::{Gallery, GalleryError};
use crate::host::Host;
use crate::imaging::FsHost;
use crate::items::ItemSpec;
use crate::naming::{entry_order, parse_entry_name};
use crate::resources::{Extensions, file_extension};
use crate::slides::NodeId;
use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),
    #[error("Directory contains both media files and subdirectories: {0}")]
    MixedContent(PathBuf),
}

/// A scanned directory below the content root.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDir {
    /// Slide or slider name: the directory name without its number prefix.
    pub name: String,
    pub path: PathBuf,
    pub kind: DirKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirKind {
    Slider(Vec<ScannedDir>),
    Slide(Vec<ScannedMedia>),
}

/// A media file of a slide, with paths relative to the content root.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedMedia {
    pub path: String,
    pub song: Option<String>,
    pub tooltip: Option<String>,
}

/// Counts of what [`populate`] registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub sliders: usize,
    pub slides: usize,
    pub items: usize,
}

#[derive(Debug, Default)]
struct Listing {
    dirs: Vec<PathBuf>,
    media: Vec<PathBuf>,
    audio: HashMap<String, String>,
}

/// Scan, register and finalize a whole content directory.
///
/// The returned gallery has its first slide selected.
pub fn open(root: &Path, config: GalleryConfig) -> Result<(Gallery<FsHost>, ScanSummary), ScanError> {
    let dirs = scan(root, &config)?;
    let host = FsHost::from_config(root, &config.host);
    let mut gallery = Gallery::open(root, host, config)?;
    let summary = populate(&mut gallery, &dirs)?;
    gallery.finalize_registration()?;
    gallery.to_first_slide();
    log::info!(
        "scanned {}: {} sliders, {} slides, {} items",
        root.display(),
        summary.sliders,
        summary.slides,
        summary.items
    );
    Ok((gallery, summary))
}

/// Walk `root` into the directories that become sliders and slides.
pub fn scan(root: &Path, config: &GalleryConfig) -> Result<Vec<ScannedDir>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("content root {} is not a directory", root.display()),
        )));
    }
    let skipped = data_folders(config);

    let mut listings: HashMap<PathBuf, Listing> = HashMap::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by(|a, b| {
            let (x, y) = (a.file_name().to_string_lossy(), b.file_name().to_string_lossy());
            entry_order(&parse_entry_name(&x), &parse_entry_name(&y)).then_with(|| x.cmp(&y))
        })
        .into_iter()
        .filter_entry(move |e| !is_skipped(e, &skipped));

    for entry in walker {
        let entry = entry?;
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        let listing = listings.entry(parent.to_path_buf()).or_default();
        if entry.file_type().is_dir() {
            listing.dirs.push(entry.into_path());
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(ext) = file_extension(&name) else {
            continue;
        };
        if Extensions::is_image(&ext) || Extensions::is_video(&ext) {
            listing.media.push(entry.into_path());
        } else if Extensions::is_audio(&ext) {
            let stem = stem(&name, &ext).to_string();
            listing.audio.insert(stem, relative(root, entry.path()));
        }
    }

    let top = listings.remove(root).unwrap_or_default();
    for file in &top.media {
        log::warn!("skipping {}: media files belong in a slide directory", file.display());
    }
    top.dirs
        .iter()
        .map(|dir| scan_dir(dir, root, &mut listings))
        .collect()
}

fn scan_dir(
    path: &Path,
    root: &Path,
    listings: &mut HashMap<PathBuf, Listing>,
) -> Result<ScannedDir, ScanError> {
    let listing = listings.remove(path).unwrap_or_default();
    if !listing.dirs.is_empty() && !listing.media.is_empty() {
        return Err(ScanError::MixedContent(path.to_path_buf()));
    }

    let kind = if listing.dirs.is_empty() {
        let media = listing
            .media
            .iter()
            .map(|file| scanned_media(file, root, &listing.audio))
            .collect();
        DirKind::Slide(media)
    } else {
        let children = listing
            .dirs
            .iter()
            .map(|dir| scan_dir(dir, root, listings))
            .collect::<Result<_, _>>()?;
        DirKind::Slider(children)
    };

    Ok(ScannedDir {
        name: entry_name(path),
        path: path.to_path_buf(),
        kind,
    })
}

fn scanned_media(file: &Path, root: &Path, audio: &HashMap<String, String>) -> ScannedMedia {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = file_extension(&name).unwrap_or_default();
    let stem = stem(&name, &ext);
    let title = parse_entry_name(stem).name;
    ScannedMedia {
        path: relative(root, file),
        song: audio.get(stem).cloned(),
        tooltip: (!title.is_empty()).then_some(title),
    }
}

/// Register scanned directories under the gallery's root slider.
///
/// A name already taken in its slider is skipped with a warning, along with
/// everything below it.
pub fn populate<H: Host>(gallery: &mut Gallery<H>, dirs: &[ScannedDir]) -> Result<ScanSummary, ScanError> {
    let mut summary = ScanSummary::default();
    let root = gallery.tree().root();
    populate_into(gallery, root, dirs, &mut summary)?;
    Ok(summary)
}

fn populate_into<H: Host>(
    gallery: &mut Gallery<H>,
    slider: NodeId,
    dirs: &[ScannedDir],
    summary: &mut ScanSummary,
) -> Result<(), ScanError> {
    for dir in dirs {
        match &dir.kind {
            DirKind::Slider(children) => {
                let Some(id) = gallery.tree_mut().create_slider(slider, &dir.name) else {
                    log::warn!("skipping {}: '{}' is already taken", dir.path.display(), dir.name);
                    continue;
                };
                summary.sliders += 1;
                populate_into(gallery, id, children, summary)?;
            }
            DirKind::Slide(media) => {
                let Some(id) = gallery.tree_mut().create_slide(slider, &dir.name, false) else {
                    log::warn!("skipping {}: '{}' is already taken", dir.path.display(), dir.name);
                    continue;
                };
                summary.slides += 1;
                for file in media {
                    let mut spec = ItemSpec::new(file.path.as_str());
                    if let Some(song) = &file.song {
                        spec = spec.song(song.as_str());
                    }
                    if let Some(tooltip) = &file.tooltip {
                        spec = spec.tooltip(tooltip.as_str());
                    }
                    let item = gallery.create_item(spec)?;
                    gallery.tree_mut().put_item(id, item);
                    summary.items += 1;
                }
            }
        }
    }
    Ok(())
}

/// Relative paths of every image below `dirs`, in scan order.
pub fn image_paths(dirs: &[ScannedDir]) -> Vec<String> {
    let mut out = Vec::new();
    collect_images(dirs, &mut out);
    out
}

fn collect_images(dirs: &[ScannedDir], out: &mut Vec<String>) {
    for dir in dirs {
        match &dir.kind {
            DirKind::Slider(children) => collect_images(children, out),
            DirKind::Slide(media) => out.extend(
                media
                    .iter()
                    .filter(|m| file_extension(&m.path).is_some_and(|ext| Extensions::is_image(&ext)))
                    .map(|m| m.path.clone()),
            ),
        }
    }
}

/// Top-level folders holding gallery data rather than content.
fn data_folders(config: &GalleryConfig) -> BTreeSet<String> {
    let p = &config.placeholders;
    [
        config.thumbnails_folder.as_str(),
        config.cache_file.as_str(),
        p.not_found.as_str(),
        p.play_hover.as_str(),
        p.play_idle.as_str(),
        p.idle.as_str(),
        p.locked.as_str(),
    ]
    .into_iter()
    .filter_map(|path| {
        let mut components = Path::new(path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(first)), Some(_)) => Some(first.to_string_lossy().to_string()),
            _ => None,
        }
    })
    .collect()
}

fn is_skipped(entry: &DirEntry, data_folders: &BTreeSet<String>) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && data_folders.contains(name.as_ref()))
}

fn entry_name(path: &Path) -> String {
    let raw = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_entry_name(&raw);
    if parsed.name.is_empty() { raw } else { parsed.name }
}

fn stem<'a>(name: &'a str, ext: &str) -> &'a str {
    &name[..name.len().saturating_sub(ext.len())]
}

/// `path` relative to `root`, with `/` separators.
fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
