//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults
//! are overridden by the user file in the content root.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── gallery.toml             # Overrides stock defaults
//! ├── 010-Chapter One/
//! │   └── ...
//! └── gallery/
//!     ├── images/              # Placeholder images
//!     ├── thumbnails/          # Pre-rendered video thumbnails
//!     └── db/images.json       # Size cache
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! force_loader = false         # Fail immediately on unregistered names
//! sort_slides = false          # Sort slide names instead of insertion order
//! keep_loaded = false          # Keep full-screen entries across gallery exits
//! load_in_put = false          # Build full-screen entries when items are put
//! rescale_images = true        # Fit full-screen images to the screen
//! thumbnails_folder = "gallery/thumbnails"
//! cache_file = "gallery/db/images.json"
//! transition = "dissolve"
//!
//! [placeholders]
//! not_found = "gallery/images/not_found.png"
//! play_hover = "gallery/images/play_hover.png"
//! play_idle = "gallery/images/play_idle.png"
//! idle = "gallery/images/idle.png"
//! locked = "gallery/images/locked.png"
//!
//! [layout]
//! columns = 4
//! rows = 4
//! item_spacing = 0.0078125     # Fraction of screen width between items
//! navigation_width = 0.21875   # Fraction of screen width for the side menu
//! navigation_min_width = 80    # Lower bound in pixels
//! navigation_spacing = 0.00390625
//!
//! [names]
//! "chapter one" = "Chapter I"  # Custom display names
//!
//! [host]
//! screen = [1920, 1080]
//! unlocked = []                # Flags the filesystem host treats as set
//!
//! [host.named]
//! "eileen happy" = { path = "cg/eileen_happy.png", kind = "image" }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::Size;

pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Resolve resources strictly: an unregistered name is an error instead
    /// of being deferred. Applies to resources the gallery creates itself.
    pub force_loader: bool,
    /// Sort slide names before picking the first slide.
    pub sort_slides: bool,
    /// Keep full-screen entries alive when the gallery is exited.
    pub keep_loaded: bool,
    /// Build full-screen entries as items are put instead of on first view.
    pub load_in_put: bool,
    /// Fit full-screen images to the screen, keeping their aspect ratio.
    pub rescale_images: bool,
    /// Folder holding `<video>_thumbnail.jpg|png` files.
    pub thumbnails_folder: String,
    /// Size cache location, relative to the content root.
    pub cache_file: String,
    /// Transition used when showing a full-screen item.
    pub transition: String,
    pub placeholders: PlaceholdersConfig,
    pub layout: LayoutConfig,
    /// Custom display names keyed by slide name.
    pub names: BTreeMap<String, String>,
    /// Settings for the filesystem host.
    pub host: HostConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            force_loader: false,
            sort_slides: false,
            keep_loaded: false,
            load_in_put: false,
            rescale_images: true,
            thumbnails_folder: "gallery/thumbnails".to_string(),
            cache_file: crate::sizes::DEFAULT_CACHE_FILE.to_string(),
            transition: "dissolve".to_string(),
            placeholders: PlaceholdersConfig::default(),
            layout: LayoutConfig::default(),
            names: BTreeMap::new(),
            host: HostConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.columns == 0 || self.layout.rows == 0 {
            return Err(ConfigError::Validation(
                "layout.columns and layout.rows must be at least 1".into(),
            ));
        }
        for (key, ratio) in [
            ("item_spacing", self.layout.item_spacing),
            ("navigation_width", self.layout.navigation_width),
            ("navigation_spacing", self.layout.navigation_spacing),
        ] {
            if !(0.0..1.0).contains(&ratio) {
                return Err(ConfigError::Validation(format!(
                    "layout.{key} must be a fraction of the screen width in [0, 1)"
                )));
            }
        }
        if self.host.screen[0] == 0 || self.host.screen[1] == 0 {
            return Err(ConfigError::Validation(
                "host.screen values must be non-zero".into(),
            ));
        }
        if self.cache_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cache_file must not be empty".into(),
            ));
        }
        if let Some((name, _)) = self.names.iter().find(|(name, _)| name.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "names: slide name '{name}' must not be empty"
            )));
        }
        Ok(())
    }
}

/// Placeholder images used by thumbnails and item buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholdersConfig {
    /// Shown for items whose thumbnail cannot be derived.
    pub not_found: String,
    /// Hover border of video and animation buttons.
    pub play_hover: String,
    /// Idle border of video and animation buttons.
    pub play_idle: String,
    /// Idle border of image and displayable buttons.
    pub idle: String,
    /// Thumbnail of items whose condition is not met.
    pub locked: String,
}

fn images_path(file: &str) -> String {
    format!("gallery/images/{file}")
}

impl Default for PlaceholdersConfig {
    fn default() -> Self {
        Self {
            not_found: images_path("not_found.png"),
            play_hover: images_path("play_hover.png"),
            play_idle: images_path("play_idle.png"),
            idle: images_path("idle.png"),
            locked: images_path("locked.png"),
        }
    }
}

/// Page grid and side-menu geometry.
///
/// Widths are fractions of the screen width so one config serves every
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub columns: u32,
    pub rows: u32,
    pub item_spacing: f64,
    pub navigation_width: f64,
    /// Lower bound of the side-menu width, in pixels.
    pub navigation_min_width: u32,
    pub navigation_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
            item_spacing: 0.0078125,
            navigation_width: 0.21875,
            navigation_min_width: 80,
            navigation_spacing: 0.00390625,
        }
    }
}

fn width_ratio(screen: Size, ratio: f64) -> u32 {
    (screen.width as f64 * ratio) as u32
}

impl LayoutConfig {
    /// Horizontal gap between items, in pixels.
    pub fn item_xspacing(&self, screen: Size) -> u32 {
        width_ratio(screen, self.item_spacing)
    }

    /// Side-menu width, in pixels.
    pub fn navigation_xsize(&self, screen: Size) -> u32 {
        width_ratio(screen, self.navigation_width).max(self.navigation_min_width)
    }

    pub fn navigation_spacing(&self, screen: Size) -> u32 {
        width_ratio(screen, self.navigation_spacing)
    }

    /// Width taken by the side menu and its gap.
    pub fn chrome_width(&self, screen: Size) -> u32 {
        self.navigation_xsize(screen)
            .saturating_add(self.navigation_spacing(screen))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedKind {
    Image,
    Animation,
    Displayable,
}

/// A name the filesystem host reports as registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedResource {
    /// Image file backing the name, used for size probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub kind: NamedKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Screen size as `[width, height]`.
    pub screen: [u32; 2],
    /// Condition flags that evaluate as set.
    pub unlocked: Vec<String>,
    pub named: BTreeMap<String, NamedResource>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            screen: [1920, 1080],
            unlocked: Vec::new(),
            named: BTreeMap::new(),
        }
    }
}

impl HostConfig {
    pub fn screen_size(&self) -> Size {
        Size::new(self.screen[0], self.screen[1])
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `gallery.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `gallery.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Load config from an explicit file path instead of the content root.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Resolve resources strictly: a name the engine has not registered is an
# error right away instead of waiting for the end of registration.
force_loader = false

# Sort slide names alphabetically instead of keeping insertion order.
sort_slides = false

# Keep full-screen entries loaded when the gallery is closed.
keep_loaded = false

# Build full-screen entries when items are added instead of on first view.
load_in_put = false

# Fit full-screen images to the screen, keeping their aspect ratio.
rescale_images = true

# Folder searched for "<video path>_thumbnail.jpg" / ".png" files.
thumbnails_folder = "gallery/thumbnails"

# Size cache file, relative to the content root.
cache_file = "gallery/db/images.json"

# Transition used when an item is shown full-screen.
transition = "dissolve"

# ---------------------------------------------------------------------------
# Placeholder images
# ---------------------------------------------------------------------------
[placeholders]
not_found = "gallery/images/not_found.png"
play_hover = "gallery/images/play_hover.png"
play_idle = "gallery/images/play_idle.png"
idle = "gallery/images/idle.png"
locked = "gallery/images/locked.png"

# ---------------------------------------------------------------------------
# Page layout
# ---------------------------------------------------------------------------
[layout]
# Items per page = columns * rows.
columns = 4
rows = 4

# Widths as fractions of the screen width.
item_spacing = 0.0078125
navigation_width = 0.21875
navigation_spacing = 0.00390625

# Lower bound of the side-menu width, in pixels.
navigation_min_width = 80

# ---------------------------------------------------------------------------
# Custom display names, keyed by slide name
# ---------------------------------------------------------------------------
[names]
# "chapter one" = "Chapter I"

# ---------------------------------------------------------------------------
# Filesystem host (used by the CLI)
# ---------------------------------------------------------------------------
[host]
screen = [1920, 1080]

# Condition flags treated as set. Conditions may combine flags with
# "and", "or" and "not".
unlocked = []

# Names resolved as registered engine objects.
[host.named]
# "eileen happy" = { path = "cg/eileen_happy.png", kind = "image" }
"##
}
