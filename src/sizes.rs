//! Persisted image-dimension cache.
//!
//! Reading the pixel size of an image means decoding at least its header,
//! and thumbnail layout needs that size for every image on a page. This
//! module keeps the dimensions of every probed image in a JSON document so
//! later sessions skip the probe.
//!
//! # Layout
//!
//! Keys are paths split into folder segments and a leaf name. Each folder
//! segment becomes a nested object, the leaf holds `[width, height]`:
//!
//! ```text
//! {
//!   "images": { "cg": { "beach.png": [1920, 1080] } },
//!   "@named": { "eileen happy": [800, 1200] }
//! }
//! ```
//!
//! Resources referenced by a host-registered name (rather than a path) live
//! under the reserved [`NAMED_KEY`] so a name can never collide with a path.
//!
//! # Failure policy
//!
//! The cache is a performance aid, not a source of truth. Loading a missing
//! or corrupt file yields an empty cache and a failed save is logged and
//! dropped; the only cost is re-probing sizes next time.

use crate::types::Size;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};

/// Reserved top-level key for named (non-path) resources.
pub const NAMED_KEY: &str = "@named";

/// Default location of the cache file, relative to the content root.
pub const DEFAULT_CACHE_FILE: &str = "gallery/db/images.json";

#[derive(Debug, Clone, Default)]
pub struct SizeCache {
    sizes: Map<String, Value>,
    source: Option<PathBuf>,
    dirty: bool,
}

impl SizeCache {
    /// A cache with no backing file. `save` is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the cache stored at `path`.
    ///
    /// Any failure (missing file, bad JSON, non-object root) yields an empty
    /// cache that will still be written to `path` on save.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sizes = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    log::debug!("size cache {} is not a JSON object", path.display());
                    Map::new()
                }
                Err(err) => {
                    log::debug!("size cache {} is corrupt: {err}", path.display());
                    Map::new()
                }
            },
            Err(err) => {
                log::debug!("no size cache at {}: {err}", path.display());
                Map::new()
            }
        };
        Self {
            sizes,
            source: Some(path),
            dirty: false,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether a put has added a key since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of cached leaves.
    pub fn len(&self) -> usize {
        fn count(map: &Map<String, Value>) -> usize {
            map.values()
                .map(|v| match v {
                    Value::Object(inner) => count(inner),
                    _ => 1,
                })
                .sum()
        }
        count(&self.sizes)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, path: &str, named: bool) -> Option<Size> {
        let (folders, name) = split_key(path, named)?;
        let mut target = &self.sizes;
        for folder in &folders {
            target = target.get(*folder)?.as_object()?;
        }
        leaf_size(target.get(name)?)
    }

    pub fn contains(&self, path: &str, named: bool) -> bool {
        self.get(path, named).is_some()
    }

    /// Insert or overwrite the size for `path`.
    ///
    /// Only a previously absent key marks the cache dirty.
    pub fn put(&mut self, path: &str, size: Size, named: bool) {
        let Some((folders, name)) = split_key(path, named) else {
            return;
        };
        let mut target = &mut self.sizes;
        for folder in folders {
            let entry = target
                .entry(folder.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Some(map) = entry.as_object_mut() else {
                return;
            };
            target = map;
        }
        if !target.contains_key(name) {
            self.dirty = true;
        }
        target.insert(
            name.to_string(),
            Value::Array(vec![size.width.into(), size.height.into()]),
        );
    }

    /// Write the whole document to the backing file, replacing it atomically.
    pub fn write(&self) -> io::Result<()> {
        let Some(path) = &self.source else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.sizes)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)
    }

    /// Flush to disk if dirty. Failures are logged and swallowed.
    pub fn save(&mut self) {
        if !self.dirty {
            return;
        }
        match self.write() {
            Ok(()) => {
                log::info!("saved {} cached sizes", self.len());
                self.dirty = false;
            }
            Err(err) => log::warn!("could not save size cache: {err}"),
        }
    }
}

/// Split a cache key into folder segments and leaf name.
fn split_key(path: &str, named: bool) -> Option<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let name = segments.pop()?;
    if named {
        segments.insert(0, NAMED_KEY);
    }
    Some((segments, name))
}

fn leaf_size(value: &Value) -> Option<Size> {
    match value.as_array()?.as_slice() {
        [w, h] => Some(Size::new(
            u32::try_from(w.as_u64()?).ok()?,
            u32::try_from(h.as_u64()?).ok()?,
        )),
        _ => None,
    }
}
