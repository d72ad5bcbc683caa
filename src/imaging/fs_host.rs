//! Filesystem-backed host: runs the gallery without an engine.
//!
//! ## Capability mapping
//!
//! | Capability | Implementation |
//! |---|---|
//! | Loadability | file exists under the content root |
//! | Size probe | `image::image_dimensions` (header decode only) |
//! | Registered names | `[host.named]` table of `gallery.toml` |
//! | Conditions | flag expressions over `[host] unlocked` |
//! | Preferences | kept in memory for the session |
//!
//! Conditions are a deliberately small language: flag names combined with
//! `and`, `or` and a `not` prefix (`and` binds tighter), plus the literals
//! `True` and `False`. Unknown flags are locked.

use crate::config::{HostConfig, NamedKind};
use crate::host::{Host, HostError, HostObject, ObjectKind, Preferences};
use crate::resources::Content;
use crate::types::Size;
use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

struct NamedAsset {
    path: Option<String>,
    kind: NamedKind,
}

pub struct FsHost {
    root: PathBuf,
    screen: Size,
    named: BTreeMap<String, NamedAsset>,
    unlocked: HashSet<String>,
    preferences: Cell<Preferences>,
}

impl FsHost {
    pub fn new(root: impl Into<PathBuf>, screen: Size) -> Self {
        Self {
            root: root.into(),
            screen,
            named: BTreeMap::new(),
            unlocked: HashSet::new(),
            preferences: Cell::new(Preferences::default()),
        }
    }

    /// Build a host for `root` from the `[host]` section of the config.
    pub fn from_config(root: impl Into<PathBuf>, config: &HostConfig) -> Self {
        let mut host = Self::new(root, Size::new(config.screen[0], config.screen[1]));
        for (name, entry) in &config.named {
            host.register(name, entry.path.clone(), entry.kind);
        }
        host.unlocked = config.unlocked.iter().cloned().collect();
        host
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn register(&mut self, name: &str, path: Option<String>, kind: NamedKind) {
        self.named
            .insert(name.to_string(), NamedAsset { path, kind });
    }

    pub fn unlock(&mut self, flag: &str) {
        self.unlocked.insert(flag.to_string());
    }

    fn resolve_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn term(&self, term: &str) -> bool {
        let term = term.trim();
        if let Some(rest) = term.strip_prefix("not ") {
            return !self.term(rest);
        }
        if let Some(rest) = term.strip_prefix('!') {
            return !self.term(rest);
        }
        match term {
            "True" | "true" => true,
            "False" | "false" | "" => false,
            flag => self.unlocked.contains(flag),
        }
    }
}

impl Host for FsHost {
    fn registered(&self, name: &str) -> Option<HostObject> {
        let asset = self.named.get(name)?;
        let kind = match asset.kind {
            NamedKind::Image => ObjectKind::Image,
            NamedKind::Animation => ObjectKind::Animation,
            NamedKind::Displayable => ObjectKind::Displayable,
        };
        Some(HostObject::new(name, kind))
    }

    fn is_loadable(&self, path: &str) -> bool {
        !path.is_empty() && self.resolve_path(path).is_file()
    }

    fn probe_size(&self, content: &Content) -> Result<Size, HostError> {
        let relative = match content {
            Content::Reference(s) => match self.named.get(s.as_str()) {
                Some(asset) => asset.path.clone(),
                None => Some(s.clone()),
            },
            Content::Object(obj) => self.named.get(&obj.id).and_then(|a| a.path.clone()),
        };
        let relative = relative.ok_or_else(|| HostError::NotLoadable(content.to_string()))?;
        let path = self.resolve_path(&relative);
        if !path.is_file() {
            return Err(HostError::NotLoadable(relative));
        }
        let (width, height) = image::image_dimensions(&path)
            .map_err(|e| HostError::Decode(relative.clone(), e.to_string()))?;
        Ok(Size::new(width, height))
    }

    fn evaluate(&self, condition: &str) -> bool {
        condition
            .split(" or ")
            .any(|clause| clause.split(" and ").all(|term| self.term(term)))
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn load_preferences(&self) -> Preferences {
        self.preferences.get()
    }

    fn store_preferences(&self, preferences: &Preferences) {
        self.preferences.set(*preferences);
    }
}
