//! Gallery items and their thumbnails.
//!
//! An [`Item`] is one unlockable entry: the resource shown full-screen, the
//! [`Thumbnail`] drawn on the page grid, an optional song, an optional
//! unlock condition, and a tooltip.
//!
//! ## Thumbnail derivation
//!
//! | Effective resource | Thumbnail |
//! |---|---|
//! | Image, Displayable | composited into the thumbnail box |
//! | Video file `movies/op.webm` | `<thumbnails_folder>/movies/op_thumbnail.jpg`, then `.png`; not-found placeholder if neither loads |
//! | anything else | not-found placeholder |
//!
//! The effective resource is the custom thumbnail override when one is set.
//! Every thumbnail holds a clone of the navigator's [`SharedSize`], so a
//! distribution change resizes them all at once.

use crate::host::Host;
use crate::imaging::Presentation;
use crate::resources::{Content, Extensions, ResourceError, ResourceId, ResourceResolver, file_extension};
use crate::types::{SharedSize, Size};

/// Suffixes tried, in order, when looking for a pre-rendered video thumbnail.
pub const VIDEO_THUMBNAIL_SUFFIXES: &[&str] = &["_thumbnail.jpg", "_thumbnail.png"];

/// Engine-style path: backslashes become forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Candidate thumbnail paths for a video file, in probe order.
pub fn video_thumbnail_candidates(folder: &str, video: &str, extension: &str) -> Vec<String> {
    let stem = &video[..video.len().saturating_sub(extension.len())];
    let folder = folder.trim_end_matches('/');
    VIDEO_THUMBNAIL_SUFFIXES
        .iter()
        .map(|suffix| {
            if folder.is_empty() {
                format!("{stem}{suffix}")
            } else {
                format!("{folder}/{stem}{suffix}")
            }
        })
        .collect()
}

/// The song to keep for an item: only loadable audio files qualify.
pub fn playable_song(host: &dyn Host, song: Option<&str>) -> Option<String> {
    let song = normalize_path(song?);
    let ext = file_extension(&song)?;
    (Extensions::is_audio(&ext) && host.is_loadable(&song)).then_some(song)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    resource: ResourceId,
    custom: Option<ResourceId>,
    size: SharedSize,
}

impl Thumbnail {
    pub fn new(resource: ResourceId, size: SharedSize) -> Self {
        Self {
            resource,
            custom: None,
            size,
        }
    }

    /// The resource the thumbnail is derived from: the override when set.
    pub fn resource(&self) -> ResourceId {
        self.custom.unwrap_or(self.resource)
    }

    pub fn custom(&self) -> Option<ResourceId> {
        self.custom
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    pub fn shared_size(&self) -> &SharedSize {
        &self.size
    }

    /// Set, replace or (with `None`) clear the override resource.
    pub fn set_custom(
        &mut self,
        resolver: &mut ResourceResolver,
        host: &dyn Host,
        content: Option<Content>,
        force_check: bool,
    ) -> Result<(), ResourceError> {
        match (content, self.custom) {
            (None, _) => self.custom = None,
            (Some(content), None) => {
                self.custom = Some(resolver.resolve(host, content, force_check)?);
            }
            (Some(content), Some(id)) => resolver.reassign(host, id, content)?,
        }
        Ok(())
    }

    /// Build the composite shown on the page grid.
    pub fn create(
        &self,
        resolver: &mut ResourceResolver,
        host: &dyn Host,
        thumbnails_folder: &str,
        not_found: ResourceId,
    ) -> Result<Presentation, ResourceError> {
        let size = self.size();
        let id = self.resource();
        let resource = resolver.resource(id);
        let shown_as_is = resource.is_image() || resource.is_displayable();
        let candidates = match (resource.is_video(), resource.content(), resource.extension()) {
            (true, Content::Reference(path), Some(ext)) => {
                video_thumbnail_candidates(thumbnails_folder, path, ext)
            }
            _ => Vec::new(),
        };

        if let Some(found) = candidates.into_iter().find(|c| host.is_loadable(c)) {
            return resolver.composite_transient(host, found, size);
        }
        if !shown_as_is {
            return resolver.composite_to(host, not_found, size);
        }
        resolver.composite_to(host, id, size)
    }
}

/// One unlockable gallery entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    resource: ResourceId,
    thumbnail: Thumbnail,
    song: Option<String>,
    condition: Option<String>,
    tooltip: String,
}

impl Item {
    pub fn new(name: impl Into<String>, resource: ResourceId, thumbnail_size: SharedSize) -> Self {
        Self {
            name: name.into(),
            resource,
            thumbnail: Thumbnail::new(resource, thumbnail_size),
            song: None,
            condition: None,
            tooltip: String::new(),
        }
    }

    /// Keep `song` only when it is loadable audio.
    pub fn with_song(mut self, host: &dyn Host, song: Option<&str>) -> Self {
        self.song = playable_song(host, song);
        self
    }

    pub fn with_condition(mut self, condition: Option<&str>) -> Self {
        self.condition = condition.map(str::to_string);
        self
    }

    pub fn with_tooltip(mut self, tooltip: Option<&str>) -> Self {
        self.tooltip = tooltip.unwrap_or_default().to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn song(&self) -> Option<&str> {
        self.song.as_deref()
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn thumbnail_mut(&mut self) -> &mut Thumbnail {
        &mut self.thumbnail
    }

    /// No condition, an empty one, or one the host evaluates as true.
    pub fn meets_condition(&self, host: &dyn Host) -> bool {
        match self.condition.as_deref() {
            None | Some("") => true,
            Some(condition) => host.evaluate(condition),
        }
    }

    /// The thumbnail to show: the locked placeholder while the condition is
    /// unmet, sized by the same shared cell as the real one.
    pub fn thumbnail(&self, host: &dyn Host, locked: ResourceId) -> Thumbnail {
        if self.meets_condition(host) {
            self.thumbnail.clone()
        } else {
            Thumbnail::new(locked, self.thumbnail.size.clone())
        }
    }
}

/// Everything needed to create an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub resource: Content,
    pub thumbnail: Option<Content>,
    pub song: Option<String>,
    pub condition: Option<String>,
    pub tooltip: Option<String>,
}

impl ItemSpec {
    pub fn new(resource: impl Into<Content>) -> Self {
        Self {
            resource: resource.into(),
            thumbnail: None,
            song: None,
            condition: None,
            tooltip: None,
        }
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<Content>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn song(mut self, song: impl Into<String>) -> Self {
        self.song = Some(song.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}
