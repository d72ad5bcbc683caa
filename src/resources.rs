//! Resource typing, loadability and presentation geometry.
//!
//! A [`Resource`] wraps whatever a content author handed the gallery (a
//! file path, a registered name, an engine object) and classifies it:
//!
//! ```text
//! Reference("cg/beach.png")   → Image       (loadable path, cached size attached)
//! Reference("op.webm")        → Video       (loadable path, no size)
//! Reference("eileen happy")   → host lookup → Image | Animation | Displayable
//!                               not registered yet → None, deferred
//! Object(handle)              → by kind     → Image | Animation | Displayable
//! ```
//!
//! ## Deferred names
//!
//! Content declarations may run before the engine has registered the images
//! they name. Such a reference resolves to [`ResourceType::None`] and is
//! queued; [`ResourceResolver::load_all`] resolves the queue once every
//! registration has run, this time treating a missing name as an error.
//! Resolving with `force_check` skips the queue and fails immediately.
//!
//! ## Arena
//!
//! Resources live in the [`ResourceResolver`] and are referred to by
//! [`ResourceId`]. Items, thumbnails and the placeholder set hold ids, so a
//! deferred resource resolved later is seen by everything that refers to it.

use crate::host::{Host, HostError, HostObject, ObjectKind};
use crate::imaging::{Presentation, center_offset, fit_within};
use crate::sizes::SizeCache;
use crate::types::Size;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("The resource '{0}' cannot be loaded")]
    NotLoadable(String),
    #[error("No image or animation registered with name '{0}'")]
    NameNotFound(String),
    #[error("Unsupported object for a resource: {0}")]
    UnsupportedType(String),
    #[error("Resource of type '{0}' does not allow this operation")]
    Forbidden(ResourceType),
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// File extensions the engine can load, lowercase with the leading dot.
pub struct Extensions;

impl Extensions {
    pub const IMAGES: &'static [&'static str] = &[".png", ".jpg", ".web", ".jpeg", ".webp"];
    pub const VIDEOS: &'static [&'static str] = &[".webm", ".avi", ".mp4", ".wav", ".mkv", ".ogv"];
    pub const AUDIO: &'static [&'static str] = &[".mp3", ".ogg", ".opus", ".mp2"];

    pub fn is_image(ext: &str) -> bool {
        Self::IMAGES.contains(&ext)
    }

    pub fn is_video(ext: &str) -> bool {
        Self::VIDEOS.contains(&ext)
    }

    pub fn is_audio(ext: &str) -> bool {
        Self::AUDIO.contains(&ext)
    }
}

/// Lowercased extension of `path` with its leading dot (`".png"`).
pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// The raw content reference of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A file path or a registered name; which one is decided on resolution.
    Reference(String),
    /// An engine object handed over directly.
    Object(HostObject),
}

impl Content {
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Content::Reference(s) => Some(s),
            Content::Object(_) => None,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Reference(s) => write!(f, "{s}"),
            Content::Object(obj) => write!(f, "<{}>", obj.id),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Reference(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Reference(value)
    }
}

impl From<HostObject> for Content {
    fn from(value: HostObject) -> Self {
        Content::Object(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Image,
    Video,
    Animation,
    Displayable,
    /// Not resolved (yet); any presentation operation fails.
    None,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Animation => "animation",
            ResourceType::Displayable => "displayable",
            ResourceType::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    content: Content,
    kind: ResourceType,
    extension: Option<String>,
    size: Option<Size>,
    force_check: bool,
}

impl Resource {
    fn unresolved(content: Content, force_check: bool) -> Self {
        Self {
            content,
            kind: ResourceType::None,
            extension: None,
            size: None,
            force_check,
        }
    }

    /// Classify the content. Returns `true` when the resource must wait in
    /// the deferred queue.
    fn load(
        &mut self,
        force_check: bool,
        host: &dyn Host,
        cache: &SizeCache,
    ) -> Result<bool, ResourceError> {
        self.kind = ResourceType::None;
        self.extension = None;
        self.size = None;

        let name = match &self.content {
            Content::Object(obj) => {
                let obj = obj.clone();
                self.classify_object(&obj, cache)?;
                return Ok(false);
            }
            Content::Reference(s) => s.clone(),
        };

        match file_extension(&name) {
            Some(ext) if Extensions::is_image(&ext) => {
                if !host.is_loadable(&name) {
                    return Err(ResourceError::NotLoadable(name));
                }
                self.size = cache.get(&name, false);
                self.kind = ResourceType::Image;
                self.extension = Some(ext);
                Ok(false)
            }
            Some(ext) if Extensions::is_video(&ext) => {
                if !host.is_loadable(&name) {
                    return Err(ResourceError::NotLoadable(name));
                }
                self.kind = ResourceType::Video;
                self.extension = Some(ext);
                Ok(false)
            }
            _ => match host.registered(&name) {
                Some(obj) => {
                    self.classify_object(&obj, cache)?;
                    Ok(false)
                }
                None if force_check => Err(ResourceError::NameNotFound(name)),
                None => Ok(true),
            },
        }
    }

    fn classify_object(&mut self, obj: &HostObject, cache: &SizeCache) -> Result<(), ResourceError> {
        self.kind = match &obj.kind {
            ObjectKind::Animation => ResourceType::Animation,
            ObjectKind::Image => {
                self.size = cache.get(&obj.id, true);
                ResourceType::Image
            }
            ObjectKind::Displayable => ResourceType::Displayable,
            ObjectKind::Other(description) => {
                return Err(ResourceError::UnsupportedType(description.clone()));
            }
        };
        Ok(())
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    /// Extension of the asset when the content is a file path.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Known pixel size, from the cache or an earlier probe.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// An image or animation referenced by name or handle rather than path.
    pub fn is_named(&self) -> bool {
        matches!(self.kind, ResourceType::Image | ResourceType::Animation) && self.extension.is_none()
    }

    pub fn is_image(&self) -> bool {
        self.kind == ResourceType::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == ResourceType::Video
    }

    pub fn is_animation(&self) -> bool {
        self.kind == ResourceType::Animation
    }

    pub fn is_displayable(&self) -> bool {
        self.kind == ResourceType::Displayable
    }

    pub fn is_none(&self) -> bool {
        self.kind == ResourceType::None
    }

    fn cache_key(&self) -> (&str, bool) {
        match &self.content {
            Content::Reference(s) => (s, self.is_named()),
            Content::Object(obj) => (&obj.id, true),
        }
    }

    /// The content to hand the host as an image.
    pub fn image_content(&self, host: &dyn Host) -> Result<Content, ResourceError> {
        if !self.is_image() {
            return Err(ResourceError::Forbidden(self.kind));
        }
        match &self.content {
            Content::Reference(path) if !self.is_named() => {
                if host.is_loadable(path) {
                    Ok(self.content.clone())
                } else {
                    Err(ResourceError::NotLoadable(path.clone()))
                }
            }
            _ => Ok(self.content.clone()),
        }
    }

    /// Probe the pixel size if it is not known yet, recording it in the cache.
    pub fn force_load_size(
        &mut self,
        host: &dyn Host,
        cache: &mut SizeCache,
    ) -> Result<Size, ResourceError> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        let image = self.image_content(host)?;
        let size = host.probe_size(&image)?;
        self.size = Some(size);
        let (key, named) = self.cache_key();
        cache.put(key, size, named);
        Ok(size)
    }

    /// `target` adjusted to this resource's aspect ratio.
    pub fn size_to(&self, target: Size) -> Size {
        fit_within(self.size, target)
    }

    /// Scale to fit `target`, keeping the aspect ratio of images.
    pub fn scale_to(
        &mut self,
        target: Size,
        host: &dyn Host,
        cache: &mut SizeCache,
    ) -> Result<Presentation, ResourceError> {
        if self.is_displayable() {
            return Ok(Presentation::Scale {
                content: self.content.clone(),
                size: target,
            });
        }
        self.force_load_size(host, cache)?;
        let content = self.image_content(host)?;
        Ok(Presentation::Scale {
            content,
            size: self.size_to(target),
        })
    }

    /// Place the (letterboxed) content in a `target`-sized canvas, centered
    /// horizontally and top-aligned.
    pub fn composite_to(
        &mut self,
        target: Size,
        host: &dyn Host,
        cache: &mut SizeCache,
    ) -> Result<Presentation, ResourceError> {
        let (child, size) = if self.is_displayable() || self.is_animation() {
            (Presentation::Raw(self.content.clone()), target)
        } else {
            self.force_load_size(host, cache)?;
            let size = self.size_to(target);
            (self.scale_to(target, host, cache)?, size)
        };
        Ok(Presentation::Composite {
            canvas: target,
            x: center_offset(target, size),
            y: 0,
            child: Box::new(child),
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.content, self.kind)
    }
}

/// Arena of resources plus the deferred-name queue and the size cache.
#[derive(Debug, Default)]
pub struct ResourceResolver {
    resources: Vec<Resource>,
    deferred: Vec<ResourceId>,
    cache: SizeCache,
}

impl ResourceResolver {
    pub fn new(cache: SizeCache) -> Self {
        Self {
            resources: Vec::new(),
            deferred: Vec::new(),
            cache,
        }
    }

    /// Classify `content` and store it.
    ///
    /// An unregistered name is queued for [`load_all`](Self::load_all)
    /// unless `force_check` is set, in which case it is an error.
    pub fn resolve(
        &mut self,
        host: &dyn Host,
        content: impl Into<Content>,
        force_check: bool,
    ) -> Result<ResourceId, ResourceError> {
        let mut resource = Resource::unresolved(content.into(), force_check);
        let deferred = resource.load(force_check, host, &self.cache)?;
        let id = ResourceId(self.resources.len());
        self.resources.push(resource);
        if deferred {
            self.defer(id);
        }
        Ok(id)
    }

    /// Point an existing resource at new content and re-classify it.
    ///
    /// On failure the previous classification is kept.
    pub fn reassign(
        &mut self,
        host: &dyn Host,
        id: ResourceId,
        content: impl Into<Content>,
    ) -> Result<(), ResourceError> {
        let force_check = self.resources[id.0].force_check;
        let mut resource = Resource::unresolved(content.into(), force_check);
        let deferred = resource.load(force_check, host, &self.cache)?;
        self.resources[id.0] = resource;
        if deferred {
            self.defer(id);
        }
        Ok(())
    }

    /// Queue a resource for the deferred load. Only unresolved names qualify.
    pub fn defer(&mut self, id: ResourceId) -> bool {
        let resource = &self.resources[id.0];
        if resource.is_none() && resource.extension.is_none() && !self.deferred.contains(&id) {
            log::debug!("deferring resource '{}'", resource.content);
            self.deferred.push(id);
            return true;
        }
        false
    }

    pub fn deferred(&self) -> &[ResourceId] {
        &self.deferred
    }

    /// Resolve every queued name, in queue order, failing on missing names.
    ///
    /// The queue is empty afterwards even if a resource fails; the first
    /// failure is returned.
    pub fn load_all(&mut self, host: &dyn Host) -> Result<usize, ResourceError> {
        let queue = std::mem::take(&mut self.deferred);
        let count = queue.len();
        for id in queue {
            self.resources[id.0].load(true, host, &self.cache)?;
        }
        if count > 0 {
            log::info!("resolved {count} deferred resources");
        }
        Ok(count)
    }

    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn force_load_size(&mut self, host: &dyn Host, id: ResourceId) -> Result<Size, ResourceError> {
        self.resources[id.0].force_load_size(host, &mut self.cache)
    }

    pub fn size_to(&self, id: ResourceId, target: Size) -> Size {
        self.resources[id.0].size_to(target)
    }

    pub fn scale_to(
        &mut self,
        host: &dyn Host,
        id: ResourceId,
        target: Size,
    ) -> Result<Presentation, ResourceError> {
        self.resources[id.0].scale_to(target, host, &mut self.cache)
    }

    pub fn composite_to(
        &mut self,
        host: &dyn Host,
        id: ResourceId,
        target: Size,
    ) -> Result<Presentation, ResourceError> {
        self.resources[id.0].composite_to(target, host, &mut self.cache)
    }

    fn transient(&self, host: &dyn Host, content: Content) -> Result<Resource, ResourceError> {
        let mut resource = Resource::unresolved(content, false);
        resource.load(false, host, &self.cache)?;
        Ok(resource)
    }

    /// Composite content that should not be kept in the arena.
    pub fn composite_transient(
        &mut self,
        host: &dyn Host,
        content: impl Into<Content>,
        target: Size,
    ) -> Result<Presentation, ResourceError> {
        let mut resource = self.transient(host, content.into())?;
        resource.composite_to(target, host, &mut self.cache)
    }

    /// Scale content that should not be kept in the arena.
    pub fn scale_transient(
        &mut self,
        host: &dyn Host,
        content: impl Into<Content>,
        target: Size,
    ) -> Result<Presentation, ResourceError> {
        let mut resource = self.transient(host, content.into())?;
        resource.scale_to(target, host, &mut self.cache)
    }

    pub fn cache(&self) -> &SizeCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SizeCache {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::MockHost;

    fn resolver() -> ResourceResolver {
        ResourceResolver::new(SizeCache::in_memory())
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn image_path_is_image_with_cached_size() {
        let host = MockHost::new().with_image("cg/beach.png", Size::new(200, 100));
        let mut cache = SizeCache::in_memory();
        cache.put("cg/beach.png", Size::new(200, 100), false);
        let mut r = ResourceResolver::new(cache);

        let id = r.resolve(&host, "cg/beach.png", false).unwrap();
        let res = r.resource(id);
        assert_eq!(res.kind(), ResourceType::Image);
        assert_eq!(res.extension(), Some(".png"));
        assert_eq!(res.size(), Some(Size::new(200, 100)));
        assert!(!res.is_named());
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let host = MockHost::new().with_file("CG/BEACH.PNG");
        let mut r = resolver();
        let id = r.resolve(&host, "CG/BEACH.PNG", false).unwrap();
        assert!(r.resource(id).is_image());
    }

    #[test]
    fn unloadable_image_path_fails() {
        let host = MockHost::new();
        let err = resolver().resolve(&host, "missing.jpg", false).unwrap_err();
        assert!(matches!(err, ResourceError::NotLoadable(p) if p == "missing.jpg"));
    }

    #[test]
    fn video_path_is_video_without_size() {
        let host = MockHost::new().with_file("movies/op.webm");
        let mut r = resolver();
        let id = r.resolve(&host, "movies/op.webm", false).unwrap();
        assert!(r.resource(id).is_video());
        assert_eq!(r.resource(id).size(), None);
        assert!(matches!(
            resolver().resolve(&MockHost::new(), "movies/op.webm", false),
            Err(ResourceError::NotLoadable(_))
        ));
    }

    #[test]
    fn registered_names_classify_by_kind() {
        let host = MockHost::new()
            .with_registered("eileen happy", ObjectKind::Image)
            .with_registered("walk cycle", ObjectKind::Animation)
            .with_registered("title card", ObjectKind::Displayable);
        let mut r = resolver();

        let image = r.resolve(&host, "eileen happy", false).unwrap();
        let anim = r.resolve(&host, "walk cycle", false).unwrap();
        let disp = r.resolve(&host, "title card", false).unwrap();

        assert!(r.resource(image).is_image());
        assert!(r.resource(image).is_named());
        assert!(r.resource(anim).is_animation());
        assert!(r.resource(anim).is_named());
        assert!(r.resource(disp).is_displayable());
        assert!(r.deferred().is_empty());
    }

    #[test]
    fn unknown_extension_falls_back_to_name_lookup() {
        let host = MockHost::new().with_registered("notes.txt", ObjectKind::Displayable);
        let mut r = resolver();
        let id = r.resolve(&host, "notes.txt", false).unwrap();
        assert!(r.resource(id).is_displayable());
        assert_eq!(r.resource(id).extension(), None);
    }

    #[test]
    fn unsupported_object_fails() {
        let host = MockHost::new();
        let obj = HostObject::new("sfx", ObjectKind::Other("audio channel".into()));
        let err = resolver().resolve(&host, obj, false).unwrap_err();
        assert!(matches!(err, ResourceError::UnsupportedType(t) if t == "audio channel"));
    }

    #[test]
    fn object_image_uses_named_cache_entry() {
        let host = MockHost::new();
        let mut cache = SizeCache::in_memory();
        cache.put("portrait", Size::new(30, 60), true);
        let mut r = ResourceResolver::new(cache);
        let id = r
            .resolve(&host, HostObject::new("portrait", ObjectKind::Image), false)
            .unwrap();
        assert_eq!(r.resource(id).size(), Some(Size::new(30, 60)));
    }

    // =========================================================================
    // Deferred names
    // =========================================================================

    #[test]
    fn unregistered_name_is_deferred() {
        let host = MockHost::new();
        let mut r = resolver();
        let id = r.resolve(&host, "late image", false).unwrap();
        assert!(r.resource(id).is_none());
        assert_eq!(r.deferred(), &[id]);
    }

    #[test]
    fn forced_unregistered_name_fails() {
        let host = MockHost::new();
        let err = resolver().resolve(&host, "late image", true).unwrap_err();
        assert!(matches!(err, ResourceError::NameNotFound(n) if n == "late image"));
    }

    #[test]
    fn load_all_resolves_in_order_and_clears() {
        let host = MockHost::new();
        let mut r = resolver();
        let a = r.resolve(&host, "first", false).unwrap();
        let b = r.resolve(&host, "second", false).unwrap();
        assert_eq!(r.deferred(), &[a, b]);

        host.register("first", ObjectKind::Animation);
        host.register("second", ObjectKind::Image);
        assert_eq!(r.load_all(&host).unwrap(), 2);

        assert!(r.deferred().is_empty());
        assert!(r.resource(a).is_animation());
        assert!(r.resource(b).is_image());
    }

    #[test]
    fn load_all_reports_missing_name_and_still_clears() {
        let host = MockHost::new();
        let mut r = resolver();
        r.resolve(&host, "never registered", false).unwrap();
        assert!(matches!(
            r.load_all(&host),
            Err(ResourceError::NameNotFound(_))
        ));
        assert!(r.deferred().is_empty());
    }

    #[test]
    fn defer_rejects_resolved_resources() {
        let host = MockHost::new().with_file("a.png");
        let mut r = resolver();
        let id = r.resolve(&host, "a.png", false).unwrap();
        assert!(!r.defer(id));
        assert!(r.deferred().is_empty());
    }

    #[test]
    fn reassign_reclassifies() {
        let host = MockHost::new()
            .with_file("a.png")
            .with_file("b.webm");
        let mut r = resolver();
        let id = r.resolve(&host, "a.png", false).unwrap();
        r.reassign(&host, id, "b.webm").unwrap();
        assert!(r.resource(id).is_video());

        // A failing reassignment keeps the previous classification
        assert!(r.reassign(&host, id, "gone.png").is_err());
        assert!(r.resource(id).is_video());
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[test]
    fn force_load_size_probes_once_and_writes_cache() {
        let host = MockHost::new().with_image("a.png", Size::new(400, 200));
        let mut r = resolver();
        let id = r.resolve(&host, "a.png", false).unwrap();

        assert_eq!(r.force_load_size(&host, id).unwrap(), Size::new(400, 200));
        assert_eq!(r.force_load_size(&host, id).unwrap(), Size::new(400, 200));
        assert_eq!(host.probe_count(), 1);
        assert_eq!(r.cache().get("a.png", false), Some(Size::new(400, 200)));
        assert!(r.cache().is_dirty());
    }

    #[test]
    fn named_probe_is_cached_under_named_namespace() {
        let host = MockHost::new().with_registered("eileen", ObjectKind::Image);
        host.sizes.borrow_mut().insert("eileen".into(), Size::new(10, 20));
        let mut r = resolver();
        let id = r.resolve(&host, "eileen", false).unwrap();
        r.force_load_size(&host, id).unwrap();
        assert_eq!(r.cache().get("eileen", true), Some(Size::new(10, 20)));
        assert_eq!(r.cache().get("eileen", false), None);
    }

    #[test]
    fn size_to_without_size_is_target() {
        let host = MockHost::new().with_file("a.png");
        let mut r = resolver();
        let id = r.resolve(&host, "a.png", false).unwrap();
        assert_eq!(r.size_to(id, Size::new(300, 200)), Size::new(300, 200));
    }

    #[test]
    fn scale_to_letterboxes_images() {
        let host = MockHost::new().with_image("wide.png", Size::new(400, 100));
        let mut r = resolver();
        let id = r.resolve(&host, "wide.png", false).unwrap();
        let scaled = r.scale_to(&host, id, Size::new(300, 200)).unwrap();
        assert_eq!(
            scaled,
            Presentation::Scale {
                content: "wide.png".into(),
                size: Size::new(300, 75),
            }
        );
    }

    #[test]
    fn scale_to_stretches_displayables() {
        let host = MockHost::new().with_registered("card", ObjectKind::Displayable);
        let mut r = resolver();
        let id = r.resolve(&host, "card", false).unwrap();
        let scaled = r.scale_to(&host, id, Size::new(300, 200)).unwrap();
        assert_eq!(scaled.size(), Some(Size::new(300, 200)));
        assert_eq!(host.probe_count(), 0);
    }

    #[test]
    fn composite_centers_tall_image() {
        let host = MockHost::new().with_image("tall.png", Size::new(100, 200));
        let mut r = resolver();
        let id = r.resolve(&host, "tall.png", false).unwrap();
        let composite = r.composite_to(&host, id, Size::new(300, 200)).unwrap();
        match composite {
            Presentation::Composite { canvas, x, y, child } => {
                assert_eq!(canvas, Size::new(300, 200));
                assert_eq!((x, y), (100, 0));
                assert_eq!(child.size(), Some(Size::new(100, 200)));
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn composite_animation_uses_raw_content() {
        let host = MockHost::new().with_registered("walk", ObjectKind::Animation);
        let mut r = resolver();
        let id = r.resolve(&host, "walk", false).unwrap();
        let composite = r.composite_to(&host, id, Size::new(300, 200)).unwrap();
        assert!(matches!(
            composite,
            Presentation::Composite { x: 0, child, .. } if *child == Presentation::Raw("walk".into())
        ));
    }

    #[test]
    fn composite_video_is_forbidden() {
        let host = MockHost::new().with_file("op.webm");
        let mut r = resolver();
        let id = r.resolve(&host, "op.webm", false).unwrap();
        assert!(matches!(
            r.composite_to(&host, id, Size::new(10, 10)),
            Err(ResourceError::Forbidden(ResourceType::Video))
        ));
    }

    #[test]
    fn composite_transient_does_not_grow_arena() {
        let host = MockHost::new().with_image("thumb.jpg", Size::new(10, 10));
        let mut r = resolver();
        r.composite_transient(&host, "thumb.jpg", Size::new(20, 20))
            .unwrap();
        assert!(r.is_empty());
    }
}
