//! Page slots and the full-screen entry registry.
//!
//! A page is always `columns × rows` [`Slot`]s: one per item in the page
//! window, padded with [`Slot::Empty`]. Each item becomes an [`ItemButton`]
//! carrying everything the host needs to draw and wire it:
//!
//! | Resource | Idle border | Hover border | Click |
//! |---|---|---|---|
//! | Image, Displayable | `idle` | none | [`Action::ShowItem`] |
//! | Video | `play_idle` | `play_hover` | [`Action::PlayVideo`] |
//! | Animation | `play_idle` | `play_hover` | [`Action::ShowItem`] |
//! | locked (condition unmet) | as above | as above | [`Action::Null`] |
//!
//! ## Full-screen entries
//!
//! Showing an item needs its full-screen view. Entries are built lazily the
//! first time a button is built, or all at once when `load_in_put` is set.
//! Leaving the gallery releases them unless `keep_loaded` is set; the next
//! [`Presenter::ensure_loaded`] starts over with an empty registry.

use crate::config::GalleryConfig;
use crate::host::Host;
use crate::imaging::Presentation;
use crate::items::{Item, playable_song};
use crate::navigation::Action;
use crate::resources::{ResourceError, ResourceId, ResourceResolver};
use crate::slides::{ContentTree, NodeId};
use crate::types::Size;
use indexmap::IndexMap;
use std::ops::Range;

/// Resolved placeholder resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    pub not_found: ResourceId,
    pub play_hover: ResourceId,
    pub play_idle: ResourceId,
    pub idle: ResourceId,
    pub locked: ResourceId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemButton {
    pub item: String,
    pub thumbnail: Presentation,
    pub idle_border: Presentation,
    pub hover_border: Option<Presentation>,
    pub action: Action,
    pub hovered: Action,
    pub unhovered: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Button(ItemButton),
    /// An item that cannot be shown (unresolved resource).
    Inert,
    /// Padding after the last item of the page.
    Empty,
}

impl Slot {
    pub fn button(&self) -> Option<&ItemButton> {
        match self {
            Slot::Button(button) => Some(button),
            Slot::Inert | Slot::Empty => None,
        }
    }
}

/// The full-screen view of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub image: Presentation,
    pub condition: Option<String>,
}

/// Borrowed view of everything a page build needs.
pub struct Renderer<'a> {
    pub host: &'a dyn Host,
    pub resolver: &'a mut ResourceResolver,
    pub config: &'a GalleryConfig,
    pub placeholders: &'a Placeholders,
    pub thumbnail_size: Size,
}

impl Renderer<'_> {
    /// Scale a resource to the thumbnail box.
    pub fn scale(&mut self, id: ResourceId) -> Result<Presentation, ResourceError> {
        self.resolver.scale_to(self.host, id, self.thumbnail_size)
    }

    fn entry_for(&mut self, item: &Item) -> Result<GalleryEntry, ResourceError> {
        let resource = self.resolver.resource(item.resource());
        let image = if resource.is_image() && self.config.rescale_images {
            self.resolver
                .composite_to(self.host, item.resource(), self.host.screen_size())?
        } else {
            Presentation::Raw(resource.content().clone())
        };
        Ok(GalleryEntry {
            image,
            condition: item.condition().filter(|c| !c.is_empty()).map(str::to_string),
        })
    }
}

#[derive(Debug, Default)]
pub struct Presenter {
    entries: IndexMap<String, GalleryEntry>,
    released: bool,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, item: &str) -> Option<&GalleryEntry> {
        self.entries.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Build (or rebuild) the entry of `item`. Unresolved items are skipped.
    pub fn add_entry(&mut self, item: &Item, renderer: &mut Renderer<'_>) -> Result<(), ResourceError> {
        if renderer.resolver.resource(item.resource()).is_none() {
            return Ok(());
        }
        let entry = renderer.entry_for(item)?;
        self.entries.insert(item.name().to_string(), entry);
        Ok(())
    }

    /// Build the entries of every item below `node`.
    pub fn load_tree(
        &mut self,
        tree: &ContentTree,
        node: NodeId,
        renderer: &mut Renderer<'_>,
    ) -> Result<usize, ResourceError> {
        let items = tree.items_below(node);
        for item in &items {
            self.add_entry(item, renderer)?;
        }
        log::debug!("loaded {} gallery entries", items.len());
        Ok(items.len())
    }

    /// Drop all entries on gallery exit, unless they are kept loaded.
    pub fn release(&mut self, keep_loaded: bool) {
        if keep_loaded {
            return;
        }
        self.entries.clear();
        self.released = true;
    }

    /// Start a fresh registry after a release. Returns whether one was
    /// started, in which case a `load_in_put` gallery must bulk-load again.
    pub fn ensure_loaded(&mut self, keep_loaded: bool) -> bool {
        if !self.released || keep_loaded {
            return false;
        }
        self.entries.clear();
        self.released = false;
        true
    }

    /// Build the button of `item`, registering its entry when needed.
    pub fn make_button(&mut self, item: &Item, renderer: &mut Renderer<'_>) -> Result<Slot, ResourceError> {
        let resource = renderer.resolver.resource(item.resource());
        if resource.is_none() {
            return Ok(Slot::Inert);
        }
        let shown_as_image = resource.is_image() || resource.is_displayable();
        let is_video = resource.is_video();
        let movie = resource.content().clone();

        let config = renderer.config;
        if !config.load_in_put && (!config.keep_loaded || !self.contains(item.name())) {
            self.add_entry(item, renderer)?;
        }

        let placeholders = *renderer.placeholders;
        let (idle_border, hover_border) = if shown_as_image {
            (renderer.scale(placeholders.idle)?, None)
        } else {
            (
                renderer.scale(placeholders.play_idle)?,
                Some(renderer.scale(placeholders.play_hover)?),
            )
        };

        let thumbnail = item.thumbnail(renderer.host, placeholders.locked).create(
            renderer.resolver,
            renderer.host,
            &config.thumbnails_folder,
            placeholders.not_found,
        )?;

        let song = playable_song(renderer.host, item.song());
        let action = if !item.meets_condition(renderer.host) {
            Action::Null
        } else if is_video {
            Action::PlayVideo { movie, song }
        } else {
            Action::ShowItem {
                item: item.name().to_string(),
                song,
            }
        };

        Ok(Slot::Button(ItemButton {
            item: item.name().to_string(),
            thumbnail,
            idle_border,
            hover_border,
            action,
            hovered: Action::SetTooltip(item.tooltip().to_string()),
            unhovered: Action::SetTooltip(String::new()),
        }))
    }

    /// The slots of one page of `slide`: buttons for `window`, then padding.
    pub fn page(
        &mut self,
        tree: &ContentTree,
        slide: Option<NodeId>,
        window: Range<usize>,
        per_page: usize,
        renderer: &mut Renderer<'_>,
    ) -> Result<Vec<Slot>, ResourceError> {
        let mut slots = Vec::with_capacity(per_page);
        for index in window {
            let slot = match slide.and_then(|id| tree.item(id, index)) {
                Some(item) => self.make_button(item, renderer)?,
                None => Slot::Inert,
            };
            slots.push(slot);
        }
        while slots.len() < per_page {
            slots.push(Slot::Empty);
        }
        Ok(slots)
    }
}
