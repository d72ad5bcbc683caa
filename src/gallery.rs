//! The gallery context: one value per run owning the content tree, the
//! resource arena, the navigator and the presenter.
//!
//! # Lifecycle
//!
//! ```text
//! Gallery::new(host, config, cache)
//!   │  register content: put_item / create_slide / put_slide_like ...
//!   ▼
//! finalize_registration()      deferred names resolved, queue empty
//!   │
//!   ▼  per frame                per click
//! update() → page_buttons()    perform(action) → Effect
//!                                 Exit: release entries, reset selection,
//!                                       flush the size cache
//! ```
//!
//! Buttons carry [`Action`] values. The host hands a clicked action back to
//! [`Gallery::perform`], which applies navigation changes itself and returns
//! an [`Effect`] for what only the host can do (show an image, play a movie,
//! leave the gallery screen).

use crate::config::GalleryConfig;
use crate::host::{Host, Preferences};
use crate::imaging::Presentation;
use crate::items::{Item, ItemSpec};
use crate::navigation::{Action, Navigator, SlideOrder};
use crate::naming;
use crate::presenter::{GalleryEntry, Placeholders, Presenter, Renderer, Slot};
use crate::resources::{Content, ResourceError, ResourceId, ResourceResolver};
use crate::sizes::SizeCache;
use crate::slides::{ContentTree, NodeId};
use crate::types::{Size, SizeError};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Prefix of generated item names (`gallery-0`, `gallery-1`, ...).
pub const ITEM_PREFIX: &str = "gallery-";

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Size error: {0}")]
    Size(#[from] SizeError),
}

/// What the host must do after an action was performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Leave the gallery screen.
    Exit,
    /// Show an item full-screen.
    Show {
        entry: GalleryEntry,
        song: Option<String>,
        transition: String,
    },
    /// Play a movie, then come back.
    Play { movie: Content, song: Option<String> },
}

pub struct Gallery<H: Host> {
    host: H,
    config: GalleryConfig,
    tree: ContentTree,
    resolver: ResourceResolver,
    navigator: Navigator,
    presenter: Presenter,
    placeholders: Placeholders,
    custom_names: BTreeMap<String, String>,
    preferences: Preferences,
    transition: String,
    next_item: usize,
}

impl<H: Host> Gallery<H> {
    /// Build the gallery, resolving placeholders and applying the configured
    /// page distribution.
    pub fn new(host: H, config: GalleryConfig, cache: SizeCache) -> Result<Self, GalleryError> {
        let mut resolver = ResourceResolver::new(cache);
        let p = &config.placeholders;
        let placeholders = Placeholders {
            not_found: resolver.resolve(&host, p.not_found.as_str(), config.force_loader)?,
            play_hover: resolver.resolve(&host, p.play_hover.as_str(), config.force_loader)?,
            play_idle: resolver.resolve(&host, p.play_idle.as_str(), config.force_loader)?,
            idle: resolver.resolve(&host, p.idle.as_str(), config.force_loader)?,
            locked: resolver.resolve(&host, p.locked.as_str(), config.force_loader)?,
        };

        let tree = ContentTree::new();
        let mut navigator = Navigator::new(tree.root());
        navigator.change_distribution(
            Some(config.layout.columns.into()),
            Some(config.layout.rows.into()),
            host.screen_size(),
            &config.layout,
        );

        let mut preferences = host.load_preferences();
        preferences.animation_speed = preferences.animation_speed.max(1);

        Ok(Self {
            custom_names: config.names.clone(),
            transition: config.transition.clone(),
            host,
            config,
            tree,
            resolver,
            navigator,
            presenter: Presenter::new(),
            placeholders,
            preferences,
            next_item: 0,
        })
    }

    /// Build the gallery for a content root, loading the size cache from
    /// the configured `cache_file` under it.
    pub fn open(root: &Path, host: H, config: GalleryConfig) -> Result<Self, GalleryError> {
        let cache = SizeCache::load(root.join(&config.cache_file));
        Self::new(host, config, cache)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    /// Direct tree access, for assembling detached slides and sliders.
    pub fn tree_mut(&mut self) -> &mut ContentTree {
        &mut self.tree
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    fn order(&self) -> SlideOrder {
        SlideOrder {
            sort: self.config.sort_slides,
            skip_animations: self.preferences.with_speed,
        }
    }

    /// Split into the presenter, the tree and a renderer over the rest.
    fn parts(&mut self) -> (&mut Presenter, &ContentTree, Renderer<'_>) {
        let renderer = Renderer {
            host: &self.host,
            resolver: &mut self.resolver,
            config: &self.config,
            placeholders: &self.placeholders,
            thumbnail_size: self.navigator.thumbnail_size().get(),
        };
        (&mut self.presenter, &self.tree, renderer)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Create an item with the next generated name. It is not put anywhere.
    pub fn create_item(&mut self, spec: ItemSpec) -> Result<Item, GalleryError> {
        if spec.resource.as_reference().is_some_and(str::is_empty) {
            return Err(GalleryError::Validation(
                "cannot create an item from an empty resource".into(),
            ));
        }
        let force = self.config.force_loader;
        let resource = self.resolver.resolve(&self.host, spec.resource, force)?;
        let name = format!("{ITEM_PREFIX}{}", self.next_item);
        let mut item = Item::new(name, resource, self.navigator.thumbnail_size().clone())
            .with_song(&self.host, spec.song.as_deref())
            .with_condition(spec.condition.as_deref())
            .with_tooltip(spec.tooltip.as_deref());
        item.thumbnail_mut()
            .set_custom(&mut self.resolver, &self.host, spec.thumbnail, force)?;
        self.next_item += 1;
        Ok(item)
    }

    /// Put an existing item into the root-level slide `slide`, creating the
    /// slide when it does not exist yet.
    pub fn insert_item(&mut self, slide: &str, item: Item, for_animation_slide: bool) -> Result<NodeId, GalleryError> {
        if slide.is_empty() {
            return Err(GalleryError::Validation(
                "cannot put an item in a slide without a name".into(),
            ));
        }
        let root = self.tree.root();
        let id = match self.tree.child(root, slide) {
            Some(id) if self.tree.is_slide(id) => id,
            Some(_) => {
                return Err(GalleryError::Validation(format!(
                    "'{slide}' is a slider, items go into slides"
                )));
            }
            None => self
                .tree
                .create_slide(root, slide, for_animation_slide)
                .ok_or_else(|| GalleryError::Validation(format!("cannot create slide '{slide}'")))?,
        };
        self.tree.put_item(id, item);
        Ok(id)
    }

    /// Create an item from `spec` and put it into the root-level slide `slide`.
    pub fn put_item(&mut self, slide: &str, spec: ItemSpec, for_animation_slide: bool) -> Result<NodeId, GalleryError> {
        if slide.is_empty() {
            return Err(GalleryError::Validation(
                "cannot put an item in a slide without a name".into(),
            ));
        }
        let item = self.create_item(spec)?;
        self.insert_item(slide, item, for_animation_slide)
    }

    /// Create a slide under the root. `None` on an empty or taken name.
    pub fn create_slide(&mut self, name: &str, for_animations: bool) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }
        let root = self.tree.root();
        self.tree.create_slide(root, name, for_animations)
    }

    /// Create a slider under the root. `None` on an empty or taken name.
    pub fn create_slider(&mut self, name: &str) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }
        let root = self.tree.root();
        self.tree.create_slider(root, name)
    }

    /// Put a slide or slider (built with [`tree_mut`](Self::tree_mut)) under the root.
    pub fn put_slide_like(&mut self, node: NodeId) -> bool {
        let root = self.tree.root();
        self.tree.put(root, node)
    }

    /// Resolve every deferred name; call once all content is registered.
    ///
    /// With `load_in_put`, every full-screen entry is built here too.
    pub fn finalize_registration(&mut self) -> Result<usize, GalleryError> {
        let resolved = self.resolver.load_all(&self.host)?;
        if self.config.load_in_put {
            self.load_entries()?;
        }
        log::info!(
            "gallery registration finalized: {} items, {resolved} deferred resources",
            self.tree.items_below(self.tree.root()).len()
        );
        Ok(resolved)
    }

    fn load_entries(&mut self) -> Result<usize, GalleryError> {
        let root = self.tree.root();
        let (presenter, tree, mut renderer) = self.parts();
        Ok(presenter.load_tree(tree, root, &mut renderer)?)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn change_slide(&mut self, name: &str) {
        let order = self.order();
        self.navigator.change_slide(&self.tree, name, order);
    }

    /// The action that selects `name` in the current slider.
    pub fn change_slide_to(&self, name: &str) -> Action {
        Action::ChangeSlide(name.to_string())
    }

    pub fn to_first_slide(&mut self) {
        let order = self.order();
        self.navigator.to_first_slide(&self.tree, order);
    }

    pub fn back(&self, from_animation_options: bool) -> Action {
        self.navigator.back(&self.tree, from_animation_options)
    }

    pub fn next_page(&self) -> Option<Action> {
        self.navigator.next_page(&self.tree)
    }

    pub fn previous_page(&self) -> Option<Action> {
        self.navigator.previous_page()
    }

    /// Names in the current slider.
    pub fn current_slides(&self) -> Vec<String> {
        self.navigator.current_names(&self.tree)
    }

    /// Names in the current slider that have content.
    pub fn content_slides(&self) -> Vec<String> {
        self.navigator.content_slides(&self.tree)
    }

    pub fn current_slide_name(&self) -> &str {
        self.navigator.current_name()
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.navigator.is_current(name)
    }

    pub fn is_for_animations(&self) -> bool {
        self.navigator.is_current_for_animations(&self.tree)
    }

    pub fn tooltip(&self) -> &str {
        self.navigator.tooltip()
    }

    /// `(columns, rows)` of the page grid.
    pub fn distribution(&self) -> (u32, u32) {
        (self.navigator.columns(), self.navigator.rows())
    }

    pub fn thumbnail_size(&self) -> Size {
        self.navigator.thumbnail_size().get()
    }

    pub fn screen_size(&self) -> Size {
        self.host.screen_size()
    }

    /// Recompute the page window, reloading released entries first.
    pub fn update(&mut self) -> Result<Range<usize>, GalleryError> {
        if self.presenter.ensure_loaded(self.config.keep_loaded) && self.config.load_in_put {
            self.load_entries()?;
        }
        Ok(self.navigator.update(&self.tree))
    }

    /// Slots of the current page, as windowed by the last [`update`](Self::update).
    pub fn page_buttons(&mut self) -> Result<Vec<Slot>, GalleryError> {
        let slide = self.navigator.current_slide(&self.tree);
        let window = self.navigator.window();
        let per_page = self.navigator.per_page();
        let (presenter, tree, mut renderer) = self.parts();
        Ok(presenter.page(tree, slide, window, per_page, &mut renderer)?)
    }

    /// Apply an action produced by a button, a page control or [`back`](Self::back).
    pub fn perform(&mut self, action: Action) -> Result<Effect, GalleryError> {
        let order = self.order();
        match action {
            Action::ChangePage(page) => self.navigator.change_page(page),
            Action::ChangeSlide(name) => self.navigator.change_slide(&self.tree, &name, order),
            Action::ToParent => self.navigator.change_to_parent(&self.tree, order),
            Action::ToFirstSlide => self.navigator.to_first_slide(&self.tree, order),
            Action::Exit => return Ok(self.exit()),
            Action::SetTooltip(tooltip) => self.navigator.set_tooltip(tooltip),
            Action::ChangeAnimationSpeed(speed) => self.set_animation_speed(speed),
            Action::ShowItem { item, song } => return self.show(&item, song),
            Action::PlayVideo { movie, song } => return Ok(Effect::Play { movie, song }),
            Action::Null => {}
        }
        Ok(Effect::None)
    }

    fn exit(&mut self) -> Effect {
        self.presenter.release(self.config.keep_loaded);
        self.to_first_slide();
        self.resolver.cache_mut().save();
        log::debug!("gallery exited");
        Effect::Exit
    }

    fn show(&mut self, name: &str, song: Option<String>) -> Result<Effect, GalleryError> {
        if !self.presenter.contains(name) {
            let root = self.tree.root();
            let item = self
                .tree
                .items_below(root)
                .into_iter()
                .find(|item| item.name() == name)
                .cloned();
            let Some(item) = item else {
                return Ok(Effect::None);
            };
            let (presenter, _, mut renderer) = self.parts();
            presenter.add_entry(&item, &mut renderer)?;
        }
        Ok(match self.presenter.entry(name) {
            Some(entry) => Effect::Show {
                entry: entry.clone(),
                song,
                transition: self.transition.clone(),
            },
            None => Effect::None,
        })
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Change the page grid. See [`Navigator::change_distribution`].
    pub fn change_distribution(&mut self, columns: Option<i64>, rows: Option<i64>) -> bool {
        let screen = self.host.screen_size();
        self.navigator
            .change_distribution(columns, rows, screen, &self.config.layout)
    }

    pub fn change_transition(&mut self, transition: impl Into<String>) {
        self.transition = transition.into();
    }

    pub fn transition(&self) -> &str {
        &self.transition
    }

    /// Replace the locked placeholder.
    pub fn change_locked(&mut self, content: impl Into<Content>) -> Result<(), GalleryError> {
        self.resolver
            .reassign(&self.host, self.placeholders.locked, content)?;
        Ok(())
    }

    /// Set the display name of slides called `slide`. Empty values are ignored.
    pub fn custom_name_for(&mut self, slide: &str, name: &str) {
        if !slide.is_empty() && !name.is_empty() {
            self.custom_names.insert(slide.to_string(), name.to_string());
        }
    }

    pub fn name_for(&self, slide: &str) -> String {
        naming::display_name(slide, &self.custom_names)
    }

    /// Scale any content to the thumbnail box.
    pub fn scale(&mut self, content: impl Into<Content>) -> Result<Presentation, GalleryError> {
        let target = self.thumbnail_size();
        Ok(self
            .resolver
            .scale_transient(&self.host, content, target)?)
    }

    pub fn with_speed(&self) -> bool {
        self.preferences.with_speed
    }

    pub fn set_with_speed(&mut self, with_speed: bool) {
        self.preferences.with_speed = with_speed;
        self.host.store_preferences(&self.preferences);
    }

    pub fn animation_speed(&self) -> u32 {
        self.preferences.animation_speed
    }

    /// Set the animation speed, at least 1.
    pub fn set_animation_speed(&mut self, speed: u32) {
        self.preferences.animation_speed = speed.max(1);
        self.host.store_preferences(&self.preferences);
    }

    /// Action raising the speed by one, unless it is already at `max`.
    pub fn increase_animation_speed(&self, max: u32) -> Option<Action> {
        let speed = self.animation_speed();
        (speed < max).then(|| Action::ChangeAnimationSpeed(speed + 1))
    }

    /// Action lowering the speed by one, unless it is already at `min`.
    pub fn decrease_animation_speed(&self, min: u32) -> Option<Action> {
        let speed = self.animation_speed();
        (speed > min.max(1)).then(|| Action::ChangeAnimationSpeed(speed - 1))
    }

    /// Flush the size cache if it changed.
    pub fn save_cache(&mut self) {
        self.resolver.cache_mut().save();
    }
}
