//! Navigation and pagination state.
//!
//! The [`Navigator`] tracks which slider is open, which slide of it is
//! selected and which page of that slide is shown:
//!
//! ```text
//! (current_slider, current_slide, page)     initial: (root, "", 0)
//!
//! change_slide("chapter")  slider → descend, select its first slide
//! change_slide("cg")       slide  → select it
//! back()                   not at root → ToParent
//!                          at root     → Exit
//! ```
//!
//! Transitions that the UI triggers later (buttons) are returned as
//! [`Action`] values instead of being run directly; the gallery applies them
//! in [`Gallery::perform`](crate::gallery::Gallery::perform).

use crate::config::LayoutConfig;
use crate::imaging::{page_window, thumbnail_box};
use crate::resources::Content;
use crate::slides::{ContentTree, NodeId};
use crate::types::{SharedSize, Size};
use std::ops::Range;

/// Distribution used when a requested value is below 1.
pub const DEFAULT_DISTRIBUTION: u32 = 4;

/// A deferred UI transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ChangePage(usize),
    ChangeSlide(String),
    ToParent,
    ToFirstSlide,
    /// Release loaded entries, reset the selection, flush the size cache and
    /// leave the gallery.
    Exit,
    SetTooltip(String),
    ChangeAnimationSpeed(u32),
    /// Show the full-screen entry of an item, with its song playing.
    ShowItem { item: String, song: Option<String> },
    PlayVideo { movie: Content, song: Option<String> },
    /// Does nothing (locked items).
    Null,
}

/// How the first slide of a slider is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideOrder {
    /// Sort names instead of using insertion order.
    pub sort: bool,
    /// Skip slides marked for animations (the speed screen lists them).
    pub skip_animations: bool,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current_slider: NodeId,
    current_name: String,
    page: usize,
    window: Range<usize>,
    columns: u32,
    rows: u32,
    thumbnail_size: SharedSize,
    tooltip: String,
}

impl Navigator {
    /// A navigator at `root` with no distribution yet (0×0).
    pub fn new(root: NodeId) -> Self {
        Self {
            current_slider: root,
            current_name: String::new(),
            page: 0,
            window: 0..0,
            columns: 0,
            rows: 0,
            thumbnail_size: SharedSize::default(),
            tooltip: String::new(),
        }
    }

    pub fn current_slider(&self) -> NodeId {
        self.current_slider
    }

    /// Name of the selected slide, empty when nothing is selected.
    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Item indices of the current page, as computed by the last [`update`](Self::update).
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn per_page(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn thumbnail_size(&self) -> &SharedSize {
        &self.thumbnail_size
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = tooltip.into();
    }

    pub fn current_names(&self, tree: &ContentTree) -> Vec<String> {
        tree.names(self.current_slider)
    }

    /// The selected slide node, if any.
    pub fn current_slide(&self, tree: &ContentTree) -> Option<NodeId> {
        tree.child(self.current_slider, &self.current_name)
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.current_name == name
    }

    pub fn is_current_for_animations(&self, tree: &ContentTree) -> bool {
        self.current_slide(tree)
            .is_some_and(|id| tree.is_for_animations(id))
    }

    /// Size of the child `name` of the current slider; 0 when absent.
    pub fn slide_size(&self, tree: &ContentTree, name: &str) -> usize {
        if name.is_empty() {
            return 0;
        }
        tree.child(self.current_slider, name)
            .map_or(0, |id| tree.size(id))
    }

    pub fn current_slide_size(&self, tree: &ContentTree) -> usize {
        self.slide_size(tree, &self.current_name)
    }

    /// Children of the current slider that are not empty.
    pub fn content_slides(&self, tree: &ContentTree) -> Vec<String> {
        self.current_names(tree)
            .into_iter()
            .filter(|name| self.slide_size(tree, name) > 0)
            .collect()
    }

    /// Select `name` in the current slider, descending when it is a slider.
    ///
    /// Unknown names are ignored. The page is reset either way.
    pub fn change_slide(&mut self, tree: &ContentTree, name: &str, order: SlideOrder) {
        let Some(child) = (!name.is_empty())
            .then(|| tree.child(self.current_slider, name))
            .flatten()
        else {
            return;
        };
        if tree.is_slider(child) {
            self.current_slider = child;
            self.to_first_slide(tree, order);
        } else {
            self.current_name = name.to_string();
        }
        self.page = 0;
    }

    /// Select the first eligible slide of the current slider, or nothing.
    pub fn to_first_slide(&mut self, tree: &ContentTree, order: SlideOrder) {
        let mut names = self.current_names(tree);
        if order.sort {
            names.sort();
        }
        let first = names.into_iter().find(|name| {
            tree.child(self.current_slider, name).is_some_and(|id| {
                tree.is_slide(id) && !(order.skip_animations && tree.is_for_animations(id))
            })
        });
        match first {
            Some(name) => self.change_slide(tree, &name, order),
            None => self.current_name.clear(),
        }
    }

    /// Open the parent of the current slider (the root stays the root).
    pub fn change_to_parent(&mut self, tree: &ContentTree, order: SlideOrder) {
        self.current_slider = tree.parent(self.current_slider).unwrap_or(tree.root());
        self.to_first_slide(tree, order);
    }

    /// What the back button does from here.
    pub fn back(&self, tree: &ContentTree, from_animation_options: bool) -> Action {
        if !from_animation_options && self.current_slider != tree.root() {
            return Action::ToParent;
        }
        if from_animation_options && self.is_current_for_animations(tree) {
            return Action::ToFirstSlide;
        }
        Action::Exit
    }

    pub fn change_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&self, tree: &ContentTree) -> Option<Action> {
        ((self.page + 1) * self.per_page() < self.current_slide_size(tree))
            .then(|| Action::ChangePage(self.page + 1))
    }

    pub fn previous_page(&self) -> Option<Action> {
        (self.page > 0).then(|| Action::ChangePage(self.page - 1))
    }

    /// Recompute the window of the current page.
    pub fn update(&mut self, tree: &ContentTree) -> Range<usize> {
        self.window = page_window(self.page, self.per_page(), self.current_slide_size(tree));
        self.window.clone()
    }

    /// Change the page grid and resize the shared thumbnail box.
    ///
    /// `None` keeps the current value; values below 1 fall back to
    /// [`DEFAULT_DISTRIBUTION`]. Returns whether anything changed.
    pub fn change_distribution(
        &mut self,
        columns: Option<i64>,
        rows: Option<i64>,
        screen: Size,
        layout: &LayoutConfig,
    ) -> bool {
        let clamp = |value: i64| {
            if value < 1 {
                DEFAULT_DISTRIBUTION
            } else {
                value.min(u32::MAX as i64) as u32
            }
        };
        let columns = columns.map_or(self.columns, clamp);
        let rows = rows.map_or(self.rows, clamp);
        if columns == self.columns && rows == self.rows {
            return false;
        }
        self.columns = columns;
        self.rows = rows;
        self.thumbnail_size.set(thumbnail_box(
            screen,
            layout.chrome_width(screen),
            layout.item_xspacing(screen),
            columns,
            rows,
        ));
        true
    }
}
