//! The hierarchical content model: sliders containing slides containing items.
//!
//! ```text
//! base (Slider)
//! ├── chapter one (Slider)
//! │   ├── cg (Slide)          → [Item, Item, ...]
//! │   └── animations (Slide, for animations)
//! └── extras (Slide)          → [Item, ...]
//! ```
//!
//! Nodes live in a [`ContentTree`] arena and refer to each other by
//! [`NodeId`]. A slider maps child names to ids in insertion order; a child's
//! `parent` is set exactly when it is put into a slider and always names that
//! slider. Nodes are never freed, so ids stay valid for the tree's lifetime.
//! A node created detached (via [`ContentTree::new_slide`] or a clone) simply
//! has no parent until it is put somewhere.

use crate::items::Item;
use indexmap::IndexMap;

/// Name of the root slider.
pub const ROOT_NAME: &str = "base";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    items: Vec<Item>,
    for_animations: bool,
}

impl Slide {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_for_animations(&self) -> bool {
        self.for_animations
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Named children in insertion order.
    Slider(IndexMap<String, NodeId>),
    Slide(Slide),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Number of children (slider) or items (slide).
    pub fn size(&self) -> usize {
        match &self.kind {
            NodeKind::Slider(children) => children.len(),
            NodeKind::Slide(slide) => slide.items.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.new_slider(ROOT_NAME);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent: None,
            kind,
        });
        id
    }

    /// A detached slide, ready to be filled and put.
    pub fn new_slide(&mut self, name: &str, for_animations: bool) -> NodeId {
        self.push(
            name,
            NodeKind::Slide(Slide {
                items: Vec::new(),
                for_animations,
            }),
        )
    }

    /// A detached, empty slider.
    pub fn new_slider(&mut self, name: &str) -> NodeId {
        self.push(name, NodeKind::Slider(IndexMap::new()))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn size(&self, id: NodeId) -> usize {
        self.nodes[id.0].size()
    }

    pub fn is_slider(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Slider(_))
    }

    pub fn is_slide(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Slide(_))
    }

    pub fn slide(&self, id: NodeId) -> Option<&Slide> {
        match &self.nodes[id.0].kind {
            NodeKind::Slide(slide) => Some(slide),
            NodeKind::Slider(_) => None,
        }
    }

    pub fn is_for_animations(&self, id: NodeId) -> bool {
        self.slide(id).is_some_and(Slide::is_for_animations)
    }

    fn children(&self, slider: NodeId) -> Option<&IndexMap<String, NodeId>> {
        match &self.nodes[slider.0].kind {
            NodeKind::Slider(children) => Some(children),
            NodeKind::Slide(_) => None,
        }
    }

    /// Child names of a slider in insertion order; empty for a slide.
    pub fn names(&self, slider: NodeId) -> Vec<String> {
        self.children(slider)
            .map(|children| children.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The child of `slider` called `name`.
    pub fn child(&self, slider: NodeId, name: &str) -> Option<NodeId> {
        self.children(slider)?.get(name).copied()
    }

    /// The item at `index` of a slide.
    pub fn item(&self, slide: NodeId, index: usize) -> Option<&Item> {
        self.slide(slide)?.items.get(index)
    }

    pub fn item_mut(&mut self, slide: NodeId, index: usize) -> Option<&mut Item> {
        match &mut self.nodes[slide.0].kind {
            NodeKind::Slide(s) => s.items.get_mut(index),
            NodeKind::Slider(_) => None,
        }
    }

    pub fn items(&self, slide: NodeId) -> &[Item] {
        self.slide(slide).map(Slide::items).unwrap_or_default()
    }

    /// Append an item to a slide. Returns false for a slider.
    pub fn put_item(&mut self, slide: NodeId, item: Item) -> bool {
        match &mut self.nodes[slide.0].kind {
            NodeKind::Slide(s) => {
                s.items.push(item);
                true
            }
            NodeKind::Slider(_) => false,
        }
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Put `child` into `slider`.
    ///
    /// Fails when `slider` is not a slider, when the name is already taken
    /// there, or when `slider` lies inside `child`. A child that already had
    /// another parent is moved.
    pub fn put(&mut self, slider: NodeId, child: NodeId) -> bool {
        let name = self.nodes[child.0].name.clone();
        match self.children(slider) {
            Some(children) if !children.contains_key(&name) => {}
            _ => return false,
        }
        if self.is_within(slider, child) {
            return false;
        }
        if let Some(old) = self.nodes[child.0].parent.take() {
            if let NodeKind::Slider(children) = &mut self.nodes[old.0].kind {
                children.shift_remove(&name);
            }
        }
        if let NodeKind::Slider(children) = &mut self.nodes[slider.0].kind {
            children.insert(name, child);
        }
        self.nodes[child.0].parent = Some(slider);
        true
    }

    /// Create a slide inside `slider`. `None` when the name is taken.
    pub fn create_slide(&mut self, slider: NodeId, name: &str, for_animations: bool) -> Option<NodeId> {
        if !self.can_take(slider, name) {
            return None;
        }
        let id = self.new_slide(name, for_animations);
        self.put(slider, id).then_some(id)
    }

    /// Create an empty slider inside `slider`. `None` when the name is taken.
    pub fn create_slider(&mut self, slider: NodeId, name: &str) -> Option<NodeId> {
        if !self.can_take(slider, name) {
            return None;
        }
        let id = self.new_slider(name);
        self.put(slider, id).then_some(id)
    }

    fn can_take(&self, slider: NodeId, name: &str) -> bool {
        self.children(slider)
            .is_some_and(|children| !children.contains_key(name))
    }

    /// Deep-copy `node` under a new name (the original's when `None`).
    ///
    /// Items are cloned and keep their resources and shared thumbnail size.
    /// With `include_parent` the copy is put into the original's parent,
    /// staying detached if the name is taken there.
    pub fn clone_subtree(&mut self, node: NodeId, name: Option<&str>, include_parent: bool) -> NodeId {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.nodes[node.0].name.clone(),
        };
        let copy = self.copy_detached(node, &name);
        if include_parent {
            if let Some(parent) = self.nodes[node.0].parent {
                self.put(parent, copy);
            }
        }
        copy
    }

    fn copy_detached(&mut self, node: NodeId, name: &str) -> NodeId {
        match self.nodes[node.0].kind.clone() {
            NodeKind::Slide(slide) => self.push(name, NodeKind::Slide(slide)),
            NodeKind::Slider(children) => {
                let copy = self.new_slider(name);
                for (child_name, child) in children {
                    let child_copy = self.copy_detached(child, &child_name);
                    self.put(copy, child_copy);
                }
                copy
            }
        }
    }

    /// Names from the root down to `node`, root excluded.
    pub fn path(&self, node: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            names.push(self.nodes[current.0].name.as_str());
            current = parent;
        }
        names.reverse();
        names
    }

    /// Follow a `/`-separated path of child names from the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.root, |node, segment| self.child(node, segment))
    }

    /// Every node reachable from the root, depth-first in insertion order.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::new();
        self.walk_from(self.root, 0, &mut out);
        out
    }

    fn walk_from(&self, node: NodeId, depth: usize, out: &mut Vec<(usize, NodeId)>) {
        out.push((depth, node));
        if let Some(children) = self.children(node) {
            for &child in children.values() {
                self.walk_from(child, depth + 1, out);
            }
        }
    }

    /// Every item reachable from `node`, in tree order.
    pub fn items_below(&self, node: NodeId) -> Vec<&Item> {
        match &self.nodes[node.0].kind {
            NodeKind::Slide(slide) => slide.items.iter().collect(),
            NodeKind::Slider(children) => children
                .values()
                .flat_map(|&child| self.items_below(child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::MockHost;
    use crate::resources::ResourceId;
    use crate::types::{SharedSize, Size};

    fn item(name: &str) -> Item {
        Item::new(name, ResourceId::from_index(0), SharedSize::new(Size::new(10, 10)))
    }

    // =========================================================================
    // put / create
    // =========================================================================

    #[test]
    fn new_tree_has_empty_root() {
        let tree = ContentTree::new();
        let root = tree.root();
        assert_eq!(tree.name(root), "base");
        assert!(tree.is_slider(root));
        assert_eq!(tree.size(root), 0);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn put_sets_parent_and_keeps_order() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let b = tree.new_slide("b", false);
        let a = tree.new_slider("a");

        assert!(tree.put(root, b));
        assert!(tree.put(root, a));
        assert_eq!(tree.names(root), vec!["b", "a"]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.child(root, "b"), Some(b));
    }

    #[test]
    fn put_same_name_twice_is_rejected() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let first = tree.new_slide("cg", false);
        let second = tree.new_slide("cg", false);

        assert!(tree.put(root, first));
        assert!(!tree.put(root, second));
        assert!(!tree.put(root, first));
        assert_eq!(tree.size(root), 1);
        assert_eq!(tree.child(root, "cg"), Some(first));
        assert_eq!(tree.parent(second), None);
    }

    #[test]
    fn put_into_slide_is_rejected() {
        let mut tree = ContentTree::new();
        let slide = tree.new_slide("cg", false);
        let other = tree.new_slide("x", false);
        assert!(!tree.put(slide, other));
    }

    #[test]
    fn put_refuses_cycles() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let outer = tree.create_slider(root, "outer").unwrap();
        let inner = tree.create_slider(outer, "inner").unwrap();

        assert!(!tree.put(inner, outer));
        assert!(!tree.put(outer, outer));
        assert_eq!(tree.parent(outer), Some(root));
    }

    #[test]
    fn put_moves_child_between_sliders() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let a = tree.create_slider(root, "a").unwrap();
        let b = tree.create_slider(root, "b").unwrap();
        let slide = tree.create_slide(a, "cg", false).unwrap();

        assert!(tree.put(b, slide));
        assert_eq!(tree.size(a), 0);
        assert_eq!(tree.child(b, "cg"), Some(slide));
        assert_eq!(tree.parent(slide), Some(b));
    }

    #[test]
    fn create_on_collision_returns_none() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let before = tree.nodes.len();
        assert!(tree.create_slide(root, "cg", true).is_some());
        assert!(tree.create_slider(root, "cg").is_none());
        assert!(tree.create_slide(root, "cg", false).is_none());
        assert_eq!(tree.nodes.len(), before + 1);
    }

    #[test]
    fn create_slide_marks_animations() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let anim = tree.create_slide(root, "anim", true).unwrap();
        assert!(tree.is_for_animations(anim));
        assert!(!tree.is_for_animations(root));
    }

    // =========================================================================
    // Items
    // =========================================================================

    #[test]
    fn items_by_index() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let slide = tree.create_slide(root, "cg", false).unwrap();
        assert!(tree.put_item(slide, item("gallery-0")));
        assert!(tree.put_item(slide, item("gallery-1")));
        assert!(!tree.put_item(root, item("gallery-2")));

        assert_eq!(tree.size(slide), 2);
        assert_eq!(tree.item(slide, 1).map(Item::name), Some("gallery-1"));
        assert!(tree.item(slide, 2).is_none());
        assert!(tree.item(root, 0).is_none());
    }

    // =========================================================================
    // clone_subtree
    // =========================================================================

    #[test]
    fn clone_slider_is_deep() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let ch = tree.create_slider(root, "chapter").unwrap();
        let slide = tree.create_slide(ch, "cg", false).unwrap();
        tree.put_item(slide, item("gallery-0"));

        let copy = tree.clone_subtree(ch, Some("chapter copy"), false);
        assert_eq!(tree.parent(copy), None);
        let copied_slide = tree.child(copy, "cg").unwrap();
        assert_ne!(copied_slide, slide);
        assert_eq!(tree.parent(copied_slide), Some(copy));
        assert_eq!(tree.size(copied_slide), 1);

        tree.put_item(copied_slide, item("gallery-1"));
        assert_eq!(tree.size(slide), 1);
    }

    #[test]
    fn clone_with_parent_joins_original_parent() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let slide = tree.create_slide(root, "cg", true).unwrap();

        let same_name = tree.clone_subtree(slide, None, true);
        assert_eq!(tree.parent(same_name), None);

        let renamed = tree.clone_subtree(slide, Some("cg 2"), true);
        assert_eq!(tree.parent(renamed), Some(root));
        assert!(tree.is_for_animations(renamed));
    }

    #[test]
    fn cloned_items_share_thumbnail_size() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let size = SharedSize::new(Size::new(10, 10));
        let slide = tree.create_slide(root, "cg", false).unwrap();
        tree.put_item(slide, Item::new("gallery-0", ResourceId::from_index(0), size.clone()));

        let copy = tree.clone_subtree(slide, Some("copy"), false);
        size.set(Size::new(20, 20));
        let copied = tree.item(copy, 0).unwrap();
        let thumb = copied.thumbnail(&MockHost::new(), ResourceId::from_index(0));
        assert_eq!(thumb.size(), Size::new(20, 20));
    }

    // =========================================================================
    // Navigation helpers
    // =========================================================================

    #[test]
    fn path_and_find() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let ch = tree.create_slider(root, "chapter").unwrap();
        let slide = tree.create_slide(ch, "cg", false).unwrap();

        assert_eq!(tree.path(slide), vec!["chapter", "cg"]);
        assert!(tree.path(root).is_empty());
        assert_eq!(tree.find("chapter/cg"), Some(slide));
        assert_eq!(tree.find(""), Some(root));
        assert_eq!(tree.find("chapter/missing"), None);
    }

    #[test]
    fn walk_is_depth_first() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let ch = tree.create_slider(root, "chapter").unwrap();
        let cg = tree.create_slide(ch, "cg", false).unwrap();
        let extras = tree.create_slide(root, "extras", false).unwrap();

        assert_eq!(tree.walk(), vec![(0, root), (1, ch), (2, cg), (1, extras)]);
    }

    #[test]
    fn items_below_collects_in_order() {
        let mut tree = ContentTree::new();
        let root = tree.root();
        let ch = tree.create_slider(root, "chapter").unwrap();
        let cg = tree.create_slide(ch, "cg", false).unwrap();
        let extras = tree.create_slide(root, "extras", false).unwrap();
        tree.put_item(cg, item("gallery-0"));
        tree.put_item(extras, item("gallery-1"));

        let names: Vec<_> = tree.items_below(root).iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["gallery-0", "gallery-1"]);
    }
}
