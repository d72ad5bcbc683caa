//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (slider,
//! slide, item, page slot) leads with its positional index and display name;
//! resource paths are secondary context on indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Tree
//!
//! ```text
//! Gallery (4x4, thumbnails 362x203)
//! 001 Chapter one
//!     001 Cg (2 items)
//!         001 beach
//!             Source: 010-Chapter-One/010-cg/001-beach.png
//!         002 (002-night.png)
//!             Song: 010-Chapter-One/010-cg/002-night.ogg
//!     002 Movies (1 item)
//!         001 (op.webm) [video]
//! 002 Extras (1 item)
//! ```
//!
//! ## Page
//!
//! ```text
//! Chapter one / Cg: page 1 of 1 (4x4)
//! 001 gallery-0 → show
//!     Thumbnail: [362x203 +0+0] 010-Chapter-One/010-cg/001-beach.png @ 362x203
//! 002 gallery-1 → show with 010-Chapter-One/010-cg/002-night.ogg
//! 003 empty
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::gallery::{Effect, Gallery};
use crate::host::Host;
use crate::items::Item;
use crate::navigation::Action;
use crate::presenter::Slot;
use crate::resources::ResourceType;
use crate::slides::NodeId;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name, with optional item count.
///
/// ```text
/// 001 Extras (5 items)
/// 001 Chapter one
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 item)", format_index(index), name),
        Some(n) => format!("{} {} ({} items)", format_index(index), name, n),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Format an item line: items with a tooltip show it, others show the file name.
///
/// ```text
/// 001 The Beach         // tooltip
/// 001 (op.webm)         // no tooltip, the file name is the identity
/// ```
fn item_line(index: usize, tooltip: Option<&str>, filename: &str) -> String {
    match tooltip {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), filename),
    }
}

/// Describe what clicking a button does.
fn format_action(action: &Action) -> String {
    match action {
        Action::ShowItem { song: Some(song), .. } => format!("show with {song}"),
        Action::ShowItem { song: None, .. } => "show".to_string(),
        Action::PlayVideo { song: Some(song), .. } => format!("play with {song}"),
        Action::PlayVideo { song: None, .. } => "play".to_string(),
        Action::Null => "locked".to_string(),
        other => format!("{other:?}"),
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Format the whole content tree, sliders first-level and down.
pub fn format_tree<H: Host>(gallery: &Gallery<H>) -> Vec<String> {
    let (columns, rows) = gallery.distribution();
    let mut lines = vec![format!(
        "Gallery ({}x{}, thumbnails {})",
        columns,
        rows,
        gallery.thumbnail_size()
    )];
    let tree = gallery.tree();
    let root = tree.root();
    for (i, name) in tree.names(root).iter().enumerate() {
        if let Some(id) = tree.child(root, name) {
            format_node(gallery, id, 0, i + 1, &mut lines);
        }
    }
    if lines.len() == 1 {
        lines.push("    (empty)".to_string());
    }
    lines
}

fn format_node<H: Host>(
    gallery: &Gallery<H>,
    node: NodeId,
    depth: usize,
    position: usize,
    lines: &mut Vec<String>,
) {
    let tree = gallery.tree();
    let base_indent = indent(depth);
    let name = gallery.name_for(tree.name(node));

    if tree.is_slider(node) {
        lines.push(format!("{}{}", base_indent, entity_header(position, &name, None)));
        for (i, child_name) in tree.names(node).iter().enumerate() {
            if let Some(child) = tree.child(node, child_name) {
                format_node(gallery, child, depth + 1, i + 1, lines);
            }
        }
        return;
    }

    let items = tree.items(node);
    let mut header = entity_header(position, &name, Some(items.len()));
    if tree.is_for_animations(node) {
        header.push_str(" [animations]");
    }
    lines.push(format!("{}{}", base_indent, header));
    for (i, item) in items.iter().enumerate() {
        format_item(gallery, item, depth + 1, i + 1, lines);
    }
}

fn format_item<H: Host>(
    gallery: &Gallery<H>,
    item: &Item,
    depth: usize,
    position: usize,
    lines: &mut Vec<String>,
) {
    let item_indent = indent(depth);
    let resource = gallery.resolver().resource(item.resource());
    let source = resource.content().to_string();
    let filename = source.rsplit('/').next().unwrap_or(&source);
    let tooltip = Some(item.tooltip()).filter(|t| !t.is_empty());

    let mut header = item_line(position, tooltip, filename);
    match resource.kind() {
        ResourceType::Image => {}
        kind => header.push_str(&format!(" [{kind}]")),
    }
    lines.push(format!("{}{}", item_indent, header));

    // Source is implicit in the header when there is no tooltip
    if tooltip.is_some() {
        lines.push(format!("{}    Source: {}", item_indent, source));
    }
    if let Some(song) = item.song() {
        lines.push(format!("{}    Song: {}", item_indent, song));
    }
    if let Some(condition) = item.condition()
        && !item.meets_condition(gallery.host())
    {
        lines.push(format!("{}    Locked: {}", item_indent, condition));
    }
}

/// Print the content tree to stdout.
pub fn print_tree<H: Host>(gallery: &Gallery<H>) {
    for line in format_tree(gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// Page
// ============================================================================

/// Format the slots of the current page.
pub fn format_page<H: Host>(gallery: &Gallery<H>, slots: &[Slot]) -> Vec<String> {
    let navigator = gallery.navigator();
    let tree = gallery.tree();
    let current = gallery.current_slide_name();
    if current.is_empty() {
        return vec!["No slide selected".to_string()];
    }

    let mut path: Vec<String> = tree
        .path(navigator.current_slider())
        .into_iter()
        .map(|name| gallery.name_for(name))
        .collect();
    path.push(gallery.name_for(current));

    let total = navigator.current_slide_size(tree);
    let pages = total.div_ceil(navigator.per_page().max(1)).max(1);
    let (columns, rows) = gallery.distribution();
    let mut lines = vec![format!(
        "{}: page {} of {} ({}x{})",
        path.join(" / "),
        navigator.page() + 1,
        pages,
        columns,
        rows
    )];

    for (i, slot) in slots.iter().enumerate() {
        match slot {
            Slot::Button(button) => {
                lines.push(format!(
                    "{} {} → {}",
                    format_index(i + 1),
                    button.item,
                    format_action(&button.action)
                ));
                lines.push(format!("    Thumbnail: {}", button.thumbnail));
            }
            Slot::Inert => lines.push(format!("{} unavailable", format_index(i + 1))),
            Slot::Empty => lines.push(format!("{} empty", format_index(i + 1))),
        }
    }
    lines
}

/// Print the current page to stdout.
pub fn print_page<H: Host>(gallery: &Gallery<H>, slots: &[Slot]) {
    for line in format_page(gallery, slots) {
        println!("{}", line);
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Format what the host is asked to do after a click.
pub fn format_effect(effect: &Effect) -> Vec<String> {
    match effect {
        Effect::None => vec!["Nothing happens".to_string()],
        Effect::Exit => vec!["Leave the gallery".to_string()],
        Effect::Show {
            entry,
            song,
            transition,
        } => {
            let mut lines = vec![format!("Show ({transition})"), format!("    Image: {}", entry.image)];
            if let Some(song) = song {
                lines.push(format!("    Song: {song}"));
            }
            if let Some(condition) = &entry.condition {
                lines.push(format!("    Condition: {condition}"));
            }
            lines
        }
        Effect::Play { movie, song } => {
            let mut lines = vec![format!("Play {movie}")];
            if let Some(song) = song {
                lines.push(format!("    Then: {song}"));
            }
            lines
        }
    }
}

pub fn print_effect(effect: &Effect) {
    for line in format_effect(effect) {
        println!("{}", line);
    }
}

// ============================================================================
// Cache warming
// ============================================================================

/// Outcome of a `warm` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmReport {
    pub images: usize,
    pub already_cached: usize,
    pub probed: usize,
    pub failed: usize,
}

/// Format the summary line of a `warm` run.
pub fn format_warm(report: &WarmReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Warmed size cache: {} images, {} already cached, {} probed",
        report.images, report.already_cached, report.probed
    )];
    if report.failed > 0 {
        lines.push(format!("    {} images could not be decoded", report.failed));
    }
    lines
}

pub fn print_warm(report: &WarmReport) {
    for line in format_warm(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::host::tests::MockHost;
    use crate::host::ObjectKind;
    use crate::items::ItemSpec;
    use crate::sizes::SizeCache;
    use crate::types::Size;

    fn placeholder_host() -> MockHost {
        let p = crate::config::PlaceholdersConfig::default();
        [&p.not_found, &p.play_hover, &p.play_idle, &p.idle, &p.locked]
            .into_iter()
            .fold(MockHost::new(), |host, path| host.with_image(path, Size::new(30, 20)))
    }

    fn gallery() -> Gallery<MockHost> {
        let host = placeholder_host()
            .with_image("cg/beach.png", Size::new(1920, 1080))
            .with_image("cg/night.png", Size::new(1920, 1080))
            .with_file("movies/op.webm")
            .with_file("bgm/theme.ogg")
            .with_registered("walk", ObjectKind::Animation);
        let mut g = Gallery::new(host, GalleryConfig::default(), SizeCache::in_memory()).unwrap();
        let chapter = g.create_slider("chapter").unwrap();
        let cg = g.tree_mut().create_slide(chapter, "cg", false).unwrap();
        let beach = g
            .create_item(ItemSpec::new("cg/beach.png").tooltip("The Beach"))
            .unwrap();
        let night = g
            .create_item(
                ItemSpec::new("cg/night.png")
                    .song("bgm/theme.ogg")
                    .condition("seen_night"),
            )
            .unwrap();
        g.tree_mut().put_item(cg, beach);
        g.tree_mut().put_item(cg, night);
        g.put_item("movies", ItemSpec::new("movies/op.webm"), false)
            .unwrap();
        g.put_item("anim", ItemSpec::new("walk"), true).unwrap();
        g.custom_name_for("chapter", "Chapter I");
        g
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_counts() {
        assert_eq!(entity_header(1, "Cg", Some(1)), "001 Cg (1 item)");
        assert_eq!(entity_header(2, "Cg", Some(5)), "002 Cg (5 items)");
        assert_eq!(entity_header(3, "Chapter", None), "003 Chapter");
    }

    #[test]
    fn item_line_tooltip_or_filename() {
        assert_eq!(item_line(1, Some("The Beach"), "beach.png"), "001 The Beach");
        assert_eq!(item_line(1, Some(""), "beach.png"), "001 (beach.png)");
        assert_eq!(item_line(2, None, "op.webm"), "002 (op.webm)");
    }

    #[test]
    fn action_descriptions() {
        assert_eq!(format_action(&Action::Null), "locked");
        assert_eq!(
            format_action(&Action::ShowItem {
                item: "gallery-0".into(),
                song: Some("bgm/a.ogg".into())
            }),
            "show with bgm/a.ogg"
        );
        assert_eq!(
            format_action(&Action::PlayVideo {
                movie: "op.webm".into(),
                song: None
            }),
            "play"
        );
    }

    // =========================================================================
    // Tree
    // =========================================================================

    #[test]
    fn tree_lists_nodes_and_items() {
        let g = gallery();
        let lines = format_tree(&g);
        assert_eq!(lines[0], "Gallery (4x4, thumbnails 362x203)");
        assert_eq!(
            &lines[1..],
            &[
                "001 Chapter I",
                "    001 Cg (2 items)",
                "        001 The Beach",
                "            Source: cg/beach.png",
                "        002 (night.png)",
                "            Song: bgm/theme.ogg",
                "            Locked: seen_night",
                "002 Movies (1 item)",
                "    001 (op.webm) [video]",
                "003 Anim (1 item) [animations]",
                "    001 (walk) [animation]",
            ]
        );
    }

    #[test]
    fn empty_tree_says_so() {
        let g = Gallery::new(placeholder_host(), GalleryConfig::default(), SizeCache::in_memory())
            .unwrap();
        assert_eq!(format_tree(&g)[1], "    (empty)");
    }

    // =========================================================================
    // Page
    // =========================================================================

    #[test]
    fn page_without_selection() {
        let g = gallery();
        assert_eq!(format_page(&g, &[]), vec!["No slide selected"]);
    }

    #[test]
    fn page_lists_slots() {
        let mut g = gallery();
        g.change_distribution(Some(2), Some(2));
        g.change_slide("chapter");
        g.update().unwrap();
        let slots = g.page_buttons().unwrap();
        let lines = format_page(&g, &slots);

        assert_eq!(lines[0], "Chapter I / Cg: page 1 of 1 (2x2)");
        assert_eq!(lines[1], "001 gallery-0 → show");
        assert!(lines[2].starts_with("    Thumbnail: ["));
        assert_eq!(lines[3], "002 gallery-1 → locked");
        assert_eq!(lines[5], "003 empty");
        assert_eq!(lines[6], "004 empty");
    }

    // =========================================================================
    // Effects
    // =========================================================================

    #[test]
    fn show_effect_lists_image_and_song() {
        let mut g = gallery();
        let effect = g
            .perform(Action::ShowItem {
                item: "gallery-0".into(),
                song: Some("bgm/theme.ogg".into()),
            })
            .unwrap();
        let lines = format_effect(&effect);
        assert_eq!(lines[0], "Show (dissolve)");
        assert!(lines[1].starts_with("    Image: [1920x1080 +0+0] cg/beach.png"));
        assert_eq!(lines[2], "    Song: bgm/theme.ogg");
    }

    #[test]
    fn play_and_exit_effects() {
        let effect = Effect::Play {
            movie: "movies/op.webm".into(),
            song: None,
        };
        assert_eq!(format_effect(&effect), vec!["Play movies/op.webm"]);
        assert_eq!(format_effect(&Effect::Exit), vec!["Leave the gallery"]);
    }

    // =========================================================================
    // Warm
    // =========================================================================

    #[test]
    fn warm_summary() {
        let report = WarmReport {
            images: 5,
            already_cached: 2,
            probed: 3,
            failed: 0,
        };
        assert_eq!(
            format_warm(&report),
            vec!["Warmed size cache: 5 images, 2 already cached, 3 probed"]
        );
        let failed = WarmReport { failed: 1, ..report };
        assert_eq!(format_warm(&failed).len(), 2);
    }
}
