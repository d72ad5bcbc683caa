//! # VN Gallery
//!
//! The engine-independent core of an unlockable media gallery for visual
//! novels. Images, videos, animations and arbitrary displayables are
//! organized into nested collections, paginated into a thumbnail grid sized
//! from the screen, and gated by per-item unlock conditions.
//!
//! # Architecture: One Context, One Host
//!
//! Everything lives in a single [`gallery::Gallery`] value. The engine is
//! reached only through the [`host::Host`] trait, and the gallery answers
//! with data: page [`presenter::Slot`]s to draw, [`navigation::Action`]s to
//! wire to buttons, and [`gallery::Effect`]s for what only the engine can do.
//!
//! ```text
//! register   put_item / create_slide / put_slide_like → ContentTree
//! finalize   finalize_registration                    → deferred names resolved
//! per frame  update → page_buttons                    → Vec<Slot>
//! per click  perform(action)                          → Effect
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | The context object: registration, navigation, settings, action dispatch |
//! | [`slides`] | Arena tree of sliders (named collections) and slides (item lists) |
//! | [`items`] | Items, unlock conditions, thumbnail derivation, songs |
//! | [`navigation`] | Current slider/slide/page, back behavior, page grid geometry |
//! | [`presenter`] | Page slots, button wiring, full-screen entry registry |
//! | [`resources`] | Resource typing, loadability, deferred names, scale/composite |
//! | [`sizes`] | Persisted JSON cache of image pixel sizes |
//! | [`host`] | The engine capability trait (and an in-memory mock for tests) |
//! | [`imaging`] | Geometry math, presentation descriptions, filesystem host |
//! | [`config`] | `gallery.toml` loading, validation, merging, stock defaults |
//! | [`naming`] | `NNN-name` ordering prefixes and display names |
//! | [`scan`] | Content directory → gallery, for the CLI |
//! | [`output`] | CLI output formatting |
//! | [`types`] | `Size` and the shared thumbnail size cell |
//!
//! # Design Decisions
//!
//! ## Arena Tree With Ids
//!
//! Sliders and slides live in one `Vec` inside [`slides::ContentTree`] and
//! refer to each other by [`slides::NodeId`]. Parents are plain ids, so
//! "go to parent" is a lookup that falls back to the root, and moving a
//! collection between sliders never fights the borrow checker.
//!
//! ## One Shared Thumbnail Size
//!
//! Every thumbnail holds a clone of the navigator's [`types::SharedSize`].
//! Changing the grid distribution recomputes the box once and every
//! thumbnail, locked ones included, sees the new size.
//!
//! ## Descriptions, Not Drawables
//!
//! The core never draws. [`imaging::Presentation`] describes "scale this to
//! WxH" or "place this at (x, y) in a WxH canvas"; the host turns those into
//! its own primitives.
//!
//! ## Sizes Are Cached Across Runs
//!
//! Probing an image's pixel size means decoding its header. Sizes are kept in
//! [`sizes::SizeCache`] and flushed to disk when the player leaves the
//! gallery, so the next run lays out thumbnails without touching the files.

pub mod config;
pub mod gallery;
pub mod host;
pub mod imaging;
pub mod items;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod presenter;
pub mod resources;
pub mod scan;
pub mod sizes;
pub mod slides;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
