//! The host engine capability interface.
//!
//! The gallery core never draws, decodes or evaluates anything itself. All
//! of that belongs to the engine hosting it, reached through [`Host`]:
//!
//! | Capability | Method |
//! |---|---|
//! | Registered name → displayable/animation | [`Host::registered`] |
//! | Path loadability check | [`Host::is_loadable`] |
//! | Decode an image and report its pixel size | [`Host::probe_size`] |
//! | Evaluate an unlock condition | [`Host::evaluate`] |
//! | Persisted gallery preferences | [`Host::load_preferences`], [`Host::store_preferences`] |
//! | Screen geometry | [`Host::screen_size`] |
//!
//! All methods take `&self`; a host that records state (preferences) uses
//! interior mutability.

use crate::resources::Content;
use crate::types::Size;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot load '{0}'")]
    NotLoadable(String),
    #[error("Failed to decode '{0}': {1}")]
    Decode(String, String),
}

/// What kind of object a host-side handle refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// An animation block (ATL-like transform).
    Animation,
    /// A decodable image.
    Image,
    /// Any other drawable.
    Displayable,
    /// Something the gallery cannot show; carries a type description.
    Other(String),
}

/// A handle to an in-memory engine object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostObject {
    /// Stable identifier of the object (its registered name when it has one).
    pub id: String,
    pub kind: ObjectKind,
}

impl HostObject {
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Player preferences the host persists across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Show animation slides with the speed-controls screen instead of
    /// listing them as regular slides.
    pub with_speed: bool,
    /// Playback speed multiplier for animation slides, at least 1.
    pub animation_speed: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            with_speed: false,
            animation_speed: 1,
        }
    }
}

pub trait Host {
    /// Look up a displayable or animation registered under `name`.
    fn registered(&self, name: &str) -> Option<HostObject>;

    /// Whether `path` names an asset the engine can load.
    fn is_loadable(&self, path: &str) -> bool;

    /// Decode the image behind `content` and report its pixel size.
    fn probe_size(&self, content: &Content) -> Result<Size, HostError>;

    /// Evaluate an unlock condition against the current game state.
    fn evaluate(&self, condition: &str) -> bool;

    fn screen_size(&self) -> Size;

    fn load_preferences(&self) -> Preferences {
        Preferences::default()
    }

    fn store_preferences(&self, _preferences: &Preferences) {}
}
