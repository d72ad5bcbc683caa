//! Descriptions of what the host should draw.
//!
//! These types describe *what* to render, not *how*. The gallery core builds
//! them from resources and thumbnail geometry; the host turns them into its
//! own drawables (a scale primitive, a fixed-size composite).

use crate::resources::Content;
use crate::types::Size;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// The content as-is, at its natural size (animations, displayables).
    Raw(Content),
    /// The content scaled to exactly `size`.
    Scale { content: Content, size: Size },
    /// `child` placed at `(x, y)` inside a fixed `canvas`.
    Composite {
        canvas: Size,
        x: i32,
        y: i32,
        child: Box<Presentation>,
    },
}

impl Presentation {
    /// The size this presentation occupies, when it has a fixed one.
    pub fn size(&self) -> Option<Size> {
        match self {
            Presentation::Raw(_) => None,
            Presentation::Scale { size, .. } => Some(*size),
            Presentation::Composite { canvas, .. } => Some(*canvas),
        }
    }

    /// The content at the bottom of the presentation.
    pub fn content(&self) -> &Content {
        match self {
            Presentation::Raw(content) => content,
            Presentation::Scale { content, .. } => content,
            Presentation::Composite { child, .. } => child.content(),
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Raw(content) => write!(f, "{content}"),
            Presentation::Scale { content, size } => write!(f, "{content} @ {size}"),
            Presentation::Composite {
                canvas, x, y, child,
            } => write!(f, "[{canvas} +{x}+{y}] {child}"),
        }
    }
}
