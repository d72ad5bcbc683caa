//! Shared value types used across the gallery core.
//!
//! [`Size`] is a plain `Copy` dimension pair. Thumbnails and the navigator
//! need to observe the *same* thumbnail box, which changes whenever the page
//! distribution changes, so that box is held in a [`SharedSize`] cell: every
//! holder sees an update made through [`SharedSize::set`].

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizeError {
    #[error("A dimension cannot be negative: {0}x{1}")]
    Negative(f64, f64),
    #[error("A dimension must be a finite number: {0}x{1}")]
    NotFinite(f64, f64),
}

/// Pixel dimensions of an image, thumbnail box or screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from signed values, rejecting negative dimensions.
    pub fn try_new(width: i64, height: i64) -> Result<Self, SizeError> {
        if width < 0 || height < 0 {
            return Err(SizeError::Negative(width as f64, height as f64));
        }
        Ok(Self {
            width: width.min(u32::MAX as i64) as u32,
            height: height.min(u32::MAX as i64) as u32,
        })
    }

    /// Build a size from computed floating dimensions, truncating toward zero.
    pub fn from_f64(width: f64, height: f64) -> Result<Self, SizeError> {
        if !width.is_finite() || !height.is_finite() {
            return Err(SizeError::NotFinite(width, height));
        }
        if width < 0.0 || height < 0.0 {
            return Err(SizeError::Negative(width, height));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    /// `width / height`, or `0.0` for a zero height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// A size cell whose clones all observe the same value.
///
/// Cloning shares the cell; use [`SharedSize::detached`] for an independent copy.
#[derive(Clone, Default)]
pub struct SharedSize(Rc<Cell<Size>>);

impl SharedSize {
    pub fn new(size: Size) -> Self {
        Self(Rc::new(Cell::new(size)))
    }

    pub fn get(&self) -> Size {
        self.0.get()
    }

    /// Update the value in place for every holder of this cell.
    pub fn set(&self, size: Size) {
        self.0.set(size);
    }

    /// A new cell holding the current value, not linked to this one.
    pub fn detached(&self) -> Self {
        Self::new(self.get())
    }

    /// Whether both handles point at the same cell.
    pub fn shares_with(&self, other: &SharedSize) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSize").field(&self.get()).finish()
    }
}

impl PartialEq for SharedSize {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
