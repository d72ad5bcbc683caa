//! Thumbnail geometry and render descriptions.
//!
//! | Piece | Role |
//! |---|---|
//! | **Calculations** | Pure functions for fit/center/grid math (unit testable) |
//! | **Presentation** | Data describing scale and composite primitives for the host |
//! | **FsHost** | [`Host`](crate::host::Host) over a content directory, sizes via `image` |

mod calculations;
pub mod fs_host;
mod presentation;

pub use calculations::{center_offset, fit_within, page_window, thumbnail_box};
pub use fs_host::FsHost;
pub use presentation::Presentation;
