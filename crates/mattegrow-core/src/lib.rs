//! # mattegrow-core
//!
//! Core types for mask-driven matte filtering.
//!
//! This crate provides the foundational types used by the mattegrow
//! workspace:
//!
//! - [`Region`] - Signed pixel rectangle in host coordinates (x, y, r, t)
//! - [`Channel`], [`ChannelSet`] - Named data planes and plane masks
//! - [`Row`], [`Tile`] - Materialized scanline and 2D views of pixel data
//! - [`FrameBuffer`] - Owned planar pixel storage over a region
//! - [`ImageSource`] - The upstream tiled-image collaborator contract
//!
//! ## Coordinate Convention
//!
//! All rectangles follow the host compositor's convention: `x` is the left
//! edge (inclusive), `y` the bottom edge (inclusive), `r` the right edge
//! (exclusive) and `t` the top edge (exclusive). Y increases upward.
//!
//! ```text
//!   t ┬─────────────┐
//!     │             │
//!     │   Region    │
//!   y ┼─────────────┤
//!     x             r
//! ```
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. `mattegrow-ops` builds the filter pipeline on top of it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod error;
pub mod frame;
pub mod region;
pub mod row;
pub mod source;
pub mod tile;

// Re-exports for convenience
pub use channel::{Channel, ChannelSet};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use region::Region;
pub use row::Row;
pub use source::{BufferSource, ImageSource};
pub use tile::Tile;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use mattegrow_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, ChannelSet};
    pub use crate::error::{Error, Result};
    pub use crate::frame::FrameBuffer;
    pub use crate::region::Region;
    pub use crate::row::Row;
    pub use crate::source::{BufferSource, ImageSource};
    pub use crate::tile::Tile;
}
