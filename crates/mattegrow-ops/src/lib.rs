//! # mattegrow-ops
//!
//! Mask-driven morphological dilate/erode filtering.
//!
//! The centerpiece is [`DrivenDilate`]: a separable box min/max filter whose
//! window size at each pixel is scaled by an auxiliary "driver" channel. A
//! constant driver of 1 behaves like a plain dilate (or erode); a varying
//! driver grows or shrinks a matte by a locally controlled amount, which is
//! the classic trick for depth- or disparity-weighted matte growth.
//!
//! # Modules
//!
//! - [`config`] - Filter configuration and per-axis window parameters
//! - [`stats`] - Lazily computed per-frame driver statistics
//! - [`dilate`] - The two-pass filter pipeline
//! - [`render`] - Whole-frame render driver (rayon fan-out per scanline)
//!
//! # Example
//!
//! ```rust
//! use mattegrow_core::{BufferSource, Channel, ChannelSet, FrameBuffer, Region};
//! use mattegrow_ops::{DilateConfig, DrivenDilate};
//!
//! let region = Region::from_size(32, 32);
//! let channels = ChannelSet::rgba().with(Channel::MATTE);
//! let source = BufferSource::new(FrameBuffer::new(region, channels));
//!
//! let filter = DrivenDilate::new(DilateConfig {
//!     horizontal_size: 5.0,
//!     vertical_size: 5.0,
//!     bbox_adjust: 0,
//!     driver: Some(Channel::MATTE),
//! });
//!
//! let info = filter.validate(&source);
//! let row = filter.produce_row(&source, 10, 0, 32, ChannelSet::rgba()).unwrap();
//! assert_eq!(row.width(), 32);
//! # let _ = info;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod config;
pub mod dilate;
pub mod render;
pub mod stats;

pub use config::{Axis, DilateConfig, FilterMode};
pub use dilate::{DrivenDilate, FilterInfo};
pub use error::{FilterError, FilterResult};
pub use stats::DriverStats;
