//! Error types for mattegrow-core operations.
//!
//! Covers the contract violations the buffer and source types can surface:
//! out-of-bounds sample access, requests for regions the producer never
//! declared, and reads of channels a view does not carry.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use crate::{Channel, Region};
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core buffer and source types.
#[derive(Debug, Error)]
pub enum Error {
    /// A sample was requested outside a view's coordinate range.
    #[error("sample ({x}, {y}) out of bounds for region {region}")]
    OutOfBounds {
        /// X coordinate that was accessed.
        x: i32,
        /// Y coordinate that was accessed.
        y: i32,
        /// The view's region.
        region: Region,
    },

    /// A fetch asked for a region the producer never declared.
    #[error("requested region {requested} exceeds declared bounds {bounds}")]
    InvalidRegion {
        /// Region that was requested.
        requested: Region,
        /// Bounds the producer declared.
        bounds: Region,
    },

    /// A channel was read from a view that does not carry it.
    #[error("channel {channel} not present in view")]
    MissingChannel {
        /// The absent channel.
        channel: Channel,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, region: Region) -> Self {
        Self::OutOfBounds { x, y, region }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(requested: Region, bounds: Region) -> Self {
        Self::InvalidRegion { requested, bounds }
    }

    /// Creates an [`Error::MissingChannel`] error.
    #[inline]
    pub fn missing_channel(channel: Channel) -> Self {
        Self::MissingChannel { channel }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds(120, -3, Region::new(0, 0, 100, 50));
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("-3"));
        assert!(msg.contains("(0, 0, 100, 50)"));
    }

    #[test]
    fn test_missing_channel_message() {
        let err = Error::missing_channel(Channel::MATTE);
        assert!(err.to_string().contains("matte"));
    }
}
