//! Channels and channel sets.
//!
//! A [`Channel`] names one data plane of an image: the usual color planes,
//! alpha, depth, or an auxiliary plane such as a matte that a filter may use
//! as its driver. A [`ChannelSet`] is a compact bitmask of channels used
//! everywhere a request or a materialized view has to say which planes it
//! covers.
//!
//! # Usage
//!
//! ```rust
//! use mattegrow_core::{Channel, ChannelSet};
//!
//! let mut set = ChannelSet::none();
//! set.insert(Channel::RED);
//! set.insert(Channel::MATTE);
//! assert!(set.contains(Channel::MATTE));
//! assert_eq!(set.len(), 2);
//! ```

/// Identifies one named data plane of an image.
///
/// The first few indices carry conventional names; further indices are
/// generic auxiliary planes. At most [`Channel::MAX_CHANNELS`] planes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Maximum number of distinct channels.
    pub const MAX_CHANNELS: u8 = 32;

    /// Red color plane.
    pub const RED: Channel = Channel(0);
    /// Green color plane.
    pub const GREEN: Channel = Channel(1);
    /// Blue color plane.
    pub const BLUE: Channel = Channel(2);
    /// Alpha plane.
    pub const ALPHA: Channel = Channel(3);
    /// Depth plane.
    pub const DEPTH: Channel = Channel(4);
    /// Matte plane, the conventional driver channel for mask-driven filters.
    pub const MATTE: Channel = Channel(5);

    /// Creates a channel from a raw plane index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_CHANNELS`.
    #[inline]
    pub const fn new(index: u8) -> Self {
        assert!(index < Self::MAX_CHANNELS, "channel index out of range");
        Channel(index)
    }

    /// Raw plane index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask for this channel.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.0
    }

    /// Conventional name of the plane.
    pub fn name(self) -> String {
        match self {
            Channel::RED => "red".into(),
            Channel::GREEN => "green".into(),
            Channel::BLUE => "blue".into(),
            Channel::ALPHA => "alpha".into(),
            Channel::DEPTH => "depth".into(),
            Channel::MATTE => "matte".into(),
            Channel(n) => format!("aux{}", n),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// A set of channels, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelSet(u32);

impl ChannelSet {
    /// The empty set.
    #[inline]
    pub const fn none() -> Self {
        ChannelSet(0)
    }

    /// The set of every representable channel.
    #[inline]
    pub const fn all() -> Self {
        ChannelSet(u32::MAX)
    }

    /// The standard RGBA color set.
    #[inline]
    pub const fn rgba() -> Self {
        ChannelSet(
            Channel::RED.mask()
                | Channel::GREEN.mask()
                | Channel::BLUE.mask()
                | Channel::ALPHA.mask(),
        )
    }

    /// Returns `true` if the set contains `channel`.
    #[inline]
    pub const fn contains(&self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    /// Adds a channel to the set.
    #[inline]
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= channel.mask();
    }

    /// Removes a channel from the set.
    #[inline]
    pub fn remove(&mut self, channel: Channel) {
        self.0 &= !channel.mask();
    }

    /// Returns this set with `channel` added.
    #[inline]
    pub const fn with(self, channel: Channel) -> Self {
        ChannelSet(self.0 | channel.mask())
    }

    /// Set union.
    #[inline]
    pub const fn union(self, other: ChannelSet) -> Self {
        ChannelSet(self.0 | other.0)
    }

    /// Set intersection.
    #[inline]
    pub const fn intersect(self, other: ChannelSet) -> Self {
        ChannelSet(self.0 & other.0)
    }

    /// Number of channels in the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the channels in the set in index order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        let bits = self.0;
        (0..Channel::MAX_CHANNELS)
            .filter(move |i| bits & (1 << i) != 0)
            .map(Channel)
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        ChannelSet(channel.mask())
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = ChannelSet::none();
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}

impl std::ops::BitOr for ChannelSet {
    type Output = ChannelSet;

    fn bitor(self, rhs: ChannelSet) -> ChannelSet {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_identity() {
        assert_eq!(Channel::RED.index(), 0);
        assert_eq!(Channel::MATTE.index(), 5);
        assert_eq!(Channel::new(5), Channel::MATTE);
        assert_eq!(Channel::new(9).name(), "aux9");
    }

    #[test]
    fn test_channel_set_insert_remove() {
        let mut set = ChannelSet::none();
        assert!(set.is_empty());

        set.insert(Channel::RED);
        set.insert(Channel::MATTE);
        assert!(set.contains(Channel::RED));
        assert!(set.contains(Channel::MATTE));
        assert!(!set.contains(Channel::BLUE));
        assert_eq!(set.len(), 2);

        set.remove(Channel::RED);
        assert!(!set.contains(Channel::RED));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_channel_set_all_contains_everything() {
        let all = ChannelSet::all();
        for i in 0..Channel::MAX_CHANNELS {
            assert!(all.contains(Channel::new(i)));
        }
    }

    #[test]
    fn test_channel_set_union_intersect() {
        let color = ChannelSet::rgba();
        let matte = ChannelSet::from(Channel::MATTE);
        let both = color.union(matte);
        assert_eq!(both.len(), 5);
        assert!(color.intersect(matte).is_empty());
        assert_eq!(both.intersect(color), color);
    }

    #[test]
    fn test_channel_set_iter_order() {
        let set = ChannelSet::none()
            .with(Channel::BLUE)
            .with(Channel::RED)
            .with(Channel::MATTE);
        let channels: Vec<Channel> = set.iter().collect();
        assert_eq!(channels, vec![Channel::RED, Channel::BLUE, Channel::MATTE]);
    }

    #[test]
    fn test_channel_set_from_iter() {
        let set: ChannelSet = [Channel::RED, Channel::ALPHA].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Channel::ALPHA));
    }
}
