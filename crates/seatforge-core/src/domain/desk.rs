//! Desk slots and the classroom layout.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::{Result, SeatForgeError};

/// Desk identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeskId(String);

impl DeskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A zone attribute such as "near-window" or "quiet".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoneTag(String);

impl ZoneTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for ZoneTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// A seating unit with a fixed capacity of one or two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeskSlot {
    pub id: DeskId,
    pub capacity: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: BTreeSet<ZoneTag>,
}

impl DeskSlot {
    pub fn new(id: impl Into<DeskId>, capacity: u8) -> Self {
        Self {
            id: id.into(),
            capacity,
            zones: BTreeSet::new(),
        }
    }

    /// Creates a two-seat desk.
    pub fn pair(id: impl Into<DeskId>) -> Self {
        Self::new(id, 2)
    }

    /// Creates a one-seat desk.
    pub fn single(id: impl Into<DeskId>) -> Self {
        Self::new(id, 1)
    }

    pub fn with_zone(mut self, zone: impl Into<ZoneTag>) -> Self {
        self.zones.insert(zone.into());
        self
    }

    pub fn has_zone(&self, zone: &ZoneTag) -> bool {
        self.zones.contains(zone)
    }

    pub fn is_pair_desk(&self) -> bool {
        self.capacity == 2
    }
}

/// Ordered list of desk slots for one classroom configuration.
///
/// The layout is a configuration value owned by each solve call. Desk order is
/// significant: construction and tie-breaks walk desks in layout order.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{DeskLayout, DeskSlot};
///
/// let layout = DeskLayout::new(vec![
///     DeskSlot::pair("d1").with_zone("near-window"),
///     DeskSlot::pair("d2"),
///     DeskSlot::single("d3"),
/// ]);
/// assert_eq!(layout.seat_count(), 5);
/// assert_eq!(layout.pair_desk_count(), 2);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeskLayout {
    desks: Vec<DeskSlot>,
}

impl DeskLayout {
    pub fn new(desks: Vec<DeskSlot>) -> Self {
        Self { desks }
    }

    /// Builds a layout of `pairs` two-seat desks followed by `singles` one-seat desks.
    pub fn uniform(pairs: usize, singles: usize) -> Self {
        let desks = (0..pairs)
            .map(|i| DeskSlot::pair(format!("pair-{:02}", i + 1)))
            .chain((0..singles).map(|i| DeskSlot::single(format!("single-{:02}", i + 1))))
            .collect();
        Self { desks }
    }

    pub fn desks(&self) -> &[DeskSlot] {
        &self.desks
    }

    pub fn len(&self) -> usize {
        self.desks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    pub fn get(&self, id: &DeskId) -> Option<&DeskSlot> {
        self.desks.iter().find(|d| &d.id == id)
    }

    pub fn position(&self, id: &DeskId) -> Option<usize> {
        self.desks.iter().position(|d| &d.id == id)
    }

    /// Total number of seats across all desks.
    pub fn seat_count(&self) -> usize {
        self.desks.iter().map(|d| d.capacity as usize).sum()
    }

    /// Number of desks that can hold a pair.
    pub fn pair_desk_count(&self) -> usize {
        self.desks.iter().filter(|d| d.is_pair_desk()).count()
    }

    /// Checks desk ids are unique and capacities are 1 or 2.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.desks.len());
        for desk in &self.desks {
            if !seen.insert(&desk.id) {
                return Err(SeatForgeError::DuplicateDesk(desk.id.clone()));
            }
            if !(1..=2).contains(&desk.capacity) {
                return Err(SeatForgeError::InvalidCapacity {
                    desk: desk.id.clone(),
                    capacity: desk.capacity,
                });
            }
        }
        Ok(())
    }
}
