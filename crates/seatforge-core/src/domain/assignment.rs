//! The desk-to-occupants mapping produced by the solver.

use smallvec::SmallVec;

use super::{DeskId, DeskLayout, StudentId};

/// Occupants of one desk: zero, one or two students.
pub type Occupants = SmallVec<[StudentId; 2]>;

/// One desk and the students seated at it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeskSeating {
    pub desk: DeskId,
    pub occupants: Occupants,
}

/// Mapping from desk to its occupants, kept in layout order.
///
/// An assignment is a plain value: renderers and persistence layers consume
/// it unchanged. It does not enforce completeness or capacity itself; the
/// result validator checks those.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{Assignment, DeskLayout, DeskSlot};
///
/// let layout = DeskLayout::new(vec![DeskSlot::pair("d1"), DeskSlot::single("d2")]);
/// let mut assignment = Assignment::empty(&layout);
/// assignment.seat(&"d1".into(), "ada".into());
/// assignment.seat(&"d1".into(), "bob".into());
///
/// assert_eq!(assignment.occupants(&"d1".into()).len(), 2);
/// assert_eq!(assignment.desk_of(&"bob".into()).map(|d| d.as_str()), Some("d1"));
/// assert_eq!(assignment.pairs().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Assignment {
    seatings: Vec<DeskSeating>,
}

impl Assignment {
    /// Creates an assignment with every desk of the layout empty.
    pub fn empty(layout: &DeskLayout) -> Self {
        let seatings = layout
            .desks()
            .iter()
            .map(|d| DeskSeating {
                desk: d.id.clone(),
                occupants: SmallVec::new(),
            })
            .collect();
        Self { seatings }
    }

    /// Creates an assignment from explicit seatings.
    pub fn from_seatings(seatings: Vec<DeskSeating>) -> Self {
        Self { seatings }
    }

    /// Seats a student at a desk, adding the desk if it is not yet listed.
    pub fn seat(&mut self, desk: &DeskId, student: StudentId) {
        match self.seatings.iter_mut().find(|s| &s.desk == desk) {
            Some(seating) => seating.occupants.push(student),
            None => {
                let mut occupants = SmallVec::new();
                occupants.push(student);
                self.seatings.push(DeskSeating {
                    desk: desk.clone(),
                    occupants,
                });
            }
        }
    }

    pub fn seatings(&self) -> &[DeskSeating] {
        &self.seatings
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeskSeating> {
        self.seatings.iter()
    }

    /// Occupants of `desk`; empty when the desk is unknown or unoccupied.
    pub fn occupants(&self, desk: &DeskId) -> &[StudentId] {
        self.seatings
            .iter()
            .find(|s| &s.desk == desk)
            .map(|s| s.occupants.as_slice())
            .unwrap_or(&[])
    }

    /// The desk a student sits at, if any.
    pub fn desk_of(&self, student: &StudentId) -> Option<&DeskId> {
        self.seatings
            .iter()
            .find(|s| s.occupants.contains(student))
            .map(|s| &s.desk)
    }

    /// Returns true if `a` and `b` share a desk.
    pub fn share_desk(&self, a: &StudentId, b: &StudentId) -> bool {
        self.seatings
            .iter()
            .any(|s| s.occupants.contains(a) && s.occupants.contains(b))
    }

    /// Desks holding exactly two students, as `(desk, first, second)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&DeskId, &StudentId, &StudentId)> {
        self.seatings.iter().filter_map(|s| match s.occupants.as_slice() {
            [a, b] => Some((&s.desk, a, b)),
            _ => None,
        })
    }

    /// Total number of seated students (counting duplicates).
    pub fn seated_count(&self) -> usize {
        self.seatings.iter().map(|s| s.occupants.len()).sum()
    }

    pub fn desk_count(&self) -> usize {
        self.seatings.len()
    }
}
