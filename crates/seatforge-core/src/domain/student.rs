//! Students and their identifiers.

use std::collections::BTreeSet;
use std::fmt;

use super::ZoneTag;

/// Stable, unique student identifier.
///
/// Identifiers order lexicographically; every tie-break in the solver uses
/// this ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new student identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A student on the roster.
///
/// `preferences` are zone tags the student should sit in (e.g. "quiet").
/// Each one becomes an implicit zone preference in the constraint model.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::Student;
///
/// let s = Student::new("s01").with_name("Ada").with_preference("quiet");
/// assert_eq!(s.id.as_str(), "s01");
/// assert_eq!(s.name.as_deref(), Some("Ada"));
/// assert_eq!(s.preferences.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Student {
    pub id: StudentId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: BTreeSet<ZoneTag>,
}

impl Student {
    pub fn new(id: impl Into<StudentId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            preferences: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_preference(mut self, zone: impl Into<ZoneTag>) -> Self {
        self.preferences.insert(zone.into());
        self
    }

    /// Returns the display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
