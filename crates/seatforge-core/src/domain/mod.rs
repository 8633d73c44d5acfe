//! Seating domain model.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Student`] | A roster entry with optional zone preferences |
//! | [`DeskSlot`] | A one- or two-seat desk with zone tags |
//! | [`DeskLayout`] | The ordered desks of one classroom |
//! | [`Assignment`] | Desk to occupants, produced by the solver |
//! | [`SeatingProblem`] | Everything one solve call needs |

mod assignment;
mod desk;
mod problem;
mod student;


pub use assignment::{Assignment, DeskSeating, Occupants};
pub use desk::{DeskId, DeskLayout, DeskSlot, ZoneTag};
pub use problem::SeatingProblem;
pub use student::{Student, StudentId};
