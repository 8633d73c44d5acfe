//! Shared test fixtures for SeatForge crates.
//!
//! This crate provides classroom builders and the reference scenarios used
//! across the workspace. It depends only on `seatforge-core`.
//!
//! - [`classroom`] - roster, layout and assignment builders
//! - [`scenarios`] - the reference scenarios A through D and the chain case
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! seatforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use seatforge_test::scenarios::scenario_b;
//! use seatforge_test::classroom::assignment_of;
//! ```

pub mod classroom;
pub mod scenarios;

pub use classroom::{assignment_of, roster, student_ids, uniform_classroom};
pub use scenarios::{scenario_a, scenario_b, scenario_c, scenario_chain, scenario_d};
