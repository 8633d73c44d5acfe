//! Notes the solver attaches to a result.

use std::fmt;

use seatforge_core::StudentId;

/// Something the caller should know about how a result was produced.
///
/// Diagnostics never make a result invalid on their own; residual hard
/// violations are listed in the validation report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// No legal pair existed, so every student started out alone.
    PairingDegraded { students: usize },

    /// Two students were seated together despite a must-separate rule,
    /// because the layout had too few desks to keep everyone apart.
    ForcedPairing {
        first: StudentId,
        second: StudentId,
        score: f64,
    },

    /// A phase stopped on its budget while improvements were still possible.
    IterationBudgetExhausted { phase: String, limit: u64 },

    /// The solve was cancelled; the result is the best found so far.
    Cancelled { phase: String },
}

impl Diagnostic {
    /// Returns true if this diagnostic marks an interrupted solve.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Diagnostic::Cancelled { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PairingDegraded { students } => {
                write!(f, "no legal pair among {students} students; pairing degraded to singles")
            }
            Diagnostic::ForcedPairing {
                first,
                second,
                score,
            } => write!(f, "forced {first} and {second} together (score {score})"),
            Diagnostic::IterationBudgetExhausted { phase, limit } => {
                write!(f, "{phase} stopped after {limit} iterations")
            }
            Diagnostic::Cancelled { phase } => write!(f, "cancelled during {phase}"),
        }
    }
}
