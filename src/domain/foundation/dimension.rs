//! Dimension enum - the five competency axes under assessment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five independently-estimated competency dimensions.
///
/// The derived `Ord` follows the declaration order, which is the canonical
/// iteration order used for deterministic tie-breaking everywhere the
/// engine has to choose among equally-ranked dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    LowLevel,
    ControlFlow,
    HardwareIo,
    CodeReading,
    Decomposition,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 5] = [
        Dimension::LowLevel,
        Dimension::ControlFlow,
        Dimension::HardwareIo,
        Dimension::CodeReading,
        Dimension::Decomposition,
    ];

    /// Returns the 0-based index of this dimension in the canonical order.
    pub fn order_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|d| d == self)
            .expect("Dimension must be in ALL array")
    }

    /// Returns the stable string label (matches the serde representation).
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::LowLevel => "low_level",
            Dimension::ControlFlow => "control_flow",
            Dimension::HardwareIo => "hardware_io",
            Dimension::CodeReading => "code_reading",
            Dimension::Decomposition => "decomposition",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::LowLevel => "Low-Level Concepts",
            Dimension::ControlFlow => "Control Flow",
            Dimension::HardwareIo => "Hardware I/O",
            Dimension::CodeReading => "Code Reading",
            Dimension::Decomposition => "Problem Decomposition",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
