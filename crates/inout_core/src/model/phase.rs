//! Cycle phase model.
//!
//! # Responsibility
//! - Define the closed set of displayable cycle states.
//! - Provide host-independent presentation data (labels, accent, tint).
//!
//! # Invariants
//! - `Out.day_index` is in `[0, OUT_PHASE_DAYS)`.
//! - `In.day_index` is in `[0, IN_PHASE_DAYS)`.
//! - `Unconfigured` carries no day index and is distinct from `Out { 0 }`.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};

/// Length of one full cycle in calendar days.
pub const CYCLE_LENGTH_DAYS: u32 = 28;
/// Leading days of each cycle spent in the OUT phase.
pub const OUT_PHASE_DAYS: u32 = 7;
/// Trailing days of each cycle spent in the IN phase.
pub const IN_PHASE_DAYS: u32 = CYCLE_LENGTH_DAYS - OUT_PHASE_DAYS;

/// Phase of the cycle on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CyclePhase {
    /// Cycle days 0..7.
    Out { day_index: u32 },
    /// Cycle days 7..28.
    In { day_index: u32 },
    /// No start date has been configured yet.
    Unconfigured,
}

/// Accent family used by front ends for borders and headline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseAccent {
    Blue,
    Green,
    Gray,
}

/// Hue/saturation/brightness triple, each component in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsbColor {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl CyclePhase {
    /// Builds the phase for a position in `[0, CYCLE_LENGTH_DAYS)`.
    ///
    /// Positions outside the cycle are wrapped first, so any `u32` is accepted.
    pub fn from_cycle_day(cycle_day: u32) -> Self {
        let cycle_day = cycle_day % CYCLE_LENGTH_DAYS;
        if cycle_day < OUT_PHASE_DAYS {
            Self::Out {
                day_index: cycle_day,
            }
        } else {
            Self::In {
                day_index: cycle_day - OUT_PHASE_DAYS,
            }
        }
    }

    /// Returns the position in the cycle, or `None` when unconfigured.
    pub fn cycle_day(&self) -> Option<u32> {
        match self {
            Self::Out { day_index } => Some(*day_index),
            Self::In { day_index } => Some(OUT_PHASE_DAYS + day_index),
            Self::Unconfigured => None,
        }
    }

    /// Returns the zero-based day inside the current phase.
    pub fn day_index(&self) -> Option<u32> {
        match self {
            Self::Out { day_index } | Self::In { day_index } => Some(*day_index),
            Self::Unconfigured => None,
        }
    }

    /// Returns the number of days in the current phase.
    pub fn phase_length(&self) -> Option<u32> {
        match self {
            Self::Out { .. } => Some(OUT_PHASE_DAYS),
            Self::In { .. } => Some(IN_PHASE_DAYS),
            Self::Unconfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::Unconfigured)
    }

    /// Returns `true` when both values are the same phase kind, ignoring the day.
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Stable lowercase label used on the FFI boundary.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Out { .. } => "out",
            Self::In { .. } => "in",
            Self::Unconfigured => "unconfigured",
        }
    }

    /// Headline text shown by the widget.
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Out { .. } => "OUT",
            Self::In { .. } => "IN",
            Self::Unconfigured => "SET DATE",
        }
    }

    /// Secondary line shown below the headline.
    pub fn subtitle_text(&self) -> String {
        match self {
            Self::Out { day_index } => format!("Day {} of {OUT_PHASE_DAYS}", day_index + 1),
            Self::In { day_index } => format!("Day {} of {IN_PHASE_DAYS}", day_index + 1),
            Self::Unconfigured => "Open app to configure".to_string(),
        }
    }

    /// Fraction of the current phase already elapsed, `0.0` on the first day
    /// and `1.0` on the last.
    pub fn progress(&self) -> Option<f64> {
        let day_index = self.day_index()?;
        let length = self.phase_length()?;
        Some(f64::from(day_index) / f64::from(length - 1))
    }

    pub fn accent(&self) -> PhaseAccent {
        match self {
            Self::Out { .. } => PhaseAccent::Blue,
            Self::In { .. } => PhaseAccent::Green,
            Self::Unconfigured => PhaseAccent::Gray,
        }
    }

    /// Tint that darkens as the phase approaches its end.
    pub fn gradient_tint(&self) -> HsbColor {
        let progress = self.progress().unwrap_or(0.0).clamp(0.0, 1.0);
        match self {
            Self::In { .. } => HsbColor {
                hue: 0.33 - progress * 0.08,
                saturation: 0.8 - progress * 0.2,
                brightness: 0.75 - progress * 0.15,
            },
            Self::Out { .. } => HsbColor {
                hue: 0.67,
                saturation: 0.85 - progress * 0.1,
                brightness: 0.8 - progress * 0.25,
            },
            Self::Unconfigured => HsbColor {
                hue: 0.0,
                saturation: 0.0,
                brightness: 0.5,
            },
        }
    }
}
