//! Range classification over a window of recent sets
//!
//! Answers one question for the progression advisor: did the lifter spend the
//! whole previous session at the top of the configured band, at the bottom,
//! or somewhere in between.

use crate::models::{Dimension, SetRecord};

// ---------------------------------------------------------------------------
/// Range Standing: where the window sits relative to the configured band
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeStanding {
    /// Every set's value reached or exceeded the upper bound
    pub all_at_upper: bool,
    /// Every set's value sat at or below the lower bound
    pub all_at_lower: bool,
}

impl RangeStanding {
    /// Neither flag set: mixed performance, hold the current load.
    pub fn is_mixed(&self) -> bool {
        !self.all_at_upper && !self.all_at_lower
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a window of completed sets against a configured band.
///
/// Both flags start `true` and are cleared by any set that contradicts them,
/// so an empty window classifies as at-both-bounds (vacuous truth). Callers
/// gate on a non-empty window before acting on the answer. A bound left
/// unconfigured is skipped: it never clears its flag. When *neither* bound is
/// configured there is no band to stand against and both flags are `false`.
pub fn classify(
    recent_sets: &[SetRecord],
    dimension: Dimension,
    min: Option<f64>,
    max: Option<f64>,
) -> RangeStanding {
    if min.is_none() && max.is_none() {
        return RangeStanding {
            all_at_upper: false,
            all_at_lower: false,
        };
    }

    let mut all_at_upper = true;
    let mut all_at_lower = true;

    for set in recent_sets {
        let value = set.metric(dimension);
        if let Some(max) = max {
            if value < max {
                all_at_upper = false;
            }
        }
        if let Some(min) = min {
            if value > min {
                all_at_lower = false;
            }
        }
    }

    RangeStanding {
        all_at_upper,
        all_at_lower,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
