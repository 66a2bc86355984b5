//! Progression advisor
//!
//! Looks at the last few completed sets of the previous session and proposes
//! the load for the next one:
//! - whole window at the top of the band: step the load up
//! - whole window at the bottom: step it down
//! - mixed: hold, and say so by leaving the recommendation flag off
//!
//! Everything the advisor does not adjust is carried forward from the most
//! recent set so the UI can pre-fill the new slot in one pass.

use serde::{Deserialize, Serialize};

use crate::evaluator::classify;
use crate::models::{ExerciseSpec, LoadField, SetRecord};
use crate::scoring::UserSettings;

/// Flat step for weight-bearing progressions, kg.
const WEIGHT_STEP_KG: f64 = 2.5;
/// Relative step for pure duration progressions.
const DURATION_STEP_PCT: f64 = 0.10;
/// Floor for a stepped-down duration target, seconds.
const MIN_DURATION_SECS: i64 = 5;
/// How many completed sets of the previous session the advisor consults.
const RECENT_WINDOW: usize = 3;

// ---------------------------------------------------------------------------
/// Recommendation: proposed values for the next set slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Recommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistance_weight: Option<f64>,
    /// Which of the fields above are machine recommendations rather than
    /// carried-over values. Drives the "(Recommended)" label in the UI.
    #[serde(default)]
    pub is_recommended: RecommendedFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecommendedFields {
    #[serde(default)]
    pub weight: bool,
    #[serde(default)]
    pub additional_weight: bool,
    #[serde(default)]
    pub time: bool,
}

// ---------------------------------------------------------------------------
// Recent window
// ---------------------------------------------------------------------------

/// The last `RECENT_WINDOW` completed sets, chronological order preserved.
pub fn recent_window(previous_sets: &[SetRecord]) -> Vec<SetRecord> {
    let completed: Vec<SetRecord> = previous_sets
        .iter()
        .filter(|s| s.completed)
        .cloned()
        .collect();
    let skip = completed.len().saturating_sub(RECENT_WINDOW);
    completed.into_iter().skip(skip).collect()
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Propose values for the next set of this exercise.
///
/// Returns `None` when ranges are disabled for the exercise, recommendations
/// are turned off globally, or there is no completed history to stand on.
pub fn recommend(
    spec: &ExerciseSpec,
    previous_sets: &[SetRecord],
    settings: &UserSettings,
) -> Option<Recommendation> {
    if !settings.recommend_enabled || !spec.range_enabled {
        return None;
    }

    let window = recent_window(previous_sets);
    if window.is_empty() {
        return None;
    }

    let dimension = spec.input_type.dimension();
    let (min, max) = spec.range_for(dimension);
    let standing = classify(&window, dimension, min, max);

    // Carry everything forward from the most recent set; the step below
    // overwrites only the load-bearing field.
    let last = window.last()?;
    let mut rec = Recommendation {
        weight: last.weight,
        reps: last.reps,
        time: last.time,
        distance: last.distance,
        additional_weight: last.additional_weight,
        assistance_weight: last.assistance_weight,
        is_recommended: RecommendedFields::default(),
    };

    match spec.input_type.load_field() {
        Some(LoadField::Weight) => {
            if let Some(current) = first_nonzero(&window, |s| s.weight) {
                let (next, stepped) = step_weight(current, &standing);
                rec.weight = Some(next);
                rec.is_recommended.weight = stepped;
            }
        }
        Some(LoadField::AdditionalWeight) => {
            if let Some(current) = first_nonzero(&window, |s| s.additional_weight) {
                let (next, stepped) = step_weight(current, &standing);
                rec.additional_weight = Some(next);
                rec.is_recommended.additional_weight = stepped;
            }
        }
        Some(LoadField::Time) => {
            if let Some(current) = first_nonzero(&window, |s| s.time.map(|t| t as f64)) {
                let (next, stepped) = step_duration(current as i64, &standing);
                rec.time = Some(next);
                rec.is_recommended.time = stepped;
            }
        }
        None => {}
    }

    log::debug!(
        "recommendation for {} ({}): upper={} lower={}",
        spec.name,
        spec.input_type,
        standing.all_at_upper,
        standing.all_at_lower
    );

    Some(rec)
}

/// The load value progression steps from: the first non-zero value found
/// scanning the window in order, not necessarily the most recent set's.
fn first_nonzero(window: &[SetRecord], get: impl Fn(&SetRecord) -> Option<f64>) -> Option<f64> {
    window.iter().find_map(|s| get(s).filter(|v| *v > 0.0))
}

/// ±2.5 kg, never below zero. The bool reports whether a step was taken.
fn step_weight(current: f64, standing: &crate::evaluator::RangeStanding) -> (f64, bool) {
    if standing.all_at_upper {
        (current + WEIGHT_STEP_KG, true)
    } else if standing.all_at_lower {
        ((current - WEIGHT_STEP_KG).max(0.0), true)
    } else {
        (current, false)
    }
}

/// ±10%, rounded away from a no-op, never below `MIN_DURATION_SECS`.
fn step_duration(current: i64, standing: &crate::evaluator::RangeStanding) -> (i64, bool) {
    if standing.all_at_upper {
        let next = (current as f64 * (1.0 + DURATION_STEP_PCT)).ceil() as i64;
        (next, true)
    } else if standing.all_at_lower {
        let next = (current as f64 * (1.0 - DURATION_STEP_PCT)).floor() as i64;
        (next.max(MIN_DURATION_SECS), true)
    } else {
        (current, false)
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
