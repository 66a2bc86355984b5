//! Deterministic scoring layer for completed sets
//!
//! Compares a just-completed set against its counterpart from the previous
//! session and produces the values the UI renders: a percent-change verdict,
//! the set's training volume, and the experience points awarded.

use serde::{Deserialize, Serialize};

use crate::models::{ExerciseSpec, InputType, SetRecord};

/// Assumed bodyweight when the user has not recorded one, kg.
pub const DEFAULT_BODYWEIGHT_KG: f64 = 75.0;

/// Completing a set is always worth this much.
const BASE_SET_EXP: i64 = 1;
/// Cap on EXP from volume improvement.
const VOLUME_EXP_CAP: f64 = 10.0;
/// Flat bonus for a volume improvement above `VOLUME_SURGE_THRESHOLD`.
const VOLUME_SURGE_BONUS: i64 = 5;
const VOLUME_SURGE_THRESHOLD: f64 = 0.2;
/// Caps on EXP from duration, distance and pace improvement.
const DURATION_EXP_CAP: f64 = 10.0;
const DISTANCE_EXP_CAP: f64 = 8.0;
const PACE_EXP_CAP: f64 = 7.0;
/// Range adherence: meeting the ceiling vs merely staying in the band.
const RANGE_TOP_BONUS: i64 = 3;
const RANGE_IN_BAND_BONUS: i64 = 1;

/// ---------------------------------------------------------------------------
/// User Settings
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
  /// Recorded bodyweight, kg
  pub bodyweight_kg: Option<f64>,
  /// Global switch for progression recommendations
  pub recommend_enabled: bool,
}

impl Default for UserSettings {
  fn default() -> Self {
    Self {
      bodyweight_kg: None,
      recommend_enabled: true,
    }
  }
}

impl UserSettings {
  /// Bodyweight to score with, falling back to the assumed constant
  pub fn effective_bodyweight(&self) -> f64 {
    self.bodyweight_kg.unwrap_or(DEFAULT_BODYWEIGHT_KG)
  }
}

/// ---------------------------------------------------------------------------
/// Performance Verdict
/// ---------------------------------------------------------------------------

/// Outcome of comparing one set against its previous-session counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceVerdict {
  pub percent_change: f64,
  pub improved: bool,
  pub declined: bool,
}

impl PerformanceVerdict {
  /// No comparison possible, or the values tied.
  pub fn neutral() -> Self {
    Self {
      percent_change: 0.0,
      improved: false,
      declined: false,
    }
  }

  /// Higher-is-better comparison, guarded against a missing baseline.
  fn from_values(current: f64, previous: f64) -> Self {
    if previous <= 0.0 {
      return Self::neutral();
    }
    Self {
      percent_change: (current - previous) / previous * 100.0,
      improved: current > previous,
      declined: current < previous,
    }
  }

  /// Lower-is-better comparison (pace).
  fn from_pace(current: f64, previous: f64) -> Self {
    if previous <= 0.0 || !previous.is_finite() || !current.is_finite() {
      return Self::neutral();
    }
    Self {
      percent_change: (previous - current) / previous * 100.0,
      improved: current < previous,
      declined: current > previous,
    }
  }
}

/// Compare a set against its previous-session counterpart.
///
/// The metric is dictated by the variant; combined-load variants
/// (duration_weight, weight_distance) have no like-for-like comparison and
/// come back neutral, as does any comparison with a zero baseline.
pub fn compare_sets(
  input_type: InputType,
  current: &SetRecord,
  previous: &SetRecord,
  settings: &UserSettings,
) -> PerformanceVerdict {
  let bodyweight = settings.effective_bodyweight();

  match input_type {
    InputType::WeightReps => {
      let current_volume = current.weight.unwrap_or(0.0) * current.reps.unwrap_or(0) as f64;
      let previous_volume = previous.weight.unwrap_or(0.0) * previous.reps.unwrap_or(0) as f64;
      PerformanceVerdict::from_values(current_volume, previous_volume)
    }
    InputType::BodyweightReps => PerformanceVerdict::from_values(
      current.reps.unwrap_or(0) as f64,
      previous.reps.unwrap_or(0) as f64,
    ),
    InputType::WeightedBodyweight => {
      let current_value =
        (bodyweight + current.additional_weight.unwrap_or(0.0)) * current.reps.unwrap_or(0) as f64;
      let previous_value = (bodyweight + previous.additional_weight.unwrap_or(0.0))
        * previous.reps.unwrap_or(0) as f64;
      PerformanceVerdict::from_values(current_value, previous_value)
    }
    InputType::AssistedBodyweight => {
      // Effective strength: fewer kilos of assistance for the same reps wins
      let current_strength =
        current.reps.unwrap_or(0) as f64 * (bodyweight - current.assistance_weight.unwrap_or(0.0));
      let previous_strength = previous.reps.unwrap_or(0) as f64
        * (bodyweight - previous.assistance_weight.unwrap_or(0.0));
      PerformanceVerdict::from_values(current_strength, previous_strength)
    }
    InputType::Duration => PerformanceVerdict::from_values(
      current.time.unwrap_or(0) as f64,
      previous.time.unwrap_or(0) as f64,
    ),
    InputType::DistanceDuration => {
      let current_distance = current.distance.unwrap_or(0.0);
      let previous_distance = previous.distance.unwrap_or(0.0);
      if current_distance <= 0.0 || previous_distance <= 0.0 {
        return PerformanceVerdict::neutral();
      }
      let current_pace = positive_or_one(current.time) / current_distance;
      let previous_pace = positive_or_one(previous.time) / previous_distance;
      PerformanceVerdict::from_pace(current_pace, previous_pace)
    }
    InputType::DurationWeight | InputType::WeightDistance => PerformanceVerdict::neutral(),
  }
}

// Zero durations read as one second so a pace always exists.
fn positive_or_one(time: Option<i64>) -> f64 {
  match time {
    Some(t) if t > 0 => t as f64,
    _ => 1.0,
  }
}

/// ---------------------------------------------------------------------------
/// Volume
/// ---------------------------------------------------------------------------

/// Training volume contributed by one completed set, in kg-equivalents.
///
/// Pure duration and distance variants carry no load and contribute zero.
pub fn set_volume(input_type: InputType, set: &SetRecord, settings: &UserSettings) -> f64 {
  let bodyweight = settings.effective_bodyweight();
  let reps = set.reps.unwrap_or(0) as f64;

  match input_type {
    InputType::WeightReps => set.weight.unwrap_or(0.0) * reps,
    InputType::BodyweightReps => bodyweight * reps,
    InputType::WeightedBodyweight => (bodyweight + set.additional_weight.unwrap_or(0.0)) * reps,
    InputType::AssistedBodyweight => {
      (bodyweight - set.assistance_weight.unwrap_or(0.0)).max(0.0) * reps
    }
    // Load held over time: kilos x minutes
    InputType::DurationWeight => set.weight.unwrap_or(0.0) * (set.time.unwrap_or(0) as f64 / 60.0),
    InputType::WeightDistance => set.weight.unwrap_or(0.0) * set.distance.unwrap_or(0.0),
    InputType::Duration | InputType::DistanceDuration => 0.0,
  }
}

/// ---------------------------------------------------------------------------
/// Experience Points
/// ---------------------------------------------------------------------------

/// EXP awarded for a completed set: a base point, improvement over the
/// previous session, and range adherence. Never less than one.
///
/// Without previous-session values there is nothing to improve on and the
/// set is worth the base point alone.
pub fn exp_gain(spec: &ExerciseSpec, current: &SetRecord, previous: Option<&SetRecord>) -> i64 {
  let Some(previous) = previous else {
    return BASE_SET_EXP;
  };

  let mut exp = BASE_SET_EXP;

  match spec.input_type {
    InputType::WeightReps => {
      let current_volume = current.weight.unwrap_or(0.0) * current.reps.unwrap_or(0) as f64;
      let previous_volume = previous.weight.unwrap_or(0.0) * previous.reps.unwrap_or(0) as f64;

      if current_volume > previous_volume {
        let improvement = (current_volume - previous_volume) / previous_volume;
        exp += (improvement * 20.0).ceil().min(VOLUME_EXP_CAP) as i64;
        if improvement > VOLUME_SURGE_THRESHOLD {
          exp += VOLUME_SURGE_BONUS;
        }
      }
    }
    InputType::Duration => {
      let current_duration = current.time.unwrap_or(0) as f64;
      let previous_duration = previous.time.unwrap_or(0) as f64;

      if current_duration > previous_duration && previous_duration > 0.0 {
        let improvement = (current_duration - previous_duration) / previous_duration;
        exp += (improvement * 10.0).ceil().min(DURATION_EXP_CAP) as i64;
      }
    }
    InputType::DistanceDuration => {
      let current_distance = current.distance.unwrap_or(0.0);
      let previous_distance = previous.distance.unwrap_or(0.0);

      if current_distance > previous_distance && previous_distance > 0.0 {
        let improvement = (current_distance - previous_distance) / previous_distance;
        exp += (improvement * 10.0).ceil().min(DISTANCE_EXP_CAP) as i64;
      }

      if current_distance > 0.0 && previous_distance > 0.0 {
        let current_pace = positive_or_one(current.time) / current_distance;
        let previous_pace = positive_or_one(previous.time) / previous_distance;
        if current_pace < previous_pace {
          let improvement = (previous_pace - current_pace) / previous_pace;
          exp += (improvement * 15.0).ceil().min(PACE_EXP_CAP) as i64;
        }
      }
    }
    // Bodyweight and combined-load variants earn through range adherence only
    InputType::BodyweightReps
    | InputType::WeightedBodyweight
    | InputType::AssistedBodyweight
    | InputType::DurationWeight
    | InputType::WeightDistance => {}
  }

  exp += range_bonus(spec, current);

  let total = exp.max(BASE_SET_EXP);
  log::debug!("set EXP for {}: {}", spec.name, total);
  total
}

/// Working at or above the ceiling earns the top bonus, staying inside the
/// band a smaller one. Needs a configured ceiling to mean anything.
fn range_bonus(spec: &ExerciseSpec, set: &SetRecord) -> i64 {
  if !spec.range_enabled {
    return 0;
  }

  let dimension = spec.input_type.dimension();
  let (min, max) = spec.range_for(dimension);
  let Some(max) = max else {
    return 0;
  };

  let value = set.metric(dimension);
  if value >= max {
    RANGE_TOP_BONUS
  } else if min.is_some_and(|m| value >= m) {
    RANGE_IN_BAND_BONUS
  } else {
    0
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::SetType;

  fn weight_set(weight: f64, reps: i64) -> SetRecord {
    SetRecord {
      weight: Some(weight),
      reps: Some(reps),
      completed: true,
      ..Default::default()
    }
  }

  fn cardio_set(distance: f64, time: i64) -> SetRecord {
    SetRecord {
      distance: Some(distance),
      time: Some(time),
      completed: true,
      ..Default::default()
    }
  }

  fn plain_spec(input_type: InputType) -> ExerciseSpec {
    ExerciseSpec::new(1, "Test Exercise", input_type)
  }

  #[test]
  fn test_volume_comparison_improved() {
    let verdict = compare_sets(
      InputType::WeightReps,
      &weight_set(50.0, 10),
      &weight_set(45.0, 10),
      &UserSettings::default(),
    );
    assert!(verdict.improved);
    assert!(!verdict.declined);
    assert!((verdict.percent_change - 11.111).abs() < 0.01);
  }

  #[test]
  fn test_zero_baseline_is_neutral() {
    let verdict = compare_sets(
      InputType::WeightReps,
      &weight_set(50.0, 10),
      &weight_set(0.0, 0),
      &UserSettings::default(),
    );
    assert_eq!(verdict, PerformanceVerdict::neutral());
  }

  #[test]
  fn test_tie_is_neutral() {
    let verdict = compare_sets(
      InputType::WeightReps,
      &weight_set(50.0, 10),
      &weight_set(50.0, 10),
      &UserSettings::default(),
    );
    assert!(!verdict.improved);
    assert!(!verdict.declined);
    assert_eq!(verdict.percent_change, 0.0);
  }

  #[test]
  fn test_assisted_bodyweight_less_assistance_wins() {
    let current = SetRecord {
      reps: Some(8),
      assistance_weight: Some(20.0),
      completed: true,
      ..Default::default()
    };
    let previous = SetRecord {
      reps: Some(8),
      assistance_weight: Some(25.0),
      completed: true,
      ..Default::default()
    };
    let verdict = compare_sets(
      InputType::AssistedBodyweight,
      &current,
      &previous,
      &UserSettings::default(),
    );
    assert!(verdict.improved);
  }

  #[test]
  fn test_pace_comparison_lower_is_better() {
    // 5 km in 25:00 beats 5 km in 26:00
    let verdict = compare_sets(
      InputType::DistanceDuration,
      &cardio_set(5.0, 1500),
      &cardio_set(5.0, 1560),
      &UserSettings::default(),
    );
    assert!(verdict.improved);
    assert!(verdict.percent_change > 0.0);

    let verdict = compare_sets(
      InputType::DistanceDuration,
      &cardio_set(5.0, 1560),
      &cardio_set(5.0, 1500),
      &UserSettings::default(),
    );
    assert!(verdict.declined);
  }

  #[test]
  fn test_combined_load_variants_are_neutral() {
    let current = SetRecord {
      weight: Some(20.0),
      time: Some(60),
      completed: true,
      ..Default::default()
    };
    let previous = SetRecord {
      weight: Some(10.0),
      time: Some(30),
      completed: true,
      ..Default::default()
    };
    let verdict = compare_sets(
      InputType::DurationWeight,
      &current,
      &previous,
      &UserSettings::default(),
    );
    assert_eq!(verdict, PerformanceVerdict::neutral());
  }

  #[test]
  fn test_recorded_bodyweight_overrides_default() {
    let settings = UserSettings {
      bodyweight_kg: Some(80.0),
      ..Default::default()
    };
    assert_eq!(settings.effective_bodyweight(), 80.0);
    assert_eq!(UserSettings::default().effective_bodyweight(), 75.0);
  }

  #[test]
  fn test_volume_per_variant() {
    let settings = UserSettings::default();
    assert_eq!(
      set_volume(InputType::WeightReps, &weight_set(50.0, 10), &settings),
      500.0
    );

    let bodyweight = SetRecord {
      reps: Some(10),
      completed: true,
      ..Default::default()
    };
    assert_eq!(
      set_volume(InputType::BodyweightReps, &bodyweight, &settings),
      750.0
    );

    let weighted = SetRecord {
      reps: Some(10),
      additional_weight: Some(10.0),
      completed: true,
      ..Default::default()
    };
    assert_eq!(
      set_volume(InputType::WeightedBodyweight, &weighted, &settings),
      850.0
    );

    let assisted = SetRecord {
      reps: Some(10),
      assistance_weight: Some(90.0),
      completed: true,
      ..Default::default()
    };
    // Assistance beyond bodyweight clamps to zero, not negative volume
    assert_eq!(
      set_volume(InputType::AssistedBodyweight, &assisted, &settings),
      0.0
    );

    let hold = SetRecord {
      weight: Some(20.0),
      time: Some(90),
      completed: true,
      ..Default::default()
    };
    assert_eq!(set_volume(InputType::DurationWeight, &hold, &settings), 30.0);

    assert_eq!(
      set_volume(InputType::Duration, &cardio_set(0.0, 600), &settings),
      0.0
    );
  }

  #[test]
  fn test_exp_modest_volume_gain() {
    // 500 vs 450: 11.1% up, ceil(0.111 * 20) = 3, no surge bonus
    let exp = exp_gain(
      &plain_spec(InputType::WeightReps),
      &weight_set(50.0, 10),
      Some(&weight_set(45.0, 10)),
    );
    assert_eq!(exp, 4);
  }

  #[test]
  fn test_exp_surge_bonus_above_twenty_percent() {
    // 600 vs 450: 33% up, ceil(6.67) = 7, +5 surge
    let exp = exp_gain(
      &plain_spec(InputType::WeightReps),
      &weight_set(60.0, 10),
      Some(&weight_set(45.0, 10)),
    );
    assert_eq!(exp, 13);
  }

  #[test]
  fn test_exp_volume_component_is_capped() {
    let exp = exp_gain(
      &plain_spec(InputType::WeightReps),
      &weight_set(500.0, 10),
      Some(&weight_set(45.0, 10)),
    );
    assert_eq!(exp, 1 + 10 + 5);
  }

  #[test]
  fn test_exp_floor_on_decline() {
    let exp = exp_gain(
      &plain_spec(InputType::WeightReps),
      &weight_set(40.0, 10),
      Some(&weight_set(45.0, 10)),
    );
    assert_eq!(exp, 1);
  }

  #[test]
  fn test_exp_without_previous_is_base() {
    let exp = exp_gain(&plain_spec(InputType::WeightReps), &weight_set(50.0, 10), None);
    assert_eq!(exp, 1);
  }

  #[test]
  fn test_exp_duration_gain() {
    // 120 s vs 100 s: ceil(0.2 * 10) = 2
    let current = SetRecord {
      time: Some(120),
      completed: true,
      ..Default::default()
    };
    let previous = SetRecord {
      time: Some(100),
      completed: true,
      ..Default::default()
    };
    let exp = exp_gain(&plain_spec(InputType::Duration), &current, Some(&previous));
    assert_eq!(exp, 3);
  }

  #[test]
  fn test_exp_cardio_distance_and_pace() {
    // Distance 5.0 -> 5.5 km: ceil(0.1 * 10) = 1
    // Pace 310 -> 300 s/km: ceil(0.0323 * 15) = 1
    let exp = exp_gain(
      &plain_spec(InputType::DistanceDuration),
      &cardio_set(5.5, 1650),
      Some(&cardio_set(5.0, 1550)),
    );
    assert_eq!(exp, 3);
  }

  #[test]
  fn test_exp_range_bonus_at_ceiling() {
    let mut spec = plain_spec(InputType::WeightReps);
    spec.range_enabled = true;
    spec.min_reps = Some(6);
    spec.max_reps = Some(10);

    // Matching volume, 10 reps meets the ceiling: 1 + 3
    let exp = exp_gain(&spec, &weight_set(45.0, 10), Some(&weight_set(45.0, 10)));
    assert_eq!(exp, 4);

    // 8 reps stays in the band: 1 + 1
    let current = weight_set(45.0, 8);
    let previous = weight_set(45.0, 8);
    assert_eq!(exp_gain(&spec, &current, Some(&previous)), 2);

    // 5 reps falls below the band: base only
    let current = weight_set(45.0, 5);
    let previous = weight_set(45.0, 5);
    assert_eq!(exp_gain(&spec, &current, Some(&previous)), 1);
  }

  #[test]
  fn test_exp_range_bonus_needs_a_ceiling() {
    let mut spec = plain_spec(InputType::WeightReps);
    spec.range_enabled = true;
    spec.min_reps = Some(6);

    let exp = exp_gain(&spec, &weight_set(45.0, 12), Some(&weight_set(45.0, 12)));
    assert_eq!(exp, 1);
  }

  #[test]
  fn test_exp_always_at_least_one() {
    let empty = SetRecord {
      set_type: SetType::Failure,
      completed: true,
      ..Default::default()
    };
    let exp = exp_gain(&plain_spec(InputType::WeightReps), &empty, Some(&empty));
    assert!(exp >= 1);
  }
}
