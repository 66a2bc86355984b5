use serde::{Deserialize, Serialize};

use super::exercise::{Dimension, InputType};

/// ---------------------------------------------------------------------------
/// Set Type
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
  #[default]
  Normal,
  Warmup,
  Failure,
  Drop,
  Right,
  Left,
  Negative,
  Partial,
}

/// ---------------------------------------------------------------------------
/// Set Record
/// ---------------------------------------------------------------------------

/// One performed (or pending) unit of an exercise.
///
/// Which fields are populated is determined entirely by the exercise's
/// `InputType`; the rest stay `None`. Absent numerics always read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SetRecord {
  /// Kilograms
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weight: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reps: Option<i64>,
  /// Seconds
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time: Option<i64>,
  /// Kilometers
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distance: Option<f64>,
  /// Kilograms added on top of bodyweight
  #[serde(skip_serializing_if = "Option::is_none")]
  pub additional_weight: Option<f64>,
  /// Kilograms of machine assistance
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assistance_weight: Option<f64>,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub set_type: SetType,
}

impl SetRecord {
  /// A fresh, zeroed slot with exactly the fields the variant carries.
  pub fn empty_for(input_type: InputType) -> Self {
    let mut set = Self::default();
    match input_type {
      InputType::WeightReps => {
        set.weight = Some(0.0);
        set.reps = Some(0);
      }
      InputType::BodyweightReps => {
        set.reps = Some(0);
      }
      InputType::WeightedBodyweight => {
        set.additional_weight = Some(0.0);
        set.reps = Some(0);
      }
      InputType::AssistedBodyweight => {
        set.assistance_weight = Some(0.0);
        set.reps = Some(0);
      }
      InputType::Duration => {
        set.time = Some(0);
      }
      InputType::DurationWeight => {
        set.weight = Some(0.0);
        set.time = Some(0);
      }
      InputType::DistanceDuration => {
        set.distance = Some(0.0);
        set.time = Some(0);
      }
      InputType::WeightDistance => {
        set.weight = Some(0.0);
        set.distance = Some(0.0);
      }
    }
    set
  }

  /// Value of the given dimension, missing data reading as zero.
  pub fn metric(&self, dimension: Dimension) -> f64 {
    match dimension {
      Dimension::Reps => self.reps.unwrap_or(0) as f64,
      Dimension::Duration => self.time.unwrap_or(0) as f64,
      Dimension::Distance => self.distance.unwrap_or(0.0),
    }
  }

  /// Copy shaped for the log payload: only the variant's fields survive,
  /// absent values coerced to zero.
  pub fn normalized(&self, input_type: InputType) -> Self {
    let mut clean = SetRecord {
      completed: self.completed,
      set_type: self.set_type,
      ..Self::default()
    };
    match input_type {
      InputType::WeightReps => {
        clean.weight = Some(self.weight.unwrap_or(0.0));
        clean.reps = Some(self.reps.unwrap_or(0));
      }
      InputType::BodyweightReps => {
        clean.reps = Some(self.reps.unwrap_or(0));
      }
      InputType::WeightedBodyweight => {
        clean.additional_weight = Some(self.additional_weight.unwrap_or(0.0));
        clean.reps = Some(self.reps.unwrap_or(0));
      }
      InputType::AssistedBodyweight => {
        clean.assistance_weight = Some(self.assistance_weight.unwrap_or(0.0));
        clean.reps = Some(self.reps.unwrap_or(0));
      }
      InputType::Duration => {
        clean.time = Some(self.time.unwrap_or(0));
      }
      InputType::DurationWeight => {
        clean.weight = Some(self.weight.unwrap_or(0.0));
        clean.time = Some(self.time.unwrap_or(0));
      }
      InputType::DistanceDuration => {
        clean.distance = Some(self.distance.unwrap_or(0.0));
        clean.time = Some(self.time.unwrap_or(0));
      }
      InputType::WeightDistance => {
        clean.weight = Some(self.weight.unwrap_or(0.0));
        clean.distance = Some(self.distance.unwrap_or(0.0));
      }
    }
    clean
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
