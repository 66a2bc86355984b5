use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Input Type: which metric fields a set of this exercise carries
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
  /// Barbell/dumbbell work: weight and reps
  WeightReps,
  /// Unloaded bodyweight movement: reps only
  BodyweightReps,
  /// Bodyweight movement with added load (dips with a belt)
  WeightedBodyweight,
  /// Machine-assisted bodyweight movement (assisted pull-ups)
  AssistedBodyweight,
  /// Timed hold or carry: seconds only
  Duration,
  /// Timed hold under load (weighted plank)
  DurationWeight,
  /// Cardio: distance covered over time
  DistanceDuration,
  /// Loaded carry over distance (farmer's walk)
  WeightDistance,
}

impl std::fmt::Display for InputType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::WeightReps => "weight_reps",
      Self::BodyweightReps => "bodyweight_reps",
      Self::WeightedBodyweight => "weighted_bodyweight",
      Self::AssistedBodyweight => "assisted_bodyweight",
      Self::Duration => "duration",
      Self::DurationWeight => "duration_weight",
      Self::DistanceDuration => "distance_duration",
      Self::WeightDistance => "weight_distance",
    };
    write!(f, "{}", s)
  }
}

impl std::str::FromStr for InputType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "weight_reps" => Ok(Self::WeightReps),
      "bodyweight_reps" => Ok(Self::BodyweightReps),
      "weighted_bodyweight" => Ok(Self::WeightedBodyweight),
      "assisted_bodyweight" => Ok(Self::AssistedBodyweight),
      "duration" => Ok(Self::Duration),
      "duration_weight" => Ok(Self::DurationWeight),
      "distance_duration" => Ok(Self::DistanceDuration),
      "weight_distance" => Ok(Self::WeightDistance),
      _ => Err(format!("Unknown input type: {}", s)),
    }
  }
}

impl InputType {
  /// The dimension ranges and bonuses are evaluated on.
  ///
  /// Mixed variants resolve to a single dimension: ranges for
  /// distance+duration exercises are expressed on the time component, and
  /// weight_distance on the distance covered.
  pub fn dimension(&self) -> Dimension {
    match self {
      Self::WeightReps
      | Self::BodyweightReps
      | Self::WeightedBodyweight
      | Self::AssistedBodyweight => Dimension::Reps,
      Self::Duration | Self::DurationWeight | Self::DistanceDuration => Dimension::Duration,
      Self::WeightDistance => Dimension::Distance,
    }
  }

  /// The field the progression advisor adjusts, if the variant has one.
  pub fn load_field(&self) -> Option<LoadField> {
    match self {
      Self::WeightReps | Self::DurationWeight | Self::WeightDistance => Some(LoadField::Weight),
      Self::WeightedBodyweight => Some(LoadField::AdditionalWeight),
      Self::Duration => Some(LoadField::Time),
      Self::BodyweightReps | Self::AssistedBodyweight | Self::DistanceDuration => None,
    }
  }

  /// True for variants whose sets carry a rep count.
  pub fn uses_reps(&self) -> bool {
    self.dimension() == Dimension::Reps
  }
}

/// ---------------------------------------------------------------------------
/// Dimension & Load Field
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
  Reps,
  Duration,
  Distance,
}

impl Dimension {
  pub fn as_str(&self) -> &'static str {
    match self {
      Dimension::Reps => "reps",
      Dimension::Duration => "duration",
      Dimension::Distance => "distance",
    }
  }
}

/// The set field a progression step is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadField {
  Weight,
  AdditionalWeight,
  Time,
}

/// ---------------------------------------------------------------------------
/// Exercise Spec
/// ---------------------------------------------------------------------------

/// Exercise metadata as served by the backend.
///
/// Immutable for the duration of a session; range settings change only
/// through the (external) range-settings update flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSpec {
  pub id: i64,
  pub name: String,
  pub input_type: InputType,
  #[serde(default)]
  pub range_enabled: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_reps: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_reps: Option<i64>,
  /// Seconds
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_duration: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_duration: Option<i64>,
  /// Kilometers
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_distance: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_distance: Option<f64>,
  /// Rest timer between sets, seconds; None means off
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rest_duration: Option<i64>,
}

impl ExerciseSpec {
  pub fn new(id: i64, name: impl Into<String>, input_type: InputType) -> Self {
    Self {
      id,
      name: name.into(),
      input_type,
      range_enabled: false,
      min_reps: None,
      max_reps: None,
      min_duration: None,
      max_duration: None,
      min_distance: None,
      max_distance: None,
      rest_duration: None,
    }
  }

  /// The configured band on the given dimension, as floats.
  pub fn range_for(&self, dimension: Dimension) -> (Option<f64>, Option<f64>) {
    match dimension {
      Dimension::Reps => (
        self.min_reps.map(|v| v as f64),
        self.max_reps.map(|v| v as f64),
      ),
      Dimension::Duration => (
        self.min_duration.map(|v| v as f64),
        self.max_duration.map(|v| v as f64),
      ),
      Dimension::Distance => (self.min_distance, self.max_distance),
    }
  }

  pub fn from_json(json: &str) -> Result<Self, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to parse exercise: {}", e))
  }

  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
