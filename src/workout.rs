//! In-memory workout draft
//!
//! Accumulates exercises and set slots while the user trains, runs the
//! completion flow (scoring plus session stats) in both directions, and
//! assembles the validated payload the backend ingests. Sending the payload
//! anywhere is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::advisor::{recommend, Recommendation, RecommendedFields};
use crate::models::{ExerciseSpec, InputType, SetRecord};
use crate::scoring::{compare_sets, exp_gain, set_volume, PerformanceVerdict, UserSettings};
use crate::session::SessionStats;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkoutError {
  #[error("no exercises found in workout data")]
  EmptyWorkout,
  #[error("workout has no completed sets")]
  NoCompletedSets,
}

/// ---------------------------------------------------------------------------
/// Logged Set: a set slot plus its per-session bookkeeping
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedSet {
  pub record: SetRecord,
  /// Counterpart from the previous session of this exercise, if any
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prev_values: Option<SetRecord>,
  /// Which fields were machine pre-filled (drives the "(Recommended)" label)
  #[serde(default)]
  pub is_recommended: RecommendedFields,
  /// EXP recorded when the set was completed; cleared when un-completed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub exp_gained: Option<i64>,
}

/// Fields a set editor can write. Invalid input never lands: negative or
/// non-finite values are dropped and the prior value kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
  Weight,
  Reps,
  Time,
  Distance,
  AdditionalWeight,
  AssistanceWeight,
}

/// What a completion toggle did, for the UI to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCompletion {
  pub completed: bool,
  /// EXP added (on completion) or removed (on un-completion)
  pub exp: i64,
  pub verdict: Option<PerformanceVerdict>,
  /// Rest countdown to start, when the exercise has one configured
  pub rest_duration: Option<i64>,
}

/// ---------------------------------------------------------------------------
/// Exercise Entry
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
  pub spec: ExerciseSpec,
  pub sets: Vec<LoggedSet>,
}

impl ExerciseEntry {
  pub fn new(spec: ExerciseSpec) -> Self {
    Self {
      spec,
      sets: Vec::new(),
    }
  }

  /// Seed the entry the way the logging screen does: one slot per set of the
  /// previous session (pre-filled from the advisor), or a single empty slot
  /// when the exercise has no history.
  pub fn from_history(
    spec: ExerciseSpec,
    previous_sets: &[SetRecord],
    settings: &UserSettings,
  ) -> Self {
    let mut entry = Self::new(spec);
    if previous_sets.is_empty() {
      entry.push_slot(None, &[], settings);
    } else {
      for previous in previous_sets {
        entry.push_slot(Some(previous), previous_sets, settings);
      }
    }
    entry
  }

  /// Append one more slot, seeded from the previous session where available.
  pub fn push_slot(
    &mut self,
    previous: Option<&SetRecord>,
    history: &[SetRecord],
    settings: &UserSettings,
  ) {
    let mut record = SetRecord::empty_for(self.spec.input_type);
    if let Some(previous) = previous {
      record.set_type = previous.set_type;
    }

    let mut is_recommended = RecommendedFields::default();
    if previous.is_some() {
      if let Some(rec) = recommend(&self.spec, history, settings) {
        apply_recommendation(&mut record, &rec);
        is_recommended = rec.is_recommended;
      }
    }

    self.sets.push(LoggedSet {
      record,
      prev_values: previous.cloned(),
      is_recommended,
      exp_gained: None,
    });
  }

  /// Apply an edit from the set inputs. Out-of-range indices and invalid
  /// numbers are ignored.
  pub fn update_value(&mut self, set_index: usize, field: SetField, value: f64) {
    if !value.is_finite() || value < 0.0 {
      return;
    }
    let Some(set) = self.sets.get_mut(set_index) else {
      return;
    };
    match field {
      SetField::Weight => set.record.weight = Some(value),
      SetField::Reps => set.record.reps = Some(value as i64),
      SetField::Time => set.record.time = Some(value as i64),
      SetField::Distance => set.record.distance = Some(value),
      SetField::AdditionalWeight => set.record.additional_weight = Some(value),
      SetField::AssistanceWeight => set.record.assistance_weight = Some(value),
    }
  }

  /// Flip a set's completion state and run the scoring flow in the matching
  /// direction, folding the result into `stats`.
  pub fn toggle_completed(
    &mut self,
    set_index: usize,
    settings: &UserSettings,
    stats: &mut SessionStats,
  ) -> Option<SetCompletion> {
    let input_type = self.spec.input_type;
    let set = self.sets.get_mut(set_index)?;

    let verdict = set
      .prev_values
      .as_ref()
      .map(|prev| compare_sets(input_type, &set.record, prev, settings));
    let volume = set_volume(input_type, &set.record, settings);
    let reps = set.record.reps.unwrap_or(0);

    if !set.record.completed {
      set.record.completed = true;
      let exp = exp_gain(&self.spec, &set.record, set.prev_values.as_ref());
      set.exp_gained = Some(exp);

      if let Some(verdict) = &verdict {
        stats.record_comparison(verdict);
      }
      stats.record_set(volume, reps, exp);

      log::debug!("completed set {} of {}: +{} EXP", set_index + 1, self.spec.name, exp);
      Some(SetCompletion {
        completed: true,
        exp,
        verdict,
        rest_duration: self.spec.rest_duration,
      })
    } else {
      set.record.completed = false;
      let exp = set.exp_gained.take().unwrap_or(0);

      if let Some(verdict) = &verdict {
        stats.revert_comparison(verdict);
      }
      stats.revert_set(volume, reps, exp);

      Some(SetCompletion {
        completed: false,
        exp,
        verdict,
        rest_duration: None,
      })
    }
  }

  pub fn has_completed_sets(&self) -> bool {
    self.sets.iter().any(|s| s.record.completed)
  }
}

// Pre-fill a fresh slot from the advisor's proposal.
fn apply_recommendation(record: &mut SetRecord, rec: &Recommendation) {
  if rec.weight.is_some() {
    record.weight = rec.weight;
  }
  if rec.reps.is_some() {
    record.reps = rec.reps;
  }
  if rec.time.is_some() {
    record.time = rec.time;
  }
  if rec.distance.is_some() {
    record.distance = rec.distance;
  }
  if rec.additional_weight.is_some() {
    record.additional_weight = rec.additional_weight;
  }
  if rec.assistance_weight.is_some() {
    record.assistance_weight = rec.assistance_weight;
  }
}

/// ---------------------------------------------------------------------------
/// Workout Draft & Log Payload
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDraft {
  pub entries: Vec<ExerciseEntry>,
  pub title: String,
  pub description: String,
  /// 1-5 stars
  pub rating: u8,
  pub started_at: DateTime<Utc>,
}

impl WorkoutDraft {
  pub fn new(started_at: DateTime<Utc>) -> Self {
    Self {
      entries: Vec::new(),
      title: String::new(),
      description: String::new(),
      rating: 3,
      started_at,
    }
  }

  /// Add an exercise unless it is already in the draft.
  pub fn add_exercise(&mut self, entry: ExerciseEntry) {
    if self.entries.iter().any(|e| e.spec.id == entry.spec.id) {
      return;
    }
    self.entries.push(entry);
  }

  pub fn has_completed_sets(&self) -> bool {
    self.entries.iter().any(|e| e.has_completed_sets())
  }

  /// Validate and assemble the payload for the log-workout endpoint. Only
  /// completed sets survive, shaped down to their variant's fields.
  pub fn finish(
    &self,
    stats: &SessionStats,
    duration_secs: i64,
  ) -> Result<WorkoutLog, WorkoutError> {
    if self.entries.is_empty() {
      return Err(WorkoutError::EmptyWorkout);
    }
    if !self.has_completed_sets() {
      return Err(WorkoutError::NoCompletedSets);
    }

    let exercises = self
      .entries
      .iter()
      .map(|entry| LoggedExercise {
        id: entry.spec.id,
        name: entry.spec.name.clone(),
        input_type: entry.spec.input_type,
        range_enabled: entry.spec.range_enabled,
        rest_duration: entry.spec.rest_duration,
        sets: entry
          .sets
          .iter()
          .filter(|s| s.record.completed)
          .map(|s| s.record.normalized(entry.spec.input_type))
          .collect(),
      })
      .collect();

    let title = if self.title.is_empty() {
      "Workout".to_string()
    } else {
      self.title.clone()
    };

    log::debug!(
      "finishing workout: {} sets, {} EXP",
      stats.sets_completed,
      stats.exp_gained
    );

    Ok(WorkoutLog {
      exercises,
      title,
      description: self.description.clone(),
      rating: self.rating,
      duration: duration_secs,
      volume: stats.volume,
      total_reps: stats.total_reps,
      sets_completed: stats.sets_completed,
      exp_gained: stats.exp_gained,
      started_at: self.started_at,
    })
  }
}

/// The wire shape the backend ingests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
  pub exercises: Vec<LoggedExercise>,
  pub title: String,
  pub description: String,
  pub rating: u8,
  /// Wall-clock duration, seconds
  pub duration: i64,
  pub volume: f64,
  pub total_reps: i64,
  pub sets_completed: i64,
  pub exp_gained: i64,
  pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedExercise {
  pub id: i64,
  pub name: String,
  pub input_type: InputType,
  pub range_enabled: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rest_duration: Option<i64>,
  pub sets: Vec<SetRecord>,
}

impl WorkoutLog {
  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
