//! Decision core for a set-logging workout tracker.
//!
//! Pure logic only: range classification, progression recommendations,
//! per-set scoring and EXP, session aggregation, workout assembly, and the
//! tick-driven timers. Rendering, storage and network belong to the
//! surrounding application.

pub mod advisor;
pub mod evaluator;
pub mod models;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod workout;

pub use advisor::{recommend, Recommendation, RecommendedFields};
pub use evaluator::{classify, RangeStanding};
pub use models::{Dimension, ExerciseSpec, InputType, LoadField, SetRecord, SetType};
pub use scoring::{
  compare_sets, exp_gain, set_volume, PerformanceVerdict, UserSettings, DEFAULT_BODYWEIGHT_KG,
};
pub use session::{level_for_exp, level_progress, SessionStats, SessionTrend};
pub use timer::{RestTick, RestTimer, WorkoutClock};
pub use workout::{
  ExerciseEntry, LoggedExercise, LoggedSet, SetCompletion, SetField, WorkoutDraft, WorkoutError,
  WorkoutLog,
};
