//! Session-level aggregation
//!
//! Running totals for the workout in progress: performance tally, volume,
//! rep and set counts, and the EXP earned so far. The stats value is owned by
//! the caller and threaded through each completion event, so a session can be
//! inspected, reset or replayed without touching any ambient state.

use serde::{Deserialize, Serialize};

use crate::scoring::PerformanceVerdict;

/// The trend is suppressed until this many sets have been compared.
pub const MIN_SETS_FOR_TREND: i64 = 2;

/// EXP needed to advance one level.
pub const EXP_PER_LEVEL: i64 = 100;

/// ---------------------------------------------------------------------------
/// Session Stats
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionStats {
  pub improved: i64,
  pub declined: i64,
  pub neutral: i64,
  pub sets_analyzed: i64,
  /// Running sum of signed percent changes across analyzed sets
  pub percent_change_sum: f64,
  pub exp_gained: i64,
  pub volume: f64,
  pub sets_completed: i64,
  pub total_reps: i64,
}

impl SessionStats {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fold one set comparison into the tally.
  pub fn record_comparison(&mut self, verdict: &PerformanceVerdict) {
    if verdict.improved {
      self.improved += 1;
      self.percent_change_sum += verdict.percent_change;
    } else if verdict.declined {
      self.declined += 1;
      self.percent_change_sum += verdict.percent_change;
    } else {
      self.neutral += 1;
    }
    self.sets_analyzed += 1;
  }

  /// Back one comparison out again (set un-completed).
  pub fn revert_comparison(&mut self, verdict: &PerformanceVerdict) {
    if verdict.improved {
      self.improved -= 1;
      self.percent_change_sum -= verdict.percent_change;
    } else if verdict.declined {
      self.declined -= 1;
      self.percent_change_sum -= verdict.percent_change;
    } else {
      self.neutral -= 1;
    }
    self.sets_analyzed -= 1;
  }

  /// Count a completed set's contribution.
  pub fn record_set(&mut self, volume: f64, reps: i64, exp: i64) {
    self.sets_completed += 1;
    self.total_reps += reps;
    self.volume += volume;
    self.exp_gained += exp;
  }

  /// Remove exactly what the set contributed, floors at zero.
  pub fn revert_set(&mut self, volume: f64, reps: i64, exp: i64) {
    self.sets_completed -= 1;
    self.total_reps -= reps;
    self.volume = (self.volume - volume).max(0.0);
    self.exp_gained = (self.exp_gained - exp).max(0);
  }

  pub fn trend(&self) -> SessionTrend {
    if self.sets_analyzed < MIN_SETS_FOR_TREND {
      return SessionTrend::Unknown;
    }
    if self.improved > self.declined {
      SessionTrend::Improving
    } else if self.declined > self.improved {
      SessionTrend::Declining
    } else {
      SessionTrend::Steady
    }
  }

  pub fn average_percent_change(&self) -> f64 {
    if self.sets_analyzed > 0 {
      self.percent_change_sum / self.sets_analyzed as f64
    } else {
      0.0
    }
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}

/// ---------------------------------------------------------------------------
/// Session Trend
/// ---------------------------------------------------------------------------

/// Majority vote over the comparisons seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTrend {
  /// Not enough data yet
  Unknown,
  Improving,
  Declining,
  Steady,
}

impl SessionTrend {
  pub fn as_str(&self) -> &'static str {
    match self {
      SessionTrend::Unknown => "unknown",
      SessionTrend::Improving => "improving",
      SessionTrend::Declining => "declining",
      SessionTrend::Steady => "steady",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Levels
/// ---------------------------------------------------------------------------

pub fn level_for_exp(total_exp: i64) -> i64 {
  total_exp / EXP_PER_LEVEL + 1
}

/// EXP accumulated inside the current level.
pub fn level_progress(total_exp: i64) -> i64 {
  total_exp % EXP_PER_LEVEL
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn improved(percent: f64) -> PerformanceVerdict {
    PerformanceVerdict {
      percent_change: percent,
      improved: true,
      declined: false,
    }
  }

  fn declined(percent: f64) -> PerformanceVerdict {
    PerformanceVerdict {
      percent_change: percent,
      improved: false,
      declined: true,
    }
  }

  #[test]
  fn test_trend_suppressed_below_two_sets() {
    let mut stats = SessionStats::new();
    assert_eq!(stats.trend(), SessionTrend::Unknown);

    stats.record_comparison(&improved(10.0));
    assert_eq!(stats.trend(), SessionTrend::Unknown);

    stats.record_comparison(&improved(5.0));
    assert_eq!(stats.trend(), SessionTrend::Improving);
  }

  #[test]
  fn test_trend_majority_vote() {
    let mut stats = SessionStats::new();
    stats.record_comparison(&improved(10.0));
    stats.record_comparison(&declined(-5.0));
    stats.record_comparison(&declined(-3.0));
    assert_eq!(stats.trend(), SessionTrend::Declining);

    stats.record_comparison(&improved(8.0));
    assert_eq!(stats.trend(), SessionTrend::Steady);
  }

  #[test]
  fn test_neutral_sets_count_toward_suppression_only() {
    let mut stats = SessionStats::new();
    stats.record_comparison(&PerformanceVerdict::neutral());
    stats.record_comparison(&PerformanceVerdict::neutral());
    assert_eq!(stats.neutral, 2);
    assert_eq!(stats.trend(), SessionTrend::Steady);
    assert_eq!(stats.average_percent_change(), 0.0);
  }

  #[test]
  fn test_revert_comparison_restores_tally() {
    let mut stats = SessionStats::new();
    stats.record_comparison(&improved(10.0));
    stats.record_comparison(&declined(-4.0));
    stats.revert_comparison(&declined(-4.0));

    assert_eq!(stats.improved, 1);
    assert_eq!(stats.declined, 0);
    assert_eq!(stats.sets_analyzed, 1);
    assert_eq!(stats.percent_change_sum, 10.0);
  }

  #[test]
  fn test_average_percent_change() {
    let mut stats = SessionStats::new();
    stats.record_comparison(&improved(10.0));
    stats.record_comparison(&improved(20.0));
    assert_eq!(stats.average_percent_change(), 15.0);
  }

  #[test]
  fn test_set_contribution_roundtrip() {
    let mut stats = SessionStats::new();
    stats.record_set(500.0, 10, 4);
    stats.record_set(250.0, 8, 1);
    assert_eq!(stats.sets_completed, 2);
    assert_eq!(stats.total_reps, 18);
    assert_eq!(stats.volume, 750.0);
    assert_eq!(stats.exp_gained, 5);

    stats.revert_set(500.0, 10, 4);
    assert_eq!(stats.sets_completed, 1);
    assert_eq!(stats.total_reps, 8);
    assert_eq!(stats.volume, 250.0);
    assert_eq!(stats.exp_gained, 1);
  }

  #[test]
  fn test_revert_floors_at_zero() {
    let mut stats = SessionStats::new();
    stats.record_set(100.0, 5, 2);
    stats.revert_set(150.0, 5, 3);
    assert_eq!(stats.volume, 0.0);
    assert_eq!(stats.exp_gained, 0);
  }

  #[test]
  fn test_levels() {
    assert_eq!(level_for_exp(0), 1);
    assert_eq!(level_for_exp(99), 1);
    assert_eq!(level_for_exp(100), 2);
    assert_eq!(level_for_exp(250), 3);
    assert_eq!(level_progress(250), 50);
  }
}
