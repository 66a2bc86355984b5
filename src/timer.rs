//! Tick-driven timers
//!
//! Pure state machines for the rest countdown and the elapsed workout clock.
//! The UI layer owns the actual 1 Hz tick source and everything audible or
//! visible; these types only keep the time.

// ---------------------------------------------------------------------------
/// Rest Timer: countdown between sets
// ---------------------------------------------------------------------------

/// What one tick of the rest countdown produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestTick {
    /// Counting down, seconds remaining
    Running(i64),
    /// Paused, seconds remaining
    Paused(i64),
    /// Hit zero on this tick
    Finished,
    /// Cancelled or already finished
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTimer {
    total_secs: i64,
    remaining_secs: i64,
    paused: bool,
    active: bool,
}

impl RestTimer {
    pub fn start(seconds: i64) -> Self {
        let seconds = seconds.max(0);
        Self {
            total_secs: seconds,
            remaining_secs: seconds,
            paused: false,
            active: seconds > 0,
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> RestTick {
        if !self.active {
            return RestTick::Inactive;
        }
        if self.paused {
            return RestTick::Paused(self.remaining_secs);
        }

        self.remaining_secs -= 1;
        if self.remaining_secs <= 0 {
            self.remaining_secs = 0;
            self.active = false;
            RestTick::Finished
        } else {
            RestTick::Running(self.remaining_secs)
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.active {
            self.paused = !self.paused;
        }
    }

    /// Back to the full configured duration, running.
    pub fn restart(&mut self) {
        if self.total_secs > 0 {
            self.remaining_secs = self.total_secs;
            self.paused = false;
            self.active = true;
        }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

// ---------------------------------------------------------------------------
/// Workout Clock: elapsed session time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkoutClock {
    elapsed_secs: i64,
    paused: bool,
}

impl WorkoutClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one second while running.
    pub fn tick(&mut self) {
        if !self.paused {
            self.elapsed_secs += 1;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Zero the clock and keep it running.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Elapsed seconds, as recorded on the final workout payload.
    pub fn duration_secs(&self) -> i64 {
        self.elapsed_secs
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
