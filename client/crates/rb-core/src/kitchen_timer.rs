//! Countdown timer for the kitchen.
//!
//! The timer holds no clock of its own; the owner calls [`KitchenTimer::tick`]
//! once per second while it is running.

use crate::{CoreError, Result as CoreResult};

pub const INVALID_TIME_MESSAGE: &str = "Please enter a valid time";

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MINUTE: i64 = 60;

/// Result of advancing the timer by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is paused or was never started
    Idle,
    /// Still counting down
    Running { remaining_secs: u64 },
    /// Reached zero on this tick
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitchenTimer {
    remaining_secs: u64,
    running: bool,
    finished: bool,
}

impl KitchenTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or resume the countdown.
    ///
    /// A paused timer resumes with its remaining time and ignores the inputs.
    /// Otherwise the inputs are parsed leniently: blank or non-numeric parts
    /// count as zero.
    #[track_caller]
    pub fn start(&mut self, hours: &str, minutes: &str, seconds: &str) -> CoreResult<()> {
        if self.remaining_secs == 0 {
            let total = parse_leading_int(hours)
                .saturating_mul(SECS_PER_HOUR)
                .saturating_add(parse_leading_int(minutes).saturating_mul(SECS_PER_MINUTE))
                .saturating_add(parse_leading_int(seconds));

            if total <= 0 {
                return Err(CoreError::validation(INVALID_TIME_MESSAGE));
            }
            self.remaining_secs = total as u64;
        }

        self.running = true;
        self.finished = false;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining_secs == 0 {
            return TickOutcome::Idle;
        }

        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.running = false;
            self.finished = true;
            return TickOutcome::Finished;
        }

        self.remaining_secs -= 1;
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Drop the finished flag once the completion cue has played.
    pub fn acknowledge_finished(&mut self) {
        self.finished = false;
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }
}

/// `HH:MM:SS`, hours are not wrapped at 24.
pub fn format_time(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}

/// Leading optionally-signed integer of `s`, or 0.
fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
