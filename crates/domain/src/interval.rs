// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open wall-clock intervals within a single day.
//!
//! An interval `[start, end)` occupies `start` but not `end`, so two
//! bookings that touch at a boundary do not overlap.

use crate::error::DomainError;
use time::Time;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open `[start, end)` interval on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeInterval {
    start: Time,
    end: Time,
}

impl TimeInterval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInterval` unless `start < end`.
    pub fn new(start: Time, end: Time) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from its bounds without checking them.
    ///
    /// Only used for the fixed shift windows, whose bounds are known good.
    pub(crate) const fn from_bounds(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Creates the interval that starts at `start` and lasts `minutes`.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero or the interval would end
    /// after midnight.
    pub fn starting_at(start: Time, minutes: u32) -> Result<Self, DomainError> {
        if minutes == 0 {
            return Err(DomainError::InvalidInterval { start, end: start });
        }
        let end_minutes: u32 = minute_of_day(start)
            .checked_add(minutes)
            .filter(|end| *end < MINUTES_PER_DAY)
            .ok_or(DomainError::IntervalPastMidnight { start, minutes })?;
        let end: Time = time_from_minutes(end_minutes)?;
        Self::new(start, end)
    }

    /// The first instant of the interval.
    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    /// The first instant after the interval.
    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Length of the interval in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        minute_of_day(self.end) - minute_of_day(self.start)
    }

    /// `[a, b)` intersects `[c, d)` iff `a < d` and `c < b`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `other` lies entirely within this interval.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Removes every interval in `taken` from this one.
    ///
    /// `taken` may be unsorted and may overlap itself or extend beyond
    /// this interval. The result is sorted and contains no empty pieces.
    #[must_use]
    pub fn subtract(&self, taken: &[Self]) -> Vec<Self> {
        let mut blocked: Vec<Self> = taken
            .iter()
            .filter(|t| t.overlaps(self))
            .copied()
            .collect();
        blocked.sort();

        let mut free: Vec<Self> = Vec::new();
        let mut cursor: Time = self.start;
        for block in blocked {
            if block.start > cursor {
                free.push(Self::from_bounds(cursor, block.start));
            }
            if block.end > cursor {
                cursor = block.end;
            }
            if cursor >= self.end {
                break;
            }
        }
        if cursor < self.end {
            free.push(Self::from_bounds(cursor, self.end));
        }
        free
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            format_wall_clock(self.start),
            format_wall_clock(self.end)
        )
    }
}

/// Minutes elapsed since midnight. Seconds are ignored.
#[must_use]
pub fn minute_of_day(t: Time) -> u32 {
    u32::from(t.hour()) * 60 + u32::from(t.minute())
}

fn time_from_minutes(minutes: u32) -> Result<Time, DomainError> {
    let hour: u8 = u8::try_from(minutes / 60).unwrap_or(u8::MAX);
    let minute: u8 = u8::try_from(minutes % 60).unwrap_or(u8::MAX);
    Time::from_hms(hour, minute, 0).map_err(|e| DomainError::TimeParseError {
        time_string: format!("{minutes} minutes past midnight"),
        error: e.to_string(),
    })
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_wall_clock(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}
