// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Named working shifts and their fixed wall-clock windows.

use crate::error::DomainError;
use crate::interval::TimeInterval;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::time;

/// A named, fixed wall-clock window in which staff may be booked.
///
/// | shift     | window        |
/// |-----------|---------------|
/// | morning   | 08:00 - 12:00 |
/// | afternoon | 13:00 - 17:00 |
/// | evening   | 18:00 - 21:00 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// 08:00 - 12:00
    Morning,
    /// 13:00 - 17:00
    Afternoon,
    /// 18:00 - 21:00
    Evening,
}

impl ShiftKind {
    /// All shifts in chronological order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Returns the string representation of the shift.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Returns the wall-clock window of this shift.
    #[must_use]
    pub const fn window(&self) -> TimeInterval {
        match self {
            Self::Morning => TimeInterval::from_bounds(time!(8:00), time!(12:00)),
            Self::Afternoon => TimeInterval::from_bounds(time!(13:00), time!(17:00)),
            Self::Evening => TimeInterval::from_bounds(time!(18:00), time!(21:00)),
        }
    }
}

impl FromStr for ShiftKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(DomainError::InvalidShiftKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
