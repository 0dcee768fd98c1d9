// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Which shifts each staff member works on each date.
//!
//! The calendar is a plain mapping `(staff, date) -> open shifts`. A
//! missing entry means the staff member is unavailable that day. There is
//! no history; overwriting an entry replaces it.

use bloom_domain::{ShiftKind, StaffId, TimeInterval};
use dashmap::DashMap;
use std::collections::BTreeSet;
use time::Date;

/// One staff member on one date.
///
/// This is the unit of serialization for allocation and shift changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayKey {
    /// The staff member.
    pub staff_id: StaffId,
    /// The date.
    pub date: Date,
}

impl DayKey {
    /// Creates a new key.
    #[must_use]
    pub const fn new(staff_id: StaffId, date: Date) -> Self {
        Self { staff_id, date }
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.staff_id, self.date)
    }
}

/// Open shifts per staff member per date.
#[derive(Debug, Default)]
pub struct ShiftCalendar {
    days: DashMap<DayKey, BTreeSet<ShiftKind>>,
}

impl ShiftCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens or closes one shift. Idempotent.
    ///
    /// Returns true if the call changed the calendar.
    pub fn set_shift(&self, key: &DayKey, shift: ShiftKind, open: bool) -> bool {
        if open {
            self.days.entry(key.clone()).or_default().insert(shift)
        } else {
            let Some(mut shifts) = self.days.get_mut(key) else {
                return false;
            };
            let removed: bool = shifts.remove(&shift);
            let now_empty: bool = shifts.is_empty();
            drop(shifts);
            if now_empty {
                self.days.remove_if(key, |_, s| s.is_empty());
            }
            removed
        }
    }

    /// Returns the open shifts in chronological order.
    #[must_use]
    pub fn open_shifts(&self, key: &DayKey) -> Vec<ShiftKind> {
        self.days
            .get(key)
            .map(|shifts| shifts.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the windows of the open shifts in chronological order.
    #[must_use]
    pub fn open_windows(&self, key: &DayKey) -> Vec<TimeInterval> {
        self.open_shifts(key)
            .iter()
            .map(ShiftKind::window)
            .collect()
    }

    /// True iff some open shift's window fully contains `interval`.
    #[must_use]
    pub fn is_available(&self, key: &DayKey, interval: &TimeInterval) -> bool {
        self.open_windows(key)
            .iter()
            .any(|window| window.contains(interval))
    }
}
