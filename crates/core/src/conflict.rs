// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{DayKey, ShiftCalendar};
use bloom_domain::{Booking, BookingId, StaffId, TimeInterval};
use time::Date;

/// Why a slot cannot be allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotConflict {
    /// An active booking for the same staff and date already overlaps.
    DoubleBooked {
        /// The overlapping booking with the lowest id.
        existing: BookingId,
        /// That booking's interval.
        interval: TimeInterval,
    },
    /// No open shift fully contains the requested interval.
    OutsideWorkingHours {
        /// The requested interval.
        requested: TimeInterval,
    },
}

impl SlotConflict {
    /// Returns a stable machine-readable tag for the conflict.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DoubleBooked { .. } => "double_booked",
            Self::OutsideWorkingHours { .. } => "outside_hours",
        }
    }
}

impl std::fmt::Display for SlotConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoubleBooked { existing, interval } => {
                write!(f, "overlaps booking {existing} at {interval}")
            }
            Self::OutsideWorkingHours { requested } => {
                write!(f, "{requested} is not inside an open shift")
            }
        }
    }
}

impl std::error::Error for SlotConflict {}

/// Decides whether `interval` can be booked for `staff_id` on `date`.
///
/// With no staff there is nothing to check. Otherwise the interval must
/// lie inside one open shift, and must not overlap any active booking for
/// the same staff and date. Shift containment is checked first. When
/// several bookings overlap, the one with the lowest id is reported.
///
/// `existing` may contain bookings for other staff or dates; they are
/// ignored.
///
/// # Errors
///
/// Returns the first conflict found.
pub fn check_conflict<'a, I>(
    calendar: &ShiftCalendar,
    existing: I,
    staff_id: Option<&StaffId>,
    date: Date,
    interval: &TimeInterval,
) -> Result<(), SlotConflict>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let Some(staff_id) = staff_id else {
        return Ok(());
    };

    let key: DayKey = DayKey::new(staff_id.clone(), date);
    if !calendar.is_available(&key, interval) {
        return Err(SlotConflict::OutsideWorkingHours {
            requested: *interval,
        });
    }

    let overlapping: Option<&Booking> = existing
        .into_iter()
        .filter(|b| b.blocks(staff_id, date) && b.interval.overlaps(interval))
        .min_by_key(|b| b.id);

    match overlapping {
        Some(booking) => Err(SlotConflict::DoubleBooked {
            existing: booking.id,
            interval: booking.interval,
        }),
        None => Ok(()),
    }
}
