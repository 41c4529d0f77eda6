// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The tourist cancellation notice policy.
//!
//! A tourist may cancel a booking only while the trip start moment is at
//! least 24 hours away. The start moment of a calendar start date is its
//! midnight in UTC; trip dates carry no time-of-day component.

use time::{Date, Duration, OffsetDateTime};

use crate::error::DomainError;

/// Minimum notice a tourist must give to cancel a booking.
pub const MIN_CANCELLATION_NOTICE: Duration = Duration::hours(24);

/// The instant a trip starting on `start_date` begins, i.e. midnight UTC.
#[must_use]
pub fn trip_start_moment(start_date: Date) -> OffsetDateTime {
    start_date.midnight().assume_utc()
}

/// Validates that `now` leaves at least the minimum cancellation notice
/// before the trip start moment.
///
/// Exactly 24 hours of notice is sufficient; one minute less is not.
///
/// # Errors
///
/// Returns `DomainError::CancellationWindowClosed` when the notice is
/// shorter than [`MIN_CANCELLATION_NOTICE`].
pub fn validate_cancellation_notice(
    start_date: Date,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let notice: Duration = trip_start_moment(start_date) - now;
    if notice < MIN_CANCELLATION_NOTICE {
        return Err(DomainError::CancellationWindowClosed {
            start_date,
            hours_of_notice: notice.whole_hours(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_exactly_24_hours_of_notice_is_allowed() {
        let start = date!(2025 - 06 - 01);
        let now = datetime!(2025 - 05 - 31 00:00:00 UTC);

        assert!(validate_cancellation_notice(start, now).is_ok());
    }

    #[test]
    fn test_one_minute_short_of_notice_is_rejected() {
        let start = date!(2025 - 06 - 01);
        let now = datetime!(2025 - 05 - 31 00:01:00 UTC);

        let result = validate_cancellation_notice(start, now);
        assert!(matches!(
            result,
            Err(DomainError::CancellationWindowClosed { .. })
        ));
    }

    #[test]
    fn test_generous_notice_is_allowed() {
        let start = date!(2025 - 06 - 01);
        let now = datetime!(2025 - 05 - 01 12:00:00 UTC);

        assert!(validate_cancellation_notice(start, now).is_ok());
    }

    #[test]
    fn test_start_in_the_past_is_rejected() {
        let start = date!(2025 - 06 - 01);
        let now = datetime!(2025 - 06 - 02 00:00:00 UTC);

        let result = validate_cancellation_notice(start, now);
        match result {
            Err(DomainError::CancellationWindowClosed {
                hours_of_notice, ..
            }) => assert!(hours_of_notice < 0),
            other => panic!("Expected CancellationWindowClosed, got {other:?}"),
        }
    }
}
