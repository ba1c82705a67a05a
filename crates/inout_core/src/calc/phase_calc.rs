//! Phase calculator.
//!
//! # Responsibility
//! - Count whole calendar days between the start date and a reference date.
//! - Fold the signed day count into the 28-day cycle.
//!
//! # Invariants
//! - Inputs are normalized to calendar dates before any arithmetic.
//! - Day counts come from calendar-date subtraction, never elapsed 24h
//!   periods, so DST transitions cannot shift the result.
//! - The fold is a true modulo: dates before the start date wrap into the
//!   previous cycle.
//! - Total over all representable dates; never panics.

use crate::model::phase::{CyclePhase, CYCLE_LENGTH_DAYS, OUT_PHASE_DAYS};
use crate::model::start_date::CycleStartDate;
use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Computes the phase on `reference` for a cycle starting on `start`.
///
/// Returns `CyclePhase::Unconfigured` when no start date is available.
pub fn compute_phase(start: Option<CycleStartDate>, reference: NaiveDate) -> CyclePhase {
    match start {
        Some(start) => CyclePhase::from_cycle_day(cycle_day(start, reference)),
        None => CyclePhase::Unconfigured,
    }
}

/// Computes the phase for an instant, using its calendar date in its own zone.
///
/// Two instants on the same local day always yield the same phase.
pub fn compute_phase_at<Tz: TimeZone>(
    start: Option<CycleStartDate>,
    reference: &DateTime<Tz>,
) -> CyclePhase {
    compute_phase(start, reference.date_naive())
}

/// Returns the position of `reference` inside the cycle, in `[0, 28)`.
pub fn cycle_day(start: CycleStartDate, reference: NaiveDate) -> u32 {
    let raw_diff = days_between(start.date(), reference);
    // rem_euclid keeps negative offsets in range; `%` alone would not.
    raw_diff.rem_euclid(i64::from(CYCLE_LENGTH_DAYS)) as u32
}

/// Signed count of whole calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Finds the first date after `reference` on which the phase kind flips.
///
/// Returns the date together with the phase on that date, or `None` when the
/// cycle is unconfigured or the date would leave chrono's calendar range.
pub fn next_transition(
    start: Option<CycleStartDate>,
    reference: NaiveDate,
) -> Option<(NaiveDate, CyclePhase)> {
    let start = start?;
    let day = cycle_day(start, reference);
    let remaining = if day < OUT_PHASE_DAYS {
        OUT_PHASE_DAYS - day
    } else {
        CYCLE_LENGTH_DAYS - day
    };
    let date = reference.checked_add_days(Days::new(u64::from(remaining)))?;
    Some((date, compute_phase(Some(start), date)))
}

#[cfg(test)]
mod tests {
    use super::{compute_phase, compute_phase_at, cycle_day, days_between, next_transition};
    use crate::model::phase::CyclePhase;
    use crate::model::start_date::CycleStartDate;
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};

    fn start() -> CycleStartDate {
        CycleStartDate::new(NaiveDate::from_ymd_opt(2024, 2, 20).expect("valid date"))
    }

    fn offset(days: i64) -> NaiveDate {
        start().date() + Duration::days(days)
    }

    #[test]
    fn boundaries_follow_seven_and_twenty_one_day_split() {
        let start = Some(start());
        assert_eq!(compute_phase(start, offset(0)), CyclePhase::Out { day_index: 0 });
        assert_eq!(compute_phase(start, offset(6)), CyclePhase::Out { day_index: 6 });
        assert_eq!(compute_phase(start, offset(7)), CyclePhase::In { day_index: 0 });
        assert_eq!(compute_phase(start, offset(27)), CyclePhase::In { day_index: 20 });
    }

    #[test]
    fn day_before_start_is_last_in_day_of_previous_cycle() {
        assert_eq!(
            compute_phase(Some(start()), offset(-1)),
            CyclePhase::In { day_index: 20 }
        );
        assert_eq!(
            compute_phase(Some(start()), offset(-22)),
            CyclePhase::Out { day_index: 6 }
        );
        assert_eq!(
            compute_phase(Some(start()), offset(-28)),
            CyclePhase::Out { day_index: 0 }
        );
    }

    #[test]
    fn every_offset_matches_euclidean_fold() {
        for d in -200_i64..200 {
            let expected_day = ((d % 28) + 28) % 28;
            let expected = if expected_day < 7 {
                CyclePhase::Out {
                    day_index: expected_day as u32,
                }
            } else {
                CyclePhase::In {
                    day_index: (expected_day - 7) as u32,
                }
            };
            assert_eq!(compute_phase(Some(start()), offset(d)), expected, "offset {d}");
        }
    }

    #[test]
    fn phase_repeats_every_twenty_eight_days() {
        for d in 0..28 {
            assert_eq!(
                compute_phase(Some(start()), offset(d)),
                compute_phase(Some(start()), offset(d + 28))
            );
        }
    }

    #[test]
    fn absent_start_is_always_unconfigured() {
        assert_eq!(compute_phase(None, offset(0)), CyclePhase::Unconfigured);
        assert_eq!(compute_phase(None, NaiveDate::MIN), CyclePhase::Unconfigured);
        assert_eq!(next_transition(None, offset(0)), None);
    }

    #[test]
    fn same_local_day_instants_share_a_phase() {
        let tz = FixedOffset::east_opt(9 * 3600).expect("valid offset");
        let morning = tz.with_ymd_and_hms(2024, 3, 1, 0, 0, 1).single().expect("valid");
        let night = tz.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).single().expect("valid");

        assert_eq!(
            compute_phase_at(Some(start()), &morning),
            compute_phase_at(Some(start()), &night)
        );
    }

    #[test]
    fn extreme_dates_do_not_panic() {
        let start = Some(start());
        assert!(compute_phase(start, NaiveDate::MIN).is_configured());
        assert!(compute_phase(start, NaiveDate::MAX).is_configured());
        assert_eq!(days_between(offset(0), offset(-3)), -3);
    }

    #[test]
    fn next_transition_points_at_next_phase_boundary() {
        let start = Some(start());
        assert_eq!(
            next_transition(start, offset(2)),
            Some((offset(7), CyclePhase::In { day_index: 0 }))
        );
        assert_eq!(
            next_transition(start, offset(7)),
            Some((offset(28), CyclePhase::Out { day_index: 0 }))
        );
        assert_eq!(
            next_transition(start, offset(-1)),
            Some((offset(0), CyclePhase::Out { day_index: 0 }))
        );
        assert_eq!(cycle_day(start.expect("set"), offset(-1)), 27);
    }
}
