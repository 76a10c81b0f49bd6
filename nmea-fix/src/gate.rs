//! The freshness gate: every constituent of a fix must come from the
//! current decode window.

use crate::{error::RejectReason, fields::FixSnapshot};

/// Checks that position, time, date and the dilution-of-precision source
/// are all valid and younger than `max_age_ms`, and that the position was
/// re-reported since it was last consumed.
///
/// The DOP source is the GSA positional DOP when the decoder tracks it,
/// the horizontal DOP otherwise. The updated-ness requirement applies to
/// position only: a fresh set of fields wrapped around a position the
/// receiver has not re-reported would re-emit the previous point under a
/// new timestamp.
pub(crate) fn check(snapshot: &FixSnapshot, max_age_ms: u32) -> Result<(), RejectReason> {
    if !snapshot.position.is_fresh(max_age_ms) {
        return Err(RejectReason::StalePosition);
    }
    if !snapshot.time.is_fresh(max_age_ms) {
        return Err(RejectReason::StaleTime);
    }
    if !snapshot.date.is_fresh(max_age_ms) {
        return Err(RejectReason::StaleDate);
    }
    let dop_fresh = match &snapshot.pdop {
        Some(pdop) => pdop.is_fresh(max_age_ms),
        None => snapshot.hdop.is_fresh(max_age_ms),
    };
    if !dop_fresh {
        return Err(RejectReason::StaleDop);
    }
    if !snapshot.position.is_updated() {
        return Err(RejectReason::PositionNotUpdated);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fields::{Date, Field, RawPosition, TimeOfDay};

    const THRESHOLD: u32 = 300;

    fn snapshot_with_ages(position: u32, time: u32, date: u32, hdop: u32) -> FixSnapshot {
        FixSnapshot {
            position: Field::new(RawPosition::default(), true, position),
            time: Field::new(TimeOfDay::default(), true, time),
            date: Field::new(Date::default(), true, date),
            hdop: Field::new(100, true, hdop),
            ..FixSnapshot::default()
        }
    }

    #[test]
    fn all_fresh_passes() {
        let snapshot = snapshot_with_ages(299, 0, 0, 0);
        assert_eq!(check(&snapshot, THRESHOLD), Ok(()));
    }

    #[test]
    fn position_over_threshold_rejects() {
        let snapshot = snapshot_with_ages(301, 0, 0, 0);
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StalePosition));
    }

    #[test]
    fn age_equal_to_threshold_rejects() {
        let snapshot = snapshot_with_ages(300, 0, 0, 0);
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StalePosition));
    }

    #[test]
    fn each_companion_field_gates() {
        let snapshot = snapshot_with_ages(0, 400, 0, 0);
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StaleTime));

        let snapshot = snapshot_with_ages(0, 0, 400, 0);
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StaleDate));

        let snapshot = snapshot_with_ages(0, 0, 0, 400);
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StaleDop));
    }

    #[test]
    fn never_decoded_field_rejects() {
        let mut snapshot = snapshot_with_ages(0, 0, 0, 0);
        snapshot.date = Field::missing();
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StaleDate));
    }

    #[test]
    fn pdop_supersedes_hdop_as_dop_source() {
        // Stale HDOP does not matter once the custom PDOP field is tracked.
        let mut snapshot = snapshot_with_ages(0, 0, 0, 5_000);
        snapshot.pdop = Some(Field::new(180, true, 10));
        assert_eq!(check(&snapshot, THRESHOLD), Ok(()));

        // And a stale PDOP is not rescued by a fresh HDOP.
        let mut snapshot = snapshot_with_ages(0, 0, 0, 0);
        snapshot.pdop = Some(Field::new(180, true, 5_000));
        assert_eq!(check(&snapshot, THRESHOLD), Err(RejectReason::StaleDop));
    }

    #[test]
    fn unchanged_position_rejects() {
        let mut snapshot = snapshot_with_ages(0, 0, 0, 0);
        snapshot.position.clear_updated();
        assert_eq!(
            check(&snapshot, THRESHOLD),
            Err(RejectReason::PositionNotUpdated)
        );
    }
}
