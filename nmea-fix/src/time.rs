//! Candidate wall-clock extraction for the external real-time-clock
//! subsystem.

use chrono::{NaiveDate, NaiveDateTime};

use crate::fields::FixSnapshot;

/// Quality ladder for the time sources competing over the reference
/// clock. The clock subsystem prefers higher-quality offers; this crate
/// always offers [`ClockQuality::Gps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockQuality {
    /// No trustworthy source has set the clock.
    None,
    /// The device's own oscillator, set at some point in the past.
    Device,
    /// Synchronized over the network.
    FromNet,
    /// Derived from a satellite fix.
    Gps,
}

/// The real-time-clock collaborator. It weighs each offer against the
/// quality of whatever already set the clock; acceptance is its decision,
/// not this crate's.
pub trait ReferenceClock {
    fn offer(&mut self, quality: ClockQuality, candidate: NaiveDateTime);
}

/// Assembles a calendar time from the decoded date and time-of-day
/// fields.
///
/// Validity alone is required, not freshness: a previously decoded time
/// is still usable for clock-setting purposes. Returns `None` when either
/// field is invalid or the combination is not a real calendar time. Epoch
/// conversion is deliberately not done here; the fix normalizer performs
/// it separately for the position timestamp.
pub(crate) fn candidate_time(snapshot: &FixSnapshot) -> Option<NaiveDateTime> {
    if !snapshot.time.is_valid() || !snapshot.date.is_valid() {
        return None;
    }
    let date = snapshot.date.value();
    let time = snapshot.time.value();
    NaiveDate::from_ymd_opt(i32::from(date.year), u32::from(date.month), u32::from(date.day))?
        .and_hms_opt(
            u32::from(time.hour),
            u32::from(time.minute),
            u32::from(time.second),
        )
}
