//! Fix normalization: raw decoder fields to one atomic, unit-normalized
//! record.

use chrono::NaiveDate;

#[cfg(feature = "defmt")]
use defmt::debug;

use crate::{error::RejectReason, fields::FixSnapshot, receiver::Config};

/// Course values at or above 360.00 degrees are corrupt.
const MAX_COURSE_CENTIDEG: u32 = 36_000;

/// A validated positioning solution at one point in time.
///
/// Built at most once per successful poll and immutable afterwards; the
/// caller may persist or discard it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fix {
    /// Latitude in 10^-7 degree counts. Never exactly zero: receivers use
    /// a zeroed latitude to flag a bogus solution.
    pub latitude: i32,
    /// Longitude in 10^-7 degree counts.
    pub longitude: i32,
    /// Meters; includes the geoidal separation when the receiver reports
    /// height above ellipsoid.
    pub altitude_m: f32,
    /// Geoidal separation, meters.
    pub geoid_height_m: f32,
    /// Positional dilution of precision on the canonical unit scale.
    pub pdop: f32,
    /// Course over ground in 10^-5 degree counts; carried over from the
    /// previous fix when the receiver did not re-report it.
    pub heading: Option<i32>,
    /// Satellites used in the solution; carried over like `heading`.
    pub satellites: Option<u8>,
    /// Unix seconds assembled from the solution's date/time fields.
    pub timestamp: i64,
}

/// Builds a normalized fix from a gated snapshot.
///
/// `previous` supplies the carry-over values for the optional,
/// non-blocking fields. An `Err` leaves no trace: the caller keeps its
/// stored fix untouched.
pub(crate) fn build(
    snapshot: &FixSnapshot,
    config: &Config,
    previous: Option<&Fix>,
) -> Result<Fix, RejectReason> {
    let raw = snapshot.position.value();

    // Some receivers (the Air530 among them) report a zeroed position
    // while still claiming a fix; accepting it would overwrite good
    // stored data. Zero longitude is a real place, zero latitude paired
    // with a claimed fix is not.
    let latitude = raw.latitude.to_fixed_degrees();
    if latitude == 0 {
        return Err(RejectReason::BogusLatitude);
    }
    let longitude = raw.longitude.to_fixed_degrees();

    let pdop = dilution_of_precision(snapshot);
    if pdop == 0.0 {
        return Err(RejectReason::ZeroDop);
    }

    let geoid_height_m = snapshot.geoid_height.value();
    let altitude_m = if config.altitude_is_hae {
        snapshot.altitude.value() + geoid_height_m
    } else {
        snapshot.altitude.value()
    };

    let timestamp = position_timestamp(snapshot).ok_or(RejectReason::InvalidDateTime)?;

    let satellites = if snapshot.satellites.is_updated() {
        Some(snapshot.satellites.value())
    } else {
        previous.and_then(|fix| fix.satellites)
    };

    let heading = heading(snapshot).or_else(|| previous.and_then(|fix| fix.heading));

    Ok(Fix {
        latitude,
        longitude,
        altitude_m,
        geoid_height_m,
        pdop,
        heading,
        satellites,
        timestamp,
    })
}

/// Positional DOP on the unit scale: the GSA custom field (reported in
/// hundredths) when the decoder tracks it, otherwise approximated as
/// 1.41 x the horizontal DOP. The approximation assumes VDOP equals HDOP;
/// the exact relation would be sqrt(hdop^2 + vdop^2).
fn dilution_of_precision(snapshot: &FixSnapshot) -> f32 {
    match &snapshot.pdop {
        Some(pdop) => pdop.value() as f32 / 100.0,
        None => 1.41 * (snapshot.hdop.value() as f32 / 100.0),
    }
}

/// Course over ground scaled from hundredths of a degree to 10^-5 degree
/// counts. `None` when the field was not re-reported this cycle or the
/// raw value fails the sanity bound; either way the fix itself survives.
fn heading(snapshot: &FixSnapshot) -> Option<i32> {
    if !snapshot.course.is_updated() || !snapshot.course.is_valid() {
        return None;
    }
    let raw = snapshot.course.value();
    if raw >= MAX_COURSE_CENTIDEG {
        debug!("dropping corrupt course value: {}", raw);
        return None;
    }
    Some(raw as i32 * 1_000)
}

fn position_timestamp(snapshot: &FixSnapshot) -> Option<i64> {
    let date = snapshot.date.value();
    let time = snapshot.time.value();
    let datetime =
        NaiveDate::from_ymd_opt(i32::from(date.year), u32::from(date.month), u32::from(date.day))?
            .and_hms_opt(
                u32::from(time.hour),
                u32::from(time.minute),
                u32::from(time.second),
            )?;
    Some(datetime.and_utc().timestamp())
}
