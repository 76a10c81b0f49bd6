//! Field-level data model shared between the sentence-decoder seam and the
//! fix pipeline.
//!
//! The decoder owns the mutable per-sentence bookkeeping; the pipeline only
//! ever sees an immutable [`FixSnapshot`] captured at one poll tick, so all
//! evaluators read a mutually consistent view of a single decode cycle.

/// Age reported for a field that has never been successfully decoded.
pub const AGE_NEVER: u32 = u32::MAX;

/// A latitude or longitude as delivered by the sentence decoder: whole
/// degrees plus billionths of a degree, with the hemisphere sign carried
/// separately.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawDegrees {
    /// Whole degrees, non-negative and at most 180.
    pub degrees: i32,
    /// Fractional part in billionths of a degree, always below 10^9.
    pub billionths: u32,
    /// True for southern latitudes and western longitudes.
    pub negative: bool,
}

impl RawDegrees {
    /// Converts to fixed-point degrees, one count per 10^-7 degree.
    ///
    /// The sub-1e-7 remainder is truncated, matching the decoder's own
    /// decimal handling.
    pub fn to_fixed_degrees(self) -> i32 {
        let fixed = self.degrees * 10_000_000 + (self.billionths / 100) as i32;
        if self.negative {
            -fixed
        } else {
            fixed
        }
    }
}

/// The latitude/longitude pair from the last position sentence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPosition {
    pub latitude: RawDegrees,
    pub longitude: RawDegrees,
}

/// Decoded UTC time of day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Decoded UTC date. `year` is the full calendar year.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub year: u16,
    /// 1 through 12.
    pub month: u8,
    pub day: u8,
}

/// One decoder field captured at a poll tick: the decoded value plus the
/// bookkeeping the decoder keeps alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<T> {
    value: T,
    valid: bool,
    updated: bool,
    age_ms: u32,
}

impl<T> Field<T> {
    /// A successfully decoded field, `age_ms` milliseconds old.
    pub const fn new(value: T, updated: bool, age_ms: u32) -> Self {
        Self {
            value,
            valid: true,
            updated,
            age_ms,
        }
    }

    /// A field the decoder has not (or not successfully) decoded yet.
    pub fn missing() -> Self
    where
        T: Default,
    {
        Self {
            value: T::default(),
            valid: false,
            updated: false,
            age_ms: AGE_NEVER,
        }
    }

    pub fn value(&self) -> T
    where
        T: Copy,
    {
        self.value
    }

    /// Whether the last decode of this field produced a sane value.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the decoder re-reported this field since it was last
    /// consumed by the pipeline.
    pub const fn is_updated(&self) -> bool {
        self.updated
    }

    /// Milliseconds since the last successful decode, [`AGE_NEVER`] if
    /// there was none.
    pub const fn age_ms(&self) -> u32 {
        self.age_ms
    }

    /// Valid and strictly younger than `max_age_ms`.
    pub fn is_fresh(&self, max_age_ms: u32) -> bool {
        self.valid && self.age_ms < max_age_ms
    }

    /// Clears the updated flag. Decoder implementations call this from
    /// [`SentenceDecoder::mark_consumed`].
    pub fn clear_updated(&mut self) {
        self.updated = false;
    }
}

impl<T: Default> Default for Field<T> {
    fn default() -> Self {
        Self::missing()
    }
}

/// Every field the pipeline reads, captured together at one poll tick.
///
/// The two GSA-sourced custom fields are `None` on decoder builds that do
/// not track them; that degraded mode is supported, not an error, and is
/// distinct from a tracked field holding zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixSnapshot {
    /// Raw latitude/longitude.
    pub position: Field<RawPosition>,
    /// UTC time of day.
    pub time: Field<TimeOfDay>,
    /// UTC date.
    pub date: Field<Date>,
    /// GGA positioning fix quality indicator, raw.
    pub fix_quality: Field<u8>,
    /// Horizontal dilution of precision, hundredths.
    pub hdop: Field<u16>,
    /// GSA 2D/3D fix type indicator, raw.
    pub fix_type: Option<Field<u8>>,
    /// GSA positional dilution of precision, hundredths.
    pub pdop: Option<Field<u16>>,
    /// Satellites used in the solution.
    pub satellites: Field<u8>,
    /// Course over ground, hundredths of a degree.
    pub course: Field<u32>,
    /// Reported altitude, meters.
    pub altitude: Field<f32>,
    /// Geoidal separation, meters.
    pub geoid_height: Field<f32>,
}

/// The sentence-decoding collaborator: assembles and checksums sentences
/// from raw bytes and keeps per-field validity, update and age bookkeeping.
///
/// Implementations typically wrap an NMEA parsing library together with a
/// millisecond clock for the age tracking. If the build tracks the GSA
/// custom fields (fix type, positional DOP) it reports them in the
/// snapshot; otherwise it returns `None` for both and the pipeline degrades
/// gracefully.
pub trait SentenceDecoder {
    /// Feeds one raw byte. Returns true when the byte completed a sentence
    /// that passed checksum validation.
    fn feed(&mut self, byte: u8) -> bool;

    /// Captures a mutually consistent snapshot of all tracked fields.
    ///
    /// All ages must be measured to the same instant, and no field may be
    /// taken from a newer decode cycle than another.
    fn snapshot(&self) -> FixSnapshot;

    /// Clears the updated flags of the consumable fields: position,
    /// satellite count and course. The pipeline calls this once per gated
    /// fix attempt, even when the attempt is later rejected — a bogus
    /// point is not worth a second read.
    fn mark_consumed(&mut self);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_degrees_reference_point() {
        let raw = RawDegrees {
            degrees: 37,
            billionths: 520_825_000,
            negative: false,
        };
        assert_eq!(raw.to_fixed_degrees(), 375_208_250);
    }

    #[test]
    fn fixed_degrees_negated_for_west() {
        let raw = RawDegrees {
            degrees: 122,
            billionths: 309_162_000,
            negative: true,
        };
        assert_eq!(raw.to_fixed_degrees(), -1_223_091_620);
    }

    #[test]
    fn fixed_degrees_truncates_sub_resolution() {
        let raw = RawDegrees {
            degrees: 0,
            billionths: 199,
            negative: false,
        };
        assert_eq!(raw.to_fixed_degrees(), 1);
    }

    #[test]
    fn missing_field_is_never_fresh() {
        let field: Field<u8> = Field::missing();
        assert!(!field.is_valid());
        assert!(!field.is_updated());
        assert_eq!(field.age_ms(), AGE_NEVER);
        assert!(!field.is_fresh(u32::MAX));
    }

    #[test]
    fn freshness_bound_is_strict() {
        let field = Field::new(7u8, true, 300);
        assert!(!field.is_fresh(300));
        assert!(field.is_fresh(301));
    }

    #[test]
    fn clear_updated_leaves_value_intact() {
        let mut field = Field::new(42u8, true, 10);
        field.clear_updated();
        assert!(!field.is_updated());
        assert!(field.is_valid());
        assert_eq!(field.value(), 42);
    }

    #[cfg(feature = "std")]
    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn monotonic_in_whole_degrees(
                degrees in 0i32..179,
                bump in 1i32..10,
                billionths in 0u32..1_000_000_000u32,
            ) {
                let lo = RawDegrees { degrees, billionths, negative: false };
                let hi = RawDegrees { degrees: degrees + bump, billionths, negative: false };
                prop_assert!(lo.to_fixed_degrees() < hi.to_fixed_degrees());
            }

            #[test]
            fn monotonic_in_billionths(
                degrees in 0i32..=180,
                b1 in 0u32..1_000_000_000u32,
                b2 in 0u32..1_000_000_000u32,
            ) {
                let (small, large) = if b1 <= b2 { (b1, b2) } else { (b2, b1) };
                let lo = RawDegrees { degrees, billionths: small, negative: false };
                let hi = RawDegrees { degrees, billionths: large, negative: false };
                prop_assert!(lo.to_fixed_degrees() <= hi.to_fixed_degrees());
            }
        }
    }
}
