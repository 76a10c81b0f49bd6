use core::fmt;

/// Why a poll produced no update.
///
/// Rejections are routine outcomes, not faults: the public operations
/// collapse them into "no update this cycle", and the most recent reason
/// is retained on the receiver for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// The quality/type indicators do not amount to a usable lock.
    NoLock,
    /// Position older than the staleness threshold, or never decoded.
    StalePosition,
    /// Time of day older than the staleness threshold, or never decoded.
    StaleTime,
    /// Date older than the staleness threshold, or never decoded.
    StaleDate,
    /// The dilution-of-precision source is stale or never decoded.
    StaleDop,
    /// Position fresh but not re-reported since it was last read.
    PositionNotUpdated,
    /// Latitude normalized to exactly zero, a known receiver sentinel for
    /// a bogus solution.
    BogusLatitude,
    /// Dilution of precision reported as zero; the solution is incomplete
    /// or erroneous.
    ZeroDop,
    /// The date/time fields do not form a valid calendar time.
    InvalidDateTime,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoLock => f.write_str("no usable satellite lock"),
            RejectReason::StalePosition => f.write_str("position data too old"),
            RejectReason::StaleTime => f.write_str("time of day too old"),
            RejectReason::StaleDate => f.write_str("date too old"),
            RejectReason::StaleDop => f.write_str("dilution of precision too old"),
            RejectReason::PositionNotUpdated => {
                f.write_str("position not re-reported since last read")
            }
            RejectReason::BogusLatitude => f.write_str("bogus zero-latitude position"),
            RejectReason::ZeroDop => f.write_str("zero dilution of precision"),
            RejectReason::InvalidDateTime => f.write_str("invalid date/time combination"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RejectReason {}
