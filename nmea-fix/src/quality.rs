//! Lock evaluation from the per-sentence quality indicators.

/// GGA positioning fix quality indicator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    /// 0: no fix available.
    #[default]
    NoFix,
    /// 1: autonomous GPS fix.
    Gps,
    /// 2: differential correction applied.
    Differential,
    /// 3: PPS fix.
    Pps,
    /// 4: RTK with fixed integer ambiguities.
    RtkFixed,
    /// 5: RTK with float ambiguities.
    RtkFloat,
    /// Anything else the receiver reports; reserved or invalid.
    Reserved(u8),
}

impl FixQuality {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::NoFix,
            1 => Self::Gps,
            2 => Self::Differential,
            3 => Self::Pps,
            4 => Self::RtkFixed,
            5 => Self::RtkFloat,
            other => Self::Reserved(other),
        }
    }

    /// Qualities 1 through 5 carry a usable solution. Quality alone is an
    /// optimistic signal on many receivers; see [`FixType`].
    pub fn is_usable(self) -> bool {
        !matches!(self, Self::NoFix | Self::Reserved(_))
    }
}

/// GSA 2D/3D solution-dimensionality indicator, finer-grained than
/// [`FixQuality`] but only present on decoder builds that track the GSA
/// custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixType {
    /// 0: the receiver has not reported the field yet.
    NoData,
    /// 1: no solution.
    NoFix,
    /// 2: two-dimensional solution, altitude unusable.
    TwoD,
    /// 3: full three-dimensional solution.
    ThreeD,
    /// Out-of-range value.
    Unknown(u8),
}

impl FixType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::NoData,
            1 => Self::NoFix,
            2 => Self::TwoD,
            3 => Self::ThreeD,
            other => Self::Unknown(other),
        }
    }
}

/// Lock decision over the most recently read indicators.
///
/// When the 2D/3D indicator is present it is authoritative: a 2D-only
/// solution yields no lock unless `accept_2d` relaxes the policy. An
/// absent indicator, or one that has received no data yet, leaves the
/// coarser quality field trusted alone.
pub(crate) fn has_lock(quality: FixQuality, fix_type: Option<FixType>, accept_2d: bool) -> bool {
    if !quality.is_usable() {
        return false;
    }
    match fix_type {
        None | Some(FixType::NoData) | Some(FixType::ThreeD) => true,
        Some(FixType::TwoD) => accept_2d,
        Some(FixType::NoFix) | Some(FixType::Unknown(_)) => false,
    }
}
