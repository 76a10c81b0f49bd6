//! The receiver façade: the byte pump plus the per-poll fix pipeline.

#[cfg(feature = "defmt")]
use defmt::debug;

use crate::{
    error::RejectReason,
    fields::SentenceDecoder,
    fix::{self, Fix},
    gate,
    quality::{self, FixQuality, FixType},
    time::{self, ClockQuality, ReferenceClock},
};

/// Pipeline configuration. Runtime values rather than feature flags, so
/// both branches of every policy stay explicit and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Solutions with any constituent field at or above this age are
    /// rejected.
    pub max_field_age_ms: u32,
    /// The receiver reports altitude as height above ellipsoid; add the
    /// geoidal separation when deriving the output altitude.
    pub altitude_is_hae: bool,
    /// Treat a 2D-only solution as a usable lock. Off by default: a 2D
    /// solution is considered too imprecise for position storage.
    pub accept_2d_fix: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_field_age_ms: 300,
            altitude_is_hae: false,
            accept_2d_fix: false,
        }
    }
}

/// The serial-line collaborator, pull-only.
pub trait ByteTransport {
    /// Returns the next buffered byte, or `None` when nothing is pending.
    /// Must never wait for more bytes to arrive.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Owns the sentence decoder and the transport and runs the fix pipeline
/// over them.
///
/// All operations are non-blocking and complete within one poll tick. A
/// rejected attempt is "no update this cycle", never an error; the most
/// recent rejection reason is retained for diagnostics.
pub struct GpsReceiver<D, T> {
    decoder: D,
    transport: T,
    config: Config,
    quality: FixQuality,
    fix_type: Option<FixType>,
    fix: Option<Fix>,
    last_reject: Option<RejectReason>,
}

impl<D: SentenceDecoder, T: ByteTransport> GpsReceiver<D, T> {
    pub fn new(decoder: D, transport: T) -> Self {
        Self::with_config(decoder, transport, Config::default())
    }

    pub fn with_config(decoder: D, transport: T, config: Config) -> Self {
        Self {
            decoder,
            transport,
            config,
            quality: FixQuality::NoFix,
            fix_type: None,
            fix: None,
            last_reject: None,
        }
    }

    /// Drains every currently buffered byte into the decoder.
    ///
    /// Returns true iff at least one byte completed a validated sentence.
    /// This is the sole feeding point of the decoder; call it on every
    /// scheduler tick, independently of fix attempts, since sentences
    /// arrive regardless of when a fix is wanted.
    pub fn pump_incoming_bytes(&mut self) -> bool {
        let mut decoded = false;
        while let Some(byte) = self.transport.read_byte() {
            decoded |= self.decoder.feed(byte);
        }
        decoded
    }

    /// Offers the decoded wall-clock time to the reference clock, tagged
    /// as GPS-derived.
    ///
    /// Runs independently of lock state: time is often valid long before
    /// the position is. Returns true when a candidate was forwarded;
    /// whether the clock accepts it is the clock's decision.
    pub fn attempt_time_update(&mut self, clock: &mut impl ReferenceClock) -> bool {
        let snapshot = self.decoder.snapshot();
        match time::candidate_time(&snapshot) {
            Some(candidate) => {
                clock.offer(ClockQuality::Gps, candidate);
                true
            }
            None => false,
        }
    }

    /// Runs one fix-acquisition attempt over the current field state.
    ///
    /// On success the normalized fix is stored (see [`Self::last_fix`])
    /// and true is returned. Everything else yields false with the reason
    /// retained in [`Self::last_reject`]; the previously stored fix is
    /// left untouched.
    pub fn attempt_location_update(&mut self) -> bool {
        let snapshot = self.decoder.snapshot();

        self.quality = FixQuality::from_raw(snapshot.fix_quality.value());
        self.fix_type = snapshot.fix_type.map(|field| FixType::from_raw(field.value()));

        if !self.has_lock() {
            return self.reject(RejectReason::NoLock);
        }

        if let Err(reason) = gate::check(&snapshot, self.config.max_field_age_ms) {
            return self.reject(reason);
        }

        // The raw fields count as read from here on, even when the fix is
        // rejected below; a bogus point is not worth a second look.
        self.decoder.mark_consumed();

        match fix::build(&snapshot, &self.config, self.fix.as_ref()) {
            Ok(fix) => {
                self.fix = Some(fix);
                self.last_reject = None;
                true
            }
            Err(reason) => self.reject(reason),
        }
    }

    /// Whether the most recently read quality/type indicators amount to a
    /// usable lock.
    pub fn has_lock(&self) -> bool {
        quality::has_lock(self.quality, self.fix_type, self.config.accept_2d_fix)
    }

    /// The most recent normalized fix, if any attempt has succeeded.
    pub fn last_fix(&self) -> Option<Fix> {
        self.fix
    }

    /// Why the last location attempt produced no update.
    pub fn last_reject(&self) -> Option<RejectReason> {
        self.last_reject
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access to the owned decoder, e.g. for registering custom fields
    /// during receiver setup.
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    fn reject(&mut self, reason: RejectReason) -> bool {
        debug!("no fix this cycle: {}", reason);
        self.last_reject = Some(reason);
        false
    }
}
