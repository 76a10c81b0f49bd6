//! # nmea-fix
//!
//! This crate extracts trustworthy position-and-time fixes from the field
//! stream of an NMEA GPS receiver. Sentence tokenizing and checksumming are
//! owned by an external decoder; this crate owns the part that is easy to
//! get wrong: deciding whether the receiver holds a usable lock, rejecting
//! stale or partially stale field combinations, recognizing sentinel values
//! some receivers emit for bogus solutions, and normalizing what survives
//! into one atomic [`Fix`] record.
//!
//! Driving a receiver
//! ==================
//!
//! The pipeline is wired up through three trait seams: [`SentenceDecoder`]
//! for the field store, [`ByteTransport`] for the serial line, and
//! [`ReferenceClock`] for the clock subsystem that accepts candidate times.
//! A host feeds bytes and polls for updates on its own cadence:
//! ```
//! use nmea_fix::{ByteTransport, FixSnapshot, GpsReceiver, SentenceDecoder};
//!
//! struct StubDecoder(FixSnapshot);
//!
//! impl SentenceDecoder for StubDecoder {
//!     fn feed(&mut self, _byte: u8) -> bool {
//!         false
//!     }
//!     fn snapshot(&self) -> FixSnapshot {
//!         self.0
//!     }
//!     fn mark_consumed(&mut self) {}
//! }
//!
//! struct SilentLine;
//!
//! impl ByteTransport for SilentLine {
//!     fn read_byte(&mut self) -> Option<u8> {
//!         None
//!     }
//! }
//!
//! let mut receiver = GpsReceiver::new(StubDecoder(FixSnapshot::default()), SilentLine);
//! // Nothing decoded yet: no bytes, no lock, no fix.
//! assert!(!receiver.pump_incoming_bytes());
//! assert!(!receiver.attempt_location_update());
//! assert!(!receiver.has_lock());
//! assert!(receiver.last_fix().is_none());
//! ```
//!
//! Every public operation is non-blocking and returns within one poll tick.
//! A rejected attempt is "no update this cycle", distinguishable from
//! success only by its boolean return; the reason behind the most recent
//! rejection stays available through [`GpsReceiver::last_reject`] for
//! diagnostics.
//!
//! no_std support
//! ==============
//!
//! Disable the default `std` feature for no_std builds. The crate holds no
//! heap allocations and performs no blocking I/O; all state is a handful of
//! `Copy` structs sized for constrained firmware.

#![cfg_attr(not(feature = "std"), no_std)]

pub use crate::{
    error::RejectReason,
    fields::{
        Date, Field, FixSnapshot, RawDegrees, RawPosition, SentenceDecoder, TimeOfDay, AGE_NEVER,
    },
    fix::Fix,
    quality::{FixQuality, FixType},
    receiver::{ByteTransport, Config, GpsReceiver},
    time::{ClockQuality, ReferenceClock},
};

// Rejection-point logging; compiles to nothing without the defmt feature.
#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod error;
mod fields;
mod fix;
mod gate;
mod quality;
mod receiver;
mod time;
