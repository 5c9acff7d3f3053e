//! Module for timestamp-based unique ids.
//!
//! A stamp packs the creation time in milliseconds since a configurable
//! epoch into the high bits, with a wrapping per-generator sequence in the
//! low bits so that ids minted within the same millisecond stay distinct.

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
};
use thiserror::Error;
use time::{Duration, UtcDateTime};

pub const TIMESTAMP_OFFSET: u64 = 10;
pub const TIMESTAMP_LENGTH: u64 = 54;

pub const SEQUENCE_BITMASK: u64 = 0b11_1111_1111;
pub const SEQUENCE_LENGTH: u64 = 10;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum StampTimestampFromDateTimeError {
    #[error("Specified time was before the stamp epoch.")]
    TimeBeforeEpoch,
    #[error("Resulting timestamp uses too many bits.")]
    TimestampTooLarge,
}

pub trait Epoch {
    const EPOCH_TIME: UtcDateTime;
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct StampSequence(u16);

impl StampSequence {
    #[must_use]
    pub fn new(sequence: u16) -> Option<Self> {
        (u64::from(sequence) < 1 << SEQUENCE_LENGTH).then_some(Self(sequence))
    }

    #[must_use]
    pub fn new_unchecked(sequence: u16) -> Self {
        Self::new(sequence).expect("StampSequence out of range.")
    }

    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self((self.0 + 1) % (1 << SEQUENCE_LENGTH))
    }

    pub fn increment(&mut self) {
        *self = self.next();
    }
}

#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct StampTimestamp<StampEpoch>(u64, PhantomData<StampEpoch>);

impl<StampEpoch> StampTimestamp<StampEpoch> {
    #[must_use]
    pub fn new(millis: u64) -> Option<Self> {
        (millis < 1 << TIMESTAMP_LENGTH).then_some(Self(millis, PhantomData))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn from_time_unchecked(value: UtcDateTime) -> Self
    where
        StampEpoch: Epoch,
    {
        Self::try_from(value).expect("Cannot create timestamp.")
    }

    #[must_use]
    pub fn now() -> Self
    where
        StampEpoch: Epoch,
    {
        Self::from_time_unchecked(UtcDateTime::now())
    }
}

impl<StampEpoch: Epoch> TryFrom<UtcDateTime> for StampTimestamp<StampEpoch> {
    type Error = StampTimestampFromDateTimeError;

    fn try_from(value: UtcDateTime) -> Result<Self, Self::Error> {
        let millis = (value - StampEpoch::EPOCH_TIME).whole_milliseconds();
        if millis < 0 {
            return Err(Self::Error::TimeBeforeEpoch);
        }
        let millis_u64 = u64::try_from(millis).map_err(|_| Self::Error::TimestampTooLarge)?;
        Self::new(millis_u64).ok_or(Self::Error::TimestampTooLarge)
    }
}

impl<StampEpoch: Epoch> From<StampTimestamp<StampEpoch>> for UtcDateTime {
    fn from(value: StampTimestamp<StampEpoch>) -> Self {
        StampEpoch::EPOCH_TIME
            + Duration::milliseconds(value.0.try_into().expect("Invalid timestamp value"))
    }
}

#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Stamp<StampEpoch>(u64, #[serde(skip)] PhantomData<StampEpoch>);

impl<StampEpoch> Stamp<StampEpoch> {
    #[must_use]
    pub fn new(inner: u64) -> Self {
        Self(inner, PhantomData)
    }

    #[must_use]
    pub fn from_parts(timestamp: StampTimestamp<StampEpoch>, sequence: StampSequence) -> Self {
        let stamp = timestamp.get() << TIMESTAMP_OFFSET | u64::from(sequence.get());

        Stamp(stamp, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn timestamp(self) -> StampTimestamp<StampEpoch> {
        StampTimestamp(self.0 >> TIMESTAMP_OFFSET, PhantomData)
    }

    #[must_use]
    pub fn sequence(self) -> StampSequence {
        #[allow(clippy::cast_possible_truncation)]
        StampSequence((self.0 & SEQUENCE_BITMASK) as u16)
    }

    #[must_use]
    pub fn into_parts(self) -> (StampTimestamp<StampEpoch>, StampSequence) {
        (self.timestamp(), self.sequence())
    }
}

impl<StampEpoch> Display for Stamp<StampEpoch> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<StampEpoch> From<u64> for Stamp<StampEpoch> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<StampEpoch> From<Stamp<StampEpoch>> for u64 {
    fn from(value: Stamp<StampEpoch>) -> Self {
        value.get()
    }
}

#[derive_where(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct StampGenerator<StampEpoch> {
    next_sequence: StampSequence,
    phantom_data: PhantomData<StampEpoch>,
}

impl<StampEpoch> StampGenerator<StampEpoch> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_sequence: StampSequence::new_unchecked(0),
            phantom_data: PhantomData,
        }
    }

    pub fn generate_at(&mut self, time: UtcDateTime) -> Stamp<StampEpoch>
    where
        StampEpoch: Epoch,
    {
        let sequence = self.next_sequence;
        self.next_sequence.increment();

        Stamp::from_parts(StampTimestamp::from_time_unchecked(time), sequence)
    }

    pub fn generate(&mut self) -> Stamp<StampEpoch>
    where
        StampEpoch: Epoch,
    {
        self.generate_at(UtcDateTime::now())
    }
}
