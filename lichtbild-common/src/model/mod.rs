pub mod post;
pub mod user;

use crate::stamp::{Epoch, Stamp, StampGenerator};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use time::{UtcDateTime, macros::utc_datetime};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct LichtbildEpoch;
impl Epoch for LichtbildEpoch {
    const EPOCH_TIME: UtcDateTime = utc_datetime!(2025-01-01 00:00);
}

pub type LichtbildStamp = Stamp<LichtbildEpoch>;
pub type LichtbildStampGenerator = StampGenerator<LichtbildEpoch>;

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id<Marker>(LichtbildStamp, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(stamp: LichtbildStamp) -> Self {
        Self(stamp, PhantomData)
    }

    #[must_use]
    pub fn stamp(self) -> LichtbildStamp {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<LichtbildStamp> for Id<Marker> {
    fn from(value: LichtbildStamp) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for LichtbildStamp {
    fn from(value: Id<Marker>) -> Self {
        value.0
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(LichtbildStamp::new(value))
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.stamp().get()
    }
}
