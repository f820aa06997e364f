use core::{
    fmt::{self, Display, Formatter},
    ops::{Add, AddAssign, Sub},
    time::Duration,
};
use std::{str::FromStr, time::SystemTime};

#[cfg(feature = "datasize")]
use datasize::DataSize;
use humantime::{DurationError, TimestampError};
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

/// A timestamp type, representing a concrete moment in time in whole
/// seconds since the Unix epoch, as supplied by the host with each
/// operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// The maximum value a timestamp can have.
    pub const MAX: Timestamp = Timestamp(u64::MAX);

    /// Returns a zero timestamp.
    pub const fn zero() -> Self {
        Timestamp(0)
    }

    /// Constructs a timestamp from a number of seconds since the Unix
    /// epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs)
    }

    /// Returns the timestamp as the number of seconds since the Unix
    /// epoch.
    pub fn secs(&self) -> u64 {
        self.0
    }

    /// Returns the difference between `self` and `other`, or `0` if
    /// `self` is earlier than `other`.
    pub fn saturating_diff(self, other: Timestamp) -> TimeDiff {
        TimeDiff(self.0.saturating_sub(other.0))
    }

    /// Returns the signed difference between `self` and `other` in
    /// seconds.
    pub fn signed_diff(self, other: Timestamp) -> i64 {
        self.0 as i64 - other.0 as i64
    }

    /// Returns the sum of `self` and `other`, or the maximum possible
    /// value if that would be exceeded.
    #[must_use]
    pub fn saturating_add(self, other: TimeDiff) -> Timestamp {
        Timestamp(self.0.saturating_add(other.0))
    }

    /// Returns the difference of `self` and `other`, or `0` if that
    /// would be before the epoch.
    #[must_use]
    pub fn saturating_sub(self, other: TimeDiff) -> Timestamp {
        Timestamp(self.0.saturating_sub(other.0))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(self.0)) {
            Some(system_time) => write!(f, "{}", humantime::format_rfc3339_seconds(system_time)),
            None => write!(f, "invalid Timestamp: {} s after the Unix epoch", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let system_time = humantime::parse_rfc3339_weak(value)?;
        let inner = system_time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| TimestampError::OutOfRange)?
            .as_secs();
        Ok(Timestamp(inner))
    }
}

impl Add<TimeDiff> for Timestamp {
    type Output = Timestamp;

    fn add(self, diff: TimeDiff) -> Timestamp {
        Timestamp(self.0 + diff.0)
    }
}

impl AddAssign<TimeDiff> for Timestamp {
    fn add_assign(&mut self, rhs: TimeDiff) {
        self.0 += rhs.0;
    }
}

impl Sub<TimeDiff> for Timestamp {
    type Output = Timestamp;

    fn sub(self, diff: TimeDiff) -> Timestamp {
        Timestamp(self.0 - diff.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let value_as_string = String::deserialize(deserializer)?;
            Timestamp::from_str(&value_as_string).map_err(SerdeError::custom)
        } else {
            let inner = u64::deserialize(deserializer)?;
            Ok(Timestamp(inner))
        }
    }
}

/// A time difference between two timestamps, in whole seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct TimeDiff(u64);

impl TimeDiff {
    /// Returns a zero time difference.
    pub const fn zero() -> Self {
        TimeDiff(0)
    }

    /// Constructs a time difference from a number of seconds.
    pub const fn from_secs(secs: u64) -> Self {
        TimeDiff(secs)
    }

    /// Returns the time difference as a number of seconds.
    pub fn secs(&self) -> u64 {
        self.0
    }

    /// Returns the sum of `self` and `other`, or the maximum possible
    /// value if that would be exceeded.
    #[must_use]
    pub fn saturating_add(self, other: TimeDiff) -> TimeDiff {
        TimeDiff(self.0.saturating_add(other.0))
    }
}

impl Display for TimeDiff {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(Duration::from_secs(self.0)))
    }
}

impl FromStr for TimeDiff {
    type Err = DurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let duration = humantime::parse_duration(value)?;
        Ok(TimeDiff(duration.as_secs()))
    }
}

impl Add<TimeDiff> for TimeDiff {
    type Output = TimeDiff;

    fn add(self, rhs: TimeDiff) -> TimeDiff {
        TimeDiff(self.0 + rhs.0)
    }
}

impl Serialize for TimeDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for TimeDiff {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let value_as_string = String::deserialize(deserializer)?;
            TimeDiff::from_str(&value_as_string).map_err(SerdeError::custom)
        } else {
            let inner = u64::deserialize(deserializer)?;
            Ok(TimeDiff(inner))
        }
    }
}
