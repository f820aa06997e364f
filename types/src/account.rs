use core::{
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
};
use std::fmt;

#[cfg(feature = "datasize")]
use datasize::DataSize;
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

/// The length in bytes of an [`AccountHash`].
pub const ACCOUNT_HASH_LENGTH: usize = 32;

/// The prefix applied to the hex-encoded bytes to produce a formatted
/// string representation of an [`AccountHash`].
pub const ACCOUNT_HASH_FORMATTED_STRING_PREFIX: &str = "account-";

/// A newtype wrapping the raw bytes of an account address as assigned by
/// the host's account subsystem.
#[derive(Default, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct AccountHash(pub [u8; ACCOUNT_HASH_LENGTH]);

impl AccountHash {
    /// Constructs a new `AccountHash` from raw bytes.
    pub const fn new(value: [u8; ACCOUNT_HASH_LENGTH]) -> AccountHash {
        AccountHash(value)
    }

    /// Returns the raw bytes of the account hash as an array.
    pub fn value(&self) -> [u8; ACCOUNT_HASH_LENGTH] {
        self.0
    }

    /// Returns the raw bytes of the account hash as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Formats the `AccountHash` as a prefixed, hex-encoded string.
    pub fn to_formatted_string(self) -> String {
        format!(
            "{}{}",
            ACCOUNT_HASH_FORMATTED_STRING_PREFIX,
            base16::encode_lower(&self.0),
        )
    }

    /// Parses a string formatted as per `Self::to_formatted_string()`
    /// into an `AccountHash`.
    pub fn from_formatted_str(input: &str) -> Result<Self, FromStrError> {
        let remainder = input
            .strip_prefix(ACCOUNT_HASH_FORMATTED_STRING_PREFIX)
            .ok_or(FromStrError::InvalidPrefix)?;
        let decoded = base16::decode(remainder).map_err(|_| FromStrError::InvalidHex)?;
        let bytes = <[u8; ACCOUNT_HASH_LENGTH]>::try_from(decoded.as_slice())
            .map_err(|_| FromStrError::InvalidLength)?;
        Ok(AccountHash(bytes))
    }
}

/// Error while parsing an [`AccountHash`] from a formatted string.
#[derive(Debug, PartialEq, Eq)]
pub enum FromStrError {
    /// The prefix is invalid.
    InvalidPrefix,
    /// The hex encoding is invalid.
    InvalidHex,
    /// The decoded byte count is wrong.
    InvalidLength,
}

impl Display for FromStrError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            FromStrError::InvalidPrefix => write!(formatter, "invalid prefix"),
            FromStrError::InvalidHex => write!(formatter, "invalid hex encoding"),
            FromStrError::InvalidLength => write!(formatter, "wrong number of bytes"),
        }
    }
}

impl Serialize for AccountHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_formatted_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let formatted_string = String::deserialize(deserializer)?;
            AccountHash::from_formatted_str(&formatted_string).map_err(SerdeError::custom)
        } else {
            let bytes = <[u8; ACCOUNT_HASH_LENGTH]>::deserialize(deserializer)?;
            Ok(AccountHash(bytes))
        }
    }
}

impl Debug for AccountHash {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "AccountHash({})", base16::encode_lower(&self.0))
    }
}

impl Display for AccountHash {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", base16::encode_lower(&self.0))
    }
}

impl From<[u8; ACCOUNT_HASH_LENGTH]> for AccountHash {
    fn from(bytes: [u8; ACCOUNT_HASH_LENGTH]) -> Self {
        AccountHash(bytes)
    }
}

impl Distribution<AccountHash> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> AccountHash {
        AccountHash::new(rng.gen())
    }
}
