//! Identifiers for accounts, categories and operations.
//!
//! An [`Id`] is a 26 character Crockford base32 string: 48 bits of
//! millisecond timestamp followed by 80 bits of randomness. Sorting ids
//! lexicographically approximates sorting them by creation time.

use std::{fmt, str::FromStr};

use chrono::Utc;
use parking_lot::Mutex;
use rand::{TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Alphabet used to encode identifiers (Crockford base32, no I/L/O/U).
pub const ID_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const ID_LEN: usize = 26;
const ZERO_ID: &str = "00000000000000000000000000";
const RANDOM_BITS: u32 = 80;
const RANDOM_MASK: u128 = (1 << RANDOM_BITS) - 1;
const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Validated identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Parses and normalizes (upper-cases) an identifier.
    ///
    /// Fails with [`EngineError::InvalidId`] when the value is empty, has the
    /// wrong length, contains characters outside [`ID_ALPHABET`] or is the
    /// reserved all-zero value.
    pub fn parse(value: &str) -> ResultEngine<Self> {
        if value.is_empty() {
            return Err(EngineError::InvalidId("id must not be empty".to_string()));
        }

        let value = value.to_ascii_uppercase();
        if value.len() != ID_LEN {
            return Err(EngineError::InvalidId(format!(
                "id must be {ID_LEN} characters, got {}",
                value.len()
            )));
        }
        if let Some(ch) = value.bytes().find(|b| !ID_ALPHABET.contains(b)) {
            return Err(EngineError::InvalidId(format!(
                "invalid character '{}' in id",
                ch as char
            )));
        }
        if value == ZERO_ID {
            return Err(EngineError::InvalidId("zero id is reserved".to_string()));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Id {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Id> for String {
    fn from(value: Id) -> Self {
        value.0
    }
}

/// Produces fresh identifiers for factories.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> ResultEngine<Id>;
}

/// Time-ordered identifier generator.
///
/// Within the same millisecond (or if the wall clock steps backwards) the
/// random part of the previous id is incremented, so ids produced by one
/// generator are strictly increasing.
#[derive(Debug, Default)]
pub struct UlidGenerator {
    last: Mutex<Option<u128>>,
}

impl UlidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self, now_ms: u64, random: u128) -> Id {
        let mut last = self.last.lock();
        let now_ms = now_ms.min(MAX_TIMESTAMP);
        let candidate = (u128::from(now_ms) << RANDOM_BITS) | (random & RANDOM_MASK);

        let value = match *last {
            Some(prev) if prev >> RANDOM_BITS >= u128::from(now_ms) => prev.wrapping_add(1),
            _ => candidate,
        };
        *last = Some(value);

        Id(encode(value))
    }
}

impl IdGenerator for UlidGenerator {
    fn new_id(&self) -> ResultEngine<Id> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes[6..])
            .map_err(|err| EngineError::Entropy(err.to_string()))?;
        let random = u128::from_be_bytes(bytes);
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);

        Ok(self.next(now_ms, random))
    }
}

fn encode(value: u128) -> String {
    (0..ID_LEN)
        .map(|i| {
            let shift = 5 * (ID_LEN - 1 - i);
            ID_ALPHABET[((value >> shift) & 0x1f) as usize] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn parse_normalizes_case() {
        let id = Id::parse("01arz3ndektsv4rrffq69g5fav").unwrap();
        assert_eq!(id.as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn parse_rejects_malformed_values() {
        for value in [
            "",
            "01ARZ3NDEK",
            "01ARZ3NDEKTSV4RRFFQ69G5FAVX",
            "01ARZ3NDEKTSV4RRFFQ69G5FAI",
            "01ARZ3NDEKTSV4RRFFQ69G5FA-",
            ZERO_ID,
        ] {
            let err = Id::parse(value).unwrap_err();
            assert!(matches!(err, EngineError::InvalidId(_)), "{value}: {err}");
        }
    }

    #[test]
    fn encode_puts_timestamp_in_high_bits() {
        let generator = UlidGenerator::new();
        let early = generator.next(1_000, u128::MAX);
        let generator = UlidGenerator::new();
        let late = generator.next(1_001, 0);

        assert!(early < late);
        assert_eq!(early.as_str().len(), ID_LEN);
        assert!(Id::parse(early.as_str()).is_ok());
    }

    #[test]
    fn same_millisecond_increments_random_part() {
        let generator = UlidGenerator::new();
        let first = generator.next(42, 500);
        let second = generator.next(42, 3);
        let third = generator.next(41, 900);

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn generates_unique_sorted_ids() {
        let generator = UlidGenerator::new();
        let ids: Vec<Id> = (0..100_000).map(|_| generator.new_id().unwrap()).collect();

        let unique: HashSet<&Id> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
