//! Station types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station code such as `NS10` or `CC17`.
///
/// Codes are the unique key of a station in the network. Surrounding
/// whitespace is trimmed and an empty code is rejected; anything else,
/// including inner spaces, is a valid code.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationCode;
///
/// let code = StationCode::parse(" NS10 ").unwrap();
/// assert_eq!(code.as_str(), "NS10");
///
/// assert!(StationCode::parse("").is_err());
/// assert_eq!(StationCode::parse("CC 1").unwrap().as_str(), "CC 1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        Ok(StationCode(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense index of a station inside a [`MetroNetwork`](crate::network::MetroNetwork).
///
/// Ids are handed out in insertion order and stay valid for the life of
/// the network, since stations are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// A station in the metro network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    code: StationCode,

    /// Display name attached by the loader. Not unique: stations sharing a
    /// name are interchange platforms of the same physical location.
    pub name: Option<String>,
}

impl Station {
    /// Creates a station with no name attached.
    pub fn new(code: StationCode) -> Self {
        Self { code, name: None }
    }

    /// Returns the station's code.
    pub fn code(&self) -> &StationCode {
        &self.code
    }

    /// Returns the name for display, falling back to the code.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.code.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z]{1,3}[0-9]{1,3}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Padding never changes the parsed code
        #[test]
        fn padding_ignored(s in "[A-Z]{2}[0-9]{1,2}", pad in " {0,3}") {
            let padded = format!("{pad}{s}{pad}");
            prop_assert_eq!(StationCode::parse(&padded).unwrap(), StationCode::parse(&s).unwrap());
        }
    }
}
