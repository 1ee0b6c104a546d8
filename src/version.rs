//! Dotted numeric version numbers.
//!
//! Release tags are plain dotted tuples (`major.minor[.build[.revision]]`),
//! not full semver: no pre-release or build-metadata suffixes. Comparison is
//! lexicographic over the numeric components, and anything that does not
//! parse fails closed — [`is_newer`] reports "no update" rather than risking
//! a destructive action on malformed input.

use std::fmt;
use std::str::FromStr;

/// A parsed dotted version number with 2 to 4 numeric components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber {
    // Lexicographic derive over the component vector gives the intended
    // ordering, including `1.2 < 1.2.0` for a missing component.
    components: Vec<u64>,
}

impl VersionNumber {
    /// Returns the numeric components in order (major first).
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for VersionNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(format!("expected 2-4 dotted components, got {:?}", s));
        }

        let mut components = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("non-numeric version component in {:?}", s));
            }
            let value: u64 = part
                .parse()
                .map_err(|e| format!("version component overflow in {:?}: {e}", s))?;
            components.push(value);
        }

        Ok(Self { components })
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
            first = false;
        }
        Ok(())
    }
}

/// Returns `true` iff both strings parse as version numbers and `latest`
/// compares strictly greater than `current`.
///
/// Fails closed: a parse failure on either side logs a warning and reports
/// `false` (treated as "no update available"). Never panics.
pub fn is_newer(current: &str, latest: &str) -> bool {
    match (
        current.parse::<VersionNumber>(),
        latest.parse::<VersionNumber>(),
    ) {
        (Ok(cur), Ok(lat)) => lat > cur,
        (Err(e), _) => {
            tracing::warn!("cannot parse running version {current:?}: {e}");
            false
        }
        (_, Err(e)) => {
            tracing::warn!("cannot parse remote version {latest:?}: {e}");
            false
        }
    }
}
