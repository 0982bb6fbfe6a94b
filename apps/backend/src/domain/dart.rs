//! Dart representation and validation.
//!
//! A dart is a board segment plus a ring multiplier. Valid segments are
//! 0 (a miss), 1..=20, and 25 (the bull). The bull has no treble ring, and a
//! miss is always recorded as a single. The "50" a scorer might call out is
//! the double bull, `(25, Double)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Board segment value of the bull.
pub const BULL: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplier {
    Single,
    Double,
    Treble,
}

impl Multiplier {
    pub fn factor(self) -> i16 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Treble => 3,
        }
    }

    /// Inverse of [`factor`](Self::factor), for rows read back from storage.
    pub fn from_factor(factor: i16) -> Result<Self, DomainError> {
        match factor {
            1 => Ok(Multiplier::Single),
            2 => Ok(Multiplier::Double),
            3 => Ok(Multiplier::Treble),
            other => Err(DomainError::validation(
                ValidationKind::InvalidDart,
                format!("multiplier must be 1, 2 or 3, got {other}"),
            )),
        }
    }
}

/// A single thrown dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dart {
    pub(crate) segment: u8,
    pub(crate) multiplier: Multiplier,
}

impl Dart {
    /// Construct a validated dart.
    pub fn new(segment: u8, multiplier: Multiplier) -> Result<Self, DomainError> {
        let valid = match segment {
            0 => multiplier == Multiplier::Single,
            1..=20 => true,
            BULL => multiplier != Multiplier::Treble,
            _ => false,
        };
        if !valid {
            return Err(DomainError::validation(
                ValidationKind::InvalidDart,
                format!("no {multiplier:?} ring for segment {segment}"),
            ));
        }
        Ok(Self {
            segment,
            multiplier,
        })
    }

    /// A dart that missed the board entirely.
    pub fn miss() -> Self {
        Self {
            segment: 0,
            multiplier: Multiplier::Single,
        }
    }

    pub fn single(segment: u8) -> Result<Self, DomainError> {
        Self::new(segment, Multiplier::Single)
    }

    pub fn double(segment: u8) -> Result<Self, DomainError> {
        Self::new(segment, Multiplier::Double)
    }

    pub fn treble(segment: u8) -> Result<Self, DomainError> {
        Self::new(segment, Multiplier::Treble)
    }

    pub fn segment(&self) -> u8 {
        self.segment
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Points this dart scores.
    pub fn value(&self) -> i16 {
        i16::from(self.segment) * self.multiplier.factor()
    }

    /// True for any double-ring hit, including the double bull.
    pub fn is_double(&self) -> bool {
        self.multiplier == Multiplier::Double
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.segment, self.multiplier) {
            (0, _) => write!(f, "MISS"),
            (BULL, Multiplier::Single) => write!(f, "SB"),
            (BULL, Multiplier::Double) => write!(f, "DB"),
            (n, Multiplier::Single) => write!(f, "S{n}"),
            (n, Multiplier::Double) => write!(f, "D{n}"),
            (n, Multiplier::Treble) => write!(f, "T{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(Dart::treble(20).unwrap().value(), 60);
        assert_eq!(Dart::double(25).unwrap().value(), 50);
        assert_eq!(Dart::single(25).unwrap().value(), 25);
        assert_eq!(Dart::miss().value(), 0);
    }

    #[test]
    fn rejects_impossible_darts() {
        assert!(Dart::treble(25).is_err());
        assert!(Dart::new(21, Multiplier::Single).is_err());
        assert!(Dart::new(0, Multiplier::Double).is_err());
    }

    #[test]
    fn display_notation() {
        assert_eq!(Dart::treble(20).unwrap().to_string(), "T20");
        assert_eq!(Dart::double(16).unwrap().to_string(), "D16");
        assert_eq!(Dart::single(5).unwrap().to_string(), "S5");
        assert_eq!(Dart::double(25).unwrap().to_string(), "DB");
        assert_eq!(Dart::miss().to_string(), "MISS");
    }

    #[test]
    fn double_bull_is_a_double() {
        assert!(Dart::double(25).unwrap().is_double());
        assert!(!Dart::single(25).unwrap().is_double());
    }
}
