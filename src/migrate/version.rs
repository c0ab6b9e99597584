//! Dotted integer versions

use super::error::MigrationError;
use std::fmt;
use std::str::FromStr;

/// A schema version such as `3.1.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(Vec<u64>);

/// Which way a document has to travel along the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Same,
}

impl Version {
    pub fn parse(s: &str) -> Result<Self, MigrationError> {
        let parts = s
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| MigrationError::InvalidVersion(s.to_string()))?;
        Ok(Self(parts))
    }

    /// Compare component by component; the first difference decides.
    pub fn direction(&self, to: &Version) -> Direction {
        for (from, to) in self.0.iter().zip(&to.0) {
            if from < to {
                return Direction::Up;
            }
            if from > to {
                return Direction::Down;
            }
        }
        Direction::Same
    }
}

impl FromStr for Version {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}
