use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Layout of a single line in the log file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    /// The payload's compact JSON text and nothing else.
    #[default]
    Raw,
    /// `{"received_at":..,"source":..,"payload":..}` on one line.
    Envelope,
}

impl FromStr for LineFormat {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "envelope" => Ok(Self::Envelope),
            other => Err(TypesError::UnknownFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Envelope => f.write_str("envelope"),
        }
    }
}
