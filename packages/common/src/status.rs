use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of an award application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, awaiting a screening decision.
    Pending,
    /// Accepted into judging.
    Approved,
    /// Dropped during screening.
    Rejected,
}

impl ApplicationStatus {
    /// Returns true once a screening decision has been made.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// All possible status values.
    pub const ALL: &'static [ApplicationStatus] = &[Self::Pending, Self::Approved, Self::Rejected];

    /// Returns the wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Label used in tables and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            ApplicationStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        let json = serde_json::to_string(&ApplicationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Approved".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Approved
        );
        let err = "shortlisted".parse::<ApplicationStatus>().unwrap_err();
        assert!(err.to_string().contains("pending, approved, rejected"));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
        assert!(!ApplicationStatus::Pending.is_decided());
        assert!(ApplicationStatus::Rejected.is_decided());
    }
}
