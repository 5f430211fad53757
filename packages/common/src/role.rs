use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role carried in the session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Judge,
    Journalist,
}

impl Role {
    pub const ALL: &'static [Role] = &[Self::SuperAdmin, Self::Admin, Self::Judge, Self::Journalist];

    /// Roles allowed into the administrative sections.
    pub const STAFF: &'static [Role] = &[Self::SuperAdmin, Self::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Judge => "JUDGE",
            Self::Journalist => "JOURNALIST",
        }
    }

    pub fn is_staff(&self) -> bool {
        Self::STAFF.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    invalid: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid role '{}'. Valid values: {}",
            self.invalid,
            Role::ALL
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "JUDGE" => Ok(Self::Judge),
            "JOURNALIST" => Ok(Self::Journalist),
            _ => Err(ParseRoleError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// The authority list attached to a guarded view.
///
/// An empty list means any signed-in role may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorities(pub &'static [Role]);

impl Authorities {
    pub const ANY: Authorities = Authorities(&[]);

    pub fn allows(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}
