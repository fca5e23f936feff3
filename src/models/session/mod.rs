//! Explicit caller context for store operations.
//!
//! The signed-in user and role travel with each call instead of living in
//! global state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Coordinator,
    #[default]
    Participant,
}

impl Role {
    /// Privileged roles may create, edit and delete events.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Coordinator)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coordinator => "coordinator",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "coordinator" => Ok(Self::Coordinator),
            "participant" => Ok(Self::Participant),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub role: Role,
}

impl Session {
    pub fn new(user: impl Into<String>, role: Role) -> Self {
        Self {
            user: user.into(),
            role,
        }
    }

    pub fn can_manage_events(&self) -> bool {
        self.role.is_privileged()
    }
}
