//! Closed sets attached to every event row: the event category and the
//! certification level an event counts towards.
//!
//! The category decides whether attendance earns hour credits; exactly one
//! category (`Comida`) never does.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hours credited to each attendee of an hour-generating event.
pub const HOURS_PER_CREDIT: u32 = 3;

/// Type of a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Shared meal. Never earns hours.
    #[serde(rename = "Comida")]
    Comida,
    /// Hands-on workshop.
    #[serde(rename = "Taller")]
    Taller,
    /// Guided cultural visit.
    #[serde(rename = "Visita cultural")]
    VisitaCultural,
    /// Talk or presentation.
    #[serde(rename = "Charla")]
    Charla,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Comida,
        EventCategory::Taller,
        EventCategory::VisitaCultural,
        EventCategory::Charla,
    ];

    /// Stored/displayed label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Comida => "Comida",
            Self::Taller => "Taller",
            Self::VisitaCultural => "Visita cultural",
            Self::Charla => "Charla",
        }
    }

    /// Whether attending an event of this category earns hour credits.
    pub fn is_hour_generating(self) -> bool {
        !matches!(self, Self::Comida)
    }

    /// Credit per attendee, zero for non-hour-generating categories.
    pub fn hours_per_attendee(self) -> u32 {
        if self.is_hour_generating() {
            HOURS_PER_CREDIT
        } else {
            0
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for labels outside the category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown event category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Certification level an event counts towards (CEFR levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Certification {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Certification {
    pub const ALL: [Certification; 6] = [
        Certification::A1,
        Certification::A2,
        Certification::B1,
        Certification::B2,
        Certification::C1,
        Certification::C2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// Parse raw certification text; anything outside the set is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
    }

    /// Canonical label for raw text, or the empty string when unset/unknown.
    pub fn normalize(raw: &str) -> &'static str {
        Self::parse(raw).map(Self::label).unwrap_or("")
    }
}

impl fmt::Display for Certification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
