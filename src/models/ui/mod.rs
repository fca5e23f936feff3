// UI models module
// View modes shared by the settings store and the renderers

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    Week,
    #[default]
    Month,
}

impl ViewType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Week" => Ok(Self::Week),
            "Month" => Ok(Self::Month),
            other => Err(format!("Unknown view type: {}", other)),
        }
    }
}
