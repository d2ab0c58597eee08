use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseClassPreferenceError;

/// Travel class filter applied to coach labels when collecting charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassPreference {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "3A")]
    ThirdAc,
    #[serde(rename = "2A")]
    SecondAc,
    #[serde(rename = "1A")]
    FirstAc,
}

impl ClassPreference {
    pub const VARIANTS: [ClassPreference; 5] = [
        ClassPreference::All,
        ClassPreference::Sleeper,
        ClassPreference::ThirdAc,
        ClassPreference::SecondAc,
        ClassPreference::FirstAc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Sleeper => "SL",
            Self::ThirdAc => "3A",
            Self::SecondAc => "2A",
            Self::FirstAc => "1A",
        }
    }

    /// Resolves a raw form value. A missing or blank value means `ALL`; any
    /// other value must be one of the known codes.
    pub fn from_form_value(raw: Option<&str>) -> Result<Self, ParseClassPreferenceError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(value) => value.parse(),
        }
    }

    /// Whether a coach label such as `B3` or `S10` belongs to this class.
    ///
    /// Only labels of two or three characters containing a digit are
    /// considered coaches at all; engine and pantry labels are skipped.
    pub fn admits_coach(self, label: &str) -> bool {
        let label = label.trim();
        let len = label.chars().count();
        if !(2..=3).contains(&len) || !label.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        match self {
            Self::All => true,
            Self::ThirdAc => label.starts_with('B') || label.starts_with('M'),
            Self::SecondAc => label.starts_with('A'),
            Self::FirstAc => label.starts_with('H'),
            Self::Sleeper => label.starts_with('S'),
        }
    }
}

impl fmt::Display for ClassPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClassPreference {
    type Err = ParseClassPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::VARIANTS
            .into_iter()
            .find(|class| class.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseClassPreferenceError(trimmed.to_string()))
    }
}

/// One coach's occupancy chart as served by the railway chart service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachChart {
    #[serde(rename = "coachName", default, skip_serializing_if = "Option::is_none")]
    pub coach_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_coach_name: Option<String>,
    #[serde(rename = "bdd", default)]
    pub berths: Vec<Berth>,
}

impl CoachChart {
    pub fn display_name(&self) -> &str {
        self.scraped_coach_name
            .as_deref()
            .or(self.coach_name.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Berth {
    #[serde(rename = "berthNo")]
    pub berth_no: BerthNumber,
    #[serde(rename = "berthCode")]
    pub berth_code: String,
    #[serde(rename = "bsd", default)]
    pub legs: Vec<Leg>,
}

/// The chart service reports berth numbers as integers, but some captures
/// carry them as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BerthNumber {
    Number(i64),
    Text(String),
}

impl fmt::Display for BerthNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A station-to-station segment of a berth's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub occupancy: bool,
}

impl Leg {
    pub fn is_vacant(&self) -> bool {
        !self.occupancy
    }
}
