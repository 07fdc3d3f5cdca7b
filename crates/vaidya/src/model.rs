use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Severity tier of a disease, ranked Mild < Moderate < Severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized severity tier: '{0}'")]
pub struct UnknownSeverity(pub String);

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// Display colour for the risk banner.
    pub fn color(self) -> &'static str {
        match self {
            Self::Mild => "green",
            Self::Moderate => "orange",
            Self::Severe => "red",
        }
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseRecord {
    pub disease: String,
    /// Free-text symptom description used as the match corpus.
    pub symptoms: String,
    pub severity: Severity,
    pub treatment: String,
    pub escalation_criteria: String,
}

/// Outcome of one symptom query. Borrows the matched records from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub matches: Vec<&'a DiseaseRecord>,
    pub overall_severity: Severity,
    pub recommendation: &'a str,
}

/// A persisted consultation. `diagnosis` is the JSON match summary, `None` when nothing
/// matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRecord {
    pub timestamp: String,
    pub symptoms: String,
    pub diagnosis: Option<String>,
    pub risk_level: Severity,
    pub recommendation: String,
}
