/// Display locales and their fixed strings.
///
/// Field labels, tier names and the fallback texts come from this table. Only
/// catalog-sourced free text (disease names, treatments, escalation criteria) goes through
/// machine translation.
use std::fmt;
use std::str::FromStr;

use vaidya_common::mcp_api::DisplayLabels;

use crate::model::Severity;
use crate::severity::FALLBACK_RECOMMENDATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    English,
    Hindi,
}

struct LocaleStrings {
    assessment: &'static str,
    disease: &'static str,
    severity: &'static str,
    treatment: &'static str,
    escalation: &'static str,
    risk_level: &'static str,
    recommendation: &'static str,
    mild: &'static str,
    moderate: &'static str,
    severe: &'static str,
    no_match_notice: &'static str,
    fallback_recommendation: &'static str,
}

const ENGLISH: LocaleStrings = LocaleStrings {
    assessment: "Health Assessment",
    disease: "Disease",
    severity: "Severity",
    treatment: "Treatment",
    escalation: "When to Escalate",
    risk_level: "Risk Level",
    recommendation: "General Recommendation",
    mild: "Mild",
    moderate: "Moderate",
    severe: "Severe",
    no_match_notice:
        "No specific disease matches found. Please consult a healthcare professional.",
    fallback_recommendation: FALLBACK_RECOMMENDATION,
};

const HINDI: LocaleStrings = LocaleStrings {
    assessment: "स्वास्थ्य मूल्यांकन",
    disease: "रोग",
    severity: "गंभीरता",
    treatment: "उपचार",
    escalation: "कब डॉक्टर को दिखाएं",
    risk_level: "जोखिम स्तर",
    recommendation: "सामान्य सलाह",
    mild: "हल्का",
    moderate: "मध्यम",
    severe: "गंभीर",
    no_match_notice:
        "कोई विशिष्ट रोग नहीं मिला। कृपया किसी स्वास्थ्य विशेषज्ञ से परामर्श करें।",
    fallback_recommendation: "सही निदान के लिए कृपया किसी स्वास्थ्य विशेषज्ञ से परामर्श करें।",
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected 'en' or 'hi')")]
pub struct UnsupportedLocale(pub String);

impl Locale {
    /// Language of the catalog data.
    pub const SOURCE: Locale = Locale::English;

    /// ISO 639-1 code, as sent to the translation service.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    pub fn needs_translation(self) -> bool {
        self != Self::SOURCE
    }

    fn strings(self) -> &'static LocaleStrings {
        match self {
            Self::English => &ENGLISH,
            Self::Hindi => &HINDI,
        }
    }

    pub fn labels(self) -> DisplayLabels {
        let s = self.strings();
        DisplayLabels {
            assessment: s.assessment.to_string(),
            disease: s.disease.to_string(),
            severity: s.severity.to_string(),
            treatment: s.treatment.to_string(),
            escalation: s.escalation.to_string(),
            risk_level: s.risk_level.to_string(),
            recommendation: s.recommendation.to_string(),
        }
    }

    pub fn severity_label(self, severity: Severity) -> &'static str {
        let s = self.strings();
        match severity {
            Severity::Mild => s.mild,
            Severity::Moderate => s.moderate,
            Severity::Severe => s.severe,
        }
    }

    pub fn no_match_notice(self) -> &'static str {
        self.strings().no_match_notice
    }

    pub fn fallback_recommendation(self) -> &'static str {
        self.strings().fallback_recommendation
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "hi" | "hindi" | "हिंदी" | "हिन्दी" => Ok(Self::Hindi),
            _ => Err(UnsupportedLocale(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
